use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use tiny_http::{Response, Server};
use tokio::runtime::Handle;
use url::Url;

use crate::app::App;
use crate::error::AppError;

/// CORS headers to allow requests from the front end's webview
fn cors_headers() -> Vec<tiny_http::Header> {
    vec![
        tiny_http::Header::from_bytes(&b"Access-Control-Allow-Origin"[..], &b"*"[..]).unwrap(),
        tiny_http::Header::from_bytes(
            &b"Access-Control-Allow-Methods"[..],
            &b"GET, POST, OPTIONS"[..],
        )
        .unwrap(),
        tiny_http::Header::from_bytes(&b"Access-Control-Allow-Headers"[..], &b"Content-Type"[..])
            .unwrap(),
    ]
}

/// Helper to create a JSON response with CORS headers
fn json_response(status: u16, body: String) -> Response<std::io::Cursor<Vec<u8>>> {
    let mut response = Response::from_string(body)
        .with_header(
            tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
        )
        .with_status_code(status);

    for header in cors_headers() {
        response.add_header(header);
    }

    response
}

/// Helper to create an empty response for OPTIONS preflight requests
fn preflight_response() -> Response<std::io::Empty> {
    let mut response = Response::empty(204);
    for header in cors_headers() {
        response.add_header(header);
    }
    response
}

type Reply = (u16, String);

fn ok() -> Reply {
    (200, serde_json::json!({"status": "ok"}).to_string())
}

fn error(status: u16, message: impl std::fmt::Display) -> Reply {
    (status, serde_json::json!({"error": message.to_string()}).to_string())
}

fn from_result(result: Result<Reply, AppError>) -> Reply {
    result.unwrap_or_else(|e| {
        tracing::error!("{}", e);
        error(500, e)
    })
}

fn param<'a>(params: &'a HashMap<String, String>, name: &str) -> Result<&'a str, Reply> {
    params
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| error(400, format!("missing parameter: {}", name)))
}

/// Localhost HTTP surface through which the front end calls into [`App`]
pub struct ControlServer {
    pub port: u16,
    server: Arc<Server>,
}

impl ControlServer {
    /// Bind `127.0.0.1:port` (0 picks a free port) and serve on a background
    /// thread. Operations run on `runtime`.
    pub fn start(app: Arc<App>, runtime: Handle, port: u16) -> Result<Self, String> {
        let server = Server::http(("127.0.0.1", port))
            .map_err(|e| format!("Failed to start control server: {}", e))?;

        let port = server
            .server_addr()
            .to_ip()
            .ok_or("Failed to get server address")?
            .port();

        tracing::info!("Control server started on port {}", port);

        let server = Arc::new(server);
        let server_clone = Arc::clone(&server);

        thread::spawn(move || {
            Self::run_server(server_clone, app, runtime);
        });

        Ok(Self { port, server })
    }

    /// Stop accepting requests
    pub fn stop(&self) {
        tracing::info!("Stopping control server");
        self.server.unblock();
    }

    fn run_server(server: Arc<Server>, app: Arc<App>, runtime: Handle) {
        for request in server.incoming_requests() {
            // Handle CORS preflight requests
            if request.method() == &tiny_http::Method::Options {
                request.respond(preflight_response()).ok();
                continue;
            }

            let full_url = format!("http://127.0.0.1{}", request.url());
            let url = match Url::parse(&full_url) {
                Ok(url) => url,
                Err(e) => {
                    tracing::error!("Failed to parse control server URL: {}", e);
                    let (status, body) = error(400, e);
                    request.respond(json_response(status, body)).ok();
                    continue;
                }
            };

            tracing::debug!("Control server received request: {}", url.path());

            let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
            let (status, body) = runtime.block_on(Self::dispatch(&app, url.path(), &params));

            request.respond(json_response(status, body)).ok();
        }
    }

    async fn dispatch(app: &App, path: &str, params: &HashMap<String, String>) -> Reply {
        match path {
            "/check_conn" => (
                200,
                serde_json::json!({"connection_failed": app.check_connection_failed().await})
                    .to_string(),
            ),
            "/reconnect" => (
                200,
                serde_json::json!({"success": app.reconnect().await}).to_string(),
            ),
            "/games" => (200, app.games_list().await),
            "/set_game" => {
                let (title, status) = match (param(params, "title"), param(params, "status")) {
                    (Ok(title), Ok(status)) => (title, status),
                    (Err(reply), _) | (_, Err(reply)) => return reply,
                };
                from_result(app.set_game(title, status).await.map(|_| ok()))
            }
            "/set_game_with_image" => {
                let args = (
                    param(params, "title"),
                    param(params, "status"),
                    param(params, "image"),
                );
                let (title, status, image) = match args {
                    (Ok(title), Ok(status), Ok(image)) => (title, status, image),
                    (Err(reply), _, _) | (_, Err(reply), _) | (_, _, Err(reply)) => return reply,
                };
                from_result(
                    app.set_game_with_image(title, status, image)
                        .await
                        .map(|_| ok()),
                )
            }
            "/pin" => match param(params, "title") {
                Ok(title) => from_result(app.pin_game(title).map(|_| ok())),
                Err(reply) => reply,
            },
            "/pins" => from_result(app.pins().map(|pins| (200, pins))),
            "/is_mac" => (
                200,
                serde_json::json!({"non_windows": app.is_non_windows_host()}).to_string(),
            ),
            "/switch" => {
                let console = params.get("console").map(String::as_str).unwrap_or_default();
                (
                    200,
                    serde_json::json!({"success": app.switch_platform(console).await}).to_string(),
                )
            }
            "/catalog/switch1" => (200, app.primary_catalog().await),
            "/catalog/switch2" => (200, app.secondary_catalog()),
            _ => error(404, "Not found"),
        }
    }
}
