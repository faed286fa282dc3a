use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ns_rpc_lib::{
    Activity, App, CatalogProvider, ClientIds, ControlServer, PinStore, PresenceClient,
    PresenceError, SessionManager, FALLBACK_CATALOG,
};
use serde_json::{json, Value};

#[derive(Default)]
struct Recorder {
    logins: Vec<String>,
    activities: Vec<Activity>,
    fail_login: bool,
}

struct RecordingClient(Arc<Mutex<Recorder>>);

#[async_trait]
impl PresenceClient for RecordingClient {
    fn name(&self) -> &'static str {
        "Recording"
    }

    async fn login(&mut self, client_id: &str) -> Result<(), PresenceError> {
        let mut recorder = self.0.lock().unwrap();
        recorder.logins.push(client_id.to_string());
        if recorder.fail_login {
            return Err(PresenceError::Unavailable("offline".to_string()));
        }
        Ok(())
    }

    async fn logout(&mut self) {}

    async fn set_activity(&mut self, activity: &Activity) -> Result<(), PresenceError> {
        self.0.lock().unwrap().activities.push(activity.clone());
        Ok(())
    }
}

struct Harness {
    dir: tempfile::TempDir,
    recorder: Arc<Mutex<Recorder>>,
    app: Arc<App>,
    server: ControlServer,
    http: reqwest::Client,
}

impl Harness {
    async fn new(fail_login: bool) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let recorder = Arc::new(Mutex::new(Recorder {
            fail_login,
            ..Recorder::default()
        }));

        let session = SessionManager::new(
            Box::new(RecordingClient(Arc::clone(&recorder))),
            ClientIds::default(),
        );
        let app = Arc::new(App::new(
            session,
            PinStore::new(dir.path().join("NS-RPC")),
            CatalogProvider::new(
                dir.path().join("games.json"),
                "http://127.0.0.1:9/games.json",
            ),
        ));
        app.startup().await.unwrap();

        let server =
            ControlServer::start(Arc::clone(&app), tokio::runtime::Handle::current(), 0).unwrap();

        Self {
            dir,
            recorder,
            app,
            server,
            http: reqwest::Client::new(),
        }
    }

    async fn get(&self, path_and_query: &str) -> (u16, String) {
        let url = format!("http://127.0.0.1:{}{}", self.server.port, path_and_query);
        let response = self.http.get(url).send().await.unwrap();
        let status = response.status().as_u16();
        (status, response.text().await.unwrap())
    }

    async fn get_json(&self, path_and_query: &str) -> Value {
        let (status, body) = self.get(path_and_query).await;
        assert_eq!(status, 200, "{}", body);
        serde_json::from_str(&body).unwrap()
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.server.stop();
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn pins_round_trip_through_server() {
    let harness = Harness::new(false).await;

    assert_eq!(
        harness.get_json("/pins").await,
        json!([{"title": "No Pins!", "img": ""}])
    );

    harness.get_json("/pin?title=Zelda").await;
    harness.get_json("/pin?title=Kirby%20and%20the%20Forgotten%20Land").await;
    assert_eq!(
        harness.get_json("/pins").await,
        json!([
            {"title": "Zelda", "img": ""},
            {"title": "Kirby and the Forgotten Land", "img": ""}
        ])
    );

    harness.get_json("/pin?title=Zelda").await;
    assert_eq!(
        harness.get_json("/pins").await,
        json!([{"title": "Kirby and the Forgotten Land", "img": ""}])
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn set_game_updates_activity() {
    let harness = Harness::new(false).await;

    harness.get_json("/set_game?title=Pikmin%204&status=exploring").await;
    harness.get_json("/set_game_with_image?title=Pikmin%204&status=online&image=pik4").await;

    let recorder = harness.recorder.lock().unwrap();
    let played: Vec<(&str, &str, &str)> = recorder
        .activities
        .iter()
        .skip(1)
        .map(|a| (a.image_key.as_str(), a.details.as_str(), a.state.as_str()))
        .collect();
    assert_eq!(
        played,
        [
            ("Pikmin 4", "Pikmin 4", "Exploring"),
            ("pik4", "Pikmin 4", "Online")
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_parameter_is_rejected() {
    let harness = Harness::new(false).await;

    let (status, body) = harness.get("/set_game?title=Pikmin%204").await;
    assert_eq!(status, 400);
    assert!(body.contains("status"));

    let (status, _) = harness.get("/nope").await;
    assert_eq!(status, 404);
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_login_is_visible_and_reconnect_recovers() {
    let harness = Harness::new(true).await;

    assert_eq!(harness.get_json("/check_conn").await, json!({"connection_failed": true}));
    assert_eq!(harness.get_json("/reconnect").await, json!({"success": false}));

    harness.recorder.lock().unwrap().fail_login = false;
    assert_eq!(harness.get_json("/reconnect").await, json!({"success": true}));
    assert!(!harness.app.check_connection_failed().await);
}

#[tokio::test(flavor = "multi_thread")]
async fn switch_uses_selected_client_id() {
    let harness = Harness::new(false).await;
    let ids = ClientIds::default();

    assert_eq!(
        harness.get_json("/switch?console=switch2").await,
        json!({"success": true})
    );
    harness.get_json("/switch?console=wii").await;

    let recorder = harness.recorder.lock().unwrap();
    assert_eq!(
        recorder.logins[1..],
        [ids.switch2.clone(), ids.switch1.clone()]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn catalogs_are_served_raw() {
    let harness = Harness::new(false).await;

    let (status, body) = harness.get("/games").await;
    assert_eq!(status, 200);
    assert_eq!(body, FALLBACK_CATALOG);

    let switch2 = harness.get_json("/catalog/switch2").await;
    assert_eq!(switch2.as_array().unwrap().len(), 3);

    let (_, body) = harness.get("/catalog/switch1").await;
    assert_eq!(body, FALLBACK_CATALOG);
}

#[tokio::test(flavor = "multi_thread")]
async fn preflight_gets_cors_headers() {
    let harness = Harness::new(false).await;
    let url = format!("http://127.0.0.1:{}/pins", harness.server.port);

    let response = harness
        .http
        .request(reqwest::Method::OPTIONS, url)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test(flavor = "multi_thread")]
async fn pin_storage_failure_is_server_error() {
    let harness = Harness::new(false).await;
    std::fs::write(harness.dir.path().join("NS-RPC"), "").unwrap();

    let (status, body) = harness.get("/pin?title=Zelda").await;
    assert_eq!(status, 500);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("pin storage error"));

    let (status, _) = harness.get("/pins").await;
    assert_eq!(status, 500);
}
