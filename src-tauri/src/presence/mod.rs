mod activity;
mod platform;
mod session;
mod traits;

pub use activity::{title_case, Activity};
pub use platform::{ClientIds, Platform};
pub use session::{SessionManager, SessionState};
pub use traits::PresenceClient;
