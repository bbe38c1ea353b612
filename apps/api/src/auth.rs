use serde::Deserialize;

mod bootstrap;
mod session;
mod session_provider;

pub use bootstrap::bootstrap_handler;
pub use session::{logout_handler, me_handler};
pub use session_provider::TowerSessionProvider;

/// Session key holding the authenticated profile.
pub const SESSION_PROFILE_KEY: &str = "profile";
/// Absolute session creation timestamp, checked on every read.
pub const SESSION_CREATED_AT_KEY: &str = "session_created_at";
/// Sessions older than this are rejected regardless of activity.
pub const SESSION_ABSOLUTE_TIMEOUT_SECONDS: i64 = 12 * 60 * 60;

#[derive(Debug, Deserialize)]
pub struct BootstrapRequest {
    pub profile_id: String,
    pub token: String,
}
