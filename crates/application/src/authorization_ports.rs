use async_trait::async_trait;
use bouwdesk_core::AppResult;
use bouwdesk_domain::{Profile, ProfileId};

/// Port supplying the profile bound to the current request's session.
///
/// Implementations only read an already authenticated session; credentials
/// are verified elsewhere.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns the session profile, or `None` when the caller has no valid session.
    async fn current_profile(&self) -> AppResult<Option<Profile>>;
}

/// Repository port for profile records.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds one profile by id.
    async fn find_profile(&self, profile_id: ProfileId) -> AppResult<Option<Profile>>;

    /// Stores a new profile record.
    async fn insert_profile(&self, profile: Profile) -> AppResult<()>;
}
