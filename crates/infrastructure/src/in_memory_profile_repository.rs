use std::collections::HashMap;

use async_trait::async_trait;
use bouwdesk_application::ProfileRepository;
use bouwdesk_core::{AppError, AppResult};
use bouwdesk_domain::{Profile, ProfileId};
use tokio::sync::RwLock;

/// In-memory profile repository.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<ProfileId, Profile>>,
}

impl InMemoryProfileRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_profile(&self, profile_id: ProfileId) -> AppResult<Option<Profile>> {
        Ok(self.profiles.read().await.get(&profile_id).cloned())
    }

    async fn insert_profile(&self, profile: Profile) -> AppResult<()> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&profile.id())
            || profiles
                .values()
                .any(|existing| existing.email() == profile.email())
        {
            return Err(AppError::Conflict(format!(
                "profile '{}' already exists",
                profile.email()
            )));
        }

        profiles.insert(profile.id(), profile);
        Ok(())
    }
}
