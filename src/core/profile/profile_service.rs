// Profile retrieval - read-only view of a patient's account details.
//
// Credentials never leave the store: the profile model simply has no
// password field, so there is nothing to strip at the call sites.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("User not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),
}

/// The subset of account data shown on the profile screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub dob: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    #[serde(default)]
    pub profile_image: String,
}

/// Trait for looking up user profiles.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, user_id: u64) -> Result<Option<UserProfile>, ProfileError>;
}

pub struct ProfileService<S: UserStore> {
    store: S,
}

impl<S: UserStore> ProfileService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn get_profile(&self, user_id: u64) -> Result<UserProfile, ProfileError> {
        self.store
            .find_user(user_id)
            .await?
            .ok_or(ProfileError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::profile::InMemoryUserStore;

    #[tokio::test]
    async fn test_get_profile() {
        let store = InMemoryUserStore::new();
        let user = store.insert_user(UserProfile {
            id: 0,
            name: "Sri".to_string(),
            email: "sri@example.com".to_string(),
            dob: Some("1994-06-02".to_string()),
            height: Some(172.0),
            weight: Some(64.5),
            profile_image: String::new(),
        });

        let service = ProfileService::new(store);
        let profile = service.get_profile(user.id).await.unwrap();

        assert_eq!(profile.name, "Sri");
        assert_eq!(profile.email, "sri@example.com");
    }

    #[tokio::test]
    async fn test_missing_user() {
        let service = ProfileService::new(InMemoryUserStore::new());

        let err = service.get_profile(99).await.unwrap_err();
        assert!(matches!(err, ProfileError::NotFound));
    }
}
