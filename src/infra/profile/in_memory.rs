// In-memory implementation of UserStore.
//
// Account creation itself belongs to the auth service; this store only
// needs to hand profiles back, plus a seeding helper for tests and demos.

use crate::core::profile::{ProfileError, UserProfile, UserStore};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory user store backed by a concurrent map.
pub struct InMemoryUserStore {
    users: DashMap<u64, UserProfile>,
    next_id: AtomicU64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Seed a user, assigning it a fresh id.
    pub fn insert_user(&self, mut user: UserProfile) -> UserProfile {
        user.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.users.insert(user.id, user.clone());
        user
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_user(&self, user_id: u64) -> Result<Option<UserProfile>, ProfileError> {
        Ok(self.users.get(&user_id).map(|entry| entry.clone()))
    }
}
