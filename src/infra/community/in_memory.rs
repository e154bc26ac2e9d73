// In-memory implementation of PostStore.
//
// DashMap keeps this safe across concurrent submissions without a Mutex:
// `get_mut` holds the shard lock for the duration of a reply append, so
// concurrent replies to the same post serialize instead of clobbering
// each other.

use crate::core::community::{CommunityError, NewEntry, Post, PostStore, Reply};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory post store backed by a concurrent map.
pub struct InMemoryPostStore {
    posts: DashMap<u64, Post>,
    next_id: AtomicU64,
}

impl InMemoryPostStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            posts: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn create_post(&self, entry: NewEntry) -> Result<Post, CommunityError> {
        let post = Post {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_name: entry.user_name,
            message: entry.message,
            replies: Vec::new(),
            created_at: Utc::now(),
        };
        self.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_post(&self, post_id: u64) -> Result<Option<Post>, CommunityError> {
        Ok(self.posts.get(&post_id).map(|entry| entry.clone()))
    }

    async fn append_reply(
        &self,
        post_id: u64,
        reply: NewEntry,
    ) -> Result<Option<Post>, CommunityError> {
        // The shard stays locked while we push, so this is an atomic
        // append rather than read-modify-write on the whole post.
        match self.posts.get_mut(&post_id) {
            Some(mut post) => {
                post.replies.push(Reply {
                    user_name: reply.user_name,
                    message: reply.message,
                    created_at: Utc::now(),
                });
                Ok(Some(post.clone()))
            }
            None => Ok(None),
        }
    }

    async fn list_posts(&self) -> Result<Vec<Post>, CommunityError> {
        let mut posts: Vec<Post> = self.posts.iter().map(|entry| entry.clone()).collect();
        // Newest first; ids break ties for posts created in the same instant.
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(posts)
    }
}
