// SQLite implementation of PostStore.
//
// Replies live in their own table, so appending one is a single
// parent-checked INSERT inside a transaction - never a read-modify-write
// of the whole post. Concurrent replies to the same post each land.

use crate::core::community::{CommunityError, NewEntry, Post, PostStore, Reply};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;

pub struct SqlitePostStore {
    pool: Pool<Sqlite>,
}

impl SqlitePostStore {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure the file exists if it's a file path
        let path_str = database_url.trim_start_matches("sqlite://");
        if !database_url.contains(":memory:") && !Path::new(path_str).exists() {
            if let Some(parent) = Path::new(path_str).parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::File::create(path_str)?;
        }

        let conn_str = if database_url.starts_with("sqlite:") {
            database_url.to_string()
        } else {
            format!("sqlite://{}", database_url)
        };

        // SQLite allows a single writer; one pooled connection keeps the
        // read-then-insert transactions from tripping over lock upgrades.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&conn_str)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_name TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS replies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                post_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
                user_name TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn load_replies(&self, post_id: i64) -> Result<Vec<Reply>, CommunityError> {
        let rows = sqlx::query(
            "SELECT user_name, message, created_at FROM replies WHERE post_id = ? ORDER BY id ASC",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(rows
            .iter()
            .map(|row| Reply {
                user_name: row.get("user_name"),
                message: row.get("message"),
                created_at: row.get::<DateTime<Utc>, _>("created_at"),
            })
            .collect())
    }
}

#[async_trait]
impl PostStore for SqlitePostStore {
    async fn create_post(&self, entry: NewEntry) -> Result<Post, CommunityError> {
        let created_at = Utc::now();

        let result = sqlx::query("INSERT INTO posts (user_name, message, created_at) VALUES (?, ?, ?)")
            .bind(&entry.user_name)
            .bind(&entry.message)
            .bind(created_at)
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        Ok(Post {
            id: result.last_insert_rowid() as u64,
            user_name: entry.user_name,
            message: entry.message,
            replies: Vec::new(),
            created_at,
        })
    }

    async fn find_post(&self, post_id: u64) -> Result<Option<Post>, CommunityError> {
        let row = sqlx::query("SELECT id, user_name, message, created_at FROM posts WHERE id = ?")
            .bind(post_id as i64)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: i64 = row.get("id");
        Ok(Some(Post {
            id: id as u64,
            user_name: row.get("user_name"),
            message: row.get("message"),
            replies: self.load_replies(id).await?,
            created_at: row.get::<DateTime<Utc>, _>("created_at"),
        }))
    }

    async fn append_reply(
        &self,
        post_id: u64,
        reply: NewEntry,
    ) -> Result<Option<Post>, CommunityError> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let parent = sqlx::query("SELECT id FROM posts WHERE id = ?")
            .bind(post_id as i64)
            .fetch_optional(&mut *tx)
            .await
            .map_err(storage)?;

        if parent.is_none() {
            // Dropping the transaction rolls it back.
            return Ok(None);
        }

        sqlx::query(
            "INSERT INTO replies (post_id, user_name, message, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(post_id as i64)
        .bind(&reply.user_name)
        .bind(&reply.message)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(storage)?;

        tx.commit().await.map_err(storage)?;

        self.find_post(post_id).await
    }

    async fn list_posts(&self) -> Result<Vec<Post>, CommunityError> {
        let rows = sqlx::query(
            "SELECT id, user_name, message, created_at FROM posts ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        let mut posts = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row.get("id");
            posts.push(Post {
                id: id as u64,
                user_name: row.get("user_name"),
                message: row.get("message"),
                replies: self.load_replies(id).await?,
                created_at: row.get::<DateTime<Utc>, _>("created_at"),
            });
        }

        Ok(posts)
    }
}

fn storage(err: sqlx::Error) -> CommunityError {
    CommunityError::Storage(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn entry(user_name: &str, message: &str) -> NewEntry {
        NewEntry {
            user_name: user_name.to_string(),
            message: message.to_string(),
        }
    }

    async fn temp_store() -> (tempfile::TempDir, SqlitePostStore) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("community.db");
        let store = SqlitePostStore::new(db_path.to_str().unwrap()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_create_find_and_list() {
        let (_dir, store) = temp_store().await;

        let first = store.create_post(entry("A", "One")).await.unwrap();
        let second = store.create_post(entry("B", "Two")).await.unwrap();
        assert_ne!(first.id, second.id);

        let found = store.find_post(first.id).await.unwrap().unwrap();
        assert_eq!(found.user_name, "A");
        assert_eq!(found.message, "One");

        let posts = store.list_posts().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].message, "Two");
        assert_eq!(posts[1].message, "One");
    }

    #[tokio::test]
    async fn test_append_reply_preserves_order() {
        let (_dir, store) = temp_store().await;
        let post = store.create_post(entry("A", "Original")).await.unwrap();

        store
            .append_reply(post.id, entry("B", "first reply"))
            .await
            .unwrap();
        let updated = store
            .append_reply(post.id, entry("C", "second reply"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.replies.len(), 2);
        assert_eq!(updated.replies[0].message, "first reply");
        assert_eq!(updated.replies[1].message, "second reply");
    }

    #[tokio::test]
    async fn test_append_reply_to_missing_post() {
        let (_dir, store) = temp_store().await;

        let result = store.append_reply(42, entry("X", "Hello")).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_replies_all_land() {
        let (_dir, store) = temp_store().await;
        let store = Arc::new(store);
        let post = store.create_post(entry("A", "Original")).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..10 {
            let store = Arc::clone(&store);
            let post_id = post.id;
            handles.push(tokio::spawn(async move {
                store
                    .append_reply(post_id, entry("Replier", &format!("reply {}", i)))
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_some());
        }

        let updated = store.find_post(post.id).await.unwrap().unwrap();
        assert_eq!(updated.replies.len(), 10);
    }
}
