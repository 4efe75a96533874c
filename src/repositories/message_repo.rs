use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, Message, UserRole};

#[derive(Clone)]
pub struct MessageRepository {
    pool: DbPool,
}

impl MessageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Message>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM messages WHERE id = ?")?;
            let result = stmt.query_row([&id], Message::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Inbox order: newest first.
    pub async fn find_all(&self) -> Result<Vec<Message>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM messages ORDER BY created_at DESC")?;
            let messages = stmt
                .query_map([], Message::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(messages)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        sender_id: &str,
        sender_name: &str,
        sender_role: UserRole,
        recipient_id: &str,
        recipient_name: &str,
        subject: &str,
        content: &str,
    ) -> Result<Message> {
        let message = Message {
            id: Uuid::new_v4().to_string(),
            sender_id: sender_id.to_string(),
            sender_name: sender_name.to_string(),
            sender_role,
            recipient_id: recipient_id.to_string(),
            recipient_name: recipient_name.to_string(),
            subject: subject.trim().to_string(),
            content: content.trim().to_string(),
            is_read: false,
            created_at: Utc::now(),
        };
        let message_clone = message.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO messages (id, sender_id, sender_name, sender_role, recipient_id,
                     recipient_name, subject, content, is_read, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    message_clone.id,
                    message_clone.sender_id,
                    message_clone.sender_name,
                    message_clone.sender_role.as_str(),
                    message_clone.recipient_id,
                    message_clone.recipient_name,
                    message_clone.subject,
                    message_clone.content,
                    message_clone.is_read,
                    message_clone.created_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(message)
    }

    pub async fn mark_read(&self, id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute("UPDATE messages SET is_read = 1 WHERE id = ?", [&id])?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute("DELETE FROM messages WHERE id = ?", [&id])?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn count_unread(&self) -> Result<i64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM messages WHERE is_read = 0",
                [],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::migrations::run_migrations_for_tests;

    fn setup_test_db() -> DbPool {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        pool
    }

    async fn send(repo: &MessageRepository, subject: &str) -> Message {
        repo.create(
            "user-1",
            "Sara Front",
            UserRole::Admin,
            "member-1",
            "John Doe",
            subject,
            "See you at the front desk.",
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_unread_by_default() {
        let pool = setup_test_db();
        let repo = MessageRepository::new(pool);

        let message = send(&repo, "Membership renewal").await;
        assert!(!message.is_read);
        assert_eq!(repo.count_unread().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_mark_read_clears_unread_count() {
        let pool = setup_test_db();
        let repo = MessageRepository::new(pool);

        let message = send(&repo, "Membership renewal").await;
        send(&repo, "Class schedule update").await;
        assert_eq!(repo.count_unread().await.unwrap(), 2);

        assert!(repo.mark_read(&message.id).await.unwrap());
        assert_eq!(repo.count_unread().await.unwrap(), 1);

        let read = repo.find_by_id(&message.id).await.unwrap().unwrap();
        assert!(read.is_read);
    }

    #[tokio::test]
    async fn test_find_all_newest_first() {
        let pool = setup_test_db();
        let repo = MessageRepository::new(pool.clone());

        // Two messages with forced distinct timestamps
        let first = send(&repo, "First").await;
        {
            let conn = pool.get().unwrap();
            conn.execute(
                "UPDATE messages SET created_at = datetime('now', '-1 hour') WHERE id = ?",
                [&first.id],
            )
            .unwrap();
        }
        send(&repo, "Second").await;

        let messages = repo.find_all().await.unwrap();
        assert_eq!(messages[0].subject, "Second");
        assert_eq!(messages[1].subject, "First");
    }

    #[tokio::test]
    async fn test_delete_message() {
        let pool = setup_test_db();
        let repo = MessageRepository::new(pool);

        let message = send(&repo, "Membership renewal").await;
        assert!(repo.delete(&message.id).await.unwrap());
        assert!(repo.find_by_id(&message.id).await.unwrap().is_none());
    }
}
