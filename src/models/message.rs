use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{FromSqliteRow, UserRole};
use crate::format;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub sender_role: UserRole,
    pub recipient_id: String,
    pub recipient_name: String,
    pub subject: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn sent_at_display(&self) -> String {
        format::datetime(self.created_at)
    }
}

impl FromSqliteRow for Message {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let sender_role: String = row.get("sender_role")?;
        Ok(Self {
            id: row.get("id")?,
            sender_id: row.get("sender_id")?,
            sender_name: row.get("sender_name")?,
            sender_role: UserRole::parse(&sender_role),
            recipient_id: row.get("recipient_id")?,
            recipient_name: row.get("recipient_name")?,
            subject: row.get("subject")?,
            content: row.get("content")?,
            is_read: row.get("is_read")?,
            created_at: row.get("created_at")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ComposeMessage {
    pub recipient_id: String,
    pub subject: String,
    pub content: String,
}
