use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, Member, MemberForm, SubscriptionStatus};

fn none_if_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[derive(Clone)]
pub struct MemberRepository {
    pool: DbPool,
}

impl MemberRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Member>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM members WHERE id = ?")?;
            let result = stmt.query_row([&id], Member::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_all(&self) -> Result<Vec<Member>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM members ORDER BY created_at DESC")?;
            let members = stmt
                .query_map([], Member::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(members)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// The members table filter: case-insensitive substring match on name or
    /// email, combined with an optional subscription status.
    pub async fn search(
        &self,
        query: &str,
        status: Option<SubscriptionStatus>,
    ) -> Result<Vec<Member>> {
        let pool = self.pool.clone();
        let pattern = format!("%{}%", query.trim());
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let members = match status {
                Some(status) => {
                    let mut stmt = conn.prepare(
                        "SELECT * FROM members
                         WHERE (full_name LIKE ?1 OR email LIKE ?1) AND subscription_status = ?2
                         ORDER BY created_at DESC",
                    )?;
                    let rows = stmt
                        .query_map(rusqlite::params![pattern, status.as_str()], Member::from_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    rows
                }
                None => {
                    let mut stmt = conn.prepare(
                        "SELECT * FROM members
                         WHERE full_name LIKE ?1 OR email LIKE ?1
                         ORDER BY created_at DESC",
                    )?;
                    let rows = stmt
                        .query_map([&pattern], Member::from_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    rows
                }
            };
            Ok(members)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn create(&self, form: &MemberForm, owner_id: &str) -> Result<Member> {
        let now = Utc::now();
        let member = Member {
            id: Uuid::new_v4().to_string(),
            full_name: form.full_name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: none_if_blank(&form.phone),
            address: none_if_blank(&form.address),
            postal_code: none_if_blank(&form.postal_code),
            id_number: form.id_number.trim().to_string(),
            id_type: form.id_type,
            subscription_status: form.subscription_status,
            subscription_type: form.subscription_type,
            amount_to_pay_cents: form.amount_to_pay_cents,
            start_date: now.date_naive(),
            end_date: None,
            owner_id: owner_id.to_string(),
            created_at: now,
            updated_at: now,
        };
        let member_clone = member.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO members (id, full_name, email, phone, address, postal_code,
                     id_number, id_type, subscription_status, subscription_type,
                     amount_to_pay_cents, start_date, end_date, owner_id, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    member_clone.id,
                    member_clone.full_name,
                    member_clone.email,
                    member_clone.phone,
                    member_clone.address,
                    member_clone.postal_code,
                    member_clone.id_number,
                    member_clone.id_type.as_str(),
                    member_clone.subscription_status.as_str(),
                    member_clone.subscription_type.as_str(),
                    member_clone.amount_to_pay_cents,
                    member_clone.start_date,
                    member_clone.end_date,
                    member_clone.owner_id,
                    member_clone.created_at,
                    member_clone.updated_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(member)
    }

    pub async fn update(&self, id: &str, form: &MemberForm) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let full_name = form.full_name.trim().to_string();
        let email = form.email.trim().to_string();
        let phone = none_if_blank(&form.phone);
        let address = none_if_blank(&form.address);
        let postal_code = none_if_blank(&form.postal_code);
        let id_number = form.id_number.trim().to_string();
        let id_type = form.id_type;
        let status = form.subscription_status;
        let sub_type = form.subscription_type;
        let amount = form.amount_to_pay_cents;
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "UPDATE members SET full_name = ?, email = ?, phone = ?, address = ?,
                     postal_code = ?, id_number = ?, id_type = ?, subscription_status = ?,
                     subscription_type = ?, amount_to_pay_cents = ?, updated_at = ?
                 WHERE id = ?",
                rusqlite::params![
                    full_name,
                    email,
                    phone,
                    address,
                    postal_code,
                    id_number,
                    id_type.as_str(),
                    status.as_str(),
                    sub_type.as_str(),
                    amount,
                    now,
                    id
                ],
            )?;
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
            let rows = conn.execute("DELETE FROM members WHERE id = ?", [&id])?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn count(&self) -> Result<i64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM members", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn count_by_status(&self, status: SubscriptionStatus) -> Result<i64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM members WHERE subscription_status = ?",
                [status.as_str()],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Monthly revenue shown on the dashboard: what active members owe.
    pub async fn active_revenue_cents(&self) -> Result<i64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let total: i64 = conn.query_row(
                "SELECT COALESCE(SUM(amount_to_pay_cents), 0) FROM members
                 WHERE subscription_status = 'active'",
                [],
                |row| row.get(0),
            )?;
            Ok(total)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
