use rusqlite::OptionalExtension;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{Coach, FromSqliteRow};

#[derive(Clone)]
pub struct CoachRepository {
    pool: DbPool,
}

impl CoachRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Coach>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM coaches WHERE id = ?")?;
            let result = stmt.query_row([&id], Coach::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Roster order: best-rated first. The public page features the first
    /// coach and grids the rest.
    pub async fn find_all(&self) -> Result<Vec<Coach>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt =
                conn.prepare("SELECT * FROM coaches ORDER BY rating DESC, full_name")?;
            let coaches = stmt
                .query_map([], Coach::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(coaches)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn count(&self) -> Result<i64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM coaches", [], |row| row.get(0))?;
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

    fn insert_coach(pool: &DbPool, id: &str, name: &str, rating: f64) {
        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO coaches (id, full_name, email, bio, specializations, rating,
                 years_experience, created_at, updated_at)
             VALUES (?, ?, ?, '', '[\"Strength\"]', ?, 5, datetime('now'), datetime('now'))",
            rusqlite::params![id, name, format!("{}@ironforge.gym", id), rating],
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_find_all_orders_by_rating() {
        let pool = setup_test_db();
        insert_coach(&pool, "coach-1", "Alex Stone", 4.5);
        insert_coach(&pool, "coach-2", "Maya Reyes", 4.9);
        let repo = CoachRepository::new(pool);

        let coaches = repo.find_all().await.unwrap();
        assert_eq!(coaches.len(), 2);
        assert_eq!(coaches[0].full_name, "Maya Reyes");
        assert_eq!(coaches[0].specializations, vec!["Strength".to_string()]);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let pool = setup_test_db();
        let repo = CoachRepository::new(pool);
        assert!(repo.find_by_id("nope").await.unwrap().is_none());
    }
}
