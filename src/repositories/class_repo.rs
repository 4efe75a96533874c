use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{ClassForm, FromSqliteRow, GymClass};

// Schedule ordering: weekday, then start time.
const WEEK_ORDER: &str = "CASE day_of_week
    WHEN 'Monday' THEN 0
    WHEN 'Tuesday' THEN 1
    WHEN 'Wednesday' THEN 2
    WHEN 'Thursday' THEN 3
    WHEN 'Friday' THEN 4
    WHEN 'Saturday' THEN 5
    WHEN 'Sunday' THEN 6
    ELSE 7 END";

#[derive(Clone)]
pub struct ClassRepository {
    pool: DbPool,
}

impl ClassRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<GymClass>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM classes WHERE id = ?")?;
            let result = stmt.query_row([&id], GymClass::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_all(&self) -> Result<Vec<GymClass>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let sql = format!("SELECT * FROM classes ORDER BY {WEEK_ORDER}, start_time");
            let mut stmt = conn.prepare(&sql)?;
            let classes = stmt
                .query_map([], GymClass::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(classes)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// The class list filter: substring match on the name, combined with an
    /// optional day of week.
    pub async fn search(&self, query: &str, day: Option<&str>) -> Result<Vec<GymClass>> {
        let pool = self.pool.clone();
        let pattern = format!("%{}%", query.trim());
        let day = day.map(str::to_string);
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let classes = match day {
                Some(day) => {
                    let sql = format!(
                        "SELECT * FROM classes WHERE name LIKE ?1 AND day_of_week = ?2
                         ORDER BY {WEEK_ORDER}, start_time"
                    );
                    let mut stmt = conn.prepare(&sql)?;
                    let rows = stmt
                        .query_map(rusqlite::params![pattern, day], GymClass::from_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    rows
                }
                None => {
                    let sql = format!(
                        "SELECT * FROM classes WHERE name LIKE ?1
                         ORDER BY {WEEK_ORDER}, start_time"
                    );
                    let mut stmt = conn.prepare(&sql)?;
                    let rows = stmt
                        .query_map([&pattern], GymClass::from_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    rows
                }
            };
            Ok(classes)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn create(&self, form: &ClassForm, coach_name: &str) -> Result<GymClass> {
        let now = Utc::now();
        let class = GymClass {
            id: Uuid::new_v4().to_string(),
            name: form.name.trim().to_string(),
            description: form.description.trim().to_string(),
            coach_id: form.coach_id.clone(),
            coach_name: coach_name.to_string(),
            day_of_week: form.day_of_week.clone(),
            start_time: form.start_time.clone(),
            end_time: form.end_time.clone(),
            max_capacity: form.max_capacity,
            current_enrollment: 0,
            location: form.location.trim().to_string(),
            level: form.level,
            created_at: now,
            updated_at: now,
        };
        let class_clone = class.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO classes (id, name, description, coach_id, coach_name, day_of_week,
                     start_time, end_time, max_capacity, current_enrollment, location, level,
                     created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    class_clone.id,
                    class_clone.name,
                    class_clone.description,
                    class_clone.coach_id,
                    class_clone.coach_name,
                    class_clone.day_of_week,
                    class_clone.start_time,
                    class_clone.end_time,
                    class_clone.max_capacity,
                    class_clone.current_enrollment,
                    class_clone.location,
                    class_clone.level.as_str(),
                    class_clone.created_at,
                    class_clone.updated_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(class)
    }

    /// Full-field update; the enrollment counter is left alone.
    pub async fn update(&self, id: &str, form: &ClassForm, coach_name: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let name = form.name.trim().to_string();
        let description = form.description.trim().to_string();
        let coach_id = form.coach_id.clone();
        let coach_name = coach_name.to_string();
        let day_of_week = form.day_of_week.clone();
        let start_time = form.start_time.clone();
        let end_time = form.end_time.clone();
        let max_capacity = form.max_capacity;
        let location = form.location.trim().to_string();
        let level = form.level;
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "UPDATE classes SET name = ?, description = ?, coach_id = ?, coach_name = ?,
                     day_of_week = ?, start_time = ?, end_time = ?, max_capacity = ?,
                     location = ?, level = ?, updated_at = ?
                 WHERE id = ?",
                rusqlite::params![
                    name,
                    description,
                    coach_id,
                    coach_name,
                    day_of_week,
                    start_time,
                    end_time,
                    max_capacity,
                    location,
                    level.as_str(),
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
            let rows = conn.execute("DELETE FROM classes WHERE id = ?", [&id])?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Take one spot in a class. The guard keeps enrollment from ever
    /// passing capacity; booking a full class returns false.
    pub async fn book(&self, id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let now = Utc::now();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "UPDATE classes SET current_enrollment = current_enrollment + 1, updated_at = ?
                 WHERE id = ? AND current_enrollment < max_capacity",
                rusqlite::params![now, id],
            )?;
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
                conn.query_row("SELECT COUNT(*) FROM classes", [], |row| row.get(0))?;
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
    use crate::models::ClassLevel;

    fn setup_test_db() -> DbPool {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        pool
    }

    fn class_form(name: &str, day: &str, max_capacity: i64) -> ClassForm {
        ClassForm {
            name: name.to_string(),
            description: "Sweat now, shine later".to_string(),
            coach_id: "coach-1".to_string(),
            day_of_week: day.to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            max_capacity,
            location: "Studio A".to_string(),
            level: ClassLevel::All,
        }
    }

    #[tokio::test]
    async fn test_create_starts_empty() {
        let pool = setup_test_db();
        let repo = ClassRepository::new(pool);

        let class = repo
            .create(&class_form("HIIT Burn", "Monday", 20), "Alex Stone")
            .await
            .unwrap();
        assert_eq!(class.current_enrollment, 0);
        assert_eq!(class.coach_name, "Alex Stone");
        assert_eq!(class.spots_left(), 20);
    }

    #[tokio::test]
    async fn test_find_all_ordered_by_weekday() {
        let pool = setup_test_db();
        let repo = ClassRepository::new(pool);

        repo.create(&class_form("Sunday Stretch", "Sunday", 20), "TBA")
            .await
            .unwrap();
        repo.create(&class_form("Monday Grind", "Monday", 20), "TBA")
            .await
            .unwrap();
        repo.create(&class_form("Wednesday Flow", "Wednesday", 20), "TBA")
            .await
            .unwrap();

        let classes = repo.find_all().await.unwrap();
        let names: Vec<&str> = classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Monday Grind", "Wednesday Flow", "Sunday Stretch"]);
    }

    #[tokio::test]
    async fn test_search_by_name_and_day() {
        let pool = setup_test_db();
        let repo = ClassRepository::new(pool);

        repo.create(&class_form("HIIT Burn", "Monday", 20), "TBA")
            .await
            .unwrap();
        repo.create(&class_form("Power Yoga", "Monday", 20), "TBA")
            .await
            .unwrap();
        repo.create(&class_form("HIIT Express", "Friday", 20), "TBA")
            .await
            .unwrap();

        let hiit = repo.search("hiit", None).await.unwrap();
        assert_eq!(hiit.len(), 2);

        let monday_hiit = repo.search("hiit", Some("Monday")).await.unwrap();
        assert_eq!(monday_hiit.len(), 1);
        assert_eq!(monday_hiit[0].name, "HIIT Burn");

        let monday = repo.search("", Some("Monday")).await.unwrap();
        assert_eq!(monday.len(), 2);
    }

    #[tokio::test]
    async fn test_book_until_full() {
        let pool = setup_test_db();
        let repo = ClassRepository::new(pool);

        let class = repo
            .create(&class_form("Spin Circuit", "Tuesday", 2), "TBA")
            .await
            .unwrap();

        assert!(repo.book(&class.id).await.unwrap());
        assert!(repo.book(&class.id).await.unwrap());
        // Third booking bounces off the capacity guard
        assert!(!repo.book(&class.id).await.unwrap());

        let full = repo.find_by_id(&class.id).await.unwrap().unwrap();
        assert_eq!(full.current_enrollment, 2);
        assert!(full.is_full());
    }

    #[tokio::test]
    async fn test_update_keeps_enrollment() {
        let pool = setup_test_db();
        let repo = ClassRepository::new(pool);

        let class = repo
            .create(&class_form("HIIT Burn", "Monday", 20), "Alex Stone")
            .await
            .unwrap();
        repo.book(&class.id).await.unwrap();

        let updated_form = class_form("HIIT Inferno", "Tuesday", 25);
        assert!(repo
            .update(&class.id, &updated_form, "Maya Reyes")
            .await
            .unwrap());

        let updated = repo.find_by_id(&class.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "HIIT Inferno");
        assert_eq!(updated.coach_name, "Maya Reyes");
        assert_eq!(updated.current_enrollment, 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = setup_test_db();
        let repo = ClassRepository::new(pool);

        let class = repo
            .create(&class_form("HIIT Burn", "Monday", 20), "TBA")
            .await
            .unwrap();
        assert!(repo.delete(&class.id).await.unwrap());
        assert!(repo.find_by_id(&class.id).await.unwrap().is_none());
        assert!(!repo.delete(&class.id).await.unwrap());
    }
}
