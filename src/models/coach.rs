use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coach {
    pub id: String,
    pub user_id: Option<String>,
    pub full_name: String,
    pub email: String,
    pub bio: String,
    /// Stored as a JSON array of strings.
    pub specializations: Vec<String>,
    pub rating: f64,
    pub years_experience: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Coach {
    /// The roster card shows at most three specializations.
    pub fn top_specializations(&self) -> &[String] {
        let end = self.specializations.len().min(3);
        &self.specializations[..end]
    }
}

impl FromSqliteRow for Coach {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let specializations_json: String = row.get("specializations")?;
        let specializations = serde_json::from_str(&specializations_json).unwrap_or_default();
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            full_name: row.get("full_name")?,
            email: row.get("email")?,
            bio: row.get("bio")?,
            specializations,
            rating: row.get("rating")?,
            years_experience: row.get("years_experience")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coach_with_specializations(specializations: Vec<String>) -> Coach {
        Coach {
            id: "coach-1".to_string(),
            user_id: None,
            full_name: "Alex Stone".to_string(),
            email: "alex@ironforge.gym".to_string(),
            bio: String::new(),
            specializations,
            rating: 4.8,
            years_experience: 10,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_top_specializations_caps_at_three() {
        let coach = coach_with_specializations(vec![
            "Strength".to_string(),
            "HIIT".to_string(),
            "Mobility".to_string(),
            "Nutrition".to_string(),
        ]);
        assert_eq!(coach.top_specializations().len(), 3);
    }

    #[test]
    fn test_top_specializations_short_list() {
        let coach = coach_with_specializations(vec!["Yoga".to_string()]);
        assert_eq!(coach.top_specializations(), &["Yoga".to_string()]);
    }
}
