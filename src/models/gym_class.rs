use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassLevel {
    Beginner,
    Intermediate,
    Advanced,
    All,
}

impl ClassLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassLevel::Beginner => "beginner",
            ClassLevel::Intermediate => "intermediate",
            ClassLevel::Advanced => "advanced",
            ClassLevel::All => "all",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "beginner" => ClassLevel::Beginner,
            "intermediate" => ClassLevel::Intermediate,
            "advanced" => ClassLevel::Advanced,
            _ => ClassLevel::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClassLevel::Beginner => "Beginner",
            ClassLevel::Intermediate => "Intermediate",
            ClassLevel::Advanced => "Advanced",
            ClassLevel::All => "All Levels",
        }
    }
}

pub const CLASS_LEVELS: &[ClassLevel] = &[
    ClassLevel::All,
    ClassLevel::Beginner,
    ClassLevel::Intermediate,
    ClassLevel::Advanced,
];

pub const DAYS_OF_WEEK: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Public schedule quick-filter categories, matched against class names and
/// descriptions by keyword.
#[derive(Debug, Clone, Serialize)]
pub struct ClassCategory {
    pub name: &'static str,
    pub display_name: &'static str,
}

pub const CLASS_CATEGORIES: &[ClassCategory] = &[
    ClassCategory {
        name: "strength",
        display_name: "Strength",
    },
    ClassCategory {
        name: "cardio",
        display_name: "Cardio",
    },
    ClassCategory {
        name: "hiit",
        display_name: "HIIT",
    },
    ClassCategory {
        name: "yoga",
        display_name: "Mind & Body",
    },
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GymClass {
    pub id: String,
    pub name: String,
    pub description: String,
    pub coach_id: String,
    /// Snapshot of the coach's name at assignment time; deleting a coach
    /// does not touch classes that reference them.
    pub coach_name: String,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub max_capacity: i64,
    pub current_enrollment: i64,
    pub location: String,
    pub level: ClassLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GymClass {
    pub fn spots_left(&self) -> i64 {
        self.max_capacity - self.current_enrollment
    }

    pub fn is_full(&self) -> bool {
        self.spots_left() <= 0
    }

    pub fn is_almost_full(&self) -> bool {
        !self.is_full() && self.spots_left() <= 3
    }

    /// The public schedule's keyword filter: a class matches a category when
    /// its name or description contains the keyword, case-insensitively.
    pub fn matches_category(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.name.to_lowercase().contains(&keyword)
            || self.description.to_lowercase().contains(&keyword)
    }
}

impl FromSqliteRow for GymClass {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let level: String = row.get("level")?;
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            coach_id: row.get("coach_id")?,
            coach_name: row.get("coach_name")?,
            day_of_week: row.get("day_of_week")?,
            start_time: row.get("start_time")?,
            end_time: row.get("end_time")?,
            max_capacity: row.get("max_capacity")?,
            current_enrollment: row.get("current_enrollment")?,
            location: row.get("location")?,
            level: ClassLevel::parse(&level),
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Shared shape of the add and edit class forms.
#[derive(Debug, Deserialize)]
pub struct ClassForm {
    pub name: String,
    pub description: String,
    pub coach_id: String,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub max_capacity: i64,
    pub location: String,
    pub level: ClassLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_with_capacity(max_capacity: i64, current_enrollment: i64) -> GymClass {
        GymClass {
            id: "class-1".to_string(),
            name: "HIIT Burn".to_string(),
            description: "High intensity interval training".to_string(),
            coach_id: "coach-1".to_string(),
            coach_name: "Alex Stone".to_string(),
            day_of_week: "Monday".to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            max_capacity,
            current_enrollment,
            location: "Studio A".to_string(),
            level: ClassLevel::All,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_spots_left() {
        assert_eq!(class_with_capacity(20, 15).spots_left(), 5);
        assert_eq!(class_with_capacity(20, 20).spots_left(), 0);
    }

    #[test]
    fn test_is_full() {
        assert!(class_with_capacity(20, 20).is_full());
        assert!(!class_with_capacity(20, 19).is_full());
    }

    #[test]
    fn test_is_almost_full() {
        assert!(class_with_capacity(20, 17).is_almost_full());
        assert!(class_with_capacity(20, 19).is_almost_full());
        assert!(!class_with_capacity(20, 20).is_almost_full());
        assert!(!class_with_capacity(20, 16).is_almost_full());
    }

    #[test]
    fn test_matches_category_by_name() {
        let class = class_with_capacity(20, 0);
        assert!(class.matches_category("hiit"));
        assert!(class.matches_category("HIIT"));
        assert!(!class.matches_category("yoga"));
    }

    #[test]
    fn test_matches_category_by_description() {
        let class = class_with_capacity(20, 0);
        assert!(class.matches_category("interval"));
    }

    #[test]
    fn test_class_level_parse() {
        assert_eq!(ClassLevel::parse("beginner"), ClassLevel::Beginner);
        assert_eq!(ClassLevel::parse("advanced"), ClassLevel::Advanced);
        assert_eq!(ClassLevel::parse("anything"), ClassLevel::All);
    }
}
