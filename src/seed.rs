//! Demo dataset for local development.
//!
//! Enabled with `SEED_DEMO_DATA=true`; fills an empty database with the
//! coaches, members, classes, products and messages the site pages expect,
//! plus a demo administrator to log into the back office with.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::db::DbPool;
use crate::repositories::user_repo::hash_password;

const DEMO_ADMIN_EMAIL: &str = "admin@ironforge.gym";
const DEMO_ADMIN_PASSWORD: &str = "ironforge";

struct SeedCoach {
    name: &'static str,
    email: &'static str,
    bio: &'static str,
    specializations: &'static [&'static str],
    rating: f64,
    years: i64,
}

const COACHES: &[SeedCoach] = &[
    SeedCoach {
        name: "Maya Reyes",
        email: "maya@ironforge.gym",
        bio: "Former competitive powerlifter who believes the barbell never lies.",
        specializations: &["Strength Training", "Powerlifting", "Nutrition"],
        rating: 4.9,
        years: 12,
    },
    SeedCoach {
        name: "Elena Brooks",
        email: "elena@ironforge.gym",
        bio: "Yoga and mobility specialist keeping lifters moving well.",
        specializations: &["Yoga", "Mobility", "Recovery"],
        rating: 4.8,
        years: 10,
    },
    SeedCoach {
        name: "Jake Torres",
        email: "jake@ironforge.gym",
        bio: "Conditioning coach with a soft spot for brutal intervals.",
        specializations: &["HIIT", "Conditioning"],
        rating: 4.7,
        years: 8,
    },
    SeedCoach {
        name: "Marcus Hale",
        email: "marcus@ironforge.gym",
        bio: "Boxing background, cardio programming, zero patience for excuses.",
        specializations: &["Boxing", "Cardio"],
        rating: 4.6,
        years: 6,
    },
];

/// Populate an empty database with demo content. A database that already
/// has members or coaches is left untouched.
pub fn seed_demo_data(pool: &DbPool) -> anyhow::Result<()> {
    let conn = pool.get()?;

    let existing: i64 = conn.query_row(
        "SELECT (SELECT COUNT(*) FROM members) + (SELECT COUNT(*) FROM coaches)",
        [],
        |row| row.get(0),
    )?;
    if existing > 0 {
        tracing::debug!("Database already has data, skipping demo seed");
        return Ok(());
    }

    tracing::info!("Seeding demo data...");
    let now = Utc::now();

    // Demo administrator
    let admin_id = Uuid::new_v4().to_string();
    let password_hash = hash_password(DEMO_ADMIN_PASSWORD)?;
    conn.execute(
        "INSERT INTO users (id, full_name, email, password_hash, role, created_at, updated_at)
         VALUES (?, ?, ?, ?, 'admin', ?, ?)",
        rusqlite::params![admin_id, "Alex Morgan", DEMO_ADMIN_EMAIL, password_hash, now, now],
    )?;
    tracing::warn!(
        "Demo admin created: {} / {} (change this outside local development)",
        DEMO_ADMIN_EMAIL,
        DEMO_ADMIN_PASSWORD
    );

    // Coaches
    let mut coach_ids = Vec::new();
    for coach in COACHES {
        let id = Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO coaches (id, full_name, email, bio, specializations, rating,
                 years_experience, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            rusqlite::params![
                id,
                coach.name,
                coach.email,
                coach.bio,
                serde_json::to_string(coach.specializations)?,
                coach.rating,
                coach.years,
                now,
                now
            ],
        )?;
        coach_ids.push((id, coach.name));
    }

    // Weekly schedule: (name, description, coach index, day, start, end, capacity, enrolled, location, level)
    let classes: &[(&str, &str, usize, &str, &str, &str, i64, i64, &str, &str)] = &[
        (
            "HIIT Burn",
            "Forty-five minutes of all-out intervals. Bring a towel.",
            2, "Monday", "06:00", "07:00", 20, 17, "Studio A", "intermediate",
        ),
        (
            "Strength Foundations",
            "Squat, hinge, press. Learn the lifts that matter.",
            0, "Wednesday", "17:00", "18:00", 12, 5, "Weight Room", "beginner",
        ),
        (
            "Power Yoga Flow",
            "Strength meets breath in a heated vinyasa session.",
            1, "Tuesday", "18:00", "19:00", 15, 9, "Studio B", "all",
        ),
        (
            "Boxing Cardio",
            "Gloves on, heart rate up. Pad work and conditioning rounds.",
            3, "Thursday", "19:00", "20:00", 18, 18, "Studio A", "intermediate",
        ),
        (
            "Spin & Burn",
            "Sunrise cardio on the bikes with race-day energy.",
            3, "Friday", "06:30", "07:15", 24, 12, "Cycle Studio", "all",
        ),
        (
            "Sunday Stretch",
            "Slow yoga and mobility work to reset for the week.",
            1, "Sunday", "10:00", "11:00", 25, 6, "Studio B", "all",
        ),
    ];
    for (name, description, coach_idx, day, start, end, capacity, enrolled, location, level) in
        classes
    {
        let (coach_id, coach_name) = &coach_ids[*coach_idx];
        conn.execute(
            "INSERT INTO classes (id, name, description, coach_id, coach_name, day_of_week,
                 start_time, end_time, max_capacity, current_enrollment, location, level,
                 created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            rusqlite::params![
                Uuid::new_v4().to_string(),
                name,
                description,
                coach_id,
                coach_name,
                day,
                start,
                end,
                capacity,
                enrolled,
                location,
                level,
                now,
                now
            ],
        )?;
    }

    // Members: (name, email, status, type, amount cents, days since start)
    let members: &[(&str, &str, &str, &str, i64, i64)] = &[
        ("John Doe", "john@email.com", "active", "monthly", 9900, 90),
        ("Jane Smith", "jane@email.com", "active", "yearly", 89900, 200),
        ("Carlos Vega", "carlos@email.com", "pending", "monthly", 9900, 2),
        ("Amelia Chen", "amelia@email.com", "expired", "quarterly", 26900, 400),
        ("Liam O'Brien", "liam@email.com", "cancelled", "day_pass", 1500, 30),
    ];
    let mut member_ids = Vec::new();
    for (name, email, status, sub_type, amount, days_ago) in members {
        let id = Uuid::new_v4().to_string();
        let start_date = (now - Duration::days(*days_ago)).date_naive();
        conn.execute(
            "INSERT INTO members (id, full_name, email, phone, id_number, id_type,
                 subscription_status, subscription_type, amount_to_pay_cents, start_date,
                 owner_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, 'national_id', ?, ?, ?, ?, ?, ?, ?)",
            rusqlite::params![
                id,
                name,
                email,
                "+1 555-0100",
                format!("ID-{:06}", 100000 + days_ago),
                status,
                sub_type,
                amount,
                start_date,
                admin_id,
                now,
                now
            ],
        )?;
        member_ids.push((id, *name));
    }

    // Store inventory: (name, description, cents, category, stock, active)
    let products: &[(&str, &str, i64, &str, i64, bool)] = &[
        (
            "Whey Protein Isolate",
            "24g protein per scoop, vanilla.",
            4999, "protein", 25, true,
        ),
        (
            "Creatine Monohydrate",
            "Micronized, unflavored, 60 servings.",
            2999, "supplements", 8, true,
        ),
        (
            "Voltage Energy Drink",
            "Zero sugar, 200mg caffeine.",
            349, "energy_drinks", 48, true,
        ),
        (
            "Iron Forge Tee",
            "Signature line athletic fit tee.",
            2499, "apparel", 0, true,
        ),
        (
            "Lifting Straps",
            "Heavy cotton straps for pulling days.",
            1899, "accessories", 15, true,
        ),
        (
            "Legacy Shaker Bottle",
            "Old logo stock, retired from the storefront.",
            999, "accessories", 40, false,
        ),
    ];
    for (name, description, price, category, stock, active) in products {
        conn.execute(
            "INSERT INTO products (id, name, description, price_cents, category, stock,
                 is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            rusqlite::params![
                Uuid::new_v4().to_string(),
                name,
                description,
                price,
                category,
                stock,
                active,
                now,
                now
            ],
        )?;
    }

    // A few front-desk messages, one already read
    let messages: &[(usize, &str, &str, bool)] = &[
        (
            0,
            "Membership renewal",
            "Hi John, your monthly membership renews on the 1st. See the front desk if you want to switch plans.",
            false,
        ),
        (
            1,
            "Locker assignment",
            "Your locker request is in: locker 42, upper row. Enjoy!",
            true,
        ),
        (
            2,
            "Welcome to Iron Forge",
            "Welcome aboard, Carlos! Your first week of unlimited classes starts today.",
            false,
        ),
    ];
    for (member_idx, subject, content, read) in messages {
        let (member_id, member_name) = &member_ids[*member_idx];
        conn.execute(
            "INSERT INTO messages (id, sender_id, sender_name, sender_role, recipient_id,
                 recipient_name, subject, content, is_read, created_at)
             VALUES (?, ?, 'Alex Morgan', 'admin', ?, ?, ?, ?, ?, ?)",
            rusqlite::params![
                Uuid::new_v4().to_string(),
                admin_id,
                member_id,
                member_name,
                subject,
                content,
                read,
                now
            ],
        )?;
    }

    tracing::info!("Demo data seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::migrations::run_migrations_for_tests;

    #[test]
    fn test_seed_populates_empty_database() {
        let pool = create_memory_pool().unwrap();
        run_migrations_for_tests(&pool).unwrap();

        seed_demo_data(&pool).unwrap();

        let conn = pool.get().unwrap();
        let coaches: i64 = conn
            .query_row("SELECT COUNT(*) FROM coaches", [], |r| r.get(0))
            .unwrap();
        let members: i64 = conn
            .query_row("SELECT COUNT(*) FROM members", [], |r| r.get(0))
            .unwrap();
        assert_eq!(coaches, 4);
        assert_eq!(members, 5);
    }

    #[test]
    fn test_seed_is_idempotent() {
        let pool = create_memory_pool().unwrap();
        run_migrations_for_tests(&pool).unwrap();

        seed_demo_data(&pool).unwrap();
        seed_demo_data(&pool).unwrap();

        let conn = pool.get().unwrap();
        let products: i64 = conn
            .query_row("SELECT COUNT(*) FROM products", [], |r| r.get(0))
            .unwrap();
        assert_eq!(products, 6);
    }
}
