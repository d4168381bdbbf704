use std::sync::Arc;

use chrono::{Duration, Local};
use tracing::info;

use crate::db::Database;
use crate::domain::{HabitsService, TrackingService};
use crate::error::Result;

/// First-run convenience data: three example habits with a week of
/// back-dated completions. No-op when any habit already exists.
///
/// Returns whether seeding happened.
pub fn seed_demo_data(db: Arc<Database>) -> Result<bool> {
    let habits = HabitsService::new(db.clone());
    let tracking = TrackingService::new(db);

    if !habits.get_all()?.is_empty() {
        return Ok(false);
    }

    info!("seeding demo habits");

    let demo = [
        (
            "Drink Water",
            "Drink 8 glasses of water daily",
            "droplet",
            "#0ea5e9",
            "health",
        ),
        (
            "Meditate",
            "10 minutes of mindfulness meditation",
            "wind",
            "#8b5cf6",
            "mindfulness",
        ),
        (
            "Read Book",
            "Read at least 30 minutes",
            "book-open",
            "#f59e0b",
            "learning",
        ),
    ];

    let today = Local::now().date_naive();

    for (idx, (name, description, icon, color, tag)) in demo.iter().enumerate() {
        let habit = habits.create(name, description, icon, color, vec![tag.to_string()])?;

        // Fixed per-habit pattern, roughly five completions per week.
        for offset in 0..7i64 {
            if (offset as usize + idx) % 7 < 5 {
                let date = today - Duration::days(offset);
                tracking.toggle_completion(&habit.id, Some(date), true)?;
            }
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn setup_db() -> Arc<Database> {
        let db = Arc::new(Database::in_memory().unwrap());
        db.with_connection(|conn| run_migrations(conn)).unwrap();
        db
    }

    #[test]
    fn test_seed_once() {
        let db = setup_db();

        assert!(seed_demo_data(db.clone()).unwrap());
        let habits = HabitsService::new(db.clone()).get_all().unwrap();
        assert_eq!(habits.len(), 3);

        // Second run leaves the store untouched.
        assert!(!seed_demo_data(db.clone()).unwrap());
        assert_eq!(HabitsService::new(db).get_all().unwrap().len(), 3);
    }

    #[test]
    fn test_seed_skips_populated_store() {
        let db = setup_db();
        HabitsService::new(db.clone())
            .create("Existing", "", "", "", vec![])
            .unwrap();

        assert!(!seed_demo_data(db.clone()).unwrap());
        assert_eq!(HabitsService::new(db).get_all().unwrap().len(), 1);
    }
}
