use std::sync::Arc;

use crate::db::{Database, HabitsDao};
use crate::error::{Error, Result};
use crate::models::{Habit, Tag};

#[derive(Clone)]
pub struct HabitsService {
    dao: HabitsDao,
}

impl HabitsService {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            dao: HabitsDao::new(db),
        }
    }

    /// Create a habit with a fresh id and creation timestamp
    pub fn create(
        &self,
        name: &str,
        description: &str,
        icon: &str,
        color: &str,
        tags: Vec<String>,
    ) -> Result<Habit> {
        if name.trim().is_empty() {
            return Err(Error::InvalidInput("Habit name must not be empty".into()));
        }
        if !Tag::all_known(&tags) {
            return Err(Error::InvalidInput(format!(
                "Unknown tag id in {:?}",
                tags
            )));
        }

        let habit = Habit::new(name, description)
            .with_icon(icon)
            .with_color(color)
            .with_tags(tags);
        self.dao.save_habit(&habit)?;

        Ok(habit)
    }

    /// Replace the whole habit record, id preserved
    pub fn update(&self, habit: &Habit) -> Result<()> {
        if !Tag::all_known(&habit.tags) {
            return Err(Error::InvalidInput(format!(
                "Unknown tag id in {:?}",
                habit.tags
            )));
        }
        if self.dao.get_habit(&habit.id)?.is_none() {
            return Err(Error::NotFound(format!("habit {}", habit.id)));
        }

        self.dao.save_habit(habit)
    }

    /// Delete a habit and all of its logs in one transaction
    pub fn delete(&self, habit_id: &str) -> Result<()> {
        self.dao.delete_habit(habit_id)
    }

    /// Get a habit by ID
    pub fn get_by_id(&self, habit_id: &str) -> Result<Option<Habit>> {
        self.dao.get_habit(habit_id)
    }

    /// Get all habits
    pub fn get_all(&self) -> Result<Vec<Habit>> {
        self.dao.get_all_habits()
    }

    /// Get habits carrying the given tag; `None` means no filter
    pub fn filter_by_tag(&self, tag_id: Option<&str>) -> Result<Vec<Habit>> {
        let habits = self.dao.get_all_habits()?;

        Ok(match tag_id {
            None => habits,
            Some(tag_id) => habits.into_iter().filter(|h| h.has_tag(tag_id)).collect(),
        })
    }
}
