use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags};

use crate::Result;

/// Shared handle to the habit store's SQLite connection.
///
/// The statistics engine never touches this directly; DAOs read through
/// `with_connection` and write through `transaction`.
#[derive(Clone)]
pub struct Database {
    path: Option<PathBuf>,
    connection: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Self::apply_pragmas(&conn)?;

        Ok(Self {
            path: Some(path),
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Private in-memory store, used by tests and throwaway computations.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::apply_pragmas(&conn)?;

        Ok(Self {
            path: None,
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    fn apply_pragmas(conn: &Connection) -> Result<()> {
        // foreign_keys backs the habit -> habit_log/habit_tag cascade;
        // WAL is a no-op for in-memory connections.
        conn.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA cache_size = -20000;
            "#,
        )?;
        Ok(())
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut guard = self.connection.lock();
        f(&mut guard)
    }

    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&rusqlite::Transaction) -> Result<T>,
    {
        self.with_connection(|conn| {
            let tx = conn.transaction()?;
            let result = f(&tx)?;
            tx.commit()?;
            Ok(result)
        })
    }

    /// Backing file path; `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    #[test]
    fn test_create_database_file() {
        let temp_dir = std::env::temp_dir();
        let db_path = temp_dir.join(format!("test_habitkit_{}.db", uuid::Uuid::new_v4()));

        let db = Database::new(&db_path).unwrap();
        assert!(db_path.exists());
        assert_eq!(db.path(), Some(db_path.as_path()));

        // Cleanup
        std::fs::remove_file(db_path).ok();
    }

    #[test]
    fn test_in_memory_database_has_no_path() {
        let db = Database::in_memory().unwrap();
        assert!(db.path().is_none());
    }

    #[test]
    fn test_foreign_keys_guard_orphan_logs() {
        let db = Database::in_memory().unwrap();
        db.with_connection(|conn| run_migrations(conn)).unwrap();

        let orphan = db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO habit_log (log_id, habit_id, date, completed, created_at)
                 VALUES ('l1', 'no-such-habit', '2024-03-15', 1, '')",
                [],
            )?;
            Ok(())
        });

        assert!(orphan.is_err(), "Log without a habit should be rejected");
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let db = Database::in_memory().unwrap();
        db.with_connection(|conn| run_migrations(conn)).unwrap();

        let result: Result<()> = db.transaction(|tx| {
            tx.execute(
                "INSERT INTO habit (habit_id, name, created_at) VALUES ('h1', 'Water', '')",
                [],
            )?;
            Err(crate::Error::Internal("boom".into()))
        });
        assert!(result.is_err());

        let count: i64 = db
            .with_connection(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM habit", [], |row| row.get(0))?)
            })
            .unwrap();
        assert_eq!(count, 0, "Failed transaction should leave no habit behind");
    }
}
