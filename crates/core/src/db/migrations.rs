use rusqlite::Connection;

use crate::{Error, Result};

const SCHEMA_VERSION: i32 = 3;

pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    ensure_migration_table(conn)?;

    let current_version = get_schema_version(conn)?;

    if current_version > SCHEMA_VERSION {
        return Err(Error::Internal(format!(
            "Database schema version ({}) is newer than supported version ({}). Please update the \
             application.",
            current_version, SCHEMA_VERSION
        )));
    }

    for version in (current_version + 1)..=SCHEMA_VERSION {
        apply_migration(conn, version).map_err(|e| {
            Error::Internal(format!("Failed to apply migration {}: {}", version, e))
        })?;
    }

    Ok(())
}

fn ensure_migration_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS migration (
            id INTEGER PRIMARY KEY
        )",
        [],
    )?;
    Ok(())
}

fn get_schema_version(conn: &Connection) -> Result<i32> {
    let version = conn.query_row("SELECT COALESCE(MAX(id), 0) FROM migration", [], |row| {
        row.get(0)
    })?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute("INSERT INTO migration (id) VALUES (?1)", [version])?;
    Ok(())
}

fn apply_migration(conn: &mut Connection, version: i32) -> Result<()> {
    let tx = conn.transaction()?;

    match version {
        1 => migration_v1(&tx)?,
        2 => migration_v2(&tx)?,
        3 => migration_v3(&tx)?,
        _ => {
            return Err(Error::Internal(format!(
                "Unknown migration version: {}",
                version
            )));
        }
    }

    set_schema_version(&tx, version)?;
    tx.commit()?;

    Ok(())
}

fn migration_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE habit(
            habit_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            icon TEXT NOT NULL DEFAULT '',
            color TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        );

        CREATE TABLE habit_log(
            log_id TEXT PRIMARY KEY,
            habit_id TEXT NOT NULL,
            date TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            FOREIGN KEY (habit_id) REFERENCES habit(habit_id) ON DELETE CASCADE,
            UNIQUE (habit_id, date)
        );

        CREATE TABLE habit_tag(
            habit_id TEXT NOT NULL,
            tag_id TEXT NOT NULL,
            FOREIGN KEY (habit_id) REFERENCES habit(habit_id) ON DELETE CASCADE,
            UNIQUE (habit_id, tag_id)
        );
        "#,
    )?;
    Ok(())
}

fn migration_v2(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX habit_log_habit_id_date_idx
            ON habit_log(habit_id, date);

        CREATE INDEX habit_log_date_idx
            ON habit_log(date);

        CREATE INDEX habit_tag_tag_id_idx
            ON habit_tag(tag_id);
        "#,
    )?;
    Ok(())
}

fn migration_v3(conn: &Connection) -> Result<()> {
    conn.execute(
        "DELETE FROM habit_log
         WHERE habit_id NOT IN (SELECT habit_id FROM habit)",
        [],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::*;

    const EXPECTED_TABLES: &[&str] = &["habit", "habit_log", "habit_tag", "migration"];

    #[test]
    fn test_full_migration_sequence() {
        let mut conn = Connection::open_in_memory().unwrap();

        run_migrations(&mut conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(
            version, SCHEMA_VERSION,
            "Schema version should match expected"
        );

        for &table_name in EXPECTED_TABLES {
            assert!(
                table_exists(&conn, table_name),
                "Table '{}' should exist after migrations",
                table_name
            );
        }

        assert!(
            column_exists(&conn, "habit_log", "completed"),
            "habit_log should have completed column"
        );
    }

    #[test]
    fn test_migration_idempotency() {
        let mut conn = Connection::open_in_memory().unwrap();

        // Run migrations twice
        run_migrations(&mut conn).unwrap();
        run_migrations(&mut conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, SCHEMA_VERSION, "Version should remain stable");
    }

    #[test]
    fn test_future_schema_version_error() {
        let conn = Connection::open_in_memory().unwrap();

        conn.execute("CREATE TABLE migration (id INTEGER PRIMARY KEY)", [])
            .unwrap();
        conn.execute(
            "INSERT INTO migration (id) VALUES (?1)",
            [SCHEMA_VERSION + 100],
        )
        .unwrap();

        let mut conn = conn; // Make mutable for migration call
        let result = run_migrations(&mut conn);

        assert!(result.is_err(), "Should error on future schema version");

        let error_msg = result.unwrap_err().to_string();

        assert!(
            error_msg.contains("newer than supported"),
            "Error should mention version incompatibility, got: {}",
            error_msg
        );
    }

    #[test]
    fn test_log_uniqueness_constraint() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();

        conn.execute(
            "INSERT INTO habit (habit_id, name, created_at) VALUES ('h1', 'Water', '')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO habit_log (log_id, habit_id, date, completed, created_at)
             VALUES ('l1', 'h1', '2024-03-15', 1, '')",
            [],
        )
        .unwrap();

        let duplicate = conn.execute(
            "INSERT INTO habit_log (log_id, habit_id, date, completed, created_at)
             VALUES ('l2', 'h1', '2024-03-15', 0, '')",
            [],
        );

        assert!(duplicate.is_err(), "Second log for same (habit, date) should be rejected");
    }

    fn table_exists(conn: &Connection, table_name: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master
             WHERE type = 'table' AND name = ?1",
            [table_name],
            |row| row.get(0),
        )
        .unwrap_or(false)
    }

    fn column_exists(conn: &Connection, table_name: &str, column_name: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) > 0 FROM pragma_table_info(?1)
             WHERE name = ?2",
            [table_name, column_name],
            |row| row.get(0),
        )
        .unwrap_or(false)
    }
}
