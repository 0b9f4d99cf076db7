//! Schema migrations.
//!
//! Each migration is a versioned SQL file embedded at compile time.
//! Applied versions are recorded in `schema_migrations`; `run_all`
//! applies whatever is still pending, each inside its own transaction.

use rusqlite::{params, Connection};

use super::error::DatabaseError;

struct Migration {
    version: u32,
    description: &'static str,
    sql: &'static str,
    /// When set, the SQL is skipped (but the version still recorded)
    /// if the column is already present. Covers ALTER TABLE ADD COLUMN
    /// on databases created before the version table existed.
    guard: Option<ColumnGuard>,
}

struct ColumnGuard {
    table: &'static str,
    column: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "create_jobs_table",
        sql: include_str!("sql/001_create_jobs.sql"),
        guard: None,
    },
    Migration {
        version: 2,
        description: "create_queued_submissions_table",
        sql: include_str!("sql/002_create_queued_submissions.sql"),
        guard: None,
    },
    Migration {
        version: 3,
        description: "create_activity_log_table",
        sql: include_str!("sql/003_create_activity_log.sql"),
        guard: None,
    },
    Migration {
        version: 4,
        description: "create_search_log_table",
        sql: include_str!("sql/004_create_search_log.sql"),
        guard: None,
    },
    Migration {
        version: 5,
        description: "add_easy_apply_to_jobs",
        sql: include_str!("sql/005_add_easy_apply.sql"),
        guard: Some(ColumnGuard {
            table: "jobs",
            column: "easy_apply",
        }),
    },
];

/// Brings the schema up to the latest version.
pub fn run_all(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;

    let applied: u32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |r| r.get(0),
    )?;

    for migration in MIGRATIONS.iter().filter(|m| m.version > applied) {
        apply(conn, migration)?;
    }
    Ok(())
}

fn apply(conn: &Connection, migration: &Migration) -> Result<(), DatabaseError> {
    let satisfied = match &migration.guard {
        Some(guard) => column_exists(conn, guard.table, guard.column)?,
        None => false,
    };

    let tx = conn.unchecked_transaction()?;
    if satisfied {
        log::info!(
            "migration v{} ({}) already satisfied, recording only",
            migration.version,
            migration.description
        );
    } else {
        log::info!(
            "applying migration v{}: {}",
            migration.version,
            migration.description
        );
        tx.execute_batch(migration.sql)
            .map_err(|e| DatabaseError::Migration {
                version: migration.version,
                reason: e.to_string(),
            })?;
    }
    tx.execute(
        "INSERT INTO schema_migrations (version, description) VALUES (?1, ?2)",
        params![migration.version, migration.description],
    )?;
    tx.commit()?;
    Ok(())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool, DatabaseError> {
    let mut stmt = conn.prepare("SELECT 1 FROM pragma_table_info(?1) WHERE name = ?2")?;
    Ok(stmt.exists(params![table, column])?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys=ON;").unwrap();
        conn
    }

    fn recorded_versions(conn: &Connection) -> u32 {
        conn.query_row("SELECT COUNT(*) FROM schema_migrations", [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn test_fresh_db_gets_every_migration() {
        let conn = fresh_conn();
        run_all(&conn).unwrap();
        assert_eq!(recorded_versions(&conn), MIGRATIONS.len() as u32);
    }

    #[test]
    fn test_rerun_is_a_noop() {
        let conn = fresh_conn();
        run_all(&conn).unwrap();
        run_all(&conn).unwrap();
        assert_eq!(recorded_versions(&conn), MIGRATIONS.len() as u32);
    }

    #[test]
    fn test_column_exists_check() {
        let conn = fresh_conn();
        conn.execute_batch("CREATE TABLE test_tbl (id TEXT, name TEXT);")
            .unwrap();

        assert!(column_exists(&conn, "test_tbl", "id").unwrap());
        assert!(column_exists(&conn, "test_tbl", "name").unwrap());
        assert!(!column_exists(&conn, "test_tbl", "missing").unwrap());
        assert!(!column_exists(&conn, "no_such_table", "id").unwrap());
    }

    #[test]
    fn test_jobs_table_has_easy_apply() {
        let conn = fresh_conn();
        run_all(&conn).unwrap();
        assert!(column_exists(&conn, "jobs", "easy_apply").unwrap());
    }

    #[test]
    fn test_guarded_migration_skips_existing_column() {
        let conn = fresh_conn();
        run_all(&conn).unwrap();

        // Wind the recorded version back past the guarded migration. The
        // column is still there, so the rerun must record without applying.
        conn.execute("DELETE FROM schema_migrations WHERE version = 5", [])
            .unwrap();
        run_all(&conn).unwrap();

        assert_eq!(recorded_versions(&conn), MIGRATIONS.len() as u32);
    }

    #[test]
    fn test_search_log_table_exists() {
        let conn = fresh_conn();
        run_all(&conn).unwrap();

        conn.execute(
            "INSERT INTO search_log (keywords, recorded_at) VALUES ('python', '2026-01-01T00:00:00Z')",
            [],
        )
        .unwrap();
    }
}
