//! Activity repository — append-only audit trail per job.

use rusqlite::{params, Row};

use super::{Database, DatabaseError};

#[derive(Debug, Clone)]
pub struct ActivityRow {
    pub id: i64,
    pub job_id: String,
    pub kind: String,
    pub detail: String,
    pub recorded_at: String,
}

impl ActivityRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            job_id: row.get("job_id")?,
            kind: row.get("kind")?,
            detail: row.get("detail")?,
            recorded_at: row.get("recorded_at")?,
        })
    }
}

/// Appends an activity entry and returns its rowid.
pub fn insert(
    db: &Database,
    job_id: &str,
    kind: &str,
    detail: &str,
    recorded_at: &str,
) -> Result<i64, DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO activity_log (job_id, kind, detail, recorded_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![job_id, kind, detail, recorded_at],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Lists a job's activity in insertion order.
pub fn for_job(db: &Database, job_id: &str) -> Result<Vec<ActivityRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt =
            conn.prepare("SELECT * FROM activity_log WHERE job_id = ?1 ORDER BY id")?;
        let rows = stmt
            .query_map(params![job_id], ActivityRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        Database::open_in_memory().expect("Failed to create test database")
    }

    #[test]
    fn test_insert_and_list_in_order() {
        let db = test_db();
        insert(&db, "job-1", "submission", "Applied via easy apply", "2026-01-01T09:00:00Z")
            .unwrap();
        insert(&db, "job-1", "status_change", "applied -> interview", "2026-01-03T09:00:00Z")
            .unwrap();
        insert(&db, "job-2", "note", "Follow-up received", "2026-01-02T09:00:00Z").unwrap();

        let rows = for_job(&db, "job-1").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kind, "submission");
        assert_eq!(rows[1].kind, "status_change");
        assert_eq!(rows[1].detail, "applied -> interview");
    }

    #[test]
    fn test_unknown_job_has_no_activity() {
        let db = test_db();
        assert!(for_job(&db, "ghost").unwrap().is_empty());
    }
}
