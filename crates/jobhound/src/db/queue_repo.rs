//! Queue repository — operations for the `queued_submissions` table.

use rusqlite::{params, Row};

use super::job_repo::JobRow;
use super::{Database, DatabaseError};

/// A raw queued submission row.
#[derive(Debug, Clone)]
pub struct QueueRow {
    pub id: i64,
    pub job_id: String,
    pub scheduled_time: String,
    pub status: String,
    pub created_at: String,
}

impl QueueRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            job_id: row.get("job_id")?,
            scheduled_time: row.get("scheduled_time")?,
            status: row.get("status")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// Inserts a pending queue entry and returns its rowid.
pub fn insert(
    db: &Database,
    job_id: &str,
    scheduled_time: &str,
    created_at: &str,
) -> Result<i64, DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO queued_submissions (job_id, scheduled_time, status, created_at)
             VALUES (?1, ?2, 'pending', ?3)",
            params![job_id, scheduled_time, created_at],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Finds a queue entry by its rowid.
pub fn find_by_id(db: &Database, queue_id: i64) -> Result<Option<QueueRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT * FROM queued_submissions WHERE id = ?1")?;
        let mut rows = stmt.query_map(params![queue_id], QueueRow::from_row)?;
        match rows.next() {
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
            None => Ok(None),
        }
    })
}

/// Lists pending entries whose scheduled time has passed, each joined with
/// its job, earliest first. Queue columns are aliased so the job's own
/// `status` stays addressable by name.
pub fn due_with_jobs(
    db: &Database,
    as_of: &str,
) -> Result<Vec<(QueueRow, JobRow)>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT q.id AS queue_id, q.scheduled_time AS queue_scheduled_time,
                    q.status AS queue_status, q.created_at AS queue_created_at, j.*
             FROM queued_submissions q
             JOIN jobs j ON q.job_id = j.job_id
             WHERE q.status = 'pending' AND q.scheduled_time <= ?1
             ORDER BY q.scheduled_time",
        )?;
        let rows = stmt
            .query_map(params![as_of], |row| {
                let queue = QueueRow {
                    id: row.get("queue_id")?,
                    job_id: row.get("job_id")?,
                    scheduled_time: row.get("queue_scheduled_time")?,
                    status: row.get("queue_status")?,
                    created_at: row.get("queue_created_at")?,
                };
                let job = JobRow::from_row(row)?;
                Ok((queue, job))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// Marks a pending entry completed. Returns the number of rows changed,
/// so an already-completed entry yields 0.
pub fn complete(db: &Database, queue_id: i64) -> Result<usize, DatabaseError> {
    db.with_conn(|conn| {
        let changed = conn.execute(
            "UPDATE queued_submissions SET status = 'completed'
             WHERE id = ?1 AND status = 'pending'",
            params![queue_id],
        )?;
        Ok(changed)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::job_repo;

    fn test_db() -> Database {
        Database::open_in_memory().expect("Failed to create test database")
    }

    fn seed_job(db: &Database, job_id: &str) {
        let job = job_repo::JobRow {
            job_id: job_id.to_string(),
            title: "Python Developer".to_string(),
            company: "Acme".to_string(),
            location: String::new(),
            salary: String::new(),
            description: String::new(),
            url: String::new(),
            source: "linkedin".to_string(),
            posted_date: String::new(),
            easy_apply: false,
            match_score: 0.0,
            status: "new".to_string(),
            found_date: "2026-01-01T00:00:00Z".to_string(),
            applied_date: None,
        };
        job_repo::insert_ignore(db, &job).unwrap();
    }

    #[test]
    fn test_insert_and_find() {
        let db = test_db();
        seed_job(&db, "job-1");

        let id = insert(&db, "job-1", "2026-01-06T09:00:00Z", "2026-01-01T00:00:00Z").unwrap();
        let row = find_by_id(&db, id).unwrap().unwrap();
        assert_eq!(row.job_id, "job-1");
        assert_eq!(row.status, "pending");
        assert_eq!(row.scheduled_time, "2026-01-06T09:00:00Z");
    }

    #[test]
    fn test_insert_rejects_unknown_job() {
        let db = test_db();
        let result = insert(&db, "ghost", "2026-01-06T09:00:00Z", "2026-01-01T00:00:00Z");
        assert!(result.is_err());
    }

    #[test]
    fn test_due_with_jobs_filters_and_orders() {
        let db = test_db();
        seed_job(&db, "job-1");
        seed_job(&db, "job-2");
        seed_job(&db, "job-3");

        let late = insert(&db, "job-1", "2026-01-06T10:00:00Z", "2026-01-01T00:00:00Z").unwrap();
        let early = insert(&db, "job-2", "2026-01-05T09:00:00Z", "2026-01-01T00:00:00Z").unwrap();
        insert(&db, "job-3", "2026-02-01T09:00:00Z", "2026-01-01T00:00:00Z").unwrap();

        let due = due_with_jobs(&db, "2026-01-06T12:00:00Z").unwrap();
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].0.id, early);
        assert_eq!(due[0].1.job_id, "job-2");
        assert_eq!(due[1].0.id, late);
        assert_eq!(due[1].1.status, "new");
    }

    #[test]
    fn test_due_boundary_is_inclusive() {
        let db = test_db();
        seed_job(&db, "job-1");
        insert(&db, "job-1", "2026-01-06T09:00:00Z", "2026-01-01T00:00:00Z").unwrap();

        let due = due_with_jobs(&db, "2026-01-06T09:00:00Z").unwrap();
        assert_eq!(due.len(), 1);
    }

    #[test]
    fn test_complete_is_single_shot() {
        let db = test_db();
        seed_job(&db, "job-1");
        let id = insert(&db, "job-1", "2026-01-05T09:00:00Z", "2026-01-01T00:00:00Z").unwrap();

        assert_eq!(complete(&db, id).unwrap(), 1);
        assert_eq!(complete(&db, id).unwrap(), 0);

        let row = find_by_id(&db, id).unwrap().unwrap();
        assert_eq!(row.status, "completed");
        assert!(due_with_jobs(&db, "2026-12-31T00:00:00Z").unwrap().is_empty());
    }
}
