//! Job repository — CRUD operations for the `jobs` table.

use rusqlite::{params, Row};

use super::{Database, DatabaseError};

/// A raw job row from the database. Timestamps stay RFC 3339 strings at
/// this layer; the store converts to typed values.
#[derive(Debug, Clone)]
pub struct JobRow {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub description: String,
    pub url: String,
    pub source: String,
    pub posted_date: String,
    pub easy_apply: bool,
    pub match_score: f64,
    pub status: String,
    pub found_date: String,
    pub applied_date: Option<String>,
}

impl JobRow {
    pub(crate) fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            job_id: row.get("job_id")?,
            title: row.get("title")?,
            company: row.get("company")?,
            location: row.get("location")?,
            salary: row.get("salary")?,
            description: row.get("description")?,
            url: row.get("url")?,
            source: row.get("source")?,
            posted_date: row.get("posted_date")?,
            easy_apply: row.get("easy_apply")?,
            match_score: row.get("match_score")?,
            status: row.get("status")?,
            found_date: row.get("found_date")?,
            applied_date: row.get("applied_date")?,
        })
    }
}

/// Inserts a job row, ignoring the insert when the `job_id` already
/// exists. Returns whether a row was actually written.
pub fn insert_ignore(db: &Database, job: &JobRow) -> Result<bool, DatabaseError> {
    db.with_conn(|conn| {
        let changed = conn.execute(
            "INSERT OR IGNORE INTO jobs (job_id, title, company, location, salary, description,
             url, source, posted_date, easy_apply, match_score, status, found_date, applied_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                job.job_id,
                job.title,
                job.company,
                job.location,
                job.salary,
                job.description,
                job.url,
                job.source,
                job.posted_date,
                job.easy_apply,
                job.match_score,
                job.status,
                job.found_date,
                job.applied_date,
            ],
        )?;
        Ok(changed > 0)
    })
}

/// Finds a job by its ID.
pub fn find_by_id(db: &Database, job_id: &str) -> Result<Option<JobRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT * FROM jobs WHERE job_id = ?1")?;
        let mut rows = stmt.query_map(params![job_id], JobRow::from_row)?;
        match rows.next() {
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
            None => Ok(None),
        }
    })
}

/// Lists jobs with the given status, best match first.
pub fn list_by_status(db: &Database, status: &str) -> Result<Vec<JobRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt =
            conn.prepare("SELECT * FROM jobs WHERE status = ?1 ORDER BY match_score DESC")?;
        let rows = stmt
            .query_map(params![status], JobRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// Lists jobs discovered through the given source.
pub fn list_by_source(db: &Database, source: &str) -> Result<Vec<JobRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT * FROM jobs WHERE source = ?1")?;
        let rows = stmt
            .query_map(params![source], JobRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// Updates only the status of a job.
pub fn update_status(db: &Database, job_id: &str, status: &str) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "UPDATE jobs SET status = ?2 WHERE job_id = ?1",
            params![job_id, status],
        )?;
        Ok(())
    })
}

/// Stamps the applied date, keeping an earlier stamp if one exists.
pub fn set_applied_date_if_null(
    db: &Database,
    job_id: &str,
    applied_date: &str,
) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "UPDATE jobs SET applied_date = ?2 WHERE job_id = ?1 AND applied_date IS NULL",
            params![job_id, applied_date],
        )?;
        Ok(())
    })
}

/// Updates only the match score of a job.
pub fn update_score(db: &Database, job_id: &str, score: f64) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "UPDATE jobs SET match_score = ?2 WHERE job_id = ?1",
            params![job_id, score],
        )?;
        Ok(())
    })
}

/// Lists jobs applied to on or after the cutoff, most recent first.
/// Timestamps are RFC 3339, so string comparison is chronological.
pub fn recent_applied(db: &Database, cutoff: &str) -> Result<Vec<JobRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT * FROM jobs
             WHERE applied_date IS NOT NULL AND applied_date >= ?1
             ORDER BY applied_date DESC",
        )?;
        let rows = stmt
            .query_map(params![cutoff], JobRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// Counts jobs per status value.
pub fn count_by_status_all(db: &Database) -> Result<Vec<(String, i64)>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT status, COUNT(*) FROM jobs GROUP BY status")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// Lists every job in a stable order for exports.
pub fn all_ordered(db: &Database) -> Result<Vec<JobRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT * FROM jobs ORDER BY found_date, job_id")?;
        let rows = stmt
            .query_map([], JobRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}
