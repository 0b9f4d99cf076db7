//! Search repository — history of discovery runs.

use rusqlite::{params, Row};

use super::{Database, DatabaseError};

#[derive(Debug, Clone)]
pub struct SearchRow {
    pub id: i64,
    pub keywords: String,
    pub location: String,
    pub source: String,
    pub jobs_found: i64,
    pub jobs_matched: i64,
    pub recorded_at: String,
}

impl SearchRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            keywords: row.get("keywords")?,
            location: row.get("location")?,
            source: row.get("source")?,
            jobs_found: row.get("jobs_found")?,
            jobs_matched: row.get("jobs_matched")?,
            recorded_at: row.get("recorded_at")?,
        })
    }
}

/// Appends a search history entry and returns its rowid.
pub fn insert(
    db: &Database,
    keywords: &str,
    location: &str,
    source: &str,
    jobs_found: i64,
    jobs_matched: i64,
    recorded_at: &str,
) -> Result<i64, DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO search_log (keywords, location, source, jobs_found, jobs_matched, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![keywords, location, source, jobs_found, jobs_matched, recorded_at],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Lists the most recent search entries, newest first.
pub fn recent(db: &Database, limit: u32) -> Result<Vec<SearchRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT * FROM search_log ORDER BY recorded_at DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit], SearchRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}
