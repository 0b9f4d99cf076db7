//! Entity store — the single synchronous gateway to persistent job state.
//!
//! Wraps the database with lifecycle semantics: deduplicated intake,
//! status transitions with an audit trail, the submission queue and
//! reporting queries. Storage failures degrade rather than raise: write
//! operations report `false`, read operations report empty, and the
//! failure is logged.

use std::collections::BTreeMap;
use std::fmt;
use std::io;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{activity_repo, job_repo, queue_repo, search_repo, Database};
use crate::error::StoreError;
use crate::job::{Job, JobStatus, QueueStatus, QueuedSubmission};

/// What an activity entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// An application was submitted.
    Submission,
    /// The job moved to a new lifecycle status.
    StatusChange,
    /// Correspondence worth keeping without a status effect.
    Note,
    /// Something needs a human look.
    Flag,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Submission => "submission",
            ActivityKind::StatusChange => "status_change",
            ActivityKind::Note => "note",
            ActivityKind::Flag => "flag",
        }
    }

    pub fn parse(value: &str) -> Option<ActivityKind> {
        match value {
            "submission" => Some(ActivityKind::Submission),
            "status_change" => Some(ActivityKind::StatusChange),
            "note" => Some(ActivityKind::Note),
            "flag" => Some(ActivityKind::Flag),
            _ => None,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in a job's audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: i64,
    pub job_id: String,
    pub kind: ActivityKind,
    pub detail: String,
    pub recorded_at: DateTime<Utc>,
}

/// One recorded discovery run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRecord {
    pub id: i64,
    pub keywords: String,
    pub location: String,
    pub source: String,
    pub jobs_found: i64,
    pub jobs_matched: i64,
    pub recorded_at: DateTime<Utc>,
}

const CSV_HEADER: [&str; 14] = [
    "job_id",
    "title",
    "company",
    "location",
    "salary",
    "description",
    "url",
    "source",
    "posted_date",
    "easy_apply",
    "match_score",
    "status",
    "found_date",
    "applied_date",
];

/// Synchronous job store over a shared [`Database`] handle.
#[derive(Clone)]
pub struct JobStore {
    db: Database,
}

impl JobStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Inserts a job, ignoring it when the `job_id` is already tracked.
    /// Returns whether the job was actually stored.
    pub fn insert(&self, job: &Job) -> bool {
        let row = job_to_row(job);
        match job_repo::insert_ignore(&self.db, &row) {
            Ok(true) => {
                log::debug!("Stored job {} ({})", job.job_id, job.title);
                true
            }
            Ok(false) => {
                log::debug!("Job {} already tracked, skipping", job.job_id);
                false
            }
            Err(e) => {
                log::error!("Failed to store job {}: {}", job.job_id, e);
                false
            }
        }
    }

    pub fn get(&self, job_id: &str) -> Option<Job> {
        match job_repo::find_by_id(&self.db, job_id) {
            Ok(row) => row.map(row_to_job),
            Err(e) => {
                log::error!("Failed to load job {}: {}", job_id, e);
                None
            }
        }
    }

    /// Moves a job to a new status, enforcing the transition table.
    ///
    /// A same-status call is a no-op that reports success. A disallowed
    /// transition is rejected, flagged in the activity trail and reported
    /// as `false`. The first transition into `applied` stamps the
    /// `applied_date`; later transitions keep the original stamp.
    pub fn set_status(&self, job_id: &str, new_status: JobStatus) -> bool {
        let job = match self.get(job_id) {
            Some(job) => job,
            None => {
                log::warn!("Cannot set status on unknown job {}", job_id);
                return false;
            }
        };

        if job.status == new_status {
            log::debug!("Job {} already {}", job_id, new_status);
            return true;
        }

        if !job.status.can_transition_to(new_status) {
            log::warn!(
                "Rejected status change {} -> {} for job {}",
                job.status,
                new_status,
                job_id
            );
            self.record_activity(
                job_id,
                ActivityKind::Flag,
                &format!("Rejected status change {} -> {}", job.status, new_status),
            );
            return false;
        }

        if let Err(e) = job_repo::update_status(&self.db, job_id, new_status.as_str()) {
            log::error!("Failed to update status for job {}: {}", job_id, e);
            return false;
        }

        if new_status == JobStatus::Applied {
            let stamp = timestamp(Utc::now());
            if let Err(e) = job_repo::set_applied_date_if_null(&self.db, job_id, &stamp) {
                log::error!("Failed to stamp applied date for job {}: {}", job_id, e);
            }
            self.record_activity(job_id, ActivityKind::Submission, "Application submitted");
        } else {
            self.record_activity(
                job_id,
                ActivityKind::StatusChange,
                &format!("{} -> {}", job.status, new_status),
            );
        }

        log::info!("Job {}: {} -> {}", job_id, job.status, new_status);
        true
    }

    /// Lists jobs in the given status, best match first.
    pub fn list_by_status(&self, status: JobStatus) -> Vec<Job> {
        match job_repo::list_by_status(&self.db, status.as_str()) {
            Ok(rows) => rows.into_iter().map(row_to_job).collect(),
            Err(e) => {
                log::error!("Failed to list {} jobs: {}", status, e);
                Vec::new()
            }
        }
    }

    pub fn list_by_source(&self, source: &str) -> Vec<Job> {
        match job_repo::list_by_source(&self.db, source) {
            Ok(rows) => rows.into_iter().map(row_to_job).collect(),
            Err(e) => {
                log::error!("Failed to list jobs from {}: {}", source, e);
                Vec::new()
            }
        }
    }

    /// Lists jobs applied to within the last `days` before `as_of`,
    /// most recently applied first.
    pub fn recent_applied(&self, days: i64, as_of: DateTime<Utc>) -> Vec<Job> {
        let cutoff = timestamp(as_of - Duration::days(days));
        match job_repo::recent_applied(&self.db, &cutoff) {
            Ok(rows) => rows.into_iter().map(row_to_job).collect(),
            Err(e) => {
                log::error!("Failed to list recent applications: {}", e);
                Vec::new()
            }
        }
    }

    pub fn update_score(&self, job_id: &str, score: f64) -> bool {
        match job_repo::update_score(&self.db, job_id, score) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to update score for job {}: {}", job_id, e);
                false
            }
        }
    }

    /// Queues a submission for the given instant. The instant is stored
    /// as given; scheduling policy lives with the caller.
    pub fn enqueue_submission(&self, job_id: &str, scheduled_time: DateTime<Utc>) -> bool {
        let scheduled = timestamp(scheduled_time);
        match queue_repo::insert(&self.db, job_id, &scheduled, &timestamp(Utc::now())) {
            Ok(queue_id) => {
                log::debug!(
                    "Queued submission {} for job {} at {}",
                    queue_id,
                    job_id,
                    scheduled
                );
                true
            }
            Err(e) => {
                log::error!("Failed to queue submission for job {}: {}", job_id, e);
                false
            }
        }
    }

    /// Lists pending submissions due at or before `as_of`, joined with
    /// their jobs, earliest first.
    pub fn due_submissions(&self, as_of: DateTime<Utc>) -> Vec<(QueuedSubmission, Job)> {
        match queue_repo::due_with_jobs(&self.db, &timestamp(as_of)) {
            Ok(rows) => rows
                .into_iter()
                .map(|(queue, job)| (queue_to_submission(queue), row_to_job(job)))
                .collect(),
            Err(e) => {
                log::error!("Failed to list due submissions: {}", e);
                Vec::new()
            }
        }
    }

    /// Marks a queue entry completed. Completing an already-completed
    /// entry is a no-op that reports success; an unknown entry reports
    /// failure.
    pub fn complete_submission(&self, queue_id: i64) -> bool {
        match queue_repo::complete(&self.db, queue_id) {
            Ok(changed) if changed > 0 => true,
            Ok(_) => match queue_repo::find_by_id(&self.db, queue_id) {
                Ok(Some(_)) => {
                    log::debug!("Queue entry {} already completed", queue_id);
                    true
                }
                Ok(None) => {
                    log::warn!("Queue entry {} not found", queue_id);
                    false
                }
                Err(e) => {
                    log::error!("Failed to look up queue entry {}: {}", queue_id, e);
                    false
                }
            },
            Err(e) => {
                log::error!("Failed to complete queue entry {}: {}", queue_id, e);
                false
            }
        }
    }

    /// Counts jobs per status. Every status is present in the result,
    /// zero when absent from the table.
    pub fn status_counts(&self) -> BTreeMap<JobStatus, i64> {
        let mut counts: BTreeMap<JobStatus, i64> =
            JobStatus::ALL.iter().map(|s| (*s, 0)).collect();
        match job_repo::count_by_status_all(&self.db) {
            Ok(rows) => {
                for (status, count) in rows {
                    match JobStatus::parse(&status) {
                        Some(status) => {
                            counts.insert(status, count);
                        }
                        None => log::warn!("Ignoring unknown status '{}' in counts", status),
                    }
                }
            }
            Err(e) => log::error!("Failed to count jobs by status: {}", e),
        }
        counts
    }

    pub fn record_activity(&self, job_id: &str, kind: ActivityKind, detail: &str) -> bool {
        let recorded_at = timestamp(Utc::now());
        match activity_repo::insert(&self.db, job_id, kind.as_str(), detail, &recorded_at) {
            Ok(_) => true,
            Err(e) => {
                log::error!("Failed to record {} activity for job {}: {}", kind, job_id, e);
                false
            }
        }
    }

    /// Lists a job's audit trail in insertion order.
    pub fn activity_for(&self, job_id: &str) -> Vec<ActivityRecord> {
        match activity_repo::for_job(&self.db, job_id) {
            Ok(rows) => rows.into_iter().filter_map(activity_to_record).collect(),
            Err(e) => {
                log::error!("Failed to list activity for job {}: {}", job_id, e);
                Vec::new()
            }
        }
    }

    pub fn record_search(
        &self,
        keywords: &str,
        location: &str,
        source: &str,
        jobs_found: i64,
        jobs_matched: i64,
        recorded_at: DateTime<Utc>,
    ) -> bool {
        match search_repo::insert(
            &self.db,
            keywords,
            location,
            source,
            jobs_found,
            jobs_matched,
            &timestamp(recorded_at),
        ) {
            Ok(_) => true,
            Err(e) => {
                log::error!("Failed to record search history: {}", e);
                false
            }
        }
    }

    pub fn recent_searches(&self, limit: u32) -> Vec<SearchRecord> {
        match search_repo::recent(&self.db, limit) {
            Ok(rows) => rows.into_iter().map(search_to_record).collect(),
            Err(e) => {
                log::error!("Failed to list search history: {}", e);
                Vec::new()
            }
        }
    }

    /// Writes every tracked job as CSV and returns the row count. This is
    /// the one store operation that surfaces its errors, since a partial
    /// export is worse than a failed one.
    pub fn export_csv<W: io::Write>(&self, writer: W) -> Result<usize, StoreError> {
        let rows = job_repo::all_ordered(&self.db)?;

        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(CSV_HEADER)?;
        for row in &rows {
            let easy_apply = if row.easy_apply { "true" } else { "false" };
            let match_score = row.match_score.to_string();
            csv_writer.write_record([
                row.job_id.as_str(),
                row.title.as_str(),
                row.company.as_str(),
                row.location.as_str(),
                row.salary.as_str(),
                row.description.as_str(),
                row.url.as_str(),
                row.source.as_str(),
                row.posted_date.as_str(),
                easy_apply,
                match_score.as_str(),
                row.status.as_str(),
                row.found_date.as_str(),
                row.applied_date.as_deref().unwrap_or(""),
            ])?;
        }
        csv_writer.flush()?;

        log::info!("Exported {} jobs to CSV", rows.len());
        Ok(rows.len())
    }
}

/// RFC 3339 with second precision and a `Z` suffix, so stored timestamps
/// compare chronologically as strings.
fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn job_to_row(job: &Job) -> job_repo::JobRow {
    job_repo::JobRow {
        job_id: job.job_id.clone(),
        title: job.title.clone(),
        company: job.company.clone(),
        location: job.location.clone(),
        salary: job.salary.clone(),
        description: job.description.clone(),
        url: job.url.clone(),
        source: job.source.clone(),
        posted_date: job.posted_date.clone(),
        easy_apply: job.easy_apply,
        match_score: job.match_score,
        status: job.status.as_str().to_string(),
        found_date: timestamp(job.found_date),
        applied_date: job.applied_date.map(timestamp),
    }
}

fn row_to_job(row: job_repo::JobRow) -> Job {
    let status = JobStatus::parse(&row.status).unwrap_or_else(|| {
        log::warn!("Job {} has unknown status '{}'", row.job_id, row.status);
        JobStatus::New
    });
    let found_date = parse_timestamp(&row.found_date).unwrap_or_else(|| {
        log::warn!(
            "Job {} has unreadable found_date '{}'",
            row.job_id,
            row.found_date
        );
        DateTime::<Utc>::UNIX_EPOCH
    });
    let applied_date = match &row.applied_date {
        Some(value) => {
            let parsed = parse_timestamp(value);
            if parsed.is_none() {
                log::warn!("Job {} has unreadable applied_date '{}'", row.job_id, value);
            }
            parsed
        }
        None => None,
    };

    Job {
        job_id: row.job_id,
        title: row.title,
        company: row.company,
        location: row.location,
        salary: row.salary,
        description: row.description,
        url: row.url,
        source: row.source,
        posted_date: row.posted_date,
        easy_apply: row.easy_apply,
        match_score: row.match_score,
        status,
        found_date,
        applied_date,
    }
}

fn queue_to_submission(row: queue_repo::QueueRow) -> QueuedSubmission {
    let status = QueueStatus::parse(&row.status).unwrap_or_else(|| {
        log::warn!("Queue entry {} has unknown status '{}'", row.id, row.status);
        QueueStatus::Pending
    });
    QueuedSubmission {
        id: row.id,
        job_id: row.job_id,
        scheduled_time: parse_timestamp(&row.scheduled_time)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        status,
        created_at: parse_timestamp(&row.created_at).unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
    }
}

fn activity_to_record(row: activity_repo::ActivityRow) -> Option<ActivityRecord> {
    let kind = match ActivityKind::parse(&row.kind) {
        Some(kind) => kind,
        None => {
            log::warn!("Ignoring activity {} with unknown kind '{}'", row.id, row.kind);
            return None;
        }
    };
    Some(ActivityRecord {
        id: row.id,
        job_id: row.job_id,
        kind,
        detail: row.detail,
        recorded_at: parse_timestamp(&row.recorded_at).unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
    })
}

fn search_to_record(row: search_repo::SearchRow) -> SearchRecord {
    SearchRecord {
        id: row.id,
        keywords: row.keywords,
        location: row.location,
        source: row.source,
        jobs_found: row.jobs_found,
        jobs_matched: row.jobs_matched,
        recorded_at: parse_timestamp(&row.recorded_at).unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
    }
}
