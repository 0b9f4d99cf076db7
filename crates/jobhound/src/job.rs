use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a tracked job posting.
///
/// Forward moves only: `new` either gets applied to or skipped, an
/// application progresses to `interview`, `rejected` or `offer`, and the
/// two outcome states are terminal. A skipped job can still be applied to
/// later. Any state may "transition" to itself as a no-op.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    New,
    Applied,
    Interview,
    Rejected,
    Offer,
    Skipped,
}

impl JobStatus {
    pub const ALL: [JobStatus; 6] = [
        JobStatus::New,
        JobStatus::Applied,
        JobStatus::Interview,
        JobStatus::Rejected,
        JobStatus::Offer,
        JobStatus::Skipped,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::New => "new",
            JobStatus::Applied => "applied",
            JobStatus::Interview => "interview",
            JobStatus::Rejected => "rejected",
            JobStatus::Offer => "offer",
            JobStatus::Skipped => "skipped",
        }
    }

    pub fn parse(value: &str) -> Option<JobStatus> {
        match value {
            "new" => Some(JobStatus::New),
            "applied" => Some(JobStatus::Applied),
            "interview" => Some(JobStatus::Interview),
            "rejected" => Some(JobStatus::Rejected),
            "offer" => Some(JobStatus::Offer),
            "skipped" => Some(JobStatus::Skipped),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Rejected | JobStatus::Offer)
    }

    pub fn can_transition_to(self, next: JobStatus) -> bool {
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (JobStatus::New, JobStatus::Applied)
                | (JobStatus::New, JobStatus::Skipped)
                | (JobStatus::Applied, JobStatus::Interview)
                | (JobStatus::Applied, JobStatus::Rejected)
                | (JobStatus::Applied, JobStatus::Offer)
                | (JobStatus::Interview, JobStatus::Rejected)
                | (JobStatus::Interview, JobStatus::Offer)
                | (JobStatus::Skipped, JobStatus::Applied)
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked job posting with its lifecycle metadata.
///
/// `job_id` is the sole deduplication key. `found_date` is stamped once at
/// intake and never changes; `applied_date` is stamped on the first
/// transition into `applied` and kept thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
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
    pub status: JobStatus,
    pub found_date: DateTime<Utc>,
    pub applied_date: Option<DateTime<Utc>>,
}

impl Job {
    /// Builds a fresh `new`-status job from a scraped posting.
    pub fn from_raw(raw: &RawPosting, found_date: DateTime<Utc>) -> Job {
        Job {
            job_id: raw.resolved_job_id(),
            title: raw.title.clone(),
            company: raw.company.clone(),
            location: raw.location.clone(),
            salary: raw.salary.clone(),
            description: raw.description.clone(),
            url: raw.url.clone(),
            source: raw.source.clone(),
            posted_date: raw.posted_date.clone(),
            easy_apply: raw.easy_apply,
            match_score: 0.0,
            status: JobStatus::New,
            found_date,
            applied_date: None,
        }
    }
}

/// A posting as delivered by a scraping adapter, before intake.
///
/// Every field is optional in the wire sense: missing strings come through
/// empty and scoring degrades accordingly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPosting {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub posted_date: String,
    #[serde(default)]
    pub easy_apply: bool,
}

impl RawPosting {
    /// Returns the adapter-supplied id, or synthesizes a stable one of the
    /// form `{source}_{digest}` from the posting URL (title plus company
    /// when the URL is missing).
    pub fn resolved_job_id(&self) -> String {
        if let Some(id) = &self.job_id {
            if !id.is_empty() {
                return id.clone();
            }
        }

        let seed = if self.url.is_empty() {
            format!("{}{}", self.title, self.company)
        } else {
            self.url.clone()
        };
        let digest = Uuid::new_v5(&Uuid::NAMESPACE_URL, seed.as_bytes())
            .simple()
            .to_string();
        format!("{}_{}", self.source, &digest[..12])
    }
}

/// State of a queued submission. `pending` rows are picked up by the
/// dispatch pass; `completed` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    Pending,
    Completed,
}

impl QueueStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            QueueStatus::Pending => "pending",
            QueueStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<QueueStatus> {
        match value {
            "pending" => Some(QueueStatus::Pending),
            "completed" => Some(QueueStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deferred application waiting for its scheduled submission instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuedSubmission {
    pub id: i64,
    pub job_id: String,
    pub scheduled_time: DateTime<Utc>,
    pub status: QueueStatus,
    pub created_at: DateTime<Utc>,
}
