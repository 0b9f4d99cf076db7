//! Dispatch pass: drains due queued submissions through the submission
//! adapter and completes or re-queues them per its report.

use chrono::{DateTime, Utc};
use tracing::{debug, info_span, warn};

use crate::config::{ApplicantProfile, Config};
use crate::job::{Job, JobStatus};
use crate::store::JobStore;

/// Adapter performing the actual application submission.
pub trait SubmissionHandler {
    fn submit(&self, job: &Job, profile: &ApplicantProfile) -> SubmissionReport;
}

/// Outcome reported by a submission adapter.
#[derive(Debug, Clone, Default)]
pub struct SubmissionReport {
    pub success: bool,
    /// Form questions the adapter could not answer on its own. Non-empty
    /// means the submission did not go through and needs a human.
    pub unresolved_questions: Vec<String>,
}

impl SubmissionReport {
    pub fn submitted() -> Self {
        Self {
            success: true,
            unresolved_questions: Vec::new(),
        }
    }

    pub fn failed() -> Self {
        Self::default()
    }

    pub fn needs_answers(questions: Vec<String>) -> Self {
        Self {
            success: false,
            unresolved_questions: questions,
        }
    }

    /// A submission only counts when it succeeded with nothing left open.
    pub fn is_complete(&self) -> bool {
        self.success && self.unresolved_questions.is_empty()
    }
}

/// Counters for one dispatch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchReport {
    pub due: usize,
    pub submitted: usize,
    /// Left queued because the adapter hit questions it could not answer.
    pub needs_answers: usize,
    /// Left queued after a plain submission failure.
    pub failed: usize,
}

pub struct DispatchPipeline {
    profile: ApplicantProfile,
}

impl DispatchPipeline {
    pub fn from_config(config: &Config) -> Self {
        Self {
            profile: config.profile.clone(),
        }
    }

    /// Submits every queued application due at `now`. Successful ones are
    /// marked applied and completed; everything else stays pending for
    /// the next pass.
    pub fn run(
        &self,
        store: &JobStore,
        handler: &dyn SubmissionHandler,
        now: DateTime<Utc>,
    ) -> DispatchReport {
        let _span = info_span!("dispatch_run").entered();

        let due = store.due_submissions(now);
        let mut report = DispatchReport {
            due: due.len(),
            ..DispatchReport::default()
        };

        for (queued, job) in due {
            let outcome = handler.submit(&job, &self.profile);
            if outcome.is_complete() {
                store.set_status(&job.job_id, JobStatus::Applied);
                store.complete_submission(queued.id);
                report.submitted += 1;
                debug!("Submitted queued application for '{}'", job.job_id);
            } else if !outcome.unresolved_questions.is_empty() {
                warn!(
                    "Submission for '{}' blocked by {} unresolved questions, leaving queued",
                    job.job_id,
                    outcome.unresolved_questions.len()
                );
                report.needs_answers += 1;
            } else {
                warn!("Submission for '{}' failed, leaving queued", job.job_id);
                report.failed += 1;
            }
        }

        debug!(
            "Dispatch pass done: {} due, {} submitted",
            report.due, report.submitted
        );
        report
    }
}
