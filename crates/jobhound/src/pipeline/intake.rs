//! Intake pass: scores one discovery batch, persists the survivors and
//! decides for each whether to submit immediately or queue for the next
//! good submission window.

use chrono::{DateTime, Utc};
use tracing::{debug, info_span, warn};

use crate::config::{ApplicantProfile, Config};
use crate::job::{Job, JobStatus};
use crate::matcher::MatchScorer;
use crate::notify::{Notification, NotificationKind, NotificationSink};
use crate::store::JobStore;
use crate::timing::SubmissionTimer;

use super::dispatch::SubmissionHandler;

/// One scraper run handed to the intake pass.
#[derive(Debug, Clone)]
pub struct DiscoveryBatch {
    pub keywords: String,
    pub location: String,
    pub source: String,
    pub postings: Vec<crate::job::RawPosting>,
}

/// Counters for one intake run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakeReport {
    pub discovered: usize,
    pub matched: usize,
    pub inserted: usize,
    pub notified: usize,
    /// Jobs submitted immediately because their window was close.
    pub submitted_now: Vec<String>,
    /// Jobs queued for a later submission window.
    pub enqueued: Vec<String>,
}

pub struct IntakePipeline {
    scorer: MatchScorer,
    timer: SubmissionTimer,
    profile: ApplicantProfile,
    min_score: f64,
    high_score_threshold: f64,
}

impl IntakePipeline {
    /// Production constructor, builds the scorer and timer from config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            scorer: MatchScorer::new(config.scoring.clone()),
            timer: SubmissionTimer::new(config.timing.clone()),
            profile: config.profile.clone(),
            min_score: config.scoring.min_score,
            high_score_threshold: config.notify.high_score_threshold,
        }
    }

    /// Runs one discovery batch end to end and records it in the search
    /// log. Already known jobs are skipped without rescheduling.
    pub fn run(
        &self,
        store: &JobStore,
        batch: DiscoveryBatch,
        handler: &dyn SubmissionHandler,
        sink: &dyn NotificationSink,
        now: DateTime<Utc>,
    ) -> IntakeReport {
        let _span = info_span!("intake_run", source = %batch.source).entered();

        let DiscoveryBatch {
            keywords,
            location,
            source,
            postings,
        } = batch;

        let mut report = IntakeReport {
            discovered: postings.len(),
            ..IntakeReport::default()
        };

        let matched = {
            let _step = info_span!("score_postings").entered();
            let jobs: Vec<Job> = postings
                .iter()
                .map(|raw| Job::from_raw(raw, now))
                .collect();
            self.scorer.filter(jobs, self.min_score)
        };
        report.matched = matched.len();

        {
            let _step = info_span!("persist_and_schedule").entered();
            for job in matched {
                if !store.insert(&job) {
                    debug!("Already tracking '{}', skipping", job.job_id);
                    continue;
                }
                report.inserted += 1;

                if job.match_score >= self.high_score_threshold {
                    sink.publish(&Notification {
                        kind: NotificationKind::HighScoreMatch {
                            score: job.match_score,
                        },
                        job: job.clone(),
                    });
                    report.notified += 1;
                }

                self.schedule(store, handler, &job, now, &mut report);
            }
        }

        {
            let _step = info_span!("record_search").entered();
            store.record_search(
                &keywords,
                &location,
                &source,
                report.discovered as i64,
                report.matched as i64,
                now,
            );
        }

        report
    }

    /// Submit-now versus queue decision for one freshly inserted job.
    fn schedule(
        &self,
        store: &JobStore,
        handler: &dyn SubmissionHandler,
        job: &Job,
        now: DateTime<Utc>,
        report: &mut IntakeReport,
    ) {
        if job.easy_apply && self.timer.should_submit_now_at(job, now) {
            let outcome = handler.submit(job, &self.profile);
            if outcome.is_complete() {
                store.set_status(&job.job_id, JobStatus::Applied);
                report.submitted_now.push(job.job_id.clone());
                debug!("Submitted '{}' inside its window", job.job_id);
            } else {
                warn!(
                    "Immediate submission for '{}' did not go through, leaving as new",
                    job.job_id
                );
            }
            return;
        }

        let scheduled = self.timer.optimal_time_at(job, now);
        if store.enqueue_submission(&job.job_id, scheduled) {
            report.enqueued.push(job.job_id.clone());
            debug!("Queued '{}' for {}", job.job_id, scheduled);
        }
    }
}
