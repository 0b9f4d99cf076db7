//! Correspondence pass: correlates inbound recruiter messages to recent
//! applications, classifies them and applies the status effect.

use chrono::{DateTime, Utc};
use tracing::{debug, info_span};

use crate::classifier::{Classification, ReplyContext, ResponseCategory, ResponseClassifier};
use crate::config::{ApplicantProfile, Config};
use crate::job::{Job, JobStatus};
use crate::notify::{Notification, NotificationKind, NotificationSink};
use crate::store::{ActivityKind, JobStore};

/// Message pulled by a mail-fetch adapter.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub sender_address: String,
    pub subject: String,
    pub body: String,
    pub received_at: DateTime<Utc>,
}

/// Days back an applied job stays correlatable to inbound mail.
const CORRELATION_WINDOW_DAYS: i64 = 30;

/// Per-message record of what the pass decided.
#[derive(Debug, Clone)]
pub struct MessageOutcome {
    pub subject: String,
    /// The correlated application, if any.
    pub job_id: Option<String>,
    pub classification: Option<Classification>,
}

/// Counters and outcomes for one correspondence run.
#[derive(Debug, Clone, Default)]
pub struct CorrespondenceReport {
    pub processed: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub outcomes: Vec<MessageOutcome>,
}

pub struct CorrespondencePipeline {
    classifier: ResponseClassifier,
    profile: ApplicantProfile,
}

impl CorrespondencePipeline {
    pub fn from_config(config: &Config) -> Self {
        Self {
            classifier: ResponseClassifier::new(config.signals.clone()),
            profile: config.profile.clone(),
        }
    }

    /// Processes one batch of inbound messages against applications from
    /// the trailing correlation window.
    pub fn run(
        &self,
        store: &JobStore,
        messages: Vec<InboundMessage>,
        sink: &dyn NotificationSink,
        now: DateTime<Utc>,
    ) -> CorrespondenceReport {
        let _span = info_span!("correspondence_run", messages = messages.len()).entered();

        let recent = store.recent_applied(CORRELATION_WINDOW_DAYS, now);
        let mut report = CorrespondenceReport::default();

        for message in messages {
            report.processed += 1;

            let Some(job) = correlate(&recent, &message) else {
                debug!("No recent application matches '{}'", message.subject);
                report.unmatched += 1;
                report.outcomes.push(MessageOutcome {
                    subject: message.subject,
                    job_id: None,
                    classification: None,
                });
                continue;
            };
            report.matched += 1;

            let ctx = ReplyContext {
                job_title: job.title.clone(),
                company: job.company.clone(),
                sender_name: String::new(),
                profile: self.profile.clone(),
                today: now.date_naive(),
            };
            let text = format!("{} {}", message.subject, message.body);
            let classification = self.classifier.classify(&text, &ctx);

            self.apply_effect(store, job, &classification);

            sink.publish(&Notification {
                kind: NotificationKind::CorrespondenceClassified {
                    category: classification.category,
                    confidence: classification.confidence,
                },
                job: job.clone(),
            });

            report.outcomes.push(MessageOutcome {
                subject: message.subject,
                job_id: Some(job.job_id.clone()),
                classification: Some(classification),
            });
        }

        debug!(
            "Correspondence pass done: {} matched, {} unmatched",
            report.matched, report.unmatched
        );
        report
    }

    /// The status-transition side of a classification.
    fn apply_effect(&self, store: &JobStore, job: &Job, classification: &Classification) {
        match classification.category {
            ResponseCategory::InterviewRequest => {
                store.set_status(&job.job_id, JobStatus::Interview);
            }
            ResponseCategory::Rejection => {
                store.set_status(&job.job_id, JobStatus::Rejected);
            }
            ResponseCategory::FollowUp | ResponseCategory::InformationRequest => {
                store.record_activity(
                    &job.job_id,
                    ActivityKind::Note,
                    &format!("Recruiter message classified as {}", classification.category),
                );
            }
            ResponseCategory::Unknown => {
                store.record_activity(
                    &job.job_id,
                    ActivityKind::Flag,
                    "Recruiter message needs manual review",
                );
            }
        }
    }
}

/// Finds the application a message refers to. An exact job id mention
/// wins; otherwise the company name must appear and the title must match
/// when the job has one.
fn correlate<'a>(recent: &'a [Job], message: &InboundMessage) -> Option<&'a Job> {
    let text = format!("{} {}", message.subject, message.body).to_lowercase();

    if let Some(job) = recent
        .iter()
        .find(|job| text.contains(&job.job_id.to_lowercase()))
    {
        return Some(job);
    }

    recent.iter().find(|job| {
        !job.company.is_empty()
            && text.contains(&job.company.to_lowercase())
            && (job.title.is_empty() || text.contains(&job.title.to_lowercase()))
    })
}
