//! Notification fan-out for events worth surfacing to the user.
//!
//! Pipelines publish through a [`NotificationSink`] so delivery stays
//! pluggable; desktop popups, webhooks and test recorders all implement
//! the same trait.

use serde::Serialize;

use crate::classifier::ResponseCategory;
use crate::job::Job;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationKind {
    /// A freshly discovered job scored at or above the configured
    /// high-score threshold.
    HighScoreMatch { score: f64 },
    /// A recruiter message was classified against an application.
    CorrespondenceClassified {
        category: ResponseCategory,
        confidence: f64,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    #[serde(flatten)]
    pub kind: NotificationKind,
    pub job: Job,
}

pub trait NotificationSink {
    fn publish(&self, notification: &Notification);
}

/// Writes notifications to the log, the default sink when no delivery
/// channel is wired up.
pub struct LogSink;

impl NotificationSink for LogSink {
    fn publish(&self, notification: &Notification) {
        match &notification.kind {
            NotificationKind::HighScoreMatch { score } => log::info!(
                "High score match: '{}' at {} scored {:.1}",
                notification.job.title,
                notification.job.company,
                score
            ),
            NotificationKind::CorrespondenceClassified {
                category,
                confidence,
            } => log::info!(
                "Message for '{}' at {} classified as {} ({:.2})",
                notification.job.title,
                notification.job.company,
                category,
                confidence
            ),
        }
    }
}

/// Discards notifications.
pub struct NullSink;

impl NotificationSink for NullSink {
    fn publish(&self, _notification: &Notification) {}
}

/// Collects notifications in memory, for tests and dry runs.
#[derive(Default)]
pub struct RecordingSink {
    received: std::sync::Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains everything published so far.
    pub fn take(&self) -> Vec<Notification> {
        match self.received.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(_) => Vec::new(),
        }
    }
}

impl NotificationSink for RecordingSink {
    fn publish(&self, notification: &Notification) {
        if let Ok(mut guard) = self.received.lock() {
            guard.push(notification.clone());
        }
    }
}
