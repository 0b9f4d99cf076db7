//! Test harness for isolated test execution.
//!
//! The `TestHarness` struct provides a complete isolated environment for
//! testing the job lifecycle pipelines, including:
//! - A file-backed database in a temporary directory, so the open and
//!   migration paths are exercised the same way as production
//! - JobStore, pipeline and notification sink setup from a single config
//! - A scripted submission handler for driving dispatch outcomes

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::TempDir;

use jobhound::config::schema::{ApplicantProfile, Config};
use jobhound::db::Database;
use jobhound::job::Job;
use jobhound::notify::RecordingSink;
use jobhound::pipeline::{
    CorrespondencePipeline, CorrespondenceReport, DiscoveryBatch, DispatchPipeline,
    DispatchReport, InboundMessage, IntakePipeline, IntakeReport, SubmissionHandler,
    SubmissionReport,
};
use jobhound::store::JobStore;

/// Test harness providing isolated execution environment for integration tests.
pub struct TestHarness {
    /// Temporary directory holding the database file.
    temp_dir: TempDir,
    /// Path of the database file within temp_dir.
    pub db_path: PathBuf,
    /// Store over the harness database.
    pub store: JobStore,
    /// Config the pipelines are built from.
    pub config: Config,
    /// Sink capturing every notification the pipelines publish.
    pub sink: RecordingSink,
}

impl TestHarness {
    /// Create a new test harness with the default config.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new test harness with a custom config.
    pub fn with_config(config: Config) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("jobhound.db");
        let db = Database::open(&db_path).expect("Failed to open test database");

        Self {
            temp_dir,
            db_path,
            store: JobStore::new(db),
            config,
            sink: RecordingSink::new(),
        }
    }

    /// Get the base temp directory path.
    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create an intake pipeline from the harness config.
    pub fn create_intake(&self) -> IntakePipeline {
        IntakePipeline::from_config(&self.config)
    }

    /// Create a dispatch pipeline from the harness config.
    pub fn create_dispatch(&self) -> DispatchPipeline {
        DispatchPipeline::from_config(&self.config)
    }

    /// Create a correspondence pipeline from the harness config.
    pub fn create_correspondence(&self) -> CorrespondencePipeline {
        CorrespondencePipeline::from_config(&self.config)
    }

    /// Run one intake pass against the harness store and sink.
    pub fn run_intake(
        &self,
        batch: DiscoveryBatch,
        handler: &dyn SubmissionHandler,
        now: DateTime<Utc>,
    ) -> IntakeReport {
        self.create_intake()
            .run(&self.store, batch, handler, &self.sink, now)
    }

    /// Run one dispatch pass against the harness store.
    pub fn run_dispatch(
        &self,
        handler: &dyn SubmissionHandler,
        now: DateTime<Utc>,
    ) -> DispatchReport {
        self.create_dispatch().run(&self.store, handler, now)
    }

    /// Run one correspondence pass against the harness store and sink.
    pub fn run_correspondence(
        &self,
        messages: Vec<InboundMessage>,
        now: DateTime<Utc>,
    ) -> CorrespondenceReport {
        self.create_correspondence()
            .run(&self.store, messages, &self.sink, now)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Submission handler that replays a scripted sequence of outcomes and
/// records every job it was asked to submit. Once the script runs out,
/// every further submission succeeds.
pub struct ScriptedHandler {
    outcomes: RefCell<VecDeque<SubmissionReport>>,
    submitted: RefCell<Vec<String>>,
}

impl ScriptedHandler {
    pub fn new(outcomes: Vec<SubmissionReport>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into()),
            submitted: RefCell::new(Vec::new()),
        }
    }

    /// Job ids submitted so far, in call order.
    pub fn submitted_ids(&self) -> Vec<String> {
        self.submitted.borrow().clone()
    }

    /// Number of submission attempts made through this handler.
    pub fn calls(&self) -> usize {
        self.submitted.borrow().len()
    }
}

impl Default for ScriptedHandler {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl SubmissionHandler for ScriptedHandler {
    fn submit(&self, job: &Job, _profile: &ApplicantProfile) -> SubmissionReport {
        self.submitted.borrow_mut().push(job.job_id.clone());
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(SubmissionReport::submitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_creates_database_file() {
        let harness = TestHarness::new();

        assert!(harness.db_path.exists());
        assert!(harness.store.list_by_status(jobhound::job::JobStatus::New).is_empty());
    }

    #[test]
    fn test_scripted_handler_falls_back_to_success() {
        let handler = ScriptedHandler::new(vec![SubmissionReport::failed()]);
        let job = Job::from_raw(&jobhound::job::RawPosting::default(), Utc::now());
        let profile = ApplicantProfile::default();

        assert!(!handler.submit(&job, &profile).success);
        assert!(handler.submit(&job, &profile).success);
        assert_eq!(handler.calls(), 2);
    }
}
