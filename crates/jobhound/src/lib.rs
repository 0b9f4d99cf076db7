pub mod classifier;
pub mod config;
pub mod db;
pub mod error;
pub mod job;
pub mod logging;
pub mod matcher;
pub mod notify;
pub mod pipeline;
pub mod store;
pub mod timing;

pub use classifier::{Classification, ReplyContext, ResponseCategory, ResponseClassifier};
pub use config::{config_file_path, load_config, load_config_from_str, Config};
pub use db::{Database, DatabaseError};
pub use error::{ConfigError, JobhoundError, Result, StoreError};
pub use job::{Job, JobStatus, QueuedSubmission, RawPosting};
pub use matcher::{MatchScorer, ScoreBreakdown};
pub use notify::{LogSink, Notification, NotificationKind, NotificationSink, NullSink, RecordingSink};
pub use pipeline::{
    CorrespondencePipeline, DiscoveryBatch, DispatchPipeline, InboundMessage, IntakePipeline,
    SubmissionHandler, SubmissionReport,
};
pub use store::{ActivityKind, ActivityRecord, JobStore, SearchRecord};
pub use timing::{IndustryClass, SubmissionTimer};
