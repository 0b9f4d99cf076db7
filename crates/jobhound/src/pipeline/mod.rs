//! Orchestration passes wiring the core components to the adapter
//! traits. Each pass is synchronous and takes `now` explicitly so hosts
//! control the clock.

pub mod correspondence;
pub mod dispatch;
pub mod intake;

pub use correspondence::{
    CorrespondencePipeline, CorrespondenceReport, InboundMessage, MessageOutcome,
};
pub use dispatch::{DispatchPipeline, DispatchReport, SubmissionHandler, SubmissionReport};
pub use intake::{DiscoveryBatch, IntakePipeline, IntakeReport};
