//! Shared fixtures for the integration suites: a `TestHarness` backed
//! by a temp-dir database plus builders for postings, messages and
//! configs.

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::{ScriptedHandler, TestHarness};
