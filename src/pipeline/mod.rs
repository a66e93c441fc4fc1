//! Query processing pipeline
//!
//! Ties language detection, translation and reply generation together for the
//! terminal UI, including the path to a remote backend.

pub mod backend_client;
pub mod options;
pub mod processor;

pub use backend_client::BackendClient;
pub use processor::{QueryOutcome, QueryProcessor};
