//! Slidecast worker agent library.
//!
//! A worker agent is an independent process that polls the coordinator for
//! rendering jobs, runs the fetch → compose → render pipeline locally, and
//! submits the encoded video (or a failure report) back. Exposed as a
//! library so the pipeline stages are unit testable.

pub mod client;
pub mod config;
pub mod pipeline;
pub mod workspace;
