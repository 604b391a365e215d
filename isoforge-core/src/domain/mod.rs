//! Core domain types
//!
//! Naming conventions tying a job to its on-disk files, and the progress
//! model derived from build logs. Shared between the server's store,
//! services and API layers.

pub mod job;
pub mod progress;
