//! Service Layer
//!
//! Business logic between the API handlers and the image store.
//! Each submodule covers one side of the job lifecycle.

pub mod build;
pub mod progress;
