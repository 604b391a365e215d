//! Repository Layer
//!
//! Filesystem access for build logs and artifacts. The image directory is
//! the only persisted state: no database, no separate job index.

pub mod image_store;

pub use image_store::ImageStore;
