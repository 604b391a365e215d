//! Data Transfer Objects for the HTTP surface
//!
//! Wire shapes exchanged with clients. Field names are camelCase on the wire
//! to match the frontend's expectations.

pub mod job;
