//! ISO Forge Core
//!
//! Core types and abstractions for the ISO Forge build service.
//!
//! This crate contains:
//! - Domain types: job naming conventions and derived build progress
//! - DTOs: request/response shapes for the HTTP surface

pub mod domain;
pub mod dto;
