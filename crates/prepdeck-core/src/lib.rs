//! prepdeck-core — Session state machine, scoring engine, and statistics.
//!
//! This crate defines the question bank, the interview session lifecycle,
//! the heuristic scoring pipeline, and the aggregate statistics that the
//! rest of prepdeck builds on.

pub mod bank;
pub mod error;
pub mod model;
pub mod result;
pub mod scoring;
pub mod session;
pub mod statistics;
