//! pr-labeler CLI library exports for testing.
//!
//! This module exposes the input handling and the run entry point used by the binary.

pub mod config;
pub mod errors;
pub mod runner;
pub mod workflow;
