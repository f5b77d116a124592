//! Shared utilities for koha-perldeps.
//!
//! This crate provides cross-cutting concerns used by all other crates in
//! the workspace: the error type, process spawning, and terminal status
//! output.

pub mod errors;
pub mod process;
pub mod progress;
