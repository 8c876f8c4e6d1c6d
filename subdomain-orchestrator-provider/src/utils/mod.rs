//! Shared utilities for client implementations.

pub mod log_sanitizer;
