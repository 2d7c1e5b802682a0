//! HTTP API for AI voice detection.
//!
//! The binary entry point lives in `main.rs`; the router, config and
//! temp-file guard are exposed as a library for tests and embedding.

pub mod config;
pub mod routes;
pub mod tmpfile;
