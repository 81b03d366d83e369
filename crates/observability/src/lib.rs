//! Tracing/logging setup shared by binaries and integration tests.

pub mod tracing;

pub use crate::tracing::{init, init_with_format, LogFormat};
