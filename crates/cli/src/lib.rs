//! s3butler CLI library
//!
//! Exposed as a library so integration tests can drive the argument surface
//! and dispatcher directly.

pub mod args;
pub mod dispatch;
pub mod output;
