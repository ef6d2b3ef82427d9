//! sb-s3: aws-sdk-s3 adapter for s3butler
//!
//! Implements the sb-core ObjectStore trait against aws-sdk-s3, plus the
//! multipart upload engine and the HTTP download-and-reupload transfer.

pub mod client;
pub mod fetch;
mod multipart;

pub use client::S3Client;
pub use fetch::{download_and_upload, key_from_url};
