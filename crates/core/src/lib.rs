//! sb-core: Core library for the s3butler CLI
//!
//! This crate provides the SDK-free core of s3butler:
//! - Error taxonomy
//! - The ObjectStore trait (the seam to the storage SDK)
//! - Policy document builders
//! - Lifecycle rule types
//! - Transfer configuration and part arithmetic
//! - Version-ordering logic
//!
//! Keeping this crate independent of any specific S3 SDK keeps the
//! dispatcher testable against a mocked store.

pub mod error;
pub mod lifecycle;
pub mod policy;
pub mod store;
pub mod transfer;
pub mod version;

pub use error::{Error, Result};
pub use lifecycle::{LifecycleRule, DEFAULT_EXPIRE_DAYS};
pub use policy::{PolicyDocument, PolicyKind, PolicyStatement};
pub use store::{BucketInfo, BucketStatus, ObjectStore};
pub use transfer::{part_byte_range, part_count, TransferConfig};
pub use version::{previous_version, ObjectVersion};

#[cfg(feature = "mocks")]
pub use store::MockObjectStore;
