//! ObjectStore trait definition
//!
//! This trait is the seam between the CLI dispatcher and the storage SDK.
//! The adapter crate implements it against aws-sdk-s3; dispatcher tests mock
//! it (enable the `mocks` feature for `MockObjectStore`).

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::lifecycle::LifecycleRule;
use crate::policy::PolicyDocument;
use crate::transfer::TransferConfig;
use crate::version::ObjectVersion;

/// Metadata for a bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketInfo {
    /// Bucket name
    pub name: String,

    /// Creation timestamp, when the service reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<jiff::Timestamp>,
}

impl BucketInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created: None,
        }
    }
}

/// Result of a bucket existence probe.
///
/// The probe never fails: errors the service returns (including permission
/// errors) fold into `Unknown` so the caller decides how to treat them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketStatus {
    /// The bucket exists and is accessible
    Exists,
    /// The service reported the bucket as missing
    Absent,
    /// The probe failed for another reason (permissions, transport)
    Unknown(String),
}

impl BucketStatus {
    /// Collapse to a boolean, treating `Unknown` as absent.
    ///
    /// This conflates "absent" with "inaccessible" and is the historical
    /// default of this surface.
    pub fn exists_or_absent(&self) -> bool {
        matches!(self, BucketStatus::Exists)
    }
}

/// Trait for S3-compatible storage operations
///
/// Every method is a fresh request/response round-trip; no state is kept
/// between calls.
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List all buckets visible to the credential
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>>;

    /// Create a bucket, with a location constraint when a region is given
    async fn create_bucket(&self, bucket: &str, region: Option<&str>) -> Result<()>;

    /// Delete a bucket (fails on non-empty or missing buckets, per the service)
    async fn delete_bucket(&self, bucket: &str) -> Result<()>;

    /// Probe whether a bucket exists
    async fn bucket_status(&self, bucket: &str) -> BucketStatus;

    /// Enable default server-side encryption on a bucket (full replace)
    async fn set_bucket_encryption(&self, bucket: &str) -> Result<()>;

    /// Read the bucket's access policy as raw JSON
    async fn read_bucket_policy(&self, bucket: &str) -> Result<String>;

    /// Replace the bucket's access policy with the given document
    async fn set_bucket_policy(&self, bucket: &str, policy: &PolicyDocument) -> Result<()>;

    /// Replace the bucket's entire lifecycle configuration with `rules`
    async fn set_lifecycle_rules(&self, bucket: &str, rules: &[LifecycleRule]) -> Result<()>;

    /// Single-shot upload of a local file, granting public read on the object
    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()>;

    /// Upload a local file, switching to multipart above the configured threshold
    async fn put_file_multipart(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        config: &TransferConfig,
    ) -> Result<()>;

    /// List object keys in a bucket (empty vec when the bucket has none)
    async fn list_objects(&self, bucket: &str) -> Result<Vec<String>>;

    /// Delete a single object (idempotent per the service contract)
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;

    /// Grant public read on one existing object
    async fn set_object_public_read(&self, bucket: &str, key: &str) -> Result<()>;

    /// Versioning status string, `"Not Enabled"` when unset
    async fn versioning_status(&self, bucket: &str) -> Result<String>;

    /// List recorded versions of one key (empty vec when none exist)
    async fn list_object_versions(&self, bucket: &str, key: &str) -> Result<Vec<ObjectVersion>>;

    /// Copy the previous version over the current one, creating a new
    /// current version. Returns false when fewer than two versions exist.
    async fn restore_previous_version(&self, bucket: &str, key: &str) -> Result<bool>;
}
