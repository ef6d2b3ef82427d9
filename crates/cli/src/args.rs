//! CLI argument surface
//!
//! One flag per storage operation; flags combine freely within a single
//! invocation against one bucket. The historical multi-letter short forms
//! ("-bn") survive as long-style aliases ("--bn"). Arguments are parsed
//! once into this struct and passed by value into the dispatcher.

use std::path::PathBuf;

use clap::Parser;

use sb_core::TransferConfig;

use crate::output::OutputConfig;

/// s3b - manage S3-compatible buckets and objects
///
/// Without --bucket_name, lists all buckets visible to the credential.
/// With it, runs every selected operation against that bucket in order.
#[derive(Parser, Debug, Clone)]
#[command(name = "s3b")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Name of the bucket to perform operations on
    #[arg(long = "bucket_name", alias = "bn", value_name = "NAME")]
    pub bucket_name: Option<String>,

    /// Create the bucket
    #[arg(long = "create_bucket", alias = "cb")]
    pub create_bucket: bool,

    /// Delete the bucket
    #[arg(long = "delete_bucket", alias = "db")]
    pub delete_bucket: bool,

    /// Enable default server-side encryption on the bucket
    #[arg(long = "enable_bucket_encryption", alias = "eb")]
    pub enable_bucket_encryption: bool,

    /// Print the bucket's access policy
    #[arg(long = "read_bucket_policy", alias = "rbp")]
    pub read_bucket_policy: bool,

    /// Set a canned bucket policy: 'public_read_policy' or 'multiple_policy'
    #[arg(long = "set_bucket_policy", alias = "sbp", value_name = "KIND")]
    pub set_bucket_policy: Option<String>,

    /// Apply the 120-day expiry lifecycle policy to the bucket
    #[arg(long = "set_lifecycle_policy", alias = "slp")]
    pub set_lifecycle_policy: bool,

    /// Upload a file in a single shot (object key = base file name)
    #[arg(long = "upload_small_file", alias = "usf", value_name = "PATH")]
    pub upload_small_file: Option<PathBuf>,

    /// Upload a file, switching to multipart above the threshold
    #[arg(long = "upload_large_file", alias = "ulf", value_name = "PATH")]
    pub upload_large_file: Option<PathBuf>,

    /// Delete one object from the bucket
    #[arg(long = "delete_file_object", alias = "dfo", value_name = "KEY")]
    pub delete_file_object: Option<String>,

    /// Fetch a URL and upload the body under its trailing path segment
    #[arg(long = "download_and_upload", alias = "dlu", value_name = "URL")]
    pub download_and_upload: Option<String>,

    /// List all object keys in the bucket
    #[arg(long = "get_objects", alias = "go")]
    pub get_objects: bool,

    /// Grant public read on one existing object
    #[arg(long = "set_object_access", alias = "soa", value_name = "KEY")]
    pub set_object_access: Option<String>,

    /// Print the bucket's versioning status
    #[arg(long = "bucket_versioning", alias = "bv")]
    pub bucket_versioning: bool,

    /// List recorded versions of one object
    #[arg(long = "list_file_versions", alias = "lfv", value_name = "KEY")]
    pub list_file_versions: Option<String>,

    /// Copy the previous version of an object over the current one
    #[arg(long = "restore_previous_version", alias = "rpv", value_name = "KEY")]
    pub restore_previous_version: Option<String>,

    /// Region for bucket creation (location constraint)
    #[arg(long, env = "S3B_REGION", value_name = "REGION")]
    pub region: Option<String>,

    /// File size in bytes above which uploads go multipart
    #[arg(long, value_name = "BYTES")]
    pub multipart_threshold: Option<u64>,

    /// Multipart part size in bytes
    #[arg(long, value_name = "BYTES")]
    pub part_size: Option<u64>,

    /// Concurrent part uploads
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Disable progress spinners
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    /// Output configuration derived from the global switches
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            quiet: self.quiet,
            no_color: self.no_color,
            no_progress: self.no_progress,
        }
    }

    /// Transfer configuration with any CLI overrides applied
    pub fn transfer_config(&self) -> TransferConfig {
        let mut config = TransferConfig::new();
        if let Some(bytes) = self.multipart_threshold {
            config = config.multipart_threshold(bytes);
        }
        if let Some(bytes) = self.part_size {
            config = config.part_size(bytes);
        }
        if let Some(n) = self.concurrency {
            config = config.concurrency(n);
        }
        config
    }
}
