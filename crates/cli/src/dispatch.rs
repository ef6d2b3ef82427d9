//! Operation dispatch
//!
//! Runs every operation selected on the command line, in a fixed order,
//! against one bucket. A failing operation prints its failure message and
//! dispatch moves on to the remaining flags. The exit status is uniform:
//! 0 when every selected operation succeeded, 1 otherwise.

use std::path::Path;

use sb_core::{Error, LifecycleRule, ObjectStore, PolicyKind, Result, TransferConfig};

use crate::args::Cli;
use crate::output::{Formatter, OutputConfig, Spinner};

/// Execute the selected operations and return the process exit code
pub async fn run(cli: Cli, store: &impl ObjectStore) -> i32 {
    let output = cli.output_config();
    let formatter = Formatter::new(output.clone());

    // No target bucket: list everything visible to the credential
    let Some(bucket) = cli.bucket_name.clone() else {
        return match store.list_buckets().await {
            Ok(buckets) => {
                formatter.println("Buckets:");
                for info in &buckets {
                    match info.created {
                        Some(created) => {
                            formatter.println(&format!("  {}  (created {created})", info.name));
                        }
                        None => formatter.println(&format!("  {}", info.name)),
                    }
                }
                0
            }
            Err(e) => {
                formatter.error(&format!("Failed to list buckets: {e}"));
                1
            }
        };
    };

    let transfer = cli.transfer_config();
    let mut failures = 0u32;

    if cli.create_bucket {
        match store.create_bucket(&bucket, cli.region.as_deref()).await {
            Ok(()) => formatter.success(&format!("Bucket {bucket} created successfully")),
            Err(e) => {
                failures += 1;
                formatter.error(&format!("Failed to create bucket {bucket}: {e}"));
            }
        }
    }

    if cli.delete_bucket {
        match store.delete_bucket(&bucket).await {
            Ok(()) => formatter.success(&format!("Bucket {bucket} deleted successfully")),
            Err(e) => {
                failures += 1;
                formatter.error(&format!("Failed to delete bucket {bucket}: {e}"));
            }
        }
    }

    if cli.enable_bucket_encryption {
        match store.set_bucket_encryption(&bucket).await {
            Ok(()) => formatter.success(&format!("Bucket encryption enabled for {bucket}")),
            Err(e) => {
                failures += 1;
                formatter.error(&format!(
                    "Failed to enable bucket encryption for {bucket}: {e}"
                ));
            }
        }
    }

    if cli.read_bucket_policy {
        match store.read_bucket_policy(&bucket).await {
            Ok(policy) => formatter.println(&format!("Bucket policy for {bucket}: {policy}")),
            Err(e) => {
                failures += 1;
                formatter.error(&format!("Failed to read bucket policy for {bucket}: {e}"));
            }
        }
    }

    if let Some(kind) = &cli.set_bucket_policy {
        // Parse before touching the service; unknown kinds never leave the
        // process.
        match assign_policy(store, &bucket, kind).await {
            Ok(()) => formatter.success(&format!("Bucket policy '{kind}' set for {bucket}")),
            Err(e) => {
                failures += 1;
                formatter.error(&e.to_string());
            }
        }
    }

    if cli.set_lifecycle_policy {
        let rules = [LifecycleRule::default_expiry()];
        match store.set_lifecycle_rules(&bucket, &rules).await {
            Ok(()) => formatter.success(&format!("Lifecycle policy set for bucket {bucket}")),
            Err(e) => {
                failures += 1;
                formatter.error(&format!(
                    "Failed to set lifecycle policy for bucket {bucket}: {e}"
                ));
            }
        }
    }

    if let Some(path) = &cli.upload_small_file {
        match upload_small(store, &bucket, path).await {
            Ok(key) => formatter.success(&format!(
                "File {key} uploaded successfully to bucket {bucket}"
            )),
            Err(e) => {
                failures += 1;
                formatter.error(&format!("Failed to upload file {}: {e}", path.display()));
            }
        }
    }

    if let Some(path) = &cli.upload_large_file {
        match upload_large(store, &bucket, path, &transfer, &output).await {
            Ok(message) => formatter.success(&message),
            Err(e) => {
                failures += 1;
                formatter.error(&format!(
                    "Failed to upload large file {}: {e}",
                    path.display()
                ));
            }
        }
    }

    if let Some(key) = &cli.delete_file_object {
        match store.delete_object(&bucket, key).await {
            Ok(()) => formatter.success(&format!(
                "File {key} deleted successfully from bucket {bucket}"
            )),
            Err(e) => {
                failures += 1;
                formatter.error(&format!(
                    "Failed to delete file {key} from bucket {bucket}: {e}"
                ));
            }
        }
    }

    if let Some(url) = &cli.download_and_upload {
        let spinner = Spinner::new(&output, &format!("Fetching {url} ..."));
        let result = sb_s3::download_and_upload(store, &bucket, url).await;
        spinner.clear();

        match result {
            Ok(key) => {
                formatter.success(&format!("Uploaded {key} from {url} to bucket {bucket}"));
            }
            Err(e) => {
                failures += 1;
                formatter.error(&format!("Failed to transfer {url}: {e}"));
            }
        }
    }

    if cli.get_objects {
        match store.list_objects(&bucket).await {
            Ok(keys) if keys.is_empty() => {
                formatter.println(&format!("No objects found in bucket {bucket}"));
            }
            Ok(keys) => {
                formatter.println(&format!("Objects in bucket {bucket}:"));
                for key in &keys {
                    formatter.println(&format!("  {key}"));
                }
            }
            Err(e) => {
                failures += 1;
                formatter.error(&format!("Failed to list objects in bucket {bucket}: {e}"));
            }
        }
    }

    if let Some(key) = &cli.set_object_access {
        match store.set_object_public_read(&bucket, key).await {
            Ok(()) => formatter.success(&format!(
                "Access policy set to public-read for object {key} in bucket {bucket}"
            )),
            Err(e) => {
                failures += 1;
                formatter.error(&format!(
                    "Failed to set access policy for object {key} in bucket {bucket}: {e}"
                ));
            }
        }
    }

    if cli.bucket_versioning {
        match store.versioning_status(&bucket).await {
            Ok(status) => formatter.println(&format!("Bucket versioning status: {status}")),
            Err(e) => {
                failures += 1;
                formatter.error(&format!(
                    "Failed to read versioning status for {bucket}: {e}"
                ));
            }
        }
    }

    if let Some(key) = &cli.list_file_versions {
        match store.list_object_versions(&bucket, key).await {
            Ok(versions) if versions.is_empty() => {
                formatter.println(&format!("No versions found for file {key} in bucket {bucket}"));
            }
            Ok(versions) => {
                formatter.println(&format!("Versions of file {key}:"));
                for version in &versions {
                    let modified = version
                        .last_modified
                        .map(|ts| ts.to_string())
                        .unwrap_or_else(|| "unknown".to_string());
                    formatter.println(&format!(
                        "  Version ID: {}, Last Modified: {modified}",
                        version.version_id
                    ));
                }
            }
            Err(e) => {
                failures += 1;
                formatter.error(&format!("Failed to list versions of file {key}: {e}"));
            }
        }
    }

    if let Some(key) = &cli.restore_previous_version {
        match store.restore_previous_version(&bucket, key).await {
            Ok(true) => formatter.success(&format!(
                "Previous version of file {key} restored successfully"
            )),
            Ok(false) => {
                failures += 1;
                formatter.error(&format!("No previous version of file {key} to restore"));
            }
            Err(e) => {
                failures += 1;
                formatter.error(&format!(
                    "Failed to restore previous version of file {key}: {e}"
                ));
            }
        }
    }

    if failures == 0 { 0 } else { 1 }
}

/// Resolve the policy kind, then replace the bucket policy
async fn assign_policy(store: &impl ObjectStore, bucket: &str, kind: &str) -> Result<()> {
    let kind = PolicyKind::parse(kind)?;
    store.set_bucket_policy(bucket, &kind.document(bucket)).await
}

/// Object key for an uploaded file: the base file name, directory stripped.
///
/// Two local files sharing a basename land on the same key; the last upload
/// wins.
fn object_key(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| Error::Usage(format!("'{}' has no file name", path.display())))
}

async fn upload_small(store: &impl ObjectStore, bucket: &str, path: &Path) -> Result<String> {
    let key = object_key(path)?;
    store.put_file(bucket, &key, path).await?;
    Ok(key)
}

async fn upload_large(
    store: &impl ObjectStore,
    bucket: &str,
    path: &Path,
    transfer: &TransferConfig,
    output: &OutputConfig,
) -> Result<String> {
    let key = object_key(path)?;
    let size = std::fs::metadata(path)?.len();

    let spinner = Spinner::new(output, &format!("Uploading {} ...", path.display()));
    let result = store.put_file_multipart(bucket, &key, path, transfer).await;
    spinner.clear();
    result?;

    Ok(format!(
        "Large file {key} ({}) uploaded successfully to bucket {bucket}",
        humansize::format_size(size, humansize::BINARY)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use sb_core::{BucketInfo, MockObjectStore, ObjectVersion};

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["s3b", "--quiet"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[tokio::test]
    async fn test_no_bucket_lists_buckets() {
        let mut mock = MockObjectStore::new();
        mock.expect_list_buckets()
            .times(1)
            .returning(|| Ok(vec![BucketInfo::new("demo-1")]));

        let code = run(cli(&[]), &mock).await;
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_create_bucket_passes_region() {
        let mut mock = MockObjectStore::new();
        mock.expect_create_bucket()
            .withf(|bucket, region| bucket == "demo-1" && *region == Some("eu-west-1"))
            .times(1)
            .returning(|_, _| Ok(()));

        let code = run(
            cli(&["--bn", "demo-1", "--cb", "--region", "eu-west-1"]),
            &mock,
        )
        .await;
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_dispatch_continues_after_failure() {
        let mut mock = MockObjectStore::new();
        mock.expect_create_bucket()
            .times(1)
            .returning(|_, _| Err(Error::Service("BucketAlreadyExists".into())));
        mock.expect_delete_bucket()
            .times(1)
            .returning(|_| Ok(()));

        let code = run(cli(&["--bn", "demo-1", "--cb", "--db"]), &mock).await;
        assert_eq!(code, 1);
    }

    #[tokio::test]
    async fn test_unknown_policy_kind_makes_no_service_call() {
        // Zero expectations: any store call panics the mock
        let mock = MockObjectStore::new();

        let code = run(cli(&["--bn", "demo-1", "--sbp", "unknown_kind"]), &mock).await;
        assert_eq!(code, 1);
    }

    #[tokio::test]
    async fn test_public_read_policy_document_reaches_store() {
        let mut mock = MockObjectStore::new();
        mock.expect_set_bucket_policy()
            .withf(|bucket, doc| {
                bucket == "demo-1"
                    && doc.statement[0].action == vec!["s3:GetObject"]
                    && doc.statement[0].resource == vec!["arn:aws:s3:::demo-1/*"]
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let code = run(
            cli(&["--bn", "demo-1", "--sbp", "public_read_policy"]),
            &mock,
        )
        .await;
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_lifecycle_uses_canned_rule() {
        let mut mock = MockObjectStore::new();
        mock.expect_set_lifecycle_rules()
            .withf(|bucket, rules| {
                bucket == "demo-1"
                    && rules.len() == 1
                    && rules[0].id == "DeleteAfter120Days"
                    && rules[0].expire_days == 120
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let code = run(cli(&["--bn", "demo-1", "--slp"]), &mock).await;
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_small_upload_key_is_basename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let mut mock = MockObjectStore::new();
        mock.expect_put_file()
            .withf(|bucket, key, _| bucket == "demo-1" && key == "notes.txt")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let code = run(
            cli(&["--bn", "demo-1", "--usf", path.to_str().unwrap()]),
            &mock,
        )
        .await;
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_large_upload_passes_transfer_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, vec![0u8; 1024]).unwrap();

        let mut mock = MockObjectStore::new();
        mock.expect_put_file_multipart()
            .withf(|bucket, key, _, config| {
                bucket == "demo-1" && key == "blob.bin" && config.part_size == 512
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let code = run(
            cli(&[
                "--bn",
                "demo-1",
                "--ulf",
                path.to_str().unwrap(),
                "--part-size",
                "512",
            ]),
            &mock,
        )
        .await;
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_get_objects_lists_keys() {
        let mut mock = MockObjectStore::new();
        mock.expect_list_objects()
            .times(1)
            .returning(|_| Ok(vec!["notes.txt".to_string()]));

        let code = run(cli(&["--bn", "demo-1", "--go"]), &mock).await;
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_versioning_status_reported() {
        let mut mock = MockObjectStore::new();
        mock.expect_versioning_status()
            .times(1)
            .returning(|_| Ok("Not Enabled".to_string()));

        let code = run(cli(&["--bn", "demo-1", "--bv"]), &mock).await;
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_list_versions_empty_is_not_a_failure() {
        let mut mock = MockObjectStore::new();
        mock.expect_list_object_versions()
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let code = run(cli(&["--bn", "demo-1", "--lfv", "notes.txt"]), &mock).await;
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_list_versions_prints_entries() {
        let mut mock = MockObjectStore::new();
        mock.expect_list_object_versions()
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    ObjectVersion::new("v2", jiff::Timestamp::from_second(200).ok()),
                    ObjectVersion::new("v1", jiff::Timestamp::from_second(100).ok()),
                ])
            });

        let code = run(cli(&["--bn", "demo-1", "--lfv", "notes.txt"]), &mock).await;
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_restore_without_previous_version_fails() {
        let mut mock = MockObjectStore::new();
        mock.expect_restore_previous_version()
            .times(1)
            .returning(|_, _| Ok(false));

        let code = run(cli(&["--bn", "demo-1", "--rpv", "notes.txt"]), &mock).await;
        assert_eq!(code, 1);
    }

    #[tokio::test]
    async fn test_bad_transfer_url_makes_no_service_call() {
        // Trailing-slash URL has no key segment; nothing reaches the store
        let mock = MockObjectStore::new();

        let code = run(
            cli(&["--bn", "demo-1", "--dlu", "https://example.com/"]),
            &mock,
        )
        .await;
        assert_eq!(code, 1);
    }

    #[test]
    fn test_object_key_strips_directories() {
        let key = object_key(Path::new("/tmp/uploads/notes.txt")).unwrap();
        assert_eq!(key, "notes.txt");

        let key = object_key(Path::new("notes.txt")).unwrap();
        assert_eq!(key, "notes.txt");
    }

    #[test]
    fn test_object_key_rejects_bare_directories() {
        assert!(object_key(Path::new("/")).is_err());
        assert!(object_key(Path::new("..")).is_err());
    }
}
