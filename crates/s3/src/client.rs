//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from sb-core.

use std::path::Path;

use async_trait::async_trait;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLifecycleConfiguration, BucketLocationConstraint, CreateBucketConfiguration,
    ExpirationStatus, LifecycleExpiration, LifecycleRuleFilter, ObjectCannedAcl,
    ServerSideEncryption, ServerSideEncryptionByDefault, ServerSideEncryptionConfiguration,
    ServerSideEncryptionRule,
};

use sb_core::{
    previous_version, BucketInfo, BucketStatus, Error, LifecycleRule, ObjectStore, ObjectVersion,
    PolicyDocument, Result, TransferConfig,
};

use crate::multipart;

/// Map any SDK failure to the service-error variant
pub(crate) fn service_err(e: impl std::fmt::Display) -> Error {
    Error::Service(e.to_string())
}

/// S3 client bound to the ambient credential chain
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a client from the ambient credential chain.
    ///
    /// Credential resolution (environment, profile, instance metadata) is
    /// the SDK's. Fails with an auth error when the chain yields nothing;
    /// performs no storage call at construction time.
    pub async fn connect() -> Result<Self> {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;

        let provider = sdk_config
            .credentials_provider()
            .ok_or_else(|| Error::Auth("no credentials provider in the ambient chain".into()))?;
        provider
            .provide_credentials()
            .await
            .map_err(|e| Error::Auth(e.to_string()))?;

        // Path-style addressing for backends without virtual-host buckets
        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if std::env::var_os("S3B_FORCE_PATH_STYLE").is_some() {
            builder = builder.force_path_style(true);
        }

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(builder.build()),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        let response = self.inner.list_buckets().send().await.map_err(service_err)?;

        let buckets = response
            .buckets()
            .iter()
            .map(|b| {
                let mut info = BucketInfo::new(b.name().unwrap_or_default());
                if let Some(creation_date) = b.creation_date() {
                    info.created = jiff::Timestamp::from_second(creation_date.secs()).ok();
                }
                info
            })
            .collect();

        Ok(buckets)
    }

    async fn create_bucket(&self, bucket: &str, region: Option<&str>) -> Result<()> {
        let mut request = self.inner.create_bucket().bucket(bucket);

        // A region pins the bucket through a location constraint; without
        // one the service picks its default region.
        if let Some(region) = region {
            let config = CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region))
                .build();
            request = request.create_bucket_configuration(config);
        }

        request.send().await.map_err(service_err)?;
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<()> {
        self.inner
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(service_err)?;
        Ok(())
    }

    async fn bucket_status(&self, bucket: &str) -> BucketStatus {
        match self.inner.head_bucket().bucket(bucket).send().await {
            Ok(_) => BucketStatus::Exists,
            Err(e) => {
                if let Some(service) = e.as_service_error() {
                    if service.is_not_found() {
                        return BucketStatus::Absent;
                    }
                }
                tracing::debug!("bucket probe for {bucket} failed: {e}");
                BucketStatus::Unknown(e.to_string())
            }
        }
    }

    async fn set_bucket_encryption(&self, bucket: &str) -> Result<()> {
        let by_default = ServerSideEncryptionByDefault::builder()
            .sse_algorithm(ServerSideEncryption::Aes256)
            .build()
            .map_err(service_err)?;

        let config = ServerSideEncryptionConfiguration::builder()
            .rules(
                ServerSideEncryptionRule::builder()
                    .apply_server_side_encryption_by_default(by_default)
                    .build(),
            )
            .build()
            .map_err(service_err)?;

        self.inner
            .put_bucket_encryption()
            .bucket(bucket)
            .server_side_encryption_configuration(config)
            .send()
            .await
            .map_err(service_err)?;
        Ok(())
    }

    async fn read_bucket_policy(&self, bucket: &str) -> Result<String> {
        let response = self
            .inner
            .get_bucket_policy()
            .bucket(bucket)
            .send()
            .await
            .map_err(service_err)?;

        Ok(response.policy().unwrap_or_default().to_string())
    }

    async fn set_bucket_policy(&self, bucket: &str, policy: &PolicyDocument) -> Result<()> {
        self.inner
            .put_bucket_policy()
            .bucket(bucket)
            .policy(policy.to_json()?)
            .send()
            .await
            .map_err(service_err)?;
        Ok(())
    }

    async fn set_lifecycle_rules(&self, bucket: &str, rules: &[LifecycleRule]) -> Result<()> {
        let mut sdk_rules = Vec::with_capacity(rules.len());
        for rule in rules {
            let status = if rule.enabled {
                ExpirationStatus::Enabled
            } else {
                ExpirationStatus::Disabled
            };
            let sdk_rule = aws_sdk_s3::types::LifecycleRule::builder()
                .id(&rule.id)
                .filter(LifecycleRuleFilter::builder().prefix(&rule.prefix).build())
                .expiration(LifecycleExpiration::builder().days(rule.expire_days).build())
                .status(status)
                .build()
                .map_err(service_err)?;
            sdk_rules.push(sdk_rule);
        }

        let config = BucketLifecycleConfiguration::builder()
            .set_rules(Some(sdk_rules))
            .build()
            .map_err(service_err)?;

        // Full replace: the service drops any rules not in this set
        self.inner
            .put_bucket_lifecycle_configuration()
            .bucket(bucket)
            .lifecycle_configuration(config)
            .send()
            .await
            .map_err(service_err)?;
        Ok(())
    }

    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()> {
        let data = tokio::fs::read(path).await?;

        self.inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .acl(ObjectCannedAcl::PublicRead)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(service_err)?;
        Ok(())
    }

    async fn put_file_multipart(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        config: &TransferConfig,
    ) -> Result<()> {
        multipart::upload(&self.inner, bucket, key, path, config).await
    }

    async fn list_objects(&self, bucket: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut request = self.inner.list_objects_v2().bucket(bucket);
            if let Some(token) = &continuation_token {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(service_err)?;

            keys.extend(
                response
                    .contents()
                    .iter()
                    .filter_map(|o| o.key().map(|k| k.to_string())),
            );

            if response.is_truncated().unwrap_or(false) {
                continuation_token = response.next_continuation_token().map(|s| s.to_string());
            } else {
                break;
            }
        }

        Ok(keys)
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.inner
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(service_err)?;
        Ok(())
    }

    async fn set_object_public_read(&self, bucket: &str, key: &str) -> Result<()> {
        self.inner
            .put_object_acl()
            .bucket(bucket)
            .key(key)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(service_err)?;
        Ok(())
    }

    async fn versioning_status(&self, bucket: &str) -> Result<String> {
        let response = self
            .inner
            .get_bucket_versioning()
            .bucket(bucket)
            .send()
            .await
            .map_err(service_err)?;

        Ok(response
            .status()
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| "Not Enabled".to_string()))
    }

    async fn list_object_versions(&self, bucket: &str, key: &str) -> Result<Vec<ObjectVersion>> {
        let response = self
            .inner
            .list_object_versions()
            .bucket(bucket)
            .prefix(key)
            .send()
            .await
            .map_err(service_err)?;

        // The listing is prefix-based; keep exact key matches only so
        // "notes.txt.bak" versions never count toward "notes.txt".
        let versions = response
            .versions()
            .iter()
            .filter(|v| v.key() == Some(key))
            .map(|v| {
                let last_modified = v
                    .last_modified()
                    .and_then(|m| jiff::Timestamp::from_second(m.secs()).ok());
                ObjectVersion::new(v.version_id().unwrap_or_default(), last_modified)
            })
            .collect();

        Ok(versions)
    }

    async fn restore_previous_version(&self, bucket: &str, key: &str) -> Result<bool> {
        let versions = self.list_object_versions(bucket, key).await?;

        let Some(previous) = previous_version(&versions) else {
            return Ok(false);
        };

        // Copying the old version over the key creates a new current
        // version; nothing is deleted.
        let copy_source = format!("{bucket}/{key}?versionId={}", previous.version_id);
        self.inner
            .copy_object()
            .copy_source(copy_source)
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(service_err)?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_err_keeps_message() {
        let err = service_err("NoSuchBucket: demo-1 does not exist");
        assert_eq!(
            err.to_string(),
            "Service error: NoSuchBucket: demo-1 does not exist"
        );
    }
}
