//! Multipart upload engine
//!
//! Splits a local file into fixed-size parts and uploads them with bounded
//! concurrency. The upload is committed only once every part has been
//! acknowledged; any part failure aborts the server-side upload. No resume
//! state is kept locally.

use std::path::Path;

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use futures::stream::{self, StreamExt, TryStreamExt};

use sb_core::{part_byte_range, part_count, Error, Result, TransferConfig};

use crate::client::service_err;

/// Upload a local file, taking the multipart path above the threshold
pub(crate) async fn upload(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    path: &Path,
    config: &TransferConfig,
) -> Result<()> {
    let size = tokio::fs::metadata(path).await?.len();

    if !config.is_multipart(size) {
        // Below the threshold a single put is sufficient
        let data = tokio::fs::read(path).await?;
        client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(service_err)?;
        return Ok(());
    }

    let upload_id = client
        .create_multipart_upload()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(service_err)?
        .upload_id()
        .ok_or_else(|| Error::Service("multipart response carried no upload id".into()))?
        .to_string();

    tracing::debug!(
        "multipart upload {upload_id}: {} parts of {} bytes",
        part_count(size, config.part_size),
        config.part_size
    );

    match upload_parts(client, bucket, key, path, &upload_id, size, config).await {
        Ok(parts) => {
            let completed = CompletedMultipartUpload::builder()
                .set_parts(Some(parts))
                .build();
            client
                .complete_multipart_upload()
                .bucket(bucket)
                .key(key)
                .upload_id(&upload_id)
                .multipart_upload(completed)
                .send()
                .await
                .map_err(service_err)?;
            Ok(())
        }
        Err(e) => {
            // Best-effort server-side cleanup; the part failure wins
            if let Err(abort_err) = client
                .abort_multipart_upload()
                .bucket(bucket)
                .key(key)
                .upload_id(&upload_id)
                .send()
                .await
            {
                tracing::warn!("failed to abort multipart upload {upload_id}: {abort_err}");
            }
            Err(e)
        }
    }
}

/// Upload all parts with up to `config.concurrency` in flight
async fn upload_parts(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    path: &Path,
    upload_id: &str,
    total_size: u64,
    config: &TransferConfig,
) -> Result<Vec<CompletedPart>> {
    let parts = part_count(total_size, config.part_size);

    let mut completed: Vec<CompletedPart> = stream::iter((1..=parts as i32).map(|part_number| {
        let (start, end) = part_byte_range(part_number, config.part_size, total_size);
        async move {
            let chunk = read_range(path, start, end).await?;
            let response = client
                .upload_part()
                .bucket(bucket)
                .key(key)
                .upload_id(upload_id)
                .part_number(part_number)
                .body(ByteStream::from(chunk))
                .send()
                .await
                .map_err(service_err)?;

            Ok::<CompletedPart, Error>(
                CompletedPart::builder()
                    .set_e_tag(response.e_tag)
                    .part_number(part_number)
                    .build(),
            )
        }
    }))
    .buffer_unordered(config.concurrency)
    .try_collect()
    .await?;

    // Completion requires ascending part numbers; in-flight order is not
    completed.sort_by_key(|p| p.part_number());
    Ok(completed)
}

/// Read the byte range `[start, end)` of a file
async fn read_range(path: &Path, start: u64, end: u64) -> Result<Vec<u8>> {
    use tokio::io::{AsyncReadExt, AsyncSeekExt};

    let mut file = tokio::fs::File::open(path).await?;
    file.seek(std::io::SeekFrom::Start(start)).await?;

    let mut buf = vec![0u8; (end - start) as usize];
    file.read_exact(&mut buf).await?;
    Ok(buf)
}
