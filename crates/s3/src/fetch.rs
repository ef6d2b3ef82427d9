//! Download-and-reupload transfer
//!
//! Fetches a remote resource over HTTP into a local temporary file, then
//! uploads it under the URL's trailing path segment as key. The temporary
//! file is owned by a `NamedTempFile` and removed on drop, on the failure
//! path as much as the success path.

use std::io::Write;

use sb_core::{Error, ObjectStore, Result};

/// Derive the object key from the URL's trailing path segment
pub fn key_from_url(raw: &str) -> Result<String> {
    let parsed = url::Url::parse(raw)?;
    let key = parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or_default()
        .to_string();

    if key.is_empty() {
        return Err(Error::Usage(format!(
            "URL '{raw}' has no trailing path segment to use as an object key"
        )));
    }
    Ok(key)
}

/// Fetch `url` and upload the body to `bucket`, returning the object key
pub async fn download_and_upload(
    store: &impl ObjectStore,
    bucket: &str,
    url: &str,
) -> Result<String> {
    let key = key_from_url(url)?;

    let mut response = reqwest::get(url)
        .await
        .map_err(|e| Error::Transfer(e.to_string()))?;

    if !response.status().is_success() {
        return Err(Error::Transfer(format!(
            "GET {url} returned {}",
            response.status()
        )));
    }

    let mut temp = tempfile::NamedTempFile::new()?;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| Error::Transfer(e.to_string()))?
    {
        temp.write_all(&chunk)?;
    }
    temp.flush()?;

    store.put_file(bucket, &key, temp.path()).await?;
    Ok(key)
}
