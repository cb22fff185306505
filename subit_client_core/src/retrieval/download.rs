//! Streaming archive download

use super::archive::TempArchive;
use crate::error::{IoError, Result, RetrievalError};
use futures::StreamExt;
use log::{debug, trace};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// GET `url` and stream the body into the temporary archive
///
/// Returns the number of bytes written. Transport failures and non-success
/// statuses are errors; nothing is retried here.
pub async fn download_archive(
    http: &reqwest::Client,
    url: &str,
    archive: &TempArchive,
) -> Result<u64> {
    debug!("Downloading {url} to {}", archive.path().display());

    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| RetrievalError::download(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(RetrievalError::http_status(url, status.as_u16()).into());
    }

    let io_error = |e: std::io::Error| IoError::from_std(e).with_path(archive.path());
    let mut file = File::create(archive.path()).await.map_err(io_error)?;

    let mut written = 0u64;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| RetrievalError::download(url, e))?;
        file.write_all(&chunk).await.map_err(io_error)?;
        written += chunk.len() as u64;
        trace!("Downloaded {written} bytes so far");
    }
    file.flush().await.map_err(io_error)?;

    debug!("Downloaded {written} bytes from {url}");
    Ok(written)
}
