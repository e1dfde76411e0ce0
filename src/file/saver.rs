//! Writing the filtered document.
//!
//! Output goes either to a caller-supplied async writer (stdout for the
//! binary) or to a file. Files are written atomically: the text goes to a
//! temporary sibling first and is renamed over the target only after the
//! write completed, so a failed or cancelled run never leaves a truncated
//! file behind. A target ending in `.gz` is gzip-compressed.

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::cancel::CancellationToken;
use crate::error::FilterError;

/// Writes all of `text` to `writer` and flushes it.
///
/// Fails with [`FilterError::Cancelled`] if `token` is cancelled before or
/// during the write.
pub async fn write_output<W: AsyncWrite + Unpin>(
    writer: &mut W,
    text: &str,
    token: &CancellationToken,
) -> Result<(), FilterError> {
    write_bytes(writer, text.as_bytes(), token).await?;
    debug!("wrote {} bytes of output", text.len());
    Ok(())
}

async fn write_bytes<W: AsyncWrite + Unpin>(
    writer: &mut W,
    data: &[u8],
    token: &CancellationToken,
) -> Result<(), FilterError> {
    token.check()?;

    tokio::select! {
        result = async {
            writer.write_all(data).await?;
            writer.flush().await
        } => result?,
        _ = token.cancelled() => return Err(FilterError::Cancelled),
    }
    Ok(())
}

/// Returns true if output written to `path` should be gzip-compressed.
pub fn should_compress(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn gzip(data: &[u8]) -> Result<Vec<u8>, FilterError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Writes `text` to the file at `path` atomically.
pub async fn write_file_atomic(
    path: &Path,
    text: &str,
    token: &CancellationToken,
) -> Result<(), FilterError> {
    token.check()?;

    let data = if should_compress(path) {
        gzip(text.as_bytes())?
    } else {
        text.as_bytes().to_vec()
    };

    let temp_path = temp_path_for(path);
    let result = async {
        let mut file = tokio::fs::File::create(&temp_path).await?;
        write_bytes(&mut file, &data, token).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&temp_path, path).await?;
        Ok::<(), FilterError>(())
    }
    .await;

    if let Err(err) = result {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(err);
    }
    debug!("wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}
