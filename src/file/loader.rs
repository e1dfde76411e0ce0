//! Reading the input document.
//!
//! The whole input is read into memory before parsing. The read can be
//! abandoned through a [`CancellationToken`]; gzip-compressed input is
//! recognised by its magic bytes and decompressed transparently.

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use log::debug;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::cancel::CancellationToken;
use crate::error::FilterError;

/// The first two bytes of every gzip stream.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Opens the input source: the file at `path`, or stdin when `path` is `None`.
pub async fn open_input(path: Option<&Path>) -> Result<Box<dyn AsyncRead + Unpin + Send>, FilterError> {
    match path {
        Some(path) => {
            debug!("reading input from {}", path.display());
            let file = tokio::fs::File::open(path).await?;
            Ok(Box::new(file))
        }
        None => {
            debug!("reading input from stdin");
            Ok(Box::new(tokio::io::stdin()))
        }
    }
}

/// Reads `reader` to end-of-stream and decodes it as text.
///
/// Fails with [`FilterError::Cancelled`] if `token` is cancelled before or
/// during the read.
pub async fn read_input<R: AsyncRead + Unpin>(
    reader: &mut R,
    token: &CancellationToken,
    decompress_gzip: bool,
) -> Result<String, FilterError> {
    token.check()?;

    let mut buffer = Vec::new();
    tokio::select! {
        result = reader.read_to_end(&mut buffer) => {
            result?;
        }
        _ = token.cancelled() => return Err(FilterError::Cancelled),
    }
    debug!("read {} bytes of input", buffer.len());

    decode_input(buffer, decompress_gzip)
}

/// Turns raw input bytes into text: gunzips when enabled and the gzip magic
/// is present, checks UTF-8, and drops a leading byte-order mark.
pub fn decode_input(bytes: Vec<u8>, decompress_gzip: bool) -> Result<String, FilterError> {
    let bytes = if decompress_gzip && bytes.starts_with(&GZIP_MAGIC) {
        let mut decoder = GzDecoder::new(bytes.as_slice());
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed)?;
        debug!(
            "decompressed gzip input: {} -> {} bytes",
            bytes.len(),
            decompressed.len()
        );
        decompressed
    } else {
        bytes
    };

    let mut text = String::from_utf8(bytes).map_err(FilterError::InvalidEncoding)?;
    if text.starts_with('\u{feff}') {
        text.replace_range(..'\u{feff}'.len_utf8(), "");
    }
    Ok(text)
}
