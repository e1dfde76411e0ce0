//! The read → filter → write pass.

use std::path::Path;

use log::debug;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::cancel::CancellationToken;
use crate::config::Config;
use crate::error::FilterError;
use crate::file::loader::{open_input, read_input};
use crate::file::saver::{write_file_atomic, write_output};
use crate::filter::filter_json;

/// Reads one JSON document from `reader`, keeps only the parts matched by
/// `selectors`, and writes the result to `writer`.
///
/// Nothing is written when reading, parsing or selector evaluation fails.
/// The token is checked before the read and before the write, and either
/// can be interrupted by it.
pub async fn filter_stream<R, W, S>(
    reader: &mut R,
    writer: &mut W,
    selectors: &[S],
    token: &CancellationToken,
    config: &Config,
) -> Result<(), FilterError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    S: AsRef<str>,
{
    let text = read_input(reader, token, config.decompress_gzip).await?;
    let filtered = filter_json(&text, selectors)?;
    write_output(writer, &filtered, token).await
}

/// Picks the selectors for a run: those given on the command line, or the
/// configured ones when none were given. At least one is required.
pub fn resolve_selectors(
    requested: &[String],
    config: &Config,
) -> Result<Vec<String>, FilterError> {
    let selectors = if requested.is_empty() {
        config.selectors.clone()
    } else {
        requested.to_vec()
    };

    if selectors.is_empty() {
        return Err(FilterError::InvalidArgument(
            "at least one --selector is required".to_string(),
        ));
    }
    debug!("using selectors {:?}", selectors);
    Ok(selectors)
}

/// Rejects an output file that is the input file itself.
pub fn check_distinct_files(
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), FilterError> {
    let (Some(input), Some(output)) = (input, output) else {
        return Ok(());
    };
    let same = match (input.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if same {
        return Err(FilterError::InvalidArgument(format!(
            "input and output are the same file: {}",
            output.display()
        )));
    }
    Ok(())
}

/// Runs the pass between an optional input file (stdin otherwise) and an
/// optional output file (stdout otherwise).
///
/// An output file is only replaced once the filtered document is complete,
/// and may not be the input file.
pub async fn run<S: AsRef<str>>(
    input: Option<&Path>,
    output: Option<&Path>,
    selectors: &[S],
    token: &CancellationToken,
    config: &Config,
) -> Result<(), FilterError> {
    check_distinct_files(input, output)?;
    let mut reader = open_input(input).await?;

    match output {
        Some(path) => {
            let text = read_input(&mut reader, token, config.decompress_gzip).await?;
            let filtered = filter_json(&text, selectors)?;
            write_file_atomic(path, &filtered, token).await
        }
        None => {
            debug!("writing output to stdout");
            let mut stdout = tokio::io::stdout();
            filter_stream(&mut reader, &mut stdout, selectors, token, config).await
        }
    }
}
