use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::{debug, warn};

use jsonfilter::config::Config;
use jsonfilter::{pipeline, CancellationToken, ErrorKind, FilterError};

/// Exit code for any failure other than cancellation (-1 as a byte).
const EXIT_UNKNOWN_ERROR: u8 = 255;
/// Exit code when the run was cancelled (-2 as a byte).
const EXIT_CANCELLED: u8 = 254;

/// jsonfilter - keep only the parts of a JSON document matched by path selectors
#[derive(Parser)]
#[command(name = "jsonfilter")]
#[command(version)]
#[command(
    about = "Reads JSON from stdin and writes only the elements matching the given selectors",
    long_about = None
)]
struct Cli {
    /// The JSON path field selector. Elements matching the selector will be included in the output.
    #[arg(short = 's', long = "selector", value_name = "SELECTOR")]
    selectors: Vec<String>,

    /// Read the document from this file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write the result to this file instead of stdout (gzip-compressed if it ends in .gz)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Configuration file (default: ~/.config/jsonfilter/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, ignored) = match &cli.config {
        Some(path) => match Config::load_from(path) {
            Ok(config) => (config, None),
            Err(err) => {
                eprintln!("{}: {:#}", ErrorKind::InvalidArgument.as_str(), err);
                return ExitCode::from(EXIT_UNKNOWN_ERROR);
            }
        },
        None => match Config::load() {
            Ok(config) => (config, None),
            Err(err) => (Config::default(), Some(err)),
        },
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();
    if let Some(err) = ignored {
        warn!("ignoring config file: {:#}", err);
    }

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_cancelled() => {
            debug!("run cancelled");
            ExitCode::from(EXIT_CANCELLED)
        }
        Err(err) => {
            report_error(&err);
            ExitCode::from(EXIT_UNKNOWN_ERROR)
        }
    }
}

fn run(cli: &Cli, config: &Config) -> Result<(), FilterError> {
    let selectors = pipeline::resolve_selectors(&cli.selectors, config)?;
    pipeline::check_distinct_files(cli.input.as_deref(), cli.output.as_deref())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let token = CancellationToken::new();
    let result = runtime.block_on(async {
        let signal_token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("Operation cancellation requested.");
                signal_token.cancel();
            }
        });

        pipeline::run(
            cli.input.as_deref(),
            cli.output.as_deref(),
            &selectors,
            &token,
            config,
        )
        .await
    });

    // A blocked stdin read must not keep the process alive.
    runtime.shutdown_background();
    result
}

fn report_error(err: &FilterError) {
    eprintln!("{}: {}", err.kind().as_str(), err);
    for (key, value) in err.details() {
        eprintln!("{}: {}", key, value);
    }
}
