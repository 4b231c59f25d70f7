//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use congreso_shared::{
    AppConfig, CongresoError, ExtractOptions, init_config, init_config_at, load_config,
    load_config_from,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Normalize initiative listings and detail pages.
#[derive(Parser)]
#[command(
    name = "congreso",
    version,
    about = "Normalize Congreso de los Diputados initiative listings and detail pages into JSON.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.congreso/congreso.toml.
    #[arg(long, global = true, env = "CONGRESO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Write output to this file instead of stdout.
    #[arg(short, long, global = true)]
    pub out: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Normalize listing API responses. Each file is an independent batch.
    Listing {
        /// JSON listing payloads.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Extract and prune initiative detail pages.
    Detail {
        /// HTML detail pages.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Term stamped on every extracted record.
        #[arg(long)]
        term: Option<u32>,

        /// Initiative id stamped on every extracted record.
        #[arg(long)]
        id: Option<String>,
    },

    /// Parse the term catalogue of a saved listing page.
    Terms {
        /// HTML listing page.
        file: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "congreso=info",
        1 => "congreso=debug,congreso_listing=debug,congreso_detail=debug",
        _ => "congreso=trace,congreso_listing=trace,congreso_detail=trace,congreso_shared=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Output settings shared by every command.
struct Output {
    pretty: bool,
    path: Option<PathBuf>,
}

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let output = Output {
        pretty: cli.pretty,
        path: cli.out,
    };
    let config_path = cli.config;

    match cli.command {
        Command::Listing { files } => {
            let opts = extract_options(config_path.as_deref())?;
            cmd_listing(files, opts, &output).await
        }
        Command::Detail { files, term, id } => {
            let opts = extract_options(config_path.as_deref())?;
            cmd_detail(files, opts, term, id, &output).await
        }
        Command::Terms { file } => cmd_terms(&file, &output),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(config_path.as_deref()),
            ConfigAction::Show => cmd_config_show(config_path.as_deref()),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

fn extract_options(path: Option<&Path>) -> Result<ExtractOptions> {
    let config = resolve_config(path)?;
    Ok(ExtractOptions::try_from(&config)?)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_listing(files: Vec<PathBuf>, opts: ExtractOptions, output: &Output) -> Result<()> {
    info!(files = files.len(), "normalizing listing payloads");

    let opts = Arc::new(opts);
    let pages = process_files(files, move |content| {
        let payload: serde_json::Value = serde_json::from_str(content)?;
        congreso_listing::normalize_listing_page(&payload, &opts)
    })
    .await?;

    emit(&pages, output)
}

async fn cmd_detail(
    files: Vec<PathBuf>,
    opts: ExtractOptions,
    term: Option<u32>,
    id: Option<String>,
    output: &Output,
) -> Result<()> {
    info!(files = files.len(), ?term, ?id, "extracting detail pages");

    let opts = Arc::new(opts);
    let records = process_files(files, move |content| {
        let mut record = congreso_detail::extract_detail(content, &opts)?;
        record.term = term;
        record.initiative_id = id.clone();
        congreso_detail::prune_record(&record)
    })
    .await?;

    emit(&records, output)
}

fn cmd_terms(file: &Path, output: &Output) -> Result<()> {
    let html = std::fs::read_to_string(file)
        .wrap_err_with(|| format!("failed to read {}", file.display()))?;
    let terms = congreso_listing::parse_terms(&html);
    info!(terms = terms.len(), "term catalogue parsed");
    write_json(&terms, output)
}

fn cmd_config_init(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(p) => init_config_at(p)?,
        None => init_config()?,
    };
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Concurrent file processing
// ---------------------------------------------------------------------------

/// Run `normalize` over every file on the blocking pool and return results
/// in input order. Every file is its own unit of work; the first failure
/// aborts the command.
async fn process_files<T, F>(files: Vec<PathBuf>, normalize: F) -> Result<Vec<T>>
where
    T: Send + 'static,
    F: Fn(&str) -> congreso_shared::Result<T> + Send + Sync + 'static,
{
    let total = files.len();
    let progress = progress_bar(total);
    let normalize = Arc::new(normalize);

    let mut tasks = JoinSet::new();
    for (index, path) in files.into_iter().enumerate() {
        let normalize = Arc::clone(&normalize);
        tasks.spawn_blocking(move || {
            let result = std::fs::read_to_string(&path)
                .map_err(|e| CongresoError::io(&path, e))
                .and_then(|content| normalize(&content));
            (index, path, result)
        });
    }

    let mut results: Vec<Option<T>> = (0..total).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, path, result) = joined.wrap_err("normalization task panicked")?;
        let value = result.wrap_err_with(|| format!("failed to normalize {}", path.display()))?;
        results[index] = Some(value);
        progress.inc(1);
    }
    progress.finish_and_clear();

    results
        .into_iter()
        .map(|r| r.ok_or_else(|| eyre!("normalization task produced no result")))
        .collect()
}

fn progress_bar(total: usize) -> ProgressBar {
    if total < 2 {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:30.cyan} {pos}/{len} files") {
        bar.set_style(style);
    }
    bar
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Emit one value per input file: a bare object for a single file, an array otherwise.
fn emit<T: Serialize>(values: &[T], output: &Output) -> Result<()> {
    match values {
        [single] => write_json(single, output),
        many => write_json(&many, output),
    }
}

fn write_json<T: Serialize + ?Sized>(value: &T, output: &Output) -> Result<()> {
    let mut text = if output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');

    match &output.path {
        Some(path) => std::fs::write(path, text)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?,
        None => print!("{text}"),
    }
    Ok(())
}
