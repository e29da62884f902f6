//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::io::AsyncReadExt;
use tracing::info;

use internparse_extract::{FieldKind, extract_field, standardize_record_dates};
use internparse_matcher::MajorMatcher;
use internparse_shared::{
    AppConfig, BatchConfig, MatcherConfig, init_config, load_config, load_config_from,
};

use crate::batch;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// internparse: normalize scraped internship postings.
#[derive(Parser)]
#[command(
    name = "internparse",
    version,
    about = "Resolve major selections and extract structured fields from internship postings.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.internparse/internparse.toml.
    #[arg(long, global = true, env = "INTERNPARSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Taxonomy TOML replacing the built-in tables.
    #[arg(long, global = true)]
    pub taxonomy: Option<PathBuf>,

    /// Largest edit distance the fuzzy major match accepts.
    #[arg(long, global = true)]
    pub fuzzy_max_distance: Option<usize>,

    /// Print compact JSON.
    #[arg(long, global = true)]
    pub compact: bool,

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
    /// Resolve a free-text major selection to canonical majors.
    Major {
        /// Selection text (read from stdin when omitted).
        text: Option<String>,
    },

    /// Run one field parser over a file or stdin.
    Extract {
        /// Parser to run: major, qualifications, internship, interview,
        /// grades, currency, deadline, hours, days, status.
        #[arg(short, long)]
        kind: FieldKind,

        /// Input file (stdin when omitted or "-").
        file: Option<PathBuf>,
    },

    /// Rewrite dotted dates in a JSON object's string values, in key order.
    Dates {
        /// JSON file (stdin when omitted or "-").
        file: Option<PathBuf>,
    },

    /// Process a JSON Lines file of `{id, kind, text}` records.
    Batch {
        /// JSON Lines file (stdin when omitted or "-").
        file: Option<PathBuf>,

        /// Records processed concurrently.
        #[arg(short = 'j', long)]
        concurrency: Option<usize>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

impl Command {
    fn is_config_init(&self) -> bool {
        matches!(
            self,
            Self::Config {
                action: ConfigAction::Init
            }
        )
    }
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
        0 => "internparse=info",
        1 => "internparse=debug",
        _ => "internparse=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

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
// Resolved settings
// ---------------------------------------------------------------------------

/// Config file values with CLI overrides applied.
struct Settings {
    app: AppConfig,
    matcher: MatcherConfig,
    pretty: bool,
}

impl Settings {
    fn resolve(cli: &Cli) -> Result<Self> {
        let app = match &cli.config {
            Some(path) => load_config_from(path)?,
            None => load_config()?,
        };

        let mut matcher = MatcherConfig::from(&app);
        if let Some(distance) = cli.fuzzy_max_distance {
            matcher.fuzzy_max_distance = distance;
        }
        if let Some(path) = &cli.taxonomy {
            matcher.taxonomy_path = Some(path.clone());
        }

        let pretty = app.output.pretty && !cli.compact;
        Ok(Self {
            app,
            matcher,
            pretty,
        })
    }

    fn matcher(&self) -> Result<MajorMatcher> {
        Ok(MajorMatcher::from_config(&self.matcher)?)
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    // A broken config file must not block writing a fresh one.
    if cli.command.is_config_init() {
        return cmd_config_init().await;
    }

    let settings = Settings::resolve(&cli)?;

    match cli.command {
        Command::Major { text } => cmd_major(&settings, text).await,
        Command::Extract { kind, file } => cmd_extract(&settings, kind, file.as_deref()).await,
        Command::Dates { file } => cmd_dates(&settings, file.as_deref()).await,
        Command::Batch { file, concurrency } => {
            cmd_batch(&settings, file.as_deref(), concurrency).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(&settings).await,
        },
    }
}

async fn cmd_major(settings: &Settings, text: Option<String>) -> Result<()> {
    let text = match text {
        Some(text) => text,
        None => read_input(None).await?,
    };

    let resolution = settings.matcher()?.resolve_selection(text.trim());
    info!(
        majors = resolution.majors.len(),
        unmapped = resolution.unmapped.len(),
        "selection resolved"
    );
    print_json(&resolution, settings.pretty)
}

async fn cmd_extract(settings: &Settings, kind: FieldKind, file: Option<&Path>) -> Result<()> {
    let input = read_input(file).await?;
    let text = input.trim_end_matches(['\r', '\n']);

    let value = extract_field(kind, text, &settings.matcher()?)
        .wrap_err_with(|| format!("{kind} extraction failed"))?;
    print_json(&value, settings.pretty)
}

async fn cmd_dates(settings: &Settings, file: Option<&Path>) -> Result<()> {
    let input = read_input(file).await?;
    let mut record: Map<String, Value> =
        serde_json::from_str(&input).wrap_err("expected a JSON object")?;

    standardize_record_dates(&mut record);
    print_json(&record, settings.pretty)
}

async fn cmd_batch(settings: &Settings, file: Option<&Path>, concurrency: Option<usize>) -> Result<()> {
    let mut config = BatchConfig::from(&settings.app);
    if let Some(n) = concurrency {
        config.concurrency = n.max(1);
    }
    config.pretty = settings.pretty;

    let input = read_input(file).await?;
    let matcher = settings.matcher()?;
    let outputs = batch::run_batch(&input, &matcher, &config).await;

    for output in &outputs {
        print_json(output, config.pretty)?;
    }

    let summary = batch::Summary::of(&outputs);
    info!(
        records = outputs.len(),
        ok = summary.ok,
        skipped = summary.skipped,
        failed = summary.failed,
        "batch finished"
    );
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(settings: &Settings) -> Result<()> {
    let toml_str = toml::to_string_pretty(&settings.app)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// I/O helpers
// ---------------------------------------------------------------------------

/// Read a whole file, or stdin for `None` and `-`.
async fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => tokio::fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .map_err(|e| eyre!("failed to read stdin: {e}"))?;
            Ok(buf)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
