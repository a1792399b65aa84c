//! search-bridge - query an external desktop search engine from the shell
//!
//! Builds a caller option map the same way scripting hosts do (config
//! defaults, then a JSON options object, then individual flags), runs it
//! through the adapter and prints the response.

mod config;
mod output;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use search_bridge_core::fixture::FixtureBackend;
use search_bridge_core::options::{keys, merge_options};
use search_bridge_core::{SearchAdapter, SearchBackend, SearchOptions};
use serde_json::{Map, Value};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// search-bridge - desktop search engine adapter
#[derive(Parser)]
#[command(name = "search-bridge")]
#[command(author = "Misha")]
#[command(version)]
#[command(about = "Query an external desktop search engine", long_about = None)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for files
    Search(SearchArgs),

    /// Show the effective configuration
    Config,

    /// Write the default configuration file if it does not exist
    InitConfig,
}

#[derive(Args)]
struct SearchArgs {
    /// Search query in the engine's syntax
    query: String,

    /// Options object as JSON, e.g. '{"includeSize": true}'
    #[arg(short, long)]
    options: Option<String>,

    /// Skip this many results
    #[arg(long)]
    offset: Option<u32>,

    /// Maximum number of results (0 = no limit)
    #[arg(short, long)]
    limit: Option<u32>,

    #[arg(long)]
    match_case: bool,

    #[arg(long)]
    whole_word: bool,

    /// Match against full paths, not just names
    #[arg(long)]
    match_path: bool,

    /// Treat the query as a regular expression
    #[arg(long)]
    regex: bool,

    /// Include file sizes
    #[arg(long)]
    size: bool,

    /// Include creation dates
    #[arg(long)]
    created: bool,

    /// Include modification dates
    #[arg(long)]
    modified: bool,

    /// Include access dates
    #[arg(long)]
    accessed: bool,

    /// Include run counts
    #[arg(long)]
    run_count: bool,

    /// Sort axis
    #[arg(long, value_parser = ["name", "dir", "size", "dateCreated", "dateModified", "dateAccessed", "runCount"])]
    sort_by: Option<String>,

    /// Sort ascending
    #[arg(long, conflicts_with = "desc")]
    asc: bool,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Serve results from a JSON fixture instead of the native engine
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    init_logging(&config.logging.level, cli.verbose);

    match cli.command {
        Commands::Search(args) => search_files(&config, &args)?,

        Commands::Config => {
            println!("# {}", config.config_path.display());
            print!("{}", config.to_toml()?);
        }

        Commands::InitConfig => {
            if config.config_path.exists() {
                println!("Config already exists: {}", config.config_path.display());
            } else {
                config.save()?;
                println!("Wrote default config: {}", config.config_path.display());
            }
        }
    }

    Ok(())
}

/// RUST_LOG wins, then -v flags, then the configured level
fn init_logging(configured_level: &str, verbose: u8) {
    let directive = match verbose {
        0 => configured_level,
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn search_files(config: &Config, args: &SearchArgs) -> Result<()> {
    let options = build_options(config, args)?;
    debug!("Effective options: {:?}", options);

    match &args.fixture {
        Some(path) => {
            let backend = load_fixture(path)?;
            run_search(SearchAdapter::new(backend), &args.query, &options, args.format)
        }
        None => {
            let backend = search_bridge_native::native_backend();
            run_search(SearchAdapter::new(backend), &args.query, &options, args.format)
        }
    }
}

fn run_search<B: SearchBackend>(
    adapter: SearchAdapter<B>,
    query: &str,
    options: &SearchOptions,
    format: OutputFormat,
) -> Result<()> {
    info!("Searching with {}", adapter.status_description());

    let response = adapter
        .search(query, options)
        .with_context(|| format!("Search for {:?} failed", query))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Table => print!("{}", output::render_table(&response)),
    }

    Ok(())
}

/// Config defaults ← `--options` JSON ← individual flags
fn build_options(config: &Config, args: &SearchArgs) -> Result<SearchOptions> {
    let mut map = config.search.to_options_map();

    if let Some(json) = &args.options {
        let value: Value = serde_json::from_str(json).context("Failed to parse --options JSON")?;
        let Value::Object(overrides) = value else {
            bail!("--options must be a JSON object");
        };
        merge_options(&mut map, &overrides);
    }

    merge_options(&mut map, &flag_overrides(args));
    Ok(SearchOptions::from_map(&map))
}

fn flag_overrides(args: &SearchArgs) -> Map<String, Value> {
    let mut map = Map::new();

    if let Some(offset) = args.offset {
        map.insert(keys::OFFSET.into(), offset.into());
    }
    if let Some(limit) = args.limit {
        map.insert(keys::LIMIT.into(), limit.into());
    }

    let switches = [
        (args.match_case, keys::MATCH_CASE),
        (args.whole_word, keys::MATCH_WHOLE_WORD),
        (args.match_path, keys::MATCH_PATH),
        (args.regex, keys::ENABLE_REGEX),
        (args.size, keys::INCLUDE_SIZE),
        (args.created, keys::INCLUDE_DATE_CREATED),
        (args.modified, keys::INCLUDE_DATE_MODIFIED),
        (args.accessed, keys::INCLUDE_DATE_ACCESSED),
        (args.run_count, keys::INCLUDE_RUN_COUNT),
    ];
    for (enabled, key) in switches {
        if enabled {
            map.insert(key.into(), Value::Bool(true));
        }
    }

    if let Some(sort_by) = &args.sort_by {
        map.insert(keys::SORT_BY.into(), sort_by.as_str().into());
    }
    if args.asc {
        map.insert(keys::SORT_ASC.into(), Value::Bool(true));
    }
    if args.desc {
        map.insert(keys::SORT_ASC.into(), Value::Bool(false));
    }

    map
}

fn load_fixture(path: &Path) -> Result<FixtureBackend> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixture file: {:?}", path))?;
    FixtureBackend::from_json(&content)
        .with_context(|| format!("Failed to parse fixture file: {:?}", path))
}
