//! # Weistum-Katalog CLI (`wk`)
//!
//! Search, filter and export a catalog of Weistümer.
//!
//! ## Usage
//!
//! ```bash
//! wk --config ./config/wk.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `wk search [PATTERN]` | List matching records |
//! | `wk get <id>` | Show one record with its full text |
//! | `wk facets` | List type, region and time-category values |
//! | `wk classify <zeit>...` | Print the time category of raw date strings |
//! | `wk export [PATTERN]` | Write the matching records as CSV |
//! | `wk map [PATTERN]` | Write map markers as GeoJSON |
//! | `wk page [PATTERN]` | Write a static HTML page with list and map |
//!
//! ## Examples
//!
//! ```bash
//! # Regex search, case-insensitive, over all fields
//! wk search "zehnt(en)?" --region Mosel
//!
//! # Everything from the late 15th century, as CSV on stdout
//! wk export --zeit "Ende 15. Jh." --output -
//!
//! # Read the dataset from stdin
//! cat data.json | wk --data - facets
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use weistum_core::catalog::Catalog;
use weistum_core::query::{Filters, Matcher, Query, SearchMode};
use weistum_katalog::config::{self, Config};
use weistum_katalog::get::GetFormat;
use weistum_katalog::output::Output;
use weistum_katalog::page::{PageOptions, DEFAULT_PAGE_FILE, PAGE_TITLE};
use weistum_katalog::search::{select_entries, ListOptions};
use weistum_katalog::{classify, dataset, export, facets, get, logging, map, page, search};

/// Weistum-Katalog: search and export historical customary-law records.
///
/// The configuration file is optional. Without `--config`, `./config/wk.toml`
/// is used if it exists, otherwise built-in defaults apply.
#[derive(Parser)]
#[command(
    name = "wk",
    about = "Weistum-Katalog: search, filter and export a catalog of Weistümer",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Dataset path, overriding `[dataset].path`. `-` reads stdin.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// More log output on stderr (`-v` info, `-vv` debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Pattern and filters shared by the view-producing commands.
#[derive(Args, Debug, Clone, Default)]
struct QueryArgs {
    /// Regular expression matched case-insensitively against every field.
    /// Omit to select everything.
    pattern: Option<String>,

    /// Only records of this type.
    #[arg(long)]
    typ: Option<String>,

    /// Only records from this region.
    #[arg(long)]
    region: Option<String>,

    /// Only records in this time category, e.g. "Ende 15. Jh.".
    #[arg(long)]
    zeit: Option<String>,

    /// Treat the pattern as plain text instead of a regular expression.
    #[arg(long)]
    literal: bool,
}

impl QueryArgs {
    fn to_query(&self) -> Query {
        Query {
            pattern: self.pattern.clone().unwrap_or_default(),
            mode: if self.literal {
                SearchMode::Literal
            } else {
                SearchMode::Regex
            },
            filters: Filters {
                typ: self.typ.clone(),
                region: self.region.clone(),
                zeit_kategorie: self.zeit.clone(),
            },
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List records matching a pattern and filters.
    Search {
        #[command(flatten)]
        query: QueryArgs,

        /// Print the full text instead of a preview.
        #[arg(long)]
        full: bool,

        /// Print the matching records as JSON.
        #[arg(long)]
        json: bool,

        /// Maximum number of records to print.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show a single record by id.
    Get {
        /// Record id.
        id: String,

        /// Print the text rendered as HTML.
        #[arg(long, conflicts_with = "json")]
        html: bool,

        /// Print the record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the values of the type, region and time-category facets.
    Facets {
        /// Print the facets as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the time category of raw date strings.
    ///
    /// Does not read the dataset.
    Classify {
        /// Raw `zeit` values, e.g. `1475` or `"Mitte 16. Jh."`.
        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// Export the matching records as CSV.
    Export {
        #[command(flatten)]
        query: QueryArgs,

        /// Output file, `-` for stdout. Defaults to `[export].filename`.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Write map markers for the matching records as GeoJSON.
    Map {
        #[command(flatten)]
        query: QueryArgs,

        /// Output file. Defaults to stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Write a static HTML page with list view and map.
    Page {
        #[command(flatten)]
        query: QueryArgs,

        /// Output file, `-` for stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    let cfg = config::load_or_default(cli.config.as_deref())?;
    let data = cli.data.as_deref();

    match cli.command {
        Commands::Classify { inputs } => {
            classify::run_classify(&inputs, &cfg.zeit_bounds());
        }
        Commands::Search {
            query,
            full,
            json,
            limit,
        } => {
            let catalog = open_catalog(data, &cfg).await?;
            search::run_search(
                &catalog,
                &cfg,
                &query.to_query(),
                ListOptions { full, json, limit },
            )?;
        }
        Commands::Get { id, html, json } => {
            let catalog = open_catalog(data, &cfg).await?;
            let format = if json {
                GetFormat::Json
            } else if html {
                GetFormat::Html
            } else {
                GetFormat::Text
            };
            get::run_get(&catalog, &id, format)?;
        }
        Commands::Facets { json } => {
            let catalog = open_catalog(data, &cfg).await?;
            facets::run_facets(&catalog, json)?;
        }
        Commands::Export { query, output } => {
            let catalog = open_catalog(data, &cfg).await?;
            let entries = select_entries(&catalog, &query.to_query(), &cfg);
            let output = Output::resolve(output.as_deref(), &cfg.export.filename);
            export::run_export(&entries, &output)?;
        }
        Commands::Map { query, output } => {
            let catalog = open_catalog(data, &cfg).await?;
            let entries = select_entries(&catalog, &query.to_query(), &cfg);
            let output = Output::resolve(output.as_deref(), Path::new("-"));
            map::run_map(&entries, &output)?;
        }
        Commands::Page { query, output } => {
            let catalog = open_catalog(data, &cfg).await?;
            let query = query.to_query();
            let entries = select_entries(&catalog, &query, &cfg);
            let matcher = Matcher::compile(&query.pattern, query.mode, &cfg.query_limits()).ok();
            let opts = PageOptions {
                title: PAGE_TITLE,
                preview_words: cfg.display.preview_words,
                map_view: cfg.map_view(),
                highlight: matcher.as_ref(),
            };
            let output = Output::resolve(output.as_deref(), Path::new(DEFAULT_PAGE_FILE));
            page::run_page(&entries, &opts, &output)?;
        }
    }

    Ok(())
}

/// Load the dataset named by `--data`, or `[dataset].path` from the config.
async fn open_catalog(data: Option<&Path>, cfg: &Config) -> Result<Catalog> {
    let path = data.unwrap_or(&cfg.dataset.path);
    let source = dataset::source_for(path);
    dataset::load_catalog(source.as_ref(), cfg.zeit_bounds()).await
}
