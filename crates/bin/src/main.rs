//! comps CLI binary.
//!
//! Compare company EV/EBITDA multiples against industry reference multiples.

mod integration;

use chrono::Local;
use clap::{ArgAction, Parser, Subcommand};
use comps::matching::normalize_label;
use comps::screen::{
    DEFAULT_MAX_TICKERS, ScreenConfig, ScreenOutcome, ScreenPlan, ScreenRequest, Screener,
};
use comps::{CompanyUniverse, MarketCapBucket, Sector};
use comps_data::quote::{DEFAULT_BATCH_SIZE, DEFAULT_CONCURRENCY};
use comps_data::reference::DEFAULT_REFERENCE_URL;
use comps_data::{
    CachedQuoteProvider, ReferenceClient, ReferenceConfig, ReferenceTable, YahooQuoteProvider,
};
use comps_output::{DEFAULT_EXPORT_FILE, ExportFormat, Exporter, SortColumn, fmt_mult};
use integration::logging::init_tracing;
use integration::progress::{fetch_bar, spinner};
use integration::sources::{default_config_dir, load_universe, resolve_source};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "comps")]
#[command(about = "comps: company vs. industry EV/EBITDA screener", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Company universe CSV (headers: Company Name, Ticker, Sector)
    #[arg(long, env = "COMPS_UNIVERSE", global = true)]
    universe: Option<PathBuf>,

    /// Page holding the industry reference multiples
    #[arg(long, env = "COMPS_REFERENCE_URL", default_value = DEFAULT_REFERENCE_URL, global = true)]
    reference_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List industries and their reference multiples
    Industries {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Screen an industry and compare company multiples
    Screen {
        /// Industry label, as listed by `comps industries`
        #[arg(long, short)]
        industry: String,

        /// Market-cap bucket: all, small, mid, large, mega, ultra
        #[arg(long, default_value = "all")]
        cap: MarketCapBucket,

        /// Sort column: market-cap, multiple, name, ticker, sector
        #[arg(long, default_value = "market-cap")]
        sort: SortColumn,

        /// Sort ascending instead of descending (missing values stay last)
        #[arg(long)]
        ascending: bool,

        /// Export the table (defaults to company_multiples.csv)
        #[arg(long, short, num_args = 0..=1, default_missing_value = DEFAULT_EXPORT_FILE)]
        output: Option<PathBuf>,

        /// Export format: csv, json, pretty-json (guessed from the file name if omitted)
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Keep candidates whose quote lookup failed (only without a cap bucket)
        #[arg(long)]
        include_unfetched: bool,

        /// Upper bound on tickers fetched
        #[arg(long, env = "COMPS_MAX_TICKERS", default_value_t = DEFAULT_MAX_TICKERS)]
        max_tickers: usize,

        /// Concurrent quote lookups
        #[arg(long, env = "COMPS_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Tickers per sequential batch
        #[arg(long, env = "COMPS_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,
    },

    /// Show how an industry label is matched
    Keywords {
        /// Industry label
        label: String,
    },

    /// Show the company universe
    Universe {
        /// Filter by sector
        #[arg(long)]
        sector: Option<String>,

        /// List all sectors
        #[arg(long)]
        list_sectors: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let quiet = cli.verbose > 0;

    match cli.command {
        Commands::Industries { json } => {
            let table = fetch_reference(&cli.reference_url, quiet).await?;
            list_industries(&table, json)?;
        }
        Commands::Screen {
            industry,
            cap,
            sort,
            ascending,
            output,
            format,
            include_unfetched,
            max_tickers,
            concurrency,
            batch_size,
        } => {
            let universe = open_universe(cli.universe)?;
            let config = ScreenConfig {
                max_tickers,
                batch_size,
                concurrency,
                include_unfetched,
            };
            let table = fetch_reference(&cli.reference_url, quiet).await?;
            let request = ScreenRequest::new(industry, cap);
            let export = output.map(|path| {
                let format = format.unwrap_or_else(|| ExportFormat::from_path(&path));
                (path, format)
            });
            run_screen(universe, config, &table, &request, (sort, ascending), export, quiet)
                .await?;
        }
        Commands::Keywords { label } => {
            let universe = open_universe(cli.universe)?;
            show_keywords(&universe, &label);
        }
        Commands::Universe {
            sector,
            list_sectors,
        } => {
            if list_sectors {
                list_all_sectors();
            } else {
                let universe = open_universe(cli.universe)?;
                show_universe(&universe, sector.as_deref())?;
            }
        }
    }

    Ok(())
}

fn open_universe(
    explicit: Option<PathBuf>,
) -> Result<CompanyUniverse, Box<dyn std::error::Error>> {
    let source = resolve_source(explicit.as_deref(), default_config_dir().as_deref());
    Ok(load_universe(&source)?)
}

async fn fetch_reference(
    url: &str,
    quiet: bool,
) -> Result<ReferenceTable, Box<dyn std::error::Error>> {
    let client = ReferenceClient::with_config(ReferenceConfig {
        url: url.to_string(),
        ..ReferenceConfig::default()
    })?;

    let pb = spinner("Fetching industry multiples...", quiet);
    let table = client.table().await;
    pb.finish_and_clear();

    Ok(Arc::unwrap_or_clone(table?))
}

fn list_industries(table: &ReferenceTable, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(table.entries())?);
        return Ok(());
    }

    println!("Industry Reference Multiples (EV/EBITDA)");
    println!("========================================\n");
    for entry in table.entries() {
        println!("  {:45} {:>8}", entry.industry, fmt_mult(Some(entry.multiple)));
    }
    println!("\n{} industries", table.len());

    Ok(())
}

async fn run_screen(
    universe: CompanyUniverse,
    config: ScreenConfig,
    reference: &ReferenceTable,
    request: &ScreenRequest,
    (sort, ascending): (SortColumn, bool),
    export: Option<(PathBuf, ExportFormat)>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if reference.find(&request.industry).is_none() {
        return Err(unknown_industry(reference, &request.industry).into());
    }

    let quotes = CachedQuoteProvider::new(YahooQuoteProvider::new()?);
    let screener = Screener::new(universe, quotes, config);

    let planned = screener.plan(&request.industry).tickers.len();
    let pb = fetch_bar(planned, quiet);
    pb.set_message("Fetching quotes...");
    let outcome = screener
        .screen(reference, request, |outcome| {
            pb.inc(1);
            pb.set_message(outcome.symbol.clone());
        })
        .await?;
    pb.finish_and_clear();

    if let ScreenOutcome::AllFetchesFailed { report, .. } = &outcome {
        let reason = report
            .failures()
            .find_map(|o| o.failure())
            .map(|f| format!(": {}", f.message))
            .unwrap_or_default();
        return Err(format!("{}{reason}", outcome.summary()).into());
    }
    let mut result = match outcome {
        ScreenOutcome::Matched(result) => result,
        other => {
            println!("{}", other.summary());
            return Ok(());
        }
    };

    if sort != SortColumn::MarketCap || ascending {
        result.table.sort_by(sort, !ascending);
    }
    print!("{}", result.table.to_ascii_table());
    println!("Bucket: {}", request.bucket);
    println!(
        "Quotes as of {} ({} of {} fetched)",
        Local::now().format("%Y-%m-%d %H:%M"),
        result.report.fetched_count(),
        result.report.len()
    );

    if let Some((path, format)) = export {
        result.table.export_to_file(&path, format)?;
        println!("Exported {} rows to {}", result.table.len(), path.display());
    }

    Ok(())
}

/// Error message for a label missing from the reference table, with
/// suggestions sharing a word with it.
fn unknown_industry(reference: &ReferenceTable, label: &str) -> String {
    let wanted = normalize_label(label);
    let words: Vec<&str> = wanted.split_whitespace().filter(|w| w.len() > 2).collect();
    let suggestions: Vec<&str> = reference
        .labels()
        .into_iter()
        .filter(|candidate| {
            let candidate = normalize_label(candidate);
            words.iter().any(|w| candidate.contains(w))
        })
        .take(5)
        .collect();

    if suggestions.is_empty() {
        format!("Unknown industry '{label}' (see `comps industries`)")
    } else {
        format!(
            "Unknown industry '{label}'. Did you mean: {}?",
            suggestions.join(", ")
        )
    }
}

fn show_keywords(universe: &CompanyUniverse, label: &str) {
    let plan = ScreenPlan::new(universe, label, DEFAULT_MAX_TICKERS);

    println!("Label:    {label}");
    println!("Tokens:   {}", plan.tokens.join(", "));
    if plan.sectors.is_empty() {
        println!("Sectors:  (none inferred, whole universe)");
    } else {
        let sectors: Vec<&str> = plan.sectors.iter().map(Sector::name).collect();
        println!("Sectors:  {}", sectors.join(", "));
    }
    println!(
        "Keywords: {} ({})",
        plan.keywords.needles().join(", "),
        plan.keywords.source()
    );
    println!(
        "Candidates: {} of {} companies, {} tickers to fetch",
        plan.candidates,
        universe.len(),
        plan.tickers.len()
    );
}

fn show_universe(
    universe: &CompanyUniverse,
    sector_filter: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Company Universe");
    println!("================\n");

    if let Some(sector_name) = sector_filter {
        let sector: Sector = sector_name.parse()?;
        let companies = universe.companies_in_sector(sector);

        println!("Sector: {sector}");
        println!("Companies: {}\n", companies.len());

        for company in companies {
            println!("  {:8} {}", company.ticker, company.name);
        }
    } else {
        println!("Total companies: {}\n", universe.len());
        println!("Breakdown by sector:");

        for sector in Sector::all() {
            let count = universe.companies_in_sector(sector).len();
            println!("  {:30} {:4} companies", sector.name(), count);
        }

        let unclassified = universe
            .companies()
            .iter()
            .filter(|c| c.sector.is_none())
            .count();
        if unclassified > 0 {
            println!("  {:30} {:4} companies", "(unrecognized label)", unclassified);
        }
    }

    Ok(())
}

fn list_all_sectors() {
    println!("GICS Sectors:");
    println!("=============\n");

    for sector in Sector::all() {
        println!("{:2} - {}", sector.code(), sector.name());
    }
}
