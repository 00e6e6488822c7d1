//! TsxView CLI — fetch, tickers, and pages commands.
//!
//! Commands:
//! - `fetch` — download adjusted closes for the ticker universe and write CSV artifacts
//! - `tickers` — print the normalized ticker universe and its source
//! - `pages` — read a wide artifact back, filter by price, and print page selections

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tsxview_core::artifacts::{self, DatasetPaths};
use tsxview_core::data::{
    download_prices, FetchReport, PriceProvider, StdoutProgress, SyntheticProvider, YahooProvider,
};
use tsxview_core::symbols;
use tsxview_core::view::{build_page_view, format_ticker_rows};
use tsxview_core::{PriceTable, TidyFrame, Universe, ViewerConfig};

#[derive(Parser)]
#[command(
    name = "tsxview",
    about = "TsxView CLI — TSX adjusted-close dataset viewer"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download adjusted closes for the ticker universe and write CSV artifacts.
    Fetch {
        /// Ticker list CSV. Defaults to tsx_tickers_extracted.csv when present.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Years of history to download. Defaults to the configured window.
        #[arg(long)]
        years: Option<u32>,

        /// Start date (YYYY-MM-DD). Mutually exclusive with --years.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Output directory for the CSV artifacts. Defaults to ./dataset.
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Use deterministic synthetic prices instead of the network.
        #[arg(long, default_value_t = false)]
        synthetic: bool,
    },
    /// Print the normalized ticker universe and its source.
    Tickers {
        /// Ticker list CSV. Defaults to tsx_tickers_extracted.csv when present.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Read a wide artifact back, filter by price, and print page selections.
    Pages {
        /// Wide CSV artifact. Defaults to <dataset_dir>/tsx_adj_close_wide.csv.
        #[arg(long)]
        wide: Option<PathBuf>,

        /// Drop tickers whose maximum adjusted close exceeds this price.
        #[arg(long)]
        max_price: Option<f64>,

        /// Ticker granted a slot on every page.
        #[arg(long)]
        keep: Option<String>,

        /// Tickers per page, including the pinned slot.
        #[arg(long)]
        page_size: Option<usize>,

        /// Page to print (1-based). Omit to print every page.
        #[arg(long)]
        page: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            csv,
            years,
            start,
            end,
            out_dir,
            synthetic,
        } => run_fetch(csv, years, start, end, out_dir, synthetic),
        Commands::Tickers { csv } => run_tickers(csv),
        Commands::Pages {
            wide,
            max_price,
            keep,
            page_size,
            page,
        } => run_pages(wide, max_price, keep, page_size, page),
    }
}

fn run_fetch(
    csv: Option<PathBuf>,
    years: Option<u32>,
    start: Option<String>,
    end: Option<String>,
    out_dir: Option<PathBuf>,
    synthetic: bool,
) -> Result<()> {
    if years.is_some() && start.is_some() {
        bail!("--years and --start are mutually exclusive");
    }

    let config = ViewerConfig::load_default();

    let end_date = end
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()?
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let lookback_years = years.unwrap_or(config.years);
    let start_date = start
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()?
        .unwrap_or_else(|| end_date - chrono::Duration::days(i64::from(lookback_years) * 365));

    if start_date >= end_date {
        bail!("start date {start_date} is not before end date {end_date}");
    }

    let ticker_csv = csv.or_else(|| config.ticker_csv_path());
    let universe = Universe::load(ticker_csv.as_deref());
    if let Some(warning) = &universe.warning {
        eprintln!("WARNING: {warning}");
    }
    if universe.is_empty() {
        bail!("ticker universe is empty ({})", universe.source_label());
    }
    println!(
        "Universe: {} tickers from {}",
        universe.len(),
        universe.source_label()
    );

    let provider: Box<dyn PriceProvider> = if synthetic {
        Box::new(SyntheticProvider)
    } else {
        Box::new(YahooProvider::new())
    };

    let (table, report) = download_prices(
        provider.as_ref(),
        &universe.tickers,
        start_date,
        end_date,
        &StdoutProgress,
    );

    if !report.all_succeeded() {
        for (symbol, error) in &report.errors {
            eprintln!("Error for {symbol}: {error}");
        }
    }

    if table.is_empty() {
        eprintln!("No price data for any ticker in the requested window; nothing written.");
        std::process::exit(1);
    }

    let frame = TidyFrame::from_wide(&table);
    let dataset_dir = out_dir.unwrap_or_else(|| config.dataset_dir.clone());
    let paths = artifacts::write_dataset(&table, &frame, &dataset_dir)?;

    print_summary(&table, &report, &paths);
    Ok(())
}

fn run_tickers(csv: Option<PathBuf>) -> Result<()> {
    let config = ViewerConfig::load_default();
    let ticker_csv = csv.or_else(|| config.ticker_csv_path());
    let universe = Universe::load(ticker_csv.as_deref());

    if let Some(warning) = &universe.warning {
        eprintln!("WARNING: {warning}");
    }

    println!("Source:  {}", universe.source_label());
    println!("Tickers: {}", universe.len());
    println!();
    for row in format_ticker_rows(&universe.tickers, config.tickers_per_row) {
        println!("{row}");
    }

    Ok(())
}

fn run_pages(
    wide: Option<PathBuf>,
    max_price: Option<f64>,
    keep: Option<String>,
    page_size: Option<usize>,
    page: Option<usize>,
) -> Result<()> {
    let config = ViewerConfig::load_default();

    let wide_path = wide.unwrap_or_else(|| config.dataset_dir.join(artifacts::WIDE_CSV));
    let table = artifacts::read_wide_csv(&wide_path)?;
    let frame = TidyFrame::from_wide(&table);

    let max_price = max_price.unwrap_or(config.max_price);
    let keep = symbols::normalize(&keep.unwrap_or_else(|| config.keep.clone()));
    let page_size = page_size.unwrap_or(config.page_size).max(1);

    let first = build_page_view(&frame, max_price, Some(&keep), page_size, 1);
    println!(
        "Dataset: {} ({} tickers, {} rows)",
        wide_path.display(),
        table.width(),
        table.height()
    );
    if !first.removed.is_empty() {
        println!(
            "Filtered out {} tickers above {max_price}: {}",
            first.removed.len(),
            first.removed.join(", ")
        );
    }

    let pages: Vec<usize> = match page {
        Some(p) => vec![p],
        None => (1..=first.total_pages).collect(),
    };

    for p in pages {
        let view = build_page_view(&frame, max_price, Some(&keep), page_size, p);
        println!();
        println!("--- page {}/{} ---", view.page, view.total_pages);
        for row in format_ticker_rows(&view.selected, config.tickers_per_row) {
            println!("{row}");
        }
    }

    Ok(())
}

fn print_summary(table: &PriceTable, report: &FetchReport, paths: &DatasetPaths) {
    println!();
    println!("=== Dataset ===");
    println!("Fetched:    {} of {} tickers", report.succeeded, report.total);
    println!("Columns:    {}", table.width());
    println!("Rows:       {}", table.height());
    if let (Some(first), Some(last)) = (table.first_date(), table.last_date()) {
        println!("Dates:      {first} to {last}");
    }
    println!("Wide CSV:   {}", paths.wide.display());
    println!("Tidy CSV:   {}", paths.tidy.display());
    if report.failed > 0 {
        println!("Failed:     {} (listed above)", report.failed);
    }
    println!();
}
