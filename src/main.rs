use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

use unicorn_scraper::config::Config;
use unicorn_scraper::constants::DEFAULT_LOG_DIR;
use unicorn_scraper::corrections::Corrections;
use unicorn_scraper::duplicates::find_duplicates_file;
use unicorn_scraper::extract::extract_file;
use unicorn_scraper::extract::fetcher::HttpFetcher;
use unicorn_scraper::logging;
use unicorn_scraper::pipeline::Pipeline;
use unicorn_scraper::preprocess::preprocess_files;

#[derive(Parser)]
#[command(name = "unicorn_scraper")]
#[command(about = "Unicorn companies dataset scraper and cleaner")]
#[command(version = "0.1.0")]
struct Cli {
    /// Config file (defaults to unicorn.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Replacement correction tables
    #[arg(long, global = true)]
    corrections: Option<PathBuf>,

    /// Directory for the JSON log file
    #[arg(long, global = true, default_value = DEFAULT_LOG_DIR)]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the company list page and company pages into the raw table
    Extract {
        /// Saved company list page
        #[arg(long)]
        html: Option<PathBuf>,
        /// Raw table to write
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Clean the raw table into the company and investment tables
    Preprocess {
        /// Raw table to read
        #[arg(long)]
        input: Option<PathBuf>,
        /// Cleaned company table to write
        #[arg(long)]
        clean_out: Option<PathBuf>,
        /// Investment table to write
        #[arg(long)]
        investments_out: Option<PathBuf>,
    },
    /// Print investors whose names share a word
    FindDuplicates {
        /// Investment table to read
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
    /// Run extract, preprocess and find-duplicates in order
    Run,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let _log_guard = logging::init_logging(&cli.log_dir);

    let mut config = Config::load(cli.config.as_deref())?;
    let corrections = Corrections::load(cli.corrections.as_deref())?;

    match cli.command {
        Commands::Extract { html, out } => {
            if let Some(html) = html {
                config.paths.companies_html = html;
            }
            if let Some(out) = out {
                config.paths.raw_csv = out;
            }

            let fetcher = HttpFetcher::new(&config.http)?;
            let summary = extract_file(
                &config.paths.companies_html,
                &config.paths.raw_csv,
                fetcher,
                &corrections,
            )
            .await?;

            println!("📥 Extracted {} companies", summary.stats.companies);
            println!("   From company pages: {}", summary.stats.from_pages);
            println!("   From manual entries: {}", summary.stats.from_manual);
            println!("   Missing details: {}", summary.stats.missing);
            println!("   Output file: {}", summary.output_file);
        }
        Commands::Preprocess {
            input,
            clean_out,
            investments_out,
        } => {
            if let Some(input) = input {
                config.paths.raw_csv = input;
            }
            if let Some(clean_out) = clean_out {
                config.paths.clean_csv = clean_out;
            }
            if let Some(investments_out) = investments_out {
                config.paths.investments_csv = investments_out;
            }

            let summary = preprocess_files(
                &config.paths.raw_csv,
                &config.paths.clean_csv,
                &config.paths.investments_csv,
                &corrections,
            )?;

            println!("🔧 Cleaned {} companies", summary.stats.companies);
            println!("   Investments: {}", summary.stats.investments);
            println!("   Malformed cells left empty: {}", summary.stats.malformed.total());
            println!("   {} ({})", summary.clean_file, summary.clean_sha256);
            println!("   {} ({})", summary.investments_file, summary.investments_sha256);
        }
        Commands::FindDuplicates { input, format } => {
            if let Some(input) = input {
                config.paths.investments_csv = input;
            }

            let report = find_duplicates_file(&config.paths.investments_csv, &corrections)?;
            match format {
                ReportFormat::Text => print!("{report}"),
                ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
        Commands::Run => {
            info!("Running full pipeline");
            let fetcher = HttpFetcher::new(&config.http)?;
            let result = Pipeline::run(&config, &corrections, fetcher).await?;

            println!("✅ Pipeline finished in {:.2}s", result.duration_secs);
            println!("   Companies extracted: {}", result.extract.stats.companies);
            println!("   Missing details: {}", result.extract.stats.missing);
            println!("   Companies cleaned: {}", result.preprocess.stats.companies);
            println!("   Investments: {}", result.preprocess.stats.investments);
            println!("   Shared investor words: {}", result.duplicates.len());
        }
    }

    Ok(())
}
