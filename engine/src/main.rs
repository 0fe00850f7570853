// Command-line entry point: batch checks of form submissions and one-off currency formatting
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use engine::currency::{CurrencyFormatOptions, CurrencyNormalizer};
use engine::data::FormCsvParser;
use engine::{EngineSettings, FormCheckService};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "roi-engine", version, about = "Validate and normalize ROI calculator inputs")]
struct Cli {
    /// JSON settings file; defaults apply when omitted
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check every submission in a `;`-delimited CSV file
    Check {
        csv: PathBuf,
        /// Report currency, overrides the settings file
        #[arg(long)]
        currency: Option<String>,
        /// Print one pretty JSON array instead of JSON lines
        #[arg(long)]
        pretty: bool,
    },
    /// Parse a raw amount and print it formatted
    Format {
        amount: String,
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        locale: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    match run() {
        Ok(all_valid) => std::process::exit(if all_valid { 0 } else { 1 }),
        Err(e) => {
            tracing::error!("{:#}", e);
            std::process::exit(2);
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => EngineSettings::load_from_file(path)
            .with_context(|| format!("Failed to load settings from '{}'", path.display()))?,
        None => EngineSettings::default(),
    };

    match cli.command {
        Command::Check { csv, currency, pretty } => {
            if let Some(code) = currency {
                settings.default_currency = code;
            }
            let path = csv.to_string_lossy();
            let submissions = FormCsvParser::load_submissions(&path)
                .with_context(|| format!("Failed to read submissions from '{}'", path))?;

            let service = FormCheckService::from_settings(&settings);
            let reports = service.check_all(&submissions);
            let invalid = reports.iter().filter(|r| !r.is_valid).count();
            info!(total = reports.len(), invalid, "Finished checking submissions");

            if pretty {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    println!("{}", serde_json::to_string(report)?);
                }
            }
            Ok(invalid == 0)
        }
        Command::Format { amount, currency, locale } => {
            let code = currency.unwrap_or_else(|| settings.default_currency.clone());
            let normalizer = CurrencyNormalizer::with_locale(locale.as_deref().unwrap_or(&settings.locale));
            let parsed = normalizer.parse_currency_amount(amount.as_str());

            println!("parsed:    {}", parsed);
            println!("currency:  {}", normalizer.format_currency(parsed, &code, &CurrencyFormatOptions::default()));
            println!("amount:    {}", normalizer.format_currency_amount(parsed, &code));
            println!("large:     {}", normalizer.format_large_currency(parsed, &code));
            Ok(true)
        }
    }
}
