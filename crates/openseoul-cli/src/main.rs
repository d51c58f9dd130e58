//! openseoul - archive open-data API datasets as CSV
//!
//! Fetches a paginated dataset from the Seoul open-data portal and writes
//! the accumulated rows to a sorted CSV file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use openseoul_core::ProgressContext;
use openseoul_dataset::Status;

mod config;

use config::FileConfig;

#[derive(Parser)]
#[command(name = "openseoul")]
#[command(about = "Archive Seoul open-data API datasets as CSV")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Suppress info logs (only warnings and errors)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./openseoul.toml or ~/.config/openseoul/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a dataset and write it as CSV
    Fetch(FetchArgs),
    /// Show current configuration
    Config,
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// Dataset endpoint: everything before the range segments
    #[arg(long)]
    base_url: Option<String>,

    /// Expected top-level key of the response (discovered when omitted)
    #[arg(long)]
    service: Option<String>,

    /// Records per range request
    #[arg(long)]
    page_size: Option<u64>,

    /// Output directory for the CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output filename (default: <service>_<YYYYMMDD>.csv)
    #[arg(long)]
    out_file: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let progress = ProgressContext::new();

    // Logging:
    //   TTY:     quiet (warn) unless --debug — the progress bar shows activity
    //   non-TTY: info unless --quiet         — logs are the only progress indicator
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = if is_tty { !cli.debug } else { cli.quiet };
    openseoul_core::init_logging(quiet, cli.debug, multi);

    match try_main(cli, &progress) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: Cli, progress: &ProgressContext) -> Result<ExitCode> {
    let file_config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::load()?,
    };

    match cli.command {
        Command::Fetch(args) => cmd_fetch(args, &file_config, progress),
        Command::Config => {
            show_config(&file_config);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_fetch(args: FetchArgs, file: &FileConfig, progress: &ProgressContext) -> Result<ExitCode> {
    let base_url = args
        .base_url
        .or_else(|| file.api.base_url.clone())
        .context("--base-url required (or set [api].base_url in openseoul.toml)")?;

    let config = openseoul_dataset::Config {
        base_url,
        auth_key: file.api.auth_key.clone().unwrap_or_default(),
        service: args.service.or_else(|| file.api.service.clone()),
        page_size: args.page_size.unwrap_or(file.fetch.page_size),
        output_dir: args.output.unwrap_or_else(|| file.output.dir.clone()),
    };

    let filename = args
        .out_file
        .unwrap_or_else(|| default_filename(config.service.as_deref()));

    log::info!(
        "Fetching {}",
        config.service.as_deref().unwrap_or("dataset")
    );
    log::info!("  Output: {}", config.output_dir.join(&filename).display());

    let summary = openseoul_dataset::run(&config, &filename, progress)?;

    print_summary(
        "Dataset",
        &[
            ("Status", summary.status.to_string()),
            (
                "Service",
                summary
                    .service
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
            ),
            (
                "Records",
                format!("{}/{}", summary.fetched_records, summary.expected_records),
            ),
            (
                "Pages",
                format!(
                    "{} fetched ({} skipped)",
                    summary.pages_fetched, summary.pages_skipped
                ),
            ),
            (
                "Output",
                summary
                    .written
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "none".to_string()),
            ),
            ("Time", format!("{:.1}s", summary.elapsed.as_secs_f64())),
        ],
    );

    Ok(match summary.status {
        Status::Failed => ExitCode::FAILURE,
        Status::Complete | Status::Partial => ExitCode::SUCCESS,
    })
}

fn show_config(config: &FileConfig) {
    use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Setting").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    table.add_row(vec![
        "Base URL",
        config.api.base_url.as_deref().unwrap_or("not set"),
    ]);
    table.add_row(vec![
        "Service",
        config.api.service.as_deref().unwrap_or("not set"),
    ]);
    table.add_row(vec![
        "Access key",
        if config.api.auth_key.is_some() {
            "configured"
        } else {
            "not set"
        },
    ]);
    table.add_row(vec!["Page size", &config.fetch.page_size.to_string()]);
    table.add_row(vec![
        "Output directory",
        &config.output.dir.display().to_string(),
    ]);

    eprintln!("\n{table}");
}

/// Print a key-value summary table on stderr
fn print_summary(title: &str, rows: &[(&str, String)]) {
    use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new(title).fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    eprintln!("\n{table}");
}

/// `<service>_<YYYYMMDD>.csv`, falling back to `dataset_<YYYYMMDD>.csv`.
fn default_filename(service: Option<&str>) -> String {
    let stamp = chrono::Local::now().format("%Y%m%d");
    format!("{}_{stamp}.csv", service.unwrap_or("dataset"))
}
