//! faixa CLI
//!
//! Imports a motorcycle-part price list and its image tree into the catalog
//! database, and reports on what is stored.

mod commands;
mod error;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub(crate) use error::CliError;

#[derive(Parser)]
#[command(name = "faixa")]
#[command(about = "Import price lists and product images into the catalog", long_about = None)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a price-list workbook and its asset tree
    Import {
        /// Price-list workbook (.xlsx, .xls, .ods)
        #[arg(long)]
        spreadsheet: Option<PathBuf>,

        /// Root of the brand/model image folders
        #[arg(long)]
        assets: Option<PathBuf>,

        /// Path to the catalog database
        #[arg(long)]
        db: Option<PathBuf>,

        /// Sheet whose rows may carry brand headers
        #[arg(long)]
        catch_all: Option<String>,

        /// Compute and report without writing to the database
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Show catalog database statistics
    Stats {
        /// Path to the catalog database
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the settings file path
    Path,

    /// Show the effective settings
    Show,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Import {
            spreadsheet,
            assets,
            db,
            catch_all,
            dry_run,
        } => commands::import::run_import(commands::import::ImportArgs {
            spreadsheet,
            assets,
            db,
            catch_all,
            dry_run,
        }),
        Commands::Stats { db } => commands::stats::run_stats(db),
        Commands::Config { action } => match action {
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::Show => commands::config::run_config_show(),
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Plain-message logger on stderr. `RUST_LOG` overrides the default level.
fn init_logger(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level.as_str().to_lowercase(), record.args()),
        })
        .init();
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
