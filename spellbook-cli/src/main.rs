//! spellbook CLI
//!
//! Command-line interface for building and maintaining the card catalog
//! database from the published card data archive.

mod commands;
mod error;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use spellbook_lib::Settings;

pub(crate) use error::CliError;

#[derive(Parser)]
#[command(name = "spellbook")]
#[command(about = "Import card data into a normalized catalog database", long_about = None)]
struct Cli {
    /// Catalog database path (overrides the settings file)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and extract the source archive
    Fetch {
        /// Download even if the extracted JSON already exists
        #[arg(short, long)]
        force: bool,

        /// Archive URL (overrides the settings file)
        #[arg(long)]
        url: Option<String>,
    },

    /// Import the source document into the catalog database
    Import {
        /// Source JSON file (defaults to the fetched archive in the data directory)
        file: Option<PathBuf>,

        /// Download the archive first, even if it already exists
        #[arg(short, long)]
        download: bool,

        /// Only import these set codes (e.g., LEA,EMN)
        #[arg(long, value_delimiter = ',')]
        sets: Vec<String>,

        /// Skip grouping localized printings into physical cards
        #[arg(long)]
        no_physical: bool,

        /// Leave the rulings table untouched
        #[arg(long)]
        no_rulings: bool,
    },

    /// Download card images for every known multiverse id
    Images {
        /// Target directory (overrides the settings file)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Number of concurrent downloads
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Show catalog row counts and recent imports
    Stats {
        /// Number of recent imports to list
        #[arg(long, default_value_t = 5)]
        imports: usize,
    },

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Print the settings file path
    Path,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let mut settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    if let Some(database) = cli.database {
        settings.database = database;
    }

    let result = match cli.command {
        Commands::Fetch { force, url } => commands::fetch::run_fetch(&settings, url, force),
        Commands::Import {
            file,
            download,
            sets,
            no_physical,
            no_rulings,
        } => commands::import::run_import(
            &settings,
            file,
            download,
            sets,
            !no_physical,
            !no_rulings,
        ),
        Commands::Images { dir, workers } => commands::images::run_images(&settings, dir, workers),
        Commands::Stats { imports } => commands::stats::run_stats(&settings, imports),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&settings),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Route the `log` facade to stderr. Info lines are printed bare since they
/// are the command's normal output; other levels carry a prefix.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "[{}] {}", level, record.args()),
        })
        .init();
}

/// Emit an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
