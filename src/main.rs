use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ledgerlens::cli::{
    handle_categories_command, handle_config_command, handle_dashboard_command,
    handle_init_command, handle_search_command, handle_transfers_command, handle_trend_command,
    CategoriesArgs, ConfigCommands, DashboardArgs, SearchArgs, TransfersArgs, TrendArgs,
};
use ledgerlens::config::{LensPaths, Settings};

#[derive(Parser)]
#[command(
    name = "ledgerlens",
    version,
    about = "Dashboard analytics for personal-finance ledgers",
    long_about = "ledgerlens reads a snapshot of ledger transactions (JSON or CSV) and \
                  derives the figures a finance dashboard shows: totals, category \
                  breakdowns, monthly trends, a cumulative net balance and a \
                  period-over-period expense comparison."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every dashboard view for a snapshot
    Dashboard(DashboardArgs),

    /// Break income or expenses down by category
    #[command(alias = "cat")]
    Categories(CategoriesArgs),

    /// Show monthly income/expense bars or the cumulative net series
    Trend(TrendArgs),

    /// Search the ledger by text, type and date
    #[command(alias = "find")]
    Search(SearchArgs),

    /// Find unlinked rows that look like the other leg of a transfer
    Transfers(TransfersArgs),

    /// Write default settings to the config directory
    Init,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "ledgerlens=warn",
        1 => "ledgerlens=info",
        _ => "ledgerlens=debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Initialize paths and settings
    let paths = LensPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Dashboard(args)) => handle_dashboard_command(&settings, args)?,
        Some(Commands::Categories(args)) => handle_categories_command(&settings, args)?,
        Some(Commands::Trend(args)) => handle_trend_command(&settings, args)?,
        Some(Commands::Search(args)) => handle_search_command(&settings, args)?,
        Some(Commands::Transfers(args)) => handle_transfers_command(&settings, args)?,
        Some(Commands::Init) => handle_init_command(&paths, &settings)?,
        Some(Commands::Config { command }) => {
            handle_config_command(&paths, &mut settings, command)?
        }
        None => {
            println!("ledgerlens - dashboard analytics for personal-finance ledgers");
            println!();
            println!("Run 'ledgerlens --help' for usage information.");
            println!("Run 'ledgerlens dashboard <snapshot.json>' to see a dashboard.");
        }
    }

    Ok(())
}
