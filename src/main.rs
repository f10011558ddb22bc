use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use finance_tracker::cli::{
    handle_advice_command, handle_budget_command, handle_category_command,
    handle_export_command, handle_report_command, handle_transaction_command,
};
use finance_tracker::config::{FinancePaths, Settings};
use finance_tracker::storage::init::{initialize_storage, needs_initialization, DEFAULT_CATEGORIES};
use finance_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal income and expense tracker",
    long_about = "fintrack records income and expenses by category, tracks monthly \
                  expense budgets, and reports totals, trends, savings rate and \
                  over-budget categories from the command line."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory with default categories
    Init,

    /// Show current configuration and paths
    Config,

    /// Category management commands
    #[command(subcommand)]
    Category(finance_tracker::cli::CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(finance_tracker::cli::TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(finance_tracker::cli::BudgetCommands),

    /// Reports over a filtered set of transactions
    #[command(subcommand)]
    Report(finance_tracker::cli::ReportCommands),

    /// Export transactions to CSV
    Export(finance_tracker::cli::ExportArgs),

    /// Ask the advice generator for budgeting tips
    Advice(finance_tracker::cli::AdviceArgs),
}

fn main() -> Result<()> {
    // .env in the working directory, then the one beside config.json.
    // Neither overrides variables that are already set.
    dotenv().ok();
    let paths = FinancePaths::new()?;
    dotenvy::from_path(paths.env_file()).ok();

    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("fintrack - personal income and expense tracker");
        println!();
        println!("Run 'fintrack --help' for usage information.");
        println!("Run 'fintrack init' to create the default categories.");
        return Ok(());
    };

    match command {
        Commands::Init => {
            println!("Initializing fintrack at: {}", paths.base_dir().display());
            let seeded = initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            if seeded {
                println!();
                println!("Default categories have been created:");
                for (name, kind) in DEFAULT_CATEGORIES {
                    println!("  - {} ({})", name, kind);
                }
            }
            println!();
            println!("Run 'fintrack category list' to see all categories.");
        }

        Commands::Config => {
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Env file:        {}", paths.env_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Top expenses:    {}", settings.top_expenses);
            println!("  Advice model:    {}", settings.advice.model);
            println!("  Advice window:   {} months", settings.advice.months_window);
        }

        Commands::Category(cmd) => handle_category_command(&open_storage(paths)?, cmd)?,
        Commands::Transaction(cmd) => {
            handle_transaction_command(&open_storage(paths)?, &settings, cmd)?
        }
        Commands::Budget(cmd) => handle_budget_command(&open_storage(paths)?, &settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&open_storage(paths)?, &settings, cmd)?,
        Commands::Export(args) => handle_export_command(&open_storage(paths)?, args)?,
        Commands::Advice(args) => {
            handle_advice_command(&open_storage(paths)?, &settings, args)?
        }
    }

    Ok(())
}

/// Load every repository, seeding the default categories on first use
fn open_storage(paths: FinancePaths) -> Result<Storage> {
    if needs_initialization(&paths) {
        debug!("no categories file, seeding defaults");
        initialize_storage(&paths)?;
    }

    let mut storage = Storage::new(paths)?;
    storage.load_all()?;
    Ok(storage)
}
