use analytics::StatsEngine;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use core_types::{NewTrade, TradeFilters};
use database::{connect, run_migrations, DbRepository};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// The main entry point for the tradelog journal application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command-line arguments and execute the appropriate command.
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve => {
            let config = configuration::load_config()?;
            tracing::info!(
                host = %config.application.host,
                port = config.application.port,
                "Starting the journal API server."
            );
            web_server::run_server(config).await?;
        }
        Commands::Stats(args) => handle_stats(args).await?,
        Commands::Import(args) => handle_import(args).await?,
        Commands::Export(args) => handle_export(args).await?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A personal trading journal: log trades, psychology notes, and goals, and
/// derive dashboard statistics from them.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the journal's HTTP API server.
    Serve,
    /// Print a user's dashboard statistics in the terminal.
    Stats(StatsArgs),
    /// Import trades for a user from a CSV file.
    Import(ImportArgs),
    /// Export a user's trades to a CSV file.
    Export(ExportArgs),
}

#[derive(Parser)]
struct StatsArgs {
    /// The id of the user whose dashboard to compute.
    #[arg(long)]
    user: Uuid,

    /// The reference date (format: YYYY-MM-DD). Defaults to today (UTC).
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Parser)]
struct ImportArgs {
    /// The id of the user to import trades for.
    #[arg(long)]
    user: Uuid,

    /// Path to the CSV file to read.
    #[arg(long)]
    file: PathBuf,
}

#[derive(Parser)]
struct ExportArgs {
    /// The id of the user whose trades to export.
    #[arg(long)]
    user: Uuid,

    /// Path to the CSV file to write.
    #[arg(long)]
    file: PathBuf,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn open_repository() -> anyhow::Result<DbRepository> {
    let db_pool = connect().await?;
    run_migrations(&db_pool).await?;
    Ok(DbRepository::new(db_pool))
}

/// Computes and prints the dashboard for one user.
async fn handle_stats(args: StatsArgs) -> anyhow::Result<()> {
    let db_repo = open_repository().await?;
    let trades = db_repo.get_trades(args.user, &TradeFilters::default()).await?;

    let today = args.date.unwrap_or_else(|| Utc::now().date_naive());
    let stats = StatsEngine::new().calculate(&trades, today);

    let mut overview = Table::new();
    overview.set_header(vec!["Metric", "Value"]);
    overview.add_row(vec!["Total trades".to_string(), stats.total_trades.to_string()]);
    overview.add_row(vec!["Winning trades".to_string(), stats.winning_trades.to_string()]);
    overview.add_row(vec!["Losing trades".to_string(), stats.losing_trades.to_string()]);
    overview.add_row(vec!["Total P&L".to_string(), stats.total_pnl.to_string()]);
    overview.add_row(vec!["Win rate %".to_string(), stats.win_rate.to_string()]);
    overview.add_row(vec![
        "Win streak (current/max)".to_string(),
        format!("{}/{}", stats.current_win_streak, stats.max_win_streak),
    ]);
    overview.add_row(vec![
        "Loss streak (current/max)".to_string(),
        format!("{}/{}", stats.current_loss_streak, stats.max_loss_streak),
    ]);
    overview.add_row(vec![
        format!("Today ({today})"),
        format!("{} over {} trades", stats.today_pnl, stats.today_trades_count),
    ]);
    overview.add_row(vec![
        "This week".to_string(),
        format!(
            "{} over {} trades ({}% win rate)",
            stats.week_pnl, stats.week_trades_count, stats.week_win_rate
        ),
    ]);
    println!("{overview}");

    if !stats.best_symbols.is_empty() {
        let mut symbols = Table::new();
        symbols.set_header(vec!["Symbol", "Trades", "Total P&L", "Avg P&L", "Win rate %"]);
        for entry in &stats.best_symbols {
            symbols.add_row(vec![
                entry.symbol.clone(),
                entry.count.to_string(),
                entry.total_pnl.to_string(),
                entry.avg_pnl.to_string(),
                entry.win_rate.to_string(),
            ]);
        }
        println!("{symbols}");
    }

    if !stats.monthly_data.is_empty() {
        let mut monthly = Table::new();
        monthly.set_header(vec!["Month", "P&L", "Trades"]);
        for entry in &stats.monthly_data {
            monthly.add_row(vec![
                entry.month.clone(),
                entry.pnl.to_string(),
                entry.trades.to_string(),
            ]);
        }
        println!("{monthly}");
    }

    Ok(())
}

/// Reads a CSV file of trades and stores them for the user, preserving the
/// file's row order.
async fn handle_import(args: ImportArgs) -> anyhow::Result<()> {
    let mut reader = csv::Reader::from_path(&args.file)?;
    let records: Vec<NewTrade> = reader.deserialize().collect::<Result<_, _>>()?;

    println!(
        "Importing {} trades from {} ...",
        records.len(),
        args.file.display()
    );

    let db_repo = open_repository().await?;

    // Set up the progress bar
    let progress_bar = ProgressBar::new(records.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("#>-"),
    );

    for trade in &records {
        db_repo.save_trade(args.user, trade).await?;
        progress_bar.inc(1);
    }

    progress_bar.finish_with_message("Import complete!");
    Ok(())
}

/// Writes all of a user's trades, newest first, to a CSV file.
async fn handle_export(args: ExportArgs) -> anyhow::Result<()> {
    let db_repo = open_repository().await?;
    let trades = db_repo.get_trades(args.user, &TradeFilters::default()).await?;

    let mut writer = csv::Writer::from_path(&args.file)?;
    for trade in &trades {
        writer.serialize(trade)?;
    }
    writer.flush()?;

    println!("Exported {} trades to {}", trades.len(), args.file.display());
    Ok(())
}
