mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use salesdesk_lib::DashboardConfig;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "salesdesk")]
#[command(about = "Review and approve pending payment requests on sales orders")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// YAML config file (SALESDESK_* environment variables take precedence)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of payment requests awaiting approval
    Approvals(commands::approvals::ApprovalsArgs),
    /// Page through payment requests interactively
    Browse(commands::browse::BrowseArgs),
    /// Approve or reject a single payment request
    Approve(commands::approve::ApproveArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("salesdesk=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let config = DashboardConfig::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Approvals(args) => commands::approvals::run(args, &config, &format).await?,
        Commands::Browse(args) => commands::browse::run(args, &config, &format).await?,
        Commands::Approve(args) => commands::approve::run(args, &config, &format).await?,
    }

    Ok(())
}
