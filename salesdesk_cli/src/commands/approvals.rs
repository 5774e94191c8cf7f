use anyhow::Result;
use clap::Args;
use salesdesk_lib::validation;
use salesdesk_lib::{filter_records, DashboardConfig, PageSource};

use crate::commands::fetcher_from_config;
use crate::output::{loading_indicator, print_approvals, OutputFormat};

#[derive(Args)]
pub struct ApprovalsArgs {
    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page: 10, 20, 30, 40 or 50 (defaults to the configured size)
    #[arg(long)]
    pub page_size: Option<i64>,

    /// Only show orders whose customer name contains this text
    #[arg(long)]
    pub search: Option<String>,
}

pub async fn run(args: &ApprovalsArgs, config: &DashboardConfig, format: &OutputFormat) -> Result<()> {
    let page_no = validation::validate_page(args.page)?;
    let page_size = validation::validate_page_size_option(
        args.page_size.unwrap_or(config.default_page_size),
    )?;
    let search = match args.search {
        Some(ref search) => validation::validate_search(search)?,
        None => String::new(),
    };

    let fetcher = fetcher_from_config(config);
    let mut loading = loading_indicator("Loading payment requests...");
    loading(true);
    let result = fetcher.fetch_page(page_no, page_size).await;
    loading(false);

    let page = match result {
        Ok(page) => page,
        Err(err) => {
            tracing::error!("{}", err);
            anyhow::bail!(err.user_message());
        }
    };
    let visible = filter_records(&page.records, &search);

    eprintln!(
        "Page {}/{} ({} of {} orders shown)",
        page.page_no,
        page.total_pages.max(1),
        visible.len(),
        page.records.len()
    );

    print_approvals(&visible, format, &config.display.currency())
}
