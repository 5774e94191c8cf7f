use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use salesdesk_lib::format::{format_currency, format_date, CurrencyFormat};
use salesdesk_lib::types::SalesOrder;
use salesdesk_lib::ViewState;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Shown in the single row of a table with nothing to list.
pub const NO_DATA: &str = "No data found";
/// Shown for a name when every candidate field is empty.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
pub struct ApprovalRow {
    #[tabled(rename = "Order")]
    #[serde(rename = "Order")]
    order: String,
    #[tabled(rename = "Customer")]
    #[serde(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Sales Executive")]
    #[serde(rename = "Sales Executive")]
    sales_executive: String,
    #[tabled(rename = "Warehouse")]
    #[serde(rename = "Warehouse")]
    warehouse: String,
    #[tabled(rename = "Order Total")]
    #[serde(rename = "Order Total")]
    order_total: String,
    #[tabled(rename = "Request")]
    #[serde(rename = "Request")]
    request_id: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Last Payment")]
    #[serde(rename = "Last Payment")]
    last_payment: String,
}

// -- Row builders --

fn build_approval_rows(orders: &[&SalesOrder], currency: &CurrencyFormat) -> Vec<ApprovalRow> {
    orders
        .iter()
        .map(|o| {
            let latest = o.latest_payment_request();
            ApprovalRow {
                order: o.order_number.clone().unwrap_or_else(|| o.id().to_string()),
                customer: o.customer_name().unwrap_or(NOT_AVAILABLE).to_string(),
                sales_executive: o
                    .sales_executive
                    .as_ref()
                    .and_then(|s| s.display_name())
                    .unwrap_or(NOT_AVAILABLE)
                    .to_string(),
                warehouse: o
                    .warehouse
                    .as_ref()
                    .and_then(|w| w.display_name())
                    .unwrap_or(NOT_AVAILABLE)
                    .to_string(),
                order_total: format_currency(o.grand_total, currency),
                request_id: latest.map(|pr| pr.id().to_string()).unwrap_or_default(),
                amount: format_currency(latest.and_then(|pr| pr.amount), currency),
                last_payment: format_date(latest.and_then(|pr| pr.transaction_date.as_deref())),
            }
        })
        .collect()
}

/// Builds the table; an empty list still gets its header plus one
/// placeholder row.
fn approvals_table(rows: &[ApprovalRow]) -> Table {
    if !rows.is_empty() {
        return Table::new(rows);
    }
    let mut builder = Builder::default();
    builder.push_record(approval_headers());
    builder.push_record(placeholder_record());
    builder.build()
}

fn approval_headers() -> Vec<String> {
    ApprovalRow::headers()
        .into_iter()
        .map(|h| h.into_owned())
        .collect()
}

fn placeholder_record() -> Vec<String> {
    let mut placeholder = vec![String::new(); ApprovalRow::LENGTH];
    placeholder[0] = NO_DATA.to_string();
    placeholder
}

/// Same shape as the table: an empty list still gets the header and one
/// placeholder record.
fn write_approvals_csv<W: std::io::Write>(rows: &[ApprovalRow], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        wtr.write_record(approval_headers())?;
        wtr.write_record(placeholder_record())?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- Output --

pub fn print_approvals(
    orders: &[&SalesOrder],
    format: &OutputFormat,
    currency: &CurrencyFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", approvals_table(&build_approval_rows(orders, currency)));
        }
        OutputFormat::Markdown => {
            let mut table = approvals_table(&build_approval_rows(orders, currency));
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            write_approvals_csv(&build_approval_rows(orders, currency), std::io::stdout())?
        }
        OutputFormat::Json => print_json(&orders),
    }
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

// -- Pager --

/// One-line summary of where the view is, e.g. `Page 2/3 (10 per page)`.
pub fn pager_summary<T>(state: &ViewState<T>) -> String {
    let total = state
        .total_pages()
        .map(|t| t.max(1).to_string())
        .unwrap_or_else(|| "?".to_string());
    let mut line = format!(
        "Page {}/{} ({} per page)",
        state.page_no(),
        total,
        state.page_size()
    );
    if !state.search().is_empty() {
        line.push_str(&format!(", search \"{}\"", state.search()));
    }
    line
}

/// Navigation hints for the controls currently available.
pub fn pager_controls<T>(state: &ViewState<T>) -> Vec<&'static str> {
    let mut controls = Vec::new();
    if state.has_previous() {
        controls.push("[p] previous");
    }
    if state.has_next() {
        controls.push("[n] next");
    }
    controls
}

/// Returns a loading callback that shows a spinner on stderr while a
/// fetch is in flight.
pub fn loading_indicator(message: &'static str) -> impl FnMut(bool) + 'static {
    let mut bar: Option<ProgressBar> = None;
    move |loading| {
        if loading {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message(message);
            pb.enable_steady_tick(Duration::from_millis(100));
            bar = Some(pb);
        } else if let Some(pb) = bar.take() {
            pb.finish_and_clear();
        }
    }
}
