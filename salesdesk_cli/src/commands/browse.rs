use anyhow::Result;
use clap::Args;
use salesdesk_lib::approval::set_approval_status;
use salesdesk_lib::types::ApprovalStatus;
use salesdesk_lib::validation;
use salesdesk_lib::{
    DashboardConfig, PaginatedView, PaymentApprovalsFetcher, ViewCommand, ViewEvent, ViewState,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::fetcher_from_config;
use crate::output::{loading_indicator, pager_controls, pager_summary, print_approvals, OutputFormat};

const HELP: &str = "\
Commands:
  n, next                  next page
  p, prev                  previous page
  size <N>                 rows per page (10, 20, 30, 40, 50)
  /<text>, search [text]   filter this page by customer name (empty clears)
  r, refresh               reload the current page
  approve <ID> [remarks]   approve a payment request
  reject <ID> [remarks]    reject a payment request
  d, dismiss               close the error message
  h, help                  show this help
  q, quit                  exit";

#[derive(Args)]
pub struct BrowseArgs {
    /// Initial results per page: 10, 20, 30, 40 or 50 (defaults to the configured size)
    #[arg(long)]
    pub page_size: Option<i64>,
}

#[derive(Debug, PartialEq)]
enum Input {
    View(ViewCommand),
    Decide {
        id: String,
        status: ApprovalStatus,
        remarks: Option<String>,
    },
    Help,
    Quit,
    Nothing,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    if let Some(term) = line.strip_prefix('/') {
        return search(term);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "" => Ok(Input::Nothing),
        "n" | "next" => Ok(Input::View(ViewCommand::NextPage)),
        "p" | "prev" | "previous" => Ok(Input::View(ViewCommand::PrevPage)),
        "r" | "refresh" => Ok(Input::View(ViewCommand::Refresh)),
        "d" | "dismiss" => Ok(Input::View(ViewCommand::DismissNotification)),
        "search" => search(rest),
        "size" => rest
            .parse::<i64>()
            .map(|size| Input::View(ViewCommand::SetPageSize(size)))
            .map_err(|_| format!("Expected a page size, got '{}'", rest)),
        "approve" | "reject" => {
            let (id, remarks) = match rest.split_once(char::is_whitespace) {
                Some((id, remarks)) => (id, Some(remarks.trim().to_string())),
                None => (rest, None),
            };
            if id.is_empty() {
                return Err(format!("Usage: {} <ID> [remarks]", word));
            }
            let status = if word.eq_ignore_ascii_case("approve") {
                ApprovalStatus::Approved
            } else {
                ApprovalStatus::Rejected
            };
            Ok(Input::Decide {
                id: id.to_string(),
                status,
                remarks,
            })
        }
        "h" | "help" | "?" => Ok(Input::Help),
        "q" | "quit" | "exit" => Ok(Input::Quit),
        other => Err(format!("Unknown command '{}', type 'help'", other)),
    }
}

fn search(term: &str) -> Result<Input, String> {
    validation::validate_search(term)
        .map(|term| Input::View(ViewCommand::SetSearch(term)))
        .map_err(|e| e.user_message())
}

pub async fn run(args: &BrowseArgs, config: &DashboardConfig, format: &OutputFormat) -> Result<()> {
    let state = ViewState::try_new(args.page_size.unwrap_or(config.default_page_size))?
        .with_stale_policy(config.stale_policy);
    let mut view = PaginatedView::new(fetcher_from_config(config), state)
        .on_loading(loading_indicator("Loading payment requests..."));

    view.mount().await;
    render(&view, config, format)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let events = match parse_input(&line) {
            Ok(Input::View(command)) => view.dispatch(command).await,
            Ok(Input::Decide {
                id,
                status,
                remarks,
            }) => decide(&mut view, &id, status, remarks.as_deref()).await,
            Ok(Input::Help) => {
                eprintln!("{}", HELP);
                continue;
            }
            Ok(Input::Quit) => break,
            Ok(Input::Nothing) => continue,
            Err(msg) => {
                eprintln!("{}", msg);
                continue;
            }
        };
        tracing::debug!("{:?}", events);
        if !events.is_empty() {
            render(&view, config, format)?;
        }
    }

    Ok(())
}

/// Writes the decision, then reloads the page so the row drops out of the
/// list. A failed write opens the notification instead.
async fn decide(
    view: &mut PaginatedView<PaymentApprovalsFetcher>,
    id: &str,
    status: ApprovalStatus,
    remarks: Option<&str>,
) -> Vec<ViewEvent> {
    let result = set_approval_status(view.source().client(), id, status, remarks).await;
    match result {
        Ok(updated) => {
            eprintln!("Payment request {} is now {}", updated.id(), updated.approval_status);
            view.dispatch(ViewCommand::Refresh).await
        }
        Err(err) => view.report_error(&err),
    }
}

fn render(
    view: &PaginatedView<PaymentApprovalsFetcher>,
    config: &DashboardConfig,
    format: &OutputFormat,
) -> Result<()> {
    let state = view.state();
    if let Some(notification) = state.notification() {
        eprintln!("Error: {} ([d] dismiss)", notification.message);
    }
    print_approvals(&state.visible_records(), format, &config.display.currency())?;
    eprintln!("{}", pager_summary(state));
    let controls = pager_controls(state);
    if !controls.is_empty() {
        eprintln!("{}", controls.join("  "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation() {
        assert_eq!(parse_input("n"), Ok(Input::View(ViewCommand::NextPage)));
        assert_eq!(parse_input(" NEXT "), Ok(Input::View(ViewCommand::NextPage)));
        assert_eq!(parse_input("prev"), Ok(Input::View(ViewCommand::PrevPage)));
        assert_eq!(parse_input("r"), Ok(Input::View(ViewCommand::Refresh)));
        assert_eq!(
            parse_input("dismiss"),
            Ok(Input::View(ViewCommand::DismissNotification))
        );
    }

    #[test]
    fn test_parse_page_size() {
        assert_eq!(
            parse_input("size 20"),
            Ok(Input::View(ViewCommand::SetPageSize(20)))
        );
        assert!(parse_input("size").is_err());
        assert!(parse_input("size twenty").is_err());
    }

    #[test]
    fn test_parse_search() {
        assert_eq!(
            parse_input("/asha traders"),
            Ok(Input::View(ViewCommand::SetSearch("asha traders".into())))
        );
        assert_eq!(
            parse_input("search"),
            Ok(Input::View(ViewCommand::SetSearch(String::new())))
        );
        assert_eq!(
            parse_input("search Northwind"),
            Ok(Input::View(ViewCommand::SetSearch("Northwind".into())))
        );
    }

    #[test]
    fn test_parse_search_is_sanitized() {
        assert_eq!(
            parse_input("/asha\u{0007} traders"),
            Ok(Input::View(ViewCommand::SetSearch("asha traders".into())))
        );
        assert!(parse_input(&format!("search {}", "a".repeat(101))).is_err());
        assert!(parse_input(&format!("/{}", "a".repeat(101))).is_err());
    }

    #[test]
    fn test_parse_decisions() {
        assert_eq!(
            parse_input("approve pr_501"),
            Ok(Input::Decide {
                id: "pr_501".into(),
                status: ApprovalStatus::Approved,
                remarks: None,
            })
        );
        assert_eq!(
            parse_input("reject pr_501 amount does not match"),
            Ok(Input::Decide {
                id: "pr_501".into(),
                status: ApprovalStatus::Rejected,
                remarks: Some("amount does not match".into()),
            })
        );
        assert!(parse_input("approve").is_err());
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse_input(""), Ok(Input::Nothing));
        assert_eq!(parse_input("?"), Ok(Input::Help));
        assert_eq!(parse_input("quit"), Ok(Input::Quit));
        assert!(parse_input("launch").is_err());
    }
}
