use anyhow::Result;
use clap::Args;
use salesdesk_lib::approval::set_approval_status;
use salesdesk_lib::types::ApprovalStatus;
use salesdesk_lib::DashboardConfig;

use crate::commands::client_from_config;
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct ApproveArgs {
    /// Payment request ID
    pub id: String,

    /// Reject the request instead of approving it
    #[arg(long)]
    pub reject: bool,

    /// Remarks stored with the decision
    #[arg(long)]
    pub remarks: Option<String>,
}

pub async fn run(args: &ApproveArgs, config: &DashboardConfig, format: &OutputFormat) -> Result<()> {
    let status = if args.reject {
        ApprovalStatus::Rejected
    } else {
        ApprovalStatus::Approved
    };

    let client = client_from_config(config);
    let updated = match set_approval_status(&client, &args.id, status, args.remarks.as_deref()).await
    {
        Ok(updated) => updated,
        Err(err) => anyhow::bail!(err.user_message()),
    };

    match format {
        OutputFormat::Json => print_json(&updated),
        _ => println!("Payment request {} is now {}", updated.id(), updated.approval_status),
    }

    Ok(())
}
