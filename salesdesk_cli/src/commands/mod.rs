pub mod approvals;
pub mod approve;
pub mod browse;

use salesdesk_lib::{Client, DashboardConfig, PaymentApprovalsFetcher};

pub(crate) fn client_from_config(config: &DashboardConfig) -> Client {
    Client::new(&config.base_url).with_timeout(config.timeout())
}

pub(crate) fn fetcher_from_config(config: &DashboardConfig) -> PaymentApprovalsFetcher {
    PaymentApprovalsFetcher::new(client_from_config(config))
        .with_approval_status(config.approval_status)
}
