//! Library layer for SalesDesk: the payment-approvals list pattern.
//!
//! Wraps the `salesdesk_api` crate with a page fetcher, a local search
//! filter, a UI-agnostic view-state machine, and display formatting.

pub mod approval;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod format;
pub mod validation;
pub mod view;

pub use salesdesk_api;
pub use salesdesk_api::types;
pub use salesdesk_api::{Client, PaymentRequestQuery, Query};

pub use config::{DashboardConfig, DisplayConfig};
pub use error::DashboardError;
pub use fetcher::{Page, PageSource, PaymentApprovalsFetcher};
pub use filter::{filter_by, filter_records, Searchable};
pub use view::{FetchTicket, Notification, PaginatedView, Phase, StalePolicy, ViewCommand, ViewEvent, ViewState};
