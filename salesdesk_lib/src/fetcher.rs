//! Page fetching: the [`PageSource`] seam and the HTTP-backed fetcher for
//! the payment-approvals list.

use salesdesk_api::types::{ApprovalStatus, PaginatedResponse, SalesOrder};
use salesdesk_api::{Client, PaymentRequestQuery, Query};

use crate::error::DashboardError;
use crate::format::parse_transaction_date;
use crate::validation;

/// One loaded page of records.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub page_no: i64,
    pub page_size: i64,
    /// As reported by the backend; 0 when it does not know.
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn from_response(resp: PaginatedResponse<T>, page_no: i64, page_size: i64) -> Self {
        Self {
            records: resp.data,
            page_no,
            page_size,
            total_pages: resp.total_pages.max(0),
        }
    }
}

/// Anything that can produce a page of records for a page number and size.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    type Record;

    async fn fetch_page(
        &self,
        page_no: i64,
        page_size: i64,
    ) -> Result<Page<Self::Record>, DashboardError>;
}

/// Fetches sales orders with payment requests in one approval status.
#[derive(Clone, Debug)]
pub struct PaymentApprovalsFetcher {
    client: Client,
    approval_status: ApprovalStatus,
}

impl PaymentApprovalsFetcher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            approval_status: ApprovalStatus::Pending,
        }
    }

    pub fn with_approval_status(mut self, status: ApprovalStatus) -> Self {
        self.approval_status = status;
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl PageSource for PaymentApprovalsFetcher {
    type Record = SalesOrder;

    async fn fetch_page(
        &self,
        page_no: i64,
        page_size: i64,
    ) -> Result<Page<SalesOrder>, DashboardError> {
        let page_no = validation::validate_page(page_no)?;
        let page_size = validation::validate_page_size(page_size)?;
        let query = PaymentRequestQuery::default()
            .with_approval_status(self.approval_status)
            .with_page(page_no)
            .with_page_size(page_size);

        let resp = self.client.get_payment_requests(&query).await?;
        let mut page = Page::from_response(resp, page_no, page_size);
        sort_by_latest_payment(&mut page.records);
        tracing::debug!(
            "Loaded page {}/{} ({} records)",
            page.page_no,
            page.total_pages,
            page.records.len()
        );
        Ok(page)
    }
}

/// Milliseconds since the epoch of the order's first payment request
/// transaction date; 0 when missing or unparsable.
pub fn latest_payment_timestamp(order: &SalesOrder) -> i64 {
    order
        .latest_payment_request()
        .and_then(|pr| pr.transaction_date.as_deref())
        .and_then(parse_transaction_date)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

/// Newest payment first. Stable, so equal keys keep backend order and
/// undated orders end up last.
pub fn sort_by_latest_payment(orders: &mut [SalesOrder]) {
    orders.sort_by_cached_key(|order| std::cmp::Reverse(latest_payment_timestamp(order)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str, date: Option<&str>) -> SalesOrder {
        let payment_requests = match date {
            Some(date) => serde_json::json!([{ "id": format!("pr_{}", id), "transactionDate": date }]),
            None => serde_json::json!([]),
        };
        serde_json::from_value(serde_json::json!({
            "id": id,
            "paymentRequests": payment_requests,
        }))
        .unwrap()
    }

    fn ids(orders: &[SalesOrder]) -> Vec<&str> {
        orders.iter().map(|o| o.id()).collect()
    }

    #[test]
    fn dated_record_sorts_before_undated() {
        let mut orders = vec![order("none", None), order("dated", Some("2024-01-10"))];
        sort_by_latest_payment(&mut orders);
        assert_eq!(ids(&orders), vec!["dated", "none"]);
    }

    #[test]
    fn sorts_descending_by_date() {
        let mut orders = vec![
            order("a", Some("2023-05-01")),
            order("b", Some("2024-02-01T10:00:00Z")),
            order("c", Some("2023-11-15")),
        ];
        sort_by_latest_payment(&mut orders);
        assert_eq!(ids(&orders), vec!["b", "c", "a"]);
    }

    #[test]
    fn ties_keep_backend_order() {
        let mut orders = vec![
            order("x", None),
            order("first", Some("2024-01-10")),
            order("y", Some("garbage")),
            order("second", Some("2024-01-10")),
            order("z", None),
        ];
        sort_by_latest_payment(&mut orders);
        assert_eq!(ids(&orders), vec!["first", "second", "x", "y", "z"]);
    }

    #[test]
    fn only_first_payment_request_counts() {
        let order: SalesOrder = serde_json::from_value(serde_json::json!({
            "id": "so",
            "paymentRequests": [
                { "id": "newer-in-list-but-undated" },
                { "id": "older", "transactionDate": "2024-06-01" }
            ]
        }))
        .unwrap();
        assert_eq!(latest_payment_timestamp(&order), 0);
    }

    #[test]
    fn page_from_response_clamps_negative_totals() {
        let resp = PaginatedResponse::<SalesOrder> {
            data: vec![],
            total_pages: -1,
        };
        let page = Page::from_response(resp, 1, 10);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page_size, 10);
    }
}
