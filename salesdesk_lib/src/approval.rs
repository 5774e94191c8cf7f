//! Row mutation: approving or rejecting a single payment request.

use salesdesk_api::types::{ApprovalStatus, ApprovalUpdate, PaymentRequest};
use salesdesk_api::Client;

use crate::error::DashboardError;
use crate::validation;

pub const MAX_REMARKS_LENGTH: usize = 500;

/// Sets the approval status of one payment request and returns the
/// updated request. Only `Approved` and `Rejected` are accepted.
pub async fn set_approval_status(
    client: &Client,
    payment_request_id: &str,
    status: ApprovalStatus,
    remarks: Option<&str>,
) -> Result<PaymentRequest, DashboardError> {
    let id = validation::validate_record_id(payment_request_id)?;
    let mut update = match status {
        ApprovalStatus::Approved => ApprovalUpdate::approve(),
        ApprovalStatus::Rejected => ApprovalUpdate::reject(),
        other => {
            return Err(DashboardError::InvalidInput(format!(
                "cannot set approval status to {}",
                other
            )))
        }
    };
    if let Some(remarks) = remarks {
        let remarks = validation::sanitize_text(remarks, MAX_REMARKS_LENGTH)?;
        if !remarks.is_empty() {
            update = update.with_remarks(&remarks);
        }
    }

    let resp = client.update_payment_request(&id, &update).await?;
    tracing::info!("Payment request {} marked {}", id, resp.data.approval_status);
    Ok(resp.data)
}
