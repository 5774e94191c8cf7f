use url::Url;

use crate::types::ApprovalStatus;

use super::common::{Query, QueryCommon};

/// Query for `GET /payment-requests`. Defaults to pending requests, page 1.
#[derive(Clone, Debug)]
pub struct PaymentRequestQuery {
    pub common: QueryCommon,
    pub approval_status: Option<ApprovalStatus>,
}

impl Default for PaymentRequestQuery {
    fn default() -> Self {
        Self {
            common: QueryCommon::default(),
            approval_status: Some(ApprovalStatus::Pending),
        }
    }
}

impl Query for PaymentRequestQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(status) = self.approval_status {
            url.query_pairs_mut()
                .append_pair("approvalStatus", status.to_string().as_str());
        }
        self.common.add_to_url(&url)
    }
}

impl PaymentRequestQuery {
    pub fn with_approval_status(mut self, status: ApprovalStatus) -> Self {
        self.approval_status = Some(status);
        self
    }

    /// Drops the status filter so requests in every state are listed.
    pub fn with_any_status(mut self) -> Self {
        self.approval_status = None;
        self
    }
}
