use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// A sales order as returned by the payment-requests endpoint: one row of
/// the approvals list.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrder {
    #[serde(flatten)]
    pub key: RecordKey,

    pub order_number: Option<String>,

    #[serde(default, deserialize_with = "populated")]
    pub customer: Option<Customer>,

    #[serde(default, deserialize_with = "populated")]
    pub sales_executive: Option<SalesExecutive>,

    #[serde(default, deserialize_with = "populated")]
    pub warehouse: Option<Warehouse>,

    pub grand_total: Option<f64>,

    /// Most recent request first, as ordered by the backend.
    #[serde(default)]
    pub payment_requests: Vec<PaymentRequest>,
}

impl SalesOrder {
    pub fn id(&self) -> &str {
        self.key.get().unwrap_or_default()
    }

    /// The first payment request, whose transaction date is the order's
    /// "last payment date".
    pub fn latest_payment_request(&self) -> Option<&PaymentRequest> {
        self.payment_requests.first()
    }

    /// Customer display name, if the order carries a customer with any
    /// non-empty name field.
    pub fn customer_name(&self) -> Option<&str> {
        self.customer.as_ref().and_then(Customer::display_name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(flatten)]
    pub key: RecordKey,

    pub name: Option<String>,

    pub company_name: Option<String>,

    pub email: Option<String>,

    pub phone: Option<String>,
}

/// Customer fields that can stand in for a display name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CustomerField {
    Name,
    CompanyName,
    Email,
}

impl Customer {
    /// Candidates for [`Customer::display_name`], first non-empty wins.
    pub const DISPLAY_NAME_FIELDS: &'static [CustomerField] = &[
        CustomerField::Name,
        CustomerField::CompanyName,
        CustomerField::Email,
    ];

    pub fn field(&self, field: CustomerField) -> Option<&str> {
        match field {
            CustomerField::Name => self.name.as_deref(),
            CustomerField::CompanyName => self.company_name.as_deref(),
            CustomerField::Email => self.email.as_deref(),
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        first_non_empty(
            Self::DISPLAY_NAME_FIELDS
                .iter()
                .map(|field| self.field(*field)),
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SalesExecutive {
    #[serde(flatten)]
    pub key: RecordKey,

    pub name: Option<String>,

    pub email: Option<String>,
}

impl SalesExecutive {
    pub fn display_name(&self) -> Option<&str> {
        first_non_empty([self.name.as_deref(), self.email.as_deref()])
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    #[serde(flatten)]
    pub key: RecordKey,

    pub name: Option<String>,

    pub code: Option<String>,
}

impl Warehouse {
    pub fn display_name(&self) -> Option<&str> {
        first_non_empty([self.name.as_deref(), self.code.as_deref()])
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[serde(flatten)]
    pub key: RecordKey,

    pub amount: Option<f64>,

    /// Kept verbatim; the backend is not consistent about the format.
    pub transaction_date: Option<String>,

    pub payment_mode: Option<String>,

    pub reference_number: Option<String>,

    #[serde(default)]
    pub approval_status: ApprovalStatus,

    pub remarks: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ApprovalStatus::Pending => "Pending",
                ApprovalStatus::Approved => "Approved",
                ApprovalStatus::Rejected => "Rejected",
                ApprovalStatus::Unknown => "Unknown",
            }
        )
    }
}

impl FromStr for ApprovalStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ApprovalStatus::Pending),
            "approved" => Ok(ApprovalStatus::Approved),
            "rejected" => Ok(ApprovalStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// Body of `PATCH /payment-requests/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalUpdate {
    pub approval_status: ApprovalStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl ApprovalUpdate {
    pub fn approve() -> Self {
        Self {
            approval_status: ApprovalStatus::Approved,
            remarks: None,
        }
    }

    pub fn reject() -> Self {
        Self {
            approval_status: ApprovalStatus::Rejected,
            remarks: None,
        }
    }

    pub fn with_remarks(mut self, remarks: &str) -> Self {
        self.remarks = Some(remarks.to_string());
        self
    }
}

impl PaymentRequest {
    pub fn id(&self) -> &str {
        self.key.get().unwrap_or_default()
    }
}

/// Identifier of a backend record.
///
/// Documents normally carry `_id`; some also carry a virtual `id` copy.
/// Both are kept and `_id` wins.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordKey {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub underscored: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl RecordKey {
    pub fn get(&self) -> Option<&str> {
        first_non_empty([self.underscored.as_deref(), self.id.as_deref()])
    }
}

/// A reference that is either populated with the related document or left
/// as its bare id.
#[derive(Deserialize)]
#[serde(untagged)]
enum Reference<T> {
    Populated(T),
    Unpopulated(String),
}

/// Keeps populated references; a bare id carries nothing to display.
fn populated<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<Reference<T>>::deserialize(deserializer)? {
        Some(Reference::Populated(value)) => Some(value),
        Some(Reference::Unpopulated(id)) => {
            tracing::debug!("Reference {} was not populated", id);
            None
        }
        None => None,
    })
}

/// Returns the first candidate that is present and not blank.
pub fn first_non_empty<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}
