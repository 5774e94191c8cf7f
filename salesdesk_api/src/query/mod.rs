mod common;
pub use self::common::{Query, QueryCommon};

mod payment_request;
pub use self::payment_request::PaymentRequestQuery;
