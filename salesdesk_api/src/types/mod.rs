mod meta;
pub use self::meta::{PaginatedResponse, Response};

mod sales_order;
pub use self::sales_order::{
    first_non_empty, ApprovalStatus, ApprovalUpdate, Customer, CustomerField, PaymentRequest, RecordKey,
    SalesExecutive, SalesOrder, Warehouse,
};
