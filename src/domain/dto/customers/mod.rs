pub mod request;
pub mod response;

pub use request::{CreateCustomerRequest, UpdateCustomerRequest};
pub use response::CustomerResponse;
