pub mod request;
pub mod response;

pub use request::{AuthorizeForm, AuthorizeRequest, TokenRequest};
pub use response::{ProviderMetadata, TokenResponse};
