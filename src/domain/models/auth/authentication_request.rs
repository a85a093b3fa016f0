/// How the auth middleware treats a request without a valid token.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// Reject with 401.
    Required,
    /// Let it through without an identity.
    Optional,
}
