//! OAuth2 client registration.

use std::fmt;

use crate::config::{JwtConfig, OAuthClientConfig};
use crate::core::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientAuthMethod {
    /// Credentials in an HTTP Basic `Authorization` header.
    ClientSecretBasic,
    /// Credentials as `client_id` / `client_secret` form fields.
    ClientSecretPost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    AuthorizationCode,
    RefreshToken,
}

impl GrantType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "authorization_code" => Some(GrantType::AuthorizationCode),
            "refresh_token" => Some(GrantType::RefreshToken),
            _ => None,
        }
    }
}

impl fmt::Display for GrantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrantType::AuthorizationCode => write!(f, "authorization_code"),
            GrantType::RefreshToken => write!(f, "refresh_token"),
        }
    }
}

/// A confidential client allowed to obtain tokens.
#[derive(Debug, Clone)]
pub struct RegisteredClient {
    pub client_id: String,
    /// bcrypt hash of the client secret.
    pub client_secret_hash: String,
    pub auth_methods: Vec<ClientAuthMethod>,
    pub grant_types: Vec<GrantType>,
    pub redirect_uris: Vec<String>,
    pub scopes: Vec<String>,
    pub access_token_ttl_seconds: i64,
    pub refresh_token_ttl_seconds: i64,
    pub authorization_code_ttl_seconds: i64,
}

impl RegisteredClient {
    /// The shop's web client, built from [`OAuthClientConfig`] and [`JwtConfig`].
    pub fn from_config(bcrypt_cost: u32) -> Result<Self, AppError> {
        Self::new(
            &OAuthClientConfig::client_id(),
            &OAuthClientConfig::client_secret(),
            vec![OAuthClientConfig::redirect_uri()],
            OAuthClientConfig::scopes(),
            bcrypt_cost,
        )
        .map(|client| Self {
            access_token_ttl_seconds: JwtConfig::access_token_ttl_seconds(),
            refresh_token_ttl_seconds: JwtConfig::refresh_token_ttl_seconds(),
            authorization_code_ttl_seconds: JwtConfig::authorization_code_ttl_seconds(),
            ..client
        })
    }

    /// Client with both auth methods, both grant types and default lifetimes
    /// (1 hour access, 7 days refresh, 5 minutes code).
    pub fn new(
        client_id: &str,
        client_secret: &str,
        redirect_uris: Vec<String>,
        scopes: Vec<String>,
        bcrypt_cost: u32,
    ) -> Result<Self, AppError> {
        let client_secret_hash = bcrypt::hash(client_secret, bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("Failed to hash client secret: {}", e)))?;

        Ok(Self {
            client_id: client_id.to_string(),
            client_secret_hash,
            auth_methods: vec![
                ClientAuthMethod::ClientSecretBasic,
                ClientAuthMethod::ClientSecretPost,
            ],
            grant_types: vec![GrantType::AuthorizationCode, GrantType::RefreshToken],
            redirect_uris,
            scopes,
            access_token_ttl_seconds: 3600,
            refresh_token_ttl_seconds: 7 * 24 * 3600,
            authorization_code_ttl_seconds: 300,
        })
    }

    pub fn supports_auth_method(&self, method: ClientAuthMethod) -> bool {
        self.auth_methods.contains(&method)
    }

    pub fn supports_grant(&self, grant: GrantType) -> bool {
        self.grant_types.contains(&grant)
    }

    /// Exact string match, as RFC 6749 §3.1.2.3 requires for registered URIs.
    pub fn has_redirect_uri(&self, redirect_uri: &str) -> bool {
        self.redirect_uris.iter().any(|uri| uri == redirect_uri)
    }

    pub fn verify_secret(&self, secret: &str) -> bool {
        bcrypt::verify(secret, &self.client_secret_hash).unwrap_or(false)
    }

    /// Parses a space separated scope string against the registered scopes.
    ///
    /// An absent or empty request yields every registered scope.
    pub fn resolve_scopes(&self, requested: Option<&str>) -> Result<Vec<String>, AppError> {
        let requested: Vec<String> = requested
            .map(|scope| scope.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        if requested.is_empty() {
            return Ok(self.scopes.clone());
        }

        match requested.iter().find(|scope| !self.scopes.contains(scope)) {
            Some(unknown) => Err(AppError::oauth2(
                "invalid_scope",
                format!("Scope '{}' is not allowed for this client", unknown),
            )),
            None => Ok(requested),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RegisteredClient {
        RegisteredClient::new(
            "shop-client",
            "shop-secret",
            vec!["http://localhost/cb".to_string()],
            vec!["openid".to_string(), "read".to_string()],
            4,
        )
        .unwrap()
    }

    #[test]
    fn test_secret_is_hashed_and_verifiable() {
        let client = client();

        assert_ne!(client.client_secret_hash, "shop-secret");
        assert!(client.verify_secret("shop-secret"));
        assert!(!client.verify_secret("wrong"));
    }

    #[test]
    fn test_resolve_scopes() {
        let client = client();

        assert_eq!(client.resolve_scopes(None).unwrap(), vec!["openid", "read"]);
        assert_eq!(client.resolve_scopes(Some("read")).unwrap(), vec!["read"]);
        assert!(matches!(
            client.resolve_scopes(Some("read admin")),
            Err(AppError::OAuth2Error { ref code, .. }) if code == "invalid_scope"
        ));
    }

    #[test]
    fn test_redirect_uri_must_match_exactly() {
        let client = client();

        assert!(client.has_redirect_uri("http://localhost/cb"));
        assert!(!client.has_redirect_uri("http://localhost/cb/"));
    }

    #[test]
    fn test_grant_type_parse() {
        assert_eq!(
            GrantType::parse("authorization_code"),
            Some(GrantType::AuthorizationCode)
        );
        assert_eq!(GrantType::parse("password"), None);
        assert_eq!(GrantType::RefreshToken.to_string(), "refresh_token");
    }
}
