//! OAuth2 authorization-code and refresh-token flows (RFC 6749, RFC 7636).
//!
//! ```text
//! GET  /oauth2/authorize  -> validate_authorization -> login form
//! POST /oauth2/authorize  -> validate_authorization -> UserService::authenticate
//!                         -> issue_authorization_code -> 302 redirect_uri?code=..&state=..
//! POST /oauth2/token      -> authenticate_client -> exchange -> TokenResponse
//! ```
//!
//! Codes and refresh tokens are random opaque strings whose state lives in the
//! [`AuthorizationRepository`]. Codes are single use; refresh tokens are reused until
//! they expire.

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose};
use chrono::Utc;
use rsa::rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};

use crate::{
    core::errors::AppError,
    domain::{
        dto::oauth::{AuthorizeRequest, ProviderMetadata, TokenRequest, TokenResponse},
        entities::users::User,
        models::{
            auth::AuthenticatedUser,
            oauth::{
                AuthorizationCodeGrant, ClientAuthMethod, GrantType, RefreshTokenRecord,
                RegisteredClient,
            },
        },
    },
    repositories::oauth::AuthorizationRepository,
    services::{auth::JwtRsaService, users::UserService},
};

const OPAQUE_TOKEN_BYTES: usize = 32;
const PKCE_METHOD_S256: &str = "S256";
const OPENID_SCOPE: &str = "openid";

/// An authorization request that passed every check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAuthorization {
    pub client_id: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub state: Option<String>,
    pub nonce: Option<String>,
    pub code_challenge: Option<String>,
}

/// Why an authorization request was refused.
#[derive(Debug)]
pub enum AuthorizeError {
    /// The client or redirect URI cannot be trusted, so the error is shown to the user.
    Rejected(AppError),
    /// Reported back to the client; the value is the redirect location.
    Redirect(String),
}

/// Client credentials as presented at the token endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub method: ClientAuthMethod,
}

impl ClientCredentials {
    /// Reads `client_secret_basic` from the `Authorization` header, falling back to
    /// `client_secret_post` form fields.
    pub fn extract(
        authorization_header: Option<&str>,
        request: &TokenRequest,
    ) -> Result<Self, AppError> {
        if let Some(header) = authorization_header {
            return Self::from_basic_header(header);
        }

        match (&request.client_id, &request.client_secret) {
            (Some(client_id), Some(client_secret)) => Ok(Self {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
                method: ClientAuthMethod::ClientSecretPost,
            }),
            _ => Err(invalid_client()),
        }
    }

    /// RFC 6749 §2.3.1: id and secret are form-urlencoded before being joined.
    fn from_basic_header(header: &str) -> Result<Self, AppError> {
        let encoded = header.strip_prefix("Basic ").ok_or_else(invalid_client)?;
        let decoded = general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|_| invalid_client())?;
        let decoded = String::from_utf8(decoded).map_err(|_| invalid_client())?;
        let (client_id, client_secret) = decoded.split_once(':').ok_or_else(invalid_client)?;

        let url_decode = |value: &str| {
            urlencoding::decode(&value.replace('+', " "))
                .map(|decoded| decoded.into_owned())
                .map_err(|_| invalid_client())
        };

        Ok(Self {
            client_id: url_decode(client_id)?,
            client_secret: url_decode(client_secret)?,
            method: ClientAuthMethod::ClientSecretBasic,
        })
    }
}

pub struct OAuth2Service {
    client: RegisteredClient,
    authorization_repo: Arc<dyn AuthorizationRepository>,
    user_service: Arc<UserService>,
    jwt_service: Arc<JwtRsaService>,
}

impl OAuth2Service {
    pub fn new(
        client: RegisteredClient,
        authorization_repo: Arc<dyn AuthorizationRepository>,
        user_service: Arc<UserService>,
        jwt_service: Arc<JwtRsaService>,
    ) -> Self {
        Self {
            client,
            authorization_repo,
            user_service,
            jwt_service,
        }
    }

    pub fn provider_metadata(&self) -> ProviderMetadata {
        ProviderMetadata::for_issuer(self.jwt_service.issuer(), &self.client.scopes)
    }

    /// Checks the client and redirect URI first; anything wrong after that is sent back
    /// to the client as an error redirect (RFC 6749 §4.1.2.1).
    pub fn validate_authorization(
        &self,
        request: &AuthorizeRequest,
    ) -> Result<ValidatedAuthorization, AuthorizeError> {
        let client_id = request.client_id.as_deref().ok_or_else(|| {
            AuthorizeError::Rejected(AppError::oauth2("invalid_request", "Missing client_id"))
        })?;

        if client_id != self.client.client_id {
            log::warn!("Authorization request for unknown client '{}'", client_id);
            return Err(AuthorizeError::Rejected(AppError::oauth2(
                "invalid_request",
                "Unknown client",
            )));
        }

        let redirect_uri = match request.redirect_uri.as_deref() {
            Some(uri) if self.client.has_redirect_uri(uri) => uri.to_string(),
            Some(uri) => {
                log::warn!("Unregistered redirect_uri '{}' for client '{}'", uri, client_id);
                return Err(AuthorizeError::Rejected(AppError::oauth2(
                    "invalid_request",
                    "Unregistered redirect_uri",
                )));
            }
            None if self.client.redirect_uris.len() == 1 => self.client.redirect_uris[0].clone(),
            None => {
                return Err(AuthorizeError::Rejected(AppError::oauth2(
                    "invalid_request",
                    "Missing redirect_uri",
                )));
            }
        };

        let state = request.state.clone();
        let redirect_error = |code: &str, description: &str| {
            AuthorizeError::Redirect(error_redirect(&redirect_uri, code, description, state.as_deref()))
        };

        match request.response_type.as_deref() {
            Some("code") => {}
            Some(_) => {
                return Err(redirect_error(
                    "unsupported_response_type",
                    "Only response_type=code is supported",
                ));
            }
            None => return Err(redirect_error("invalid_request", "Missing response_type")),
        }

        if !self.client.supports_grant(GrantType::AuthorizationCode) {
            return Err(redirect_error(
                "unauthorized_client",
                "Client may not use the authorization code grant",
            ));
        }

        let scopes = match self.client.resolve_scopes(request.scope.as_deref()) {
            Ok(scopes) => scopes,
            Err(_) => return Err(redirect_error("invalid_scope", "Requested scope is not allowed")),
        };

        let code_challenge = match (
            request.code_challenge.as_deref(),
            request.code_challenge_method.as_deref(),
        ) {
            (None, None) => None,
            (Some(challenge), Some(PKCE_METHOD_S256)) if !challenge.is_empty() => {
                Some(challenge.to_string())
            }
            (Some(_), Some(_)) | (Some(_), None) => {
                return Err(redirect_error(
                    "invalid_request",
                    "Only the S256 code_challenge_method is supported",
                ));
            }
            (None, Some(_)) => {
                return Err(redirect_error("invalid_request", "Missing code_challenge"));
            }
        };

        Ok(ValidatedAuthorization {
            client_id: client_id.to_string(),
            redirect_uri,
            scopes,
            state: request.state.clone(),
            nonce: request.nonce.clone(),
            code_challenge,
        })
    }

    /// Authenticates the resource owner from the login form.
    pub async fn authenticate_user(&self, username: &str, password: &str) -> Result<User, AppError> {
        self.user_service.authenticate(username, password).await
    }

    /// Stores a fresh code for `user` and returns the success redirect location.
    pub async fn issue_authorization_code(
        &self,
        authorization: &ValidatedAuthorization,
        user: &User,
    ) -> Result<String, AppError> {
        let user_id = user.id.ok_or_else(|| {
            AppError::InternalError(format!("User '{}' has no id", user.username))
        })?;

        let code = generate_opaque_token();
        let grant = AuthorizationCodeGrant {
            client_id: authorization.client_id.clone(),
            redirect_uri: authorization.redirect_uri.clone(),
            scopes: authorization.scopes.clone(),
            username: user.username.clone(),
            user_id,
            code_challenge: authorization.code_challenge.clone(),
            nonce: authorization.nonce.clone(),
            auth_time: Utc::now().timestamp(),
        };

        self.authorization_repo
            .save_code(&code, &grant, ttl(self.client.authorization_code_ttl_seconds))
            .await?;

        log::info!(
            "Authorization code issued to client '{}' for user '{}'",
            grant.client_id,
            grant.username
        );

        let mut params = vec![("code", code.as_str())];
        if let Some(state) = authorization.state.as_deref() {
            params.push(("state", state));
        }
        Ok(append_query(&authorization.redirect_uri, &params))
    }

    /// Verifies the presented credentials against the registered client.
    pub fn authenticate_client(
        &self,
        credentials: &ClientCredentials,
    ) -> Result<&RegisteredClient, AppError> {
        let client = &self.client;

        if credentials.client_id != client.client_id
            || !client.supports_auth_method(credentials.method)
            || !client.verify_secret(&credentials.client_secret)
        {
            log::warn!("Client authentication failed for '{}'", credentials.client_id);
            return Err(invalid_client());
        }

        Ok(client)
    }

    /// Token endpoint: authenticates the client, then runs the requested grant.
    pub async fn exchange(
        &self,
        credentials: &ClientCredentials,
        request: TokenRequest,
    ) -> Result<TokenResponse, AppError> {
        let client = self.authenticate_client(credentials)?;

        let grant_type = request
            .grant_type
            .as_deref()
            .ok_or_else(|| AppError::oauth2("invalid_request", "Missing grant_type"))?;
        let grant_type = GrantType::parse(grant_type).ok_or_else(|| {
            AppError::oauth2(
                "unsupported_grant_type",
                format!("Grant type '{}' is not supported", grant_type),
            )
        })?;

        if !client.supports_grant(grant_type) {
            return Err(AppError::oauth2(
                "unauthorized_client",
                format!("Client may not use the {} grant", grant_type),
            ));
        }

        match grant_type {
            GrantType::AuthorizationCode => self.exchange_authorization_code(client, request).await,
            GrantType::RefreshToken => self.exchange_refresh_token(client, request).await,
        }
    }

    async fn exchange_authorization_code(
        &self,
        client: &RegisteredClient,
        request: TokenRequest,
    ) -> Result<TokenResponse, AppError> {
        let code = request
            .code
            .as_deref()
            .ok_or_else(|| AppError::oauth2("invalid_request", "Missing code"))?;

        let grant = self
            .authorization_repo
            .take_code(code)
            .await?
            .ok_or_else(|| invalid_grant("Invalid or expired authorization code"))?;

        if grant.client_id != client.client_id {
            return Err(invalid_grant("Authorization code was issued to another client"));
        }

        if let Some(redirect_uri) = request.redirect_uri.as_deref() {
            if redirect_uri != grant.redirect_uri {
                return Err(invalid_grant("redirect_uri does not match the authorization request"));
            }
        }

        if let Some(challenge) = grant.code_challenge.as_deref() {
            let verifier = request
                .code_verifier
                .as_deref()
                .ok_or_else(|| invalid_grant("Missing code_verifier"))?;
            if pkce_s256_challenge(verifier) != challenge {
                return Err(invalid_grant("PKCE verification failed"));
            }
        }

        let refresh_token = generate_opaque_token();
        let record = RefreshTokenRecord {
            client_id: client.client_id.clone(),
            scopes: grant.scopes.clone(),
            username: grant.username.clone(),
            user_id: grant.user_id,
            auth_time: grant.auth_time,
            expires_at: Utc::now().timestamp() + client.refresh_token_ttl_seconds,
        };
        self.authorization_repo
            .save_refresh_token(&refresh_token, &record, ttl(client.refresh_token_ttl_seconds))
            .await?;

        log::info!(
            "Tokens issued to client '{}' for user '{}'",
            client.client_id,
            grant.username
        );

        self.token_response(client, &record, refresh_token, grant.nonce)
    }

    async fn exchange_refresh_token(
        &self,
        client: &RegisteredClient,
        request: TokenRequest,
    ) -> Result<TokenResponse, AppError> {
        let refresh_token = request
            .refresh_token
            .ok_or_else(|| AppError::oauth2("invalid_request", "Missing refresh_token"))?;

        let mut record = self
            .authorization_repo
            .find_refresh_token(&refresh_token)
            .await?
            .filter(|record| !record.is_expired(Utc::now().timestamp()))
            .ok_or_else(|| invalid_grant("Invalid or expired refresh token"))?;

        if record.client_id != client.client_id {
            return Err(invalid_grant("Refresh token was issued to another client"));
        }

        let requested: Vec<String> = request
            .scope
            .as_deref()
            .map(|scope| scope.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        if !requested.is_empty() {
            if let Some(extra) = requested.iter().find(|scope| !record.scopes.contains(scope)) {
                return Err(AppError::oauth2(
                    "invalid_scope",
                    format!("Scope '{}' was not granted", extra),
                ));
            }
            record.scopes = requested;
        }

        log::debug!("Access token refreshed for user '{}'", record.username);

        self.token_response(client, &record, refresh_token, None)
    }

    fn token_response(
        &self,
        client: &RegisteredClient,
        record: &RefreshTokenRecord,
        refresh_token: String,
        nonce: Option<String>,
    ) -> Result<TokenResponse, AppError> {
        let access_token = self.jwt_service.issue_access_token(
            &record.username,
            record.user_id,
            &client.client_id,
            &record.scopes,
            client.access_token_ttl_seconds,
        )?;

        let id_token = if record.scopes.iter().any(|scope| scope == OPENID_SCOPE) {
            Some(self.jwt_service.issue_id_token(
                &record.username,
                &client.client_id,
                record.auth_time,
                nonce,
                client.access_token_ttl_seconds,
            )?)
        } else {
            None
        };

        Ok(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: client.access_token_ttl_seconds,
            refresh_token,
            scope: record.scopes.join(" "),
            id_token,
        })
    }

    /// OpenID Connect userinfo for the bearer of an access token.
    pub async fn userinfo(&self, user: &AuthenticatedUser) -> Result<serde_json::Value, AppError> {
        let mut info = serde_json::json!({ "sub": user.username });

        if let Some(user_id) = user.user_id {
            info["userId"] = serde_json::json!(user_id);
            if let Ok(account) = self.user_service.get_user_by_id(user_id).await {
                info["email"] = serde_json::json!(account.email);
            }
        }

        Ok(info)
    }
}

fn invalid_client() -> AppError {
    AppError::oauth2("invalid_client", "Client authentication failed")
}

fn invalid_grant(description: &str) -> AppError {
    AppError::oauth2("invalid_grant", description)
}

fn ttl(seconds: i64) -> u64 {
    u64::try_from(seconds).unwrap_or(0).max(1)
}

fn generate_opaque_token() -> String {
    let mut bytes = [0u8; OPAQUE_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// `BASE64URL(SHA256(code_verifier))` (RFC 7636 §4.2).
pub fn pkce_s256_challenge(code_verifier: &str) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(Sha256::digest(code_verifier.as_bytes()))
}

fn append_query(uri: &str, params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    let separator = if uri.contains('?') { '&' } else { '?' };
    format!("{}{}{}", uri, separator, query)
}

fn error_redirect(redirect_uri: &str, code: &str, description: &str, state: Option<&str>) -> String {
    let mut params = vec![("error", code), ("error_description", description)];
    if let Some(state) = state {
        params.push(("state", state));
    }
    append_query(redirect_uri, &params)
}
