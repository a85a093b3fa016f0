//! RS256 token signing for the authorization server.
//!
//! Owns the RSA key pair, signs access and ID tokens and publishes the public half as
//! a JWK set so resource services can verify tokens on their own.
//!
//! # Keys
//!
//! Loaded from `JWT_PRIVATE_KEY_PATH` (PKCS#1 PEM) and `JWT_PUBLIC_KEY_PATH` (SPKI PEM).
//! When either file is missing a new 2048-bit pair is generated and written there.
//!
//! ```bash
//! openssl genrsa -traditional -out jwt_private_key.pem 2048
//! openssl rsa -in jwt_private_key.pem -pubout -out jwt_public_key.pem
//! ```
//!
//! The `kid` is derived from the public key, so it only changes when the key does.
//!
//! # Usage
//!
//! ```rust,ignore
//! use shop_services::services::auth::JwtRsaService;
//!
//! let jwt_service = JwtRsaService::from_config()?;
//! let token = jwt_service.issue_access_token("alice", 7, "shop-client", &scopes, 3600)?;
//! let jwks = jwt_service.get_jwks();
//! let verifier = jwt_service.verifier()?;
//! ```

use std::fs;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode, jwk::JwkSet};
use rsa::{
    RsaPrivateKey, RsaPublicKey,
    pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey},
    pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding},
    traits::PublicKeyParts,
};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::core::errors::{AppError, ErrorContext};
use crate::domain::models::token::{AccessTokenClaims, IdTokenClaims};
use crate::services::auth::JwtVerifier;

const KEY_ID_LENGTH: usize = 16;

pub struct JwtRsaService {
    encoding_key: EncodingKey,
    public_key: RsaPublicKey,
    key_id: String,
    issuer: String,
}

impl JwtRsaService {
    /// Loads (or generates) the key pair at the configured paths for [`JwtConfig::issuer`].
    pub fn from_config() -> Result<Self, AppError> {
        Self::load_or_generate(
            &JwtConfig::private_key_path(),
            &JwtConfig::public_key_path(),
            JwtConfig::issuer(),
        )
    }

    pub fn load_or_generate(
        private_key_path: &str,
        public_key_path: &str,
        issuer: String,
    ) -> Result<Self, AppError> {
        if !Path::new(private_key_path).exists() || !Path::new(public_key_path).exists() {
            log::info!("🔑 JWT keys not found. Generating new RSA key pair...");
            Self::generate_rsa_keys(private_key_path, public_key_path)?;
            log::info!("✅ JWT RSA keys generated successfully");
        } else {
            log::info!("🔑 Loading existing JWT RSA keys");
        }

        let private_key_pem = fs::read_to_string(private_key_path)
            .with_context(|| format!("Failed to read private key file '{}'", private_key_path))?;
        let public_key_pem = fs::read_to_string(public_key_path)
            .with_context(|| format!("Failed to read public key file '{}'", public_key_path))?;

        let private_key =
            RsaPrivateKey::from_pkcs1_pem(&private_key_pem).context("Invalid private key")?;
        let public_key =
            RsaPublicKey::from_public_key_pem(&public_key_pem).context("Invalid public key")?;

        if private_key.to_public_key() != public_key {
            return Err(AppError::InternalError(format!(
                "Public key '{}' does not belong to private key '{}'",
                public_key_path, private_key_path
            )));
        }

        Self::from_private_key(&private_key, issuer)
    }

    pub fn from_private_key(private_key: &RsaPrivateKey, issuer: String) -> Result<Self, AppError> {
        let private_key_pem = private_key
            .to_pkcs1_pem(LineEnding::LF)
            .context("Failed to encode private key")?;
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .context("Failed to build signing key")?;

        let public_key = private_key.to_public_key();
        let key_id = Self::derive_key_id(&public_key)?;

        Ok(Self {
            encoding_key,
            public_key,
            key_id,
            issuer,
        })
    }

    fn generate_rsa_keys(private_key_path: &str, public_key_path: &str) -> Result<(), AppError> {
        for path in [private_key_path, public_key_path] {
            if let Some(parent) = Path::new(path).parent() {
                fs::create_dir_all(parent).context("Failed to create key directory")?;
            }
        }

        let private_key = RsaPrivateKey::new(&mut rsa::rand_core::OsRng, 2048)
            .context("RSA key generation failed")?;
        let public_key = private_key.to_public_key();

        let private_key_pem = private_key
            .to_pkcs1_pem(LineEnding::LF)
            .context("Failed to encode private key")?;
        fs::write(private_key_path, private_key_pem.as_bytes())
            .context("Failed to write private key")?;

        let public_key_pem = public_key
            .to_public_key_pem(LineEnding::LF)
            .context("Failed to encode public key")?;
        fs::write(public_key_path, public_key_pem.as_bytes())
            .context("Failed to write public key")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(private_key_path, fs::Permissions::from_mode(0o600))
                .context("Failed to restrict private key permissions")?;
            fs::set_permissions(public_key_path, fs::Permissions::from_mode(0o644))
                .context("Failed to set public key permissions")?;
        }

        log::info!("📁 Private key saved: {}", private_key_path);
        log::info!("📁 Public key saved: {}", public_key_path);

        Ok(())
    }

    /// base64url(SHA-256(SPKI DER)), truncated.
    fn derive_key_id(public_key: &RsaPublicKey) -> Result<String, AppError> {
        let der = public_key
            .to_public_key_der()
            .context("Failed to encode public key")?;
        let digest = Sha256::digest(der.as_bytes());
        let mut key_id = general_purpose::URL_SAFE_NO_PAD.encode(digest);
        key_id.truncate(KEY_ID_LENGTH);
        Ok(key_id)
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Signs an access token for `username` valid for `ttl_seconds`.
    pub fn issue_access_token(
        &self,
        username: &str,
        user_id: i64,
        client_id: &str,
        scopes: &[String],
        ttl_seconds: i64,
    ) -> Result<String, AppError> {
        let now = Utc::now().timestamp();

        let claims = AccessTokenClaims {
            iss: self.issuer.clone(),
            sub: username.to_string(),
            aud: client_id.to_string(),
            iat: now,
            nbf: now,
            exp: now + ttl_seconds,
            jti: Uuid::new_v4().to_string(),
            scope: scopes.to_vec(),
            user_id: Some(user_id),
        };

        self.sign(&claims)
    }

    /// Signs an OpenID Connect ID token.
    pub fn issue_id_token(
        &self,
        username: &str,
        client_id: &str,
        auth_time: i64,
        nonce: Option<String>,
        ttl_seconds: i64,
    ) -> Result<String, AppError> {
        let now = Utc::now().timestamp();

        let claims = IdTokenClaims {
            iss: self.issuer.clone(),
            sub: username.to_string(),
            aud: client_id.to_string(),
            azp: client_id.to_string(),
            iat: now,
            exp: now + ttl_seconds,
            auth_time,
            nonce,
        };

        self.sign(&claims)
    }

    fn sign<T: Serialize>(&self, claims: &T) -> Result<String, AppError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.key_id.clone());

        encode(&header, claims, &self.encoding_key).context("Token signing failed")
    }

    /// Public key as a JWK set.
    pub fn get_jwks(&self) -> serde_json::Value {
        let n = general_purpose::URL_SAFE_NO_PAD.encode(self.public_key.n().to_bytes_be());
        let e = general_purpose::URL_SAFE_NO_PAD.encode(self.public_key.e().to_bytes_be());

        serde_json::json!({
            "keys": [{
                "kty": "RSA",
                "use": "sig",
                "kid": self.key_id,
                "alg": "RS256",
                "n": n,
                "e": e
            }]
        })
    }

    /// Verifier for tokens this service signs, without a round trip through HTTP.
    pub fn verifier(&self) -> Result<JwtVerifier, AppError> {
        let jwks: JwkSet =
            serde_json::from_value(self.get_jwks()).context("Failed to build JWK set")?;
        JwtVerifier::from_jwk_set(&jwks, self.issuer.clone())
    }
}

#[cfg(test)]
pub(crate) mod test_keys {
    use std::sync::Arc;

    use once_cell::sync::Lazy;
    use rsa::RsaPrivateKey;

    use super::JwtRsaService;

    pub const TEST_ISSUER: &str = "http://auth.test";

    /// Key generation is slow, so all tests share one key.
    pub static TEST_PRIVATE_KEY: Lazy<RsaPrivateKey> = Lazy::new(|| {
        RsaPrivateKey::new(&mut rsa::rand_core::OsRng, 2048).expect("test key generation")
    });

    pub fn test_jwt_service() -> Arc<JwtRsaService> {
        Arc::new(
            JwtRsaService::from_private_key(&TEST_PRIVATE_KEY, TEST_ISSUER.to_string())
                .expect("test jwt service"),
        )
    }

    /// Signs arbitrary claims with the test key, for tokens the service would never issue.
    pub fn sign_test_claims(claims: &serde_json::Value) -> String {
        test_jwt_service().sign(claims).expect("test token")
    }
}
