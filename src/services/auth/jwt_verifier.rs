//! Access token validation for resource services.
//!
//! Every service that accepts bearer tokens holds one [`JwtVerifier`]. The auth
//! service builds it straight from its signing key; the others download the JWK set
//! once at startup and refuse to start when it cannot be fetched.

use std::collections::HashMap;
use std::time::Duration;

use jsonwebtoken::{
    Algorithm, DecodingKey, Validation, decode, decode_header,
    errors::ErrorKind,
    jwk::{AlgorithmParameters, JwkSet},
};

use crate::core::errors::AppError;
use crate::domain::models::token::AccessTokenClaims;

pub struct JwtVerifier {
    keys: HashMap<String, DecodingKey>,
    issuer: String,
}

impl JwtVerifier {
    /// Collects the RSA keys of `jwks`. Keys without a `kid` or of another type are skipped.
    pub fn from_jwk_set(jwks: &JwkSet, issuer: String) -> Result<Self, AppError> {
        let mut keys = HashMap::new();

        for jwk in &jwks.keys {
            let (Some(kid), AlgorithmParameters::RSA(rsa)) = (&jwk.common.key_id, &jwk.algorithm)
            else {
                continue;
            };

            let key = DecodingKey::from_rsa_components(&rsa.n, &rsa.e).map_err(|e| {
                AppError::InternalError(format!("Invalid RSA key '{}' in JWK set: {}", kid, e))
            })?;
            keys.insert(kid.clone(), key);
        }

        if keys.is_empty() {
            return Err(AppError::InternalError(
                "JWK set contains no usable RSA keys".to_string(),
            ));
        }

        Ok(Self { keys, issuer })
    }

    /// Downloads the JWK set from `jwk_set_uri`.
    pub async fn fetch(jwk_set_uri: &str, issuer: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP client error: {}", e)))?;

        let response = client.get(jwk_set_uri).send().await.map_err(|e| {
            AppError::ExternalServiceError(format!("JWK set request to {} failed: {}", jwk_set_uri, e))
        })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "JWK set request to {} returned {}",
                jwk_set_uri,
                response.status()
            )));
        }

        let jwks: JwkSet = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Invalid JWK set from {}: {}", jwk_set_uri, e))
        })?;

        let verifier = Self::from_jwk_set(&jwks, issuer)?;
        log::info!("🔑 Loaded {} signing key(s) from {}", verifier.keys.len(), jwk_set_uri);
        Ok(verifier)
    }

    /// Checks signature, `exp`, `nbf` and `iss`. The audience is not enforced.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, AppError> {
        let header = decode_header(token)
            .map_err(|_| AppError::AuthenticationError("Invalid token".to_string()))?;

        let key = match header.kid {
            Some(kid) => self.keys.get(&kid),
            None if self.keys.len() == 1 => self.keys.values().next(),
            None => None,
        }
        .ok_or_else(|| AppError::AuthenticationError("Unknown signing key".to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_nbf = true;
        validation.validate_aud = false;

        decode::<AccessTokenClaims>(token, key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("Token expired".to_string())
                }
                ErrorKind::InvalidIssuer => {
                    AppError::AuthenticationError("Invalid token issuer".to_string())
                }
                _ => AppError::AuthenticationError("Invalid token".to_string()),
            })
    }
}

/// Token from an `Authorization: Bearer ...` header value.
pub fn extract_bearer_token(auth_header: &str) -> Result<&str, AppError> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::AuthenticationError("Invalid authorization header".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::jwt_rsa_service::test_keys::*;
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use rsa::pkcs1::{EncodeRsaPrivateKey, LineEnding};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sign_with_test_key(claims: &AccessTokenClaims, kid: &str) -> String {
        let pem = TEST_PRIVATE_KEY.to_pkcs1_pem(LineEnding::LF).unwrap();
        let key = EncodingKey::from_rsa_pem(pem.as_bytes()).unwrap();
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(kid.to_string());
        encode(&header, claims, &key).unwrap()
    }

    fn claims(iss: &str, exp_offset: i64) -> AccessTokenClaims {
        let now = Utc::now().timestamp();
        AccessTokenClaims {
            iss: iss.to_string(),
            sub: "alice".to_string(),
            aud: "shop-client".to_string(),
            iat: now,
            nbf: now,
            exp: now + exp_offset,
            jti: "jti".to_string(),
            scope: vec!["read".to_string()],
            user_id: Some(3),
        }
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let service = test_jwt_service();
        let token = sign_with_test_key(&claims(TEST_ISSUER, -3600), service.key_id());

        match service.verifier().unwrap().verify(&token) {
            Err(AppError::AuthenticationError(msg)) => assert_eq!(msg, "Token expired"),
            other => panic!("Expected expiry error, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_rejects_foreign_issuer() {
        let service = test_jwt_service();
        let token = sign_with_test_key(&claims("http://elsewhere", 3600), service.key_id());

        assert!(matches!(
            service.verifier().unwrap().verify(&token),
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[test]
    fn test_verify_rejects_unknown_kid_and_garbage() {
        let service = test_jwt_service();
        let verifier = service.verifier().unwrap();
        let token = sign_with_test_key(&claims(TEST_ISSUER, 3600), "other-key");

        match verifier.verify(&token) {
            Err(AppError::AuthenticationError(msg)) => assert_eq!(msg, "Unknown signing key"),
            other => panic!("Expected unknown key error, got {:?}", other),
        }
        assert!(verifier.verify("not-a-jwt").is_err());
    }

    #[test]
    fn test_from_jwk_set_requires_rsa_keys() {
        let jwks: JwkSet = serde_json::from_value(serde_json::json!({ "keys": [] })).unwrap();

        assert!(JwtVerifier::from_jwk_set(&jwks, TEST_ISSUER.to_string()).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert!(extract_bearer_token("Basic abc").is_err());
        assert!(extract_bearer_token("Bearer ").is_err());
    }

    #[actix_web::test]
    async fn test_fetch_downloads_jwks() {
        let service = test_jwt_service();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oauth2/jwks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(service.get_jwks()))
            .mount(&server)
            .await;

        let verifier = JwtVerifier::fetch(
            &format!("{}/oauth2/jwks", server.uri()),
            TEST_ISSUER.to_string(),
        )
        .await
        .unwrap();

        let token = service
            .issue_access_token("alice", 3, "shop-client", &[], 60)
            .unwrap();
        assert_eq!(verifier.verify(&token).unwrap().user_id, Some(3));
    }

    #[actix_web::test]
    async fn test_fetch_fails_when_jwks_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = JwtVerifier::fetch(
            &format!("{}/oauth2/jwks", server.uri()),
            TEST_ISSUER.to_string(),
        )
        .await;

        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }
}
