// ABOUTME: HS256 JWT signer keyed by per-zone shared secrets.
// ABOUTME: Tokens are short-lived and carry the issuer, zone audience and application id.

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::SignerCredentials;
use crate::types::Zone;

use super::{Claims, SignError, TokenSigner};

/// Payload of a signed deployment token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedClaims {
    pub iss: String,
    pub aud: String,
    pub application_id: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct JwtSigner {
    credentials: SignerCredentials,
    ttl: Duration,
}

impl JwtSigner {
    pub fn new(credentials: SignerCredentials, ttl: Duration) -> Self {
        Self { credentials, ttl }
    }

    pub fn issue(&self, zone: &Zone, claims: &Claims) -> Result<String, SignError> {
        let secret = self
            .credentials
            .secret_for(zone)
            .ok_or_else(|| SignError::UnknownService(zone.clone()))?;

        let iat = Utc::now().timestamp();
        let payload = SignedClaims {
            iss: self.credentials.issuer().to_string(),
            aud: zone.to_string(),
            application_id: claims.application_id.clone(),
            iat,
            exp: iat + self.ttl.as_secs() as i64,
        };

        let token = encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;
        Ok(token)
    }
}

#[async_trait]
impl TokenSigner for JwtSigner {
    async fn sign(&self, zone: &Zone, claims: &Claims) -> Result<String, SignError> {
        self.issue(zone, claims)
    }
}
