// ABOUTME: Token signing capability used to authorize uploads.
// ABOUTME: Defines the signer trait, claim set, and the HS256 JWT implementation.

mod jwt;

pub use jwt::{JwtSigner, SignedClaims};

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::types::Zone;

#[derive(Debug, Error)]
pub enum SignError {
    #[error("no signing secret configured for zone {0}")]
    UnknownService(Zone),

    #[error("failed to encode token: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),

    #[error("signing timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Rejected(String),
}

/// Claims requested for a deployment token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub application_id: String,
}

impl Claims {
    pub fn new(application_id: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
        }
    }
}

/// Issues an authorization token for a zone.
#[async_trait]
pub trait TokenSigner: Send + Sync {
    async fn sign(&self, zone: &Zone, claims: &Claims) -> Result<String, SignError>;
}
