// ABOUTME: Error types for a single zone's deployment.
// ABOUTME: Scoped to one zone; never affects sibling zones.

use crate::render::{ResolveError, WriteError};
use crate::sign::SignError;

/// Errors that can end a zone's deployment.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Variables could not be resolved for the zone.
    #[error("failed to resolve variables: {0}")]
    Resolution(#[from] ResolveError),

    /// The rendered manifest could not be written.
    #[error("{0}")]
    Write(#[from] WriteError),

    /// The signer did not issue a token.
    #[error("failed to sign token: {0}")]
    Signing(#[from] SignError),

    /// The deployment endpoint answered with a non-2xx status.
    #[error("failed to upload manifest: {status}, {body}")]
    Upload { status: u16, body: String },

    /// The upload request never produced a response.
    #[error("failed to upload manifest: {0}")]
    Transport(String),
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    ResolutionError,
    IoError,
    SigningError,
    UploadError,
}

impl DeployErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeployErrorKind::ResolutionError => "ResolutionError",
            DeployErrorKind::IoError => "IOError",
            DeployErrorKind::SigningError => "SigningError",
            DeployErrorKind::UploadError => "UploadError",
        }
    }
}

impl std::fmt::Display for DeployErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DeployError {
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::Resolution(_) => DeployErrorKind::ResolutionError,
            DeployError::Write(_) => DeployErrorKind::IoError,
            DeployError::Signing(_) => DeployErrorKind::SigningError,
            DeployError::Upload { .. } | DeployError::Transport(_) => DeployErrorKind::UploadError,
        }
    }

    /// Status and body of a rejected upload.
    pub fn upload_response(&self) -> Option<(u16, &str)> {
        match self {
            DeployError::Upload { status, body } => Some((*status, body)),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DeployError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DeployError::Transport(format!("request timed out: {err}"))
        } else {
            DeployError::Transport(err.to_string())
        }
    }
}
