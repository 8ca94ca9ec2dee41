// ABOUTME: Multipart upload of a rendered manifest to a zone's deployment endpoint.
// ABOUTME: Builds the request, optionally redirects it to the dry-run sink, and sends it.

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::path::PathBuf;

use crate::types::Zone;

use super::DeployError;

/// Filename the endpoint expects for the manifest part.
pub const MANIFEST_FILENAME: &str = "wadm.yaml";

/// Bearer credential sent instead of the real token during a dry run.
pub const DRY_RUN_TOKEN: &str = "dry-run";

/// The real destination of a zone's upload, reported before a dry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpload {
    pub zone: Zone,
    pub url: String,
    pub version: String,
    pub manifest: PathBuf,
}

/// A fully constructed upload, ready to send.
#[derive(Clone)]
pub struct UploadRequest {
    pub url: String,
    pub manifest: String,
    pub version: String,
    bearer: String,
}

impl std::fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadRequest")
            .field("url", &self.url)
            .field("version", &self.version)
            .field("manifest_bytes", &self.manifest.len())
            .finish()
    }
}

impl UploadRequest {
    pub fn new(
        url: impl Into<String>,
        token: impl Into<String>,
        manifest: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            manifest: manifest.into(),
            version: version.into(),
            bearer: token.into(),
        }
    }

    /// Point the request at `sink_url` and replace the token with a placeholder.
    pub fn into_dry_run(self, sink_url: &str) -> Self {
        Self {
            url: sink_url.to_string(),
            bearer: DRY_RUN_TOKEN.to_string(),
            ..self
        }
    }

    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.bearer)
    }

    fn form(&self) -> Form {
        let file = Part::bytes(self.manifest.clone().into_bytes()).file_name(MANIFEST_FILENAME);
        Form::new()
            .part("file", file)
            .text("version", self.version.clone())
    }

    /// POST the manifest. Any 2xx yields the response body; anything else is
    /// an upload error carrying status and body.
    pub async fn send(&self, client: &Client) -> Result<String, DeployError> {
        let response = client
            .post(&self.url)
            .bearer_auth(&self.bearer)
            .multipart(self.form())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(DeployError::Upload {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_swaps_destination_and_credential() {
        let request = UploadRequest::new(
            "https://eu1.betty.zone/deploy",
            "real.jwt.token",
            "name: app",
            "1.2.3",
        )
        .into_dry_run("https://httpbin.org/anything");

        assert_eq!(request.url, "https://httpbin.org/anything");
        assert_eq!(request.authorization(), "Bearer dry-run");
        assert_eq!(request.manifest, "name: app");
        assert_eq!(request.version, "1.2.3");
    }

    #[test]
    fn debug_hides_token() {
        let request = UploadRequest::new("https://x", "real.jwt.token", "m", "1");
        assert!(!format!("{request:?}").contains("real.jwt.token"));
    }
}
