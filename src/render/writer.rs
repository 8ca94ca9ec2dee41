// ABOUTME: Persists rendered manifests to a deterministic per-zone path.
// ABOUTME: Serializes to YAML and overwrites any existing file.

use serde_yaml::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::{Environment, Zone};

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ManifestWriter {
    dir: PathBuf,
}

impl ManifestWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/wadm.<environment>.<zone>.yaml`
    pub fn path_for(&self, environment: Environment, zone: &Zone) -> PathBuf {
        self.dir.join(format!("wadm.{environment}.{zone}.yaml"))
    }

    /// Write `manifest` for the zone and return the file's path and contents.
    pub async fn write(
        &self,
        manifest: &Value,
        environment: Environment,
        zone: &Zone,
    ) -> Result<(PathBuf, String), WriteError> {
        let path = self.path_for(environment, zone);
        let yaml = serde_yaml::to_string(manifest)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| WriteError::Io {
                path: self.dir.clone(),
                source,
            })?;
        tokio::fs::write(&path, &yaml)
            .await
            .map_err(|source| WriteError::Io {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("wrote manifest to {}", path.display());
        Ok((path, yaml))
    }
}
