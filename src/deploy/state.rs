// ABOUTME: Per-zone deployment state markers for the type state pattern.
// ABOUTME: Each state carries the artifact produced by the step that reached it.

use serde_yaml::Value;
use std::fmt;
use std::path::PathBuf;

use crate::render::VariableSet;

/// Initial state: nothing computed yet.
/// Available actions: `resolve()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Pending;

/// Variables resolved for the zone.
/// Available actions: `render()`
#[derive(Debug, Clone)]
pub struct Resolved {
    pub(crate) variables: VariableSet,
}

/// Template rendered into a zone-specific manifest.
/// Available actions: `write()`
#[derive(Debug, Clone)]
pub struct Rendered {
    pub(crate) manifest: Value,
}

/// Manifest persisted on disk.
/// Available actions: `sign()`
#[derive(Debug, Clone)]
pub struct Written {
    pub(crate) path: PathBuf,
    pub(crate) contents: String,
}

/// Authorization token issued for the zone.
/// Available actions: `upload()`
#[derive(Clone)]
pub struct Signed {
    pub(crate) path: PathBuf,
    pub(crate) contents: String,
    pub(crate) token: String,
}

impl fmt::Debug for Signed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signed")
            .field("path", &self.path)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// The step a zone was in when it finished, used when reporting failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeployStage {
    Resolving,
    Writing,
    Signing,
    Uploading,
}

impl DeployStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeployStage::Resolving => "resolving",
            DeployStage::Writing => "writing",
            DeployStage::Signing => "signing",
            DeployStage::Uploading => "uploading",
        }
    }
}

impl fmt::Display for DeployStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
