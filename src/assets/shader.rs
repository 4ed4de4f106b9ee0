//! Shader program assets
//!
//! A shader program here is a *named bundle of stage source paths*, not a
//! compiled GPU object. Compilation belongs to the renderer; materials only
//! need a stable identity to bind parameters against and a recipe the
//! manifest can rebuild.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Pipeline stage a shader source file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
}

/// A shader program described by its per-stage source paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderProgram {
    /// Debug name shown in logs and tooling
    pub name: String,
    /// Source file per pipeline stage
    pub stages: BTreeMap<ShaderStage, PathBuf>,
}

impl ShaderProgram {
    /// Creates a program from `(stage, path)` pairs
    pub fn new<P: AsRef<Path>>(stages: impl IntoIterator<Item = (ShaderStage, P)>) -> Self {
        Self {
            name: String::new(),
            stages: stages
                .into_iter()
                .map(|(stage, path)| (stage, path.as_ref().to_path_buf()))
                .collect(),
        }
    }

    /// Builder pattern: set the debug name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Source path for a stage, if one was supplied
    pub fn stage(&self, stage: ShaderStage) -> Option<&Path> {
        self.stages.get(&stage).map(|p| p.as_path())
    }

    /// Deduplication key: identical stage maps mean the same program
    pub(crate) fn source_key(&self) -> String {
        let parts: Vec<String> = self
            .stages
            .iter()
            .map(|(stage, path)| format!("{:?}={}", stage, path.display()))
            .collect();
        format!("shader:{}", parts.join(";"))
    }
}
