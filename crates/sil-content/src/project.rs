//! Project catalog.
//!
//! A hand-authored YAML list of projects, shown on the projects page.

use std::path::{Path, PathBuf};

use serde::Deserialize;

const GITHUB_PREFIX: &str = "https://github.com/";

/// Project maturity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Production,
    Research,
    Alpha,
    Specification,
    Planned,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Research => "research",
            Self::Alpha => "alpha",
            Self::Specification => "specification",
            Self::Planned => "planned",
        }
    }
}

/// Layer of the Semantic OS architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub enum Layer {
    #[serde(rename = "layer-0")]
    SemanticMemory,
    #[serde(rename = "layer-1")]
    SemanticIr,
    #[serde(rename = "layer-2")]
    DomainModules,
    #[serde(rename = "layer-3")]
    Orchestration,
    #[serde(rename = "layer-4")]
    DeterministicEngines,
    #[serde(rename = "layer-5")]
    HumanInterfaces,
    #[serde(rename = "cross-cutting")]
    CrossCutting,
}

impl Layer {
    /// All layers in display order.
    pub const ALL: [Self; 7] = [
        Self::SemanticMemory,
        Self::SemanticIr,
        Self::DomainModules,
        Self::Orchestration,
        Self::DeterministicEngines,
        Self::HumanInterfaces,
        Self::CrossCutting,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SemanticMemory => "Semantic Memory",
            Self::SemanticIr => "Universal Semantic IR",
            Self::DomainModules => "Domain Modules",
            Self::Orchestration => "Multi-Agent Orchestration",
            Self::DeterministicEngines => "Deterministic Engines",
            Self::HumanInterfaces => "Human Interfaces / SIM",
            Self::CrossCutting => "Cross-Cutting Infrastructure",
        }
    }
}

/// A production system or research initiative.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    pub layer: Layer,
    pub github_url: Option<String>,
    pub version: Option<String>,
    pub tests: Option<u32>,
    pub coverage: Option<u8>,
    pub pypi_url: Option<String>,
    #[serde(default)]
    pub innovations: Vec<String>,
    #[serde(default)]
    pub use_cases: Vec<String>,
    #[serde(default, alias = "is_private")]
    pub private: bool,
    pub maturity_note: Option<String>,
}

impl Project {
    /// Check required fields and the repository URL.
    pub fn validate(&self) -> Result<(), ProjectError> {
        let invalid = |reason: &str| ProjectError::Invalid {
            project: if self.name.is_empty() {
                self.slug.clone()
            } else {
                self.name.clone()
            },
            reason: reason.to_owned(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name is required"));
        }
        if self.slug.trim().is_empty() {
            return Err(invalid("slug is required"));
        }
        if let Some(url) = &self.github_url
            && !url.starts_with(GITHUB_PREFIX)
        {
            return Err(invalid("github_url must start with https://github.com/"));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.status == ProjectStatus::Production
    }

    /// Whether both test count and coverage are known.
    pub fn has_stats(&self) -> bool {
        self.tests.is_some() && self.coverage.is_some()
    }
}

/// Project catalog error.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid project catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid project {project}: {reason}")]
    Invalid { project: String, reason: String },
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    projects: Vec<Project>,
}

/// Validated list of projects.
#[derive(Debug, Clone, Default)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

impl ProjectCatalog {
    /// Parse a catalog from YAML with a top-level `projects` list.
    pub fn from_yaml(yaml: &str) -> Result<Self, ProjectError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        for project in &file.projects {
            project.validate()?;
        }
        Ok(Self {
            projects: file.projects,
        })
    }

    /// Load a catalog file. No path, or a missing file, gives an empty catalog.
    pub fn load(path: Option<&Path>) -> Result<Self, ProjectError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Project catalog not found");
            return Ok(Self::default());
        }
        let yaml = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Non-private projects.
    pub fn public(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| !p.private)
    }

    /// Non-private projects grouped by layer, empty layers omitted.
    pub fn public_by_layer(&self) -> Vec<(Layer, Vec<&Project>)> {
        Layer::ALL
            .into_iter()
            .map(|layer| (layer, self.public().filter(|p| p.layer == layer).collect::<Vec<_>>()))
            .filter(|(_, projects)| !projects.is_empty())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
