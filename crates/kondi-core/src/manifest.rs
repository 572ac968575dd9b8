use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use kondi_util::errors::{KondiError, KondiResult};

use crate::artifact::Artifact;
use crate::config::ResolveConfig;
use crate::coords::ArtifactCoords;
use crate::dependency::{DeclaredDependency, Dependency, DependencyScope};
use crate::registry::{ArtifactRegistry, RegistryBuilder};

/// The parsed representation of a `Kondi.toml` file.
///
/// Besides the project's own dependencies, the manifest carries the metadata
/// of every artifact the resolution may reach (`[[artifact]]`), as handed over
/// by whatever fetched it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub project: ProjectMetadata,

    #[serde(default)]
    pub resolve: Option<ResolveConfig>,

    #[serde(default)]
    pub dependencies: BTreeMap<String, Dependency>,

    #[serde(default, rename = "dev-dependencies")]
    pub dev_dependencies: BTreeMap<String, Dependency>,

    #[serde(default, rename = "artifact")]
    pub artifacts: Vec<ArtifactEntry>,
}

/// Project identity from the `[project]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub group: String,
    pub name: String,
    pub version: String,
}

/// One `[[artifact]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactEntry {
    pub coords: String,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default)]
    pub extension: Option<ExtensionEntry>,
}

/// Extension metadata from `[artifact.extension]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtensionEntry {
    #[serde(default)]
    pub deployment: Option<String>,
    #[serde(default, rename = "dependency-condition")]
    pub dependency_condition: Vec<String>,
    #[serde(default, rename = "conditional-dependencies")]
    pub conditional_dependencies: Vec<String>,
    #[serde(default, rename = "conditional-dev-dependencies")]
    pub conditional_dev_dependencies: Vec<String>,
}

impl Manifest {
    /// Load and parse a `Kondi.toml` file from the given path.
    pub fn from_path(path: &Path) -> KondiResult<Self> {
        let content = kondi_util::fs::read_manifest_file(path)?;
        Self::from_str(&content)
    }

    /// Parse a `Kondi.toml` from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> KondiResult<Self> {
        toml::from_str(content).map_err(|e| KondiError::Manifest {
            message: format!("Failed to parse Kondi.toml: {e}"),
        })
    }

    /// Coordinates of the project itself.
    pub fn project_coords(&self) -> ArtifactCoords {
        ArtifactCoords::new(
            self.project.group.clone(),
            self.project.name.clone(),
            self.project.version.clone(),
        )
    }

    /// The project's direct dependencies; `[dev-dependencies]` are test-scoped.
    pub fn root_dependencies(&self) -> KondiResult<Vec<DeclaredDependency>> {
        let mut deps = Vec::new();
        for dep in self.dependencies.values() {
            deps.push(dep.to_declared()?);
        }
        for dep in self.dev_dependencies.values() {
            deps.push(dep.to_declared()?.with_scope(DependencyScope::Test));
        }
        Ok(deps)
    }

    /// Build the artifact registry from the `[[artifact]]` entries.
    pub fn registry(&self) -> KondiResult<ArtifactRegistry> {
        let mut builder = RegistryBuilder::new();
        for entry in &self.artifacts {
            builder.install(entry.to_artifact()?)?;
        }
        builder.build()
    }
}

impl ArtifactEntry {
    fn to_artifact(&self) -> KondiResult<Artifact> {
        let coords = ArtifactCoords::parse(&self.coords)?;
        let mut artifact = match &self.extension {
            Some(_) => Artifact::extension(coords),
            None => Artifact::library(coords),
        };
        for dep in &self.dependencies {
            artifact.add_dependency(dep.to_declared()?);
        }
        if let Some(ext) = &self.extension {
            if let Some(deployment) = &ext.deployment {
                artifact.set_deployment(ArtifactCoords::parse(deployment)?);
            }
            if !ext.dependency_condition.is_empty() {
                artifact.set_dependency_condition(parse_all(&ext.dependency_condition)?);
            }
            artifact.set_conditional_dependencies(parse_all(&ext.conditional_dependencies)?);
            artifact
                .set_conditional_dev_dependencies(parse_all(&ext.conditional_dev_dependencies)?);
        }
        Ok(artifact)
    }
}

fn parse_all(values: &[String]) -> KondiResult<Vec<ArtifactCoords>> {
    values.iter().map(|v| ArtifactCoords::parse(v)).collect()
}
