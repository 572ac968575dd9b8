use serde::{Deserialize, Serialize};

use kondi_util::errors::KondiResult;

use crate::coords::ArtifactCoords;

/// A dependency specification in Kondi.toml.
///
/// Supports both shorthand (`"group:artifact:version"`) and detailed forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependency {
    Short(String),
    Detailed(DetailedDependency),
}

/// A dependency with explicit coordinates and optional metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedDependency {
    pub coords: String,
    #[serde(default)]
    pub scope: Option<DependencyScope>,
    #[serde(default)]
    pub optional: bool,
}

impl Dependency {
    /// Parse the coordinates and apply defaults.
    pub fn to_declared(&self) -> KondiResult<DeclaredDependency> {
        match self {
            Dependency::Short(s) => Ok(DeclaredDependency::new(ArtifactCoords::parse(s)?)),
            Dependency::Detailed(d) => Ok(DeclaredDependency {
                coords: ArtifactCoords::parse(&d.coords)?,
                scope: d.scope.unwrap_or_default(),
                optional: d.optional,
            }),
        }
    }
}

/// Maven-compatible dependency scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyScope {
    #[default]
    Compile,
    Runtime,
    Provided,
    Test,
}

impl DependencyScope {
    /// Whether a dependency declared with this scope is followed when it is
    /// reached transitively.
    pub fn is_transitive(self) -> bool {
        matches!(self, DependencyScope::Compile | DependencyScope::Runtime)
    }
}

/// A direct dependency as declared by an artifact or by the project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclaredDependency {
    pub coords: ArtifactCoords,
    pub scope: DependencyScope,
    pub optional: bool,
}

impl DeclaredDependency {
    pub fn new(coords: ArtifactCoords) -> Self {
        Self {
            coords,
            scope: DependencyScope::Compile,
            optional: false,
        }
    }

    pub fn with_scope(mut self, scope: DependencyScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

impl From<ArtifactCoords> for DeclaredDependency {
    fn from(coords: ArtifactCoords) -> Self {
        Self::new(coords)
    }
}
