//! Arena of artifacts keyed by coordinates.
//!
//! Artifacts refer to each other (dependencies, deployment counterparts,
//! triggers, conditional dependencies) only by coordinates, so cyclic
//! references between extensions are plain data. [`RegistryBuilder::build`]
//! checks that every reference points at an installed artifact.

use std::collections::BTreeMap;
use std::fmt;

use kondi_util::errors::{KondiError, KondiResult};

use crate::artifact::Artifact;
use crate::coords::ArtifactCoords;

/// What a coordinate reference is used for, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceRole {
    Dependency,
    Deployment,
    Trigger,
    ConditionalDependency,
    ConditionalDevDependency,
    RootDependency,
}

impl fmt::Display for ReferenceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReferenceRole::Dependency => "dependency",
            ReferenceRole::Deployment => "deployment artifact",
            ReferenceRole::Trigger => "trigger",
            ReferenceRole::ConditionalDependency => "conditional dependency",
            ReferenceRole::ConditionalDevDependency => "conditional dev dependency",
            ReferenceRole::RootDependency => "project dependency",
        };
        f.write_str(s)
    }
}

/// Mutable staging area where artifacts are installed and wired.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    artifacts: BTreeMap<ArtifactCoords, Artifact>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an artifact and return it for further wiring.
    pub fn install(&mut self, artifact: Artifact) -> KondiResult<&mut Artifact> {
        use std::collections::btree_map::Entry;
        match self.artifacts.entry(artifact.coords().clone()) {
            Entry::Occupied(e) => Err(KondiError::DuplicateArtifact {
                coords: e.key().to_string(),
            }),
            Entry::Vacant(e) => Ok(e.insert(artifact)),
        }
    }

    /// Access an installed artifact to wire it after installation.
    pub fn get_mut(&mut self, coords: &ArtifactCoords) -> Option<&mut Artifact> {
        self.artifacts.get_mut(coords)
    }

    pub fn contains(&self, coords: &ArtifactCoords) -> bool {
        self.artifacts.contains_key(coords)
    }

    /// Freeze the installed artifacts into an immutable registry.
    ///
    /// Fails on the first reference (in coordinate order) to an artifact that
    /// was never installed.
    pub fn build(self) -> KondiResult<ArtifactRegistry> {
        for artifact in self.artifacts.values() {
            let refs = artifact
                .dependencies()
                .iter()
                .map(|d| (&d.coords, ReferenceRole::Dependency))
                .chain(artifact.deployment().map(|d| (d, ReferenceRole::Deployment)))
                .chain(artifact.triggers().map(|t| (t, ReferenceRole::Trigger)))
                .chain(
                    artifact
                        .conditional_dependencies()
                        .iter()
                        .map(|c| (c, ReferenceRole::ConditionalDependency)),
                )
                .chain(
                    artifact
                        .conditional_dev_dependencies()
                        .iter()
                        .map(|c| (c, ReferenceRole::ConditionalDevDependency)),
                );
            for (reference, role) in refs {
                if !self.artifacts.contains_key(reference) {
                    return Err(malformed(artifact.coords(), reference, role));
                }
            }
        }
        tracing::trace!("Registry built with {} artifacts", self.artifacts.len());
        Ok(ArtifactRegistry {
            artifacts: self.artifacts,
        })
    }
}

/// Immutable set of artifacts available to a resolution.
#[derive(Debug, Clone, Default)]
pub struct ArtifactRegistry {
    artifacts: BTreeMap<ArtifactCoords, Artifact>,
}

impl ArtifactRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn get(&self, coords: &ArtifactCoords) -> Option<&Artifact> {
        self.artifacts.get(coords)
    }

    pub fn contains(&self, coords: &ArtifactCoords) -> bool {
        self.artifacts.contains_key(coords)
    }

    /// Look up `coords`, reporting a malformed declaration by `referenced_by` if absent.
    pub fn require(
        &self,
        coords: &ArtifactCoords,
        referenced_by: &dyn fmt::Display,
        role: ReferenceRole,
    ) -> KondiResult<&Artifact> {
        self.artifacts
            .get(coords)
            .ok_or_else(|| malformed(referenced_by, coords, role))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.values()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

fn malformed(
    artifact: &dyn fmt::Display,
    reference: &ArtifactCoords,
    role: ReferenceRole,
) -> KondiError {
    KondiError::MalformedDeclaration {
        artifact: artifact.to_string(),
        reference: reference.to_string(),
        role: role.to_string(),
    }
}
