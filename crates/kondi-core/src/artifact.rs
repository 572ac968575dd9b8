//! Artifact descriptions: declared dependencies plus extension metadata.

use std::collections::BTreeSet;

use crate::coords::ArtifactCoords;
use crate::dependency::DeclaredDependency;

/// Whether an artifact is a plain library or the runtime piece of an extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    #[default]
    Library,
    RuntimeExtension,
}

/// A set of trigger artifacts that must all be present in the resolved graph
/// before a conditional edge into the owning artifact can activate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyCondition {
    triggers: BTreeSet<ArtifactCoords>,
}

impl DependencyCondition {
    pub fn new(triggers: impl IntoIterator<Item = ArtifactCoords>) -> Self {
        Self {
            triggers: triggers.into_iter().collect(),
        }
    }

    pub fn triggers(&self) -> &BTreeSet<ArtifactCoords> {
        &self.triggers
    }

    /// True if every trigger is in `present`.
    pub fn is_satisfied_by(&self, present: &BTreeSet<ArtifactCoords>) -> bool {
        self.triggers.is_subset(present)
    }
}

/// A uniquely-identified build unit and everything it declares.
///
/// Artifacts are wired through `&mut` setters while installed into a
/// [`RegistryBuilder`](crate::registry::RegistryBuilder); once the registry is
/// built they are only reachable through shared references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    coords: ArtifactCoords,
    kind: ArtifactKind,
    dependencies: Vec<DeclaredDependency>,
    deployment: Option<ArtifactCoords>,
    condition: Option<DependencyCondition>,
    conditional_dependencies: Vec<ArtifactCoords>,
    conditional_dev_dependencies: Vec<ArtifactCoords>,
}

impl Artifact {
    /// A plain library artifact.
    pub fn library(coords: ArtifactCoords) -> Self {
        Self {
            coords,
            kind: ArtifactKind::Library,
            dependencies: Vec::new(),
            deployment: None,
            condition: None,
            conditional_dependencies: Vec::new(),
            conditional_dev_dependencies: Vec::new(),
        }
    }

    /// The runtime artifact of an extension.
    pub fn extension(coords: ArtifactCoords) -> Self {
        Self {
            kind: ArtifactKind::RuntimeExtension,
            ..Self::library(coords)
        }
    }

    pub fn with_dependency(mut self, dep: impl Into<DeclaredDependency>) -> Self {
        self.add_dependency(dep);
        self
    }

    pub fn with_deployment(mut self, deployment: ArtifactCoords) -> Self {
        self.deployment = Some(deployment);
        self
    }

    pub fn add_dependency(&mut self, dep: impl Into<DeclaredDependency>) -> &mut Self {
        self.dependencies.push(dep.into());
        self
    }

    pub fn set_deployment(&mut self, deployment: ArtifactCoords) -> &mut Self {
        self.deployment = Some(deployment);
        self
    }

    /// Gate conditional edges into this artifact on the presence of `triggers`.
    pub fn set_dependency_condition(
        &mut self,
        triggers: impl IntoIterator<Item = ArtifactCoords>,
    ) -> &mut Self {
        self.condition = Some(DependencyCondition::new(triggers));
        self
    }

    pub fn set_conditional_dependencies(
        &mut self,
        deps: impl IntoIterator<Item = ArtifactCoords>,
    ) -> &mut Self {
        self.conditional_dependencies = deps.into_iter().collect();
        self
    }

    pub fn set_conditional_dev_dependencies(
        &mut self,
        deps: impl IntoIterator<Item = ArtifactCoords>,
    ) -> &mut Self {
        self.conditional_dev_dependencies = deps.into_iter().collect();
        self
    }

    pub fn coords(&self) -> &ArtifactCoords {
        &self.coords
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn is_extension(&self) -> bool {
        self.kind == ArtifactKind::RuntimeExtension
    }

    pub fn dependencies(&self) -> &[DeclaredDependency] {
        &self.dependencies
    }

    pub fn deployment(&self) -> Option<&ArtifactCoords> {
        self.deployment.as_ref()
    }

    pub fn condition(&self) -> Option<&DependencyCondition> {
        self.condition.as_ref()
    }

    pub fn conditional_dependencies(&self) -> &[ArtifactCoords] {
        &self.conditional_dependencies
    }

    pub fn conditional_dev_dependencies(&self) -> &[ArtifactCoords] {
        &self.conditional_dev_dependencies
    }

    /// Trigger set guarding conditional edges into this artifact. Empty when
    /// the artifact has no condition.
    pub fn triggers(&self) -> impl Iterator<Item = &ArtifactCoords> {
        self.condition.iter().flat_map(|c| c.triggers().iter())
    }
}
