#![allow(dead_code)]

use kondi_core::artifact::Artifact;
use kondi_core::config::ResolutionMode;
use kondi_core::coords::ArtifactCoords;
use kondi_core::dependency::DeclaredDependency;
use kondi_core::registry::RegistryBuilder;
use kondi_resolver::resolver::{resolve, Resolution, ResolveOptions};
use kondi_util::errors::KondiResult;

pub const GROUP: &str = "io.kondi.test";

pub fn jar(name: &str) -> ArtifactCoords {
    ArtifactCoords::new(GROUP, name, "1")
}

pub fn project() -> ArtifactCoords {
    ArtifactCoords::new(GROUP, "app", "1")
}

/// An extension as a pair of runtime and deployment artifacts. The deployment
/// artifact depends on the runtime one.
#[derive(Debug, Clone)]
pub struct TestExtension {
    runtime: ArtifactCoords,
    deployment: ArtifactCoords,
    runtime_deps: Vec<ArtifactCoords>,
    deployment_deps: Vec<ArtifactCoords>,
    condition: Vec<ArtifactCoords>,
    conditional: Vec<ArtifactCoords>,
    conditional_dev: Vec<ArtifactCoords>,
}

impl TestExtension {
    pub fn new(name: &str) -> Self {
        Self {
            runtime: jar(name),
            deployment: jar(&format!("{name}-deployment")),
            runtime_deps: Vec::new(),
            deployment_deps: Vec::new(),
            condition: Vec::new(),
            conditional: Vec::new(),
            conditional_dev: Vec::new(),
        }
    }

    pub fn runtime(&self) -> &ArtifactCoords {
        &self.runtime
    }

    pub fn deployment(&self) -> &ArtifactCoords {
        &self.deployment
    }

    pub fn add_runtime_dependency(&mut self, coords: &ArtifactCoords) -> &mut Self {
        self.runtime_deps.push(coords.clone());
        self
    }

    pub fn add_deployment_dependency(&mut self, coords: &ArtifactCoords) -> &mut Self {
        self.deployment_deps.push(coords.clone());
        self
    }

    pub fn set_dependency_condition(&mut self, triggers: &[&TestExtension]) -> &mut Self {
        self.condition = triggers.iter().map(|e| e.runtime.clone()).collect();
        self
    }

    pub fn set_conditional_deps(&mut self, deps: &[&TestExtension]) -> &mut Self {
        self.conditional = deps.iter().map(|e| e.runtime.clone()).collect();
        self
    }

    pub fn set_conditional_dev_deps(&mut self, deps: &[&ArtifactCoords]) -> &mut Self {
        self.conditional_dev = deps.iter().map(|c| (*c).clone()).collect();
        self
    }
}

/// Installs artifacts and root declarations, then resolves them.
#[derive(Debug, Default)]
pub struct Fixture {
    registry: RegistryBuilder,
    declarations: Vec<DeclaredDependency>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install_jar(&mut self, coords: &ArtifactCoords) -> &mut Self {
        self.registry
            .install(Artifact::library(coords.clone()))
            .unwrap();
        self
    }

    pub fn install_jar_with_deps(
        &mut self,
        coords: &ArtifactCoords,
        deps: &[&ArtifactCoords],
    ) -> &mut Self {
        let mut artifact = Artifact::library(coords.clone());
        for dep in deps {
            artifact.add_dependency((*dep).clone());
        }
        self.registry.install(artifact).unwrap();
        self
    }

    pub fn install_ext(&mut self, ext: &TestExtension) -> &mut Self {
        let mut runtime =
            Artifact::extension(ext.runtime.clone()).with_deployment(ext.deployment.clone());
        for dep in &ext.runtime_deps {
            runtime.add_dependency(dep.clone());
        }
        if !ext.condition.is_empty() {
            runtime.set_dependency_condition(ext.condition.iter().cloned());
        }
        runtime.set_conditional_dependencies(ext.conditional.iter().cloned());
        runtime.set_conditional_dev_dependencies(ext.conditional_dev.iter().cloned());
        self.registry.install(runtime).unwrap();

        let mut deployment =
            Artifact::library(ext.deployment.clone()).with_dependency(ext.runtime.clone());
        for dep in &ext.deployment_deps {
            deployment.add_dependency(dep.clone());
        }
        self.registry.install(deployment).unwrap();
        self
    }

    pub fn declare(&mut self, dep: impl Into<DeclaredDependency>) -> &mut Self {
        self.declarations.push(dep.into());
        self
    }

    pub fn reverse_declarations(&mut self) -> &mut Self {
        self.declarations.reverse();
        self
    }

    pub fn try_resolve(self, mode: ResolutionMode) -> KondiResult<Resolution> {
        let registry = self.registry.build()?;
        resolve(
            &project(),
            &self.declarations,
            &registry,
            &ResolveOptions { mode },
        )
    }

    pub fn resolve(self, mode: ResolutionMode) -> Resolution {
        self.try_resolve(mode).unwrap()
    }
}
