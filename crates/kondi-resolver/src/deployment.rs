//! Deployment expansion: the build-time-only subtrees of resolved extensions.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use kondi_core::coords::ArtifactCoords;
use kondi_core::flags::DependencyFlags;
use kondi_core::registry::{ArtifactRegistry, ReferenceRole};
use kondi_util::errors::KondiResult;

use crate::edge::{Edge, EdgeScope, Origin};
use crate::flags::FlagTable;
use crate::graph::ResolvedGraph;

/// Deployment artifacts of the resolved extensions and their unconditional
/// dependencies, minus anything already on the runtime side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentGraph {
    graph: ResolvedGraph,
    /// Deployment artifact -> extension runtime artifacts that declare it.
    owners: BTreeMap<ArtifactCoords, BTreeSet<ArtifactCoords>>,
}

impl DeploymentGraph {
    pub fn graph(&self) -> &ResolvedGraph {
        &self.graph
    }

    pub fn contains(&self, coords: &ArtifactCoords) -> bool {
        self.graph.contains(coords)
    }

    pub fn flags(&self, coords: &ArtifactCoords) -> Option<DependencyFlags> {
        self.graph.flags(coords)
    }

    /// Extensions whose deployment artifact is `deployment`, in coordinate order.
    pub fn owners_of(&self, deployment: &ArtifactCoords) -> Vec<&ArtifactCoords> {
        self.owners
            .get(deployment)
            .map(|set| set.iter().collect())
            .unwrap_or_default()
    }

    /// Deployment artifacts paired with their extensions, in coordinate order.
    /// A deployment shared by several extensions appears once per extension.
    pub fn deployments(&self) -> impl Iterator<Item = (&ArtifactCoords, &ArtifactCoords)> {
        self.owners
            .iter()
            .flat_map(|(deployment, exts)| exts.iter().map(move |ext| (deployment, ext)))
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }
}

/// Collect the deployment graph for every runtime extension in `runtime`.
pub fn expand(registry: &ArtifactRegistry, runtime: &ResolvedGraph) -> KondiResult<DeploymentGraph> {
    let mut flags = FlagTable::new();
    let mut edges = BTreeSet::new();
    let mut owners: BTreeMap<ArtifactCoords, BTreeSet<ArtifactCoords>> = BTreeMap::new();

    for extension in runtime.with_flags(DependencyFlags::RUNTIME_EXTENSION_ARTIFACT) {
        let artifact = registry.require(extension, runtime.project(), ReferenceRole::Dependency)?;
        let Some(deployment) = artifact.deployment() else {
            continue;
        };
        if runtime.contains(deployment) {
            tracing::warn!("Deployment artifact {deployment} of {extension} is on the runtime classpath");
            continue;
        }
        let exts: &mut BTreeSet<ArtifactCoords> = owners.entry(deployment.clone()).or_default();
        if let Some(other) = exts.first() {
            tracing::warn!("Deployment artifact {deployment} is shared by {other} and {extension}");
        }
        exts.insert(extension.clone());
        edges.insert(Edge::unconditional(
            Origin::Project,
            deployment.clone(),
            EdgeScope::Deployment,
        ));

        let mut queue = VecDeque::new();
        if flags.merge(deployment, DependencyFlags::DEPLOYMENT_CP) {
            queue.push_back(deployment.clone());
        }
        while let Some(coords) = queue.pop_front() {
            let artifact = registry.require(&coords, &coords, ReferenceRole::Dependency)?;
            for dep in artifact.dependencies() {
                if dep.optional || !dep.scope.is_transitive() || runtime.contains(&dep.coords) {
                    continue;
                }
                edges.insert(Edge::unconditional(
                    Origin::Artifact(coords.clone()),
                    dep.coords.clone(),
                    EdgeScope::Deployment,
                ));
                if flags.merge(&dep.coords, DependencyFlags::DEPLOYMENT_CP) {
                    queue.push_back(dep.coords.clone());
                }
            }
        }
    }

    tracing::debug!(
        "Deployment graph: {} artifacts from {} deployment roots",
        flags.len(),
        owners.len()
    );
    let graph = ResolvedGraph::new(runtime.project().clone(), flags, edges)?;
    Ok(DeploymentGraph { graph, owners })
}
