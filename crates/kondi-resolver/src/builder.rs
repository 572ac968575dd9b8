//! Seed graph construction: the closure of the project's declarations over
//! unconditional edges. Conditional edges met on the way are recorded but not
//! followed.

use std::collections::{BTreeSet, VecDeque};

use kondi_core::config::ResolutionMode;
use kondi_core::coords::ArtifactCoords;
use kondi_core::dependency::{DeclaredDependency, DependencyScope};
use kondi_core::registry::{ArtifactRegistry, ReferenceRole};
use kondi_util::errors::KondiResult;

use crate::edge::{Edge, EdgeScope, Origin};

/// Mutable state of one resolution run.
#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    satisfied: BTreeSet<ArtifactCoords>,
    realized: BTreeSet<Edge>,
    pending: BTreeSet<Edge>,
    dev_scoped: BTreeSet<Edge>,
}

impl WorkingSet {
    /// Artifacts known to be in the runtime graph.
    pub fn satisfied(&self) -> &BTreeSet<ArtifactCoords> {
        &self.satisfied
    }

    /// Edges that are part of the runtime graph.
    pub fn realized(&self) -> &BTreeSet<Edge> {
        &self.realized
    }

    /// Conditional edges waiting for their triggers.
    pub fn pending(&self) -> &BTreeSet<Edge> {
        &self.pending
    }

    /// Conditional dev edges set aside because the mode does not activate them.
    pub fn dev_scoped(&self) -> &BTreeSet<Edge> {
        &self.dev_scoped
    }

    pub(crate) fn take_pending(&mut self) -> BTreeSet<Edge> {
        std::mem::take(&mut self.pending)
    }

    /// Move a ready conditional edge from pending into the realized set.
    pub(crate) fn realize(&mut self, edge: &Edge) {
        self.pending.remove(edge);
        self.realized.insert(edge.clone());
    }
}

/// Walks the registry along unconditional edges.
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder<'a> {
    registry: &'a ArtifactRegistry,
    mode: ResolutionMode,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(registry: &'a ArtifactRegistry, mode: ResolutionMode) -> Self {
        Self { registry, mode }
    }

    pub fn registry(&self) -> &'a ArtifactRegistry {
        self.registry
    }

    pub fn mode(&self) -> ResolutionMode {
        self.mode
    }

    /// Build the seed working set from the project's direct declarations.
    ///
    /// Test-scoped declarations are only followed in test mode. Every
    /// declaration must name an installed artifact.
    pub fn seed(
        &self,
        project: &ArtifactCoords,
        declarations: &[DeclaredDependency],
    ) -> KondiResult<WorkingSet> {
        let mut ws = WorkingSet::default();
        for dep in declarations {
            self.registry
                .require(&dep.coords, project, ReferenceRole::RootDependency)?;
            if dep.scope == DependencyScope::Test && !self.mode.includes_test_scope() {
                tracing::trace!("Skipping test-scoped {} in {} mode", dep.coords, self.mode);
                continue;
            }
            ws.realized.insert(
                Edge::unconditional(Origin::Project, dep.coords.clone(), EdgeScope::Runtime)
                    .with_optional(dep.optional),
            );
            self.expand(&dep.coords, &mut ws)?;
        }
        tracing::debug!(
            "Seed graph: {} artifacts, {} pending conditional edges",
            ws.satisfied.len(),
            ws.pending.len()
        );
        Ok(ws)
    }

    /// Add `start` and its unconditional subtree to the satisfied set,
    /// recording every conditional edge found on the newly added artifacts.
    ///
    /// Returns the number of artifacts added. Artifacts already satisfied are
    /// not walked again.
    pub fn expand(&self, start: &ArtifactCoords, ws: &mut WorkingSet) -> KondiResult<usize> {
        let mut queue: VecDeque<ArtifactCoords> = VecDeque::new();
        if ws.satisfied.insert(start.clone()) {
            queue.push_back(start.clone());
        }

        let mut added = 0;
        while let Some(coords) = queue.pop_front() {
            added += 1;
            let artifact = self
                .registry
                .require(&coords, &coords, ReferenceRole::Dependency)?;
            tracing::trace!("Walking {coords}");
            let from = Origin::Artifact(coords.clone());

            for dep in artifact.dependencies() {
                if dep.optional || !dep.scope.is_transitive() {
                    continue;
                }
                ws.realized.insert(Edge::unconditional(
                    from.clone(),
                    dep.coords.clone(),
                    EdgeScope::Runtime,
                ));
                if ws.satisfied.insert(dep.coords.clone()) {
                    queue.push_back(dep.coords.clone());
                }
            }

            for target in artifact.conditional_dependencies() {
                let edge = self.conditional_edge(&from, target, EdgeScope::Runtime)?;
                ws.pending.insert(edge);
            }

            for target in artifact.conditional_dev_dependencies() {
                let edge = self.conditional_edge(&from, target, EdgeScope::Dev)?;
                if self.mode.activates_dev_dependencies() {
                    ws.pending.insert(edge);
                } else {
                    ws.dev_scoped.insert(edge);
                }
            }
        }
        Ok(added)
    }

    /// A conditional edge to `target`, guarded by `target`'s own condition.
    fn conditional_edge(
        &self,
        from: &Origin,
        target: &ArtifactCoords,
        scope: EdgeScope,
    ) -> KondiResult<Edge> {
        let role = match scope {
            EdgeScope::Dev => ReferenceRole::ConditionalDevDependency,
            _ => ReferenceRole::ConditionalDependency,
        };
        let artifact = self.registry.require(target, from, role)?;
        let triggers: BTreeSet<ArtifactCoords> = artifact.triggers().cloned().collect();
        Ok(Edge::conditional(
            from.clone(),
            target.clone(),
            triggers,
            target.clone(),
            scope,
        ))
    }
}
