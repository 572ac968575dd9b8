//! Resolution entry point: seed, activate, propagate flags, expand deployment.

use kondi_core::config::ResolutionMode;
use kondi_core::coords::ArtifactCoords;
use kondi_core::dependency::DeclaredDependency;
use kondi_core::manifest::Manifest;
use kondi_core::registry::ArtifactRegistry;
use kondi_util::errors::{KondiError, KondiResult};

use crate::activation::ActivationEngine;
use crate::builder::GraphBuilder;
use crate::deployment::{self, DeploymentGraph};
use crate::flags;
use crate::graph::ResolvedGraph;
use crate::report::ActivationReport;

/// Options for a single resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    pub mode: ResolutionMode,
}

/// The output of dependency resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Runtime artifacts with their merged flags and every realized edge.
    pub runtime: ResolvedGraph,
    /// Build-time-only artifacts of the resolved extensions.
    pub deployment: DeploymentGraph,
    pub report: ActivationReport,
}

/// Resolve the project's dependency graph.
///
/// Every call works on its own state; `registry` is only read.
pub fn resolve(
    project: &ArtifactCoords,
    declarations: &[DeclaredDependency],
    registry: &ArtifactRegistry,
    options: &ResolveOptions,
) -> KondiResult<Resolution> {
    let builder = GraphBuilder::new(registry, options.mode);
    let seed = builder.seed(project, declarations)?;
    let seed_size = seed.satisfied().len();

    let activation = ActivationEngine::new(builder).run(seed)?;
    let ws = activation.working_set;

    let flag_table = flags::propagate(registry, ws.realized())?;
    if !flag_table.keys().eq(ws.satisfied().iter()) {
        return Err(KondiError::Resolution {
            message: format!(
                "{} artifacts satisfied but {} reachable from {project}",
                ws.satisfied().len(),
                flag_table.len()
            ),
        });
    }

    let runtime = ResolvedGraph::new(project.clone(), flag_table, ws.realized().clone())?;
    let deployment = deployment::expand(registry, &runtime)?;

    let (bypassed, excluded): (Vec<_>, Vec<_>) = activation
        .dropped
        .into_iter()
        .partition(|edge| runtime.contains(&edge.to));
    let report = ActivationReport {
        mode: options.mode,
        seed_size,
        rounds: activation.rounds,
        excluded,
        bypassed,
        dev_scoped: ws.dev_scoped().iter().cloned().collect(),
    };

    tracing::info!(
        "Resolved {project} ({} mode): {} runtime, {} deployment artifacts, {} conditional edges activated, {} excluded",
        options.mode,
        runtime.len(),
        deployment.len(),
        report.activated_count(),
        report.excluded.len()
    );

    Ok(Resolution {
        runtime,
        deployment,
        report,
    })
}

/// Resolve everything a `Kondi.toml` declares.
///
/// `mode` overrides the manifest's `[resolve]` mode when given.
pub fn resolve_manifest(manifest: &Manifest, mode: Option<ResolutionMode>) -> KondiResult<Resolution> {
    let registry = manifest.registry()?;
    let declarations = manifest.root_dependencies()?;
    let mode = mode
        .or_else(|| manifest.resolve.as_ref().and_then(|r| r.mode))
        .unwrap_or_default();
    resolve(
        &manifest.project_coords(),
        &declarations,
        &registry,
        &ResolveOptions { mode },
    )
}
