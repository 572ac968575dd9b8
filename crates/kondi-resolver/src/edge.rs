//! Typed edges between the project and artifacts.

use std::collections::BTreeSet;
use std::fmt;

use kondi_core::coords::ArtifactCoords;

/// Source of an edge: the project being resolved, or an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Origin {
    Project,
    Artifact(ArtifactCoords),
}

impl Origin {
    pub fn artifact(&self) -> Option<&ArtifactCoords> {
        match self {
            Origin::Project => None,
            Origin::Artifact(coords) => Some(coords),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Project => write!(f, "<project>"),
            Origin::Artifact(coords) => write!(f, "{coords}"),
        }
    }
}

/// Which graph an edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeScope {
    Runtime,
    /// Conditional dev dependency. Realized only when resolving in dev mode.
    Dev,
    Deployment,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeKind {
    Unconditional,
    /// Exists only once every trigger is in the resolved graph. `owner` is the
    /// artifact whose dependency condition supplied the triggers.
    Conditional {
        triggers: BTreeSet<ArtifactCoords>,
        owner: ArtifactCoords,
    },
}

/// A dependency edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub from: Origin,
    pub to: ArtifactCoords,
    pub kind: EdgeKind,
    pub scope: EdgeScope,
    pub optional: bool,
}

impl Edge {
    pub fn unconditional(from: Origin, to: ArtifactCoords, scope: EdgeScope) -> Self {
        Self {
            from,
            to,
            kind: EdgeKind::Unconditional,
            scope,
            optional: false,
        }
    }

    pub fn conditional(
        from: Origin,
        to: ArtifactCoords,
        triggers: BTreeSet<ArtifactCoords>,
        owner: ArtifactCoords,
        scope: EdgeScope,
    ) -> Self {
        Self {
            from,
            to,
            kind: EdgeKind::Conditional { triggers, owner },
            scope,
            optional: false,
        }
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn is_conditional(&self) -> bool {
        matches!(self.kind, EdgeKind::Conditional { .. })
    }

    pub fn triggers(&self) -> Option<&BTreeSet<ArtifactCoords>> {
        match &self.kind {
            EdgeKind::Unconditional => None,
            EdgeKind::Conditional { triggers, .. } => Some(triggers),
        }
    }

    /// True if the edge may exist given the artifacts in `present`.
    /// Unconditional edges always may.
    pub fn is_satisfied_by(&self, present: &BTreeSet<ArtifactCoords>) -> bool {
        self.triggers().map_or(true, |t| t.is_subset(present))
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)?;
        if let Some(triggers) = self.triggers() {
            if !triggers.is_empty() {
                let names: Vec<String> = triggers.iter().map(|t| t.to_string()).collect();
                write!(f, " if [{}]", names.join(", "))?;
            }
        }
        match self.scope {
            EdgeScope::Runtime => Ok(()),
            EdgeScope::Dev => write!(f, " (dev)"),
            EdgeScope::Deployment => write!(f, " (deployment)"),
        }
    }
}
