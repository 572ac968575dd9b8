//! Flag propagation: the union of roles each artifact plays over every path
//! from the project that reaches it.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use kondi_core::coords::ArtifactCoords;
use kondi_core::flags::DependencyFlags;
use kondi_core::registry::{ArtifactRegistry, ReferenceRole};
use kondi_util::errors::KondiResult;

use crate::edge::{Edge, EdgeScope, Origin};

/// Merged flags per artifact. Bits can be added but never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagTable {
    entries: BTreeMap<ArtifactCoords, DependencyFlags>,
}

impl FlagTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union `flags` into the entry for `coords`, creating it if needed.
    /// Returns `true` if the entry was created or gained a bit.
    pub fn merge(&mut self, coords: &ArtifactCoords, flags: DependencyFlags) -> bool {
        match self.entries.get_mut(coords) {
            Some(existing) => {
                let merged = existing.merged(flags);
                let changed = merged != *existing;
                *existing = merged;
                changed
            }
            None => {
                self.entries.insert(coords.clone(), flags);
                true
            }
        }
    }

    pub fn get(&self, coords: &ArtifactCoords) -> Option<DependencyFlags> {
        self.entries.get(coords).copied()
    }

    pub fn contains(&self, coords: &ArtifactCoords) -> bool {
        self.entries.contains_key(coords)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ArtifactCoords, DependencyFlags)> {
        self.entries.iter().map(|(c, f)| (c, *f))
    }

    pub fn keys(&self) -> impl Iterator<Item = &ArtifactCoords> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compute the flags of every artifact reachable from the project over the
/// realized runtime edges.
///
/// Every edge contributes to its target: `RUNTIME_CP` always,
/// `RUNTIME_EXTENSION_ARTIFACT` when the target is an extension, and for
/// edges leaving the project `DIRECT` (plus `OPTIONAL` and
/// `TOP_LEVEL_RUNTIME_EXTENSION_ARTIFACT` where they apply).
pub fn propagate(registry: &ArtifactRegistry, edges: &BTreeSet<Edge>) -> KondiResult<FlagTable> {
    let mut outgoing: BTreeMap<&Origin, Vec<&Edge>> = BTreeMap::new();
    for edge in edges
        .iter()
        .filter(|e| matches!(e.scope, EdgeScope::Runtime | EdgeScope::Dev))
    {
        outgoing.entry(&edge.from).or_default().push(edge);
    }

    let mut table = FlagTable::new();
    let mut visited: BTreeSet<Origin> = BTreeSet::new();
    let mut queue: VecDeque<Origin> = VecDeque::new();
    visited.insert(Origin::Project);
    queue.push_back(Origin::Project);

    while let Some(origin) = queue.pop_front() {
        let Some(out) = outgoing.get(&origin) else {
            continue;
        };
        for edge in out {
            let artifact = registry.require(&edge.to, &edge.from, ReferenceRole::Dependency)?;
            let mut contribution = DependencyFlags::RUNTIME_CP;
            if artifact.is_extension() {
                contribution |= DependencyFlags::RUNTIME_EXTENSION_ARTIFACT;
            }
            if origin == Origin::Project {
                contribution |= DependencyFlags::DIRECT;
                if edge.optional {
                    contribution |= DependencyFlags::OPTIONAL;
                }
                if artifact.is_extension() {
                    contribution |= DependencyFlags::TOP_LEVEL_RUNTIME_EXTENSION_ARTIFACT;
                }
            }
            if table.merge(&edge.to, contribution) {
                tracing::trace!("{} flags now {}", edge.to, table.get(&edge.to).unwrap_or_default());
            }
            let next = Origin::Artifact(edge.to.clone());
            if visited.insert(next.clone()) {
                queue.push_back(next);
            }
        }
    }

    Ok(table)
}
