//! What a resolution decided about conditional edges.

use std::collections::BTreeSet;
use std::fmt;

use kondi_core::config::ResolutionMode;
use kondi_core::coords::ArtifactCoords;

use crate::edge::Edge;

/// One round of conditional activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationRound {
    /// 1-based round number.
    pub number: usize,
    /// Edges activated in this round, in edge order.
    pub activated: Vec<Edge>,
    /// Size of the satisfied set after the round.
    pub satisfied: usize,
}

/// A report of every conditional decision made during resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationReport {
    pub mode: ResolutionMode,
    /// Size of the satisfied set before the first round.
    pub seed_size: usize,
    pub rounds: Vec<ActivationRound>,
    /// Conditional edges whose triggers were never satisfied and whose target
    /// is absent from the runtime graph.
    pub excluded: Vec<Edge>,
    /// Conditional edges whose triggers were never satisfied, but whose
    /// target is in the runtime graph through another path.
    pub bypassed: Vec<Edge>,
    /// Conditional dev edges not considered in this mode.
    pub dev_scoped: Vec<Edge>,
}

impl ActivationReport {
    /// Total number of conditional edges activated.
    pub fn activated_count(&self) -> usize {
        self.rounds.iter().map(|r| r.activated.len()).sum()
    }

    /// Targets of excluded edges.
    pub fn excluded_targets(&self) -> BTreeSet<&ArtifactCoords> {
        self.excluded.iter().map(|e| &e.to).collect()
    }

    /// Satisfied-set size before the first round and after each round.
    pub fn satisfied_sizes(&self) -> Vec<usize> {
        std::iter::once(self.seed_size)
            .chain(self.rounds.iter().map(|r| r.satisfied))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
            && self.excluded.is_empty()
            && self.bypassed.is_empty()
            && self.dev_scoped.is_empty()
    }
}

impl fmt::Display for ActivationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No conditional dependencies.");
        }
        writeln!(
            f,
            "Conditional activation ({} mode, seed of {} artifacts):",
            self.mode, self.seed_size
        )?;
        for round in &self.rounds {
            writeln!(
                f,
                "  round {}: {} activated, {} satisfied",
                round.number,
                round.activated.len(),
                round.satisfied
            )?;
            for edge in &round.activated {
                writeln!(f, "    + {edge}")?;
            }
        }
        if !self.excluded.is_empty() {
            writeln!(f, "Excluded ({}):", self.excluded.len())?;
            for edge in &self.excluded {
                writeln!(f, "  - {edge}")?;
            }
        }
        if !self.bypassed.is_empty() {
            writeln!(
                f,
                "Dropped, target reached through another path ({}):",
                self.bypassed.len()
            )?;
            for edge in &self.bypassed {
                writeln!(f, "  = {edge}")?;
            }
        }
        if !self.dev_scoped.is_empty() {
            writeln!(f, "Dev-scoped, not activated ({}):", self.dev_scoped.len())?;
            for edge in &self.dev_scoped {
                writeln!(f, "  ~ {edge}")?;
            }
        }
        Ok(())
    }
}
