//! Conditional activation to a fixed point.
//!
//! A conditional edge activates once all of its triggers are satisfied. An
//! activation can satisfy triggers of other pending edges, so edges are
//! processed in rounds until a round activates nothing. Readiness within a
//! round is decided against the satisfied set as it stood when the round
//! began, so the order in which ready edges are applied cannot change the
//! outcome.

use std::collections::BTreeSet;

use kondi_util::errors::KondiResult;

use crate::builder::{GraphBuilder, WorkingSet};
use crate::edge::Edge;
use crate::report::ActivationRound;

/// Result of running the engine to its fixed point.
#[derive(Debug, Clone)]
pub struct Activation {
    pub working_set: WorkingSet,
    pub rounds: Vec<ActivationRound>,
    /// Edges still pending at the fixed point. Not part of the graph.
    pub dropped: BTreeSet<Edge>,
}

/// Drives conditional activation over a seed working set.
#[derive(Debug, Clone, Copy)]
pub struct ActivationEngine<'a> {
    builder: GraphBuilder<'a>,
}

impl<'a> ActivationEngine<'a> {
    pub fn new(builder: GraphBuilder<'a>) -> Self {
        Self { builder }
    }

    /// Activate pending edges round by round until none is ready.
    pub fn run(&self, mut ws: WorkingSet) -> KondiResult<Activation> {
        let mut rounds = Vec::new();

        while !ws.pending().is_empty() {
            let ready: Vec<Edge> = ws
                .pending()
                .iter()
                .filter(|e| e.is_satisfied_by(ws.satisfied()))
                .cloned()
                .collect();
            if ready.is_empty() {
                break;
            }

            let number = rounds.len() + 1;
            for edge in &ready {
                ws.realize(edge);
                let added = self.builder.expand(&edge.to, &mut ws)?;
                tracing::trace!("Activated {edge} (+{added} artifacts)");
            }
            tracing::debug!(
                "Activation round {number}: {} edges activated, {} satisfied, {} pending",
                ready.len(),
                ws.satisfied().len(),
                ws.pending().len()
            );
            rounds.push(ActivationRound {
                number,
                activated: ready,
                satisfied: ws.satisfied().len(),
            });
        }

        let dropped = ws.take_pending();
        for edge in &dropped {
            tracing::debug!("Dropping {edge}: triggers never satisfied");
        }

        Ok(Activation {
            working_set: ws,
            rounds,
            dropped,
        })
    }
}
