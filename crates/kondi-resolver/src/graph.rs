//! Resolved graph construction and traversal.

use std::collections::{BTreeSet, HashMap, HashSet};

use kondi_core::coords::ArtifactCoords;
use kondi_core::flags::DependencyFlags;
use kondi_util::errors::{KondiError, KondiResult};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::edge::{Edge, EdgeScope, Origin};
use crate::flags::FlagTable;

/// Edge label in the backing digraph.
#[derive(Debug, Clone, Copy)]
struct EdgeLabel {
    conditional: bool,
    dev: bool,
}

/// A stabilized dependency graph: merged flags per artifact plus every
/// realized edge, backed by a petgraph digraph rooted at the project.
#[derive(Debug, Clone)]
pub struct ResolvedGraph {
    graph: DiGraph<ArtifactCoords, EdgeLabel>,
    /// Lookup from coordinates to node index (artifacts only, not the root).
    index: HashMap<ArtifactCoords, NodeIndex>,
    root: NodeIndex,
    flags: FlagTable,
    edges: BTreeSet<Edge>,
}

impl ResolvedGraph {
    /// Assemble a graph from its flags and edges.
    ///
    /// Fails if an edge endpoint has no flags entry.
    pub fn new(
        project: ArtifactCoords,
        flags: FlagTable,
        edges: BTreeSet<Edge>,
    ) -> KondiResult<Self> {
        let mut graph = DiGraph::new();
        let root = graph.add_node(project);
        let mut index = HashMap::new();
        for coords in flags.keys() {
            let idx = graph.add_node(coords.clone());
            index.insert(coords.clone(), idx);
        }

        for edge in &edges {
            let from = match &edge.from {
                Origin::Project => root,
                Origin::Artifact(coords) => *index.get(coords).ok_or_else(|| dangling(coords, edge))?,
            };
            let to = *index.get(&edge.to).ok_or_else(|| dangling(&edge.to, edge))?;
            if !graph.edges(from).any(|e| e.target() == to) {
                graph.add_edge(
                    from,
                    to,
                    EdgeLabel {
                        conditional: edge.is_conditional(),
                        dev: edge.scope == EdgeScope::Dev,
                    },
                );
            }
        }

        Ok(Self {
            graph,
            index,
            root,
            flags,
            edges,
        })
    }

    /// Coordinates of the project at the root of the graph.
    pub fn project(&self) -> &ArtifactCoords {
        &self.graph[self.root]
    }

    /// Merged flags of an artifact, or `None` if it is not in the graph.
    pub fn flags(&self, coords: &ArtifactCoords) -> Option<DependencyFlags> {
        self.flags.get(coords)
    }

    pub fn flag_table(&self) -> &FlagTable {
        &self.flags
    }

    pub fn contains(&self, coords: &ArtifactCoords) -> bool {
        self.index.contains_key(coords)
    }

    /// Every artifact with its merged flags, in coordinate order.
    pub fn artifacts(&self) -> impl Iterator<Item = (&ArtifactCoords, DependencyFlags)> {
        self.flags.iter()
    }

    /// Artifacts carrying all bits of `flags`.
    pub fn with_flags(&self, flags: DependencyFlags) -> Vec<&ArtifactCoords> {
        self.flags
            .iter()
            .filter(|(_, f)| f.contains(flags))
            .map(|(c, _)| c)
            .collect()
    }

    /// Every realized edge.
    pub fn edges(&self) -> &BTreeSet<Edge> {
        &self.edges
    }

    /// Direct dependencies of an artifact.
    pub fn dependencies_of(&self, coords: &ArtifactCoords) -> Vec<&ArtifactCoords> {
        self.index
            .get(coords)
            .map(|&idx| self.neighbors(idx, Direction::Outgoing))
            .unwrap_or_default()
    }

    /// Reverse dependencies (who depends on this artifact), including the
    /// project when it declares the artifact directly.
    pub fn dependents_of(&self, coords: &ArtifactCoords) -> Vec<&ArtifactCoords> {
        self.index
            .get(coords)
            .map(|&idx| self.neighbors(idx, Direction::Incoming))
            .unwrap_or_default()
    }

    fn neighbors(&self, idx: NodeIndex, dir: Direction) -> Vec<&ArtifactCoords> {
        let mut out: Vec<&ArtifactCoords> = self
            .graph
            .edges_directed(idx, dir)
            .map(|e| match dir {
                Direction::Outgoing => &self.graph[e.target()],
                Direction::Incoming => &self.graph[e.source()],
            })
            .collect();
        out.sort();
        out
    }

    /// Print the dependency tree to a string.
    ///
    /// Conditional edges are marked `(conditional)`, dev-scoped ones `(dev)`.
    pub fn print_tree(&self, max_depth: Option<usize>) -> String {
        let mut output = format!("{}\n", self.graph[self.root]);
        let mut visited = HashSet::new();
        visited.insert(self.root);

        let children = self.sorted_children(self.root);
        let count = children.len();
        for (i, (child, label)) in children.into_iter().enumerate() {
            let is_last = i == count - 1;
            self.print_subtree(&mut output, child, label, "", is_last, 1, max_depth, &mut visited);
        }
        output
    }

    fn sorted_children(&self, idx: NodeIndex) -> Vec<(NodeIndex, EdgeLabel)> {
        let mut children: Vec<(NodeIndex, EdgeLabel)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.target(), *e.weight()))
            .collect();
        children.sort_by(|a, b| self.graph[a.0].cmp(&self.graph[b.0]));
        children
    }

    #[allow(clippy::too_many_arguments)]
    fn print_subtree(
        &self,
        output: &mut String,
        idx: NodeIndex,
        label: EdgeLabel,
        prefix: &str,
        is_last: bool,
        depth: usize,
        max_depth: Option<usize>,
        visited: &mut HashSet<NodeIndex>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        let node = &self.graph[idx];
        let mut marks = String::new();
        if label.conditional {
            marks.push_str(" (conditional)");
        }
        if label.dev {
            marks.push_str(" (dev)");
        }
        output.push_str(&format!("{prefix}{connector}{node}{marks}\n"));

        if let Some(max) = max_depth {
            if depth >= max {
                return;
            }
        }

        if !visited.insert(idx) {
            return;
        }

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let children = self.sorted_children(idx);
        let count = children.len();
        for (i, (child, child_label)) in children.into_iter().enumerate() {
            let is_last = i == count - 1;
            self.print_subtree(
                output,
                child,
                child_label,
                &child_prefix,
                is_last,
                depth + 1,
                max_depth,
                visited,
            );
        }

        visited.remove(&idx);
    }

    /// Find a path from the project to an artifact.
    ///
    /// Accepts full coordinates, `group:artifact`, or just the artifact id.
    pub fn find_path(&self, target_key: &str) -> Option<Vec<&ArtifactCoords>> {
        let target = self.resolve_key(target_key)?;
        let mut path = Vec::new();
        let mut visited = HashSet::new();
        if self.dfs_path(self.root, target, &mut path, &mut visited) {
            Some(path.iter().map(|&idx| &self.graph[idx]).collect())
        } else {
            None
        }
    }

    /// Resolve a user-provided key to a node index.
    fn resolve_key(&self, key: &str) -> Option<NodeIndex> {
        if let Ok(coords) = ArtifactCoords::parse(key) {
            if let Some(&idx) = self.index.get(&coords) {
                return Some(idx);
            }
        }
        let mut candidates: Vec<(&ArtifactCoords, NodeIndex)> = self
            .index
            .iter()
            .filter(|(coords, _)| coords.key() == key || coords.artifact_id == key)
            .map(|(coords, &idx)| (coords, idx))
            .collect();
        candidates.sort_by(|a, b| a.0.cmp(b.0));
        candidates.first().map(|(_, idx)| *idx)
    }

    fn dfs_path(
        &self,
        current: NodeIndex,
        target: NodeIndex,
        path: &mut Vec<NodeIndex>,
        visited: &mut HashSet<NodeIndex>,
    ) -> bool {
        path.push(current);
        if current == target {
            return true;
        }
        if !visited.insert(current) {
            path.pop();
            return false;
        }
        for (child, _) in self.sorted_children(current) {
            if self.dfs_path(child, target, path, visited) {
                return true;
            }
        }
        path.pop();
        false
    }

    /// Build an inverted dependency tree (reverse edges) for a single artifact.
    pub fn print_inverted_tree(&self, target_key: &str) -> String {
        let mut output = String::new();
        let Some(idx) = self.resolve_key(target_key) else {
            return output;
        };

        output.push_str(&format!("{}\n", self.graph[idx]));

        let mut visited = HashSet::new();
        visited.insert(idx);

        let dependents = self.sorted_parents(idx);
        let count = dependents.len();
        for (i, dep_idx) in dependents.into_iter().enumerate() {
            let is_last = i == count - 1;
            self.print_inverted_subtree(&mut output, dep_idx, "", is_last, &mut visited);
        }

        output
    }

    fn sorted_parents(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut parents: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| e.source())
            .collect();
        parents.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
        parents
    }

    fn print_inverted_subtree(
        &self,
        output: &mut String,
        idx: NodeIndex,
        prefix: &str,
        is_last: bool,
        visited: &mut HashSet<NodeIndex>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        output.push_str(&format!("{prefix}{connector}{}\n", self.graph[idx]));

        if !visited.insert(idx) {
            return;
        }

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let dependents = self.sorted_parents(idx);
        let count = dependents.len();
        for (i, dep_idx) in dependents.into_iter().enumerate() {
            let is_last = i == count - 1;
            self.print_inverted_subtree(output, dep_idx, &child_prefix, is_last, visited);
        }

        visited.remove(&idx);
    }

    /// Number of artifacts (excluding the project).
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Structural equality: same project, flags and edges.
impl PartialEq for ResolvedGraph {
    fn eq(&self, other: &Self) -> bool {
        self.project() == other.project() && self.flags == other.flags && self.edges == other.edges
    }
}

impl Eq for ResolvedGraph {}

fn dangling(coords: &ArtifactCoords, edge: &Edge) -> KondiError {
    KondiError::Resolution {
        message: format!("edge {edge} references {coords}, which has no resolved flags"),
    }
}
