//! In-memory commit DAG and its traversal algorithms.
//!
//! [`InMemoryCommitGraph`] stores nodes in a [`HashMap`] and maintains a
//! forward-edge index (`children`) for descendant queries.
//!
//! # Invariants
//!
//! - The graph is acyclic (append-only, parents must exist before children).
//! - Every parent reference resolves to an existing node.
//! - Node ids are unique within the graph.

use std::collections::{HashMap, HashSet, VecDeque};

use refdb_types::ContentId;
use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::node::CommitNode;
use crate::traits::CommitGraph;

/// A commit history held entirely in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCommitGraph {
    /// All nodes, keyed by commit id.
    nodes: HashMap<ContentId, CommitNode>,
    /// Forward-edge index: parent -> list of children.
    children: HashMap<ContentId, Vec<ContentId>>,
}

impl InMemoryCommitGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of commits in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no commits.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Add a commit with the given parents.
    ///
    /// All parents must already be in the graph. Returns an error if the id
    /// already exists or if a parent reference dangles.
    pub fn add_commit(&mut self, id: ContentId, parents: Vec<ContentId>) -> GraphResult<()> {
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateCommit(id));
        }

        let mut generation = 0;
        for parent in &parents {
            let Some(node) = self.nodes.get(parent) else {
                return Err(GraphError::DanglingParent {
                    commit: id,
                    parent: *parent,
                });
            };
            generation = generation.max(node.generation);
        }

        for parent in &parents {
            self.children.entry(*parent).or_default().push(id);
        }

        let node = CommitNode {
            id,
            parents,
            generation: generation + 1,
        };
        debug!(commit = %id.short_hex(), generation = node.generation, "added commit");
        self.nodes.insert(id, node);

        Ok(())
    }

    /// Retrieve a commit by id.
    pub fn get(&self, id: &ContentId) -> Option<&CommitNode> {
        self.nodes.get(id)
    }

    /// Parent ids of a commit.
    pub fn parents(&self, id: &ContentId) -> GraphResult<&[ContentId]> {
        self.nodes
            .get(id)
            .map(|node| node.parents.as_slice())
            .ok_or(GraphError::CommitNotFound(*id))
    }

    /// Child ids of a commit. Empty for tips and unknown ids.
    pub fn children(&self, id: &ContentId) -> &[ContentId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    // ---------------------------------------------------------------
    // Ancestor queries
    // ---------------------------------------------------------------

    /// All ancestors of a commit (BFS upward). The commit itself is **not**
    /// included.
    pub fn ancestors(&self, id: &ContentId) -> GraphResult<HashSet<ContentId>> {
        let start = self.nodes.get(id).ok_or(GraphError::CommitNotFound(*id))?;

        let mut visited = HashSet::new();
        let mut queue: VecDeque<ContentId> = start.parents.iter().copied().collect();
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            if let Some(node) = self.nodes.get(&current) {
                queue.extend(node.parents.iter().copied());
            }
        }

        Ok(visited)
    }

    /// Find the best common ancestor of two commits.
    ///
    /// Among all commits reachable from both (each commit counting as
    /// reachable from itself), returns the one with the highest generation.
    /// Ties are broken by id so the answer is deterministic.
    pub fn merge_base(&self, a: &ContentId, b: &ContentId) -> GraphResult<Option<ContentId>> {
        let mut ancestors_a = self.ancestors(a)?;
        ancestors_a.insert(*a);
        let mut ancestors_b = self.ancestors(b)?;
        ancestors_b.insert(*b);

        Ok(ancestors_a
            .intersection(&ancestors_b)
            .filter_map(|id| self.nodes.get(id))
            .max_by(|x, y| x.generation.cmp(&y.generation).then(y.id.cmp(&x.id)))
            .map(|node| node.id))
    }
}

impl CommitGraph for InMemoryCommitGraph {
    fn contains(&self, id: &ContentId) -> bool {
        self.nodes.contains_key(id)
    }

    fn is_ancestor(&self, ancestor: &ContentId, descendant: &ContentId) -> GraphResult<bool> {
        let target = self
            .nodes
            .get(ancestor)
            .ok_or(GraphError::CommitNotFound(*ancestor))?;
        let start = self
            .nodes
            .get(descendant)
            .ok_or(GraphError::CommitNotFound(*descendant))?;

        if target.generation >= start.generation {
            return Ok(false);
        }

        // Walk upward, never descending below the target's generation.
        let mut visited = HashSet::new();
        let mut queue: VecDeque<&ContentId> = start.parents.iter().collect();
        while let Some(current) = queue.pop_front() {
            if current == ancestor {
                return Ok(true);
            }
            if !visited.insert(*current) {
                continue;
            }
            if let Some(node) = self.nodes.get(current) {
                if node.generation > target.generation {
                    queue.extend(node.parents.iter());
                }
            }
        }

        Ok(false)
    }
}
