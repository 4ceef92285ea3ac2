// src/graph/debruijn.rs
//! De Bruijn multigraph over fixed-length k-mers.
//!
//! Every read of length `n` contributes `n - k` edges: the window starting at
//! position `i` points to the window starting at `i + 1`. Nodes and successor
//! lists are stored in the order they are first encountered, so building the
//! same reads in the same order always yields the same graph.

use ahash::AHashMap;
use tracing::debug;

use crate::error::{GeneQuestError, Result};
use crate::io::reads::Read;

/// A vertex of the graph with its edge counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmerNode {
    pub label: String,
    pub indegree: usize,
    pub outdegree: usize,
}

impl KmerNode {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            indegree: 0,
            outdegree: 0,
        }
    }
}

/// Node table plus adjacency template for a single scaffold.
///
/// Nodes are addressed by their insertion index. The adjacency template is
/// never mutated after construction; walks track consumed edges on their own.
#[derive(Debug, Clone)]
pub struct DeBruijnGraph {
    k: usize,
    nodes: Vec<KmerNode>,
    index: AHashMap<String, usize>,
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl DeBruijnGraph {
    /// Build the graph from reads in the given order.
    ///
    /// `k` must be non-zero and strictly smaller than every read length.
    pub fn build<'a, I>(reads: I, k: usize) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Read>,
    {
        Self::from_sequences(reads.into_iter().map(|r| r.seq.as_str()), k)
    }

    pub fn from_sequences<'a, I>(sequences: I, k: usize) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if k == 0 {
            return Err(GeneQuestError::malformed("k-mer size must be at least 1"));
        }

        let mut graph = Self {
            k,
            nodes: Vec::new(),
            index: AHashMap::new(),
            adjacency: Vec::new(),
            edge_count: 0,
        };

        for seq in sequences {
            if !seq.is_ascii() {
                return Err(GeneQuestError::malformed(format!(
                    "sequence contains non-ASCII characters: {}",
                    seq
                )));
            }
            if seq.len() <= k {
                return Err(GeneQuestError::KmerSize { k, min_len: seq.len() });
            }

            for i in 0..seq.len() - k {
                let from = graph.intern(&seq[i..i + k]);
                let to = graph.intern(&seq[i + 1..i + k + 1]);
                graph.add_edge(from, to);
            }
        }

        debug!(
            "Built de Bruijn graph: k={}, nodes={}, edges={}",
            k,
            graph.nodes.len(),
            graph.edge_count
        );
        Ok(graph)
    }

    fn intern(&mut self, label: &str) -> usize {
        if let Some(&id) = self.index.get(label) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(KmerNode::new(label));
        self.adjacency.push(Vec::new());
        self.index.insert(label.to_string(), id);
        id
    }

    fn add_edge(&mut self, from: usize, to: usize) {
        self.nodes[from].outdegree += 1;
        self.nodes[to].indegree += 1;
        self.adjacency[from].push(to);
        self.edge_count += 1;
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> &[KmerNode] {
        &self.nodes
    }

    pub fn node(&self, id: usize) -> Option<&KmerNode> {
        self.nodes.get(id)
    }

    pub fn node_id(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn get(&self, label: &str) -> Option<&KmerNode> {
        self.node_id(label).map(|id| &self.nodes[id])
    }

    /// Successor ids of a node, duplicates included, in insertion order
    pub fn successors(&self, id: usize) -> &[usize] {
        self.adjacency.get(id).map_or(&[], Vec::as_slice)
    }

    /// Successor labels of a node, duplicates included, in insertion order
    pub fn successor_labels(&self, label: &str) -> Vec<&str> {
        self.node_id(label)
            .map(|id| {
                self.successors(id)
                    .iter()
                    .map(|&next| self.nodes[next].label.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Ids of nodes with indegree 0, in insertion order
    pub fn start_nodes(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.indegree == 0)
            .map(|(id, _)| id)
            .collect()
    }
}
