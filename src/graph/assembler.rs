// src/graph/assembler.rs
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GeneQuestError, Result};
use crate::graph::debruijn::DeBruijnGraph;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contig {
    /// 1-based position among the start nodes of its scaffold
    pub id: usize,
    pub scaffold_id: String,
    pub sequence: String,
    /// Label of the zero-indegree node the walk started from
    pub start_kmer: String,
}

impl Contig {
    pub fn label(&self) -> String {
        format!("contig{}", self.id)
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Contigs assembled from one scaffold group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldContigs {
    pub scaffold_id: String,
    pub contigs: Vec<Contig>,
}

/// Assembly output: scaffold id -> contig label -> sequence, in scaffold order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assembly {
    pub scaffolds: Vec<ScaffoldContigs>,
}

impl Assembly {
    pub fn push(&mut self, scaffold: ScaffoldContigs) {
        self.scaffolds.push(scaffold);
    }

    pub fn scaffold(&self, scaffold_id: &str) -> Option<&ScaffoldContigs> {
        self.scaffolds.iter().find(|s| s.scaffold_id == scaffold_id)
    }

    /// Sequence of a contig by scaffold id and label (e.g. "contig1")
    pub fn get(&self, scaffold_id: &str, label: &str) -> Option<&str> {
        self.scaffold(scaffold_id)?
            .contigs
            .iter()
            .find(|c| c.label() == label)
            .map(|c| c.sequence.as_str())
    }

    /// All contigs, scaffold by scaffold
    pub fn contigs(&self) -> impl Iterator<Item = &Contig> {
        self.scaffolds.iter().flat_map(|s| s.contigs.iter())
    }

    pub fn contig_count(&self) -> usize {
        self.scaffolds.iter().map(|s| s.contigs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.contig_count() == 0
    }
}

/// Result of a single greedy walk
#[derive(Debug, Clone)]
pub struct Walk {
    pub sequence: String,
    pub edges_used: usize,
}

/// Greedy forward walk from `start`.
///
/// At each node the first outgoing edge not yet taken by this walk is
/// followed and the last base of its target is appended. The walk stops at a
/// node whose outgoing edges are exhausted. Consumption is tracked in a
/// per-walk cursor vector, the graph itself is left untouched.
pub fn greedy_walk(graph: &DeBruijnGraph, start: usize) -> Walk {
    let mut next_edge = vec![0usize; graph.len()];
    let mut sequence = graph.nodes()[start].label.clone();
    let mut edges_used = 0;
    let mut current = start;

    while let Some(&target) = graph.successors(current).get(next_edge[current]) {
        next_edge[current] += 1;
        edges_used += 1;
        if let Some(base) = graph.nodes()[target].label.chars().last() {
            sequence.push(base);
        }
        current = target;
    }

    Walk { sequence, edges_used }
}

/// Emit one contig per zero-indegree node of `graph`.
///
/// Fails with [`GeneQuestError::NoNodesFound`] when every node has an
/// incoming edge. Walks run in parallel; labels follow start-node order.
pub fn assemble_contigs(graph: &DeBruijnGraph, scaffold_id: &str) -> Result<Vec<Contig>> {
    let starts = graph.start_nodes();
    if starts.is_empty() {
        return Err(GeneQuestError::NoNodesFound {
            scaffold: scaffold_id.to_string(),
        });
    }

    let contigs: Vec<Contig> = starts
        .par_iter()
        .enumerate()
        .map(|(i, &start)| {
            let walk = greedy_walk(graph, start);
            debug!(
                "Scaffold {}: walk from {} used {}/{} edges",
                scaffold_id,
                graph.nodes()[start].label,
                walk.edges_used,
                graph.edge_count()
            );
            Contig {
                id: i + 1,
                scaffold_id: scaffold_id.to_string(),
                sequence: walk.sequence,
                start_kmer: graph.nodes()[start].label.clone(),
            }
        })
        .collect();

    Ok(contigs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_reconstructs_overlapping_reads() {
        let graph = DeBruijnGraph::from_sequences(["ATGCA", "TGCAT"], 3).unwrap();
        let contigs = assemble_contigs(&graph, "scaf").unwrap();

        assert_eq!(contigs.len(), 1);
        assert_eq!(contigs[0].label(), "contig1");
        assert_eq!(contigs[0].start_kmer, "ATG");
        assert_eq!(contigs[0].sequence, "ATGCAT");
    }

    #[test]
    fn test_walk_takes_first_edge_and_leaves_the_rest() {
        // ACG -> CGT twice and CGT -> GTA / GTC: the walk follows the first branch only
        let graph = DeBruijnGraph::from_sequences(["ACGTA", "ACGTC"], 3).unwrap();
        let start = graph.node_id("ACG").unwrap();
        let walk = greedy_walk(&graph, start);

        assert_eq!(walk.sequence, "ACGTA");
        assert_eq!(walk.edges_used, 2);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_each_start_gets_a_fresh_edge_set() {
        // Two start nodes feeding the same branch point
        let graph = DeBruijnGraph::from_sequences(["AACGT", "TACGG"], 3).unwrap();
        assert_eq!(graph.successor_labels("ACG"), vec!["CGT", "CGG"]);
        let contigs = assemble_contigs(&graph, "s").unwrap();

        let seqs: Vec<&str> = contigs.iter().map(|c| c.sequence.as_str()).collect();
        // both walks take ACG -> CGT; a shared cursor would send the second one to CGG
        assert_eq!(seqs, vec!["AACGT", "TACGT"]);
        assert_eq!(contigs[1].label(), "contig2");
    }

    #[test]
    fn test_cycle_without_start_fails() {
        let graph = DeBruijnGraph::from_sequences(["AAAA"], 2).unwrap();
        let err = assemble_contigs(&graph, "loop").unwrap_err();
        assert!(matches!(err, GeneQuestError::NoNodesFound { ref scaffold } if scaffold == "loop"));
    }

    #[test]
    fn test_assembly_lookup() {
        let mut assembly = Assembly::default();
        assembly.push(ScaffoldContigs {
            scaffold_id: "s1".into(),
            contigs: vec![Contig {
                id: 1,
                scaffold_id: "s1".into(),
                sequence: "ACGT".into(),
                start_kmer: "ACG".into(),
            }],
        });

        assert_eq!(assembly.get("s1", "contig1"), Some("ACGT"));
        assert_eq!(assembly.get("s1", "contig2"), None);
        assert_eq!(assembly.contig_count(), 1);
    }
}
