// src/pipeline/assemble.rs
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{GeneQuestError, Result};
use crate::graph::assembler::{assemble_contigs, Assembly, ScaffoldContigs};
use crate::graph::debruijn::DeBruijnGraph;
use crate::io::reads::{ReadSet, ScaffoldGroup};
use crate::pipeline::config::{AssemblyConfig, FailurePolicy};

/// Contigs of every scaffold that assembled, plus the ones that did not
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblyReport {
    pub assembly: Assembly,
    pub failed_scaffolds: Vec<String>,
}

/// Groups reads by scaffold and assembles each group independently
pub struct AssemblyPipeline {
    config: AssemblyConfig,
}

impl AssemblyPipeline {
    pub fn new(config: AssemblyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    /// Checks that apply to the whole read collection before any graph is built
    pub fn validate(&self, reads: &ReadSet) -> Result<()> {
        let k = self.config.k;
        if k == 0 {
            return Err(GeneQuestError::malformed("k-mer size must be at least 1"));
        }
        if self.config.max_reads_per_scaffold == 0 {
            return Err(GeneQuestError::malformed("max_reads_per_scaffold must be at least 1"));
        }
        let min_len = reads
            .min_len()
            .ok_or_else(|| GeneQuestError::malformed("read collection is empty"))?;
        if k >= min_len {
            return Err(GeneQuestError::KmerSize { k, min_len });
        }
        Ok(())
    }

    /// Build the graph of one scaffold group and walk it into contigs
    pub fn assemble_scaffold(&self, group: &ScaffoldGroup<'_>) -> Result<ScaffoldContigs> {
        let cap = self.config.max_reads_per_scaffold;
        if group.reads.len() > cap {
            debug!(
                "Scaffold {}: using first {} of {} reads",
                group.scaffold_id,
                cap,
                group.reads.len()
            );
        }

        let graph = DeBruijnGraph::build(group.reads.iter().take(cap).copied(), self.config.k)?;
        let contigs = assemble_contigs(&graph, group.scaffold_id)?;
        debug!(
            "Scaffold {}: {} nodes, {} edges, {} contigs",
            group.scaffold_id,
            graph.len(),
            graph.edge_count(),
            contigs.len()
        );

        Ok(ScaffoldContigs {
            scaffold_id: group.scaffold_id.to_string(),
            contigs,
        })
    }

    pub fn run(&self, reads: &ReadSet) -> Result<AssemblyReport> {
        self.validate(reads)?;

        let groups = reads.group_by_scaffold();
        info!(
            "Assembling {} reads in {} scaffold groups with k={}",
            reads.len(),
            groups.len(),
            self.config.k
        );

        let results: Vec<Result<ScaffoldContigs>> = groups
            .par_iter()
            .map(|group| self.assemble_scaffold(group))
            .collect();

        let mut report = AssemblyReport::default();
        for (group, result) in groups.iter().zip(results) {
            match result {
                Ok(scaffold) => report.assembly.push(scaffold),
                Err(GeneQuestError::NoNodesFound { scaffold })
                    if self.config.failure_policy == FailurePolicy::Skip =>
                {
                    warn!("Skipping scaffold {}: no zero-indegree nodes", scaffold);
                    report.failed_scaffolds.push(group.scaffold_id.to_string());
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Assembled {} contigs across {} scaffolds ({} failed)",
            report.assembly.contig_count(),
            report.assembly.scaffolds.len(),
            report.failed_scaffolds.len()
        );
        Ok(report)
    }
}

/// Assemble with default settings and fixed `k`, aborting on the first failure
pub fn run_de_bruijn(reads: &ReadSet, k: usize) -> Result<Assembly> {
    AssemblyPipeline::new(AssemblyConfig::with_k(k))
        .run(reads)
        .map(|report| report.assembly)
}
