// src/pipeline/align.rs
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::align::run_local_alignment;
use crate::align::scoring::ScoringScheme;
use crate::align::traceback::AlignmentSummary;
use crate::graph::assembler::{Assembly, Contig};

/// Alignment of the query against one contig
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContigHit {
    pub scaffold_id: String,
    pub label: String,
    pub contig_len: usize,
    pub summary: AlignmentSummary,
}

pub fn align_to_contig(contig: &Contig, query: &str, scheme: &ScoringScheme) -> ContigHit {
    let alignment = run_local_alignment(&contig.sequence, query, scheme);
    ContigHit {
        scaffold_id: contig.scaffold_id.clone(),
        label: contig.label(),
        contig_len: contig.len(),
        summary: alignment.result.summarize(),
    }
}

/// Align `query` against every contig. Hits come back in assembly order.
pub fn align_query(assembly: &Assembly, query: &str, scheme: &ScoringScheme) -> Vec<ContigHit> {
    let contigs: Vec<&Contig> = assembly.contigs().collect();
    info!("Aligning query ({} bp) against {} contigs", query.len(), contigs.len());

    contigs
        .par_iter()
        .map(|contig| align_to_contig(contig, query, scheme))
        .collect()
}

/// Hit with the highest single-cell score, the earliest one on ties
pub fn best_hit(hits: &[ContigHit]) -> Option<&ContigHit> {
    hits.iter().fold(None, |best: Option<&ContigHit>, hit| match best {
        Some(b) if b.summary.best_score >= hit.summary.best_score => Some(b),
        _ => Some(hit),
    })
}
