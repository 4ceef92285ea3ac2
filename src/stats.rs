use serde::Serialize;

use crate::graph::assembler::{Assembly, Contig};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Stats {
    pub scaffolds: usize,
    pub total_contigs: usize,
    pub total_length: usize,
    pub average_length: f64,
    pub longest: usize,
    pub n50: usize,
    pub gc_content: f64,
}

/// Represents metadata for a contig
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ContigMetadata {
    pub scaffold_id: String,
    pub label: String,
    pub length: usize,
    pub gc_content: f64,
}

fn gc_count(seq: &str) -> usize {
    seq.bytes()
        .filter(|&b| matches!(b, b'G' | b'C' | b'g' | b'c'))
        .count()
}

pub fn calculate_stats(assembly: &Assembly) -> Stats {
    let mut lengths: Vec<usize> = assembly.contigs().map(Contig::len).collect();
    let total: usize = lengths.iter().sum();
    let gc: usize = assembly.contigs().map(|c| gc_count(&c.sequence)).sum();

    lengths.sort_unstable();
    let total_contigs = lengths.len();
    let avg = if total_contigs > 0 { total as f64 / total_contigs as f64 } else { 0.0 };

    // Calculate N50
    let mut acc = 0;
    let half_total = (total + 1) / 2;
    let n50 = lengths.iter().rev().find(|&&len| {
        acc += len;
        acc >= half_total
    }).copied().unwrap_or(0);

    Stats {
        scaffolds: assembly.scaffolds.len(),
        total_contigs,
        total_length: total,
        average_length: avg,
        longest: lengths.last().copied().unwrap_or(0),
        n50,
        gc_content: if total > 0 { gc as f64 / total as f64 } else { 0.0 },
    }
}

/// Generate metadata for every contig of an assembly
pub fn generate_metadata(assembly: &Assembly) -> Vec<ContigMetadata> {
    assembly.contigs().map(|c| {
        let len = c.len();
        ContigMetadata {
            scaffold_id: c.scaffold_id.clone(),
            label: c.label(),
            length: len,
            gc_content: if len > 0 { gc_count(&c.sequence) as f64 / len as f64 } else { 0.0 },
        }
    }).collect()
}
