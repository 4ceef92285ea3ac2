// src/io/simulate.rs
use rand::distributions::Uniform;
use rand::Rng;

use crate::io::reads::{Read, ReadSet};

const BASES: [char; 4] = ['A', 'C', 'G', 'T'];

/// Uniform random DNA sequence of length `n`
pub fn random_sequence<R: Rng>(rng: &mut R, n: usize) -> String {
    let base_dist = Uniform::from(0..4);
    (0..n).map(|_| BASES[rng.sample(base_dist)]).collect()
}

/// Cut `genome` into reads of `read_len` bases every `step` bases.
///
/// Headers follow `scaffold:start:end`, so the scaffold id parses back out.
pub fn tile_reads(scaffold_id: &str, genome: &str, read_len: usize, step: usize) -> Vec<Read> {
    if read_len == 0 || genome.len() < read_len {
        return Vec::new();
    }
    let step = step.max(1);

    (0..=genome.len() - read_len)
        .step_by(step)
        .map(|start| {
            let end = start + read_len;
            Read::new(
                format!("{}:{:05}:{:05}", scaffold_id, start, end),
                scaffold_id,
                &genome[start..end],
            )
        })
        .collect()
}

/// One random genome per scaffold, tiled into overlapping reads
pub fn simulate_reads<R: Rng>(
    rng: &mut R,
    scaffolds: usize,
    genome_len: usize,
    read_len: usize,
    step: usize,
) -> (Vec<(String, String)>, ReadSet) {
    let mut genomes = Vec::with_capacity(scaffolds);
    let mut reads = Vec::new();

    for i in 0..scaffolds {
        let scaffold_id = format!("SCAF{}", i + 1);
        let genome = random_sequence(rng, genome_len);
        reads.extend(tile_reads(&scaffold_id, &genome, read_len, step));
        genomes.push((scaffold_id, genome));
    }

    (genomes, ReadSet::new(reads))
}
