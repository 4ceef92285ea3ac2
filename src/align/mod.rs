//! Local (Smith-Waterman style) alignment with linear gap scores

pub mod scoring;
pub mod traceback;

use scoring::{ScoreMatrix, ScoringScheme};
use traceback::{trace_back, AlignmentResult};

/// Score matrix together with the traceback recovered from it
#[derive(Debug, Clone)]
pub struct LocalAlignment {
    pub matrix: ScoreMatrix,
    pub result: AlignmentResult,
}

/// Align `query` against `contig` and trace back from the best cell
pub fn run_local_alignment(contig: &str, query: &str, scheme: &ScoringScheme) -> LocalAlignment {
    let matrix = ScoreMatrix::compute(contig, query, scheme);
    let result = trace_back(&matrix);
    LocalAlignment { matrix, result }
}
