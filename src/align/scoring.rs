// src/align/scoring.rs
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// (row, column) position in a score matrix; rows follow the contig, columns the query
pub type Cell = (usize, usize);

/// Linear scoring parameters for local alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringScheme {
    pub match_score: i32,
    pub mismatch_score: i32,
    /// Added once per gap position, usually negative
    pub gap: i32,
}

impl Default for ScoringScheme {
    fn default() -> Self {
        Self {
            match_score: 10,
            mismatch_score: -4,
            gap: -5,
        }
    }
}

impl ScoringScheme {
    pub fn new(match_score: i32, mismatch_score: i32, gap: i32) -> Self {
        Self {
            match_score,
            mismatch_score,
            gap,
        }
    }

    #[inline]
    pub fn substitution(&self, a: u8, b: u8) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_score
        }
    }
}

/// Local-alignment dynamic-programming matrix of shape `(|contig|+1, |query|+1)`
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    cells: Array2<f64>,
    best: Cell,
}

impl ScoreMatrix {
    /// Fill the matrix for `contig` (rows) against `query` (columns).
    ///
    /// Row 0 and column 0 stay zero and every cell is clamped at zero. The
    /// best cell is the last maximum met in a row-major scan, i.e. the
    /// lexicographically greatest `(row, col)` among equal maxima.
    pub fn compute(contig: &str, query: &str, scheme: &ScoringScheme) -> Self {
        let contig = contig.as_bytes();
        let query = query.as_bytes();
        let gap = f64::from(scheme.gap);
        let mut cells = Array2::<f64>::zeros((contig.len() + 1, query.len() + 1));

        for i in 1..=contig.len() {
            for j in 1..=query.len() {
                let diag = cells[[i - 1, j - 1]] + f64::from(scheme.substitution(contig[i - 1], query[j - 1]));
                let left = cells[[i, j - 1]] + gap;
                let up = cells[[i - 1, j]] + gap;
                cells[[i, j]] = left.max(up).max(diag).max(0.0);
            }
        }

        Self::from_array(cells)
    }

    /// Wrap precomputed cell values, locating the best cell with the same tie rule
    pub fn from_array(cells: Array2<f64>) -> Self {
        let mut best = (0, 0);
        let mut best_score = f64::NEG_INFINITY;
        for ((i, j), &value) in cells.indexed_iter() {
            if value >= best_score {
                best_score = value;
                best = (i, j);
            }
        }

        Self { cells, best }
    }

    pub fn cells(&self) -> &Array2<f64> {
        &self.cells
    }

    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Value at `(row, col)`, `None` outside the matrix
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get((row, col)).copied()
    }

    /// Like [`get`](Self::get) but accepts coordinates that may step before the origin
    pub(crate) fn get_signed(&self, row: isize, col: isize) -> Option<f64> {
        if row < 0 || col < 0 {
            return None;
        }
        self.get(row as usize, col as usize)
    }

    pub fn best_cell(&self) -> Cell {
        self.best
    }

    pub fn best_score(&self) -> f64 {
        self.cells.get(self.best).copied().unwrap_or(0.0)
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.cells.outer_iter().map(|row| row.to_vec()).collect()
    }
}

/// Compute the local-alignment score matrix of `contig` against `query`
pub fn score_alignment(contig: &str, query: &str, scheme: &ScoringScheme) -> ScoreMatrix {
    ScoreMatrix::compute(contig, query, scheme)
}
