// src/align/traceback.rs
//! Recovery of the optimal local alignment from a filled score matrix.
//!
//! From the best cell the walk repeatedly steps to one of three predecessors,
//! evaluated in the order left `(x-1, y)`, up `(x, y-1)`, diagonal
//! `(x-1, y-1)`. The largest value wins and exact ties go to the earliest in
//! that order. Before comparing, ties are biased by [`TIE_EPSILON`]:
//!
//! - diagonal equal to both others: left and up are lowered, diagonal wins
//! - diagonal equal to left only: up is capped just below them, left/diagonal tie stands
//! - diagonal equal to up only: up is lowered
//! - left equal to up: one level of look-ahead decides, left on a further tie
//!
//! Once every predecessor is zero the alignment has reached its origin and no
//! bias is applied. Predecessors before row 0 or column 0 are unavailable.

use serde::{Deserialize, Serialize};

use crate::align::scoring::{Cell, ScoreMatrix};

/// Penalty used to break ties between predecessor cells
pub const TIE_EPSILON: f64 = 0.1;

/// Path through the matrix from the best cell back to a zero cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub best_score: f64,
    pub best_cell: Cell,
    /// Visited cells, starting at `best_cell` and ending at the zero-score cell
    pub path: Vec<Cell>,
    /// Matrix value of every cell in `path`
    pub scores: Vec<f64>,
}

/// Spans and score derived from an [`AlignmentResult`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentSummary {
    /// Inclusive (min, max) matrix rows covered, `None` for an empty alignment
    pub contig_span: Option<(usize, usize)>,
    /// Inclusive (min, max) matrix columns covered
    pub query_span: Option<(usize, usize)>,
    /// Sum of every score along the path, the terminal zero included
    pub score: f64,
    /// Value of the single best cell
    pub best_score: f64,
    pub best_cell: Cell,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    cell: (isize, isize),
    value: f64,
}

impl Candidate {
    fn at(matrix: &ScoreMatrix, row: isize, col: isize) -> Self {
        Self {
            cell: (row, col),
            value: neighbour_value(matrix, row, col),
        }
    }

    fn is_available(&self) -> bool {
        self.value.is_finite()
    }
}

fn neighbour_value(matrix: &ScoreMatrix, row: isize, col: isize) -> f64 {
    matrix.get_signed(row, col).unwrap_or(f64::NEG_INFINITY)
}

/// Best value reachable one step back from `(row, col)`
fn lookahead(matrix: &ScoreMatrix, row: isize, col: isize) -> f64 {
    neighbour_value(matrix, row, col - 1)
        .max(neighbour_value(matrix, row - 1, col))
        .max(neighbour_value(matrix, row - 1, col - 1))
}

/// Pick the predecessor of `(x, y)` according to the tie-break rules
fn next_cell(matrix: &ScoreMatrix, x: isize, y: isize) -> Option<Cell> {
    let mut left = Candidate::at(matrix, x - 1, y);
    let mut up = Candidate::at(matrix, x, y - 1);
    let diag = Candidate::at(matrix, x - 1, y - 1);

    let raw_max = left.value.max(up.value).max(diag.value);
    if raw_max > 0.0 {
        if diag.value == left.value && diag.value == up.value {
            left.value -= TIE_EPSILON;
            up.value -= TIE_EPSILON;
        } else if diag.value == left.value {
            if left.is_available() {
                up.value = left.value - TIE_EPSILON;
            }
        } else if diag.value == up.value {
            up.value -= TIE_EPSILON;
        } else if left.value == up.value {
            let up_ahead = lookahead(matrix, up.cell.0, up.cell.1);
            let left_ahead = lookahead(matrix, left.cell.0, left.cell.1);
            if up_ahead > left_ahead {
                left.value -= TIE_EPSILON;
            } else {
                up.value -= TIE_EPSILON;
            }
        }
    }

    let mut best: Option<Candidate> = None;
    for candidate in [left, up, diag] {
        if !candidate.is_available() {
            continue;
        }
        if best.map_or(true, |b| candidate.value > b.value) {
            best = Some(candidate);
        }
    }

    best.map(|c| (c.cell.0 as usize, c.cell.1 as usize))
}

/// Trace back from the best cell of `matrix`
pub fn trace_back(matrix: &ScoreMatrix) -> AlignmentResult {
    trace_back_from(matrix, matrix.best_cell())
}

/// Trace back from an arbitrary starting cell
pub fn trace_back_from(matrix: &ScoreMatrix, start: Cell) -> AlignmentResult {
    let best_score = matrix.get(start.0, start.1).unwrap_or(0.0);
    let mut path = vec![start];
    let mut scores = vec![best_score];

    let (mut x, mut y) = start;
    let mut score = best_score;
    while score > 0.0 {
        let Some(cell) = next_cell(matrix, x as isize, y as isize) else {
            break;
        };
        score = matrix.get(cell.0, cell.1).unwrap_or(0.0);
        path.push(cell);
        scores.push(score);
        (x, y) = cell;
    }

    AlignmentResult {
        best_score,
        best_cell: start,
        path,
        scores,
    }
}

impl AlignmentResult {
    /// Cells that belong to the alignment, i.e. the path minus its terminal entry
    pub fn aligned_cells(&self) -> &[Cell] {
        match self.path.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    pub fn cumulative_score(&self) -> f64 {
        self.scores.iter().sum()
    }

    pub fn summarize(&self) -> AlignmentSummary {
        let cells = self.aligned_cells();
        let span = |pick: fn(&Cell) -> usize| {
            let min = cells.iter().map(pick).min()?;
            let max = cells.iter().map(pick).max()?;
            Some((min, max))
        };

        AlignmentSummary {
            contig_span: span(|c| c.0),
            query_span: span(|c| c.1),
            score: self.cumulative_score(),
            best_score: self.best_score,
            best_cell: self.best_cell,
        }
    }
}
