//! Pairwise alignment scoring matrices.
//!
//! Both modes fill a dense `(n + 1) x (m + 1)` matrix row by row with the
//! linear-gap recurrence
//!
//! ```text
//! cell[i][j] = max(cell[i][j-1] + indel,
//!                  cell[i-1][j] + indel,
//!                  cell[i-1][j-1] + (match | mismatch))
//! ```
//!
//! - **Global**: row 0 and column 0 hold the cumulative indel penalty and
//!   the score is the bottom-right cell.
//! - **Local**: row 0 and column 0 are zero and the score is the best
//!   interior cell. Interior cells are *not* clamped at zero, so this is
//!   not textbook Smith-Waterman: a local path can carry a negative
//!   running score, and only the zeroed boundary makes it local.
//!
//! Cells are `i64`: scoring parameters are any `i32`, and a cell can sum
//! one parameter per position of both sequences.

use log::debug;

use crate::model::ScoringConfig;

/// Which boundary and score rule a matrix follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentMode {
    /// Needleman-Wunsch style, end to end
    Global,
    /// Zeroed boundary, best interior cell
    Local,
}

impl std::fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlignmentMode::Global => write!(f, "Global"),
            AlignmentMode::Local => write!(f, "Local"),
        }
    }
}

/// A cell coordinate: `i` indexes the first sequence, `j` the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub i: usize,
    pub j: usize,
}

impl Position {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

/// Dense row-major scoring matrix.
#[derive(Debug, Clone)]
pub struct AlignmentMatrix {
    data: Vec<i64>,
    rows: usize,
    cols: usize,
}

impl AlignmentMatrix {
    /// Creates a zero-filled matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0; rows * cols],
            rows,
            cols,
        }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> i64 {
        self.data[i * self.cols + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: i64) {
        self.data[i * self.cols + j] = value;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}

/// A filled matrix together with the inputs that produced it.
///
/// Traceback reads the sequences and scoring from here, so a scored
/// alignment is self-contained and is dropped as one unit.
#[derive(Debug, Clone)]
pub struct ScoredMatrix<'a> {
    pub mode: AlignmentMode,
    pub matrix: AlignmentMatrix,
    pub s1: &'a [u8],
    pub s2: &'a [u8],
    pub scoring: ScoringConfig,
    /// Alignment score for this mode
    pub score: i64,
    /// Cell traceback starts from; `None` for a local matrix with no
    /// interior cells
    pub start: Option<Position>,
}

/// Fills a global matrix for `s1` against `s2`.
pub fn global_matrix<'a>(s1: &'a [u8], s2: &'a [u8], scoring: &ScoringConfig) -> ScoredMatrix<'a> {
    let matrix = fill(s1, s2, scoring, i64::from(scoring.indel));
    let (n, m) = (s1.len(), s2.len());
    let score = matrix.get(n, m);
    debug!("global matrix {}x{} filled, score {}", n + 1, m + 1, score);

    ScoredMatrix {
        mode: AlignmentMode::Global,
        matrix,
        s1,
        s2,
        scoring: *scoring,
        score,
        start: Some(Position::new(n, m)),
    }
}

/// Fills a local matrix for `s1` against `s2`.
///
/// The best cell is found with a row-major scan that replaces the current
/// best on `<=`, so ties resolve to the last cell visited. With no interior
/// cells (either sequence empty) the score is 0 and there is no start.
pub fn local_matrix<'a>(s1: &'a [u8], s2: &'a [u8], scoring: &ScoringConfig) -> ScoredMatrix<'a> {
    let matrix = fill(s1, s2, scoring, 0);

    let mut best: Option<(i64, Position)> = None;
    for i in 1..matrix.rows() {
        for j in 1..matrix.cols() {
            let value = matrix.get(i, j);
            if best.map_or(true, |(score, _)| score <= value) {
                best = Some((value, Position::new(i, j)));
            }
        }
    }

    let (score, start) = match best {
        Some((score, pos)) => (score, Some(pos)),
        None => (0, None),
    };
    debug!(
        "local matrix {}x{} filled, score {} at {:?}",
        matrix.rows(),
        matrix.cols(),
        score,
        start
    );

    ScoredMatrix {
        mode: AlignmentMode::Local,
        matrix,
        s1,
        s2,
        scoring: *scoring,
        score,
        start,
    }
}

/// Row-major fill; `boundary_step` is added per cell along row 0 and
/// column 0.
fn fill(s1: &[u8], s2: &[u8], scoring: &ScoringConfig, boundary_step: i64) -> AlignmentMatrix {
    let rows = s1.len() + 1;
    let cols = s2.len() + 1;
    let mut matrix = AlignmentMatrix::new(rows, cols);
    let indel = i64::from(scoring.indel);

    for j in 1..cols {
        matrix.set(0, j, j as i64 * boundary_step);
    }
    for i in 1..rows {
        matrix.set(i, 0, i as i64 * boundary_step);
    }

    for i in 1..rows {
        for j in 1..cols {
            let north = matrix.get(i, j - 1) + indel;
            let west = matrix.get(i - 1, j) + indel;
            let northwest = matrix.get(i - 1, j - 1) + scoring.substitution(s1[i - 1], s2[j - 1]);
            matrix.set(i, j, north.max(west).max(northwest));
        }
    }

    matrix
}
