//! Elimination-based operations: determinant, rank, inverse, RREF.
//!
//! All four share one row-reduction kernel with partial pivoting: at each
//! column the row with the largest absolute entry at or below the current
//! row becomes the pivot. A pivot whose magnitude is at or below the
//! tolerance from [`NumericConfig::tolerance_for`] counts as zero.
//!
//! These operations are fail-soft. Non-square input, singular input and
//! non-finite entries produce a sentinel (or a fallback matrix), never a
//! [`MatrixError`](crate::MatrixError).

use std::fmt;

use serde::Serialize;
use tracing::{debug, instrument};

use super::Matrix;
use crate::config::NumericConfig;

/// Why elimination could not produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Breakdown {
    /// A pivot vanished to working precision.
    Singular,
    /// The matrix holds NaN or an infinity.
    NonFinite,
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singular => f.write_str("singular matrix"),
            Self::NonFinite => f.write_str("non-finite entries"),
        }
    }
}

/// Outcome of [`Matrix::determinant`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Determinant {
    Value(f64),
    /// The matrix is not square.
    Undefined,
    /// Elimination broke down.
    Error(Breakdown),
}

impl Determinant {
    /// The numeric value, if one was computed.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Undefined | Self::Error(_) => None,
        }
    }
}

impl fmt::Display for Determinant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Undefined => f.write_str("Undefined (Not Square)"),
            Self::Error(why) => write!(f, "Error ({why})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Row-reduction kernel
// ---------------------------------------------------------------------------

/// Mutable row-major working copy.
struct Reducer {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
    tol: f64,
}

/// Result of a reduction pass.
struct Reduction {
    /// Pivot column for each pivot row, in row order.
    pivots: Vec<usize>,
    /// Parity of row swaps performed.
    odd_swaps: bool,
}

impl Reducer {
    fn new(m: &Matrix, config: &NumericConfig) -> Self {
        let max_abs = m.as_slice().iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
        Self {
            rows: m.rows(),
            cols: m.cols(),
            data: m.as_slice().to_vec(),
            tol: config.tolerance_for(m.rows(), m.cols(), max_abs),
        }
    }

    fn at(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        for j in 0..self.cols {
            self.data.swap(a * self.cols + j, b * self.cols + j);
        }
    }

    /// `row[target] -= factor * row[source]`, starting at column `from`.
    fn sub_scaled(&mut self, target: usize, source: usize, factor: f64, from: usize) {
        for j in from..self.cols {
            let v = self.at(source, j);
            self.data[target * self.cols + j] -= factor * v;
        }
    }

    fn scale_row(&mut self, row: usize, by: f64) {
        for j in 0..self.cols {
            self.data[row * self.cols + j] *= by;
        }
    }

    /// Reduce the leftmost `limit` columns.
    ///
    /// With `jordan == false` this is forward elimination to row-echelon
    /// form. With `jordan == true` pivot rows are normalised and entries
    /// above each pivot are cleared too (reduced row-echelon form). Columns
    /// at or beyond `limit` are carried along but never pivoted on.
    fn reduce(&mut self, limit: usize, jordan: bool) -> Reduction {
        let mut pivots = Vec::new();
        let mut odd_swaps = false;
        let mut row = 0;

        for col in 0..limit.min(self.cols) {
            if row == self.rows {
                break;
            }

            let (best, best_abs) = (row..self.rows)
                .map(|i| (i, self.at(i, col).abs()))
                .fold((row, -1.0), |acc, cand| if cand.1 > acc.1 { cand } else { acc });

            if best_abs <= self.tol {
                // Column is numerically zero below `row`; flush it.
                for i in row..self.rows {
                    self.data[i * self.cols + col] = 0.0;
                }
                continue;
            }

            if best != row {
                self.swap_rows(best, row);
                odd_swaps = !odd_swaps;
            }

            if jordan {
                let p = self.at(row, col);
                self.scale_row(row, 1.0 / p);
                self.data[row * self.cols + col] = 1.0;
            }

            let pivot = self.at(row, col);
            let targets: Vec<usize> = if jordan {
                (0..self.rows).filter(|&i| i != row).collect()
            } else {
                (row + 1..self.rows).collect()
            };
            for i in targets {
                let factor = self.at(i, col) / pivot;
                if factor != 0.0 {
                    self.sub_scaled(i, row, factor, col);
                }
                self.data[i * self.cols + col] = 0.0;
            }

            pivots.push(col);
            row += 1;
        }

        Reduction { pivots, odd_swaps }
    }

    /// Snap entries within tolerance of zero to `+0.0`.
    fn clean(&mut self) {
        let tol = self.tol;
        for x in &mut self.data {
            if x.abs() <= tol {
                *x = 0.0;
            }
        }
    }
}

fn has_non_finite(m: &Matrix) -> bool {
    m.as_slice().iter().any(|x| !x.is_finite())
}

// ---------------------------------------------------------------------------
// Public operations
// ---------------------------------------------------------------------------

impl Matrix {
    /// Determinant with default tolerances. See [`Matrix::determinant_with`].
    #[must_use]
    pub fn determinant(&self) -> Determinant {
        self.determinant_with(&NumericConfig::default())
    }

    /// Determinant via LU-style elimination: the signed product of the
    /// pivots.
    ///
    /// Returns [`Determinant::Undefined`] for a rectangular matrix and
    /// [`Determinant::Error`] when a pivot vanishes or an entry is not
    /// finite. The `0x0` determinant is `1`.
    #[must_use]
    #[instrument(skip(self, config), fields(rows = self.rows, cols = self.cols))]
    pub fn determinant_with(&self, config: &NumericConfig) -> Determinant {
        if !self.is_square() {
            return Determinant::Undefined;
        }
        if has_non_finite(self) {
            return Determinant::Error(Breakdown::NonFinite);
        }

        let n = self.rows;
        let mut r = Reducer::new(self, config);
        let red = r.reduce(n, false);
        if red.pivots.len() < n {
            debug!(rank = red.pivots.len(), "determinant: pivot vanished");
            return Determinant::Error(Breakdown::Singular);
        }

        let product: f64 = (0..n).map(|i| r.at(i, i)).product();
        let det = if red.odd_swaps { -product } else { product };
        if det.is_finite() {
            Determinant::Value(det)
        } else {
            Determinant::Error(Breakdown::NonFinite)
        }
    }

    /// Rank with default tolerances. See [`Matrix::rank_with`].
    #[must_use]
    pub fn rank(&self) -> usize {
        self.rank_with(&NumericConfig::default())
    }

    /// Number of pivots found by forward elimination.
    ///
    /// Returns `0` when an entry is not finite.
    #[must_use]
    #[instrument(skip(self, config), fields(rows = self.rows, cols = self.cols))]
    pub fn rank_with(&self, config: &NumericConfig) -> usize {
        if has_non_finite(self) {
            debug!("rank: non-finite entries");
            return 0;
        }
        let mut r = Reducer::new(self, config);
        r.reduce(self.cols, false).pivots.len()
    }

    /// Inverse with default tolerances. See [`Matrix::inverse_with`].
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        self.inverse_with(&NumericConfig::default())
    }

    /// Inverse via Gauss–Jordan elimination on `[A | I]`.
    ///
    /// Returns `None` for rectangular, singular or non-finite input.
    #[must_use]
    #[instrument(skip(self, config), fields(rows = self.rows, cols = self.cols))]
    pub fn inverse_with(&self, config: &NumericConfig) -> Option<Self> {
        if !self.is_square() || has_non_finite(self) {
            return None;
        }

        let n = self.rows;
        let mut augmented = Vec::with_capacity(2 * n * n);
        for i in 0..n {
            augmented.extend_from_slice(&self.as_slice()[i * n..(i + 1) * n]);
            augmented.extend((0..n).map(|j| if i == j { 1.0 } else { 0.0 }));
        }
        let wide = Self::from_parts(n, 2 * n, augmented);

        // Tolerance is judged on A alone; the identity half must not
        // inflate it.
        let mut r = Reducer::new(&wide, config);
        let max_abs = self.as_slice().iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
        r.tol = config.tolerance_for(n, n, max_abs);

        if r.reduce(n, true).pivots.len() < n {
            debug!("inverse: matrix is singular");
            return None;
        }

        let mut data = Vec::with_capacity(n * n);
        for i in 0..n {
            data.extend_from_slice(&r.data[i * 2 * n + n..(i + 1) * 2 * n]);
        }
        if data.iter().any(|x| !x.is_finite()) {
            return None;
        }
        Some(Self::from_parts(n, n, data))
    }

    /// RREF with default tolerances. See [`Matrix::rref_with`].
    #[must_use]
    pub fn rref(&self) -> Self {
        self.rref_with(&NumericConfig::default())
    }

    /// Reduced row-echelon form via Gauss–Jordan elimination with partial
    /// pivoting.
    ///
    /// Entries within tolerance of zero are written as exact zeros. When
    /// the input holds non-finite entries the input is returned
    /// unchanged.
    #[must_use]
    #[instrument(skip(self, config), fields(rows = self.rows, cols = self.cols))]
    pub fn rref_with(&self, config: &NumericConfig) -> Self {
        if has_non_finite(self) {
            debug!("rref: non-finite entries, returning input");
            return self.clone();
        }

        let mut r = Reducer::new(self, config);
        r.reduce(self.cols, true);
        r.clean();
        if r.data.iter().any(|x| !x.is_finite()) {
            return self.clone();
        }
        Self::from_parts(r.rows, r.cols, r.data)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
