//! Dense row-major matrix of `f64`.
//!
//! # Contracts
//!
//! Construction and the compositional operations ([`Matrix::transpose`],
//! [`Matrix::add`], [`Matrix::multiply`], [`Matrix::power`]) are
//! **fail-fast**: a shape violation returns a [`MatrixError`].
//!
//! The elimination-based operations in [`elimination`] are **fail-soft**:
//! they always return something displayable ([`Determinant`], `usize`,
//! `Option<Matrix>`, or a fallback matrix).
//!
//! Every operation returns a freshly owned matrix; results never alias
//! their operands.

pub mod elimination;

pub use elimination::{Breakdown, Determinant};

use serde::{Deserialize, Serialize};

use crate::config::NumericConfig;
use crate::error::MatrixError;

/// A validated `rows x cols` grid of real numbers.
///
/// The backing storage is a single row-major `Vec<f64>` of length
/// `rows * cols`, so the grid can never be ragged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<f64>>", try_from = "Vec<Vec<f64>>")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl Matrix {
    /// Build a matrix from nested rows.
    ///
    /// An empty outer vector yields the `0x0` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::RaggedRows`] if any row length differs from
    /// the first row's.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let Some(first) = rows.first() else {
            return Ok(Self::default());
        };
        let cols = first.len();

        if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(MatrixError::RaggedRows {
                row,
                expected: cols,
                found: bad.len(),
            });
        }

        let row_count = rows.len();
        let data = rows.into_iter().flatten().collect();
        Ok(Self {
            rows: row_count,
            cols,
            data,
        })
    }

    /// Build a `rows x cols` matrix from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DataLength`] unless `data.len() == rows * cols`.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(MatrixError::DataLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// A `rows x cols` matrix with every cell set to `fill`.
    #[must_use]
    pub fn filled(rows: usize, cols: usize, fill: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![fill; rows * cols],
        }
    }

    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(m: Matrix) -> Self {
        m.to_rows()
    }
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl Matrix {
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[must_use]
    pub const fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[must_use]
    pub const fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Entry at `(i, j)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// Row `i` as a slice, or `None` when out of bounds.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        (i < self.rows).then(|| &self.data[i * self.cols..(i + 1) * self.cols])
    }

    /// Copy out as nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows)
            .map(|i| self.data[i * self.cols..(i + 1) * self.cols].to_vec())
            .collect()
    }

    /// Compare entrywise within an absolute tolerance. Shapes must match.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.dims() == other.dims()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= tol)
    }

    /// A copy with every entry rounded to `precision` decimal places.
    #[must_use]
    pub fn rounded(&self, precision: usize) -> Self {
        let scale = 10f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
        let data = self
            .data
            .iter()
            .map(|x| {
                let r = (x * scale).round() / scale;
                if r.is_finite() { r } else { *x }
            })
            .collect();
        Self::from_parts(self.rows, self.cols, data)
    }

    /// [`Matrix::rounded`] at the configured display precision.
    #[must_use]
    pub fn rounded_for_display(&self, config: &NumericConfig) -> Self {
        self.rounded(config.display_precision)
    }

    /// A copy with `f` applied to every entry.
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::from_parts(self.rows, self.cols, self.data.iter().map(|&x| f(x)).collect())
    }

    /// Row-major backing data.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

// ---------------------------------------------------------------------------
// Algebra
// ---------------------------------------------------------------------------

impl Matrix {
    /// Swap rows and columns. Total: defined for every shape.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let (r, c) = self.dims();
        let mut data = Vec::with_capacity(r * c);
        for j in 0..c {
            for i in 0..r {
                data.push(self.data[i * c + j]);
            }
        }
        Self::from_parts(c, r, data)
    }

    /// Elementwise sum.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DimensionMismatch`] if the shapes differ.
    pub fn add(&self, other: &Self) -> Result<Self, MatrixError> {
        if self.dims() != other.dims() {
            return Err(MatrixError::DimensionMismatch {
                op: "add",
                left: self.dims(),
                right: other.dims(),
            });
        }

        let data = self.data.iter().zip(&other.data).map(|(a, b)| a + b).collect();
        Ok(Self::from_parts(self.rows, self.cols, data))
    }

    /// Matrix product `self * other`.
    ///
    /// The right operand is transposed first so both operands are walked
    /// row by row; entry `(i, j)` is the dot product of row `i` of `self`
    /// and row `j` of `other^T`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DimensionMismatch`] unless
    /// `self.cols() == other.rows()`.
    pub fn multiply(&self, other: &Self) -> Result<Self, MatrixError> {
        if self.cols != other.rows {
            return Err(MatrixError::DimensionMismatch {
                op: "multiply",
                left: self.dims(),
                right: other.dims(),
            });
        }

        let rhs_t = other.transpose();
        let width = self.cols;
        let mut data = Vec::with_capacity(self.rows * other.cols);

        for i in 0..self.rows {
            let lhs_row = &self.data[i * width..(i + 1) * width];
            for j in 0..rhs_t.rows {
                let rhs_row = &rhs_t.data[j * width..(j + 1) * width];
                data.push(lhs_row.iter().zip(rhs_row).map(|(a, b)| a * b).sum());
            }
        }

        Ok(Self::from_parts(self.rows, other.cols, data))
    }

    /// `self` multiplied by itself `n` times in total (`n >= 1`).
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidExponent`] for `n == 0` and
    /// [`MatrixError::NotSquare`] for a rectangular matrix.
    pub fn power(&self, n: u32) -> Result<Self, MatrixError> {
        if n == 0 {
            return Err(MatrixError::InvalidExponent(n));
        }
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                op: "power",
                rows: self.rows,
                cols: self.cols,
            });
        }

        let mut result = self.clone();
        for _ in 1..n {
            result = result.multiply(self)?;
        }
        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).expect("rectangular")
    }

    #[test]
    fn empty_outer_vector_is_zero_by_zero() {
        let e = Matrix::from_rows(vec![]).expect("empty is valid");
        assert_eq!(e.dims(), (0, 0));
        assert!(e.is_empty());
        assert!(e.is_square());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).expect_err("ragged");
        assert_eq!(
            err,
            MatrixError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(err.code(), ErrorCode::RaggedRows);
    }

    #[test]
    fn rows_of_zero_length_keep_their_row_count() {
        let z = Matrix::from_rows(vec![vec![], vec![]]).expect("rectangular");
        assert_eq!(z.dims(), (2, 0));
        assert_eq!(z.transpose().dims(), (0, 2));
    }

    #[test]
    fn from_flat_checks_the_length() {
        let a = Matrix::from_flat(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("2x3");
        assert_eq!(a.to_rows(), vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(a.as_slice().len(), 6);
        assert_eq!(Matrix::from_flat(3, 0, vec![]).expect("3x0").dims(), (3, 0));

        let err = Matrix::from_flat(2, 2, vec![1.0; 3]).expect_err("short");
        assert_eq!(err, MatrixError::DataLength { rows: 2, cols: 2, len: 3 });
        assert_eq!(err.code(), ErrorCode::DataLength);
        assert_eq!(err.to_string(), "3 values cannot fill a 2x2 matrix");
    }

    #[test]
    fn filled_repeats_the_value() {
        let f = Matrix::filled(2, 3, 7.5);
        assert_eq!(f.dims(), (2, 3));
        assert_eq!(f.to_rows(), vec![vec![7.5; 3]; 2]);
        assert_eq!(Matrix::zeros(1, 2).to_rows(), vec![vec![0.0, 0.0]]);
    }

    #[test]
    fn accessors_are_bounds_checked() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        assert_eq!(a.get(1, 0), Some(3.0));
        assert_eq!(a.get(2, 0), None);
        assert_eq!(a.row(1), Some(&[3.0, 4.0][..]));
        assert_eq!(a.row(2), None);
    }

    #[test]
    fn transpose_swaps_dims() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let t = a.transpose();
        assert_eq!(t.dims(), (3, 2));
        assert_eq!(t.to_rows(), vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
        assert_eq!(Matrix::default().transpose(), Matrix::default());
    }

    #[test]
    fn add_is_elementwise() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = m(&[&[10.0, 20.0], &[30.0, 40.0]]);
        assert_eq!(
            a.add(&b).expect("same dims").to_rows(),
            vec![vec![11.0, 22.0], vec![33.0, 44.0]]
        );
    }

    #[test]
    fn add_rejects_mismatched_dims() {
        let err = Matrix::zeros(2, 2).add(&Matrix::zeros(2, 3)).expect_err("mismatch");
        assert!(matches!(err, MatrixError::DimensionMismatch { op: "add", .. }));
    }

    #[test]
    fn multiply_matches_textbook_product() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let b = m(&[&[7.0, 8.0], &[9.0, 10.0], &[11.0, 12.0]]);
        let p = a.multiply(&b).expect("compatible");
        assert_eq!(p.to_rows(), vec![vec![58.0, 64.0], vec![139.0, 154.0]]);
    }

    #[test]
    fn multiply_with_zero_inner_dimension_is_zero() {
        let a = Matrix::zeros(2, 0);
        let b = Matrix::zeros(0, 3);
        assert_eq!(a.multiply(&b).expect("compatible"), Matrix::zeros(2, 3));
    }

    #[test]
    fn multiply_rejects_incompatible_dims() {
        let err = Matrix::zeros(2, 3).multiply(&Matrix::zeros(2, 3)).expect_err("mismatch");
        assert_eq!(
            err.to_string(),
            "cannot multiply a 2x3 matrix with a 2x3 matrix"
        );
    }

    #[test]
    fn results_do_not_alias_operands() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let mut t = a.transpose();
        t.data[0] = 99.0;
        assert_eq!(a.get(0, 0), Some(1.0));
    }

    #[test]
    fn power_repeats_multiplication() {
        let a = m(&[&[1.0, 1.0], &[1.0, 0.0]]);
        assert_eq!(a.power(1).expect("valid"), a);
        // Fibonacci: [[F(n+1), F(n)], [F(n), F(n-1)]]
        assert_eq!(
            a.power(10).expect("valid").to_rows(),
            vec![vec![89.0, 55.0], vec![55.0, 34.0]]
        );
    }

    #[test]
    fn power_rejects_zero_exponent_and_rectangles() {
        assert_eq!(
            Matrix::identity(2).power(0).expect_err("n=0"),
            MatrixError::InvalidExponent(0)
        );
        let err = Matrix::zeros(2, 3).power(2).expect_err("not square");
        assert!(matches!(err, MatrixError::NotSquare { op: "power", rows: 2, cols: 3 }));
    }

    #[test]
    fn rounded_keeps_shape() {
        let a = m(&[&[1.234_56, -0.000_04]]);
        let r = a.rounded(4);
        assert_eq!(r.get(0, 0), Some(1.2346));
        assert_eq!(r.get(0, 1).map(f64::abs), Some(0.0));
    }

    #[test]
    fn display_rounding_follows_config() {
        let a = m(&[&[2.0 / 3.0]]);
        assert_eq!(a.rounded_for_display(&NumericConfig::default()).get(0, 0), Some(0.6667));

        let coarse = NumericConfig {
            display_precision: 1,
            ..NumericConfig::default()
        };
        assert_eq!(a.rounded_for_display(&coarse).get(0, 0), Some(0.7));
    }

    #[test]
    fn map_applies_to_every_entry() {
        let a = m(&[&[1.0, -2.0], &[0.0, 4.0]]);
        let signs = a.map(f64::signum);
        assert_eq!(signs.to_rows(), vec![vec![1.0, -1.0], vec![1.0, 1.0]]);
        assert_eq!(a.get(0, 1), Some(-2.0));
    }

    #[test]
    fn serializes_as_nested_rows() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let json = serde_json::to_string(&a).expect("serialize");
        assert_eq!(json, "[[1.0,2.0],[3.0,4.0]]");

        let back: Matrix = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, a);

        let ragged = serde_json::from_str::<Matrix>("[[1.0],[2.0,3.0]]");
        assert!(ragged.is_err());
    }
}
