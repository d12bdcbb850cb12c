//! Minimal row-major matrix produced by the vector-to-matrix conversions.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::{LinalgError, Result};
use crate::vector::{DenseVector, Layout, VectorLike};

/// Row-major `f32` matrix with at least one row and one column.
///
/// This type exists as the output of [`DenseVector::to_column_matrix`],
/// [`DenseVector::to_row_matrix`] and [`DenseVector::outer`]; it carries
/// only the storage and accessors those outputs need. Row `i` occupies
/// `data[i * cols .. (i + 1) * cols]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct DenseMatrix {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl DenseMatrix {
    /// Wraps a row-major buffer without copying.
    pub fn from_shape_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(LinalgError::InvalidArgument {
                reason: "matrix dimensions must be at least 1x1",
            });
        }
        if data.len() != rows * cols {
            return Err(LinalgError::LengthMismatch {
                param: "data",
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(DenseMatrix { data, rows, cols })
    }

    /// Internal constructor for shapes already validated by the caller.
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<f32>) -> Self {
        debug_assert!(rows >= 1 && cols >= 1);
        debug_assert_eq!(data.len(), rows * cols);
        DenseMatrix { data, rows, cols }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Borrows one row as a contiguous slice.
    ///
    /// Panics when `row` is out of bounds.
    pub fn row_slice(&self, row: usize) -> &[f32] {
        assert!(row < self.rows, "row {} out of range for {} rows", row, self.rows);
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    /// Copies one column into a fresh vector.
    ///
    /// Panics when `col` is out of bounds.
    pub fn column(&self, col: usize) -> DenseVector {
        assert!(col < self.cols, "column {} out of range for {} columns", col, self.cols);
        let values = (0..self.rows)
            .map(|row| self.data[self.offset(row, col)])
            .collect();
        DenseVector::new_unchecked(values)
    }

    /// Borrows one column as a strided, non-contiguous vector view.
    ///
    /// Panics when `col` is out of bounds.
    pub fn column_view(&self, col: usize) -> ColumnView<'_> {
        assert!(col < self.cols, "column {} out of range for {} columns", col, self.cols);
        ColumnView {
            data: &self.data[col..],
            stride: self.cols,
            rows: self.rows,
        }
    }

    /// The whole row-major buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.data.clone()
    }
}

/// Unvalidated wire form; conversion routes through
/// [`DenseMatrix::from_shape_vec`] so deserialized matrices satisfy the
/// same shape rules as constructed ones.
#[derive(Deserialize)]
struct RawMatrix {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl TryFrom<RawMatrix> for DenseMatrix {
    type Error = LinalgError;

    fn try_from(raw: RawMatrix) -> Result<DenseMatrix> {
        DenseMatrix::from_shape_vec(raw.rows, raw.cols, raw.data)
    }
}

impl Index<(usize, usize)> for DenseMatrix {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        assert!(row < self.rows && col < self.cols);
        &self.data[self.offset(row, col)]
    }
}

impl IndexMut<(usize, usize)> for DenseMatrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        assert!(row < self.rows && col < self.cols);
        let offset = self.offset(row, col);
        &mut self.data[offset]
    }
}

/// Borrowed view of one matrix column.
///
/// Column elements stride through the row-major buffer, so the view has no
/// contiguous backing and binary operations serve it element by element.
#[derive(Debug, Clone, Copy)]
pub struct ColumnView<'a> {
    /// Matrix buffer starting at the column's first element.
    data: &'a [f32],
    stride: usize,
    rows: usize,
}

impl VectorLike for ColumnView<'_> {
    fn len(&self) -> usize {
        self.rows
    }

    fn at(&self, index: usize) -> f32 {
        self.data[index * self.stride]
    }

    fn layout(&self) -> Layout<'_> {
        Layout::Virtual
    }
}
