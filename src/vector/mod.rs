//! Dense single-precision vectors.
//!
//! [`DenseVector`] owns one contiguous `f32` buffer and is the concrete
//! workhorse of the crate. Elementwise arithmetic lives in `arith`,
//! reductions and norms in `reduce`, and delimited-text round-trips in
//! `text`; all three extend the type through inherent impls.
//!
//! Binary operations accept any [`VectorLike`] operand. The operand's
//! [`Layout`] decides the path taken: a contiguous buffer goes through the
//! bulk kernels of the vector's provider, anything else is served element
//! by element through [`VectorLike::at`].

mod arith;
mod reduce;
mod text;

use std::ops::{Index, IndexMut};
use std::slice::{Iter, IterMut};

use rand::distributions::Distribution;
use rand::Rng;

use crate::error::{LinalgError, Result};
use crate::matrix::DenseMatrix;
use crate::provider::{self, LinalgProvider};

/// Concrete storage behind a [`VectorLike`] handle.
///
/// The dispatch layer pattern-matches on this to choose between the bulk
/// fast path and the element-by-element fallback. The enum is closed on
/// purpose: a new storage kind must state here whether it is contiguous.
#[derive(Debug, Clone, Copy)]
pub enum Layout<'a> {
    /// One contiguous, fully materialized buffer.
    Dense(&'a [f32]),
    /// No contiguous buffer; elements are only reachable through
    /// [`VectorLike::at`].
    Virtual,
}

/// Read-only access to a vector of `f32` values, independent of storage.
///
/// Implementations with contiguous storage should report it through
/// [`layout`](Self::layout) so binary operations can take the bulk path.
/// [`at`](Self::at) may panic on an out-of-range index; operations
/// validate lengths before iterating.
pub trait VectorLike {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Element at `index`.
    fn at(&self, index: usize) -> f32;

    /// The concrete storage layout, for dispatch.
    fn layout(&self) -> Layout<'_>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub(crate) fn check_len(param: &'static str, expected: usize, got: usize) -> Result<()> {
    if expected == got {
        Ok(())
    } else {
        Err(LinalgError::LengthMismatch {
            param,
            expected,
            got,
        })
    }
}

fn check_not_empty(length: usize) -> Result<()> {
    if length == 0 {
        return Err(LinalgError::InvalidArgument {
            reason: "vector length must be at least 1",
        });
    }
    Ok(())
}

/// Dense vector of `f32` values with a fixed length of at least one.
///
/// The buffer is owned exclusively; aliased mutation cannot be expressed
/// against a `DenseVector`, so elementwise kernels are free to read their
/// inputs in any order. `Clone` performs the bulk buffer copy and is the
/// cheapest way to duplicate a vector.
///
/// Every constructor installs the sequential reference provider for the
/// bulk kernels; [`with_provider`](DenseVector::with_provider) swaps in
/// another one, and vectors produced by arithmetic inherit the receiver's.
///
/// ```
/// use linvec::DenseVector;
///
/// let v = DenseVector::from_slice(&[1.0, 2.0, 3.0])?;
/// let w = v.add_scalar(1.0);
/// assert_eq!(w.as_slice(), &[2.0, 3.0, 4.0]);
/// # Ok::<(), linvec::LinalgError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DenseVector {
    values: Vec<f32>,
    provider: &'static dyn LinalgProvider,
}

impl DenseVector {
    /// Internal constructor for buffers already validated as non-empty.
    pub(crate) fn new_unchecked(values: Vec<f32>) -> Self {
        debug_assert!(!values.is_empty());
        DenseVector {
            values,
            provider: provider::reference(),
        }
    }

    /// A fresh vector holding `values`, carrying this vector's provider.
    fn with_buffer(&self, values: Vec<f32>) -> Self {
        debug_assert!(!values.is_empty());
        DenseVector {
            values,
            provider: self.provider,
        }
    }

    /// Zero-filled vector of the given length.
    pub fn zeros(length: usize) -> Result<Self> {
        Self::from_elem(length, 0.0)
    }

    /// Vector of the given length with every element set to `value`.
    pub fn from_elem(length: usize, value: f32) -> Result<Self> {
        check_not_empty(length)?;
        Ok(Self::new_unchecked(vec![value; length]))
    }

    /// Binds `values` as the vector's buffer without copying.
    ///
    /// The same allocation is handed back by [`into_vec`](Self::into_vec).
    pub fn from_vec(values: Vec<f32>) -> Result<Self> {
        check_not_empty(values.len())?;
        Ok(Self::new_unchecked(values))
    }

    /// Copies a slice into fresh storage.
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        Self::from_vec(values.to_vec())
    }

    /// Copies any vector-like value into fresh dense storage.
    ///
    /// A dense operand is copied in bulk; a virtual one element by element.
    pub fn from_vector<V>(other: &V) -> Result<Self>
    where
        V: VectorLike + ?Sized,
    {
        check_not_empty(other.len())?;
        let values = match other.layout() {
            Layout::Dense(buf) => buf.to_vec(),
            Layout::Virtual => (0..other.len()).map(|i| other.at(i)).collect(),
        };
        Ok(Self::new_unchecked(values))
    }

    /// Vector of the given length with `values[i] = f(i)`.
    pub fn from_fn<F>(length: usize, f: F) -> Result<Self>
    where
        F: FnMut(usize) -> f32,
    {
        check_not_empty(length)?;
        Ok(Self::new_unchecked((0..length).map(f).collect()))
    }

    /// Vector of the given length with one sample of `dist` per element.
    pub fn from_distribution<D, R>(length: usize, dist: &D, rng: &mut R) -> Result<Self>
    where
        D: Distribution<f32>,
        R: Rng + ?Sized,
    {
        check_not_empty(length)?;
        let values = (0..length).map(|_| dist.sample(rng)).collect();
        Ok(Self::new_unchecked(values))
    }

    /// Replaces the provider used by the bulk kernels.
    ///
    /// ```
    /// use linvec::{provider, DenseVector};
    ///
    /// let v = DenseVector::from_slice(&[1.0, 2.0])?.with_provider(provider::threaded());
    /// assert_eq!(v.dot(&v)?, 5.0);
    /// # Ok::<(), linvec::LinalgError>(())
    /// ```
    pub fn with_provider(mut self, provider: &'static dyn LinalgProvider) -> Self {
        self.provider = provider;
        self
    }

    /// The provider the bulk kernels run through.
    pub fn provider(&self) -> &'static dyn LinalgProvider {
        self.provider
    }

    /// Number of elements, always at least 1.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Checked element read.
    pub fn get(&self, index: usize) -> Result<f32> {
        self.values
            .get(index)
            .copied()
            .ok_or(LinalgError::OutOfRange {
                what: "index",
                index,
                len: self.values.len(),
            })
    }

    /// Checked element write.
    pub fn set(&mut self, index: usize, value: f32) -> Result<()> {
        let len = self.values.len();
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(LinalgError::OutOfRange {
                what: "index",
                index,
                len,
            }),
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.values
    }

    pub fn iter(&self) -> Iter<'_, f32> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, f32> {
        self.values.iter_mut()
    }

    /// Consumes the vector and returns its buffer without copying.
    pub fn into_vec(self) -> Vec<f32> {
        self.values
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.values.clone()
    }

    /// Bulk copy of all values into another vector of the same length.
    pub fn copy_into(&self, result: &mut DenseVector) -> Result<()> {
        check_len("result", self.len(), result.len())?;
        result.values.copy_from_slice(&self.values);
        Ok(())
    }

    /// Copies `count` elements starting at `index` into a fresh vector.
    ///
    /// `count` must be at least 1 and the range must lie inside the vector.
    pub fn sub_vector(&self, index: usize, count: usize) -> Result<DenseVector> {
        if count == 0 {
            return Err(LinalgError::InvalidArgument {
                reason: "subvector length must be at least 1",
            });
        }
        if index >= self.len() {
            return Err(LinalgError::OutOfRange {
                what: "index",
                index,
                len: self.len(),
            });
        }
        match index.checked_add(count) {
            Some(end) if end <= self.len() => {
                Ok(self.with_buffer(self.values[index..end].to_vec()))
            }
            _ => Err(LinalgError::OutOfRange {
                what: "subvector end",
                index: index.saturating_add(count),
                len: self.len(),
            }),
        }
    }

    /// `len x 1` matrix holding this vector as its single column.
    pub fn to_column_matrix(&self) -> DenseMatrix {
        DenseMatrix::from_parts(self.len(), 1, self.values.clone())
    }

    /// `1 x len` matrix holding this vector as its single row.
    pub fn to_row_matrix(&self) -> DenseMatrix {
        DenseMatrix::from_parts(1, self.len(), self.values.clone())
    }
}

impl VectorLike for DenseVector {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn at(&self, index: usize) -> f32 {
        self.values[index]
    }

    fn layout(&self) -> Layout<'_> {
        Layout::Dense(&self.values)
    }
}

impl VectorLike for [f32] {
    fn len(&self) -> usize {
        self.len()
    }

    fn at(&self, index: usize) -> f32 {
        self[index]
    }

    fn layout(&self) -> Layout<'_> {
        Layout::Dense(self)
    }
}

/// Owned ndarray vectors take the bulk path whenever their storage is
/// contiguous and in standard order.
impl VectorLike for ndarray::Array1<f32> {
    fn len(&self) -> usize {
        self.len()
    }

    fn at(&self, index: usize) -> f32 {
        self[index]
    }

    fn layout(&self) -> Layout<'_> {
        match self.as_slice() {
            Some(buf) => Layout::Dense(buf),
            None => Layout::Virtual,
        }
    }
}

/// ndarray views report [`Layout::Virtual`] when stepped or reversed, so
/// sliced views transparently fall back to element-by-element access.
impl VectorLike for ndarray::ArrayView1<'_, f32> {
    fn len(&self) -> usize {
        self.len()
    }

    fn at(&self, index: usize) -> f32 {
        self[index]
    }

    fn layout(&self) -> Layout<'_> {
        match self.as_slice() {
            Some(buf) => Layout::Dense(buf),
            None => Layout::Virtual,
        }
    }
}

/// Equality compares values only; the provider is a compute detail.
impl PartialEq for DenseVector {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Index<usize> for DenseVector {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.values[index]
    }
}

impl IndexMut<usize> for DenseVector {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.values[index]
    }
}

/// Collects an iterator into a vector.
///
/// Panics when the iterator yields no elements; use
/// [`DenseVector::from_vec`] for a fallible version.
impl FromIterator<f32> for DenseVector {
    fn from_iter<I: IntoIterator<Item = f32>>(iter: I) -> Self {
        let values: Vec<f32> = iter.into_iter().collect();
        assert!(!values.is_empty(), "DenseVector requires at least one element");
        Self::new_unchecked(values)
    }
}

impl From<DenseVector> for Vec<f32> {
    fn from(vector: DenseVector) -> Vec<f32> {
        vector.into_vec()
    }
}
