//! Elementwise arithmetic and the dense/virtual dispatch layer.
//!
//! Every binary operation validates lengths up front, then matches on the
//! operand's [`Layout`]: a dense operand runs through the receiver's
//! provider kernels or a parallel per-index loop, a virtual one is read
//! element by element in order. Allocate-and-return forms have `_into`
//! siblings that write a same-length result vector instead; the borrow
//! checker guarantees the result never aliases an operand.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

use crate::error::Result;
use crate::matrix::DenseMatrix;
use crate::parallel;

use super::{check_len, DenseVector, Layout, VectorLike};

impl DenseVector {
    /// `self + other`, allocated.
    pub fn add<V>(&self, other: &V) -> Result<DenseVector>
    where
        V: VectorLike + ?Sized,
    {
        check_len("other", self.len(), other.len())?;
        let mut out = self.clone();
        out.accumulate(other, 1.0);
        Ok(out)
    }

    /// `self + other`, written into `result`.
    pub fn add_into<V>(&self, other: &V, result: &mut DenseVector) -> Result<()>
    where
        V: VectorLike + ?Sized,
    {
        check_len("other", self.len(), other.len())?;
        check_len("result", self.len(), result.len())?;
        result.values.copy_from_slice(&self.values);
        result.accumulate(other, 1.0);
        Ok(())
    }

    /// `self - other`, allocated.
    pub fn sub<V>(&self, other: &V) -> Result<DenseVector>
    where
        V: VectorLike + ?Sized,
    {
        check_len("other", self.len(), other.len())?;
        let mut out = self.clone();
        out.accumulate(other, -1.0);
        Ok(out)
    }

    /// `self - other`, written into `result`.
    pub fn sub_into<V>(&self, other: &V, result: &mut DenseVector) -> Result<()>
    where
        V: VectorLike + ?Sized,
    {
        check_len("other", self.len(), other.len())?;
        check_len("result", self.len(), result.len())?;
        result.values.copy_from_slice(&self.values);
        result.accumulate(other, -1.0);
        Ok(())
    }

    /// `self[i] * other[i]` for every index, allocated.
    pub fn pointwise_mul<V>(&self, other: &V) -> Result<DenseVector>
    where
        V: VectorLike + ?Sized,
    {
        check_len("other", self.len(), other.len())?;
        let mut out = self.with_buffer(vec![0.0; self.len()]);
        self.pointwise(other, |a, b| a * b, &mut out);
        Ok(out)
    }

    /// `self[i] * other[i]`, written into `result`.
    pub fn pointwise_mul_into<V>(&self, other: &V, result: &mut DenseVector) -> Result<()>
    where
        V: VectorLike + ?Sized,
    {
        check_len("other", self.len(), other.len())?;
        check_len("result", self.len(), result.len())?;
        self.pointwise(other, |a, b| a * b, result);
        Ok(())
    }

    /// `self[i] / other[i]` for every index, allocated.
    ///
    /// Division follows IEEE semantics; a zero divisor yields an infinity
    /// or NaN rather than an error.
    pub fn pointwise_div<V>(&self, other: &V) -> Result<DenseVector>
    where
        V: VectorLike + ?Sized,
    {
        check_len("other", self.len(), other.len())?;
        let mut out = self.with_buffer(vec![0.0; self.len()]);
        self.pointwise(other, |a, b| a / b, &mut out);
        Ok(out)
    }

    /// `self[i] / other[i]`, written into `result`.
    pub fn pointwise_div_into<V>(&self, other: &V, result: &mut DenseVector) -> Result<()>
    where
        V: VectorLike + ?Sized,
    {
        check_len("other", self.len(), other.len())?;
        check_len("result", self.len(), result.len())?;
        self.pointwise(other, |a, b| a / b, result);
        Ok(())
    }

    /// `self + scalar` broadcast over every element.
    ///
    /// A zero scalar short-circuits to a plain copy, which also leaves
    /// signed zeros in the buffer untouched.
    pub fn add_scalar(&self, scalar: f32) -> DenseVector {
        if scalar == 0.0 {
            log::trace!("add_scalar: zero scalar, returning clone");
            return self.clone();
        }
        self.map_values(|x| x + scalar)
    }

    /// `self + scalar`, written into `result`.
    pub fn add_scalar_into(&self, scalar: f32, result: &mut DenseVector) -> Result<()> {
        check_len("result", self.len(), result.len())?;
        if scalar == 0.0 {
            result.values.copy_from_slice(&self.values);
            return Ok(());
        }
        self.map_values_into(result, |x| x + scalar);
        Ok(())
    }

    /// `self - scalar` broadcast over every element.
    pub fn sub_scalar(&self, scalar: f32) -> DenseVector {
        self.add_scalar(-scalar)
    }

    /// `self - scalar`, written into `result`.
    pub fn sub_scalar_into(&self, scalar: f32, result: &mut DenseVector) -> Result<()> {
        self.add_scalar_into(-scalar, result)
    }

    /// `self * scalar` through the provider's bulk kernel.
    ///
    /// A unit scalar short-circuits to a plain copy.
    pub fn scale(&self, scalar: f32) -> DenseVector {
        if scalar == 1.0 {
            log::trace!("scale: unit scalar, returning clone");
            return self.clone();
        }
        let mut out = self.clone();
        let provider = out.provider;
        provider.scale(scalar, &mut out.values);
        out
    }

    /// `self * scalar`, written into `result`.
    pub fn scale_into(&self, scalar: f32, result: &mut DenseVector) -> Result<()> {
        check_len("result", self.len(), result.len())?;
        result.values.copy_from_slice(&self.values);
        if scalar != 1.0 {
            let provider = self.provider;
            provider.scale(scalar, &mut result.values);
        }
        Ok(())
    }

    /// `self / scalar` as a true per-element division.
    ///
    /// Not rewritten as multiplication by the reciprocal, so the result is
    /// correctly rounded per element. A zero scalar yields infinities or
    /// NaNs per IEEE rules.
    pub fn div_scalar(&self, scalar: f32) -> DenseVector {
        self.map_values(|x| x / scalar)
    }

    /// `self / scalar`, written into `result`.
    pub fn div_scalar_into(&self, scalar: f32, result: &mut DenseVector) -> Result<()> {
        check_len("result", self.len(), result.len())?;
        self.map_values_into(result, |x| x / scalar);
        Ok(())
    }

    /// IEEE remainder of each element by `scalar` (sign follows `self`).
    pub fn rem_scalar(&self, scalar: f32) -> DenseVector {
        self.map_values(|x| x % scalar)
    }

    /// Remainder by `scalar`, written into `result`.
    pub fn rem_scalar_into(&self, scalar: f32, result: &mut DenseVector) -> Result<()> {
        check_len("result", self.len(), result.len())?;
        self.map_values_into(result, |x| x % scalar);
        Ok(())
    }

    /// `-self`, allocated.
    pub fn negate(&self) -> DenseVector {
        self.map_values(|x| -x)
    }

    /// `-self`, written into `result`.
    pub fn negate_into(&self, result: &mut DenseVector) -> Result<()> {
        check_len("result", self.len(), result.len())?;
        self.map_values_into(result, |x| -x);
        Ok(())
    }

    /// Dot product with any vector-like operand.
    ///
    /// A dense operand goes through the provider, whose partial sums may
    /// reassociate; a virtual operand is accumulated left to right in
    /// working precision.
    pub fn dot<V>(&self, other: &V) -> Result<f32>
    where
        V: VectorLike + ?Sized,
    {
        check_len("other", self.len(), other.len())?;
        match other.layout() {
            Layout::Dense(buf) => Ok(self.provider.dot(&self.values, buf)),
            Layout::Virtual => {
                log::trace!("dot: virtual operand, sequential fallback");
                let mut sum = 0.0f32;
                for (i, &x) in self.values.iter().enumerate() {
                    sum += x * other.at(i);
                }
                Ok(sum)
            }
        }
    }

    /// Outer product: the `self.len() x other.len()` matrix with
    /// `m[(i, j)] = self[i] * other[j]`.
    ///
    /// The operands may have different lengths; rows are filled in
    /// parallel for large outputs.
    pub fn outer(&self, other: &DenseVector) -> DenseMatrix {
        let rows = self.len();
        let cols = other.len();
        let mut data = vec![0.0f32; rows * cols];
        let u = &self.values;
        let v = &other.values;
        parallel::for_each_row(&mut data, cols, |i, row| {
            let ui = u[i];
            for (slot, &vj) in row.iter_mut().zip(v.iter()) {
                *slot = ui * vj;
            }
        });
        DenseMatrix::from_parts(rows, cols, data)
    }

    /// `self[i] += alpha * other[i]`; lengths validated by the caller.
    fn accumulate<V>(&mut self, other: &V, alpha: f32)
    where
        V: VectorLike + ?Sized,
    {
        match other.layout() {
            Layout::Dense(buf) => {
                log::trace!("accumulate: axpy fast path over {} elements", buf.len());
                let provider = self.provider;
                provider.axpy(&mut self.values, alpha, buf);
            }
            Layout::Virtual => {
                log::trace!("accumulate: virtual operand, element-by-element");
                for (i, slot) in self.values.iter_mut().enumerate() {
                    *slot += alpha * other.at(i);
                }
            }
        }
    }

    /// `result[i] = op(self[i], other[i])`; lengths validated by the caller.
    fn pointwise<V, F>(&self, other: &V, op: F, result: &mut DenseVector)
    where
        V: VectorLike + ?Sized,
        F: Fn(f32, f32) -> f32 + Sync,
    {
        match other.layout() {
            Layout::Dense(buf) => {
                let a = &self.values;
                parallel::map_into(&mut result.values, |i| op(a[i], buf[i]));
            }
            Layout::Virtual => {
                for (i, slot) in result.values.iter_mut().enumerate() {
                    *slot = op(self.values[i], other.at(i));
                }
            }
        }
    }

    /// Parallel elementwise map into a fresh vector.
    fn map_values<F>(&self, f: F) -> DenseVector
    where
        F: Fn(f32) -> f32 + Sync,
    {
        let mut out = self.with_buffer(vec![0.0; self.len()]);
        self.map_values_into_buf(&mut out.values, &f);
        out
    }

    fn map_values_into(&self, result: &mut DenseVector, f: impl Fn(f32) -> f32 + Sync) {
        self.map_values_into_buf(&mut result.values, &f);
    }

    fn map_values_into_buf(&self, out: &mut [f32], f: &(impl Fn(f32) -> f32 + Sync)) {
        let src = &self.values;
        parallel::map_into(out, |i| f(src[i]));
    }
}

/// Elementwise sum; panics on a length mismatch.
impl Add<&DenseVector> for &DenseVector {
    type Output = DenseVector;

    fn add(self, rhs: &DenseVector) -> DenseVector {
        assert_eq!(
            self.len(),
            rhs.len(),
            "vector addition requires equal-length operands"
        );
        let mut out = self.clone();
        out.accumulate(rhs, 1.0);
        out
    }
}

/// Elementwise difference; panics on a length mismatch.
impl Sub<&DenseVector> for &DenseVector {
    type Output = DenseVector;

    fn sub(self, rhs: &DenseVector) -> DenseVector {
        assert_eq!(
            self.len(),
            rhs.len(),
            "vector subtraction requires equal-length operands"
        );
        let mut out = self.clone();
        out.accumulate(rhs, -1.0);
        out
    }
}

impl Add<f32> for &DenseVector {
    type Output = DenseVector;

    fn add(self, rhs: f32) -> DenseVector {
        self.add_scalar(rhs)
    }
}

impl Sub<f32> for &DenseVector {
    type Output = DenseVector;

    fn sub(self, rhs: f32) -> DenseVector {
        self.sub_scalar(rhs)
    }
}

impl Mul<f32> for &DenseVector {
    type Output = DenseVector;

    fn mul(self, rhs: f32) -> DenseVector {
        self.scale(rhs)
    }
}

impl Div<f32> for &DenseVector {
    type Output = DenseVector;

    fn div(self, rhs: f32) -> DenseVector {
        self.div_scalar(rhs)
    }
}

impl Rem<f32> for &DenseVector {
    type Output = DenseVector;

    fn rem(self, rhs: f32) -> DenseVector {
        self.rem_scalar(rhs)
    }
}

impl Neg for &DenseVector {
    type Output = DenseVector;

    fn neg(self) -> DenseVector {
        self.negate()
    }
}

/// In-place elementwise sum; panics on a length mismatch.
impl AddAssign<&DenseVector> for DenseVector {
    fn add_assign(&mut self, rhs: &DenseVector) {
        assert_eq!(
            self.len(),
            rhs.len(),
            "vector addition requires equal-length operands"
        );
        self.accumulate(rhs, 1.0);
    }
}

/// In-place elementwise difference; panics on a length mismatch.
impl SubAssign<&DenseVector> for DenseVector {
    fn sub_assign(&mut self, rhs: &DenseVector) {
        assert_eq!(
            self.len(),
            rhs.len(),
            "vector subtraction requires equal-length operands"
        );
        self.accumulate(rhs, -1.0);
    }
}

/// In-place scaling through the provider kernel.
impl MulAssign<f32> for DenseVector {
    fn mul_assign(&mut self, rhs: f32) {
        if rhs == 1.0 {
            return;
        }
        let provider = self.provider;
        provider.scale(rhs, &mut self.values);
    }
}

impl DivAssign<f32> for DenseVector {
    fn div_assign(&mut self, rhs: f32) {
        parallel::apply(&mut self.values, |x| x / rhs);
    }
}

impl RemAssign<f32> for DenseVector {
    fn rem_assign(&mut self, rhs: f32) {
        parallel::apply(&mut self.values, |x| x % rhs);
    }
}
