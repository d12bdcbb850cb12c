//! Reductions, norms, and normalization.
//!
//! The index scans compare strictly, so the earliest of several equal
//! extrema wins and NaN elements never displace an established extremum.
//! `sum` and `sum_magnitudes` accumulate left to right in working
//! precision as part of their contract; the norms accumulate in `f64` and
//! the parallel ones may reassociate across partitions.

use crate::error::{LinalgError, Result};
use crate::parallel;

use super::DenseVector;

impl DenseVector {
    /// Index of the smallest element; the earliest wins ties.
    pub fn minimum_index(&self) -> usize {
        let mut index = 0;
        let mut min = self.values[0];
        for (i, &x) in self.values.iter().enumerate().skip(1) {
            if x < min {
                min = x;
                index = i;
            }
        }
        index
    }

    /// Index of the largest element; the earliest wins ties.
    pub fn maximum_index(&self) -> usize {
        let mut index = 0;
        let mut max = self.values[0];
        for (i, &x) in self.values.iter().enumerate().skip(1) {
            if x > max {
                max = x;
                index = i;
            }
        }
        index
    }

    /// Index of the smallest-magnitude element; the earliest wins ties.
    pub fn absolute_minimum_index(&self) -> usize {
        let mut index = 0;
        let mut min = self.values[0].abs();
        for (i, &x) in self.values.iter().enumerate().skip(1) {
            if x.abs() < min {
                min = x.abs();
                index = i;
            }
        }
        index
    }

    /// Index of the largest-magnitude element; the earliest wins ties.
    pub fn absolute_maximum_index(&self) -> usize {
        let mut index = 0;
        let mut max = self.values[0].abs();
        for (i, &x) in self.values.iter().enumerate().skip(1) {
            if x.abs() > max {
                max = x.abs();
                index = i;
            }
        }
        index
    }

    /// Smallest element.
    pub fn minimum(&self) -> f32 {
        self.values[self.minimum_index()]
    }

    /// Largest element.
    pub fn maximum(&self) -> f32 {
        self.values[self.maximum_index()]
    }

    /// Magnitude of the smallest-magnitude element.
    pub fn absolute_minimum(&self) -> f32 {
        self.values[self.absolute_minimum_index()].abs()
    }

    /// Magnitude of the largest-magnitude element.
    pub fn absolute_maximum(&self) -> f32 {
        self.values[self.absolute_maximum_index()].abs()
    }

    /// Left-to-right sum in working precision.
    ///
    /// The order is part of the contract, so callers get reproducible
    /// rounding run to run.
    pub fn sum(&self) -> f32 {
        let mut sum = 0.0f32;
        for &x in &self.values {
            sum += x;
        }
        sum
    }

    /// Left-to-right sum of magnitudes in working precision.
    pub fn sum_magnitudes(&self) -> f32 {
        let mut sum = 0.0f32;
        for &x in &self.values {
            sum += x.abs();
        }
        sum
    }

    /// Sum of magnitudes, reduced in parallel in `f64`.
    pub fn l1_norm(&self) -> f64 {
        parallel::sum_by(self.len(), |i| f64::from(self.values[i].abs()))
    }

    /// Euclidean norm via a sequential hypotenuse fold.
    ///
    /// The fold never forms a raw sum of squares, so it cannot overflow
    /// for magnitudes that fit the working type.
    pub fn l2_norm(&self) -> f64 {
        self.values
            .iter()
            .fold(0.0f64, |acc, &x| acc.hypot(f64::from(x)))
    }

    /// Largest magnitude, reduced in parallel.
    pub fn infinity_norm(&self) -> f64 {
        parallel::max_by(self.len(), |i| f64::from(self.values[i].abs()))
    }

    /// General p-norm: `(sum |x|^p)^(1/p)` for `p >= 0`.
    ///
    /// `p` of 1, 2 and `+inf` route to [`l1_norm`](Self::l1_norm),
    /// [`l2_norm`](Self::l2_norm) and
    /// [`infinity_norm`](Self::infinity_norm); a negative `p` is rejected.
    pub fn norm(&self, p: f64) -> Result<f64> {
        if p < 0.0 {
            return Err(LinalgError::InvalidArgument {
                reason: "norm order must be non-negative",
            });
        }
        if p == 1.0 {
            Ok(self.l1_norm())
        } else if p == 2.0 {
            Ok(self.l2_norm())
        } else if p == f64::INFINITY {
            Ok(self.infinity_norm())
        } else {
            let sum = parallel::sum_by(self.len(), |i| f64::from(self.values[i].abs()).powf(p));
            Ok(sum.powf(1.0 / p))
        }
    }

    /// Copy of `self` scaled to unit p-norm.
    ///
    /// A vector with zero norm comes back as an unscaled copy instead of a
    /// division by zero.
    pub fn normalize(&self, p: f64) -> Result<DenseVector> {
        let norm = self.norm(p)?;
        if norm == 0.0 {
            log::trace!("normalize: zero norm, returning unscaled copy");
            return Ok(self.clone());
        }
        Ok(self.scale((1.0 / norm) as f32))
    }
}
