//! Bulk compute kernels behind the dense fast path.
//!
//! Vector arithmetic funnels its contiguous-buffer work through a
//! [`LinalgProvider`] so an accelerated implementation can be swapped in per
//! vector. [`ReferenceProvider`] is the plain sequential implementation and
//! the default for every constructor; [`ThreadedProvider`] partitions large
//! buffers across the rayon pool and defers to the sequential kernels below
//! the split threshold.

use std::fmt;

use rayon::prelude::*;

use crate::parallel::PARALLEL_MIN_LEN;

/// Elements handed to each task when a threaded kernel splits a buffer.
const CHUNK: usize = 1 << 12;

/// Low-level kernels for contiguous `f32` buffers.
///
/// Callers validate lengths before dispatching; implementations may assume
/// equal-length arguments. `dot` may reassociate its partial sums, so two
/// providers can differ in the last units of precision. `axpy` and `scale`
/// write each slot independently and must produce identical results on any
/// provider.
pub trait LinalgProvider: fmt::Debug + Send + Sync {
    /// Dot product of two equal-length buffers.
    fn dot(&self, a: &[f32], b: &[f32]) -> f32;

    /// `dst[i] += alpha * src[i]` for every index.
    fn axpy(&self, dst: &mut [f32], alpha: f32, src: &[f32]);

    /// `buf[i] *= alpha` for every index.
    fn scale(&self, alpha: f32, buf: &mut [f32]);
}

/// Plain sequential kernels. Always correct, never threaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceProvider;

impl LinalgProvider for ReferenceProvider {
    fn dot(&self, a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
    }

    fn axpy(&self, dst: &mut [f32], alpha: f32, src: &[f32]) {
        debug_assert_eq!(dst.len(), src.len());
        for (d, &s) in dst.iter_mut().zip(src.iter()) {
            *d += alpha * s;
        }
    }

    fn scale(&self, alpha: f32, buf: &mut [f32]) {
        for v in buf.iter_mut() {
            *v *= alpha;
        }
    }
}

/// Rayon-partitioned kernels for large buffers.
///
/// Buffers shorter than the crate's parallel threshold run the sequential
/// kernels unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadedProvider;

impl LinalgProvider for ThreadedProvider {
    fn dot(&self, a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len());
        if a.len() < PARALLEL_MIN_LEN {
            return ReferenceProvider.dot(a, b);
        }
        log::trace!("threaded dot over {} elements", a.len());
        a.par_chunks(CHUNK)
            .zip(b.par_chunks(CHUNK))
            .map(|(ca, cb)| ReferenceProvider.dot(ca, cb))
            .sum()
    }

    fn axpy(&self, dst: &mut [f32], alpha: f32, src: &[f32]) {
        debug_assert_eq!(dst.len(), src.len());
        if dst.len() < PARALLEL_MIN_LEN {
            return ReferenceProvider.axpy(dst, alpha, src);
        }
        log::trace!("threaded axpy over {} elements", dst.len());
        dst.par_chunks_mut(CHUNK)
            .zip(src.par_chunks(CHUNK))
            .for_each(|(cd, cs)| ReferenceProvider.axpy(cd, alpha, cs));
    }

    fn scale(&self, alpha: f32, buf: &mut [f32]) {
        if buf.len() < PARALLEL_MIN_LEN {
            return ReferenceProvider.scale(alpha, buf);
        }
        log::trace!("threaded scale over {} elements", buf.len());
        buf.par_chunks_mut(CHUNK)
            .for_each(|chunk| ReferenceProvider.scale(alpha, chunk));
    }
}

/// The default sequential provider.
pub fn reference() -> &'static dyn LinalgProvider {
    static PROVIDER: ReferenceProvider = ReferenceProvider;
    &PROVIDER
}

/// The rayon-backed provider for large workloads.
pub fn threaded() -> &'static dyn LinalgProvider {
    static PROVIDER: ThreadedProvider = ThreadedProvider;
    &PROVIDER
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp(len: usize) -> Vec<f32> {
        (0..len).map(|i| (i % 13) as f32 - 6.0).collect()
    }

    #[test]
    fn reference_dot_is_left_to_right() {
        let p = ReferenceProvider;
        assert_eq!(p.dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
        assert_eq!(p.dot(&[0.5], &[0.5]), 0.25);
    }

    #[test]
    fn axpy_accumulates() {
        let p = ReferenceProvider;
        let mut dst = vec![1.0f32, 2.0, 3.0];
        p.axpy(&mut dst, -1.0, &[3.0, 2.0, 1.0]);
        assert_eq!(dst, vec![-2.0, 0.0, 2.0]);
    }

    #[test]
    fn scale_multiplies_every_slot() {
        let p = ReferenceProvider;
        let mut buf = vec![1.0f32, -2.0, 0.5];
        p.scale(2.0, &mut buf);
        assert_eq!(buf, vec![2.0, -4.0, 1.0]);
    }

    #[test]
    fn threaded_matches_reference_above_threshold() {
        let n = PARALLEL_MIN_LEN + 41;
        let a = ramp(n);
        let b: Vec<f32> = a.iter().map(|x| x * 0.25 + 1.0).collect();

        // Dot may reassociate, so compare with a relative tolerance.
        let seq = ReferenceProvider.dot(&a, &b);
        let par = ThreadedProvider.dot(&a, &b);
        assert_relative_eq!(seq, par, max_relative = 1e-5);

        // axpy and scale are element-local and must agree exactly.
        let mut seq_dst = a.clone();
        let mut par_dst = a.clone();
        ReferenceProvider.axpy(&mut seq_dst, 0.5, &b);
        ThreadedProvider.axpy(&mut par_dst, 0.5, &b);
        assert_eq!(seq_dst, par_dst);

        let mut seq_buf = a.clone();
        let mut par_buf = a;
        ReferenceProvider.scale(-3.0, &mut seq_buf);
        ThreadedProvider.scale(-3.0, &mut par_buf);
        assert_eq!(seq_buf, par_buf);
    }

    #[test]
    fn threaded_small_input_takes_sequential_kernels() {
        let a = [1.0f32, 2.0, 3.0];
        let b = [4.0f32, 5.0, 6.0];
        assert_eq!(ThreadedProvider.dot(&a, &b), ReferenceProvider.dot(&a, &b));
    }

    #[test]
    fn statics_are_distinct_kernels() {
        assert_eq!(reference().dot(&[2.0], &[8.0]), 16.0);
        assert_eq!(threaded().dot(&[2.0], &[8.0]), 16.0);
    }
}
