//! Bounded parallel loops used by the elementwise kernels and reductions.
//!
//! Thin wrappers over the rayon pool that fall back to plain loops below
//! [`PARALLEL_MIN_LEN`], so short vectors never pay thread-pool overhead.
//! Every index in `0..len` is visited exactly once, and each output slot is
//! written by at most one task, so the loops are race-free by construction.
//! The reductions combine partial results with associative, commutative
//! operators; sums may reassociate across partitions.

use rayon::prelude::*;

/// Minimum element count before work is split across the rayon pool.
pub const PARALLEL_MIN_LEN: usize = 1 << 15;

/// `out[i] = f(i)` for every index of `out`.
pub fn map_into<F>(out: &mut [f32], f: F)
where
    F: Fn(usize) -> f32 + Sync,
{
    if out.len() < PARALLEL_MIN_LEN {
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = f(i);
        }
    } else {
        out.par_iter_mut().enumerate().for_each(|(i, slot)| *slot = f(i));
    }
}

/// `buf[i] = f(buf[i])` in place.
pub fn apply<F>(buf: &mut [f32], f: F)
where
    F: Fn(f32) -> f32 + Sync,
{
    if buf.len() < PARALLEL_MIN_LEN {
        for slot in buf.iter_mut() {
            *slot = f(*slot);
        }
    } else {
        buf.par_iter_mut().for_each(|slot| *slot = f(*slot));
    }
}

/// Sum of `f(i)` over `0..len`, accumulated in `f64`.
pub fn sum_by<F>(len: usize, f: F) -> f64
where
    F: Fn(usize) -> f64 + Sync,
{
    if len < PARALLEL_MIN_LEN {
        (0..len).map(|i| f(i)).sum()
    } else {
        (0..len).into_par_iter().map(|i| f(i)).sum()
    }
}

/// Maximum of `f(i)` over `0..len`, starting from `0.0`.
///
/// Intended for magnitudes, hence the zero identity. A NaN produced by `f`
/// propagates to the result instead of being dropped by the fold.
pub fn max_by<F>(len: usize, f: F) -> f64
where
    F: Fn(usize) -> f64 + Sync,
{
    fn join(a: f64, b: f64) -> f64 {
        if a.is_nan() || b.is_nan() {
            f64::NAN
        } else {
            a.max(b)
        }
    }

    if len < PARALLEL_MIN_LEN {
        (0..len).map(|i| f(i)).fold(0.0, join)
    } else {
        (0..len).into_par_iter().map(|i| f(i)).reduce(|| 0.0, join)
    }
}

/// Calls `f(row_index, row)` for each `row_len`-sized chunk of `data`.
///
/// `data.len()` must be a multiple of `row_len`.
pub fn for_each_row<F>(data: &mut [f32], row_len: usize, f: F)
where
    F: Fn(usize, &mut [f32]) + Sync,
{
    debug_assert_eq!(data.len() % row_len, 0);
    if data.len() < PARALLEL_MIN_LEN {
        for (i, row) in data.chunks_mut(row_len).enumerate() {
            f(i, row);
        }
    } else {
        data.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(i, row)| f(i, row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_into_covers_every_index() {
        let mut out = vec![0.0f32; 100];
        map_into(&mut out, |i| i as f32);
        assert!(out.iter().enumerate().all(|(i, &v)| v == i as f32));

        // Above the split threshold the same contract holds.
        let mut big = vec![0.0f32; PARALLEL_MIN_LEN + 17];
        map_into(&mut big, |i| (i % 7) as f32);
        assert!(big.iter().enumerate().all(|(i, &v)| v == (i % 7) as f32));
    }

    #[test]
    fn apply_transforms_in_place() {
        let mut buf = vec![1.0f32, -2.0, 3.0];
        apply(&mut buf, |x| x * 2.0);
        assert_eq!(buf, vec![2.0, -4.0, 6.0]);
    }

    #[test]
    fn sum_by_matches_sequential_total() {
        let n = PARALLEL_MIN_LEN + 3;
        let total = sum_by(n, |_| 1.0);
        assert_eq!(total, n as f64);
    }

    #[test]
    fn max_by_finds_largest() {
        let values = [3.0f64, 9.0, 1.0, 9.0, 4.0];
        assert_eq!(max_by(values.len(), |i| values[i]), 9.0);
        assert_eq!(max_by(0, |_| 1.0), 0.0);
    }

    #[test]
    fn max_by_propagates_nan() {
        let values = [3.0f64, f64::NAN, 1.0];
        assert!(max_by(values.len(), |i| values[i]).is_nan());
    }

    #[test]
    fn for_each_row_sees_disjoint_chunks() {
        let mut data = vec![0.0f32; 12];
        for_each_row(&mut data, 4, |i, row| {
            for slot in row.iter_mut() {
                *slot = i as f32;
            }
        });
        assert_eq!(data[0..4], [0.0; 4]);
        assert_eq!(data[4..8], [1.0; 4]);
        assert_eq!(data[8..12], [2.0; 4]);
    }
}
