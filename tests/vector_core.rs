//! Integration tests for DenseVector construction and element access.

use linvec::{provider, DenseVector, LinalgError, Layout, VectorLike};
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn from_vec_and_len() {
    let v = DenseVector::from_vec(vec![1.0, 2.0, 3.0]).unwrap();
    assert_eq!(v.len(), 3);
    assert!(!v.is_empty());
    assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
}

#[test]
fn empty_buffers_rejected_everywhere() {
    assert!(matches!(
        DenseVector::zeros(0),
        Err(LinalgError::InvalidArgument { .. })
    ));
    assert!(matches!(
        DenseVector::from_elem(0, 1.0),
        Err(LinalgError::InvalidArgument { .. })
    ));
    assert!(matches!(
        DenseVector::from_vec(vec![]),
        Err(LinalgError::InvalidArgument { .. })
    ));
    assert!(matches!(
        DenseVector::from_slice(&[]),
        Err(LinalgError::InvalidArgument { .. })
    ));
    assert!(matches!(
        DenseVector::from_fn(0, |i| i as f32),
        Err(LinalgError::InvalidArgument { .. })
    ));
}

#[test]
fn zeros_and_from_elem_fill() {
    let z = DenseVector::zeros(4).unwrap();
    assert!(z.iter().all(|&x| x == 0.0));

    let v = DenseVector::from_elem(5, 42.0).unwrap();
    assert_eq!(v.len(), 5);
    assert!(v.iter().all(|&x| x == 42.0));
}

#[test]
fn from_fn_receives_indices() {
    let v = DenseVector::from_fn(4, |i| (i * i) as f32).unwrap();
    assert_eq!(v.as_slice(), &[0.0, 1.0, 4.0, 9.0]);
}

#[test]
fn from_distribution_samples_in_range() {
    let dist = Uniform::new(-1.0f32, 1.0);
    let mut rng = StdRng::seed_from_u64(42);
    let v = DenseVector::from_distribution(64, &dist, &mut rng).unwrap();
    assert_eq!(v.len(), 64);
    assert!(v.iter().all(|&x| (-1.0..1.0).contains(&x)));

    // Same seed, same vector.
    let mut rng2 = StdRng::seed_from_u64(42);
    let w = DenseVector::from_distribution(64, &dist, &mut rng2).unwrap();
    assert_eq!(v, w);
}

#[test]
fn from_vector_copies_dense_and_virtual_operands() {
    let v = DenseVector::from_slice(&[1.0, 2.0, 3.0]).unwrap();
    let copy = DenseVector::from_vector(&v).unwrap();
    assert_eq!(copy, v);

    let s: &[f32] = &[4.0, 5.0];
    let from_slice = DenseVector::from_vector(s).unwrap();
    assert_eq!(from_slice.as_slice(), &[4.0, 5.0]);
}

#[test]
fn into_vec_returns_the_bound_allocation() {
    let buf = vec![1.0f32, 2.0, 3.0];
    let ptr = buf.as_ptr();
    let v = DenseVector::from_vec(buf).unwrap();
    let back = v.into_vec();
    assert_eq!(back.as_ptr(), ptr, "from_vec/into_vec must not copy");
    assert_eq!(back, vec![1.0, 2.0, 3.0]);
}

#[test]
fn to_vec_copies_and_iter_mut_writes_in_place() {
    let mut v = DenseVector::from_slice(&[1.0, 2.0, 3.0]).unwrap();
    let snapshot = v.to_vec();

    for x in v.iter_mut() {
        *x *= 2.0;
    }
    assert_eq!(v.as_slice(), &[2.0, 4.0, 6.0]);
    // The copy is detached from the vector it came from.
    assert_eq!(snapshot, vec![1.0, 2.0, 3.0]);
}

#[test]
fn collect_from_iterator() {
    let v: DenseVector = (1..=3).map(|i| i as f32).collect();
    assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
}

#[test]
#[should_panic(expected = "at least one element")]
fn collect_from_empty_iterator_panics() {
    let _: DenseVector = std::iter::empty().collect();
}

// ---------------------------------------------------------------------------
// Element access
// ---------------------------------------------------------------------------

#[test]
fn get_and_set_are_checked() {
    let mut v = DenseVector::from_slice(&[1.0, 2.0, 3.0]).unwrap();
    assert_eq!(v.get(1).unwrap(), 2.0);

    v.set(1, 20.0).unwrap();
    assert_eq!(v.get(1).unwrap(), 20.0);

    match v.get(9) {
        Err(LinalgError::OutOfRange { index, len, .. }) => {
            assert_eq!(index, 9);
            assert_eq!(len, 3);
        }
        other => panic!("expected OutOfRange, got {:?}", other),
    }
    assert!(v.set(9, 0.0).is_err());
}

#[test]
fn mut_slice_writes_are_visible_through_the_vector() {
    let mut v = DenseVector::from_slice(&[1.0, 2.0]).unwrap();
    v.as_mut_slice()[0] = 7.0;
    assert_eq!(v.get(0).unwrap(), 7.0);

    v.set(1, 9.0).unwrap();
    assert_eq!(v.as_slice(), &[7.0, 9.0]);
}

#[test]
fn indexing_sugar() {
    let mut v = DenseVector::from_slice(&[10.0, 20.0, 30.0]).unwrap();
    assert_eq!(v[0], 10.0);
    v[2] = 33.0;
    assert_eq!(v[2], 33.0);
}

#[test]
#[should_panic]
fn indexing_out_of_range_panics() {
    let v = DenseVector::from_slice(&[1.0]).unwrap();
    let _ = v[5];
}

#[test]
fn sub_vector_copies_a_range() {
    let v = DenseVector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    let sub = v.sub_vector(1, 3).unwrap();
    assert_eq!(sub.as_slice(), &[2.0, 3.0, 4.0]);

    // A full-length subvector is a copy.
    assert_eq!(v.sub_vector(0, 5).unwrap(), v);
}

#[test]
fn sub_vector_rejects_bad_ranges() {
    let v = DenseVector::from_slice(&[1.0, 2.0, 3.0]).unwrap();
    assert!(matches!(
        v.sub_vector(0, 0),
        Err(LinalgError::InvalidArgument { .. })
    ));
    assert!(matches!(
        v.sub_vector(3, 1),
        Err(LinalgError::OutOfRange { .. })
    ));
    assert!(matches!(
        v.sub_vector(2, 2),
        Err(LinalgError::OutOfRange { .. })
    ));
    // A count that would overflow the end computation is an error too,
    // not a panic.
    assert!(matches!(
        v.sub_vector(1, usize::MAX),
        Err(LinalgError::OutOfRange { .. })
    ));
}

#[test]
fn copy_into_requires_equal_lengths() {
    let v = DenseVector::from_slice(&[1.0, 2.0]).unwrap();
    let mut dst = DenseVector::zeros(2).unwrap();
    v.copy_into(&mut dst).unwrap();
    assert_eq!(dst, v);

    let mut short = DenseVector::zeros(1).unwrap();
    assert!(matches!(
        v.copy_into(&mut short),
        Err(LinalgError::LengthMismatch { param: "result", .. })
    ));
}

// ---------------------------------------------------------------------------
// Copies, equality, providers
// ---------------------------------------------------------------------------

#[test]
fn clone_is_an_independent_copy() {
    let v = DenseVector::from_slice(&[1.0, 2.0]).unwrap();
    let mut c = v.clone();
    c.set(0, 9.0).unwrap();
    assert_eq!(v[0], 1.0);
    assert_eq!(c[0], 9.0);
}

#[test]
fn equality_ignores_the_provider() {
    let v = DenseVector::from_slice(&[1.0, 2.0]).unwrap();
    let t = v.clone().with_provider(provider::threaded());
    assert_eq!(v, t);
    assert_eq!(format!("{:?}", t.provider()), "ThreadedProvider");
}

#[test]
fn results_inherit_the_receivers_provider() {
    let v = DenseVector::from_slice(&[1.0, 2.0])
        .unwrap()
        .with_provider(provider::threaded());
    let sum = v.add(&v).unwrap();
    assert_eq!(format!("{:?}", sum.provider()), "ThreadedProvider");
    let sub = v.sub_vector(0, 1).unwrap();
    assert_eq!(format!("{:?}", sub.provider()), "ThreadedProvider");
}

#[test]
fn dense_vector_layout_exposes_its_buffer() {
    let v = DenseVector::from_slice(&[1.0, 2.0]).unwrap();
    match v.layout() {
        Layout::Dense(buf) => assert_eq!(buf, v.as_slice()),
        Layout::Virtual => panic!("dense vectors must report Dense layout"),
    }
}

// ---------------------------------------------------------------------------
// Matrix conversions
// ---------------------------------------------------------------------------

#[test]
fn to_column_matrix_shape_and_values() {
    let v = DenseVector::from_slice(&[1.0, 2.0, 3.0]).unwrap();
    let m = v.to_column_matrix();
    assert_eq!(m.shape(), (3, 1));
    assert_eq!(m[(0, 0)], 1.0);
    assert_eq!(m[(2, 0)], 3.0);
    assert_eq!(m.column(0), v);
}

#[test]
fn to_row_matrix_shape_and_values() {
    let v = DenseVector::from_slice(&[1.0, 2.0, 3.0]).unwrap();
    let m = v.to_row_matrix();
    assert_eq!(m.shape(), (1, 3));
    assert_eq!(m.row_slice(0), v.as_slice());
}
