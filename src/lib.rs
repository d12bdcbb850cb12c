//! Dense single-precision vector and matrix primitives.
//!
//! The core type is [`DenseVector`]: one contiguous `f32` buffer with
//! elementwise arithmetic, reductions and norms, and delimited-text
//! round-trips. Binary operations accept any [`VectorLike`] operand and
//! dispatch on its [`Layout`]: contiguous storage takes a bulk path
//! through the vector's [`LinalgProvider`], everything else falls back to
//! element-by-element access. ndarray vectors and views implement
//! [`VectorLike`] out of the box, as do matrix column views.
//!
//! [`DenseMatrix`] is the minimal row-major output type of the
//! matrix-producing conversions ([`DenseVector::outer`],
//! [`DenseVector::to_column_matrix`], [`DenseVector::to_row_matrix`]).
//!
//! # Quick start
//!
//! ```
//! use linvec::DenseVector;
//!
//! let v = DenseVector::from_slice(&[3.0, 4.0])?;
//! assert_eq!(v.dot(&v)?, 25.0);
//! assert!((v.l2_norm() - 5.0).abs() < 1e-12);
//!
//! let unit = v.normalize(2.0)?;
//! assert!((unit.l2_norm() - 1.0).abs() < 1e-6);
//! # Ok::<(), linvec::LinalgError>(())
//! ```

pub mod error;
pub mod format;
pub mod matrix;
pub mod parallel;
pub mod provider;
pub mod vector;

pub use error::{LinalgError, Result};
pub use format::ListFormat;
pub use matrix::{ColumnView, DenseMatrix};
pub use provider::{LinalgProvider, ReferenceProvider, ThreadedProvider};
pub use vector::{DenseVector, Layout, VectorLike};
