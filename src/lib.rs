//! # hqr
//!
//! Symmetric eigenvalue problems by Householder tridiagonalization and Givens
//! QR iteration. Pure Rust, generic over `f32`/`f64`, no-std compatible
//! (heap allocation through `alloc`).
//!
//! ## Quick start
//!
//! ```
//! use hqr::SymmetricMatrix;
//! use hqr::linalg::{shifted_qr_iteration, QrSettings};
//!
//! // Lower triangle, row by row
//! let a = SymmetricMatrix::from_lower(3, &[
//!     4.0_f64,
//!     1.0, 3.0,
//!     0.0, 1.0, 2.0,
//! ]);
//!
//! let eig = shifted_qr_iteration(&a, true, 1e-12, 1000).unwrap();
//! let q = eig.eigenvectors().unwrap();
//! assert_eq!(q.size(), 3);
//!
//! // Or with settings, sorted ascending
//! let vals = a.eigenvalues_qr(&QrSettings::default()).unwrap();
//! assert!((vals[1] - 3.0).abs() < 1e-10);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`]: heap-allocated column-major [`SquareMatrix<T>`] (the working
//!   type of every algorithm) and packed [`SymmetricMatrix<T>`] (the input
//!   type). Multiplication, transpose, trace, residual norms, display.
//!
//! - [`linalg`]: Householder reflectors and similarity transforms,
//!   tridiagonalization, Givens QR steps, the closed-form 2×2 eigenvalue,
//!   and the unshifted and double-shift QR eigenvalue drivers. Free functions
//!   operate on `&mut impl MatrixMut<T>` or `&mut SquareMatrix<T>` in place;
//!   the drivers return a [`linalg::QrEigen`].
//!
//! - [`traits`]: element trait hierarchy:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`]: real floats (`Scalar + Float`), used by the algorithms
//!   - [`MatrixRef`] / [`MatrixMut`]: generic read/write access for algorithms
//!
//! ## Logging
//!
//! The iteration reports deflations and convergence through the [`log`]
//! facade at `debug` level, and the per-step shift at `trace` level. No
//! logger is installed by this crate.
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Hardware FPU via system libm, `std::error::Error` for `LinalgError` |
//! | `libm`    | baseline | Pure-Rust software float fallback |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod linalg;
pub mod matrix;
pub mod traits;

pub use matrix::{SquareMatrix, SymmetricMatrix};
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};
