//! Bloques: dense square-matrix algebra with a parallel block-multiplication engine.
//!
//! Bloques provides a row-major dense [`Matrix`](primitives::Matrix) with
//! sequential addition, multiplication and integer power, plus a
//! block-decomposed multiplication strategy that fans the work out over a
//! fixed worker pool and outperforms the naive triple loop on large
//! matrices.
//!
//! # Quick Start
//!
//! ```
//! use bloques::prelude::*;
//!
//! let m = Matrix::from_rows(&[
//!     vec![2.0, 0.0],
//!     vec![0.0, 1.0],
//! ]).unwrap();
//!
//! // Sequential and parallel multiplication agree.
//! let seq = m.matmul(&m).unwrap();
//! let par = par_matmul(&m, &m).unwrap();
//! assert_eq!(seq, par);
//! assert_eq!(seq, Matrix::from_rows(&[vec![4.0, 0.0], vec![0.0, 1.0]]).unwrap());
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: The dense row-major Matrix type and sequential algebra
//! - [`block`]: Splitting a square matrix into a grid of blocks and merging it back
//! - [`parallel`]: The block-decomposed multi-threaded multiplication engine
//! - [`error`]: Error taxonomy (shape mismatch, timeout, cancellation)

pub mod block;
pub mod error;
pub mod parallel;
pub mod prelude;
pub mod primitives;

pub use error::{BloquesError, Result};
pub use parallel::{par_matmul, ParMatMul};
pub use primitives::Matrix;
