//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use bloques::prelude::*;
//! ```

pub use crate::block::BlockGrid;
pub use crate::error::{BloquesError, Result};
pub use crate::parallel::{par_matmul, ParMatMul};
pub use crate::primitives::Matrix;
