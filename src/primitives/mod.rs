//! Core compute primitives (Matrix).
//!
//! The dense row-major matrix everything else builds on.

mod matrix;

pub use matrix::Matrix;
