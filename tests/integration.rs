//! End-to-end tests exercising the parallel path against the sequential oracle.

use bloques::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Random square matrix with small nonnegative integer entries, so every
/// product and sum stays exactly representable in f64.
fn random_int_matrix(side: usize, seed: u64) -> Matrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<f64> = (0..side * side)
        .map(|_| f64::from(rng.gen_range(0..5)))
        .collect();
    Matrix::from_vec(side, side, data).expect("side*side elements")
}

#[test]
fn parallel_matches_sequential_on_default_cutoff_size() {
    let a = random_int_matrix(128, 42);
    let b = random_int_matrix(128, 43);
    let par = par_matmul(&a, &b).expect("128x128 operands at the default cutoff");
    let seq = a.matmul(&b).expect("128x128 * 128x128");
    assert_eq!(par, seq);
}

#[test]
fn parallel_matches_sequential_on_multi_block_grid() {
    let a = random_int_matrix(64, 1);
    let b = random_int_matrix(64, 2);
    let par = ParMatMul::new()
        .with_cutoff(16)
        .multiply(&a, &b)
        .expect("64x64 split into a 4x4 grid of blocks");
    let seq = a.matmul(&b).expect("64x64 * 64x64");
    assert_eq!(par, seq);
}

#[test]
fn identity_law_holds_through_the_parallel_path() {
    let m = random_int_matrix(32, 9);
    let id = Matrix::eye(32);
    let engine = ParMatMul::new().with_cutoff(8);
    assert_eq!(engine.multiply(&id, &m).expect("32x32 operands"), m);
    assert_eq!(engine.multiply(&m, &id).expect("32x32 operands"), m);
}

#[test]
fn timeout_fails_without_partial_result() {
    let m = random_int_matrix(256, 5);
    let result = ParMatMul::new()
        .with_deadline(Duration::ZERO)
        .multiply(&m, &m);
    match result {
        Err(BloquesError::Timeout { deadline }) => assert_eq!(deadline, Duration::ZERO),
        other => panic!("expected Timeout, got {other:?}"),
    }
}

#[test]
fn caller_can_fall_back_to_sequential_after_timeout() {
    // The library never falls back on its own; the caller decides.
    let a = random_int_matrix(128, 20);
    let b = random_int_matrix(128, 21);
    let engine = ParMatMul::new().with_deadline(Duration::ZERO);
    let fallback = match engine.multiply(&a, &b) {
        Ok(product) => product,
        Err(BloquesError::Timeout { .. }) => a.matmul(&b).expect("128x128 * 128x128"),
        Err(other) => panic!("unexpected error: {other}"),
    };
    assert_eq!(fallback, a.matmul(&b).expect("128x128 * 128x128"));
}
