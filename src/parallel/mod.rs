//! Parallel block multiplication.
//!
//! [`ParMatMul`] computes a matrix product by splitting both operands into
//! an N×N grid of blocks, fanning the per-block work out over a fixed pool
//! of worker threads, and merging the finished grid back into one dense
//! matrix. Each output block is owned by exactly one task, which sums its
//! partial products privately in ascending contraction order, so no
//! accumulator is ever shared between workers and results are reproducible
//! run-to-run.
//!
//! The orchestrating call is synchronous: it blocks until every block has
//! arrived or the deadline elapses. On timeout the pool is abandoned and
//! no partial result is returned.

use std::collections::VecDeque;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::block::BlockGrid;
use crate::error::{BloquesError, Result};
use crate::primitives::Matrix;

/// Minimum side length for which the block decomposition is attempted.
/// Below this, sequential multiplication wins on overhead alone.
pub const CUTOFF: usize = 128;

/// Default worker pool size.
pub const WORKERS: usize = 4;

/// Default deadline for one parallel multiplication call.
pub const DEADLINE: Duration = Duration::from_secs(100);

/// Block-decomposed multi-threaded matrix multiplication.
///
/// # Examples
///
/// ```
/// use bloques::parallel::ParMatMul;
/// use bloques::primitives::Matrix;
///
/// let m = Matrix::from_rows(&[vec![2.0, 0.0], vec![0.0, 1.0]]).expect("uniform rows");
/// let product = ParMatMul::new().multiply(&m, &m).expect("2x2 * 2x2");
/// assert_eq!(product, m.matmul(&m).expect("2x2 * 2x2"));
/// ```
#[derive(Debug, Clone)]
pub struct ParMatMul {
    cutoff: usize,
    workers: usize,
    deadline: Duration,
}

impl Default for ParMatMul {
    fn default() -> Self {
        Self::new()
    }
}

impl ParMatMul {
    /// Creates an orchestrator with the default cutoff, pool size and deadline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cutoff: CUTOFF,
            workers: WORKERS,
            deadline: DEADLINE,
        }
    }

    /// Sets the block side below which multiplication stays sequential.
    ///
    /// Clamped to at least 1.
    #[must_use]
    pub fn with_cutoff(mut self, cutoff: usize) -> Self {
        self.cutoff = cutoff.max(1);
        self
    }

    /// Sets the worker pool size. Clamped to at least 1.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Sets the deadline for one multiplication call.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Computes `a × b` using the parallel block decomposition.
    ///
    /// Falls back to sequential [`Matrix::matmul`] when `b`'s side is
    /// below the cutoff.
    ///
    /// # Errors
    ///
    /// - [`BloquesError::ShapeMismatch`] if the operands are not square,
    ///   equal-sided and cutoff-divisible (parallel path), or have an
    ///   incompatible inner dimension (sequential path).
    /// - [`BloquesError::Timeout`] if the pool misses the deadline; the
    ///   workers are abandoned and no partial result is returned.
    /// - [`BloquesError::Cancelled`] if the pool is lost before all
    ///   blocks arrive.
    pub fn multiply(&self, a: &Matrix<f64>, b: &Matrix<f64>) -> Result<Matrix<f64>> {
        if b.n_rows() < self.cutoff {
            return a.matmul(b);
        }

        if !a.is_square() || !b.is_square() || a.shape() != b.shape() {
            return Err(BloquesError::ShapeMismatch {
                expected: "equal-sided square operands".to_string(),
                actual: format!(
                    "{}x{} and {}x{}",
                    a.n_rows(),
                    a.n_cols(),
                    b.n_rows(),
                    b.n_cols()
                ),
            });
        }
        let side = b.n_rows();
        if side % self.cutoff != 0 {
            return Err(BloquesError::shape_constraint(
                &format!("side divisible by cutoff {}", self.cutoff),
                b.shape(),
            ));
        }

        let blocks = side / self.cutoff;
        let a_grid = Arc::new(BlockGrid::split(a, blocks)?);
        let b_grid = Arc::new(BlockGrid::split(b, blocks)?);

        // One task per output block; each owns its accumulator outright.
        let tasks: VecDeque<(usize, usize)> = (0..blocks)
            .flat_map(|ip| (0..blocks).map(move |jp| (ip, jp)))
            .collect();
        let queue = Arc::new(Mutex::new(tasks));
        let (tx, rx) = mpsc::channel();

        for _ in 0..self.workers {
            let queue = Arc::clone(&queue);
            let a_grid = Arc::clone(&a_grid);
            let b_grid = Arc::clone(&b_grid);
            let tx = tx.clone();
            thread::spawn(move || loop {
                let task = match queue.lock() {
                    Ok(mut q) => q.pop_front(),
                    Err(_) => return,
                };
                let Some((ip, jp)) = task else { return };
                let result = multiply_block(&a_grid, &b_grid, ip, jp);
                // A closed channel means the orchestrator gave up; stop.
                if tx.send((ip, jp, result)).is_err() {
                    return;
                }
            });
        }
        drop(tx);

        let total = blocks * blocks;
        let mut out: Vec<Option<Matrix<f64>>> = vec![None; total];
        let mut received = 0;
        let give_up_at = Instant::now() + self.deadline;
        while received < total {
            let remaining = give_up_at.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok((ip, jp, block)) => {
                    out[ip * blocks + jp] = Some(block?);
                    received += 1;
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    return Err(BloquesError::Timeout {
                        deadline: self.deadline,
                    });
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    return Err(BloquesError::Cancelled {
                        reason: "worker pool disconnected before completion".to_string(),
                    });
                }
            }
        }

        let collected: Vec<Matrix<f64>> = out.into_iter().flatten().collect();
        Ok(BlockGrid::from_blocks(blocks, collected)?.merge())
    }
}

/// Computes output block `(ip, jp)`: the sum over the contraction index of
/// `A[ip][kp] × B[kp][jp]`, accumulated in ascending `kp` order.
fn multiply_block(a: &BlockGrid, b: &BlockGrid, ip: usize, jp: usize) -> Result<Matrix<f64>> {
    let mut acc = Matrix::zeros(a.block_side(), a.block_side());
    for kp in 0..a.grid() {
        let partial = a.block(ip, kp).matmul(b.block(kp, jp))?;
        acc = acc.add(&partial)?;
    }
    Ok(acc)
}

/// Computes `a × b` with the default [`ParMatMul`] configuration.
///
/// # Errors
///
/// See [`ParMatMul::multiply`].
pub fn par_matmul(a: &Matrix<f64>, b: &Matrix<f64>) -> Result<Matrix<f64>> {
    ParMatMul::new().multiply(a, b)
}

#[cfg(test)]
#[path = "parallel_tests.rs"]
mod tests;
