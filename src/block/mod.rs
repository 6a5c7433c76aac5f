//! Block decomposition of square matrices.
//!
//! [`BlockGrid`] splits a square matrix into an N×N grid of equally sized
//! square sub-blocks and merges such a grid back into one dense matrix.
//! The parallel multiplication path is built on these two operations.

use crate::error::{BloquesError, Result};
use crate::primitives::Matrix;

/// A square grid of equally sized square sub-matrices.
///
/// Blocks are stored row-major: block `(i, j)` sits at index
/// `i * grid + j`. Uniform block shape is validated at construction, so
/// [`BlockGrid::merge`] cannot fail.
///
/// # Examples
///
/// ```
/// use bloques::block::BlockGrid;
/// use bloques::primitives::Matrix;
///
/// let m = Matrix::from_vec(4, 4, (0..16).map(f64::from).collect()).expect("4*4=16 elements");
/// let grid = BlockGrid::split(&m, 2).expect("4 is divisible by 2");
/// assert_eq!(grid.merge(), m);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BlockGrid {
    blocks: Vec<Matrix<f64>>,
    grid: usize,
    block_side: usize,
}

impl BlockGrid {
    /// Splits a square matrix into a `blocks_per_dim` × `blocks_per_dim` grid.
    ///
    /// Block `(i, l)` contains the sub-matrix with elements
    /// `matrix[i*s + j][l*s + k]` for `j, k` in `[0, s)` where
    /// `s = side / blocks_per_dim`.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not square, `blocks_per_dim` is
    /// zero, or the side is not evenly divisible by `blocks_per_dim`.
    pub fn split(matrix: &Matrix<f64>, blocks_per_dim: usize) -> Result<Self> {
        if !matrix.is_square() {
            return Err(BloquesError::shape_constraint("square matrix", matrix.shape()));
        }
        let side = matrix.n_rows();
        if blocks_per_dim == 0 || side % blocks_per_dim != 0 {
            return Err(BloquesError::shape_constraint(
                &format!("side divisible by {blocks_per_dim} blocks"),
                matrix.shape(),
            ));
        }

        let block_side = side / blocks_per_dim;
        let mut blocks = Vec::with_capacity(blocks_per_dim * blocks_per_dim);
        for i in 0..blocks_per_dim {
            for l in 0..blocks_per_dim {
                let mut data = Vec::with_capacity(block_side * block_side);
                for j in 0..block_side {
                    for k in 0..block_side {
                        data.push(matrix.get(i * block_side + j, l * block_side + k));
                    }
                }
                blocks.push(Matrix::from_vec(block_side, block_side, data)?);
            }
        }

        Ok(Self {
            blocks,
            grid: blocks_per_dim,
            block_side,
        })
    }

    /// Builds a grid from row-major blocks.
    ///
    /// # Errors
    ///
    /// Returns an error if the block count is not `grid * grid` or any
    /// block is not square of the same side as the first.
    pub fn from_blocks(grid: usize, blocks: Vec<Matrix<f64>>) -> Result<Self> {
        if grid == 0 || blocks.len() != grid * grid {
            return Err(BloquesError::Other(format!(
                "expected {} blocks for a {grid}x{grid} grid, got {}",
                grid * grid,
                blocks.len()
            )));
        }
        let block_side = blocks[0].n_rows();
        for block in &blocks {
            if block.shape() != (block_side, block_side) {
                return Err(BloquesError::shape_mismatch(
                    (block_side, block_side),
                    block.shape(),
                ));
            }
        }
        Ok(Self {
            blocks,
            grid,
            block_side,
        })
    }

    /// Number of blocks per dimension.
    #[must_use]
    pub fn grid(&self) -> usize {
        self.grid
    }

    /// Side length of each block.
    #[must_use]
    pub fn block_side(&self) -> usize {
        self.block_side
    }

    /// Borrows block `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if the block indices are out of bounds.
    #[must_use]
    pub fn block(&self, i: usize, j: usize) -> &Matrix<f64> {
        assert!(i < self.grid && j < self.grid, "block index out of bounds");
        &self.blocks[i * self.grid + j]
    }

    /// Reassembles the grid into one dense matrix.
    ///
    /// Exact inverse of [`BlockGrid::split`]: block `(ib, jb)` lands at
    /// rows `[ib*s, (ib+1)*s)` and columns `[jb*s, (jb+1)*s)`.
    #[must_use]
    pub fn merge(&self) -> Matrix<f64> {
        let side = self.grid * self.block_side;
        let mut result = Matrix::zeros(side, side);
        for i in 0..side {
            for j in 0..side {
                let ib = i / self.block_side;
                let jb = j / self.block_side;
                let ri = i % self.block_side;
                let rj = j % self.block_side;
                result.set(i, j, self.block(ib, jb).get(ri, rj));
            }
        }
        result
    }
}

#[cfg(test)]
#[path = "block_tests.rs"]
mod tests;
