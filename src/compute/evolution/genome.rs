//! Matrix manipulation utilities for evolutionary search.
//!
//! Provides random generation, crossover, and mutation operations.

use rand::prelude::*;

use crate::compute::BitMatrix;

/// Upper bound of the mutation draw, inclusive.
pub const MUTATION_DRAW_MAX: u32 = 100;
/// A child is mutated when the draw in `1..=MUTATION_DRAW_MAX` exceeds this.
pub const MUTATION_DRAW_THRESHOLD: u32 = 80;

/// Random number generator wrapper for matrix operations.
///
/// Every random draw of a run goes through one instance, so a seed fixes the
/// whole run.
pub struct MatrixRng {
    rng: StdRng,
}

impl MatrixRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Generate a matrix with every cell drawn uniformly from {0, 1}.
    pub fn random_matrix(&mut self, rows: usize, cols: usize) -> BitMatrix {
        let cells = (0..rows * cols).map(|_| self.rng.gen_range(0..2u8)).collect();
        BitMatrix::from_cells(rows, cols, cells).expect("cells are drawn from {0, 1}")
    }

    /// Generate `size` independent random matrices.
    pub fn random_population(&mut self, size: usize, rows: usize, cols: usize) -> Vec<BitMatrix> {
        (0..size).map(|_| self.random_matrix(rows, cols)).collect()
    }

    /// Uniform crossover: each cell comes from either parent on a fair coin.
    ///
    /// # Panics
    /// If the parents differ in shape.
    pub fn crossover(&mut self, parent1: &BitMatrix, parent2: &BitMatrix) -> BitMatrix {
        assert_eq!(parent1.shape(), parent2.shape(), "parent shapes differ");
        let cells = parent1
            .cells()
            .iter()
            .zip(parent2.cells())
            .map(|(&a, &b)| if self.rng.gen_bool(0.5) { a } else { b })
            .collect();
        BitMatrix::from_cells(parent1.rows(), parent1.cols(), cells)
            .expect("child takes the parents' shape and cells")
    }

    /// Flip `impact` uniformly chosen cells, with replacement.
    ///
    /// A cell picked twice flips back.
    pub fn mutate(&mut self, mut matrix: BitMatrix, impact: usize) -> BitMatrix {
        if matrix.is_empty() {
            return matrix;
        }
        let (rows, cols) = matrix.shape();
        for _ in 0..impact {
            let row = self.rng.gen_range(0..rows);
            let col = self.rng.gen_range(0..cols);
            matrix
                .flip(row, col)
                .expect("row and col are drawn inside the matrix");
        }
        matrix
    }

    /// Breed one child: crossover, then mutation one time in five.
    pub fn make_child(
        &mut self,
        parent1: &BitMatrix,
        parent2: &BitMatrix,
        mutation_impact: usize,
    ) -> BitMatrix {
        let child = self.crossover(parent1, parent2);
        if self.rng.gen_range(1..=MUTATION_DRAW_MAX) > MUTATION_DRAW_THRESHOLD {
            self.mutate(child, mutation_impact)
        } else {
            child
        }
    }

    /// Uniform index in `0..pool`.
    pub fn pick_parent(&mut self, pool: usize) -> usize {
        self.rng.gen_range(0..pool)
    }
}
