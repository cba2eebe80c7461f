use bitvec::prelude::BitVec;
use thiserror::Error;

use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Spin {
    Down,
    Up,
}

impl Spin {
    #[inline(always)]
    pub fn value(self) -> i8 {
        match self {
            Spin::Up => 1,
            Spin::Down => -1,
        }
    }

    #[inline(always)]
    pub fn flipped(self) -> Spin {
        match self {
            Spin::Up => Spin::Down,
            Spin::Down => Spin::Up,
        }
    }

    #[inline(always)]
    fn from_bit(bit: bool) -> Spin {
        if bit {
            Spin::Up
        } else {
            Spin::Down
        }
    }

    #[inline(always)]
    fn bit(self) -> bool {
        self == Spin::Up
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum LatticeError {
    #[error("site ({row}, {col}) is outside of the {size}x{size} lattice")]
    OutOfRange { row: usize, col: usize, size: usize },
}

/// Square N×N grid of spins with toroidal adjacency.
///
/// One bit per site, set bit is spin up, so a site can only ever hold ±1.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Lattice {
    size: usize,
    spins: BitVec,
}

impl Lattice {
    /// Every site independently up or down with probability 1/2.
    ///
    /// # Panics
    /// If `size` is zero.
    pub fn random(size: usize, rng: &mut impl RandomSource) -> Self {
        assert!(size > 0, "lattice size must be positive");
        let spins = (0..size * size).map(|_| rng.coin()).collect();
        Self { size, spins }
    }

    /// # Panics
    /// If `size` is zero.
    pub fn uniform(size: usize, spin: Spin) -> Self {
        assert!(size > 0, "lattice size must be positive");
        Self {
            size,
            spins: BitVec::repeat(spin.bit(), size * size),
        }
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    pub fn site_count(&self) -> usize {
        self.spins.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Spin, LatticeError> {
        self.check(row, col)?;
        Ok(self.spin_at(row, col))
    }

    pub fn set(&mut self, row: usize, col: usize, spin: Spin) -> Result<(), LatticeError> {
        self.check(row, col)?;
        let index = self.index(row, col);
        self.spins.set(index, spin.bit());
        Ok(())
    }

    pub fn flip(&mut self, row: usize, col: usize) -> Result<(), LatticeError> {
        self.check(row, col)?;
        self.flip_at(row, col);
        Ok(())
    }

    /// Sum of the four toroidal neighbors, always one of -4, -2, 0, 2, 4.
    pub fn neighbor_sum(&self, row: usize, col: usize) -> Result<i8, LatticeError> {
        self.check(row, col)?;
        Ok(self.neighbor_sum_at(row, col))
    }

    pub fn count_up(&self) -> usize {
        self.spins.count_ones()
    }

    /// # Panics
    /// If `row` is not below `size()`.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Spin> + '_ {
        assert!(row < self.size, "row {row} is outside of the {0}x{0} lattice", self.size);
        let start = row * self.size;
        self.spins[start..start + self.size]
            .iter()
            .map(|bit| Spin::from_bit(*bit))
    }

    /// Row-major walk over every site.
    pub fn spins(&self) -> impl Iterator<Item = Spin> + '_ {
        self.spins.iter().map(|bit| Spin::from_bit(*bit))
    }

    #[inline(always)]
    pub(crate) fn spin_at(&self, row: usize, col: usize) -> Spin {
        Spin::from_bit(self.spins[self.index(row, col)])
    }

    #[inline(always)]
    pub(crate) fn flip_at(&mut self, row: usize, col: usize) {
        let index = self.index(row, col);
        let new_spin = !self.spins[index];
        self.spins.set(index, new_spin);
    }

    #[inline(always)]
    pub(crate) fn neighbor_sum_at(&self, row: usize, col: usize) -> i8 {
        let n = self.size;
        let up = if row == 0 { n - 1 } else { row - 1 };
        let down = if row + 1 == n { 0 } else { row + 1 };
        let left = if col == 0 { n - 1 } else { col - 1 };
        let right = if col + 1 == n { 0 } else { col + 1 };

        self.spin_at(up, col).value()
            + self.spin_at(down, col).value()
            + self.spin_at(row, left).value()
            + self.spin_at(row, right).value()
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    fn check(&self, row: usize, col: usize) -> Result<(), LatticeError> {
        if row < self.size && col < self.size {
            Ok(())
        } else {
            Err(LatticeError::OutOfRange {
                row,
                col,
                size: self.size,
            })
        }
    }
}
