//! Toroidal square grid geometry
//!
//! Cells are addressed by a single index: `row = idx / width`, `col = idx % width`.
//! Moving off any edge re-enters on the opposite edge of the same row or column.

use std::ops::Range;

use super::state::Direction;
use crate::consts::MIN_WORLD_WIDTH;
use crate::error::WorldError;

/// A `width × width` wrapping grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    size: usize,
}

impl Grid {
    pub fn new(width: usize) -> Result<Self, WorldError> {
        if width < MIN_WORLD_WIDTH {
            return Err(WorldError::WidthTooSmall { width });
        }
        let size = width
            .checked_mul(width)
            .ok_or(WorldError::WidthTooLarge { width })?;
        Ok(Self { width, size })
    }

    /// Side length
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells (`width²`)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, idx: usize) -> bool {
        idx < self.size
    }

    /// All cell indices in ascending order
    pub fn cells(&self) -> Range<usize> {
        0..self.size
    }

    pub fn row(&self, idx: usize) -> usize {
        idx / self.width
    }

    pub fn col(&self, idx: usize) -> usize {
        idx % self.width
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// The cell one step away in `direction`, wrapping at every edge
    pub fn neighbor(&self, idx: usize, direction: Direction) -> usize {
        let w = self.width;
        let (row, col) = (self.row(idx), self.col(idx));
        match direction {
            Direction::Up => self.index((row + w - 1) % w, col),
            Direction::Down => self.index((row + 1) % w, col),
            Direction::Left => self.index(row, (col + w - 1) % w),
            Direction::Right => self.index(row, (col + 1) % w),
        }
    }

    /// True if `b` is one wrapping step away from `a`
    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        Direction::ALL.iter().any(|&d| self.neighbor(a, d) == b)
    }

    /// Manhattan distance on the torus (each axis takes the shorter way round)
    pub fn distance(&self, a: usize, b: usize) -> usize {
        let axis = |x: usize, y: usize| {
            let d = x.abs_diff(y);
            d.min(self.width - d)
        };
        axis(self.row(a), self.row(b)) + axis(self.col(a), self.col(b))
    }
}
