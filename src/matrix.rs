//! Square boolean module grid produced by a QR encoder

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterMatrix {
    side: usize,
    /// Row-major, `true` = dark
    cells: Vec<bool>,
}

impl RasterMatrix {
    /// Build a matrix from row-major cells. `cells.len()` must be `side * side`.
    pub fn from_cells(side: usize, cells: Vec<bool>) -> Result<Self> {
        if side.checked_mul(side) != Some(cells.len()) {
            return Err(Error::RenderError(format!(
                "matrix is not square: side {} with {} cells",
                side,
                cells.len()
            )));
        }
        Ok(Self { side, cells })
    }

    /// An all-light matrix, mainly useful for tests and benches.
    pub fn light(side: usize) -> Self {
        Self {
            side,
            cells: vec![false; side * side],
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        row < self.side && col < self.side && self.cells[row * self.side + col]
    }

    pub fn set(&mut self, row: usize, col: usize, dark: bool) {
        if row < self.side && col < self.side {
            self.cells[row * self.side + col] = dark;
        }
    }

    pub fn dark_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Iterate `(row, col)` of every dark cell in row-major order
    pub fn dark_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let side = self.side;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, dark)| **dark)
            .map(move |(i, _)| (i / side, i % side))
    }
}
