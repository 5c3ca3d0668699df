//! Shape-checked per-cell resource storage.
//!
//! A [`ResourceGrid`] stores one `u32` quantity per world cell in row-major
//! order. The grid validates its shape against the world size at
//! construction and on every access, so out-of-range positions surface as
//! typed errors instead of panics.

use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Per-cell quantities for one resource, flattened row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGrid {
    size: Vec<u32>,
    cells: Vec<u32>,
}

impl ResourceGrid {
    /// Build a grid from explicit per-cell values.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ShapeMismatch`] if `cells.len()` differs from
    /// the product of the axis sizes, and the dimensionality/size errors
    /// from [`cell_count`] for invalid sizes.
    pub fn from_cells(size: &[u32], cells: Vec<u32>) -> Result<Self, WorldError> {
        let expected = cell_count(size)?;
        if cells.len() != expected {
            return Err(WorldError::ShapeMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            size: size.to_vec(),
            cells,
        })
    }

    /// Build a grid with every cell holding the same amount.
    ///
    /// # Errors
    ///
    /// Returns the dimensionality/size errors from [`cell_count`].
    pub fn uniform(size: &[u32], amount: u32) -> Result<Self, WorldError> {
        let count = cell_count(size)?;
        Ok(Self {
            size: size.to_vec(),
            cells: vec![amount; count],
        })
    }

    /// The quantity held at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PositionOutOfBounds`] for positions outside
    /// the grid.
    pub fn amount_at(&self, position: &[u32]) -> Result<u32, WorldError> {
        let idx = self.index_of(position)?;
        Ok(self.cells.get(idx).copied().unwrap_or(0))
    }

    /// Deduct up to `requested` units from the cell at `position`.
    ///
    /// If the cell holds fewer units than requested, the entire remaining
    /// amount is taken. Returns the units actually removed; the cell never
    /// goes negative.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PositionOutOfBounds`] for positions outside
    /// the grid.
    pub fn withdraw(&mut self, position: &[u32], requested: u32) -> Result<u32, WorldError> {
        let idx = self.index_of(position)?;
        let Some(cell) = self.cells.get_mut(idx) else {
            return Ok(0);
        };
        let taken = requested.min(*cell);
        *cell = cell.saturating_sub(taken);
        Ok(taken)
    }

    /// Extent of each axis.
    pub fn size(&self) -> &[u32] {
        &self.size
    }

    /// Total units across all cells.
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&c| u64::from(c)).sum()
    }

    /// Row-major index of a position, validated against the grid shape.
    fn index_of(&self, position: &[u32]) -> Result<usize, WorldError> {
        let out_of_bounds = || WorldError::PositionOutOfBounds {
            position: position.to_vec(),
            size: self.size.clone(),
        };

        if position.len() != self.size.len()
            || position.iter().zip(&self.size).any(|(p, s)| p >= s)
        {
            return Err(out_of_bounds());
        }

        match *position {
            [x] => usize::try_from(x).map_err(|_| out_of_bounds()),
            [x, y] => {
                let width = usize::try_from(self.size.get(1).copied().unwrap_or(0))
                    .map_err(|_| out_of_bounds())?;
                let row = usize::try_from(x).map_err(|_| out_of_bounds())?;
                let col = usize::try_from(y).map_err(|_| out_of_bounds())?;
                row.checked_mul(width)
                    .and_then(|base| base.checked_add(col))
                    .ok_or_else(out_of_bounds)
            }
            _ => Err(WorldError::InvalidDimensionality {
                dims: position.len(),
            }),
        }
    }
}

/// Number of cells implied by a world size, validating the axis count and
/// that no axis is empty.
///
/// # Errors
///
/// Returns [`WorldError::InvalidDimensionality`] for 0 or more than 2 axes
/// and [`WorldError::EmptyAxis`] for a zero-sized axis.
pub fn cell_count(size: &[u32]) -> Result<usize, WorldError> {
    if size.is_empty() || size.len() > 2 {
        return Err(WorldError::InvalidDimensionality { dims: size.len() });
    }
    for (axis, &extent) in size.iter().enumerate() {
        if extent == 0 {
            return Err(WorldError::EmptyAxis { axis });
        }
    }
    size.iter()
        .try_fold(1_usize, |acc, &extent| {
            usize::try_from(extent)
                .ok()
                .and_then(|extent| acc.checked_mul(extent))
        })
        .ok_or(WorldError::InvalidDimensionality { dims: size.len() })
}
