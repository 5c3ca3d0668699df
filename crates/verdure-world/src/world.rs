//! The shared environment: grid dimensions, resource stocks, tick counter.

use serde::{Deserialize, Serialize};
use verdure_types::ResourceKind;

use crate::error::WorldError;
use crate::grid::{ResourceGrid, cell_count};

/// The bounded spatial environment organisms act in.
///
/// Created once at simulation start; mutated only by resource withdrawals
/// (applied by the engine for admitted intent sets) and by [`World::advance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    size: Vec<u32>,
    tick: u64,
    water: ResourceGrid,
    food: ResourceGrid,
    obstacles: ResourceGrid,
}

impl World {
    /// Create a world of the given size.
    ///
    /// Any grid passed as `None` is materialized as all-zero cells, so the
    /// shape invariant (grid shape == world size) holds for every resource
    /// from the start.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensionality`] unless the size has 1
    /// or 2 axes, [`WorldError::EmptyAxis`] for a zero-sized axis, and
    /// [`WorldError::ShapeMismatch`] if a provided grid does not match.
    pub fn new(
        size: Vec<u32>,
        water: Option<ResourceGrid>,
        food: Option<ResourceGrid>,
        obstacles: Option<ResourceGrid>,
    ) -> Result<Self, WorldError> {
        // Validates dimensionality and axis sizes as a side effect.
        let _cells = cell_count(&size)?;

        let blank = || ResourceGrid::uniform(&size, 0);
        let water = match water {
            Some(grid) => check_shape(&size, grid)?,
            None => blank()?,
        };
        let food = match food {
            Some(grid) => check_shape(&size, grid)?,
            None => blank()?,
        };
        let obstacles = match obstacles {
            Some(grid) => check_shape(&size, grid)?,
            None => blank()?,
        };

        Ok(Self {
            size,
            tick: 0,
            water,
            food,
            obstacles,
        })
    }

    /// Number of axes (1 or 2).
    pub const fn dimensionality(&self) -> usize {
        self.size.len()
    }

    /// Extent of each axis.
    pub fn size(&self) -> &[u32] {
        &self.size
    }

    /// Current tick counter.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Advance the tick counter by one. Returns the new tick number.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::TickOverflow`] if the counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, WorldError> {
        self.tick = self.tick.checked_add(1).ok_or(WorldError::TickOverflow)?;
        Ok(self.tick)
    }

    /// Amount of `kind` available in the cell at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PositionOutOfBounds`] for invalid positions.
    pub fn available(&self, kind: ResourceKind, position: &[u32]) -> Result<u32, WorldError> {
        self.grid(kind).amount_at(position)
    }

    /// Deduct up to `requested` units of `kind` from the cell at
    /// `position`, returning the amount actually removed.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PositionOutOfBounds`] for invalid positions.
    pub fn withdraw(
        &mut self,
        kind: ResourceKind,
        position: &[u32],
        requested: u32,
    ) -> Result<u32, WorldError> {
        self.grid_mut(kind).withdraw(position, requested)
    }

    /// Obstacle value in the cell at `position`.
    ///
    /// Obstacles are stored and persisted with the world but no built-in
    /// behavior consults them yet; custom behaviors may.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PositionOutOfBounds`] for invalid positions.
    pub fn obstacle_at(&self, position: &[u32]) -> Result<u32, WorldError> {
        self.obstacles.amount_at(position)
    }

    /// Total units of `kind` remaining across the whole grid.
    pub fn total(&self, kind: ResourceKind) -> u64 {
        self.grid(kind).total()
    }

    const fn grid(&self, kind: ResourceKind) -> &ResourceGrid {
        match kind {
            ResourceKind::Water => &self.water,
            ResourceKind::Food => &self.food,
        }
    }

    fn grid_mut(&mut self, kind: ResourceKind) -> &mut ResourceGrid {
        match kind {
            ResourceKind::Water => &mut self.water,
            ResourceKind::Food => &mut self.food,
        }
    }
}

fn check_shape(size: &[u32], grid: ResourceGrid) -> Result<ResourceGrid, WorldError> {
    if grid.size() != size {
        return Err(WorldError::ShapeMismatch {
            expected: cell_count(size)?,
            actual: cell_count(grid.size()).unwrap_or(0),
        });
    }
    Ok(grid)
}
