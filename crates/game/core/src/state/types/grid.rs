//! Static wall layout of a level.

use std::collections::BTreeSet;

use crate::state::Position;

/// Fixed-size grid with wall cells. Everything outside the grid is solid.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    width: u32,
    height: u32,
    walls: BTreeSet<Position>,
}

impl TileGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            walls: BTreeSet::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    /// Marks a cell as wall. Returns false when the cell lies outside the grid.
    pub fn add_wall(&mut self, position: Position) -> bool {
        if !self.contains(position) {
            return false;
        }
        self.walls.insert(position);
        true
    }

    /// True when the cell blocks movement (wall or out of bounds).
    pub fn is_wall(&self, position: Position) -> bool {
        !self.contains(position) || self.walls.contains(&position)
    }

    pub fn walls(&self) -> impl Iterator<Item = Position> + '_ {
        self.walls.iter().copied()
    }
}
