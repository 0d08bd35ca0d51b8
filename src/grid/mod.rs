mod direction;
mod offset_coordinate;
mod square_grid;

use serde::{Deserialize, Serialize};

pub use direction::Direction;
pub use offset_coordinate::OffsetCoordinate;
pub use square_grid::{SquareGrid, square::Square};

/// Represents the size of a grid or map with a specified width and height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// The number of cells in a grid of this size.
    ///
    /// Negative dimensions count as zero.
    pub const fn area(&self) -> usize {
        if self.width <= 0 || self.height <= 0 {
            0
        } else {
            self.width as usize * self.height as usize
        }
    }
}
