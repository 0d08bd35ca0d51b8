use super::{Direction, OffsetCoordinate, Size};

pub mod square;

use square::Square;

/// A bounded, non-wrapping grid of square cells.
///
/// Cells are stored row-major, so the cell at `(x, y)` has index `y * width + x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SquareGrid {
    pub size: Size,
}

impl SquareGrid {
    pub const fn new(size: Size) -> Self {
        Self { size }
    }

    #[inline]
    pub const fn width(&self) -> i32 {
        self.size.width
    }

    #[inline]
    pub const fn height(&self) -> i32 {
        self.size.height
    }

    /// The number of cells in the grid.
    #[inline]
    pub const fn cell_count(&self) -> usize {
        self.size.area()
    }

    /// Checks whether `offset_coordinate` lies inside the grid.
    #[inline]
    pub const fn contains(&self, offset_coordinate: OffsetCoordinate) -> bool {
        let [x, y] = offset_coordinate.to_array();
        x >= 0 && x < self.size.width && y >= 0 && y < self.size.height
    }

    /// Converts an offset coordinate to a cell index.
    ///
    /// Returns `None` if the coordinate is outside the grid.
    pub const fn offset_to_index(&self, offset_coordinate: OffsetCoordinate) -> Option<usize> {
        if self.contains(offset_coordinate) {
            let [x, y] = offset_coordinate.to_array();
            Some((y * self.size.width + x) as usize)
        } else {
            None
        }
    }

    /// Converts a cell index back to its offset coordinate.
    pub const fn index_to_offset(&self, index: usize) -> OffsetCoordinate {
        let width = self.size.width as usize;
        OffsetCoordinate::new((index % width) as i32, (index / width) as i32)
    }

    /// The center of the grid, rounded toward the origin.
    pub const fn center(&self) -> OffsetCoordinate {
        OffsetCoordinate::new(self.size.width / 2, self.size.height / 2)
    }

    /// Returns the coordinate one step from `offset_coordinate` in `direction`,
    /// or `None` if that step leaves the grid.
    pub fn neighbor(
        &self,
        offset_coordinate: OffsetCoordinate,
        direction: Direction,
    ) -> Option<OffsetCoordinate> {
        let neighbor = Square::from_offset(offset_coordinate)
            .neighbor(direction)
            .to_offset();
        self.contains(neighbor).then_some(neighbor)
    }
}
