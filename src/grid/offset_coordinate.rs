use core::convert::From;

use glam::IVec2;

/// A coordinate in the offset coordinate system.
///
/// Offset coordinates address a cell by its column `x` and row `y`, with the origin `(0, 0)`
/// at the grid's top-left corner and `y` growing downward.
///
/// # Coordinate Ranges
///
/// `width` and `height` are the dimensions of the grid. A coordinate is inside the grid when
/// `x ∈ [0, width)` and `y ∈ [0, height)`. Coordinates outside that range are still
/// representable, they are simply not backed by a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetCoordinate(pub IVec2);

impl OffsetCoordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    pub const fn into_inner(self) -> IVec2 {
        self.0
    }

    pub const fn to_array(self) -> [i32; 2] {
        [self.0.x, self.0.y]
    }

    #[inline]
    pub const fn x(&self) -> i32 {
        self.0.x
    }

    #[inline]
    pub const fn y(&self) -> i32 {
        self.0.y
    }
}

impl From<[i32; 2]> for OffsetCoordinate {
    fn from(value: [i32; 2]) -> Self {
        OffsetCoordinate::new(value[0], value[1])
    }
}
