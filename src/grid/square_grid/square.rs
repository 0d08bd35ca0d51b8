use std::ops::{Add, Sub};

use glam::IVec2;

use crate::grid::{direction::Direction, offset_coordinate::OffsetCoordinate};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square(IVec2);

impl Square {
    pub const fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    /// Create a new [`Square`] from an [`OffsetCoordinate`].
    pub const fn from_offset(offset_coordinate: OffsetCoordinate) -> Self {
        Self(offset_coordinate.into_inner())
    }

    pub const fn x(&self) -> i32 {
        self.0.x
    }

    pub const fn y(&self) -> i32 {
        self.0.y
    }

    pub const fn into_inner(self) -> IVec2 {
        self.0
    }

    /// Convert the [`Square`] back into an [`OffsetCoordinate`].
    pub const fn to_offset(self) -> OffsetCoordinate {
        OffsetCoordinate::new(self.x(), self.y())
    }

    /// The unit step taken when moving one square in `direction`.
    pub const fn direction_step(direction: Direction) -> Self {
        match direction {
            Direction::North => Self::new(0, -1),
            Direction::NorthEast => Self::new(1, -1),
            Direction::East => Self::new(1, 0),
            Direction::SouthEast => Self::new(1, 1),
            Direction::South => Self::new(0, 1),
            Direction::SouthWest => Self::new(-1, 1),
            Direction::West => Self::new(-1, 0),
            Direction::NorthWest => Self::new(-1, -1),
        }
    }

    /// Get [`Square`] at the given `direction` from `self`.
    pub fn neighbor(self, direction: Direction) -> Self {
        self + Self::direction_step(direction)
    }

    #[inline]
    /// Computes coordinates length as a signed integer.
    /// The length of a [`Square`] coordinate is its Manhattan distance from the origin.
    pub const fn length(self) -> i32 {
        self.0.x.abs() + self.0.y.abs()
    }

    #[inline]
    /// Computes the Manhattan distance from `self` to `rhs` as a signed integer.
    pub fn distance_to(self, rhs: Self) -> i32 {
        (self - rhs).length()
    }

    #[inline]
    /// Computes the Chebyshev (king-move) distance from `self` to `rhs`.
    pub fn chebyshev_distance_to(self, rhs: Self) -> i32 {
        let delta = (self - rhs).0.abs();
        delta.x.max(delta.y)
    }

    /// Return a [`Vec<Square>`] containing all [`Square`] which are exactly at a given Manhattan `distance` from `self`.
    /// If `distance` = 0 the [`Vec<Square>`] will be empty. \
    /// The number of returned squares is equal to `4 * distance`.
    pub fn squares_at_distance(self, distance: u32) -> Vec<Self> {
        // If distance is 0, return an empty vector
        if distance == 0 {
            return Vec::new();
        }

        let mut square_list = Vec::with_capacity((4 * distance) as usize);
        let radius = distance as i32;

        for x in -radius..=radius {
            let y1 = radius - x.abs();
            let y2 = -y1;
            square_list.push(self + Self::new(x, y1));
            if y1 != y2 {
                square_list.push(self + Self::new(x, y2));
            }
        }

        square_list
    }

    /// Return an iterator over the `(2 * radius + 1)²` squares whose Chebyshev distance to `self`
    /// is at most `radius`, including `self`, in row-major order.
    pub fn squares_in_chebyshev_distance(self, radius: u32) -> impl Iterator<Item = Self> {
        let radius = radius as i32;
        (-radius..=radius)
            .flat_map(move |y| (-radius..=radius).map(move |x| self + Self::new(x, y)))
    }
}

impl Add for Square {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Square {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Square};

    #[test]
    fn test_square_neighbor() {
        let square = Square::new(3, 3);
        assert_eq!(square.neighbor(Direction::North), Square::new(3, 2));
        assert_eq!(square.neighbor(Direction::SouthWest), Square::new(2, 4));
        for direction in Direction::ALL {
            assert_eq!(
                square.neighbor(direction).neighbor(direction.opposite_direction()),
                square
            );
        }
    }

    #[test]
    fn test_square_distances() {
        let a = Square::new(0, 0);
        let b = Square::new(3, -2);
        assert_eq!(a.distance_to(b), 5);
        assert_eq!(a.chebyshev_distance_to(b), 3);
    }

    #[test]
    fn test_squares_at_distance() {
        let center = Square::new(4, 4);
        assert!(center.squares_at_distance(0).is_empty());
        let ring = center.squares_at_distance(2);
        assert_eq!(ring.len(), 8);
        assert!(ring.iter().all(|square| square.distance_to(center) == 2));
    }

    #[test]
    fn test_squares_in_chebyshev_distance() {
        let center = Square::new(0, 0);
        let window: Vec<_> = center.squares_in_chebyshev_distance(1).collect();
        assert_eq!(window.len(), 9);
        assert_eq!(window[0], Square::new(-1, -1));
        assert_eq!(window[8], Square::new(1, 1));
        assert_eq!(center.squares_in_chebyshev_distance(2).count(), 25);
    }
}
