use arrayvec::ArrayVec;

use crate::{
    grid::{Direction, OffsetCoordinate, Square, SquareGrid},
    tile_component::tile_kind::TileKind,
};

use super::{Layer, TileMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// `Tile` represents a tile on the map, where the `usize` is the index of the current tile.
///
/// The index is the packed coordinate `y * width + x`, so two tiles are equal exactly when they
/// address the same cell. It is the key of every attribute set in [`TileMap`].
pub struct Tile(usize);

impl Tile {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the index of the tile.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }

    /// Creates a `Tile` from an `OffsetCoordinate` according to the specified `SquareGrid`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid. Callers that cannot guarantee the bounds
    /// should check them first with [`SquareGrid::offset_to_index`].
    pub fn from_offset(offset_coordinate: OffsetCoordinate, grid: SquareGrid) -> Self {
        let index = grid.offset_to_index(offset_coordinate).unwrap_or_else(|| {
            panic!(
                "Offset coordinate ({}, {}) is out of bounds for a {}x{} grid",
                offset_coordinate.x(),
                offset_coordinate.y(),
                grid.width(),
                grid.height()
            )
        });
        Self(index)
    }

    /// Converts a tile to the corresponding offset coordinate.
    #[inline]
    pub const fn to_offset(&self, grid: SquareGrid) -> OffsetCoordinate {
        grid.index_to_offset(self.0)
    }

    /// Returns the tile kind stored in `layer` at this tile.
    #[inline]
    pub fn kind(&self, layer: Layer, tile_map: &TileMap) -> Option<TileKind> {
        tile_map.layer_data[layer][self.0]
    }

    /// Returns the tile kind of the base layer, which is never empty.
    #[inline]
    pub fn base(&self, tile_map: &TileMap) -> TileKind {
        self.kind(Layer::Base, tile_map).unwrap_or_default()
    }

    #[inline]
    pub fn is_water(&self, tile_map: &TileMap) -> bool {
        self.base(tile_map).is_water()
    }

    #[inline]
    pub fn is_grass(&self, tile_map: &TileMap) -> bool {
        tile_map.attribute_sets.grass.contains(self)
    }

    #[inline]
    pub fn is_collision(&self, tile_map: &TileMap) -> bool {
        tile_map.attribute_sets.collision.contains(self)
    }

    #[inline]
    pub fn is_bridge(&self, tile_map: &TileMap) -> bool {
        tile_map.attribute_sets.bridge.contains(self)
    }

    /// Retrieves the neighboring tile from the current tile in the specified direction.
    ///
    /// Returns `None` if the neighbor would be outside the grid.
    pub fn neighbor_tile(&self, direction: Direction, grid: SquareGrid) -> Option<Self> {
        grid.neighbor(self.to_offset(grid), direction)
            .and_then(|offset_coordinate| grid.offset_to_index(offset_coordinate))
            .map(Self)
    }

    /// Returns the in-bounds tiles of the Moore neighborhood (up to 8), clockwise from north.
    pub fn neighbor_tiles(&self, grid: SquareGrid) -> ArrayVec<Self, 8> {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.neighbor_tile(direction, grid))
            .collect()
    }

    /// Returns an iterator over the in-bounds tiles whose Chebyshev distance to the current tile
    /// is at most `radius`, including the current tile, in row-major order.
    pub fn tiles_in_chebyshev_distance(
        &self,
        radius: u32,
        grid: SquareGrid,
    ) -> impl Iterator<Item = Self> + use<> {
        Square::from_offset(self.to_offset(grid))
            .squares_in_chebyshev_distance(radius)
            .filter_map(move |square| grid.offset_to_index(square.to_offset()))
            .map(Self)
    }
}
