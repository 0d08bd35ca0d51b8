//! This module defines the [`TileMap`] struct and its associated methods.
//! It stores the layered tiles of a generated map together with the attribute sets
//! (grass, collision, bridge) that gameplay code queries.
//! Its methods contain 2 parts:
//! 1. The storage and bookkeeping methods, included in the `mod.rs` file.
//! 2. The map generating methods, defined in the [`impls`] module (which is the submodule of this module).

use std::{collections::BTreeSet, fmt};

use enum_map::{Enum, EnumMap, enum_map};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    grid::{OffsetCoordinate, SquareGrid},
    map_parameters::MapParameters,
    tile_component::tile_kind::TileKind,
};

mod impls;
pub mod tile;

pub use impls::{Bridge, BridgeOrientation};
use tile::Tile;

#[derive(PartialEq, Debug, Clone)]
pub struct TileMap {
    /// Random number generator for the map.
    pub random_number_generator: StdRng,
    /// The seed [`TileMap::random_number_generator`] was created from.
    pub seed: u64,
    /// Grid of the map.
    pub grid: SquareGrid,
    /// Tile kind of each tile in each layer. The index of the tile kind is equal to [`Tile::index()`].
    ///
    /// [`Layer::Base`] is never `None`. In the other layers `None` means that nothing is there.
    pub layer_data: EnumMap<Layer, Vec<Option<TileKind>>>,
    /// Derived lookup sets, kept in sync with `layer_data` by every write.
    pub attribute_sets: AttributeSets,
    /// Bridges placed on the map, in placement order.
    pub bridge_list: Vec<Bridge>,
}

impl TileMap {
    /// Creates a tile map filled with grass, with empty overlay and object layers.
    ///
    /// Every tile starts in the grass set. The parameters are expected to be validated
    /// with [`MapParameters::validate`] beforehand.
    pub fn new(map_parameters: &MapParameters) -> Self {
        let seed = map_parameters.seed.unwrap_or_else(rand::random);
        let random_number_generator = StdRng::seed_from_u64(seed);

        let grid = SquareGrid::new(map_parameters.size);
        let size = grid.cell_count();

        let layer_data = enum_map! {
            Layer::Base => vec![Some(TileKind::Grass); size],
            Layer::Overlay | Layer::Objects => vec![None; size],
        };

        let attribute_sets = AttributeSets {
            grass: (0..size).map(Tile::new).collect(),
            ..Default::default()
        };

        Self {
            random_number_generator,
            seed,
            grid,
            layer_data,
            attribute_sets,
            bridge_list: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    /// Returns an iterator over all tiles in the map.
    #[must_use = "iterators are lazy and do nothing unless consumed"]
    pub fn all_tiles(&self) -> impl Iterator<Item = Tile> + use<> {
        (0..self.grid.cell_count()).map(Tile::new)
    }

    /// Returns the tile at `offset_coordinate`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the map.
    #[inline]
    pub fn tile(&self, offset_coordinate: OffsetCoordinate) -> Tile {
        Tile::from_offset(offset_coordinate, self.grid)
    }

    /// Returns the tile kind stored in `layer` at `offset_coordinate`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the map.
    pub fn tile_at(&self, layer: Layer, offset_coordinate: OffsetCoordinate) -> Option<TileKind> {
        self.tile(offset_coordinate).kind(layer, self)
    }

    /// Overwrites one cell of one layer and updates the attribute sets.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the map.
    pub fn set_tile(&mut self, layer: Layer, offset_coordinate: OffsetCoordinate, kind: TileKind) {
        let tile = self.tile(offset_coordinate);
        self.set_tile_kind(layer, tile, Some(kind));
    }

    /// Empties one cell of the overlay or object layer.
    /// Clearing a base cell turns it back into grass, because the base layer is never empty.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the map.
    pub fn clear_tile(&mut self, layer: Layer, offset_coordinate: OffsetCoordinate) {
        let tile = self.tile(offset_coordinate);
        self.set_tile_kind(layer, tile, None);
    }

    /// Writes `kind` into `layer` at `tile` and refreshes the attribute sets of that tile.
    pub(crate) fn set_tile_kind(&mut self, layer: Layer, tile: Tile, kind: Option<TileKind>) {
        match layer {
            Layer::Base => {
                self.layer_data[Layer::Base][tile.index()] = Some(kind.unwrap_or_default());
                self.refresh_attributes(tile);
            }
            Layer::Overlay => {
                self.layer_data[Layer::Overlay][tile.index()] = kind;
                self.refresh_attributes(tile);
            }
            // Objects never change how a tile is classified.
            Layer::Objects => self.layer_data[Layer::Objects][tile.index()] = kind,
        }
    }

    /// Recomputes the grass, collision and bridge membership of `tile` from its base and overlay kinds.
    fn refresh_attributes(&mut self, tile: Tile) {
        let (is_grass, is_bridge, is_collision) = AttributeSets::classify(
            tile.base(self),
            tile.kind(Layer::Overlay, self),
        );
        let attribute_sets = &mut self.attribute_sets;
        update_membership(&mut attribute_sets.grass, tile, is_grass);
        update_membership(&mut attribute_sets.bridge, tile, is_bridge);
        update_membership(&mut attribute_sets.collision, tile, is_collision);
    }

    /// Whether the player is blocked at `offset_coordinate`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the map.
    pub fn is_collision(&self, offset_coordinate: OffsetCoordinate) -> bool {
        self.tile(offset_coordinate).is_collision(self)
    }

    /// Whether landing on `offset_coordinate` may start a wild encounter.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the map.
    pub fn is_grass(&self, offset_coordinate: OffsetCoordinate) -> bool {
        self.tile(offset_coordinate).is_grass(self)
    }

    /// Whether a bridge covers `offset_coordinate`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the map.
    pub fn is_bridge(&self, offset_coordinate: OffsetCoordinate) -> bool {
        self.tile(offset_coordinate).is_bridge(self)
    }

    /// Rebuilds the attribute sets from scratch out of the raw layer data.
    ///
    /// On a consistent map the result equals [`TileMap::attribute_sets`].
    pub fn derive_attribute_sets(&self) -> AttributeSets {
        let mut attribute_sets = AttributeSets::default();
        for tile in self.all_tiles() {
            let (is_grass, is_bridge, is_collision) =
                AttributeSets::classify(tile.base(self), tile.kind(Layer::Overlay, self));
            update_membership(&mut attribute_sets.grass, tile, is_grass);
            update_membership(&mut attribute_sets.bridge, tile, is_bridge);
            update_membership(&mut attribute_sets.collision, tile, is_collision);
        }
        attribute_sets
    }

    /// Counts the tiles of `layer` holding `kind`.
    pub fn count_tiles(&self, layer: Layer, kind: TileKind) -> usize {
        self.layer_data[layer]
            .iter()
            .filter(|&&tile_kind| tile_kind == Some(kind))
            .count()
    }
}

/// Renders the map one character per tile, row by row, with overlay tiles drawn over base tiles.
impl fmt::Display for TileMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.grid.width().max(1) as usize;
        for tile in self.all_tiles() {
            let kind = tile
                .kind(Layer::Overlay, self)
                .unwrap_or_else(|| tile.base(self));
            write!(f, "{}", kind.symbol())?;
            if (tile.index() + 1) % width == 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// The layers of a [`TileMap`], drawn bottom to top.
#[derive(Enum, Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Layer {
    /// Terrain: grass, path, water and mountains. Determines collision and encounters.
    Base,
    /// Structures on top of the terrain. Currently only bridges.
    Overlay,
    /// Reserved for placed objects, the generator leaves it empty.
    Objects,
}

/// Tile sets derived from the base and overlay layers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeSets {
    /// Tiles whose base is grass, where wild encounters can happen.
    pub grass: BTreeSet<Tile>,
    /// Tiles whose base is water or mountain and that are not bridged.
    pub collision: BTreeSet<Tile>,
    /// Tiles with a bridge on the overlay layer.
    pub bridge: BTreeSet<Tile>,
}

impl AttributeSets {
    /// Returns `(is_grass, is_bridge, is_collision)` for a tile with the given base and overlay kinds.
    fn classify(base: TileKind, overlay: Option<TileKind>) -> (bool, bool, bool) {
        let is_bridge = overlay == Some(TileKind::Bridge);
        (
            base == TileKind::Grass,
            is_bridge,
            base.is_impassable() && !is_bridge,
        )
    }
}

fn update_membership(set: &mut BTreeSet<Tile>, tile: Tile, is_member: bool) {
    if is_member {
        set.insert(tile);
    } else {
        set.remove(&tile);
    }
}
