//! This module contains the components of the tile in the map.
//! For now that is only the [`TileKind`](tile_kind::TileKind) stored in every layer.

pub mod tile_kind;
