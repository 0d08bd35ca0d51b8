pub mod overworld;

use crate::{map_parameters::MapParameters, tile_map::TileMap};

/// A trait that allows for the generation of a tile map.
///
/// If you want to create a new map generator, you need to implement this trait.
/// The provided stages run in the order water, paths, mountains, bridges, because every stage
/// reads what the previous ones wrote.
pub trait Generator {
    fn into_inner(self) -> TileMap;

    fn tile_map_mut(&mut self) -> &mut TileMap;

    fn generate_water(&mut self, map_parameters: &MapParameters) {
        self.tile_map_mut().generate_water(&map_parameters.water);
    }

    fn generate_paths(&mut self, map_parameters: &MapParameters) {
        self.tile_map_mut().generate_paths(&map_parameters.path);
    }

    fn generate_mountains(&mut self, map_parameters: &MapParameters) {
        self.tile_map_mut()
            .generate_mountains(&map_parameters.mountain);
    }

    fn place_bridges(&mut self, map_parameters: &MapParameters) {
        self.tile_map_mut().place_bridges(&map_parameters.bridge);
    }

    fn generate(&mut self, map_parameters: &MapParameters) {
        self.generate_water(map_parameters);
        self.generate_paths(map_parameters);
        self.generate_mountains(map_parameters);
        self.place_bridges(map_parameters);
    }
}
