use crate::{map_parameters::MapParameters, tile_map::TileMap};

use super::Generator;

/// The default generator: lakes and rivers, paths between waypoints, mountain clusters and bridges.
pub struct Overworld(TileMap);

impl Overworld {
    pub fn new(map_parameters: &MapParameters) -> Self {
        Self(TileMap::new(map_parameters))
    }
}

impl Generator for Overworld {
    fn into_inner(self) -> TileMap {
        self.0
    }

    fn tile_map_mut(&mut self) -> &mut TileMap {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        map::Generator,
        map_parameters::MapParameters,
        tile_component::tile_kind::TileKind,
        tile_map::Layer,
    };

    use super::Overworld;

    #[test]
    fn test_same_seed_same_map() {
        let map_parameters = MapParameters::new(20, 15, Some(42));

        let mut first = Overworld::new(&map_parameters);
        first.generate(&map_parameters);
        let mut second = Overworld::new(&map_parameters);
        second.generate(&map_parameters);

        assert_eq!(first.into_inner(), second.into_inner());
    }

    #[test]
    fn test_bridges_are_placed_last() {
        for seed in 0..16 {
            let map_parameters = MapParameters::new(20, 15, Some(seed));
            let mut overworld = Overworld::new(&map_parameters);
            overworld.generate(&map_parameters);
            let tile_map = overworld.into_inner();

            // Every bridge still spans water, so no later stage touched it.
            for bridge in &tile_map.bridge_list {
                for tile in bridge.tiles(tile_map.grid) {
                    assert_eq!(tile.base(&tile_map), TileKind::Water, "seed {seed}");
                    assert_eq!(tile.kind(Layer::Overlay, &tile_map), Some(TileKind::Bridge));
                }
            }
            assert_eq!(
                tile_map.count_tiles(Layer::Overlay, TileKind::Bridge),
                tile_map
                    .bridge_list
                    .iter()
                    .map(|bridge| bridge.length as usize)
                    .sum::<usize>()
            );
        }
    }
}
