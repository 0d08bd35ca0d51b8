pub mod error;
pub mod grid;
mod map;
pub mod map_parameters;
pub mod tile_component;
pub mod tile_map;
pub mod world;

use log::info;

pub use error::MapError;
pub use grid::*;
use map::{Generator, overworld::Overworld};
pub use map_parameters::*;
pub use tile_component::tile_kind::TileKind;
pub use tile_map::{AttributeSets, Bridge, BridgeOrientation, Layer, TileMap, tile::Tile};
pub use world::{Player, StepOutcome, World};

/// Generates a `width` x `height` map with the default tuning parameters.
///
/// With `seed` set, the same arguments always give the same map.
pub fn generate_map(width: i32, height: i32, seed: Option<u64>) -> Result<TileMap, MapError> {
    generate_map_with_parameters(&MapParameters::new(width, height, seed))
}

/// Validates `map_parameters` and runs every generation stage on a fresh map.
pub fn generate_map_with_parameters(map_parameters: &MapParameters) -> Result<TileMap, MapError> {
    map_parameters.validate()?;

    info!(
        "Generating {}x{} map (seed: {:?})",
        map_parameters.size.width, map_parameters.size.height, map_parameters.seed
    );

    let mut overworld = Overworld::new(map_parameters);
    overworld.generate(map_parameters);
    let tile_map = overworld.into_inner();

    info!(
        "Generated map with seed {}: {} water, {} path, {} mountain tiles and {} bridges",
        tile_map.seed,
        tile_map.count_tiles(Layer::Base, TileKind::Water),
        tile_map.count_tiles(Layer::Base, TileKind::Path),
        tile_map.count_tiles(Layer::Base, TileKind::Mountain),
        tile_map.bridge_list.len()
    );

    Ok(tile_map)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEEDS: std::ops::Range<u64> = 0..32;

    fn generate(seed: u64) -> TileMap {
        generate_map(20, 15, Some(seed)).unwrap()
    }

    #[test]
    fn test_rejects_out_of_range_sizes() {
        assert!(matches!(
            generate_map(4, 15, Some(0)),
            Err(MapError::InvalidDimensions { width: 4, height: 15, .. })
        ));
        assert!(matches!(
            generate_map(20, 0, None),
            Err(MapError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            generate_map(i32::MAX, 5, Some(0)),
            Err(MapError::InvalidDimensions { .. })
        ));
        assert!(generate_map(5, 5, Some(0)).is_ok());
    }

    #[test]
    fn test_attribute_sets_match_layers() {
        for seed in SEEDS {
            let tile_map = generate(seed);
            for tile in tile_map.all_tiles() {
                let base = tile.base(&tile_map);
                let bridged = tile.kind(Layer::Overlay, &tile_map) == Some(TileKind::Bridge);

                assert_eq!(tile.is_bridge(&tile_map), bridged, "seed {seed}");
                assert_eq!(
                    tile.is_collision(&tile_map),
                    (base == TileKind::Water || base == TileKind::Mountain) && !bridged,
                    "seed {seed}"
                );
                if tile.is_grass(&tile_map) {
                    assert_eq!(base, TileKind::Grass, "seed {seed}");
                }
            }
            assert_eq!(tile_map.derive_attribute_sets(), tile_map.attribute_sets, "seed {seed}");
        }
    }

    #[test]
    fn test_bridges_span_water_between_land() {
        for seed in SEEDS {
            let tile_map = generate(seed);
            assert!(tile_map.bridge_list.len() <= 3, "seed {seed}");

            for bridge in &tile_map.bridge_list {
                for offset in bridge.offset_coordinates() {
                    assert_eq!(tile_map.tile_at(Layer::Base, offset), Some(TileKind::Water));
                    assert!(tile_map.is_bridge(offset));
                    assert!(!tile_map.is_collision(offset));
                }
                for end in bridge.ends() {
                    assert_ne!(tile_map.tile_at(Layer::Base, end), Some(TileKind::Water), "seed {seed}");
                }
            }

            for (i, a) in tile_map.bridge_list.iter().enumerate() {
                for b in &tile_map.bridge_list[i + 1..] {
                    for offset_a in a.offset_coordinates() {
                        for offset_b in b.offset_coordinates() {
                            let distance = Square::from_offset(offset_a)
                                .chebyshev_distance_to(Square::from_offset(offset_b));
                            assert!(distance > 2, "seed {seed}: {a:?} and {b:?} are too close");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_maps_look_like_an_overworld() {
        let mut water_fraction_sum = 0.0;
        let mut maps_with_paths = 0;
        for seed in SEEDS {
            let tile_map = generate(seed);
            water_fraction_sum += tile_map.count_tiles(Layer::Base, TileKind::Water) as f64 / 300.0;
            if tile_map.count_tiles(Layer::Base, TileKind::Path) > 0 {
                maps_with_paths += 1;
            }
        }
        let mean_water_fraction = water_fraction_sum / SEEDS.count() as f64;
        assert!(
            (0.15..=0.45).contains(&mean_water_fraction),
            "mean water fraction {mean_water_fraction}"
        );
        // A path can be swallowed by water completely, but only rarely.
        assert!(maps_with_paths >= 24, "{maps_with_paths} maps with paths");
    }

    #[test]
    fn test_same_seed_same_map() {
        for seed in [0, 1, 12345, u64::MAX] {
            let first = generate(seed);
            let second = generate(seed);
            assert_eq!(first.seed, seed);
            assert_eq!(first, second);
            assert_eq!(first.to_string(), second.to_string());
        }
    }

    #[test]
    fn test_parameters_from_json() {
        let map_parameters = MapParameters::from_json_str(
            r#"{ "size": { "width": 12, "height": 9 }, "seed": 5, "bridge": { "max_bridges": 0 } }"#,
        )
        .unwrap();
        let tile_map = generate_map_with_parameters(&map_parameters).unwrap();
        assert_eq!(tile_map.width(), 12);
        assert_eq!(tile_map.height(), 9);
        assert!(tile_map.bridge_list.is_empty());
        assert_eq!(tile_map.count_tiles(Layer::Overlay, TileKind::Bridge), 0);
    }

    #[test]
    fn test_generates_without_x_bias() {
        for seed in SEEDS {
            let mut map_parameters = MapParameters::new(20, 15, Some(seed));
            map_parameters.path.step_toward_chance = 0.0;
            let tile_map = generate_map_with_parameters(&map_parameters).unwrap();
            assert_eq!(tile_map.derive_attribute_sets(), tile_map.attribute_sets);
        }
    }

    #[test]
    fn test_world_walks_a_generated_map() {
        for seed in 0..8 {
            let tile_map = generate(seed);
            let mut world = World::new(tile_map, &WorldParameters::default()).unwrap();
            assert!(!world.tile_map().is_collision(world.player().position));

            for direction in Direction::ORTHOGONAL.into_iter().cycle().take(40) {
                let before = world.player().position;
                match world.step(direction) {
                    StepOutcome::Blocked => assert_eq!(world.player().position, before),
                    StepOutcome::Moved | StepOutcome::Encounter => {
                        let position = world.player().position;
                        assert!(!world.tile_map().is_collision(position), "seed {seed}");
                        let expected_layer = if world.tile_map().is_bridge(position) {
                            Layer::Overlay
                        } else {
                            Layer::Base
                        };
                        assert_eq!(world.player().layer, expected_layer);
                    }
                }
            }
        }
    }
}
