//! Configuration for map generation.
//!
//! Every tuning constant used by the generation stages lives here, with defaults that
//! reproduce the classic 20x15 overworld. Parameters can be built in code or loaded from
//! JSON, where every missing field falls back to its default:
//!
//! ```rust
//! use creature_map_generator::MapParameters;
//!
//! let map_parameters =
//!     MapParameters::from_json_str(r#"{ "size": { "width": 32, "height": 24 }, "seed": 7 }"#)
//!         .unwrap();
//! assert_eq!(map_parameters.water.relaxation_passes, 4);
//! ```

use serde::{Deserialize, Serialize};

use crate::{error::MapError, grid::Size};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapParameters {
    pub size: Size,
    /// Seed of the random number generator.
    ///
    /// When it is `None`, a fresh seed is drawn for every map and recorded in [`TileMap::seed`](crate::tile_map::TileMap::seed).
    pub seed: Option<u64>,
    pub water: WaterParameters,
    pub path: PathParameters,
    pub mountain: MountainParameters,
    pub bridge: BridgeParameters,
    pub world: WorldParameters,
}

impl MapParameters {
    /// The smallest width or height the generation stages can work with.
    ///
    /// Mountain centers keep a 2-cell margin from the border, so anything smaller
    /// leaves no room to place them.
    pub const MIN_DIMENSION: i32 = 5;

    /// The largest width or height a map can have.
    pub const MAX_DIMENSION: i32 = 1024;

    /// Creates parameters with default tuning for a map of the given size.
    pub fn new(width: i32, height: i32, seed: Option<u64>) -> Self {
        Self {
            size: Size::new(width, height),
            seed,
            ..Default::default()
        }
    }

    /// Parses parameters from a JSON document. Missing fields take their default values.
    ///
    /// The result is validated before it is returned.
    pub fn from_json_str(json: &str) -> Result<Self, MapError> {
        let map_parameters: Self = serde_json::from_str(json)?;
        map_parameters.validate()?;
        Ok(map_parameters)
    }

    /// Checks that the parameters describe a map that can be generated.
    pub fn validate(&self) -> Result<(), MapError> {
        let Size { width, height } = self.size;
        let dimensions = Self::MIN_DIMENSION..=Self::MAX_DIMENSION;
        if !dimensions.contains(&width) || !dimensions.contains(&height) {
            return Err(MapError::InvalidDimensions {
                width,
                height,
                min: Self::MIN_DIMENSION,
                max: Self::MAX_DIMENSION,
            });
        }

        let water = &self.water;
        check_probability("water.initial_water_chance", water.initial_water_chance)?;
        check_probability("water.river_origin_chance", water.river_origin_chance)?;
        check_probability("water.river_draw_chance", water.river_draw_chance)?;
        check_probability("water.river_turn_chance", water.river_turn_chance)?;
        check_range(
            "water.river_length",
            water.river_min_length,
            water.river_max_length,
        )?;
        if water.water_neighbor_threshold > 9 {
            return Err(MapError::InvalidParameter {
                name: "water.water_neighbor_threshold",
                reason: format!(
                    "a 3x3 window holds at most 9 cells, got {}",
                    water.water_neighbor_threshold
                ),
            });
        }

        let path = &self.path;
        check_probability("path.step_toward_chance", path.step_toward_chance)?;
        check_range("path.waypoints", path.min_waypoints, path.max_waypoints)?;
        if path.min_waypoints < 2 {
            return Err(MapError::InvalidParameter {
                name: "path.min_waypoints",
                reason: format!("a path needs at least 2 waypoints, got {}", path.min_waypoints),
            });
        }

        let mountain = &self.mountain;
        check_range(
            "mountain.clusters",
            mountain.min_clusters,
            mountain.max_clusters,
        )?;
        check_range(
            "mountain.cluster_size",
            mountain.min_cluster_size,
            mountain.max_cluster_size,
        )?;
        if mountain.placement_attempts == 0 {
            return Err(MapError::InvalidParameter {
                name: "mountain.placement_attempts",
                reason: "at least one attempt is required".to_owned(),
            });
        }
        let diameter = 2 * mountain.cluster_radius as i64;
        if diameter >= width.min(height) as i64 {
            return Err(MapError::InvalidParameter {
                name: "mountain.cluster_radius",
                reason: format!(
                    "a radius of {} leaves no room for a cluster center on a {}x{} map",
                    mountain.cluster_radius, width, height
                ),
            });
        }

        let bridge = &self.bridge;
        check_range("bridge.length", bridge.min_length, bridge.max_length)?;
        if bridge.min_length == 0 {
            return Err(MapError::InvalidParameter {
                name: "bridge.min_length",
                reason: "a bridge must span at least one water tile".to_owned(),
            });
        }

        self.world.validate()?;

        Ok(())
    }
}

impl Default for MapParameters {
    fn default() -> Self {
        Self {
            size: Size::new(20, 15),
            seed: None,
            water: WaterParameters::default(),
            path: PathParameters::default(),
            mountain: MountainParameters::default(),
            bridge: BridgeParameters::default(),
            world: WorldParameters::default(),
        }
    }
}

/// Parameters of [`TileMap::generate_water`](crate::tile_map::TileMap::generate_water).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterParameters {
    /// The chance of each tile to start as water before relaxation.
    pub initial_water_chance: f64,
    /// How many cellular automaton passes smooth the initial noise.
    pub relaxation_passes: u32,
    /// A tile becomes water when at least this many tiles of its 3x3 window were water in the previous pass.
    pub water_neighbor_threshold: u32,
    /// The chance of each shoreline tile to become a river origin.
    pub river_origin_chance: f64,
    /// When there are at most this many river origins, every one of them grows a river.
    pub river_always_draw_max_origins: usize,
    /// Otherwise, the chance of each origin to grow a river.
    pub river_draw_chance: f64,
    pub river_min_length: u32,
    pub river_max_length: u32,
    /// The chance per river step to bend one axis of the river's direction.
    pub river_turn_chance: f64,
}

impl Default for WaterParameters {
    fn default() -> Self {
        Self {
            initial_water_chance: 0.3,
            relaxation_passes: 4,
            water_neighbor_threshold: 4,
            river_origin_chance: 0.2,
            river_always_draw_max_origins: 2,
            river_draw_chance: 0.5,
            river_min_length: 3,
            river_max_length: 10,
            river_turn_chance: 0.2,
        }
    }
}

/// Parameters of [`TileMap::generate_paths`](crate::tile_map::TileMap::generate_paths).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathParameters {
    pub min_waypoints: u32,
    pub max_waypoints: u32,
    /// The chance that a step along the x axis is taken when the walker is aligned with its target
    /// on neither axis. On the target row the x step is always taken.
    pub step_toward_chance: f64,
}

impl Default for PathParameters {
    fn default() -> Self {
        Self {
            min_waypoints: 2,
            max_waypoints: 4,
            step_toward_chance: 0.7,
        }
    }
}

/// Parameters of [`TileMap::generate_mountains`](crate::tile_map::TileMap::generate_mountains).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountainParameters {
    pub min_clusters: u32,
    pub max_clusters: u32,
    /// How many cluster centers are sampled before settling for the last one.
    pub placement_attempts: u32,
    /// A center is accepted when its window holds at most this many water tiles.
    pub max_water_in_area: u32,
    /// Half the side of the square window around a cluster center.
    /// It is also the margin kept between cluster centers and the map border.
    pub cluster_radius: u32,
    pub min_cluster_size: u32,
    pub max_cluster_size: u32,
}

impl Default for MountainParameters {
    fn default() -> Self {
        Self {
            min_clusters: 1,
            max_clusters: 3,
            placement_attempts: 20,
            max_water_in_area: 2,
            cluster_radius: 2,
            min_cluster_size: 5,
            max_cluster_size: 12,
        }
    }
}

/// Parameters of [`TileMap::place_bridges`](crate::tile_map::TileMap::place_bridges).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeParameters {
    /// The shortest water run worth bridging.
    pub min_length: u32,
    /// The longest water run a bridge can span.
    pub max_length: u32,
    pub max_bridges: u32,
    /// No tile of a new bridge may be within this Chebyshev distance of an existing bridge.
    /// Only the water tiles of a bridge count, not the land tiles at its ends.
    pub buffer: u32,
    /// Score added per bridged water tile.
    pub length_weight: i32,
    /// Score for a bridge starting at the map center. It falls by one per tile of Manhattan distance and stops at zero.
    pub centrality_bonus: i32,
}

impl Default for BridgeParameters {
    fn default() -> Self {
        Self {
            min_length: 2,
            max_length: 5,
            max_bridges: 3,
            buffer: 2,
            length_weight: 10,
            centrality_bonus: 20,
        }
    }
}

/// Parameters of the [`World`](crate::world::World) built around a generated map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldParameters {
    /// Preferred starting tile of the player as `[x, y]`.
    pub player_start: [i32; 2],
    /// The chance that landing on a grass tile starts a wild encounter.
    pub encounter_rate: f64,
}

impl WorldParameters {
    /// Checks that the encounter rate is a probability.
    ///
    /// Any `player_start` is accepted, a start outside the map is moved into it.
    pub fn validate(&self) -> Result<(), MapError> {
        check_probability("world.encounter_rate", self.encounter_rate)
    }
}

impl Default for WorldParameters {
    fn default() -> Self {
        Self {
            player_start: [5, 5],
            encounter_rate: 0.02,
        }
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), MapError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(MapError::InvalidParameter {
            name,
            reason: format!("expected a probability in [0, 1], got {value}"),
        })
    }
}

fn check_range<T: PartialOrd + std::fmt::Display>(
    name: &'static str,
    min: T,
    max: T,
) -> Result<(), MapError> {
    if min <= max {
        Ok(())
    } else {
        Err(MapError::InvalidParameter {
            name,
            reason: format!("minimum {min} is greater than maximum {max}"),
        })
    }
}
