use glam::IVec2;
use log::debug;
use rand::Rng;

use crate::{
    grid::{OffsetCoordinate, SquareGrid},
    map_parameters::WaterParameters,
    tile_component::tile_kind::TileKind,
    tile_map::{Layer, TileMap, tile::Tile},
};

impl TileMap {
    /// This function generates lakes and rivers on the map.
    ///
    /// It works on a boolean water map in 3 steps:
    /// 1. Every tile starts as water with the chance [`WaterParameters::initial_water_chance`].
    /// 2. The noise is relaxed by a cellular automaton into smooth blobs, which become lakes.
    /// 3. Some shoreline tiles grow short, meandering rivers.
    ///
    /// At last every water tile is written to [`Layer::Base`] as [`TileKind::Water`].
    pub fn generate_water(&mut self, water_parameters: &WaterParameters) {
        let grid = self.grid;

        let mut water_map: Vec<bool> = self
            .all_tiles()
            .map(|_| {
                self.random_number_generator
                    .random_bool(water_parameters.initial_water_chance)
            })
            .collect();

        for _ in 0..water_parameters.relaxation_passes {
            water_map = relax_water_map(
                &water_map,
                grid,
                water_parameters.water_neighbor_threshold,
            );
        }

        // Shoreline tiles are water tiles with at least one land tile in their Moore neighborhood.
        let river_origins: Vec<Tile> = self
            .all_tiles()
            .filter(|tile| {
                water_map[tile.index()]
                    && tile
                        .neighbor_tiles(grid)
                        .iter()
                        .any(|neighbor| !water_map[neighbor.index()])
                    && self
                        .random_number_generator
                        .random_bool(water_parameters.river_origin_chance)
            })
            .collect();

        let origin_num = river_origins.len();
        let drawn_origins = draw_river_origins(
            river_origins,
            &mut self.random_number_generator,
            water_parameters,
        );
        let river_num = drawn_origins.len();
        for origin in drawn_origins {
            carve_river(
                &mut water_map,
                grid,
                origin,
                &mut self.random_number_generator,
                water_parameters,
            );
        }

        for tile in self.all_tiles().filter(|tile| water_map[tile.index()]) {
            self.set_tile_kind(Layer::Base, tile, Some(TileKind::Water));
        }

        debug!(
            "Generated water: {} river origins, {} rivers, {} water tiles",
            origin_num,
            river_num,
            self.count_tiles(Layer::Base, TileKind::Water)
        );
    }
}

/// Runs one pass of the cellular automaton.
///
/// A tile becomes water when at least `threshold` tiles of its 3x3 window, the tile itself
/// included, are water in `water_map`. The window is clipped at the border.
/// The result is a new map; `water_map` is only read.
fn relax_water_map(water_map: &[bool], grid: SquareGrid, threshold: u32) -> Vec<bool> {
    (0..water_map.len())
        .map(|index| {
            let water_count = Tile::new(index)
                .tiles_in_chebyshev_distance(1, grid)
                .filter(|tile| water_map[tile.index()])
                .count();
            water_count >= threshold as usize
        })
        .collect()
}

/// Picks the origins that grow a river, keeping their order.
///
/// With at most [`WaterParameters::river_always_draw_max_origins`] origins every one is kept.
/// Otherwise each is kept with the chance [`WaterParameters::river_draw_chance`].
fn draw_river_origins(
    river_origins: Vec<Tile>,
    rng: &mut impl Rng,
    water_parameters: &WaterParameters,
) -> Vec<Tile> {
    if river_origins.len() <= water_parameters.river_always_draw_max_origins {
        return river_origins;
    }
    river_origins
        .into_iter()
        .filter(|_| rng.random_bool(water_parameters.river_draw_chance))
        .collect()
}

/// Carves a river into `water_map`, starting next to `origin`.
///
/// The river walks a random length in `[river_min_length, river_max_length]` steps and stops
/// early when its next step would leave the grid. It returns the number of steps taken.
fn carve_river(
    water_map: &mut [bool],
    grid: SquareGrid,
    origin: Tile,
    rng: &mut impl Rng,
    water_parameters: &WaterParameters,
) -> u32 {
    let length =
        rng.random_range(water_parameters.river_min_length..=water_parameters.river_max_length);

    // Start along one axis. The other axis only moves if the first one would not.
    let mut step = IVec2::ZERO;
    if rng.random_bool(0.5) {
        step.x = rng.random_range(-1..=1);
        if step.x == 0 {
            step.y = random_sign(rng);
        }
    } else {
        step.y = rng.random_range(-1..=1);
        if step.y == 0 {
            step.x = random_sign(rng);
        }
    }

    let mut current = origin.to_offset(grid);
    let mut step_num = 0;
    for _ in 0..length {
        let next = OffsetCoordinate(current.0 + step);
        let Some(index) = grid.offset_to_index(next) else {
            break;
        };
        water_map[index] = true;
        step_num += 1;

        if rng.random_bool(water_parameters.river_turn_chance) {
            if rng.random_bool(0.5) {
                step.x = (step.x + rng.random_range(-1..=1)).clamp(-1, 1);
            } else {
                step.y = (step.y + rng.random_range(-1..=1)).clamp(-1, 1);
            }

            // A river must keep flowing.
            if step == IVec2::ZERO {
                if rng.random_bool(0.5) {
                    step.x = random_sign(rng);
                } else {
                    step.y = random_sign(rng);
                }
            }
        }

        current = next;
    }
    step_num
}

fn random_sign(rng: &mut impl Rng) -> i32 {
    if rng.random_bool(0.5) { 1 } else { -1 }
}
