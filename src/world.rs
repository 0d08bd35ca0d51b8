//! The overworld session: a generated map, the player walking on it, and the encounter roll.

use log::warn;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    error::MapError,
    grid::{Direction, OffsetCoordinate, Square},
    map_parameters::WorldParameters,
    tile_map::{Layer, TileMap},
};

/// The player's place on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    pub position: OffsetCoordinate,
    /// The direction of the last step attempt. A new player faces south.
    pub facing: Direction,
    /// [`Layer::Overlay`] while standing on a bridge, [`Layer::Base`] otherwise.
    pub layer: Layer,
}

/// The result of [`World::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The target cell is outside the map or in collision. The player did not move.
    Blocked,
    Moved,
    /// The player moved onto grass and a wild encounter should start.
    Encounter,
}

/// Owns a generated [`TileMap`] and the player walking on it.
#[derive(Clone, Debug)]
pub struct World {
    tile_map: TileMap,
    player: Player,
    encounter_rate: f64,
    random_number_generator: StdRng,
}

impl World {
    /// Places the player at [`WorldParameters::player_start`].
    ///
    /// A start outside the map is first clamped into it. If that cell is blocked, the player
    /// is moved to the nearest passable cell by Manhattan distance. On a map without any
    /// passable cell the clamped start is used.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidParameter`] if the encounter rate is not a probability.
    pub fn new(tile_map: TileMap, world_parameters: &WorldParameters) -> Result<Self, MapError> {
        world_parameters.validate()?;

        let start = OffsetCoordinate::from(world_parameters.player_start);
        let position = find_spawn(&tile_map, start);
        if position != start {
            warn!(
                "Player start ({}, {}) is not walkable, spawning at ({}, {})",
                start.x(),
                start.y(),
                position.x(),
                position.y()
            );
        }

        let layer = layer_at(&tile_map, position);
        let random_number_generator = StdRng::seed_from_u64(tile_map.seed.wrapping_add(1));

        Ok(Self {
            tile_map,
            player: Player {
                position,
                facing: Direction::South,
                layer,
            },
            encounter_rate: world_parameters.encounter_rate,
            random_number_generator,
        })
    }

    /// Tries to move the player one cell in `direction`.
    ///
    /// Only the four orthogonal directions are walkable, any other direction is [`StepOutcome::Blocked`].
    pub fn step(&mut self, direction: Direction) -> StepOutcome {
        if !direction.is_orthogonal() {
            return StepOutcome::Blocked;
        }
        self.player.facing = direction;

        let Some(target) = self.tile_map.grid.neighbor(self.player.position, direction) else {
            return StepOutcome::Blocked;
        };
        if self.tile_map.is_collision(target) {
            return StepOutcome::Blocked;
        }

        self.player.position = target;
        self.player.layer = layer_at(&self.tile_map, target);

        if self.player.layer == Layer::Base
            && self.tile_map.is_grass(target)
            && self.random_number_generator.random_bool(self.encounter_rate)
        {
            StepOutcome::Encounter
        } else {
            StepOutcome::Moved
        }
    }

    pub fn tile_map(&self) -> &TileMap {
        &self.tile_map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn into_tile_map(self) -> TileMap {
        self.tile_map
    }
}

fn is_walkable(tile_map: &TileMap, offset_coordinate: OffsetCoordinate) -> bool {
    !tile_map.is_collision(offset_coordinate)
}

fn layer_at(tile_map: &TileMap, offset_coordinate: OffsetCoordinate) -> Layer {
    if tile_map.is_bridge(offset_coordinate) {
        Layer::Overlay
    } else {
        Layer::Base
    }
}

/// Clamps `start` into the map, then searches rings of growing Manhattan distance around it
/// for the first walkable cell.
fn find_spawn(tile_map: &TileMap, start: OffsetCoordinate) -> OffsetCoordinate {
    let grid = tile_map.grid;
    let start = OffsetCoordinate::new(
        start.x().clamp(0, grid.width() - 1),
        start.y().clamp(0, grid.height() - 1),
    );
    if is_walkable(tile_map, start) {
        return start;
    }

    let start_square = Square::from_offset(start);
    // From inside the map, this ring distance reaches every cell.
    let max_distance = (grid.width() + grid.height()) as u32;

    (1..=max_distance)
        .find_map(|distance| {
            start_square
                .squares_at_distance(distance)
                .into_iter()
                .map(Square::to_offset)
                .find(|&offset_coordinate| {
                    grid.contains(offset_coordinate) && is_walkable(tile_map, offset_coordinate)
                })
        })
        .unwrap_or(start)
}
