use log::debug;

use crate::{
    grid::{Direction, OffsetCoordinate, Square, SquareGrid},
    map_parameters::BridgeParameters,
    tile_component::tile_kind::TileKind,
    tile_map::{Layer, TileMap, tile::Tile},
};

/// The axis a bridge spans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BridgeOrientation {
    /// Spans a water run within one row, from west to east.
    Horizontal,
    /// Spans a water run within one column, from north to south.
    Vertical,
}

impl BridgeOrientation {
    /// The direction from the first bridge tile toward the last one.
    pub const fn direction(self) -> Direction {
        match self {
            BridgeOrientation::Horizontal => Direction::East,
            BridgeOrientation::Vertical => Direction::South,
        }
    }

    /// The direction perpendicular to the bridge, used by the solidity check of its ends.
    pub const fn across_direction(self) -> Direction {
        match self {
            BridgeOrientation::Horizontal => Direction::South,
            BridgeOrientation::Vertical => Direction::East,
        }
    }
}

/// A straight run of water tiles with land at both ends.
///
/// Before placement it is a candidate, after placement its tiles carry [`TileKind::Bridge`]
/// on [`Layer::Overlay`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bridge {
    /// The first water tile of the run.
    pub start: OffsetCoordinate,
    pub orientation: BridgeOrientation,
    /// The number of water tiles the bridge spans.
    pub length: u32,
    pub score: i32,
}

impl Bridge {
    /// Returns the coordinates of the bridge tiles, from `start` onward.
    pub fn offset_coordinates(&self) -> impl Iterator<Item = OffsetCoordinate> + use<> {
        let start = Square::from_offset(self.start);
        let step = Square::direction_step(self.orientation.direction());
        let mut current = start;
        (0..self.length).map(move |_| {
            let offset_coordinate = current.to_offset();
            current = current + step;
            offset_coordinate
        })
    }

    /// Returns the bridge tiles.
    ///
    /// # Panics
    ///
    /// Panics if the bridge does not fit in `grid`.
    pub fn tiles(&self, grid: SquareGrid) -> impl Iterator<Item = Tile> + use<> {
        self.offset_coordinates()
            .map(move |offset_coordinate| Tile::from_offset(offset_coordinate, grid))
    }

    /// Returns the land tiles right before the first and right after the last bridge tile.
    pub fn ends(&self) -> [OffsetCoordinate; 2] {
        let start = Square::from_offset(self.start);
        let step = Square::direction_step(self.orientation.direction());
        let before = start - step;
        let after = Square::new(
            start.x() + step.x() * self.length as i32,
            start.y() + step.y() * self.length as i32,
        );
        [before.to_offset(), after.to_offset()]
    }
}

impl TileMap {
    /// This function places bridges over narrow water crossings.
    ///
    /// 1. Every row and column is scanned for candidates (see [`TileMap::bridge_candidate_at`]).
    /// 2. Candidates are scored by length and closeness to the map center, then sorted by
    ///    descending score. Equal scores keep their scan order: rows first, then columns.
    /// 3. Up to [`BridgeParameters::max_bridges`] candidates are placed greedily, skipping every
    ///    candidate with a tile within [`BridgeParameters::buffer`] tiles (Chebyshev distance)
    ///    of an existing bridge tile.
    ///
    /// Placing fewer bridges than the maximum, or none, is expected on maps without enough crossings.
    pub fn place_bridges(&mut self, bridge_parameters: &BridgeParameters) {
        let grid = self.grid;

        let mut candidates = self.bridge_candidates(bridge_parameters);
        candidates.sort_by(|a, b| b.score.cmp(&a.score));

        debug!("Found {} bridge candidates", candidates.len());

        let mut bridge_num = 0;
        for candidate in candidates {
            if bridge_num >= bridge_parameters.max_bridges {
                break;
            }

            let too_close = candidate.tiles(grid).any(|tile| {
                tile.tiles_in_chebyshev_distance(bridge_parameters.buffer, grid)
                    .any(|nearby_tile| nearby_tile.is_bridge(self))
            });
            if too_close {
                continue;
            }

            for tile in candidate.tiles(grid) {
                self.set_tile_kind(Layer::Overlay, tile, Some(TileKind::Bridge));
            }

            debug!(
                "Placed {:?} bridge of length {} at ({}, {}) with score {}",
                candidate.orientation,
                candidate.length,
                candidate.start.x(),
                candidate.start.y(),
                candidate.score
            );

            self.bridge_list.push(candidate);
            bridge_num += 1;
        }
    }

    /// Scans all rows, then all columns, for bridge candidates, in scan order.
    fn bridge_candidates(&self, bridge_parameters: &BridgeParameters) -> Vec<Bridge> {
        let width = self.width();
        let height = self.height();

        let mut candidates = Vec::new();

        // The solidity check looks at both sides of a run, so the outermost lines never qualify.
        for y in 1..height - 1 {
            for x in 1..width {
                candidates.extend(self.bridge_candidate_at(
                    OffsetCoordinate::new(x, y),
                    BridgeOrientation::Horizontal,
                    bridge_parameters,
                ));
            }
        }

        for x in 1..width - 1 {
            for y in 1..height {
                candidates.extend(self.bridge_candidate_at(
                    OffsetCoordinate::new(x, y),
                    BridgeOrientation::Vertical,
                    bridge_parameters,
                ));
            }
        }

        candidates
    }

    /// Checks whether a water run suitable for a bridge starts at `start`.
    ///
    /// The run qualifies when:
    /// 1. The tile before `start` is land and `start` is water.
    /// 2. The run ends inside the map at a land tile.
    /// 3. Its length is within [`BridgeParameters::min_length`] and [`BridgeParameters::max_length`].
    /// 4. Both end tiles are solid: at least one of their two neighbors across the bridge is land.
    ///    This rejects crossings that only reach a one-tile-wide peninsula.
    ///
    /// `start` and its neighbors across the bridge must be inside the map.
    fn bridge_candidate_at(
        &self,
        start: OffsetCoordinate,
        orientation: BridgeOrientation,
        bridge_parameters: &BridgeParameters,
    ) -> Option<Bridge> {
        let grid = self.grid;
        let is_water = |square: Square| Tile::from_offset(square.to_offset(), grid).is_water(self);

        let step = Square::direction_step(orientation.direction());
        let start_square = Square::from_offset(start);
        let before = start_square - step;
        if is_water(before) || !is_water(start_square) {
            return None;
        }

        let mut after = start_square;
        while grid.contains(after.to_offset()) && is_water(after) {
            after = after + step;
        }
        if !grid.contains(after.to_offset()) {
            return None;
        }

        let length = start_square.distance_to(after) as u32;
        if !(bridge_parameters.min_length..=bridge_parameters.max_length).contains(&length) {
            return None;
        }

        let across = Square::direction_step(orientation.across_direction());
        let is_solid = |end: Square| !is_water(end - across) || !is_water(end + across);
        if !(is_solid(before) && is_solid(after)) {
            return None;
        }

        Some(Bridge {
            start,
            orientation,
            length,
            score: self.bridge_score(start, length, bridge_parameters),
        })
    }

    /// Longer crossings score higher, and so do crossings starting near the map center.
    fn bridge_score(
        &self,
        start: OffsetCoordinate,
        length: u32,
        bridge_parameters: &BridgeParameters,
    ) -> i32 {
        let distance_to_center =
            Square::from_offset(start).distance_to(Square::from_offset(self.grid.center()));
        length as i32 * bridge_parameters.length_weight
            + (bridge_parameters.centrality_bonus - distance_to_center).max(0)
    }
}
