use log::debug;
use rand::Rng;

use crate::{
    grid::OffsetCoordinate,
    map_parameters::PathParameters,
    tile_component::tile_kind::TileKind,
    tile_map::{Layer, TileMap, tile::Tile},
};

impl TileMap {
    /// This function lays paths between random waypoints.
    ///
    /// Consecutive waypoints are joined by a walk that drifts toward its target along the x axis
    /// with the chance [`PathParameters::step_toward_chance`] and otherwise closes the y gap,
    /// which draws a slightly wandering staircase.
    /// Every visited land tile becomes [`TileKind::Path`]. Water tiles are never overwritten.
    pub fn generate_paths(&mut self, path_parameters: &PathParameters) {
        let width = self.width();
        let height = self.height();

        let waypoint_num = self
            .random_number_generator
            .random_range(path_parameters.min_waypoints..=path_parameters.max_waypoints);

        let waypoints: Vec<OffsetCoordinate> = (0..waypoint_num)
            .map(|_| {
                let x = self.random_number_generator.random_range(0..width);
                let y = self.random_number_generator.random_range(0..height);
                OffsetCoordinate::new(x, y)
            })
            .collect();

        debug!("Laying paths through waypoints {:?}", waypoints);

        for pair in waypoints.windows(2) {
            self.lay_path(pair[0], pair[1], path_parameters.step_toward_chance);
        }
    }

    /// Walks from `start` to `end`, stamping path tiles along the way and on `end` itself.
    ///
    /// The walk takes exactly the Manhattan distance between its ends in steps.
    fn lay_path(&mut self, start: OffsetCoordinate, end: OffsetCoordinate, step_toward_chance: f64) {
        let [mut x, mut y] = start.to_array();
        let [end_x, end_y] = end.to_array();

        while x != end_x || y != end_y {
            self.stamp_path(OffsetCoordinate::new(x, y));

            // On the target row the x step is taken without a roll, so every iteration advances.
            if x != end_x
                && (y == end_y || self.random_number_generator.random_bool(step_toward_chance))
            {
                x += (end_x - x).signum();
            } else {
                y += (end_y - y).signum();
            }
        }

        self.stamp_path(end);
    }

    fn stamp_path(&mut self, offset_coordinate: OffsetCoordinate) {
        let tile = Tile::from_offset(offset_coordinate, self.grid);
        if !tile.is_water(self) {
            self.set_tile_kind(Layer::Base, tile, Some(TileKind::Path));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        grid::{OffsetCoordinate, Square},
        map_parameters::{MapParameters, PathParameters},
        tile_component::tile_kind::TileKind,
        tile_map::{Layer, TileMap},
    };

    #[test]
    fn test_path_connects_its_ends() {
        let mut tile_map = TileMap::new(&MapParameters::new(20, 15, Some(11)));
        let start = OffsetCoordinate::new(2, 3);
        let end = OffsetCoordinate::new(15, 11);
        tile_map.lay_path(start, end, 0.7);

        assert_eq!(tile_map.tile_at(Layer::Base, start), Some(TileKind::Path));
        assert_eq!(tile_map.tile_at(Layer::Base, end), Some(TileKind::Path));

        // The walk moves one axis by one tile per step, so the path is 4-connected from start to end.
        let path: Vec<Square> = tile_map
            .all_tiles()
            .filter(|tile| tile.base(&tile_map) == TileKind::Path)
            .map(|tile| Square::from_offset(tile.to_offset(tile_map.grid)))
            .collect();
        let mut reached = vec![Square::from_offset(start)];
        let mut changed = true;
        while changed {
            changed = false;
            for square in &path {
                if !reached.contains(square) && reached.iter().any(|other| other.distance_to(*square) == 1) {
                    reached.push(*square);
                    changed = true;
                }
            }
        }
        assert!(reached.contains(&Square::from_offset(end)));
        assert_eq!(reached.len(), path.len());

        // A monotone walk never leaves the bounding box of its ends.
        assert!(path.iter().all(|square| (2..=15).contains(&square.x()) && (3..=11).contains(&square.y())));
        for square in path {
            assert!(!tile_map.is_grass(square.to_offset()));
        }
    }

    #[test]
    fn test_path_never_overwrites_water() {
        let mut tile_map = TileMap::new(&MapParameters::new(10, 5, Some(5)));
        for x in 0..10 {
            tile_map.set_tile(Layer::Base, OffsetCoordinate::new(x, 2), TileKind::Water);
        }
        tile_map.lay_path(OffsetCoordinate::new(1, 0), OffsetCoordinate::new(8, 4), 0.7);

        for x in 0..10 {
            let offset = OffsetCoordinate::new(x, 2);
            assert_eq!(tile_map.tile_at(Layer::Base, offset), Some(TileKind::Water));
            assert!(tile_map.is_collision(offset));
        }
        assert!(tile_map.count_tiles(Layer::Base, TileKind::Path) > 0);
    }

    #[test]
    fn test_path_without_x_bias_still_arrives() {
        let mut tile_map = TileMap::new(&MapParameters::new(20, 15, Some(2)));
        let start = OffsetCoordinate::new(17, 1);
        let end = OffsetCoordinate::new(3, 12);
        tile_map.lay_path(start, end, 0.0);

        // The walk closes the y gap first, then runs along the target row.
        for y in 1..=12 {
            assert_eq!(tile_map.tile_at(Layer::Base, OffsetCoordinate::new(17, y)), Some(TileKind::Path));
        }
        for x in 3..=17 {
            assert_eq!(tile_map.tile_at(Layer::Base, OffsetCoordinate::new(x, 12)), Some(TileKind::Path));
        }
        assert_eq!(tile_map.count_tiles(Layer::Base, TileKind::Path), 12 + 15 - 1);
    }

    #[test]
    fn test_generate_paths_with_extreme_chances() {
        for step_toward_chance in [0.0, 1.0] {
            for seed in 0..8 {
                let mut tile_map = TileMap::new(&MapParameters::new(20, 15, Some(seed)));
                tile_map.generate_paths(&PathParameters {
                    step_toward_chance,
                    ..Default::default()
                });
                assert!(tile_map.count_tiles(Layer::Base, TileKind::Path) >= 1);
            }
        }
    }

    #[test]
    fn test_generate_paths_with_single_pair() {
        let mut tile_map = TileMap::new(&MapParameters::new(20, 15, Some(21)));
        tile_map.generate_paths(&PathParameters {
            min_waypoints: 2,
            max_waypoints: 2,
            ..Default::default()
        });
        // On an all-grass map at least the last waypoint is stamped.
        assert!(tile_map.count_tiles(Layer::Base, TileKind::Path) >= 1);
        assert_eq!(tile_map.derive_attribute_sets(), tile_map.attribute_sets);
    }
}
