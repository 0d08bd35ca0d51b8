use log::{debug, warn};
use rand::Rng;

use crate::{
    grid::{OffsetCoordinate, Square},
    map_parameters::MountainParameters,
    tile_component::tile_kind::TileKind,
    tile_map::{Layer, TileMap, tile::Tile},
};

impl TileMap {
    /// This function places clusters of impassable mountains.
    ///
    /// Every cluster picks a center away from dense water (see [`TileMap::find_mountain_center`]),
    /// then stamps mountains at random offsets around it. Water tiles are never overwritten,
    /// and stamping the same tile twice has no further effect.
    pub fn generate_mountains(&mut self, mountain_parameters: &MountainParameters) {
        let grid = self.grid;
        let radius = mountain_parameters.cluster_radius as i32;

        let cluster_num = self
            .random_number_generator
            .random_range(mountain_parameters.min_clusters..=mountain_parameters.max_clusters);

        for _ in 0..cluster_num {
            let center = self.find_mountain_center(mountain_parameters);
            let cluster_size = self.random_number_generator.random_range(
                mountain_parameters.min_cluster_size..=mountain_parameters.max_cluster_size,
            );

            debug!(
                "Mountain cluster at ({}, {}) with {} stamps",
                center.x(),
                center.y(),
                cluster_size
            );

            for _ in 0..cluster_size {
                let offset_x = self.random_number_generator.random_range(-radius..=radius);
                let offset_y = self.random_number_generator.random_range(-radius..=radius);
                let target = (Square::from_offset(center) + Square::new(offset_x, offset_y)).to_offset();

                if let Some(index) = grid.offset_to_index(target) {
                    let tile = Tile::new(index);
                    if !tile.is_water(self) {
                        self.set_tile_kind(Layer::Base, tile, Some(TileKind::Mountain));
                    }
                }
            }
        }
    }

    /// Samples cluster centers at least [`MountainParameters::cluster_radius`] tiles away from the border.
    ///
    /// The first center whose window holds at most [`MountainParameters::max_water_in_area`] water tiles
    /// is returned. If every attempt fails, the last sampled center is used anyway.
    fn find_mountain_center(&mut self, mountain_parameters: &MountainParameters) -> OffsetCoordinate {
        let grid = self.grid;
        let radius = mountain_parameters.cluster_radius as i32;

        let mut center = grid.center();
        for _ in 0..mountain_parameters.placement_attempts {
            let x = self
                .random_number_generator
                .random_range(radius..grid.width() - radius);
            let y = self
                .random_number_generator
                .random_range(radius..grid.height() - radius);
            center = OffsetCoordinate::new(x, y);

            let water_num = Tile::from_offset(center, grid)
                .tiles_in_chebyshev_distance(mountain_parameters.cluster_radius, grid)
                .filter(|tile| tile.is_water(self))
                .count();

            if water_num <= mountain_parameters.max_water_in_area as usize {
                return center;
            }
        }

        warn!(
            "No dry spot found for a mountain cluster after {} attempts, using ({}, {})",
            mountain_parameters.placement_attempts,
            center.x(),
            center.y()
        );
        center
    }
}
