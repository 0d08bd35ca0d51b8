mod generate_mountains;
mod generate_paths;
mod generate_water;
mod place_bridges;

pub use place_bridges::{Bridge, BridgeOrientation};
