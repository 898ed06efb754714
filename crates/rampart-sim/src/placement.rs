//! Tiles covered by the enemy path, where towers may not be built.

use std::collections::HashSet;

use rampart_core::config::GridConfig;
use rampart_core::types::Position;

/// Tiles touched by the path polyline, sampled at quarter-tile steps.
pub fn path_tiles(path: &[Position], grid: &GridConfig) -> HashSet<(i32, i32)> {
    let mut tiles = HashSet::new();
    let sample_step = grid.tile_size / 4.0;

    for point in path {
        tiles.insert(grid.tile_of(point));
    }

    for segment in path.windows(2) {
        let (a, b) = (segment[0].to_vec(), segment[1].to_vec());
        let length = a.distance(b);
        let samples = (length / sample_step).ceil().max(1.0) as usize;
        for i in 0..=samples {
            let p = a.lerp(b, i as f64 / samples as f64);
            tiles.insert(grid.tile_of(&Position::from_vec(p)));
        }
    }

    tiles.retain(|&(x, y)| grid.contains_tile(x, y));
    tiles
}
