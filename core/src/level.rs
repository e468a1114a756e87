//! Static level configuration: waypoint path and buildable-tile layout.

use serde::{Deserialize, Serialize};

use crate::Position;

/// Ordered waypoint sequence and placement grid for one level.
///
/// Loaded once at startup (typically from a TOML file) and installed via
/// `Command::ConfigureLevel`; the simulation never mutates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    width: f32,
    height: f32,
    tile_size: f32,
    waypoints: Vec<Position>,
    placement_tiles: Vec<Position>,
}

impl LevelLayout {
    /// Creates a new level layout from explicit parts.
    #[must_use]
    pub fn new(
        width: f32,
        height: f32,
        tile_size: f32,
        waypoints: Vec<Position>,
        placement_tiles: Vec<Position>,
    ) -> Self {
        Self {
            width,
            height,
            tile_size,
            waypoints,
            placement_tiles,
        }
    }

    /// Playfield width in world units; crossing it is the exit boundary.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Playfield height in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Side length of one square tile.
    #[must_use]
    pub const fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Ordered checkpoints enemies traverse; compared against enemy centers.
    #[must_use]
    pub fn waypoints(&self) -> &[Position] {
        &self.waypoints
    }

    /// Top-left anchors of every buildable tile.
    #[must_use]
    pub fn placement_tiles(&self) -> &[Position] {
        &self.placement_tiles
    }
}

#[cfg(test)]
mod tests {
    use super::LevelLayout;
    use crate::Position;

    #[test]
    fn layout_round_trips_through_bincode() {
        let layout = LevelLayout::new(
            768.0,
            512.0,
            32.0,
            vec![Position::new(0.0, 96.0), Position::new(256.0, 96.0)],
            vec![Position::new(64.0, 160.0)],
        );
        let bytes = bincode::serialize(&layout).expect("serialize");
        let restored: LevelLayout = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, layout);
    }

    #[test]
    fn accessors_expose_the_configured_parts() {
        let layout = LevelLayout::new(
            768.0,
            512.0,
            32.0,
            vec![Position::new(-16.0, 128.0)],
            vec![Position::new(32.0, 32.0), Position::new(64.0, 32.0)],
        );
        assert_eq!(layout.width(), 768.0);
        assert_eq!(layout.height(), 512.0);
        assert_eq!(layout.tile_size(), 32.0);
        assert_eq!(layout.waypoints().len(), 1);
        assert_eq!(layout.placement_tiles().len(), 2);
    }
}
