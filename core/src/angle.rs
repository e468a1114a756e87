//! Discrete angle-to-sprite-bin mapping for directional assets.
//!
//! Directional art ships as four base images (one per 90° quadrant) with
//! twelve sub-frames each, so a continuous heading collapses to one of 48
//! visual directions. The quadrant boundaries sit 3.75° off the cardinal
//! axes, which bakes a 7.5° transition margin into the sub-binning.

use std::f32::consts::{FRAC_PI_2, PI};

/// Number of directional sub-frames per quadrant rotation.
pub const ARROW_BIN_COUNT: usize = 12;

/// Rotated sprite-bin selection for a heading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowSprite {
    /// Sub-frame index within the quadrant, clamped to `[0, 11]`.
    pub index: usize,
    /// Base rotation applied to the quadrant image, in radians.
    pub rotation: f32,
}

/// Maps a heading in radians to a discrete rotation and sprite bin.
///
/// The quadrant boundaries are at -86.25°, 3.75°, 93.75° and 176.25°, with
/// the stated inclusivity; a heading of exactly +93.75° matches no quadrant
/// and resolves to rotation 0, index 0. The bin index can never leave
/// `[0, 11]`, so an invalid asset selection is impossible.
#[must_use]
pub fn bin(angle_rad: f32) -> ArrowSprite {
    let mut deg = angle_rad.to_degrees();
    if deg > 180.0 {
        deg -= 360.0;
    }
    if deg <= -180.0 {
        deg += 360.0;
    }

    let mut rotation = 0.0_f32;
    let mut in_quad = 0.0_f32;

    if deg > -86.25 && deg <= 3.75 {
        rotation = 0.0;
        in_quad = 3.75 - deg;
    } else if deg > -176.25 && deg <= -86.25 {
        rotation = -FRAC_PI_2;
        in_quad = -86.25 - deg;
    } else if (deg > 93.75 && deg <= 180.0) || (deg > -180.0 && deg <= -176.25) {
        rotation = PI;
        in_quad = if deg > 93.75 { 180.0 - deg } else { 180.0 + deg };
    } else if deg > 3.75 && deg < 93.75 {
        rotation = FRAC_PI_2;
        in_quad = 93.75 - deg;
    }

    let raw = ((in_quad + 3.75) / 7.5).floor() as i64;
    let index = raw.clamp(0, ARROW_BIN_COUNT as i64 - 1) as usize;

    ArrowSprite { index, rotation }
}

/// Discrete attack-animation variant chosen when a tower fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttackDirection {
    /// Target below the muzzle; heading within 45° of straight down.
    Down,
    /// Target above the muzzle; heading within 45° of straight up.
    Up,
    /// Target to the left; uses the side sprite unmirrored.
    Left,
    /// Target to the right; uses the side sprite mirrored.
    Right,
}

impl AttackDirection {
    /// Buckets a fire heading into one of the four cardinal variants.
    #[must_use]
    pub fn from_heading(angle_rad: f32) -> Self {
        let deg = angle_rad.to_degrees();
        if (45.0..=135.0).contains(&deg) {
            Self::Down
        } else if deg >= 135.0 || deg <= -135.0 {
            Self::Left
        } else if (-135.0..=-45.0).contains(&deg) {
            Self::Up
        } else {
            Self::Right
        }
    }

    /// Whether the side sprite must be mirrored for this variant.
    #[must_use]
    pub const fn flip_horizontal(self) -> bool {
        matches!(self, Self::Right)
    }
}
