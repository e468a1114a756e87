#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave difficulty scaling.
//!
//! Enemy durability grows with the wave counter through a [`HealthCurve`],
//! kept behind a trait so alternative curve providers can slot in without
//! touching the spawner. The bundled [`StandardCurve`] is the authoritative
//! fallback; any other provider is expected to reproduce its values exactly,
//! which the spawner relies on when a provider is unavailable.

use lane_defence_core::{Health, Wave};

/// Base enemy health during the opening waves.
const BASE_HEALTH: i64 = 60;
/// Wave at which health starts climbing.
const RAMP_START_WAVE: i64 = 5;
/// Health added per wave past the ramp start.
const RAMP_STEP: i64 = 10;

/// Name under which the bundled curve is registered.
pub const STANDARD_CURVE_NAME: &str = "standard";

/// Maps a wave number to the maximum health of enemies spawned in it.
///
/// Implementations must be pure: the same wave always yields the same
/// health, with no dependence on call order.
pub trait HealthCurve {
    /// Maximum health for enemies of `wave`.
    fn scale_health(&self, wave: Wave) -> Health;
}

/// The bundled curve: flat for the first waves, then linear.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardCurve;

impl HealthCurve for StandardCurve {
    fn scale_health(&self, wave: Wave) -> Health {
        let wave = i64::from(wave.get());
        let health = if wave < RAMP_START_WAVE {
            BASE_HEALTH
        } else {
            BASE_HEALTH + RAMP_STEP * (wave - RAMP_START_WAVE)
        };
        Health::new(health.min(i64::from(i32::MAX)) as i32)
    }
}

/// Looks up a curve by its registered name.
#[must_use]
pub fn curve_named(name: &str) -> Option<Box<dyn HealthCurve>> {
    match name {
        STANDARD_CURVE_NAME => Some(Box::new(StandardCurve)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_is_flat_before_the_ramp() {
        let curve = StandardCurve;
        assert_eq!(curve.scale_health(Wave::new(1)).get(), 60);
        assert_eq!(curve.scale_health(Wave::new(4)).get(), 60);
    }

    #[test]
    fn health_climbs_linearly_from_the_ramp_start() {
        let curve = StandardCurve;
        assert_eq!(curve.scale_health(Wave::new(5)).get(), 60);
        assert_eq!(curve.scale_health(Wave::new(7)).get(), 80);
        assert_eq!(curve.scale_health(Wave::new(10)).get(), 110);
    }

    #[test]
    fn extreme_waves_saturate_instead_of_overflowing() {
        let curve = StandardCurve;
        assert_eq!(curve.scale_health(Wave::new(u32::MAX)).get(), i32::MAX);
    }

    #[test]
    fn lookup_resolves_the_bundled_curve_by_name() {
        let curve = curve_named(STANDARD_CURVE_NAME).unwrap();
        assert_eq!(
            curve.scale_health(Wave::new(9)),
            StandardCurve.scale_health(Wave::new(9))
        );
        assert!(curve_named("bespoke").is_none());
    }
}
