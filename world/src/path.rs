//! Waypoint steering for enemies walking the level lane.

use lane_defence_core::{FrameRatio, Position};

use crate::{ENEMY_BASE_SPEED, ENEMY_HALF_EXTENT};

/// Steps an enemy footprint toward its current waypoint.
///
/// Velocity points from the footprint centre at the waypoint and has a
/// magnitude of the base walk speed scaled by the frame-rate ratio. Arrival
/// is checked per axis: once the rounded centre sits closer to the waypoint
/// than one tick of travel on both axes, the index advances. The index never
/// advances past the final waypoint, so enemies keep walking toward it and
/// eventually cross the level boundary.
pub(crate) fn follow(
    position: &mut Position,
    waypoint_index: &mut usize,
    waypoints: &[Position],
    ratio: FrameRatio,
) {
    let Some(&waypoint) = waypoints.get(*waypoint_index) else {
        return;
    };
    let center = position.offset(ENEMY_HALF_EXTENT, ENEMY_HALF_EXTENT);
    let heading = (waypoint.y - center.y).atan2(waypoint.x - center.x);
    let step = ENEMY_BASE_SPEED * ratio.get();
    let velocity_x = heading.cos() * step;
    let velocity_y = heading.sin() * step;
    position.x += velocity_x;
    position.y += velocity_y;

    let center = position.offset(ENEMY_HALF_EXTENT, ENEMY_HALF_EXTENT);
    let reached_x = (center.x.round() - waypoint.x.round()).abs() < velocity_x.abs();
    let reached_y = (center.y.round() - waypoint.y.round()).abs() < velocity_y.abs();
    if reached_x && reached_y && *waypoint_index < waypoints.len() - 1 {
        *waypoint_index += 1;
    }
}
