#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Target acquisition for towers.
//!
//! Each tick the system scans the enemy roster in spawn order and assigns
//! every tower the first enemy whose collision circle overlaps the tower's
//! engagement circle. Acquisition is deliberately first-in rather than
//! nearest: a tower stays locked on the oldest enemy in range until it dies
//! or walks out, which concentrates fire on the head of the column. The
//! system always emits an assignment per tower so an empty field explicitly
//! clears stale locks.

use lane_defence_core::{Command, EnemyView, TowerView};

/// Pure system mapping tower and enemy views to target assignments.
#[derive(Clone, Copy, Debug, Default)]
pub struct TowerTargeting;

impl TowerTargeting {
    /// Creates the system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits one `AssignTarget` command per tower.
    pub fn handle(&self, towers: &TowerView, enemies: &EnemyView, out_commands: &mut Vec<Command>) {
        for tower in towers.iter() {
            let target = enemies
                .iter()
                .find(|enemy| {
                    tower.center.distance_to(enemy.center) < tower.radius + enemy.radius
                })
                .map(|enemy| enemy.id);
            out_commands.push(Command::AssignTarget {
                tower: tower.id,
                enemy: target,
            });
        }
    }
}
