#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Projectile release timing for engaged towers.
//!
//! A tower fires exactly once per attack cycle, on the rising edge of the
//! trigger frame. The edge condition compares the attack frame against its
//! value on the previous tick, so a cycle stalled on the trigger frame
//! cannot release a second projectile. Towers without a target never fire;
//! the world re-validates the target when it executes the command.

use lane_defence_core::{Command, TowerView, ATTACK_TRIGGER_FRAME};

/// Pure system that turns attack-cycle edges into fire commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct TowerCombat;

impl TowerCombat {
    /// Creates the system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits a `FireProjectile` command per tower on its trigger edge.
    pub fn handle(&self, towers: &TowerView, out_commands: &mut Vec<Command>) {
        for tower in towers.iter() {
            let on_edge = tower.previous_attack_frame != ATTACK_TRIGGER_FRAME
                && tower.attack_frame == ATTACK_TRIGGER_FRAME;
            if tower.target.is_some() && on_edge {
                out_commands.push(Command::FireProjectile { tower: tower.id });
            }
        }
    }
}
