#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave composition and spawn scheduling.
//!
//! The director listens for wave announcements and answers each one with a
//! batch of spawn commands. Batch size starts at two and grows by two per
//! wave, entry offsets stagger the batch into a column behind the lane
//! entrance, and every enemy in the batch carries the health the difficulty
//! curve assigns to the announced wave.

use lane_defence_core::{Command, Event};
use lane_defence_system_difficulty::HealthCurve;

/// Enemies in the first wave's batch.
pub const FIRST_WAVE_SPAWN_COUNT: u32 = 2;
/// Additional enemies per subsequent wave.
pub const WAVE_SPAWN_GROWTH: u32 = 2;
/// Entry-offset spacing between consecutive enemies in a batch.
pub const SPAWN_STAGGER: f32 = 75.0;

/// Stateful system that turns wave announcements into spawn batches.
#[derive(Clone, Copy, Debug)]
pub struct WaveDirector {
    next_spawn_count: u32,
}

impl WaveDirector {
    /// Creates a director ready to compose the first wave.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_spawn_count: FIRST_WAVE_SPAWN_COUNT,
        }
    }

    /// Reacts to the events of one tick with spawn command batches.
    pub fn handle(
        &mut self,
        events: &[Event],
        curve: &dyn HealthCurve,
        out_commands: &mut Vec<Command>,
    ) {
        for event in events {
            let Event::WaveStarted { wave } = event else {
                continue;
            };
            let max_health = curve.scale_health(*wave);
            for slot in 1..=self.next_spawn_count {
                out_commands.push(Command::SpawnEnemy {
                    entry_offset: slot as f32 * SPAWN_STAGGER,
                    max_health,
                });
            }
            self.next_spawn_count = self.next_spawn_count.saturating_add(WAVE_SPAWN_GROWTH);
        }
    }
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_defence_core::{Health, Wave};
    use lane_defence_system_difficulty::StandardCurve;

    #[test]
    fn batch_size_grows_by_two_each_wave() {
        let mut director = WaveDirector::new();
        let mut sizes = Vec::new();
        for wave in 1..=3 {
            let mut commands = Vec::new();
            director.handle(
                &[Event::WaveStarted {
                    wave: Wave::new(wave),
                }],
                &StandardCurve,
                &mut commands,
            );
            sizes.push(commands.len());
        }
        assert_eq!(sizes, vec![2, 4, 6]);
    }

    #[test]
    fn batches_are_staggered_behind_the_entrance() {
        let mut director = WaveDirector::new();
        let mut commands = Vec::new();
        director.handle(
            &[Event::WaveStarted { wave: Wave::new(1) }],
            &StandardCurve,
            &mut commands,
        );
        let offsets: Vec<f32> = commands
            .iter()
            .map(|command| match command {
                Command::SpawnEnemy { entry_offset, .. } => *entry_offset,
                other => panic!("unexpected command {other:?}"),
            })
            .collect();
        assert_eq!(offsets, vec![75.0, 150.0]);
    }

    #[test]
    fn batch_health_follows_the_difficulty_curve() {
        let mut director = WaveDirector::new();
        let mut commands = Vec::new();
        director.handle(
            &[Event::WaveStarted { wave: Wave::new(7) }],
            &StandardCurve,
            &mut commands,
        );
        assert!(commands.iter().all(|command| matches!(
            command,
            Command::SpawnEnemy { max_health, .. } if *max_health == Health::new(80)
        )));
    }

    #[test]
    fn unrelated_events_produce_no_spawns() {
        let mut director = WaveDirector::new();
        let mut commands = Vec::new();
        director.handle(
            &[Event::GameOver { wave: Wave::new(3) }],
            &StandardCurve,
            &mut commands,
        );
        assert!(commands.is_empty());
    }
}
