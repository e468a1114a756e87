//! Headless orchestration of one Lane Defence run.
//!
//! The session owns the world and the pure systems and wires them into the
//! per-tick pipeline: measure the frame ratio, re-target from the previous
//! frame's settled state, advance the world, convert attack edges into fire
//! commands, answer wave announcements with spawn batches, and finally
//! mirror notable events into logs and the progress sink.

use std::time::Duration;

use glam::Vec2;
use lane_defence_core::{Command, Event};
use lane_defence_progress::ProgressSink;
use lane_defence_rendering::{placement_command, FrameInput};
use lane_defence_system_difficulty::HealthCurve;
use lane_defence_system_frame_clock::FrameClock;
use lane_defence_system_spawning::WaveDirector;
use lane_defence_system_tower_combat::TowerCombat;
use lane_defence_system_tower_targeting::TowerTargeting;
use lane_defence_world::{apply, query, World, TOWER_COST};
use tracing::{debug, info};

/// Outcome summary of one finished or exhausted run.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SessionReport {
    pub(crate) wave: u32,
    pub(crate) lives: i32,
    pub(crate) coins: u32,
    pub(crate) enemies_killed: u32,
    pub(crate) game_over: bool,
}

pub(crate) struct Session {
    world: World,
    clock: FrameClock,
    targeting: TowerTargeting,
    combat: TowerCombat,
    director: WaveDirector,
    curve: Box<dyn HealthCurve>,
    sink: Box<dyn ProgressSink>,
    username: String,
    autoplay: bool,
}

impl Session {
    pub(crate) fn new(
        world: World,
        curve: Box<dyn HealthCurve>,
        sink: Box<dyn ProgressSink>,
        username: String,
        autoplay: bool,
    ) -> Self {
        Self {
            world,
            clock: FrameClock::new(),
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            director: WaveDirector::new(),
            curve,
            sink,
            username,
            autoplay,
        }
    }

    /// Runs up to `ticks` frames at the given simulated cadence and reports
    /// the final ledger state.
    pub(crate) fn run(&mut self, ticks: u64, fps: u32) -> SessionReport {
        let step = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
        let mut now = Duration::ZERO;
        let mut enemies_killed = 0u32;
        for _ in 0..ticks {
            now += step;
            let events = self.frame(now);
            enemies_killed += events
                .iter()
                .filter(|event| matches!(event, Event::EnemyKilled { .. }))
                .count() as u32;
            if query::is_game_over(&self.world) {
                break;
            }
        }
        SessionReport {
            wave: query::wave(&self.world).get(),
            lives: query::lives(&self.world).get(),
            coins: query::coins(&self.world).get(),
            enemies_killed,
            game_over: query::is_game_over(&self.world),
        }
    }

    fn frame(&mut self, now: Duration) -> Vec<Event> {
        let ratio = self.clock.tick(now);
        let mut events = Vec::new();
        let mut commands = Vec::new();

        // Targets are re-evaluated against the previous frame's positions.
        self.targeting.handle(
            &query::tower_view(&self.world),
            &query::enemy_view(&self.world),
            &mut commands,
        );
        for command in commands.drain(..) {
            apply(&mut self.world, command, &mut events);
        }

        apply(&mut self.world, Command::Tick { ratio }, &mut events);

        // Attack edges are observed on the post-tick state.
        self.combat
            .handle(&query::tower_view(&self.world), &mut commands);
        for command in commands.drain(..) {
            apply(&mut self.world, command, &mut events);
        }

        // Wave announcements from this tick are answered in the same frame.
        let announcements = events.clone();
        self.director
            .handle(&announcements, self.curve.as_ref(), &mut commands);
        for command in commands.drain(..) {
            apply(&mut self.world, command, &mut events);
        }

        if self.autoplay {
            self.place_next_tower(&mut events);
        }

        for event in &events {
            self.observe(event);
        }
        events
    }

    /// Drops a tower on the first free tile whenever the purse allows,
    /// going through the same placement path a pointer-driven backend uses.
    fn place_next_tower(&mut self, events: &mut Vec<Event>) {
        if query::coins(&self.world).get() < TOWER_COST {
            return;
        }
        let tiles = query::tile_view(&self.world);
        let Some(free) = tiles.iter().find(|tile| !tile.occupied) else {
            return;
        };
        let cursor = Vec2::new(
            free.position.x + free.size / 2.0,
            free.position.y + free.size / 2.0,
        );
        let input = FrameInput {
            cursor_world_space: Some(cursor),
            confirm_action: true,
        };
        if let Some(command) = placement_command(&input, &tiles) {
            apply(&mut self.world, command, events);
        }
    }

    fn observe(&self, event: &Event) {
        match event {
            Event::WaveStarted { wave } => {
                info!(wave = wave.get(), "wave started");
                self.sink.report_wave(&self.username, *wave);
            }
            Event::EnemyBreached {
                lives_remaining, ..
            } => {
                info!(lives = lives_remaining.get(), "enemy breached the lane");
            }
            Event::GameOver { wave } => {
                info!(wave = wave.get(), "run ended");
            }
            Event::TowerPlaced {
                coins_remaining, ..
            } => {
                info!(coins = coins_remaining.get(), "tower constructed");
            }
            Event::TowerRejected { reason, .. } => {
                debug!(?reason, "tower placement rejected");
            }
            Event::EnemyKilled { bounty, .. } => {
                debug!(bounty = bounty.get(), "enemy destroyed");
            }
            Event::EnemySpawned { .. }
            | Event::ProjectileFired { .. }
            | Event::ProjectileHit { .. } => {}
        }
    }
}
