#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Lane Defence adapters.
//!
//! The simulation never draws; it exposes value snapshots, and this crate
//! turns those snapshots into a backend-neutral [`Scene`] of sprite
//! instructions, health bars, and tile highlights. A concrete backend
//! implements [`RenderingBackend`] and replays the scene with whatever
//! graphics API it wraps.

use anyhow::Result as AnyResult;
use glam::Vec2;
use lane_defence_core::{
    Command, DeathEffectView, EnemyView, Position, TileIndex, TileView, TowerView,
};
use std::{error::Error, fmt};

/// Scale applied to enemy and death-effect sprites.
pub const ENEMY_SPRITE_SCALE: f32 = 1.5;
/// Vertical offset from an enemy centre to its health bar.
pub const HEALTH_BAR_OFFSET_Y: f32 = -34.0;
/// Health bar width in world units.
pub const HEALTH_BAR_WIDTH: f32 = 40.0;
/// Health bar height in world units.
pub const HEALTH_BAR_HEIGHT: f32 = 5.0;

/// Sprite sheets the backend is expected to provide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    /// Enemy walk cycle.
    EnemyWalk,
    /// Enemy death burst.
    EnemyDeath,
    /// Tower pedestal animation.
    TowerBase,
    /// Archer idle cycle.
    ArcherIdle,
    /// Archer attack cycle facing down.
    ArcherAttackDown,
    /// Archer attack cycle facing up.
    ArcherAttackUp,
    /// Archer attack cycle facing sideways; flipped for rightward shots.
    ArcherAttackSide,
    /// One of the twelve pre-rotated arrow bins.
    Arrow(usize),
}

/// One sprite draw with its frame, transform, and mirroring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteInstruction {
    /// Sheet to sample.
    pub sprite: SpriteKey,
    /// Draw centre in world units.
    pub center: Position,
    /// Rotation in radians applied around the centre.
    pub rotation: f32,
    /// Frame column to sample from the sheet.
    pub frame: u32,
    /// Uniform scale factor.
    pub scale: f32,
    /// Whether the sprite is mirrored on the vertical axis.
    pub flip_horizontal: bool,
}

/// Health bar drawn above a wounded enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthBarPresentation {
    /// Bar centre in world units.
    pub center: Position,
    /// Remaining-health fraction in 0.0..=1.0.
    pub fraction: f32,
}

/// Buildable tile overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileHighlight {
    /// Tile origin in world units.
    pub position: Position,
    /// Tile edge length in world units.
    pub size: f32,
    /// Whether the cursor currently rests on the tile.
    pub hovered: bool,
    /// Whether the tile already hosts a tower.
    pub occupied: bool,
}

/// Input snapshot gathered by a backend before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Cursor position in world units, if the cursor is over the playfield.
    pub cursor_world_space: Option<Vec2>,
    /// Whether the backend detected a placement confirmation this frame.
    pub confirm_action: bool,
}

/// Backend-neutral description of one presented frame.
///
/// Sprite instructions are ordered back to front: tiles, enemies, death
/// effects, towers, then projectiles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Sprite draws in paint order.
    pub sprites: Vec<SpriteInstruction>,
    /// Health bars painted over the sprite layer.
    pub health_bars: Vec<HealthBarPresentation>,
    /// Tile overlays painted under everything else.
    pub tiles: Vec<TileHighlight>,
}

impl Scene {
    /// Assembles a scene from the world's current views.
    #[must_use]
    pub fn assemble(
        enemies: &EnemyView,
        towers: &TowerView,
        effects: &DeathEffectView,
        tiles: &TileView,
        hovered: Option<TileIndex>,
    ) -> Self {
        let mut scene = Self::default();

        for tile in tiles.iter() {
            scene.tiles.push(TileHighlight {
                position: tile.position,
                size: tile.size,
                hovered: hovered == Some(tile.index),
                occupied: tile.occupied,
            });
        }

        for enemy in enemies.iter() {
            scene.sprites.push(SpriteInstruction {
                sprite: SpriteKey::EnemyWalk,
                center: enemy.center,
                rotation: 0.0,
                frame: enemy.walk_frame,
                scale: ENEMY_SPRITE_SCALE,
                flip_horizontal: false,
            });
            if enemy.health != enemy.max_health {
                scene.health_bars.push(HealthBarPresentation {
                    center: enemy.center.offset(0.0, HEALTH_BAR_OFFSET_Y),
                    fraction: enemy.health_fraction(),
                });
            }
        }

        for effect in effects.iter() {
            scene.sprites.push(SpriteInstruction {
                sprite: SpriteKey::EnemyDeath,
                center: effect.center,
                rotation: 0.0,
                frame: effect.frame,
                scale: ENEMY_SPRITE_SCALE,
                flip_horizontal: false,
            });
        }

        for tower in towers.iter() {
            scene.sprites.push(SpriteInstruction {
                sprite: SpriteKey::TowerBase,
                center: tower.center,
                rotation: 0.0,
                frame: tower.base_frame,
                scale: 1.0,
                flip_horizontal: false,
            });
            scene.sprites.push(archer_instruction(tower));
        }

        for tower in towers.iter() {
            for projectile in &tower.projectiles {
                scene.sprites.push(SpriteInstruction {
                    sprite: SpriteKey::Arrow(projectile.sprite.index),
                    center: projectile.position,
                    rotation: projectile.sprite.rotation,
                    frame: 0,
                    scale: 1.0,
                    flip_horizontal: false,
                });
            }
        }

        scene
    }
}

fn archer_instruction(tower: &lane_defence_core::TowerSnapshot) -> SpriteInstruction {
    use lane_defence_core::angle::AttackDirection;

    let (sprite, frame) = if tower.target.is_some() {
        let sheet = match tower.attack_direction {
            AttackDirection::Down => SpriteKey::ArcherAttackDown,
            AttackDirection::Up => SpriteKey::ArcherAttackUp,
            AttackDirection::Left | AttackDirection::Right => SpriteKey::ArcherAttackSide,
        };
        (sheet, tower.attack_frame)
    } else {
        (SpriteKey::ArcherIdle, tower.idle_frame)
    };
    SpriteInstruction {
        sprite,
        center: tower.center,
        rotation: 0.0,
        frame,
        scale: 1.0,
        flip_horizontal: tower.target.is_some() && tower.flip_horizontal,
    }
}

/// Finds the tile under the cursor, if any. Bounds are exclusive on all
/// edges, matching the world's own hit test.
#[must_use]
pub fn hovered_tile(tiles: &TileView, cursor: Option<Vec2>) -> Option<TileIndex> {
    let cursor = cursor?;
    tiles.iter().find_map(|tile| {
        let inside = cursor.x > tile.position.x
            && cursor.x < tile.position.x + tile.size
            && cursor.y > tile.position.y
            && cursor.y < tile.position.y + tile.size;
        inside.then_some(tile.index)
    })
}

/// Converts a confirmed click over a free tile into a placement command.
///
/// Occupancy is only a pre-filter; the world re-validates funds and
/// occupancy when it executes the command.
#[must_use]
pub fn placement_command(input: &FrameInput, tiles: &TileView) -> Option<Command> {
    if !input.confirm_action {
        return None;
    }
    let index = hovered_tile(tiles, input.cursor_world_space)?;
    let occupied = tiles
        .iter()
        .find(|tile| tile.index == index)
        .is_some_and(|tile| tile.occupied);
    (!occupied).then_some(Command::PlaceTower { tile: index })
}

/// Pluggable presentation loop.
pub trait RenderingBackend {
    /// Runs the presentation loop, calling `update_scene` once per frame
    /// with the gathered input and the scene to rebuild.
    fn run<F>(self, scene: Scene, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static;
}

/// Errors surfaced by rendering backends.
#[derive(Debug)]
pub enum RenderingError {
    /// The backend could not initialise its window or device.
    BackendUnavailable {
        /// Backend-provided explanation.
        reason: String,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackendUnavailable { reason } => {
                write!(formatter, "rendering backend unavailable: {reason}")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_defence_core::angle::AttackDirection;
    use lane_defence_core::{
        EnemyId, EnemySnapshot, Health, TileSnapshot, TowerId, TowerSnapshot,
    };

    fn enemy(id: u64, health: i32, max_health: i32) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            position: Position::new(75.0, 75.0),
            center: Position::new(100.0, 100.0),
            radius: 25.0,
            health: Health::new(health),
            max_health: Health::new(max_health),
            waypoint_index: 0,
            walk_frame: 2,
        }
    }

    fn tower(engaged: bool, direction: AttackDirection) -> TowerSnapshot {
        TowerSnapshot {
            id: TowerId::new(0),
            position: Position::new(200.0, 200.0),
            center: Position::new(232.0, 232.0),
            radius: 150.0,
            target: engaged.then_some(EnemyId::new(0)),
            attack_frame: 3,
            previous_attack_frame: 2,
            idle_frame: 1,
            base_frame: 0,
            attack_direction: direction,
            flip_horizontal: direction.flip_horizontal(),
            projectiles: Vec::new(),
        }
    }

    fn tile(index: u32, x: f32, occupied: bool) -> TileSnapshot {
        TileSnapshot {
            index: TileIndex::new(index),
            position: Position::new(x, 300.0),
            size: 32.0,
            occupied,
        }
    }

    #[test]
    fn wounded_enemies_carry_a_health_bar_and_fresh_ones_do_not() {
        let enemies = EnemyView::from_snapshots(vec![enemy(0, 40, 60), enemy(1, 60, 60)]);
        let scene = Scene::assemble(
            &enemies,
            &TowerView::from_snapshots(Vec::new()),
            &DeathEffectView::from_snapshots(Vec::new()),
            &TileView::from_snapshots(Vec::new()),
            None,
        );
        assert_eq!(scene.health_bars.len(), 1);
        let bar = scene.health_bars[0];
        assert!((bar.fraction - 40.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn engaged_towers_use_the_directional_attack_sheet() {
        let towers = TowerView::from_snapshots(vec![tower(true, AttackDirection::Right)]);
        let scene = Scene::assemble(
            &EnemyView::from_snapshots(Vec::new()),
            &towers,
            &DeathEffectView::from_snapshots(Vec::new()),
            &TileView::from_snapshots(Vec::new()),
            None,
        );
        let archer = scene
            .sprites
            .iter()
            .find(|instruction| instruction.sprite == SpriteKey::ArcherAttackSide)
            .expect("engaged tower draws an attack sheet");
        assert!(archer.flip_horizontal);
        assert_eq!(archer.frame, 3);
    }

    #[test]
    fn idle_towers_use_the_idle_sheet_without_mirroring() {
        let towers = TowerView::from_snapshots(vec![tower(false, AttackDirection::Right)]);
        let scene = Scene::assemble(
            &EnemyView::from_snapshots(Vec::new()),
            &towers,
            &DeathEffectView::from_snapshots(Vec::new()),
            &TileView::from_snapshots(Vec::new()),
            None,
        );
        let archer = scene
            .sprites
            .iter()
            .find(|instruction| instruction.sprite == SpriteKey::ArcherIdle)
            .expect("idle tower draws the idle sheet");
        assert!(!archer.flip_horizontal);
        assert_eq!(archer.frame, 1);
    }

    #[test]
    fn hover_marks_exactly_one_tile() {
        let tiles = TileView::from_snapshots(vec![tile(0, 100.0, false), tile(1, 140.0, false)]);
        let hovered = hovered_tile(&tiles, Some(Vec2::new(150.0, 310.0)));
        assert_eq!(hovered, Some(TileIndex::new(1)));
        let scene = Scene::assemble(
            &EnemyView::from_snapshots(Vec::new()),
            &TowerView::from_snapshots(Vec::new()),
            &DeathEffectView::from_snapshots(Vec::new()),
            &tiles,
            hovered,
        );
        let flags: Vec<bool> = scene.tiles.iter().map(|tile| tile.hovered).collect();
        assert_eq!(flags, vec![false, true]);
    }

    #[test]
    fn confirmed_clicks_over_free_tiles_become_placement_commands() {
        let tiles = TileView::from_snapshots(vec![tile(0, 100.0, false), tile(1, 140.0, true)]);
        let over_free = FrameInput {
            cursor_world_space: Some(Vec2::new(110.0, 310.0)),
            confirm_action: true,
        };
        assert_eq!(
            placement_command(&over_free, &tiles),
            Some(Command::PlaceTower {
                tile: TileIndex::new(0)
            })
        );

        let over_occupied = FrameInput {
            cursor_world_space: Some(Vec2::new(150.0, 310.0)),
            confirm_action: true,
        };
        assert_eq!(placement_command(&over_occupied, &tiles), None);

        let without_click = FrameInput {
            cursor_world_space: Some(Vec2::new(110.0, 310.0)),
            confirm_action: false,
        };
        assert_eq!(placement_command(&without_click, &tiles), None);
    }
}
