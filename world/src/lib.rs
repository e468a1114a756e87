#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative Lane Defence simulation state.
//!
//! The world owns every mutable gameplay fact: the enemy collection, the
//! tower roster with their in-flight projectiles, the coin and life ledgers,
//! the wave counter, and the death-effect overlay. All mutation flows through
//! [`apply`], which executes one [`Command`] and appends the resulting
//! [`Event`]s. Read access goes through the [`query`] module, which hands out
//! value snapshots so systems can never alias live state.

mod path;

use lane_defence_core::angle::AttackDirection;
use lane_defence_core::animation::AnimationState;
use lane_defence_core::{
    Coins, Command, EnemyId, Event, FrameRatio, Health, LevelLayout, PlacementError, Position,
    TileIndex, TowerId, Wave, ATTACK_CYCLE_FRAMES, WELCOME_BANNER,
};

/// Enemy footprint edge length in world units.
const ENEMY_EXTENT: f32 = 50.0;
/// Half the enemy footprint, used to derive the centre from the origin.
const ENEMY_HALF_EXTENT: f32 = ENEMY_EXTENT / 2.0;
/// Enemy collision radius in world units.
const ENEMY_RADIUS: f32 = 25.0;
/// Enemy walk speed per tick at the reference frame rate.
const ENEMY_BASE_SPEED: f32 = 0.6;
const ENEMY_WALK_FRAMES: u32 = 6;
const ENEMY_WALK_HOLD: u32 = 30;

/// Tower footprint edge length in world units.
const TOWER_EXTENT: f32 = 64.0;
/// Half the tower footprint, used to derive the centre from the tile origin.
const TOWER_HALF_EXTENT: f32 = TOWER_EXTENT / 2.0;
/// Engagement radius measured from the tower centre.
pub const TOWER_RANGE: f32 = 150.0;
/// Health removed from an enemy by one projectile hit.
pub const TOWER_DAMAGE: i32 = 10;
/// Coin cost debited when a tower is constructed.
pub const TOWER_COST: u32 = 50;
/// Coins credited when an enemy is destroyed.
pub const ENEMY_BOUNTY: u32 = 10;
/// Vertical distance from the tower centre to the archer's muzzle.
const MUZZLE_OFFSET_Y: f32 = -26.0;
const ATTACK_HOLD: u32 = 23;
const IDLE_FRAMES: u32 = 4;
const IDLE_HOLD: u32 = 40;
const BASE_FRAMES: u32 = 4;
const BASE_HOLD: u32 = 40;
const DEATH_FRAMES: u32 = 6;
const DEATH_HOLD: u32 = 20;

/// Projectile travel speed per tick at the reference frame rate.
const PROJECTILE_SPEED: f32 = 1.8;
/// Projectile collision radius in world units.
const PROJECTILE_RADIUS: f32 = 5.0;

/// Coin balance a fresh run starts with.
pub const STARTING_COINS: Coins = Coins::new(100);
/// Lives a fresh run starts with.
pub const STARTING_LIVES: Health = Health::new(10);

/// An enemy walking the waypoint lane.
#[derive(Clone, Debug)]
struct Enemy {
    id: EnemyId,
    position: Position,
    radius: f32,
    health: Health,
    max_health: Health,
    waypoint_index: usize,
    walk: AnimationState,
}

impl Enemy {
    fn center(&self) -> Position {
        self.position.offset(ENEMY_HALF_EXTENT, ENEMY_HALF_EXTENT)
    }
}

/// A homing projectile owned by the tower that fired it.
#[derive(Clone, Debug)]
struct Projectile {
    position: Position,
    target: EnemyId,
    heading: f32,
}

/// A constructed tower with its animation channels and live projectiles.
#[derive(Clone, Debug)]
struct Tower {
    id: TowerId,
    position: Position,
    target: Option<EnemyId>,
    projectiles: Vec<Projectile>,
    base: AnimationState,
    idle: AnimationState,
    attack: AnimationState,
    previous_attack_frame: u32,
    attack_direction: AttackDirection,
    flip_horizontal: bool,
}

impl Tower {
    fn new(id: TowerId, position: Position) -> Self {
        Self {
            id,
            position,
            target: None,
            projectiles: Vec::new(),
            base: AnimationState::new(BASE_FRAMES, BASE_HOLD),
            idle: AnimationState::new(IDLE_FRAMES, IDLE_HOLD),
            attack: AnimationState::new(ATTACK_CYCLE_FRAMES, ATTACK_HOLD),
            previous_attack_frame: 0,
            attack_direction: AttackDirection::Right,
            flip_horizontal: AttackDirection::Right.flip_horizontal(),
        }
    }

    fn center(&self) -> Position {
        self.position.offset(TOWER_HALF_EXTENT, TOWER_HALF_EXTENT)
    }

    fn muzzle(&self) -> Position {
        self.center().offset(0.0, MUZZLE_OFFSET_Y)
    }
}

/// A transient death animation left behind by a destroyed enemy.
#[derive(Clone, Debug)]
struct DeathEffect {
    center: Position,
    animation: AnimationState,
}

/// A buildable tile from the active level.
#[derive(Clone, Debug)]
struct PlacementTile {
    position: Position,
    occupied: bool,
}

/// The complete authoritative game state.
#[derive(Clone, Debug)]
pub struct World {
    banner: &'static str,
    level: LevelLayout,
    enemies: Vec<Enemy>,
    towers: Vec<Tower>,
    death_effects: Vec<DeathEffect>,
    tiles: Vec<PlacementTile>,
    coins: Coins,
    lives: Health,
    wave: Wave,
    wave_pending: bool,
    game_over: bool,
    next_enemy_id: u64,
    next_tower_id: u32,
}

impl World {
    /// Creates a world running the bundled default level.
    #[must_use]
    pub fn new() -> Self {
        let mut world = Self {
            banner: WELCOME_BANNER,
            level: default_level(),
            enemies: Vec::new(),
            towers: Vec::new(),
            death_effects: Vec::new(),
            tiles: Vec::new(),
            coins: STARTING_COINS,
            lives: STARTING_LIVES,
            wave: Wave::new(0),
            wave_pending: false,
            game_over: false,
            next_enemy_id: 0,
            next_tower_id: 0,
        };
        world.rebuild_tiles();
        world
    }

    fn rebuild_tiles(&mut self) {
        self.tiles = self
            .level
            .placement_tiles()
            .iter()
            .map(|&position| PlacementTile {
                position,
                occupied: false,
            })
            .collect();
    }

    fn reset_with_level(&mut self, level: LevelLayout) {
        self.level = level;
        self.enemies.clear();
        self.towers.clear();
        self.death_effects.clear();
        self.coins = STARTING_COINS;
        self.lives = STARTING_LIVES;
        self.wave = Wave::new(0);
        self.wave_pending = false;
        self.game_over = false;
        self.rebuild_tiles();
    }

    fn tick(&mut self, ratio: FrameRatio, out_events: &mut Vec<Event>) {
        if self.game_over {
            return;
        }
        self.advance_enemies(ratio, out_events);
        self.advance_death_effects(ratio);
        self.check_wave_clear(out_events);
        self.advance_towers(ratio);
        self.advance_projectiles(ratio, out_events);
    }

    /// Walks every enemy, then removes the ones past the exit boundary.
    /// Iterates in reverse so removal never skips an entry.
    fn advance_enemies(&mut self, ratio: FrameRatio, out_events: &mut Vec<Event>) {
        for index in (0..self.enemies.len()).rev() {
            {
                let enemy = &mut self.enemies[index];
                path::follow(
                    &mut enemy.position,
                    &mut enemy.waypoint_index,
                    self.level.waypoints(),
                    ratio,
                );
                enemy.walk.advance(ratio);
            }
            if self.enemies[index].position.x > self.level.width() {
                let enemy = self.enemies.remove(index);
                self.lives = self.lives.reduced(1);
                out_events.push(Event::EnemyBreached {
                    enemy: enemy.id,
                    lives_remaining: self.lives,
                });
                if self.lives.is_depleted() && !self.game_over {
                    self.game_over = true;
                    out_events.push(Event::GameOver { wave: self.wave });
                }
            }
        }
    }

    fn advance_death_effects(&mut self, ratio: FrameRatio) {
        for index in (0..self.death_effects.len()).rev() {
            self.death_effects[index].animation.advance(ratio);
            if self.death_effects[index].animation.is_on_last_frame() {
                let _ = self.death_effects.remove(index);
            }
        }
    }

    /// Advances the wave counter once the field is empty. The pending latch
    /// keeps the counter from racing ahead while spawn commands for the
    /// announced wave are still in flight.
    fn check_wave_clear(&mut self, out_events: &mut Vec<Event>) {
        if self.game_over || self.wave_pending || !self.enemies.is_empty() {
            return;
        }
        self.wave = self.wave.next();
        self.wave_pending = true;
        out_events.push(Event::WaveStarted { wave: self.wave });
    }

    fn advance_towers(&mut self, ratio: FrameRatio) {
        for tower in self.towers.iter_mut() {
            tower.base.advance(ratio);
            let engaged = match tower.target {
                Some(target) => self.enemies.iter().any(|enemy| enemy.id == target),
                None => false,
            };
            tower.previous_attack_frame = tower.attack.frame();
            if engaged {
                tower.attack.advance(ratio);
            } else {
                tower.target = None;
                tower.idle.advance(ratio);
            }
        }
    }

    /// Re-aims, moves, and collision-checks every projectile. A projectile
    /// whose target no longer exists is discarded without an event.
    fn advance_projectiles(&mut self, ratio: FrameRatio, out_events: &mut Vec<Event>) {
        for tower_index in 0..self.towers.len() {
            for projectile_index in (0..self.towers[tower_index].projectiles.len()).rev() {
                let target = self.towers[tower_index].projectiles[projectile_index].target;
                let Some(enemy_index) = self.enemies.iter().position(|enemy| enemy.id == target)
                else {
                    let _ = self.towers[tower_index].projectiles.remove(projectile_index);
                    continue;
                };
                let enemy_center = self.enemies[enemy_index].center();
                let contact_radius = self.enemies[enemy_index].radius + PROJECTILE_RADIUS;
                {
                    let projectile =
                        &mut self.towers[tower_index].projectiles[projectile_index];
                    let heading = (enemy_center.y - projectile.position.y)
                        .atan2(enemy_center.x - projectile.position.x);
                    let step = PROJECTILE_SPEED * ratio.get();
                    projectile.position.x += heading.cos() * step;
                    projectile.position.y += heading.sin() * step;
                    projectile.heading = heading;
                }
                let projectile_position =
                    self.towers[tower_index].projectiles[projectile_index].position;
                if projectile_position.distance_to(enemy_center) < contact_radius {
                    let tower_id = self.towers[tower_index].id;
                    let _ = self.towers[tower_index].projectiles.remove(projectile_index);
                    let health = self.enemies[enemy_index].health.reduced(TOWER_DAMAGE);
                    self.enemies[enemy_index].health = health;
                    out_events.push(Event::ProjectileHit {
                        tower: tower_id,
                        enemy: target,
                        health_remaining: health,
                    });
                    if health.is_depleted() {
                        let enemy = self.enemies.remove(enemy_index);
                        self.death_effects.push(DeathEffect {
                            center: enemy.center(),
                            animation: AnimationState::new(DEATH_FRAMES, DEATH_HOLD),
                        });
                        self.coins = self.coins.credited(ENEMY_BOUNTY);
                        out_events.push(Event::EnemyKilled {
                            enemy: target,
                            bounty: Coins::new(ENEMY_BOUNTY),
                        });
                    }
                }
            }
        }
    }

    fn assign_target(&mut self, tower_id: TowerId, enemy: Option<EnemyId>) {
        let exists = match enemy {
            Some(id) => self.enemies.iter().any(|candidate| candidate.id == id),
            None => false,
        };
        if let Some(tower) = self.towers.iter_mut().find(|tower| tower.id == tower_id) {
            tower.target = if exists { enemy } else { None };
        }
    }

    fn fire_projectile(&mut self, tower_id: TowerId, out_events: &mut Vec<Event>) {
        let Some(tower_index) = self.towers.iter().position(|tower| tower.id == tower_id) else {
            return;
        };
        let Some(target) = self.towers[tower_index].target else {
            return;
        };
        let Some(enemy) = self.enemies.iter().find(|enemy| enemy.id == target) else {
            return;
        };
        let muzzle = self.towers[tower_index].muzzle();
        let enemy_center = enemy.center();
        let heading = (enemy_center.y - muzzle.y).atan2(enemy_center.x - muzzle.x);
        let tower = &mut self.towers[tower_index];
        tower.attack_direction = AttackDirection::from_heading(heading);
        tower.flip_horizontal = tower.attack_direction.flip_horizontal();
        tower.projectiles.push(Projectile {
            position: muzzle,
            target,
            heading,
        });
        out_events.push(Event::ProjectileFired {
            tower: tower_id,
            enemy: target,
        });
    }

    fn spawn_enemy(&mut self, entry_offset: f32, max_health: Health, out_events: &mut Vec<Event>) {
        let Some(&entry) = self.level.waypoints().first() else {
            return;
        };
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id += 1;
        self.wave_pending = false;
        self.enemies.push(Enemy {
            id,
            position: Position::new(entry.x - entry_offset, entry.y),
            radius: ENEMY_RADIUS,
            health: max_health,
            max_health,
            waypoint_index: 0,
            walk: AnimationState::new(ENEMY_WALK_FRAMES, ENEMY_WALK_HOLD),
        });
        out_events.push(Event::EnemySpawned {
            enemy: id,
            max_health,
        });
    }

    fn place_tower(&mut self, tile: TileIndex, out_events: &mut Vec<Event>) {
        let Some(slot) = self.tiles.get_mut(tile.get() as usize) else {
            out_events.push(Event::TowerRejected {
                tile,
                reason: PlacementError::UnknownTile,
            });
            return;
        };
        if slot.occupied {
            out_events.push(Event::TowerRejected {
                tile,
                reason: PlacementError::Occupied,
            });
            return;
        }
        let Some(remaining) = self.coins.debited(TOWER_COST) else {
            out_events.push(Event::TowerRejected {
                tile,
                reason: PlacementError::InsufficientCoins,
            });
            return;
        };
        slot.occupied = true;
        let position = slot.position;
        self.coins = remaining;
        let id = TowerId::new(self.next_tower_id);
        self.next_tower_id += 1;
        self.towers.push(Tower::new(id, position));
        // Lower towers draw in front, so keep the roster sorted by y.
        self.towers.sort_by(|a, b| {
            a.position
                .y
                .partial_cmp(&b.position.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        out_events.push(Event::TowerPlaced {
            tower: id,
            tile,
            coins_remaining: self.coins,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Executes one command against the world, appending any resulting events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureLevel { level } => world.reset_with_level(level),
        Command::Tick { ratio } => world.tick(ratio, out_events),
        Command::AssignTarget { tower, enemy } => world.assign_target(tower, enemy),
        Command::FireProjectile { tower } => world.fire_projectile(tower, out_events),
        Command::SpawnEnemy {
            entry_offset,
            max_health,
        } => world.spawn_enemy(entry_offset, max_health, out_events),
        Command::PlaceTower { tile } => world.place_tower(tile, out_events),
    }
}

/// The level bundled with the engine: a three-bend lane across a 768 by 512
/// playfield with buildable anchors hugging the path.
#[must_use]
pub fn default_level() -> LevelLayout {
    LevelLayout::new(
        768.0,
        512.0,
        32.0,
        vec![
            Position::new(-16.0, 112.0),
            Position::new(176.0, 112.0),
            Position::new(176.0, 304.0),
            Position::new(432.0, 304.0),
            Position::new(432.0, 144.0),
            Position::new(624.0, 144.0),
            Position::new(624.0, 368.0),
            Position::new(800.0, 368.0),
        ],
        vec![
            Position::new(64.0, 160.0),
            Position::new(128.0, 32.0),
            Position::new(224.0, 192.0),
            Position::new(256.0, 320.0),
            Position::new(320.0, 224.0),
            Position::new(384.0, 352.0),
            Position::new(480.0, 192.0),
            Position::new(512.0, 320.0),
            Position::new(544.0, 64.0),
            Position::new(640.0, 224.0),
            Position::new(672.0, 416.0),
            Position::new(704.0, 288.0),
        ],
    )
}

/// Read-only projections over the world for systems and adapters.
pub mod query {
    use lane_defence_core::angle;
    use lane_defence_core::{
        Coins, DeathEffectSnapshot, DeathEffectView, EnemySnapshot, EnemyView, Health,
        LevelLayout, Position, ProjectileSnapshot, TileIndex, TileSnapshot, TileView,
        TowerSnapshot, TowerView, Wave,
    };

    use super::{World, PROJECTILE_RADIUS, TOWER_RANGE};

    /// Banner to present when the experience boots.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// The active level layout.
    #[must_use]
    pub fn level(world: &World) -> &LevelLayout {
        &world.level
    }

    /// Current coin balance.
    #[must_use]
    pub fn coins(world: &World) -> Coins {
        world.coins
    }

    /// Current lives; may be negative after the final breach.
    #[must_use]
    pub fn lives(world: &World) -> Health {
        world.lives
    }

    /// Current wave number; 0 until the first wave is announced.
    #[must_use]
    pub fn wave(world: &World) -> Wave {
        world.wave
    }

    /// Whether the run has ended.
    #[must_use]
    pub fn is_game_over(world: &World) -> bool {
        world.game_over
    }

    /// Snapshot of every enemy, ordered by spawn id.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .map(|enemy| EnemySnapshot {
                    id: enemy.id,
                    position: enemy.position,
                    center: enemy.center(),
                    radius: enemy.radius,
                    health: enemy.health,
                    max_health: enemy.max_health,
                    waypoint_index: enemy.waypoint_index,
                    walk_frame: enemy.walk.frame(),
                })
                .collect(),
        )
    }

    /// Snapshot of every tower and its in-flight projectiles, ordered by id.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(
            world
                .towers
                .iter()
                .map(|tower| TowerSnapshot {
                    id: tower.id,
                    position: tower.position,
                    center: tower.center(),
                    radius: TOWER_RANGE,
                    target: tower.target,
                    attack_frame: tower.attack.frame(),
                    previous_attack_frame: tower.previous_attack_frame,
                    idle_frame: tower.idle.frame(),
                    base_frame: tower.base.frame(),
                    attack_direction: tower.attack_direction,
                    flip_horizontal: tower.flip_horizontal,
                    projectiles: tower
                        .projectiles
                        .iter()
                        .map(|projectile| ProjectileSnapshot {
                            position: projectile.position,
                            target: projectile.target,
                            radius: PROJECTILE_RADIUS,
                            heading: projectile.heading,
                            sprite: angle::bin(projectile.heading),
                        })
                        .collect(),
                })
                .collect(),
        )
    }

    /// Snapshot of active death effects in creation order.
    #[must_use]
    pub fn death_effect_view(world: &World) -> DeathEffectView {
        DeathEffectView::from_snapshots(
            world
                .death_effects
                .iter()
                .map(|effect| DeathEffectSnapshot {
                    center: effect.center,
                    frame: effect.animation.frame(),
                })
                .collect(),
        )
    }

    /// Snapshot of every placement tile, ordered by index.
    #[must_use]
    pub fn tile_view(world: &World) -> TileView {
        let size = world.level.tile_size();
        TileView::from_snapshots(
            world
                .tiles
                .iter()
                .enumerate()
                .map(|(index, tile)| TileSnapshot {
                    index: TileIndex::new(index as u32),
                    position: tile.position,
                    size,
                    occupied: tile.occupied,
                })
                .collect(),
        )
    }

    /// Hit-tests a world-space point against the placement grid. Bounds are
    /// exclusive on all four edges, so points exactly on a tile border miss.
    #[must_use]
    pub fn tile_at(world: &World, point: Position) -> Option<TileIndex> {
        let size = world.level.tile_size();
        world.tiles.iter().enumerate().find_map(|(index, tile)| {
            let inside = point.x > tile.position.x
                && point.x < tile.position.x + size
                && point.y > tile.position.y
                && point.y < tile.position.y + size;
            inside.then(|| TileIndex::new(index as u32))
        })
    }
}
