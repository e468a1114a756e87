#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

pub mod angle;
pub mod animation;
pub mod level;

use serde::{Deserialize, Serialize};

use crate::angle::{ArrowSprite, AttackDirection};
pub use crate::level::LevelLayout;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Lane Defence.";

/// Tick rate every per-frame distance and animation hold is normalised to.
pub const REFERENCE_FRAME_RATE: u32 = 180;

/// Number of frames in a tower's attack animation cycle.
pub const ATTACK_CYCLE_FRAMES: u32 = 6;

/// Attack-cycle frame whose rising edge releases a projectile.
pub const ATTACK_TRIGGER_FRAME: u32 = 5;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the active level layout and resets the run.
    ConfigureLevel {
        /// Static waypoint path and buildable-tile layout to install.
        level: LevelLayout,
    },
    /// Advances the simulation by one frame.
    Tick {
        /// Frame-rate normalisation ratio measured for this frame.
        ratio: FrameRatio,
    },
    /// Assigns or clears a tower's engagement target for this frame.
    AssignTarget {
        /// Tower whose target is being re-evaluated.
        tower: TowerId,
        /// Enemy handle to engage, or `None` for the explicit idle state.
        enemy: Option<EnemyId>,
    },
    /// Requests that a tower release one projectile at its current target.
    FireProjectile {
        /// Tower that reached the trigger frame of its attack cycle.
        tower: TowerId,
    },
    /// Requests creation of one enemy left of the first waypoint.
    SpawnEnemy {
        /// Distance along negative x from the first waypoint, in world units.
        entry_offset: f32,
        /// Maximum health assigned by the difficulty curve.
        max_health: Health,
    },
    /// Requests construction of a tower on the provided placement tile.
    PlaceTower {
        /// Tile the player confirmed while hovering.
        tile: TileIndex,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Announces that the wave counter advanced and a new batch is due.
    WaveStarted {
        /// Wave number after the increment; the first wave is 1.
        wave: Wave,
    },
    /// Confirms that an enemy entered the path.
    EnemySpawned {
        /// Identifier assigned to the new enemy.
        enemy: EnemyId,
        /// Maximum health the enemy spawned with.
        max_health: Health,
    },
    /// Reports that an enemy crossed the exit boundary.
    EnemyBreached {
        /// Identifier of the enemy that escaped.
        enemy: EnemyId,
        /// Player lives remaining after the breach; never clamped at zero.
        lives_remaining: Health,
    },
    /// Announces that the player's lives reached zero.
    GameOver {
        /// Wave that was active when the run ended.
        wave: Wave,
    },
    /// Confirms that a tower was constructed.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Tile the tower occupies.
        tile: TileIndex,
        /// Coin balance after the construction cost was debited.
        coins_remaining: Coins,
    },
    /// Reports that a tower placement request was rejected.
    TowerRejected {
        /// Tile provided in the placement request.
        tile: TileIndex,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a tower released a projectile.
    ProjectileFired {
        /// Tower that fired.
        tower: TowerId,
        /// Enemy the projectile is bound to.
        enemy: EnemyId,
    },
    /// Reports that a projectile collided with its target.
    ProjectileHit {
        /// Tower that owned the projectile.
        tower: TowerId,
        /// Enemy that was struck.
        enemy: EnemyId,
        /// Enemy health after the hit; may be negative on the killing blow.
        health_remaining: Health,
    },
    /// Confirms that an enemy was destroyed and the bounty credited.
    EnemyKilled {
        /// Identifier of the destroyed enemy.
        enemy: EnemyId,
        /// Coins credited to the player ledger.
        bounty: Coins,
    },
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The provided tile index does not exist in the active level.
    UnknownTile,
    /// The tile already hosts a tower.
    Occupied,
    /// The player cannot afford the construction cost.
    InsufficientCoins,
}

/// Point in canvas-space world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate, increasing rightward.
    pub x: f32,
    /// Vertical coordinate, increasing downward.
    pub y: f32,
}

impl Position {
    /// Creates a new position from explicit coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance_to(self, other: Position) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Returns the position shifted by the provided deltas.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Scalar that normalises per-frame movement against the reference tick rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameRatio(f32);

impl FrameRatio {
    /// Creates a new ratio, normalising non-finite or non-positive input to 1.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_finite() && value > 0.0 {
            Self(value)
        } else {
            Self(1.0)
        }
    }

    /// Retrieves the underlying scalar.
    #[must_use]
    pub const fn get(&self) -> f32 {
        self.0
    }
}

impl Default for FrameRatio {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Signed health value; intentionally never clamped at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Health(i32);

impl Health {
    /// Creates a new health value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric health value.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Returns the value reduced by the provided amount, without clamping.
    #[must_use]
    pub const fn reduced(self, amount: i32) -> Self {
        Self(self.0 - amount)
    }

    /// Reports whether the value reached or passed zero.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 <= 0
    }
}

/// Non-negative coin ledger value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coins(u32);

impl Coins {
    /// Creates a new coin balance.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric balance.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the balance credited by the provided amount.
    #[must_use]
    pub const fn credited(self, amount: u32) -> Self {
        Self(self.0.saturating_add(amount))
    }

    /// Attempts to debit the provided amount, failing when unaffordable.
    #[must_use]
    pub fn debited(self, amount: u32) -> Option<Self> {
        self.0.checked_sub(amount).map(Self)
    }
}

/// Monotonically increasing wave counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Wave(u32);

impl Wave {
    /// Creates a new wave counter value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric wave number.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the next wave number.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Unique identifier assigned to an enemy.
///
/// Identifiers are monotonic and never reused, so a retained `EnemyId` can
/// never alias a later spawn; an existence lookup is a complete validity
/// check for the weak references held by towers and projectiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u64);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Index of a placement tile within the active level's tile list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileIndex(u32);

impl TileIndex {
    /// Creates a new tile index.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric tile index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Top-left anchor of the enemy's bounding box.
    pub position: Position,
    /// Geometric center derived from the anchor and half-extent.
    pub center: Position,
    /// Collision radius in world units.
    pub radius: f32,
    /// Current health; may be negative on the killing blow.
    pub health: Health,
    /// Maximum health assigned at spawn.
    pub max_health: Health,
    /// Index of the waypoint the enemy is walking toward.
    pub waypoint_index: usize,
    /// Current frame of the walk animation.
    pub walk_frame: u32,
}

impl EnemySnapshot {
    /// Fraction of health remaining, for health-bar presentation.
    #[must_use]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health.get() <= 0 {
            return 0.0;
        }
        self.health.get() as f32 / self.max_health.get() as f32
    }
}

/// Read-only snapshot describing all enemies on the path.
///
/// Iteration order equals spawn order because identifiers are monotonic;
/// targeting relies on this for its first-in-collection selection.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of one in-flight projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Current position of the projectile.
    pub position: Position,
    /// Enemy the projectile is bound to; it never retargets.
    pub target: EnemyId,
    /// Collision radius in world units.
    pub radius: f32,
    /// Heading toward the target recomputed on the latest tick, in radians.
    pub heading: f32,
    /// Directional sprite bin derived from the heading on the latest tick.
    pub sprite: ArrowSprite,
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Top-left anchor of the tower footprint.
    pub position: Position,
    /// Center of the tower footprint.
    pub center: Position,
    /// Engagement range measured from the center.
    pub radius: f32,
    /// Currently assigned target, or `None` when idle.
    pub target: Option<EnemyId>,
    /// Attack-cycle frame after the latest tick.
    pub attack_frame: u32,
    /// Attack-cycle frame before the latest tick; equal to
    /// [`TowerSnapshot::attack_frame`] whenever the tower was idle.
    pub previous_attack_frame: u32,
    /// Current frame of the idle animation.
    pub idle_frame: u32,
    /// Current frame of the tower base animation.
    pub base_frame: u32,
    /// Attack sprite variant chosen at the most recent shot.
    pub attack_direction: AttackDirection,
    /// Whether the attack sprite is mirrored horizontally.
    pub flip_horizontal: bool,
    /// Projectiles owned by the tower, in launch order.
    pub projectiles: Vec<ProjectileSnapshot>,
}

/// Read-only snapshot describing all towers placed in the level.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of one death effect.
///
/// The center is a snapshot captured when the enemy died; the effect never
/// tracks the removed entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeathEffectSnapshot {
    /// Center the destroyed enemy occupied at the moment of death.
    pub center: Position,
    /// Current frame of the death animation.
    pub frame: u32,
}

/// Read-only snapshot describing all active death effects.
#[derive(Clone, Debug, Default)]
pub struct DeathEffectView {
    snapshots: Vec<DeathEffectSnapshot>,
}

impl DeathEffectView {
    /// Creates a new view preserving the provided creation order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<DeathEffectSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &DeathEffectSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<DeathEffectSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of one placement tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileSnapshot {
    /// Index of the tile within the level's placement list.
    pub index: TileIndex,
    /// Top-left anchor of the tile.
    pub position: Position,
    /// Side length of the square tile.
    pub size: f32,
    /// Whether the tile already hosts a tower; flips true exactly once.
    pub occupied: bool,
}

/// Read-only snapshot describing every buildable tile in the level.
#[derive(Clone, Debug, Default)]
pub struct TileView {
    snapshots: Vec<TileSnapshot>,
}

impl TileView {
    /// Creates a new tile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.index);
        Self { snapshots }
    }

    /// Iterator over the captured tile snapshots in index order.
    pub fn iter(&self) -> impl Iterator<Item = &TileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TileSnapshot> {
        self.snapshots
    }
}
