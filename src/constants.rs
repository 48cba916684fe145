//! Gameplay constants. All distances are logical play-area units, all times
//! are milliseconds unless the name says otherwise.

// ── Play area ─────────────────────────────────────────────────────────────────

pub const PLAY_WIDTH: f32 = 800.0;
pub const PLAY_HEIGHT: f32 = 600.0;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 130.0;
pub const PLAYER_SPEED: f32 = 5.0;
/// Gap between the player's starting position and the bottom edge.
pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;

pub const MAX_ENERGY: u32 = 100;
pub const ENEMY_CONTACT_DAMAGE: u32 = 20;
pub const HEALTH_ITEM_RESTORE: u32 = 30;

// ── Missiles ──────────────────────────────────────────────────────────────────

pub const MISSILE_WIDTH: f32 = 8.0;
pub const MISSILE_HEIGHT: f32 = 16.0;
pub const MISSILE_SPEED: f32 = 8.0;
/// Horizontal drift per frame is `sin(angle) * MISSILE_DRIFT`.
pub const MISSILE_DRIFT: f32 = 5.0;
/// Angular gap between neighbouring missiles of one volley, in degrees.
pub const VOLLEY_SPREAD_DEG: f32 = 15.0;

pub const BASE_SHOT_INTERVAL_MS: f64 = 500.0;
pub const MAX_MISSILE_TIER: u8 = 3;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_SIZE: f32 = 1600.0;
pub const ENEMY_BASE_SPEED: f32 = 2.0;
/// Extra fall speed per elapsed session second.
pub const ENEMY_SPEED_RAMP: f32 = 0.02;
/// Chance per frame that a new enemy appears.
pub const ENEMY_SPAWN_CHANCE: f64 = 0.02;

// ── Items ─────────────────────────────────────────────────────────────────────

pub const ITEM_SIZE: f32 = 120.0;
pub const ITEM_SPEED: f32 = 3.0;
pub const ITEM_INTERVAL_MS: f64 = 10_000.0;
