//! All game entity types and their per-frame update rules.
//!
//! Entities never reference each other; the game state owns every one of
//! them through a single collection.

use crate::collision::{Bounds, Rect};
use crate::constants::{
    BASE_SHOT_INTERVAL_MS, ENEMY_SIZE, ITEM_SIZE, ITEM_SPEED, MAX_MISSILE_TIER, MISSILE_DRIFT,
    MISSILE_HEIGHT, MISSILE_SPEED, MISSILE_WIDTH, PLAYER_SIZE, PLAY_HEIGHT,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    /// Type 1: goes down on the first hit.
    Grunt,
    /// Type 2: takes two hits.
    Armored,
}

impl EnemyKind {
    pub fn max_health(self) -> u8 {
        match self {
            EnemyKind::Grunt => 1,
            EnemyKind::Armored => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// Restores energy.
    Health,
    /// Raises the missile-upgrade tier.
    MissileUpgrade,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
}

impl Player {
    pub const W: f32 = PLAYER_SIZE;
    pub const H: f32 = PLAYER_SIZE;
}

impl Bounds for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, Self::W, Self::H)
    }
}

// ── Missiles ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Missile {
    pub x: f32,
    pub y: f32,
    /// Launch angle in degrees; 0 is straight up, positive drifts right.
    pub angle_deg: f32,
}

impl Missile {
    pub const W: f32 = MISSILE_WIDTH;
    pub const H: f32 = MISSILE_HEIGHT;

    pub fn new(x: f32, y: f32, angle_deg: f32) -> Self {
        Missile { x, y, angle_deg }
    }

    /// One frame of flight: straight up plus a constant sideways drift.
    pub fn advanced(&self) -> Missile {
        Missile {
            x: self.x + self.angle_deg.to_radians().sin() * MISSILE_DRIFT,
            y: self.y - MISSILE_SPEED,
            ..self.clone()
        }
    }

    /// Fully above the top edge.
    pub fn is_off_screen(&self) -> bool {
        self.y < -Self::H
    }
}

impl Bounds for Missile {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, Self::W, Self::H)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub kind: EnemyKind,
    pub health: u8,
}

impl Enemy {
    pub const W: f32 = ENEMY_SIZE;
    pub const H: f32 = ENEMY_SIZE;

    /// A fresh enemy with full health, parked just above the top edge.
    pub fn new(x: f32, kind: EnemyKind) -> Self {
        Enemy {
            x,
            y: -Self::H,
            kind,
            health: kind.max_health(),
        }
    }

    /// Fall speed is shared by every enemy on screen, so the caller passes it in.
    pub fn advanced(&self, speed: f32) -> Enemy {
        Enemy {
            y: self.y + speed,
            ..self.clone()
        }
    }

    pub fn is_off_screen(&self) -> bool {
        self.y > PLAY_HEIGHT
    }
}

impl Bounds for Enemy {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, Self::W, Self::H)
    }
}

// ── Items ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub x: f32,
    pub y: f32,
    pub kind: ItemKind,
}

impl Item {
    pub const W: f32 = ITEM_SIZE;
    pub const H: f32 = ITEM_SIZE;

    pub fn new(x: f32, kind: ItemKind) -> Self {
        Item { x, y: -Self::H, kind }
    }

    pub fn advanced(&self) -> Item {
        Item {
            y: self.y + ITEM_SPEED,
            ..self.clone()
        }
    }

    pub fn is_off_screen(&self) -> bool {
        self.y > PLAY_HEIGHT
    }
}

impl Bounds for Item {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, Self::W, Self::H)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game session. Cloneable so the frame function can return a new
/// copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub missiles: Vec<Missile>,
    pub items: Vec<Item>,
    /// 0..=MAX_ENERGY; the game ends when it reaches 0.
    pub energy: u32,
    pub score: u32,
    pub status: GameStatus,
    /// Number of missile-upgrade pickups, capped at MAX_MISSILE_TIER.
    pub missile_tier: u8,
    pub start_ms: f64,
    pub last_shot_ms: f64,
    pub last_item_ms: f64,
}

impl GameState {
    /// Milliseconds between automatic volleys at the current tier.
    pub fn shot_interval_ms(&self) -> f64 {
        if self.missile_tier == 0 {
            BASE_SHOT_INTERVAL_MS
        } else {
            BASE_SHOT_INTERVAL_MS / 2.0
        }
    }

    /// Missiles per volley at the current tier.
    pub fn missile_count(&self) -> usize {
        match self.missile_tier.min(MAX_MISSILE_TIER) {
            0 | 1 => 1,
            2 => 2,
            _ => 3,
        }
    }

    pub fn elapsed_secs(&self, now_ms: f64) -> f64 {
        (now_ms - self.start_ms) / 1000.0
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}
