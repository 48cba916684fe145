//! Draw commands produced by the frame function.
//!
//! The core never paints anything itself. It emits an ordered list of
//! commands and the host translates them into pixels or terminal cells.

use crate::collision::{Bounds, Rect};
use crate::constants::MAX_ENERGY;
use crate::entities::{Enemy, EnemyKind, GameState, Item, ItemKind, Missile, Player};

/// Visual assets the host must be able to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background,
    Player,
    EnemyType1,
    EnemyType2,
    HealthItem,
    MissileItem,
}

impl Sprite {
    pub const ALL: [Sprite; 6] = [
        Sprite::Background,
        Sprite::Player,
        Sprite::EnemyType1,
        Sprite::EnemyType2,
        Sprite::HealthItem,
        Sprite::MissileItem,
    ];
}

// ── Asset tables ──────────────────────────────────────────────────────────────

pub fn enemy_sprite(kind: EnemyKind) -> Sprite {
    match kind {
        EnemyKind::Grunt => Sprite::EnemyType1,
        EnemyKind::Armored => Sprite::EnemyType2,
    }
}

pub fn item_sprite(kind: ItemKind) -> Sprite {
    match kind {
        ItemKind::Health => Sprite::HealthItem,
        ItemKind::MissileUpgrade => Sprite::MissileItem,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Full play-area backdrop.
    Background,
    /// Energy bar (0.0..=1.0) and score readout.
    StatusBar { energy_fraction: f32, score: u32 },
    Sprite { sprite: Sprite, rect: Rect },
    /// Plain filled rectangle; missiles are drawn this way.
    FillRect { rect: Rect },
    /// Final message once the game ends.
    GameOverText { score: u32 },
}

impl DrawCommand {
    pub fn status(state: &GameState) -> Self {
        DrawCommand::StatusBar {
            energy_fraction: state.energy as f32 / MAX_ENERGY as f32,
            score: state.score,
        }
    }

    pub fn player(player: &Player) -> Self {
        DrawCommand::Sprite {
            sprite: Sprite::Player,
            rect: player.bounds(),
        }
    }

    pub fn enemy(enemy: &Enemy) -> Self {
        DrawCommand::Sprite {
            sprite: enemy_sprite(enemy.kind),
            rect: enemy.bounds(),
        }
    }

    pub fn item(item: &Item) -> Self {
        DrawCommand::Sprite {
            sprite: item_sprite(item.kind),
            rect: item.bounds(),
        }
    }

    pub fn missile(missile: &Missile) -> Self {
        DrawCommand::FillRect {
            rect: missile.bounds(),
        }
    }
}

/// Output of a single frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Final score, if this frame ended the game.
    pub fn game_over(&self) -> Option<u32> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::GameOverText { score } => Some(*score),
            _ => None,
        })
    }
}
