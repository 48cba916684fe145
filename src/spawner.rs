//! Enemy and item creation. All randomness comes through the injected RNG so
//! callers control determinism.

use rand::Rng;

use crate::constants::{ENEMY_SPAWN_CHANCE, ITEM_INTERVAL_MS, PLAY_WIDTH};
use crate::entities::{Enemy, EnemyKind, Item, ItemKind};

/// Random x such that an entity of width `w` starts inside the play area.
/// Entities wider than the play area get a negative offset instead.
fn random_x(rng: &mut impl Rng, w: f32) -> f32 {
    rng.gen::<f32>() * (PLAY_WIDTH - w)
}

/// Per-frame enemy roll. Returns a new enemy roughly one frame in fifty.
pub fn roll_enemy(rng: &mut impl Rng) -> Option<Enemy> {
    if rng.gen::<f64>() >= ENEMY_SPAWN_CHANCE {
        return None;
    }
    let kind = if rng.gen_bool(0.5) {
        EnemyKind::Grunt
    } else {
        EnemyKind::Armored
    };
    let enemy = Enemy::new(random_x(rng, Enemy::W), kind);
    tracing::debug!(x = enemy.x, ?kind, "enemy spawned");
    Some(enemy)
}

/// Whether the item timer has run out.
pub fn item_due(last_item_ms: f64, now_ms: f64) -> bool {
    now_ms - last_item_ms >= ITEM_INTERVAL_MS
}

pub fn spawn_item(rng: &mut impl Rng) -> Item {
    let kind = if rng.gen_bool(0.5) {
        ItemKind::Health
    } else {
        ItemKind::MissileUpgrade
    };
    let item = Item::new(random_x(rng, Item::W), kind);
    tracing::debug!(x = item.x, ?kind, "item spawned");
    item
}
