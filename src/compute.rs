//! Game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`. Side effects are limited to the injected RNG.

use rand::Rng;

use crate::collision::overlaps;
use crate::constants::{
    ENEMY_BASE_SPEED, ENEMY_CONTACT_DAMAGE, ENEMY_SPEED_RAMP, HEALTH_ITEM_RESTORE,
    MAX_ENERGY, MAX_MISSILE_TIER, PLAYER_BOTTOM_MARGIN, PLAYER_SPEED, PLAY_HEIGHT, PLAY_WIDTH,
    VOLLEY_SPREAD_DEG,
};
use crate::entities::{Enemy, GameState, GameStatus, ItemKind, Missile, Player};
use crate::input::FrameInput;
use crate::render::{DrawCommand, DrawList};
use crate::spawner::{item_due, roll_enemy, spawn_item};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session whose clocks all start at `now_ms`.
pub fn new_game(now_ms: f64) -> GameState {
    GameState {
        player: Player {
            x: PLAY_WIDTH / 2.0 - Player::W / 2.0,
            y: PLAY_HEIGHT - Player::H - PLAYER_BOTTOM_MARGIN,
        },
        enemies: Vec::new(),
        missiles: Vec::new(),
        items: Vec::new(),
        energy: MAX_ENERGY,
        score: 0,
        status: GameStatus::Running,
        missile_tier: 0,
        start_ms: now_ms,
        last_shot_ms: now_ms,
        last_item_ms: now_ms,
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Move the player one frame's worth. Keys step first, then an active drag
/// overrides x. Both axes stay inside the play area.
pub fn step_player(player: &Player, input: &FrameInput) -> Player {
    let keys = input.keys;
    let mut x = player.x;
    let mut y = player.y;

    if keys.left {
        x -= PLAYER_SPEED;
    }
    if keys.right {
        x += PLAYER_SPEED;
    }
    if keys.up {
        y -= PLAYER_SPEED;
    }
    if keys.down {
        y += PLAYER_SPEED;
    }
    if let Some(drag) = input.drag {
        x = drag.target_x();
    }

    Player {
        x: x.clamp(0.0, PLAY_WIDTH - Player::W),
        y: y.clamp(0.0, PLAY_HEIGHT - Player::H),
    }
}

pub fn apply_input(state: &GameState, input: &FrameInput) -> GameState {
    GameState {
        player: step_player(&state.player, input),
        ..state.clone()
    }
}

// ── Firing ───────────────────────────────────────────────────────────────────

/// Missiles launched together from the player's nose, fanned out 15° apart
/// around straight up.
pub fn fire_volley(player: &Player, count: usize) -> Vec<Missile> {
    let sx = player.x + Player::W / 2.0 - Missile::W / 2.0;
    let sy = player.y;
    let mid = (count as f32 - 1.0) / 2.0;
    (0..count)
        .map(|i| Missile::new(sx, sy, (i as f32 - mid) * VOLLEY_SPREAD_DEG))
        .collect()
}

// ── Difficulty ───────────────────────────────────────────────────────────────

/// Enemy fall speed after `elapsed_secs` of play.
pub fn enemy_speed(elapsed_secs: f64) -> f32 {
    ENEMY_BASE_SPEED + elapsed_secs as f32 * ENEMY_SPEED_RAMP
}

// ── Pickups ──────────────────────────────────────────────────────────────────

fn apply_pickup(state: &mut GameState, kind: ItemKind) {
    match kind {
        ItemKind::Health => {
            state.energy = (state.energy + HEALTH_ITEM_RESTORE).min(MAX_ENERGY);
        }
        ItemKind::MissileUpgrade => {
            let tier = (state.missile_tier + 1).min(MAX_MISSILE_TIER);
            if tier != state.missile_tier {
                state.missile_tier = tier;
                tracing::info!(
                    tier,
                    interval_ms = state.shot_interval_ms(),
                    missiles = state.missile_count(),
                    "missile upgrade"
                );
            }
        }
    }
}

/// Effect of the player touching an item of `kind`.
pub fn collect_item(state: &GameState, kind: ItemKind) -> GameState {
    let mut next = state.clone();
    apply_pickup(&mut next, kind);
    next
}

// ── Per-frame tick (nearly pure, the RNG is injected) ───────────────────────

/// Advance the session by one frame at timestamp `now_ms`.
///
/// Returns the next state together with the frame's draw commands. A game
/// that is already over comes back unchanged with nothing to draw.
pub fn tick(
    state: &GameState,
    input: &FrameInput,
    now_ms: f64,
    rng: &mut impl Rng,
) -> (GameState, DrawList) {
    let mut draw = DrawList::default();
    if state.is_over() {
        return (state.clone(), draw);
    }
    let mut next = state.clone();

    // ── 1. Background and HUD ────────────────────────────────────────────────
    draw.push(DrawCommand::Background);
    draw.push(DrawCommand::status(&next));

    // ── 2. Auto-fire ─────────────────────────────────────────────────────────
    if now_ms - next.last_shot_ms >= next.shot_interval_ms() {
        let volley = fire_volley(&next.player, next.missile_count());
        tracing::debug!(count = volley.len(), "volley fired");
        next.missiles.extend(volley);
        next.last_shot_ms = now_ms;
    }

    // ── 3. Player ────────────────────────────────────────────────────────────
    next.player = step_player(&next.player, input);
    draw.push(DrawCommand::player(&next.player));

    // ── 4. Enemy spawn ───────────────────────────────────────────────────────
    if let Some(enemy) = roll_enemy(rng) {
        next.enemies.push(enemy);
    }

    // ── 5. Item spawn ────────────────────────────────────────────────────────
    if item_due(next.last_item_ms, now_ms) {
        next.items.push(spawn_item(rng));
        next.last_item_ms = now_ms;
    }

    // ── 6. Enemies ───────────────────────────────────────────────────────────
    if resolve_enemies(&mut next, now_ms, &mut draw) {
        return finish(next, draw);
    }

    // ── 7. Items ─────────────────────────────────────────────────────────────
    let items = std::mem::take(&mut next.items);
    for item in items {
        let item = item.advanced();
        draw.push(DrawCommand::item(&item));
        if item.is_off_screen() {
            continue;
        }
        if overlaps(&next.player, &item) {
            apply_pickup(&mut next, item.kind);
            continue;
        }
        next.items.push(item);
    }

    // ── 8. Missiles ──────────────────────────────────────────────────────────
    next.missiles = next
        .missiles
        .iter()
        .map(Missile::advanced)
        .inspect(|m| draw.push(DrawCommand::missile(m)))
        .filter(|m| !m.is_off_screen())
        .collect();

    (next, draw)
}

/// Move, draw and collide every enemy, newest first. An enemy already
/// overlapped by several missiles consumes only the newest of them.
///
/// Returns true when a collision drained the player's energy; enemies not yet
/// reached at that point are kept exactly as they were.
fn resolve_enemies(state: &mut GameState, now_ms: f64, draw: &mut DrawList) -> bool {
    let speed = enemy_speed(state.elapsed_secs(now_ms));
    let enemies = std::mem::take(&mut state.enemies);
    let mut survivors: Vec<Enemy> = Vec::with_capacity(enemies.len());
    let mut pending = enemies.into_iter().rev();
    let mut drained = false;

    while let Some(enemy) = pending.next() {
        let mut enemy = enemy.advanced(speed);
        draw.push(DrawCommand::enemy(&enemy));

        if enemy.is_off_screen() {
            continue;
        }

        if overlaps(&state.player, &enemy) {
            state.energy = state.energy.saturating_sub(ENEMY_CONTACT_DAMAGE);
            if state.energy == 0 {
                survivors.extend(pending.by_ref());
                drained = true;
                break;
            }
            continue;
        }

        if let Some(j) = state.missiles.iter().rposition(|m| overlaps(m, &enemy)) {
            state.missiles.remove(j);
            enemy.health = enemy.health.saturating_sub(1);
            if enemy.health == 0 {
                state.score += 1;
                continue;
            }
        }

        survivors.push(enemy);
    }

    survivors.reverse();
    state.enemies = survivors;
    drained
}

// ── 9. Game over ─────────────────────────────────────────────────────────────

fn finish(mut state: GameState, mut draw: DrawList) -> (GameState, DrawList) {
    state.status = GameStatus::GameOver;
    tracing::info!(score = state.score, "game over");
    draw.push(DrawCommand::GameOverText { score: state.score });
    (state, draw)
}
