//! Session lifecycle around a game: assets load, the intro plays, then the
//! game runs with the intro fading out over its first frames.

use std::collections::HashSet;

use rand::Rng;

use crate::compute::{new_game, tick};
use crate::entities::GameState;
use crate::error::SessionError;
use crate::input::FrameInput;
use crate::render::{DrawList, Sprite};

/// How much the intro overlay fades per frame once play starts.
pub const FADE_STEP: f32 = 0.02;

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    /// Waiting for every sprite to be registered by the host.
    Loading { loaded: HashSet<Sprite> },
    /// Assets are in; the intro is showing.
    Ready,
    Playing {
        game: GameState,
        /// Opacity of the intro overlay, 1.0 down to 0.0.
        fade: f32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    phase: Phase,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            phase: Phase::Loading {
                loaded: HashSet::new(),
            },
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Record one asset as loaded. The last one moves the session to `Ready`.
    pub fn asset_loaded(&mut self, sprite: Sprite) -> Result<(), SessionError> {
        let Phase::Loading { loaded } = &mut self.phase else {
            return Err(SessionError::AssetAlreadyLoaded(sprite));
        };
        if !loaded.insert(sprite) {
            return Err(SessionError::AssetAlreadyLoaded(sprite));
        }
        if loaded.len() == Sprite::ALL.len() {
            tracing::info!("all assets loaded, intro ready");
            self.phase = Phase::Ready;
        }
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// The intro ended: start the game at `now_ms`.
    pub fn intro_finished(&mut self, now_ms: f64) -> Result<(), SessionError> {
        match &self.phase {
            Phase::Loading { loaded } => Err(SessionError::NotReady {
                loaded: loaded.len(),
                total: Sprite::ALL.len(),
            }),
            Phase::Playing { .. } => Err(SessionError::AlreadyPlaying),
            Phase::Ready => {
                tracing::info!("game started");
                self.phase = Phase::Playing {
                    game: new_game(now_ms),
                    fade: 1.0,
                };
                Ok(())
            }
        }
    }

    pub fn game(&self) -> Option<&GameState> {
        match &self.phase {
            Phase::Playing { game, .. } => Some(game),
            _ => None,
        }
    }

    /// Intro overlay opacity; the game itself is drawn at `1.0 - fade()`.
    pub fn fade(&self) -> f32 {
        match &self.phase {
            Phase::Playing { fade, .. } => *fade,
            _ => 1.0,
        }
    }

    /// Run one frame of the game and advance the intro fade.
    pub fn frame(
        &mut self,
        input: &FrameInput,
        now_ms: f64,
        rng: &mut impl Rng,
    ) -> Result<DrawList, SessionError> {
        let Phase::Playing { game, fade } = &mut self.phase else {
            return Err(SessionError::NotPlaying);
        };
        let (next, draw) = tick(game, input, now_ms, rng);
        *game = next;
        *fade = (*fade - FADE_STEP).max(0.0);
        Ok(draw)
    }

    /// Replace a finished game with a fresh one. The intro does not replay.
    pub fn restart(&mut self, now_ms: f64) -> Result<(), SessionError> {
        let Phase::Playing { game, fade } = &mut self.phase else {
            return Err(SessionError::NotPlaying);
        };
        if !game.is_over() {
            return Err(SessionError::GameStillRunning);
        }
        tracing::info!(previous_score = game.score, "game restarted");
        *game = new_game(now_ms);
        *fade = 0.0;
        Ok(())
    }
}
