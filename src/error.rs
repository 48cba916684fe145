use thiserror::Error;

use crate::render::Sprite;

/// Illegal moves through the `Loading → Ready → Playing` lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("asset {0:?} was already loaded")]
    AssetAlreadyLoaded(Sprite),
    #[error("intro finished before all assets loaded ({loaded}/{total})")]
    NotReady { loaded: usize, total: usize },
    #[error("session is already playing")]
    AlreadyPlaying,
    #[error("session is not playing yet")]
    NotPlaying,
    #[error("the current game is still running")]
    GameStillRunning,
}
