//! Input signals handed to the frame function by whatever listens for keys and
//! pointer events.

/// Directions currently held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// A pointer drag in progress. Only the x axis is used.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drag {
    /// Pointer x when the drag began.
    pub pointer_start_x: f32,
    /// Player x when the drag began.
    pub player_start_x: f32,
    pub pointer_x: f32,
}

impl Drag {
    pub fn begin(pointer_x: f32, player_x: f32) -> Self {
        Drag {
            pointer_start_x: pointer_x,
            player_start_x: player_x,
            pointer_x,
        }
    }

    pub fn moved_to(self, pointer_x: f32) -> Self {
        Drag { pointer_x, ..self }
    }

    /// Where the player should be, before clamping.
    pub fn target_x(&self) -> f32 {
        self.player_start_x + (self.pointer_x - self.pointer_start_x)
    }
}

/// Everything the player asked for during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub keys: HeldKeys,
    pub drag: Option<Drag>,
}
