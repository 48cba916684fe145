//! Axis-aligned bounding-box collision.

/// A rectangle in play-area units, anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }
}

/// Anything that occupies a rectangle in the play area.
pub trait Bounds {
    fn bounds(&self) -> Rect;
}

impl Bounds for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// True iff the two rectangles intersect. Shared edges do not count.
pub fn overlaps<A: Bounds + ?Sized, B: Bounds + ?Sized>(a: &A, b: &B) -> bool {
    let a = a.bounds();
    let b = b.bounds();
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}
