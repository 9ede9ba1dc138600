//! Grid placement of garden flowers on a normalized canvas.
//!
//! Flower `i` of `n` lands in a near-square grid cell: `ceil(sqrt(n))`
//! columns, rows filling the lower part of the canvas from y = 0.45 down to
//! 0.90. A small random jitter breaks up the grid and the result is clamped
//! to the visible region.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const X_MIN: f64 = 0.05;
pub const X_MAX: f64 = 0.95;
pub const Y_MIN: f64 = 0.40;
pub const Y_MAX: f64 = 0.90;

const TOP: f64 = 0.45;
const ROW_SPAN: f64 = 0.45;

/// Position of an empty garden's placeholder.
pub const EMPTY_POSITION: Position = Position { x: 0.5, y: 0.7 };

/// Normalized canvas position, each axis in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Maximum jitter applied to each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jitter {
    pub x: f64,
    pub y: f64,
}

impl Jitter {
    pub const NONE: Jitter = Jitter { x: 0.0, y: 0.0 };
}

impl Default for Jitter {
    fn default() -> Self {
        Self { x: 0.04, y: 0.03 }
    }
}

/// Number of grid columns for `total` flowers.
pub fn columns(total: usize) -> usize {
    ((total as f64).sqrt().ceil() as usize).max(1)
}

/// Un-jittered grid position of flower `index` out of `total`.
pub fn base_position(index: usize, total: usize) -> Position {
    if total == 0 {
        return EMPTY_POSITION;
    }
    let columns = columns(total);
    let col = index % columns;
    let row = index / columns;
    let total_rows = total.div_ceil(columns).max(1);
    Position {
        x: (col as f64 + 0.5) / columns as f64,
        y: TOP + (row as f64 / total_rows as f64) * ROW_SPAN,
    }
}

/// Grid position with jitter, clamped to the visible region.
pub fn layout_position<R: Rng + ?Sized>(
    index: usize,
    total: usize,
    jitter: Jitter,
    rng: &mut R,
) -> Position {
    let base = base_position(index, total);
    // The canvas is one unit wide; `min` also maps NaN to that cap.
    let jx = jitter.x.abs().min(1.0);
    let jy = jitter.y.abs().min(1.0);
    let dx = if jx > 0.0 { rng.gen_range(-jx..=jx) } else { 0.0 };
    let dy = if jy > 0.0 { rng.gen_range(-jy..=jy) } else { 0.0 };
    Position {
        x: (base.x + dx).clamp(X_MIN, X_MAX),
        y: (base.y + dy).clamp(Y_MIN, Y_MAX),
    }
}
