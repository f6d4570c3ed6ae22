//! Turtle state and operations for 2D branch interpretation.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Maps any finite angle into the canonical range `(-PI, PI]`.
///
/// This is a full modulo reduction, so arbitrarily many accumulated turns
/// still land in range.
pub fn normalize_phase(phase: f64) -> f64 {
    let reduced = (phase + PI).rem_euclid(TAU);
    if reduced == 0.0 { PI } else { reduced - PI }
}

/// The state of the drawing turtle.
///
/// Tracks heading and absolute position. Both transitions are pure: they
/// return a new state and leave `self` untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Heading in radians, measured from the +X axis towards +Y.
    pub phase: f64,

    /// Absolute position of the pen.
    pub position: DVec2,
}

impl TurtleState {
    /// A turtle at `position` facing `phase`, taken as given.
    pub fn new(phase: f64, position: DVec2) -> Self {
        Self { phase, position }
    }

    /// Unit vector pointing along the current heading.
    pub fn heading(&self) -> DVec2 {
        DVec2::new(self.phase.cos(), self.phase.sin())
    }

    /// Moves `distance` along the heading. The phase is unchanged.
    ///
    /// No sign constraint is imposed; a negative distance walks backwards.
    pub fn forward(&self, distance: f64) -> Self {
        Self {
            phase: self.phase,
            position: self.position + self.heading() * distance,
        }
    }

    /// Rotates by `delta` radians. The result is normalized into `(-PI, PI]`.
    pub fn turn(&self, delta: f64) -> Self {
        Self {
            phase: normalize_phase(self.phase + delta),
            position: self.position,
        }
    }
}

/// Operations a symbol can map to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TurtleOp {
    /// Move forward and emit a line segment (`F`).
    Draw,
    /// Move forward without drawing (`G`).
    Move,
    /// Turn by the configured angle times the sign (`+` is `1.0`, `-` is `-1.0`).
    Turn(f64),
    /// Save the current state (`[`).
    Push,
    /// Restore the most recently saved state (`]`).
    Pop,
    /// No-op. Production placeholders such as `X` land here.
    Ignore,
}

/// The conventional symbol table shared by both interpreters.
pub const STANDARD_SYMBOLS: [(&str, TurtleOp); 6] = [
    ("F", TurtleOp::Draw),
    ("G", TurtleOp::Move),
    ("+", TurtleOp::Turn(1.0)),
    ("-", TurtleOp::Turn(-1.0)),
    ("[", TurtleOp::Push),
    ("]", TurtleOp::Pop),
];
