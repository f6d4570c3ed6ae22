//! Interpreter that converts an expanded symbol string into line segments.
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with [`TurtleParams`],
//! register symbol-to-operation mappings via [`TurtleInterpreter::set_op`] or
//! [`TurtleInterpreter::populate_standard_symbols`], then call
//! [`TurtleInterpreter::interpret`]. The free function [`interpret`] does all of
//! that with the standard symbol table.

use crate::error::{Error, Result};
use crate::rules::{Symbol, SymbolString};
use crate::stack::{BranchStack, StackUnderflow};
use crate::turtle::{STANDARD_SYMBOLS, TurtleOp, TurtleState};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Geometry parameters for interpretation.
///
/// Every field is explicit; there are no hidden defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleParams {
    /// Distance covered by `F` and `G`. Must be finite and positive.
    pub branch_length: f64,
    /// Angle in radians applied by `+` and `-`.
    pub turn_angle: f64,
    /// Heading of the root turtle, in radians.
    pub initial_phase: f64,
    /// Position of the root turtle.
    pub initial_position: DVec2,
    /// Attach a frame index to every drawn segment.
    pub snapshot_per_step: bool,
}

impl TurtleParams {
    /// Parameters for a turtle at the origin facing +X, without snapshots.
    pub fn new(branch_length: f64, turn_angle: f64) -> Self {
        Self {
            branch_length,
            turn_angle,
            initial_phase: 0.0,
            initial_position: DVec2::ZERO,
            snapshot_per_step: false,
        }
    }

    /// Rejects parameters that cannot produce meaningful geometry.
    pub fn validate(&self) -> Result<()> {
        if !(self.branch_length.is_finite() && self.branch_length > 0.0) {
            return Err(Error::invalid(format!(
                "branch_length must be finite and positive, got {}",
                self.branch_length
            )));
        }
        if !self.turn_angle.is_finite() {
            return Err(Error::invalid("turn_angle must be finite"));
        }
        if !self.initial_phase.is_finite() {
            return Err(Error::invalid("initial_phase must be finite"));
        }
        if !self.initial_position.is_finite() {
            return Err(Error::invalid("initial_position must be finite"));
        }
        Ok(())
    }
}

/// One drawn line segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    /// Pen position before the step.
    pub from: DVec2,
    /// Pen position after the step.
    pub to: DVec2,
    /// Step index when snapshotting is enabled: 0 for the first segment,
    /// then increasing by one per segment.
    pub frame: Option<u64>,
}

/// The stack machine shared by every interpreter front end.
pub(crate) struct Walk<'a> {
    params: &'a TurtleParams,
    stack: BranchStack,
    commands: Vec<DrawCommand>,
    next_frame: u64,
    max_depth: usize,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(params: &'a TurtleParams) -> Self {
        let root = TurtleState::new(params.initial_phase, params.initial_position);
        Self {
            params,
            stack: BranchStack::new(root),
            commands: Vec::new(),
            next_frame: 0,
            max_depth: 0,
        }
    }

    /// Executes `op` for the symbol at `index`.
    ///
    /// `arg` overrides the configured length (for `Draw`/`Move`) or angle in
    /// radians (for `Turn`).
    pub(crate) fn step(&mut self, op: TurtleOp, arg: Option<f64>, index: usize) -> Result<()> {
        match op {
            TurtleOp::Draw => {
                let current = *self.stack.current();
                let next = current.forward(arg.unwrap_or(self.params.branch_length));
                let frame = self.params.snapshot_per_step.then(|| {
                    let frame = self.next_frame;
                    self.next_frame += 1;
                    frame
                });
                self.commands.push(DrawCommand {
                    from: current.position,
                    to: next.position,
                    frame,
                });
                *self.stack.current_mut() = next;
            }
            TurtleOp::Move => {
                let current = self.stack.current_mut();
                *current = current.forward(arg.unwrap_or(self.params.branch_length));
            }
            TurtleOp::Turn(sign) => {
                let current = self.stack.current_mut();
                *current = current.turn(arg.unwrap_or(self.params.turn_angle) * sign);
            }
            TurtleOp::Push => {
                self.stack.push_current();
                self.max_depth = self.max_depth.max(self.stack.depth());
            }
            TurtleOp::Pop => {
                if let Err(StackUnderflow) = self.stack.pop() {
                    tracing::warn!(index, "branch close without a matching open");
                    return Err(Error::StackUnderflow {
                        index,
                        emitted: std::mem::take(&mut self.commands),
                    });
                }
            }
            TurtleOp::Ignore => {}
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Vec<DrawCommand> {
        tracing::debug!(
            segments = self.commands.len(),
            max_depth = self.max_depth,
            unclosed = self.stack.depth(),
            "interpretation finished"
        );
        self.commands
    }
}

/// Interprets expanded symbol strings as 2D turtle drawings.
#[derive(Clone, Debug)]
pub struct TurtleInterpreter {
    op_map: HashMap<Symbol, TurtleOp>,
    params: TurtleParams,
}

impl TurtleInterpreter {
    /// Creates an interpreter with an empty symbol map.
    ///
    /// Register operations with [`set_op`](Self::set_op) or
    /// [`populate_standard_symbols`](Self::populate_standard_symbols) before
    /// calling [`interpret`](Self::interpret).
    pub fn new(params: TurtleParams) -> Self {
        Self {
            op_map: HashMap::new(),
            params,
        }
    }

    /// Creates an interpreter that already knows `F G + - [ ]`.
    pub fn standard(params: TurtleParams) -> Self {
        let mut interpreter = Self::new(params);
        interpreter.populate_standard_symbols();
        interpreter
    }

    /// Replaces the entire symbol map in one step (builder pattern).
    pub fn with_map(mut self, map: HashMap<Symbol, TurtleOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Assigns `op` to `symbol`, replacing any earlier mapping.
    pub fn set_op(&mut self, symbol: Symbol, op: TurtleOp) {
        self.op_map.insert(symbol, op);
    }

    /// Registers `F`, `G`, `+`, `-`, `[` and `]`.
    pub fn populate_standard_symbols(&mut self) {
        for (name, op) in STANDARD_SYMBOLS {
            if let Some(symbol) = name.chars().next() {
                self.set_op(symbol, op);
            }
        }
    }

    /// The geometry this interpreter was built with.
    pub fn params(&self) -> &TurtleParams {
        &self.params
    }

    /// Walks `symbols` left to right and returns the drawn segments in order.
    ///
    /// Symbols with no registered mapping are skipped. A `]` with nothing to
    /// close stops interpretation with [`Error::StackUnderflow`], which carries
    /// the segments drawn before it.
    pub fn interpret(&self, symbols: &SymbolString) -> Result<Vec<DrawCommand>> {
        self.params.validate()?;

        let mut walk = Walk::new(&self.params);
        for (index, symbol) in symbols.symbols().enumerate() {
            let op = self.op_map.get(&symbol).copied().unwrap_or(TurtleOp::Ignore);
            walk.step(op, None, index)?;
        }
        Ok(walk.finish())
    }
}

/// Interprets `symbols` with the standard symbol table.
pub fn interpret(symbols: &SymbolString, params: &TurtleParams) -> Result<Vec<DrawCommand>> {
    TurtleInterpreter::standard(params.clone()).interpret(symbols)
}
