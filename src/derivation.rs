//! Turtle interpretation of parametric [`symbios::SymbiosState`] derivations.
//!
//! Symbios produces interned, parametric modules instead of plain characters.
//! [`DerivationInterpreter`] maps symbol IDs to [`TurtleOp`]s and drives the
//! same stack machine as [`TurtleInterpreter`](crate::TurtleInterpreter).
//!
//! The first module parameter, when present, overrides the configured value:
//! `F(len)` and `G(len)` set the step length, `+(deg)` and `-(deg)` the turn
//! angle in degrees. Any further parameters are ignored.

use crate::error::Result;
use crate::interpreter::{DrawCommand, TurtleParams, Walk};
use crate::turtle::{STANDARD_SYMBOLS, TurtleOp};
use symbios::{SymbiosState, SymbolTable};

/// Interprets Symbios derivations as 2D turtle drawings.
pub struct DerivationInterpreter {
    op_map: Vec<TurtleOp>,
    params: TurtleParams,
}

impl DerivationInterpreter {
    /// Creates a new interpreter with the given parameters and an empty symbol map.
    pub fn new(params: TurtleParams) -> Self {
        Self {
            op_map: Vec::new(),
            params,
        }
    }

    /// Replaces the entire symbol-to-operation map in one step (builder pattern).
    ///
    /// `map` is indexed by symbol ID as returned by [`symbios::SymbolTable`].
    /// Any ID that falls outside the slice is treated as [`TurtleOp::Ignore`].
    pub fn with_map(mut self, map: Vec<TurtleOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Assigns a single [`TurtleOp`] to a symbol ID.
    ///
    /// The map grows automatically; gaps are filled with [`TurtleOp::Ignore`].
    pub fn set_op(&mut self, sym_id: u16, op: TurtleOp) {
        let idx = sym_id as usize;
        if idx >= self.op_map.len() {
            self.op_map.resize(idx + 1, TurtleOp::Ignore);
        }
        self.op_map[idx] = op;
    }

    /// Registers `F G + - [ ]` for every one of them present in `interner`.
    pub fn populate_standard_symbols(&mut self, interner: &SymbolTable) {
        for (sym, op) in STANDARD_SYMBOLS {
            if let Some(id) = interner.resolve_id(sym) {
                self.set_op(id, op);
            }
        }
    }

    /// Walks every module of `state` in order and returns the drawn segments.
    pub fn interpret(&self, state: &SymbiosState) -> Result<Vec<DrawCommand>> {
        self.params.validate()?;

        let mut walk = Walk::new(&self.params);
        for i in 0..state.len() {
            let view = match state.get_view(i) {
                Some(v) => v,
                None => break,
            };

            let op = self
                .op_map
                .get(view.sym as usize)
                .copied()
                .unwrap_or(TurtleOp::Ignore);

            let arg = view.params.first().map(|&x| x as f64);
            let arg = match op {
                TurtleOp::Turn(_) => arg.map(f64::to_radians),
                _ => arg,
            };
            walk.step(op, arg, i)?;
        }
        Ok(walk.finish())
    }
}
