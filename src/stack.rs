//! The branch stack behind `[` and `]`.

use crate::turtle::TurtleState;

/// Returned when a pop would remove the root turtle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("branch stack underflow: the root turtle cannot be popped")]
pub struct StackUnderflow;

/// A LIFO of turtle snapshots that always holds the root.
///
/// The active state is the last element. It is looked up on every access, so
/// growing the stack never invalidates anything held by the caller.
#[derive(Clone, Debug)]
pub struct BranchStack {
    states: Vec<TurtleState>,
}

impl BranchStack {
    /// Creates a stack holding only `root`.
    pub fn new(root: TurtleState) -> Self {
        Self { states: vec![root] }
    }

    /// The active turtle.
    pub fn current(&self) -> &TurtleState {
        // `states` is never empty: `pop` refuses to remove the root.
        &self.states[self.states.len() - 1]
    }

    /// The active turtle, for in-place updates.
    pub fn current_mut(&mut self) -> &mut TurtleState {
        let top = self.states.len() - 1;
        &mut self.states[top]
    }

    /// Pushes a copy of `state`, which becomes the active turtle.
    pub fn push(&mut self, state: TurtleState) {
        self.states.push(state);
    }

    /// Opens a branch from the active turtle.
    pub fn push_current(&mut self) {
        let state = *self.current();
        self.push(state);
    }

    /// Closes the innermost branch and returns the restored active state.
    pub fn pop(&mut self) -> Result<TurtleState, StackUnderflow> {
        if self.states.len() == 1 {
            return Err(StackUnderflow);
        }
        self.states.pop();
        Ok(*self.current())
    }

    /// Number of open branches (0 when only the root is present).
    pub fn depth(&self) -> usize {
        self.states.len() - 1
    }
}
