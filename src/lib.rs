//! # symbios-meristem
//!
//! Plant-like fractal growth for L-Systems.
//!
//! A [`RuleSet`] rewrites an axiom for a number of generations ([`expand`]),
//! then a 2D turtle ([`TurtleInterpreter`]) walks the expanded string and
//! emits an ordered list of [`DrawCommand`] line segments. `[` and `]` save and
//! restore the turtle on a [`BranchStack`], which is what makes the drawing
//! branch.
//!
//! The geometry is engine-agnostic. [`SvgSink`] draws it to SVG, one image per
//! step if requested, and [`grow`] runs the whole pipeline from a
//! [`GrowthConfig`]. Parametric derivations from
//! [Symbios](https://crates.io/crates/symbios) can be drawn directly with
//! [`DerivationInterpreter`].
//!
//! ```
//! use symbios_meristem::{RuleSet, SymbolString, TurtleParams, expand, interpret};
//!
//! let rules = RuleSet::from_rules([('F', "F+F-F-F+F")]).unwrap();
//! let symbols = expand(&SymbolString::from("F"), &rules, 2);
//! let segments = interpret(&symbols, &TurtleParams::new(1.0, std::f64::consts::FRAC_PI_2)).unwrap();
//! assert_eq!(segments.len(), 25);
//! ```

pub mod config;
pub mod derivation;
pub mod error;
pub mod interpreter;
pub mod rules;
pub mod sink;
pub mod stack;
pub mod turtle;

pub use config::*;
pub use derivation::*;
pub use error::*;
pub use interpreter::*;
pub use rules::*;
pub use sink::*;
pub use stack::*;
pub use turtle::*;
