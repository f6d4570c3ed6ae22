//! Growth configuration, built-in presets and the end-to-end pipeline.
//!
//! A [`GrowthConfig`] names everything a run needs: the grammar, how many
//! generations to expand, turtle geometry, and how to draw the result.
//! Units are explicit: angles in radians, lengths and positions in canvas
//! units (the SVG user space, where `y` grows downward), canvas size in pixels.

use crate::error::{Error, Result};
use crate::interpreter::{TurtleInterpreter, TurtleParams};
use crate::rules::{Rewrite, RuleSet, SymbolString, expand};
use crate::sink::{Bounds, Destination, StrokeStyle, SvgSink, ViewBox, replay};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, TAU};
use std::path::{Path, PathBuf};

/// An axiom together with the rules that rewrite it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grammar {
    /// The generation-0 string.
    pub axiom: SymbolString,
    /// Rules applied on every generation.
    pub rules: RuleSet,
}

impl Grammar {
    /// Pairs `axiom` with `rules`.
    pub fn new(axiom: impl Into<SymbolString>, rules: RuleSet) -> Self {
        Self {
            axiom: axiom.into(),
            rules,
        }
    }

    /// Expands the axiom `generations` times.
    pub fn expand(&self, generations: u32) -> SymbolString {
        expand(&self.axiom, &self.rules, generations)
    }
}

impl Rewrite for Grammar {
    fn apply(&self, symbols: &SymbolString) -> SymbolString {
        self.rules.apply(symbols)
    }
}

/// Built-in grammars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Branching plant: `X -> F-[[X]+X]+F[+FX]-X`, `F -> FF`.
    Plant,
    /// Quadratic Koch curve: `F -> F+F-F-F+F`.
    Koch,
    /// Sierpinski arrowhead: `X -> YF+XF+Y`, `Y -> XF-YF-X`.
    Sierpinski,
    /// Heighway dragon: `X -> X+YF+`, `Y -> -FX-Y`.
    Dragon,
}

impl Preset {
    /// The axiom and rules of this preset.
    pub fn grammar(self) -> Grammar {
        let (axiom, rules): (&str, &[(char, &str)]) = match self {
            Self::Plant => ("X", &[('X', "F-[[X]+X]+F[+FX]-X"), ('F', "FF")]),
            Self::Koch => ("F", &[('F', "F+F-F-F+F")]),
            Self::Sierpinski => ("XF", &[('X', "YF+XF+Y"), ('Y', "XF-YF-X")]),
            Self::Dragon => ("FX", &[('X', "X+YF+"), ('Y', "-FX-Y")]),
        };
        Grammar::new(axiom, RuleSet::builtin(rules))
    }
}

/// Everything one growth run needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrowthConfig {
    /// What to grow.
    pub grammar: Grammar,
    /// Number of rewrite passes.
    pub generations: u32,
    /// Step length of `F`/`G`, in canvas units.
    pub branch_length: f64,
    /// Stroke width, in canvas units.
    pub branch_width: f64,
    /// Angle of `+`/`-`, in radians.
    pub turn_angle: f64,
    /// Heading of the root turtle, in radians. `-PI/2` points up the canvas.
    pub initial_phase: f64,
    /// Root position, in canvas units.
    pub initial_position: DVec2,
    /// Width and height of the output image, in pixels.
    pub canvas_size: u32,
    /// SVG stroke color.
    pub stroke: String,
    /// SVG background fill; transparent when absent.
    #[serde(default)]
    pub background: Option<String>,
    /// Fit the view box to the drawing instead of the fixed canvas.
    #[serde(default)]
    pub fit_to_content: bool,
    /// Output file, or output directory when `snapshot_per_step` is set.
    pub output: PathBuf,
    /// Write one image per drawn segment.
    #[serde(default)]
    pub snapshot_per_step: bool,
    /// Refuse to expand beyond this many symbols.
    #[serde(default = "default_max_symbols")]
    pub max_symbols: usize,
}

fn default_max_symbols() -> usize {
    10_000_000
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Plant)
    }
}

impl GrowthConfig {
    /// The configuration a preset is meant to be drawn with.
    pub fn from_preset(preset: Preset) -> Self {
        let base = Self {
            grammar: preset.grammar(),
            generations: 4,
            branch_length: 15.0,
            branch_width: 1.0,
            turn_angle: TAU * 25.0 / 365.0,
            initial_phase: -FRAC_PI_2,
            initial_position: DVec2::new(250.0, 500.0),
            canvas_size: 500,
            stroke: "#cd853f".to_owned(),
            background: None,
            fit_to_content: false,
            output: PathBuf::from("img"),
            snapshot_per_step: false,
            max_symbols: default_max_symbols(),
        };
        match preset {
            Preset::Plant => Self {
                output: PathBuf::from("plant.svg"),
                ..base
            },
            Preset::Koch => Self {
                generations: 3,
                branch_length: 4.0,
                turn_angle: FRAC_PI_2,
                initial_phase: 0.0,
                initial_position: DVec2::new(20.0, 400.0),
                stroke: "black".to_owned(),
                fit_to_content: true,
                output: PathBuf::from("koch.svg"),
                ..base
            },
            Preset::Sierpinski => Self {
                generations: 6,
                branch_length: 6.0,
                turn_angle: FRAC_PI_3,
                initial_phase: 0.0,
                initial_position: DVec2::new(20.0, 480.0),
                stroke: "black".to_owned(),
                fit_to_content: true,
                output: PathBuf::from("sierpinski.svg"),
                ..base
            },
            Preset::Dragon => Self {
                generations: 10,
                branch_length: 6.0,
                turn_angle: FRAC_PI_2,
                initial_phase: 0.0,
                initial_position: DVec2::new(250.0, 250.0),
                stroke: "black".to_owned(),
                fit_to_content: true,
                output: PathBuf::from("dragon.svg"),
                ..base
            },
        }
    }

    /// Reads a JSON configuration file and validates it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks everything that can be checked before expansion starts.
    pub fn validate(&self) -> Result<()> {
        self.turtle_params().validate()?;
        if !(self.branch_width.is_finite() && self.branch_width > 0.0) {
            return Err(Error::invalid(format!(
                "branch_width must be finite and positive, got {}",
                self.branch_width
            )));
        }
        if self.canvas_size == 0 {
            return Err(Error::invalid("canvas_size must be at least 1 pixel"));
        }
        Ok(())
    }

    /// The geometry subset handed to the interpreter.
    pub fn turtle_params(&self) -> TurtleParams {
        TurtleParams {
            branch_length: self.branch_length,
            turn_angle: self.turn_angle,
            initial_phase: self.initial_phase,
            initial_position: self.initial_position,
            snapshot_per_step: self.snapshot_per_step,
        }
    }

    /// The stroke subset handed to the SVG output.
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.stroke.clone(),
            width: self.branch_width,
            background: self.background.clone(),
        }
    }

    /// A single file, or a frame directory when snapshotting.
    pub fn destination(&self) -> Destination {
        if self.snapshot_per_step {
            Destination::Frames(self.output.clone())
        } else {
            Destination::File(self.output.clone())
        }
    }
}

/// What a [`grow`] run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrowthReport {
    /// Length of the expanded symbol string.
    pub symbols: usize,
    /// Number of line segments drawn.
    pub segments: usize,
    /// Number of SVG files written.
    pub files_written: usize,
}

/// Expands, interprets and draws `config` in one go.
pub fn grow(config: &GrowthConfig) -> Result<GrowthReport> {
    config.validate()?;

    let grammar = &config.grammar;
    let predicted = grammar
        .rules
        .expanded_len(&grammar.axiom, config.generations);
    match predicted {
        Some(n) if n <= config.max_symbols => {}
        _ => {
            return Err(Error::ExpansionTooLarge {
                predicted,
                limit: config.max_symbols,
            });
        }
    }

    let symbols = grammar.expand(config.generations);
    tracing::info!(
        generations = config.generations,
        symbols = symbols.len(),
        "expanded grammar"
    );

    let commands = TurtleInterpreter::standard(config.turtle_params()).interpret(&symbols)?;

    let view = match Bounds::of(&commands) {
        Some(bounds) if config.fit_to_content => ViewBox::fit(bounds),
        _ => ViewBox::canvas(config.canvas_size),
    };
    let mut sink = SvgSink::new(
        config.canvas_size,
        view,
        config.stroke_style(),
        config.destination(),
    );
    replay(&commands, &mut sink)?;

    Ok(GrowthReport {
        symbols: symbols.len(),
        segments: commands.len(),
        files_written: sink.files_written(),
    })
}
