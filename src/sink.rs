//! Destinations for drawn segments.
//!
//! The interpreter only produces [`DrawCommand`]s. A [`DrawSink`] turns them
//! into something visible; [`SvgSink`] writes SVG documents, either one final
//! image or one image per drawn segment.

use crate::error::{Error, Result};
use crate::interpreter::DrawCommand;
use glam::DVec2;
use std::path::{Path, PathBuf};
use svg::Document;
use svg::node::element::{Path as SvgPath, Rectangle, path::Data};

/// Receives segments in emission order.
pub trait DrawSink {
    /// Accepts the next segment. When `command.frame` is set, the sink may
    /// persist the drawing as it stands after this segment.
    fn draw(&mut self, command: &DrawCommand) -> Result<()>;

    /// Called once after the last segment.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl DrawSink for Vec<DrawCommand> {
    fn draw(&mut self, command: &DrawCommand) -> Result<()> {
        self.push(*command);
        Ok(())
    }
}

/// Feeds every command to `sink`, then finishes it.
pub fn replay<S: DrawSink + ?Sized>(commands: &[DrawCommand], sink: &mut S) -> Result<()> {
    for command in commands {
        sink.draw(command)?;
    }
    sink.finish()
}

/// Axis-aligned bounds of a set of segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Smallest x and y over all endpoints.
    pub min: DVec2,
    /// Largest x and y over all endpoints.
    pub max: DVec2,
}

impl Bounds {
    /// Returns `None` for an empty command list.
    pub fn of(commands: &[DrawCommand]) -> Option<Self> {
        let first = commands.first()?;
        let init = Self {
            min: first.from.min(first.to),
            max: first.from.max(first.to),
        };
        Some(commands.iter().fold(init, |b, c| Self {
            min: b.min.min(c.from).min(c.to),
            max: b.max.max(c.from).max(c.to),
        }))
    }

    /// Width and height; zero along a degenerate axis.
    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    /// Grows the bounds by `margin` on every side.
    pub fn inflate(&self, margin: f64) -> Self {
        Self {
            min: self.min - DVec2::splat(margin),
            max: self.max + DVec2::splat(margin),
        }
    }
}

/// Stroke settings handed through to the SVG output.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Any SVG color, e.g. `"#cd853f"` or `"black"`.
    pub color: String,
    /// Line width in canvas units.
    pub width: f64,
    /// Fill behind the drawing; transparent when `None`.
    pub background: Option<String>,
}

/// Where an [`SvgSink`] writes.
#[derive(Clone, Debug, PartialEq)]
pub enum Destination {
    /// A single image written on [`DrawSink::finish`].
    File(PathBuf),
    /// One `NNNNNN.svg` per snapshotted segment plus `final.svg`.
    Frames(PathBuf),
}

/// The visible region of the document, in canvas units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
    /// Top-left corner.
    pub origin: DVec2,
    /// Width and height.
    pub size: DVec2,
}

impl ViewBox {
    /// A square canvas of `size` pixels with its origin in the top-left corner.
    pub fn canvas(size: u32) -> Self {
        Self {
            origin: DVec2::ZERO,
            size: DVec2::splat(size as f64),
        }
    }

    /// Fits `bounds` plus a 2% margin; degenerate extents get a unit size.
    pub fn fit(bounds: Bounds) -> Self {
        let margin = bounds.size().max_element() * 0.02;
        let padded = bounds.inflate(margin);
        Self {
            origin: padded.min,
            size: padded.size().max(DVec2::ONE),
        }
    }
}

/// Writes drawings as SVG documents.
pub struct SvgSink {
    canvas_size: u32,
    view: ViewBox,
    style: StrokeStyle,
    destination: Destination,
    segments: Vec<DrawCommand>,
    files_written: usize,
}

impl SvgSink {
    /// A sink rendering `view` onto a `canvas_size` pixel square.
    pub fn new(
        canvas_size: u32,
        view: ViewBox,
        style: StrokeStyle,
        destination: Destination,
    ) -> Self {
        Self {
            canvas_size,
            view,
            style,
            destination,
            segments: Vec::new(),
            files_written: 0,
        }
    }

    /// Number of SVG files written so far.
    pub fn files_written(&self) -> usize {
        self.files_written
    }

    /// Builds the document for everything drawn so far.
    pub fn document(&self) -> Document {
        let data = self.segments.iter().fold(Data::new(), |data, c| {
            data.move_to((c.from.x, c.from.y)).line_to((c.to.x, c.to.y))
        });
        let path = SvgPath::new()
            .set("fill", "none")
            .set("stroke", self.style.color.as_str())
            .set("stroke-width", self.style.width)
            .set("stroke-linecap", "round")
            .set("d", data);

        let mut document = Document::new()
            .set(
                "viewBox",
                (
                    self.view.origin.x,
                    self.view.origin.y,
                    self.view.size.x,
                    self.view.size.y,
                ),
            )
            .set("width", self.canvas_size as f64)
            .set("height", self.canvas_size as f64);
        if let Some(background) = &self.style.background {
            document = document.add(
                Rectangle::new()
                    .set("x", self.view.origin.x)
                    .set("y", self.view.origin.y)
                    .set("width", self.view.size.x)
                    .set("height", self.view.size.y)
                    .set("fill", background.as_str()),
            );
        }
        document.add(path)
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        let io_err = |source| Error::Io {
            path: path.to_owned(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        svg::save(path, &self.document()).map_err(io_err)?;
        self.files_written += 1;
        Ok(())
    }
}

impl DrawSink for SvgSink {
    fn draw(&mut self, command: &DrawCommand) -> Result<()> {
        self.segments.push(*command);
        if let (Destination::Frames(dir), Some(frame)) = (&self.destination, command.frame) {
            let path = dir.join(format!("{frame:06}.svg"));
            self.save(&path)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let path = match &self.destination {
            Destination::File(path) => path.clone(),
            Destination::Frames(dir) => dir.join("final.svg"),
        };
        self.save(&path)?;
        tracing::info!(
            segments = self.segments.len(),
            files = self.files_written,
            path = %path.display(),
            "saved drawing"
        );
        Ok(())
    }
}
