mod buffer;

pub use buffer::{CommandBuffer, FrameBuffers};

use egui::Color32;

use crate::geometry::Point;

/// Line cap style carried by the command stream.
///
/// The display-surface contract includes cap/join even though not every
/// backend can honor them (see `renderer`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

/// Line join style carried by the command stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

/// Current brush configuration, replayed as a prologue of style commands at
/// the head of every fresh pending buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushStyle {
    pub color: Color32,
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl Default for BrushStyle {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            width: 4.0,
            cap: LineCap::Round,
            join: LineJoin::Round,
        }
    }
}

/// A single drawing operation addressed to a canvas-like surface.
///
/// The surface speaks the usual 2D-context vocabulary: style setters, a path
/// built up with `BeginPath`/`MoveTo`/`QuadTo` and drawn with `Stroke`, and
/// filled rectangles for the background.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetStrokeStyle(Color32),
    SetFillStyle(Color32),
    SetLineWidth(f64),
    SetLineCap(LineCap),
    SetLineJoin(LineJoin),
    FillRect { min: Point, width: f64, height: f64 },
    BeginPath,
    MoveTo(Point),
    QuadTo { control: Point, to: Point },
    Stroke,
}
