use egui::Color32;

use super::{BrushStyle, DrawCommand};
use crate::geometry::Point;

/// An ordered, append-only sequence of draw commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh buffer opening with the style prologue for `style`.
    pub fn with_style(style: &BrushStyle) -> Self {
        let mut buf = Self::new();
        buf.push_style(style);
        buf
    }

    /// A buffer that repaints the whole canvas white and then restores the
    /// brush style. Used on init, clear, and section-count changes.
    pub fn background(size: (f64, f64), style: &BrushStyle) -> Self {
        let mut buf = Self::new();
        buf.push(DrawCommand::SetFillStyle(Color32::WHITE));
        buf.push(DrawCommand::FillRect {
            min: Point::ZERO,
            width: size.0,
            height: size.1,
        });
        buf.push_style(style);
        buf
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn push_style(&mut self, style: &BrushStyle) {
        self.push(DrawCommand::SetStrokeStyle(style.color));
        self.push(DrawCommand::SetLineWidth(style.width));
        self.push(DrawCommand::SetLineCap(style.cap));
        self.push(DrawCommand::SetLineJoin(style.join));
    }

    /// Appends one quadratic curve segment as a self-contained path.
    pub fn push_segment(&mut self, start: Point, control: Point, end: Point) {
        self.push(DrawCommand::BeginPath);
        self.push(DrawCommand::MoveTo(start));
        self.push(DrawCommand::QuadTo { control, to: end });
        self.push(DrawCommand::Stroke);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of curve segments in the buffer (style and path bookkeeping
    /// commands are not segments).
    pub fn segment_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::QuadTo { .. }))
            .count()
    }
}

/// The per-tick double buffer.
///
/// `pending` accumulates commands between animation ticks (possibly many
/// pointer-move events' worth); `visible` is what was flushed to the display
/// surface on the last tick. Only `pending` is ever mutated; `visible` is
/// replaced wholesale on swap.
#[derive(Debug, Clone, Default)]
pub struct FrameBuffers {
    pending: CommandBuffer,
    visible: CommandBuffer,
}

impl FrameBuffers {
    pub fn new(style: &BrushStyle) -> Self {
        Self {
            pending: CommandBuffer::with_style(style),
            visible: CommandBuffer::new(),
        }
    }

    pub fn pending(&self) -> &CommandBuffer {
        &self.pending
    }

    pub fn pending_mut(&mut self) -> &mut CommandBuffer {
        &mut self.pending
    }

    pub fn visible(&self) -> &CommandBuffer {
        &self.visible
    }

    /// Once-per-tick swap: pending becomes visible, and a fresh pending
    /// carrying the current style prologue is started.
    pub fn swap(&mut self, style: &BrushStyle) -> &CommandBuffer {
        self.visible = std::mem::replace(&mut self.pending, CommandBuffer::with_style(style));
        &self.visible
    }

    /// Resets both buffers to a white-filled canvas.
    pub fn reset(&mut self, size: (f64, f64), style: &BrushStyle) {
        self.pending = CommandBuffer::background(size, style);
        self.visible = CommandBuffer::background(size, style);
    }
}
