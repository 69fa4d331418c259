use egui::Color32;
use log::debug;

use crate::command::{BrushStyle, CommandBuffer, DrawCommand, FrameBuffers};
use crate::geometry::{Frame, Point};

/// Transient per-stroke state, present only while the pointer is down.
#[derive(Debug, Clone, Copy)]
struct ActiveStroke {
    last_point: Point,
    last_midpoint: Point,
}

/// The drawing engine: a two-state machine (idle / drawing) that smooths raw
/// pointer samples into quadratic segments and replicates each segment into
/// every rotation frame.
///
/// Raw samples are jagged; using the running midpoint as segment endpoints
/// and the raw sample as the quadratic control point yields a continuous
/// smooth curve through the sample sequence.
#[derive(Debug)]
pub struct Engine {
    sections: u32,
    canvas_size: (f64, f64),
    style: BrushStyle,
    draw_outside: bool,
    frames: Vec<Frame>,
    stroke: Option<ActiveStroke>,
    buffers: FrameBuffers,
}

impl Engine {
    pub fn new(sections: u32, canvas_size: (f64, f64), style: BrushStyle) -> Self {
        let mut engine = Self {
            sections: sections.max(1),
            canvas_size,
            style,
            draw_outside: false,
            frames: Vec::new(),
            stroke: None,
            buffers: FrameBuffers::new(&style),
        };
        engine.rebuild_frames();
        engine.buffers.reset(canvas_size, &engine.style);
        engine
    }

    fn center(&self) -> Point {
        Point::new(self.canvas_size.0 / 2.0, self.canvas_size.1 / 2.0)
    }

    fn rebuild_frames(&mut self) {
        let center = self.center();
        let step = 360.0 / self.sections as f64;
        self.frames = (0..self.sections)
            .map(|i| Frame::new(center, i as f64 * step))
            .collect();
        debug!(
            "rebuilt {} frames about ({}, {})",
            self.frames.len(),
            center.x,
            center.y
        );
    }

    /// Emits one smoothed quadratic segment into every frame.
    fn emit_segment(&mut self, start: Point, control: Point, end: Point) {
        for frame in &self.frames {
            self.buffers.pending_mut().push_segment(
                frame.place(start),
                frame.place(control),
                frame.place(end),
            );
        }
    }

    pub fn pointer_down(&mut self, p: Point) {
        self.stroke = Some(ActiveStroke {
            last_point: p,
            last_midpoint: p,
        });
    }

    pub fn pointer_move(&mut self, p: Point) {
        // No active stroke: spurious move, ignore.
        let Some(stroke) = self.stroke else {
            return;
        };
        let new_midpoint = Point::midpoint(stroke.last_point, p);
        self.emit_segment(stroke.last_midpoint, stroke.last_point, new_midpoint);
        self.stroke = Some(ActiveStroke {
            last_point: p,
            last_midpoint: new_midpoint,
        });
    }

    pub fn pointer_up(&mut self, p: Point) {
        let Some(stroke) = self.stroke.take() else {
            return;
        };
        self.emit_segment(stroke.last_midpoint, stroke.last_point, p);
    }

    /// A canvas-leave finishes the stroke like a release, unless drawing
    /// outside is allowed. The toggle affects only the leave transition;
    /// out-of-bounds moves always keep drawing.
    pub fn pointer_leave(&mut self, p: Point) {
        if !self.draw_outside {
            self.pointer_up(p);
        }
    }

    /// Once-per-animation-tick buffer swap; returns the buffer to flush to
    /// the display surface.
    pub fn tick(&mut self) -> &CommandBuffer {
        self.buffers.swap(&self.style)
    }

    /// Resets both buffers to a white-filled canvas and drops any stroke in
    /// progress.
    pub fn clear(&mut self) {
        self.stroke = None;
        self.buffers.reset(self.canvas_size, &self.style);
    }

    /// Changes the symmetry section count. The existing drawing cannot be
    /// retroactively replicated under a different count, so the whole canvas
    /// resets.
    pub fn set_sections(&mut self, sections: u32) {
        if sections < 1 || sections == self.sections {
            return;
        }
        debug!("sections {} -> {}", self.sections, sections);
        self.sections = sections;
        self.rebuild_frames();
        self.clear();
    }

    /// Tracks the canvas element size; frames pivot about the new center.
    /// The retained picture on the surface is left alone.
    pub fn resize(&mut self, size: (f64, f64)) {
        if size == self.canvas_size {
            return;
        }
        self.canvas_size = size;
        self.rebuild_frames();
    }

    pub fn set_brush_color(&mut self, color: Color32) {
        if color == self.style.color {
            return;
        }
        self.style.color = color;
        self.buffers
            .pending_mut()
            .push(DrawCommand::SetStrokeStyle(color));
    }

    pub fn set_brush_width(&mut self, width: f64) {
        if width <= 0.0 || width == self.style.width {
            return;
        }
        self.style.width = width;
        self.buffers
            .pending_mut()
            .push(DrawCommand::SetLineWidth(width));
    }

    pub fn set_draw_outside(&mut self, allow: bool) {
        self.draw_outside = allow;
    }

    pub fn draw_outside(&self) -> bool {
        self.draw_outside
    }

    pub fn sections(&self) -> u32 {
        self.sections
    }

    pub fn canvas_size(&self) -> (f64, f64) {
        self.canvas_size
    }

    pub fn style(&self) -> &BrushStyle {
        &self.style
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn pending(&self) -> &CommandBuffer {
        self.buffers.pending()
    }

    pub fn visible(&self) -> &CommandBuffer {
        self.buffers.visible()
    }
}
