use egui::epaint::{PathStroke, QuadraticBezierShape};
use egui::{Color32, Painter, Pos2, Rect};

use crate::command::{CommandBuffer, DrawCommand, LineCap, LineJoin};
use crate::geometry::Point;

/// A retained paint primitive produced by executing draw commands.
#[derive(Debug, Clone, PartialEq)]
enum Primitive {
    Rect {
        min: Point,
        width: f64,
        height: f64,
        color: Color32,
    },
    Curve {
        start: Point,
        control: Point,
        end: Point,
        color: Color32,
        width: f64,
    },
}

/// The canvas-like display surface.
///
/// A real 2D canvas keeps its pixels between flushes, so the engine only
/// sends what changed each tick. egui repaints from scratch every frame;
/// the surface bridges the two by executing each flushed buffer into
/// retained primitives and replaying the whole picture on paint.
///
/// Line cap/join arrive in the command stream but epaint path strokes do not
/// expose them; the surface records and otherwise ignores them.
#[derive(Debug)]
pub struct CanvasSurface {
    primitives: Vec<Primitive>,
    stroke_color: Color32,
    fill_color: Color32,
    line_width: f64,
    line_cap: LineCap,
    line_join: LineJoin,
    cursor: Point,
    path: Vec<(Point, Point, Point)>,
}

impl Default for CanvasSurface {
    fn default() -> Self {
        Self {
            primitives: Vec::new(),
            stroke_color: Color32::BLACK,
            fill_color: Color32::WHITE,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            cursor: Point::ZERO,
            path: Vec::new(),
        }
    }
}

impl CanvasSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes one flushed command buffer against the retained picture.
    pub fn flush(&mut self, buffer: &CommandBuffer) {
        for command in buffer.commands() {
            self.execute(command);
        }
    }

    fn execute(&mut self, command: &DrawCommand) {
        match *command {
            DrawCommand::SetStrokeStyle(color) => self.stroke_color = color,
            DrawCommand::SetFillStyle(color) => self.fill_color = color,
            DrawCommand::SetLineWidth(width) => self.line_width = width,
            DrawCommand::SetLineCap(cap) => self.line_cap = cap,
            DrawCommand::SetLineJoin(join) => self.line_join = join,
            DrawCommand::FillRect { min, width, height } => {
                // A fill anchored at the origin is a background repaint; it
                // covers everything underneath, so the old picture goes.
                if min == Point::ZERO {
                    self.primitives.clear();
                }
                self.primitives.push(Primitive::Rect {
                    min,
                    width,
                    height,
                    color: self.fill_color,
                });
            }
            DrawCommand::BeginPath => {
                self.path.clear();
            }
            DrawCommand::MoveTo(p) => {
                self.cursor = p;
            }
            DrawCommand::QuadTo { control, to } => {
                self.path.push((self.cursor, control, to));
                self.cursor = to;
            }
            DrawCommand::Stroke => {
                for (start, control, end) in self.path.drain(..) {
                    self.primitives.push(Primitive::Curve {
                        start,
                        control,
                        end,
                        color: self.stroke_color,
                        width: self.line_width,
                    });
                }
            }
        }
    }

    /// Replays the retained picture into an egui painter, translated into
    /// `rect` (the allocated canvas region, in screen coordinates).
    pub fn paint(&self, painter: &Painter, rect: Rect) {
        let to_screen = |p: Point| -> Pos2 {
            rect.min + Pos2::from(p).to_vec2()
        };

        for primitive in &self.primitives {
            match *primitive {
                Primitive::Rect {
                    min,
                    width,
                    height,
                    color,
                } => {
                    let min = to_screen(min);
                    let size = egui::vec2(width as f32, height as f32);
                    painter.rect_filled(Rect::from_min_size(min, size), 0.0, color);
                }
                Primitive::Curve {
                    start,
                    control,
                    end,
                    color,
                    width,
                } => {
                    painter.add(QuadraticBezierShape {
                        points: [to_screen(start), to_screen(control), to_screen(end)],
                        closed: false,
                        fill: Color32::TRANSPARENT,
                        stroke: PathStroke::new(width as f32, color),
                    });
                }
            }
        }
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::BrushStyle;

    #[test]
    fn flush_retains_stroked_segments() {
        let mut surface = CanvasSurface::new();
        let style = BrushStyle::default();
        let mut buffer = CommandBuffer::with_style(&style);
        buffer.push_segment(Point::ZERO, Point::new(5.0, 5.0), Point::new(10.0, 0.0));

        surface.flush(&buffer);
        assert_eq!(surface.primitive_count(), 1);

        // Nothing flushed, nothing gained.
        surface.flush(&CommandBuffer::new());
        assert_eq!(surface.primitive_count(), 1);
    }

    #[test]
    fn background_fill_replaces_picture() {
        let mut surface = CanvasSurface::new();
        let style = BrushStyle::default();
        let mut buffer = CommandBuffer::with_style(&style);
        buffer.push_segment(Point::ZERO, Point::new(5.0, 5.0), Point::new(10.0, 0.0));
        surface.flush(&buffer);

        surface.flush(&CommandBuffer::background((800.0, 800.0), &style));
        assert_eq!(surface.primitive_count(), 1); // just the white rect
    }

    #[test]
    fn unstroked_path_is_discarded_on_begin() {
        let mut surface = CanvasSurface::new();
        let mut buffer = CommandBuffer::new();
        buffer.push(DrawCommand::BeginPath);
        buffer.push(DrawCommand::MoveTo(Point::ZERO));
        buffer.push(DrawCommand::QuadTo {
            control: Point::new(1.0, 1.0),
            to: Point::new(2.0, 0.0),
        });
        buffer.push(DrawCommand::BeginPath);
        buffer.push(DrawCommand::Stroke);

        surface.flush(&buffer);
        assert_eq!(surface.primitive_count(), 0);
    }

    #[test]
    fn paint_replays_into_painter() {
        let mut surface = CanvasSurface::new();
        let style = BrushStyle::default();
        surface.flush(&CommandBuffer::background((100.0, 100.0), &style));

        let ctx = egui::Context::default();
        let layer_id = egui::LayerId::background();
        let rect = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(100.0, 100.0));
        let painter = Painter::new(ctx, layer_id, rect);

        surface.paint(&painter, rect);
    }
}
