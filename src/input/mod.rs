use egui::{Context, PointerButton, Pos2, Rect};

use crate::geometry::Point;

/// Pointer events relative to the canvas element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    /// The pointer crossed from inside the canvas to outside (or left the
    /// window entirely).
    PointerLeave(Point),
}

/// Converts raw egui pointer state into canvas-relative [`InputEvent`]s.
///
/// Only the primary button draws. Moves are reported while the pointer is
/// over the canvas; crossing the canvas edge is reported as a leave, the
/// same shape a canvas element's mouse events give a web front end.
pub struct InputHandler {
    canvas_rect: Option<Rect>,
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            canvas_rect: None,
            last_pointer_pos: None,
        }
    }

    /// Update the canvas rectangle (screen coordinates) for this frame.
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = Some(rect);
    }

    fn to_canvas(&self, pos: Pos2) -> Point {
        match self.canvas_rect {
            Some(rect) => Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64),
            None => Point::from(pos),
        }
    }

    fn inside(&self, pos: Pos2) -> bool {
        self.canvas_rect.is_some_and(|rect| rect.contains(pos))
    }

    /// Process raw egui input and generate our InputEvents.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            if let Some(pos) = input.pointer.hover_pos() {
                if Some(pos) != self.last_pointer_pos {
                    let was_inside = self.last_pointer_pos.is_some_and(|p| self.inside(p));
                    if self.inside(pos) {
                        events.push(InputEvent::PointerMove(self.to_canvas(pos)));
                    } else if was_inside {
                        events.push(InputEvent::PointerLeave(self.to_canvas(pos)));
                    }
                    self.last_pointer_pos = Some(pos);
                }
            } else if let Some(last) = self.last_pointer_pos.take() {
                // Pointer left the window.
                if self.inside(last) {
                    events.push(InputEvent::PointerLeave(self.to_canvas(last)));
                }
            }

            if input.pointer.button_pressed(PointerButton::Primary) {
                if let Some(pos) = input.pointer.hover_pos() {
                    if self.inside(pos) {
                        events.push(InputEvent::PointerDown(self.to_canvas(pos)));
                    }
                }
            }
            if input.pointer.button_released(PointerButton::Primary) {
                if let Some(pos) = input.pointer.hover_pos() {
                    events.push(InputEvent::PointerUp(self.to_canvas(pos)));
                }
            }
        });

        events
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
