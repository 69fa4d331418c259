use serde::{Deserialize, Serialize};

/// A 2D point in canvas space.
///
/// Kept as f64 (not `egui::Pos2`) so repeated rotation about the canvas
/// center round-trips without visible drift; conversion to `Pos2` happens
/// only at the paint seam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Arithmetic mean of two points, used to smooth raw pointer samples
    /// into quadratic curve endpoints.
    pub fn midpoint(a: Point, b: Point) -> Point {
        Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<egui::Pos2> for Point {
    fn from(pos: egui::Pos2) -> Self {
        Point::new(pos.x as f64, pos.y as f64)
    }
}

impl From<Point> for egui::Pos2 {
    fn from(p: Point) -> Self {
        egui::pos2(p.x as f32, p.y as f32)
    }
}

/// A rigid transform: rotation by `angle_deg` degrees about `origin`.
///
/// One frame exists per symmetry section; placing a stroke point into every
/// frame produces the rotated copies that make up the kaleidoscope pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    origin: Point,
    angle_deg: f64,
}

impl Frame {
    pub fn new(origin: Point, angle_deg: f64) -> Self {
        Self { origin, angle_deg }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    /// Maps a canvas-space point into this frame's rotated coordinate space.
    pub fn place(&self, p: Point) -> Point {
        let theta = self.angle_deg.to_radians();
        let (sin, cos) = theta.sin_cos();
        let dx = p.x - self.origin.x;
        let dy = p.y - self.origin.y;
        Point::new(
            self.origin.x + dx * cos - dy * sin,
            self.origin.y + dx * sin + dy * cos,
        )
    }
}
