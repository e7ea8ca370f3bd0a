use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A position in logical overlay coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Scale a physical-pixel position into logical points.
    pub fn to_points(self, pixels_per_point: f32) -> Self {
        if pixels_per_point <= 0.0 {
            return self;
        }
        Self::new(self.x / pixels_per_point, self.y / pixels_per_point)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<Point> for eframe::egui::Pos2 {
    fn from(point: Point) -> Self {
        eframe::egui::pos2(point.x, point.y)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to an egui color with the alpha channel scaled by `opacity`.
    pub fn with_opacity(self, opacity: f32) -> eframe::egui::Color32 {
        let alpha = (self.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        eframe::egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, alpha)
    }
}

/// One crosshair arm: a straight line centered on `center`, spanning
/// `-half_length..=half_length` along a direction rotated `angle_degrees`
/// from the horizontal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub center: Point,
    pub half_length: f32,
    pub angle_degrees: f32,
}

impl LineSegment {
    pub fn endpoints(&self) -> (Point, Point) {
        let radians = self.angle_degrees.to_radians();
        let offset = Point::new(
            self.half_length * radians.cos(),
            self.half_length * radians.sin(),
        );
        (self.center - offset, self.center + offset)
    }
}
