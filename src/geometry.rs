//! Geometry primitives shared by the window shell
//!
//! Integer points are used for screen-space window and monitor geometry,
//! double points for raw cursor positions as delivered by the windowing
//! backend.

use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Integer 2D point (pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IntPoint {
    pub x: i32,
    pub y: i32,
}

/// Floating point 2D point (sub-pixel cursor positions)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DoublePoint {
    pub x: f64,
    pub y: f64,
}

impl IntPoint {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_double(self) -> DoublePoint {
        DoublePoint::new(self.x as f64, self.y as f64)
    }
}

impl DoublePoint {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Truncating conversion toward zero, matching how the backend reports
    /// whole-pixel cursor positions.
    pub fn to_int(self) -> IntPoint {
        IntPoint::new(self.x as i32, self.y as i32)
    }
}

impl Add for IntPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for IntPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for IntPoint {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for IntPoint {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Add<DoublePoint> for IntPoint {
    type Output = DoublePoint;

    fn add(self, rhs: DoublePoint) -> DoublePoint {
        self.to_double() + rhs
    }
}

impl Add for DoublePoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for DoublePoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for IntPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64)> for DoublePoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned rectangle described by its top-left corner and size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub position: IntPoint,
    pub size: IntPoint,
}

impl Rect {
    pub const fn new(position: IntPoint, size: IntPoint) -> Self {
        Self { position, size }
    }

    pub fn bottom_right(&self) -> IntPoint {
        self.position + self.size
    }

    /// Open containment test: a point lying exactly on an edge is outside.
    pub fn contains_strict(&self, point: IntPoint) -> bool {
        let br = self.bottom_right();
        point.x > self.position.x && point.x < br.x && point.y > self.position.y && point.y < br.y
    }

    /// Area of the intersection with `other`, zero when disjoint.
    pub fn overlap_area(&self, other: &Rect) -> i64 {
        let (a_br, b_br) = (self.bottom_right(), other.bottom_right());
        let w = (a_br.x.min(b_br.x) - self.position.x.max(other.position.x)).max(0) as i64;
        let h = (a_br.y.min(b_br.y) - self.position.y.max(other.position.y)).max(0) as i64;
        w * h
    }
}

/// Position and size of the window together with its minimum size.
///
/// `size` never drops below `minimum_size` once a resize has been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub position: IntPoint,
    pub size: IntPoint,
    pub minimum_size: IntPoint,
}

impl WindowGeometry {
    pub fn new(position: IntPoint, size: IntPoint, minimum_size: IntPoint) -> Self {
        Self {
            position,
            size,
            minimum_size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn satisfies_minimum(&self) -> bool {
        self.size.x >= self.minimum_size.x && self.size.y >= self.minimum_size.y
    }

    /// Geometry with the size raised to the minimum on any axis that is short.
    pub fn clamped(mut self) -> Self {
        self.size.x = self.size.x.max(self.minimum_size.x);
        self.size.y = self.size.y.max(self.minimum_size.y);
        self
    }

    /// Top-left position that centers this window inside `area`.
    pub fn centered_in(&self, area: &Rect) -> IntPoint {
        area.position + IntPoint::new((area.size.x - self.size.x) / 2, (area.size.y - self.size.y) / 2)
    }
}
