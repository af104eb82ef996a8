//! Core geometry types for bevelkit.
//!
//! `Point` doubles as a 2D position and a 2D vector (normals, tangents),
//! the same way the outline math treats them. `Point3` is the mesh vertex,
//! `Rect` the axis-aligned bounding box, and `Triangle3` a mesh face.
//!
//! ## Rust Lesson #3: Operator Overloading
//!
//! In JS, `a + b` on two objects gives you `"[object Object][object Object]"`.
//! In Rust, implementing `std::ops::Add` for a type makes `a + b` call
//! your own function. It's still a plain function call - no magic, no cost.

use std::ops::{Add, Mul, Neg, Sub};

/// A 2D point (or vector) with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A 3D point - the mesh vertex type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

/// A mesh face. Vertex order encodes the front-face winding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle3(pub [Point3; 3]);

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        (*self - other).length()
    }

    /// Euclidean length when treated as a vector.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Unit vector in the same direction.
    ///
    /// A zero vector stays zero instead of turning into NaNs.
    #[inline]
    pub fn normalize(&self) -> Point {
        let len = self.length();
        if len == 0.0 {
            return *self;
        }
        Point::new(self.x / len, self.y / len)
    }

    /// Rotate 90 degrees counter-clockwise: (x, y) -> (-y, x).
    #[inline]
    pub fn rotate_90_left(&self) -> Point {
        Point::new(-self.y, self.x)
    }

    /// Unsigned angle to another vector, in radians (0..=PI).
    pub fn angle_to(&self, other: Point) -> f64 {
        let denom = self.length() * other.length();
        if denom == 0.0 {
            return 0.0;
        }
        // Rounding can push the cosine just past +/-1, which acos turns into NaN.
        (self.dot(other) / denom).clamp(-1.0, 1.0).acos()
    }

    /// Linear interpolation: `t = 0` gives `self`, `t = 1` gives `other`.
    #[inline]
    pub fn lerp(&self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    #[inline]
    pub fn min(&self, other: Point) -> Point {
        Point::new(self.x.min(other.x), self.y.min(other.y))
    }

    #[inline]
    pub fn max(&self, other: Point) -> Point {
        Point::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Lift into 3D at the given height.
    #[inline]
    pub fn at_z(&self, z: f64) -> Point3 {
        Point3::new(self.x, self.y, z)
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Point3 {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Rect {
    /// Smallest box covering both points.
    #[inline]
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Union of two boxes.
    #[inline]
    pub fn join(&self, other: &Rect) -> Rect {
        Rect {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow the box to cover a point.
    #[inline]
    pub fn include(&self, p: Point) -> Rect {
        Rect {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// True if `other` lies entirely inside this box (edges count as inside).
    #[inline]
    pub fn contains(&self, other: &Rect) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }

    #[inline]
    fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

impl Triangle3 {
    #[inline]
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self([a, b, c])
    }

    /// Same face with the opposite winding (2nd and 3rd vertex swapped).
    #[inline]
    pub fn flipped(&self) -> Triangle3 {
        let [a, b, c] = self.0;
        Triangle3([a, c, b])
    }

    /// Flip the winding only when asked to.
    #[inline]
    pub fn oriented(self, flip: bool) -> Triangle3 {
        if flip { self.flipped() } else { self }
    }

    /// Un-normalized face normal, (b - a) x (c - a).
    pub fn normal(&self) -> Point3 {
        let [a, b, c] = self.0;
        let (ux, uy, uz) = (b.x - a.x, b.y - a.y, b.z - a.z);
        let (vx, vy, vz) = (c.x - a.x, c.y - a.y, c.z - a.z);
        Point3::new(uy * vz - uz * vy, uz * vx - ux * vz, ux * vy - uy * vx)
    }
}

// ============================================================================
// TESTS
// ============================================================================
