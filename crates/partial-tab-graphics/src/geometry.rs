//! Geometric primitives: Point and the host window rectangle

/// Sentinel used by platform window managers for "fill the parent".
///
/// It is a valid value for [`WindowGeometry::width`] and
/// [`WindowGeometry::height`] but never a usable numeric size.
pub const MATCH_PARENT: i32 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn delta_to(&self, other: Point) -> (f32, f32) {
        (other.x - self.x, other.y - self.y)
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        let (dx, dy) = self.delta_to(other);
        (dx * dx + dy * dy).sqrt()
    }
}

/// The authoritative rectangle of the host window, in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowGeometry {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A window that fills its parent in both directions.
    pub const fn match_parent() -> Self {
        Self::new(0, 0, MATCH_PARENT, MATCH_PARENT)
    }

    pub fn with_x(mut self, x: i32) -> Self {
        self.x = x;
        self
    }

    pub fn with_y(mut self, y: i32) -> Self {
        self.y = y;
        self
    }

    pub fn with_width(mut self, width: i32) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: i32) -> Self {
        self.height = height;
        self
    }

    pub fn is_match_parent_width(&self) -> bool {
        self.width == MATCH_PARENT
    }

    pub fn is_match_parent_height(&self) -> bool {
        self.height == MATCH_PARENT
    }

    /// Width with the sentinel replaced by `parent_width`.
    pub fn resolved_width(&self, parent_width: i32) -> i32 {
        if self.is_match_parent_width() {
            parent_width
        } else {
            self.width
        }
    }

    /// Height with the sentinel replaced by `parent_height`.
    pub fn resolved_height(&self, parent_height: i32) -> i32 {
        if self.is_match_parent_height() {
            parent_height
        } else {
            self.height
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self, parent_width: i32) -> i32 {
        self.x + self.resolved_width(parent_width)
    }

    pub fn bottom(&self, parent_height: i32) -> i32 {
        self.y + self.resolved_height(parent_height)
    }
}
