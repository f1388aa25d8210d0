/// A point in content coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The coordinate along `axis`.
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.y,
            Axis::Horizontal => self.x,
        }
    }

    /// Returns a copy with the coordinate along `axis` replaced.
    pub fn with_along(self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::Vertical => Self { y: value, ..self },
            Axis::Horizontal => Self { x: value, ..self },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }
}

/// An axis-aligned rectangle in content coordinates.
///
/// Intersection is half-open: two rects that only share an edge do not intersect, and a rect
/// with a zero (or negative) extent never intersects anything.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn midpoint(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    pub fn min_along(&self, axis: Axis) -> f64 {
        self.origin().along(axis)
    }

    pub fn max_along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.max_y(),
            Axis::Horizontal => self.max_x(),
        }
    }

    pub fn mid_along(&self, axis: Axis) -> f64 {
        self.midpoint().along(axis)
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min_x() < other.max_x()
            && other.min_x() < self.max_x()
            && self.min_y() < other.max_y()
            && other.min_y() < self.max_y()
    }

    /// The smallest rect containing both rects.
    pub fn union(&self, other: &Rect) -> Rect {
        let min_x = self.min_x().min(other.min_x());
        let min_y = self.min_y().min(other.min_y());
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Moves the rect so that its minimum edge along `axis` sits at `value`.
    pub fn with_min_along(&self, axis: Axis, value: f64) -> Rect {
        let origin = self.origin().with_along(axis, value);
        Rect::from_origin_size(origin, self.size())
    }

    /// Squared distance between the midpoints of two rects.
    pub(crate) fn midpoint_distance_squared(&self, other: &Rect) -> f64 {
        let dx = self.mid_x() - other.mid_x();
        let dy = self.mid_y() - other.mid_y();
        dx * dx + dy * dy
    }

    /// Snaps the rect's edges to the device pixel grid of `scale`.
    pub fn aligned_to_pixels(&self, scale: f64) -> Rect {
        if !(scale > 0.0) {
            return *self;
        }
        let min_x = round_to_pixel(self.min_x(), scale);
        let min_y = round_to_pixel(self.min_y(), scale);
        let max_x = round_to_pixel(self.max_x(), scale);
        let max_y = round_to_pixel(self.max_y(), scale);
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

/// Rounds half away from zero. `f64::round` is not available without `std`.
pub(crate) fn round_half_away(value: f64) -> f64 {
    if value >= 0.0 {
        (value + 0.5) as i64 as f64
    } else {
        (value - 0.5) as i64 as f64
    }
}

pub(crate) fn round_to_pixel(value: f64, scale: f64) -> f64 {
    round_half_away(value * scale) / scale
}

/// The axis along which the calendar scrolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Where a programmatically targeted item should land inside the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollPosition {
    /// The item's midpoint is aligned with the viewport's midpoint.
    Centered,
    /// The item's leading edge sits `padding` past the viewport's leading edge (and below any
    /// pinned content).
    FirstFullyVisiblePosition { padding: f64 },
    /// The item's trailing edge sits `padding` before the viewport's trailing edge.
    LastFullyVisiblePosition { padding: f64 },
}
