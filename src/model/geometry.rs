//! Geometry primitives shared by the split tree and the float layer

use serde::{Deserialize, Serialize};

/// How a branch lays out its children
///
/// Named after the bars that separate the children, matching the layout
/// definition format (`"v"` / `"h"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Children placed left-to-right, separated by vertical bars, sized by width
    #[serde(rename = "v", alias = "vertical")]
    Vertical,
    /// Children stacked top-to-bottom, separated by horizontal bars, sized by height
    #[serde(rename = "h", alias = "horizontal")]
    Horizontal,
}

impl Orientation {
    /// Extent of `rect` along the axis children are laid out on
    #[inline]
    pub fn extent(&self, rect: &Rect) -> f64 {
        match self {
            Orientation::Vertical => rect.width,
            Orientation::Horizontal => rect.height,
        }
    }

    /// The other orientation
    pub fn flip(&self) -> Orientation {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }
}

/// Rectangle for layout calculations
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Slice of this rect along `orientation`, starting `offset` units in and
    /// `size` units long
    pub fn slice(&self, orientation: Orientation, offset: f64, size: f64) -> Rect {
        match orientation {
            Orientation::Vertical => Rect::new(self.x + offset, self.y, size, self.height),
            Orientation::Horizontal => Rect::new(self.x, self.y + offset, self.width, size),
        }
    }

    /// Grow (or shrink, with a negative amount) on all sides
    pub fn inflate(&self, amount: f64) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }
}

/// A two-dimensional pointer delta
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
}

impl Delta {
    pub const ZERO: Delta = Delta { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Component along the axis `orientation` lays children out on
    pub fn along(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Vertical => self.dx,
            Orientation::Horizontal => self.dy,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

impl std::ops::Add for Delta {
    type Output = Delta;

    fn add(self, rhs: Delta) -> Delta {
        Delta::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl std::ops::AddAssign for Delta {
    fn add_assign(&mut self, rhs: Delta) {
        self.dx += rhs.dx;
        self.dy += rhs.dy;
    }
}
