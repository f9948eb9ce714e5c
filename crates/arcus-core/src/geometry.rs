//! Ring geometry. Angles are in degrees, mathematical convention: 0° at three
//! o'clock, positive counter-clockwise.

pub const PREFERRED_SIZE: (i32, i32) = (200, 200);
pub const FULL_CIRCLE: f64 = 360.0;
pub const DETERMINATE_START: f64 = 90.0;
pub const INDETERMINATE_SPAN: f64 = 0.15;
pub const FRAME_INSET: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
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

    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Moves the left/top edges by `dx1`/`dy1` and the right/bottom edges by
    /// `dx2`/`dy2`.
    pub fn adjusted(&self, dx1: f64, dy1: f64, dx2: f64, dy2: f64) -> Self {
        Self::new(
            self.x + dx1,
            self.y + dy1,
            self.width - dx1 + dx2,
            self.height - dy1 + dy2,
        )
    }

    pub fn inset(&self, margin: f64) -> Self {
        self.adjusted(margin, margin, -margin, -margin)
    }

    /// Largest square centered in `self`; the longer side is trimmed
    /// symmetrically.
    pub fn squared(&self) -> Self {
        if self.width > self.height {
            let diff = self.width - self.height;
            self.adjusted(diff / 2.0, 0.0, -diff / 2.0, 0.0)
        } else {
            let diff = self.height - self.width;
            self.adjusted(0.0, diff / 2.0, 0.0, -diff / 2.0)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Bounds of the ring inside a bitmap of `size`, scaled by `outer_radius`.
pub fn ring_bounds(size: Rect, outer_radius: f64) -> Rect {
    let rect = size.inset(FRAME_INSET);
    let margin = rect.width * (1.0 - outer_radius) / 2.0;
    rect.inset(margin)
}

pub fn hole_radius(ring: Rect, inner_radius: f64) -> f64 {
    inner_radius * ring.width / 2.0
}

/// A pie slice: `sweep` is signed, negative meaning clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    pub start: f64,
    pub sweep: f64,
}

impl ArcSpan {
    pub fn new(start: f64, sweep: f64) -> Self {
        Self { start, sweep }
    }

    /// The rotating slice shown when no maximum is set.
    pub fn indeterminate(phase: f64) -> Self {
        Self::new(-phase * FULL_CIRCLE, INDETERMINATE_SPAN * FULL_CIRCLE)
    }

    /// Clockwise slice from twelve o'clock proportional to
    /// `min(visible, maximum) / maximum`. An empty slice when `maximum` is 0.
    pub fn determinate(visible: i32, maximum: i32) -> Self {
        if maximum <= 0 {
            return Self::new(DETERMINATE_START, 0.0);
        }
        let value = visible.clamp(0, maximum);
        Self::new(
            DETERMINATE_START,
            -(value as f64) * FULL_CIRCLE / maximum as f64,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.sweep == 0.0
    }

    pub fn is_clockwise(&self) -> bool {
        self.sweep < 0.0
    }

    /// Start and end angles in radians for a y-down painter such as cairo,
    /// where angles grow clockwise. Draw with `arc` when the span is
    /// clockwise and with `arc_negative` otherwise.
    pub fn to_screen_radians(&self) -> (f64, f64) {
        (
            (-self.start).to_radians(),
            (-(self.start + self.sweep)).to_radians(),
        )
    }
}
