pub use kurbo::Point;

/// Axis-aligned rectangle in canvas page coordinates (zoom/pan independent).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, non-negative.
    pub w: f64,
    /// Height, non-negative.
    pub h: f64,
}

impl Rect {
    /// Build a rectangle from origin and size.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (`x + w`).
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge (`y + h`).
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Area of the overlap between `self` and `other`, zero when disjoint.
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let ox = (self.right().min(other.right()) - self.x.max(other.x)).max(0.0);
        let oy = (self.bottom().min(other.bottom()) - self.y.max(other.y)).max(0.0);
        ox * oy
    }

    /// Return `true` when `other` lies entirely inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Per-edge comparison within `eps`.
    pub fn approx_eq(&self, other: &Rect, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.w - other.w).abs() <= eps
            && (self.h - other.h).abs() <= eps
    }

    /// Shrink the rectangle by `d` on every side.
    ///
    /// Width/height clamp at zero; the center is preserved when they do.
    pub fn inset(&self, d: f64) -> Rect {
        let w = (self.w - 2.0 * d).max(0.0);
        let h = (self.h - 2.0 * d).max(0.0);
        Rect {
            x: self.x + (self.w - w) / 2.0,
            y: self.y + (self.h - h) / 2.0,
            w,
            h,
        }
    }

    /// Convert from a host-side [`kurbo::Rect`].
    pub fn from_kurbo(r: kurbo::Rect) -> Self {
        let r = r.abs();
        Self {
            x: r.x0,
            y: r.y0,
            w: r.width(),
            h: r.height(),
        }
    }

    /// Convert to a host-side [`kurbo::Rect`].
    pub fn to_kurbo(&self) -> kurbo::Rect {
        kurbo::Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}

/// Snap `v` down to the previous multiple of `grid`.
///
/// A non-positive `grid` returns `v` unchanged.
pub fn snap_down(v: f64, grid: f64) -> f64 {
    if grid <= 0.0 {
        return v;
    }
    (v / grid).floor() * grid
}

/// Snap `v` up to the next multiple of `grid`.
pub fn snap_up(v: f64, grid: f64) -> f64 {
    if grid <= 0.0 {
        return v;
    }
    (v / grid).ceil() * grid
}

/// Snap `v` to the nearest multiple of `grid`.
pub fn snap_nearest(v: f64, grid: f64) -> f64 {
    if grid <= 0.0 {
        return v;
    }
    (v / grid).round() * grid
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geom.rs"]
mod tests;
