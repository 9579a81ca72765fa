use glam::Vec2;

pub const ARENA_WIDTH: f32 = 800.0;
pub const ARENA_HEIGHT: f32 = 600.0;

/// The playable rectangle. Screen convention: origin top-left, y grows down.
pub const ARENA: Aabb = Aabb {
    min: Vec2::ZERO,
    max: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
};

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[cfg(test)]
    pub fn diagonal(&self) -> f32 {
        self.size().length()
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    #[cfg(test)]
    pub fn contains(&self, other: &Aabb) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }

    /// Moves a box of `size` centered at `center` the minimum distance needed
    /// to lie inside `self`, returning the new center.
    pub fn clamp_center(&self, center: Vec2, size: Vec2) -> Vec2 {
        let half = size * 0.5;
        let lo = self.min + half;
        let hi = (self.max - half).max(lo);
        center.clamp(lo, hi)
    }
}

/// Unit vector from `from` towards `to`, or zero when the points coincide.
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Heading in degrees from `from` to `to`, measured counter-clockwise from
/// the +x axis as seen on screen (y grows down).
pub fn heading_degrees(from: Vec2, to: Vec2) -> f32 {
    (from.y - to.y).atan2(to.x - from.x).to_degrees()
}

/// Rotates `point` counter-clockwise on screen by `degrees`.
pub fn rotate_screen(point: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(point.x * cos + point.y * sin, -point.x * sin + point.y * cos)
}

/// Extent of the axis-aligned box enclosing a `size` rectangle rotated by
/// `degrees`.
pub fn rotated_extent(size: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    Vec2::new(size.x * cos + size.y * sin, size.x * sin + size.y * cos)
}
