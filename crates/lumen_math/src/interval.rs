/// A closed range of ray parameters `[min, max]`.
///
/// Hit tests use [`Interval::surrounds`], which excludes both endpoints, so a
/// search interval of `(t_min, t_max)` never reports a hit exactly at either
/// bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if the interval contains nothing (min > max).
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Overlap of two intervals. Empty when they do not intersect.
    pub fn intersect(&self, other: &Interval) -> Interval {
        Interval::new(self.min.max(other.min), self.max.min(other.max))
    }

    /// Same interval with its upper bound lowered to `max` (never raised).
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, self.max.min(max))
    }

    /// A universe interval (contains everything).
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };
}
