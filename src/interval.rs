//! Distance windows for hit acceptance.

/// Half-open interval `[min, max)` over ray distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Smallest admitted value.
    pub min: f64,
    /// Exclusive upper bound.
    pub max: f64,
}

impl Interval {
    /// Create a new interval with given min and max values
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Distances a ray of the given depth may accept: `[0, depth)`.
    pub fn forward(depth: f64) -> Self {
        Self::new(0.0, depth)
    }

    /// Check whether `x` lies in `[min, max)`. NaN is never admitted.
    pub fn admits(&self, x: f64) -> bool {
        self.min <= x && x < self.max
    }

    /// Same interval with the upper bound pulled down to `max`.
    pub fn narrowed(&self, max: f64) -> Self {
        Self::new(self.min, self.max.min(max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_lower_bound_but_not_upper() {
        let window = Interval::forward(10.0);
        assert!(window.admits(0.0));
        assert!(window.admits(9.999));
        assert!(!window.admits(10.0));
        assert!(!window.admits(-0.001));
        assert!(!window.admits(f64::NAN));
        assert!(!window.admits(f64::INFINITY));
    }

    #[test]
    fn narrowing_never_widens() {
        let window = Interval::forward(10.0);
        assert_eq!(window.narrowed(4.0).max, 4.0);
        assert_eq!(window.narrowed(20.0).max, 10.0);
    }
}
