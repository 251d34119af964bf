//! Distance-falloff shading with an adaptive brightness normaliser.
//!
//! Brightness is `1 - distance / maxs`, where `maxs` tracks the farthest
//! recent hit. `maxs` decays by [`Normalizer::DECAY`] at the start of every
//! frame and is raised by every accepted hit, so consecutive frames are
//! coupled and the falloff adapts smoothly when the view changes.

/// Frame-persistent normalisation state, owned by a camera.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Normalizer {
    previous_max: f64,
    current_max: f64,
}

impl Normalizer {
    /// Factor applied to the previous frame's maximum when a frame starts.
    pub const DECAY: f64 = 0.8;

    /// Shadow accumulated from earlier bounces. Always zero with single-hit shading.
    pub const ACCUM_SHADOW: f64 = 0.0;

    /// Fresh state, both maxima zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum carried over from the last completed frame.
    pub fn previous_max(&self) -> f64 {
        self.previous_max
    }

    /// Running maximum of the frame in progress.
    pub fn current_max(&self) -> f64 {
        self.current_max
    }

    /// Start a frame: the running maximum restarts from the decayed previous one.
    pub fn begin_frame(&mut self) {
        self.current_max = Self::DECAY * self.previous_max;
    }

    /// Fold an accepted hit distance into the running maximum.
    pub fn raise(&mut self, distance: f64) {
        self.current_max = self.current_max.max(distance);
    }

    /// Finish a frame: the running maximum becomes next frame's baseline.
    pub fn end_frame(&mut self) {
        self.previous_max = self.current_max;
    }

    /// Brightness factor in `[0, 1]` for a hit at `distance`, using the running maximum.
    pub fn brightness(&self, distance: f64) -> f64 {
        let falloff = if distance < self.current_max {
            distance / self.current_max
        } else {
            1.0
        };
        Self::ACCUM_SHADOW + (1.0 - Self::ACCUM_SHADOW) * (1.0 - falloff)
    }
}

/// Scale a colour by `brightness`, truncating each channel into `u8`.
pub fn shade(color: [u8; 3], brightness: f64) -> [u8; 3] {
    color.map(|c| (c as f64 * brightness) as u8)
}

/// Grain factor for one pixel: `1 - (sample / 255 * amplitude) / 255`.
///
/// `sample` is a uniform byte, `amplitude` the caller's noise strength. An
/// amplitude of zero leaves pixels untouched; 255 can black them out.
pub fn noise_factor(sample: u8, amplitude: u8) -> f64 {
    1.0 - ((sample as f64 / 255.0) * amplitude as f64) / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn fresh_state_is_zero() {
        let n = Normalizer::new();
        assert_eq!(n.previous_max(), 0.0);
        assert_eq!(n.current_max(), 0.0);
    }

    #[test]
    fn decays_between_frames() {
        let mut n = Normalizer::new();
        n.begin_frame();
        n.raise(10.0);
        n.end_frame();
        assert_eq!(n.previous_max(), 10.0);

        n.begin_frame();
        n.end_frame();
        assert_eq!(n.previous_max(), 0.8 * 10.0);
    }

    #[test]
    fn raise_keeps_maximum() {
        let mut n = Normalizer::new();
        n.begin_frame();
        n.raise(4.0);
        n.raise(2.0);
        assert_eq!(n.current_max(), 4.0);
    }

    #[test]
    fn brightness_falls_off_with_distance() {
        let mut n = Normalizer::new();
        n.begin_frame();
        n.raise(10.0);
        assert_abs_diff_eq!(n.brightness(0.0), 1.0);
        assert_abs_diff_eq!(n.brightness(2.5), 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(n.brightness(10.0), 0.0);
        assert_abs_diff_eq!(n.brightness(12.0), 0.0);
    }

    #[test]
    fn brightness_with_zero_maximum_is_dark() {
        let n = Normalizer::new();
        assert_eq!(n.brightness(0.0), 0.0);
    }

    #[test]
    fn shade_truncates() {
        assert_eq!(shade([200, 100, 50], 0.5), [100, 50, 25]);
        assert_eq!(shade([255, 3, 1], 0.5), [127, 1, 0]);
        assert_eq!(shade([10, 20, 30], 0.0), [0, 0, 0]);
    }

    #[test]
    fn noise_factor_bounds() {
        assert_eq!(noise_factor(200, 0), 1.0);
        assert_eq!(noise_factor(0, 255), 1.0);
        assert_abs_diff_eq!(noise_factor(255, 255), 0.0, epsilon = 1e-12);
        let f = noise_factor(128, 64);
        assert!(f > 0.0 && f < 1.0);
    }
}
