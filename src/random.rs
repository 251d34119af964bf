//! Random number generation.
//!
//! Provides a thread-local ChaCha20 PRNG for sensor-grain noise and the demo
//! scene. Code that needs reproducible output takes an explicit `Rng` instead.

use glam::DVec3;
use rand::{rng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::cell::RefCell;

thread_local! {
    /// Thread-local ChaCha20 PRNG for quality random numbers.
    static RNG: RefCell<ChaCha20Rng> = RefCell::new(ChaCha20Rng::from_rng(&mut rng()));
}

/// Run `f` with this thread's generator.
pub fn with_rng<T>(f: impl FnOnce(&mut ChaCha20Rng) -> T) -> T {
    RNG.with(|rng| f(&mut rng.borrow_mut()))
}

/// Generate a random f64 in [min, max)
pub fn random_f64_range(min: f64, max: f64) -> f64 {
    min + (max - min) * with_rng(|rng| rng.random::<f64>())
}

/// Generate a random point with every coordinate in [min, max)
pub fn random_point(min: f64, max: f64) -> DVec3 {
    DVec3::new(
        random_f64_range(min, max),
        random_f64_range(min, max),
        random_f64_range(min, max),
    )
}

/// Generate a random RGB colour with every channel in `min..=255`.
pub fn random_color(min: u8) -> [u8; 3] {
    with_rng(|rng| std::array::from_fn(|_| rng.random_range(min..=u8::MAX)))
}
