//! Per-frame raycasting.
//!
//! Every camera ray is scanned against the full triangle list, then the
//! nearest hit is shaded with the camera's adaptive distance falloff.
//!
//! The scan runs in parallel. Shading runs afterwards in raster order because
//! each accepted hit raises the running maximum that later pixels are shaded
//! against; a ray's pixel sees the maximum over every ray before it plus its
//! own accepted candidates.

use log::debug;
use rand::Rng;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::hittable::{Trace, TriangleList};
use crate::random;
use crate::shading::{noise_factor, shade};

/// Summary of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Rays evaluated.
    pub rays: usize,
    /// Rays that hit a triangle.
    pub hits: usize,
    /// Normaliser maximum after the frame.
    pub max_distance: f64,
    /// True when the frame was skipped because the scene is empty.
    pub skipped: bool,
}

const BLACK: [u8; 3] = [0, 0, 0];

impl Camera {
    /// Render one frame of `world` into the camera's raster.
    ///
    /// An empty world leaves the raster and the normaliser untouched.
    pub fn step(&mut self, world: &TriangleList) -> FrameStats {
        self.cast(world, || 1.0)
    }

    /// Render one frame with per-pixel sensor grain of strength `amplitude`.
    pub fn step_noisy<R: Rng>(
        &mut self,
        world: &TriangleList,
        amplitude: u8,
        rng: &mut R,
    ) -> FrameStats {
        self.cast(world, || noise_factor(rng.random(), amplitude))
    }

    /// Like [`Camera::step_noisy`], drawing grain from the thread-local generator.
    pub fn step_noisy_thread_rng(&mut self, world: &TriangleList, amplitude: u8) -> FrameStats {
        random::with_rng(|rng| self.step_noisy(world, amplitude, rng))
    }

    fn cast(&mut self, world: &TriangleList, mut grain: impl FnMut() -> f64) -> FrameStats {
        let (rays, raster, normalizer) = self.frame_parts();

        if world.is_empty() {
            debug!("empty scene, frame skipped");
            return FrameStats {
                rays: rays.len(),
                hits: 0,
                max_distance: normalizer.previous_max(),
                skipped: true,
            };
        }

        let traces: Vec<Trace> = rays.par_iter().map(|ray| world.trace(ray)).collect();

        normalizer.begin_frame();
        let mut hits = 0;
        for (ray, trace) in rays.iter().zip(&traces) {
            let color = match trace.nearest {
                Some((_, hit)) => {
                    hits += 1;
                    normalizer.raise(trace.farthest_accepted);
                    shade(hit.color, normalizer.brightness(hit.t))
                }
                None => BLACK,
            };
            raster.set_pixel(ray.pixel_x, ray.pixel_y, shade(color, grain()));
        }
        normalizer.end_frame();

        let stats = FrameStats {
            rays: rays.len(),
            hits,
            max_distance: normalizer.previous_max(),
            skipped: false,
        };
        debug!(
            "frame: {} rays, {} hits against {} triangles, max distance {:.3}",
            stats.rays,
            stats.hits,
            world.len(),
            stats.max_distance
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraSettings;
    use crate::raster::Raster;
    use crate::triangle::Triangle;
    use crate::vector::Vector;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn settings() -> CameraSettings {
        CameraSettings {
            position: Vector::ZERO,
            direction: Vector::Z,
            roll: 0.0,
            focal_length: 4.0,
            field_width: 1.0,
            field_height: 1.0,
            depth: 20.0,
        }
    }

    fn wall(z: f64, color: [u8; 3]) -> Triangle {
        Triangle::new(
            Vector::new(-50.0, -50.0, z),
            Vector::new(50.0, -50.0, z),
            Vector::new(0.0, 50.0, z),
            color,
        )
    }

    fn camera() -> Camera {
        Camera::new(Raster::rgb(4, 4).unwrap(), settings()).unwrap()
    }

    #[test]
    fn empty_world_is_a_no_op() {
        let mut camera = camera();
        let world: TriangleList = vec![wall(5.0, [200, 100, 50])].into();
        camera.step(&world);
        let raster = camera.raster().clone();
        let state = *camera.normalizer();

        let stats = camera.step(&TriangleList::new());
        assert!(stats.skipped);
        assert_eq!(camera.raster(), &raster);
        assert_eq!(camera.normalizer(), &state);
    }

    #[test]
    fn every_ray_hits_a_wall_filling_the_view() {
        let mut camera = camera();
        let world: TriangleList = vec![wall(5.0, [200, 100, 50])].into();
        let stats = camera.step(&world);
        assert_eq!(stats.rays, 16);
        assert_eq!(stats.hits, 16);
        assert!(stats.max_distance >= 5.0);
    }

    #[test]
    fn misses_are_black() {
        let mut camera = camera();
        camera.step(&vec![wall(-5.0, [255, 255, 255])].into());
        assert!(camera.raster().as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn decay_without_hits() {
        let mut camera = camera();
        camera.step(&vec![wall(5.0, [255, 255, 255])].into());
        let before = camera.normalizer().previous_max();
        assert!(before > 0.0);

        let stats = camera.step(&vec![wall(-5.0, [255, 255, 255])].into());
        assert_eq!(stats.hits, 0);
        assert_eq!(camera.normalizer().previous_max(), 0.8 * before);
    }

    #[test]
    fn zero_amplitude_noise_matches_plain_shading() {
        let world: TriangleList = vec![wall(5.0, [200, 100, 50]), wall(9.0, [10, 250, 30])].into();
        let mut plain = camera();
        let mut noisy = camera();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..3 {
            plain.step(&world);
            noisy.step_noisy(&world, 0, &mut rng);
        }
        assert_eq!(plain.raster(), noisy.raster());
    }

    #[test]
    fn noise_only_darkens() {
        let world: TriangleList = vec![wall(5.0, [200, 100, 50])].into();
        let mut plain = camera();
        let mut noisy = camera();
        plain.step(&world);
        plain.step(&world);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        noisy.step(&world);
        noisy.step_noisy(&world, 255, &mut rng);
        for (p, n) in plain.raster().as_bytes().iter().zip(noisy.raster().as_bytes()) {
            assert!(n <= p);
        }
    }

    #[test]
    fn seeded_noise_is_reproducible() {
        let world: TriangleList = vec![wall(5.0, [200, 100, 50])].into();
        let mut a = camera();
        let mut b = camera();
        a.step_noisy(&world, 128, &mut ChaCha8Rng::seed_from_u64(3));
        b.step_noisy(&world, 128, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a.raster(), b.raster());
    }
}
