//! Camera rays.
//!
//! A ray is a semi-infinite line `r(t) = origin + t * direction` bound to the
//! raster pixel it colours. Rays are rebuilt wholesale whenever the camera
//! pose changes.

use crate::vector::Vector;

/// Ray owned by a camera, one per pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Column of the target pixel.
    pub pixel_x: usize,
    /// Row of the target pixel.
    pub pixel_y: usize,
    /// Starting point on the camera's image plane.
    pub origin: Vector,
    /// Direction of travel. Expected to be unit length before intersection tests.
    pub direction: Vector,
    /// Distance past which the ray sees background.
    pub depth: f64,
}

impl Ray {
    /// Create a ray for pixel `(pixel_x, pixel_y)`.
    pub fn new(
        pixel_x: usize,
        pixel_y: usize,
        origin: Vector,
        direction: Vector,
        depth: f64,
    ) -> Self {
        Self {
            pixel_x,
            pixel_y,
            origin,
            direction,
            depth,
        }
    }

    /// Compute a point at parameter t along the ray.
    pub fn at(&self, t: f64) -> Vector {
        self.origin + t * self.direction
    }
}
