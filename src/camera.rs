//! Camera for ray generation.
//!
//! The camera owns the raster it renders into and one ray per pixel. Rays
//! are regenerated from the pose after every change: pixels are laid out on a
//! centred grid in the XY plane, turned about `direction × Z` by the angle
//! between the view direction and +Z, rolled, moved to the camera position,
//! and aimed away from a focal point behind the image plane.

use log::trace;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TricastError};
use crate::raster::Raster;
use crate::ray::Ray;
use crate::shading::Normalizer;
use crate::vector::{unit_axis, Rotate, Vector, Z_AXIS};

/// Initial pose and optics of a camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Centre of the image plane.
    pub position: Vector,
    /// View direction; normalised on construction.
    pub direction: Vector,
    /// Rotation of the image plane around the view direction, in radians.
    pub roll: f64,
    /// Distance from the image plane back to the focal point.
    pub focal_length: f64,
    /// Image plane width in world units.
    pub field_width: f64,
    /// Image plane height in world units.
    pub field_height: f64,
    /// Maximum ray travel distance.
    pub depth: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vector::new(-3.0, 3.0, 4.0),
            direction: Vector::new(1.0, -1.0, 0.0),
            roll: -std::f64::consts::FRAC_PI_4,
            focal_length: 5.0,
            field_width: 5.0,
            field_height: 5.0,
            depth: 10.0,
        }
    }
}

impl CameraSettings {
    /// Check every value a camera relies on.
    pub fn validate(&self) -> Result<()> {
        if !self.position.is_finite() {
            return Err(TricastError::InvalidArgument("camera position must be finite".into()));
        }
        if !self.direction.is_finite() || self.direction.length_squared() == 0.0 {
            return Err(TricastError::InvalidArgument(
                "camera direction must be finite and non-zero".into(),
            ));
        }
        if !self.roll.is_finite() || !self.focal_length.is_finite() {
            return Err(TricastError::InvalidArgument(
                "camera roll and focal length must be finite".into(),
            ));
        }
        if !(self.field_width > 0.0 && self.field_width.is_finite())
            || !(self.field_height > 0.0 && self.field_height.is_finite())
        {
            return Err(TricastError::InvalidArgument(
                "camera field size must be positive and finite".into(),
            ));
        }
        if self.depth.is_nan() || self.depth <= 0.0 {
            return Err(TricastError::InvalidArgument("camera depth must be positive".into()));
        }
        Ok(())
    }
}

/// Pinhole-style camera with one ray per raster pixel.
#[derive(Debug, Clone)]
pub struct Camera {
    raster: Raster,
    rays: Vec<Ray>,
    pub(crate) position: Vector,
    pub(crate) direction: Vector,
    pub(crate) roll: f64,
    pub(crate) focal_length: f64,
    field_width: f64,
    field_height: f64,
    depth: f64,
    normalizer: Normalizer,
}

impl Camera {
    /// Create a camera rendering into `raster` and generate its rays.
    ///
    /// The raster needs at least 2×2 pixels and three channels. Nothing is
    /// kept when construction fails.
    pub fn new(raster: Raster, settings: CameraSettings) -> Result<Self> {
        settings.validate()?;
        if raster.width() < 2 || raster.height() < 2 {
            return Err(TricastError::InvalidArgument(format!(
                "camera raster must be at least 2x2 pixels (got {}x{})",
                raster.width(),
                raster.height()
            )));
        }
        if raster.stride() < Raster::COLOR_CHANNELS {
            return Err(TricastError::InvalidArgument(format!(
                "camera raster needs {} channels per pixel (got {})",
                Raster::COLOR_CHANNELS,
                raster.stride()
            )));
        }

        let count = raster.pixel_count();
        let mut rays = Vec::new();
        rays.try_reserve_exact(count).map_err(|_| TricastError::ResourceExhausted {
            what: "camera rays",
            bytes: count.saturating_mul(std::mem::size_of::<Ray>()),
        })?;
        let width = raster.width();
        rays.extend((0..count).map(|i| {
            Ray::new(i % width, i / width, Vector::ZERO, Vector::ZERO, settings.depth)
        }));

        let mut camera = Self {
            raster,
            rays,
            position: settings.position,
            direction: settings.direction.normalize(),
            roll: settings.roll,
            focal_length: settings.focal_length,
            field_width: settings.field_width,
            field_height: settings.field_height,
            depth: settings.depth,
            normalizer: Normalizer::new(),
        };
        camera.update();
        Ok(camera)
    }

    /// Recompute every ray from the current pose.
    pub fn update(&mut self) {
        let generator = RayGenerator::new(self);
        self.rays
            .par_iter_mut()
            .for_each(|ray| *ray = generator.ray(ray.pixel_x, ray.pixel_y));
        trace!(
            "regenerated {} rays at {:?} looking {:?} (roll {:.3}, focal length {:.3})",
            self.rays.len(),
            self.position,
            self.direction,
            self.roll,
            self.focal_length
        );
    }

    /// Raster the camera renders into.
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Everything a frame touches, borrowed at once.
    pub(crate) fn frame_parts(&mut self) -> (&[Ray], &mut Raster, &mut Normalizer) {
        (&self.rays, &mut self.raster, &mut self.normalizer)
    }

    /// Release the camera and hand back its raster.
    pub fn into_raster(self) -> Raster {
        self.raster
    }

    /// Rays in raster order (row-major).
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    /// Camera position.
    pub fn position(&self) -> Vector {
        self.position
    }

    /// Unit view direction.
    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// Roll angle in radians.
    pub fn roll(&self) -> f64 {
        self.roll
    }

    /// Focal length.
    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    /// Image plane size in world units.
    pub fn field(&self) -> (f64, f64) {
        (self.field_width, self.field_height)
    }

    /// Maximum ray travel distance.
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Brightness normalisation state carried between frames.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }
}

/// Per-update constants shared by all rays.
#[derive(Debug, Clone, Copy)]
struct RayGenerator {
    position: Vector,
    direction: Vector,
    focal_point: Vector,
    roll: f64,
    half_width: f64,
    half_height: f64,
    step_x: f64,
    step_y: f64,
    /// Axis and angle laying the XY grid across the view; `None` when parallel to Z.
    align: Option<(Vector, f64)>,
    depth: f64,
}

impl RayGenerator {
    fn new(camera: &Camera) -> Self {
        let direction = camera.direction;
        let align = unit_axis(direction.cross(Z_AXIS))
            .map(|axis| (axis, direction.dot(Z_AXIS).clamp(-1.0, 1.0).acos()));
        Self {
            position: camera.position,
            direction,
            focal_point: camera.position - direction * camera.focal_length,
            roll: camera.roll,
            half_width: camera.field_width / 2.0,
            half_height: camera.field_height / 2.0,
            step_x: camera.field_width / (camera.raster.width() - 1) as f64,
            step_y: camera.field_height / (camera.raster.height() - 1) as f64,
            align,
            depth: camera.depth,
        }
    }

    fn ray(&self, x: usize, y: usize) -> Ray {
        let mut local = Vector::new(
            -self.half_width + self.step_x * x as f64,
            -self.half_height + self.step_y * y as f64,
            0.0,
        );
        if let Some((axis, angle)) = self.align {
            local = local.rotate_around_axis(axis, angle);
        }
        local = local.rotate_around_axis(self.direction, self.roll);

        let origin = local + self.position;
        let direction = (origin - self.focal_point).normalize();
        Ray::new(x, y, origin, direction, self.depth)
    }
}
