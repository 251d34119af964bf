//! Tricast triangle raycaster
//!
//! Casts one ray per pixel from a movable camera, finds the nearest triangle
//! each ray meets by scanning the whole triangle list, and shades it with a
//! distance falloff normalised against the farthest recent hit.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod config;
pub mod controller;
pub mod error;
pub mod hittable;
pub mod interval;
pub mod random;
pub mod raster;
pub mod ray;
pub mod raycast;
pub mod shading;
pub mod triangle;
pub mod vector;

pub use camera::{Camera, CameraSettings};
pub use config::{Config, RenderSettings};
pub use controller::{Command, ControllerSettings};
pub use error::{Result, TricastError};
pub use hittable::{Hit, Hittable, Trace, TriangleList};
pub use raster::Raster;
pub use ray::Ray;
pub use raycast::FrameStats;
pub use shading::Normalizer;
pub use triangle::{plane_intersect, point_in_triangle, Triangle};
pub use vector::{Rotate, Vector};
