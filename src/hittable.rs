//! Ray-object intersection system.
//!
//! Defines the `Hittable` trait and the ordered triangle list the raycaster
//! scans exhaustively for every ray.

use crate::interval::Interval;
use crate::ray::Ray;
use crate::triangle::Triangle;
use crate::vector::Vector;

/// Ray-object intersection information.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance along the ray to the intersection point
    pub t: f64,
    /// Point where the ray intersects the object
    pub p: Vector,
    /// Colour of the surface at the hit point
    pub color: [u8; 3],
}

/// Trait for objects that can be intersected by rays.
///
/// Must be thread-safe since rays are traced in parallel.
pub trait Hittable: Sync + Send {
    /// Nearest intersection whose distance lies inside `window`.
    fn hit(&self, ray: &Ray, window: Interval) -> Option<Hit>;
}

/// Outcome of scanning one ray against a whole triangle list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trace {
    /// Index in the list and hit record of the nearest triangle, if any.
    pub nearest: Option<(usize, Hit)>,
    /// Largest distance among the candidates accepted during the scan.
    ///
    /// A candidate is accepted when it lies in the ray's window, is closer than
    /// every earlier candidate and passes the point-in-triangle test. Zero when
    /// nothing was accepted.
    pub farthest_accepted: f64,
}

/// Ordered, explicitly sized collection of triangles forming a scene.
///
/// Order matters only for ties: at exactly equal distance the earlier
/// triangle wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleList {
    triangles: Vec<Triangle>,
}

impl TriangleList {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a triangle at the end of the list.
    pub fn add(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Scan every triangle for `ray`, keeping the nearest hit below `ray.depth`.
    ///
    /// The direction is normalised first so distances are in world units.
    pub fn trace(&self, ray: &Ray) -> Trace {
        let ray = Ray {
            direction: ray.direction.normalize(),
            ..*ray
        };
        let mut window = Interval::forward(ray.depth);
        let mut trace = Trace {
            nearest: None,
            farthest_accepted: 0.0,
        };

        for (index, triangle) in self.triangles.iter().enumerate() {
            if let Some(hit) = triangle.hit(&ray, window) {
                trace.farthest_accepted = trace.farthest_accepted.max(hit.t);
                window = window.narrowed(hit.t);
                trace.nearest = Some((index, hit));
            }
        }

        trace
    }
}

impl From<Vec<Triangle>> for TriangleList {
    fn from(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square_at(z: f64, color: [u8; 3]) -> Triangle {
        Triangle::new(
            Vector::new(-1.0, -1.0, z),
            Vector::new(1.0, -1.0, z),
            Vector::new(0.0, 1.0, z),
            color,
        )
    }

    fn forward_ray(depth: f64) -> Ray {
        Ray::new(0, 0, Vector::ZERO, Vector::Z, depth)
    }

    #[test]
    fn empty_list_never_hits() {
        let list = TriangleList::new();
        let trace = list.trace(&forward_ray(10.0));
        assert!(trace.nearest.is_none());
        assert_eq!(trace.farthest_accepted, 0.0);
    }

    #[test]
    fn nearest_wins_regardless_of_order() {
        let list: TriangleList = vec![square_at(8.0, [1, 1, 1]), square_at(3.0, [2, 2, 2])].into();
        let trace = list.trace(&forward_ray(10.0));
        let (index, hit) = trace.nearest.unwrap();
        assert_eq!(index, 1);
        assert_abs_diff_eq!(hit.t, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(trace.farthest_accepted, 8.0, epsilon = 1e-12);
    }

    #[test]
    fn farther_candidate_after_nearest_is_not_accepted() {
        let list: TriangleList = vec![square_at(3.0, [2, 2, 2]), square_at(8.0, [1, 1, 1])].into();
        let trace = list.trace(&forward_ray(10.0));
        assert_eq!(trace.nearest.unwrap().0, 0);
        assert_abs_diff_eq!(trace.farthest_accepted, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn equal_distance_tie_keeps_first_in_list() {
        let list: TriangleList = vec![square_at(4.0, [9, 9, 9]), square_at(4.0, [7, 7, 7])].into();
        let (index, hit) = list.trace(&forward_ray(10.0)).nearest.unwrap();
        assert_eq!(index, 0);
        assert_eq!(hit.color, [9, 9, 9]);
    }

    #[test]
    fn depth_limits_hits() {
        let list: TriangleList = vec![square_at(12.0, [1, 1, 1])].into();
        assert!(list.trace(&forward_ray(10.0)).nearest.is_none());
        assert!(list.trace(&forward_ray(13.0)).nearest.is_some());
    }

    #[test]
    fn distances_ignore_direction_length() {
        let list: TriangleList = vec![square_at(4.0, [5, 5, 5])].into();
        let long = Ray::new(0, 0, Vector::ZERO, Vector::new(0.0, 0.0, 3.0), 10.0);
        let (_, hit) = list.trace(&long).nearest.unwrap();
        assert_abs_diff_eq!(hit.t, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hit.p.z, 4.0, epsilon = 1e-12);

        // Depth is compared in world units too.
        let short = Ray::new(0, 0, Vector::ZERO, Vector::new(0.0, 0.0, 0.5), 3.0);
        assert!(list.trace(&short).nearest.is_none());
    }
}
