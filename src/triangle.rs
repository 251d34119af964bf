//! Triangle primitive and the ray–triangle test.
//!
//! Intersection is split in two steps: solve the ray against the triangle's
//! plane, then classify the plane point with a same-side test.

use crate::hittable::{Hit, Hittable};
use crate::interval::Interval;
use crate::ray::Ray;
use crate::vector::Vector;

/// Triangle defined by three vertices and a flat colour.
///
/// The plane normal is not stored; it follows from the vertex order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub a: Vector,
    /// Second vertex.
    pub b: Vector,
    /// Third vertex.
    pub c: Vector,
    /// RGB colour.
    pub color: [u8; 3],
}

impl Triangle {
    /// Create a new triangle.
    pub fn new(a: Vector, b: Vector, c: Vector, color: [u8; 3]) -> Self {
        Self { a, b, c, color }
    }

    /// Unnormalised plane normal, `(a - b) × (a - c)`.
    pub fn normal(&self) -> Vector {
        (self.a - self.b).cross(self.a - self.c)
    }

    /// Mean of the three vertices.
    pub fn centroid(&self) -> Vector {
        (self.a + self.b + self.c) / 3.0
    }
}

/// Distance along `dir` from `pos` to the plane of `triangle`.
///
/// Returns `f64::INFINITY` when `dir` is parallel to the plane. The result is
/// negative when the plane lies behind `pos`; callers reject those.
/// See <https://en.wikipedia.org/wiki/Line%E2%80%93plane_intersection>.
pub fn plane_intersect(pos: Vector, dir: Vector, triangle: &Triangle) -> f64 {
    let normal = triangle.normal();
    let denom = dir.dot(normal);
    if denom == 0.0 {
        return f64::INFINITY;
    }
    (triangle.a - pos).dot(normal) / denom
}

/// Same-side test for a point already lying on the triangle's plane.
///
/// For each edge the cross product of the edge and the vector from its first
/// vertex to `point` is projected on a reference normal. The point is inside
/// when no two projections have opposite signs; points on an edge count as
/// inside.
pub fn point_in_triangle(point: Vector, triangle: &Triangle) -> bool {
    let Triangle { a, b, c, .. } = *triangle;
    let normal = (a - c).cross(a - b);

    let side = |from: Vector, to: Vector| (point - from).cross(from - to).dot(normal);
    let sides = [side(a, b), side(b, c), side(c, a)];

    let any_positive = sides.iter().any(|&s| s > 0.0);
    let any_negative = sides.iter().any(|&s| s < 0.0);
    !(any_positive && any_negative)
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, window: Interval) -> Option<Hit> {
        let t = plane_intersect(ray.origin, ray.direction, self);
        if !window.admits(t) {
            return None;
        }
        let p = ray.at(t);
        point_in_triangle(p, self).then_some(Hit {
            t,
            p,
            color: self.color,
        })
    }
}
