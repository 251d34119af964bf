//! Vector algebra for the raycaster.
//!
//! Points and directions are `glam::DVec3`. Dot and cross products, scaling,
//! sums, differences and normalisation are the `DVec3` operators and methods
//! (`a.dot(b)`, `a.cross(b)`, `a * s`, `a + b`, `a - b`, `a.normalize()`);
//! this module adds the axis constants and the two rotations the camera needs.

use glam::DVec3;

/// A point or direction in world space.
pub type Vector = DVec3;

/// Unit vector along +X.
pub const X_AXIS: Vector = DVec3::X;
/// Unit vector along +Y.
pub const Y_AXIS: Vector = DVec3::Y;
/// Unit vector along +Z. The reference view direction of an unrotated camera.
pub const Z_AXIS: Vector = DVec3::Z;

/// Squared length under which an axis is treated as zero.
const AXIS_EPSILON: f64 = 1e-24;

/// Rotations over world-space vectors.
pub trait Rotate: Sized {
    /// Rotate by `rx`, `ry` and `rz` radians around X, Y and Z.
    ///
    /// Uses the intrinsic Z·Y·X composition `R = Rz(rz) · Ry(ry) · Rx(rx)`.
    fn rotate_euler(self, rx: f64, ry: f64, rz: f64) -> Self;

    /// Rotate around `axis` by `angle` radians (Rodrigues' formula).
    ///
    /// `axis` must be unit length; a non-unit axis scales the result.
    fn rotate_around_axis(self, axis: Self, angle: f64) -> Self;
}

impl Rotate for DVec3 {
    fn rotate_euler(self, rx: f64, ry: f64, rz: f64) -> Self {
        let (srx, crx) = rx.sin_cos();
        let (sry, cry) = ry.sin_cos();
        let (srz, crz) = rz.sin_cos();
        DVec3::new(
            self.x * (crz * cry)
                + self.y * (crz * sry * srx - srz * crx)
                + self.z * (crz * sry * crx + srz * srx),
            self.x * (srz * cry)
                + self.y * (srz * sry * srx + crz * crx)
                + self.z * (srz * sry * crx - crz * srx),
            self.x * -sry + self.y * (cry * srx) + self.z * (cry * crx),
        )
    }

    fn rotate_around_axis(self, axis: Self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        self * cos + axis.cross(self) * sin + axis * (axis.dot(self) * (1.0 - cos))
    }
}

/// Normalise `axis`, or return `None` when it is too short to define a direction.
///
/// Rotations built from a cross product collapse when the two inputs are
/// parallel; callers treat `None` as "no rotation".
pub fn unit_axis(axis: Vector) -> Option<Vector> {
    let len_sq = axis.length_squared();
    if len_sq <= AXIS_EPSILON || !len_sq.is_finite() {
        None
    } else {
        Some(axis / len_sq.sqrt())
    }
}

/// Rotate `v` around `axis` after normalising the axis; identity for a zero axis.
pub fn rotate_around_free_axis(v: Vector, axis: Vector, angle: f64) -> Vector {
    match unit_axis(axis) {
        Some(axis) => v.rotate_around_axis(axis, angle),
        None => v,
    }
}
