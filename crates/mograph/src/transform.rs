//! Per-element transform values and the rotation conventions they use.
//!
//! Rotations are stored as XYZ Euler angles in degrees. The rotation matrix is
//! `Rz * Ry * Rx`, i.e. X is applied first. Composition goes through [`Quat`].
use glam::{Affine3A, EulerRot, Mat4, Quat, Vec3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Translation, Euler rotation (degrees) and scale of one element.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// XYZ Euler angles in degrees.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn new(translation: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Rotation as a quaternion.
    pub fn quat(&self) -> Quat {
        euler_degrees_to_quat(self.rotation)
    }

    /// Affine matrix `T * R * S`.
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.quat(), self.translation)
    }

    /// Column-major `T * R * S` matrix for other math libraries.
    pub fn to_mint_matrix(&self) -> mint::ColumnMatrix4<f32> {
        Mat4::from(self.to_affine()).into()
    }

    /// Moves the element along its own axes: the offset is scaled and rotated
    /// by the current transform before it is added.
    pub fn translate_local(&mut self, offset: Vec3) {
        self.translation += self.quat() * (self.scale * offset);
    }

    /// Applies a rotation in the element's local frame (`R = R * Q`).
    pub fn rotate_local(&mut self, euler_degrees: Vec3) {
        if euler_degrees == Vec3::ZERO {
            return;
        }
        let q = self.quat() * euler_degrees_to_quat(euler_degrees);
        self.rotation = quat_to_euler_degrees(q);
    }

    /// Multiplies the scale component-wise.
    pub fn scale_by(&mut self, factor: Vec3) {
        self.scale *= factor;
    }

    /// Places this transform inside a parent frame given by translation and
    /// Euler rotation (`t' = Rp * t + tp`, `R' = Rp * R`).
    pub fn in_parent(&self, parent_translation: Vec3, parent_rotation: Vec3) -> Self {
        if parent_rotation == Vec3::ZERO {
            return Self {
                translation: self.translation + parent_translation,
                ..*self
            };
        }
        let parent = euler_degrees_to_quat(parent_rotation);
        Self {
            translation: parent * self.translation + parent_translation,
            rotation: quat_to_euler_degrees(parent * self.quat()),
            scale: self.scale,
        }
    }
}

/// Converts XYZ Euler angles in degrees to a quaternion (`Rz * Ry * Rx`).
pub fn euler_degrees_to_quat(euler: Vec3) -> Quat {
    let r = euler * (std::f32::consts::PI / 180.0);
    Quat::from_euler(EulerRot::ZYX, r.z, r.y, r.x)
}

/// Converts a quaternion back to XYZ Euler angles in degrees.
pub fn quat_to_euler_degrees(q: Quat) -> Vec3 {
    let (z, y, x) = q.to_euler(EulerRot::ZYX);
    Vec3::new(x, y, z) * (180.0 / std::f32::consts::PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn euler_round_trip_preserves_small_angles() {
        let e = Vec3::new(10.0, -20.0, 30.0);
        assert!(approx(quat_to_euler_degrees(euler_degrees_to_quat(e)), e));
    }

    #[test]
    fn x_rotation_is_applied_before_z() {
        let q = euler_degrees_to_quat(Vec3::new(90.0, 0.0, 90.0));
        // Y axis goes to Z under Rx(90), Z stays under Rz(90).
        assert!(approx(q * Vec3::Y, Vec3::Z));
    }

    #[test]
    fn translate_local_follows_rotation_and_scale() {
        let mut t = Transform::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 90.0), Vec3::splat(2.0));
        t.translate_local(Vec3::X);
        assert!(approx(t.translation, Vec3::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn in_parent_rotates_translation() {
        let t = Transform::from_translation(Vec3::X);
        let placed = t.in_parent(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 90.0));
        assert!(approx(placed.translation, Vec3::new(0.0, 1.0, 1.0)));
        assert!(approx(placed.rotation, Vec3::new(0.0, 0.0, 90.0)));
    }

    #[test]
    fn in_parent_without_rotation_only_translates() {
        let t = Transform::new(Vec3::ONE, Vec3::new(1.0, 2.0, 3.0), Vec3::splat(0.5));
        let placed = t.in_parent(Vec3::X, Vec3::ZERO);
        assert_eq!(placed.rotation, t.rotation);
        assert_eq!(placed.translation, Vec3::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn mint_matrix_carries_translation_in_last_column() {
        let t = Transform::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::splat(2.0));
        let m = t.to_mint_matrix();
        assert_eq!(m.w.x, 1.0);
        assert_eq!(m.w.y, 2.0);
        assert_eq!(m.w.z, 3.0);
        assert_eq!(m.x.x, 2.0);
    }

    #[test]
    fn to_affine_maps_origin_to_translation() {
        let t = Transform::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(
            t.to_affine().transform_point3(Vec3::ZERO),
            Vec3::new(1.0, 2.0, 3.0)
        );
    }
}
