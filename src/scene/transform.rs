//! Local transform: position, Euler rotation, and non-uniform scale.
//!
//! The whole crate is Z-up. Rotations are Euler angles in degrees applied
//! in Z·Y·X order, so with zero rotation an object faces +X, `rotation.z`
//! is yaw and `rotation.y` is (negated) pitch.

use cgmath::{Deg, InnerSpace, Matrix4, Vector3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vector3<f32>,
    /// Euler angles in degrees, applied Z·Y·X
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn from_position(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Local transformation matrix: translation · rotation · scale
    pub fn local_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_z(Deg(self.rotation.z))
            * Matrix4::from_angle_y(Deg(self.rotation.y))
            * Matrix4::from_angle_x(Deg(self.rotation.x))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Unit vector this transform faces (+X under zero rotation)
    pub fn forward(&self) -> Vector3<f32> {
        let yaw = self.rotation.z.to_radians();
        let pitch = self.rotation.y.to_radians();
        Vector3::new(
            pitch.cos() * yaw.cos(),
            pitch.cos() * yaw.sin(),
            -pitch.sin(),
        )
    }

    /// Points the transform at a world-space target by solving yaw and
    /// pitch. Roll is reset. Does nothing if the target coincides with the
    /// current position.
    pub fn look_at(&mut self, target: Vector3<f32>) {
        let dir = target - self.position;
        if dir.magnitude2() <= f32::EPSILON {
            return;
        }
        let f = dir.normalize();
        self.rotation.x = 0.0;
        self.rotation.y = f.z.asin().to_degrees() * -1.0;
        self.rotation.z = f.y.atan2(f.x).to_degrees();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{vec3, vec4};

    fn assert_vec_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn default_is_identity() {
        let m = Transform::default().local_matrix();
        let p = m * vec4(1.0, 2.0, 3.0, 1.0);
        assert_vec_close(p.truncate(), vec3(1.0, 2.0, 3.0));
    }

    #[test]
    fn matrix_applies_scale_then_rotation_then_translation() {
        let t = Transform {
            position: vec3(10.0, 0.0, 0.0),
            rotation: vec3(0.0, 0.0, 90.0),
            scale: vec3(2.0, 1.0, 1.0),
        };
        // (1,0,0) scaled to (2,0,0), yawed 90° to (0,2,0), moved to (10,2,0)
        let p = t.local_matrix() * vec4(1.0, 0.0, 0.0, 1.0);
        assert_vec_close(p.truncate(), vec3(10.0, 2.0, 0.0));
    }

    #[test]
    fn look_at_faces_the_target() {
        let mut t = Transform::from_position(vec3(-3.8, 0.1, 6.25));
        let target = vec3(1.5, 0.0, 4.0);
        t.look_at(target);
        assert_vec_close(t.forward(), (target - t.position).normalize());
    }

    #[test]
    fn look_at_straight_down() {
        let mut t = Transform::from_position(vec3(0.0, 0.0, 5.0));
        t.look_at(vec3(0.0, 0.0, 0.0));
        assert_vec_close(t.forward(), vec3(0.0, 0.0, -1.0));
    }

    #[test]
    fn look_at_self_is_a_no_op() {
        let mut t = Transform::from_position(vec3(1.0, 2.0, 3.0));
        t.rotation = vec3(0.0, 15.0, 30.0);
        t.look_at(vec3(1.0, 2.0, 3.0));
        assert_eq!(t.rotation, vec3(0.0, 15.0, 30.0));
    }
}
