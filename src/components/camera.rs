//! Perspective camera component

use std::any::Any;

use cgmath::{perspective, Deg, Matrix4};
use serde::{Deserialize, Serialize};

use crate::scene::SceneError;

use super::Component;

/// Perspective projection settings. A scene designates one object carrying
/// this component as its main camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Clear color for the frame this camera renders, linear RGBA
    pub clear_color: [f32; 4],
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            clear_color: [0.08, 0.10, 0.12, 1.0],
        }
    }
}

impl Camera {
    pub const KIND: &'static str = "Camera";

    /// Projection matrix for the given viewport aspect ratio
    pub fn projection(&self, aspect: f32) -> Matrix4<f32> {
        perspective(Deg(self.fov_degrees), aspect, self.near_plane, self.far_plane)
    }
}

impl Component for Camera {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn to_value(&self) -> Result<serde_json::Value, SceneError> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_is_well_formed() {
        let camera = Camera::default();
        let proj = camera.projection(16.0 / 9.0);
        // Perspective matrices put -1 in the w-row for z
        assert_eq!(proj.z.w, -1.0);
        assert_eq!(proj.w.w, 0.0);
    }

    #[test]
    fn serde_round_trip() {
        let camera = Camera {
            fov_degrees: 75.0,
            ..Camera::default()
        };
        let value = serde_json::to_value(camera).unwrap();
        let back: Camera = serde_json::from_value(value).unwrap();
        assert_eq!(back, camera);
    }
}
