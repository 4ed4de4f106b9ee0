//! Point lights owned by the scene

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

/// A point light: world position, linear RGB color, and falloff range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vector3<f32>,
    pub color: Vector3<f32>,
    pub range: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 3.0),
            color: Vector3::new(1.0, 1.0, 1.0),
            range: 10.0,
        }
    }
}

impl Light {
    pub fn new(position: Vector3<f32>, color: Vector3<f32>, range: f32) -> Self {
        Self {
            position,
            color,
            range,
        }
    }
}
