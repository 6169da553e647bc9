//! Renderable mesh: shape, surface and orientation.

use cgmath::{Matrix4, Rad};

use crate::data_structures::{geometry::BoxGeometry, material::BasicMaterial};

/// Euler angles in radians, applied in XYZ order.
///
/// The angles are plain accumulators. They are never wrapped into `[0, 2π)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Rotation {
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_x(Rad(self.x))
            * Matrix4::from_angle_y(Rad(self.y))
            * Matrix4::from_angle_z(Rad(self.z))
    }
}

#[derive(Clone, Debug)]
pub struct Mesh {
    pub geometry: BoxGeometry,
    pub material: BasicMaterial,
    pub rotation: Rotation,
}

impl Mesh {
    pub fn new(geometry: BoxGeometry, material: BasicMaterial) -> Self {
        Self {
            geometry,
            material,
            rotation: Rotation::default(),
        }
    }

    /// Object-to-world transform. The mesh sits at the origin, so this is the rotation alone.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.rotation.to_matrix()
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{SquareMatrix, Vector4};

    use super::*;

    #[test]
    fn zero_rotation_is_identity() {
        assert_eq!(Rotation::default().to_matrix(), Matrix4::identity());
    }

    #[test]
    fn x_is_applied_last() {
        // Rx * Ry: y=90° sends +z to +x, which x rotation leaves alone.
        let rotation = Rotation {
            x: std::f32::consts::FRAC_PI_2,
            y: std::f32::consts::FRAC_PI_2,
            z: 0.0,
        };
        let v = rotation.to_matrix() * Vector4::new(0.0, 0.0, 1.0, 0.0);
        assert!((v.x - 1.0).abs() < 1e-6, "{:?}", v);
        assert!(v.y.abs() < 1e-6 && v.z.abs() < 1e-6, "{:?}", v);
    }
}
