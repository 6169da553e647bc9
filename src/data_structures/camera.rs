//! Perspective camera.
//!
//! The projection matrix is cached. Changing [`PerspectiveCamera::aspect`] (or
//! any other lens field) has no effect on rendering until
//! [`PerspectiveCamera::update_projection_matrix`] runs.

use cgmath::{Deg, Matrix4, Point3, SquareMatrix, Vector3};

/// cgmath builds OpenGL clip space (z in -1..1); wgpu expects z in 0..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Point3<f32>,
    projection: Matrix4<f32>,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            position: Point3::new(0.0, 0.0, 0.0),
            projection: Matrix4::identity(),
        };
        camera.update_projection_matrix();
        camera
    }

    /// Recompute the cached projection from the current lens fields.
    ///
    /// A non-positive or non-finite aspect (a zero-width container) leaves the
    /// previous projection in place.
    pub fn update_projection_matrix(&mut self) {
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            log::warn!(
                "Aspect ratio {} cannot be projected, keeping the previous projection",
                self.aspect
            );
            return;
        }
        self.projection = OPENGL_TO_WGPU_MATRIX
            * cgmath::perspective(Deg(self.fov), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection
    }

    /// World-to-camera transform. The camera looks down -z from its position.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(-Vector3::new(
            self.position.x,
            self.position.y,
            self.position.z,
        ))
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector4;

    use super::*;

    #[test]
    fn projection_is_stale_until_updated() {
        let mut camera = PerspectiveCamera::new(75.0, 2.0, 0.1, 2000.0);
        let before = camera.projection_matrix();
        camera.aspect = 3.0;
        assert_eq!(camera.projection_matrix(), before);
        camera.update_projection_matrix();
        assert_ne!(camera.projection_matrix(), before);
    }

    #[test]
    fn projection_scales_x_by_aspect() {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 2000.0);
        let square = camera.projection_matrix();
        camera.aspect = 2.0;
        camera.update_projection_matrix();
        let wide = camera.projection_matrix();
        assert!((square.x.x / wide.x.x - 2.0).abs() < 1e-5);
        assert_eq!(square.y.y, wide.y.y);
    }

    #[test]
    fn zero_aspect_keeps_previous_projection() {
        let mut camera = PerspectiveCamera::new(75.0, 2.0, 0.1, 2000.0);
        let before = camera.projection_matrix();
        camera.aspect = 0.0;
        camera.update_projection_matrix();
        assert_eq!(camera.projection_matrix(), before);
    }

    #[test]
    fn origin_lands_in_front_of_the_camera() {
        let mut camera = PerspectiveCamera::new(75.0, 2.0, 0.1, 2000.0);
        camera.position.z = 2.0;
        let clip = camera.view_projection() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        let ndc_z = clip.z / clip.w;
        assert!(clip.w > 0.0);
        assert!((0.0..=1.0).contains(&ndc_z), "{}", ndc_z);
        assert!((clip.x / clip.w).abs() < 1e-6 && (clip.y / clip.w).abs() < 1e-6);
    }
}
