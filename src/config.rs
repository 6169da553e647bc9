//! Tunables for the scene, the render loop and the host bindings.
//!
//! Every constant the cube needs lives in [`CubeConfig`]. The defaults
//! reproduce the classic demo: a 1x1x1 red wireframe box with two segments per
//! axis, a 75° camera two units back, a 300px tall viewport and a rotation of
//! 0.01 rad per frame on x and y.
//!
//! The fixed height and the rotation step are arbitrary picks. Nothing in the
//! scene depends on their particular values.

/// Scene, loop and host configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct CubeConfig {
    /// Viewport height in logical pixels. The width always follows the container.
    pub viewport_height: u32,
    /// Radians added to the x and y rotation every frame.
    pub rotation_step: f32,
    /// Upper bound for the renderer's pixel ratio on high-density displays.
    pub max_pixel_ratio: f64,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Distance of the camera from the origin along +z.
    pub camera_depth: f32,
    /// Box width, height and depth.
    pub box_size: [f32; 3],
    /// Box subdivisions along x, y and z.
    pub box_segments: [u32; 3],
    /// Wireframe colour as 0xRRGGBB.
    pub colour: u32,
    pub clear_colour: wgpu::Color,
    /// CSS selector of the element whose width drives the viewport (web only).
    pub container_selector: String,
    /// CSS selector of the canvas the renderer draws into (web only).
    pub canvas_selector: String,
    /// Window title (native only).
    pub title: String,
    /// Initial window width in logical pixels (native only).
    pub initial_width: u32,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            viewport_height: 300,
            rotation_step: 0.01,
            max_pixel_ratio: 2.0,
            fov: 75.0,
            near: 0.1,
            far: 2000.0,
            camera_depth: 2.0,
            box_size: [1.0, 1.0, 1.0],
            box_segments: [2, 2, 2],
            colour: 0xff0000,
            clear_colour: wgpu::Color::BLACK,
            container_selector: ".canvas-container".to_string(),
            canvas_selector: ".webgl".to_string(),
            title: "wire-cube".to_string(),
            initial_width: 600,
        }
    }
}
