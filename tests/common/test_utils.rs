use std::cell::Cell;

use wire_cube::{
    data_structures::{
        camera::PerspectiveCamera, mesh::Rotation, scene_graph::Scene, viewport::ViewportSize,
    },
    host::Host,
    render::Renderer,
};

/// A container whose width and pixel density the test controls.
pub(crate) struct FakeHost {
    width: Cell<u32>,
    device_pixel_ratio: Cell<f64>,
}

impl FakeHost {
    pub fn new(width: u32) -> Self {
        Self {
            width: Cell::new(width),
            device_pixel_ratio: Cell::new(1.0),
        }
    }

    pub fn with_pixel_ratio(self, ratio: f64) -> Self {
        self.device_pixel_ratio.set(ratio);
        self
    }

    pub fn set_width(&self, width: u32) {
        self.width.set(width);
    }

    #[allow(dead_code)]
    pub fn set_pixel_ratio(&self, ratio: f64) {
        self.device_pixel_ratio.set(ratio);
    }
}

impl Host for FakeHost {
    fn container_width(&self) -> u32 {
        self.width.get()
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio.get()
    }
}

/// What the recording renderer saw on one `render` call.
#[derive(Clone, Debug)]
#[allow(dead_code)]
pub(crate) struct Frame {
    pub rotation: Rotation,
    pub aspect: f32,
    pub meshes: usize,
}

/// Renderer stand-in that keeps every call instead of drawing.
#[derive(Debug)]
pub(crate) struct RecordingRenderer {
    size: ViewportSize,
    pixel_ratio: f64,
    pub set_size_calls: Vec<(u32, u32)>,
    pub pixel_ratio_calls: Vec<f64>,
    pub frames: Vec<Frame>,
    pub reconfigurations: u32,
    /// Errors handed out by the next `render` calls, front first.
    pub failures: Vec<wgpu::SurfaceError>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            size: ViewportSize::new(0, 0),
            pixel_ratio: 1.0,
            set_size_calls: Vec::new(),
            pixel_ratio_calls: Vec::new(),
            frames: Vec::new(),
            reconfigurations: 0,
            failures: Vec::new(),
        }
    }
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for RecordingRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.size = ViewportSize::new(width, height);
        self.set_size_calls.push((width, height));
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
        self.pixel_ratio_calls.push(ratio);
    }

    fn size(&self) -> ViewportSize {
        self.size
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
    ) -> Result<(), wgpu::SurfaceError> {
        self.frames.push(Frame {
            rotation: scene.meshes()[0].rotation,
            aspect: camera.aspect,
            meshes: scene.len(),
        });
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(self.failures.remove(0))
        }
    }

    fn reconfigure(&mut self) {
        self.reconfigurations += 1;
    }
}

#[allow(dead_code)]
pub(crate) fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}
