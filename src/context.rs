//! The cube's state and the three routines that act on it.
//!
//! [`Context`] owns the scene, the camera, the renderer and the viewport size.
//! [`Context::new`] builds it once. After that the host drives it with two
//! kinds of callback, always on the same thread:
//!
//! - [`Context::animate`] on every refresh tick
//! - [`Context::resize`] whenever the host window changes size
//!
//! A resize never overlaps a frame. After setup and after every resize,
//! `camera.aspect == sizes.width / sizes.height`.

use instant::Instant;

use crate::{
    config::CubeConfig,
    data_structures::{
        camera::PerspectiveCamera,
        geometry::BoxGeometry,
        material::BasicMaterial,
        mesh::Mesh,
        scene_graph::{MeshId, Scene},
        viewport::ViewportSize,
    },
    host::Host,
    render::Renderer,
    schedule::FrameScheduler,
};

#[derive(Debug)]
pub struct Context<R: Renderer> {
    pub scene: Scene,
    /// The rotating box inside `scene`.
    pub cube: MeshId,
    pub camera: PerspectiveCamera,
    pub renderer: R,
    pub sizes: ViewportSize,
    config: CubeConfig,
    frames: u64,
    last_frame: Instant,
}

impl<R: Renderer> Context<R> {
    /// Build the scene around `renderer`, which must already be bound to its
    /// output surface, and size everything to the host container.
    ///
    /// The pixel ratio is left at the renderer's default. Only
    /// [`resize`](Self::resize) applies the device pixel ratio.
    pub fn new(config: CubeConfig, host: &impl Host, mut renderer: R) -> Self {
        let geometry = BoxGeometry::new(config.box_size, config.box_segments);
        let material = BasicMaterial::wireframe(config.colour);
        let mut scene = Scene::new();
        let cube = scene.add(Mesh::new(geometry, material));

        let sizes = ViewportSize::new(host.container_width(), config.viewport_height);

        let mut camera =
            PerspectiveCamera::new(config.fov, sizes.aspect(), config.near, config.far);
        camera.position.z = config.camera_depth;

        renderer.set_size(sizes.width, sizes.height);

        log::info!(
            "Scene ready: {}x{} viewport, aspect {}",
            sizes.width,
            sizes.height,
            camera.aspect
        );

        Self {
            scene,
            cube,
            camera,
            renderer,
            sizes,
            config,
            frames: 0,
            last_frame: Instant::now(),
        }
    }

    /// One iteration of the render loop.
    ///
    /// Requests the next tick first, so the loop keeps going even when this
    /// frame fails to draw. Rotation advances by a fixed step per call,
    /// independent of how much wall-clock time passed.
    pub fn animate(&mut self, scheduler: &impl FrameScheduler) {
        scheduler.request_frame();

        let step = self.config.rotation_step;
        let cube = self.scene.mesh_mut(self.cube);
        cube.rotation.x += step;
        cube.rotation.y += step;

        match self.renderer.render(&self.scene, &self.camera) {
            Ok(()) => {}
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.renderer.reconfigure();
            }
            Err(e) => log::error!("Unable to render {}", e),
        }

        self.frames += 1;
        log::trace!(
            "frame {} took {:?}",
            self.frames,
            self.last_frame.elapsed()
        );
        self.last_frame = Instant::now();
    }

    /// Re-sync camera and renderer with the host container.
    pub fn resize(&mut self, host: &impl Host) {
        self.sizes.width = host.container_width();

        self.camera.aspect = self.sizes.aspect();
        self.camera.update_projection_matrix();

        self.renderer.set_size(self.sizes.width, self.sizes.height);
        self.renderer
            .set_pixel_ratio(host.device_pixel_ratio().min(self.config.max_pixel_ratio));

        log::debug!(
            "Resized to {}x{} at pixel ratio {}",
            self.sizes.width,
            self.sizes.height,
            self.renderer.pixel_ratio()
        );
    }

    pub fn cube(&self) -> &Mesh {
        self.scene.mesh(self.cube)
    }

    /// Frames rendered since setup.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn config(&self) -> &CubeConfig {
        &self.config
    }
}
