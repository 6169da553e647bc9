//! Drawing a [`Scene`] through a [`PerspectiveCamera`].
//!
//! [`Renderer`] is the seam between the cube's logic and the GPU. The context
//! only ever talks to the trait, which keeps setup, animation and resizing
//! testable with a recording stand-in.
//!
//! [`WgpuRenderer`] is the real implementation. It owns the output surface, a
//! line-list pipeline, and one [`GpuMesh`] per scene mesh.
//! Meshes are uploaded lazily on the first frame that sees them.
//!
//! # Sizing
//!
//! The renderer is sized in logical pixels. The backing surface is
//! `floor(size * pixel_ratio)` physical pixels, clamped per side to the
//! device's `max_texture_dimension_2d`. A zero-area surface is never
//! configured, and frames are skipped until a non-zero size arrives.

use std::sync::Arc;

use anyhow::Context as _;
use winit::{dpi::LogicalSize, window::Window};

use crate::{
    data_structures::{camera::PerspectiveCamera, scene_graph::Scene, viewport::ViewportSize},
    pipelines::basic::mk_basic_pipeline,
    resources::mesh::{GpuMesh, mesh_bind_group_layout},
};

pub trait Renderer {
    /// Resize the output to `width` x `height` logical pixels.
    fn set_size(&mut self, width: u32, height: u32);

    /// Physical pixels per logical pixel of the output.
    fn set_pixel_ratio(&mut self, ratio: f64);

    fn size(&self) -> ViewportSize;

    fn pixel_ratio(&self) -> f64;

    /// Draw one frame.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera)
    -> Result<(), wgpu::SurfaceError>;

    /// Rebuild the output at the current size after it was lost or went stale.
    fn reconfigure(&mut self) {}
}

#[derive(Debug)]
enum Target {
    Surface {
        surface: wgpu::Surface<'static>,
        config: wgpu::SurfaceConfiguration,
    },
    #[cfg(feature = "integration-tests")]
    Texture { texture: Option<wgpu::Texture> },
}

#[derive(Debug)]
pub struct WgpuRenderer {
    window: Option<Arc<Window>>,
    target: Target,
    device: wgpu::Device,
    queue: wgpu::Queue,
    format: wgpu::TextureFormat,
    mesh_layout: wgpu::BindGroupLayout,
    wireframe_pipeline: wgpu::RenderPipeline,
    meshes: Vec<GpuMesh>,
    clear_colour: wgpu::Color,
    size: ViewportSize,
    pixel_ratio: f64,
    is_configured: bool,
}

impl WgpuRenderer {
    /// Bind a renderer to the window's surface. The surface stays unconfigured
    /// until the first [`set_size`](Renderer::set_size).
    pub async fn new(window: Arc<Window>, clear_colour: wgpu::Color) -> anyhow::Result<Self> {
        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no graphics adapter can present to the window")?;
        let (device, queue) = request_device(&adapter).await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("the surface reports no texture formats")?;
        let inner = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: inner.width.max(1),
            height: inner.height.max(1),
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let target = Target::Surface { surface, config };
        let mut renderer = Self::with_target(target, device, queue, format, clear_colour);
        renderer.window = Some(window);
        Ok(renderer)
    }

    /// Render into an offscreen texture instead of a window, for golden image tests.
    #[cfg(feature = "integration-tests")]
    pub async fn offscreen(clear_colour: wgpu::Color) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions::default())
            .await
            .context("no graphics adapter available for offscreen rendering")?;
        let (device, queue) = request_device(&adapter).await?;
        let target = Target::Texture { texture: None };
        Ok(Self::with_target(
            target,
            device,
            queue,
            wgpu::TextureFormat::Rgba8UnormSrgb,
            clear_colour,
        ))
    }

    fn with_target(
        target: Target,
        device: wgpu::Device,
        queue: wgpu::Queue,
        format: wgpu::TextureFormat,
        clear_colour: wgpu::Color,
    ) -> Self {
        let mesh_layout = mesh_bind_group_layout(&device);
        let wireframe_pipeline = mk_basic_pipeline(&device, &mesh_layout, format);
        Self {
            window: None,
            target,
            device,
            queue,
            format,
            mesh_layout,
            wireframe_pipeline,
            meshes: Vec::new(),
            clear_colour,
            size: ViewportSize::new(0, 0),
            pixel_ratio: 1.0,
            is_configured: false,
        }
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Largest width or height the backing surface can take on this device.
    pub fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    /// Physical size of the backing surface.
    pub fn physical_size(&self) -> [u32; 2] {
        let max = self.max_texture_dimension();
        self.size.physical(self.pixel_ratio).map(|side| side.min(max))
    }

    fn configure(&mut self) {
        let [width, height] = self.physical_size();
        if self.size.physical(self.pixel_ratio) != [width, height] {
            log::warn!(
                "Output of {:?} at pixel ratio {} exceeds the device limit, using {}x{}",
                self.size,
                self.pixel_ratio,
                width,
                height
            );
        }
        if width == 0 || height == 0 {
            log::debug!("Skipping surface configuration for a {}x{} output", width, height);
            self.is_configured = false;
            return;
        }
        match &mut self.target {
            Target::Surface { surface, config } => {
                config.width = width;
                config.height = height;
                surface.configure(&self.device, config);
            }
            #[cfg(feature = "integration-tests")]
            Target::Texture { texture } => {
                *texture = Some(self.device.create_texture(&wgpu::TextureDescriptor {
                    label: Some("Offscreen Target"),
                    size: wgpu::Extent3d {
                        width,
                        height,
                        depth_or_array_layers: 1,
                    },
                    mip_level_count: 1,
                    sample_count: 1,
                    dimension: wgpu::TextureDimension::D2,
                    format: self.format,
                    usage: wgpu::TextureUsages::COPY_SRC
                        | wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                }));
            }
        }
        self.is_configured = true;
    }

    fn upload_new_meshes(&mut self, scene: &Scene, camera: &PerspectiveCamera) {
        // Scenes only grow, so everything past our last upload is new.
        for mesh in &scene.meshes()[self.meshes.len()..] {
            self.meshes.push(GpuMesh::upload(
                &self.device,
                &self.mesh_layout,
                mesh,
                camera,
            ));
        }
    }

    fn draw(&self, view: &wgpu::TextureView) {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.wireframe_pipeline);
            for mesh in &self.meshes {
                render_pass.set_bind_group(0, &mesh.bind_group, &[]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.num_elements, 0, 0..1);
            }
        }
        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Copy the offscreen target back to the CPU as tightly packed RGBA8 rows.
    #[cfg(feature = "integration-tests")]
    pub async fn read_pixels(&self) -> anyhow::Result<(u32, u32, Vec<u8>)> {
        let texture = match &self.target {
            Target::Texture {
                texture: Some(texture),
            } if self.is_configured => texture,
            _ => anyhow::bail!("read_pixels needs a configured offscreen renderer"),
        };
        let [width, height] = self.physical_size();
        let unpadded_row = 4 * width;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_row = unpadded_row.div_ceil(align) * align;

        let output_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Readback Buffer"),
            size: (padded_row * height) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Readback Encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
        let buffer_slice = output_buffer.slice(..);
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            tx.send(result).ok();
        });
        self.device
            .poll(wgpu::PollType::Wait)
            .context("device lost while waiting for the readback")?;
        rx.receive()
            .await
            .context("readback callback was dropped")?
            .context("failed to map the readback buffer")?;

        let data = buffer_slice.get_mapped_range();
        let pixels = data
            .chunks(padded_row as usize)
            .flat_map(|row| &row[..unpadded_row as usize])
            .copied()
            .collect();
        drop(data);
        output_buffer.unmap();
        Ok((width, height, pixels))
    }
}

async fn request_device(adapter: &wgpu::Adapter) -> anyhow::Result<(wgpu::Device, wgpu::Queue)> {
    // WebGL doesn't support all of wgpu's features, so if
    // we're building for the web we'll have to disable some.
    let base_limits = if cfg!(target_arch = "wasm32") {
        wgpu::Limits::downlevel_webgl2_defaults()
    } else {
        wgpu::Limits::default()
    };
    // Allow surfaces as large as the adapter supports.
    let required_limits = base_limits.using_resolution(adapter.limits());
    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: None,
            required_features: wgpu::Features::empty(),
            required_limits,
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
        })
        .await
        .context("failed to acquire a graphics device")
}

impl Renderer for WgpuRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.size = ViewportSize::new(width, height);
        if let Some(window) = &self.window {
            // The request may be ignored (e.g. a maximised window); the
            // surface is configured from our own size either way.
            let _ = window.request_inner_size(LogicalSize::new(width, height));
        }
        self.configure();
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
        self.configure();
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
        // Rendering requires the surface to be configured
        if !self.is_configured {
            return Ok(());
        }

        self.upload_new_meshes(scene, camera);
        for (gpu_mesh, mesh) in self.meshes.iter().zip(scene.meshes()) {
            gpu_mesh.write_uniform(&self.queue, mesh, camera);
        }

        match &self.target {
            Target::Surface { surface, .. } => {
                let output = surface.get_current_texture()?;
                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                self.draw(&view);
                output.present();
            }
            #[cfg(feature = "integration-tests")]
            Target::Texture { texture } => {
                if let Some(texture) = texture {
                    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
                    self.draw(&view);
                }
            }
        }
        Ok(())
    }

    fn reconfigure(&mut self) {
        log::warn!("Surface lost or outdated, reconfiguring");
        self.configure();
    }
}
