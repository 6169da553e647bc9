//! Application event loop.
//!
//! [`run`] hands a winit [`ApplicationHandler`] to the platform event loop.
//! The handler owns the window and wires the host's two signals into the
//! [`Context`]:
//!
//! - `RedrawRequested` → [`Context::animate`], which requests the next redraw
//! - a host resize → [`Context::resize`]
//!
//! Natively the window is the container, so `WindowEvent::Resized` is the
//! resize signal and GPU setup blocks on a tokio runtime. On the web the canvas
//! and the container are found by CSS selector. The resize signal is the DOM
//! `resize` event on `window`, forwarded into the event loop as a user event.
//! GPU setup runs on `spawn_local` and reports back the same way.

use std::sync::Arc;

use anyhow::Context as _;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

use crate::{
    config::CubeConfig,
    context::Context,
    render::WgpuRenderer,
    schedule::WindowScheduler,
};

#[cfg(not(target_arch = "wasm32"))]
type PlatformHost = crate::host::WindowHost;
#[cfg(target_arch = "wasm32")]
type PlatformHost = crate::host::DomHost;

/// Widest native window we allow while the height is pinned.
#[cfg(not(target_arch = "wasm32"))]
const MAX_WINDOW_WIDTH: u32 = 8192;

pub(crate) enum CubeEvent {
    /// GPU setup finished on the web.
    #[allow(dead_code)]
    RendererReady(WgpuRenderer),
    /// The DOM window fired `resize`.
    #[allow(dead_code)]
    HostResized,
}

impl std::fmt::Debug for CubeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RendererReady(_) => f.write_str("RendererReady"),
            Self::HostResized => f.write_str("HostResized"),
        }
    }
}

/// The window and its bindings, present once `resumed` has run.
struct Shell {
    window: Arc<Window>,
    host: PlatformHost,
    scheduler: WindowScheduler,
}

pub(crate) struct App {
    config: CubeConfig,
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: EventLoopProxy<CubeEvent>,
    shell: Option<Shell>,
    ctx: Option<Context<WgpuRenderer>>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(event_loop: &EventLoop<CubeEvent>, config: CubeConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()
                .context("failed to start the async runtime")?,
            proxy: event_loop.create_proxy(),
            shell: None,
            ctx: None,
            error: None,
        })
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title(&self.config.title);

        #[cfg(not(target_arch = "wasm32"))]
        {
            use winit::dpi::LogicalSize;

            let height = self.config.viewport_height;
            window_attributes = window_attributes
                .with_inner_size(LogicalSize::new(self.config.initial_width, height))
                .with_min_inner_size(LogicalSize::new(1, height))
                .with_max_inner_size(LogicalSize::new(MAX_WINDOW_WIDTH, height));
        }

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowAttributesExtWebSys;

            window_attributes = window_attributes.with_canvas(Some(find_canvas(
                &self.config.canvas_selector,
            )?));
        }

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create the window")?,
        );

        #[cfg(not(target_arch = "wasm32"))]
        let host = crate::host::WindowHost::new(window.clone());
        #[cfg(target_arch = "wasm32")]
        let host = crate::host::DomHost::new(&self.config.container_selector)?;

        let renderer = WgpuRenderer::new(window.clone(), self.config.clear_colour);

        #[cfg(not(target_arch = "wasm32"))]
        {
            let renderer = self.async_runtime.block_on(renderer)?;
            self.ctx = Some(Context::new(self.config.clone(), &host, renderer));
            window.request_redraw();
        }

        #[cfg(target_arch = "wasm32")]
        {
            listen_for_resize(self.proxy.clone())?;
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match renderer.await {
                    Ok(renderer) => {
                        if proxy.send_event(CubeEvent::RendererReady(renderer)).is_err() {
                            log::error!("Event loop closed before the renderer was ready");
                        }
                    }
                    Err(e) => log::error!("Renderer setup failed: {:#}", e),
                }
            });
        }

        self.shell = Some(Shell {
            scheduler: WindowScheduler::new(window.clone()),
            window,
            host,
        });
        Ok(())
    }
}

impl ApplicationHandler<CubeEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.shell.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("Initialization failed: {:#}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: CubeEvent) {
        let Some(shell) = &self.shell else {
            return;
        };
        match event {
            CubeEvent::RendererReady(renderer) => {
                self.ctx = Some(Context::new(self.config.clone(), &shell.host, renderer));
                // Kick off the render loop now that we are initialized
                shell.window.request_redraw();
            }
            CubeEvent::HostResized => {
                if let Some(ctx) = &mut self.ctx {
                    ctx.resize(&shell.host);
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            event_loop.exit();
            return;
        }
        let (Some(shell), Some(ctx)) = (&self.shell, &mut self.ctx) else {
            return;
        };

        match event {
            // On the web the DOM resize listener is the signal instead.
            #[cfg(not(target_arch = "wasm32"))]
            WindowEvent::Resized(_) => ctx.resize(&shell.host),
            WindowEvent::RedrawRequested => ctx.animate(&shell.scheduler),
            _ => {}
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn find_canvas(selector: &str) -> anyhow::Result<web_sys::HtmlCanvasElement> {
    use anyhow::anyhow;
    use wasm_bindgen::JsCast;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .context("no document to look up the canvas in")?;
    document
        .query_selector(selector)
        .map_err(|e| anyhow!("invalid selector {}: {:?}", selector, e))?
        .with_context(|| format!("no element matches {}", selector))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| anyhow!("{} is not a canvas", selector))
}

/// Forward the DOM `resize` event into the event loop for the rest of the page's life.
#[cfg(target_arch = "wasm32")]
fn listen_for_resize(proxy: EventLoopProxy<CubeEvent>) -> anyhow::Result<()> {
    use anyhow::anyhow;
    use wasm_bindgen::{JsCast, closure::Closure};

    let window = web_sys::window().context("no global `window`")?;
    let on_resize = Closure::<dyn FnMut()>::new(move || {
        if proxy.send_event(CubeEvent::HostResized).is_err() {
            log::warn!("Resize after the event loop closed");
        }
    });
    window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .map_err(|e| anyhow!("failed to listen for resize: {:?}", e))?;
    on_resize.forget();
    Ok(())
}

fn init_logger() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Could not initialize logger: {}", e).into());
        }
    }
}

/// Open the window (or bind the canvas) and spin the cube until the host shuts down.
pub fn run(config: CubeConfig) -> anyhow::Result<()> {
    init_logger();

    let event_loop: EventLoop<CubeEvent> = EventLoop::with_user_event()
        .build()
        .context("failed to create an event loop")?;
    #[allow(unused_mut)]
    let mut app = App::new(&event_loop, config)?;

    #[cfg(not(target_arch = "wasm32"))]
    {
        event_loop.run_app(&mut app)?;
        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        use winit::platform::web::EventLoopExtWebSys;

        event_loop.spawn_app(app);
        Ok(())
    }
}
