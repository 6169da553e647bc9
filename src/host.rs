//! The environment the cube is embedded in.
//!
//! The viewport width follows a container element. On the web that is a DOM
//! element found by CSS selector. Natively the window itself plays the
//! container. Both are read through [`Host`] so the resize logic never touches
//! a platform API directly.

use std::sync::Arc;

use winit::window::Window;

/// Read access to the container size and display density.
pub trait Host {
    /// Current rendered width of the container in logical pixels.
    fn container_width(&self) -> u32;

    /// Physical pixels per logical pixel as reported by the display.
    fn device_pixel_ratio(&self) -> f64;
}

/// Native host: the window's logical inner width is the container width.
#[derive(Clone, Debug)]
pub struct WindowHost {
    window: Arc<Window>,
}

impl WindowHost {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl Host for WindowHost {
    fn container_width(&self) -> u32 {
        let scale = self.window.scale_factor();
        self.window.inner_size().to_logical::<u32>(scale).width
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.scale_factor()
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::DomHost;

#[cfg(target_arch = "wasm32")]
mod web {
    use anyhow::{Context as _, anyhow};
    use wasm_bindgen::JsCast;
    use web_sys::HtmlElement;

    use super::Host;

    /// Browser host: width of the first element matching a selector.
    #[derive(Clone, Debug)]
    pub struct DomHost {
        window: web_sys::Window,
        container: HtmlElement,
    }

    impl DomHost {
        pub fn new(container_selector: &str) -> anyhow::Result<Self> {
            let window = web_sys::window().context("no global `window`")?;
            let document = window.document().context("window has no document")?;
            let container = document
                .query_selector(container_selector)
                .map_err(|e| anyhow!("invalid selector {}: {:?}", container_selector, e))?
                .with_context(|| format!("no element matches {}", container_selector))?
                .dyn_into::<HtmlElement>()
                .map_err(|_| anyhow!("{} is not an HTML element", container_selector))?;
            Ok(Self { window, container })
        }
    }

    impl Host for DomHost {
        fn container_width(&self) -> u32 {
            self.container.offset_width().max(0) as u32
        }

        fn device_pixel_ratio(&self) -> f64 {
            self.window.device_pixel_ratio()
        }
    }
}
