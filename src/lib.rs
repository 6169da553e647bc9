//! wire-cube
//!
//! A red wireframe box spinning in front of a perspective camera, drawn with
//! wgpu into a winit window natively or into a canvas on the web. The drawing
//! area takes the width of its container and a fixed height, and it follows
//! the container when the host window is resized.
//!
//! High-level modules
//! - `config`: every tunable constant, with the classic demo as the default
//! - `context`: scene setup, the per-frame animation step and the resize handler
//! - `data_structures`: geometry, material, mesh, camera, viewport and scene
//! - `flow`: the winit event loop that drives the context
//! - `host`: container width and pixel density, from the DOM or the window
//! - `pipelines`: the unlit line and triangle pipelines
//! - `render`: the renderer seam and its wgpu implementation
//! - `resources`: GPU buffers for scene meshes
//! - `schedule`: "call me on the next refresh tick" as an injectable capability
//!

pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod host;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod schedule;

pub use cgmath;
pub use config::CubeConfig;
pub use context::Context;
pub use flow::run;

/// Browser entry point: runs the default cube as soon as the module loads.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() -> Result<(), wasm_bindgen::JsValue> {
    run(CubeConfig::default()).map_err(|e| wasm_bindgen::JsValue::from_str(&format!("{:#}", e)))
}
