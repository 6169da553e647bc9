//! Scene data: everything the renderer reads each frame.
//!
//! - `geometry` tessellates the box shape
//! - `material` holds the flat wireframe colour
//! - `mesh` pairs geometry with material and carries the rotation
//! - `camera` is the perspective camera and its cached projection
//! - `viewport` is the logical drawing size
//! - `scene_graph` owns the meshes

pub mod camera;
pub mod geometry;
pub mod material;
pub mod mesh;
pub mod scene_graph;
pub mod viewport;
