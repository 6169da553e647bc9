/**
 * GPU-side resources created from scene data.
 */
pub mod mesh;
