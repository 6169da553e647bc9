//! Render pipelines.
//!
//! Only the unlit `basic` pipeline is needed: one flat colour per mesh,
//! built once for line lists and once for triangle lists.

pub mod basic;
