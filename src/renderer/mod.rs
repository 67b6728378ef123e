//! WebGPU rendering module
//!
//! Uses SDF (Signed Distance Fields) for all rendering in the fragment shader.
//! `sprites` turns a run into the flat rect list the shader consumes.

pub mod sdf_pipeline;
pub mod sprites;

pub use sdf_pipeline::SdfRenderState;
pub use sprites::{RectData, Shape, Sprite, build_rects};
