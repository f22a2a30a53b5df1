//! WebGPU rendering of the pointer trail overlay
//!
//! `shapes` tessellates particles into pixel-space triangles; `pipeline`
//! uploads them and draws onto a transparent canvas above the page.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, TrailRenderState};
pub use vertex::Vertex;
