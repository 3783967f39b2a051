//! wgpu rendering module
//!
//! Scene geometry is built on the CPU in canvas pixels, then mapped to NDC and
//! drawn as a single triangle list.

pub mod layout;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use layout::DrawLayout;
pub use pipeline::{RenderError, RenderState};
pub use scene::build_frame;
pub use vertex::Vertex;
