//! Rendering contract
//!
//! Produces sprite draw calls and vertex batches; the GPU side lives with the
//! render collaborator.

pub mod sprites;
pub mod vertex;

pub use sprites::{DrawCall, TextureId, batch_vertices, draw_calls, projection};
pub use vertex::{SpriteVertex, vertex_bytes};
