//! Vertex types for 2D sprite rendering

use bytemuck::{Pod, Zeroable};

/// Textured, tinted 2D vertex in field coordinates
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl SpriteVertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }
}

/// Raw bytes for uploading a vertex batch
pub fn vertex_bytes(vertices: &[SpriteVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<SpriteVertex>(), 32);
        let vertices = [SpriteVertex::new(1.0, 2.0, 0.0, 1.0, [1.0; 4]); 3];
        assert_eq!(vertex_bytes(&vertices).len(), 96);
    }
}
