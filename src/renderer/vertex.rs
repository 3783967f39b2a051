//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex in canvas pixels with color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for scene elements
pub mod colors {
    pub const TRACK_DOT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const TRACK_LINE: [f32; 4] = [0.85, 0.85, 0.85, 1.0];
    pub const BALL_RUNNING: [f32; 4] = [0.3, 0.8, 1.0, 1.0];
    pub const BALL_FINISHED: [f32; 4] = [0.3, 1.0, 0.4, 1.0];
    pub const BALL_STALLED: [f32; 4] = [1.0, 0.35, 0.25, 1.0];
    pub const BALL_STRIPE: [f32; 4] = [0.05, 0.05, 0.1, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
