//! Reference lines drawn under the block: XYZ axes and a ground grid.

use bytemuck::{Pod, Zeroable};
use wgpu::{VertexBufferLayout, VertexStepMode};

/// Vertex: position + color.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub pos: [f32; 3],
    pub color: [f32; 3],
}

impl LineVertex {
    pub const LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
        array_stride: std::mem::size_of::<LineVertex>() as u64,
        step_mode: VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
    };

    const fn new(pos: [f32; 3], color: [f32; 3]) -> Self {
        Self { pos, color }
    }
}

pub const AXIS_EXTENT: f32 = 10.0;
pub const GRID_HALF_EXTENT: i32 = 10;

pub const AXIS_X_COLOR: [f32; 3] = [1.0, 0.0, 0.0];
pub const AXIS_Y_COLOR: [f32; 3] = [0.0, 1.0, 0.0];
pub const AXIS_Z_COLOR: [f32; 3] = [0.0, 0.5, 1.0];
pub const GRID_COLOR: [f32; 3] = [0.4, 0.4, 0.4];

/// Three segments through the origin, one per axis.
pub fn axis_lines() -> Vec<LineVertex> {
    let e = AXIS_EXTENT;
    vec![
        LineVertex::new([-e, 0.0, 0.0], AXIS_X_COLOR),
        LineVertex::new([e, 0.0, 0.0], AXIS_X_COLOR),
        LineVertex::new([0.0, -e, 0.0], AXIS_Y_COLOR),
        LineVertex::new([0.0, e, 0.0], AXIS_Y_COLOR),
        LineVertex::new([0.0, 0.0, -e], AXIS_Z_COLOR),
        LineVertex::new([0.0, 0.0, e], AXIS_Z_COLOR),
    ]
}

/// Unit-spaced grid on the XZ plane covering `[-half_extent, half_extent]`.
pub fn grid_lines(half_extent: i32) -> Vec<LineVertex> {
    let extent = half_extent as f32;
    let mut verts = Vec::with_capacity((2 * half_extent as usize + 1) * 4);
    for i in -half_extent..=half_extent {
        let offset = i as f32;
        // along Z
        verts.push(LineVertex::new([offset, 0.0, -extent], GRID_COLOR));
        verts.push(LineVertex::new([offset, 0.0, extent], GRID_COLOR));
        // along X
        verts.push(LineVertex::new([-extent, 0.0, offset], GRID_COLOR));
        verts.push(LineVertex::new([extent, 0.0, offset], GRID_COLOR));
    }
    verts
}

/// Axes first, then the grid (draw order of a LineList buffer).
pub fn scene_lines() -> Vec<LineVertex> {
    let mut lines = axis_lines();
    lines.extend(grid_lines(GRID_HALF_EXTENT));
    lines
}

/// Decode one sRGB-encoded channel to linear.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Colors above are display values. An sRGB target re-encodes on write,
/// so they must be linearized first to reach the screen unchanged.
pub fn for_target(mut lines: Vec<LineVertex>, srgb_target: bool) -> Vec<LineVertex> {
    if srgb_target {
        for v in &mut lines {
            v.color = v.color.map(srgb_to_linear);
        }
    }
    lines
}
