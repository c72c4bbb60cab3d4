//! Renderer: wgpu init + depth + textured block, axes and ground grid.
//! wgpu = 26.x, winit = 0.30.x

pub mod lines;
pub mod texture;

use std::sync::Arc;

use anyhow::{Context, Result};
use asset::{BlockPreview, faces::FaceTextures, mesh::MeshData};
use bytemuck::{Pod, Zeroable};
use corelib::camera::Camera;
use glam::Mat4;
use wgpu::{
    util::DeviceExt,
    BindGroup, BindGroupLayout, BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingType,
    BlendState, Buffer, BufferBindingType, BufferUsages, ColorTargetState, ColorWrites,
    CommandEncoderDescriptor, DepthBiasState, DepthStencilState, Device, DeviceDescriptor,
    Extent3d, Features, FragmentState,
    Instance, InstanceDescriptor, Limits, LoadOp, Operations, PipelineLayoutDescriptor,
    PowerPreference, PresentMode, PrimitiveTopology, Queue, RenderPassColorAttachment,
    RenderPassDescriptor, RenderPipeline, RenderPipelineDescriptor, ShaderModuleDescriptor,
    ShaderSource, ShaderStages, StoreOp, Surface, SurfaceConfiguration, SurfaceError,
    TextureDescriptor, TextureDimension, TextureFormat, TextureUsages, TextureView,
    TextureViewDescriptor, VertexBufferLayout, VertexState, VertexStepMode,
};
use winit::{dpi::PhysicalSize, window::Window};

use crate::{
    lines::LineVertex,
    texture::{GpuTexture, face_texture_layout, nearest_sampler},
};

/// Vertex: position + uv.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
}
impl Vertex {
    pub const LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2],
    };
}

/// Camera UBO (16-byte aligned).
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct CameraUniform {
    mvp: [[f32; 4]; 4],
}

const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

/// Background gray as it should appear on screen.
const CLEAR_GRAY: f32 = 0.2;

/// Clear value for the target: linear when the surface encodes to sRGB.
fn clear_color(srgb_target: bool) -> wgpu::Color {
    let gray = f64::from(if srgb_target {
        lines::srgb_to_linear(CLEAR_GRAY)
    } else {
        CLEAR_GRAY
    });
    wgpu::Color {
        r: gray,
        g: gray,
        b: gray,
        a: 1.0,
    }
}

pub struct GpuState {
    // Surface
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,

    // Device/queue
    device: Device,
    queue: Queue,

    // Pipelines
    block_pipeline: RenderPipeline,
    line_pipeline: RenderPipeline,

    // Geometry
    vertex_buf: Buffer,
    index_buf: Buffer,
    line_buf: Buffer,
    line_vertex_count: u32,

    // Textures: one per distinct texture, faces index into it
    textures: Vec<GpuTexture>,
    face_slots: FaceTextures<usize>,

    // Camera
    camera_bg: BindGroup,
    camera_buf: Buffer,

    // Depth
    depth_view: TextureView,
    clear_color: wgpu::Color,

    // Size cache
    width: u32,
    height: u32,
}

impl GpuState {
    /// Create GPU state bound to an Arc<Window> and upload the block's textures.
    pub async fn new(
        window: Arc<Window>,
        backends: wgpu::Backends,
        block: &BlockPreview,
    ) -> Result<Self> {
        let PhysicalSize { width, height } = window.inner_size();
        let width = width.max(1);
        let height = height.max(1);

        // Instance & surface
        let instance = Instance::new(&InstanceDescriptor {
            backends,
            ..Default::default()
        });
        let surface: Surface<'static> = instance
            .create_surface(window.clone())
            .context("create_surface failed")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No suitable GPU adapter")?;
        log::info!("Using adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&DeviceDescriptor {
                label: Some("Blockview Device"),
                required_features: Features::empty(),
                required_limits: Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("request_device failed")?;

        // Surface format (prefer sRGB)
        let caps = surface.get_capabilities(&adapter);
        let surface_format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .context("Surface reports no supported formats")?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        // Configure surface
        let surface_config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        // Depth texture
        let depth_view = create_depth_view(&device, &surface_config);

        // ==== Camera BGL/BG ====
        let camera_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Camera BGL"),
            entries: &[BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::VERTEX,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let camera_init = CameraUniform {
            mvp: Mat4::IDENTITY.to_cols_array_2d(),
        };
        let camera_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera UBO"),
            contents: bytemuck::bytes_of(&camera_init),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });
        let camera_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera BG"),
            layout: &camera_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buf.as_entire_binding(),
            }],
        });

        // ==== Textures ====
        let texture_bgl = face_texture_layout(&device);
        let sampler = nearest_sampler(&device);
        let textures = block
            .textures
            .iter()
            .map(|(role, data)| GpuTexture::upload(&device, &queue, &texture_bgl, &sampler, role, data))
            .collect::<Result<Vec<_>>>()?;
        log::info!("Uploaded {} texture(s) for '{}'", textures.len(), block.parent);

        // ==== Pipelines ====
        let block_pipeline = create_block_pipeline(&device, surface_format, &camera_bgl, &texture_bgl);
        let line_pipeline = create_line_pipeline(&device, surface_format, &camera_bgl);

        // ==== Geometry ====
        let (vertices, indices) = gpu_cube(&asset::cube::cube_mesh());
        let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube VB"),
            contents: bytemuck::cast_slice(&vertices),
            usage: BufferUsages::VERTEX,
        });
        let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube IB"),
            contents: bytemuck::cast_slice(&indices),
            usage: BufferUsages::INDEX,
        });

        let srgb_target = surface_format.is_srgb();
        let line_vertices = lines::for_target(lines::scene_lines(), srgb_target);
        let line_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lines VB"),
            contents: bytemuck::cast_slice(&line_vertices),
            usage: BufferUsages::VERTEX,
        });

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            block_pipeline,
            line_pipeline,
            vertex_buf,
            index_buf,
            line_buf,
            line_vertex_count: line_vertices.len() as u32,
            textures,
            face_slots: block.faces.clone(),
            camera_bg,
            camera_buf,
            depth_view,
            clear_color: clear_color(srgb_target),
            width,
            height,
        })
    }

    /// Width / height of the current surface.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Resize: reconfigure surface & recreate depth view.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.surface_config.width = self.width;
        self.surface_config.height = self.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = create_depth_view(&self.device, &self.surface_config);
    }

    /// Render one frame: update MVP + clear + axes, grid, then the block.
    pub fn render(&mut self, camera: &Camera) -> Result<(), SurfaceError> {
        let cam = CameraUniform {
            mvp: camera.proj_view().to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.camera_buf, 0, bytemuck::bytes_of(&cam));

        // --- frame & pass
        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&Default::default());

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("MainEncoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("MainPass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(self.clear_color),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(Operations {
                        load: LoadOp::Clear(1.0),
                        store: StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            rpass.set_bind_group(0, &self.camera_bg, &[]);

            rpass.set_pipeline(&self.line_pipeline);
            rpass.set_vertex_buffer(0, self.line_buf.slice(..));
            rpass.draw(0..self.line_vertex_count, 0..1);

            rpass.set_pipeline(&self.block_pipeline);
            rpass.set_vertex_buffer(0, self.vertex_buf.slice(..));
            rpass.set_index_buffer(self.index_buf.slice(..), wgpu::IndexFormat::Uint16);
            for (face, &slot) in self.face_slots.iter() {
                let Some(texture) = self.textures.get(slot) else {
                    continue;
                };
                rpass.set_bind_group(1, &texture.bind_group, &[]);
                rpass.draw_indexed(face.index_range(), 0, 0..1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    pub fn is_surface_lost(err: &SurfaceError) -> bool {
        matches!(err, SurfaceError::Lost | SurfaceError::Outdated)
    }

    pub fn recreate_surface(&mut self) {
        self.resize(self.width, self.height);
    }
}

fn create_block_pipeline(
    device: &Device,
    surface_format: TextureFormat,
    camera_bgl: &BindGroupLayout,
    texture_bgl: &BindGroupLayout,
) -> RenderPipeline {
    let shader = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("Block WGSL"),
        source: ShaderSource::Wgsl(include_str!("shaders/block.wgsl").into()),
    });
    let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("Block PipelineLayout"),
        bind_group_layouts: &[camera_bgl, texture_bgl],
        push_constant_ranges: &[],
    });
    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some("Block Pipeline"),
        layout: Some(&layout),
        vertex: VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::LAYOUT],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(ColorTargetState {
                format: surface_format,
                blend: Some(BlendState::ALPHA_BLENDING),
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        // Faces are single quads seen from both sides.
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(depth_state()),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_line_pipeline(
    device: &Device,
    surface_format: TextureFormat,
    camera_bgl: &BindGroupLayout,
) -> RenderPipeline {
    let shader = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("Lines WGSL"),
        source: ShaderSource::Wgsl(include_str!("shaders/lines.wgsl").into()),
    });
    let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("Lines PipelineLayout"),
        bind_group_layouts: &[camera_bgl],
        push_constant_ranges: &[],
    });
    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some("Lines Pipeline"),
        layout: Some(&layout),
        vertex: VertexState {
            module: &shader,
            entry_point: Some("vs_line"),
            buffers: &[LineVertex::LAYOUT],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(FragmentState {
            module: &shader,
            entry_point: Some("fs_line"),
            targets: &[Some(ColorTargetState {
                format: surface_format,
                blend: Some(BlendState::REPLACE),
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: PrimitiveTopology::LineList,
            ..Default::default()
        },
        depth_stencil: Some(depth_state()),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn depth_state() -> DepthStencilState {
    DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::LessEqual,
        stencil: wgpu::StencilState::default(),
        bias: DepthBiasState::default(),
    }
}

/// Create a depth texture view matching the surface config.
fn create_depth_view(device: &Device, sc: &SurfaceConfiguration) -> TextureView {
    let tex = device.create_texture(&TextureDescriptor {
        label: Some("DepthTex"),
        size: Extent3d {
            width: sc.width.max(1),
            height: sc.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&TextureViewDescriptor::default())
}

/// Convert the CPU cube mesh into GPU vertex/index arrays.
fn gpu_cube(mesh: &MeshData) -> (Vec<Vertex>, Vec<u16>) {
    debug_assert!(mesh.is_valid(), "cube mesh has dangling indices");
    let vertices = mesh
        .vertices
        .iter()
        .map(|v| Vertex {
            pos: v.position,
            uv: v.uv,
        })
        .collect();
    (vertices, mesh.indices.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset::cube::Face;

    #[test]
    fn gpu_cube_keeps_face_ranges() {
        let mesh = asset::cube::cube_mesh();
        let (vertices, indices) = gpu_cube(&mesh);
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len() as u32, Face::Bottom.index_range().end);
        assert_eq!(std::mem::size_of::<Vertex>(), 20);
    }

    #[test]
    fn clear_color_reaches_screen_as_dark_gray() {
        let plain = clear_color(false);
        assert!((plain.r - 0.2).abs() < 1e-6);
        assert_eq!((plain.g, plain.b, plain.a), (plain.r, plain.r, 1.0));

        let srgb = clear_color(true);
        assert!((srgb.r - 0.0331).abs() < 1e-4);
        assert_eq!(srgb.r, srgb.b);
        assert_eq!(srgb.a, 1.0);
    }
}
