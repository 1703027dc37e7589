//! wgpu pipeline, buffers, and draw call for the shape.

use glam::Mat4;
use wgpu::util::DeviceExt;

use super::mesh::ShapeMesh;
use crate::camera::core::MvpUniform;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{
    ShaderComposer, ShaderError, SHAPE_FRAGMENT, SHAPE_VERTEX,
};
use crate::gpu::texture::{DepthTarget, DEPTH_FORMAT};
use crate::options::DisplayOptions;

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![0 => Float32x3];
const COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![1 => Float32x3];

/// What a frame submitted to the GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawStats {
    /// Number of draw calls recorded.
    pub draw_calls: u32,
    /// Number of vertices covered by those calls.
    pub vertices: u32,
}

impl DrawStats {
    /// Count one non-instanced draw over `vertices`.
    fn record(&mut self, vertices: &std::ops::Range<u32>) {
        self.draw_calls += 1;
        self.vertices += vertices.end - vertices.start;
    }
}

/// Owns the shape's pipeline, vertex/color buffers, MVP uniform, and depth
/// attachment. Everything is released when the renderer is dropped.
pub struct ShapeRenderer {
    pipeline: wgpu::RenderPipeline,
    position_buffer: wgpu::Buffer,
    color_buffer: wgpu::Buffer,
    vertex_count: u32,
    uniform: MvpUniform,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    depth: DepthTarget,
    clear_color: wgpu::Color,
}

impl ShapeRenderer {
    /// Compose the shaders, build the pipeline, and upload the mesh.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError`] if either shader fails to compose or wgpu
    /// rejects the shader modules or the pipeline.
    pub async fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        mesh: &ShapeMesh,
        display: &DisplayOptions,
    ) -> Result<Self, ShaderError> {
        let device = &context.device;
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let built = Self::build(context, composer, mesh, display);
        let scope_error = device.pop_error_scope().await;

        let renderer = built?;
        if let Some(error) = scope_error {
            return Err(ShaderError::Validation(error.to_string()));
        }
        log::debug!(
            "shape renderer ready: {} vertices",
            renderer.vertex_count
        );
        Ok(renderer)
    }

    fn build(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        mesh: &ShapeMesh,
        display: &DisplayOptions,
    ) -> Result<Self, ShaderError> {
        let device = &context.device;
        let vertex_shader =
            composer.compose(device, "Shape Vertex Shader", SHAPE_VERTEX)?;
        let fragment_shader =
            composer.compose(device, "Shape Fragment Shader", SHAPE_FRAGMENT)?;

        let position_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Shape Position Buffer"),
                contents: bytemuck::cast_slice(mesh.positions()),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let color_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Shape Color Buffer"),
                contents: bytemuck::cast_slice(mesh.colors()),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let uniform = MvpUniform::new();
        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("MVP Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("MVP Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("MVP Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Shape Pipeline Layout"),
                bind_group_layouts: &[&layout],
                push_constant_ranges: &[],
            });

        let depth_compare = if display.depth_test {
            wgpu::CompareFunction::Less
        } else {
            wgpu::CompareFunction::Always
        };

        let pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Shape Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &vertex_shader,
                    entry_point: Some("vs_main"),
                    buffers: &[
                        wgpu::VertexBufferLayout {
                            array_stride: size_of::<[f32; 3]>()
                                as wgpu::BufferAddress,
                            step_mode: wgpu::VertexStepMode::Vertex,
                            attributes: &POSITION_ATTRIBUTES,
                        },
                        wgpu::VertexBufferLayout {
                            array_stride: size_of::<[f32; 3]>()
                                as wgpu::BufferAddress,
                            step_mode: wgpu::VertexStepMode::Vertex,
                            attributes: &COLOR_ATTRIBUTES,
                        },
                    ],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &fragment_shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    // Flat shape, visible from both sides while rotating
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: display.depth_test,
                    depth_compare,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        Ok(Self {
            pipeline,
            position_buffer,
            color_buffer,
            vertex_count: mesh.vertex_count(),
            uniform,
            uniform_buffer,
            bind_group,
            depth: DepthTarget::new(device, context.width(), context.height()),
            clear_color: display.clear_color(),
        })
    }

    /// Number of vertices uploaded.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Last uploaded MVP uniform.
    pub fn uniform(&self) -> &MvpUniform {
        &self.uniform
    }

    /// Change the framebuffer clear color.
    pub fn set_clear_color(&mut self, display: &DisplayOptions) {
        self.clear_color = display.clear_color();
    }

    /// Recreate the depth attachment for a new target size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 || self.depth.size() == (width, height) {
            return;
        }
        self.depth = DepthTarget::new(device, width, height);
    }

    /// Upload a new model-view-projection matrix.
    pub fn update_mvp(&mut self, queue: &wgpu::Queue, mvp: Mat4) {
        self.uniform.update(mvp);
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Clear `target` and draw the whole shape with one draw call. Returns
    /// the draws actually recorded into the pass.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
    ) -> DrawStats {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shape Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                },
            ),
            ..Default::default()
        });

        let mut stats = DrawStats::default();
        let vertices = 0..self.vertex_count;
        if vertices.is_empty() {
            return stats;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.position_buffer.slice(..));
        pass.set_vertex_buffer(1, self.color_buffer.slice(..));
        pass.draw(vertices.clone(), 0..1);
        stats.record(&vertices);
        stats
    }
}
