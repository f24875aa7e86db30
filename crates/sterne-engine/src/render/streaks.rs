//! Depth-tested line renderer for the starfield.
//!
//! Input is a flat list of `[x, y, z]` endpoints, two per streak, as produced
//! by the simulation. The vertex shader does the projection itself (see
//! `shaders/streak.wgsl`), so there is no camera or uniform. [`project`] is
//! the same math on the CPU.

use crate::render::{RenderCtx, RenderTarget};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const VERTEX_STRIDE: u64 = std::mem::size_of::<[f32; 3]>() as u64;

/// CPU copy of `vs_main`: clip-space position and grey level for one endpoint.
///
/// `w = 2z - 1`, depth `(-0.1z + w) / 2`, brightness `1.2 - z / 4.5` clamped
/// to `[0, 1]`.
pub fn project(p: [f32; 3]) -> ([f32; 4], f32) {
    let [x, y, z] = p;
    let w = 2.0 * z - 1.0;
    let clip = [x, y, (-0.1 * z + w) * 0.5, w];
    (clip, (1.2 - z / 4.5).clamp(0.0, 1.0))
}

/// Value of the shader's `srgb_target` override for a color format.
#[inline]
fn srgb_target_constant(format: wgpu::TextureFormat) -> f64 {
    if format.is_srgb() { 1.0 } else { 0.0 }
}

/// Depth texture size for a surface; never zero in either dimension.
#[inline]
fn depth_extent(surface_size: [u32; 2]) -> [u32; 2] {
    [surface_size[0].max(1), surface_size[1].max(1)]
}

#[derive(Default)]
pub struct StreakRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    depth_size: [u32; 2],
    depth_view: Option<wgpu::TextureView>,

    vertex_buffer: Option<wgpu::Buffer>,
    vertex_capacity: usize,
}

impl StreakRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws `endpoints` as a line list over the current color target.
    ///
    /// An odd trailing endpoint is ignored. The depth buffer is cleared every
    /// call.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, endpoints: &[[f32; 3]]) {
        let count = endpoints.len() & !1;
        if count == 0 {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_depth(ctx);
        self.ensure_vertex_capacity(ctx, count);

        let (Some(pipeline), Some(depth_view), Some(vbo)) =
            (self.pipeline.as_ref(), self.depth_view.as_ref(), self.vertex_buffer.as_ref())
        else {
            return;
        };

        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&endpoints[..count]));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("sterne streak pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, vbo.slice(..count as u64 * VERTEX_STRIDE));
        rpass.draw(0..count as u32, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sterne streak shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/streak.wgsl").into()),
        });

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sterne streak pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sterne streak pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: VERTEX_STRIDE,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: wgpu::PipelineCompilationOptions {
                    constants: &[("srgb_target", srgb_target_constant(ctx.surface_format))],
                    ..Default::default()
                },
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("streak pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_depth(&mut self, ctx: &RenderCtx<'_>) {
        let size = depth_extent(ctx.surface_size);
        if self.depth_view.is_some() && self.depth_size == size {
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("sterne streak depth"),
            size: wgpu::Extent3d { width: size[0], height: size[1], depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        log::debug!("streak depth buffer {}x{}", size[0], size[1]);
        self.depth_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.depth_size = size;
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vertex_capacity && self.vertex_buffer.is_some() {
            return;
        }
        let cap = required.next_power_of_two().max(256);
        self.vertex_buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sterne streak vbo"),
            size: cap as u64 * VERTEX_STRIDE,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vertex_capacity = cap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_stride_is_three_floats() {
        assert_eq!(VERTEX_STRIDE, 12);
    }

    #[test]
    fn srgb_formats_enable_decode() {
        assert_eq!(srgb_target_constant(wgpu::TextureFormat::Bgra8UnormSrgb), 1.0);
        assert_eq!(srgb_target_constant(wgpu::TextureFormat::Rgba8UnormSrgb), 1.0);
        assert_eq!(srgb_target_constant(wgpu::TextureFormat::Bgra8Unorm), 0.0);
        assert_eq!(srgb_target_constant(wgpu::TextureFormat::Rgba16Float), 0.0);
    }

    #[test]
    fn decoded_brightness_displays_unchanged() {
        // What the shader writes to an sRGB target, then what the store encodes.
        fn to_linear(c: f32) -> f32 {
            if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
        }
        fn to_srgb(c: f32) -> f32 {
            if c <= 0.0031308 { c * 12.92 } else { 1.055 * c.powf(1.0 / 2.4) - 0.055 }
        }
        for b in [0.0, 0.01, 0.2, 0.5, 0.9, 1.0] {
            assert!((to_srgb(to_linear(b)) - b).abs() < 1e-4, "brightness {b}");
        }
        assert!((to_linear(0.2) - 0.0331).abs() < 1e-3);
    }

    #[test]
    fn projection_divisor_and_depth() {
        let (clip, _) = project([0.3, -0.2, 1.0]);
        assert_eq!(clip[0], 0.3);
        assert_eq!(clip[1], -0.2);
        assert!((clip[3] - 1.0).abs() < 1e-6);
        assert!((clip[2] - 0.45).abs() < 1e-6);

        let (clip, _) = project([0.0, 0.0, 9.0]);
        assert!((clip[3] - 17.0).abs() < 1e-6);
        assert!((clip[2] - 8.05).abs() < 1e-5);
        // ndc depth stays inside [0, 1] for visible stars
        let ndc = clip[2] / clip[3];
        assert!(ndc > 0.0 && ndc < 1.0);
    }

    #[test]
    fn near_endpoints_fall_behind_the_camera() {
        assert!(project([0.0, 0.0, 0.25]).0[3] < 0.0);
        assert_eq!(project([0.0, 0.0, 0.5]).0[3], 0.0);
    }

    #[test]
    fn brightness_fades_with_depth() {
        assert_eq!(project([0.0, 0.0, 0.0]).1, 1.0);
        assert_eq!(project([0.0, 0.0, 0.45]).1, 1.0);
        assert!((project([0.0, 0.0, 4.5]).1 - 0.2).abs() < 1e-6);
        assert_eq!(project([0.0, 0.0, 6.0]).1, 0.0);
        assert_eq!(project([0.0, 0.0, 9.9]).1, 0.0);
    }

    #[test]
    fn depth_extent_never_zero() {
        assert_eq!(depth_extent([0, 0]), [1, 1]);
        assert_eq!(depth_extent([640, 0]), [640, 1]);
        assert_eq!(depth_extent([1280, 960]), [1280, 960]);
    }
}
