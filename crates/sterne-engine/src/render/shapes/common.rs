//! Pieces shared by the overlay renderers.

use std::num::NonZeroU64;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::coords::Rect;
use crate::render::RenderCtx;

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2],
}

pub(super) const VIEWPORT_UBO_SIZE: NonZeroU64 =
    match NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64) {
        Some(n) => n,
        None => panic!("ViewportUniform is zero-sized"),
    };

pub(super) fn viewport_ubo_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: Some(VIEWPORT_UBO_SIZE),
        },
        count: None,
    }
}

pub(super) fn create_viewport_ubo(ctx: &RenderCtx<'_>, label: &str) -> wgpu::Buffer {
    ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: VIEWPORT_UBO_SIZE.get(),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub(super) fn write_viewport_ubo(ctx: &RenderCtx<'_>, ubo: &wgpu::Buffer) {
    let uniform = ViewportUniform {
        viewport: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
        _pad: [0.0; 2],
    };
    ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&uniform));
}

// ── unit quad ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

pub(super) fn instance_buffer(
    ctx: &RenderCtx<'_>,
    label: &str,
    capacity: usize,
    stride: usize,
) -> wgpu::Buffer {
    ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (capacity * stride) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Capacity to allocate when `required` instances no longer fit.
#[inline]
pub(super) fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(64)
}

// ── clipping ──────────────────────────────────────────────────────────────

/// Splits a paint-ordered clip sequence into runs that share one clip rect.
pub(super) fn clip_runs(clips: &[Option<Rect>]) -> Vec<(Range<u32>, Option<Rect>)> {
    let mut runs = Vec::new();
    let mut start = 0usize;
    while start < clips.len() {
        let clip = clips[start];
        let end = clips[start..]
            .iter()
            .position(|c| *c != clip)
            .map_or(clips.len(), |n| start + n);
        runs.push((start as u32..end as u32, clip));
        start = end;
    }
    runs
}

/// Logical clip rect to a physical scissor `(x, y, w, h)` clamped to the
/// surface. `None` clip covers the whole surface; a zero-area result is
/// `None` and the draw should be skipped.
pub(super) fn logical_clip_to_scissor(
    clip: Option<Rect>,
    surface_size: [u32; 2],
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let [sw, sh] = surface_size;
    let (x, y, w, h) = match clip {
        None => (0, 0, sw, sh),
        Some(r) => {
            let r = r.normalized();
            let to_px = |v: f32, limit: u32| ((v * scale).max(0.0) as u32).min(limit);
            let x0 = to_px(r.origin.x, sw);
            let y0 = to_px(r.origin.y, sh);
            let x1 = to_px(r.origin.x + r.size.x, sw);
            let y1 = to_px(r.origin.y + r.size.y, sh);
            (x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
        }
    };
    (w > 0 && h > 0).then_some((x, y, w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_clip_covers_surface() {
        assert_eq!(logical_clip_to_scissor(None, [800, 600], 2.0), Some((0, 0, 800, 600)));
    }

    #[test]
    fn clip_scales_to_physical() {
        let clip = Some(Rect::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(logical_clip_to_scissor(clip, [800, 600], 2.0), Some((20, 40, 60, 80)));
    }

    #[test]
    fn clip_is_clamped_to_surface() {
        let clip = Some(Rect::new(-10.0, 590.0, 100.0, 100.0));
        assert_eq!(logical_clip_to_scissor(clip, [640, 600], 1.0), Some((0, 590, 90, 10)));
    }

    #[test]
    fn offscreen_or_empty_clip_is_skipped() {
        assert_eq!(logical_clip_to_scissor(Some(Rect::new(700.0, 0.0, 50.0, 50.0)), [640, 480], 1.0), None);
        assert_eq!(logical_clip_to_scissor(Some(Rect::default()), [640, 480], 1.0), None);
        assert_eq!(logical_clip_to_scissor(None, [0, 480], 1.0), None);
    }

    #[test]
    fn runs_group_consecutive_equal_clips() {
        let a = Some(Rect::new(0.0, 0.0, 5.0, 5.0));
        let runs = clip_runs(&[None, None, a, a, None]);
        assert_eq!(runs, vec![(0..2, None), (2..4, a), (4..5, None)]);
    }

    #[test]
    fn runs_of_empty_input() {
        assert!(clip_runs(&[]).is_empty());
    }

    #[test]
    fn capacity_growth() {
        assert_eq!(grown_capacity(1), 64);
        assert_eq!(grown_capacity(65), 128);
        assert_eq!(grown_capacity(1000), 1024);
    }
}
