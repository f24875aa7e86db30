use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};
use wgpu::util::DeviceExt;

use crate::coords::Rect;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::common::{
    clip_runs, create_viewport_ubo, grown_capacity, instance_buffer, logical_clip_to_scissor,
    premul_alpha_blend, viewport_ubo_layout_entry, write_viewport_ubo, QuadVertex, QUAD_INDICES,
    QUAD_VERTICES,
};

const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1;

/// Raster scale snapped to quarter steps so fractional DPI changes do not
/// fill the atlas with near-duplicate glyphs.
fn raster_scale(scale_factor: f32) -> f32 {
    ((scale_factor * 4.0).round() / 4.0).max(0.25)
}

#[derive(Debug, Copy, Clone)]
struct AtlasSlot {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Shelf packer for the glyph atlas: fills rows left to right, opens a new
/// row when the current one is full.
#[derive(Debug)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self { size, cursor_x: GLYPH_PADDING, cursor_y: GLYPH_PADDING, row_height: 0, full: false }
    }

    /// Top-left texel for a `w × h` glyph, or `None` once the atlas is full.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full || w + 2 * GLYPH_PADDING > self.size || h + 2 * GLYPH_PADDING > self.size {
            return None;
        }
        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }
        if self.cursor_y + h + GLYPH_PADDING > self.size {
            self.full = true;
            return None;
        }
        let at = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(at)
    }
}

/// Draws `DrawCmd::Text` through an R8 glyph atlas.
///
/// Glyphs are rasterized with fontdue on first use at the surface's raster
/// scale and cached for the renderer's lifetime. When the atlas fills up,
/// further new glyphs are skipped with a single warning.
pub struct TextRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,

    atlas_texture: Option<wgpu::Texture>,
    atlas_view: Option<wgpu::TextureView>,
    packer: ShelfPacker,
    glyphs: HashMap<GlyphRasterConfig, AtlasSlot>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,
    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    layout: Layout<()>,
    instances: Vec<GlyphInstance>,
    clips: Vec<Option<Rect>>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            sampler: None,
            atlas_texture: None,
            atlas_view: None,
            packer: ShelfPacker::new(ATLAS_SIZE),
            glyphs: HashMap::new(),
            quad_vbo: None,
            quad_ibo: None,
            instance_vbo: None,
            instance_capacity: 0,
            layout: Layout::new(CoordinateSystem::PositiveYDown),
            instances: Vec::new(),
            clips: Vec::new(),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        self.ensure_atlas(ctx);
        self.instances.clear();
        self.clips.clear();

        let scale = raster_scale(ctx.scale_factor);

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Text(cmd) = &item.cmd else { continue };
            let Some(font) = fonts.get(cmd.font) else {
                log::warn!("text: unknown {:?}, skipping", cmd.font);
                continue;
            };

            self.layout.reset(&LayoutSettings {
                x: cmd.origin.x * scale,
                y: cmd.origin.y * scale,
                max_width: cmd.max_width.map(|w| w * scale),
                ..LayoutSettings::default()
            });
            self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size * scale, 0));

            let color = cmd.color.to_array();
            for g in self.layout.glyphs() {
                if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                    continue;
                }
                let slot = match self.glyphs.get(&g.key) {
                    Some(slot) => *slot,
                    None => {
                        let (metrics, bitmap) = font.rasterize_config(g.key);
                        let Some(slot) = Self::upload_glyph(
                            ctx,
                            self.atlas_texture.as_ref(),
                            &mut self.packer,
                            &bitmap,
                            metrics.width as u32,
                            metrics.height as u32,
                        ) else {
                            continue;
                        };
                        self.glyphs.insert(g.key, slot);
                        slot
                    }
                };

                self.instances.push(GlyphInstance {
                    dst_min: [g.x / scale, g.y / scale],
                    dst_max: [(g.x + g.width as f32) / scale, (g.y + g.height as f32) / scale],
                    uv_min: slot.uv_min,
                    uv_max: slot.uv_max,
                    color,
                });
                self.clips.push(item.clip_rect);
            }
        }

        if self.instances.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_sampler(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);
        self.ensure_instance_capacity(ctx, self.instances.len());

        let (Some(pipeline), Some(bind_group), Some(ubo), Some(quad_vbo), Some(quad_ibo), Some(instance_vbo)) = (
            self.pipeline.as_ref(),
            self.bind_group.as_ref(),
            self.viewport_ubo.as_ref(),
            self.quad_vbo.as_ref(),
            self.quad_ibo.as_ref(),
            self.instance_vbo.as_ref(),
        ) else {
            return;
        };

        write_viewport_ubo(ctx, ubo);
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&self.instances));

        let mut rpass = target.begin_overlay_pass("sterne text pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);

        for (range, clip) in clip_runs(&self.clips) {
            if let Some((x, y, w, h)) = logical_clip_to_scissor(clip, ctx.surface_size, ctx.scale_factor) {
                rpass.set_scissor_rect(x, y, w, h);
                rpass.draw_indexed(0..6, 0, range);
            }
        }
    }

    fn upload_glyph(
        ctx: &RenderCtx<'_>,
        atlas: Option<&wgpu::Texture>,
        packer: &mut ShelfPacker,
        bitmap: &[u8],
        w: u32,
        h: u32,
    ) -> Option<AtlasSlot> {
        if w == 0 || h == 0 {
            return None;
        }
        let atlas = atlas?;
        let was_full = packer.full;
        let Some((x, y)) = packer.place(w, h) else {
            if !was_full {
                log::warn!("text: glyph atlas ({ATLAS_SIZE}x{ATLAS_SIZE}) is full; new glyphs are dropped");
            }
            return None;
        };

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout { offset: 0, bytes_per_row: Some(w), rows_per_image: Some(h) },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let s = packer.size as f32;
        Some(AtlasSlot {
            uv_min: [x as f32 / s, y as f32 / s],
            uv_max: [(x + w) as f32 / s, (y + h) as f32 / s],
        })
    }

    fn ensure_atlas(&mut self, ctx: &RenderCtx<'_>) {
        if self.atlas_texture.is_some() {
            return;
        }
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("sterne glyph atlas"),
            size: wgpu::Extent3d { width: ATLAS_SIZE, height: ATLAS_SIZE, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.atlas_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.atlas_texture = Some(texture);
        self.packer = ShelfPacker::new(ATLAS_SIZE);
        self.glyphs.clear();
        self.bind_group = None;
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sterne glyph sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sterne text shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/text.wgsl").into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sterne text bgl"),
            entries: &[
                viewport_ubo_layout_entry(0),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sterne text pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sterne text pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), GlyphInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("text pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let (Some(bgl), Some(atlas_view), Some(sampler)) =
            (self.bind_group_layout.as_ref(), self.atlas_view.as_ref(), self.sampler.as_ref())
        else {
            return;
        };

        let ubo = create_viewport_ubo(ctx, "sterne text viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sterne text bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(atlas_view),
                },
                wgpu::BindGroupEntry { binding: 2, resource: wgpu::BindingResource::Sampler(sampler) },
            ],
        });

        self.viewport_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }
        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sterne text quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sterne text quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let cap = grown_capacity(required);
        self.instance_vbo = Some(instance_buffer(
            ctx,
            "sterne text instance vbo",
            cap,
            std::mem::size_of::<GlyphInstance>(),
        ));
        self.instance_capacity = cap;
    }
}

/// Per-glyph layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1  logical px
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5  premultiplied
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x2,
        5 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_scale_snaps_to_quarters() {
        assert_eq!(raster_scale(1.0), 1.0);
        assert_eq!(raster_scale(1.1), 1.0);
        assert_eq!(raster_scale(1.13), 1.25);
        assert_eq!(raster_scale(0.0), 0.25);
    }

    #[test]
    fn packer_fills_rows_then_wraps() {
        let mut p = ShelfPacker::new(32);
        assert_eq!(p.place(10, 8), Some((1, 1)));
        assert_eq!(p.place(10, 5), Some((12, 1)));
        // 23 + 10 + 1 > 32: next row starts below the tallest glyph so far.
        assert_eq!(p.place(10, 4), Some((1, 10)));
    }

    #[test]
    fn packer_reports_full_and_stays_full() {
        let mut p = ShelfPacker::new(16);
        assert!(p.place(14, 14).is_some());
        assert_eq!(p.place(4, 4), None);
        assert!(p.full);
        assert_eq!(p.place(1, 1), None);
    }

    #[test]
    fn packer_rejects_glyph_wider_than_atlas() {
        let mut p = ShelfPacker::new(16);
        assert_eq!(p.place(20, 2), None);
        assert!(!p.full);
        assert_eq!(p.place(2, 2), Some((1, 1)));
    }
}
