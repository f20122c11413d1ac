// Sprite rendering system

use super::texture::{TextureKey, TextureManager};
use super::{CameraUniform, Vertex};
use crate::core::math::Rect;
use crate::engine::assets::FrameHandle;
use glam::{Mat4, Vec2, Vec4};
use std::ops::Range;
use wgpu::util::DeviceExt;

/// Thickness of rectangle outlines in arena units
const OUTLINE_WIDTH: f32 = 1.0;

/// Where a sprite's or label's position sits on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    Center,
}

/// One primitive for the renderer, in arena coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        frame: FrameHandle,
        position: Vec2,
        anchor: Anchor,
    },
    FillRect {
        rect: Rect,
        color: Vec4,
    },
    OutlineRect {
        rect: Rect,
        color: Vec4,
    },
    /// A label drawn over every quad; `size` is the font height in arena units
    Text {
        text: String,
        position: Vec2,
        anchor: Anchor,
        size: f32,
        color: Vec4,
    },
}

/// Consecutive quads sharing one texture
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub texture: TextureKey,
    pub indices: Range<u32>,
}

/// CPU-side geometry for one frame
#[derive(Debug, Default)]
pub struct SpriteBatch {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub batches: Vec<Batch>,
}

impl SpriteBatch {
    /// Turn draw commands into quads, batched by texture in command order
    ///
    /// `frame_size` gives the pixel size of a frame; frames without one are
    /// skipped.
    pub fn build(
        commands: &[DrawCommand],
        frame_size: impl Fn(FrameHandle) -> Option<Vec2>,
    ) -> Self {
        let mut batch = Self::default();

        for command in commands {
            match command {
                DrawCommand::Sprite {
                    frame,
                    position,
                    anchor,
                } => {
                    let Some(size) = frame_size(*frame) else {
                        continue;
                    };
                    let min = match anchor {
                        Anchor::TopLeft => *position,
                        Anchor::Center => *position - size * 0.5,
                    };
                    batch.push_quad(
                        TextureKey::Frame(*frame),
                        Rect { min, size },
                        Vec4::ONE,
                    );
                }
                DrawCommand::FillRect { rect, color } => {
                    batch.push_quad(TextureKey::White, *rect, *color);
                }
                DrawCommand::OutlineRect { rect, color } => {
                    let max = rect.max();
                    let (w, h) = (rect.size.x, rect.size.y);
                    for edge in [
                        Rect::new(rect.min.x, rect.min.y, w, OUTLINE_WIDTH),
                        Rect::new(rect.min.x, max.y - OUTLINE_WIDTH, w, OUTLINE_WIDTH),
                        Rect::new(rect.min.x, rect.min.y, OUTLINE_WIDTH, h),
                        Rect::new(max.x - OUTLINE_WIDTH, rect.min.y, OUTLINE_WIDTH, h),
                    ] {
                        batch.push_quad(TextureKey::White, edge, *color);
                    }
                }
                // Text goes through the overlay pass
                DrawCommand::Text { .. } => {}
            }
        }

        batch
    }

    fn push_quad(&mut self, texture: TextureKey, rect: Rect, color: Vec4) {
        if rect.size.x <= 0.0 || rect.size.y <= 0.0 {
            return;
        }

        let base = self.vertices.len() as u32;
        let max = rect.max();
        self.vertices.extend_from_slice(&[
            Vertex::new(rect.min, Vec2::new(0.0, 0.0), color),
            Vertex::new(Vec2::new(max.x, rect.min.y), Vec2::new(1.0, 0.0), color),
            Vertex::new(max, Vec2::new(1.0, 1.0), color),
            Vertex::new(Vec2::new(rect.min.x, max.y), Vec2::new(0.0, 1.0), color),
        ]);

        let start = self.indices.len() as u32;
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        let end = self.indices.len() as u32;

        match self.batches.last_mut() {
            Some(last) if last.texture == texture => last.indices.end = end,
            _ => self.batches.push(Batch {
                texture,
                indices: start..end,
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// GPU buffers for the frame being drawn
struct FrameBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    batches: Vec<Batch>,
}

/// Sprite renderer drawing batched quads
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    frame: Option<FrameBuffers>,
}

impl SpriteRenderer {
    /// Create a new sprite renderer
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        // Create shader module
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        // Create camera bind group layout
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
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

        // Create texture bind group layout
        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        // Create pipeline layout
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        // Create render pipeline
        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The y-down projection flips winding
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        // Create camera buffer
        let camera_uniform = CameraUniform {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        };

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        Self {
            render_pipeline,
            camera_buffer,
            camera_bind_group,
            texture_bind_group_layout,
            frame: None,
        }
    }

    /// Upload this frame's geometry
    pub fn prepare(&mut self, device: &wgpu::Device, batch: SpriteBatch) {
        if batch.is_empty() {
            self.frame = None;
            return;
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Vertex Buffer"),
            contents: bytemuck::cast_slice(&batch.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Index Buffer"),
            contents: bytemuck::cast_slice(&batch.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        self.frame = Some(FrameBuffers {
            vertex_buffer,
            index_buffer,
            batches: batch.batches,
        });
    }

    /// Draw the prepared geometry
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        texture_manager: &'a TextureManager,
    ) {
        let Some(frame) = &self.frame else {
            return;
        };

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, frame.vertex_buffer.slice(..));
        render_pass.set_index_buffer(frame.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        for batch in &frame.batches {
            if let Some(texture) = texture_manager.get(batch.texture) {
                render_pass.set_bind_group(1, &texture.bind_group, &[]);
                render_pass.draw_indexed(batch.indices.clone(), 0, 0..1);
            }
        }
    }

    /// Get a reference to the camera buffer
    pub fn camera_buffer(&self) -> &wgpu::Buffer {
        &self.camera_buffer
    }

    /// Layout every texture bind group must follow
    pub fn texture_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_bind_group_layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::AssetHandle;

    const WHITE: Vec4 = Vec4::ONE;

    fn frame(name: &str) -> FrameHandle {
        AssetHandle::from_name(name)
    }

    #[test]
    fn test_centered_sprite_quad() {
        let knight = frame("knight_idle_0");
        let commands = [DrawCommand::Sprite {
            frame: knight,
            position: Vec2::new(464.0, 255.0),
            anchor: Anchor::Center,
        }];

        let batch = SpriteBatch::build(&commands, |_| Some(Vec2::new(120.0, 80.0)));

        assert_eq!(batch.vertices.len(), 4);
        assert_eq!(batch.vertices[0].position, [404.0, 215.0]);
        assert_eq!(batch.vertices[2].position, [524.0, 295.0]);
        assert_eq!(batch.vertices[0].tex_coords, [0.0, 0.0]);
        assert_eq!(batch.vertices[2].tex_coords, [1.0, 1.0]);
        assert_eq!(
            batch.batches,
            vec![Batch {
                texture: TextureKey::Frame(knight),
                indices: 0..6,
            }]
        );
    }

    #[test]
    fn test_unsized_frames_are_skipped() {
        let commands = [DrawCommand::Sprite {
            frame: frame("missing"),
            position: Vec2::ZERO,
            anchor: Anchor::TopLeft,
        }];

        let batch = SpriteBatch::build(&commands, |_| None);
        assert!(batch.is_empty());
        assert!(batch.batches.is_empty());
    }

    #[test]
    fn test_solid_quads_share_a_batch() {
        let rect = Rect::new(718.0, 10.0, 200.0, 20.0);
        let commands = [
            DrawCommand::OutlineRect { rect, color: WHITE },
            DrawCommand::FillRect { rect, color: WHITE },
        ];

        let batch = SpriteBatch::build(&commands, |_| None);

        // Four edges plus the fill
        assert_eq!(batch.vertices.len(), 20);
        assert_eq!(
            batch.batches,
            vec![Batch {
                texture: TextureKey::White,
                indices: 0..30,
            }]
        );
    }

    #[test]
    fn test_text_adds_no_quads() {
        let commands = [DrawCommand::Text {
            text: "Wave: 1".to_string(),
            position: Vec2::new(10.0, 10.0),
            anchor: Anchor::TopLeft,
            size: 30.0,
            color: WHITE,
        }];

        let batch = SpriteBatch::build(&commands, |_| None);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_texture_switch_starts_new_batch() {
        let background = frame("background");
        let commands = [
            DrawCommand::Sprite {
                frame: background,
                position: Vec2::ZERO,
                anchor: Anchor::TopLeft,
            },
            DrawCommand::FillRect {
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                color: WHITE,
            },
            DrawCommand::Sprite {
                frame: background,
                position: Vec2::ZERO,
                anchor: Anchor::TopLeft,
            },
        ];

        let batch = SpriteBatch::build(&commands, |_| Some(Vec2::new(928.0, 335.0)));

        let textures: Vec<TextureKey> = batch.batches.iter().map(|b| b.texture).collect();
        assert_eq!(
            textures,
            vec![
                TextureKey::Frame(background),
                TextureKey::White,
                TextureKey::Frame(background),
            ]
        );
        assert_eq!(batch.batches[2].indices, 12..18);
    }

    #[test]
    fn test_empty_fill_produces_nothing() {
        let commands = [DrawCommand::FillRect {
            rect: Rect::new(718.0, 10.0, 0.0, 20.0),
            color: WHITE,
        }];

        assert!(SpriteBatch::build(&commands, |_| None).is_empty());
    }
}
