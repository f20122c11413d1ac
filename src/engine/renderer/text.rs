// Text overlay drawn with egui on top of the sprite pass

use egui::{Align2, Color32, FontId, Pos2};
use glam::Vec4;

use super::camera::Camera;
use super::sprite::{Anchor, DrawCommand};

/// A text command resolved to window pixels
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub position: Pos2,
    pub align: Align2,
    /// Font height in pixels
    pub size: f32,
    pub color: Color32,
}

/// Resolve the text commands of a frame against the current window size
pub fn place_text(commands: &[DrawCommand], camera: &Camera) -> Vec<PlacedText> {
    commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text {
                text,
                position,
                anchor,
                size,
                color,
            } => {
                let screen = camera.world_to_screen(*position);
                Some(PlacedText {
                    text: text.clone(),
                    position: Pos2::new(screen.x, screen.y),
                    align: match anchor {
                        Anchor::TopLeft => Align2::LEFT_TOP,
                        Anchor::Center => Align2::CENTER_CENTER,
                    },
                    size: size * camera.scale().y,
                    color: to_color32(*color),
                })
            }
            _ => None,
        })
        .collect()
}

fn to_color32(color: Vec4) -> Color32 {
    let [r, g, b, a] = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round().to_array();
    Color32::from_rgba_unmultiplied(r as u8, g as u8, b as u8, a as u8)
}

/// Lays text out with egui and paints it with egui-wgpu
pub struct TextRenderer {
    context: egui::Context,
    renderer: egui_wgpu::Renderer,
    paint_jobs: Vec<egui::ClippedPrimitive>,
    screen: egui_wgpu::ScreenDescriptor,
}

impl TextRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        Self {
            context: egui::Context::default(),
            renderer: egui_wgpu::Renderer::new(device, format, None, 1),
            paint_jobs: Vec::new(),
            screen: egui_wgpu::ScreenDescriptor {
                size_in_pixels: [1, 1],
                pixels_per_point: 1.0,
            },
        }
    }

    /// Tessellate this frame's labels and upload their geometry
    ///
    /// Returns command buffers egui-wgpu needs submitted before `encoder`.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        texts: &[PlacedText],
        size_in_pixels: [u32; 2],
    ) -> Vec<wgpu::CommandBuffer> {
        // One point per pixel: placement is already in window pixels
        self.screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: 1.0,
        };

        let raw_input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                Pos2::ZERO,
                egui::vec2(size_in_pixels[0] as f32, size_in_pixels[1] as f32),
            )),
            ..Default::default()
        };
        let output = self.context.run(raw_input, |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            for text in texts {
                painter.text(
                    text.position,
                    text.align,
                    &text.text,
                    FontId::proportional(text.size),
                    text.color,
                );
            }
        });

        for (id, delta) in &output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        self.paint_jobs = self
            .context
            .tessellate(output.shapes, output.pixels_per_point);
        let buffers =
            self.renderer
                .update_buffers(device, queue, encoder, &self.paint_jobs, &self.screen);
        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        buffers
    }

    /// Paint the prepared labels
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.paint_jobs.is_empty() {
            return;
        }
        self.renderer
            .render(render_pass, &self.paint_jobs, &self.screen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Rect;
    use glam::Vec2;

    fn camera() -> Camera {
        Camera::new(Vec2::new(928.0, 335.0), 1856.0, 670.0)
    }

    #[test]
    fn test_text_scales_with_window() {
        let commands = [
            DrawCommand::FillRect {
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                color: Vec4::ONE,
            },
            DrawCommand::Text {
                text: "GAME OVER".to_string(),
                position: Vec2::new(464.0, 167.5),
                anchor: Anchor::Center,
                size: 60.0,
                color: Vec4::new(1.0, 0.0, 0.0, 1.0),
            },
        ];

        let placed = place_text(&commands, &camera());

        assert_eq!(
            placed,
            vec![PlacedText {
                text: "GAME OVER".to_string(),
                position: Pos2::new(928.0, 335.0),
                align: Align2::CENTER_CENTER,
                size: 120.0,
                color: Color32::RED,
            }]
        );
    }

    #[test]
    fn test_top_left_anchor() {
        let commands = [DrawCommand::Text {
            text: "Wave: 3".to_string(),
            position: Vec2::new(10.0, 10.0),
            anchor: Anchor::TopLeft,
            size: 30.0,
            color: Vec4::ONE,
        }];

        let placed = place_text(&commands, &Camera::new(Vec2::new(928.0, 335.0), 928.0, 335.0));

        assert_eq!(placed[0].position, Pos2::new(10.0, 10.0));
        assert_eq!(placed[0].align, Align2::LEFT_TOP);
        assert_eq!(placed[0].size, 30.0);
        assert_eq!(placed[0].color, Color32::WHITE);
    }

    #[test]
    fn test_color_is_clamped() {
        assert_eq!(to_color32(Vec4::new(2.0, -1.0, 0.5, 1.0)), Color32::from_rgb(255, 0, 128));
    }
}
