// Camera for the fixed-size arena
//
// The whole arena is always visible and stretched over the window, so the
// camera only has to know the window size to map between the two spaces.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Maps arena coordinates (origin top-left, y down) onto the window
#[derive(Debug, Clone)]
pub struct Camera {
    /// Logical arena size
    arena_size: Vec2,
    /// Window size in physical pixels
    viewport_size: Vec2,
    /// View-projection matrix
    view_proj: Mat4,
}

impl Camera {
    /// Create a new camera
    pub fn new(arena_size: Vec2, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            arena_size,
            viewport_size: Vec2::new(viewport_width, viewport_height),
            view_proj: Mat4::orthographic_rh(0.0, arena_size.x, arena_size.y, 0.0, -1.0, 1.0),
        }
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_size = Vec2::new(width, height);
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }

    /// Convert window pixel coordinates to arena coordinates
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        if self.viewport_size.x <= 0.0 || self.viewport_size.y <= 0.0 {
            return screen_pos;
        }
        screen_pos * self.arena_size / self.viewport_size
    }

    /// Window pixels per arena unit on each axis
    pub fn scale(&self) -> Vec2 {
        self.viewport_size / self.arena_size
    }

    /// Convert arena coordinates to window pixel coordinates
    pub fn world_to_screen(&self, world_pos: Vec2) -> Vec2 {
        world_pos * self.scale()
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
