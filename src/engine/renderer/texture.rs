// Texture loading and caching

use anyhow::Result;
use image::GenericImageView;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

use crate::engine::assets::{AssetRegistry, FrameHandle};

/// What a draw batch samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKey {
    /// A sprite frame from the asset registry
    Frame(FrameHandle),
    /// 1×1 white, for solid rectangles
    White,
}

/// A loaded texture with GPU resources
pub struct Texture {
    /// Owned alongside the bind group that samples it
    _texture: wgpu::Texture,
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Create a texture from encoded image bytes
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        bytes: &[u8],
        label: &str,
    ) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();
        Ok(Self::from_rgba(
            device,
            queue,
            layout,
            &rgba,
            width,
            height,
            Some(label),
        ))
    }

    /// Create a solid color texture
    pub fn from_color(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        color: [u8; 4],
        label: Option<&str>,
    ) -> Self {
        Self::from_rgba(device, queue, layout, &color, 1, 1, label)
    }

    fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        rgba: &[u8],
        width: u32,
        height: u32,
        label: Option<&str>,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Pixel art: no smoothing
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label,
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            _texture: texture,
            bind_group,
            width,
            height,
        }
    }
}

/// Uploads frame textures on first use and keeps them for the session
pub struct TextureManager {
    textures: HashMap<TextureKey, Texture>,
    /// Frames that failed to load, so they are not retried every frame
    failed: HashSet<FrameHandle>,
}

impl TextureManager {
    /// Create a texture manager holding only the white texture
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, layout: &wgpu::BindGroupLayout) -> Self {
        let mut textures = HashMap::new();
        textures.insert(
            TextureKey::White,
            Texture::from_color(device, queue, layout, [255, 255, 255, 255], Some("White Texture")),
        );

        Self {
            textures,
            failed: HashSet::new(),
        }
    }

    /// Make sure a frame is resident, loading it from the registry if needed
    ///
    /// Returns false when the frame cannot be shown.
    pub fn ensure_frame(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        registry: &AssetRegistry,
        frame: FrameHandle,
    ) -> bool {
        let key = TextureKey::Frame(frame);
        if self.textures.contains_key(&key) {
            return true;
        }
        if self.failed.contains(&frame) {
            return false;
        }

        let label = registry
            .frame_path(frame)
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        let loaded = registry
            .load_frame_bytes(frame)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| Texture::from_bytes(device, queue, layout, &bytes, &label));

        match loaded {
            Ok(texture) => {
                debug!("Uploaded texture {} ({}x{})", label, texture.width, texture.height);
                self.textures.insert(key, texture);
                true
            }
            Err(e) => {
                warn!("Failed to load texture {}: {}", label, e);
                self.failed.insert(frame);
                false
            }
        }
    }

    /// Get a texture by key
    pub fn get(&self, key: TextureKey) -> Option<&Texture> {
        self.textures.get(&key)
    }

    /// Pixel size of a resident frame
    pub fn frame_size(&self, frame: FrameHandle) -> Option<(u32, u32)> {
        self.get(TextureKey::Frame(frame))
            .map(|texture| (texture.width, texture.height))
    }
}
