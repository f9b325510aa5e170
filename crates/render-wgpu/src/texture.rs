use std::path::Path;

/// Size of the generated fallback checkerboard, in pixels.
const CHECKER_SIZE: u32 = 64;
/// Checker cell edge, in pixels.
const CHECKER_CELL: u32 = 8;

/// A scene texture bound as view + sampler in one bind group.
pub struct SceneTexture {
    pub bind_group: wgpu::BindGroup,
}

impl SceneTexture {
    /// Bind group layout shared by every scene texture: sampled 2D texture at
    /// binding 0, filtering sampler at binding 1.
    pub fn layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
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
        })
    }

    /// Decode an image file and upload it. A failure is logged at error level
    /// and the generated checkerboard stands in, so a missing file degrades
    /// the scene instead of stopping it.
    pub fn load_or_fallback(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        path: &Path,
    ) -> Self {
        let (pixels, width, height) = match decode_rgba8(path) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::error!(
                    "failed to load texture '{}': {e}; using checkerboard",
                    path.display()
                );
                checkerboard()
            }
        };
        Self::from_rgba8(device, queue, layout, &pixels, width, height)
    }

    /// Upload raw RGBA8 pixels as a single-level sRGB texture.
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("scene_texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("scene_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture_bind_group"),
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

        Self { bind_group }
    }
}

fn decode_rgba8(path: &Path) -> Result<(Vec<u8>, u32, u32), image::ImageError> {
    let img = image::open(path)?.to_rgba8();
    let (width, height) = img.dimensions();
    Ok((img.into_raw(), width, height))
}

/// Two-tone gray checkerboard used when the real texture is unavailable.
fn checkerboard() -> (Vec<u8>, u32, u32) {
    let mut pixels = Vec::with_capacity((CHECKER_SIZE * CHECKER_SIZE * 4) as usize);
    for y in 0..CHECKER_SIZE {
        for x in 0..CHECKER_SIZE {
            let cell = (x / CHECKER_CELL + y / CHECKER_CELL) % 2;
            let tone = if cell == 0 { 200 } else { 90 };
            pixels.extend_from_slice(&[tone, tone, tone, 255]);
        }
    }
    (pixels, CHECKER_SIZE, CHECKER_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_covers_full_square() {
        let (pixels, width, height) = checkerboard();
        assert_eq!(width, CHECKER_SIZE);
        assert_eq!(height, CHECKER_SIZE);
        assert_eq!(pixels.len(), (CHECKER_SIZE * CHECKER_SIZE * 4) as usize);
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let (pixels, width, _) = checkerboard();
        let first = pixels[0];
        // One cell down the same column has the other tone.
        let next_cell = (CHECKER_CELL * width * 4) as usize;
        assert_ne!(pixels[next_cell], first);
    }
}
