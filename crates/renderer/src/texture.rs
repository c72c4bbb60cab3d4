//! GPU upload of decoded block textures.

use anyhow::{Result, bail};
use asset::texture::TextureData;

/// Bind group layout for group 1 of the block pipeline: texture + sampler.
pub fn face_texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Face texture BGL"),
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
    })
}

/// Pixel-art sampler: nearest for both magnification and minification.
pub fn nearest_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Nearest sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

/// Reject images the device cannot hold before wgpu raises a validation error.
pub fn check_texture_size(label: &str, width: u32, height: u32, max_dimension: u32) -> Result<()> {
    if width == 0 || height == 0 {
        bail!("texture '{label}' is empty ({width}x{height})");
    }
    if width > max_dimension || height > max_dimension {
        bail!(
            "texture '{label}' is {width}x{height}, larger than the GPU limit of {max_dimension}"
        );
    }
    Ok(())
}

/// A block texture living on the GPU, ready to bind at group 1.
pub struct GpuTexture {
    pub bind_group: wgpu::BindGroup,
}

impl GpuTexture {
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        label: &str,
        data: &TextureData,
    ) -> Result<Self> {
        debug_assert!(data.is_valid(), "texture '{label}' has inconsistent size");
        check_texture_size(
            label,
            data.width,
            data.height,
            device.limits().max_texture_dimension_2d,
        )?;
        let size = wgpu::Extent3d {
            width: data.width,
            height: data.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
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
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            &data.data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(data.row_pitch()),
                rows_per_image: Some(data.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        log::debug!("Uploaded texture '{}' ({}x{})", label, data.width, data.height);
        Ok(Self { bind_group })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_texture_is_rejected() {
        let err = check_texture_size("all", 4096, 16, 2048).unwrap_err();
        assert!(err.to_string().contains("4096x16"));
        assert!(check_texture_size("side", 16, 4096, 2048).is_err());
    }

    #[test]
    fn texture_within_limit_is_accepted() {
        assert!(check_texture_size("all", 16, 16, 2048).is_ok());
        assert!(check_texture_size("all", 2048, 2048, 2048).is_ok());
        assert!(check_texture_size("all", 0, 16, 2048).is_err());
    }
}
