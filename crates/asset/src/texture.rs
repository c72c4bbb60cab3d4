//! Texture loading and data structures.
//! Decodes PNG block textures to RGBA8 before GPU upload.

use std::path::Path;

use crate::error::{AssetError, AssetResult};

/// Texture data in CPU-friendly format before GPU upload.
#[derive(Clone, Debug)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// Supported texture formats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextureFormat {
    Rgba8,
}

impl TextureData {
    /// Create a new texture with given dimensions and RGBA8 format.
    pub fn new_rgba8(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "Data size doesn't match RGBA8 format"
        );
        Self {
            data,
            width,
            height,
            format: TextureFormat::Rgba8,
        }
    }

    /// Load texture from PNG file. Row 0 of the result is the top of the image.
    pub fn load_png<P: AsRef<Path>>(path: P) -> AssetResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AssetError::NotFound(path.to_path_buf()));
        }
        log::info!("Loading texture from {:?}", path);

        let img = image::open(path).map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let data = rgba.into_raw();

        log::debug!("Loaded texture {}x{} with {} bytes", width, height, data.len());

        Ok(Self::new_rgba8(width, height, data))
    }

    /// Get the number of bytes per pixel for the format.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self.format {
            TextureFormat::Rgba8 => 4,
        }
    }

    /// Check if the texture data is valid.
    pub fn is_valid(&self) -> bool {
        let expected_size = (self.width * self.height * self.bytes_per_pixel()) as usize;
        self.data.len() == expected_size && self.width > 0 && self.height > 0
    }

    /// Bytes per row as expected by a GPU copy.
    pub fn row_pitch(&self) -> u32 {
        self.width * self.bytes_per_pixel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_png_decodes_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stone.png");
        let mut img = image::RgbaImage::new(2, 3);
        img.put_pixel(0, 0, image::Rgba([10, 20, 30, 255]));
        img.put_pixel(1, 2, image::Rgba([200, 100, 50, 128]));
        img.save(&path).unwrap();

        let tex = TextureData::load_png(&path).unwrap();
        assert_eq!((tex.width, tex.height), (2, 3));
        assert!(tex.is_valid());
        assert_eq!(tex.row_pitch(), 8);
        assert_eq!(&tex.data[..4], &[10, 20, 30, 255]);
        assert_eq!(&tex.data[tex.data.len() - 4..], &[200, 100, 50, 128]);
    }

    #[test]
    fn missing_png_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextureData::load_png(dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }

    #[test]
    fn garbage_png_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = TextureData::load_png(&path).unwrap_err();
        assert!(matches!(err, AssetError::Image { .. }));
    }
}
