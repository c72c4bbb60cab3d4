//! Startup pipeline: model file -> decoded textures -> face assignment.

use std::path::Path;

use crate::{
    error::{AssetError, AssetResult},
    faces::{FaceTextures, assign_faces},
    model::{BlockModel, TextureMap, model_folder, texture_file},
    texture::TextureData,
};

/// Everything the renderer needs to draw one block.
#[derive(Clone, Debug)]
pub struct BlockPreview {
    pub parent: String,
    /// Decoded textures in declaration order, keyed by role.
    pub textures: Vec<(String, TextureData)>,
    /// Index into `textures` for each face.
    pub faces: FaceTextures<usize>,
}

impl BlockPreview {
    /// Parse the model, load every texture it declares, then assign faces.
    /// The first texture that fails to load aborts the whole preview.
    pub fn load(model_path: impl AsRef<Path>) -> AssetResult<Self> {
        let model_path = model_path.as_ref();
        let model = BlockModel::load(model_path)?;
        let folder = model_folder(model_path);

        let mut textures = Vec::with_capacity(model.textures.len());
        let mut slots = TextureMap::new();
        for (role, reference) in model.textures.iter() {
            let path = texture_file(reference, folder);
            let data = TextureData::load_png(&path).map_err(|source| AssetError::TextureLoad {
                role: role.to_string(),
                path: path.clone(),
                source: Box::new(source),
            })?;
            slots.insert(role, textures.len());
            textures.push((role.to_string(), data));
        }

        let faces = assign_faces(&model.parent, &slots)?;
        log::info!(
            "Block '{}' ready: {} texture(s) over 6 faces",
            model.parent,
            textures.len()
        );

        Ok(Self {
            parent: model.parent,
            textures,
            faces,
        })
    }

}
