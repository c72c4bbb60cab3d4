//! Face-texture assignment: map a model's declared parent to the texture
//! each of the six cube faces shows.
//!
//! The parent string is matched by substring, first rule wins:
//! - top/bottom/side (`cube_top_bottom`, `top_bottom`, `bottom_top`)
//! - column end/side (`cube_column`, `log`, `wood`)
//! - one texture on all faces (`cube_all`, `leaves`, `cube`)

use std::fmt;

use crate::{
    cube::{FACE_COUNT, Face},
    error::{AssetError, AssetResult},
    model::TextureMap,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceLayout {
    TopBottom,
    Column,
    All,
}

impl FaceLayout {
    const RULES: [(FaceLayout, &'static [&'static str]); 3] = [
        (
            FaceLayout::TopBottom,
            &["cube_top_bottom", "top_bottom", "bottom_top"],
        ),
        (FaceLayout::Column, &["cube_column", "log", "wood"]),
        (FaceLayout::All, &["cube_all", "leaves", "cube"]),
    ];

    /// `None` means the parent is not a shape this viewer can draw.
    pub fn classify(parent: &str) -> Option<Self> {
        let parent = parent.to_lowercase();
        Self::RULES
            .iter()
            .find(|(_, needles)| needles.iter().any(|n| parent.contains(n)))
            .map(|(layout, _)| *layout)
    }

    /// Roles that must be present for the layout to be drawable.
    pub fn required_roles(self) -> &'static [&'static str] {
        match self {
            FaceLayout::TopBottom => &["top", "bottom", "side"],
            FaceLayout::Column => &["end", "side"],
            FaceLayout::All => &[],
        }
    }
}

impl fmt::Display for FaceLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FaceLayout::TopBottom => "top/bottom/side",
            FaceLayout::Column => "column (end, side)",
            FaceLayout::All => "single texture",
        })
    }
}

/// One texture handle per cube face, indexed by [`Face`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceTextures<T>([T; FACE_COUNT]);

impl<T> FaceTextures<T> {
    pub fn get(&self, face: Face) -> &T {
        &self.0[face.index()]
    }

    pub fn as_array(&self) -> &[T; FACE_COUNT] {
        &self.0
    }

    /// `(face, handle)` in face order.
    pub fn iter(&self) -> impl Iterator<Item = (Face, &T)> {
        Face::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T: Clone> FaceTextures<T> {
    fn sides_with_caps(side: &T, top: &T, bottom: &T) -> Self {
        Self([
            side.clone(),
            side.clone(),
            side.clone(),
            side.clone(),
            top.clone(),
            bottom.clone(),
        ])
    }

    fn uniform(value: &T) -> Self {
        Self(std::array::from_fn(|_| value.clone()))
    }
}

/// Assign textures to the six faces. Either every face gets a texture or the
/// call fails; a partial assignment is never returned.
pub fn assign_faces<T: Clone>(parent: &str, textures: &TextureMap<T>) -> AssetResult<FaceTextures<T>> {
    let layout = FaceLayout::classify(parent)
        .ok_or_else(|| AssetError::UnsupportedParent(parent.to_string()))?;

    let faces = match layout {
        FaceLayout::TopBottom => {
            match (textures.get("top"), textures.get("bottom"), textures.get("side")) {
                (Some(top), Some(bottom), Some(side)) => {
                    FaceTextures::sides_with_caps(side, top, bottom)
                }
                _ => return Err(missing_roles(layout, textures)),
            }
        }
        FaceLayout::Column => match (textures.get("end"), textures.get("side")) {
            (Some(end), Some(side)) => FaceTextures::sides_with_caps(side, end, end),
            _ => return Err(missing_roles(layout, textures)),
        },
        FaceLayout::All => {
            let texture = textures
                .get("all")
                .or_else(|| textures.first().map(|(_, v)| v))
                .ok_or(AssetError::NoTextures)?;
            FaceTextures::uniform(texture)
        }
    };

    log::debug!("Parent '{}' classified as {} layout", parent, layout);
    Ok(faces)
}

fn missing_roles<T>(layout: FaceLayout, textures: &TextureMap<T>) -> AssetError {
    let missing = layout
        .required_roles()
        .iter()
        .copied()
        .filter(|role| textures.get(role).is_none())
        .collect();
    AssetError::MissingRoles { layout, missing }
}
