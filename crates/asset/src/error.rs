//! Error type shared by every asset loader.

use std::path::PathBuf;

use thiserror::Error;

use crate::faces::FaceLayout;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("'model_path' is missing or empty in {}", .0.display())]
    MissingModelPath(PathBuf),

    #[error("failed to decode image {}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to load texture '{role}' from {}", .path.display())]
    TextureLoad {
        role: String,
        path: PathBuf,
        #[source]
        source: Box<AssetError>,
    },

    #[error("missing textures for {layout} model: {}", .missing.join(", "))]
    MissingRoles {
        layout: FaceLayout,
        missing: Vec<&'static str>,
    },

    #[error("unsupported or too complex model parent: '{0}'")]
    UnsupportedParent(String),

    #[error("model declares no textures")]
    NoTextures,
}

pub type AssetResult<T> = Result<T, AssetError>;

impl AssetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn texture_failure_names_cause_once_in_chain() {
        let path = PathBuf::from("textures/block/missing.png");
        let err = AssetError::TextureLoad {
            role: "side".into(),
            path: path.clone(),
            source: Box::new(AssetError::NotFound(path)),
        };

        let top = err.to_string();
        assert!(!top.contains("file not found"), "{top}");

        let mut chain = Vec::new();
        let mut cur: Option<&dyn std::error::Error> = Some(&err);
        while let Some(e) = cur {
            chain.push(e.to_string());
            cur = e.source();
        }
        let full = chain.join(": ");
        assert_eq!(full.matches("file not found").count(), 1, "{full}");
    }

    #[test]
    fn io_error_message_leaves_cause_to_source() {
        let err = AssetError::io(
            "path.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "failed to read path.json");
        assert_eq!(err.source().map(|e| e.to_string()), Some("denied".to_string()));
    }
}
