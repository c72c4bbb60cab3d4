//! Asset loading/parsers for the block previewer.
//! Launcher file, block model JSON, PNG textures, cube geometry and the
//! face-texture assignment rules.

pub mod block;
pub mod cube;
pub mod error;
pub mod faces;
pub mod launcher;
pub mod mesh;
pub mod model;
pub mod texture;

pub use block::BlockPreview;
pub use error::{AssetError, AssetResult};
