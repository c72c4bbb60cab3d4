//! Block model JSON (`parent` + `textures`) and texture path resolution.

use std::{
    fmt,
    fs,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, Visitor},
};

use crate::error::{AssetError, AssetResult};

const NAMESPACE_PREFIX: &str = "minecraft:";

/// Ordered role -> value map. Keeps the declaration order of the JSON object.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureMap<T> {
    entries: Vec<(String, T)>,
}

impl<T> TextureMap<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace a role. Replacing keeps the original position.
    pub fn insert(&mut self, role: impl Into<String>, value: T) {
        let role = role.into();
        match self.entries.iter_mut().find(|(r, _)| *r == role) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((role, value)),
        }
    }

    pub fn get(&self, role: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(r, _)| r == role)
            .map(|(_, v)| v)
    }

    /// First declared entry.
    pub fn first(&self) -> Option<(&str, &T)> {
        self.entries.first().map(|(r, v)| (r.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(r, v)| (r.as_str(), v))
    }
}

impl<T> Default for TextureMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R: Into<String>> FromIterator<(R, T)> for TextureMap<T> {
    fn from_iter<I: IntoIterator<Item = (R, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (role, value) in iter {
            map.insert(role, value);
        }
        map
    }
}

struct TextureMapVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for TextureMapVisitor<T> {
    type Value = TextureMap<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of texture roles")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = TextureMap::new();
        while let Some((role, value)) = access.next_entry::<String, T>()? {
            map.insert(role, value);
        }
        Ok(map)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for TextureMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TextureMapVisitor(PhantomData))
    }
}

/// The subset of a block model file this viewer understands.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct BlockModel {
    #[serde(default)]
    pub parent: String,
    #[serde(default)]
    pub textures: TextureMap<String>,
}

impl BlockModel {
    pub fn load(path: impl AsRef<Path>) -> AssetResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| AssetError::io(path, e))?;
        let model = serde_json::from_str(&raw).map_err(|source| AssetError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Parsed block model {:?}", path);
        Ok(model)
    }
}

/// Directory holding the model file; texture references resolve against it.
pub fn model_folder(model_path: &Path) -> &Path {
    model_path.parent().unwrap_or_else(|| Path::new(""))
}

/// `minecraft:block/stone` -> `<model_folder>/textures/block/stone.png`
pub fn texture_file(reference: &str, model_folder: &Path) -> PathBuf {
    let reference = reference
        .strip_prefix(NAMESPACE_PREFIX)
        .unwrap_or(reference);
    model_folder
        .join("textures")
        .join(format!("{reference}.png"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_declaration_order() {
        let src = r#"{
            "parent": "minecraft:block/cube_all",
            "textures": { "particle": "block/dirt", "all": "block/stone" }
        }"#;
        let model: BlockModel = serde_json::from_str(src).unwrap();
        assert_eq!(model.parent, "minecraft:block/cube_all");
        let roles: Vec<&str> = model.textures.iter().map(|(r, _)| r).collect();
        assert_eq!(roles, ["particle", "all"]);
        assert_eq!(model.textures.first(), Some(("particle", &"block/dirt".to_string())));
    }

    #[test]
    fn missing_keys_default_to_empty() {
        let model: BlockModel = serde_json::from_str("{}").unwrap();
        assert_eq!(model.parent, "");
        assert!(model.textures.is_empty());
    }

    #[test]
    fn non_string_texture_is_rejected() {
        let src = r#"{ "parent": "block/cube_all", "textures": { "all": 3 } }"#;
        assert!(serde_json::from_str::<BlockModel>(src).is_err());
    }

    #[test]
    fn texture_path_strips_namespace() {
        let folder = Path::new("assets/models");
        assert_eq!(
            texture_file("minecraft:block/oak_log", folder),
            Path::new("assets/models/textures/block/oak_log.png")
        );
        assert_eq!(
            texture_file("block/stone", folder),
            Path::new("assets/models/textures/block/stone.png")
        );
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(BlockModel::load(&missing), Err(AssetError::NotFound(_))));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(BlockModel::load(&broken), Err(AssetError::Json { .. })));
    }

    #[test]
    fn model_folder_of_bare_file_name_is_empty() {
        assert_eq!(model_folder(Path::new("stone.json")), Path::new(""));
        assert_eq!(model_folder(Path::new("a/b/stone.json")), Path::new("a/b"));
    }
}
