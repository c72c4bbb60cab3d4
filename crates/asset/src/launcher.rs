//! Launcher path file: a tiny JSON document pointing at the model to preview.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{AssetError, AssetResult};

pub const PATH_FILE_NAME: &str = "path.json";

#[derive(Debug, Default, Deserialize)]
struct LaunchFile {
    #[serde(default)]
    model_path: Option<String>,
}

/// `path.json` next to the running executable.
pub fn default_path_file() -> AssetResult<PathBuf> {
    let exe = std::env::current_exe().map_err(|e| AssetError::io("<current executable>", e))?;
    Ok(exe
        .parent()
        .map(|dir| dir.join(PATH_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(PATH_FILE_NAME)))
}

/// Read the launcher file and return the model path it names.
/// The model file must exist; a relative path is returned unchanged.
pub fn read_model_path(path_file: impl AsRef<Path>) -> AssetResult<PathBuf> {
    let path_file = path_file.as_ref();
    if !path_file.is_file() {
        return Err(AssetError::NotFound(path_file.to_path_buf()));
    }

    let raw = fs::read_to_string(path_file).map_err(|e| AssetError::io(path_file, e))?;
    let launch: LaunchFile = serde_json::from_str(&raw).map_err(|source| AssetError::Json {
        path: path_file.to_path_buf(),
        source,
    })?;

    let model_path = match launch.model_path {
        Some(p) if !p.is_empty() => PathBuf::from(p),
        _ => return Err(AssetError::MissingModelPath(path_file.to_path_buf())),
    };
    if !model_path.is_file() {
        return Err(AssetError::NotFound(model_path));
    }

    log::info!("Launcher file {:?} -> model {:?}", path_file, model_path);
    Ok(model_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_launch_file(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join(PATH_FILE_NAME);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn resolves_existing_model() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("stone.json");
        fs::write(&model, "{}").unwrap();
        let body = serde_json::json!({ "model_path": model }).to_string();
        let launch = write_launch_file(dir.path(), &body);

        assert_eq!(read_model_path(&launch).unwrap(), model);
    }

    #[test]
    fn missing_launch_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_model_path(dir.path().join(PATH_FILE_NAME)).unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }

    #[test]
    fn missing_or_empty_model_path_key() {
        let dir = tempfile::tempdir().unwrap();
        let launch = write_launch_file(dir.path(), r#"{ "other": 1 }"#);
        assert!(matches!(
            read_model_path(&launch),
            Err(AssetError::MissingModelPath(_))
        ));

        let launch = write_launch_file(dir.path(), r#"{ "model_path": "" }"#);
        assert!(matches!(
            read_model_path(&launch),
            Err(AssetError::MissingModelPath(_))
        ));
    }

    #[test]
    fn model_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("ghost.json");
        let body = serde_json::json!({ "model_path": model }).to_string();
        let launch = write_launch_file(dir.path(), &body);

        match read_model_path(&launch) {
            Err(AssetError::NotFound(p)) => assert_eq!(p, model),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn malformed_launch_file() {
        let dir = tempfile::tempdir().unwrap();
        let launch = write_launch_file(dir.path(), "model_path = x");
        assert!(matches!(read_model_path(&launch), Err(AssetError::Json { .. })));
    }
}
