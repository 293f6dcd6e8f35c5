//! Reading upload files from disk.

use std::path::Path;

use dimension_core::{FileMeta, FileSlot, UploadDraft};

use crate::error::{CliError, CliResult};

/// MIME type for the extensions the wizard accepts.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("glb") => "model/gltf-binary",
        Some("gltf") => "model/gltf+json",
        Some("obj") => "model/obj",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "",
    }
}

/// Describe a file without reading it.
pub async fn file_meta(path: &Path) -> CliResult<FileMeta> {
    let metadata = tokio::fs::metadata(path).await.map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    Ok(FileMeta::new(file_name, content_type_for(path), metadata.len()))
}

/// Validate `path` against `slot` and stage its bytes into the draft.
///
/// The size check runs on the file metadata, before the bytes are read.
pub async fn stage_file(draft: &mut UploadDraft<Vec<u8>>, slot: FileSlot, path: &Path) -> CliResult<()> {
    let meta = file_meta(path).await?;
    slot.accepts(&meta)?;

    let bytes = tokio::fs::read(path).await.map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    draft.stage(slot, meta, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimension_core::{StagingError, MarketError};
    use std::io::Write;

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for(Path::new("a.GLB")), "model/gltf-binary");
        assert_eq!(content_type_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.fbx")), "");
    }

    #[tokio::test]
    async fn test_stage_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.glb");
        std::fs::File::create(&path).unwrap().write_all(b"glTF").unwrap();

        let mut draft = UploadDraft::new();
        stage_file(&mut draft, FileSlot::Model, &path).await.unwrap();

        let staged = draft.staged(FileSlot::Model).unwrap();
        assert_eq!(staged.meta.file_name, "tree.glb");
        assert_eq!(staged.meta.size, 4);
        assert_eq!(staged.handle, b"glTF".to_vec());
    }

    #[tokio::test]
    async fn test_stage_wrong_type_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let mut draft = UploadDraft::new();
        let err = stage_file(&mut draft, FileSlot::Thumbnail, &path).await.unwrap_err();
        assert!(matches!(
            err,
            CliError::Market(MarketError::Staging(StagingError::UnsupportedType { .. }))
        ));
        assert!(draft.staged(FileSlot::Thumbnail).is_none());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let mut draft = UploadDraft::new();
        let err = stage_file(&mut draft, FileSlot::Model, Path::new("/nonexistent/x.glb"))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
