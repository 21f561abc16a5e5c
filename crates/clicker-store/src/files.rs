//! Whole-document file I/O.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StoreError};

/// Suffix given to documents that failed to parse.
pub const CORRUPT_SUFFIX: &str = "corrupt";

fn io_error(path: &Path, err: &std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

/// Read a JSON document.
///
/// A missing file yields the default document. A file that does not parse
/// also yields the default document; it is moved aside to
/// `<name>.corrupt` so the next write does not destroy it.
///
/// # Errors
///
/// Returns `StoreError::Io` if the file exists but cannot be read.
pub fn read_document<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Document not found, starting empty");
            return Ok(T::default());
        }
        Err(err) => return Err(io_error(path, &err)),
    };

    match serde_json::from_slice(&bytes) {
        Ok(document) => Ok(document),
        Err(err) => {
            let aside = corrupt_path(path);
            tracing::warn!(
                path = %path.display(),
                moved_to = %aside.display(),
                error = %err,
                "Malformed document, starting empty"
            );
            fs::rename(path, &aside).map_err(|e| io_error(path, &e))?;
            Ok(T::default())
        }
    }
}

/// Serialize a document to pretty JSON.
///
/// # Errors
///
/// Returns `StoreError::Serialization` if the value cannot be serialized.
pub fn encode_document<T: Serialize>(document: &T) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(document).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Replace a document on disk.
///
/// The bytes go to a sibling temp file first and are renamed over the
/// target, so readers never see a half-written document.
///
/// # Errors
///
/// Returns `StoreError::Io` if the file cannot be written.
pub fn write_document(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = temp_path(path);
    fs::write(&tmp, bytes).map_err(|e| io_error(&tmp, &e))?;
    fs::rename(&tmp, path).map_err(|e| io_error(path, &e))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(CORRUPT_SUFFIX);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    type Doc = BTreeMap<String, u32>;

    #[test]
    fn missing_file_reads_as_default() {
        let dir = TempDir::new().unwrap();
        let doc: Doc = read_document(&dir.path().join("absent.json")).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        let mut doc = Doc::new();
        doc.insert("a".into(), 1);

        write_document(&path, &encode_document(&doc).unwrap()).unwrap();
        let read: Doc = read_document(&path).unwrap();
        assert_eq!(read, doc);
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn malformed_file_is_moved_aside() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, b"{ not json").unwrap();

        let doc: Doc = read_document(&path).unwrap();
        assert!(doc.is_empty());
        assert!(!path.exists());
        assert_eq!(
            fs::read(dir.path().join("doc.json.corrupt")).unwrap(),
            b"{ not json"
        );
    }
}
