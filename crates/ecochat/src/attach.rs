// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading local files into upload payloads.

use std::path::Path;

use ecochat_core::{EcochatError, FileRef};

/// MIME type for a file name, by extension. `None` lets the gateway sniff it.
fn mime_for(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "pdf" => "application/pdf",
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => return None,
    };
    Some(mime)
}

/// Reads `path` into a [`FileRef`] named after its final component.
pub async fn load_attachment(path: &Path) -> Result<FileRef, EcochatError> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| EcochatError::Internal(format!("not a file path: {}", path.display())))?
        .to_string();

    let file = FileRef::new(name, bytes);
    Ok(match mime_for(&file.name) {
        Some(mime) => file.with_mime_type(mime),
        None => file,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_by_extension() {
        assert_eq!(mime_for("report.PDF"), Some("application/pdf"));
        assert_eq!(mime_for("data.csv"), Some("text/csv"));
        assert_eq!(mime_for("archive.tar.gz"), None);
        assert_eq!(mime_for("Makefile"), None);
    }

    #[tokio::test]
    async fn loads_file_contents_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "remember the milk").unwrap();

        let file = load_attachment(&path).await.unwrap();
        assert_eq!(file.name, "notes.txt");
        assert_eq!(file.mime_type.as_deref(), Some("text/plain"));
        assert_eq!(file.bytes, b"remember the milk");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_attachment(&dir.path().join("absent.pdf")).await.unwrap_err();
        assert!(matches!(err, EcochatError::Io(_)));
    }
}
