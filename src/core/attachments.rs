//! Resume and cover-letter attachment folders.
//!
//! The store's contract with attachments is small: list stored filenames to
//! feed the file-select fields, and ingest-copy a file in, optionally
//! renaming it with an ingestion date suffix before the extension
//! (`resume_03_14_2024.pdf`) so repeated uploads do not collide.

use crate::core::error::TrackerError;
use chrono::Local;
use clap::ValueEnum;
use std::fs;
use std::path::Path;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum AttachmentKind {
    Resume,
    CoverLetter,
}

impl AttachmentKind {
    /// Folder name under the store root.
    pub fn folder(self) -> &'static str {
        match self {
            AttachmentKind::Resume => "resume",
            AttachmentKind::CoverLetter => "cover_letter",
        }
    }
}

/// Sorted names of the plain files in the attachment folder. A folder that
/// does not exist yet lists as empty.
pub fn list_files(root: &Path, kind: AttachmentKind) -> Result<Vec<String>, TrackerError> {
    let dir = root.join(kind.folder());
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Copy `source` into the attachment folder and return the stored filename,
/// ready for immediate selection. With `date_suffix`, the stored name embeds
/// the ingestion date before the extension. A source without an extension is
/// rejected.
pub fn ingest(
    root: &Path,
    source: &Path,
    kind: AttachmentKind,
    date_suffix: bool,
) -> Result<String, TrackerError> {
    let file_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            TrackerError::InvalidAttachment(format!("invalid source path: {}", source.display()))
        })?;
    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, ext),
        _ => {
            return Err(TrackerError::InvalidAttachment(format!(
                "\"{file_name}\" has no file extension"
            )));
        }
    };

    let stored_name = if date_suffix {
        format!(
            "{stem}{}.{extension}",
            Local::now().format("_%m_%d_%Y")
        )
    } else {
        file_name.to_string()
    };

    let dir = root.join(kind.folder());
    fs::create_dir_all(&dir)?;
    fs::copy(source, dir.join(&stored_name))?;
    Ok(stored_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn ingest_embeds_date_before_extension() {
        let tmp = tempdir().unwrap();
        let source = tmp.path().join("resume.v2.pdf");
        fs::write(&source, b"pdf bytes").unwrap();

        let stored = ingest(tmp.path(), &source, AttachmentKind::Resume, true).unwrap();
        let expected = format!("resume.v2{}.pdf", Local::now().format("_%m_%d_%Y"));
        assert_eq!(stored, expected);
        assert!(tmp.path().join("resume").join(&stored).exists());

        let listed = list_files(tmp.path(), AttachmentKind::Resume).unwrap();
        assert_eq!(listed, vec![stored]);
    }

    #[test]
    fn ingest_without_suffix_keeps_name() {
        let tmp = tempdir().unwrap();
        let source = tmp.path().join("letter.docx");
        fs::write(&source, b"docx").unwrap();

        let stored = ingest(tmp.path(), &source, AttachmentKind::CoverLetter, false).unwrap();
        assert_eq!(stored, "letter.docx");
        assert!(tmp.path().join("cover_letter/letter.docx").exists());
    }

    #[test]
    fn ingest_rejects_missing_extension() {
        let tmp = tempdir().unwrap();
        let source = tmp.path().join("resume");
        fs::write(&source, b"bytes").unwrap();

        let err = ingest(tmp.path(), &source, AttachmentKind::Resume, true).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidAttachment(_)));
    }

    #[test]
    fn missing_folder_lists_empty() {
        let tmp = tempdir().unwrap();
        assert!(list_files(tmp.path(), AttachmentKind::Resume)
            .unwrap()
            .is_empty());
    }
}
