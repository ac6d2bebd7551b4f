use std::{
    collections::HashSet,
    io::{Cursor, Write},
};

use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::{
    batch::orchestrator::OutputArtifact,
    encode::jpeg::OUTPUT_MEDIA_TYPE,
    foundation::error::{CanvasError, CanvasResult},
};

/// Default archive name (without extension).
pub const DEFAULT_ARCHIVE_NAME: &str = "resized-images";
/// Extension of the archive deliverable (without the dot).
pub const ARCHIVE_EXTENSION: &str = "zip";
const ARCHIVE_MEDIA_TYPE: &str = "application/zip";

/// How finished artifacts are handed over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageMode {
    /// One deliverable per artifact.
    Individual,
    /// All artifacts inside one ZIP container.
    #[default]
    Archive,
}

/// A named blob ready for delivery (saved to disk, downloaded, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deliverable {
    pub name: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Group artifacts into deliverables.
///
/// Batches with fewer than two artifacts are always delivered individually, whatever `mode`
/// says. In archive mode entry names that collide are made unique with [`dedupe_names`].
pub fn package(
    artifacts: Vec<OutputArtifact>,
    mode: PackageMode,
    archive_name: &str,
) -> CanvasResult<Vec<Deliverable>> {
    if mode == PackageMode::Individual || artifacts.len() < 2 {
        return Ok(artifacts
            .into_iter()
            .map(|a| Deliverable {
                name: a.filename,
                media_type: OUTPUT_MEDIA_TYPE,
                bytes: a.bytes,
            })
            .collect());
    }

    let name = format!("{archive_name}.{ARCHIVE_EXTENSION}");
    let bytes = write_archive(&artifacts)?;
    tracing::info!(
        archive = %name,
        entries = artifacts.len(),
        bytes = bytes.len(),
        "archive written"
    );
    Ok(vec![Deliverable {
        name,
        media_type: ARCHIVE_MEDIA_TYPE,
        bytes,
    }])
}

/// Serialize artifacts into an in-memory ZIP, in order, with unique entry names.
pub fn write_archive(artifacts: &[OutputArtifact]) -> CanvasResult<Vec<u8>> {
    let names = dedupe_names(artifacts.iter().map(|a| a.filename.as_str()));

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (artifact, name) in artifacts.iter().zip(names) {
        // JPEG data does not shrink under deflate; store it.
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| CanvasError::packaging(format!("start entry '{name}': {e}")))?;
        writer
            .write_all(&artifact.bytes)
            .map_err(|e| CanvasError::packaging(format!("write entry '{name}': {e}")))?;
    }
    let cursor = writer
        .finish()
        .map_err(|e| CanvasError::packaging(format!("finish archive: {e}")))?;
    Ok(cursor.into_inner())
}

/// Make names unique, keeping the first occurrence and suffixing later ones.
///
/// `photo.jpg`, `photo.jpg`, `photo.jpg` become `photo.jpg`, `photo-2.jpg`, `photo-3.jpg`. A
/// suffix that would itself collide with a name already taken is skipped.
pub fn dedupe_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let names: Vec<&str> = names.into_iter().collect();
    let mut taken: HashSet<String> = HashSet::with_capacity(names.len());
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        if taken.insert(name.to_string()) {
            out.push(name.to_string());
            continue;
        }
        let (base, ext) = split_extension(name);
        let mut n = 2usize;
        let unique = loop {
            let candidate = format!("{base}-{n}{ext}");
            if !taken.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        tracing::debug!(original = name, renamed = %unique, "disambiguated colliding name");
        taken.insert(unique.clone());
        out.push(unique);
    }
    out
}

/// `("photo", ".jpg")` for `photo.jpg`; the extension part keeps its dot.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) if dot > 0 => name.split_at(dot),
        _ => (name, ""),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/package/archive.rs"]
mod tests;
