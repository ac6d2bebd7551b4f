use std::path::Path;

use anyhow::Context;

use crate::foundation::error::CanvasResult;

/// One input image: raw bytes plus the name it was declared with.
///
/// The bytes are never modified; decoding produces a separate [`Raster`](crate::Raster).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    /// Declared file name (may include directories).
    pub name: String,
    /// Declared media type such as `image/png`, when the intake layer knows it.
    pub media_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            media_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Read a file from disk, using its file name as the declared name.
    pub fn read(path: &Path) -> CanvasResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read source '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }

    /// Base name with directories and the final extension removed.
    pub fn stem(&self) -> String {
        stem_of(&self.name)
    }
}

/// Base name of `name` with directories and the final extension stripped.
///
/// A name that is only an extension (`.hidden`) is kept as-is.
pub fn stem_of(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match base.rfind('.') {
        Some(dot) if dot > 0 => base[..dot].to_string(),
        _ => base.to_string(),
    }
}
