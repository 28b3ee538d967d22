use super::clipboard::ClipboardImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use url::Url;
use uuid::Uuid;

const REFERENCE_PREFIX: &str = "blob:adboard/";
const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageSelectionError {
    #[error("no image paths given")]
    Empty,
    #[error("could not parse paths: {0}")]
    Parse(String),
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("unsupported image type: {}", .0.display())]
    UnsupportedType(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    File(PathBuf),
    Clipboard(ClipboardImage),
}

impl ImageSource {
    pub fn label(&self) -> String {
        match self {
            ImageSource::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            ImageSource::Clipboard(image) => {
                format!("clipboard {}x{}", image.width, image.height)
            }
        }
    }
}

/// Session-local table of transient image references.
///
/// References look like `blob:adboard/<uuid>` and resolve only while registered.
#[derive(Default)]
pub struct ImageRegistry {
    entries: HashMap<String, ImageSource>,
}

impl ImageRegistry {
    pub fn create(&mut self, source: ImageSource) -> String {
        let reference = format!("{REFERENCE_PREFIX}{}", Uuid::new_v4());
        debug!(%reference, source = %source.label(), "image reference created");
        self.entries.insert(reference.clone(), source);
        reference
    }

    pub fn revoke(&mut self, reference: &str) -> bool {
        let removed = self.entries.remove(reference).is_some();
        if removed {
            debug!(%reference, "image reference revoked");
        }
        removed
    }

    pub fn revoke_all<'a>(&mut self, references: impl IntoIterator<Item = &'a String>) {
        for reference in references {
            self.revoke(reference);
        }
    }

    pub fn resolve(&self, reference: &str) -> Option<&ImageSource> {
        self.entries.get(reference)
    }

    /// Display label for a reference; foreign strings are shown as-is.
    pub fn label_for(&self, reference: &str) -> String {
        self.resolve(reference)
            .map(ImageSource::label)
            .unwrap_or_else(|| reference.to_string())
    }

    /// URL usable outside this session: `file://` for picked files, the PNG data URL for
    /// clipboard images.
    pub fn export_url(&self, reference: &str) -> Option<String> {
        match self.resolve(reference)? {
            ImageSource::File(path) => {
                let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.clone());
                match Url::from_file_path(&absolute) {
                    Ok(url) => Some(url.to_string()),
                    Err(()) => Some(format!("file://{}", absolute.display())),
                }
            }
            ImageSource::Clipboard(image) => Some(image.data_url.clone()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Splits picker input into paths using shell quoting rules and validates each one.
pub fn parse_image_paths(input: &str) -> Result<Vec<PathBuf>, ImageSelectionError> {
    let parts =
        shell_words::split(input).map_err(|error| ImageSelectionError::Parse(error.to_string()))?;
    if parts.is_empty() {
        return Err(ImageSelectionError::Empty);
    }
    parts
        .into_iter()
        .map(|part| {
            let path = expand_home(&part);
            validate_image_path(&path)?;
            Ok(path)
        })
        .collect()
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

fn validate_image_path(path: &Path) -> Result<(), ImageSelectionError> {
    let metadata =
        std::fs::metadata(path).map_err(|_| ImageSelectionError::NotFound(path.to_path_buf()))?;
    if !metadata.is_file() {
        return Err(ImageSelectionError::NotAFile(path.to_path_buf()));
    }
    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false);
    if !supported {
        return Err(ImageSelectionError::UnsupportedType(path.to_path_buf()));
    }
    Ok(())
}
