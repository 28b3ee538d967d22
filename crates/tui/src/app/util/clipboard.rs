use arboard::{Clipboard, Error as ArboardError};
use base64::Engine;
use std::env;
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard has no image")]
    NotAvailable,
    #[error("clipboard image is too large ({bytes} bytes, limit {max_bytes})")]
    TooLarge { bytes: usize, max_bytes: usize },
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("failed to encode clipboard image: {0}")]
    Encode(String),
}

/// Image read from the system clipboard, kept in memory as a PNG data URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipboardImage {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
    pub encoded_bytes: usize,
}

/// Write-only text access plus image paste; swapped for a fake in tests.
pub trait ClipboardWriter {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    fn read_image(&mut self, max_bytes: usize) -> Result<ClipboardImage, ClipboardError>;
}

#[derive(Default)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let native_result = Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text.to_string()))
            .map_err(|error| ClipboardError::Clipboard(error.to_string()));
        match native_result {
            Ok(()) => Ok(()),
            Err(native_error) => {
                if !is_wsl_environment() {
                    return Err(native_error);
                }
                debug!("native clipboard failed under WSL, falling back to clip.exe");
                write_windows_clipboard_text(text).map_err(|windows_error| {
                    warn!(%windows_error, "clip.exe fallback failed");
                    native_error
                })
            }
        }
    }

    fn read_image(&mut self, max_bytes: usize) -> Result<ClipboardImage, ClipboardError> {
        let mut clipboard =
            Clipboard::new().map_err(|error| ClipboardError::Clipboard(error.to_string()))?;
        let image = match clipboard.get_image() {
            Ok(image) => image,
            Err(ArboardError::ContentNotAvailable) => return Err(ClipboardError::NotAvailable),
            Err(error) => return Err(ClipboardError::Clipboard(error.to_string())),
        };
        clipboard_image_from_rgba(image.width, image.height, image.bytes.as_ref(), max_bytes)
    }
}

fn encode_png_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, ClipboardError> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|error| ClipboardError::Encode(format!("PNG header: {error}")))?;
        writer
            .write_image_data(rgba)
            .map_err(|error| ClipboardError::Encode(format!("PNG data: {error}")))?;
    }
    Ok(bytes)
}

pub(crate) fn clipboard_image_from_rgba(
    width: usize,
    height: usize,
    rgba: &[u8],
    max_bytes: usize,
) -> Result<ClipboardImage, ClipboardError> {
    let width = u32::try_from(width)
        .map_err(|_| ClipboardError::Encode("image width is too large".to_string()))?;
    let height = u32::try_from(height)
        .map_err(|_| ClipboardError::Encode("image height is too large".to_string()))?;
    let encoded = encode_png_rgba(width, height, rgba)?;
    if encoded.len() > max_bytes {
        return Err(ClipboardError::TooLarge {
            bytes: encoded.len(),
            max_bytes,
        });
    }
    let data_url = format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(encoded.as_slice())
    );
    Ok(ClipboardImage {
        data_url,
        width,
        height,
        encoded_bytes: encoded.len(),
    })
}

fn is_wsl_environment() -> bool {
    if env::var_os("WSL_DISTRO_NAME").is_some() || env::var_os("WSL_INTEROP").is_some() {
        return true;
    }
    fs::read_to_string("/proc/sys/kernel/osrelease")
        .map(|value| value.to_ascii_lowercase().contains("microsoft"))
        .unwrap_or(false)
}

fn write_windows_clipboard_text(text: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new("clip.exe")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|error| ClipboardError::Clipboard(format!("failed to launch clip.exe: {error}")))?;
    if let Some(stdin) = child.stdin.as_mut() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|error| ClipboardError::Clipboard(format!("clip.exe write: {error}")))?;
    }
    let status = child
        .wait()
        .map_err(|error| ClipboardError::Clipboard(format!("clip.exe wait: {error}")))?;
    if !status.success() {
        return Err(ClipboardError::Clipboard(format!(
            "clip.exe exited with status {status}"
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fake {
    use super::{ClipboardError, ClipboardImage, ClipboardWriter};

    /// Records writes; optionally fails every call.
    #[derive(Default)]
    pub(crate) struct FakeClipboard {
        pub(crate) written: Vec<String>,
        pub(crate) fail: bool,
        pub(crate) image: Option<ClipboardImage>,
    }

    impl ClipboardWriter for FakeClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Clipboard("permission denied".to_string()));
            }
            self.written.push(text.to_string());
            Ok(())
        }

        fn read_image(&mut self, _max_bytes: usize) -> Result<ClipboardImage, ClipboardError> {
            self.image.clone().ok_or(ClipboardError::NotAvailable)
        }
    }
}
