pub(crate) mod clipboard;
pub(crate) mod images;
pub(crate) mod text;

pub(crate) use clipboard::{ClipboardError, ClipboardImage, ClipboardWriter, SystemClipboard};
pub(crate) use images::{parse_image_paths, ImageRegistry, ImageSelectionError, ImageSource};
pub(crate) use text::sanitize_paste;
