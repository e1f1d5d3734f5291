//! HTML export
//!
//! - `options` - flags, encoding and font size mapping
//! - `encoding` - output character encodings
//! - `images` - image sinks and URL helpers
//! - `writer` - the per-export document walk
//! - `exporter` - reusable exporter holding image state across exports
//! - `api` - one-shot entry points

mod api;
mod encoding;
mod exporter;
mod images;
mod options;
mod writer;

pub use api::{export_html, export_html_bytes, export_html_file};
pub use encoding::OutputEncoding;
pub use exporter::HtmlExporter;
pub use images::{data_url, file_url, DirectoryImageSink, ImageSink, MemoryFile, MemoryImageSink};
pub use options::{ExportFlags, HtmlExportOptions, ImageMode, DEFAULT_FONT_SIZE_MAPPING};
