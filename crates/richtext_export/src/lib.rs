//! Rich Text Export - HTML serialization of rich text buffers
//!
//! This crate walks a [`richtext_model::RichTextBuffer`] and writes an HTML
//! document that reproduces its formatting. Consecutive runs only emit the
//! tags needed to move from the previous style to the next one, list
//! paragraphs are grouped into nested `<ol>`/`<ul>` elements, and embedded
//! images are inlined as data URLs or handed to an [`ImageSink`].

mod error;
pub mod html;

pub use error::*;
pub use html::{
    data_url, export_html, export_html_bytes, export_html_file, file_url, DirectoryImageSink,
    ExportFlags, HtmlExportOptions, HtmlExporter, ImageMode, ImageSink, MemoryFile,
    MemoryImageSink, OutputEncoding, DEFAULT_FONT_SIZE_MAPPING,
};
