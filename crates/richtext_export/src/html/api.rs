//! Public API for HTML export
//!
//! One-shot entry points that build an [`HtmlExporter`] from options, export
//! once and drop it. Use an exporter directly to keep image naming and the
//! stored image list across several exports.
//!
//! Memory image mode is rejected here: the registry would be dropped along
//! with the exporter. Create an [`HtmlExporter`] and read its
//! [`HtmlExporter::memory_sink`] instead.

use super::exporter::HtmlExporter;
use super::options::{HtmlExportOptions, ImageMode};
use crate::{ExportError, ExportResult};
use richtext_model::{RichTextBuffer, StyleLookup};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export a buffer as HTML to a writer
///
/// # Arguments
///
/// * `buffer` - The document to export
/// * `lookup` - Style sheet used to resolve named styles, if any
/// * `writer` - Destination of the encoded document
/// * `options` - Flags, encoding and font size mapping
pub fn export_html<W: Write>(
    buffer: &RichTextBuffer,
    lookup: Option<&dyn StyleLookup>,
    writer: W,
    options: &HtmlExportOptions,
) -> ExportResult<()> {
    one_shot_exporter(options)?.export(buffer, lookup, writer)
}

/// Export a buffer as HTML into memory, encoded as configured
pub fn export_html_bytes(
    buffer: &RichTextBuffer,
    lookup: Option<&dyn StyleLookup>,
    options: &HtmlExportOptions,
) -> ExportResult<Vec<u8>> {
    one_shot_exporter(options)?.export_to_bytes(buffer, lookup)
}

/// Export a buffer as HTML to a file, creating parent directories
pub fn export_html_file(
    buffer: &RichTextBuffer,
    lookup: Option<&dyn StyleLookup>,
    path: &Path,
    options: &HtmlExportOptions,
) -> ExportResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut exporter = one_shot_exporter(options)?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    exporter.export(buffer, lookup, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn one_shot_exporter(options: &HtmlExportOptions) -> ExportResult<HtmlExporter> {
    if options.image_mode() == ImageMode::Memory {
        return Err(ExportError::ImageSink(
            "memory image mode needs an HtmlExporter that outlives the export".to_string(),
        ));
    }
    Ok(HtmlExporter::new(options.clone()))
}
