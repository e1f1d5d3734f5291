//! Reusable HTML exporter
//!
//! The exporter owns the options and the image state that survives between
//! exports: the sink images are stored in, the counter used to name them and
//! the names stored so far.

use super::images::{DirectoryImageSink, ImagePersister, ImageSink, MemoryImageSink};
use super::options::{HtmlExportOptions, ImageMode};
use super::writer::HtmlWriter;
use crate::ExportResult;
use richtext_model::{RichTextBuffer, StyleLookup};
use std::io::Write;

/// Converts rich text buffers to HTML
#[derive(Debug)]
pub struct HtmlExporter {
    options: HtmlExportOptions,
    images: ImagePersister,
    /// Handle on the registry created for memory mode
    memory: Option<MemoryImageSink>,
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self::new(HtmlExportOptions::default())
    }
}

impl HtmlExporter {
    /// Create an exporter. The image sink follows the options' image mode:
    /// none for inline images, a fresh memory registry, or a directory sink
    /// in `temp_dir` (the system temp dir when unset).
    pub fn new(options: HtmlExportOptions) -> Self {
        let mut memory = None;
        let sink: Option<Box<dyn ImageSink>> = match options.image_mode() {
            ImageMode::Inline => None,
            ImageMode::Memory => {
                let registry = MemoryImageSink::new();
                memory = Some(registry.clone());
                Some(Box::new(registry))
            }
            ImageMode::Files => Some(Box::new(match &options.temp_dir {
                Some(dir) => DirectoryImageSink::new(dir.clone()),
                None => DirectoryImageSink::temp(),
            })),
        };

        Self {
            options,
            images: ImagePersister::new(sink),
            memory,
        }
    }

    /// Store images in `sink` instead, whatever the image mode
    pub fn with_image_sink(mut self, sink: impl ImageSink + 'static) -> Self {
        self.images.set_sink(Some(Box::new(sink)));
        self.memory = None;
        self
    }

    /// Registry holding the images of a memory-mode exporter created by
    /// [`HtmlExporter::new`]. `None` in other modes or after
    /// [`HtmlExporter::with_image_sink`].
    pub fn memory_sink(&self) -> Option<&MemoryImageSink> {
        self.memory.as_ref()
    }

    pub fn options(&self) -> &HtmlExportOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut HtmlExportOptions {
        &mut self.options
    }

    /// HTML font size (1-7) for a point size under the current mapping
    pub fn pt_to_size(&self, size: f32) -> u32 {
        self.options.pt_to_size(size)
    }

    /// Write `buffer` as HTML. Named styles are resolved through `lookup`.
    pub fn export<W: Write>(
        &mut self,
        buffer: &RichTextBuffer,
        lookup: Option<&dyn StyleLookup>,
        writer: W,
    ) -> ExportResult<()> {
        tracing::debug!(blocks = buffer.blocks.len(), flags = ?self.options.flags, "exporting html");
        HtmlWriter::new(writer, &self.options, lookup, &mut self.images).write_document(buffer)
    }

    /// Export into a byte vector in the configured encoding
    pub fn export_to_bytes(
        &mut self,
        buffer: &RichTextBuffer,
        lookup: Option<&dyn StyleLookup>,
    ) -> ExportResult<Vec<u8>> {
        let mut out = Vec::new();
        self.export(buffer, lookup, &mut out)?;
        Ok(out)
    }

    /// Number used to name the next stored image
    pub fn file_counter(&self) -> u64 {
        self.images.counter()
    }

    pub fn set_file_counter(&mut self, counter: u64) {
        self.images.set_counter(counter);
    }

    /// Restart image naming at `image1`
    pub fn reset_file_counter(&mut self) {
        self.images.set_counter(ImagePersister::FIRST_COUNTER);
    }

    /// Names of the images stored in the sink so far
    pub fn image_locations(&self) -> &[String] {
        self.images.locations()
    }

    /// Remove every stored image from the sink. Returns how many were
    /// removed.
    pub fn delete_temporary_images(&mut self) -> ExportResult<usize> {
        self.images.delete_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExportFlags;
    use richtext_model::{ImageData, Paragraph};

    fn buffer_with_images(count: usize) -> RichTextBuffer {
        let mut paragraph = Paragraph::new();
        for _ in 0..count {
            paragraph.push_image(ImageData::new(b"GIF89a\x01\x00\x01\x00".to_vec()), Default::default());
        }
        let mut buffer = RichTextBuffer::new();
        buffer.push_paragraph(paragraph);
        buffer
    }

    #[test]
    fn test_counter_continues_across_exports() {
        let registry = MemoryImageSink::new();
        let options = HtmlExportOptions::new().with_flags(ExportFlags::SAVE_IMAGES_TO_MEMORY);
        let mut exporter = HtmlExporter::new(options).with_image_sink(registry.clone());

        exporter.export_to_bytes(&buffer_with_images(2), None).unwrap();
        let second = String::from_utf8(exporter.export_to_bytes(&buffer_with_images(1), None).unwrap()).unwrap();

        assert!(second.contains("<img src=\"memory:image3.gif\" width=\"1\" height=\"1\" />"));
        assert_eq!(registry.names(), vec!["image1.gif", "image2.gif", "image3.gif"]);
        assert_eq!(exporter.image_locations().len(), 3);
        assert_eq!(exporter.file_counter(), 4);
    }

    #[test]
    fn test_reset_counter_gives_deterministic_names() {
        let registry = MemoryImageSink::new();
        let mut exporter = HtmlExporter::default().with_image_sink(registry.clone());
        exporter.set_file_counter(40);
        exporter.export_to_bytes(&buffer_with_images(1), None).unwrap();
        assert!(registry.contains("image40.gif"));

        exporter.reset_file_counter();
        assert_eq!(exporter.file_counter(), 1);
        exporter.export_to_bytes(&buffer_with_images(1), None).unwrap();
        assert!(registry.contains("image1.gif"));
    }

    #[test]
    fn test_delete_temporary_images() {
        let registry = MemoryImageSink::new();
        let mut exporter = HtmlExporter::default().with_image_sink(registry.clone());
        exporter.export_to_bytes(&buffer_with_images(2), None).unwrap();
        assert_eq!(registry.len(), 2);

        assert_eq!(exporter.delete_temporary_images().unwrap(), 2);
        assert!(registry.is_empty());
        assert!(exporter.image_locations().is_empty());
        assert_eq!(exporter.delete_temporary_images().unwrap(), 0);
    }

    #[test]
    fn test_memory_mode_registry_is_reachable() {
        let options = HtmlExportOptions::new().with_flags(ExportFlags::SAVE_IMAGES_TO_MEMORY);
        let mut exporter = HtmlExporter::new(options);
        let html = String::from_utf8(exporter.export_to_bytes(&buffer_with_images(1), None).unwrap()).unwrap();
        assert!(html.contains("src=\"memory:image1.gif\""));

        let registry = exporter.memory_sink().unwrap();
        let stored = registry.get("image1.gif").unwrap();
        assert_eq!(stored.data, b"GIF89a\x01\x00\x01\x00");
        assert_eq!(stored.mime_type, "image/gif");

        let replaced = exporter.with_image_sink(MemoryImageSink::new());
        assert!(replaced.memory_sink().is_none());
        assert!(HtmlExporter::default().memory_sink().is_none());
    }

    #[test]
    fn test_inline_mode_keeps_no_locations() {
        let mut exporter = HtmlExporter::default();
        let html = String::from_utf8(exporter.export_to_bytes(&buffer_with_images(1), None).unwrap()).unwrap();
        assert!(html.contains("src=\"data:image/gif;base64,"));
        assert!(exporter.image_locations().is_empty());
        assert_eq!(exporter.file_counter(), 2);
        assert_eq!(exporter.pt_to_size(9.0), 2);
    }
}
