//! Image sinks - where exported images are stored
//!
//! An [`ImageSink`] receives the encoded bytes of each embedded image under a
//! generated file name and answers with the URI the document should use to
//! reference it. Without a sink, images are inlined as base64 data URLs.

use crate::{ExportError, ExportResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use richtext_model::ImageData;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Storage for exported images
pub trait ImageSink: std::fmt::Debug {
    /// Store `data` under `name`, returning the URI to reference it by
    fn put(&mut self, name: &str, data: &[u8], mime_type: &str) -> ExportResult<String>;

    /// Remove a stored image. Returns false if nothing was stored under `name`.
    fn remove(&mut self, name: &str) -> ExportResult<bool>;

    /// Whether something is already stored under `name`
    fn exists(&self, name: &str) -> bool;
}

/// `data:` URL embedding the bytes as base64
pub fn data_url(data: &[u8], mime_type: &str) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(data))
}

/// `file://` URL for a path, with each segment percent-encoded
pub fn file_url(path: &Path) -> String {
    let segments: Vec<String> = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(urlencoding::encode(&part.to_string_lossy()).into_owned()),
            Component::Prefix(prefix) => Some(prefix.as_os_str().to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::RootDir | Component::CurDir => None,
        })
        .collect();
    format!("file:///{}", segments.join("/"))
}

// =============================================================================
// Memory Sink
// =============================================================================

/// An image registered with a [`MemoryImageSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryFile {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// In-memory image registry.
///
/// Clones share the same registry, so a caller can keep one handle and give
/// another to the exporter.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageSink {
    files: Arc<RwLock<HashMap<String, MemoryFile>>>,
}

impl MemoryImageSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<MemoryFile> {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = files.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ImageSink for MemoryImageSink {
    fn put(&mut self, name: &str, data: &[u8], mime_type: &str) -> ExportResult<String> {
        let mut files = self.files.write().unwrap_or_else(PoisonError::into_inner);
        files.insert(
            name.to_string(),
            MemoryFile {
                data: data.to_vec(),
                mime_type: mime_type.to_string(),
            },
        );
        Ok(format!("memory:{}", name))
    }

    fn remove(&mut self, name: &str) -> ExportResult<bool> {
        let mut files = self.files.write().unwrap_or_else(PoisonError::into_inner);
        Ok(files.remove(name).is_some())
    }

    fn exists(&self, name: &str) -> bool {
        self.contains(name)
    }
}

// =============================================================================
// Directory Sink
// =============================================================================

/// Writes images as files into a directory
#[derive(Debug, Clone)]
pub struct DirectoryImageSink {
    dir: PathBuf,
}

impl DirectoryImageSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Sink writing into the system temp directory
    pub fn temp() -> Self {
        Self::new(std::env::temp_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> ExportResult<PathBuf> {
        let is_plain = Path::new(name)
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if name.is_empty() || !is_plain {
            return Err(ExportError::ImageSink(format!("invalid image file name: {}", name)));
        }
        Ok(self.dir.join(name))
    }
}

impl ImageSink for DirectoryImageSink {
    fn put(&mut self, name: &str, data: &[u8], _mime_type: &str) -> ExportResult<String> {
        let path = self.path_for(name)?;
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&path, data)?;
        Ok(file_url(&path))
    }

    fn remove(&mut self, name: &str) -> ExportResult<bool> {
        let path = self.path_for(name)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_ok_and(|path| path.exists())
    }
}

// =============================================================================
// Persister
// =============================================================================

/// Image naming and persistence state that outlives a single export
#[derive(Debug)]
pub(crate) struct ImagePersister {
    sink: Option<Box<dyn ImageSink>>,
    counter: u64,
    locations: Vec<String>,
}

impl ImagePersister {
    pub(crate) const FIRST_COUNTER: u64 = 1;

    pub(crate) fn new(sink: Option<Box<dyn ImageSink>>) -> Self {
        Self {
            sink,
            counter: Self::FIRST_COUNTER,
            locations: Vec::new(),
        }
    }

    pub(crate) fn set_sink(&mut self, sink: Option<Box<dyn ImageSink>>) {
        self.sink = sink;
    }

    pub(crate) fn counter(&self) -> u64 {
        self.counter
    }

    pub(crate) fn set_counter(&mut self, counter: u64) {
        self.counter = counter;
    }

    pub(crate) fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Store an image and return the URI for its `src` attribute.
    /// Every image advances the counter, whichever way it is stored.
    /// Names the sink already holds are skipped, so images of earlier
    /// exports into the same sink are never overwritten.
    pub(crate) fn persist(&mut self, image: &ImageData) -> ExportResult<String> {
        let extension = image.format.extension();
        let mime_type = image.format.mime_type();
        let Some(sink) = self.sink.as_mut() else {
            self.counter += 1;
            return Ok(data_url(&image.bytes, mime_type));
        };

        let mut name = format!("image{}.{}", self.counter, extension);
        self.counter += 1;
        while sink.exists(&name) {
            tracing::debug!(name = %name, "image name taken, skipping");
            name = format!("image{}.{}", self.counter, extension);
            self.counter += 1;
        }

        let uri = sink.put(&name, &image.bytes, mime_type)?;
        tracing::debug!(name = %name, uri = %uri, bytes = image.len(), "persisted image");
        self.locations.push(name);
        Ok(uri)
    }

    /// Remove every persisted image from the sink, returning how many were
    /// still present
    pub(crate) fn delete_all(&mut self) -> ExportResult<usize> {
        let locations = std::mem::take(&mut self.locations);
        let Some(sink) = self.sink.as_mut() else {
            return Ok(0);
        };

        let mut removed = 0;
        for name in &locations {
            if sink.remove(name)? {
                removed += 1;
            }
        }
        tracing::debug!(removed, "deleted temporary images");
        Ok(removed)
    }
}
