//! Resource readers supply raw script bytes for a resource path.
//!
//! A reader answers "here are the bytes" or "nothing there". I/O failures are
//! the reader's business: it logs them and reports absence, because a missing
//! client-side script is an ordinary outcome for the descriptor.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Turns a slash-separated resource path into raw bytes.
pub trait ResourceReader: Send + Sync {
    /// Read the resource at `path`, or `None` if it is not available.
    fn read_resource(&self, path: &str) -> Option<Vec<u8>>;
}

/// Reads resources from a list of directories, first hit wins.
#[derive(Debug, Clone, Default)]
pub struct FsResourceReader {
    roots: Vec<PathBuf>,
}

impl FsResourceReader {
    /// Create a reader over a single root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            roots: vec![root.into()],
        }
    }

    /// Append another root; roots are searched in insertion order.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// The configured roots.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

/// Only plain relative paths are resolved; `..`, roots and prefixes would
/// escape the configured directories.
fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

impl ResourceReader for FsResourceReader {
    fn read_resource(&self, path: &str) -> Option<Vec<u8>> {
        let relative = Path::new(path);
        if path.is_empty() || !is_contained(relative) {
            tracing::debug!(path, "Rejected resource path outside reader roots");
            return None;
        }

        for root in &self.roots {
            let candidate = root.join(relative);
            match std::fs::read(&candidate) {
                Ok(bytes) => return Some(bytes),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::error!(
                        path = %candidate.display(),
                        error = %e,
                        "Failed to read resource"
                    );
                }
            }
        }
        None
    }
}

/// In-memory path → bytes table.
#[derive(Debug, Clone, Default)]
pub struct MemoryResourceReader {
    resources: HashMap<String, Vec<u8>>,
}

impl MemoryResourceReader {
    /// Create an empty reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, builder style.
    pub fn with_resource(mut self, path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.insert(path, body);
        self
    }

    /// Add or replace a resource.
    pub fn insert(&mut self, path: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.resources.insert(path.into(), body.into());
    }

    /// Number of stored resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if no resources are stored.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ResourceReader for MemoryResourceReader {
    fn read_resource(&self, path: &str) -> Option<Vec<u8>> {
        self.resources.get(path).cloned()
    }
}

/// Adapts a closure into a [`ResourceReader`].
pub struct FnResourceReader<F>(F);

impl<F> fmt::Debug for FnResourceReader<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnResourceReader").finish_non_exhaustive()
    }
}

impl<F> ResourceReader for FnResourceReader<F>
where
    F: Fn(&str) -> Option<Vec<u8>> + Send + Sync,
{
    fn read_resource(&self, path: &str) -> Option<Vec<u8>> {
        (self.0)(path)
    }
}

/// Build a reader from a closure.
pub fn from_fn<F>(f: F) -> FnResourceReader<F>
where
    F: Fn(&str) -> Option<Vec<u8>> + Send + Sync,
{
    FnResourceReader(f)
}
