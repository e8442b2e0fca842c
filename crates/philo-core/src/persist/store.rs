//! Backends holding the single persisted state document.

use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::CoreResult;

/// A durable slot for one serialized state document.
pub trait StateStore {
    /// Read the stored document, or `None` if nothing was stored yet.
    fn read(&self) -> CoreResult<Option<String>>;

    /// Replace the stored document.
    fn write(&mut self, contents: &str) -> CoreResult<()>;
}

/// Stores the document as a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at the given file path. Parent directories are created on write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStore {
    fn read(&self) -> CoreResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, contents: &str) -> CoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        // Write then rename so a crash never leaves a half-written document.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    contents: Option<String>,
    writes: usize,
}

/// In-memory store. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with a document.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().contents = Some(contents.into());
        store
    }

    /// Current document.
    pub fn contents(&self) -> Option<String> {
        self.inner.borrow().contents.clone()
    }

    /// Number of writes so far.
    pub fn writes(&self) -> usize {
        self.inner.borrow().writes
    }
}

impl StateStore for MemoryStore {
    fn read(&self) -> CoreResult<Option<String>> {
        Ok(self.contents())
    }

    fn write(&mut self, contents: &str) -> CoreResult<()> {
        let mut inner = self.inner.borrow_mut();
        inner.contents = Some(contents.to_string());
        inner.writes += 1;
        Ok(())
    }
}
