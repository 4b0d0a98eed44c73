use super::files::{atomic_write, read_file, slot_file};
use anyhow::Result;
#[cfg(test)]
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// Default key of the slot holding the task list
pub const DEFAULT_SLOT_KEY: &str = "todos";

/// A single named location in durable storage holding one string value
pub trait Slot {
    /// Read the stored value, `None` when nothing has been written yet
    fn read(&self) -> Result<Option<String>>;

    /// Replace the stored value
    fn write(&self, value: &str) -> Result<()>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

/// Slot backed by `<dir>/<key>.json`, written atomically
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(dir: &Path, key: &str) -> Self {
        Self {
            path: slot_file(dir, key),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Slot for FileSlot {
    fn read(&self) -> Result<Option<String>> {
        read_file(&self.path)
    }

    fn write(&self, value: &str) -> Result<()> {
        atomic_write(&self.path, value)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory slot
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySlot {
    value: RefCell<Option<String>>,
}

#[cfg(test)]
impl MemorySlot {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(Some(value.into())),
        }
    }

    /// Current contents (for assertions)
    pub fn contents(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

#[cfg(test)]
impl Slot for MemorySlot {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.value.borrow().clone())
    }

    fn write(&self, value: &str) -> Result<()> {
        *self.value.borrow_mut() = Some(value.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
impl<S: Slot + ?Sized> Slot for std::rc::Rc<S> {
    fn read(&self) -> Result<Option<String>> {
        (**self).read()
    }

    fn write(&self, value: &str) -> Result<()> {
        (**self).write(value)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
