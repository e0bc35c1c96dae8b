//! Thread-safe handles over the single-threaded components.
//!
//! Both components are synchronous and their operations are short, so one
//! coarse lock per instance is enough. Handles are cheap to clone and share the
//! same instance.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::autocomplete::AutocompleteSystem;
use crate::directory::PhoneDirectory;

/// An [`AutocompleteSystem`] behind a mutex.
///
/// Every call takes the lock, so keystrokes from different threads interleave
/// into one shared pending buffer. Use [`SharedAutocomplete::lock`] to feed a
/// whole sentence atomically.
#[derive(Clone)]
pub struct SharedAutocomplete {
    inner: Arc<Mutex<AutocompleteSystem>>,
}

impl SharedAutocomplete {
    pub fn new(system: AutocompleteSystem) -> Self {
        Self {
            inner: Arc::new(Mutex::new(system)),
        }
    }

    pub fn input(&self, c: char) -> Vec<String> {
        self.inner.lock().input(c)
    }

    pub fn suggest(&self, prefix: &str) -> Vec<String> {
        self.inner.lock().suggest(prefix)
    }

    pub fn frequency(&self, sentence: &str) -> Option<u32> {
        self.inner.lock().frequency(sentence)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn lock(&self) -> MutexGuard<'_, AutocompleteSystem> {
        self.inner.lock()
    }
}

impl From<AutocompleteSystem> for SharedAutocomplete {
    fn from(system: AutocompleteSystem) -> Self {
        Self::new(system)
    }
}

/// A [`PhoneDirectory`] behind a mutex.
#[derive(Clone)]
pub struct SharedDirectory {
    inner: Arc<Mutex<PhoneDirectory>>,
}

impl SharedDirectory {
    pub fn new(directory: PhoneDirectory) -> Self {
        Self {
            inner: Arc::new(Mutex::new(directory)),
        }
    }

    pub fn get(&self) -> i32 {
        self.inner.lock().get()
    }

    pub fn allocate(&self) -> Option<u32> {
        self.inner.lock().allocate()
    }

    pub fn check(&self, number: i32) -> bool {
        self.inner.lock().check(number)
    }

    pub fn release(&self, number: i32) {
        self.inner.lock().release(number)
    }

    pub fn outstanding(&self) -> usize {
        self.inner.lock().outstanding()
    }

    pub fn lock(&self) -> MutexGuard<'_, PhoneDirectory> {
        self.inner.lock()
    }
}

impl From<PhoneDirectory> for SharedDirectory {
    fn from(directory: PhoneDirectory) -> Self {
        Self::new(directory)
    }
}
