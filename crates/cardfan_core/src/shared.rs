//! Frame-synchronous shared state
//!
//! [`Shared<T>`] is the state handle passed from a container widget to its
//! leaves. There is one writer (the container's input handling) and any number
//! of readers that re-read the value while computing their render output each
//! frame. Everything runs on the UI thread, so the handle is a cheap `Rc` clone
//! rather than a lock.
//!
//! Every mutation bumps a version counter. Readers can remember the version
//! they last rendered and skip work when nothing changed.
//!
//! ```rust
//! use cardfan_core::shared::Shared;
//!
//! let pressed = Shared::new(None::<usize>);
//! let reader = pressed.clone();
//!
//! let seen = reader.version();
//! pressed.set(Some(2));
//!
//! assert_eq!(reader.get(), Some(2));
//! assert!(reader.changed_since(seen));
//! ```

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

struct SharedInner<T> {
    value: RefCell<T>,
    version: Cell<u64>,
}

/// A reference-counted, version-tracked value shared within one frame loop
pub struct Shared<T> {
    inner: Rc<SharedInner<T>>,
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("value", &self.inner.value.borrow())
            .field("version", &self.inner.version.get())
            .finish()
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Shared<T> {
    /// Wrap a value
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(SharedInner {
                value: RefCell::new(value),
                version: Cell::new(0),
            }),
        }
    }

    /// Get a copy of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.value.borrow().clone()
    }

    /// Borrow the current value
    ///
    /// # Panics
    ///
    /// Panics if the value is currently borrowed mutably through [`Shared::borrow_mut`].
    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.value.borrow()
    }

    /// Borrow the value mutably and mark it changed
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.bump();
        self.inner.value.borrow_mut()
    }

    /// Read the value through a closure
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Replace the value
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.bump();
    }

    /// Update the value in place
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.inner.value.borrow_mut());
        self.bump();
        result
    }

    /// Current change version (starts at 0, incremented per mutation)
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    /// Whether the value was mutated after `version` was observed
    pub fn changed_since(&self, version: u64) -> bool {
        self.inner.version.get() != version
    }

    /// Number of live handles to this value
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Check whether two handles point to the same value
    pub fn ptr_eq(&self, other: &Shared<T>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn bump(&self) {
        self.inner.version.set(self.inner.version.get().wrapping_add(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_writes_are_visible_to_clones() {
        let writer = Shared::new(0i32);
        let reader = writer.clone();

        writer.set(5);
        assert_eq!(reader.get(), 5);

        writer.update(|v| *v += 1);
        assert_eq!(reader.with(|v| *v), 6);
        assert!(writer.ptr_eq(&reader));
        assert_eq!(reader.handle_count(), 2);
    }

    #[test]
    fn test_shared_version_tracking() {
        let value = Shared::new(String::from("a"));
        let v0 = value.version();
        assert!(!value.changed_since(v0));

        value.borrow_mut().push('b');
        assert!(value.changed_since(v0));
        assert_eq!(&*value.borrow(), "ab");

        let v1 = value.version();
        let _ = value.with(|s| s.len());
        assert!(!value.changed_since(v1));
    }
}
