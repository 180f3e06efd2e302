//! The unsynchronized core: a map from [`TypeKey`] to one stored value.
//!
//! [`Registry`] performs no locking. Mutating operations take `&mut self`, so
//! sharing one registry between threads requires an outer lock; use
//! [`SharedRegistry`](crate::SharedRegistry) for that.
//!
//! # Examples
//!
//! ```
//! use dep_registry::{Registry, RegistryError};
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Config {
//!     endpoint: String,
//! }
//!
//! let mut registry = Registry::new();
//! registry.register(Config { endpoint: "https://example.test".into() })?;
//!
//! let mut config = Config::default();
//! registry.get(&mut config)?;
//! assert_eq!(config.endpoint, "https://example.test");
//! # Ok::<(), RegistryError>(())
//! ```

use std::{
    any::Any,
    collections::{hash_map::Entry, HashMap},
    fmt,
    sync::Arc,
};

use crate::{RegistryError, TypeKey};

type StoredValue = Arc<dyn Any + Send + Sync>;

/// Type-keyed storage holding at most one value per type.
#[derive(Default)]
pub struct Registry {
    entries: HashMap<TypeKey, StoredValue>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under the key of `T`.
    ///
    /// The registry takes ownership; the stored instance is the one later
    /// copied out by [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnsupportedPrimitive`] if `T` is a bare primitive
    /// - [`RegistryError::AlreadyRegistered`] if a `T` is already stored; the
    ///   stored value is left untouched
    pub fn register<T: Send + Sync + 'static>(&mut self, value: T) -> Result<(), RegistryError> {
        self.register_arc(Arc::new(value))
    }

    /// Stores an `Arc`-wrapped value under the key of `T`.
    ///
    /// The caller may keep its own clone of the `Arc`; state behind interior
    /// mutability is then observed by every later retrieval.
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register).
    pub fn register_arc<T: Send + Sync + 'static>(
        &mut self,
        value: Arc<T>,
    ) -> Result<(), RegistryError> {
        let key = TypeKey::derive::<T>()?;
        match self.entries.entry(key) {
            Entry::Occupied(_) => Err(RegistryError::AlreadyRegistered { key }),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }

    /// Copies the stored `T` into `dest`, overwriting it in place.
    ///
    /// The copy is a `Clone`, so later changes to `dest` are not seen by other
    /// consumers. Use [`get_shared`](Self::get_shared) to share one instance.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnsupportedPrimitive`] if `T` is a bare primitive
    /// - [`RegistryError::NotRegistered`] if no `T` is stored; `dest` is left
    ///   unmodified
    /// - [`RegistryError::TypeMismatch`] if the stored value is not a `T`
    pub fn get<T: Clone + Send + Sync + 'static>(&self, dest: &mut T) -> Result<(), RegistryError> {
        let stored = self.get_shared::<T>()?;
        dest.clone_from(&stored);
        Ok(())
    }

    /// Returns a shared handle to the stored `T`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_shared<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, RegistryError> {
        let key = TypeKey::derive::<T>()?;
        let stored = self
            .entries
            .get(&key)
            .cloned()
            .ok_or(RegistryError::NotRegistered { key })?;

        stored
            .downcast::<T>()
            .map_err(|_| RegistryError::TypeMismatch { key })
    }

    /// Returns an owned clone of the stored `T`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_cloned<T: Clone + Send + Sync + 'static>(&self) -> Result<T, RegistryError> {
        let stored = self.get_shared::<T>()?;
        Ok((*stored).clone())
    }

    /// Whether a `T` is stored.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnsupportedPrimitive`] if `T` is a bare primitive.
    pub fn has<T: 'static>(&self) -> Result<bool, RegistryError> {
        let key = TypeKey::derive::<T>()?;
        Ok(self.entries.contains_key(&key))
    }

    /// Removes the stored `T`, if any. Returns whether an entry was removed.
    ///
    /// Deleting a type that is not registered is a successful no-op.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnsupportedPrimitive`] if `T` is a bare primitive.
    pub fn delete<T: 'static>(&mut self) -> Result<bool, RegistryError> {
        let key = TypeKey::derive::<T>()?;
        Ok(self.entries.remove(&key).is_some())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys of every stored value, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.entries.keys().copied()
    }

    /// Removes every stored value. Handles already given out stay valid.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}
