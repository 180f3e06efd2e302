//! Core trait defining the synchronized registry surface.
//!
//! This module provides the `RegistryApi` trait with default implementations
//! of every registry operation over a `Mutex<Registry>`, plus tracing of each
//! operation. Consumers that fetch their dependencies take `&impl RegistryApi`.
//!
//! Unlike [`Registry`], registering a type that is already stored fails with
//! [`RegistryError::AlreadyRegistered`] here too: nothing is ever replaced.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{Registry, RegistryError, RegistryEvent, TypeKey};

/// Type alias for the user-supplied tracing callback.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Storage slot for an optional tracing callback.
pub type TraceSlot = Mutex<Option<Arc<TraceCallback>>>;

/// Core trait defining registry behavior.
///
/// Provides default implementations for all registry operations, requiring only
/// two accessor methods (`storage` and `trace`) to be implemented by the implementor.
pub trait RegistryApi {
    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Access the trace callback slot.
    fn trace(&self) -> &TraceSlot;

    /// Set a tracing callback for registry operations.
    ///
    /// The callback is invoked after every operation, once the storage lock
    /// has been released, so it may itself call into the registry.
    ///
    /// # Lock Poisoning Recovery
    ///
    /// A poisoned trace lock is recovered by extracting the inner value. Trace
    /// state is non-critical.
    fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        let mut guard = self.trace().lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
    }

    /// Clear the tracing callback. Registered values are not affected.
    fn clear_trace_callback(&self) {
        let mut guard = self.trace().lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    /// Emit a registry event to `tracing` and to the current callback, if any.
    ///
    /// # Panics
    ///
    /// If the callback itself panics, the panic propagates to the caller. No
    /// registry lock is held at that point.
    fn emit_event(&self, event: &RegistryEvent) {
        tracing::trace!(target: "dep_registry", %event, "registry operation");

        let callback = self
            .trace()
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone();
        if let Some(callback) = callback {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------------------------------

    /// Access the guarded storage.
    fn storage(&self) -> &Mutex<Registry>;

    /// Locks the storage, surfacing poisoning as [`RegistryError::RegistryLock`].
    fn lock_storage(&self) -> Result<MutexGuard<'_, Registry>, RegistryError> {
        self.storage()
            .lock()
            .map_err(|_| RegistryError::RegistryLock)
    }

    /// Register a value in the registry.
    ///
    /// Takes ownership of the value and wraps it in an `Arc`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnsupportedPrimitive`] if `T` is a bare primitive
    /// - [`RegistryError::AlreadyRegistered`] if a `T` is already stored
    /// - [`RegistryError::RegistryLock`] if the storage lock is poisoned
    fn register<T: Send + Sync + 'static>(&self, value: T) -> Result<(), RegistryError> {
        self.register_arc(Arc::new(value))
    }

    /// Register an Arc-wrapped value in the registry.
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register).
    fn register_arc<T: Send + Sync + 'static>(&self, value: Arc<T>) -> Result<(), RegistryError> {
        let result = self.lock_storage()?.register_arc(value);

        self.emit_event(&RegistryEvent::Register {
            type_name: TypeKey::of::<T>().name(),
            registered: result.is_ok(),
        });

        result
    }

    /// Copy the stored `T` into `dest`, overwriting it in place.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnsupportedPrimitive`] if `T` is a bare primitive
    /// - [`RegistryError::NotRegistered`] if no `T` is stored; `dest` is left
    ///   unmodified
    /// - [`RegistryError::TypeMismatch`] if the stored value is not a `T`
    /// - [`RegistryError::RegistryLock`] if the storage lock is poisoned
    fn get<T: Clone + Send + Sync + 'static>(&self, dest: &mut T) -> Result<(), RegistryError> {
        let stored = self.get_shared::<T>()?;
        dest.clone_from(&stored);
        Ok(())
    }

    /// Retrieve a shared handle to the stored `T`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    fn get_shared<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, RegistryError> {
        let result = self.lock_storage()?.get_shared::<T>();

        self.emit_event(&RegistryEvent::Get {
            type_name: TypeKey::of::<T>().name(),
            found: result.is_ok(),
        });

        result
    }

    /// Retrieve an owned clone of the stored `T`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    fn get_cloned<T: Clone + Send + Sync + 'static>(&self) -> Result<T, RegistryError> {
        let stored = self.get_shared::<T>()?;
        Ok((*stored).clone())
    }

    /// Check if a type is registered in the registry.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnsupportedPrimitive`] if `T` is a bare primitive
    /// - [`RegistryError::RegistryLock`] if the storage lock is poisoned
    fn has<T: 'static>(&self) -> Result<bool, RegistryError> {
        let result = self.lock_storage()?.has::<T>();

        self.emit_event(&RegistryEvent::Has {
            type_name: TypeKey::of::<T>().name(),
            found: matches!(result, Ok(true)),
        });

        result
    }

    /// Remove the stored `T`, if any. Returns whether an entry was removed.
    ///
    /// # Errors
    ///
    /// Same as [`has`](Self::has). A missing entry is not an error.
    fn delete<T: 'static>(&self) -> Result<bool, RegistryError> {
        let result = self.lock_storage()?.delete::<T>();

        self.emit_event(&RegistryEvent::Delete {
            type_name: TypeKey::of::<T>().name(),
            removed: matches!(result, Ok(true)),
        });

        result
    }

    /// Clear all registered values from the registry.
    ///
    /// Intended for test teardown. Already-retrieved handles stay valid and
    /// the tracing callback is kept.
    ///
    /// # Lock Poisoning Recovery
    ///
    /// If the storage lock is poisoned, this method silently does nothing.
    fn clear(&self) {
        self.emit_event(&RegistryEvent::Clear);

        if let Ok(mut registry) = self.storage().lock() {
            registry.clear();
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::{RegistryApi, RegistryError, SharedRegistry, TypeKey};

    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Endpoint {
        url: String,
        retries: u8,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Port(u16);

    fn collect_events(api: &SharedRegistry) -> Arc<Mutex<Vec<String>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();
        api.set_trace_callback(move |e| {
            events_clone.lock().unwrap().push(format!("{}", e));
        });
        events
    }

    #[test]
    fn test_register_and_get() -> Result<(), RegistryError> {
        let api = SharedRegistry::new();
        let endpoint = Endpoint {
            url: "https://example.test".into(),
            retries: 3,
        };
        api.register(endpoint.clone())?;

        let mut dest = Endpoint::default();
        api.get(&mut dest)?;
        assert_eq!(dest, endpoint);

        let shared: Arc<Endpoint> = api.get_shared()?;
        assert_eq!(*shared, endpoint);

        let cloned = api.get_cloned::<Endpoint>()?;
        assert_eq!(cloned, endpoint);
        Ok(())
    }

    #[test]
    fn test_register_twice_is_rejected() -> Result<(), RegistryError> {
        let api = SharedRegistry::new();
        api.register(Port(10))?;

        assert_eq!(
            api.register(Port(20)),
            Err(RegistryError::AlreadyRegistered {
                key: TypeKey::of::<Port>()
            })
        );
        assert_eq!(api.get_cloned::<Port>()?, Port(10));
        Ok(())
    }

    #[test]
    fn test_get_nonexistent() {
        let api = SharedRegistry::new();

        let mut dest = Port(1);
        let result = api.get(&mut dest);
        assert_eq!(
            result,
            Err(RegistryError::NotRegistered {
                key: TypeKey::of::<Port>()
            })
        );
        assert_eq!(dest, Port(1));
    }

    #[test]
    fn test_has_and_delete() -> Result<(), RegistryError> {
        let api = SharedRegistry::new();
        assert!(!api.has::<Port>()?);

        api.register(Port(1))?;
        assert!(api.has::<Port>()?);

        assert!(api.delete::<Port>()?);
        assert!(!api.has::<Port>()?);
        assert!(!api.delete::<Port>()?);
        Ok(())
    }

    #[test]
    fn test_primitives_rejected_everywhere() {
        let api = SharedRegistry::new();
        let mut text = String::new();

        assert!(matches!(
            api.register(5u32),
            Err(RegistryError::UnsupportedPrimitive { .. })
        ));
        assert!(matches!(
            api.get(&mut text),
            Err(RegistryError::UnsupportedPrimitive { .. })
        ));
        assert!(matches!(
            api.has::<f32>(),
            Err(RegistryError::UnsupportedPrimitive { .. })
        ));
        assert!(matches!(
            api.delete::<char>(),
            Err(RegistryError::UnsupportedPrimitive { .. })
        ));
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Barrier;
        use std::thread;

        let api = Arc::new(SharedRegistry::new());
        let barrier = Arc::new(Barrier::new(2));

        let handle = {
            let api = api.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                api.register(Port(100)).unwrap();
                barrier.wait();
                barrier.wait();
                let endpoint: Arc<Endpoint> = api.get_shared().unwrap();
                assert_eq!(endpoint.url, "main");
            })
        };

        barrier.wait();
        assert_eq!(api.get_cloned::<Port>().unwrap(), Port(100));
        api.register(Endpoint {
            url: "main".into(),
            retries: 0,
        })
        .unwrap();
        barrier.wait();

        handle.join().unwrap();
    }

    #[test]
    fn test_poisoned_lock_surfaces_error() {
        let api = Arc::new(SharedRegistry::new());

        let poisoner = api.clone();
        let joined = std::thread::spawn(move || {
            let _guard = poisoner.storage().lock().unwrap();
            panic!("poison the registry lock");
        })
        .join();
        assert!(joined.is_err());

        assert_eq!(api.register(Port(1)), Err(RegistryError::RegistryLock));
        assert_eq!(api.has::<Port>(), Err(RegistryError::RegistryLock));
        assert_eq!(api.delete::<Port>(), Err(RegistryError::RegistryLock));
        // clear is best effort and does not panic
        api.clear();
    }

    #[test]
    fn test_trace_callback_register_event() {
        let api = SharedRegistry::new();
        let events = collect_events(&api);

        api.register(Port(5)).unwrap();
        let _ = api.register(Port(6));

        let captured = events.lock().unwrap();
        assert_eq!(captured.len(), 2);
        assert_eq!(
            captured[0],
            "register { type_name: &dep_registry::registry_trait::tests::Port, registered: true }"
        );
        assert_eq!(
            captured[1],
            "register { type_name: &dep_registry::registry_trait::tests::Port, registered: false }"
        );
    }

    #[test]
    fn test_trace_callback_get_event() {
        let api = SharedRegistry::new();
        let events = collect_events(&api);

        let mut port = Port::default();
        let _ = api.get(&mut port);
        api.register(Port(42)).unwrap();
        api.get(&mut port).unwrap();

        let captured = events.lock().unwrap();
        assert_eq!(captured.len(), 3);
        assert_eq!(
            captured[0],
            "get { type_name: &dep_registry::registry_trait::tests::Port, found: false }"
        );
        assert_eq!(
            captured[2],
            "get { type_name: &dep_registry::registry_trait::tests::Port, found: true }"
        );
    }

    #[test]
    fn test_trace_callback_has_and_delete_events() {
        let api = SharedRegistry::new();
        let events = collect_events(&api);

        let _ = api.has::<Endpoint>();
        api.register(Endpoint::default()).unwrap();
        let _ = api.has::<Endpoint>();
        let _ = api.delete::<Endpoint>();
        let _ = api.delete::<Endpoint>();

        let captured = events.lock().unwrap();
        assert_eq!(captured.len(), 5);
        assert!(captured[0].starts_with("has {"));
        assert!(captured[0].ends_with("found: false }"));
        assert!(captured[2].ends_with("found: true }"));
        assert!(captured[3].ends_with("removed: true }"));
        assert!(captured[4].ends_with("removed: false }"));
    }

    #[test]
    fn test_trace_callback_clear_event() {
        let api = SharedRegistry::new();
        let events = collect_events(&api);

        api.clear();

        let captured = events.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0], "Clearing the Registry");
    }

    #[test]
    fn test_clear_trace_callback_stops_events() {
        let api = SharedRegistry::new();
        let events = collect_events(&api);

        api.register(Port(10)).unwrap();
        assert_eq!(events.lock().unwrap().len(), 1);

        api.clear_trace_callback();

        let _ = api.register(Port(20));
        let _ = api.get_cloned::<Port>();
        let _ = api.has::<Port>();

        assert_eq!(events.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_callback_may_reenter_registry() {
        let api = Arc::new(SharedRegistry::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let weak = Arc::downgrade(&api);
        let seen_clone = seen.clone();
        api.set_trace_callback(move |event| {
            if let (crate::RegistryEvent::Register { .. }, Some(api)) = (event, weak.upgrade()) {
                seen_clone.lock().unwrap().push(api.has::<Port>().unwrap());
            }
        });

        api.register(Port(1)).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![true]);
    }

    #[test]
    fn test_register_arc_directly() {
        let api = SharedRegistry::new();
        let value = Arc::new(Port(42));
        let clone = value.clone();
        api.register_arc(value).unwrap();

        let retrieved: Arc<Port> = api.get_shared().unwrap();
        assert_eq!(*retrieved, Port(42));
        assert_eq!(Arc::strong_count(&clone), 3); // clone + registry + retrieved
    }
}
