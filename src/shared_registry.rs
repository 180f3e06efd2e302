use std::fmt;
use std::sync::Mutex;

use crate::{Registry, RegistryApi, TraceSlot};

/// A [`Registry`] behind a mutex, with an optional trace callback.
///
/// This is the thread-safe instance type: every operation takes `&self`, so one
/// `SharedRegistry` can sit in a `static` or behind an `Arc` and be used from
/// any thread. Create one per test for full isolation.
///
/// ```
/// use dep_registry::{RegistryApi, SharedRegistry};
///
/// #[derive(Clone, Default)]
/// struct Mailer { host: String }
///
/// let deps = SharedRegistry::new();
/// deps.register(Mailer { host: "smtp.example.test".into() }).unwrap();
/// assert!(deps.has::<Mailer>().unwrap());
/// ```
#[derive(Default)]
pub struct SharedRegistry {
    storage: Mutex<Registry>,
    trace: TraceSlot,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unwraps the inner registry, recovering it if the lock was poisoned.
    pub fn into_inner(self) -> Registry {
        self.storage.into_inner().unwrap_or_else(|p| p.into_inner())
    }
}

impl From<Registry> for SharedRegistry {
    fn from(registry: Registry) -> Self {
        Self {
            storage: Mutex::new(registry),
            trace: TraceSlot::default(),
        }
    }
}

impl RegistryApi for SharedRegistry {
    fn storage(&self) -> &Mutex<Registry> {
        &self.storage
    }

    fn trace(&self) -> &TraceSlot {
        &self.trace
    }
}

impl fmt::Debug for SharedRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.storage.try_lock() {
            Ok(registry) => f.debug_tuple("SharedRegistry").field(&*registry).finish(),
            Err(_) => f.write_str("SharedRegistry(<locked>)"),
        }
    }
}
