//! Macros for creating process-wide registries.

/// Creates an isolated process-wide registry with a single macro invocation.
///
/// The macro generates a module containing:
/// - a lazily created `static` [`SharedRegistry`](crate::SharedRegistry) (hidden)
/// - `api()`, returning it for code that takes a [`RegistryApi`](crate::RegistryApi)
/// - free functions delegating every registry operation to it
///
/// # Examples
///
/// ```rust
/// use dep_registry::define_registry;
/// use std::sync::Arc;
///
/// #[derive(Clone, Default)]
/// struct Database { url: String }
///
/// define_registry!(app);
///
/// app::register(Database { url: "postgres://localhost".into() }).unwrap();
///
/// let mut db = Database::default();
/// app::get(&mut db).unwrap();
/// assert_eq!(db.url, "postgres://localhost");
///
/// let shared: Arc<Database> = app::get_shared().unwrap();
/// assert_eq!(shared.url, "postgres://localhost");
/// ```
///
/// # Multiple Registries
///
/// Each invocation owns its own storage:
///
/// ```rust
/// use dep_registry::define_registry;
///
/// #[derive(Clone)]
/// struct Conn(&'static str);
///
/// define_registry!(primary);
/// define_registry!(replica);
///
/// primary::register(Conn("primary")).unwrap();
///
/// assert!(primary::has::<Conn>().unwrap());
/// assert!(!replica::has::<Conn>().unwrap());
/// ```
#[macro_export]
macro_rules! define_registry {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        pub mod $name {
            use std::sync::{Arc, LazyLock};

            use $crate::RegistryApi;

            // Storage for registered values (module-private)
            static REGISTRY: LazyLock<$crate::SharedRegistry> =
                LazyLock::new($crate::SharedRegistry::new);

            /// The registry behind this module's free functions.
            pub fn api() -> &'static $crate::SharedRegistry {
                &REGISTRY
            }

            /// Register a value in the registry.
            pub fn register<T: Send + Sync + 'static>(value: T) -> Result<(), $crate::RegistryError> {
                REGISTRY.register(value)
            }

            /// Register an Arc-wrapped value in the registry.
            pub fn register_arc<T: Send + Sync + 'static>(
                value: Arc<T>,
            ) -> Result<(), $crate::RegistryError> {
                REGISTRY.register_arc(value)
            }

            /// Copy the stored value into `dest`.
            pub fn get<T: Clone + Send + Sync + 'static>(
                dest: &mut T,
            ) -> Result<(), $crate::RegistryError> {
                REGISTRY.get(dest)
            }

            /// Retrieve a shared handle to the stored value.
            pub fn get_shared<T: Send + Sync + 'static>() -> Result<Arc<T>, $crate::RegistryError> {
                REGISTRY.get_shared()
            }

            /// Retrieve a cloned value from the registry.
            pub fn get_cloned<T: Clone + Send + Sync + 'static>() -> Result<T, $crate::RegistryError> {
                REGISTRY.get_cloned()
            }

            /// Check if a type is registered in the registry.
            pub fn has<T: 'static>() -> Result<bool, $crate::RegistryError> {
                REGISTRY.has::<T>()
            }

            /// Remove the stored value for a type, if any.
            pub fn delete<T: 'static>() -> Result<bool, $crate::RegistryError> {
                REGISTRY.delete::<T>()
            }

            /// Remove every stored value.
            pub fn clear() {
                REGISTRY.clear()
            }

            /// Set a tracing callback for registry operations.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static,
            ) {
                REGISTRY.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                REGISTRY.clear_trace_callback()
            }
        }
    };
}
