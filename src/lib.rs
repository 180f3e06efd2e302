//! # Dependency Registry
//!
//! A type-keyed registry holding at most one instance per dependency type.
//! Wiring code registers concrete instances at startup; consumers ask for the
//! type they need and receive the registered value. Swapping an implementation
//! (a stub client in tests, say) never touches consumer code.
//!
//! ## Quick Start
//!
//! ```rust
//! use dep_registry::{RegistryApi, SharedRegistry};
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Credentials {
//!     key: String,
//!     secret: String,
//! }
//!
//! let deps = SharedRegistry::new();
//! deps.register(Credentials { key: "k".into(), secret: "s".into() }).unwrap();
//!
//! let mut creds = Credentials::default();
//! deps.get(&mut creds).unwrap();
//! assert_eq!(creds.key, "k");
//! ```
//!
//! ## Rules
//!
//! - **One per type**: registering a type twice fails with
//!   [`RegistryError::AlreadyRegistered`]; nothing is ever overwritten.
//! - **Copy out**: [`RegistryApi::get`] clones the stored value into caller
//!   storage. [`RegistryApi::get_shared`] hands out the shared `Arc` instead.
//! - **No primitives**: `String`, integers, floats, `bool` and friends are
//!   rejected with [`RegistryError::UnsupportedPrimitive`]; wrap them in a
//!   newtype.
//! - **Idempotent delete**: deleting a missing type is a no-op.
//!
//! ## Pieces
//!
//! - [`Registry`] - the unsynchronized core, mutated through `&mut self`
//! - [`SharedRegistry`] - a `Registry` behind a mutex, usable from any thread
//! - [`RegistryApi`] - the operation surface consumers depend on
//! - [`define_registry!`] - declares an isolated process-wide registry module
//! - [`global`] - this crate's own process-wide registry

#[macro_use]
mod macros;

pub mod aws;
pub mod images;
mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;
mod shared_registry;
mod type_key;

pub use registry::Registry;
pub use registry_error::RegistryError;
pub use registry_event::RegistryEvent;
pub use registry_trait::{RegistryApi, TraceCallback, TraceSlot};
pub use shared_registry::SharedRegistry;
pub use type_key::TypeKey;

define_registry!(
    /// The process-wide registry, created empty on first use.
    ///
    /// Prefer passing an explicit [`SharedRegistry`](crate::SharedRegistry) where you can; tests
    /// sharing this one must run serially and clean up after themselves.
    global
);
