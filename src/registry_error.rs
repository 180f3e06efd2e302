use thiserror::Error;

use crate::TypeKey;

/// Errors returned by registry operations.
///
/// Every variant except [`RegistryError::RegistryLock`] carries the key of the
/// type the operation was asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The type is a bare primitive, which would make a useless shared key.
    #[error("primitives are not supported: key={key}")]
    UnsupportedPrimitive { key: TypeKey },

    /// A value is already stored for this type. The stored value is untouched.
    #[error("key already registered: {key}")]
    AlreadyRegistered { key: TypeKey },

    /// Nothing is stored for this type.
    #[error("value is not registered: key={key}")]
    NotRegistered { key: TypeKey },

    /// The stored value could not be downcast to the requested type.
    #[error("stored value does not match type: key={key}")]
    TypeMismatch { key: TypeKey },

    #[error("failed to acquire registry lock")]
    RegistryLock,
}

impl RegistryError {
    /// The key the failing operation was asked about, if one was derived.
    pub fn key(&self) -> Option<TypeKey> {
        match self {
            RegistryError::UnsupportedPrimitive { key }
            | RegistryError::AlreadyRegistered { key }
            | RegistryError::NotRegistered { key }
            | RegistryError::TypeMismatch { key } => Some(*key),
            RegistryError::RegistryLock => None,
        }
    }
}
