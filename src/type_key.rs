//! Type keys: the identity under which a dependency is stored.
//!
//! A [`TypeKey`] is derived from the dependency's type alone, never from its
//! value. Two keys are equal exactly when their `TypeId`s are equal; the name
//! is carried for diagnostics and reads as a reference to the type
//! (`&my_crate::Client`), so it never collides with the bare type name.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::RegistryError;

/// Scalar types the registry refuses to key on.
///
/// A key such as `&String` would be shared by every unrelated string-valued
/// dependency, so only one of them could ever be registered. Wrap such values
/// in a newtype instead.
const PRIMITIVES: &[fn() -> TypeId] = &[
    TypeId::of::<bool>,
    TypeId::of::<char>,
    TypeId::of::<i8>,
    TypeId::of::<i16>,
    TypeId::of::<i32>,
    TypeId::of::<i64>,
    TypeId::of::<i128>,
    TypeId::of::<isize>,
    TypeId::of::<u8>,
    TypeId::of::<u16>,
    TypeId::of::<u32>,
    TypeId::of::<u64>,
    TypeId::of::<u128>,
    TypeId::of::<usize>,
    TypeId::of::<f32>,
    TypeId::of::<f64>,
    TypeId::of::<String>,
    TypeId::of::<&'static str>,
];

/// Identity of a registered dependency type.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Computes the key for `T` without validating it.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<&'static T>(),
        }
    }

    /// Computes the key for `T`, rejecting bare primitives.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnsupportedPrimitive`] if `T` is one of the scalar
    /// types listed above.
    pub fn derive<T: 'static>() -> Result<Self, RegistryError> {
        let key = Self::of::<T>();
        if key.is_primitive() {
            return Err(RegistryError::UnsupportedPrimitive { key });
        }
        Ok(key)
    }

    /// Whether the keyed type is a bare primitive.
    pub fn is_primitive(&self) -> bool {
        PRIMITIVES.iter().any(|id| id() == self.id)
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified name of a reference to the keyed type.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
