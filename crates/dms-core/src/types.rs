//! Type identities and erased values
//!
//! A [`TypeKey`] is the join key between the resolver and the registry: an
//! alias resolves to a `TypeKey`, and an ordered pair of `TypeKey`s selects a
//! conversion. Equality is `TypeId` equality, so two keys are equal iff they
//! denote the same concrete type.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque, comparable handle to a concrete type.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Identity of `T`
    #[inline]
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Fully-qualified type name, for diagnostics only.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path (`dms_models::Room` → `Room`).
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        let head = self.name.split('<').next().unwrap_or(self.name);
        match head.rfind("::") {
            Some(idx) => &self.name[idx + 2..],
            None => self.name,
        }
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
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A value whose concrete type can be inspected at runtime.
///
/// Implemented for every `'static + Send + Sync` type, so any model value can
/// be handed to [`crate::MapHandler::map`] as `&dyn Mappable`.
pub trait Mappable: Any + Send + Sync {
    /// Identity of the concrete type behind this value
    fn type_key(&self) -> TypeKey;

    /// Borrow as `Any` for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Convert an owned box into `Any` for downcasting
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> Mappable for T {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }
}

/// Owned, type-erased result of a conversion.
pub struct MappedValue {
    key: TypeKey,
    value: Box<dyn Mappable>,
}

impl MappedValue {
    /// Erase a concrete value
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            key: TypeKey::of::<T>(),
            value: Box::new(value),
        }
    }

    /// Identity of the contained value's type
    #[must_use]
    pub fn type_key(&self) -> TypeKey {
        self.key
    }

    /// Whether the contained value is a `T`
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.as_mappable().as_any().is::<T>()
    }

    /// Borrow the contained value as `T`
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_mappable().as_any().downcast_ref::<T>()
    }

    /// Take the contained value as `T`, or get `self` back if it is something else.
    ///
    /// # Errors
    ///
    /// Returns the original `MappedValue` when the contained type is not `T`.
    pub fn downcast<T: Any>(self) -> std::result::Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        match Mappable::into_any(self.value).downcast::<T>() {
            Ok(boxed) => Ok(*boxed),
            Err(_) => unreachable!("type checked above"),
        }
    }

    /// Borrow the contained value, e.g. to feed it back into the handler
    #[must_use]
    pub fn as_mappable(&self) -> &dyn Mappable {
        &*self.value
    }
}

impl fmt::Debug for MappedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedValue")
            .field("type", &self.key)
            .finish_non_exhaustive()
    }
}
