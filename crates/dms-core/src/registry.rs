//! Type-pair conversion registry
//!
//! Stores one conversion function per ordered `(source, target)` pair of type
//! identities. Each registration site is fully typed; the table itself holds
//! erased functions that accept `&dyn Mappable` and return a [`MappedValue`].
//! `(A, B)` and `(B, A)` are independent entries.

use std::any::Any;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::error::{BoxError, Error, Result};
use crate::types::{Mappable, MappedValue, TypeKey};

/// Erased conversion function.
///
/// `Ok(None)` means the function ran but produced no result.
pub type ConversionFn = Arc<
    dyn Fn(&dyn Mappable) -> std::result::Result<Option<MappedValue>, BoxError> + Send + Sync,
>;

/// Source of conversion functions for the handler.
pub trait MappingRegistry: Send + Sync {
    /// Find the conversion for an ordered type pair.
    ///
    /// A missing entry is `Ok(None)`, not an error; whether that is fatal is
    /// for the caller to decide.
    ///
    /// # Errors
    ///
    /// Implementations backed by something other than memory may fail; the
    /// in-memory [`ConversionRegistry`] never does.
    fn lookup(&self, source: TypeKey, target: TypeKey) -> Result<Option<ConversionFn>>;
}

/// In-memory conversion table. Re-registering a pair replaces the function.
#[derive(Default)]
pub struct ConversionRegistry {
    conversions: DashMap<(TypeKey, TypeKey), ConversionFn>,
}

impl ConversionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            conversions: DashMap::new(),
        }
    }

    /// Register a fallible conversion from `S` to `T`
    pub fn register<S, T, E, F>(&self, func: F) -> &Self
    where
        S: Any,
        T: Any + Send + Sync,
        E: Into<BoxError>,
        F: Fn(&S) -> std::result::Result<T, E> + Send + Sync + 'static,
    {
        self.register_optional::<S, T, E, _>(move |source: &S| func(source).map(Some))
    }

    /// Register an infallible conversion from `S` to `T`
    pub fn register_fn<S, T, F>(&self, func: F) -> &Self
    where
        S: Any,
        T: Any + Send + Sync,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        self.register_optional::<S, T, std::convert::Infallible, _>(move |source: &S| {
            Ok(Some(func(source)))
        })
    }

    /// Register a conversion from `S` to `T` that may produce no result
    pub fn register_optional<S, T, E, F>(&self, func: F) -> &Self
    where
        S: Any,
        T: Any + Send + Sync,
        E: Into<BoxError>,
        F: Fn(&S) -> std::result::Result<Option<T>, E> + Send + Sync + 'static,
    {
        let source_key = TypeKey::of::<S>();
        let target_key = TypeKey::of::<T>();

        let erased: ConversionFn = Arc::new(
            move |input: &dyn Mappable| -> std::result::Result<Option<MappedValue>, BoxError> {
                let source = input.as_any().downcast_ref::<S>().ok_or_else(|| -> BoxError {
                    Box::new(Error::type_mismatch(
                        "data",
                        source_key.short_name(),
                        source_key.name(),
                        input.type_key().name(),
                    ))
                })?;
                func(source)
                    .map(|result| result.map(MappedValue::new))
                    .map_err(Into::into)
            },
        );

        self.register_erased(source_key, target_key, erased)
    }

    /// Register an already-erased conversion under an explicit type pair.
    ///
    /// The function must produce values of type `target`; the handler does not
    /// re-check the output shape.
    pub fn register_erased(&self, source: TypeKey, target: TypeKey, func: ConversionFn) -> &Self {
        if self.conversions.insert((source, target), func).is_some() {
            debug!(
                source = source.name(),
                target = target.name(),
                "Conversion replaced"
            );
        } else {
            debug!(
                source = source.name(),
                target = target.name(),
                "Conversion registered"
            );
        }
        self
    }

    /// Get the conversion for a type pair, if any
    #[must_use]
    pub fn get(&self, source: TypeKey, target: TypeKey) -> Option<ConversionFn> {
        self.conversions
            .get(&(source, target))
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Check if a conversion exists for a type pair
    #[must_use]
    pub fn contains(&self, source: TypeKey, target: TypeKey) -> bool {
        self.conversions.contains_key(&(source, target))
    }

    /// All registered type pairs, sorted by type name
    #[must_use]
    pub fn pairs(&self) -> Vec<(TypeKey, TypeKey)> {
        let mut pairs: Vec<_> = self.conversions.iter().map(|entry| *entry.key()).collect();
        pairs.sort_by(|a, b| (a.0.name(), a.1.name()).cmp(&(b.0.name(), b.1.name())));
        pairs
    }

    /// Number of registered conversions
    #[must_use]
    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    /// Whether no conversion is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }
}

impl MappingRegistry for ConversionRegistry {
    fn lookup(&self, source: TypeKey, target: TypeKey) -> Result<Option<ConversionFn>> {
        Ok(self.get(source, target))
    }
}

impl std::fmt::Debug for ConversionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionRegistry")
            .field("pairs", &self.pairs())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Celsius(f64);

    #[derive(Debug, PartialEq)]
    struct Fahrenheit(f64);

    fn run(
        func: &ConversionFn,
        input: &dyn Mappable,
    ) -> std::result::Result<Option<MappedValue>, BoxError> {
        func(input)
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = ConversionRegistry::new();
        registry.register_fn(|c: &Celsius| Fahrenheit(c.0 * 9.0 / 5.0 + 32.0));

        let func = registry
            .lookup(TypeKey::of::<Celsius>(), TypeKey::of::<Fahrenheit>())
            .unwrap()
            .expect("registered");

        let result = run(&func, &Celsius(100.0)).unwrap().unwrap();
        assert_eq!(result.downcast::<Fahrenheit>().unwrap(), Fahrenheit(212.0));
    }

    #[test]
    fn test_pair_order_matters() {
        let registry = ConversionRegistry::new();
        registry.register_fn(|c: &Celsius| Fahrenheit(c.0));

        assert!(registry.contains(TypeKey::of::<Celsius>(), TypeKey::of::<Fahrenheit>()));
        assert!(!registry.contains(TypeKey::of::<Fahrenheit>(), TypeKey::of::<Celsius>()));
        assert!(
            registry
                .lookup(TypeKey::of::<Fahrenheit>(), TypeKey::of::<Celsius>())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_reregister_overwrites() {
        let registry = ConversionRegistry::new();
        registry.register_fn(|_: &Celsius| Fahrenheit(1.0));
        registry.register_fn(|_: &Celsius| Fahrenheit(2.0));

        assert_eq!(registry.len(), 1);
        let func = registry
            .get(TypeKey::of::<Celsius>(), TypeKey::of::<Fahrenheit>())
            .unwrap();
        let result = run(&func, &Celsius(0.0)).unwrap().unwrap();
        assert_eq!(result.downcast_ref::<Fahrenheit>(), Some(&Fahrenheit(2.0)));
    }

    #[test]
    fn test_fallible_conversion_error() {
        let registry = ConversionRegistry::new();
        registry.register(|c: &Celsius| {
            if c.0 < -273.15 {
                Err(std::io::Error::other("below absolute zero"))
            } else {
                Ok(Fahrenheit(c.0))
            }
        });

        let func = registry
            .get(TypeKey::of::<Celsius>(), TypeKey::of::<Fahrenheit>())
            .unwrap();
        let err = run(&func, &Celsius(-300.0)).unwrap_err();
        assert_eq!(err.to_string(), "below absolute zero");
    }

    #[test]
    fn test_optional_conversion_none() {
        let registry = ConversionRegistry::new();
        registry.register_optional(|_: &Celsius| Ok::<Option<Fahrenheit>, BoxError>(None));

        let func = registry
            .get(TypeKey::of::<Celsius>(), TypeKey::of::<Fahrenheit>())
            .unwrap();
        assert!(run(&func, &Celsius(0.0)).unwrap().is_none());
    }

    #[test]
    fn test_wrong_input_rejected() {
        let registry = ConversionRegistry::new();
        registry.register_fn(|c: &Celsius| Fahrenheit(c.0));

        let func = registry
            .get(TypeKey::of::<Celsius>(), TypeKey::of::<Fahrenheit>())
            .unwrap();
        let err = run(&func, &Fahrenheit(0.0)).unwrap_err();
        assert!(err.to_string().contains("does not match"));
        match err.downcast_ref::<Error>() {
            Some(Error::TypeMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, TypeKey::of::<Celsius>().name());
                assert_eq!(actual, TypeKey::of::<Fahrenheit>().name());
            }
            other => panic!("unexpected cause: {other:?}"),
        }
    }

    #[test]
    fn test_erased_registration() {
        let registry = ConversionRegistry::new();
        let func: ConversionFn = Arc::new(
            |input: &dyn Mappable| -> std::result::Result<Option<MappedValue>, BoxError> {
                let text = input.as_any().downcast_ref::<String>().ok_or("expected string")?;
                Ok(Some(MappedValue::new(text.len())))
            },
        );
        registry.register_erased(TypeKey::of::<String>(), TypeKey::of::<usize>(), func);

        let func = registry
            .get(TypeKey::of::<String>(), TypeKey::of::<usize>())
            .unwrap();
        let result = run(&func, &"four".to_string()).unwrap().unwrap();
        assert_eq!(result.downcast::<usize>().unwrap(), 4);
        assert_eq!(
            registry.pairs(),
            vec![(TypeKey::of::<String>(), TypeKey::of::<usize>())]
        );
    }
}
