//! Map handler
//!
//! The single entry point for callers. A call to [`MapHandler::map`] runs a
//! fixed pipeline:
//!
//! 1. check arguments (`NullInput`, then `InvalidArgument` per alias)
//! 2. resolve both aliases (`AliasNotFound` passes through, anything else is wrapped)
//! 3. check the value's runtime type against the source alias (`TypeMismatch`)
//! 4. look up the conversion (`MappingNotFound` when absent, other lookup errors wrapped)
//! 5. run it (errors, panics, empty results and results of the wrong type
//!    become `MappingFailure`)
//!
//! A [`MappedValue`] or `Box<dyn Mappable>` passed as `data` is unwrapped
//! first, so the result of one `map` call can be handed straight to the next.
//!
//! No step retries: given the same inputs and registrations a failed call
//! fails the same way again.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{ConversionPanic, EmptyResult, Error, Result};
use crate::registry::{ConversionFn, MappingRegistry};
use crate::resolver::TypeResolver;
use crate::types::{Mappable, MappedValue, TypeKey};

/// Resolves aliases, validates input, and dispatches to registered conversions.
#[derive(Clone)]
pub struct MapHandler {
    registry: Arc<dyn MappingRegistry>,
    resolver: Arc<dyn TypeResolver>,
}

impl MapHandler {
    /// Create a handler over a registry and resolver
    pub fn new(registry: Arc<dyn MappingRegistry>, resolver: Arc<dyn TypeResolver>) -> Self {
        Self { registry, resolver }
    }

    /// Convert `data` from the type behind `source_alias` to the type behind `target_alias`.
    ///
    /// # Errors
    ///
    /// - [`Error::NullInput`] if `data` is `None`
    /// - [`Error::InvalidArgument`] if either alias is blank
    /// - [`Error::AliasNotFound`] if either alias is unknown
    /// - [`Error::TypeMismatch`] if `data` is not of the source type
    /// - [`Error::MappingNotFound`] if no conversion is registered for the pair
    /// - [`Error::MappingFailure`] for anything else, with the original cause attached
    pub fn map(
        &self,
        data: Option<&dyn Mappable>,
        source_alias: &str,
        target_alias: &str,
    ) -> Result<MappedValue> {
        let data = data.ok_or_else(|| Error::null_input("data"))?;
        if source_alias.trim().is_empty() {
            return Err(Error::invalid_argument(
                "source_alias",
                "Source type cannot be empty",
            ));
        }
        if target_alias.trim().is_empty() {
            return Err(Error::invalid_argument(
                "target_alias",
                "Target type cannot be empty",
            ));
        }

        debug!(source_alias, target_alias, "Mapping");

        let source_type = self.resolve_type(source_alias)?;
        let target_type = self.resolve_type(target_alias)?;

        let data = unwrap_erased(data);
        validate_data_type(data, source_type, source_alias)?;

        let func = self.mapping_function(source_type, target_type, source_alias, target_alias)?;

        let mapped = execute(&func, data, source_type, target_type)?;
        validate_result_type(&mapped, target_type, target_alias)?;
        Ok(mapped)
    }

    /// Like [`MapHandler::map`], but takes the value directly and returns the concrete result.
    ///
    /// # Errors
    ///
    /// Everything [`MapHandler::map`] returns, plus [`Error::TypeMismatch`] on
    /// the `result` argument when the conversion did not produce a `T`.
    pub fn map_into<T: Any>(
        &self,
        data: &dyn Mappable,
        source_alias: &str,
        target_alias: &str,
    ) -> Result<T> {
        self.map(Some(data), source_alias, target_alias)?
            .downcast::<T>()
            .map_err(|mapped| {
                Error::type_mismatch(
                    "result",
                    target_alias,
                    TypeKey::of::<T>().name(),
                    mapped.type_key().name(),
                )
            })
    }

    fn resolve_type(&self, alias: &str) -> Result<TypeKey> {
        match self.resolver.resolve(alias) {
            Ok(type_key) => Ok(type_key),
            Err(err @ Error::AliasNotFound { .. }) => Err(err),
            Err(err) => Err(Error::failure(
                format!("Type resolution failed for '{alias}'"),
                err,
            )),
        }
    }

    fn mapping_function(
        &self,
        source_type: TypeKey,
        target_type: TypeKey,
        source_alias: &str,
        target_alias: &str,
    ) -> Result<ConversionFn> {
        match self.registry.lookup(source_type, target_type) {
            Ok(Some(func)) => Ok(func),
            Ok(None) => Err(Error::mapping_not_found(source_alias, target_alias)),
            Err(err @ Error::MappingNotFound { .. }) => Err(err),
            Err(err) => Err(Error::failure(
                format!("Failed to retrieve mapping for {source_alias} → {target_alias}"),
                err,
            )),
        }
    }
}

/// Look through erased wrappers to the value they carry.
fn unwrap_erased(mut data: &dyn Mappable) -> &dyn Mappable {
    loop {
        let any = data.as_any();
        if let Some(mapped) = any.downcast_ref::<MappedValue>() {
            data = mapped.as_mappable();
        } else if let Some(boxed) = any.downcast_ref::<Box<dyn Mappable>>() {
            data = &**boxed;
        } else {
            return data;
        }
    }
}

fn validate_result_type(
    mapped: &MappedValue,
    expected: TypeKey,
    target_alias: &str,
) -> Result<()> {
    let actual = mapped.type_key();
    if actual == expected {
        return Ok(());
    }
    warn!(
        target = expected.name(),
        actual = actual.name(),
        "Conversion produced a value of the wrong type"
    );
    Err(Error::failure(
        "Conversion produced a value of the wrong type",
        Error::type_mismatch("result", target_alias, expected.name(), actual.name()),
    ))
}

fn validate_data_type(data: &dyn Mappable, expected: TypeKey, source_alias: &str) -> Result<()> {
    let actual = data.type_key();
    if actual == expected {
        Ok(())
    } else {
        Err(Error::type_mismatch(
            "data",
            source_alias,
            expected.name(),
            actual.name(),
        ))
    }
}

fn execute(
    func: &ConversionFn,
    data: &dyn Mappable,
    source_type: TypeKey,
    target_type: TypeKey,
) -> Result<MappedValue> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| func(data)));

    match outcome {
        Ok(Ok(Some(mapped))) => Ok(mapped),
        Ok(Ok(None)) => {
            warn!(
                source = source_type.name(),
                target = target_type.name(),
                "Conversion produced no result"
            );
            Err(Error::failure(
                "Conversion produced no result",
                EmptyResult {
                    from: source_type.name().to_string(),
                    to: target_type.name().to_string(),
                },
            ))
        }
        Ok(Err(cause)) => {
            warn!(
                source = source_type.name(),
                target = target_type.name(),
                error = %cause,
                "Conversion failed"
            );
            Err(Error::failure("Mapping execution failed", cause))
        }
        Err(payload) => {
            let cause = ConversionPanic::from_payload(&*payload);
            warn!(
                source = source_type.name(),
                target = target_type.name(),
                error = %cause,
                "Conversion panicked"
            );
            Err(Error::failure("Mapping execution failed", cause))
        }
    }
}

impl std::fmt::Debug for MapHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapHandler").finish_non_exhaustive()
    }
}
