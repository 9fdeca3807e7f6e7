#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # dms-core
//!
//! Alias resolver, conversion registry, and map handler for dynamic object mapping.
//!
//! Callers ask for a conversion "from alias A to alias B" without naming the
//! concrete types involved. The handler resolves both aliases to type
//! identities, checks the runtime shape of the supplied value, looks up the
//! conversion registered for that exact type pair, and runs it. Every failure
//! is reported through the closed [`Error`] taxonomy.

/// Error taxonomy shared by every component.
pub mod error;
/// Dispatch: validation, lookup, execution, and error translation.
pub mod handler;
/// Profiles that populate the resolver and registry, and the handler builder.
pub mod profile;
/// Type-pair conversion registry.
pub mod registry;
/// Alias-to-type resolver.
pub mod resolver;
/// Type identities and erased values.
pub mod types;

pub use error::{BoxError, ConversionPanic, EmptyResult, Error, ErrorKind, Result};
pub use handler::MapHandler;
pub use profile::{MapHandlerBuilder, MappingProfile};
pub use registry::{ConversionFn, ConversionRegistry, MappingRegistry};
pub use resolver::{AliasResolver, TypeResolver};
pub use types::{Mappable, MappedValue, TypeKey};
