//! Alias-to-type resolver
//!
//! Maps human-readable aliases such as `"Model.Reservation"` to concrete type
//! identities, so call sites never need a compile-time type reference.

use dashmap::DashMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::TypeKey;

/// Resolves aliases to type identities.
pub trait TypeResolver: Send + Sync {
    /// Look up the type registered under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AliasNotFound`] when nothing is registered under the alias.
    fn resolve(&self, alias: &str) -> Result<TypeKey>;
}

/// In-memory alias table. Registering an existing alias overwrites it.
#[derive(Debug, Default)]
pub struct AliasResolver {
    aliases: DashMap<String, TypeKey>,
}

impl AliasResolver {
    /// Create an empty resolver
    #[must_use]
    pub fn new() -> Self {
        Self {
            aliases: DashMap::new(),
        }
    }

    /// Bind `alias` to `type_key`, replacing any previous binding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the alias is empty or whitespace.
    pub fn register_alias(&self, alias: &str, type_key: TypeKey) -> Result<()> {
        if alias.trim().is_empty() {
            return Err(Error::invalid_argument("alias", "Alias cannot be empty"));
        }

        if let Some(previous) = self.aliases.insert(alias.to_string(), type_key) {
            if previous != type_key {
                debug!(
                    alias,
                    previous = previous.name(),
                    current = type_key.name(),
                    "Type alias rebound"
                );
            }
        }
        Ok(())
    }

    /// Bind `alias` to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the alias is empty or whitespace.
    pub fn register<T: 'static>(&self, alias: &str) -> Result<()> {
        self.register_alias(alias, TypeKey::of::<T>())
    }

    /// Check if an alias is bound
    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    /// All bound aliases, sorted
    #[must_use]
    pub fn aliases(&self) -> Vec<(String, TypeKey)> {
        let mut entries: Vec<_> = self
            .aliases
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Number of bound aliases
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Whether no alias is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl TypeResolver for AliasResolver {
    fn resolve(&self, alias: &str) -> Result<TypeKey> {
        self.aliases
            .get(alias)
            .map(|entry| *entry.value())
            .ok_or_else(|| Error::alias_not_found(alias))
    }
}
