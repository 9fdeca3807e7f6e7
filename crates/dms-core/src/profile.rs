//! Mapping profiles and handler assembly
//!
//! A profile is the configuration-time collaborator that binds aliases to
//! types and registers the conversions between them for one integration.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::Result;
use crate::handler::MapHandler;
use crate::registry::ConversionRegistry;
use crate::resolver::AliasResolver;

/// Supplies aliases and conversions for one integration.
pub trait MappingProfile {
    /// Profile name, used in logs
    fn name(&self) -> &str;

    /// Bind every alias this profile makes reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolver rejects an alias.
    fn configure_type_aliases(&self, resolver: &AliasResolver) -> Result<()>;

    /// Register every directed conversion this profile supports.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot build its conversions.
    fn configure_mappings(&self, registry: &ConversionRegistry) -> Result<()>;
}

/// Builds a [`MapHandler`] from one or more profiles.
///
/// Profiles are applied in order; a later profile that binds the same alias or
/// type pair replaces the earlier binding.
#[derive(Debug, Default)]
pub struct MapHandlerBuilder {
    resolver: Arc<AliasResolver>,
    registry: Arc<ConversionRegistry>,
    profiles: Vec<String>,
}

impl MapHandlerBuilder {
    /// Start with an empty resolver and registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a profile.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while the profile configures aliases or conversions.
    pub fn add_profile(&mut self, profile: &dyn MappingProfile) -> Result<&mut Self> {
        debug!(profile = profile.name(), "Applying mapping profile");
        profile.configure_type_aliases(&self.resolver)?;
        profile.configure_mappings(&self.registry)?;
        self.profiles.push(profile.name().to_string());
        Ok(self)
    }

    /// Apply a profile, consuming and returning the builder.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while the profile configures aliases or conversions.
    pub fn with_profile(mut self, profile: &dyn MappingProfile) -> Result<Self> {
        self.add_profile(profile)?;
        Ok(self)
    }

    /// Resolver being populated
    #[must_use]
    pub fn resolver(&self) -> &AliasResolver {
        &self.resolver
    }

    /// Registry being populated
    #[must_use]
    pub fn registry(&self) -> &ConversionRegistry {
        &self.registry
    }

    /// Names of the applied profiles, in order
    #[must_use]
    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    /// Finish configuration and create the handler
    #[must_use]
    pub fn build(self) -> MapHandler {
        info!(
            profiles = ?self.profiles,
            aliases = self.resolver.len(),
            conversions = self.registry.len(),
            "Map handler ready"
        );
        MapHandler::new(self.registry, self.resolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::TypeKey;

    #[derive(Debug, PartialEq)]
    struct Meters(f64);

    #[derive(Debug, PartialEq)]
    struct Feet(f64);

    struct LengthProfile;

    impl MappingProfile for LengthProfile {
        fn name(&self) -> &str {
            "length"
        }

        fn configure_type_aliases(&self, resolver: &AliasResolver) -> Result<()> {
            resolver.register::<Meters>("Length.Meters")?;
            resolver.register::<Feet>("Length.Feet")
        }

        fn configure_mappings(&self, registry: &ConversionRegistry) -> Result<()> {
            registry
                .register_fn(|m: &Meters| Feet(m.0 * 3.25))
                .register_fn(|f: &Feet| Meters(f.0 / 3.25));
            Ok(())
        }
    }

    struct BrokenProfile;

    impl MappingProfile for BrokenProfile {
        fn name(&self) -> &str {
            "broken"
        }

        fn configure_type_aliases(&self, resolver: &AliasResolver) -> Result<()> {
            resolver.register::<Meters>(" ")
        }

        fn configure_mappings(&self, _registry: &ConversionRegistry) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_builder_applies_profile() {
        let builder = MapHandlerBuilder::new().with_profile(&LengthProfile).unwrap();

        assert_eq!(builder.profiles(), ["length".to_string()]);
        assert_eq!(builder.resolver().len(), 2);
        assert!(
            builder
                .registry()
                .contains(TypeKey::of::<Feet>(), TypeKey::of::<Meters>())
        );

        let handler = builder.build();
        let feet: Feet = handler
            .map_into(&Meters(2.0), "Length.Meters", "Length.Feet")
            .unwrap();
        assert_eq!(feet, Feet(6.5));
    }

    #[test]
    fn test_builder_surfaces_profile_error() {
        let err = MapHandlerBuilder::new()
            .with_profile(&BrokenProfile)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { argument: "alias", .. }));
    }
}
