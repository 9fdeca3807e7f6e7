//! Error types for the mapping system

use thiserror::Error;

/// Boxed cause carried by [`Error::MappingFailure`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Coarse classification of an [`Error`], for callers that branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    NullInput,
    AliasNotFound,
    MappingNotFound,
    TypeMismatch,
    MappingFailure,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::InvalidArgument => "invalid argument",
            Self::NullInput => "null input",
            Self::AliasNotFound => "alias not found",
            Self::MappingNotFound => "mapping not found",
            Self::TypeMismatch => "type mismatch",
            Self::MappingFailure => "mapping failure",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while registering or executing mappings
#[derive(Error, Debug)]
pub enum Error {
    /// A required string argument is blank
    #[error("{message} (argument '{argument}')")]
    InvalidArgument {
        argument: &'static str,
        message: String,
    },

    /// The value to convert is absent
    #[error("Value to map cannot be null (argument '{argument}')")]
    NullInput { argument: &'static str },

    /// No type is registered under the alias
    #[error("Type alias '{alias}' not registered")]
    AliasNotFound { alias: String },

    /// No conversion is registered for the resolved type pair
    #[error("No mapping registered for {source_alias} → {target_alias}")]
    MappingNotFound {
        source_alias: String,
        target_alias: String,
    },

    /// The runtime shape of a value differs from the one its alias resolves to
    #[error(
        "Data type '{actual}' does not match expected type '{alias}' ({expected}) (argument '{argument}')"
    )]
    TypeMismatch {
        argument: &'static str,
        alias: String,
        expected: String,
        actual: String,
    },

    /// Anything else that went wrong; always carries the original cause
    #[error("{message}")]
    MappingFailure {
        message: String,
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Create an invalid-argument error
    pub fn invalid_argument(argument: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            message: message.into(),
        }
    }

    /// Create a null-input error
    #[must_use]
    pub fn null_input(argument: &'static str) -> Self {
        Self::NullInput { argument }
    }

    /// Create an alias-not-found error
    pub fn alias_not_found(alias: impl Into<String>) -> Self {
        Self::AliasNotFound {
            alias: alias.into(),
        }
    }

    /// Create a mapping-not-found error naming both aliases
    pub fn mapping_not_found(
        source_alias: impl Into<String>,
        target_alias: impl Into<String>,
    ) -> Self {
        Self::MappingNotFound {
            source_alias: source_alias.into(),
            target_alias: target_alias.into(),
        }
    }

    /// Create a type-mismatch error
    pub fn type_mismatch(
        argument: &'static str,
        alias: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            argument,
            alias: alias.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Wrap an arbitrary cause into a mapping failure
    pub fn failure(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::MappingFailure {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Classify this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::NullInput { .. } => ErrorKind::NullInput,
            Self::AliasNotFound { .. } => ErrorKind::AliasNotFound,
            Self::MappingNotFound { .. } => ErrorKind::MappingNotFound,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::MappingFailure { .. } => ErrorKind::MappingFailure,
        }
    }

    /// Errors that the handler passes through to callers without rewrapping.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidArgument
                | ErrorKind::NullInput
                | ErrorKind::AliasNotFound
                | ErrorKind::MappingNotFound
        )
    }
}

/// Cause attached when a conversion function runs but yields nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Mapping function from '{from}' to '{to}' returned no value")]
pub struct EmptyResult {
    pub from: String,
    pub to: String,
}

/// Cause attached when a conversion function panics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Mapping function panicked: {message}")]
pub struct ConversionPanic {
    pub message: String,
}

impl ConversionPanic {
    /// Extract the panic message from a `catch_unwind` payload
    #[must_use]
    pub fn from_payload(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self { message }
    }
}

/// Crate-local result type for mapping operations.
pub type Result<T> = std::result::Result<T, Error>;
