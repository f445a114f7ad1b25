//! Error types for building a compilation aggregate.

use thiserror::Error;

/// Errors that can occur while assembling a [`Compilation`](crate::Compilation).
///
/// The used-reference analysis itself never fails; these errors only guard
/// the inputs handed over by the binder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A handle id that is not part of the reference list.
    #[error("Unknown reference: #{0}")]
    UnknownReference(u32),

    /// An assembly id that was never registered.
    #[error("Unknown assembly: #{0}")]
    UnknownAssembly(u32),

    /// A symbol id that does not belong to the symbol table.
    #[error("Unknown symbol: #{0}")]
    UnknownSymbol(u32),

    /// An import directive id that was never registered.
    #[error("Unknown import directive: #{0}")]
    UnknownImport(u32),

    /// A file id that was never registered.
    #[error("Unknown file: #{0}")]
    UnknownFile(u32),

    /// A symbol that was expected to be of another kind.
    #[error("Invalid {kind}: {message}")]
    Invalid { kind: &'static str, message: String },
}

impl ModelError {
    /// Create an invalid assembly binding error.
    pub fn invalid_assembly(message: impl Into<String>) -> Self {
        Self::Invalid {
            kind: "assembly",
            message: message.into(),
        }
    }

    /// Create an invalid symbol error.
    pub fn invalid_symbol(message: impl Into<String>) -> Self {
        Self::Invalid {
            kind: "symbol",
            message: message.into(),
        }
    }

    /// Create an invalid import directive error.
    pub fn invalid_import(message: impl Into<String>) -> Self {
        Self::Invalid {
            kind: "import",
            message: message.into(),
        }
    }
}

/// Result alias for model construction.
pub type ModelResult<T> = Result<T, ModelError>;
