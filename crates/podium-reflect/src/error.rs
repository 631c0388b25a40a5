//! Registry errors

use podium_sdk::LoadError;
use thiserror::Error;

/// Errors raised by registry lookups, classification and construction
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReflectError {
    /// No pod with this name
    #[error("Unknown pod: {0}")]
    UnknownPod(String),

    /// No type with this qualified name
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// No slot with this name on the type (`Type.slot`)
    #[error("Unknown slot: {0}")]
    UnknownSlot(String),

    /// Value cannot be mapped to a type
    #[error("Not a registry value: {0}")]
    UnrecognizedValue(String),

    /// `make()` on a type with no registered producer
    #[error("No default constructor for {0}")]
    NoDefaultConstructor(String),

    /// Slot name declared twice on the same type
    #[error("Duplicate slot: {0}")]
    DuplicateSlot(String),

    /// Name that should be `pod::Type` is malformed
    #[error("Invalid qualified name: {0}")]
    InvalidQname(String),

    /// Type declared without a base (not the root) or root declared with one
    #[error("Invalid base for {qname}: {reason}")]
    InvalidBase {
        /// Offending type
        qname: String,
        /// What is wrong with it
        reason: String,
    },

    /// Base chain did not reach the root within the configured limit
    #[error("Base chain of {qname} exceeds {limit} steps")]
    BaseChainTooDeep {
        /// Type whose chain was walked
        qname: String,
        /// Configured limit
        limit: usize,
    },

    /// The registry owning a type was dropped
    #[error("Registry closed while resolving {0}")]
    RegistryClosed(String),

    /// Write to a const field
    #[error("Field is read-only: {0}")]
    ReadOnlyField(String),

    /// Field access on something that is not an object
    #[error("Not an object: {0}")]
    NotAnObject(String),

    /// Field does not belong to the instance's type
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Type declaring the field
        expected: String,
        /// Instance type
        actual: String,
    },

    /// Pod source failed
    #[error("Pod load failed: {0}")]
    Load(#[from] LoadError),
}

/// Registry result type
pub type ReflectResult<T> = Result<T, ReflectError>;
