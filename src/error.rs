//! Generator error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a generation pass.
///
/// Every variant is fatal: the pass stops at the first one and no generated
/// file is written.
#[derive(Error, Debug)]
pub enum GenError {
    // Resolution errors
    #[error("'{type_name}' type can not be injected into {consumer}.{field}")]
    UnresolvableInjectionTarget {
        consumer: String,
        field: String,
        type_name: String,
    },

    #[error("Malformed declaration: {0}")]
    MalformedDeclaration(String),

    // Declaration table errors
    #[error("Component {component} injects unknown class '{target}'")]
    UnknownInjectTarget { component: String, target: String },

    #[error("Duplicate declaration: {0}")]
    DuplicateDeclaration(String),

    #[error("Class {consumer} is injected by both {first} and {second}")]
    MultipleComponents {
        consumer: String,
        first: String,
        second: String,
    },

    // Input errors
    #[error("Parse error in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Result alias for generator operations.
pub type Result<T, E = GenError> = std::result::Result<T, E>;
