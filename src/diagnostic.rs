//! Fatal diagnostics raised by the resolver and declaration model.
//!
//! A diagnostic is reported once, at `error` level, and turned into the
//! [`GenError`] that the caller returns immediately. There is no
//! accumulation: the first diagnostic ends the pass.

use crate::error::GenError;

/// A build-stopping problem found while resolving declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A marked field whose type is neither an owned wrapper nor the
    /// component singleton.
    Unresolvable {
        consumer: String,
        field: String,
        type_name: String,
    },
    /// A descriptor that violates the declaration contract.
    Malformed { message: String },
}

impl Diagnostic {
    pub fn unresolvable(consumer: &str, field: &str, type_name: &str) -> Self {
        Self::Unresolvable {
            consumer: consumer.to_string(),
            field: field.to_string(),
            type_name: type_name.to_string(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Reports the diagnostic and returns the fatal error for the caller to
    /// propagate.
    pub fn raise(self) -> GenError {
        match &self {
            Diagnostic::Unresolvable {
                consumer,
                field,
                type_name,
            } => tracing::error!(
                consumer = %consumer,
                field = %field,
                type_name = %type_name,
                "unresolvable injection target"
            ),
            Diagnostic::Malformed { message } => {
                tracing::error!(message = %message, "malformed declaration")
            }
        }
        self.into()
    }
}

impl From<Diagnostic> for GenError {
    fn from(diagnostic: Diagnostic) -> Self {
        match diagnostic {
            Diagnostic::Unresolvable {
                consumer,
                field,
                type_name,
            } => GenError::UnresolvableInjectionTarget {
                consumer,
                field,
                type_name,
            },
            Diagnostic::Malformed { message } => GenError::MalformedDeclaration(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolvable_message_names_type() {
        let err = Diagnostic::unresolvable("com.example.Baz", "unknown", "NotAWrapper").raise();
        assert!(matches!(
            err,
            GenError::UnresolvableInjectionTarget { ref type_name, .. } if type_name == "NotAWrapper"
        ));
        assert_eq!(
            err.to_string(),
            "'NotAWrapper' type can not be injected into com.example.Baz.unknown"
        );
    }

    #[test]
    fn test_malformed_maps_to_declaration_error() {
        let err = Diagnostic::malformed("component class name is empty").raise();
        assert!(matches!(err, GenError::MalformedDeclaration(_)));
        assert!(err.to_string().contains("component class name is empty"));
    }
}
