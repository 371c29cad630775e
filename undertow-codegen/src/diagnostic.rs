//! Structured diagnostics
//!
//! Synthesis never panics on user input and never aborts a whole batch. Every problem is
//! a [`Diagnostic`] naming the aggregate (and field, when there is one) it concerns. The
//! derive folds the fatal ones into a single `syn::Error` at the macro boundary.

use std::fmt;

use proc_macro2::Span;
use thiserror::Error;

/// How a diagnostic affects the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational: a field was treated as a plain leaf.
    Note,
    /// Something is probably wrong, but synthesis of other items is unaffected.
    Warning,
    /// The field (or declaration) could not be synthesized.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// Where an unsupported type comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeOrigin {
    /// A container from the runtime crate that has no generator or witness.
    RecognizedFamily,
    /// Any other type.
    Foreign,
}

impl fmt::Display for ShapeOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShapeOrigin::RecognizedFamily => "an undertow container without a traversal",
            ShapeOrigin::Foreign => "not a traversable container",
        })
    }
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    /// No registered generator supports the field's type.
    #[error("no shape generator supports `{type_name}` ({origin})")]
    UnsupportedShape {
        /// The field type as written
        type_name: String,
        /// Whether the type belongs to the runtime crate
        origin: ShapeOrigin,
    },

    /// The declaration cannot carry traversals at all.
    #[error("malformed declaration: {reason}")]
    MalformedDeclaration {
        /// Why
        reason: String,
    },

    /// The generator's focus argument does not exist on the field type.
    #[error("`{generator}` traverses type argument {index} of `{type_name}`, which has none at that position")]
    MissingFocusArgument {
        /// Generator that was resolved
        generator: &'static str,
        /// The field type as written
        type_name: String,
        /// Requested argument position
        index: usize,
    },

    /// A rebuild referenced a field the aggregate does not declare.
    #[error("reconstruction of `{aggregate}` does not include field `{field}`")]
    ReconstructionMismatch {
        /// Aggregate being rebuilt
        aggregate: String,
        /// Field that could not be placed
        field: String,
    },

    /// A generator produced tokens that do not form a block.
    #[error("`{generator}` produced an invalid traversal body: {reason}")]
    InvalidFragment {
        /// Generator at fault
        generator: &'static str,
        /// Parser message
        reason: String,
    },

    /// Nothing in the declaration could be traversed.
    #[error("no traversal generated for `{aggregate}`: no field has a traversable shape")]
    NoTraversalGenerated {
        /// Aggregate name
        aggregate: String,
    },
}

/// A located, severity-tagged [`DiagnosticKind`].
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// How serious it is
    pub severity: Severity,
    /// What happened
    pub kind: DiagnosticKind,
    /// Aggregate the diagnostic refers to
    pub aggregate: String,
    /// Field, when the problem is local to one
    pub field: Option<String>,
    /// Where to point the compiler error
    pub span: Span,
}

impl Diagnostic {
    /// An error against the whole aggregate.
    pub fn error(kind: DiagnosticKind, aggregate: impl Into<String>, span: Span) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            aggregate: aggregate.into(),
            field: None,
            span,
        }
    }

    /// Attach the offending field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Change the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Whether the derive must fail because of this diagnostic.
    ///
    /// Errors always are; so is the "no traversal generated" warning, since a derive that
    /// emits nothing is never what the user asked for.
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Error
            || matches!(self.kind, DiagnosticKind::NoTraversalGenerated { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {}.{}: {}", self.severity, self.aggregate, field, self.kind),
            None => write!(f, "{}: {}: {}", self.severity, self.aggregate, self.kind),
        }
    }
}

impl std::error::Error for Diagnostic {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<&Diagnostic> for syn::Error {
    fn from(diagnostic: &Diagnostic) -> Self {
        syn::Error::new(diagnostic.span, &diagnostic.kind)
    }
}

/// Fold every fatal diagnostic into one combined `syn::Error`.
pub fn into_compile_error<'a, I>(diagnostics: I) -> Option<syn::Error>
where
    I: IntoIterator<Item = &'a Diagnostic>,
{
    diagnostics
        .into_iter()
        .filter(|diagnostic| diagnostic.is_fatal())
        .map(syn::Error::from)
        .reduce(|mut combined, next| {
            combined.combine(next);
            combined
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn unsupported() -> Diagnostic {
        Diagnostic::error(
            DiagnosticKind::UnsupportedShape {
                type_name: "Rc<i32>".into(),
                origin: ShapeOrigin::Foreign,
            },
            "Basket",
            Span::call_site(),
        )
        .with_field("items")
    }

    #[test]
    fn display_names_aggregate_and_field() {
        assert_eq!(
            unsupported().to_string(),
            "error: Basket.items: no shape generator supports `Rc<i32>` (not a traversable container)"
        );
    }

    #[test]
    fn notes_are_not_fatal() {
        let note = unsupported().with_severity(Severity::Note);
        assert!(!note.is_fatal());
        assert!(into_compile_error([&note]).is_none());
    }

    #[test]
    fn no_traversal_warning_is_fatal() {
        let warning = Diagnostic::error(
            DiagnosticKind::NoTraversalGenerated {
                aggregate: "Empty".into(),
            },
            "Empty",
            Span::call_site(),
        )
        .with_severity(Severity::Warning);
        assert!(warning.is_fatal());
    }

    #[test]
    fn errors_are_combined() {
        let first = unsupported();
        let second = Diagnostic::error(
            DiagnosticKind::MalformedDeclaration {
                reason: "enums are not supported".into(),
            },
            "Basket",
            Span::call_site(),
        );
        let combined = into_compile_error([&first, &second]).unwrap();
        let messages: Vec<String> = combined.into_iter().map(|e| e.to_string()).collect();
        assert_eq!(messages.len(), 2);
        assert!(messages[1].contains("enums are not supported"));
    }
}
