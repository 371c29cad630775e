//! The synthesis core
//!
//! For each candidate field of a declaration: resolve a generator, pick the focus type
//! argument the generator asks for, and let it write the traversal body. Every field is
//! independent. A failed field becomes a diagnostic and its siblings carry on; a failed
//! declaration never stops the rest of a batch.

use proc_macro2::TokenStream;
use quote::{format_ident, ToTokens};
use tracing::{debug, trace};

use crate::declaration::{AggregateDeclaration, FieldDescriptor, FieldName, Selection};
use crate::diagnostic::{Diagnostic, DiagnosticKind, Severity, ShapeOrigin};
use crate::fragment::CodeFragment;
use crate::generator::{Multiplicity, ShapeGenerator, SynthesisContext};
use crate::registry::GeneratorRegistry;
use crate::types::TypeExpression;
use crate::witness;

/// Everything an emitter needs to place one field traversal.
#[derive(Debug, Clone)]
pub struct TraversalDefinition {
    /// The aggregate the traversal belongs to
    pub target: syn::Ident,
    /// The traversed field
    pub field: FieldName,
    /// Name of the generator that wrote the body
    pub generator: &'static str,
    /// Focused values per container
    pub multiplicity: Multiplicity,
    /// The element type handed to the function
    pub focus: TypeExpression,
    /// Type parameter names used by `modify_f` (effect, function)
    pub type_params: [syn::Ident; 2],
    /// Generated traversal type, e.g. `BasketItemsTraversal`
    pub struct_ident: syn::Ident,
    /// Inherent accessor, e.g. `items_traversal`
    pub accessor: syn::Ident,
    /// The `modify_f` body
    pub body: CodeFragment,
}

impl TraversalDefinition {
    /// The focus type as tokens.
    pub fn focus_tokens(&self) -> TokenStream {
        self.focus.to_token_stream()
    }
}

/// The result of synthesizing one declaration.
#[derive(Debug, Clone)]
pub struct SynthesisOutcome {
    /// The declaration's name
    pub aggregate: syn::Ident,
    /// One definition per traversed field, in declared order
    pub definitions: Vec<TraversalDefinition>,
    /// Notes, warnings and errors, in the order they arose
    pub diagnostics: Vec<Diagnostic>,
}

impl SynthesisOutcome {
    /// Whether any diagnostic must fail the build.
    pub fn is_fatal(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    /// Diagnostics at `severity`.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.severity == severity)
    }
}

/// Runs generators from a registry over declarations.
#[derive(Debug, Clone, Copy)]
pub struct Synthesizer<'r> {
    registry: &'r GeneratorRegistry,
}

impl<'r> Synthesizer<'r> {
    /// Synthesize against `registry`.
    pub fn new(registry: &'r GeneratorRegistry) -> Self {
        Self { registry }
    }

    /// Every traversal one declaration yields.
    ///
    /// With explicit targets an unsupported target is an error; with automatic selection
    /// it is a note and the field is left alone. A declaration that yields nothing gets a
    /// "no traversal generated" warning.
    pub fn synthesize(&self, aggregate: &AggregateDeclaration) -> SynthesisOutcome {
        let mut definitions = Vec::new();
        let mut diagnostics = Vec::new();

        for field in aggregate.candidates() {
            match self.synthesize_field(aggregate, field) {
                Ok(definition) => match name_clash(aggregate, field, &definitions, &definition) {
                    Some(clash) => diagnostics.push(clash),
                    None => definitions.push(definition),
                },
                Err(diagnostic) => diagnostics.push(diagnostic),
            }
        }

        if definitions.is_empty() {
            diagnostics.push(
                Diagnostic::error(
                    DiagnosticKind::NoTraversalGenerated {
                        aggregate: aggregate.ident.to_string(),
                    },
                    aggregate.ident.to_string(),
                    aggregate.ident.span(),
                )
                .with_severity(Severity::Warning),
            );
        }

        debug!(
            aggregate = %aggregate.ident,
            traversals = definitions.len(),
            diagnostics = diagnostics.len(),
            "synthesized declaration"
        );

        SynthesisOutcome {
            aggregate: aggregate.ident.clone(),
            definitions,
            diagnostics,
        }
    }

    /// The traversal for one field.
    pub fn synthesize_field(
        &self,
        aggregate: &AggregateDeclaration,
        field: &FieldDescriptor,
    ) -> Result<TraversalDefinition, Diagnostic> {
        let declared = &field.declared_type;
        let generator = self
            .registry
            .resolve(declared)
            .ok_or_else(|| unsupported(aggregate, field))?;
        debug!(
            aggregate = %aggregate.ident,
            field = %field.name,
            generator = generator.name(),
            "resolved shape generator"
        );

        let focus = focus_of(generator, aggregate, field)?;
        let ctx = SynthesisContext::new(&aggregate.options, focus);
        let body = generator.synthesize(field, aggregate, &ctx)?;
        trace!(generator = generator.name(), body = %body.body(), "synthesized traversal body");

        Ok(TraversalDefinition {
            target: aggregate.ident.clone(),
            field: field.name.clone(),
            generator: generator.name(),
            multiplicity: generator.multiplicity(),
            focus: focus.clone(),
            type_params: [ctx.effect().clone(), ctx.function_type().clone()],
            struct_ident: format_ident!("{}{}Traversal", aggregate.ident, field.name.pascal()),
            accessor: format_ident!("{}_traversal", field.name.snake()),
            body,
        })
    }

    /// Synthesize each declaration independently.
    pub fn synthesize_all<'a, I>(&self, declarations: I) -> Vec<SynthesisOutcome>
    where
        I: IntoIterator<Item = &'a AggregateDeclaration>,
    {
        declarations
            .into_iter()
            .map(|declaration| self.synthesize(declaration))
            .collect()
    }
}

/// The type argument (or array element) the generator traverses.
fn focus_of<'a>(
    generator: &dyn ShapeGenerator,
    aggregate: &AggregateDeclaration,
    field: &'a FieldDescriptor,
) -> Result<&'a TypeExpression, Diagnostic> {
    let index = generator.focus_argument_index();
    let focus = match &field.declared_type {
        TypeExpression::Array { element, .. } => Some(element.as_ref()),
        other => other.args().get(index),
    };
    focus.ok_or_else(|| {
        Diagnostic::error(
            DiagnosticKind::MissingFocusArgument {
                generator: generator.name(),
                type_name: field.declared_type.to_string(),
                index,
            },
            aggregate.ident.to_string(),
            field.span(),
        )
        .with_field(field.name.to_string())
    })
}

/// `a_b` and `a__b` both become `AggBTraversal`; the later field loses.
fn name_clash(
    aggregate: &AggregateDeclaration,
    field: &FieldDescriptor,
    taken: &[TraversalDefinition],
    definition: &TraversalDefinition,
) -> Option<Diagnostic> {
    let earlier = taken
        .iter()
        .find(|existing| existing.struct_ident == definition.struct_ident)?;
    Some(
        Diagnostic::error(
            DiagnosticKind::MalformedDeclaration {
                reason: format!(
                    "fields `{}` and `{}` both generate `{}`; rename one or mark it `#[undertow(skip)]`",
                    earlier.field, definition.field, definition.struct_ident
                ),
            },
            aggregate.ident.to_string(),
            field.span(),
        )
        .with_field(field.name.to_string()),
    )
}

fn unsupported(aggregate: &AggregateDeclaration, field: &FieldDescriptor) -> Diagnostic {
    let type_name = field.declared_type.to_string();
    let base = witness::extract_base_identifier(&type_name);
    let origin = if witness::is_recognized_family(base) {
        ShapeOrigin::RecognizedFamily
    } else {
        ShapeOrigin::Foreign
    };
    let severity = match aggregate.selection {
        Selection::Explicit => Severity::Error,
        Selection::Auto => Severity::Note,
    };
    Diagnostic::error(
        DiagnosticKind::UnsupportedShape { type_name, origin },
        aggregate.ident.to_string(),
        field.span(),
    )
    .with_field(field.name.to_string())
    .with_severity(severity)
}
