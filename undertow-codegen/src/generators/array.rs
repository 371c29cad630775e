//! `[T; N]`: every element, in index order.

use quote::quote;

use super::{fragment, locate, reconstruction, ElementLoop};
use crate::declaration::{AggregateDeclaration, FieldDescriptor};
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::fragment::CodeFragment;
use crate::generator::{Multiplicity, ShapeGenerator, SynthesisContext};
use crate::types::TypeExpression;

/// Traverses every element of a fixed-size array.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayGenerator;

impl ShapeGenerator for ArrayGenerator {
    fn name(&self) -> &'static str {
        "array"
    }

    fn supports(&self, ty: &TypeExpression) -> bool {
        matches!(ty, TypeExpression::Array { .. })
    }

    fn multiplicity(&self) -> Multiplicity {
        Multiplicity::ZeroOrMore
    }

    fn synthesize(
        &self,
        field: &FieldDescriptor,
        aggregate: &AggregateDeclaration,
        ctx: &SynthesisContext<'_>,
    ) -> Result<CodeFragment, Diagnostic> {
        let rebuild = reconstruction(aggregate, field)?;
        let (runtime, focus) = (ctx.runtime(), ctx.focus());
        let TypeExpression::Array { len, .. } = &field.declared_type else {
            return Err(locate(
                DiagnosticKind::MissingFocusArgument {
                    generator: self.name(),
                    type_name: field.declared_type.to_string(),
                    index: 0,
                },
                aggregate,
                field,
            ));
        };
        let body = ElementLoop::elements(ctx).body(ctx, aggregate, &rebuild, |values| {
            quote!(#runtime::__private::collect_array::<#focus, { #len }>(#values))
        });
        fragment(self.name(), aggregate, field, body)
    }
}
