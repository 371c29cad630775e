//! `HashSet<T>` and `BTreeSet<T>`: every element, in iteration order.

use quote::quote;
use syn::parse_quote;

use super::{fragment, reconstruction, ElementLoop};
use crate::declaration::{AggregateDeclaration, FieldDescriptor};
use crate::diagnostic::Diagnostic;
use crate::fragment::CodeFragment;
use crate::generator::{Multiplicity, ShapeGenerator, SynthesisContext};
use crate::types::TypeExpression;

const SPELLINGS: &[&str] = &[
    "HashSet",
    "std::collections::HashSet",
    "std::collections::hash_set::HashSet",
    "BTreeSet",
    "std::collections::BTreeSet",
    "std::collections::btree_set::BTreeSet",
    "alloc::collections::BTreeSet",
];

/// Traverses every element of a set and collects the results back into the set type.
///
/// Elements that become equal after the transformation collapse into one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetGenerator;

impl ShapeGenerator for SetGenerator {
    fn name(&self) -> &'static str {
        "set"
    }

    fn supports(&self, ty: &TypeExpression) -> bool {
        ty.is_parameterized_as(SPELLINGS)
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
        let (field_ty, focus) = (&field.ty, ctx.focus());
        let body = ElementLoop::elements(ctx).body(ctx, aggregate, &rebuild, |values| {
            quote!(#values.into_iter().collect::<#field_ty>())
        });
        Ok(fragment(self.name(), aggregate, field, body)?
            .with_bound(parse_quote!(#field_ty: ::core::iter::FromIterator<#focus>)))
    }
}
