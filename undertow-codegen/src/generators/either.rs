//! `Either<L, R>`: the `Right` payload.

use quote::quote;

use super::{fragment, reconstruction, Branches};
use crate::declaration::{AggregateDeclaration, FieldDescriptor};
use crate::diagnostic::Diagnostic;
use crate::fragment::CodeFragment;
use crate::generator::{Multiplicity, ShapeGenerator, SynthesisContext};
use crate::types::TypeExpression;

const SPELLINGS: &[&str] = &["Either", "undertow::Either", "undertow::either::Either", "either::Either"];

/// Traverses the `Right` side of an `Either`; a `Left` is returned untouched.
///
/// Variants are named through the path the field was declared with, so the type must be
/// in scope under that name.
#[derive(Debug, Clone, Copy, Default)]
pub struct EitherGenerator;

impl ShapeGenerator for EitherGenerator {
    fn name(&self) -> &'static str {
        "either"
    }

    fn supports(&self, ty: &TypeExpression) -> bool {
        ty.is_parameterized_as(SPELLINGS)
    }

    fn focus_argument_index(&self) -> usize {
        1
    }

    fn multiplicity(&self) -> Multiplicity {
        Multiplicity::ZeroOrOne
    }

    fn synthesize(
        &self,
        field: &FieldDescriptor,
        aggregate: &AggregateDeclaration,
        ctx: &SynthesisContext<'_>,
    ) -> Result<CodeFragment, Diagnostic> {
        let rebuild = reconstruction(aggregate, field)?;
        let name = field.declared_type.name();
        let branches = Branches {
            focus: quote!(#name::Right),
            other: quote!(#name::Left(__other)),
            other_value: quote!(#name::Left(__other)),
        };
        fragment(self.name(), aggregate, field, branches.body(ctx, aggregate, &rebuild))
    }
}
