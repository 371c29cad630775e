//! `Validated<E, A>`: the `Valid` payload.

use quote::quote;

use super::{fragment, reconstruction, Branches};
use crate::declaration::{AggregateDeclaration, FieldDescriptor};
use crate::diagnostic::Diagnostic;
use crate::fragment::CodeFragment;
use crate::generator::{Multiplicity, ShapeGenerator, SynthesisContext};
use crate::types::TypeExpression;

const SPELLINGS: &[&str] = &["Validated", "undertow::Validated", "undertow::validated::Validated"];

/// Traverses the `Valid` payload; `Invalid` evidence is returned untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedGenerator;

impl ShapeGenerator for ValidatedGenerator {
    fn name(&self) -> &'static str {
        "validated"
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
            focus: quote!(#name::Valid),
            other: quote!(#name::Invalid(__other)),
            other_value: quote!(#name::Invalid(__other)),
        };
        fragment(self.name(), aggregate, field, branches.body(ctx, aggregate, &rebuild))
    }
}
