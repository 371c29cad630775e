//! `Result<T, E>`: the `Ok` payload.

use quote::quote;

use super::{fragment, reconstruction, Branches};
use crate::declaration::{AggregateDeclaration, FieldDescriptor};
use crate::diagnostic::Diagnostic;
use crate::fragment::CodeFragment;
use crate::generator::{Multiplicity, ShapeGenerator, SynthesisContext};
use crate::types::TypeExpression;

const SPELLINGS: &[&str] = &["Result", "std::result::Result", "core::result::Result"];

/// Traverses the `Ok` payload; an `Err` is returned untouched.
///
/// `Result` lists its success type first, so unlike [`EitherGenerator`](super::EitherGenerator)
/// the focus is argument 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultGenerator;

impl ShapeGenerator for ResultGenerator {
    fn name(&self) -> &'static str {
        "result"
    }

    fn supports(&self, ty: &TypeExpression) -> bool {
        ty.is_parameterized_as(SPELLINGS)
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
        let branches = Branches {
            focus: quote!(::core::result::Result::Ok),
            other: quote!(::core::result::Result::Err(__other)),
            other_value: quote!(::core::result::Result::Err(__other)),
        };
        fragment(self.name(), aggregate, field, branches.body(ctx, aggregate, &rebuild))
    }
}
