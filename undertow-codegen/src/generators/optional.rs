//! `Option<T>`: the payload when present.

use quote::quote;

use super::{fragment, reconstruction, Branches};
use crate::declaration::{AggregateDeclaration, FieldDescriptor};
use crate::diagnostic::Diagnostic;
use crate::fragment::CodeFragment;
use crate::generator::{Multiplicity, ShapeGenerator, SynthesisContext};
use crate::types::TypeExpression;

const SPELLINGS: &[&str] = &["Option", "std::option::Option", "core::option::Option"];

/// Traverses the payload of an `Option`; `None` is returned untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalGenerator;

impl ShapeGenerator for OptionalGenerator {
    fn name(&self) -> &'static str {
        "optional"
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
            focus: quote!(::core::option::Option::Some),
            other: quote!(::core::option::Option::None),
            other_value: quote!(::core::option::Option::None),
        };
        fragment(self.name(), aggregate, field, branches.body(ctx, aggregate, &rebuild))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{block, declaration, synthesize};
    use pretty_assertions::assert_eq;
    use syn::parse_quote;

    #[test]
    fn absent_branch_rebuilds_without_calling_the_function() {
        let decl = declaration(parse_quote! {
            struct Profile(u32, Option<String>);
        });
        let fragment = synthesize(&OptionalGenerator, &decl, "1").unwrap();

        let expected: syn::Block = parse_quote!({
            let Profile(__field_0, __field_1) = __source;
            match __field_1 {
                ::core::option::Option::Some(__element) => <__F as ::undertow::Applicative>::map::<String, Profile, _>(
                    __applicative,
                    __f(__element),
                    move |__value: String| Profile(__field_0, ::core::option::Option::Some(__value))
                ),
                ::core::option::Option::None => <__F as ::undertow::Applicative>::pure::<Profile>(
                    __applicative,
                    Profile(__field_0, ::core::option::Option::None)
                ),
            }
        });
        assert_eq!(block(&fragment), expected);
    }
}
