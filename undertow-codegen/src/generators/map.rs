//! `HashMap<K, V>` and `BTreeMap<K, V>`: every value; keys ride along unchanged.

use quote::quote;
use syn::parse_quote;

use super::{fragment, locate, reconstruction, ElementLoop};
use crate::declaration::{AggregateDeclaration, FieldDescriptor};
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::fragment::CodeFragment;
use crate::generator::{Multiplicity, ShapeGenerator, SynthesisContext};
use crate::types::TypeExpression;

const SPELLINGS: &[&str] = &[
    "HashMap",
    "std::collections::HashMap",
    "std::collections::hash_map::HashMap",
    "BTreeMap",
    "std::collections::BTreeMap",
    "std::collections::btree_map::BTreeMap",
    "alloc::collections::BTreeMap",
];

/// Traverses the values of a map.
///
/// Each entry is rebuilt as `(key, new_value)` and the entries are collected back into
/// the declared map type, so the key set never changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapGenerator;

impl ShapeGenerator for MapGenerator {
    fn name(&self) -> &'static str {
        "map"
    }

    fn supports(&self, ty: &TypeExpression) -> bool {
        ty.is_parameterized_as(SPELLINGS)
    }

    fn focus_argument_index(&self) -> usize {
        1
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
        let key = field.declared_type.args().first().ok_or_else(|| {
            locate(
                DiagnosticKind::MissingFocusArgument {
                    generator: self.name(),
                    type_name: field.declared_type.to_string(),
                    index: 0,
                },
                aggregate,
                field,
            )
        })?;
        let (field_ty, value) = (&field.ty, ctx.focus());

        let entries = ElementLoop {
            pattern: quote!((__key, __element)),
            applied: quote!(__element),
            slot_ty: quote!((#key, #value)),
            slot: quote!((__key, __value)),
        };
        let body = entries.body(ctx, aggregate, &rebuild, |pairs| {
            quote!(#pairs.into_iter().collect::<#field_ty>())
        });
        Ok(fragment(self.name(), aggregate, field, body)?
            .with_bound(parse_quote!(#field_ty: ::core::iter::FromIterator<(#key, #value)>)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{declaration, synthesize};
    use pretty_assertions::assert_eq;

    #[test]
    fn focuses_the_value_argument() {
        assert_eq!(MapGenerator.focus_argument_index(), 1);
        assert!(MapGenerator.supports(&TypeExpression::from_type(&parse_quote!(BTreeMap<String, i32>))));
        assert!(!MapGenerator.supports(&TypeExpression::from_type(&parse_quote!(Map<String, i32>))));
    }

    #[test]
    fn keys_are_moved_into_the_rebuilt_entry() {
        let decl = declaration(parse_quote! {
            struct Scores { by_name: HashMap<String, u32> }
        });
        let fragment = synthesize(&MapGenerator, &decl, "by_name").unwrap();
        let rendered = fragment.body().to_string();

        assert!(rendered.contains("for (__key , __element) in __field_by_name"), "{rendered}");
        assert!(rendered.contains("__values . push ((__key , __value))"), "{rendered}");
        let expected: syn::WherePredicate =
            parse_quote!(HashMap<String, u32>: ::core::iter::FromIterator<(String, u32)>);
        assert_eq!(fragment.bounds(), &[expected]);
    }
}
