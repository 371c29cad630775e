//! `Vec<T>`: every element, in index order.

use super::{fragment, reconstruction, ElementLoop};
use crate::declaration::{AggregateDeclaration, FieldDescriptor};
use crate::diagnostic::Diagnostic;
use crate::fragment::CodeFragment;
use crate::generator::{Multiplicity, ShapeGenerator, SynthesisContext};
use crate::types::TypeExpression;

const SPELLINGS: &[&str] = &["Vec", "std::vec::Vec", "alloc::vec::Vec"];

/// Traverses every element of a `Vec`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceGenerator;

impl ShapeGenerator for SequenceGenerator {
    fn name(&self) -> &'static str {
        "sequence"
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
        // The accumulator already is the field's type.
        let body = ElementLoop::elements(ctx).body(ctx, aggregate, &rebuild, |values| values);
        fragment(self.name(), aggregate, field, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{block, declaration, synthesize};
    use pretty_assertions::assert_eq;
    use syn::parse_quote;

    #[test]
    fn supports_vec_spellings_only() {
        let vec = TypeExpression::from_type(&parse_quote!(::std::vec::Vec<u8>));
        let deque = TypeExpression::from_type(&parse_quote!(VecDeque<u8>));
        let bare = TypeExpression::from_type(&parse_quote!(Vec));
        assert!(SequenceGenerator.supports(&vec));
        assert!(!SequenceGenerator.supports(&deque));
        assert!(!SequenceGenerator.supports(&bare));
    }

    #[test]
    fn folds_elements_and_rebuilds_in_place() {
        let decl = declaration(parse_quote! {
            struct Basket { label: String, items: Vec<i32> }
        });
        let fragment = synthesize(&SequenceGenerator, &decl, "items").unwrap();

        let expected: syn::Block = parse_quote!({
            let Basket { label: __field_label, items: __field_items } = __source;
            if __field_items.is_empty() {
                return <__F as ::undertow::Applicative>::pure::<Basket>(
                    __applicative,
                    Basket { label: __field_label, items: __field_items }
                );
            }
            let mut __acc = <__F as ::undertow::Applicative>::pure::<::std::vec::Vec<i32> >(
                __applicative,
                ::std::vec::Vec::with_capacity(__field_items.len())
            );
            for __element in __field_items {
                __acc = <__F as ::undertow::Applicative>::map2::<::std::vec::Vec<i32>, i32, ::std::vec::Vec<i32>, _>(
                    __applicative,
                    __acc,
                    __f(__element),
                    move |mut __values: ::std::vec::Vec<i32>, __value: i32| {
                        __values.push(__value);
                        __values
                    }
                );
            }
            <__F as ::undertow::Applicative>::map::<::std::vec::Vec<i32>, Basket, _>(
                __applicative,
                __acc,
                move |__values: ::std::vec::Vec<i32>| Basket { label: __field_label, items: __values }
            )
        });
        assert_eq!(block(&fragment), expected);
        assert!(fragment.bounds().is_empty());
    }
}
