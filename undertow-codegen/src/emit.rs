//! Emission of synthesized traversals
//!
//! [`Emitter`] is the boundary between synthesis and the output language. [`RustEmitter`]
//! turns each [`TraversalDefinition`] into
//! - a unit struct `<Aggregate><Field>Traversal`,
//! - an `impl Traversal<Aggregate, Focus>` whose `modify_f` is the synthesized body,
//! - an inherent accessor `Aggregate::<field>_traversal()`.

use proc_macro2::TokenStream;
use quote::quote;

use crate::declaration::AggregateDeclaration;
use crate::synthesis::TraversalDefinition;

/// Turns traversal definitions into some output form.
pub trait Emitter {
    /// What one aggregate's traversals become.
    type Output;

    /// Emit every definition synthesized for `aggregate`.
    fn emit(&self, aggregate: &AggregateDeclaration, definitions: &[TraversalDefinition]) -> Self::Output;
}

/// Emits Rust items.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustEmitter;

impl Emitter for RustEmitter {
    type Output = TokenStream;

    fn emit(&self, aggregate: &AggregateDeclaration, definitions: &[TraversalDefinition]) -> TokenStream {
        if definitions.is_empty() {
            return TokenStream::new();
        }

        let items = definitions
            .iter()
            .map(|definition| traversal_items(aggregate, definition));

        let (impl_generics, _, where_clause) = aggregate.generics.split_for_impl();
        let self_ty = aggregate.self_type();
        let accessors = definitions.iter().map(|definition| accessor(aggregate, definition));

        quote! {
            #(#items)*

            #[automatically_derived]
            impl #impl_generics #self_ty #where_clause {
                #(#accessors)*
            }
        }
    }
}

fn traversal_items(aggregate: &AggregateDeclaration, definition: &TraversalDefinition) -> TokenStream {
    let runtime = &aggregate.options.runtime;
    let vis = &aggregate.vis;
    let struct_ident = &definition.struct_ident;
    let focus = definition.focus_tokens();
    let body = &definition.body;
    let [effect, function] = &definition.type_params;
    let self_ty = aggregate.self_type();

    let (impl_generics, _, _) = aggregate.generics.split_for_impl();
    let mut where_clause = aggregate.generics.where_clause.clone().unwrap_or_else(|| syn::WhereClause {
        where_token: Default::default(),
        predicates: Default::default(),
    });
    where_clause.predicates.extend(body.bounds().iter().cloned());
    let where_clause = (!where_clause.predicates.is_empty()).then_some(where_clause);

    let doc = format!(
        "Traversal over the `{}` field of [`{}`]: {} `{}` ({}).",
        definition.field,
        definition.target,
        definition.multiplicity,
        definition.focus,
        definition.generator,
    );

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Copy, Default)]
        #vis struct #struct_ident;

        #[automatically_derived]
        impl #impl_generics #runtime::Traversal<#self_ty, #focus> for #struct_ident #where_clause {
            fn modify_f<#effect, #function>(
                &self,
                mut __f: #function,
                __source: #self_ty,
                __applicative: &#effect,
            ) -> <#effect as #runtime::Applicative>::Of<#self_ty>
            where
                #effect: #runtime::Applicative,
                #function: ::core::ops::FnMut(#focus) -> <#effect as #runtime::Applicative>::Of<#focus>,
            {
                #body
            }
        }
    }
}

fn accessor(aggregate: &AggregateDeclaration, definition: &TraversalDefinition) -> TokenStream {
    let vis = &aggregate.vis;
    let (accessor, struct_ident) = (&definition.accessor, &definition.struct_ident);
    let doc = format!("The traversal over `{}`.", definition.field);
    quote! {
        #[doc = #doc]
        #[inline]
        #vis fn #accessor() -> #struct_ident {
            #struct_ident
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::GeneratorRegistry;
    use crate::synthesis::Synthesizer;
    use pretty_assertions::assert_eq;
    use syn::parse_quote;

    fn emit(input: syn::DeriveInput) -> syn::File {
        let decl = AggregateDeclaration::from_derive_input(&input).unwrap();
        let registry = GeneratorRegistry::builtin();
        let outcome = Synthesizer::new(&registry).synthesize(&decl);
        syn::parse2(RustEmitter.emit(&decl, &outcome.definitions)).unwrap()
    }

    #[test]
    fn emits_struct_impl_and_accessor_per_field() {
        let file = emit(parse_quote! {
            pub struct Basket { items: Vec<i32>, note: Option<String> }
        });
        // two structs, two trait impls, one inherent impl
        assert_eq!(file.items.len(), 5);

        let structs: Vec<String> = file
            .items
            .iter()
            .filter_map(|item| match item {
                syn::Item::Struct(s) => Some(s.ident.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(structs, vec!["BasketItemsTraversal", "BasketNoteTraversal"]);

        let syn::Item::Impl(trait_impl) = &file.items[1] else {
            panic!("expected the trait impl second");
        };
        let expected: syn::Path = parse_quote!(::undertow::Traversal<Basket, i32>);
        assert_eq!(trait_impl.trait_.as_ref().map(|(_, path, _)| path.clone()), Some(expected));

        let syn::Item::Impl(inherent) = &file.items[4] else {
            panic!("expected the inherent impl last");
        };
        assert!(inherent.trait_.is_none());
        assert_eq!(inherent.items.len(), 2);
    }

    #[test]
    fn generics_and_bounds_reach_the_impl() {
        let file = emit(parse_quote! {
            pub(crate) struct Index<K: Ord> where K: Clone { by_key: BTreeMap<K, u32> }
        });
        let syn::Item::Impl(trait_impl) = &file.items[1] else {
            panic!("expected the trait impl second");
        };
        let where_clause = trait_impl.generics.where_clause.as_ref().unwrap();
        let predicates: Vec<syn::WherePredicate> = where_clause.predicates.iter().cloned().collect();
        let expected: Vec<syn::WherePredicate> = vec![
            parse_quote!(K: Clone),
            parse_quote!(BTreeMap<K, u32>: ::core::iter::FromIterator<(K, u32)>),
        ];
        assert_eq!(predicates, expected);

        let syn::Item::Struct(generated) = &file.items[0] else {
            panic!("expected the struct first");
        };
        let vis: syn::Visibility = parse_quote!(pub(crate));
        assert_eq!(generated.vis, vis);
    }

    #[test]
    fn nothing_to_emit() {
        let decl = AggregateDeclaration::from_derive_input(&parse_quote! { struct Plain { name: String } }).unwrap();
        assert!(RustEmitter.emit(&decl, &[]).is_empty());
    }
}
