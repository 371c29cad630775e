//! Validated code fragments and aggregate reconstruction
//!
//! Generators build their output with `quote`, then hand it to [`CodeFragment::new`], which
//! refuses anything that does not parse as a block. [`Reconstruction`] writes the two
//! pieces every body needs: the destructuring of the source aggregate into per-field
//! bindings, and the struct expression that rebuilds it with one slot replaced.

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};

use crate::declaration::{AggregateDeclaration, FieldDescriptor, FieldName, StructStyle};
use crate::diagnostic::DiagnosticKind;

/// A traversal body that is known to parse as a Rust block.
#[derive(Debug, Clone)]
pub struct CodeFragment {
    generator: &'static str,
    body: TokenStream,
    bounds: Vec<syn::WherePredicate>,
}

impl CodeFragment {
    /// Validate `body` (the statements of a block, without braces).
    pub fn new(generator: &'static str, body: TokenStream) -> Result<Self, DiagnosticKind> {
        syn::parse2::<syn::Block>(quote!({ #body })).map_err(|err| {
            DiagnosticKind::InvalidFragment {
                generator,
                reason: err.to_string(),
            }
        })?;
        Ok(Self {
            generator,
            body,
            bounds: Vec::new(),
        })
    }

    /// Require `predicate` on the generated impl, e.g. `HashSet<T>: FromIterator<T>`.
    pub fn with_bound(mut self, predicate: syn::WherePredicate) -> Self {
        self.bounds.push(predicate);
        self
    }

    /// The generator that wrote this fragment.
    pub fn generator(&self) -> &'static str {
        self.generator
    }

    /// Extra where-clause predicates the body relies on.
    pub fn bounds(&self) -> &[syn::WherePredicate] {
        &self.bounds
    }

    /// The block statements.
    pub fn body(&self) -> &TokenStream {
        &self.body
    }
}

impl ToTokens for CodeFragment {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.body.to_tokens(tokens);
    }
}

/// Destructures and rebuilds one aggregate around a single targeted field.
#[derive(Debug, Clone, Copy)]
pub struct Reconstruction<'a> {
    aggregate: &'a AggregateDeclaration,
    target: &'a FieldDescriptor,
}

impl<'a> Reconstruction<'a> {
    /// Fails when `target` is not one of the aggregate's fields.
    pub fn new(
        aggregate: &'a AggregateDeclaration,
        target: &'a FieldDescriptor,
    ) -> Result<Self, DiagnosticKind> {
        if aggregate.field(&target.name).is_none() {
            return Err(DiagnosticKind::ReconstructionMismatch {
                aggregate: aggregate.ident.to_string(),
                field: target.name.to_string(),
            });
        }
        Ok(Self { aggregate, target })
    }

    /// The binding holding the targeted field's original value.
    pub fn target(&self) -> syn::Ident {
        self.target.name.binding()
    }

    /// `let Agg { a: __field_a, b: __field_b } = __source;`
    pub fn destructure(&self, source: &syn::Ident) -> TokenStream {
        let ident = &self.aggregate.ident;
        let bindings = self.aggregate.fields.iter().map(|field| field.name.binding());
        match self.aggregate.style {
            StructStyle::Named => {
                let names = self.aggregate.fields.iter().map(|field| match &field.name {
                    FieldName::Named(name) => name.to_token_stream(),
                    FieldName::Index(index) => syn::Index::from(*index).to_token_stream(),
                });
                quote!(let #ident { #(#names: #bindings),* } = #source;)
            }
            StructStyle::Tuple => quote!(let #ident(#(#bindings),*) = #source;),
            StructStyle::Unit => quote!(let #ident = #source;),
        }
    }

    /// Rebuild the aggregate with every field in declared order, the target slot filled
    /// by `replacement` and every other slot by its original binding.
    pub fn rebuild(&self, replacement: impl ToTokens) -> TokenStream {
        let ident = &self.aggregate.ident;
        let replacement = replacement.into_token_stream();
        let values = self.aggregate.fields.iter().map(|field| {
            if field.name == self.target.name {
                replacement.clone()
            } else {
                field.name.binding().into_token_stream()
            }
        });
        match self.aggregate.style {
            StructStyle::Named => {
                let names = self.aggregate.fields.iter().map(|field| match &field.name {
                    FieldName::Named(name) => name.to_token_stream(),
                    FieldName::Index(index) => syn::Index::from(*index).to_token_stream(),
                });
                quote!(#ident { #(#names: #values),* })
            }
            StructStyle::Tuple => quote!(#ident(#(#values),*)),
            StructStyle::Unit => quote!(#ident),
        }
    }

    /// Rebuild from the original bindings only.
    pub fn unchanged(&self) -> TokenStream {
        self.rebuild(self.target())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use syn::parse_quote;

    fn declaration(input: syn::DeriveInput) -> AggregateDeclaration {
        AggregateDeclaration::from_derive_input(&input).unwrap()
    }

    #[test]
    fn fragments_must_parse_as_blocks() {
        assert!(CodeFragment::new("test", quote!(let x = 1; x)).is_ok());
        let err = CodeFragment::new("test", quote!(let = ;)).unwrap_err();
        assert!(matches!(err, DiagnosticKind::InvalidFragment { generator: "test", .. }));
    }

    #[test]
    fn named_rebuild_keeps_declared_order() {
        let decl = declaration(parse_quote! {
            struct Basket { label: String, items: Vec<i32>, total: u32 }
        });
        let rebuild = Reconstruction::new(&decl, &decl.fields[1]).unwrap();

        let destructure: syn::Stmt = syn::parse2(rebuild.destructure(&parse_quote!(__source))).unwrap();
        let expected: syn::Stmt = parse_quote! {
            let Basket { label: __field_label, items: __field_items, total: __field_total } = __source;
        };
        assert_eq!(destructure, expected);

        let expr: syn::Expr = syn::parse2(rebuild.rebuild(quote!(__items))).unwrap();
        let expected: syn::Expr = parse_quote! {
            Basket { label: __field_label, items: __items, total: __field_total }
        };
        assert_eq!(expr, expected);
    }

    #[test]
    fn tuple_rebuild_is_positional() {
        let decl = declaration(parse_quote! {
            struct Pair(u8, Option<i32>);
        });
        let rebuild = Reconstruction::new(&decl, &decl.fields[1]).unwrap();

        let expr: syn::Expr = syn::parse2(rebuild.rebuild(quote!(None))).unwrap();
        let expected: syn::Expr = parse_quote!(Pair(__field_0, None));
        assert_eq!(expr, expected);

        let expr: syn::Expr = syn::parse2(rebuild.unchanged()).unwrap();
        let expected: syn::Expr = parse_quote!(Pair(__field_0, __field_1));
        assert_eq!(expr, expected);
    }

    #[test]
    fn foreign_field_is_a_mismatch() {
        let decl = declaration(parse_quote! {
            struct Basket { items: Vec<i32> }
        });
        let stranger = FieldDescriptor::new(FieldName::Named(parse_quote!(other)), parse_quote!(Vec<i32>));
        let err = Reconstruction::new(&decl, &stranger).unwrap_err();
        assert_eq!(
            err,
            DiagnosticKind::ReconstructionMismatch {
                aggregate: "Basket".into(),
                field: "other".into(),
            }
        );
    }
}
