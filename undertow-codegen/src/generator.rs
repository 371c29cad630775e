//! The shape generator contract
//!
//! A [`ShapeGenerator`] recognises one structural category of field type and writes the
//! body of a traversal over it. Generators are stateless and shared by every field the
//! registry resolves to them.

use std::fmt;

use proc_macro2::{Ident, Span, TokenStream};
use quote::{quote, ToTokens};

use crate::declaration::{AggregateDeclaration, FieldDescriptor};
use crate::diagnostic::Diagnostic;
use crate::fragment::CodeFragment;
use crate::options::SynthesisOptions;
use crate::types::TypeExpression;

/// How many focused values one instance of a shape contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    /// Always exactly one (`Box<T>`).
    ExactlyOne,
    /// Present or absent (`Option<T>`, the success side of a two-branch result).
    ZeroOrOne,
    /// Any number (`Vec<T>`, map values).
    ZeroOrMore,
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Multiplicity::ExactlyOne => "exactly one",
            Multiplicity::ZeroOrOne => "zero or one",
            Multiplicity::ZeroOrMore => "zero or more",
        })
    }
}

/// A plugin that knows how to traverse one container shape.
///
/// # Contract
///
/// The fragment returned by [`synthesize`](ShapeGenerator::synthesize) is the body of
/// `modify_f`. It must
/// - apply the function once per focused value, in the container's iteration order,
/// - return `pure` of the unchanged aggregate, without calling the function, when the
///   shape is empty, absent, or on its non-focus branch,
/// - rebuild the aggregate through [`Reconstruction`](crate::fragment::Reconstruction)
///   so only the targeted field changes.
pub trait ShapeGenerator: Send + Sync {
    /// Short, stable name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Whether this generator handles `ty`.
    fn supports(&self, ty: &TypeExpression) -> bool;

    /// Which type argument holds the traversed element.
    fn focus_argument_index(&self) -> usize {
        0
    }

    /// How many focused values one container holds.
    fn multiplicity(&self) -> Multiplicity;

    /// Write the traversal body for `field` of `aggregate`.
    fn synthesize(
        &self,
        field: &FieldDescriptor,
        aggregate: &AggregateDeclaration,
        ctx: &SynthesisContext<'_>,
    ) -> Result<CodeFragment, Diagnostic>;
}

impl fmt::Debug for dyn ShapeGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeGenerator")
            .field("name", &self.name())
            .field("multiplicity", &self.multiplicity())
            .finish()
    }
}

/// Names and paths a generated body is written against.
///
/// The body runs inside
/// `fn modify_f<__F, __G>(&self, mut __f: __G, __source: Agg, __applicative: &__F)`.
#[derive(Debug, Clone)]
pub struct SynthesisContext<'a> {
    options: &'a SynthesisOptions,
    focus: &'a TypeExpression,
    function: Ident,
    applicative: Ident,
    source: Ident,
    effect: Ident,
    function_type: Ident,
}

impl<'a> SynthesisContext<'a> {
    /// Context for one field whose focus type has been resolved.
    pub fn new(options: &'a SynthesisOptions, focus: &'a TypeExpression) -> Self {
        Self {
            options,
            focus,
            function: Ident::new("__f", Span::call_site()),
            applicative: Ident::new("__applicative", Span::call_site()),
            source: Ident::new("__source", Span::call_site()),
            effect: Ident::new("__F", Span::call_site()),
            function_type: Ident::new("__G", Span::call_site()),
        }
    }

    /// Path of the runtime crate.
    pub fn runtime(&self) -> &syn::Path {
        &self.options.runtime
    }

    /// The focused element type.
    pub fn focus(&self) -> &TypeExpression {
        self.focus
    }

    /// The effect-producing function.
    pub fn function(&self) -> &Ident {
        &self.function
    }

    /// The applicative capability value.
    pub fn applicative(&self) -> &Ident {
        &self.applicative
    }

    /// The aggregate being traversed.
    pub fn source(&self) -> &Ident {
        &self.source
    }

    /// The applicative type parameter.
    pub fn effect(&self) -> &Ident {
        &self.effect
    }

    /// The function type parameter.
    pub fn function_type(&self) -> &Ident {
        &self.function_type
    }

    /// `<__F as Applicative>::pure::<T>(__applicative, value)`
    pub fn pure(&self, ty: impl ToTokens, value: impl ToTokens) -> TokenStream {
        let (capability, applicative) = (self.capability(), &self.applicative);
        quote!(#capability::pure::<#ty>(#applicative, #value))
    }

    /// `<__F as Applicative>::map::<A, B, _>(__applicative, fa, f)`
    pub fn map(
        &self,
        from: impl ToTokens,
        to: impl ToTokens,
        effect: impl ToTokens,
        f: impl ToTokens,
    ) -> TokenStream {
        let (capability, applicative) = (self.capability(), &self.applicative);
        quote!(#capability::map::<#from, #to, _>(#applicative, #effect, #f))
    }

    /// `<__F as Applicative>::map2::<A, B, C, _>(__applicative, fa, fb, f)`
    pub fn map2(
        &self,
        types: (impl ToTokens, impl ToTokens, impl ToTokens),
        first: impl ToTokens,
        second: impl ToTokens,
        f: impl ToTokens,
    ) -> TokenStream {
        let (capability, applicative) = (self.capability(), &self.applicative);
        let (a, b, c) = types;
        quote!(#capability::map2::<#a, #b, #c, _>(#applicative, #first, #second, #f))
    }

    /// `<__F as Applicative>::Of<ty>`
    pub fn effect_of(&self, ty: impl ToTokens) -> TokenStream {
        let capability = self.capability();
        quote!(#capability::Of<#ty>)
    }

    fn capability(&self) -> TokenStream {
        let (effect, runtime) = (&self.effect, self.runtime());
        quote!(<#effect as #runtime::Applicative>)
    }
}
