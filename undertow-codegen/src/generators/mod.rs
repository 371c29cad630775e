//! Built-in shape generators
//!
//! | generator | matches | focus |
//! |---|---|---|
//! | [`SequenceGenerator`] | `Vec<T>` | `T` |
//! | [`ArrayGenerator`] | `[T; N]` | `T` |
//! | [`SetGenerator`] | `HashSet<T>`, `BTreeSet<T>` | `T` |
//! | [`OptionalGenerator`] | `Option<T>` | `T` |
//! | [`EitherGenerator`] | `Either<L, R>` | `R` |
//! | [`ValidatedGenerator`] | `Validated<E, A>` | `A` |
//! | [`ResultGenerator`] | `Result<T, E>` | `T` |
//! | [`MapGenerator`] | `HashMap<K, V>`, `BTreeMap<K, V>` | `V` |
//! | [`WitnessGenerator`] | one witness-table identifier | per table row |
//!
//! The helpers below hold the code shared between generators: locating diagnostics,
//! the element accumulation loop, and the match over two-branch shapes.

mod array;
mod either;
mod map;
mod optional;
mod result;
mod sequence;
mod set;
mod validated;
mod witness;

pub use array::ArrayGenerator;
pub use either::EitherGenerator;
pub use map::MapGenerator;
pub use optional::OptionalGenerator;
pub use result::ResultGenerator;
pub use sequence::SequenceGenerator;
pub use set::SetGenerator;
pub use validated::ValidatedGenerator;
pub use witness::WitnessGenerator;

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};

use crate::declaration::{AggregateDeclaration, FieldDescriptor};
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::fragment::{CodeFragment, Reconstruction};
use crate::generator::{ShapeGenerator, SynthesisContext};
use crate::witness as witness_table;

/// The built-in generators in precedence order, followed by one generator per
/// witness-table row.
pub fn builtin() -> Vec<Box<dyn ShapeGenerator>> {
    let mut generators: Vec<Box<dyn ShapeGenerator>> = vec![
        Box::new(SequenceGenerator),
        Box::new(ArrayGenerator),
        Box::new(SetGenerator),
        Box::new(OptionalGenerator),
        Box::new(EitherGenerator),
        Box::new(ValidatedGenerator),
        Box::new(ResultGenerator),
        Box::new(MapGenerator),
    ];
    generators.extend(
        witness_table::mappings().map(|mapping| Box::new(WitnessGenerator::new(mapping)) as Box<dyn ShapeGenerator>),
    );
    generators
}

/// Attach aggregate, field and span to a diagnostic kind.
pub(crate) fn locate(kind: DiagnosticKind, aggregate: &AggregateDeclaration, field: &FieldDescriptor) -> Diagnostic {
    Diagnostic::error(kind, aggregate.ident.to_string(), field.span()).with_field(field.name.to_string())
}

pub(crate) fn reconstruction<'a>(
    aggregate: &'a AggregateDeclaration,
    field: &'a FieldDescriptor,
) -> Result<Reconstruction<'a>, Diagnostic> {
    Reconstruction::new(aggregate, field).map_err(|kind| locate(kind, aggregate, field))
}

pub(crate) fn fragment(
    generator: &'static str,
    aggregate: &AggregateDeclaration,
    field: &FieldDescriptor,
    body: TokenStream,
) -> Result<CodeFragment, Diagnostic> {
    CodeFragment::new(generator, body).map_err(|kind| locate(kind, aggregate, field))
}

/// One pass over a collection field.
///
/// Every item is bound to `pattern`, `applied` is handed to the function, and the new
/// value (bound as `__value`) is stored as `slot` in a `Vec<slot_ty>` accumulated inside
/// the effect.
pub(crate) struct ElementLoop {
    pub pattern: TokenStream,
    pub applied: TokenStream,
    pub slot_ty: TokenStream,
    pub slot: TokenStream,
}

impl ElementLoop {
    /// Loop over plain elements: the slot is the new value itself.
    pub fn elements(ctx: &SynthesisContext<'_>) -> Self {
        let focus = ctx.focus();
        Self {
            pattern: quote!(__element),
            applied: quote!(__element),
            slot_ty: focus.to_token_stream(),
            slot: quote!(__value),
        }
    }

    /// The statements of a collection traversal:
    ///
    /// ```text
    /// destructure
    /// if field is empty { return pure(unchanged) }
    /// acc = pure(Vec::with_capacity(len))
    /// for each item { acc = map2(acc, f(item), push) }
    /// map(acc, |values| rebuild(finish(values)))
    /// ```
    pub fn body(
        &self,
        ctx: &SynthesisContext<'_>,
        aggregate: &AggregateDeclaration,
        rebuild: &Reconstruction<'_>,
        finish: impl FnOnce(TokenStream) -> TokenStream,
    ) -> TokenStream {
        let (source, function, focus) = (ctx.source(), ctx.function(), ctx.focus());
        let self_ty = aggregate.self_type();
        let target = rebuild.target();
        let (pattern, applied, slot_ty, slot) = (&self.pattern, &self.applied, &self.slot_ty, &self.slot);
        let acc_ty = quote!(::std::vec::Vec<#slot_ty>);

        let destructure = rebuild.destructure(source);
        let unchanged = ctx.pure(&self_ty, rebuild.unchanged());
        let start = ctx.pure(&acc_ty, quote!(::std::vec::Vec::with_capacity(#target.len())));
        let step = ctx.map2(
            (&acc_ty, focus, &acc_ty),
            quote!(__acc),
            quote!(#function(#applied)),
            quote!(move |mut __values: #acc_ty, __value: #focus| {
                __values.push(#slot);
                __values
            }),
        );
        let rebuilt = rebuild.rebuild(finish(quote!(__values)));
        let done = ctx.map(&acc_ty, &self_ty, quote!(__acc), quote!(move |__values: #acc_ty| #rebuilt));

        quote! {
            #destructure
            if #target.is_empty() {
                return #unchanged;
            }
            let mut __acc = #start;
            for #pattern in #target {
                __acc = #step;
            }
            #done
        }
    }
}

/// A two-branch shape: one variant carries the focus, the other is passed through.
pub(crate) struct Branches {
    /// Path of the focused variant, e.g. `::core::option::Option::Some`
    pub focus: TokenStream,
    /// Pattern of the other variant, e.g. `::core::option::Option::None`
    pub other: TokenStream,
    /// Expression rebuilding the other variant from its pattern bindings
    pub other_value: TokenStream,
}

impl Branches {
    /// `match field { Focus(x) => map(f(x), rebuild), other => pure(rebuild(other)) }`
    pub fn body(
        &self,
        ctx: &SynthesisContext<'_>,
        aggregate: &AggregateDeclaration,
        rebuild: &Reconstruction<'_>,
    ) -> TokenStream {
        let (source, function, focus) = (ctx.source(), ctx.function(), ctx.focus());
        let self_ty = aggregate.self_type();
        let target = rebuild.target();
        let (focus_variant, other, other_value) = (&self.focus, &self.other, &self.other_value);

        let destructure = rebuild.destructure(source);
        let with_new = rebuild.rebuild(quote!(#focus_variant(__value)));
        let present = ctx.map(
            focus,
            &self_ty,
            quote!(#function(__element)),
            quote!(move |__value: #focus| #with_new),
        );
        let passed_through = ctx.pure(&self_ty, rebuild.rebuild(other_value));

        quote! {
            #destructure
            match #target {
                #focus_variant(__element) => #present,
                #other => #passed_through,
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::types::TypeExpression;

    /// Scan a struct and pick a field by name.
    pub fn declaration(input: syn::DeriveInput) -> AggregateDeclaration {
        AggregateDeclaration::from_derive_input(&input).unwrap()
    }

    /// Run `generator` against the named field, resolving the focus the way synthesis does.
    pub fn synthesize(
        generator: &dyn ShapeGenerator,
        decl: &AggregateDeclaration,
        field: &str,
    ) -> Result<CodeFragment, Diagnostic> {
        let field = decl
            .fields
            .iter()
            .find(|f| f.name.to_string() == field)
            .unwrap();
        assert!(generator.supports(&field.declared_type), "{} does not support {}", generator.name(), field.declared_type);
        let focus: TypeExpression = match &field.declared_type {
            TypeExpression::Array { element, .. } => (**element).clone(),
            other => other.args()[generator.focus_argument_index()].clone(),
        };
        let ctx = SynthesisContext::new(&decl.options, &focus);
        generator.synthesize(field, decl, &ctx)
    }

    /// The fragment body as a parsed block, for structural comparison.
    pub fn block(fragment: &CodeFragment) -> syn::Block {
        let body = fragment.body();
        syn::parse2(quote!({ #body })).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_are_unique() {
        let generators = builtin();
        let mut names: Vec<&str> = generators.iter().map(|g| g.name()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(total, 8 + witness_table::mappings().count());
    }
}
