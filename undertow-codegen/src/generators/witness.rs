//! Containers with a ready-made `Traverse` instance in the runtime crate.
//!
//! The generated body does not loop itself: it names the instance from the witness table
//! (capturing the non-focus type arguments of parameterised rows) and delegates to it.

use quote::quote;

use super::{fragment, locate, reconstruction};
use crate::declaration::{AggregateDeclaration, FieldDescriptor};
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::fragment::CodeFragment;
use crate::generator::{Multiplicity, ShapeGenerator, SynthesisContext};
use crate::types::TypeExpression;
use crate::witness::{extract_base_identifier, extract_type_arguments, WitnessMapping};

/// Delegates to the `Traverse` instance of one witness-table row.
#[derive(Debug, Clone, Copy)]
pub struct WitnessGenerator {
    mapping: &'static WitnessMapping,
}

impl WitnessGenerator {
    /// Generator for one table row.
    pub fn new(mapping: &'static WitnessMapping) -> Self {
        Self { mapping }
    }

    /// The table row this generator serves.
    pub fn mapping(&self) -> &'static WitnessMapping {
        self.mapping
    }
}

impl ShapeGenerator for WitnessGenerator {
    fn name(&self) -> &'static str {
        self.mapping.identifier
    }

    fn supports(&self, ty: &TypeExpression) -> bool {
        if !matches!(ty, TypeExpression::Parameterized { .. }) {
            return false;
        }
        if !self.mapping.is_parameterised && ty.args().len() != 1 {
            return false;
        }
        // `Traverse` instances need a sized element.
        if ty
            .args()
            .get(self.mapping.focus_index)
            .is_some_and(TypeExpression::is_unsized)
        {
            return false;
        }
        let rendered = ty.to_string();
        let rendered = rendered.strip_prefix("::").unwrap_or(&rendered);
        extract_base_identifier(rendered) == self.mapping.identifier
            && !extract_type_arguments(rendered).is_empty()
    }

    fn focus_argument_index(&self) -> usize {
        self.mapping.focus_index
    }

    fn multiplicity(&self) -> Multiplicity {
        self.mapping.multiplicity
    }

    fn synthesize(
        &self,
        field: &FieldDescriptor,
        aggregate: &AggregateDeclaration,
        ctx: &SynthesisContext<'_>,
    ) -> Result<CodeFragment, Diagnostic> {
        let rebuild = reconstruction(aggregate, field)?;
        let instance: syn::Path = syn::parse_str(self.mapping.traversal).map_err(|err| {
            locate(
                DiagnosticKind::InvalidFragment {
                    generator: self.name(),
                    reason: err.to_string(),
                },
                aggregate,
                field,
            )
        })?;

        let captured: Vec<&TypeExpression> = if self.mapping.is_parameterised {
            field
                .declared_type
                .args()
                .iter()
                .enumerate()
                .filter(|(index, _)| *index != self.mapping.focus_index)
                .map(|(_, arg)| arg)
                .collect()
        } else {
            Vec::new()
        };
        let (runtime, source, function, applicative, effect, focus) = (
            ctx.runtime(),
            ctx.source(),
            ctx.function(),
            ctx.applicative(),
            ctx.effect(),
            ctx.focus(),
        );
        let instance_ty = if captured.is_empty() {
            quote!(#runtime::#instance)
        } else {
            quote!(#runtime::#instance<#(#captured),*>)
        };

        let destructure = rebuild.destructure(source);
        let target = rebuild.target();
        let (field_ty, self_ty) = (&field.ty, aggregate.self_type());
        let rebuilt = rebuild.rebuild(quote!(__value));
        let done = ctx.map(
            field_ty,
            &self_ty,
            quote!(__traversed),
            quote!(move |__value: #field_ty| #rebuilt),
        );

        let body = quote! {
            #destructure
            let __instance = <#instance_ty as ::core::default::Default>::default();
            let __traversed = <#instance_ty as #runtime::Traverse>::traverse::<#effect, #focus, #focus, _>(
                &__instance,
                #applicative,
                #target,
                &mut #function,
            );
            #done
        };
        fragment(self.name(), aggregate, field, body)
    }
}
