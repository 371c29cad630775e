//! Aggregate declarations as seen by the synthesis core
//!
//! An [`AggregateDeclaration`] is the scanned form of a struct: its fields in declared
//! order, the shape of each field's type, and the attribute flags that decide which
//! fields are traversal targets.

use std::fmt;

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields};

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::options::{FieldOptions, SynthesisOptions};
use crate::types::TypeExpression;

/// How a struct's fields are written, which decides how it is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructStyle {
    /// `struct S { a: A }`
    Named,
    /// `struct S(A);`
    Tuple,
    /// `struct S;`
    Unit,
}

/// Whether targets were picked by attribute or automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Every field not marked `skip` is a candidate.
    Auto,
    /// Only fields marked `traverse` are targets.
    Explicit,
}

/// A field's name: an identifier or a tuple position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldName {
    /// Named field
    Named(syn::Ident),
    /// Tuple field position
    Index(usize),
}

impl FieldName {
    /// The local binding a generated body uses for this field's value.
    pub fn binding(&self) -> syn::Ident {
        match self {
            FieldName::Named(ident) => format_ident!("__field_{}", ident.unraw()),
            FieldName::Index(index) => format_ident!("__field_{}", index),
        }
    }

    /// `items` stays `items`; position `0` becomes `field0`.
    pub fn snake(&self) -> String {
        match self {
            FieldName::Named(ident) => ident.unraw().to_string(),
            FieldName::Index(index) => format!("field{index}"),
        }
    }

    /// `raw_scores` becomes `RawScores`; position `0` becomes `Field0`.
    pub fn pascal(&self) -> String {
        self.snake()
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect()
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldName::Named(ident) => write!(f, "{}", ident.unraw()),
            FieldName::Index(index) => write!(f, "{index}"),
        }
    }
}

/// One field of an aggregate.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Name or position
    pub name: FieldName,
    /// Shape of the declared type
    pub declared_type: TypeExpression,
    /// The declared type as written
    pub ty: syn::Type,
    /// `#[undertow(skip)]`
    pub skip: bool,
    /// `#[undertow(traverse)]`
    pub targeted: bool,
}

impl FieldDescriptor {
    /// Describe a field of the given type with no attribute flags.
    pub fn new(name: FieldName, ty: syn::Type) -> Self {
        Self {
            name,
            declared_type: TypeExpression::from_type(&ty),
            ty,
            skip: false,
            targeted: false,
        }
    }

    /// Span of the declared type, for diagnostics.
    pub fn span(&self) -> Span {
        self.ty.span()
    }
}

/// A struct that traversals are synthesized for.
#[derive(Debug, Clone)]
pub struct AggregateDeclaration {
    /// Type name
    pub ident: syn::Ident,
    /// Visibility, reused for the generated items
    pub vis: syn::Visibility,
    /// Generic parameters and where clause
    pub generics: syn::Generics,
    /// Field syntax
    pub style: StructStyle,
    /// Fields in declared order
    pub fields: Vec<FieldDescriptor>,
    /// How targets are picked
    pub selection: Selection,
    /// Container attributes
    pub options: SynthesisOptions,
}

impl AggregateDeclaration {
    /// Scan a derive input.
    ///
    /// Enums, unions and malformed `#[undertow]` attributes are reported as
    /// [`DiagnosticKind::MalformedDeclaration`].
    pub fn from_derive_input(input: &DeriveInput) -> Result<Self, Diagnostic> {
        let aggregate = input.ident.to_string();
        let malformed = |reason: String, span: Span| {
            Diagnostic::error(DiagnosticKind::MalformedDeclaration { reason }, aggregate.clone(), span)
        };

        let data = match &input.data {
            Data::Struct(data) => data,
            Data::Enum(data) => {
                return Err(malformed(
                    "traversals can only be derived for structs, not enums".into(),
                    data.enum_token.span,
                ))
            }
            Data::Union(data) => {
                return Err(malformed(
                    "traversals can only be derived for structs, not unions".into(),
                    data.union_token.span,
                ))
            }
        };

        let options = SynthesisOptions::from_attributes(&input.attrs)
            .map_err(|err| malformed(err.to_string(), err.span()))?;

        let style = match &data.fields {
            Fields::Named(_) => StructStyle::Named,
            Fields::Unnamed(_) => StructStyle::Tuple,
            Fields::Unit => StructStyle::Unit,
        };

        let fields = data
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let flags = FieldOptions::from_attributes(&field.attrs)
                    .map_err(|err| malformed(err.to_string(), err.span()))?;
                let name = match &field.ident {
                    Some(ident) => FieldName::Named(ident.clone()),
                    None => FieldName::Index(index),
                };
                Ok(FieldDescriptor {
                    skip: flags.skip,
                    targeted: flags.traverse,
                    ..FieldDescriptor::new(name, field.ty.clone())
                })
            })
            .collect::<Result<Vec<_>, Diagnostic>>()?;

        let selection = if fields.iter().any(|field| field.targeted) {
            Selection::Explicit
        } else {
            Selection::Auto
        };

        Ok(Self {
            ident: input.ident.clone(),
            vis: input.vis.clone(),
            generics: input.generics.clone(),
            style,
            fields,
            selection,
            options,
        })
    }

    /// The aggregate as a type, generics included: `Basket`, `Pair<'a, T>`.
    pub fn self_type(&self) -> TokenStream {
        let ident = &self.ident;
        let (_, ty_generics, _) = self.generics.split_for_impl();
        quote!(#ident #ty_generics)
    }

    /// Look a field up by name.
    pub fn field(&self, name: &FieldName) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| &field.name == name)
    }

    /// Fields that synthesis should attempt, in declared order.
    pub fn candidates(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(move |field| match self.selection {
            Selection::Auto => !field.skip,
            Selection::Explicit => field.targeted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use syn::parse_quote;

    fn scan(input: DeriveInput) -> Result<AggregateDeclaration, Diagnostic> {
        AggregateDeclaration::from_derive_input(&input)
    }

    #[test]
    fn named_struct_keeps_field_order() {
        let decl = scan(parse_quote! {
            pub struct Basket {
                label: String,
                items: Vec<i32>,
                #[undertow(skip)]
                tags: Vec<String>,
            }
        })
        .unwrap();

        assert_eq!(decl.style, StructStyle::Named);
        assert_eq!(decl.selection, Selection::Auto);
        let names: Vec<String> = decl.fields.iter().map(|f| f.name.to_string()).collect();
        assert_eq!(names, vec!["label", "items", "tags"]);
        let candidates: Vec<String> = decl.candidates().map(|f| f.name.to_string()).collect();
        assert_eq!(candidates, vec!["label", "items"]);
    }

    #[test]
    fn explicit_targets_switch_selection() {
        let decl = scan(parse_quote! {
            struct Pair(#[undertow(traverse)] Vec<i32>, Option<i32>);
        })
        .unwrap();

        assert_eq!(decl.style, StructStyle::Tuple);
        assert_eq!(decl.selection, Selection::Explicit);
        let candidates: Vec<FieldName> = decl.candidates().map(|f| f.name.clone()).collect();
        assert_eq!(candidates, vec![FieldName::Index(0)]);
    }

    #[test]
    fn enums_are_malformed() {
        let err = scan(parse_quote! {
            enum Shape { A(Vec<i32>) }
        })
        .unwrap_err();
        assert!(matches!(err.kind, DiagnosticKind::MalformedDeclaration { .. }));
        assert_eq!(err.aggregate, "Shape");
    }

    #[test]
    fn bad_attribute_is_malformed() {
        let err = scan(parse_quote! {
            struct Basket {
                #[undertow(sideways)]
                items: Vec<i32>,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("unsupported field attribute"));
    }

    #[test]
    fn self_type_carries_generics() {
        let decl = scan(parse_quote! {
            struct Pair<'a, T: Clone> where T: Default { left: &'a str, right: Vec<T> }
        })
        .unwrap();
        let ty: syn::Type = syn::parse2(decl.self_type()).unwrap();
        let expected: syn::Type = parse_quote!(Pair<'a, T>);
        assert_eq!(ty, expected);
    }

    #[test]
    fn field_naming() {
        let raw = FieldName::Named(parse_quote!(r#type));
        assert_eq!(raw.snake(), "type");
        assert_eq!(raw.pascal(), "Type");
        assert_eq!(raw.binding().to_string(), "__field_type");

        let snake = FieldName::Named(parse_quote!(raw_scores));
        assert_eq!(snake.pascal(), "RawScores");

        assert_eq!(FieldName::Index(2).snake(), "field2");
        assert_eq!(FieldName::Index(2).pascal(), "Field2");
        assert_eq!(FieldName::Index(2).binding().to_string(), "__field_2");
    }
}
