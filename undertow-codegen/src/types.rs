//! Type expressions: the syntactic view of a field's declared type
//!
//! Generators match on a [`TypeExpression`] rather than on raw `syn` trees. Only the
//! forms a generator can reason about are broken down (arrays and plain paths whose last
//! segment carries type arguments); everything else is kept as [`TypeExpression::Opaque`]
//! and emitted verbatim.

use std::fmt;

use proc_macro2::TokenStream;
use quote::{quote, ToTokens, TokenStreamExt};
use syn::ext::IdentExt;

/// A path such as `std::vec::Vec`, without type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    leading_colon: bool,
    segments: Vec<syn::Ident>,
}

impl QualifiedName {
    /// Build a name from its segments.
    pub fn new(leading_colon: bool, segments: Vec<syn::Ident>) -> Self {
        Self {
            leading_colon,
            segments,
        }
    }

    /// The path segments, first to last.
    pub fn segments(&self) -> &[syn::Ident] {
        &self.segments
    }

    /// Whether the path was written with a leading `::`.
    pub fn has_leading_colon(&self) -> bool {
        self.leading_colon
    }

    /// The final segment (`Vec` for `std::vec::Vec`).
    pub fn last(&self) -> Option<&syn::Ident> {
        self.segments.last()
    }

    /// The display form without a leading `::`.
    pub fn relative(&self) -> String {
        self.segments
            .iter()
            .map(|segment| segment.unraw().to_string())
            .collect::<Vec<_>>()
            .join("::")
    }

    /// Match against a list of spellings, ignoring any leading `::`.
    pub fn is_one_of(&self, spellings: &[&str]) -> bool {
        let relative = self.relative();
        spellings.iter().any(|spelling| *spelling == relative)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.leading_colon {
            f.write_str("::")?;
        }
        f.write_str(&self.relative())
    }
}

impl ToTokens for QualifiedName {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        if self.leading_colon {
            tokens.extend(quote!(::));
        }
        tokens.append_separated(&self.segments, quote!(::));
    }
}

/// The shape of a declared type, as far as generators care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpression {
    /// `[element; len]`
    Array {
        /// Element type
        element: Box<TypeExpression>,
        /// Length expression, kept verbatim
        len: syn::Expr,
    },
    /// A path whose last segment carries type arguments: `Vec<T>`, `std::collections::HashMap<K, V>`
    Parameterized {
        /// Container name
        name: QualifiedName,
        /// Type arguments in declared order
        args: Vec<TypeExpression>,
    },
    /// A path without arguments: `i32`, `String`, `T`
    Simple(QualifiedName),
    /// Anything else (tuples, references, `<T as Trait>::Assoc`, lifetime or const arguments)
    Opaque(syn::Type),
}

impl TypeExpression {
    /// Classify a `syn` type.
    pub fn from_type(ty: &syn::Type) -> Self {
        match ty {
            syn::Type::Array(array) => TypeExpression::Array {
                element: Box::new(Self::from_type(&array.elem)),
                len: array.len.clone(),
            },
            syn::Type::Paren(paren) => Self::from_type(&paren.elem),
            syn::Type::Group(group) => Self::from_type(&group.elem),
            syn::Type::Path(path) if path.qself.is_none() => {
                Self::from_path(&path.path).unwrap_or_else(|| TypeExpression::Opaque(ty.clone()))
            }
            other => TypeExpression::Opaque(other.clone()),
        }
    }

    fn from_path(path: &syn::Path) -> Option<Self> {
        let last = path.segments.last()?;
        if path
            .segments
            .iter()
            .rev()
            .skip(1)
            .any(|segment| !segment.arguments.is_none())
        {
            return None;
        }

        let name = QualifiedName::new(
            path.leading_colon.is_some(),
            path.segments.iter().map(|segment| segment.ident.clone()).collect(),
        );

        match &last.arguments {
            syn::PathArguments::None => Some(TypeExpression::Simple(name)),
            syn::PathArguments::AngleBracketed(generic) => {
                let args = generic
                    .args
                    .iter()
                    .map(|arg| match arg {
                        syn::GenericArgument::Type(ty) => Some(Self::from_type(ty)),
                        _ => None,
                    })
                    .collect::<Option<Vec<_>>>()?;
                Some(TypeExpression::Parameterized { name, args })
            }
            syn::PathArguments::Parenthesized(_) => None,
        }
    }

    /// The container name, when there is one.
    pub fn name(&self) -> Option<&QualifiedName> {
        match self {
            TypeExpression::Parameterized { name, .. } | TypeExpression::Simple(name) => Some(name),
            TypeExpression::Array { .. } | TypeExpression::Opaque(_) => None,
        }
    }

    /// The type arguments of a parameterized type; empty otherwise.
    pub fn args(&self) -> &[TypeExpression] {
        match self {
            TypeExpression::Parameterized { args, .. } => args,
            _ => &[],
        }
    }

    /// True for a parameterized type named by one of `spellings`.
    pub fn is_parameterized_as(&self, spellings: &[&str]) -> bool {
        matches!(self, TypeExpression::Parameterized { name, .. } if name.is_one_of(spellings))
    }

    /// Whether the type is syntactically dynamically sized: `str`, `[T]`, `dyn Trait`.
    pub fn is_unsized(&self) -> bool {
        match self {
            TypeExpression::Simple(name) => {
                name.is_one_of(&["str", "core::primitive::str", "std::primitive::str"])
            }
            TypeExpression::Opaque(ty) => matches!(
                ty,
                syn::Type::Slice(_) | syn::Type::TraitObject(_) | syn::Type::ImplTrait(_)
            ),
            _ => false,
        }
    }
}

impl ToTokens for TypeExpression {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            TypeExpression::Array { element, len } => tokens.extend(quote!([#element; #len])),
            TypeExpression::Parameterized { name, args } => {
                tokens.extend(quote!(#name<#(#args),*>))
            }
            TypeExpression::Simple(name) => name.to_tokens(tokens),
            TypeExpression::Opaque(ty) => ty.to_tokens(tokens),
        }
    }
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpression::Array { element, len } => {
                write!(f, "[{}; {}]", element, len.to_token_stream())
            }
            TypeExpression::Parameterized { name, args } => {
                write!(f, "{name}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            TypeExpression::Simple(name) => write!(f, "{name}"),
            TypeExpression::Opaque(ty) => write!(f, "{}", ty.to_token_stream()),
        }
    }
}
