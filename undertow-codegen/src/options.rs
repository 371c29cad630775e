//! `#[undertow(...)]` attributes
//!
//! Container: `#[undertow(crate = "path")]` points generated code at a re-exported runtime.
//! Fields: `#[undertow(skip)]` never targets the field, `#[undertow(traverse)]` makes it an
//! explicit target (and turns off automatic selection for the whole struct).

use syn::{parse_quote, Attribute, LitStr};

/// Settings shared by every traversal of one aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOptions {
    /// Path the generated code uses for the runtime crate.
    pub runtime: syn::Path,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            runtime: parse_quote!(::undertow),
        }
    }
}

impl SynthesisOptions {
    /// Read container attributes.
    pub fn from_attributes(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut options = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("undertow")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("crate") {
                    let path: LitStr = meta.value()?.parse()?;
                    options.runtime = path.parse()?;
                    Ok(())
                } else {
                    Err(meta.error("unsupported container attribute, expected `crate = \"...\"`"))
                }
            })?;
        }
        Ok(options)
    }
}

/// Flags read from one field's attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldOptions {
    /// `#[undertow(skip)]`
    pub skip: bool,
    /// `#[undertow(traverse)]`
    pub traverse: bool,
}

impl FieldOptions {
    /// Read field attributes.
    pub fn from_attributes(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut options = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("undertow")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    options.skip = true;
                } else if meta.path.is_ident("traverse") {
                    options.traverse = true;
                } else {
                    return Err(meta.error("unsupported field attribute, expected `skip` or `traverse`"));
                }
                if options.skip && options.traverse {
                    return Err(meta.error("a field cannot be both `skip` and `traverse`"));
                }
                Ok(())
            })?;
        }
        Ok(options)
    }
}
