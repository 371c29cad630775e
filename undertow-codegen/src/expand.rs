//! The `#[derive(Traversals)]` entry point.

use std::sync::OnceLock;

use proc_macro2::TokenStream;
use syn::DeriveInput;
use tracing::debug;

use crate::declaration::AggregateDeclaration;
use crate::diagnostic::{into_compile_error, Severity};
use crate::emit::{Emitter, RustEmitter};
use crate::registry::GeneratorRegistry;
use crate::synthesis::Synthesizer;

/// The registry shared by every expansion in one compiler process.
pub fn builtin_registry() -> &'static GeneratorRegistry {
    static REGISTRY: OnceLock<GeneratorRegistry> = OnceLock::new();
    REGISTRY.get_or_init(GeneratorRegistry::builtin)
}

/// Expand a derive input against the built-in registry.
pub fn expand_derive(input: &DeriveInput) -> syn::Result<TokenStream> {
    expand_with(builtin_registry(), input)
}

/// Expand a derive input against `registry`.
///
/// Every fatal diagnostic is folded into one `syn::Error`, so all problems in a struct
/// are reported together. Notes are dropped.
pub fn expand_with(registry: &GeneratorRegistry, input: &DeriveInput) -> syn::Result<TokenStream> {
    let declaration = AggregateDeclaration::from_derive_input(input).map_err(|diagnostic| syn::Error::from(&diagnostic))?;
    let outcome = Synthesizer::new(registry).synthesize(&declaration);

    for note in outcome.with_severity(Severity::Note) {
        debug!(%note, "field left as a leaf");
    }
    if let Some(error) = into_compile_error(&outcome.diagnostics) {
        return Err(error);
    }
    Ok(RustEmitter.emit(&declaration, &outcome.definitions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn expands_to_items() {
        let tokens = expand_derive(&parse_quote! {
            struct Basket { label: String, items: Vec<i32> }
        })
        .unwrap();
        let file: syn::File = syn::parse2(tokens).unwrap();
        assert_eq!(file.items.len(), 3);
    }

    #[test]
    fn all_errors_are_reported_together() {
        let err = expand_derive(&parse_quote! {
            struct Broken {
                #[undertow(traverse)]
                first: Rc<u8>,
                #[undertow(traverse)]
                second: Either<String>,
            }
        })
        .unwrap_err();
        let messages: Vec<String> = err.into_iter().map(|e| e.to_string()).collect();
        assert_eq!(messages.len(), 3, "{messages:?}");
        assert!(messages[0].contains("Rc<u8>"));
        assert!(messages[1].contains("type argument 1"));
        assert!(messages[2].contains("no traversal generated"));
    }

    #[test]
    fn struct_without_traversable_fields_fails() {
        let err = expand_derive(&parse_quote! {
            struct Plain { name: String }
        })
        .unwrap_err();
        assert!(err.to_string().contains("no traversal generated for `Plain`"));
    }

    #[test]
    fn enums_fail_with_a_clear_message() {
        let err = expand_derive(&parse_quote! {
            enum Shape { Square(Vec<u8>) }
        })
        .unwrap_err();
        assert!(err.to_string().contains("only be derived for structs"));
    }

    #[test]
    fn registry_is_shared() {
        assert!(std::ptr::eq(builtin_registry(), builtin_registry()));
    }
}
