//! `#[derive(Traversals)]`
//!
//! Thin proc-macro shell around `undertow-codegen`. Use it through the `derive` feature of
//! `undertow`.
//!
//! # Attributes
//!
//! ## Struct-level
//! - `#[undertow(crate = "path")]` - where the runtime lives, `::undertow` by default.
//!
//! ## Field-level
//! - `#[undertow(traverse)]` - derive only for marked fields; an unsupported marked field
//!   is a compile error.
//! - `#[undertow(skip)]` - never derive for this field.
//!
//! # Example
//!
//! ```text
//! #[derive(Traversals)]
//! struct Order {
//!     id: u64,
//!     lines: Vec<Line>,
//!     coupon: Option<String>,
//! }
//!
//! // Generates OrderLinesTraversal, OrderCouponTraversal,
//! // Order::lines_traversal() and Order::coupon_traversal().
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive one traversal per traversable field.
///
/// See the crate docs for the accepted attributes.
#[proc_macro_derive(Traversals, attributes(undertow))]
pub fn derive_traversals(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match undertow_codegen::expand_derive(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
