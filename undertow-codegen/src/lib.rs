//! # undertow-codegen
//!
//! The traversal synthesis engine behind `#[derive(Traversals)]`.
//!
//! Data flows one way:
//!
//! ```text
//! DeriveInput -> AggregateDeclaration -> GeneratorRegistry::resolve -> ShapeGenerator::synthesize
//!             -> TraversalDefinition -> Emitter
//! ```
//!
//! - [`declaration`] scans a struct into fields with [`TypeExpression`]s and attribute flags.
//! - [`registry`] holds ordered [`ShapeGenerator`]s; the first that supports a type wins.
//! - [`witness`] is the static table of containers with ready-made runtime traversals.
//! - [`synthesis`] picks the focus type argument and collects per-field results and
//!   [`Diagnostic`]s.
//! - [`emit`] writes the Rust items; [`expand_derive`] ties it all together.
//!
//! # Example
//!
//! ```
//! use undertow_codegen::{AggregateDeclaration, GeneratorRegistry, Synthesizer};
//!
//! let input: syn::DeriveInput = syn::parse_quote! {
//!     struct Basket { label: String, items: Vec<i32> }
//! };
//! let declaration = AggregateDeclaration::from_derive_input(&input).unwrap();
//! let registry = GeneratorRegistry::builtin();
//! let outcome = Synthesizer::new(&registry).synthesize(&declaration);
//!
//! assert_eq!(outcome.definitions.len(), 1);
//! assert_eq!(outcome.definitions[0].generator, "sequence");
//! assert_eq!(outcome.definitions[0].struct_ident.to_string(), "BasketItemsTraversal");
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod declaration;
pub mod diagnostic;
pub mod emit;
pub mod expand;
pub mod fragment;
pub mod generator;
pub mod generators;
pub mod options;
pub mod registry;
pub mod synthesis;
pub mod types;
pub mod witness;

// Re-exports
pub use declaration::{AggregateDeclaration, FieldDescriptor, FieldName, Selection, StructStyle};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity, ShapeOrigin};
pub use emit::{Emitter, RustEmitter};
pub use expand::{expand_derive, expand_with};
pub use fragment::{CodeFragment, Reconstruction};
pub use generator::{Multiplicity, ShapeGenerator, SynthesisContext};
pub use options::SynthesisOptions;
pub use registry::GeneratorRegistry;
pub use synthesis::{SynthesisOutcome, Synthesizer, TraversalDefinition};
pub use types::{QualifiedName, TypeExpression};
pub use witness::WitnessMapping;
