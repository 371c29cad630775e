//! The generator registry
//!
//! An ordered list of [`ShapeGenerator`]s. Registration order is precedence: when several
//! generators support the same type, the first one registered wins. The overlap is not an
//! error; it is logged at `debug` level and can be inspected with
//! [`GeneratorRegistry::candidates`].
//!
//! # Example
//!
//! ```
//! use undertow_codegen::{GeneratorRegistry, TypeExpression};
//!
//! let registry = GeneratorRegistry::builtin();
//! let ty = TypeExpression::from_type(&syn::parse_quote!(Vec<i32>));
//! assert_eq!(registry.resolve(&ty).map(|g| g.name()), Some("sequence"));
//! ```

use std::fmt;

use tracing::debug;

use crate::generator::ShapeGenerator;
use crate::generators;
use crate::types::TypeExpression;

/// Ordered shape generators; first match wins.
pub struct GeneratorRegistry {
    generators: Vec<Box<dyn ShapeGenerator>>,
}

impl GeneratorRegistry {
    /// A registry with no generators.
    pub fn new() -> Self {
        Self {
            generators: Vec::new(),
        }
    }

    /// The built-in generators, then one generator per witness-table row.
    pub fn builtin() -> Self {
        Self {
            generators: generators::builtin(),
        }
    }

    /// Append a generator. It only wins for types no earlier generator supports.
    pub fn register(&mut self, generator: Box<dyn ShapeGenerator>) -> &mut Self {
        debug!(generator = generator.name(), position = self.generators.len(), "registered shape generator");
        self.generators.push(generator);
        self
    }

    /// The first generator that supports `ty`.
    pub fn resolve(&self, ty: &TypeExpression) -> Option<&dyn ShapeGenerator> {
        let mut matching = self.generators.iter().filter(|generator| generator.supports(ty));
        let chosen = matching.next()?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            let shadowed: Vec<&'static str> = matching.map(|generator| generator.name()).collect();
            if !shadowed.is_empty() {
                debug!(
                    ty = %ty,
                    chosen = chosen.name(),
                    ?shadowed,
                    "overlapping shape generators, first registered wins"
                );
            }
        }

        Some(chosen.as_ref())
    }

    /// Every generator that supports `ty`, in precedence order.
    pub fn candidates(&self, ty: &TypeExpression) -> Vec<&dyn ShapeGenerator> {
        self.generators
            .iter()
            .filter(|generator| generator.supports(ty))
            .map(|generator| generator.as_ref())
            .collect()
    }

    /// Number of registered generators.
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Whether no generator is registered.
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Generator names in precedence order.
    pub fn names(&self) -> Vec<&'static str> {
        self.generators.iter().map(|generator| generator.name()).collect()
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("generators", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{AggregateDeclaration, FieldDescriptor};
    use crate::diagnostic::Diagnostic;
    use crate::fragment::CodeFragment;
    use crate::generator::{Multiplicity, SynthesisContext};
    use pretty_assertions::assert_eq;
    use syn::parse_quote;
    use tracing_test::traced_test;

    fn ty(ty: syn::Type) -> TypeExpression {
        TypeExpression::from_type(&ty)
    }

    /// Claims every parameterized type.
    struct Greedy;

    impl ShapeGenerator for Greedy {
        fn name(&self) -> &'static str {
            "greedy"
        }

        fn supports(&self, ty: &TypeExpression) -> bool {
            matches!(ty, TypeExpression::Parameterized { .. })
        }

        fn multiplicity(&self) -> Multiplicity {
            Multiplicity::ZeroOrMore
        }

        fn synthesize(
            &self,
            _field: &FieldDescriptor,
            _aggregate: &AggregateDeclaration,
            _ctx: &SynthesisContext<'_>,
        ) -> Result<CodeFragment, Diagnostic> {
            unimplemented!("never synthesized in these tests")
        }
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let registry = GeneratorRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.resolve(&ty(parse_quote!(Vec<i32>))).is_none());
    }

    #[test]
    fn builtin_dispatch() {
        let registry = GeneratorRegistry::builtin();
        let cases: Vec<(syn::Type, Option<&str>)> = vec![
            (parse_quote!(Vec<i32>), Some("sequence")),
            (parse_quote!([i32; 3]), Some("array")),
            (parse_quote!(HashSet<i32>), Some("set")),
            (parse_quote!(Option<i32>), Some("optional")),
            (parse_quote!(Either<String, i32>), Some("either")),
            (parse_quote!(Validated<Vec<String>, i32>), Some("validated")),
            (parse_quote!(Result<i32, String>), Some("result")),
            (parse_quote!(BTreeMap<String, i32>), Some("map")),
            (parse_quote!(VecDeque<i32>), Some("VecDeque")),
            (parse_quote!(Box<i32>), Some("Box")),
            (parse_quote!(std::cmp::Reverse<i32>), Some("std::cmp::Reverse")),
            (parse_quote!(String), None),
            (parse_quote!(Rc<i32>), None),
            (parse_quote!((i32, i32)), None),
        ];
        for (input, expected) in cases {
            let expr = ty(input);
            assert_eq!(registry.resolve(&expr).map(|g| g.name()), expected, "{expr}");
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        let registry = GeneratorRegistry::builtin();
        let expr = ty(parse_quote!(Option<Vec<i32>>));
        let first = registry.resolve(&expr).map(|g| g.name());
        let second = registry.resolve(&expr).map(|g| g.name());
        assert_eq!(first, second);
    }

    #[test]
    fn first_registered_wins() {
        let mut registry = GeneratorRegistry::builtin();
        registry.register(Box::new(Greedy));
        let vec = ty(parse_quote!(Vec<i32>));
        assert_eq!(registry.resolve(&vec).map(|g| g.name()), Some("sequence"));
        assert_eq!(
            registry.resolve(&ty(parse_quote!(Rc<i32>))).map(|g| g.name()),
            Some("greedy")
        );

        let mut greedy_first = GeneratorRegistry::new();
        greedy_first.register(Box::new(Greedy));
        for generator in generators::builtin() {
            greedy_first.register(generator);
        }
        assert_eq!(greedy_first.resolve(&vec).map(|g| g.name()), Some("greedy"));
        assert_eq!(greedy_first.names()[0], "greedy");
        assert_eq!(greedy_first.len(), registry.len());
    }

    #[test]
    fn candidates_expose_overlap() {
        let registry = GeneratorRegistry::builtin();
        let names: Vec<&str> = registry
            .candidates(&ty(parse_quote!(Vec<i32>)))
            .iter()
            .map(|g| g.name())
            .collect();
        assert_eq!(names, vec!["sequence", "Vec"]);
    }

    #[test]
    #[traced_test]
    fn overlap_is_logged_at_debug() {
        let registry = GeneratorRegistry::builtin();
        registry.resolve(&ty(parse_quote!(Option<i32>)));
        assert!(logs_contain("overlapping shape generators"));
        assert!(logs_contain("optional"));
    }
}
