//! The known-witness table
//!
//! A witness is a container family with a ready-made `Traverse` instance in the runtime
//! crate. The table maps each accepted spelling of the container to that instance, its
//! multiplicity, whether extra type parameters must be captured when naming the instance,
//! and which type argument is the focus.
//!
//! The string helpers here work on rendered identifiers such as `"HashMap<K, V>"`. They
//! never fail: malformed input yields the input unchanged or an empty string.

use crate::generator::Multiplicity;

/// One row of the witness table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WitnessMapping {
    /// The container as written in a field type, e.g. `std::collections::VecDeque`.
    pub identifier: &'static str,
    /// Path of the `Traverse` instance, relative to the runtime crate.
    pub traversal: &'static str,
    /// How many focused values one container holds.
    pub multiplicity: Multiplicity,
    /// Whether the instance takes the non-focus type arguments as parameters.
    pub is_parameterised: bool,
    /// Which type argument is traversed.
    pub focus_index: usize,
}

const fn row(
    identifier: &'static str,
    traversal: &'static str,
    multiplicity: Multiplicity,
) -> WitnessMapping {
    WitnessMapping {
        identifier,
        traversal,
        multiplicity,
        is_parameterised: false,
        focus_index: 0,
    }
}

const fn parameterised(
    identifier: &'static str,
    traversal: &'static str,
    focus_index: usize,
) -> WitnessMapping {
    WitnessMapping {
        identifier,
        traversal,
        multiplicity: Multiplicity::ZeroOrOne,
        is_parameterised: true,
        focus_index,
    }
}

static WITNESSES: &[WitnessMapping] = &[
    row("Vec", "traverse::VecTraverse", Multiplicity::ZeroOrMore),
    row("std::vec::Vec", "traverse::VecTraverse", Multiplicity::ZeroOrMore),
    row("alloc::vec::Vec", "traverse::VecTraverse", Multiplicity::ZeroOrMore),
    row("VecDeque", "traverse::VecDequeTraverse", Multiplicity::ZeroOrMore),
    row("std::collections::VecDeque", "traverse::VecDequeTraverse", Multiplicity::ZeroOrMore),
    row("alloc::collections::VecDeque", "traverse::VecDequeTraverse", Multiplicity::ZeroOrMore),
    row("LinkedList", "traverse::LinkedListTraverse", Multiplicity::ZeroOrMore),
    row("std::collections::LinkedList", "traverse::LinkedListTraverse", Multiplicity::ZeroOrMore),
    row("alloc::collections::LinkedList", "traverse::LinkedListTraverse", Multiplicity::ZeroOrMore),
    row("Option", "traverse::OptionTraverse", Multiplicity::ZeroOrOne),
    row("std::option::Option", "traverse::OptionTraverse", Multiplicity::ZeroOrOne),
    row("core::option::Option", "traverse::OptionTraverse", Multiplicity::ZeroOrOne),
    parameterised("Result", "traverse::ResultTraverse", 0),
    parameterised("std::result::Result", "traverse::ResultTraverse", 0),
    parameterised("core::result::Result", "traverse::ResultTraverse", 0),
    row("Box", "traverse::BoxTraverse", Multiplicity::ExactlyOne),
    row("std::boxed::Box", "traverse::BoxTraverse", Multiplicity::ExactlyOne),
    row("alloc::boxed::Box", "traverse::BoxTraverse", Multiplicity::ExactlyOne),
    row("Reverse", "traverse::ReverseTraverse", Multiplicity::ExactlyOne),
    row("std::cmp::Reverse", "traverse::ReverseTraverse", Multiplicity::ExactlyOne),
    row("core::cmp::Reverse", "traverse::ReverseTraverse", Multiplicity::ExactlyOne),
    parameterised("Either", "traverse::EitherTraverse", 1),
    parameterised("undertow::Either", "traverse::EitherTraverse", 1),
    parameterised("undertow::either::Either", "traverse::EitherTraverse", 1),
    parameterised("Validated", "traverse::ValidatedTraverse", 1),
    parameterised("undertow::Validated", "traverse::ValidatedTraverse", 1),
    parameterised("undertow::validated::Validated", "traverse::ValidatedTraverse", 1),
];

/// Every mapping, in table order.
pub fn mappings() -> impl Iterator<Item = &'static WitnessMapping> {
    WITNESSES.iter()
}

/// Exact lookup. No trimming, case folding or prefix matching.
pub fn lookup(identifier: &str) -> Option<&'static WitnessMapping> {
    WITNESSES.iter().find(|mapping| mapping.identifier == identifier)
}

/// True for identifiers in the runtime crate's own namespace, mapped or not.
pub fn is_recognized_family(identifier: &str) -> bool {
    let identifier = identifier.strip_prefix("::").unwrap_or(identifier);
    identifier
        .strip_prefix("undertow::")
        .is_some_and(|rest| !rest.is_empty())
}

/// Strip a trailing type-argument list: `"Foo<Bar>"` becomes `"Foo"`.
///
/// Input without `<`, or with `<` at position 0, is returned unchanged.
pub fn extract_base_identifier(identifier: &str) -> &str {
    match identifier.find('<') {
        Some(open) if open > 0 => &identifier[..open],
        _ => identifier,
    }
}

/// The text between the first `<` and the `>` that balances it.
///
/// Returns `""` when there is no `<`, when `<` is at position 0, or when the bracket is
/// never closed. Nested arguments come back verbatim.
pub fn extract_type_arguments(identifier: &str) -> &str {
    let open = match identifier.find('<') {
        Some(open) if open > 0 => open,
        _ => return "",
    };

    let mut depth = 0usize;
    let mut previous = None;
    for (offset, ch) in identifier[open..].char_indices() {
        match ch {
            '<' => depth += 1,
            // the `>` of a `->` return arrow
            '>' if previous == Some('-') => {}
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return &identifier[open + 1..open + offset];
                }
            }
            _ => {}
        }
        previous = Some(ch);
    }
    ""
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_is_exact() {
        assert!(lookup("VecDeque").is_some());
        assert!(lookup("std::collections::VecDeque").is_some());
        assert!(lookup("VecDeque ").is_none());
        assert!(lookup("vecdeque").is_none());
        assert!(lookup("VecDequeX").is_none());
        assert!(lookup("::std::collections::VecDeque").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn parameterised_rows_capture_the_non_focus_argument() {
        let either = lookup("Either").unwrap();
        assert!(either.is_parameterised);
        assert_eq!(either.focus_index, 1);
        assert_eq!(either.traversal, "traverse::EitherTraverse");

        let result = lookup("Result").unwrap();
        assert_eq!(result.focus_index, 0);
        assert_eq!(result.multiplicity, Multiplicity::ZeroOrOne);

        let boxed = lookup("Box").unwrap();
        assert!(!boxed.is_parameterised);
        assert_eq!(boxed.multiplicity, Multiplicity::ExactlyOne);
    }

    #[test]
    fn identifiers_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for mapping in mappings() {
            assert!(seen.insert(mapping.identifier), "duplicate {}", mapping.identifier);
        }
    }

    #[test]
    fn recognized_family_is_namespace_based() {
        assert!(is_recognized_family("undertow::Either"));
        assert!(is_recognized_family("::undertow::validated::Validated"));
        assert!(is_recognized_family("undertow::NotMapped"));
        assert!(!is_recognized_family("undertow::"));
        assert!(!is_recognized_family("Either"));
        assert!(!is_recognized_family("std::vec::Vec"));
        assert!(!is_recognized_family("undertowish::Thing"));
    }

    #[test]
    fn base_identifier_boundaries() {
        assert_eq!(extract_base_identifier("Foo<Bar>"), "Foo");
        assert_eq!(extract_base_identifier("<Bar>"), "<Bar>");
        assert_eq!(extract_base_identifier("Foo"), "Foo");
        assert_eq!(extract_base_identifier("Map<K, List<V>>"), "Map");
        assert_eq!(extract_base_identifier(""), "");
    }

    #[test]
    fn type_argument_boundaries() {
        assert_eq!(extract_type_arguments("Foo<Bar>"), "Bar");
        assert_eq!(extract_type_arguments("Foo<"), "");
        assert_eq!(extract_type_arguments("<Bar>"), "");
        assert_eq!(extract_type_arguments("Foo"), "");
        assert_eq!(extract_type_arguments("A>B"), "");
        assert_eq!(extract_type_arguments("A>B<C"), "");
        assert_eq!(extract_type_arguments("Foo<>"), "");
    }

    #[test]
    fn nested_arguments_are_returned_verbatim() {
        assert_eq!(extract_type_arguments("Map<K, List<V>>"), "K, List<V>");
        assert_eq!(extract_type_arguments("Map<K, List<V>"), "");
        assert_eq!(extract_type_arguments("Foo<A<B<C>>>"), "A<B<C>>");
        assert_eq!(extract_type_arguments("Box<dyn Fn(i32) -> i32>"), "dyn Fn(i32) -> i32");
        assert_eq!(extract_type_arguments("Box<dyn Fn() -> Vec<u8>>"), "dyn Fn() -> Vec<u8>");
        assert_eq!(extract_base_identifier("Box<dyn Fn(i32) -> i32>"), "Box");
    }
}
