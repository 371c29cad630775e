//! # Undertow
//!
//! > *"What moves beneath the surface"*
//!
//! Derived, effect-polymorphic traversals for the fields of your structs.
//!
//! ## Philosophy
//!
//! A traversal focuses the values inside one field and runs an effectful function over
//! them while keeping the rest of the structure intact. Undertow splits the work in two:
//! - **Runtime** (this crate): the [`Applicative`] capability, [`Traverse`] instances for
//!   well-known containers, and the [`Traversal`] trait with its derived operations.
//! - **Synthesis** (`undertow-codegen`, surfaced by `#[derive(Traversals)]`): one
//!   traversal per eligible field, chosen by the field's container shape.
//!
//! ## Quick Example
//!
//! ```rust
//! use undertow::applicative::OptionApplicative;
//! use undertow::traverse::{Traverse, VecTraverse};
//!
//! let parsed = VecTraverse.traverse(&OptionApplicative, vec!["1", "2"], |s: &str| s.parse::<i32>().ok());
//! assert_eq!(parsed, Some(vec![1, 2]));
//! ```
//!
//! With the `derive` feature:
//!
//! ```rust,ignore
//! use undertow::{Traversal, Traversals};
//!
//! #[derive(Traversals)]
//! struct Basket {
//!     label: String,
//!     items: Vec<i32>,
//! }
//!
//! let basket = Basket { label: "b".into(), items: vec![1, 2, 3] };
//! let doubled = Basket::items_traversal().modify(basket, |x| x * 2);
//! assert_eq!(doubled.items, vec![2, 4, 6]);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod applicative;
pub mod either;
pub mod semigroup;
pub mod testing;
pub mod traversal;
pub mod traverse;
pub mod validated;

// Re-exports
pub use applicative::{Applicative, Const, Identity};
pub use either::Either;
pub use semigroup::{Monoid, Semigroup};
pub use traversal::{Composed, Traversal};
pub use traverse::Traverse;
pub use validated::Validated;

#[cfg(feature = "derive")]
pub use undertow_derive::Traversals;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::applicative::{
        Applicative, Const, EitherApplicative, Identity, OptionApplicative, ResultApplicative,
        ValidatedApplicative,
    };
    pub use crate::either::Either;
    pub use crate::semigroup::{Monoid, Semigroup};
    pub use crate::traversal::Traversal;
    pub use crate::traverse::Traverse;
    pub use crate::validated::Validated;

    #[cfg(feature = "derive")]
    pub use undertow_derive::Traversals;
}

/// Support code referenced by derived traversals. Not part of the public API.
#[doc(hidden)]
pub mod __private {
    /// Rebuild a fixed-size array from the values a traversal produced for it.
    ///
    /// The traversal produces exactly one value per element, so the length always matches.
    pub fn collect_array<T, const N: usize>(items: Vec<T>) -> [T; N] {
        match <[T; N]>::try_from(items) {
            Ok(array) => array,
            Err(items) => unreachable!(
                "array traversal produced {} values for {} slots",
                items.len(),
                N
            ),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn collect_array_keeps_order() {
            let array: [i32; 3] = collect_array(vec![3, 2, 1]);
            assert_eq!(array, [3, 2, 1]);
        }

        #[test]
        #[should_panic(expected = "array traversal produced")]
        fn collect_array_rejects_wrong_length() {
            let _: [i32; 2] = collect_array(vec![1]);
        }
    }
}
