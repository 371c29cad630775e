//! Associative combination, with and without an identity element
//!
//! [`Semigroup`] is what [`ValidatedApplicative`](crate::applicative::ValidatedApplicative)
//! uses to merge invalid evidence; [`Monoid`] adds the identity that
//! [`Const`](crate::applicative::Const) needs to `pure` a value it does not keep.
//!
//! # Laws
//!
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! M::empty().combine(a)   == a
//! a.combine(M::empty())   == a
//! ```
//!
//! # Examples
//!
//! ```
//! use undertow::{Monoid, Semigroup};
//!
//! assert_eq!(vec![1, 2].combine(vec![3]), vec![1, 2, 3]);
//! assert_eq!("ab".to_string().combine(String::empty()), "ab");
//! assert_eq!((vec![1], "x".to_string()).combine((vec![2], "y".to_string())), (vec![1, 2], "xy".to_string()));
//! ```

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::hash::Hash;

/// A type with an associative binary operation.
///
/// `combine` takes both operands by value; clone first to keep the originals.
pub trait Semigroup: Sized {
    /// Combine `self` (on the left) with `other` (on the right).
    fn combine(self, other: Self) -> Self;
}

/// A [`Semigroup`] with an identity element.
pub trait Monoid: Semigroup {
    /// The identity for [`Semigroup::combine`].
    fn empty() -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl<T> Monoid for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }
}

impl<T> Semigroup for VecDeque<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl<T> Monoid for VecDeque<T> {
    fn empty() -> Self {
        VecDeque::new()
    }
}

impl Semigroup for String {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

impl Monoid for String {
    fn empty() -> Self {
        String::new()
    }
}

impl<T: Ord> Semigroup for BTreeSet<T> {
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl<T: Ord> Monoid for BTreeSet<T> {
    fn empty() -> Self {
        BTreeSet::new()
    }
}

impl<T: Eq + Hash> Semigroup for HashSet<T> {
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl<T: Eq + Hash> Monoid for HashSet<T> {
    fn empty() -> Self {
        HashSet::new()
    }
}

// `None` is the identity; two `Some`s combine their contents.
impl<T: Semigroup> Semigroup for Option<T> {
    fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Some(a), Some(b)) => Some(a.combine(b)),
            (a, None) => a,
            (None, b) => b,
        }
    }
}

impl<T: Semigroup> Monoid for Option<T> {
    fn empty() -> Self {
        None
    }
}

impl Semigroup for () {
    fn combine(self, _other: Self) -> Self {}
}

impl Monoid for () {
    fn empty() -> Self {}
}

macro_rules! impl_tuple {
    ($($idx:tt $T:ident),+) => {
        impl<$($T: Semigroup),+> Semigroup for ($($T,)+) {
            #[inline]
            fn combine(self, other: Self) -> Self {
                ($(self.$idx.combine(other.$idx),)+)
            }
        }

        impl<$($T: Monoid),+> Monoid for ($($T,)+) {
            fn empty() -> Self {
                ($($T::empty(),)+)
            }
        }
    };
}

impl_tuple!(0 T1, 1 T2);
impl_tuple!(0 T1, 1 T2, 2 T3);
impl_tuple!(0 T1, 1 T2, 2 T3, 3 T4);
impl_tuple!(0 T1, 1 T2, 2 T3, 3 T4, 4 T5);
impl_tuple!(0 T1, 1 T2, 2 T3, 3 T4, 4 T5, 5 T6);

/// Fold every item into one value, starting from [`Monoid::empty`].
///
/// ```
/// use undertow::semigroup::fold_all;
///
/// let joined: String = fold_all(vec!["a".to_string(), "b".to_string()]);
/// assert_eq!(joined, "ab");
/// ```
pub fn fold_all<M, I>(items: I) -> M
where
    M: Monoid,
    I: IntoIterator<Item = M>,
{
    items.into_iter().fold(M::empty(), Semigroup::combine)
}
