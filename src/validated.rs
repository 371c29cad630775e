//! Validated results: a valid payload, or accumulated invalid evidence
//!
//! `Validated<E, A>` is the value-level counterpart of
//! [`ValidatedApplicative`](crate::applicative::ValidatedApplicative). As a field shape it
//! is focused on its `Valid` payload (the second type argument); an `Invalid` value is
//! left untouched by derived traversals.
//!
//! # Examples
//!
//! ```
//! use undertow::Validated;
//!
//! fn positive(n: i32) -> Validated<Vec<String>, i32> {
//!     if n > 0 {
//!         Validated::valid(n)
//!     } else {
//!         Validated::invalid(vec![format!("{n} is not positive")])
//!     }
//! }
//!
//! assert!(positive(3).is_valid());
//! let both = positive(-1).and(positive(-2));
//! assert_eq!(
//!     both,
//!     Validated::Invalid(vec!["-1 is not positive".to_string(), "-2 is not positive".to_string()])
//! );
//! ```

use crate::Semigroup;

/// Either a `Valid(A)` payload or `Invalid(E)` evidence.
///
/// When two invalid values are combined with [`Validated::and`], their evidence is merged
/// with [`Semigroup::combine`], left before right.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Validated<E, A> {
    /// Failed validation with accumulated errors
    Invalid(E),
    /// Successful validation with a value
    Valid(A),
}

impl<E, A> Validated<E, A> {
    /// Create a valid value
    #[inline]
    pub fn valid(value: A) -> Self {
        Validated::Valid(value)
    }

    /// Create an invalid value
    #[inline]
    pub fn invalid(error: E) -> Self {
        Validated::Invalid(error)
    }

    /// Create a validated value from a `Result`
    ///
    /// ```
    /// use undertow::Validated;
    ///
    /// assert_eq!(Validated::from_result(Ok::<_, String>(1)), Validated::Valid(1));
    /// ```
    #[inline]
    pub fn from_result(result: Result<A, E>) -> Self {
        match result {
            Ok(value) => Validated::Valid(value),
            Err(error) => Validated::Invalid(error),
        }
    }

    /// Convert into a `Result`
    #[inline]
    pub fn into_result(self) -> Result<A, E> {
        match self {
            Validated::Valid(value) => Ok(value),
            Validated::Invalid(error) => Err(error),
        }
    }

    /// Returns `true` for `Valid`
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, Validated::Valid(_))
    }

    /// Returns `true` for `Invalid`
    #[inline]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Validated::Invalid(_))
    }

    /// Transform the valid payload.
    #[inline]
    pub fn map<B, F>(self, f: F) -> Validated<E, B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Validated::Valid(value) => Validated::Valid(f(value)),
            Validated::Invalid(error) => Validated::Invalid(error),
        }
    }

    /// Transform the invalid evidence.
    #[inline]
    pub fn map_invalid<E2, F>(self, f: F) -> Validated<E2, A>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Validated::Valid(value) => Validated::Valid(value),
            Validated::Invalid(error) => Validated::Invalid(f(error)),
        }
    }

    /// Collapse both branches into one value.
    #[inline]
    pub fn fold<T, F, G>(self, invalid_fn: F, valid_fn: G) -> T
    where
        F: FnOnce(E) -> T,
        G: FnOnce(A) -> T,
    {
        match self {
            Validated::Invalid(error) => invalid_fn(error),
            Validated::Valid(value) => valid_fn(value),
        }
    }
}

impl<E: Semigroup, A> Validated<E, A> {
    /// Pair two validated values, accumulating evidence when both are invalid.
    ///
    /// ```
    /// use undertow::Validated;
    ///
    /// let a = Validated::<Vec<&str>, _>::valid(1);
    /// let b = Validated::<Vec<&str>, _>::valid("one");
    /// assert_eq!(a.and(b), Validated::Valid((1, "one")));
    /// ```
    pub fn and<B>(self, other: Validated<E, B>) -> Validated<E, (A, B)> {
        match (self, other) {
            (Validated::Valid(a), Validated::Valid(b)) => Validated::Valid((a, b)),
            (Validated::Invalid(e1), Validated::Invalid(e2)) => Validated::Invalid(e1.combine(e2)),
            (Validated::Invalid(e), _) | (_, Validated::Invalid(e)) => Validated::Invalid(e),
        }
    }

    /// Combine a whole sequence of validated values.
    ///
    /// Every invalid value contributes its evidence, in iteration order.
    ///
    /// ```
    /// use undertow::Validated;
    ///
    /// let all = Validated::all(vec![
    ///     Validated::<Vec<&str>, i32>::valid(1),
    ///     Validated::invalid(vec!["x"]),
    ///     Validated::invalid(vec!["y"]),
    /// ]);
    /// assert_eq!(all, Validated::Invalid(vec!["x", "y"]));
    /// ```
    pub fn all<I>(items: I) -> Validated<E, Vec<A>>
    where
        I: IntoIterator<Item = Validated<E, A>>,
    {
        items
            .into_iter()
            .fold(Validated::Valid(Vec::new()), |acc, item| {
                acc.and(item).map(|(mut values, value)| {
                    values.push(value);
                    values
                })
            })
    }
}

impl<E, A> From<Result<A, E>> for Validated<E, A> {
    fn from(result: Result<A, E>) -> Self {
        Validated::from_result(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert!(Validated::<String, i32>::valid(1).is_valid());
        assert!(Validated::<String, i32>::invalid("no".into()).is_invalid());
    }

    #[test]
    fn test_map_leaves_invalid_alone() {
        let v: Validated<&str, i32> = Validated::invalid("bad");
        assert_eq!(v.map(|x| x + 1), Validated::Invalid("bad"));
        let v: Validated<&str, i32> = Validated::valid(1);
        assert_eq!(v.map(|x| x + 1), Validated::Valid(2));
    }

    #[test]
    fn test_map_invalid() {
        let v: Validated<&str, i32> = Validated::invalid("bad");
        assert_eq!(v.map_invalid(str::len), Validated::Invalid(3));
    }

    #[test]
    fn test_and_accumulates() {
        let a: Validated<Vec<i32>, ()> = Validated::invalid(vec![1]);
        let b: Validated<Vec<i32>, ()> = Validated::invalid(vec![2]);
        assert_eq!(a.and(b), Validated::Invalid(vec![1, 2]));
    }

    #[test]
    fn test_and_single_failure() {
        let a: Validated<Vec<i32>, i32> = Validated::valid(1);
        let b: Validated<Vec<i32>, i32> = Validated::invalid(vec![9]);
        assert_eq!(a.and(b), Validated::Invalid(vec![9]));
    }

    #[test]
    fn test_all_success_keeps_order() {
        let all = Validated::all(vec![
            Validated::<Vec<&str>, i32>::valid(1),
            Validated::valid(2),
            Validated::valid(3),
        ]);
        assert_eq!(all, Validated::Valid(vec![1, 2, 3]));
    }

    #[test]
    fn test_all_empty() {
        let all = Validated::<Vec<&str>, i32>::all(Vec::new());
        assert_eq!(all, Validated::Valid(vec![]));
    }

    #[test]
    fn test_result_round_trip() {
        let v: Validated<&str, i32> = Ok(4).into();
        assert_eq!(v.clone().into_result(), Ok(4));
        assert_eq!(v.fold(|_| 0, |x| x * 2), 8);
    }
}
