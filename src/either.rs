//! A two-branch sum type whose right branch is the traversal focus.
//!
//! `Either<L, R>` carries no success/failure meaning of its own. By convention it is
//! right-biased: [`Either::map`] and [`Either::and_then`] act on `Right`, and a derived
//! traversal over an `Either` field focuses the `Right` payload while leaving a `Left`
//! value untouched.
//!
//! # Examples
//!
//! ```rust
//! use undertow::Either;
//!
//! fn lookup(cached: bool) -> Either<&'static str, u32> {
//!     if cached {
//!         Either::left("stale")
//!     } else {
//!         Either::right(7)
//!     }
//! }
//!
//! let text = lookup(true).fold(|l| format!("left: {l}"), |r| format!("right: {r}"));
//! assert_eq!(text, "left: stale");
//! assert_eq!(lookup(false).map(|n| n * 6), Either::right(42));
//! ```

use crate::Validated;

/// A value that is either `Left(L)` or `Right(R)`.
///
/// ```rust
/// use undertow::Either;
///
/// let left: Either<i32, &str> = Either::left(42);
/// let right: Either<i32, &str> = Either::right("hello");
///
/// assert!(left.is_left());
/// assert_eq!(right.into_right(), Some("hello"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    /// The left variant
    Left(L),
    /// The right variant
    Right(R),
}

impl<L, R> Either<L, R> {
    // ========== Constructors ==========

    /// Create a Left value.
    #[inline]
    pub fn left(value: L) -> Self {
        Either::Left(value)
    }

    /// Create a Right value.
    #[inline]
    pub fn right(value: R) -> Self {
        Either::Right(value)
    }

    // ========== Predicates ==========

    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    // ========== Extractors ==========

    /// Returns the left value if present, consuming self.
    #[inline]
    pub fn into_left(self) -> Option<L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    /// Returns the right value if present, consuming self.
    #[inline]
    pub fn into_right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    /// Convert to `Either<&L, &R>`.
    #[inline]
    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    // ========== Transformations ==========

    /// Transform the right value, leaving a left value as is.
    ///
    /// ```rust
    /// use undertow::Either;
    ///
    /// let e: Either<&str, i32> = Either::right(2);
    /// assert_eq!(e.map(|x| x + 1), Either::right(3));
    /// ```
    #[inline]
    pub fn map<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r)),
        }
    }

    /// Transform the left value, leaving a right value as is.
    #[inline]
    pub fn map_left<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> L2,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Transform both sides at once.
    #[inline]
    pub fn bimap<L2, R2, F, G>(self, f: F, g: G) -> Either<L2, R2>
    where
        F: FnOnce(L) -> L2,
        G: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(g(r)),
        }
    }

    /// Swap the branches.
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        match self {
            Either::Left(l) => Either::Right(l),
            Either::Right(r) => Either::Left(r),
        }
    }

    /// Collapse both branches into one value.
    #[inline]
    pub fn fold<T, F, G>(self, left_fn: F, right_fn: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Either::Left(l) => left_fn(l),
            Either::Right(r) => right_fn(r),
        }
    }

    /// Chain a computation on the right value.
    #[inline]
    pub fn and_then<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> Either<L, R2>,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => f(r),
        }
    }

    /// Returns the right value or `default`.
    #[inline]
    pub fn right_or(self, default: R) -> R {
        match self {
            Either::Left(_) => default,
            Either::Right(r) => r,
        }
    }

    // ========== Conversions ==========

    /// Convert to a `Result`, treating `Right` as `Ok`.
    #[inline]
    pub fn into_result(self) -> Result<R, L> {
        match self {
            Either::Left(l) => Err(l),
            Either::Right(r) => Ok(r),
        }
    }

    /// Convert to a [`Validated`], treating `Left` as `Invalid`.
    ///
    /// ```rust
    /// use undertow::{Either, Validated};
    ///
    /// let e: Either<&str, i32> = Either::left("bad");
    /// assert_eq!(e.into_validated(), Validated::Invalid("bad"));
    /// ```
    #[inline]
    pub fn into_validated(self) -> Validated<L, R> {
        match self {
            Either::Left(l) => Validated::Invalid(l),
            Either::Right(r) => Validated::Valid(r),
        }
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(r) => Either::Right(r),
            Err(l) => Either::Left(l),
        }
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    fn from(either: Either<L, R>) -> Self {
        either.into_result()
    }
}

impl<L, R> IntoIterator for Either<L, R> {
    type Item = R;
    type IntoIter = std::option::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_right().into_iter()
    }
}
