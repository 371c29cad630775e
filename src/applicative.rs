//! The ambient effect capability that generated traversals are written against
//!
//! Rust has no higher-kinded types, so an effect "shape" is modelled as a capability
//! value implementing [`Applicative`], with a generic associated type `Of<T>` naming the
//! effect applied to `T`. Generated code never inspects a concrete effect: it only lifts
//! plain values with [`Applicative::pure`], maps inside the effect with
//! [`Applicative::map`], and combines two effects with [`Applicative::map2`].
//!
//! # Laws
//!
//! Instances are expected to satisfy the usual applicative laws:
//! ```text
//! map(pure(a), f)            == pure(f(a))
//! map(fa, |a| a)             == fa
//! map2(pure(a), pure(b), f)  == pure(f(a, b))
//! ```
//!
//! # Examples
//!
//! ```
//! use undertow::applicative::{Applicative, OptionApplicative};
//!
//! let app = OptionApplicative;
//! let sum = app.map2::<i32, i32, i32, _>(Some(1), Some(2), |a, b| a + b);
//! assert_eq!(sum, Some(3));
//!
//! let missing = app.map2::<i32, i32, i32, _>(Some(1), None, |a, b| a + b);
//! assert_eq!(missing, None);
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::{Either, Monoid, Semigroup, Validated};

/// A capability for lifting and combining effectful values.
///
/// Effects are evaluated left to right: `map2(fa, fb, f)` combines `fa` before `fb`, and
/// instances that short-circuit or accumulate (such as [`ResultApplicative`] and
/// [`ValidatedApplicative`]) respect that order.
pub trait Applicative {
    /// The effect applied to a value of type `T`.
    type Of<T>;

    /// Lift a plain value into the effect.
    fn pure<T>(&self, value: T) -> Self::Of<T>;

    /// Transform the value inside an effect.
    fn map<A, B, F>(&self, fa: Self::Of<A>, f: F) -> Self::Of<B>
    where
        F: FnOnce(A) -> B;

    /// Combine two effects, then merge their values with `f`.
    fn map2<A, B, C, F>(&self, fa: Self::Of<A>, fb: Self::Of<B>, f: F) -> Self::Of<C>
    where
        F: FnOnce(A, B) -> C;
}

/// The trivial effect: `Of<T>` is `T` itself.
///
/// Traversing under `Identity` is a plain, pure modification.
///
/// ```
/// use undertow::applicative::{Applicative, Identity};
///
/// assert_eq!(Identity.map::<i32, i32, _>(Identity.pure(20), |x| x + 1), 21);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl Applicative for Identity {
    type Of<T> = T;

    #[inline]
    fn pure<T>(&self, value: T) -> T {
        value
    }

    #[inline]
    fn map<A, B, F>(&self, fa: A, f: F) -> B
    where
        F: FnOnce(A) -> B,
    {
        f(fa)
    }

    #[inline]
    fn map2<A, B, C, F>(&self, fa: A, fb: B, f: F) -> C
    where
        F: FnOnce(A, B) -> C,
    {
        f(fa, fb)
    }
}

/// Optional values: any `None` makes the whole combination `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionApplicative;

impl Applicative for OptionApplicative {
    type Of<T> = Option<T>;

    fn pure<T>(&self, value: T) -> Option<T> {
        Some(value)
    }

    fn map<A, B, F>(&self, fa: Option<A>, f: F) -> Option<B>
    where
        F: FnOnce(A) -> B,
    {
        fa.map(f)
    }

    fn map2<A, B, C, F>(&self, fa: Option<A>, fb: Option<B>, f: F) -> Option<C>
    where
        F: FnOnce(A, B) -> C,
    {
        match (fa, fb) {
            (Some(a), Some(b)) => Some(f(a, b)),
            _ => None,
        }
    }
}

/// Fail-fast results: the leftmost `Err` wins.
///
/// ```
/// use undertow::applicative::{Applicative, ResultApplicative};
///
/// let app = ResultApplicative::<&str>::new();
/// let r = app.map2::<i32, i32, i32, _>(Err("first"), Err("second"), |a, b| a + b);
/// assert_eq!(r, Err("first"));
/// ```
pub struct ResultApplicative<E>(PhantomData<fn() -> E>);

impl<E> ResultApplicative<E> {
    /// Create the capability for errors of type `E`.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Applicative for ResultApplicative<E> {
    type Of<T> = Result<T, E>;

    fn pure<T>(&self, value: T) -> Result<T, E> {
        Ok(value)
    }

    fn map<A, B, F>(&self, fa: Result<A, E>, f: F) -> Result<B, E>
    where
        F: FnOnce(A) -> B,
    {
        fa.map(f)
    }

    fn map2<A, B, C, F>(&self, fa: Result<A, E>, fb: Result<B, E>, f: F) -> Result<C, E>
    where
        F: FnOnce(A, B) -> C,
    {
        Ok(f(fa?, fb?))
    }
}

/// Right-biased [`Either`]: the leftmost `Left` wins.
pub struct EitherApplicative<L>(PhantomData<fn() -> L>);

impl<L> EitherApplicative<L> {
    /// Create the capability for left values of type `L`.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<L> Applicative for EitherApplicative<L> {
    type Of<T> = Either<L, T>;

    fn pure<T>(&self, value: T) -> Either<L, T> {
        Either::Right(value)
    }

    fn map<A, B, F>(&self, fa: Either<L, A>, f: F) -> Either<L, B>
    where
        F: FnOnce(A) -> B,
    {
        fa.map(f)
    }

    fn map2<A, B, C, F>(&self, fa: Either<L, A>, fb: Either<L, B>, f: F) -> Either<L, C>
    where
        F: FnOnce(A, B) -> C,
    {
        match (fa, fb) {
            (Either::Right(a), Either::Right(b)) => Either::Right(f(a, b)),
            (Either::Left(l), _) | (_, Either::Left(l)) => Either::Left(l),
        }
    }
}

/// Error-accumulating validation: every `Invalid` is kept, combined in order.
///
/// ```
/// use undertow::applicative::{Applicative, ValidatedApplicative};
/// use undertow::Validated;
///
/// let app = ValidatedApplicative::<Vec<&str>>::new();
/// let v = app.map2::<i32, i32, i32, _>(
///     Validated::invalid(vec!["a"]),
///     Validated::invalid(vec!["b"]),
///     |x, y| x + y,
/// );
/// assert_eq!(v, Validated::Invalid(vec!["a", "b"]));
/// ```
pub struct ValidatedApplicative<E>(PhantomData<fn() -> E>);

impl<E> ValidatedApplicative<E> {
    /// Create the capability for errors of type `E`.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E: Semigroup> Applicative for ValidatedApplicative<E> {
    type Of<T> = Validated<E, T>;

    fn pure<T>(&self, value: T) -> Validated<E, T> {
        Validated::Valid(value)
    }

    fn map<A, B, F>(&self, fa: Validated<E, A>, f: F) -> Validated<E, B>
    where
        F: FnOnce(A) -> B,
    {
        fa.map(f)
    }

    fn map2<A, B, C, F>(&self, fa: Validated<E, A>, fb: Validated<E, B>, f: F) -> Validated<E, C>
    where
        F: FnOnce(A, B) -> C,
    {
        match (fa, fb) {
            (Validated::Valid(a), Validated::Valid(b)) => Validated::Valid(f(a, b)),
            (Validated::Invalid(e1), Validated::Invalid(e2)) => Validated::Invalid(e1.combine(e2)),
            (Validated::Invalid(e), _) | (_, Validated::Invalid(e)) => Validated::Invalid(e),
        }
    }
}

/// The constant effect: values are discarded and only the monoid `M` is combined.
///
/// Traversing under `Const<Vec<A>>` with `|a| vec![a]` collects every focused element,
/// which is how [`Traversal::get_all`](crate::Traversal::get_all) is implemented.
pub struct Const<M>(PhantomData<fn() -> M>);

impl<M> Const<M> {
    /// Create the capability for the monoid `M`.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<M: Monoid> Applicative for Const<M> {
    type Of<T> = M;

    fn pure<T>(&self, _value: T) -> M {
        M::empty()
    }

    fn map<A, B, F>(&self, fa: M, _f: F) -> M
    where
        F: FnOnce(A) -> B,
    {
        fa
    }

    fn map2<A, B, C, F>(&self, fa: M, fb: M, _f: F) -> M
    where
        F: FnOnce(A, B) -> C,
    {
        fa.combine(fb)
    }
}

// The phantom-typed capabilities are zero-sized regardless of their parameter, so the
// usual derives (which would demand `E: Clone` and friends) are written out by hand.
macro_rules! impl_phantom_capability {
    ($($name:ident),+) => {
        $(
            impl<P> Clone for $name<P> {
                fn clone(&self) -> Self {
                    *self
                }
            }

            impl<P> Copy for $name<P> {}

            impl<P> Default for $name<P> {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl<P> fmt::Debug for $name<P> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(stringify!($name))
                }
            }
        )+
    };
}

impl_phantom_capability!(ResultApplicative, EitherApplicative, ValidatedApplicative, Const);
