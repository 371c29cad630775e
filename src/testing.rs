//! Testing utilities for traversals
//!
//! Helpers for checking the behavioural laws of derived traversals: a call counter for
//! "the function is never invoked" assertions, assertion macros for
//! [`Validated`](crate::Validated), and (behind the `proptest` feature) `Arbitrary`
//! instances for the runtime value types.
//!
//! # Examples
//!
//! ```rust
//! use undertow::testing::CallCounter;
//!
//! let counter = CallCounter::new();
//! let mut double = counter.wrap(|x: i32| x * 2);
//! assert_eq!(double(4), 8);
//! assert_eq!(counter.count(), 1);
//! ```
//!
//! ```rust
//! use undertow::{assert_invalid, assert_valid, Validated};
//!
//! assert_valid!(Validated::<Vec<String>, _>::valid(42));
//! assert_invalid!(Validated::<_, i32>::invalid(vec!["error".to_string()]));
//! ```

use std::cell::Cell;

#[cfg(feature = "proptest")]
use crate::{Either, Validated};

/// Counts how many times wrapped functions are invoked.
///
/// Every closure returned by [`CallCounter::wrap`] bumps the same shared count, so one
/// counter can observe several functions.
#[derive(Debug, Default)]
pub struct CallCounter {
    calls: Cell<usize>,
}

impl CallCounter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `f` so that every call is counted.
    pub fn wrap<'a, A, B, G>(&'a self, mut f: G) -> impl FnMut(A) -> B + 'a
    where
        G: FnMut(A) -> B + 'a,
    {
        move |a| {
            self.calls.set(self.calls.get() + 1);
            f(a)
        }
    }

    /// Number of calls observed so far.
    pub fn count(&self) -> usize {
        self.calls.get()
    }

    /// Reset the count to zero.
    pub fn reset(&self) {
        self.calls.set(0);
    }
}

/// Assert that a [`Validated`](crate::Validated) is `Valid`.
///
/// ```rust
/// use undertow::{Validated, assert_valid};
///
/// assert_valid!(Validated::<Vec<String>, _>::valid(1));
/// ```
#[macro_export]
macro_rules! assert_valid {
    ($validated:expr) => {
        match $validated {
            $crate::Validated::Valid(_) => {}
            $crate::Validated::Invalid(e) => {
                panic!("Expected Valid, got Invalid: {:?}", e);
            }
        }
    };
}

/// Assert that a [`Validated`](crate::Validated) is `Invalid`, optionally with specific evidence.
///
/// ```rust
/// use undertow::{Validated, assert_invalid};
///
/// let v = Validated::<_, i32>::invalid(vec!["a", "b"]);
/// assert_invalid!(v.clone());
/// assert_invalid!(v, vec!["a", "b"]);
/// ```
#[macro_export]
macro_rules! assert_invalid {
    ($validated:expr) => {
        match $validated {
            $crate::Validated::Invalid(_) => {}
            $crate::Validated::Valid(v) => {
                panic!("Expected Invalid, got Valid: {:?}", v);
            }
        }
    };
    ($validated:expr, $expected:expr) => {
        match $validated {
            $crate::Validated::Invalid(errors) => {
                assert_eq!(errors, $expected);
            }
            $crate::Validated::Valid(v) => {
                panic!("Expected Invalid with {:?}, got Valid: {:?}", $expected, v);
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl<E, A> Arbitrary for Validated<E, A>
where
    E: Arbitrary + 'static,
    A: Arbitrary + 'static,
    E::Strategy: 'static,
    A::Strategy: 'static,
{
    type Parameters = (E::Parameters, A::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (e_params, a_params) = args;
        prop_oneof![
            any_with::<E>(e_params).prop_map(Validated::invalid),
            any_with::<A>(a_params).prop_map(Validated::valid),
        ]
        .boxed()
    }
}

#[cfg(feature = "proptest")]
impl<L, R> Arbitrary for Either<L, R>
where
    L: Arbitrary + 'static,
    R: Arbitrary + 'static,
    L::Strategy: 'static,
    R::Strategy: 'static,
{
    type Parameters = (L::Parameters, R::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (l_params, r_params) = args;
        prop_oneof![
            any_with::<L>(l_params).prop_map(Either::left),
            any_with::<R>(r_params).prop_map(Either::right),
        ]
        .boxed()
    }
}
