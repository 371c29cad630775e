//! Ready-made traversals for well-known containers
//!
//! A [`Traverse`] instance knows how to run an effectful function over every element of
//! one container family and rebuild the container inside the effect. These instances are
//! the "behaviour references" of the generator's witness table: when a field's container
//! has no dedicated shape generator but is a known witness, the generated code delegates
//! to the instance named here.
//!
//! Containers that carry extra type parameters (the error of a `Result`, the left side of
//! an [`Either`]) have parameterised instances such as [`ResultTraverse<E>`].
//!
//! # Examples
//!
//! ```
//! use undertow::applicative::OptionApplicative;
//! use undertow::traverse::{Traverse, VecTraverse};
//!
//! let halves = VecTraverse.traverse(&OptionApplicative, vec![2, 4, 6], |n: i32| {
//!     (n % 2 == 0).then(|| n / 2)
//! });
//! assert_eq!(halves, Some(vec![1, 2, 3]));
//!
//! let odd = VecTraverse.traverse(&OptionApplicative, vec![2, 3], |n: i32| {
//!     (n % 2 == 0).then(|| n / 2)
//! });
//! assert_eq!(odd, None);
//! ```

use std::cmp::Reverse;
use std::collections::{LinkedList, VecDeque};
use std::fmt;
use std::marker::PhantomData;

use crate::applicative::Applicative;
use crate::{Either, Validated};

/// A container family that can be traversed with any [`Applicative`].
///
/// `traverse` applies `f` to elements in the container's natural order, combines the
/// resulting effects left to right, and rebuilds a container of the same shape. Empty or
/// absent containers are lifted with `pure` without calling `f`.
pub trait Traverse {
    /// The container holding elements of type `T`.
    type Of<T>;

    /// Run `f` over every element and rebuild the container inside the effect.
    fn traverse<F, A, B, G>(&self, applicative: &F, container: Self::Of<A>, f: G) -> F::Of<Self::Of<B>>
    where
        F: Applicative,
        G: FnMut(A) -> F::Of<B>;
}

/// Fold `items` into an effect of a `Vec`, applying `f` in iteration order.
///
/// ```
/// use undertow::applicative::Identity;
/// use undertow::traverse::traverse_vec;
///
/// assert_eq!(traverse_vec(&Identity, [1, 2, 3], |x: i32| x * 10), vec![10, 20, 30]);
/// ```
pub fn traverse_vec<F, A, B, G, I>(applicative: &F, items: I, mut f: G) -> F::Of<Vec<B>>
where
    F: Applicative,
    G: FnMut(A) -> F::Of<B>,
    I: IntoIterator<Item = A>,
{
    let items = items.into_iter();
    let mut acc = applicative.pure::<Vec<B>>(Vec::with_capacity(items.size_hint().0));
    for item in items {
        acc = applicative.map2::<Vec<B>, B, Vec<B>, _>(acc, f(item), |mut values, value| {
            values.push(value);
            values
        });
    }
    acc
}

/// Turn a sequence of effects into an effect of a sequence.
///
/// ```
/// use undertow::applicative::OptionApplicative;
/// use undertow::traverse::sequence_vec;
///
/// assert_eq!(sequence_vec(&OptionApplicative, vec![Some(1), Some(2)]), Some(vec![1, 2]));
/// assert_eq!(sequence_vec(&OptionApplicative, vec![Some(1), None]), None);
/// ```
pub fn sequence_vec<F, A, I>(applicative: &F, effects: I) -> F::Of<Vec<A>>
where
    F: Applicative,
    I: IntoIterator<Item = F::Of<A>>,
{
    traverse_vec::<F, F::Of<A>, A, _, I>(applicative, effects, |effect| effect)
}

/// `Vec<T>`: every element, in index order.
#[derive(Debug, Clone, Copy, Default)]
pub struct VecTraverse;

impl Traverse for VecTraverse {
    type Of<T> = Vec<T>;

    fn traverse<F, A, B, G>(&self, applicative: &F, container: Vec<A>, f: G) -> F::Of<Vec<B>>
    where
        F: Applicative,
        G: FnMut(A) -> F::Of<B>,
    {
        traverse_vec::<F, A, B, G, Vec<A>>(applicative, container, f)
    }
}

/// `VecDeque<T>`: every element, front to back.
#[derive(Debug, Clone, Copy, Default)]
pub struct VecDequeTraverse;

impl Traverse for VecDequeTraverse {
    type Of<T> = VecDeque<T>;

    fn traverse<F, A, B, G>(
        &self,
        applicative: &F,
        container: VecDeque<A>,
        f: G,
    ) -> F::Of<VecDeque<B>>
    where
        F: Applicative,
        G: FnMut(A) -> F::Of<B>,
    {
        let values = traverse_vec::<F, A, B, G, VecDeque<A>>(applicative, container, f);
        applicative.map::<Vec<B>, VecDeque<B>, _>(values, VecDeque::from)
    }
}

/// `LinkedList<T>`: every element, front to back.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedListTraverse;

impl Traverse for LinkedListTraverse {
    type Of<T> = LinkedList<T>;

    fn traverse<F, A, B, G>(
        &self,
        applicative: &F,
        container: LinkedList<A>,
        f: G,
    ) -> F::Of<LinkedList<B>>
    where
        F: Applicative,
        G: FnMut(A) -> F::Of<B>,
    {
        let values = traverse_vec::<F, A, B, G, LinkedList<A>>(applicative, container, f);
        applicative.map::<Vec<B>, LinkedList<B>, _>(values, |values| values.into_iter().collect())
    }
}

/// `Option<T>`: the payload when present.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionTraverse;

impl Traverse for OptionTraverse {
    type Of<T> = Option<T>;

    fn traverse<F, A, B, G>(&self, applicative: &F, container: Option<A>, mut f: G) -> F::Of<Option<B>>
    where
        F: Applicative,
        G: FnMut(A) -> F::Of<B>,
    {
        match container {
            Some(value) => applicative.map::<B, Option<B>, _>(f(value), Some),
            None => applicative.pure::<Option<B>>(None),
        }
    }
}

/// `Box<T>`: exactly one element.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxTraverse;

impl Traverse for BoxTraverse {
    type Of<T> = Box<T>;

    fn traverse<F, A, B, G>(&self, applicative: &F, container: Box<A>, mut f: G) -> F::Of<Box<B>>
    where
        F: Applicative,
        G: FnMut(A) -> F::Of<B>,
    {
        applicative.map::<B, Box<B>, _>(f(*container), Box::new)
    }
}

/// `Reverse<T>`: exactly one element.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReverseTraverse;

impl Traverse for ReverseTraverse {
    type Of<T> = Reverse<T>;

    fn traverse<F, A, B, G>(&self, applicative: &F, container: Reverse<A>, mut f: G) -> F::Of<Reverse<B>>
    where
        F: Applicative,
        G: FnMut(A) -> F::Of<B>,
    {
        applicative.map::<B, Reverse<B>, _>(f(container.0), Reverse)
    }
}

/// `Result<T, E>`: the `Ok` payload; an `Err` is carried through untouched.
pub struct ResultTraverse<E>(PhantomData<fn() -> E>);

impl<E> Traverse for ResultTraverse<E> {
    type Of<T> = Result<T, E>;

    fn traverse<F, A, B, G>(
        &self,
        applicative: &F,
        container: Result<A, E>,
        mut f: G,
    ) -> F::Of<Result<B, E>>
    where
        F: Applicative,
        G: FnMut(A) -> F::Of<B>,
    {
        match container {
            Ok(value) => applicative.map::<B, Result<B, E>, _>(f(value), Ok),
            Err(error) => applicative.pure::<Result<B, E>>(Err(error)),
        }
    }
}

/// [`Either<L, R>`]: the `Right` payload; a `Left` is carried through untouched.
pub struct EitherTraverse<L>(PhantomData<fn() -> L>);

impl<L> Traverse for EitherTraverse<L> {
    type Of<T> = Either<L, T>;

    fn traverse<F, A, B, G>(
        &self,
        applicative: &F,
        container: Either<L, A>,
        mut f: G,
    ) -> F::Of<Either<L, B>>
    where
        F: Applicative,
        G: FnMut(A) -> F::Of<B>,
    {
        match container {
            Either::Right(value) => applicative.map::<B, Either<L, B>, _>(f(value), Either::Right),
            Either::Left(other) => applicative.pure::<Either<L, B>>(Either::Left(other)),
        }
    }
}

/// [`Validated<E, A>`]: the `Valid` payload; `Invalid` is carried through untouched.
pub struct ValidatedTraverse<E>(PhantomData<fn() -> E>);

impl<E> Traverse for ValidatedTraverse<E> {
    type Of<T> = Validated<E, T>;

    fn traverse<F, A, B, G>(
        &self,
        applicative: &F,
        container: Validated<E, A>,
        mut f: G,
    ) -> F::Of<Validated<E, B>>
    where
        F: Applicative,
        G: FnMut(A) -> F::Of<B>,
    {
        match container {
            Validated::Valid(value) => {
                applicative.map::<B, Validated<E, B>, _>(f(value), Validated::Valid)
            }
            Validated::Invalid(error) => {
                applicative.pure::<Validated<E, B>>(Validated::Invalid(error))
            }
        }
    }
}

macro_rules! impl_parameterised_instance {
    ($($name:ident),+) => {
        $(
            impl<P> $name<P> {
                /// Create the instance.
                pub fn new() -> Self {
                    Self(PhantomData)
                }
            }

            impl<P> Default for $name<P> {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl<P> Clone for $name<P> {
                fn clone(&self) -> Self {
                    *self
                }
            }

            impl<P> Copy for $name<P> {}

            impl<P> fmt::Debug for $name<P> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(stringify!($name))
                }
            }
        )+
    };
}

impl_parameterised_instance!(ResultTraverse, EitherTraverse, ValidatedTraverse);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicative::{Identity, OptionApplicative, ResultApplicative, ValidatedApplicative};
    use crate::testing::CallCounter;

    #[test]
    fn vec_traverse_applies_in_order() {
        let mut seen = Vec::new();
        let out = VecTraverse.traverse(&Identity, vec![3, 1, 2], |x: i32| {
            seen.push(x);
            x + 1
        });
        assert_eq!(out, vec![4, 2, 3]);
        assert_eq!(seen, vec![3, 1, 2]);
    }

    #[test]
    fn vec_traverse_short_circuits_result() {
        let app = ResultApplicative::<String>::new();
        let out = VecTraverse.traverse(&app, vec![1, -1, 2, -2], |x: i32| {
            if x > 0 {
                Ok(x)
            } else {
                Err(format!("negative {x}"))
            }
        });
        assert_eq!(out, Err("negative -1".to_string()));
    }

    #[test]
    fn vec_traverse_accumulates_validated() {
        let app = ValidatedApplicative::<Vec<i32>>::new();
        let out = VecTraverse.traverse(&app, vec![1, -1, 2, -2], |x: i32| {
            if x > 0 {
                Validated::valid(x)
            } else {
                Validated::invalid(vec![x])
            }
        });
        assert_eq!(out, Validated::Invalid(vec![-1, -2]));
    }

    #[test]
    fn deque_and_list_keep_order() {
        let deque: VecDeque<i32> = [1, 2, 3].into_iter().collect();
        let out = VecDequeTraverse.traverse(&Identity, deque, |x: i32| x * 2);
        assert_eq!(out.into_iter().collect::<Vec<_>>(), vec![2, 4, 6]);

        let list: LinkedList<i32> = [1, 2, 3].into_iter().collect();
        let out = LinkedListTraverse.traverse(&OptionApplicative, list, |x: i32| Some(x - 1));
        assert_eq!(out.map(|l| l.into_iter().collect::<Vec<_>>()), Some(vec![0, 1, 2]));
    }

    #[test]
    fn absent_values_never_call_the_function() {
        let counter = CallCounter::new();

        let none = OptionTraverse.traverse(&Identity, None::<i32>, counter.wrap(|x: i32| x));
        assert_eq!(none, None);

        let err = ResultTraverse::<&str>::new().traverse(&Identity, Err("e"), counter.wrap(|x: i32| x));
        assert_eq!(err, Err("e"));

        let left = EitherTraverse::<&str>::new().traverse(&Identity, Either::left("l"), counter.wrap(|x: i32| x));
        assert_eq!(left, Either::Left("l"));

        let invalid = ValidatedTraverse::<&str>::new().traverse(
            &Identity,
            Validated::invalid("i"),
            counter.wrap(|x: i32| x),
        );
        assert_eq!(invalid, Validated::Invalid("i"));

        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn exactly_one_shapes() {
        assert_eq!(BoxTraverse.traverse(&Identity, Box::new(2), |x: i32| x * 3), Box::new(6));
        assert_eq!(ReverseTraverse.traverse(&OptionApplicative, Reverse(2), |x: i32| Some(x)), Some(Reverse(2)));
    }

    #[test]
    fn sequence_vec_with_result() {
        let app = ResultApplicative::<&str>::new();
        assert_eq!(sequence_vec(&app, vec![Ok(1), Ok(2)]), Ok(vec![1, 2]));
        assert_eq!(sequence_vec(&app, vec![Ok(1), Err("x"), Err("y")]), Err("x"));
    }
}
