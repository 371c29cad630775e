//! The trait implemented by every derived field traversal
//!
//! A `Traversal<S, A>` focuses zero or more values of type `A` inside a structure `S`.
//! Its one required method, [`Traversal::modify_f`], runs an effectful function over the
//! focused values and rebuilds `S` inside the effect. Everything else is derived from it
//! by picking an [`Applicative`]:
//!
//! | method | applicative |
//! |---|---|
//! | [`modify`](Traversal::modify) | [`Identity`] |
//! | [`get_all`](Traversal::get_all) | [`Const<Vec<A>>`](Const) |
//! | [`count`](Traversal::count) | [`Const<Vec<()>>`](Const) |
//!
//! Traversals compose with [`Traversal::and_then`]: focusing a field, then a field of each
//! focused value.

use std::fmt;
use std::marker::PhantomData;

use crate::applicative::{Applicative, Const, Identity};

/// An effectful, shape-preserving focus on the `A`s inside an `S`.
///
/// # Laws
///
/// ```text
/// t.modify_f(|a| app.pure(a), s, app) == app.pure(s)      (identity)
/// ```
///
/// Implementations must call the function once per focused value, in the container's
/// natural order, and must not call it at all when nothing is focused.
pub trait Traversal<S, A> {
    /// Apply `f` to each focused value and rebuild `source` inside the effect.
    fn modify_f<F, G>(&self, f: G, source: S, applicative: &F) -> F::Of<S>
    where
        F: Applicative,
        G: FnMut(A) -> F::Of<A>;

    /// Apply a pure function to each focused value.
    fn modify<G>(&self, source: S, f: G) -> S
    where
        G: FnMut(A) -> A,
    {
        self.modify_f::<Identity, G>(f, source, &Identity)
    }

    /// Replace every focused value with `value`.
    fn set_all(&self, source: S, value: A) -> S
    where
        A: Clone,
    {
        self.modify(source, |_| value.clone())
    }

    /// Collect the focused values in traversal order.
    fn get_all(&self, source: S) -> Vec<A> {
        self.modify_f::<Const<Vec<A>>, _>(|a| vec![a], source, &Const::new())
    }

    /// Count the focused values.
    fn count(&self, source: S) -> usize {
        self.modify_f::<Const<Vec<()>>, _>(|_| vec![()], source, &Const::new())
            .len()
    }

    /// Focus the `B`s inside every focused `A`.
    fn and_then<T, B>(self, next: T) -> Composed<Self, T, A>
    where
        Self: Sized,
        T: Traversal<A, B>,
    {
        Composed {
            outer: self,
            inner: next,
            _focus: PhantomData,
        }
    }
}

/// Two traversals run one inside the other. Built by [`Traversal::and_then`].
pub struct Composed<T1, T2, A> {
    outer: T1,
    inner: T2,
    _focus: PhantomData<fn() -> A>,
}

impl<S, A, B, T1, T2> Traversal<S, B> for Composed<T1, T2, A>
where
    T1: Traversal<S, A>,
    T2: Traversal<A, B>,
{
    fn modify_f<F, G>(&self, mut f: G, source: S, applicative: &F) -> F::Of<S>
    where
        F: Applicative,
        G: FnMut(B) -> F::Of<B>,
    {
        self.outer.modify_f::<F, _>(
            |a| self.inner.modify_f::<F, _>(&mut f, a, applicative),
            source,
            applicative,
        )
    }
}

impl<T1: Clone, T2: Clone, A> Clone for Composed<T1, T2, A> {
    fn clone(&self) -> Self {
        Composed {
            outer: self.outer.clone(),
            inner: self.inner.clone(),
            _focus: PhantomData,
        }
    }
}

impl<T1: fmt::Debug, T2: fmt::Debug, A> fmt::Debug for Composed<T1, T2, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composed")
            .field("outer", &self.outer)
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicative::OptionApplicative;
    use crate::traverse::{traverse_vec, Traverse, VecTraverse};

    // Hand-written traversals standing in for derived ones.
    struct Items;

    impl Traversal<Vec<i32>, i32> for Items {
        fn modify_f<F, G>(&self, f: G, source: Vec<i32>, applicative: &F) -> F::Of<Vec<i32>>
        where
            F: Applicative,
            G: FnMut(i32) -> F::Of<i32>,
        {
            VecTraverse.traverse::<F, i32, i32, G>(applicative, source, f)
        }
    }

    struct Rows;

    impl Traversal<Vec<Vec<i32>>, Vec<i32>> for Rows {
        fn modify_f<F, G>(&self, f: G, source: Vec<Vec<i32>>, applicative: &F) -> F::Of<Vec<Vec<i32>>>
        where
            F: Applicative,
            G: FnMut(Vec<i32>) -> F::Of<Vec<i32>>,
        {
            traverse_vec::<F, Vec<i32>, Vec<i32>, G, _>(applicative, source, f)
        }
    }

    #[test]
    fn modify_and_get_all() {
        assert_eq!(Items.modify(vec![1, 2, 3], |x| x * 2), vec![2, 4, 6]);
        assert_eq!(Items.get_all(vec![5, 6]), vec![5, 6]);
        assert_eq!(Items.count(vec![5, 6, 7]), 3);
        assert_eq!(Items.set_all(vec![1, 2], 0), vec![0, 0]);
    }

    #[test]
    fn modify_f_with_option_fails_as_a_whole() {
        let out = Items.modify_f(|x| (x > 0).then_some(x), vec![1, -1], &OptionApplicative);
        assert_eq!(out, None);
    }

    #[test]
    fn composition_reaches_nested_values_in_order() {
        let grid = vec![vec![1, 2], vec![], vec![3]];
        let nested = Rows.and_then(Items);
        assert_eq!(nested.get_all(grid.clone()), vec![1, 2, 3]);
        assert_eq!(nested.modify(grid, |x| x + 10), vec![vec![11, 12], vec![], vec![13]]);
    }
}
