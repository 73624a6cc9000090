use std::any::{type_name, Any};
use std::marker::PhantomData;

use crate::error::Error;

/// A shape whose contained values can be transformed via `map_shape` without
/// disturbing the structure around them.
///
/// # Motivation
///
/// This is the dispatch seam the free functions [`map`], [`select`], and
/// [`map_as`] resolve through: generic code names a functor token as a type
/// parameter and the matching instance is selected at compile time, so there
/// is no registry of instances and nothing is looked up at runtime.
///
/// # Implementing this trait
///
/// This trait is usually implemented for some marker token, because rust does
/// not allow for implementing a trait for a partially applied type. That is,
/// we can implement a trait for `Option<usize>` but we can't implement a trait
/// for just `Option`, because `Option` is a partially applied type.
///
/// For this reason, a common convention is to implement this trait using the
/// uninhabited [`PartiallyApplied`] enum marker, eg
///
/// ```rust
/// # use witness::{Functor, PartiallyApplied};
/// # #[derive(Debug, PartialEq, Eq)]
/// enum MyOption<A> {
///     Some(A),
///     None,
/// }
///
/// impl Functor for MyOption<PartiallyApplied> {
///     type Shape<X> = MyOption<X>;
///
///     fn map_shape<A, B>(input: Self::Shape<A>, mut f: impl FnMut(A) -> B) -> Self::Shape<B> {
///         match input {
///             MyOption::Some(x) => MyOption::Some(f(x)),
///             MyOption::None => MyOption::None,
///         }
///     }
/// }
/// ```
///
/// # Use
///
/// Here's what mapping over a `MyOption` shape looks like in action:
///
/// ```rust
/// # use witness::{Functor, PartiallyApplied};
/// # #[derive(Debug, PartialEq, Eq)]
/// # enum MyOption<A> {
/// #     Some(A),
/// #     None,
/// # }
/// #
/// # impl Functor for MyOption<PartiallyApplied> {
/// #     type Shape<X> = MyOption<X>;
/// #
/// #     fn map_shape<A, B>(input: Self::Shape<A>, mut f: impl FnMut(A) -> B) -> Self::Shape<B> {
/// #         match input {
/// #             MyOption::Some(x) => MyOption::Some(f(x)),
/// #             MyOption::None => MyOption::None,
/// #         }
/// #     }
/// # }
/// let shape = MyOption::Some(1);
/// let mapped = MyOption::<PartiallyApplied>::map_shape(shape, |n| n + 10);
///
/// assert_eq!(mapped, MyOption::Some(11));
/// ```
pub trait Functor {
    /// the shape type that is mapped over by `map_shape`
    type Shape<X>;

    /// Apply some function `f` to each value inside a shape.
    ///
    /// `f` must be applied exactly once per contained value, in the shape's
    /// natural order where it has one, and must not be applied to anything
    /// else.
    fn map_shape<A, B>(input: Self::Shape<A>, f: impl FnMut(A) -> B) -> Self::Shape<B>;
}

/// An uninhabited type used to define [`Functor`] instances for
/// partially-applied types.
///
/// For example: the instance for `Option<A>` cannot be written over the
/// partially-applied type `Option`, so instead we write it over
/// `Option<PartiallyApplied>`.
#[derive(Clone, Debug)]
pub enum PartiallyApplied {}

impl Functor for Option<PartiallyApplied> {
    type Shape<X> = Option<X>;

    #[inline(always)]
    fn map_shape<A, B>(input: Self::Shape<A>, f: impl FnMut(A) -> B) -> Self::Shape<B> {
        input.map(f)
    }
}

// maps the success value, leaves any error untouched
impl<E> Functor for Result<PartiallyApplied, E> {
    type Shape<X> = Result<X, E>;

    #[inline(always)]
    fn map_shape<A, B>(input: Self::Shape<A>, f: impl FnMut(A) -> B) -> Self::Shape<B> {
        input.map(f)
    }
}

impl Functor for Vec<PartiallyApplied> {
    type Shape<X> = Vec<X>;

    #[inline(always)]
    fn map_shape<A, B>(input: Self::Shape<A>, f: impl FnMut(A) -> B) -> Self::Shape<B> {
        input.into_iter().map(f).collect()
    }
}

// maps the second slot, carries the first along unchanged
impl<Fst> Functor for (Fst, PartiallyApplied) {
    type Shape<X> = (Fst, X);

    #[inline(always)]
    fn map_shape<A, B>(input: Self::Shape<A>, mut f: impl FnMut(A) -> B) -> Self::Shape<B> {
        (input.0, f(input.1))
    }
}

/// Composition of two functors: a shape of shapes, mapped in a single pass.
///
/// ```rust
/// use witness::{map, Compose, PartiallyApplied};
///
/// type VecOfOpt = Compose<Vec<PartiallyApplied>, Option<PartiallyApplied>>;
///
/// let mapped = map::<VecOfOpt, _, _>(vec![Some(1), None, Some(3)], |n| n * 10);
/// assert_eq!(mapped, vec![Some(10), None, Some(30)]);
/// ```
pub struct Compose<F1, F2>(PhantomData<F1>, PhantomData<F2>);

impl<F1: Functor, F2: Functor> Functor for Compose<F1, F2> {
    type Shape<X> = F1::Shape<F2::Shape<X>>;

    fn map_shape<A, B>(input: Self::Shape<A>, mut f: impl FnMut(A) -> B) -> Self::Shape<B> {
        F1::map_shape(input, |inner| F2::map_shape(inner, &mut f))
    }
}

/// Transform the values inside `shape` with `f`, keeping the shape itself.
///
/// The functor token `F` usually has to be named at the call site, because
/// `F` cannot be inferred backwards from `F::Shape<A>` alone:
///
/// ```rust
/// use witness::{map, PartiallyApplied};
///
/// let doubled = map::<Option<PartiallyApplied>, _, _>(Some(21), |n| n * 2);
/// assert_eq!(doubled, Some(42));
/// ```
pub fn map<F: Functor, A, B>(shape: F::Shape<A>, f: impl FnMut(A) -> B) -> F::Shape<B> {
    F::map_shape(shape, f)
}

/// Alias of [`map`] under its query-comprehension name. There is no
/// behavioral difference.
///
/// ```rust
/// use witness::{select, PartiallyApplied};
///
/// let lengths = select::<Vec<PartiallyApplied>, _, _>(vec!["a", "bcd"], |s| s.len());
/// assert_eq!(lengths, vec![1, 3]);
/// ```
pub fn select<F: Functor, A, B>(shape: F::Shape<A>, f: impl FnMut(A) -> B) -> F::Shape<B> {
    map::<F, A, B>(shape, f)
}

/// [`map`], with the caller asserting the concrete result shape `FU`.
///
/// This performs exactly the transform [`map`] performs, then checks that the
/// functor's natural result shape is the `FU` the caller asked for. On a
/// mismatch the mapped value is dropped and [`Error::ShapeMismatch`] names
/// both shapes; the result is never silently coerced. Only this entry point
/// pays for its assertion (one boxed downcast); [`map`] and [`select`] stay
/// fully monomorphized.
///
/// ```rust
/// use witness::{map_as, Error, PartiallyApplied};
///
/// let ok: Result<Vec<i32>, Error> =
///     map_as::<Vec<PartiallyApplied>, _, _, _>(vec![20, 30], |n| n + 1);
/// assert_eq!(ok.unwrap(), vec![21, 31]);
///
/// let err: Result<Option<i32>, Error> =
///     map_as::<Vec<PartiallyApplied>, _, _, _>(vec![20, 30], |n| n + 1);
/// assert!(matches!(err, Err(Error::ShapeMismatch { .. })));
/// ```
pub fn map_as<F, FU, A, B>(shape: F::Shape<A>, f: impl FnMut(A) -> B) -> Result<FU, Error>
where
    F: Functor,
    F::Shape<B>: 'static,
    FU: 'static,
{
    let mapped: Box<dyn Any> = Box::new(F::map_shape(shape, f));
    match mapped.downcast::<FU>() {
        Ok(shape) => Ok(*shape),
        Err(_) => Err(Error::ShapeMismatch {
            expected: type_name::<FU>(),
            actual: type_name::<F::Shape<B>>(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keeps_the_shape() {
        assert_eq!(map::<Option<PartiallyApplied>, _, _>(None::<i32>, |n| n + 1), None);
        assert_eq!(
            map::<Result<PartiallyApplied, String>, _, _>(Err("nope".to_owned()), |n: i32| n + 1),
            Err("nope".to_owned())
        );
        assert_eq!(
            map::<(char, PartiallyApplied), _, _>(('k', 2), |n| n * 3),
            ('k', 6)
        );
    }

    #[test]
    fn select_is_map() {
        let xs = vec![1, 2, 3];
        assert_eq!(
            select::<Vec<PartiallyApplied>, _, _>(xs.clone(), |n| n - 1),
            map::<Vec<PartiallyApplied>, _, _>(xs, |n| n - 1)
        );
    }

    #[test]
    fn map_as_accepts_the_natural_shape() {
        let mapped: Vec<String> =
            map_as::<Vec<PartiallyApplied>, _, _, _>(vec![1, 2], |n: i32| n.to_string())
                .expect("natural shape should downcast");
        assert_eq!(mapped, vec!["1".to_owned(), "2".to_owned()]);
    }

    #[test]
    fn map_as_rejects_a_foreign_shape() {
        let err = map_as::<Option<PartiallyApplied>, Vec<i64>, _, _>(Some(1i64), |n| n + 1)
            .expect_err("requested shape differs from the produced one");
        match err {
            Error::ShapeMismatch { expected, actual } => {
                assert!(expected.contains("Vec"));
                assert!(actual.contains("Option"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn compose_maps_through_both_layers() {
        let nested = vec![Some(1), None, Some(3)];
        let mapped = map::<Compose<Vec<PartiallyApplied>, Option<PartiallyApplied>>, _, _>(
            nested,
            |n| n + 1,
        );
        assert_eq!(mapped, vec![Some(2), None, Some(4)]);
    }
}
