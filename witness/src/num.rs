use std::cmp::Ordering;

use num_traits::{Bounded, FromPrimitive, Signed};

/// A numeric algebra for payloads of type `A`, carried by a witness type
/// instead of by `A` itself.
///
/// # Motivation
///
/// Rust resolves `+`, `<`, and friends through traits implemented on the
/// payload type, which rules out two things: giving one payload type several
/// distinct algebras, and attaching an algebra to a type you don't own. Moving
/// the operations onto a separate witness type allows both. Generic code names
/// the witness as a type parameter, the right algebra is selected when that
/// parameter is instantiated, and because witnesses are uninhabited there is
/// nothing to construct or store at runtime.
///
/// # Implementing this trait
///
/// The convention is to implement it for an uninhabited `enum`, so that only
/// the type (never a value) travels through generic code:
///
/// ```rust
/// # use std::cmp::Ordering;
/// # use witness::Num;
/// /// `i8` arithmetic that wraps instead of overflowing.
/// enum Wrapping8 {}
///
/// impl Num<i8> for Wrapping8 {
///     fn plus(a: i8, b: i8) -> i8 { a.wrapping_add(b) }
///     fn subtract(a: i8, b: i8) -> i8 { a.wrapping_sub(b) }
///     fn product(a: i8, b: i8) -> i8 { a.wrapping_mul(b) }
///     fn divide(a: i8, b: i8) -> i8 { a.wrapping_div(b) }
///     fn abs(a: i8) -> i8 { a.wrapping_abs() }
///     fn signum(a: i8) -> i8 { a.signum() }
///     fn from_integer(n: i64) -> i8 { n as i8 }
///     fn compare(a: &i8, b: &i8) -> Ordering { a.cmp(b) }
///     fn equals(a: &i8, b: &i8) -> bool { a == b }
/// }
/// ```
///
/// # Use
///
/// Two witnesses over the same payload type are two different algebras:
///
/// ```rust
/// # use std::cmp::Ordering;
/// # use witness::{Native, Num};
/// # enum Wrapping8 {}
/// # impl Num<i8> for Wrapping8 {
/// #     fn plus(a: i8, b: i8) -> i8 { a.wrapping_add(b) }
/// #     fn subtract(a: i8, b: i8) -> i8 { a.wrapping_sub(b) }
/// #     fn product(a: i8, b: i8) -> i8 { a.wrapping_mul(b) }
/// #     fn divide(a: i8, b: i8) -> i8 { a.wrapping_div(b) }
/// #     fn abs(a: i8) -> i8 { a.wrapping_abs() }
/// #     fn signum(a: i8) -> i8 { a.signum() }
/// #     fn from_integer(n: i64) -> i8 { n as i8 }
/// #     fn compare(a: &i8, b: &i8) -> Ordering { a.cmp(b) }
/// #     fn equals(a: &i8, b: &i8) -> bool { a == b }
/// # }
/// assert_eq!(<Wrapping8 as Num<i8>>::plus(100, 100), -56);
/// assert_eq!(<Native as Num<f64>>::plus(1.5, 2.0), 3.5);
/// ```
pub trait Num<A> {
    /// Addition.
    fn plus(a: A, b: A) -> A;

    /// Subtraction.
    fn subtract(a: A, b: A) -> A;

    /// Multiplication.
    fn product(a: A, b: A) -> A;

    /// Division. No division-by-zero error is defined at this layer; each
    /// witness inherits whatever its payload type does (infinities for
    /// floats, a panic for primitive integers).
    fn divide(a: A, b: A) -> A;

    /// Absolute value.
    fn abs(a: A) -> A;

    /// Sign of `a` expressed as a value of `A`. Integer payloads yield -1,
    /// 0, or 1; floats follow IEEE `signum` (zero keeps its sign, NaN stays
    /// NaN).
    fn signum(a: A) -> A;

    /// Inject an integer into `A`. Derived code synthesizes the additive
    /// identity as `from_integer(0)`, so that value MUST be the zero of this
    /// algebra.
    fn from_integer(n: i64) -> A;

    /// Total comparison. Must agree with [`Num::equals`]: `compare` returns
    /// `Equal` exactly when `equals` returns `true`.
    fn compare(a: &A, b: &A) -> Ordering;

    /// Equality as this algebra defines it.
    fn equals(a: &A, b: &A) -> bool;
}

/// Witness that borrows the payload type's own arithmetic.
///
/// A single blanket impl covers every signed primitive (integers and floats)
/// through `num-traits` bounds. Two edges are inherited from the payload
/// rather than papered over:
///
/// * `compare` falls back to `Equal` for unordered pairs, so float payloads
///   that can contain NaN get a degenerate order. Use [`TotalOrderFloat`]
///   where that matters.
/// * `from_integer` saturates at the payload's bounds when the integer does
///   not fit.
pub enum Native {}

impl<A> Num<A> for Native
where
    A: Signed + Bounded + FromPrimitive + PartialOrd + Copy,
{
    #[inline(always)]
    fn plus(a: A, b: A) -> A {
        a + b
    }

    #[inline(always)]
    fn subtract(a: A, b: A) -> A {
        a - b
    }

    #[inline(always)]
    fn product(a: A, b: A) -> A {
        a * b
    }

    #[inline(always)]
    fn divide(a: A, b: A) -> A {
        a / b
    }

    #[inline(always)]
    fn abs(a: A) -> A {
        a.abs()
    }

    #[inline(always)]
    fn signum(a: A) -> A {
        a.signum()
    }

    #[inline(always)]
    fn from_integer(n: i64) -> A {
        match A::from_i64(n) {
            Some(value) => value,
            None if n < 0 => A::min_value(),
            None => A::max_value(),
        }
    }

    #[inline(always)]
    fn compare(a: &A, b: &A) -> Ordering {
        a.partial_cmp(b).unwrap_or(Ordering::Equal)
    }

    #[inline(always)]
    fn equals(a: &A, b: &A) -> bool {
        a == b
    }
}

/// Float witness ordered by the IEEE 754 `totalOrder` predicate.
///
/// Unlike [`Native`] over a float payload, this witness stays lawful when NaN
/// shows up: `compare` is a genuine total order (`total_cmp`) and `equals`
/// agrees with it, so NaN equals NaN and `-0.0` sorts strictly below `0.0`.
/// The arithmetic itself is untouched IEEE arithmetic.
pub enum TotalOrderFloat {}

macro_rules! total_order_float_impl {
    ($($float:ty),*) => {$(
        impl Num<$float> for TotalOrderFloat {
            #[inline(always)]
            fn plus(a: $float, b: $float) -> $float {
                a + b
            }

            #[inline(always)]
            fn subtract(a: $float, b: $float) -> $float {
                a - b
            }

            #[inline(always)]
            fn product(a: $float, b: $float) -> $float {
                a * b
            }

            #[inline(always)]
            fn divide(a: $float, b: $float) -> $float {
                a / b
            }

            #[inline(always)]
            fn abs(a: $float) -> $float {
                a.abs()
            }

            #[inline(always)]
            fn signum(a: $float) -> $float {
                a.signum()
            }

            #[inline(always)]
            fn from_integer(n: i64) -> $float {
                n as $float
            }

            #[inline(always)]
            fn compare(a: &$float, b: &$float) -> Ordering {
                a.total_cmp(b)
            }

            #[inline(always)]
            fn equals(a: &$float, b: &$float) -> bool {
                a.total_cmp(b) == Ordering::Equal
            }
        }
    )*};
}

total_order_float_impl!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_integer_ops() {
        assert_eq!(<Native as Num<i64>>::plus(2, 3), 5);
        assert_eq!(<Native as Num<i64>>::subtract(2, 3), -1);
        assert_eq!(<Native as Num<i64>>::product(6, 7), 42);
        assert_eq!(<Native as Num<i64>>::divide(7, 2), 3);
        assert_eq!(<Native as Num<i64>>::abs(-9), 9);
        assert_eq!(<Native as Num<i64>>::signum(-9), -1);
        assert_eq!(<Native as Num<i64>>::signum(0), 0);
        assert_eq!(<Native as Num<i64>>::compare(&1, &2), Ordering::Less);
        assert!(<Native as Num<i64>>::equals(&4, &4));
    }

    #[test]
    fn native_float_ops() {
        assert_eq!(<Native as Num<f64>>::divide(1.0, 0.0), f64::INFINITY);
        assert_eq!(<Native as Num<f64>>::from_integer(-3), -3.0);
        assert_eq!(
            <Native as Num<f64>>::compare(&0.5, &2.5),
            Ordering::Less
        );
    }

    #[test]
    fn native_from_integer_saturates() {
        assert_eq!(<Native as Num<i8>>::from_integer(1_000), i8::MAX);
        assert_eq!(<Native as Num<i8>>::from_integer(-1_000), i8::MIN);
        assert_eq!(<Native as Num<i8>>::from_integer(7), 7);
    }

    #[test]
    fn total_order_float_handles_nan() {
        assert!(<TotalOrderFloat as Num<f64>>::equals(&f64::NAN, &f64::NAN));
        assert_eq!(
            <TotalOrderFloat as Num<f64>>::compare(&f64::NAN, &f64::INFINITY),
            Ordering::Greater
        );
        assert_eq!(
            <TotalOrderFloat as Num<f64>>::compare(&-0.0, &0.0),
            Ordering::Less
        );
    }

    #[test]
    fn total_order_float_arithmetic_is_plain_ieee() {
        assert_eq!(<TotalOrderFloat as Num<f64>>::plus(1.5, 2.0), 3.5);
        assert_eq!(<TotalOrderFloat as Num<f64>>::from_integer(2), 2.0);
        assert!(<TotalOrderFloat as Num<f64>>::divide(0.0, 0.0).is_nan());
    }
}
