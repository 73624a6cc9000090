use std::any::type_name;
use std::cmp::Ordering;

use crate::error::Error;
use crate::num::Num;

/// A single-slot immutable wrapper whose operation surface is derived from a
/// numeric witness over its payload.
///
/// # Motivation
///
/// Unit and id types (`Meters`, `Celsius`, `AccountId`) want the payload's
/// arithmetic without being interchangeable with the payload or with each
/// other. Instead of hand-writing that surface per type, a wrapper names its
/// payload and a [`Num`] witness once; everything else (arithmetic, ordering,
/// equality, folds, rendering) is derived in [`NewTypeOps`] from those two
/// associated types. Because the witness is chosen per wrapper, two wrappers
/// over the same payload can carry different algebras.
///
/// # Implementing this trait
///
/// Concrete wrappers are usually declared through [`newtype!`], which
/// generates this impl along with the operator plumbing. Implementing by hand
/// means supplying the two associated types and the three accessors below;
/// everything with a default body is derived.
///
/// ```rust
/// use witness::{Native, NewType, NewTypeOps};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Attempts(i64);
///
/// impl NewType for Attempts {
///     type Payload = i64;
///     type Num = Native;
///
///     fn wrap(value: i64) -> Self {
///         Attempts(value)
///     }
///
///     fn value(&self) -> &i64 {
///         &self.0
///     }
///
///     fn into_value(self) -> i64 {
///         self.0
///     }
/// }
///
/// assert_eq!(Attempts(2).plus(Attempts(3)), Attempts(5));
/// ```
pub trait NewType: Sized {
    /// The wrapped payload type.
    type Payload;

    /// The witness supplying arithmetic, ordering, and equality for
    /// [`NewType::Payload`].
    type Num: Num<Self::Payload>;

    /// Wrap a payload. This is the factory every derived operation builds its
    /// results with; it must be total and must not inspect the payload.
    fn wrap(value: Self::Payload) -> Self;

    /// Read access to the payload.
    fn value(&self) -> &Self::Payload;

    /// Consume the wrapper, returning the payload.
    fn into_value(self) -> Self::Payload;

    /// Wrap a payload that may be absent.
    ///
    /// The absent case fails with [`Error::MissingPayload`] before anything
    /// else can observe the wrapper; a wrapper holding nothing cannot be
    /// constructed.
    fn try_wrap(value: Option<Self::Payload>) -> Result<Self, Error> {
        match value {
            Some(value) => Ok(Self::wrap(value)),
            None => Err(Error::MissingPayload {
                type_name: type_label::<Self>(),
            }),
        }
    }
}

/// The operation surface every [`NewType`] derives from its witness.
///
/// Blanket-implemented for all wrappers; no per-type code. Three conventions
/// hold throughout:
///
/// * arithmetic never mutates: each operation consumes its operands and
///   builds a fresh wrapper through [`NewType::wrap`];
/// * comparison and equality delegate to the witness, never to the payload's
///   own `PartialOrd`/`PartialEq`;
/// * the wrapper folds as a single-element container, so every fold, filter,
///   or predicate sees the payload exactly once.
pub trait NewTypeOps: NewType {
    /// Addition via the witness. The `+` operator on generated wrappers
    /// delegates here.
    fn plus(self, rhs: Self) -> Self {
        self.bind(|a| rhs.map(|b| <Self::Num as Num<Self::Payload>>::plus(a, b)))
    }

    /// Subtraction via the witness.
    fn subtract(self, rhs: Self) -> Self {
        self.bind(|a| rhs.map(|b| <Self::Num as Num<Self::Payload>>::subtract(a, b)))
    }

    /// Multiplication via the witness.
    fn product(self, rhs: Self) -> Self {
        self.bind(|a| rhs.map(|b| <Self::Num as Num<Self::Payload>>::product(a, b)))
    }

    /// Division via the witness. Division by zero behaves however the
    /// witness's payload behaves; nothing is intercepted here.
    fn divide(self, rhs: Self) -> Self {
        self.bind(|a| rhs.map(|b| <Self::Num as Num<Self::Payload>>::divide(a, b)))
    }

    /// Negation: the payload subtracted from the witness's additive identity
    /// (`from_integer(0)`), re-wrapped. Correct exactly when that value is
    /// the zero of the algebra.
    fn negate(self) -> Self {
        let zero = <Self::Num as Num<Self::Payload>>::from_integer(0);
        Self::wrap(<Self::Num as Num<Self::Payload>>::subtract(
            zero,
            self.into_value(),
        ))
    }

    /// Absolute value of the payload, unwrapped.
    fn abs(self) -> Self::Payload {
        <Self::Num as Num<Self::Payload>>::abs(self.into_value())
    }

    /// Sign of the payload, unwrapped.
    fn signum(self) -> Self::Payload {
        <Self::Num as Num<Self::Payload>>::signum(self.into_value())
    }

    /// Re-wrap `f(payload)`. Same-type-only: the projection stays within the
    /// payload type, so the wrapper type never changes.
    fn map(self, f: impl FnOnce(Self::Payload) -> Self::Payload) -> Self {
        Self::wrap(f(self.into_value()))
    }

    /// Alias of [`NewTypeOps::map`] under its query-comprehension name.
    fn select(self, f: impl FnOnce(Self::Payload) -> Self::Payload) -> Self {
        self.map(f)
    }

    /// Monadic chaining: `f` builds the result wrapper directly, flattening
    /// one level.
    fn bind(self, f: impl FnOnce(Self::Payload) -> Self) -> Self {
        f(self.into_value())
    }

    /// Monadic comprehension: `bind` produces an intermediate wrapper from
    /// the payload, then `project` combines the original and intermediate
    /// payloads into the result.
    fn select_many(
        self,
        bind: impl FnOnce(Self::Payload) -> Self,
        project: impl FnOnce(Self::Payload, Self::Payload) -> Self::Payload,
    ) -> Self
    where
        Self::Payload: Clone,
    {
        let original = self.into_value();
        let intermediate = bind(original.clone());
        Self::wrap(project(original, intermediate.into_value()))
    }

    /// Fold over the single payload: applies `folder` exactly once.
    fn fold<S>(self, state: S, folder: impl FnOnce(S, Self::Payload) -> S) -> S {
        folder(state, self.into_value())
    }

    /// Identical to [`NewTypeOps::fold`]; a one-element container has no
    /// direction for the fold to depend on.
    fn fold_back<S>(self, state: S, folder: impl FnOnce(S, Self::Payload) -> S) -> S {
        self.fold(state, folder)
    }

    /// Number of contained payloads. Always 1.
    fn count(&self) -> usize {
        1
    }

    /// Apply `predicate` to the payload and return its answer. With exactly
    /// one element, `exists` and `for_all` coincide.
    fn exists(self, predicate: impl FnOnce(Self::Payload) -> bool) -> bool {
        predicate(self.into_value())
    }

    /// See [`NewTypeOps::exists`].
    fn for_all(self, predicate: impl FnOnce(Self::Payload) -> bool) -> bool {
        predicate(self.into_value())
    }

    /// Run `f` on the payload for its side effect, exactly once.
    fn iter(self, f: impl FnOnce(Self::Payload)) {
        f(self.into_value());
    }

    /// Witness-delegated total comparison. `<`, `<=`, and friends on
    /// generated wrappers are defined in terms of this.
    fn compare_to(&self, other: &Self) -> Ordering {
        <Self::Num as Num<Self::Payload>>::compare(self.value(), other.value())
    }

    /// Witness-delegated equality, consistent with
    /// [`NewTypeOps::compare_to`].
    fn equals(&self, other: &Self) -> bool {
        <Self::Num as Num<Self::Payload>>::equals(self.value(), other.value())
    }
}

impl<T: NewType> NewTypeOps for T {}

/// Base name of `T`: the final path segment with any generic arguments cut
/// off. Used for wrapper rendering and error messages.
pub fn type_label<T>() -> &'static str {
    let full = type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Declare a concrete wrapper type deriving its operation surface from a
/// numeric witness.
///
/// Generates the tuple struct, its [`NewType`] impl, a `const fn new`
/// constructor, the arithmetic operators (`+ - * /` and unary `-`, each
/// delegating to the named method on [`NewTypeOps`]), witness-delegated
/// `PartialEq` and `PartialOrd`, a `Display` rendering `"Name(payload)"`,
/// and an `IntoIterator` yielding the single payload.
///
/// The witness defaults to [`crate::Native`]; `over SomeWitness` picks a
/// different one. Attributes (doc comments, extra derives such as `Hash` for
/// hashable payloads) pass through to the struct. Comparison derives must
/// not be passed through; the witness-backed impls are already emitted.
///
/// ```rust
/// use witness::{NewType, NewTypeOps, TotalOrderFloat};
///
/// witness::newtype! {
///     /// Distance in meters.
///     #[derive(Debug, Clone, Copy)]
///     pub struct Meters(f64);
/// }
///
/// witness::newtype! {
///     /// Temperature, NaN-tolerant: ordered by the IEEE total order.
///     #[derive(Debug, Clone, Copy)]
///     pub struct Celsius(f64) over TotalOrderFloat;
/// }
///
/// let total = Meters::new(3.0) + Meters::new(4.0);
/// assert_eq!(total, Meters::new(7.0));
/// assert!(Meters::new(3.0) < Meters::new(4.0));
/// assert_eq!(total.to_string(), "Meters(7)");
///
/// assert!(Celsius::new(f64::NAN) == Celsius::new(f64::NAN));
/// assert_eq!(Meters::new(2.0).plus(Meters::new(0.5)).into_value(), 2.5);
/// ```
#[macro_export]
macro_rules! newtype {
    ($(#[$meta:meta])* $vis:vis struct $name:ident($payload:ty);) => {
        $crate::newtype! { $(#[$meta])* $vis struct $name($payload) over $crate::Native; }
    };
    ($(#[$meta:meta])* $vis:vis struct $name:ident($payload:ty) over $num:ty;) => {
        $(#[$meta])*
        $vis struct $name($payload);

        impl $name {
            /// Wrap a payload.
            $vis const fn new(value: $payload) -> Self {
                Self(value)
            }
        }

        impl $crate::NewType for $name {
            type Payload = $payload;
            type Num = $num;

            #[inline(always)]
            fn wrap(value: $payload) -> Self {
                Self(value)
            }

            #[inline(always)]
            fn value(&self) -> &$payload {
                &self.0
            }

            #[inline(always)]
            fn into_value(self) -> $payload {
                self.0
            }
        }

        impl ::core::ops::Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                $crate::NewTypeOps::plus(self, rhs)
            }
        }

        impl ::core::ops::Sub for $name {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                $crate::NewTypeOps::subtract(self, rhs)
            }
        }

        impl ::core::ops::Mul for $name {
            type Output = Self;

            fn mul(self, rhs: Self) -> Self {
                $crate::NewTypeOps::product(self, rhs)
            }
        }

        impl ::core::ops::Div for $name {
            type Output = Self;

            fn div(self, rhs: Self) -> Self {
                $crate::NewTypeOps::divide(self, rhs)
            }
        }

        impl ::core::ops::Neg for $name {
            type Output = Self;

            fn neg(self) -> Self {
                $crate::NewTypeOps::negate(self)
            }
        }

        impl ::core::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $crate::NewTypeOps::equals(self, other)
            }
        }

        impl ::core::cmp::PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> ::core::option::Option<::core::cmp::Ordering> {
                ::core::option::Option::Some($crate::NewTypeOps::compare_to(self, other))
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::write!(f, "{}({})", $crate::newtype::type_label::<Self>(), self.0)
            }
        }

        impl ::core::iter::IntoIterator for $name {
            type Item = $payload;
            type IntoIter = ::core::iter::Once<$payload>;

            fn into_iter(self) -> Self::IntoIter {
                ::core::iter::once(self.0)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::newtype! {
        #[derive(Debug, Clone, Copy)]
        struct Gauge(i64);
    }

    #[test]
    fn arithmetic_goes_through_the_witness() {
        assert_eq!(Gauge::new(2) + Gauge::new(3), Gauge::new(5));
        assert_eq!(Gauge::new(2) - Gauge::new(3), Gauge::new(-1));
        assert_eq!(Gauge::new(6) * Gauge::new(7), Gauge::new(42));
        assert_eq!(Gauge::new(7) / Gauge::new(2), Gauge::new(3));
        assert_eq!(-Gauge::new(9), Gauge::new(-9));
    }

    #[test]
    fn raw_payload_accessors() {
        assert_eq!(Gauge::new(-4).abs(), 4);
        assert_eq!(Gauge::new(-4).signum(), -1);
        assert_eq!(*Gauge::new(11).value(), 11);
        assert_eq!(Gauge::new(11).into_value(), 11);
    }

    #[test]
    fn try_wrap_requires_a_payload() {
        assert_eq!(Gauge::try_wrap(Some(5)), Ok(Gauge::new(5)));

        let err = Gauge::try_wrap(None).unwrap_err();
        assert_eq!(
            err,
            Error::MissingPayload {
                type_name: "Gauge"
            }
        );
        assert_eq!(err.to_string(), "Gauge requires a payload");
    }

    #[test]
    fn display_uses_the_base_type_name() {
        assert_eq!(Gauge::new(3).to_string(), "Gauge(3)");
        assert_eq!(Gauge::new(-12).to_string(), "Gauge(-12)");
    }

    #[test]
    fn folds_see_the_payload_exactly_once() {
        assert_eq!(Gauge::new(6).fold(10, |state, v| state + v), 16);
        assert_eq!(Gauge::new(6).fold_back(10, |state, v| state + v), 16);
        assert_eq!(Gauge::new(6).count(), 1);
        assert!(Gauge::new(6).exists(|v| v % 2 == 0));
        assert!(!Gauge::new(6).for_all(|v| v > 100));

        let mut seen = Vec::new();
        Gauge::new(6).iter(|v| seen.push(v));
        assert_eq!(seen, vec![6]);
    }

    #[test]
    fn monadic_surface() {
        assert_eq!(Gauge::new(5).map(|v| v * 2), Gauge::new(10));
        assert_eq!(Gauge::new(5).select(|v| v * 2), Gauge::new(10));
        assert_eq!(Gauge::new(5).bind(|v| Gauge::new(v + 1)), Gauge::new(6));
        assert_eq!(
            Gauge::new(5).select_many(|v| Gauge::new(v * 2), |a, b| a + b),
            Gauge::new(15)
        );
    }

    #[test]
    fn into_iterator_yields_the_single_payload() {
        let collected: Vec<i64> = Gauge::new(8).into_iter().collect();
        assert_eq!(collected, vec![8]);
    }

    #[test]
    fn type_label_strips_path_and_generics() {
        assert_eq!(type_label::<Gauge>(), "Gauge");
        assert_eq!(type_label::<Vec<i64>>(), "Vec");
        assert_eq!(type_label::<Option<Vec<f64>>>(), "Option");
    }
}
