use proptest::prelude::*;
use witness::TotalOrderFloat;

#[cfg(test)]
use witness::{Error, NewType, NewTypeOps};

witness::newtype! {
    /// Distance in meters; payload arithmetic is untouched IEEE arithmetic.
    #[derive(Debug, Clone, Copy)]
    pub struct Meters(f64);
}

witness::newtype! {
    /// Temperature reading. NaN readings sort deterministically under the
    /// IEEE total order instead of poisoning every comparison.
    #[derive(Debug, Clone, Copy)]
    pub struct Celsius(f64) over TotalOrderFloat;
}

witness::newtype! {
    /// Integer score. The payload hashes lawfully, so `Hash` passes through.
    #[derive(Debug, Clone, Copy, Eq, Hash)]
    pub struct Score(i64);
}

// finite and small enough that sums and products stay finite
pub fn arb_meters() -> impl Strategy<Value = Meters> {
    (-1.0e9..1.0e9f64).prop_map(Meters::new)
}

// every bit pattern, NaN and infinities included
pub fn arb_celsius() -> impl Strategy<Value = Celsius> {
    any::<u64>().prop_map(|bits| Celsius::new(f64::from_bits(bits)))
}

pub fn arb_score() -> impl Strategy<Value = Score> {
    (-1_000_000i64..1_000_000).prop_map(Score::new)
}

#[test]
fn meters_concrete_scenario() {
    assert_eq!(Meters::new(3.0) + Meters::new(4.0), Meters::new(7.0));
    assert!(Meters::new(3.0) < Meters::new(4.0));
    assert_eq!(Meters::new(3.0).to_string(), "Meters(3)");
    assert_eq!(Meters::new(-2.5).to_string(), "Meters(-2.5)");
}

#[test]
fn wrapper_map_is_same_type_only() {
    assert_eq!(Meters::new(5.0).map(|v| v * 2.0), Meters::new(10.0));
    assert_eq!(Meters::new(5.0).select(|v| v * 2.0), Meters::new(10.0));
}

#[test]
fn bind_flattens_and_select_many_projects() {
    assert_eq!(
        Meters::new(5.0).bind(|v| Meters::new(v + 1.0)),
        Meters::new(6.0)
    );
    assert_eq!(
        Meters::new(5.0).select_many(|v| Meters::new(v * 2.0), |a, b| a + b),
        Meters::new(15.0)
    );
}

#[test]
fn missing_payload_is_rejected_up_front() {
    let wrapped = Meters::try_wrap(Some(2.0)).unwrap();
    assert_eq!(wrapped, Meters::new(2.0));

    let err = Meters::try_wrap(None).unwrap_err();
    assert_eq!(err, Error::MissingPayload { type_name: "Meters" });
    assert_eq!(err.to_string(), "Meters requires a payload");
}

#[test]
fn abs_and_signum_return_raw_payloads() {
    let abs: f64 = Meters::new(-3.0).abs();
    assert_eq!(abs, 3.0);
    let sign: f64 = Meters::new(-3.0).signum();
    assert_eq!(sign, -1.0);

    let abs: i64 = Score::new(-5).abs();
    assert_eq!(abs, 5);
    assert_eq!(Score::new(0).signum(), 0);
}

#[test]
fn single_slot_iteration() {
    let collected: Vec<f64> = Meters::new(1.5).into_iter().collect();
    assert_eq!(collected, vec![1.5]);

    let mut seen = Vec::new();
    Meters::new(1.5).iter(|v| seen.push(v));
    assert_eq!(seen, vec![1.5]);
}

#[test]
fn score_hashes_like_its_payload() {
    let mut scores = std::collections::HashSet::new();
    scores.insert(Score::new(1));
    scores.insert(Score::new(1));
    scores.insert(Score::new(2));
    assert_eq!(scores.len(), 2);
}

// the two float witnesses disagree exactly where IEEE comparison is lawless
#[test]
fn celsius_orders_nan_and_signed_zero() {
    assert!(Celsius::new(f64::NAN) == Celsius::new(f64::NAN));
    assert!(Meters::new(f64::NAN) != Meters::new(f64::NAN));

    assert!(Celsius::new(-0.0) < Celsius::new(0.0));
    assert!(Meters::new(-0.0) == Meters::new(0.0));

    assert!(Celsius::new(f64::INFINITY) < Celsius::new(f64::NAN));
}

#[cfg(test)]
proptest! {
    #[test]
    fn construction_preserves_the_payload(v in -1.0e9..1.0e9f64) {
        prop_assert_eq!(*Meters::new(v).value(), v);
        prop_assert_eq!(Meters::try_wrap(Some(v)).unwrap().into_value(), v);
    }

    #[test]
    fn subtract_agrees_with_adding_the_negation(x in arb_meters(), y in arb_meters()) {
        prop_assert_eq!(x.subtract(y), x.plus(y.negate()));
        prop_assert_eq!(x - y, x + (-y));
    }

    #[test]
    fn negation_round_trips(x in arb_meters()) {
        prop_assert_eq!(-(-x), x);
        prop_assert_eq!(x.negate().negate(), x);
    }

    #[test]
    fn meters_ordering_is_a_trichotomy(x in arb_meters(), y in arb_meters()) {
        let holds = [x < y, x == y, x > y];
        prop_assert_eq!(holds.iter().filter(|&&b| b).count(), 1);
        prop_assert_eq!(x <= y, x < y || x == y);
        prop_assert_eq!(x >= y, x > y || x == y);
    }

    #[test]
    fn fold_applies_the_folder_exactly_once(x in arb_meters(), s0 in -1.0e6..1.0e6f64) {
        let folder = |s: f64, v: f64| s * 0.5 + v;
        prop_assert_eq!(x.fold(s0, folder), folder(s0, *x.value()));
        prop_assert_eq!(x.fold_back(s0, folder), folder(s0, *x.value()));
        prop_assert_eq!(x.count(), 1);
    }

    #[test]
    fn predicates_see_the_payload_once(x in arb_meters()) {
        let mut calls = 0;
        let exists = x.exists(|v| {
            calls += 1;
            v.is_finite()
        });
        prop_assert!(exists);
        prop_assert_eq!(calls, 1);

        let mut calls = 0;
        let for_all = x.for_all(|v| {
            calls += 1;
            v.is_finite()
        });
        prop_assert!(for_all);
        prop_assert_eq!(calls, 1);
    }

    #[test]
    fn operators_match_the_named_methods(x in arb_meters(), y in arb_meters()) {
        prop_assert_eq!(x + y, x.plus(y));
        prop_assert_eq!(x - y, x.subtract(y));
        prop_assert_eq!(x * y, x.product(y));
        prop_assume!(*y.value() != 0.0);
        prop_assert_eq!(x / y, x.divide(y));
    }

    #[test]
    fn product_and_divide_each_do_their_own_job(x in arb_meters(), y in arb_meters()) {
        prop_assert_eq!((x * y).into_value(), x.into_value() * y.into_value());
        prop_assume!(*y.value() != 0.0);
        prop_assert_eq!((x / y).into_value(), x.into_value() / y.into_value());
    }

    #[test]
    fn score_arithmetic_matches_integer_arithmetic(x in arb_score(), y in arb_score()) {
        prop_assert_eq!((x + y).into_value(), x.into_value() + y.into_value());
        prop_assert_eq!((x * y).into_value(), x.into_value() * y.into_value());
        prop_assert_eq!((-x).into_value(), -x.into_value());
        prop_assume!(y.into_value() != 0);
        prop_assert_eq!((x / y).into_value(), x.into_value() / y.into_value());
    }

    #[test]
    fn celsius_total_order_is_a_trichotomy(a in arb_celsius(), b in arb_celsius()) {
        let holds = [a < b, a == b, a > b];
        prop_assert_eq!(holds.iter().filter(|&&h| h).count(), 1);
    }

    #[test]
    fn celsius_equality_is_reflexive(a in arb_celsius()) {
        prop_assert!(a == a);
        prop_assert_eq!(a.compare_to(&a), std::cmp::Ordering::Equal);
    }
}
