use proptest::prelude::*;

#[cfg(test)]
use witness::{map, map_as, select, Compose, Error, PartiallyApplied};

pub fn arb_vec() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(any::<i32>(), 0..32)
}

pub fn arb_opt() -> impl Strategy<Value = Option<i32>> {
    prop::option::of(any::<i32>())
}

pub fn arb_nested() -> impl Strategy<Value = Vec<Option<i32>>> {
    prop::collection::vec(prop::option::of(any::<i32>()), 0..16)
}

#[test]
fn retyped_map_names_both_shapes_on_mismatch() {
    let err = map_as::<Vec<PartiallyApplied>, Option<i32>, _, _>(vec![1, 2, 3], |n| n + 1)
        .expect_err("a vec cannot be retyped as an option");
    match err {
        Error::ShapeMismatch { expected, actual } => {
            assert!(expected.contains("Option"));
            assert!(actual.contains("Vec"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn tuple_functor_carries_the_first_component() {
    let mapped = map::<(&str, PartiallyApplied), _, _>(("label", 4), |n| n * n);
    assert_eq!(mapped, ("label", 16));
}

#[test]
fn result_error_side_is_untouched() {
    let mut called = false;
    let mapped = map::<Result<PartiallyApplied, &str>, _, _>(Err::<i32, _>("denied"), |n| {
        called = true;
        n + 1
    });
    assert_eq!(mapped, Err("denied"));
    assert!(!called);
}

#[cfg(test)]
proptest! {
    #[test]
    fn identity_law_for_vec(xs in arb_vec()) {
        prop_assert_eq!(map::<Vec<PartiallyApplied>, _, _>(xs.clone(), |x| x), xs);
    }

    #[test]
    fn identity_law_for_option(ox in arb_opt()) {
        prop_assert_eq!(map::<Option<PartiallyApplied>, _, _>(ox, |x| x), ox);
    }

    #[test]
    fn composition_law(xs in arb_vec()) {
        let f = |n: i32| n.wrapping_add(3);
        let g = |n: i32| n.wrapping_mul(2);

        let two_passes = map::<Vec<PartiallyApplied>, _, _>(
            map::<Vec<PartiallyApplied>, _, _>(xs.clone(), f),
            g,
        );
        let one_pass = map::<Vec<PartiallyApplied>, _, _>(xs, move |x| g(f(x)));

        prop_assert_eq!(two_passes, one_pass);
    }

    #[test]
    fn select_is_an_alias_of_map(xs in arb_vec()) {
        prop_assert_eq!(
            select::<Vec<PartiallyApplied>, _, _>(xs.clone(), |n| n.wrapping_sub(1)),
            map::<Vec<PartiallyApplied>, _, _>(xs, |n| n.wrapping_sub(1))
        );
    }

    #[test]
    fn map_visits_each_value_once_in_order(xs in arb_vec()) {
        let mut seen = Vec::new();
        let mapped = map::<Vec<PartiallyApplied>, _, _>(xs.clone(), |n| {
            seen.push(n);
            n
        });
        prop_assert_eq!(&seen, &xs);
        prop_assert_eq!(&mapped, &xs);
    }

    #[test]
    fn retyped_map_accepts_the_natural_shape(xs in arb_vec()) {
        let expected: Vec<i64> = xs.iter().map(|&n| i64::from(n)).collect();
        let retyped: Vec<i64> =
            map_as::<Vec<PartiallyApplied>, _, _, _>(xs, |n| i64::from(n)).unwrap();
        prop_assert_eq!(retyped, expected);
    }

    #[test]
    fn compose_maps_through_both_layers(nested in arb_nested()) {
        let expected: Vec<Option<i64>> =
            nested.iter().map(|o| o.map(|n| i64::from(n) + 1)).collect();
        let mapped = map::<Compose<Vec<PartiallyApplied>, Option<PartiallyApplied>>, _, _>(
            nested,
            |n| i64::from(n) + 1,
        );
        prop_assert_eq!(mapped, expected);
    }
}
