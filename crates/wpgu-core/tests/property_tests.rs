use proptest::prelude::*;
use std::cmp::Ordering;

use wpgu_core::version::{Operator, compare, version_cmp};

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,3}",
        Just("0".to_string()),
        Just("dev".to_string()),
        Just("alpha".to_string()),
        Just("beta".to_string()),
        Just("RC".to_string()),
        Just("pl".to_string()),
    ]
}

fn dotted_version() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..6).prop_map(|segments| segments.join("."))
}

proptest! {
    #[test]
    fn ordering_is_antisymmetric(a in "[0-9a-zA-Z.+_ -]{0,16}", b in "[0-9a-zA-Z.+_ -]{0,16}") {
        prop_assert_eq!(compare(&a, &b, Operator::Lt), compare(&b, &a, Operator::Gt));
        prop_assert_eq!(compare(&a, &b, Operator::Eq), compare(&b, &a, Operator::Eq));
        prop_assert_eq!(version_cmp(&a, &b), version_cmp(&b, &a).reverse());
    }

    #[test]
    fn arbitrary_text_never_panics(a in "\\PC*", b in "\\PC*") {
        prop_assert_eq!(version_cmp(&a, &b), version_cmp(&b, &a).reverse());
    }

    #[test]
    fn every_version_equals_itself(a in "\\PC*") {
        prop_assert!(compare(&a, &a, Operator::Eq));
    }

    #[test]
    fn numeric_chains_are_ordered(major in 0u32..1000, minor in 0u32..1000, patch in 0u32..1000) {
        let lower = format!("{major}.{minor}.{patch}");
        let higher = format!("{major}.{minor}.{}", patch + 1);
        prop_assert!(compare(&lower, &higher, Operator::Lt));
        prop_assert!(compare(&higher, &lower, Operator::Gt));
    }

    #[test]
    fn zero_padding_orders_like_the_unpadded_version(
        a in dotted_version(),
        c in dotted_version(),
        zeros in 1usize..4,
    ) {
        let padded = format!("{a}{}", ".0".repeat(zeros));
        prop_assert_eq!(version_cmp(&a, &padded), Ordering::Equal);
        prop_assert_eq!(version_cmp(&a, &c), version_cmp(&padded, &c), "{} / {} vs {}", a, padded, c);
    }

    #[test]
    fn equal_versions_order_alike(a in dotted_version(), b in dotted_version(), c in dotted_version()) {
        if version_cmp(&a, &b) == Ordering::Equal {
            prop_assert_eq!(version_cmp(&a, &c), version_cmp(&b, &c));
        }
    }
}
