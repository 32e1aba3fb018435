//! Property tests for toolchain version ordering.

use std::cmp::Ordering;

use proptest::prelude::*;

use rubicon::domain::entities::CatalogSnapshot;
use rubicon::domain::value_objects::{compare_versions, ToolchainVersion};

fn version_id() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("ruby-"), Just("jruby-"), Just("")],
        0u32..4,
        0u32..12,
        0u32..12,
        prop_oneof![Just(""), Just("-preview1"), Just("-rc2")],
    )
        .prop_map(|(prefix, major, minor, patch, suffix)| {
            format!("{}{}.{}.{}{}", prefix, major, minor, patch, suffix)
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Comparison never panics, whatever the input.
    #[test]
    fn property_compare_never_panics(a in "(?s).{0,64}", b in "(?s).{0,64}") {
        let _ = compare_versions(&a, &b);
    }

    /// PROPERTY: Every string compares equal to itself.
    #[test]
    fn property_compare_is_reflexive(a in "(?s).{0,64}") {
        prop_assert_eq!(compare_versions(&a, &a), Ordering::Equal);
    }

    /// PROPERTY: Swapping the operands reverses the result.
    #[test]
    fn property_compare_is_antisymmetric(a in "(?s).{0,32}", b in "(?s).{0,32}") {
        prop_assert_eq!(compare_versions(&a, &b), compare_versions(&b, &a).reverse());
    }

    /// PROPERTY: Numeric segments compare as numbers, not text.
    #[test]
    fn property_numeric_segments(major in 0u32..10, minor in 0u32..50, patch in 0u32..50) {
        let lower = format!("{}.{}.{}", major, minor, patch);
        let higher = format!("{}.{}.{}", major, minor + 1, 0);
        prop_assert_eq!(compare_versions(&lower, &higher), Ordering::Less);
    }

    /// PROPERTY: Catalog order does not depend on scan order.
    #[test]
    fn property_catalog_order_is_scan_order_independent(
        ids in proptest::collection::btree_set(version_id(), 0..12)
            .prop_map(|ids| ids.into_iter().collect::<Vec<_>>())
            .prop_shuffle(),
    ) {
        let versions: Vec<ToolchainVersion> = ids
            .iter()
            .map(|id| ToolchainVersion::new(id.as_str(), id.as_str(), format!("/rubies/{}", id)))
            .collect();
        let mut reversed = versions.clone();
        reversed.reverse();

        let forward = CatalogSnapshot::from_scan(versions);
        let backward = CatalogSnapshot::from_scan(reversed);
        let forward_ids: Vec<&str> = forward.versions().iter().map(|v| v.id().as_str()).collect();
        let backward_ids: Vec<&str> = backward.versions().iter().map(|v| v.id().as_str()).collect();
        prop_assert_eq!(&forward_ids, &backward_ids);

        for pair in forward.versions().windows(2) {
            prop_assert_ne!(pair[0].catalog_cmp(&pair[1]), Ordering::Greater);
        }
    }
}

#[test]
fn minor_ten_sorts_after_minor_nine() {
    assert_eq!(compare_versions("3.10.0", "3.9.1"), Ordering::Greater);
    assert_eq!(compare_versions("ruby-3.10.0", "ruby-3.9.1"), Ordering::Greater);
}

#[test]
fn preview_sorts_before_release() {
    assert_eq!(compare_versions("3.3.0-preview1", "3.3.0"), Ordering::Less);
}
