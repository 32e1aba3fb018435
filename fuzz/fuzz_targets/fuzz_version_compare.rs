#![no_main]

use libfuzzer_sys::fuzz_target;
use rubicon::domain::value_objects::compare_versions;

fuzz_target!(|data: (&str, &str)| {
    let (a, b) = data;
    assert_eq!(compare_versions(a, b), compare_versions(b, a).reverse());
});
