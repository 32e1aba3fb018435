//! Property tests for search path list editing.

use proptest::prelude::*;

use rubicon::infrastructure::MemoryFs;
use rubicon::{PathList, PathListError};

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Remove(usize),
    Move(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    // a small alphabet so duplicates come up often
    prop_oneof![
        "[abc]{1,2}".prop_map(Op::Add),
        (0usize..6).prop_map(Op::Remove),
        (0usize..6, 0usize..6).prop_map(|(from, to)| Op::Move(from, to)),
    ]
}

fn apply_to_model(model: &mut Vec<String>, op: &Op) {
    match op {
        Op::Add(raw) => {
            if !model.contains(raw) {
                model.push(raw.clone());
            }
        }
        Op::Remove(index) => {
            if *index < model.len() {
                model.remove(*index);
            }
        }
        Op::Move(from, to) => {
            if *from < model.len() && *to < model.len() {
                let item = model.remove(*from);
                model.insert(*to, item);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Any sequence of edits leaves the list in the same order as a
    /// plain Vec model, with no entry lost or duplicated.
    #[test]
    fn property_edits_match_vec_model(ops in proptest::collection::vec(op(), 0..40)) {
        let fs = MemoryFs::new();
        let mut list = PathList::new().with_base_dir("/project");
        let mut model: Vec<String> = Vec::new();

        for op in &ops {
            let result = match op {
                Op::Add(raw) => list.add(raw.clone(), &fs),
                Op::Remove(index) => list.remove(*index).map(|_| ()),
                Op::Move(from, to) => list.move_entry(*from, *to),
            };
            let len_before = model.len();
            apply_to_model(&mut model, op);

            match result {
                Ok(()) => {}
                Err(PathListError::DuplicateEntry { .. }) => {
                    prop_assert_eq!(model.len(), len_before)
                }
                Err(PathListError::IndexOutOfRange { len, .. }) => prop_assert_eq!(len, len_before),
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
            prop_assert_eq!(list.to_serializable(), model.clone());
        }
    }

    /// PROPERTY: Adding a path that is already present is rejected and leaves
    /// the list unchanged.
    #[test]
    fn property_duplicate_add_rejected(
        paths in proptest::collection::btree_set("[a-z]{1,8}", 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let fs = MemoryFs::new();
        let mut list = PathList::new();
        for path in &paths {
            list.add(path.clone(), &fs).unwrap();
        }
        let before = list.clone();
        let existing: Vec<&String> = paths.iter().collect();
        let index = pick.index(existing.len());

        let err = list.add(existing[index].clone(), &fs).unwrap_err();
        prop_assert_eq!(
            err,
            PathListError::DuplicateEntry { path: existing[index].clone(), existing: index }
        );
        prop_assert_eq!(list, before);
    }

    /// PROPERTY: Persisting and reloading keeps the raw strings and their order.
    #[test]
    fn property_serializable_round_trip(
        paths in proptest::collection::btree_set("[a-z]{1,6}(/[a-z]{1,6}){0,2}", 0..10),
    ) {
        let fs = MemoryFs::new();
        let mut list = PathList::new();
        for path in &paths {
            list.add(path.clone(), &fs).unwrap();
        }

        let (reloaded, dropped) = PathList::from_serializable(list.to_serializable());
        prop_assert!(dropped.is_empty());
        prop_assert_eq!(reloaded, list);
    }
}
