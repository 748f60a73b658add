#![cfg(test)]

// Property tests for SlotVec kept inside the crate next to the structural
// layer they exercise.

use crate::errors::CollectorError;
use crate::slot_vec::SlotVec;
use proptest::prelude::*;

// Indices are drawn past the current length on purpose so out-of-bounds
// paths get exercised as often as valid ones.
#[derive(Clone, Debug)]
enum Op {
    Push(i32),
    Remove(usize),
    Replace(usize, i32),
    Get(usize),
    Compact,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        3 => any::<i32>().prop_map(Op::Push),
        2 => (0usize..12).prop_map(Op::Remove),
        1 => (0usize..12, any::<i32>()).prop_map(|(i, v)| Op::Replace(i, v)),
        1 => (0usize..12).prop_map(Op::Get),
        1 => Just(Op::Compact),
    ];
    proptest::collection::vec(op, 1..80)
}

// Property: state-machine equivalence against a `Vec<(value, removed)>`.
// Invariants exercised across random operation sequences:
// - `push` returns the previous length.
// - `remove` flags without shifting; a second remove is rejected.
// - `replace` stores the value and clears the flag.
// - Out-of-bounds calls fail with the current size and change nothing.
// - `compact` keeps survivors in relative order and is idempotent.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in arb_ops()) {
        let mut sut: SlotVec<i32> = SlotVec::new();
        let mut model: Vec<(i32, bool)> = Vec::new();

        for op in ops {
            match op {
                Op::Push(v) => {
                    let i = sut.push(v);
                    prop_assert_eq!(i, model.len());
                    model.push((v, false));
                }
                Op::Remove(i) => match sut.remove(i) {
                    Ok(()) => {
                        prop_assert!(i < model.len());
                        prop_assert!(!model[i].1, "remove must fail on a tombstone");
                        model[i].1 = true;
                    }
                    Err(CollectorError::AlreadyRemoved(j)) => {
                        prop_assert_eq!(i, j);
                        prop_assert!(model[i].1);
                    }
                    Err(CollectorError::OutOfBounds { index, size }) => {
                        prop_assert_eq!(index, i);
                        prop_assert_eq!(size, model.len());
                        prop_assert!(i >= model.len());
                    }
                    Err(e) => prop_assert!(false, "unexpected error: {:?}", e),
                },
                Op::Replace(i, v) => match sut.replace(i, v) {
                    Ok(old) => {
                        prop_assert_eq!(old, model[i].0);
                        model[i] = (v, false);
                    }
                    Err(_) => prop_assert!(i >= model.len()),
                },
                Op::Get(i) => {
                    let got = sut.get(i).ok().copied();
                    prop_assert_eq!(got, model.get(i).map(|s| s.0));
                    let removed = sut.is_removed(i).ok();
                    prop_assert_eq!(removed, model.get(i).map(|s| s.1));
                }
                Op::Compact => {
                    let before = model.len();
                    model.retain(|s| !s.1);
                    prop_assert_eq!(sut.compact(), before - model.len());
                    prop_assert_eq!(sut.compact(), 0);
                }
            }

            // Post-conditions after each op
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(sut.live_count(), model.iter().filter(|s| !s.1).count());
            let live: Vec<(usize, i32)> = sut.iter_live().map(|(i, v)| (i, *v)).collect();
            let expected: Vec<(usize, i32)> = model
                .iter()
                .enumerate()
                .filter(|(_, s)| !s.1)
                .map(|(i, s)| (i, s.0))
                .collect();
            prop_assert_eq!(live, expected);
        }
    }
}
