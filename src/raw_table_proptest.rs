#![cfg(test)]

// Property tests for RawTable kept inside the crate so they do not require
// the bench_internal feature to reach the structural layer.

use crate::error::InsertError;
use crate::raw_table::RawTable;
use core::hash::{BuildHasher, Hasher};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Upsert(usize, i32),
    Remove(usize),
    Get(usize),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    let pool = proptest::collection::vec("[a-z]{0,4}", 1..=12);
    (1usize..=8, pool).prop_flat_map(|(capacity, pool)| {
        let idx = 0..pool.len();
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Upsert(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.prop_map(OpI::Get),
            1 => Just(OpI::Iterate),
        ];
        let ops = proptest::collection::vec(op, 1..80);
        ops.prop_map(move |ops| (capacity, pool.clone(), ops))
    })
}

#[derive(Clone, Copy, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> ConstHasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Drives `sut` and a HashMap model through the same ops.
// Invariants exercised after every step:
// - `upsert` returns the replaced payload for present keys, `None` for fresh
//   ones, and `Full` exactly when the key is absent and every slot is taken.
// - `remove` returns the model's payload; the key is absent afterwards.
// - `get`/`find` parity with the model, and `find` resolves via `entry_at`.
// - `iter` yields each live key exactly once; `len` matches the model.
fn run_model<S: BuildHasher>(
    mut sut: RawTable<i32, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let capacity = sut.capacity();
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Upsert(i, v) => {
                let k = &pool[i];
                let expected = if let Some(&old) = model.get(k) {
                    Ok(Some(old))
                } else if model.len() == capacity {
                    Err(InsertError::Full { capacity })
                } else {
                    Ok(None)
                };
                let got = sut.upsert(k, v);
                prop_assert_eq!(got, expected);
                if got.is_ok() {
                    model.insert(k.clone(), v);
                }
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
                prop_assert!(sut.get(k).is_none());
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
                match sut.find(k) {
                    Some(h) => {
                        let (sk, sv) = sut.entry_at(h).expect("found slot is occupied");
                        prop_assert_eq!(sk, k.as_str());
                        prop_assert_eq!(Some(sv), model.get(k));
                    }
                    None => prop_assert!(!model.contains_key(k)),
                }
            }
            OpI::Iterate => {
                let s_keys: Vec<&str> = sut.iter().map(|(_, k, _)| k).collect();
                let unique: BTreeSet<&str> = s_keys.iter().copied().collect();
                prop_assert_eq!(unique.len(), s_keys.len(), "key stored twice");
                let m_keys: BTreeSet<&str> = model.keys().map(String::as_str).collect();
                prop_assert_eq!(unique, m_keys);
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn prop_state_machine_fnv((capacity, pool, ops) in arb_scenario()) {
        run_model(RawTable::with_capacity(capacity), &pool, ops)?;
    }

    // Every key shares one home slot, so each op walks a single long chain
    // full of tombstones.
    #[test]
    fn prop_state_machine_single_chain((capacity, pool, ops) in arb_scenario()) {
        run_model(RawTable::with_capacity_and_hasher(capacity, ConstBuildHasher), &pool, ops)?;
    }
}
