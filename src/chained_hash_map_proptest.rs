#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can check
// bucket placement and other private invariants after every step.

use crate::chained_hash_map::ChainedHashMap;
use crate::config::{MapConfig, MIN_LOAD_FACTOR};
use crate::error::InvalidArgument;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Key whose hash depends only on its first byte, so distinct keys pile up
// in a handful of chains.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
struct Clumped(String);
impl Hash for Clumped {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.bytes().next().hash(state);
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    InsertAbsent(i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=40).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            8 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            1 => any::<i32>().prop_map(OpI::InsertAbsent),
            3 => idx.clone().prop_map(OpI::Remove),
            3 => idx.clone().prop_map(OpI::Get),
            2 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn arb_config() -> impl Strategy<Value = MapConfig> {
    (1usize..=64, prop_oneof![Just(0.75), Just(MIN_LOAD_FACTOR), MIN_LOAD_FACTOR..=1.0f64])
        .prop_map(|(cap, lf)| MapConfig::new().initial_capacity(cap).load_factor(lf))
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `insert` returns the previous value exactly when the model had one.
// - `get`/`contains_key` parity with the model, including borrowed `&str` lookup.
// - `remove` returns the model's value, and removing a missing key keeps `len`.
// - absent keys are rejected without changing the map.
// - `iter` yields each live entry exactly once.
// - After every op: entries sit in their hash's bucket, `len` matches the
//   bucket totals and the model, capacity is a power of two that never
//   shrinks, and `len / capacity` is under the load factor.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), config in arb_config()) {
        let mut sut: ChainedHashMap<Key, i32> = ChainedHashMap::with_config(config).unwrap();
        let mut model: HashMap<Key, i32> = HashMap::new();
        let mut last_capacity = sut.capacity();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = Key(pool[i].clone());
                    prop_assert_eq!(sut.insert(k.clone(), v), model.insert(k, v));
                }
                OpI::InsertAbsent(v) => {
                    let before = sut.len();
                    prop_assert_eq!(sut.try_insert(None, v), Err(InvalidArgument::AbsentKey));
                    prop_assert_eq!(sut.len(), before);
                }
                OpI::Remove(i) => {
                    let k = Key(pool[i].clone());
                    prop_assert_eq!(sut.remove(&k), model.remove(&k));
                    prop_assert!(sut.get(&k).is_none());
                }
                OpI::Get(i) => {
                    let k = Key(pool[i].clone());
                    prop_assert_eq!(sut.get(&k), model.get(&k));
                    prop_assert_eq!(sut.get(pool[i].as_str()), model.get(&k));
                }
                OpI::Contains(s) => {
                    let has_model = model.keys().any(|k| k.0 == s);
                    prop_assert_eq!(sut.contains_key(s.as_str()), has_model);
                }
                OpI::Mutate(i, d) => {
                    let k = Key(pool[i].clone());
                    match (sut.get_mut(&k), model.get_mut(&k)) {
                        (Some(sv), Some(mv)) => {
                            *sv = sv.saturating_add(d);
                            *mv = mv.saturating_add(d);
                        }
                        (None, None) => {}
                        (s, m) => prop_assert!(false, "get_mut mismatch: {:?} vs {:?}", s, m),
                    }
                }
                OpI::Iterate => {
                    let s_items: BTreeSet<_> = sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    let m_items: BTreeSet<_> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    prop_assert_eq!(sut.iter().count(), sut.len());
                    prop_assert_eq!(s_items, m_items);
                }
                OpI::Clear => {
                    sut.clear();
                    model.clear();
                }
            }

            sut.check_invariants();
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert!(sut.capacity() >= last_capacity, "capacity shrank");
            last_capacity = sut.capacity();
        }
    }
}

// Property: with hashes concentrated on a few values, chains grow long and
// every resize moves them wholesale; contents still match the model.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_clumped_hashes_match_model(
        ops in proptest::collection::vec(("[a-c][a-z]{0,3}", any::<u8>(), any::<bool>()), 1..200)
    ) {
        let mut sut: ChainedHashMap<Clumped, u8> = ChainedHashMap::new();
        let mut model: HashMap<String, u8> = HashMap::new();

        for (k, v, is_insert) in ops {
            if is_insert {
                prop_assert_eq!(sut.insert(Clumped(k.clone()), v), model.insert(k, v));
            } else {
                prop_assert_eq!(sut.remove(&Clumped(k.clone())), model.remove(&k));
            }
            sut.check_invariants();
        }

        prop_assert_eq!(sut.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(sut.get(&Clumped(k.clone())), Some(v));
        }
    }
}
