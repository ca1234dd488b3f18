#![cfg(test)]

// Property tests for HashMap kept inside the crate so they can check the
// table's structural invariants after every step.

use crate::comparer::{DefaultComparer, KeyComparer};
use crate::hash_map::HashMap;
use crate::primes::is_prime;
use hashbrown::HashMap as ModelMap;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations so shrinking moves toward earlier keys and
// shorter op lists.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Mutate(usize, i32),
    Iterate,
    Rehash,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idx = 0..pool.len();
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            3 => idx.clone().prop_map(Op::Remove),
            3 => idx.clone().prop_map(Op::Get),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
            1 => Just(Op::Iterate),
            1 => Just(Op::Rehash),
            1 => Just(Op::Clear),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Runs one scenario against the map under test and a hashbrown model.
// Invariants exercised after every op:
// - insert returns the previous value exactly when the model had one.
// - get/remove agree with the model; len/is_empty parity.
// - iteration yields each live key exactly once.
// - chains, free list and counters are consistent; table size is prime and
//   never shrinks.
fn run_scenario<C>(mut sut: HashMap<String, i32, C>, pool: &[String], ops: Vec<Op>) -> Result<(), TestCaseError>
where
    C: KeyComparer<String>,
{
    let mut model: ModelMap<String, i32> = ModelMap::new();
    let mut last_capacity = sut.capacity();

    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let k = pool[i].clone();
                let prev = sut.insert(k.clone(), v).expect("table can grow");
                prop_assert_eq!(prev, model.insert(k, v));
            }
            Op::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
                prop_assert!(!sut.contains_key(k));
            }
            Op::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
                prop_assert_eq!(sut.contains_key(k), model.contains_key(k));
            }
            Op::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.get_mut(k) {
                    *v = v.wrapping_add(d);
                    let mv = model.get_mut(k).expect("present in model");
                    *mv = mv.wrapping_add(d);
                } else {
                    prop_assert!(!model.contains_key(k));
                }
            }
            Op::Iterate => {
                let keys: Vec<&String> = sut.keys().collect();
                let unique: BTreeSet<&String> = keys.iter().copied().collect();
                prop_assert_eq!(keys.len(), unique.len(), "iteration repeated a key");
                let m_keys: BTreeSet<&String> = model.keys().collect();
                prop_assert_eq!(unique, m_keys);
            }
            Op::Rehash => sut.rehash(),
            Op::Clear => {
                sut.clear();
                model.clear();
            }
        }

        sut.check_invariants();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.capacity() >= last_capacity, "table shrank");
        if sut.capacity() > 0 {
            prop_assert!(is_prime(sut.capacity()));
        }
        last_capacity = sut.capacity();
    }

    for (k, v) in &model {
        prop_assert_eq!(sut.get(k), Some(v));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(HashMap::new(), &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_presized((pool, ops) in arb_scenario(), cap in 1usize..40) {
        run_scenario(HashMap::with_capacity(cap), &pool, ops)?;
    }
}

// Collision variant using a constant hasher: every key shares one chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: same invariants under worst-case collisions, stressing chain
// splicing on removal and chain rebuilding on growth.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut: HashMap<String, i32, DefaultComparer<ConstBuildHasher>> =
            HashMap::with_comparer(DefaultComparer::with_hasher(ConstBuildHasher));
        run_scenario(sut, &pool, ops)?;
    }
}

proptest! {
    // Property: n distinct inserts give len n; the same key n times gives 1.
    #[test]
    fn prop_distinct_and_repeated_counts(n in 1usize..300) {
        let mut distinct: HashMap<usize, usize> = HashMap::new();
        let mut repeated: HashMap<usize, usize> = HashMap::new();
        for i in 0..n {
            distinct.insert(i, i).unwrap();
            repeated.insert(42, i).unwrap();
        }
        prop_assert_eq!(distinct.len(), n);
        prop_assert_eq!(repeated.len(), 1);
        prop_assert_eq!(repeated.get(&42), Some(&(n - 1)));
        distinct.check_invariants();
    }
}
