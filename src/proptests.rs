use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::{BTreeSet, HashMap};

fn validate_autocomplete(ac: &AutocompleteSystem) {
    let mut history: Vec<(String, u32)> = ac.history().map(|(s, c)| (s.to_string(), c)).collect();
    history.sort();
    assert!(
        history.iter().all(|&(_, c)| c > 0),
        "history counts must be positive"
    );

    let indexed: Vec<(String, u32)> = ac.index().iter().collect();
    assert_eq!(indexed, history, "index terminals must mirror history");
    assert_eq!(ac.index().len(), ac.len());
}

fn expected_top3(history: &HashMap<String, u32>, prefix: &str) -> Vec<String> {
    let mut matches: Vec<Suggestion> = history
        .iter()
        .filter(|(s, _)| s.starts_with(prefix))
        .map(|(s, &f)| Suggestion::new(s.clone(), f))
        .collect();
    matches.sort();
    matches.into_iter().take(3).map(|s| s.text).collect()
}

fn keystroke_strategy() -> impl Strategy<Value = char> {
    // A tiny alphabet keeps prefixes colliding so rankings are exercised.
    prop_oneof![
        12 => prop::sample::select(vec!['a', 'b', 'c', ' ']),
        4 => Just('#'),
        1 => Just('X'),
    ]
}

fn seeds_strategy() -> impl Strategy<Value = Vec<(String, u32)>> {
    prop::collection::vec(("[abc ]{0,6}", 1u32..10), 0..=20)
}

#[derive(Clone, Copy, Debug, Arbitrary)]
enum PoolOp {
    Get,
    Check(#[proptest(strategy = "-2i32..40")] i32),
    Release(#[proptest(strategy = "-2i32..40")] i32),
}

/// Direct transcription of the pool rules over ordered sets.
struct PoolModel {
    capacity: i32,
    high_water: i32,
    released: BTreeSet<i32>,
}

impl PoolModel {
    fn check(&self, id: i32) -> bool {
        (0..self.capacity).contains(&id) && (id >= self.high_water || self.released.contains(&id))
    }

    fn get(&mut self) -> i32 {
        if let Some(id) = self.released.pop_first() {
            id
        } else if self.high_water < self.capacity {
            self.high_water += 1;
            self.high_water - 1
        } else {
            -1
        }
    }

    fn release(&mut self, id: i32) {
        if (0..self.capacity).contains(&id) && !self.check(id) {
            self.released.insert(id);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_autocomplete_matches_model(
        seeds in seeds_strategy(),
        keys in prop::collection::vec(keystroke_strategy(), 0..=300),
    ) {
        let sentences: Vec<&str> = seeds.iter().map(|(s, _)| s.as_str()).collect();
        let times: Vec<u32> = seeds.iter().map(|&(_, t)| t).collect();
        let mut ac = AutocompleteSystem::new(&sentences, &times);

        let mut history: HashMap<String, u32> = HashMap::new();
        for (s, t) in &seeds {
            history.insert(s.clone(), *t);
        }
        let mut pending = String::new();

        for c in keys {
            let before = ac.frequency(&pending);
            let got = ac.input(c);
            match c {
                '#' => {
                    prop_assert!(got.is_empty());
                    let count = history.entry(std::mem::take(&mut pending)).or_insert(0);
                    *count += 1;
                    prop_assert_eq!(ac.pending(), "");
                }
                'X' => {
                    prop_assert!(got.is_empty());
                    prop_assert_eq!(ac.frequency(&pending), before);
                }
                _ => {
                    pending.push(c);
                    prop_assert!(got.len() <= 3);
                    for s in &got {
                        prop_assert!(s.starts_with(&pending));
                    }
                    prop_assert_eq!(&got, &expected_top3(&history, &pending));
                }
            }
            prop_assert_eq!(ac.pending(), pending.as_str());
            prop_assert_eq!(ac.len(), history.len());
        }

        validate_autocomplete(&ac);
        for (s, &count) in &history {
            prop_assert_eq!(ac.frequency(s), Some(count));
        }
    }

    #[test]
    fn prop_suggest_matches_model(
        seeds in seeds_strategy(),
        prefix in "[abc ]{0,3}",
    ) {
        let sentences: Vec<&str> = seeds.iter().map(|(s, _)| s.as_str()).collect();
        let times: Vec<u32> = seeds.iter().map(|&(_, t)| t).collect();
        let ac = AutocompleteSystem::new(&sentences, &times);

        let history: HashMap<String, u32> = seeds.into_iter().collect();
        prop_assert_eq!(ac.suggest(&prefix), expected_top3(&history, &prefix));
    }

    #[test]
    fn prop_pool_matches_model(
        capacity in 0i32..32,
        ops in prop::collection::vec(any::<PoolOp>(), 0..=500),
    ) {
        let mut dir = PhoneDirectory::new(capacity as usize);
        let mut model = PoolModel {
            capacity,
            high_water: 0,
            released: BTreeSet::new(),
        };
        let mut outstanding: BTreeSet<i32> = BTreeSet::new();

        for op in ops {
            match op {
                PoolOp::Get => {
                    let got = dir.get();
                    prop_assert_eq!(got, model.get());
                    if got != EXHAUSTED {
                        prop_assert!((0..capacity).contains(&got));
                        prop_assert!(outstanding.insert(got), "{} issued twice", got);
                    } else {
                        prop_assert_eq!(outstanding.len(), capacity as usize);
                    }
                }
                PoolOp::Check(id) => {
                    prop_assert_eq!(dir.check(id), model.check(id));
                }
                PoolOp::Release(id) => {
                    let was_available = dir.check(id);
                    dir.release(id);
                    model.release(id);
                    outstanding.remove(&id);
                    if was_available {
                        prop_assert_eq!(dir.check(id), was_available);
                    }
                }
            }

            prop_assert_eq!(dir.outstanding(), outstanding.len());
            for id in -1..=capacity {
                prop_assert_eq!(dir.check(id), !outstanding.contains(&id) && (0..capacity).contains(&id));
            }
        }

        prop_assert!(dir.released().map(|id| id as i32).eq(model.released.iter().copied()));
        prop_assert_eq!(dir.high_water_mark() as i32, model.high_water);
    }
}

#[test]
fn exhaustive_release_order_small_pool() {
    // Every release order of a full pool hands the ids back least-first.
    fn permutations(items: &[i32]) -> Vec<Vec<i32>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut out = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(i);
            for mut p in permutations(&rest) {
                p.insert(0, head);
                out.push(p);
            }
        }
        out
    }

    let ids = [0, 1, 2, 3, 4];
    for order in permutations(&ids) {
        let mut dir = PhoneDirectory::new(ids.len());
        for _ in ids {
            dir.get();
        }
        for &id in &order {
            dir.release(id);
        }
        let reissued: Vec<i32> = (0..ids.len()).map(|_| dir.get()).collect();
        assert_eq!(reissued, ids.to_vec(), "release order {order:?}");
        assert_eq!(dir.get(), EXHAUSTED);
    }
}
