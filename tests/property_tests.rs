//! Property tests: every policy is checked against a straightforward
//! reference model over random address traces.

use policy_cache::store::Memory;
use policy_cache::{Cache, CachePolicy, CyclicCache, LfuCache, LruCache, MruCache, PolicyKind};
use proptest::prelude::*;

const ADDRESSES: usize = 12;

fn memory() -> Memory<usize> {
    Memory::new((0..ADDRESSES).map(|n| n + 1000).collect())
}

fn trace() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..ADDRESSES, 0..200)
}

fn distinct(keys: &[usize]) -> usize {
    let mut keys = keys.to_vec();
    keys.sort_unstable();
    keys.dedup();
    keys.len()
}

/// Recency list, most recent first.
#[derive(Default)]
struct RecencyModel {
    keys: Vec<usize>,
}

impl RecencyModel {
    fn touch(&mut self, key: usize) -> bool {
        match self.keys.iter().position(|&k| k == key) {
            Some(pos) => {
                self.keys.remove(pos);
                self.keys.insert(0, key);
                true
            }
            None => false,
        }
    }
}

/// `(key, frequency, tick at which it reached that frequency)`
#[derive(Default)]
struct FrequencyModel {
    entries: Vec<(usize, usize, usize)>,
    tick: usize,
}

proptest! {
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_lru_matches_reference(capacity in 0usize..6, keys in trace()) {
        let mut cache = LruCache::new(capacity, memory());
        let mut model = RecencyModel::default();

        for key in keys {
            let hit = model.touch(key);
            if !hit && capacity > 0 {
                model.keys.insert(0, key);
                model.keys.truncate(capacity);
            }
            prop_assert_eq!(cache.lookup(&key), Ok(key + 1000));
            prop_assert_eq!(cache.hit_flag(), hit);
            prop_assert_eq!(cache.keys_by_recency().copied().collect::<Vec<_>>(), model.keys.clone());
        }
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_mru_matches_reference(capacity in 0usize..6, keys in trace()) {
        let mut cache = MruCache::new(capacity, memory());
        let mut model = RecencyModel::default();

        for key in keys {
            let hit = model.touch(key);
            if !hit && capacity > 0 {
                if model.keys.len() >= capacity {
                    model.keys.remove(0);
                }
                model.keys.insert(0, key);
            }
            prop_assert_eq!(cache.lookup(&key), Ok(key + 1000));
            prop_assert_eq!(cache.hit_flag(), hit);
            prop_assert_eq!(cache.keys_by_recency().copied().collect::<Vec<_>>(), model.keys.clone());
        }
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_lfu_matches_reference(capacity in 0usize..6, keys in trace()) {
        let mut cache = LfuCache::new(capacity, memory());
        let mut model = FrequencyModel::default();

        for key in keys {
            model.tick += 1;
            let tick = model.tick;
            let hit = match model.entries.iter_mut().find(|(k, _, _)| *k == key) {
                Some(entry) => {
                    entry.1 += 1;
                    entry.2 = tick;
                    true
                }
                None => false,
            };
            if !hit && capacity > 0 {
                if model.entries.len() >= capacity {
                    let victim = model
                        .entries
                        .iter()
                        .enumerate()
                        .min_by_key(|(_, (_, frequency, since))| (*frequency, *since))
                        .map(|(index, _)| index);
                    if let Some(index) = victim {
                        model.entries.remove(index);
                    }
                }
                model.entries.push((key, 1, tick));
            }

            prop_assert_eq!(cache.lookup(&key), Ok(key + 1000));
            prop_assert_eq!(cache.hit_flag(), hit);
            prop_assert_eq!(cache.len(), model.entries.len());
            for &(k, frequency, _) in &model.entries {
                prop_assert_eq!(cache.frequency(&k), Some(frequency));
            }
            let expected_min = model.entries.iter().map(|&(_, frequency, _)| frequency).min();
            prop_assert_eq!(cache.min_frequency(), expected_min);
        }
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_cyclic_matches_reference(capacity in 0usize..6, keys in trace()) {
        let mut cache = CyclicCache::new(capacity, memory());
        let mut slots: Vec<Option<usize>> = vec![None; capacity];
        let mut cursor = 0;

        for key in keys {
            let hit = slots.contains(&Some(key));
            if !hit && capacity > 0 {
                slots[cursor] = Some(key);
                cursor = (cursor + 1) % capacity;
            }
            prop_assert_eq!(cache.lookup(&key), Ok(key + 1000));
            prop_assert_eq!(cache.hit_flag(), hit);
            prop_assert_eq!(cache.cursor(), cursor);
            let actual: Vec<Option<usize>> = cache
                .slots()
                .iter()
                .map(|slot| slot.as_ref().map(|(k, _)| *k))
                .collect();
            prop_assert_eq!(actual, slots.clone());
        }
    }

    /// Counters agree with each other for every policy and any trace.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_counters_are_consistent(capacity in 0usize..6, keys in trace()) {
        for &kind in PolicyKind::all() {
            let mut cache = Cache::new(kind, capacity, memory());
            let mut last_hits = 0;

            for &key in &keys {
                let was_resident = cache.contains(&key);
                cache.lookup(&key).unwrap();
                prop_assert_eq!(cache.hit_flag(), was_resident);
                prop_assert_eq!(cache.hit_count(), last_hits + u64::from(was_resident));
                prop_assert!(cache.len() <= capacity);
                last_hits = cache.hit_count();
            }

            prop_assert_eq!(cache.hit_count() + cache.backing_request_count(), keys.len() as u64);
            prop_assert_eq!(cache.miss_count(), cache.backing_request_count());
            // Every distinct address has to be fetched at least once.
            prop_assert!(cache.backing_request_count() >= distinct(&keys) as u64);
        }
    }
}
