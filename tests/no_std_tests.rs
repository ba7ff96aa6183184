#![no_std]
extern crate alloc;
extern crate policy_cache;

use alloc::string::String;
use alloc::vec::Vec;
use policy_cache::config::CacheConfig;
use policy_cache::store::{FnStore, Memory};
use policy_cache::{CyclicCache, LfuCache, LruCache, MruCache};

fn memory() -> Memory<String> {
    Memory::new((0..8).map(|n| alloc::format!("word-{n}")).collect())
}

#[test]
fn test_lru_in_no_std() {
    let mut cache = LruCache::init(CacheConfig::new(2), memory());
    assert_eq!(cache.lookup(&1).as_deref(), Ok("word-1"));
    assert_eq!(cache.lookup(&1).as_deref(), Ok("word-1"));
    assert_eq!(cache.hit_count(), 1);
}

#[test]
fn test_mru_in_no_std() {
    let mut cache = MruCache::init(CacheConfig::default(), memory());
    for address in 0..6 {
        cache.lookup(&address).unwrap();
    }
    assert_eq!(cache.len(), 5);
    assert!(!cache.contains(&4));
}

#[test]
fn test_lfu_in_no_std() {
    let mut cache = LfuCache::init(CacheConfig::new(3), memory());
    for address in [0, 0, 1, 2, 3] {
        cache.lookup(&address).unwrap();
    }
    assert!(cache.contains(&0));
    assert!(!cache.contains(&1));
}

#[test]
fn test_cyclic_in_no_std() {
    let mut cache = CyclicCache::init(CacheConfig::new(2), memory());
    for address in 0..3 {
        cache.lookup(&address).unwrap();
    }
    let keys: Vec<usize> = cache.slots().iter().flatten().map(|(k, _)| *k).collect();
    assert_eq!(keys, [2, 1]);
}

#[test]
fn test_fn_store_in_no_std() {
    let store = FnStore::new(|key: &u32| -> Result<u32, ()> { Ok(key * key) });
    let mut cache = LruCache::new(4, store);
    assert_eq!(cache.lookup(&7), Ok(49));
    assert_eq!(cache.lookup(&7), Ok(49));
    assert_eq!(cache.backing_request_count(), 1);
}
