use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use crate::core::types::DocId;

/// Routes a key to one of `buckets` shards. Keys are reinterpreted as
/// unsigned first so negative ids land in a well-defined shard.
pub trait ShardKey: Copy + Ord {
    fn shard_index(self, buckets: usize) -> usize;
}

macro_rules! impl_shard_key {
    ($($t:ty),*) => {$(
        impl ShardKey for $t {
            fn shard_index(self, buckets: usize) -> usize {
                (self as u64 % buckets as u64) as usize
            }
        }
    )*};
}

impl_shard_key!(i32, i64, u32, u64, usize);

impl ShardKey for DocId {
    fn shard_index(self, buckets: usize) -> usize {
        self.0.shard_index(buckets)
    }
}

#[derive(Debug, Default)]
struct Shard<K, V> {
    map: Mutex<BTreeMap<K, V>>,
}

/// Integer-keyed map sharded N ways for contended concurrent writes. The
/// parallel ranker uses it to accumulate per-document relevance without a
/// single global lock.
#[derive(Debug)]
pub struct ConcurrentMap<K, V> {
    shards: Vec<Shard<K, V>>,
}

/// Scoped write access to one value. The owning shard stays locked until
/// the guard drops, so at most one access per shard may be live at a time;
/// guards on different shards are independent.
pub struct ValueGuard<'a, V> {
    value: MappedMutexGuard<'a, V>,
}

impl<V> Deref for ValueGuard<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.value
    }
}

impl<V> DerefMut for ValueGuard<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        &mut self.value
    }
}

impl<K: ShardKey, V> ConcurrentMap<K, V> {
    /// Creates `bucket_count` independent (mutex, map) shards.
    pub fn new(bucket_count: usize) -> Self {
        assert!(bucket_count > 0, "bucket count must be positive");
        ConcurrentMap {
            shards: (0..bucket_count)
                .map(|_| Shard {
                    map: Mutex::new(BTreeMap::new()),
                })
                .collect(),
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.shards.len()
    }

    /// Write access to the value under `key`, default-inserting it first.
    pub fn get_or_insert(&self, key: K) -> ValueGuard<'_, V>
    where
        V: Default,
    {
        let shard = &self.shards[key.shard_index(self.shards.len())];
        ValueGuard {
            value: MutexGuard::map(shard.map.lock(), |map| map.entry(key).or_default()),
        }
    }

    /// Removes `key`, locking only its shard. Returns the number of erased
    /// entries.
    pub fn erase(&self, key: K) -> usize {
        let shard = &self.shards[key.shard_index(self.shards.len())];
        let mut map = shard.map.lock();
        usize::from(map.remove(&key).is_some())
    }

    /// Locks the shards in order and merges their contents into one ordered
    /// map, leaving the shards empty. The caller must hold no [`ValueGuard`]
    /// when draining.
    pub fn drain(&self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for shard in &self.shards {
            let mut map = shard.map.lock();
            merged.append(&mut map);
        }
        merged
    }
}
