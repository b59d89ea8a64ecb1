// Fast insecure non-cryptographic hash, plus a small exact-LRU map for
// the cross-set cache.

pub struct FastHasher(u64);

impl std::hash::Hasher for FastHasher {
    fn finish(&self) -> u64 {
        self.0
    }
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (std::num::Wrapping(self.0) * std::num::Wrapping(3467)).0 ^ (!b as u64);
        }
    }
}

impl Default for FastHasher {
    fn default() -> FastHasher {
        FastHasher(0)
    }
}

pub type FastHasherDefault = std::hash::BuildHasherDefault<FastHasher>;
pub type FastHashMap<K, V> = std::collections::HashMap<K, V, FastHasherDefault>;
pub type FastHashSet<T> = std::collections::HashSet<T, FastHasherDefault>;

// Bounded map with least-recently-used eviction. Entries carry an access
// stamp; eviction scans for the smallest stamp. The scan is linear in
// capacity, which is cheap next to the lookups this cache front-ends.
pub struct LruCache<K, V> {
    map: FastHashMap<K, (V, u64)>,
    capacity: usize,
    clock: u64,
}

impl<K: std::hash::Hash + Eq + Clone, V: Clone> LruCache<K, V> {
    pub fn new(capacity: usize) -> LruCache<K, V> {
        LruCache {
            map: FastHashMap::default(),
            capacity: capacity.max(1),
            clock: 0,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&mut self, key: &K) -> Option<V> {
        self.clock += 1;
        let clock = self.clock;
        self.map.get_mut(key).map(|entry| {
            entry.1 = clock;
            entry.0.clone()
        })
    }

    // Overwrite-allowed: concurrent computations of the same key may both
    // insert, the value is a pure function of the key.
    pub fn put(&mut self, key: K, value: V) {
        self.clock += 1;
        if self.map.len() >= self.capacity && !self.map.contains_key(&key) {
            if let Some(oldest) = self
                .map
                .iter()
                .min_by_key(|(_, (_, stamp))| *stamp)
                .map(|(k, _)| k.clone())
            {
                self.map.remove(&oldest);
            }
        }
        self.map.insert(key, (value, self.clock));
    }
}
