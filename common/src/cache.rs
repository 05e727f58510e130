use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};

use wyhash::WyHash;

/// Fixed-capacity direct-mapped operation cache.
///
/// Each key hashes to exactly one slot and a colliding insert silently
/// evicts the previous entry. The cache is semantically transparent: `get`
/// may answer `None` for any key, and callers never depend on a hit for
/// correctness. A capacity of zero turns every operation into a no-op.
#[derive(Debug)]
pub struct OpCache<K, V> {
    slots: Vec<Option<(K, V)>>,
    hasher: BuildHasherDefault<WyHash>,
}

impl<K: Hash + Eq, V: Clone> OpCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::new();
        slots.resize_with(capacity, || None);
        Self {
            slots,
            hasher: BuildHasherDefault::default(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots. Linear in the capacity; meant for
    /// statistics, not hot paths.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }

    fn slot_of(&self, key: &K) -> usize {
        let mut h = self.hasher.build_hasher();
        key.hash(&mut h);
        (h.finish() as usize) % self.slots.len()
    }

    pub fn get(&self, key: &K) -> Option<V> {
        if self.slots.is_empty() {
            return None;
        }
        match &self.slots[self.slot_of(key)] {
            Some((k, v)) if k == key => Some(v.clone()),
            _ => None,
        }
    }

    pub fn put(&mut self, key: K, value: V) {
        if self.slots.is_empty() {
            return;
        }
        let slot = self.slot_of(&key);
        self.slots[slot] = Some((key, value));
    }

    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
    }
}
