use std::hash::BuildHasherDefault;
use std::sync::atomic::{AtomicU64, Ordering};

use wyhash::WyHash;

pub type VarId = usize;
pub type NodeId = usize;
pub type OrderIndex = usize;
pub type FactoryId = u64;

pub type DdHashMap<K, V> = hashbrown::HashMap<K, V, BuildHasherDefault<WyHash>>;
pub type DdHashSet<T> = hashbrown::HashSet<T, BuildHasherDefault<WyHash>>;

static NEXT_FACTORY_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique id for a manager instance. Handles carry the id of the
/// manager that created them, so presenting a handle to a foreign manager
/// is a single equality check.
pub fn fresh_factory_id() -> FactoryId {
    NEXT_FACTORY_ID.fetch_add(1, Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_ids_are_unique() {
        let a = fresh_factory_id();
        let b = fresh_factory_id();
        assert_ne!(a, b);
    }
}
