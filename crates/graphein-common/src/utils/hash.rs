//! Fast hashing with FxHash (non-cryptographic).
//!
//! The engine hashes vertex values and edge keys on every adjacency lookup,
//! so the default SipHash is a measurable cost. These aliases use a fixed
//! (non-randomized) fast hasher, which also keeps map iteration stable for
//! a given insertion sequence.

use std::hash::BuildHasherDefault;

pub use ahash::AHasher as FxHasher;

/// Hash map using the fast non-cryptographic hasher.
pub type FxHashMap<K, V> = hashbrown::HashMap<K, V, BuildHasherDefault<FxHasher>>;

/// Hash set using the fast non-cryptographic hasher.
pub type FxHashSet<T> = hashbrown::HashSet<T, BuildHasherDefault<FxHasher>>;

/// Insertion-ordered map using the fast non-cryptographic hasher.
pub type FxIndexMap<K, V> = indexmap::IndexMap<K, V, BuildHasherDefault<FxHasher>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fx_map_roundtrip() {
        let mut map: FxHashMap<&str, u32> = FxHashMap::default();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_index_map_preserves_insertion_order() {
        let mut map: FxIndexMap<u32, u32> = FxIndexMap::default();
        for i in 0..16 {
            map.insert(i, i * 10);
        }
        let keys: Vec<u32> = map.keys().copied().collect();
        assert_eq!(keys, (0..16).collect::<Vec<u32>>());
    }
}
