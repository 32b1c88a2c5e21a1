//! Associative containers.
//!
//! [`Map`] holds key/value pairs in a [`MapStorage`] backend hashed with
//! [`KeyHasher`](crate::runtime::hash::KeyHasher). Object keys hash through
//! their own hash code. Looking up an absent key is an error, never a
//! default value.
//!
//! Iteration order is unspecified and differs between backends; only size,
//! membership and per-key lookups agree.

use crate::error::{Error, Result};
use crate::runtime::collections::{Element, Key};
use crate::runtime::collections::storage::MapStorage;
use crate::runtime::dispatch::{Constructor, Method};
use crate::runtime::gc::Gc;
use crate::runtime::hash::{HashCode, combine_hash_codes};
use crate::runtime::object::{Describe, ObjectRef, Reflect};
use crate::runtime::primitive::Int64;
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;

/// Reflectable hash map over the backend `S`.
pub struct Map<K, V, S> {
    entries: RefCell<S>,
    _marker: PhantomData<(K, V)>,
}

impl<K: Key, V: Element, S: MapStorage<K, V>> Map<K, V, S> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Map {
            entries: RefCell::new(S::default()),
            _marker: PhantomData,
        }
    }

    /// Allocates an empty map behind a strong handle.
    #[must_use]
    pub fn make() -> Gc<Self> {
        Gc::new(Self::new())
    }

    /// Allocates a map holding `pairs` behind a strong handle. Later pairs
    /// overwrite earlier ones with the same key.
    #[must_use]
    pub fn make_from(pairs: impl IntoIterator<Item = (K, V)>) -> Gc<Self> {
        let map = Self::new();
        for (key, value) in pairs {
            map.set(key, value);
        }
        Gc::new(map)
    }

    /// Number of entries.
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Number of entries.
    #[must_use]
    pub fn length(&self) -> usize {
        self.size()
    }

    /// True if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns a copy of the value under `key`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::KeyNotFound`] if `key` is absent.
    pub fn get(&self, key: &K) -> Result<V> {
        self.entries
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| Error::KeyNotFound {
                key: key.describe(),
                type_name: S::TYPE_NAME,
            })
    }

    /// Returns a copy of the value under `key`, if any.
    pub fn find(&self, key: &K) -> Option<V> {
        self.entries.borrow().get(key).cloned()
    }

    /// Inserts or overwrites the value under `key`.
    pub fn set(&self, key: K, value: V) {
        self.entries.borrow_mut().insert(key, value);
    }

    /// Inserts only if `key` is absent; true if the pair was inserted.
    pub fn add(&self, key: K, value: V) -> bool {
        self.entries.borrow_mut().try_add(key, value)
    }

    /// True if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.borrow().get(key).is_some()
    }

    /// Removes the entry under `key`; true if one was removed.
    pub fn remove(&self, key: &K) -> bool {
        self.entries.borrow_mut().remove(key).is_some()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Copies out the keys, in iteration order.
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        self.entries.borrow().iter().map(|(k, _)| k.clone()).collect()
    }

    /// Copies out the values, in iteration order.
    #[must_use]
    pub fn values(&self) -> Vec<V> {
        self.entries.borrow().iter().map(|(_, v)| v.clone()).collect()
    }

    /// Visits every entry. The callback must not mutate this map.
    pub fn for_each(&self, mut f: impl FnMut(&K, &V)) {
        for (key, value) in self.entries.borrow().iter() {
            f(key, value);
        }
    }

    /// Hash over keys and values, independent of iteration order.
    ///
    /// Each entry hashes to one code; the codes are sorted before they are
    /// combined, so maps that compare equal hash equal.
    #[must_use]
    pub fn hash(&self) -> u64 {
        let mut codes: Vec<u64> = self
            .entries
            .borrow()
            .iter()
            .map(|(k, v)| combine_hash_codes([k.hash_code(), v.hash_code()]))
            .collect();
        codes.sort_unstable();
        combine_hash_codes(codes)
    }

    fn render_entries(&self) -> String {
        let entries = self.entries.borrow();
        let body: Vec<String> = entries
            .iter()
            .map(|(k, v)| format!("[ {} ] = {}", k.describe(), v.describe()))
            .collect();
        format!("{}{}{}", S::OPEN, body.join(", "), S::CLOSE)
    }

    fn construct_empty(_args: &[ObjectRef]) -> Result<ObjectRef> {
        Ok(Self::make().into_object())
    }

    fn size_object(&self) -> Result<ObjectRef> {
        let size = i64::try_from(self.size())
            .map_err(|_| Error::invalid_argument("size does not fit in Int64"))?;
        Ok(Int64::make(size).into_object())
    }

    fn op_clear(&self, _args: &[ObjectRef]) -> Result<ObjectRef> {
        self.clear();
        Ok(ObjectRef::null())
    }

    fn op_size(&self, _args: &[ObjectRef]) -> Result<ObjectRef> {
        self.size_object()
    }
}

impl<K: Key, V: Element, S: MapStorage<K, V>> Reflect for Map<K, V, S> {
    const METHODS: &'static [Method<Self>] = &[
        Method::new("OpClear", 0, Self::op_clear),
        Method::new("OpSize", 0, Self::op_size),
        Method::new("OpLen", 0, Self::op_size),
    ];

    const CONSTRUCTORS: &'static [Constructor] = &[Constructor::new(0, Self::construct_empty)];

    fn static_type_name() -> &'static str {
        S::TYPE_NAME
    }

    fn render(&self) -> String {
        self.render_entries()
    }

    fn hash_value(&self) -> u64 {
        self.hash()
    }

    /// Same size and every key maps to an equal value.
    fn value_eq(&self, other: &Self) -> bool {
        let mine = self.entries.borrow();
        let theirs = other.entries.borrow();
        mine.len() == theirs.len()
            && mine
                .iter()
                .all(|(k, v)| theirs.get(k).is_some_and(|w| v == w))
    }
}

impl<K: Key, V: Element, S: MapStorage<K, V>> Default for Map<K, V, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, V: Element, S: MapStorage<K, V>> fmt::Display for Map<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_entries())
    }
}

impl<K: Key, V: Element, S: MapStorage<K, V>> fmt::Debug for Map<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(S::TYPE_NAME)
            .field("size", &self.size())
            .field("entries", &self.render_entries())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::ErrorKind;
    use crate::runtime::{BstUnorderedMap, Int32, Object, ObjectRef, Text, UnorderedMap};

    #[test]
    fn test_get_and_missing_key() {
        let map = UnorderedMap::<String, i32>::new();
        map.set("one".to_string(), 1);

        assert_eq!(map.get(&"one".to_string()).unwrap(), 1);
        let err = map.get(&"two".to_string()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyNotFound);
        assert_eq!(format!("{err}"), "Key: \"two\" is invalid for UnorderedMap");
    }

    #[test]
    fn test_add_does_not_overwrite() {
        let map = BstUnorderedMap::<i32, i32>::new();
        assert!(map.add(1, 10));
        assert!(!map.add(1, 20));
        assert_eq!(map.get(&1).unwrap(), 10);

        map.set(1, 30);
        assert_eq!(map.get(&1).unwrap(), 30);
    }

    #[test]
    fn test_backends_agree_per_key() {
        let pairs = [(3, 30), (1, 10), (2, 20)];
        let std_map = UnorderedMap::<i32, i32>::make_from(pairs);
        let bst_map = BstUnorderedMap::<i32, i32>::make_from(pairs.into_iter().rev());

        assert_eq!(std_map.size(), bst_map.size());
        for key in 1..=3 {
            assert_eq!(std_map.find(&key), bst_map.find(&key));
        }
        assert!(bst_map.find(&4).is_none());
    }

    #[test]
    fn test_remove_and_clear() {
        let map = UnorderedMap::<i32, i32>::make_from([(1, 1), (2, 2)]);
        assert!(map.remove(&1));
        assert!(!map.remove(&1));
        assert!(!map.contains_key(&1));
        assert_eq!(map.keys(), vec![2]);
        assert_eq!(map.values(), vec![2]);

        map.clear();
        assert!(map.is_empty());
    }

    #[test]
    fn test_render() {
        let map = UnorderedMap::<i32, i32>::make_from([(1, 2)]);
        assert_eq!(map.describe(), "{|[ 1 ] = 2|}");

        let bst = BstUnorderedMap::<i32, i32>::new();
        assert_eq!(bst.describe(), "{{}}");
    }

    #[test]
    fn test_value_equality_ignores_insertion_order() {
        let a = UnorderedMap::<i32, i32>::make_from([(1, 1), (2, 2), (3, 3)]);
        let b = UnorderedMap::<i32, i32>::make_from([(3, 3), (2, 2), (1, 1)]);
        assert_eq!(a, b);

        b.set(3, 4);
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_ignores_insertion_history() {
        let a = UnorderedMap::<i32, i32>::make();
        for key in 0..2000 {
            a.set(key, key * 10);
        }
        for key in 3..2000 {
            assert!(a.remove(&key));
        }
        let b = UnorderedMap::<i32, i32>::make();
        for key in [2, 1, 0] {
            b.set(key, key * 10);
        }

        assert_eq!(a, b);
        assert_eq!((*a).hash(), (*b).hash());

        let outer = UnorderedMap::<ObjectRef, ObjectRef>::new();
        outer.set(a.into_object(), Int32::make(1).into_object());
        let found = outer.get(&b.into_object()).unwrap();
        assert_eq!(found.cast::<Int32>().value(), 1);
    }

    #[test]
    fn test_hash_follows_values() {
        let a = BstUnorderedMap::<i32, i32>::make_from([(1, 1), (2, 2)]);
        let b = BstUnorderedMap::<i32, i32>::make_from([(1, 2), (2, 1)]);
        assert_ne!((*a).hash(), (*b).hash());
    }

    #[test]
    fn test_object_keys() {
        let map = UnorderedMap::<ObjectRef, ObjectRef>::new();
        map.set(Text::make("k").into_object(), Int32::make(1).into_object());

        // Lookup by an equal but distinct key object.
        let lookup = Text::make("k").into_object();
        let value = map.get(&lookup).unwrap();
        assert_eq!(value.cast::<Int32>().value(), 1);

        let missing = map.get(&Text::make("x").into_object()).unwrap_err();
        assert_eq!(format!("{missing}"), "Key: \"\"x\"\" is invalid for UnorderedMap");
    }

    #[test]
    fn test_reflective_methods() {
        let map = UnorderedMap::<i32, i32>::make_from([(1, 1), (2, 2)]).into_object();

        let size = map.call("OpSize", &[]).unwrap();
        assert_eq!(size.cast::<crate::runtime::Int64>().value(), 2);
        let len = map.call("OpLen", &[]).unwrap();
        assert_eq!(len.cast::<crate::runtime::Int64>().value(), 2);

        assert!(map.call("OpClear", &[]).unwrap().is_null());
        assert_eq!(map.type_name(), "UnorderedMap");
        assert!(map.cast::<UnorderedMap<i32, i32>>().is_empty());
    }
}
