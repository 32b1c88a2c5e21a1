//! Storage backends behind the container objects.
//!
//! A sequence or map object is written once against [`SeqStorage`] or
//! [`MapStorage`]; each backend only supplies the primitive operations and
//! the glyphs used when rendering. Order-sensitive algorithms (sort,
//! shuffle, reverse) run on a contiguous slice obtained through
//! [`SeqStorage::with_slice`], so every backend produces the same order.

use crate::runtime::hash::KeyHasher;
use smallvec::SmallVec;
use std::collections::{HashMap, LinkedList, VecDeque};
use std::hash::Hash;

/// Inline capacity of the small-vector backend.
pub const INLINE_CAPACITY: usize = 8;

/// Ordered storage of a sequence container.
pub trait SeqStorage<T>: Default + 'static {
    /// Registered name of the container using this backend.
    const TYPE_NAME: &'static str;
    /// Opening glyph of the string form.
    const OPEN: &'static str;
    /// Closing glyph of the string form.
    const CLOSE: &'static str;

    /// Builds the storage from items in order.
    fn from_vec(items: Vec<T>) -> Self;

    /// Number of items.
    fn len(&self) -> usize;

    /// Borrows the item at `index`.
    fn get(&self, index: usize) -> Option<&T>;

    /// Mutably borrows the item at `index`.
    fn get_mut(&mut self, index: usize) -> Option<&mut T>;

    /// Appends an item.
    fn push_back(&mut self, item: T);

    /// Prepends an item.
    fn push_front(&mut self, item: T);

    /// Inserts before `index`; `index` is at most `len()`.
    fn insert(&mut self, index: usize, item: T);

    /// Removes and returns the item at `index`.
    fn remove(&mut self, index: usize) -> Option<T>;

    /// Removes every item.
    fn clear(&mut self);

    /// Drops items from `len` onwards.
    fn truncate(&mut self, len: usize);

    /// Releases unused capacity.
    fn shrink_to_fit(&mut self);

    /// Iterates front to back.
    fn iter(&self) -> Box<dyn DoubleEndedIterator<Item = &T> + '_>;

    /// Runs `f` over the items as one contiguous slice.
    fn with_slice<R>(&mut self, f: impl FnOnce(&mut [T]) -> R) -> R;
}

impl<T: 'static> SeqStorage<T> for VecDeque<T> {
    const TYPE_NAME: &'static str = "Deque";
    const OPEN: &'static str = "<| ";
    const CLOSE: &'static str = " |>";

    fn from_vec(items: Vec<T>) -> Self {
        VecDeque::from(items)
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        VecDeque::get(self, index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        VecDeque::get_mut(self, index)
    }

    fn push_back(&mut self, item: T) {
        VecDeque::push_back(self, item);
    }

    fn push_front(&mut self, item: T) {
        VecDeque::push_front(self, item);
    }

    fn insert(&mut self, index: usize, item: T) {
        VecDeque::insert(self, index, item);
    }

    fn remove(&mut self, index: usize) -> Option<T> {
        VecDeque::remove(self, index)
    }

    fn clear(&mut self) {
        VecDeque::clear(self);
    }

    fn truncate(&mut self, len: usize) {
        VecDeque::truncate(self, len);
    }

    fn shrink_to_fit(&mut self) {
        VecDeque::shrink_to_fit(self);
    }

    fn iter(&self) -> Box<dyn DoubleEndedIterator<Item = &T> + '_> {
        Box::new(VecDeque::iter(self))
    }

    fn with_slice<R>(&mut self, f: impl FnOnce(&mut [T]) -> R) -> R {
        f(self.make_contiguous())
    }
}

/// Front insertion shifts every element.
impl<T: 'static> SeqStorage<T> for Vec<T> {
    const TYPE_NAME: &'static str = "Vector";
    const OPEN: &'static str = "[[ ";
    const CLOSE: &'static str = " ]]";

    fn from_vec(items: Vec<T>) -> Self {
        items
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    fn push_back(&mut self, item: T) {
        self.push(item);
    }

    fn push_front(&mut self, item: T) {
        Vec::insert(self, 0, item);
    }

    fn insert(&mut self, index: usize, item: T) {
        Vec::insert(self, index, item);
    }

    fn remove(&mut self, index: usize) -> Option<T> {
        (index < Vec::len(self)).then(|| Vec::remove(self, index))
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn truncate(&mut self, len: usize) {
        Vec::truncate(self, len);
    }

    fn shrink_to_fit(&mut self) {
        Vec::shrink_to_fit(self);
    }

    fn iter(&self) -> Box<dyn DoubleEndedIterator<Item = &T> + '_> {
        Box::new(self.as_slice().iter())
    }

    fn with_slice<R>(&mut self, f: impl FnOnce(&mut [T]) -> R) -> R {
        f(self.as_mut_slice())
    }
}

/// Linked storage: O(1) at both ends, O(n) indexed access.
impl<T: 'static> SeqStorage<T> for LinkedList<T> {
    const TYPE_NAME: &'static str = "BstDeque";
    const OPEN: &'static str = "<< ";
    const CLOSE: &'static str = " >>";

    fn from_vec(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }

    fn len(&self) -> usize {
        LinkedList::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        LinkedList::iter(self).nth(index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.iter_mut().nth(index)
    }

    fn push_back(&mut self, item: T) {
        LinkedList::push_back(self, item);
    }

    fn push_front(&mut self, item: T) {
        LinkedList::push_front(self, item);
    }

    fn insert(&mut self, index: usize, item: T) {
        let mut tail = self.split_off(index);
        LinkedList::push_back(self, item);
        self.append(&mut tail);
    }

    fn remove(&mut self, index: usize) -> Option<T> {
        if index >= LinkedList::len(self) {
            return None;
        }
        let mut tail = self.split_off(index);
        let item = tail.pop_front();
        self.append(&mut tail);
        item
    }

    fn clear(&mut self) {
        LinkedList::clear(self);
    }

    fn truncate(&mut self, len: usize) {
        if len < LinkedList::len(self) {
            drop(self.split_off(len));
        }
    }

    fn shrink_to_fit(&mut self) {}

    fn iter(&self) -> Box<dyn DoubleEndedIterator<Item = &T> + '_> {
        Box::new(LinkedList::iter(self))
    }

    fn with_slice<R>(&mut self, f: impl FnOnce(&mut [T]) -> R) -> R {
        let mut items: Vec<T> = std::mem::take(self).into_iter().collect();
        let result = f(&mut items);
        *self = items.into_iter().collect();
        result
    }
}

/// Small-vector storage: the first [`INLINE_CAPACITY`] items live inline.
impl<T: 'static> SeqStorage<T> for SmallVec<[T; INLINE_CAPACITY]> {
    const TYPE_NAME: &'static str = "BstVector";
    const OPEN: &'static str = "[| ";
    const CLOSE: &'static str = " |]";

    fn from_vec(items: Vec<T>) -> Self {
        SmallVec::from_vec(items)
    }

    fn len(&self) -> usize {
        SmallVec::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    fn push_back(&mut self, item: T) {
        self.push(item);
    }

    fn push_front(&mut self, item: T) {
        SmallVec::insert(self, 0, item);
    }

    fn insert(&mut self, index: usize, item: T) {
        SmallVec::insert(self, index, item);
    }

    fn remove(&mut self, index: usize) -> Option<T> {
        (index < SmallVec::len(self)).then(|| SmallVec::remove(self, index))
    }

    fn clear(&mut self) {
        SmallVec::clear(self);
    }

    fn truncate(&mut self, len: usize) {
        SmallVec::truncate(self, len);
    }

    fn shrink_to_fit(&mut self) {
        SmallVec::shrink_to_fit(self);
    }

    fn iter(&self) -> Box<dyn DoubleEndedIterator<Item = &T> + '_> {
        Box::new(self.as_slice().iter())
    }

    fn with_slice<R>(&mut self, f: impl FnOnce(&mut [T]) -> R) -> R {
        f(self.as_mut_slice())
    }
}

/// Hash-keyed storage of an associative container.
///
/// Iteration order is unspecified and differs between backends.
pub trait MapStorage<K, V>: Default + 'static {
    /// Registered name of the container using this backend.
    const TYPE_NAME: &'static str;
    /// Opening glyph of the string form.
    const OPEN: &'static str;
    /// Closing glyph of the string form.
    const CLOSE: &'static str;

    /// Number of entries.
    fn len(&self) -> usize;

    /// Borrows the value under `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Inserts or overwrites, returning the previous value.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Inserts only if `key` is absent; true if inserted.
    fn try_add(&mut self, key: K, value: V) -> bool;

    /// Removes the entry under `key`.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes every entry.
    fn clear(&mut self);

    /// Iterates over entries.
    fn iter(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_>;
}

impl<K, V> MapStorage<K, V> for HashMap<K, V, KeyHasher>
where
    K: Eq + Hash + 'static,
    V: 'static,
{
    const TYPE_NAME: &'static str = "UnorderedMap";
    const OPEN: &'static str = "{|";
    const CLOSE: &'static str = "|}";

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        HashMap::insert(self, key, value)
    }

    fn try_add(&mut self, key: K, value: V) -> bool {
        use std::collections::hash_map::Entry;
        match self.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        HashMap::remove(self, key)
    }

    fn clear(&mut self) {
        HashMap::clear(self);
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(HashMap::iter(self))
    }
}

impl<K, V> MapStorage<K, V> for hashbrown::HashMap<K, V, KeyHasher>
where
    K: Eq + Hash + 'static,
    V: 'static,
{
    const TYPE_NAME: &'static str = "BstUnorderedMap";
    const OPEN: &'static str = "{{";
    const CLOSE: &'static str = "}}";

    fn len(&self) -> usize {
        hashbrown::HashMap::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        hashbrown::HashMap::get(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        hashbrown::HashMap::insert(self, key, value)
    }

    fn try_add(&mut self, key: K, value: V) -> bool {
        use hashbrown::hash_map::Entry;
        match self.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        hashbrown::HashMap::remove(self, key)
    }

    fn clear(&mut self) {
        hashbrown::HashMap::clear(self);
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(hashbrown::HashMap::iter(self))
    }
}
