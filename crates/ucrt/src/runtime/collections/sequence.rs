//! Ordered containers.
//!
//! [`Sequence`] implements the whole sequence contract once; the four
//! registered containers only differ in their [`SeqStorage`] backend. Two
//! sequences holding the same items in the same order render with different
//! glyphs but hash identically, and every order-dependent operation yields
//! the same order on every backend.
//!
//! Items live behind a `RefCell` because containers are shared through
//! [`Gc`] handles. Callbacks may read the sequence they were passed to, but
//! must not mutate it.
//!
//! # Example
//!
//! ```rust
//! use ucrt::runtime::{Deque, Vector};
//!
//! let deque = Deque::<i32>::new();
//! deque.add_front([1, 2, 3]);
//! deque.add([4]);
//!
//! let vector = Vector::<i32>::from_vec(vec![1, 2, 3, 4]);
//!
//! assert_eq!(deque.to_vec(), vector.to_vec());
//! assert_eq!(deque.hash(), vector.hash());
//! assert_eq!(deque.to_string(), "<| 1, 2, 3, 4 |>");
//! assert_eq!(vector.to_string(), "[[ 1, 2, 3, 4 ]]");
//! ```

use crate::error::{Error, Result};
use crate::runtime::collections::Element;
use crate::runtime::collections::storage::SeqStorage;
use crate::runtime::convert;
use crate::runtime::dispatch::{Constructor, Method};
use crate::runtime::gc::Gc;
use crate::runtime::hash::{HashCode, combine_hash_codes};
use crate::runtime::object::{Describe, ObjectRef, Reflect};
use crate::runtime::primitive::UInt64;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// Reflectable ordered container over the backend `S`.
pub struct Sequence<T, S> {
    items: RefCell<S>,
    _marker: PhantomData<T>,
}

impl<T: Element, S: SeqStorage<T>> Sequence<T, S> {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::from_storage(S::default())
    }

    /// Creates a sequence of `size` default items.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidArgument`] if `size` items cannot be
    /// allocated.
    pub fn with_size(size: usize) -> Result<Self> {
        Ok(Self::from_vec(Self::defaults(size)?))
    }

    fn defaults(count: usize) -> Result<Vec<T>> {
        let mut items = Vec::new();
        items.try_reserve_exact(count).map_err(|err| {
            Error::invalid_argument(format!(
                "cannot allocate {count} items for {}: {err}",
                S::TYPE_NAME
            ))
        })?;
        items.resize(count, T::default());
        Ok(items)
    }

    /// Creates a sequence holding `items` in order.
    #[must_use]
    pub fn from_vec(items: Vec<T>) -> Self {
        Self::from_storage(S::from_vec(items))
    }

    fn from_storage(storage: S) -> Self {
        Sequence {
            items: RefCell::new(storage),
            _marker: PhantomData,
        }
    }

    /// Allocates an empty sequence behind a strong handle.
    #[must_use]
    pub fn make() -> Gc<Self> {
        Gc::new(Self::new())
    }

    /// Allocates a sequence holding `items` behind a strong handle.
    #[must_use]
    pub fn make_from(items: impl IntoIterator<Item = T>) -> Gc<Self> {
        Gc::new(Self::from_vec(items.into_iter().collect()))
    }

    /// Number of items.
    #[must_use]
    pub fn size(&self) -> usize {
        self.items.borrow().len()
    }

    /// Number of items.
    #[must_use]
    pub fn length(&self) -> usize {
        self.size()
    }

    /// True if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::IndexOutOfRange {
            index,
            size: self.size(),
            type_name: S::TYPE_NAME,
        }
    }

    fn check_range(&self, index: usize, count: usize) -> Result<()> {
        let size = self.size();
        match index.checked_add(count) {
            Some(end) if end <= size => Ok(()),
            _ => Err(Error::IndexOutOfRange {
                index: index.saturating_add(count),
                size,
                type_name: S::TYPE_NAME,
            }),
        }
    }

    /// Returns a copy of the item at `index`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`] if `index >= size()`.
    pub fn get(&self, index: usize) -> Result<T> {
        self.items
            .borrow()
            .get(index)
            .cloned()
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Replaces the item at `index`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`] if `index >= size()`.
    pub fn set(&self, index: usize, value: T) -> Result<()> {
        let mut items = self.items.borrow_mut();
        let size = items.len();
        let slot = items.get_mut(index).ok_or(Error::IndexOutOfRange {
            index,
            size,
            type_name: S::TYPE_NAME,
        })?;
        *slot = value;
        Ok(())
    }

    /// Appends items in order.
    pub fn add(&self, items: impl IntoIterator<Item = T>) {
        let mut storage = self.items.borrow_mut();
        for item in items {
            storage.push_back(item);
        }
    }

    /// Prepends items, keeping their order: adding `[1, 2, 3]` in front of
    /// `[4]` yields `[1, 2, 3, 4]`.
    pub fn add_front(&self, items: impl IntoIterator<Item = T>) {
        let items: Vec<T> = items.into_iter().collect();
        let mut storage = self.items.borrow_mut();
        for item in items.into_iter().rev() {
            storage.push_front(item);
        }
    }

    /// Inserts items before `index`, keeping their order. `index == size()`
    /// appends.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`] if `index > size()`.
    pub fn add_before(&self, index: usize, items: impl IntoIterator<Item = T>) -> Result<()> {
        if index > self.size() {
            return Err(self.out_of_range(index));
        }
        let items: Vec<T> = items.into_iter().collect();
        let mut storage = self.items.borrow_mut();
        for item in items.into_iter().rev() {
            storage.insert(index, item);
        }
        Ok(())
    }

    /// Removes every item.
    pub fn clear(&self) {
        self.items.borrow_mut().clear();
    }

    /// True if any item matches.
    pub fn exists(&self, pred: impl FnMut(&T) -> bool) -> bool {
        self.items.borrow().iter().any(pred)
    }

    /// Returns the first matching item.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ValueNotFound`] if nothing matches.
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Result<T> {
        self.items
            .borrow()
            .iter()
            .find(|item| pred(item))
            .cloned()
            .ok_or(Error::ValueNotFound)
    }

    /// Collects every matching item into a new sequence of the same kind.
    pub fn find_all(&self, mut pred: impl FnMut(&T) -> bool) -> Gc<Self> {
        let matches: Vec<T> = self
            .items
            .borrow()
            .iter()
            .filter(|item| pred(item))
            .cloned()
            .collect();
        Gc::new(Self::from_vec(matches))
    }

    /// Index of the first matching item.
    pub fn find_index(&self, pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.items.borrow().iter().position(pred)
    }

    /// Index of the first matching item at or after `start`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`] if `start > size()`.
    pub fn find_index_from(&self, start: usize, pred: impl FnMut(&T) -> bool) -> Result<Option<usize>> {
        let count = self.size().checked_sub(start).ok_or_else(|| self.out_of_range(start))?;
        self.find_index_in(start, count, pred)
    }

    /// Index of the first matching item within `count` items from `start`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`] if the range passes the end.
    pub fn find_index_in(
        &self,
        start: usize,
        count: usize,
        pred: impl FnMut(&T) -> bool,
    ) -> Result<Option<usize>> {
        self.check_range(start, count)?;
        Ok(self
            .items
            .borrow()
            .iter()
            .skip(start)
            .take(count)
            .position(pred)
            .map(|offset| start + offset))
    }

    /// Index of the last matching item.
    pub fn find_last_index(&self, pred: impl FnMut(&T) -> bool) -> Option<usize> {
        let items = self.items.borrow();
        let last = items.len().checked_sub(1)?;
        items.iter().rev().position(pred).map(|back| last - back)
    }

    /// Visits items front to back.
    pub fn for_each(&self, f: impl FnMut(&T)) {
        self.items.borrow().iter().for_each(f);
    }

    /// Visits items back to front.
    pub fn rev_for_each(&self, f: impl FnMut(&T)) {
        self.items.borrow().iter().rev().for_each(f);
    }

    /// Copies `count` items starting at `index` into a new sequence.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`] if the range passes the end.
    pub fn get_range(&self, index: usize, count: usize) -> Result<Gc<Self>> {
        self.check_range(index, count)?;
        let slice: Vec<T> = self
            .items
            .borrow()
            .iter()
            .skip(index)
            .take(count)
            .cloned()
            .collect();
        Ok(Gc::new(Self::from_vec(slice)))
    }

    /// Removes the first matching item; true if one was removed.
    pub fn remove(&self, pred: impl FnMut(&T) -> bool) -> bool {
        let Some(index) = self.find_index(pred) else {
            return false;
        };
        self.items.borrow_mut().remove(index).is_some()
    }

    /// Removes every matching item and returns how many were removed.
    pub fn remove_all(&self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let items = self.to_vec();
        let before = items.len();
        let kept: Vec<T> = items.into_iter().filter(|item| !pred(item)).collect();
        let removed = before - kept.len();
        if removed > 0 {
            *self.items.borrow_mut() = S::from_vec(kept);
        }
        removed
    }

    /// Removes and returns the item at `index`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`] if `index >= size()`.
    pub fn remove_at(&self, index: usize) -> Result<T> {
        let removed = self.items.borrow_mut().remove(index);
        removed.ok_or_else(|| self.out_of_range(index))
    }

    /// Reverses the whole sequence.
    pub fn reverse(&self) {
        self.items.borrow_mut().with_slice(<[T]>::reverse);
    }

    /// Reverses `count` items starting at `index`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`] if the range passes the end.
    pub fn reverse_range(&self, index: usize, count: usize) -> Result<()> {
        self.check_range(index, count)?;
        self.items
            .borrow_mut()
            .with_slice(|slice| slice[index..index + count].reverse());
        Ok(())
    }

    /// Grows with default items or truncates to `size`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidArgument`] if the missing items cannot be
    /// allocated; the sequence is left unchanged.
    pub fn resize(&self, size: usize) -> Result<()> {
        let len = self.size();
        if size <= len {
            self.items.borrow_mut().truncate(size);
            return Ok(());
        }
        let fill = Self::defaults(size - len)?;
        let mut storage = self.items.borrow_mut();
        for item in fill {
            storage.push_back(item);
        }
        Ok(())
    }

    /// Stable sort by `compare`.
    pub fn sort_by(&self, compare: impl FnMut(&T, &T) -> Ordering) {
        let mut items = self.to_vec();
        items.sort_by(compare);
        *self.items.borrow_mut() = S::from_vec(items);
    }

    /// Shuffles with a generator seeded by `seed`; equal seeds give equal
    /// orders on every backend.
    pub fn shuffle(&self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.items
            .borrow_mut()
            .with_slice(|slice| slice.shuffle(&mut rng));
    }

    /// Releases unused capacity.
    pub fn trim_excess(&self) {
        self.items.borrow_mut().shrink_to_fit();
    }

    /// True if every item matches (vacuously true when empty).
    pub fn true_for_all(&self, pred: impl FnMut(&T) -> bool) -> bool {
        self.items.borrow().iter().all(pred)
    }

    /// Copies the items out in order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.items.borrow().iter().cloned().collect()
    }

    /// Element-wise equality with a sequence on any backend.
    pub fn sequence_eq<S2: SeqStorage<T>>(&self, other: &Sequence<T, S2>) -> bool {
        let a = self.items.borrow();
        let b = other.items.borrow();
        a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
    }

    /// Storage-independent hash of the items.
    #[must_use]
    pub fn hash(&self) -> u64 {
        combine_hash_codes(self.items.borrow().iter().map(|item| item.hash_code()))
    }

    fn render_items(&self) -> String {
        let items = self.items.borrow();
        let body: Vec<String> = items.iter().map(|item| item.describe()).collect();
        let mut out = String::with_capacity(
            S::OPEN.len() + S::CLOSE.len() + body.iter().map(|s| s.len() + 2).sum::<usize>(),
        );
        out.push_str(S::OPEN);
        out.push_str(&body.join(", "));
        out.push_str(S::CLOSE);
        out
    }

    fn construct_empty(_args: &[ObjectRef]) -> Result<ObjectRef> {
        Ok(Self::make().into_object())
    }

    fn construct_sized(args: &[ObjectRef]) -> Result<ObjectRef> {
        let size = convert::as_index(&args[0])?;
        Ok(Gc::new(Self::with_size(size)?).into_object())
    }

    fn op_get(&self, args: &[ObjectRef]) -> Result<ObjectRef> {
        let start = convert::as_index(&args[0])?;
        let count = convert::as_index(&args[1])?;
        Ok(self.get_range(start, count)?.into_object())
    }

    fn op_len(&self, _args: &[ObjectRef]) -> Result<ObjectRef> {
        Ok(UInt64::make(self.size() as u64).into_object())
    }

    fn op_clear(&self, _args: &[ObjectRef]) -> Result<ObjectRef> {
        self.clear();
        Ok(ObjectRef::null())
    }

    fn op_reverse(&self, _args: &[ObjectRef]) -> Result<ObjectRef> {
        self.reverse();
        Ok(ObjectRef::null())
    }

    fn op_reverse_range(&self, args: &[ObjectRef]) -> Result<ObjectRef> {
        let index = convert::as_index(&args[0])?;
        let count = convert::as_index(&args[1])?;
        self.reverse_range(index, count)?;
        Ok(ObjectRef::null())
    }

    fn op_resize(&self, args: &[ObjectRef]) -> Result<ObjectRef> {
        self.resize(convert::as_index(&args[0])?)?;
        Ok(ObjectRef::null())
    }

    fn op_trim_excess(&self, _args: &[ObjectRef]) -> Result<ObjectRef> {
        self.trim_excess();
        Ok(ObjectRef::null())
    }

    fn op_remove_at(&self, args: &[ObjectRef]) -> Result<ObjectRef> {
        self.remove_at(convert::as_index(&args[0])?)?;
        Ok(ObjectRef::null())
    }
}

impl<T: Element, S: SeqStorage<T>> Reflect for Sequence<T, S> {
    const METHODS: &'static [Method<Self>] = &[
        Method::new("OpGet", 2, Self::op_get),
        Method::new("OpLen", 0, Self::op_len),
        Method::new("OpClear", 0, Self::op_clear),
        Method::new("OpReverse", 2, Self::op_reverse_range),
        Method::new("OpReverse", 0, Self::op_reverse),
        Method::new("OpResize", 1, Self::op_resize),
        Method::new("OpTrimExcess", 0, Self::op_trim_excess),
        Method::new("OpRemAt", 1, Self::op_remove_at),
    ];

    const CONSTRUCTORS: &'static [Constructor] = &[
        Constructor::new(0, Self::construct_empty),
        Constructor::new(1, Self::construct_sized),
    ];

    fn static_type_name() -> &'static str {
        S::TYPE_NAME
    }

    fn render(&self) -> String {
        self.render_items()
    }

    fn hash_value(&self) -> u64 {
        self.hash()
    }

    fn value_eq(&self, other: &Self) -> bool {
        self.sequence_eq(other)
    }
}

impl<T: Element, S: SeqStorage<T>> Default for Sequence<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element, S: SeqStorage<T>> Clone for Sequence<T, S> {
    fn clone(&self) -> Self {
        Self::from_vec(self.to_vec())
    }
}

impl<T: Element, S: SeqStorage<T>> FromIterator<T> for Sequence<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Element, S: SeqStorage<T>> fmt::Display for Sequence<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_items())
    }
}

impl<T: Element, S: SeqStorage<T>> fmt::Debug for Sequence<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(S::TYPE_NAME)
            .field("items", &self.render_items())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{BstDeque, BstVector, Deque, Int32, Object, ObjectRef, Vector};
    use crate::ErrorKind;

    #[test]
    fn test_add_front_keeps_order() {
        let deque = Deque::<i32>::new();
        deque.add_front([1, 2, 3]);
        assert_eq!(deque.to_vec(), vec![1, 2, 3]);

        deque.add_front([-1, 0]);
        assert_eq!(deque.to_vec(), vec![-1, 0, 1, 2, 3]);

        let vector = Vector::<i32>::new();
        vector.add_front([1, 2, 3]);
        assert_eq!(vector.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_add_before() {
        let list = BstDeque::<i32>::from_vec(vec![1, 5]);
        list.add_before(1, [2, 3, 4]).unwrap();
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 5]);

        list.add_before(5, [6]).unwrap();
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 5, 6]);

        assert_eq!(
            list.add_before(9, [0]).unwrap_err().kind(),
            ErrorKind::IndexOutOfRange
        );
    }

    #[test]
    fn test_bounds_checked_access() {
        let vector = Vector::<i32>::from_vec(vec![10, 20, 30]);
        assert_eq!(vector.get(2).unwrap(), 30);

        let err = vector.get(3).unwrap_err();
        assert_eq!(
            format!("{err}"),
            "Index: 3 is out of range for a Vector of size: 3"
        );

        vector.set(0, 11).unwrap();
        assert_eq!(vector.get(0).unwrap(), 11);
        assert!(vector.set(3, 0).is_err());
    }

    #[test]
    fn test_remove_at() {
        let small = BstVector::<i32>::from_vec(vec![1, 2, 3]);
        assert_eq!(small.remove_at(1).unwrap(), 2);
        assert_eq!(small.to_vec(), vec![1, 3]);
        assert_eq!(
            small.remove_at(2).unwrap_err().kind(),
            ErrorKind::IndexOutOfRange
        );
    }

    #[test]
    fn test_search() {
        let deque = Deque::<i32>::from_vec(vec![4, 7, 8, 7, 2]);

        assert!(deque.exists(|x| *x == 8));
        assert_eq!(deque.find(|x| *x > 5).unwrap(), 7);
        assert_eq!(deque.find(|x| *x > 100).unwrap_err(), crate::Error::ValueNotFound);
        assert_eq!(deque.find_all(|x| *x == 7).to_vec(), vec![7, 7]);
        assert_eq!(deque.find_index(|x| *x == 7), Some(1));
        assert_eq!(deque.find_index_from(2, |x| *x == 7).unwrap(), Some(3));
        assert_eq!(deque.find_index_in(0, 1, |x| *x == 7).unwrap(), None);
        assert!(deque.find_index_in(4, 2, |_| true).is_err());
        assert_eq!(deque.find_last_index(|x| *x == 7), Some(3));
        assert_eq!(deque.find_last_index(|x| *x == 100), None);
        assert!(deque.true_for_all(|x| *x > 0));
    }

    #[test]
    fn test_iteration_order() {
        let vector = Vector::<i32>::from_vec(vec![1, 2, 3]);
        let mut forward = Vec::new();
        let mut backward = Vec::new();
        vector.for_each(|x| forward.push(*x));
        vector.rev_for_each(|x| backward.push(*x));
        assert_eq!(forward, vec![1, 2, 3]);
        assert_eq!(backward, vec![3, 2, 1]);
    }

    #[test]
    fn test_remove() {
        let deque = Deque::<i32>::from_vec(vec![1, 2, 1, 3, 1]);
        assert!(deque.remove(|x| *x == 1));
        assert_eq!(deque.to_vec(), vec![2, 1, 3, 1]);
        assert_eq!(deque.remove_all(|x| *x == 1), 2);
        assert_eq!(deque.to_vec(), vec![2, 3]);
        assert!(!deque.remove(|x| *x == 9));
    }

    #[test]
    fn test_range_operations() {
        let vector = Vector::<i32>::from_vec(vec![0, 1, 2, 3, 4]);
        assert_eq!(vector.get_range(1, 3).unwrap().to_vec(), vec![1, 2, 3]);
        assert!(vector.get_range(3, 3).is_err());

        vector.reverse_range(1, 3).unwrap();
        assert_eq!(vector.to_vec(), vec![0, 3, 2, 1, 4]);

        vector.reverse();
        assert_eq!(vector.to_vec(), vec![4, 1, 2, 3, 0]);
    }

    #[test]
    fn test_resize() {
        let list = BstDeque::<i32>::from_vec(vec![1, 2]);
        list.resize(4).unwrap();
        assert_eq!(list.to_vec(), vec![1, 2, 0, 0]);
        list.resize(1).unwrap();
        assert_eq!(list.to_vec(), vec![1]);
        list.trim_excess();
        assert_eq!(list.size(), 1);
    }

    #[test]
    fn test_unallocatable_size_is_rejected() {
        let err = Vector::<i64>::with_size(usize::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let deque = Deque::<i64>::from_vec(vec![1, 2]);
        let err = deque.resize(usize::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(deque.to_vec(), vec![1, 2]);

        assert_eq!(Vector::<i64>::with_size(3).unwrap().to_vec(), vec![0, 0, 0]);
    }

    #[test]
    fn test_callbacks_may_read_the_sequence() {
        let vector = Vector::<i32>::make_from([3, 1, 2, 5, 4]);

        let removed = vector.remove_all(|item| *item > vector.size() as i32 - 1);
        assert_eq!(removed, 1);
        assert_eq!(vector.to_vec(), vec![3, 1, 2, 4]);

        vector.sort_by(|a, b| {
            assert_eq!(vector.size(), 4);
            a.cmp(b)
        });
        assert_eq!(vector.to_vec(), vec![1, 2, 3, 4]);
        assert!(vector.exists(|item| *item == vector.size() as i32));
    }

    #[test]
    fn test_sort_and_shuffle_agree_across_backends() {
        let items: Vec<i32> = (0..40).collect();
        let deque = Deque::<i32>::from_vec(items.clone());
        let vector = Vector::<i32>::from_vec(items.clone());
        let list = BstDeque::<i32>::from_vec(items.clone());
        let small = BstVector::<i32>::from_vec(items);

        deque.shuffle(7);
        vector.shuffle(7);
        list.shuffle(7);
        small.shuffle(7);
        assert_eq!(deque.to_vec(), vector.to_vec());
        assert_eq!(deque.to_vec(), list.to_vec());
        assert_eq!(deque.to_vec(), small.to_vec());

        deque.sort_by(|a, b| b.cmp(a));
        list.sort_by(|a, b| b.cmp(a));
        assert_eq!(deque.to_vec(), list.to_vec());
        assert_eq!(deque.get(0).unwrap(), 39);
    }

    #[test]
    fn test_render_glyphs() {
        let items = vec![1, 2];
        assert_eq!(Deque::<i32>::from_vec(items.clone()).describe(), "<| 1, 2 |>");
        assert_eq!(Vector::<i32>::from_vec(items.clone()).describe(), "[[ 1, 2 ]]");
        assert_eq!(BstDeque::<i32>::from_vec(items.clone()).describe(), "<< 1, 2 >>");
        assert_eq!(BstVector::<i32>::from_vec(items).describe(), "[| 1, 2 |]");
        assert_eq!(Deque::<i32>::new().describe(), "<|  |>");
    }

    #[test]
    fn test_object_elements() {
        let vector = Vector::<ObjectRef>::new();
        vector.add([Int32::make(1).into_object(), ObjectRef::null()]);
        assert_eq!(vector.describe(), "[[ 1, null ]]");
        assert!(vector.get(1).unwrap().is_null());
    }

    #[test]
    fn test_reflective_methods() {
        let deque = Deque::<i32>::make_from([1, 2, 3, 4]).into_object();
        let int = |v: i32| Int32::make(v).into_object();

        let len = deque.call("OpLen", &[]).unwrap();
        assert_eq!(len.cast::<crate::runtime::UInt64>().value(), 4);

        let range = deque.call("OpGet", &[int(1), int(2)]).unwrap();
        assert_eq!(range.cast::<Deque<i32>>().to_vec(), vec![2, 3]);

        assert!(deque.call("OpReverse", &[]).unwrap().is_null());
        assert_eq!(deque.cast::<Deque<i32>>().to_vec(), vec![4, 3, 2, 1]);

        deque.call("OpRemAt", &[int(0)]).unwrap();
        deque.call("OpResize", &[int(5)]).unwrap();
        assert_eq!(deque.cast::<Deque<i32>>().to_vec(), vec![3, 2, 1, 0, 0]);

        deque.call("OpClear", &[]).unwrap();
        assert!(deque.cast::<Deque<i32>>().is_empty());

        let err = deque.call("OpRemAt", &[int(0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
    }
}
