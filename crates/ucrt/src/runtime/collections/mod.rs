//! Reflectable generic containers.
//!
//! Four sequence containers and two hash maps, each a type alias over one
//! generic implementation and a storage backend:
//!
//! | Container | Backend | Glyphs |
//! |-----------|---------|--------|
//! | [`Deque`] | `VecDeque` | `<| ... |>` |
//! | [`Vector`] | `Vec` | `[[ ... ]]` |
//! | [`BstDeque`] | `LinkedList` | `<< ... >>` |
//! | [`BstVector`] | `SmallVec` | `[| ... |]` |
//! | [`UnorderedMap`] | `std::collections::HashMap` | `{| ... |}` |
//! | [`BstUnorderedMap`] | `hashbrown::HashMap` | `{{ ... }}` |
//!
//! Containers hold any [`Element`]: native scalars, `String`, or object
//! handles. The registry knows each container under its plain name with
//! [`ObjectRef`](crate::runtime::ObjectRef) elements.

pub mod map;
pub mod sequence;
pub mod storage;

pub use map::Map;
pub use sequence::Sequence;
pub use storage::{INLINE_CAPACITY, MapStorage, SeqStorage};

use crate::runtime::hash::{HashCode, KeyHasher};
use crate::runtime::object::Describe;
use smallvec::SmallVec;
use std::collections::{HashMap, LinkedList, VecDeque};
use std::hash::Hash;

/// Values a container can hold.
pub trait Element: Clone + PartialEq + HashCode + Describe + Default + 'static {}

impl<T> Element for T where T: Clone + PartialEq + HashCode + Describe + Default + 'static {}

/// Values a map can be keyed by.
pub trait Key: Element + Eq + Hash {}

impl<T> Key for T where T: Element + Eq + Hash {}

/// Double-ended queue with O(1) insertion at both ends.
pub type Deque<T> = Sequence<T, VecDeque<T>>;

/// Contiguous array; front insertion shifts every item.
pub type Vector<T> = Sequence<T, Vec<T>>;

/// Linked double-ended queue.
pub type BstDeque<T> = Sequence<T, LinkedList<T>>;

/// Array with inline storage for small sizes.
pub type BstVector<T> = Sequence<T, SmallVec<[T; INLINE_CAPACITY]>>;

/// Hash map on the standard library table.
pub type UnorderedMap<K, V> = Map<K, V, HashMap<K, V, KeyHasher>>;

/// Hash map on the `hashbrown` table.
pub type BstUnorderedMap<K, V> = Map<K, V, hashbrown::HashMap<K, V, KeyHasher>>;
