//! `ucrt` runtime module.
//!
//! The object model and everything built on it:
//!
//! - [`gc`]: strong ([`Gc`]) and weak ([`WeakGc`]) reference-counted handles
//! - [`object`]: the [`Object`] root trait and its [`Reflect`] description
//! - [`dispatch`]: method tables and dynamic calls by name and arity
//! - [`registry`]: construction of instances from a type name
//! - [`primitive`] and [`convert`]: boxed scalars and widening conversions
//! - [`string`]: the immutable [`Text`] object
//! - [`collections`]: reflectable sequences and maps
//! - [`functor`]: type-erased callables and multicast events
//! - [`hash`]: hash-code combination and the map key hasher
//!
//! # Threading
//!
//! Handles are built on `Rc`; nothing here is `Send` or `Sync` apart from
//! the registry itself.
//!
//! # Example
//!
//! ```rust
//! use ucrt::runtime::{self, Object, create_instance};
//!
//! runtime::init();
//!
//! let deque = create_instance("Deque", &[]).unwrap();
//! assert_eq!(deque.type_name(), "Deque");
//! assert_eq!(deque.call("OpLen", &[]).unwrap().describe(), "0");
//! ```

pub mod collections;
pub mod convert;
pub mod dispatch;
pub mod functor;
pub mod gc;
pub mod hash;
pub mod object;
pub mod primitive;
pub mod registry;
pub mod string;

pub use collections::{
    BstDeque, BstUnorderedMap, BstVector, Deque, Map, Sequence, UnorderedMap, Vector,
};
pub use dispatch::{Constructor, Method};
pub use functor::{Event, Functor, FunctorId, make_func};
pub use gc::{EnableGcFromMe, Gc, SelfRef, WeakGc, as_not_null};
pub use hash::{HashCode, KeyHasher, combine_hash_codes};
pub use object::{Describe, Object, ObjectRef, Reflect, obj_cast, obj_cast_or_err};
pub use primitive::{
    BYTE_MAX, Bool, Byte, Double, Float, INT16_MAX, INT16_MIN, INT32_MAX, INT32_MIN, INT64_MAX,
    INT64_MIN, Int16, Int32, Int64, SBYTE_MAX, SBYTE_MIN, SByte, UINT16_MAX, UINT32_MAX,
    UINT64_MAX, UInt16, UInt32, UInt64,
};
pub use registry::{create_instance, register_type};
pub use string::{Text, TextPiece, concat_strings};

use std::sync::Once;
use ucrt_log::{debug, warn};

static INIT: Once = Once::new();

/// Initializes the runtime.
///
/// Applies the `UCRT_LOG` and `UCRT_LOG_TARGET` environment settings and
/// registers the built-in types. Safe to call more than once; only the
/// first call does anything. Creating instances by name works without it,
/// the registry fills itself on first use.
pub fn init() {
    INIT.call_once(|| {
        if let Err(e) = ucrt_log::init_from_env() {
            warn!("ignoring log configuration: {e}");
        }
        registry::init();
        debug!("runtime initialized");
    });
}
