//! `ucrt`: a reflective object runtime for Rust
//!
//! `ucrt` gives plain Rust types a uniform, dynamically typed surface:
//!
//! - **Shared ownership** through reference-counted strong and weak handles
//! - **Dynamic dispatch** of methods by name and argument count
//! - **Construction by name** through a process-wide type registry
//! - **Boxed primitives** with a fixed widening conversion lattice
//! - **Generic containers** (four sequences, two hash maps) that are
//!   themselves reflective objects
//! - **Functors and events** for type-erased and multicast callbacks
//!
//! # Architecture
//!
//! Every concrete type implements [`runtime::Reflect`], declaring a static
//! method table and constructor table. A blanket impl turns that into the
//! object-safe [`runtime::Object`] trait, which is what an
//! [`runtime::ObjectRef`] handle dispatches through. Nothing is discovered
//! at run time: the tables are `const` data checked by the compiler.
//!
//! # Example
//!
//! ```rust
//! use ucrt::runtime::{Int32, Object, ObjectRef, Text, create_instance};
//!
//! let greeting: ObjectRef = Text::make("hello").into_object();
//! let len = greeting.call("ULength", &[]).unwrap();
//! assert_eq!(len.describe(), "5");
//!
//! let zero = create_instance("Int32", &[]).unwrap();
//! assert_eq!(zero.cast::<Int32>().value(), 0);
//! ```

pub mod error;
pub mod runtime;

// Re-export commonly used types
pub use error::{Error, ErrorKind, Result};
pub use runtime::{Gc, Object, ObjectRef, Reflect, WeakGc};
