//! The root object type.
//!
//! Every reflectable value is an [`Object`]. Concrete types never implement
//! [`Object`] by hand: they implement [`Reflect`], which declares their
//! method and constructor tables plus optional value semantics, and the
//! blanket impl turns that into the dynamic interface used through
//! [`ObjectRef`] handles.
//!
//! # Example
//!
//! ```rust
//! use ucrt::runtime::{Int32, Object, ObjectRef};
//!
//! let value: ObjectRef = Int32::make(12).into_object();
//!
//! assert_eq!(value.type_name(), "Int32");
//! assert_eq!(value.describe(), "12");
//! assert_eq!(value.call("GetTypeName", &[]).unwrap().describe(), "\"Int32\"");
//! ```

use crate::error::Result;
use crate::runtime::dispatch::{self, Constructor, Method};
use crate::runtime::gc::Gc;
use crate::runtime::hash::native_hash;
use std::any::Any;
use std::rc::Rc;

/// Strong handle to any object, the unit of dynamic dispatch.
pub type ObjectRef = Gc<dyn Object>;

/// Dynamic interface shared by every reflectable value.
///
/// This trait is implemented automatically for every [`Reflect`] type.
pub trait Object: Any {
    /// Registered name of the most-derived type.
    fn type_name(&self) -> &'static str;

    /// Invokes the method `name` whose arity equals `args.len()`.
    ///
    /// Void methods return a null [`ObjectRef`].
    ///
    /// # Errors
    ///
    /// Fails with [`crate::Error::NoSuchFunction`] when no method matches,
    /// or with whatever the method itself returns.
    fn call(&self, name: &str, args: &[ObjectRef]) -> Result<ObjectRef>;

    /// Human-readable form (the runtime's `ToString`).
    fn describe(&self) -> String;

    /// Hash code consistent with [`Object::equals`].
    fn hash_code(&self) -> u64;

    /// Value equality; objects of different types are never equal.
    fn equals(&self, other: &dyn Object) -> bool;

    /// Upcast for downcasting by reference.
    fn as_any(&self) -> &dyn Any;

    /// Reborrows as a trait object.
    fn as_dyn(&self) -> &dyn Object;

    /// Upcast for downcasting owned handles.
    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any>;
}

/// Static description of a reflectable type.
///
/// Every item has a default, so an empty `impl Reflect for T {}` already
/// yields an object with identity semantics and only the universal methods
/// (`GetTypeName`, `ToString`, `GetHashCode`, `Equals`).
pub trait Reflect: Any + Sized {
    /// Methods callable through [`Object::call`].
    const METHODS: &'static [Method<Self>] = &[];

    /// Constructors callable through the registry, matched by arity.
    const CONSTRUCTORS: &'static [Constructor] = &[];

    /// Name under which the type is known to the runtime.
    ///
    /// Falls back to the compiler's type path.
    fn static_type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// String form; identity-based by default.
    fn render(&self) -> String {
        format!("{}@{:p}", Self::static_type_name(), self)
    }

    /// Hash code; identity-based by default.
    fn hash_value(&self) -> u64 {
        native_hash(&(std::ptr::from_ref(self) as usize))
    }

    /// Value equality; identity by default.
    fn value_eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl<T: Reflect> Object for T {
    fn type_name(&self) -> &'static str {
        T::static_type_name()
    }

    fn call(&self, name: &str, args: &[ObjectRef]) -> Result<ObjectRef> {
        dispatch::invoke(self, name, args)
    }

    fn describe(&self) -> String {
        self.render()
    }

    fn hash_code(&self) -> u64 {
        self.hash_value()
    }

    fn equals(&self, other: &dyn Object) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self.value_eq(other))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_dyn(&self) -> &dyn Object {
        self
    }

    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

/// Values with a string form, used when rendering container contents.
///
/// Object handles render their pointee (or `null`); native scalars use their
/// `Display` form.
pub trait Describe {
    /// Returns the string form of this value.
    fn describe(&self) -> String;
}

macro_rules! display_describe {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_describe!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, char,
    str, String,
);

impl<T: Describe + ?Sized> Describe for &T {
    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Dynamic downcast of a base handle; null when the types differ.
#[must_use]
pub fn obj_cast<T: Object>(value: &ObjectRef) -> Gc<T> {
    value.cast::<T>()
}

/// Dynamic downcast of a base handle that fails on mismatch.
///
/// # Errors
///
/// Fails with [`crate::Error::InvalidCast`] carrying `message` if `value` is
/// null or not a `T`.
pub fn obj_cast_or_err<T: Object>(value: &ObjectRef, message: &str) -> Result<Gc<T>> {
    value.cast_or_err::<T>(message)
}
