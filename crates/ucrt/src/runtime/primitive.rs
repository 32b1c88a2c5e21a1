//! Boxed scalar values.
//!
//! Each wrapper holds one immutable native value, compares and hashes by
//! that value, and renders it with the native `Display` form. Every wrapper
//! has two reflective constructors: arity 0 (the default value) and arity 1
//! (any source accepted by the matching conversion in
//! [`convert`](crate::runtime::convert)).

use crate::error::Result;
use crate::runtime::convert;
use crate::runtime::dispatch::Constructor;
use crate::runtime::gc::Gc;
use crate::runtime::hash::HashCode;
use crate::runtime::object::{ObjectRef, Reflect};
use std::fmt;

/// Smallest `Int16`.
pub const INT16_MIN: i16 = i16::MIN;
/// Largest `Int16`.
pub const INT16_MAX: i16 = i16::MAX;
/// Smallest `Int32`.
pub const INT32_MIN: i32 = i32::MIN;
/// Largest `Int32`.
pub const INT32_MAX: i32 = i32::MAX;
/// Smallest `Int64`.
pub const INT64_MIN: i64 = i64::MIN;
/// Largest `Int64`.
pub const INT64_MAX: i64 = i64::MAX;
/// Largest `UInt16`.
pub const UINT16_MAX: u16 = u16::MAX;
/// Largest `UInt32`.
pub const UINT32_MAX: u32 = u32::MAX;
/// Largest `UInt64`.
pub const UINT64_MAX: u64 = u64::MAX;
/// Largest `Byte`.
pub const BYTE_MAX: u8 = u8::MAX;
/// Smallest `SByte`.
pub const SBYTE_MIN: i8 = i8::MIN;
/// Largest `SByte`.
pub const SBYTE_MAX: i8 = i8::MAX;

macro_rules! primitive {
    ($(#[$meta:meta])* $name:ident($native:ty) via $convert:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq)]
        pub struct $name {
            value: $native,
        }

        impl $name {
            #[doc = concat!("Wraps a native value in a `", stringify!($name), "`.")]
            #[must_use]
            pub const fn new(value: $native) -> Self {
                $name { value }
            }

            #[doc = concat!("Allocates a `", stringify!($name), "` behind a strong handle.")]
            #[must_use]
            pub fn make(value: $native) -> Gc<Self> {
                Gc::new(Self::new(value))
            }

            /// Returns the wrapped value.
            #[must_use]
            pub const fn value(&self) -> $native {
                self.value
            }

            fn construct_default(_args: &[ObjectRef]) -> Result<ObjectRef> {
                Ok(Self::make(<$native>::default()).into_object())
            }

            fn construct_from(args: &[ObjectRef]) -> Result<ObjectRef> {
                Ok(Self::make($convert(&args[0])?).into_object())
            }
        }

        impl Reflect for $name {
            const CONSTRUCTORS: &'static [Constructor] = &[
                Constructor::new(0, $name::construct_default),
                Constructor::new(1, $name::construct_from),
            ];

            fn static_type_name() -> &'static str {
                stringify!($name)
            }

            fn render(&self) -> String {
                self.value.to_string()
            }

            fn hash_value(&self) -> u64 {
                self.value.hash_code()
            }

            fn value_eq(&self, other: &Self) -> bool {
                self.value == other.value
            }
        }

        impl From<$native> for $name {
            fn from(value: $native) -> Self {
                $name::new(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.value)
            }
        }
    };
}

primitive!(
    /// Signed 16-bit integer.
    Int16(i16) via convert::as_int16
);
primitive!(
    /// Signed 32-bit integer.
    Int32(i32) via convert::as_int32
);
primitive!(
    /// Signed 64-bit integer.
    Int64(i64) via convert::as_int64
);
primitive!(
    /// Unsigned 16-bit integer.
    UInt16(u16) via convert::as_uint16
);
primitive!(
    /// Unsigned 32-bit integer.
    UInt32(u32) via convert::as_uint32
);
primitive!(
    /// Unsigned 64-bit integer.
    UInt64(u64) via convert::as_uint64
);
primitive!(
    /// Single-precision float.
    Float(f32) via convert::as_float
);
primitive!(
    /// Double-precision float.
    Double(f64) via convert::as_double
);
primitive!(
    /// Unsigned 8-bit integer.
    Byte(u8) via convert::as_byte
);
primitive!(
    /// Signed 8-bit integer.
    SByte(i8) via convert::as_sbyte
);
primitive!(
    /// Boolean.
    Bool(bool) via convert::as_bool
);
