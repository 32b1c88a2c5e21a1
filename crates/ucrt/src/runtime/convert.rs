//! Narrow-to-wide conversion of boxed numbers.
//!
//! Each `as_*` function accepts a fixed set of source wrappers, the ones
//! whose every value fits the destination, and fails with
//! [`Error::InvalidCast`] for anything else (null included):
//!
//! | Destination | Accepted sources |
//! |-------------|------------------|
//! | `Int16`  | `Int16`, `Byte`, `SByte` |
//! | `Int32`  | `Int32`, `UInt16`, `Int16`, `Byte`, `SByte` |
//! | `Int64`  | `Int64`, `UInt32`, `Int32`, `UInt16`, `Int16`, `Byte`, `SByte` |
//! | `UInt16` | `UInt16`, `Byte` |
//! | `UInt32` | `UInt32`, `UInt16`, `Byte` |
//! | `UInt64` | `UInt64`, `UInt32`, `UInt16`, `Byte` |
//! | `Byte`   | `Byte` |
//! | `SByte`  | `SByte` |
//! | `Float`  | `UInt64`, `Int64`, `UInt32`, `Int32`, `UInt16`, `Int16`, `Byte`, `SByte` |
//! | `Double` | `Float`, `UInt64`, `Int64`, `UInt32`, `Int32`, `Int16`, `UInt16`, `Byte`, `SByte` |
//!
//! The floating point rows accept 64-bit integers even though large values
//! round.

#![allow(
    clippy::cast_lossless,
    clippy::cast_precision_loss,
    clippy::unnecessary_cast
)]

use crate::error::{Error, Result};
use crate::runtime::object::ObjectRef;
use crate::runtime::primitive::{
    Bool, Byte, Double, Float, Int16, Int32, Int64, SByte, UInt16, UInt32, UInt64,
};

macro_rules! widening {
    ($(#[$meta:meta])* $func:ident -> $target:ty : $dest:literal [$($source:ident),+ $(,)?]) => {
        $(#[$meta])*
        ///
        /// # Errors
        ///
        /// Returns [`Error::InvalidCast`] if `value` is null or not one of
        /// the accepted sources.
        pub fn $func(value: &ObjectRef) -> Result<$target> {
            $(
                if let Some(source) = value.downcast_ref::<$source>() {
                    return Ok(source.value() as $target);
                }
            )+
            Err(cast_error(value, $dest))
        }
    };
}

fn cast_error(value: &ObjectRef, dest: &str) -> Error {
    Error::invalid_cast(format!(
        "Cannot convert {} to {dest}",
        value.type_name()
    ))
}

widening!(
    /// Reads an `Int16` from a narrower or equal integer.
    as_int16 -> i16 : "Int16" [Int16, Byte, SByte]
);
widening!(
    /// Reads an `Int32` from a narrower or equal integer.
    as_int32 -> i32 : "Int32" [Int32, UInt16, Int16, Byte, SByte]
);
widening!(
    /// Reads an `Int64` from a narrower or equal integer.
    as_int64 -> i64 : "Int64" [Int64, UInt32, Int32, UInt16, Int16, Byte, SByte]
);
widening!(
    /// Reads a `UInt16` from a narrower or equal unsigned integer.
    as_uint16 -> u16 : "UInt16" [UInt16, Byte]
);
widening!(
    /// Reads a `UInt32` from a narrower or equal unsigned integer.
    as_uint32 -> u32 : "UInt32" [UInt32, UInt16, Byte]
);
widening!(
    /// Reads a `UInt64` from a narrower or equal unsigned integer.
    as_uint64 -> u64 : "UInt64" [UInt64, UInt32, UInt16, Byte]
);
widening!(
    /// Reads a `Byte`.
    as_byte -> u8 : "Byte" [Byte]
);
widening!(
    /// Reads an `SByte`.
    as_sbyte -> i8 : "SByte" [SByte]
);
widening!(
    /// Reads a `Float` from any integer.
    as_float -> f32 : "Float" [UInt64, Int64, UInt32, Int32, UInt16, Int16, Byte, SByte]
);
widening!(
    /// Reads a `Double` from a `Float` or any integer.
    as_double -> f64 : "Double" [Float, UInt64, Int64, UInt32, Int32, Int16, UInt16, Byte, SByte]
);

/// Reads a `Bool`.
///
/// # Errors
///
/// Returns [`Error::InvalidCast`] if `value` is null or not a `Bool`.
pub fn as_bool(value: &ObjectRef) -> Result<bool> {
    value
        .downcast_ref::<Bool>()
        .map(Bool::value)
        .ok_or_else(|| cast_error(value, "Bool"))
}

/// Reads a size argument for container constructors and methods.
///
/// # Errors
///
/// Returns [`Error::InvalidCast`] for non-integers and
/// [`Error::InvalidArgument`] for negative values.
pub fn as_index(value: &ObjectRef) -> Result<usize> {
    let raw = as_int64(value).or_else(|_| {
        as_uint64(value).and_then(|v| {
            i64::try_from(v).map_err(|_| Error::invalid_argument("index does not fit in Int64"))
        })
    })?;
    usize::try_from(raw)
        .map_err(|_| Error::invalid_argument(format!("expected a non-negative index, got {raw}")))
}
