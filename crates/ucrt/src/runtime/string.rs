//! Immutable, reflectable text.
//!
//! [`Text`] is the runtime's `String` type: an immutable byte string (UTF-8)
//! that hashes and compares by content. Indices are byte offsets.
//!
//! Building a long string should go through [`Text::concat`] (or the
//! [`concat_text!`](crate::concat_text) macro), which sizes the result once
//! and copies every piece a single time. Chaining `+` is supported too and
//! yields byte-identical results, but reallocates at every step.
//!
//! # Example
//!
//! ```rust
//! use ucrt::runtime::Text;
//!
//! let hello = Text::make("Hello");
//! let world = Text::make("World");
//!
//! let fast = Text::concat(&[&hello, &", ", &world]).unwrap();
//! let slow = (&*hello + &Text::new(", ")) + &*world;
//!
//! assert_eq!(fast, slow);
//! assert_eq!(fast.as_str(), "Hello, World");
//! assert_eq!(fast.to_string(), "\"Hello, World\"");
//! ```

use crate::error::{Error, Result};
use crate::runtime::convert;
use crate::runtime::dispatch::{Constructor, Method};
use crate::runtime::gc::Gc;
use crate::runtime::hash::native_hash;
use crate::runtime::object::{ObjectRef, Reflect};
use crate::runtime::primitive::{Bool, Byte, Int64};
use std::fmt;
use std::ops::Add;

/// Joins native strings with a single allocation.
///
/// # Example
///
/// ```rust
/// use ucrt::runtime::string::concat_strings;
///
/// assert_eq!(concat_strings(&["a", "bc", "", "d"]), "abcd");
/// ```
#[must_use]
pub fn concat_strings(pieces: &[&str]) -> String {
    let total = pieces.iter().map(|piece| piece.len()).sum();
    let mut out = String::with_capacity(total);
    for piece in pieces {
        out.push_str(piece);
    }
    out
}

/// Anything that can be a piece of a [`Text::concat`].
pub trait TextPiece {
    /// Borrows the piece's characters.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NullReference`] for a null text handle.
    fn text(&self) -> Result<&str>;
}

impl TextPiece for str {
    fn text(&self) -> Result<&str> {
        Ok(self)
    }
}

impl TextPiece for &str {
    fn text(&self) -> Result<&str> {
        Ok(*self)
    }
}

impl TextPiece for String {
    fn text(&self) -> Result<&str> {
        Ok(self.as_str())
    }
}

impl TextPiece for Text {
    fn text(&self) -> Result<&str> {
        Ok(self.value.as_str())
    }
}

impl TextPiece for Gc<Text> {
    fn text(&self) -> Result<&str> {
        Ok(self.get()?.value.as_str())
    }
}

/// Immutable text object, registered as `String`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Text {
    value: String,
}

impl Text {
    /// Registered type name.
    pub const TYPE_NAME: &'static str = "String";

    /// Creates a text value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Text {
            value: value.into(),
        }
    }

    /// Allocates a text value behind a strong handle.
    #[must_use]
    pub fn make(value: impl Into<String>) -> Gc<Self> {
        Gc::new(Self::new(value))
    }

    /// Concatenates any mix of pieces into a new text.
    ///
    /// The total length is computed first, so the result is allocated once.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NullReference`] if a piece is a null handle.
    pub fn concat(pieces: &[&dyn TextPiece]) -> Result<Gc<Self>> {
        let strs = pieces
            .iter()
            .map(|piece| piece.text())
            .collect::<Result<Vec<&str>>>()?;
        Ok(Self::make(concat_strings(&strs)))
    }

    /// Borrows the characters.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// True if the text has no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// True if `needle` occurs in the text. The empty needle always does.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.value.contains(needle)
    }

    /// True if the text begins with `prefix`.
    #[must_use]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.value.starts_with(prefix)
    }

    /// True if the text ends with `suffix`.
    #[must_use]
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.value.ends_with(suffix)
    }

    /// Returns the byte at `index`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<u8> {
        self.value
            .as_bytes()
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                size: self.len(),
                type_name: Self::TYPE_NAME,
            })
    }

    /// Returns the text from byte `start` to the end.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`] if `start > len()` and with
    /// [`Error::InvalidArgument`] if `start` splits a character.
    pub fn substring(&self, start: usize) -> Result<Gc<Self>> {
        self.substring_len(start, usize::MAX)
    }

    /// Returns at most `count` bytes starting at byte `start`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`] if `start > len()` and with
    /// [`Error::InvalidArgument`] if the range splits a character.
    pub fn substring_len(&self, start: usize, count: usize) -> Result<Gc<Self>> {
        if start > self.len() {
            return Err(Error::IndexOutOfRange {
                index: start,
                size: self.len(),
                type_name: Self::TYPE_NAME,
            });
        }
        let end = start.saturating_add(count).min(self.len());
        self.value
            .get(start..end)
            .map(Self::make)
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "range {start}..{end} does not fall on character boundaries"
                ))
            })
    }

    /// Iterates over the bytes.
    pub fn bytes(&self) -> std::str::Bytes<'_> {
        self.value.bytes()
    }

    fn construct_empty(_args: &[ObjectRef]) -> Result<ObjectRef> {
        Ok(Self::make(String::new()).into_object())
    }

    fn construct_copy(args: &[ObjectRef]) -> Result<ObjectRef> {
        let source = text_arg(&args[0])?;
        Ok(Self::make(source.value.clone()).into_object())
    }

    fn u_length(&self, _args: &[ObjectRef]) -> Result<ObjectRef> {
        let len = i64::try_from(self.len())
            .map_err(|_| Error::invalid_argument("length does not fit in Int64"))?;
        Ok(Int64::make(len).into_object())
    }

    fn u_contains(&self, args: &[ObjectRef]) -> Result<ObjectRef> {
        let needle = text_arg(&args[0])?;
        Ok(Bool::make(self.contains(needle.as_str())).into_object())
    }

    fn u_ends_with(&self, args: &[ObjectRef]) -> Result<ObjectRef> {
        let suffix = text_arg(&args[0])?;
        Ok(Bool::make(self.ends_with(suffix.as_str())).into_object())
    }

    fn u_starts_with(&self, args: &[ObjectRef]) -> Result<ObjectRef> {
        let prefix = text_arg(&args[0])?;
        Ok(Bool::make(self.starts_with(prefix.as_str())).into_object())
    }

    fn u_equals(&self, args: &[ObjectRef]) -> Result<ObjectRef> {
        let other = text_arg(&args[0])?;
        Ok(Bool::make(self.value == other.value).into_object())
    }

    fn u_substring(&self, args: &[ObjectRef]) -> Result<ObjectRef> {
        let start = convert::as_index(&args[0])?;
        Ok(self.substring(start)?.into_object())
    }

    fn u_substring_len(&self, args: &[ObjectRef]) -> Result<ObjectRef> {
        let start = convert::as_index(&args[0])?;
        let count = convert::as_index(&args[1])?;
        Ok(self.substring_len(start, count)?.into_object())
    }

    fn u_get(&self, args: &[ObjectRef]) -> Result<ObjectRef> {
        let index = convert::as_index(&args[0])?;
        Ok(Byte::make(self.get(index)?).into_object())
    }

    fn op_add(&self, args: &[ObjectRef]) -> Result<ObjectRef> {
        let mut pieces: Vec<&str> = Vec::with_capacity(args.len() + 1);
        pieces.push(&self.value);
        for arg in args {
            pieces.push(&text_arg(arg)?.value);
        }
        Ok(Self::make(concat_strings(&pieces)).into_object())
    }
}

fn text_arg(arg: &ObjectRef) -> Result<&Text> {
    arg.downcast_ref::<Text>().ok_or_else(|| {
        Error::invalid_cast(format!("expected a String, got {}", arg.type_name()))
    })
}

impl Reflect for Text {
    const METHODS: &'static [Method<Self>] = &[
        Method::new("ULength", 0, Text::u_length),
        Method::new("UContains", 1, Text::u_contains),
        Method::new("UEndsWith", 1, Text::u_ends_with),
        Method::new("UStartsWith", 1, Text::u_starts_with),
        Method::new("UEquals", 1, Text::u_equals),
        Method::new("USubstring", 1, Text::u_substring),
        Method::new("USubstring", 2, Text::u_substring_len),
        Method::new("Get", 1, Text::u_get),
        Method::new("OpAdd", 1, Text::op_add),
        Method::new("OpAdd", 2, Text::op_add),
        Method::new("OpAdd", 3, Text::op_add),
        Method::new("OpAdd", 4, Text::op_add),
        Method::new("OpAdd", 5, Text::op_add),
        Method::new("OpAdd", 6, Text::op_add),
        Method::new("OpAdd", 7, Text::op_add),
        Method::new("OpAdd", 8, Text::op_add),
        Method::new("OpAdd", 9, Text::op_add),
        Method::new("OpAdd", 10, Text::op_add),
    ];

    const CONSTRUCTORS: &'static [Constructor] = &[
        Constructor::new(0, Text::construct_empty),
        Constructor::new(1, Text::construct_copy),
    ];

    fn static_type_name() -> &'static str {
        Self::TYPE_NAME
    }

    fn render(&self) -> String {
        concat_strings(&["\"", &self.value, "\""])
    }

    fn hash_value(&self) -> u64 {
        native_hash(self.value.as_str())
    }

    fn value_eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text::new(value)
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Text::new(value)
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

/// Raw characters, without the quotes used by `ToString`.
impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl Add<&Text> for &Text {
    type Output = Gc<Text>;

    fn add(self, rhs: &Text) -> Gc<Text> {
        Text::make(concat_strings(&[&self.value, &rhs.value]))
    }
}

impl Add<&Text> for Gc<Text> {
    type Output = Gc<Text>;

    /// # Panics
    ///
    /// Panics if `self` is null.
    fn add(self, rhs: &Text) -> Gc<Text> {
        &*self + rhs
    }
}

/// Concatenates texts, string slices and strings with one allocation.
///
/// Expands to [`Text::concat`], so it yields a `Result<Gc<Text>>`.
///
/// # Example
///
/// ```rust
/// use ucrt::concat_text;
/// use ucrt::runtime::Text;
///
/// let name = Text::make("ucrt");
/// let greeting = concat_text!("Hello, ", name, String::from("!")).unwrap();
/// assert_eq!(greeting.as_str(), "Hello, ucrt!");
/// ```
#[macro_export]
macro_rules! concat_text {
    ($($piece:expr),* $(,)?) => {
        $crate::runtime::Text::concat(&[$(&$piece as &dyn $crate::runtime::string::TextPiece),*])
    };
}
