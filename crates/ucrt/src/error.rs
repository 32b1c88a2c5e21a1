//! Error types for the `ucrt` runtime.
//!
//! Every failure the object model can raise has its own variant so callers
//! can catch by kind at dispatch boundaries. Nothing in the runtime swallows
//! or retries an error; they propagate to the caller through [`Result`].

use std::fmt;

/// Errors that can occur in the `ucrt` runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A null strong reference was dereferenced.
    NullReference {
        /// Description of the failed access.
        message: String,
    },

    /// A weak reference was locked after its object was destroyed.
    ExpiredWeakReference,

    /// An object could not be viewed as the requested type.
    InvalidCast {
        /// Description of the failed cast.
        message: String,
    },

    /// An argument was outside the domain of an operation.
    InvalidArgument {
        /// Description of the rejected argument.
        message: String,
    },

    /// An index was not smaller than the size of the collection.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The size of the collection at the time of the access.
        size: usize,
        /// Type name of the collection.
        type_name: &'static str,
    },

    /// A map lookup for an absent key.
    KeyNotFound {
        /// String form of the key.
        key: String,
        /// Type name of the map.
        type_name: &'static str,
    },

    /// A search predicate matched no element.
    ValueNotFound,

    /// No method with the given name and arity exists on the receiver.
    NoSuchFunction {
        /// Type name of the receiver.
        type_name: String,
        /// Requested method name.
        name: String,
        /// Requested arity.
        arity: usize,
        /// Arities that do exist under `name` (empty if the name is unknown).
        overloads: Vec<usize>,
    },

    /// The type is registered but has no constructor of the given arity.
    NoSuchConstructor {
        /// Registered type name.
        type_name: String,
        /// Requested arity.
        arity: usize,
    },

    /// No type is registered under the given name.
    NoSuchRegisteredType {
        /// Requested type name.
        type_name: String,
    },

    /// A second registration was attempted under an existing type name.
    DuplicateTypeRegistration {
        /// The contested type name.
        type_name: String,
    },

    /// An event with no functors was evaluated for a value.
    EmptyEvent {
        /// Type name of the event.
        type_name: &'static str,
    },

    /// A self reference was requested before the object had an owner.
    SelfReferenceUnavailable {
        /// Type name of the object.
        type_name: &'static str,
    },
}

/// Fieldless discriminant of [`Error`], for matching by failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::NullReference`].
    NullReference,
    /// See [`Error::ExpiredWeakReference`].
    ExpiredWeakReference,
    /// See [`Error::InvalidCast`].
    InvalidCast,
    /// See [`Error::InvalidArgument`].
    InvalidArgument,
    /// See [`Error::IndexOutOfRange`].
    IndexOutOfRange,
    /// See [`Error::KeyNotFound`].
    KeyNotFound,
    /// See [`Error::ValueNotFound`].
    ValueNotFound,
    /// See [`Error::NoSuchFunction`].
    NoSuchFunction,
    /// See [`Error::NoSuchConstructor`].
    NoSuchConstructor,
    /// See [`Error::NoSuchRegisteredType`].
    NoSuchRegisteredType,
    /// See [`Error::DuplicateTypeRegistration`].
    DuplicateTypeRegistration,
    /// See [`Error::EmptyEvent`].
    EmptyEvent,
    /// See [`Error::SelfReferenceUnavailable`].
    SelfReferenceUnavailable,
}

impl Error {
    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NullReference { .. } => ErrorKind::NullReference,
            Error::ExpiredWeakReference => ErrorKind::ExpiredWeakReference,
            Error::InvalidCast { .. } => ErrorKind::InvalidCast,
            Error::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Error::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Error::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            Error::ValueNotFound => ErrorKind::ValueNotFound,
            Error::NoSuchFunction { .. } => ErrorKind::NoSuchFunction,
            Error::NoSuchConstructor { .. } => ErrorKind::NoSuchConstructor,
            Error::NoSuchRegisteredType { .. } => {
                ErrorKind::NoSuchRegisteredType
            }
            Error::DuplicateTypeRegistration { .. } => {
                ErrorKind::DuplicateTypeRegistration
            }
            Error::EmptyEvent { .. } => ErrorKind::EmptyEvent,
            Error::SelfReferenceUnavailable { .. } => {
                ErrorKind::SelfReferenceUnavailable
            }
        }
    }

    /// True for [`Error::NoSuchConstructor`] and its refinement
    /// [`Error::NoSuchRegisteredType`].
    #[must_use]
    pub fn is_no_such_constructor(&self) -> bool {
        matches!(
            self,
            Error::NoSuchConstructor { .. } | Error::NoSuchRegisteredType { .. }
        )
    }

    pub(crate) fn null_reference() -> Self {
        Error::NullReference {
            message: "Trying to dereference a null pointer.".to_string(),
        }
    }

    pub(crate) fn invalid_cast(message: impl Into<String>) -> Self {
        Error::InvalidCast {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NullReference { message }
            | Error::InvalidCast { message }
            | Error::InvalidArgument { message } => write!(f, "{message}"),
            Error::ExpiredWeakReference => {
                write!(f, "Trying to dereference an expired WeakPtr.")
            }
            Error::IndexOutOfRange {
                index,
                size,
                type_name,
            } => {
                write!(
                    f,
                    "Index: {index} is out of range for a {type_name} of size: {size}"
                )
            }
            Error::KeyNotFound { key, type_name } => {
                write!(f, "Key: \"{key}\" is invalid for {type_name}")
            }
            Error::ValueNotFound => write!(f, "value not found"),
            Error::NoSuchFunction {
                type_name,
                name,
                arity,
                overloads,
            } => {
                if overloads.is_empty() {
                    write!(
                        f,
                        "{type_name} has no function named '{name}' (called with {arity} args)"
                    )
                } else {
                    write!(
                        f,
                        "{type_name}::{name} has no overload taking {arity} args (available: {overloads:?})"
                    )
                }
            }
            Error::NoSuchConstructor { type_name, arity } => {
                write!(f, "{type_name} has no constructor taking {arity} args")
            }
            Error::NoSuchRegisteredType { type_name } => {
                write!(f, "No type named '{type_name}' is registered")
            }
            Error::DuplicateTypeRegistration { type_name } => {
                write!(
                    f,
                    "A type named '{type_name}' is already registered; qualify the name with its module path"
                )
            }
            Error::EmptyEvent { type_name } => {
                write!(
                    f,
                    "{type_name} has no added functors that can return a value that can be returned."
                )
            }
            Error::SelfReferenceUnavailable { type_name } => {
                write!(
                    f,
                    "{type_name} is not owned by a GCPtr yet; no self reference is available"
                )
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result type for `ucrt` runtime operations.
pub type Result<T> = std::result::Result<T, Error>;
