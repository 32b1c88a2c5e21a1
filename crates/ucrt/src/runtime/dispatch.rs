//! Name-based method dispatch.
//!
//! This module implements [`Object::call`](crate::runtime::Object::call), the
//! only way to invoke a method when just an [`ObjectRef`] is held.
//!
//! # Dispatch Algorithm
//!
//! 1. Collect the receiver's methods named `name` from [`Reflect::METHODS`]
//! 2. Pick the first one whose arity equals `args.len()`
//! 3. If none matches, try the universal methods every object answers
//! 4. Otherwise fail with [`Error::NoSuchFunction`], listing the arities
//!    that exist under `name` so a wrong arity is told apart from an
//!    unknown name
//!
//! Overload resolution is by arity only. Methods that need to discriminate
//! on argument types do so inside their implementation.
//!
//! # Example
//!
//! ```rust
//! use ucrt::runtime::{Int32, Method, ObjectRef, Reflect};
//! use ucrt::runtime::dispatch;
//!
//! struct Counter;
//!
//! impl Counter {
//!     fn answer(&self, _args: &[ObjectRef]) -> ucrt::Result<ObjectRef> {
//!         Ok(Int32::make(42).into_object())
//!     }
//! }
//!
//! impl Reflect for Counter {
//!     const METHODS: &'static [Method<Self>] = &[Method::new("Answer", 0, Counter::answer)];
//! }
//!
//! let result = dispatch::invoke(&Counter, "Answer", &[]).unwrap();
//! assert_eq!(result.describe(), "42");
//! assert!(dispatch::invoke(&Counter, "Answer", &[ObjectRef::null()]).is_err());
//! ```

use crate::error::{Error, Result};
use crate::runtime::object::{Object, ObjectRef, Reflect};
use crate::runtime::primitive::{Bool, Int64};
use crate::runtime::string::Text;
use ucrt_log::{debug, trace};

/// Implementation of a reflective method on `T`.
pub type MethodImp<T> = fn(&T, &[ObjectRef]) -> Result<ObjectRef>;

/// Implementation of a reflective constructor.
pub type ConstructorImp = fn(&[ObjectRef]) -> Result<ObjectRef>;

/// One entry of a type's method table.
///
/// The implementation is only reachable through [`invoke`], which matches
/// the argument count against the entry first.
pub struct Method<T> {
    name: &'static str,
    arity: usize,
    imp: MethodImp<T>,
}

impl<T> Method<T> {
    /// Creates a method table entry.
    #[must_use]
    pub const fn new(name: &'static str, arity: usize, imp: MethodImp<T>) -> Self {
        Method { name, arity, imp }
    }

    /// Name the method is called by.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Exact number of arguments.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }
}

/// One entry of a type's constructor table.
#[derive(Clone, Copy)]
pub struct Constructor {
    arity: usize,
    ctor: ConstructorImp,
}

impl Constructor {
    /// Creates a constructor table entry.
    #[must_use]
    pub const fn new(arity: usize, ctor: ConstructorImp) -> Self {
        Constructor { arity, ctor }
    }

    /// Exact number of arguments.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Builds an instance from `args`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidArgument`] if `args.len()` differs from the
    /// arity, otherwise with whatever the constructor body returns.
    pub fn construct(&self, args: &[ObjectRef]) -> Result<ObjectRef> {
        if args.len() != self.arity {
            return Err(Error::invalid_argument(format!(
                "constructor takes {} argument(s), got {}",
                self.arity,
                args.len()
            )));
        }
        (self.ctor)(args)
    }
}

impl std::fmt::Debug for Constructor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Constructor")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Name/arity pairs answered by every object unless its own table shadows
/// them.
pub const UNIVERSAL_METHODS: &[(&str, usize)] = &[
    ("GetTypeName", 0),
    ("ToString", 0),
    ("GetHashCode", 0),
    ("Equals", 1),
];

/// Dispatches `name` on `this` by arity.
///
/// # Errors
///
/// Returns [`Error::NoSuchFunction`] when neither the method table nor the
/// universal methods have an entry for (`name`, `args.len()`). Errors from
/// the method body propagate unchanged.
pub fn invoke<T: Reflect>(this: &T, name: &str, args: &[ObjectRef]) -> Result<ObjectRef> {
    let arity = args.len();
    trace!("call {}::{name}/{arity}", T::static_type_name());

    if let Some(method) = T::METHODS
        .iter()
        .find(|method| method.name == name && method.arity == arity)
    {
        return (method.imp)(this, args);
    }

    if let Some(result) = universal(this, name, args) {
        return result;
    }

    let overloads = overloads::<T>(name);
    debug!(
        "no method {}::{name}/{arity} (overloads: {overloads:?})",
        T::static_type_name()
    );
    Err(Error::NoSuchFunction {
        type_name: T::static_type_name().to_string(),
        name: name.to_string(),
        arity,
        overloads,
    })
}

/// Arities available under `name` on `T`, in ascending order.
#[must_use]
pub fn overloads<T: Reflect>(name: &str) -> Vec<usize> {
    let mut arities: Vec<usize> = T::METHODS
        .iter()
        .filter(|method| method.name == name)
        .map(|method| method.arity)
        .chain(
            UNIVERSAL_METHODS
                .iter()
                .filter(|(universal, _)| *universal == name)
                .map(|(_, arity)| *arity),
        )
        .collect();
    arities.sort_unstable();
    arities.dedup();
    arities
}

/// True if `T` answers `name` with `arity` arguments.
#[must_use]
pub fn responds_to<T: Reflect>(name: &str, arity: usize) -> bool {
    overloads::<T>(name).contains(&arity)
}

fn universal<T: Reflect>(this: &T, name: &str, args: &[ObjectRef]) -> Option<Result<ObjectRef>> {
    let result = match (name, args) {
        ("GetTypeName", []) => Ok(Text::make(this.type_name()).into_object()),
        ("ToString", []) => Ok(Text::make(this.describe()).into_object()),
        ("GetHashCode", []) => {
            #[allow(clippy::cast_possible_wrap)]
            let code = this.hash_code() as i64;
            Ok(Int64::make(code).into_object())
        }
        ("Equals", [other]) => {
            let equal = other
                .get()
                .is_ok_and(|other| this.equals(other));
            Ok(Bool::make(equal).into_object())
        }
        _ => return None,
    };
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Int32;

    struct Tally {
        hits: std::cell::Cell<usize>,
    }

    impl Tally {
        fn touch(&self, _args: &[ObjectRef]) -> Result<ObjectRef> {
            self.hits.set(self.hits.get() + 1);
            Ok(ObjectRef::null())
        }

        fn first(&self, args: &[ObjectRef]) -> Result<ObjectRef> {
            Ok(args[0].clone())
        }

        fn fixed_name(&self, _args: &[ObjectRef]) -> Result<ObjectRef> {
            Ok(Text::make("custom").into_object())
        }
    }

    impl Reflect for Tally {
        const METHODS: &'static [Method<Self>] = &[
            Method::new("Touch", 0, Tally::touch),
            Method::new("Touch", 1, Tally::first),
            Method::new("Touch", 3, Tally::first),
            Method::new("GetTypeName", 0, Tally::fixed_name),
        ];

        fn static_type_name() -> &'static str {
            "Tally"
        }
    }

    fn tally() -> Tally {
        Tally {
            hits: std::cell::Cell::new(0),
        }
    }

    #[test]
    fn test_dispatch_by_arity() {
        let p = tally();
        let void = invoke(&p, "Touch", &[]).unwrap();
        assert!(void.is_null());
        assert_eq!(p.hits.get(), 1);

        let arg = Int32::make(3).into_object();
        let echoed = invoke(&p, "Touch", &[arg.clone()]).unwrap();
        assert!(echoed.ref_eq(&arg));
    }

    #[test]
    fn test_null_arguments_are_allowed() {
        let p = tally();
        let result = invoke(&p, "Touch", &[ObjectRef::null()]).unwrap();
        assert!(result.is_null());
    }

    #[test]
    fn test_wrong_arity_lists_overloads() {
        let p = tally();
        let err = invoke(&p, "Touch", &[ObjectRef::null(), ObjectRef::null()]).unwrap_err();
        match err {
            Error::NoSuchFunction {
                type_name,
                arity,
                overloads,
                ..
            } => {
                assert_eq!(type_name, "Tally");
                assert_eq!(arity, 2);
                assert_eq!(overloads, vec![0, 1, 3]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_name_has_no_overloads() {
        let err = invoke(&tally(), "Missing", &[]).unwrap_err();
        assert!(matches!(
            err,
            Error::NoSuchFunction { ref overloads, .. } if overloads.is_empty()
        ));
    }

    #[test]
    fn test_table_shadows_universal() {
        let name = invoke(&tally(), "GetTypeName", &[]).unwrap();
        assert_eq!(name.cast::<Text>().as_str(), "custom");
    }

    #[test]
    fn test_universal_methods() {
        let value = Int32::new(8);
        let name = invoke(&value, "GetTypeName", &[]).unwrap();
        assert_eq!(name.cast::<Text>().as_str(), "Int32");

        let text = invoke(&value, "ToString", &[]).unwrap();
        assert_eq!(text.cast::<Text>().as_str(), "8");

        let same = invoke(&value, "Equals", &[Int32::make(8).into_object()]).unwrap();
        assert!(same.cast::<Bool>().value());

        let null = invoke(&value, "Equals", &[ObjectRef::null()]).unwrap();
        assert!(!null.cast::<Bool>().value());

        let hash = invoke(&value, "GetHashCode", &[]).unwrap();
        assert!(hash.is::<Int64>());
    }

    #[test]
    fn test_table_accessors() {
        let touch = &Tally::METHODS[2];
        assert_eq!(touch.name(), "Touch");
        assert_eq!(touch.arity(), 3);

        let arities: Vec<usize> = Int32::CONSTRUCTORS.iter().map(Constructor::arity).collect();
        assert_eq!(arities, vec![0, 1]);
    }

    #[test]
    fn test_construct_checks_argument_count() {
        let from_value = Int32::CONSTRUCTORS[1];
        let err = from_value.construct(&[]).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);

        let built = from_value.construct(&[Int32::make(4).into_object()]).unwrap();
        assert_eq!(built.cast::<Int32>().value(), 4);
    }

    #[test]
    fn test_responds_to() {
        assert!(responds_to::<Tally>("Touch", 3));
        assert!(!responds_to::<Tally>("Touch", 2));
        assert!(responds_to::<Tally>("Equals", 1));
    }
}
