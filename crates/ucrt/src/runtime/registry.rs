//! Process-wide type registry.
//!
//! Maps a type name to the constructor table of that type so instances can
//! be created from a name alone. The registry is created on first use and
//! immediately populated with the built-in types, in a fixed order, by one
//! explicit registration function. User types are added with
//! [`register_type`]; entries live for the rest of the process.
//!
//! # Thread Safety
//!
//! The map sits behind a `RwLock`, but the objects built from it are not
//! `Send`. Registration is expected to happen during start-up.
//!
//! # Example
//!
//! ```rust
//! use ucrt::runtime::registry;
//!
//! let value = registry::create_instance("Int64", &[]).unwrap();
//! assert_eq!(value.describe(), "0");
//!
//! let missing = registry::create_instance("TypeDoesntExist", &[]).unwrap_err();
//! assert!(missing.is_no_such_constructor());
//! ```

use crate::error::{Error, Result};
use crate::runtime::collections::{
    BstDeque, BstUnorderedMap, BstVector, Deque, UnorderedMap, Vector,
};
use crate::runtime::dispatch::Constructor;
use crate::runtime::object::{ObjectRef, Reflect};
use crate::runtime::primitive::{
    Bool, Byte, Double, Float, Int16, Int32, Int64, SByte, UInt16, UInt32, UInt64,
};
use crate::runtime::string::Text;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};
use ucrt_log::{debug, info, trace, warn};

struct Entry {
    ctors: &'static [Constructor],
    /// `None` for raw registrations that are not tied to a Rust type.
    type_id: Option<TypeId>,
}

struct Registry {
    types: RwLock<HashMap<String, Entry>>,
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let registry = Registry {
            types: RwLock::new(HashMap::with_capacity(32)),
        };
        registry.install_builtins();
        info!(
            "type registry initialised with {} built-in types",
            registry.len()
        );
        registry
    })
}

impl Registry {
    fn insert(
        &self,
        name: &str,
        ctors: &'static [Constructor],
        type_id: Option<TypeId>,
    ) -> Result<()> {
        let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = types.get(name) {
            // Re-registering the same Rust type is a no-op.
            if type_id.is_some() && existing.type_id == type_id {
                trace!("type '{name}' already registered");
                return Ok(());
            }
            warn!("rejected duplicate registration of type '{name}'");
            return Err(Error::DuplicateTypeRegistration {
                type_name: name.to_string(),
            });
        }

        debug!("registered type '{name}' with {} constructors", ctors.len());
        types.insert(name.to_string(), Entry { ctors, type_id });
        Ok(())
    }

    fn insert_type<T: Reflect>(&self) -> Result<()> {
        self.insert(
            T::static_type_name(),
            T::CONSTRUCTORS,
            Some(TypeId::of::<T>()),
        )
    }

    /// Registers the built-in types in their canonical order.
    fn install_builtins(&self) {
        let builtins: [fn(&Self) -> Result<()>; 18] = [
            Self::insert_type::<Int16>,
            Self::insert_type::<Int32>,
            Self::insert_type::<Int64>,
            Self::insert_type::<UInt16>,
            Self::insert_type::<UInt32>,
            Self::insert_type::<UInt64>,
            Self::insert_type::<Float>,
            Self::insert_type::<Double>,
            Self::insert_type::<Byte>,
            Self::insert_type::<SByte>,
            Self::insert_type::<Bool>,
            Self::insert_type::<Text>,
            Self::insert_type::<Deque<ObjectRef>>,
            Self::insert_type::<Vector<ObjectRef>>,
            Self::insert_type::<BstDeque<ObjectRef>>,
            Self::insert_type::<BstVector<ObjectRef>>,
            Self::insert_type::<UnorderedMap<ObjectRef, ObjectRef>>,
            Self::insert_type::<BstUnorderedMap<ObjectRef, ObjectRef>>,
        ];

        for install in builtins {
            // Built-in names are distinct, so this cannot fail.
            if let Err(e) = install(self) {
                warn!("built-in registration failed: {e}");
            }
        }
    }

    fn len(&self) -> usize {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Makes sure the registry exists and holds the built-in types.
pub fn init() {
    let _ = registry();
}

/// Registers `T` under [`Reflect::static_type_name`].
///
/// Registering the same type again is accepted and does nothing.
///
/// # Errors
///
/// Returns [`Error::DuplicateTypeRegistration`] if a different type already
/// uses the name.
pub fn register_type<T: Reflect>() -> Result<()> {
    registry().insert_type::<T>()
}

/// Registers a constructor table under an explicit name.
///
/// # Errors
///
/// Returns [`Error::DuplicateTypeRegistration`] if the name is taken.
pub fn register(name: &str, ctors: &'static [Constructor]) -> Result<()> {
    registry().insert(name, ctors, None)
}

/// True if a type is registered under `name`.
#[must_use]
pub fn is_registered(name: &str) -> bool {
    registry()
        .types
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(name)
}

/// Names of all registered types, sorted.
#[must_use]
pub fn registered_types() -> Vec<String> {
    let mut names: Vec<String> = registry()
        .types
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .cloned()
        .collect();
    names.sort_unstable();
    names
}

/// Creates an instance of the type registered under `name`.
///
/// The constructor is chosen by `args.len()`.
///
/// # Errors
///
/// Returns [`Error::NoSuchRegisteredType`] if `name` is unknown,
/// [`Error::NoSuchConstructor`] if no constructor takes `args.len()`
/// arguments, or whatever the constructor itself returns.
pub fn create_instance(name: &str, args: &[ObjectRef]) -> Result<ObjectRef> {
    let arity = args.len();
    trace!("create_instance {name}/{arity}");

    // Copy the entry out so the lock is not held across the call.
    let ctor = {
        let types = registry()
            .types
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = types.get(name).ok_or_else(|| {
            debug!("no registered type '{name}'");
            Error::NoSuchRegisteredType {
                type_name: name.to_string(),
            }
        })?;
        entry
            .ctors
            .iter()
            .find(|ctor| ctor.arity() == arity)
            .copied()
            .ok_or_else(|| {
                debug!("'{name}' has no constructor of arity {arity}");
                Error::NoSuchConstructor {
                    type_name: name.to_string(),
                    arity,
                }
            })?
    };

    ctor.construct(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::dispatch::Method;

    struct Widget;

    impl Widget {
        fn make(_args: &[ObjectRef]) -> Result<ObjectRef> {
            Ok(crate::runtime::Gc::new(Widget).into_object())
        }
    }

    impl Reflect for Widget {
        const METHODS: &'static [Method<Self>] = &[];
        const CONSTRUCTORS: &'static [Constructor] = &[Constructor::new(0, Widget::make)];

        fn static_type_name() -> &'static str {
            "RegistryTestWidget"
        }
    }

    struct Impostor;

    impl Reflect for Impostor {
        fn static_type_name() -> &'static str {
            "RegistryTestWidget"
        }
    }

    #[test]
    fn test_builtins_are_registered() {
        for name in [
            "Int16",
            "Int32",
            "Int64",
            "UInt16",
            "UInt32",
            "UInt64",
            "Float",
            "Double",
            "Byte",
            "SByte",
            "Bool",
            "String",
            "Deque",
            "Vector",
            "BstDeque",
            "BstVector",
            "UnorderedMap",
            "BstUnorderedMap",
        ] {
            assert!(is_registered(name), "{name} missing");
        }
    }

    #[test]
    fn test_register_is_idempotent_per_type() {
        register_type::<Widget>().unwrap();
        register_type::<Widget>().unwrap();
        assert!(is_registered("RegistryTestWidget"));

        let err = register_type::<Impostor>().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::DuplicateTypeRegistration);

        let created = create_instance("RegistryTestWidget", &[]).unwrap();
        assert!(created.is::<Widget>());
    }

    #[test]
    fn test_raw_registration_rejects_duplicates() {
        const CTORS: &[Constructor] = &[Constructor::new(0, Widget::make)];
        register("RegistryTestRaw", CTORS).unwrap();
        assert!(register("RegistryTestRaw", CTORS).is_err());
        assert!(register("Int32", CTORS).is_err());
    }

    #[test]
    fn test_create_instance_errors() {
        let missing = create_instance("TypeDoesntExist", &[]).unwrap_err();
        assert_eq!(missing.kind(), crate::ErrorKind::NoSuchRegisteredType);

        let args = [ObjectRef::null(), ObjectRef::null()];
        let arity = create_instance("Int64", &args).unwrap_err();
        assert_eq!(arity.kind(), crate::ErrorKind::NoSuchConstructor);
    }

    #[test]
    fn test_create_primitive_by_name() {
        let value = create_instance("Int64", &[]).unwrap();
        assert!(value.has_value());
        assert_eq!(value.type_name(), "Int64");
    }

    #[test]
    fn test_registered_types_sorted() {
        let names = registered_types();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(names.iter().any(|n| n == "Vector"));
    }
}
