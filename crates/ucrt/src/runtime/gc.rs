//! Reference-counted strong and weak handles over the object graph.
//!
//! [`Gc`] is the owning handle (the runtime's `GCPtr`) and [`WeakGc`] the
//! non-owning observer (`WeakPtr`). Both may be null. Counting is plain
//! [`Rc`]: deterministic, single-threaded, and blind to cycles. Any
//! back-reference (parent, observer, self) must be a [`WeakGc`].
//!
//! # Example
//!
//! ```rust
//! use ucrt::runtime::{Gc, Int32};
//!
//! let strong = Int32::make(7);
//! let weak = strong.downgrade();
//! assert!(weak.lock().has_value());
//!
//! drop(strong);
//! assert!(weak.lock().is_null());
//! ```

use crate::error::{Error, Result};
use crate::runtime::hash::HashCode;
use crate::runtime::object::{Describe, Object, ObjectRef, Reflect};
use std::cell::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::{Rc, Weak};

/// Strong, shared, reference-counted handle to `T`.
///
/// The pointee is dropped exactly when the last `Gc` referencing it is
/// dropped or reset.
pub struct Gc<T: ?Sized> {
    ptr: Option<Rc<T>>,
}

impl<T: ?Sized> Gc<T> {
    /// Creates a null handle.
    #[must_use]
    pub const fn null() -> Self {
        Gc { ptr: None }
    }

    /// Wraps an existing `Rc`.
    #[must_use]
    pub fn from_rc(rc: Rc<T>) -> Self {
        Gc { ptr: Some(rc) }
    }

    /// Returns the pointee, or [`Error::NullReference`] for a null handle.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NullReference`] if the handle is null.
    pub fn get(&self) -> Result<&T> {
        self.ptr.as_deref().ok_or_else(Error::null_reference)
    }

    /// Returns the underlying `Rc`, failing on null.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NullReference`] if the handle is null.
    pub fn rc(&self) -> Result<&Rc<T>> {
        self.ptr.as_ref().ok_or_else(Error::null_reference)
    }

    /// True if the handle owns an object.
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.ptr.is_some()
    }

    /// True if the handle is null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    /// Releases ownership and becomes null.
    pub fn reset(&mut self) -> &mut Self {
        self.ptr = None;
        self
    }

    /// Reference identity: true if both handles share one allocation (or
    /// are both null).
    #[must_use]
    pub fn ref_eq<U: ?Sized>(&self, other: &Gc<U>) -> bool {
        self.addr() == other.addr()
    }

    /// Negation of [`Gc::ref_eq`].
    #[must_use]
    pub fn ref_not_eq<U: ?Sized>(&self, other: &Gc<U>) -> bool {
        !self.ref_eq(other)
    }

    /// Number of strong handles sharing the pointee (0 for null).
    #[must_use]
    pub fn strong_count(&self) -> usize {
        self.ptr.as_ref().map_or(0, Rc::strong_count)
    }

    /// Number of weak handles observing the pointee (0 for null).
    #[must_use]
    pub fn weak_count(&self) -> usize {
        self.ptr.as_ref().map_or(0, Rc::weak_count)
    }

    /// Creates a weak observer of the pointee.
    #[must_use]
    pub fn downgrade(&self) -> WeakGc<T> {
        WeakGc {
            ptr: self.ptr.as_ref().map(Rc::downgrade),
        }
    }

    fn addr(&self) -> *const () {
        self.ptr
            .as_ref()
            .map_or(std::ptr::null(), |rc| Rc::as_ptr(rc).cast::<()>())
    }
}

impl<T> Gc<T> {
    /// Allocates `value` and returns the first strong handle to it.
    pub fn new(value: T) -> Self {
        Gc {
            ptr: Some(Rc::new(value)),
        }
    }

    /// Takes ownership of `value`, releasing the previous pointee.
    pub fn reset_with(&mut self, value: T) -> &mut Self {
        self.ptr = Some(Rc::new(value));
        self
    }

    /// Owns a fresh copy of `value`, releasing the previous pointee.
    pub fn reset_clone(&mut self, value: &T) -> &mut Self
    where
        T: Clone,
    {
        self.reset_with(value.clone())
    }
}

impl<T: EnableGcFromMe> Gc<T> {
    /// Allocates `value` and binds its self reference to the new handle.
    pub fn new_with_self(value: T) -> Self {
        Self::from_rc_with_self(Rc::new(value))
    }

    /// Wraps an existing allocation, binding its self reference if no owner
    /// bound it yet.
    pub fn from_rc_with_self(rc: Rc<T>) -> Self {
        rc.self_ref().bind(&rc);
        Gc { ptr: Some(rc) }
    }

    /// Like [`Gc::reset_with`], but binds the new pointee's self reference.
    pub fn reset_with_self(&mut self, value: T) -> &mut Self {
        *self = Self::new_with_self(value);
        self
    }
}

impl<T: Object> Gc<T> {
    /// Upcasts to a base-type handle sharing the same allocation.
    #[must_use]
    pub fn into_object(self) -> ObjectRef {
        Gc {
            ptr: self.ptr.map(|rc| rc as Rc<dyn Object>),
        }
    }

    /// Returns a base-type handle sharing the same allocation.
    #[must_use]
    pub fn as_object(&self) -> ObjectRef {
        self.clone().into_object()
    }
}

impl<T: Reflect> Gc<T> {
    /// Name of this handle type, e.g. `GCPtr<Int32>`.
    #[must_use]
    pub fn static_type_name() -> String {
        format!("GCPtr<{}>", T::static_type_name())
    }
}

impl<T: Object + ?Sized> Gc<T> {
    /// Invokes a method on the pointee by name.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NullReference`] on a null handle, otherwise with
    /// whatever the dispatch returns.
    pub fn call(&self, name: &str, args: &[ObjectRef]) -> Result<ObjectRef> {
        self.get()?.call(name, args)
    }
}

impl Gc<dyn Object> {
    /// Dynamic downcast; returns null if the pointee is not a `T`.
    #[must_use]
    pub fn cast<T: Object>(&self) -> Gc<T> {
        Gc {
            ptr: self
                .ptr
                .as_ref()
                .and_then(|rc| Rc::clone(rc).into_any_rc().downcast::<T>().ok()),
        }
    }

    /// Dynamic downcast that fails with [`Error::InvalidCast`].
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidCast`] carrying `message` if the handle is
    /// null or points to another type.
    pub fn cast_or_err<T: Object>(&self, message: &str) -> Result<Gc<T>> {
        let cast = self.cast::<T>();
        if cast.is_null() {
            return Err(Error::invalid_cast(message));
        }
        Ok(cast)
    }

    /// Borrows the pointee as a `T`, if it is one.
    #[must_use]
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.ptr.as_deref()?.as_any().downcast_ref::<T>()
    }

    /// True if the pointee is a `T`.
    #[must_use]
    pub fn is<T: Object>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Type name of the pointee, or `"null"`.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.ptr.as_deref().map_or("null", Object::type_name)
    }
}

/// Passes a handle through, or fails with [`Error::NullReference`].
///
/// # Errors
///
/// Fails with [`Error::NullReference`] carrying `message` if `value` is null.
pub fn as_not_null<T: ?Sized>(value: Gc<T>, message: &str) -> Result<Gc<T>> {
    if value.is_null() {
        return Err(Error::NullReference {
            message: message.to_string(),
        });
    }
    Ok(value)
}

impl<T: ?Sized> Clone for Gc<T> {
    fn clone(&self) -> Self {
        Gc {
            ptr: self.ptr.clone(),
        }
    }
}

impl<T: ?Sized> Default for Gc<T> {
    fn default() -> Self {
        Gc::null()
    }
}

impl<T: ?Sized> From<Rc<T>> for Gc<T> {
    fn from(rc: Rc<T>) -> Self {
        Gc::from_rc(rc)
    }
}

impl<T: ?Sized> Deref for Gc<T> {
    type Target = T;

    /// # Panics
    ///
    /// Panics with the null-reference message when the handle is null; use
    /// [`Gc::get`] for the fallible form.
    fn deref(&self) -> &T {
        match self.ptr.as_deref() {
            Some(value) => value,
            None => panic!("{}", Error::null_reference()),
        }
    }
}

/// Value equality of the pointees. Two null handles are equal.
impl<T, U> PartialEq<Gc<U>> for Gc<T>
where
    T: Object + ?Sized,
    U: Object + ?Sized,
{
    fn eq(&self, other: &Gc<U>) -> bool {
        match (self.ptr.as_deref(), other.ptr.as_deref()) {
            (Some(a), Some(b)) => a.equals(b.as_dyn()),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Object + ?Sized> Eq for Gc<T> {}

impl<T: Object + ?Sized> Hash for Gc<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl<T: Object + ?Sized> HashCode for Gc<T> {
    fn hash_code(&self) -> u64 {
        self.ptr.as_deref().map_or(0, Object::hash_code)
    }
}

impl<T: Object + ?Sized> Describe for Gc<T> {
    fn describe(&self) -> String {
        self.ptr
            .as_deref()
            .map_or_else(|| "null".to_string(), Object::describe)
    }
}

impl<T: Object + ?Sized> fmt::Display for Gc<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl<T: Object + ?Sized> fmt::Debug for Gc<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ptr.as_deref() {
            Some(value) => f
                .debug_struct("Gc")
                .field("type", &value.type_name())
                .field("value", &value.describe())
                .field("strong", &self.strong_count())
                .finish(),
            None => f.write_str("Gc(null)"),
        }
    }
}

/// Non-owning observer of an object's lifetime.
///
/// Must be locked into a [`Gc`] before use.
pub struct WeakGc<T: ?Sized> {
    ptr: Option<Weak<T>>,
}

impl<T: ?Sized> WeakGc<T> {
    /// Creates a weak handle observing nothing.
    #[must_use]
    pub const fn new() -> Self {
        WeakGc { ptr: None }
    }

    /// True if there is no live object behind this handle.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.ptr.as_ref().is_none_or(|weak| weak.strong_count() == 0)
    }

    /// True if this handle was never pointed at an object.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    /// Stops observing.
    pub fn reset(&mut self) -> &mut Self {
        self.ptr = None;
        self
    }

    /// Returns a strong handle, null if the object is gone.
    #[must_use]
    pub fn lock(&self) -> Gc<T> {
        Gc {
            ptr: self.ptr.as_ref().and_then(Weak::upgrade),
        }
    }

    /// Returns a strong handle or fails if the object is gone.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ExpiredWeakReference`] if the object was destroyed
    /// or the handle is null.
    pub fn lock_or_err(&self) -> Result<Gc<T>> {
        let locked = self.lock();
        if locked.is_null() {
            return Err(Error::ExpiredWeakReference);
        }
        Ok(locked)
    }
}

impl<T: ?Sized> Clone for WeakGc<T> {
    fn clone(&self) -> Self {
        WeakGc {
            ptr: self.ptr.clone(),
        }
    }
}

impl<T: ?Sized> Default for WeakGc<T> {
    fn default() -> Self {
        WeakGc::new()
    }
}

impl<T: ?Sized> From<&Gc<T>> for WeakGc<T> {
    fn from(strong: &Gc<T>) -> Self {
        strong.downgrade()
    }
}

impl<T: ?Sized> fmt::Debug for WeakGc<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakGc")
            .field("expired", &self.expired())
            .finish()
    }
}

/// Slot holding an object's weak reference to itself.
///
/// Empty until a binding constructor such as [`Gc::new_with_self`] owns the
/// object.
pub struct SelfRef<T> {
    weak: OnceCell<Weak<T>>,
}

impl<T> SelfRef<T> {
    /// Creates an unbound slot.
    #[must_use]
    pub const fn new() -> Self {
        SelfRef {
            weak: OnceCell::new(),
        }
    }

    fn bind(&self, rc: &Rc<T>) {
        // Only the first owner binds.
        let _ = self.weak.set(Rc::downgrade(rc));
    }

    /// True once an owning handle exists.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.weak.get().is_some()
    }
}

impl<T> Default for SelfRef<T> {
    fn default() -> Self {
        SelfRef::new()
    }
}

/// Objects that can hand out handles to themselves.
///
/// Self references only exist after the object is owned through
/// [`Gc::new_with_self`], [`Gc::from_rc_with_self`] or
/// [`Gc::reset_with_self`]; before that [`EnableGcFromMe::gc_from_me`] fails and
/// [`EnableGcFromMe::weak_from_me`] is null.
pub trait EnableGcFromMe: Reflect {
    /// The slot storing the self reference.
    fn self_ref(&self) -> &SelfRef<Self>;

    /// Returns a strong handle to `self`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::SelfReferenceUnavailable`] if the object is not
    /// owned by a handle created with [`Gc::new_with_self`].
    fn gc_from_me(&self) -> Result<Gc<Self>> {
        self.self_ref()
            .weak
            .get()
            .and_then(Weak::upgrade)
            .map(Gc::from_rc)
            .ok_or(Error::SelfReferenceUnavailable {
                type_name: Self::static_type_name(),
            })
    }

    /// Returns a weak handle to `self` (null if unbound).
    fn weak_from_me(&self) -> WeakGc<Self> {
        WeakGc {
            ptr: self.self_ref().weak.get().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{Int32, Int64, UInt16};

    struct Node {
        me: SelfRef<Node>,
    }

    impl Reflect for Node {
        fn static_type_name() -> &'static str {
            "Node"
        }
    }

    impl EnableGcFromMe for Node {
        fn self_ref(&self) -> &SelfRef<Self> {
            &self.me
        }
    }

    #[test]
    fn test_null_handle() {
        let null: Gc<Int32> = Gc::null();
        assert!(null.is_null());
        assert!(!null.has_value());
        assert_eq!(null.strong_count(), 0);
        assert_eq!(
            null.get().unwrap_err().kind(),
            crate::ErrorKind::NullReference
        );
    }

    #[test]
    #[should_panic(expected = "Trying to dereference a null pointer.")]
    fn test_deref_null_panics() {
        let null: Gc<Int32> = Gc::default();
        let _ = null.value();
    }

    #[test]
    fn test_clone_shares_allocation() {
        let a = Int32::make(3);
        let b = a.clone();

        assert!(a.ref_eq(&b));
        assert_eq!(a.strong_count(), 2);

        drop(b);
        assert_eq!(a.strong_count(), 1);
    }

    #[test]
    fn test_value_vs_reference_equality() {
        let a = Int64::make(10);
        let b = Int64::make(10);

        assert_eq!(a, b);
        assert!(a.ref_not_eq(&b));
        assert_ne!(a, Int64::make(11));
    }

    #[test]
    fn test_null_equality() {
        let a: Gc<Int32> = Gc::null();
        let b: Gc<Int32> = Gc::null();
        assert_eq!(a, b);
        assert_ne!(a, Int32::make(0));
    }

    #[test]
    fn test_reset_variants() {
        let mut handle = Int32::make(1);
        let observer = handle.downgrade();

        handle.reset_with(Int32::new(2));
        assert!(observer.expired());
        assert_eq!(handle.value(), 2);

        handle.reset_clone(&Int32::new(5));
        assert_eq!(handle.value(), 5);

        handle.reset();
        assert!(handle.is_null());
    }

    #[test]
    fn test_upcast_shares_count() {
        let concrete = UInt16::make(9);
        let base = concrete.as_object();

        assert!(base.ref_eq(&concrete));
        assert_eq!(concrete.strong_count(), 2);
        assert_eq!(base.type_name(), "UInt16");
    }

    #[test]
    fn test_cast() {
        let base = Int32::make(4).into_object();

        let hit = base.cast::<Int32>();
        assert!(hit.has_value());
        assert!(hit.ref_eq(&base));

        assert!(base.cast::<Int64>().is_null());
        assert!(base.cast_or_err::<Int64>("not an Int64").is_err());
        assert!(ObjectRef::null().cast::<Int32>().is_null());
    }

    #[test]
    fn test_weak_lifecycle() {
        let strong = Int32::make(1);
        let weak = strong.downgrade();
        assert!(!weak.expired());
        assert_eq!(weak.lock_or_err().unwrap().value(), 1);

        drop(strong);
        assert!(weak.expired());
        assert!(weak.lock().is_null());
        assert_eq!(weak.lock_or_err().unwrap_err(), Error::ExpiredWeakReference);
    }

    #[test]
    fn test_weak_does_not_extend_life() {
        let strong = Int32::make(1);
        let weak = strong.downgrade();
        assert_eq!(strong.weak_count(), 1);
        assert_eq!(strong.strong_count(), 1);
        drop(weak);
        assert_eq!(strong.weak_count(), 0);
    }

    #[test]
    fn test_null_weak() {
        let weak: WeakGc<Int32> = WeakGc::new();
        assert!(weak.is_null());
        assert!(weak.expired());
        assert!(weak.lock_or_err().is_err());
    }

    #[test]
    fn test_self_reference_requires_owner() {
        let loose = Node { me: SelfRef::new() };
        assert!(loose.gc_from_me().is_err());
        assert!(loose.weak_from_me().is_null());

        let owned = Gc::new_with_self(Node { me: SelfRef::new() });
        let me = owned.gc_from_me().unwrap();
        assert!(me.ref_eq(&owned));
        assert!(owned.weak_from_me().lock().ref_eq(&owned));
    }

    #[test]
    fn test_plain_new_leaves_self_unbound() {
        let owned = Gc::new(Node { me: SelfRef::new() });
        assert!(!owned.self_ref().is_bound());
        assert_eq!(
            owned.gc_from_me().unwrap_err().kind(),
            crate::ErrorKind::SelfReferenceUnavailable
        );
    }

    #[test]
    fn test_binding_constructors() {
        let adopted = Gc::from_rc_with_self(Rc::new(Node { me: SelfRef::new() }));
        assert!(adopted.gc_from_me().unwrap().ref_eq(&adopted));

        let mut slot = Gc::<Node>::null();
        slot.reset_with_self(Node { me: SelfRef::new() });
        assert!(slot.gc_from_me().unwrap().ref_eq(&slot));

        // A second owner of the same allocation keeps the first binding.
        let again = Gc::from_rc_with_self(Rc::clone(slot.rc().unwrap()));
        assert!(again.gc_from_me().unwrap().ref_eq(&slot));
    }

    #[test]
    fn test_as_not_null() {
        assert!(as_not_null(Int32::make(1), "x").is_ok());
        let err = as_not_null(Gc::<Int32>::null(), "missing").unwrap_err();
        assert_eq!(format!("{err}"), "missing");
    }

    #[test]
    fn test_handle_type_name() {
        assert_eq!(Gc::<Int32>::static_type_name(), "GCPtr<Int32>");
    }
}
