//! Type-erased callables and multicast events.
//!
//! A [`Functor`] wraps any callable taking one argument value `A` (use a
//! tuple for several) and returning `R`. An [`Event`] is an ordered list of
//! functors of the same signature.
//!
//! # Example
//!
//! ```rust
//! use ucrt::runtime::{Event, make_func};
//!
//! let event = Event::<i32, i32>::make();
//! let double = event.add_functor(&make_func(|x: i32| x * 2));
//! event.add(|x: i32| x + 1);
//!
//! assert_eq!(event.eval(10).unwrap(), 11);
//! assert_eq!(event.eval_all(10), vec![20, 11]);
//!
//! assert!(event.remove(double));
//! assert_eq!(event.size(), 1);
//! ```

use crate::error::{Error, Result};
use crate::runtime::gc::{EnableGcFromMe, Gc, SelfRef};
use crate::runtime::object::Reflect;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Polymorphic callable `A -> R`.
///
/// Clones share the same underlying callable.
pub struct Functor<A, R = ()> {
    f: Rc<dyn Fn(A) -> R>,
}

impl<A: 'static, R: 'static> Functor<A, R> {
    /// Wraps a closure or function.
    pub fn new(f: impl Fn(A) -> R + 'static) -> Self {
        Functor { f: Rc::new(f) }
    }

    /// Wraps a method together with the receiver it is called on.
    ///
    /// The functor keeps the receiver alive.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NullReference`] if `receiver` is null.
    pub fn bind<T: 'static>(receiver: Gc<T>, method: fn(&T, A) -> R) -> Result<Self> {
        if receiver.is_null() {
            return Err(Error::null_reference());
        }
        Ok(Functor::new(move |args| method(&receiver, args)))
    }

    /// Calls the wrapped callable.
    pub fn eval(&self, args: A) -> R {
        (self.f)(args)
    }

    /// True if both functors share one callable.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.f, &other.f)
    }
}

/// Type-erases `f` into a [`Functor`].
pub fn make_func<A: 'static, R: 'static>(f: impl Fn(A) -> R + 'static) -> Functor<A, R> {
    Functor::new(f)
}

impl<A, R> Clone for Functor<A, R> {
    fn clone(&self) -> Self {
        Functor {
            f: Rc::clone(&self.f),
        }
    }
}

impl<A: 'static, R: 'static> Reflect for Functor<A, R> {
    fn static_type_name() -> &'static str {
        "Functor"
    }
}

impl<A, R> fmt::Debug for Functor<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Functor@{:p}", Rc::as_ptr(&self.f).cast::<()>())
    }
}

/// Handle returned by [`Event::add`], used to remove the functor again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctorId(u64);

/// Ordered multicast list of functors.
///
/// Evaluation walks a snapshot of the list, so functors added or removed
/// while an evaluation is running only take effect on the next one.
pub struct Event<A, R = ()> {
    functors: RefCell<Vec<(FunctorId, Functor<A, R>)>>,
    next_id: Cell<u64>,
    me: SelfRef<Self>,
}

impl<A: Clone + 'static, R: 'static> Event<A, R> {
    // Unowned; callers outside the crate go through `make`.
    pub(crate) fn new() -> Self {
        Event {
            functors: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            me: SelfRef::new(),
        }
    }

    /// Allocates an event that can hand out handles to itself.
    ///
    /// This is the only public way to create an event, so every owned event
    /// supports [`Event::as_functor`].
    #[must_use]
    pub fn make() -> Gc<Self> {
        Gc::new_with_self(Self::new())
    }

    /// Appends a callable.
    pub fn add(&self, f: impl Fn(A) -> R + 'static) -> FunctorId {
        self.add_functor(&Functor::new(f))
    }

    /// Appends an existing functor, sharing its callable.
    pub fn add_functor(&self, functor: &Functor<A, R>) -> FunctorId {
        let id = FunctorId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.functors.borrow_mut().push((id, functor.clone()));
        id
    }

    /// Removes the functor added under `id`; true if it was present.
    pub fn remove(&self, id: FunctorId) -> bool {
        let mut functors = self.functors.borrow_mut();
        match functors.iter().position(|(held, _)| *held == id) {
            Some(pos) => {
                functors.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Removes every functor.
    pub fn clear(&self) {
        self.functors.borrow_mut().clear();
    }

    /// Number of functors.
    #[must_use]
    pub fn size(&self) -> usize {
        self.functors.borrow().len()
    }

    /// True if no functor is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Calls every functor in order, discarding the results.
    pub fn invoke(&self, args: A) {
        for functor in self.snapshot() {
            functor.eval(args.clone());
        }
    }

    /// Calls every functor in order and returns the last result.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::EmptyEvent`] if no functor is attached.
    pub fn eval(&self, args: A) -> Result<R> {
        let mut last = None;
        for functor in self.snapshot() {
            last = Some(functor.eval(args.clone()));
        }
        last.ok_or(Error::EmptyEvent {
            type_name: Self::static_type_name(),
        })
    }

    /// Calls every functor in order and collects every result.
    pub fn eval_all(&self, args: A) -> Vec<R> {
        self.snapshot()
            .into_iter()
            .map(|functor| functor.eval(args.clone()))
            .collect()
    }

    /// Wraps this event as a functor evaluating it for its last result.
    ///
    /// The functor observes the event weakly; once the event is dropped it
    /// yields [`Error::ExpiredWeakReference`].
    ///
    /// # Errors
    ///
    /// Fails with [`Error::SelfReferenceUnavailable`] if no handle owns the
    /// event.
    pub fn as_functor(&self) -> Result<Functor<A, Result<R>>> {
        let weak = self.gc_from_me()?.downgrade();
        Ok(Functor::new(move |args| weak.lock_or_err()?.eval(args)))
    }

    fn snapshot(&self) -> Vec<Functor<A, R>> {
        self.functors
            .borrow()
            .iter()
            .map(|(_, functor)| functor.clone())
            .collect()
    }
}

impl<A: 'static, R: 'static> Reflect for Event<A, R> {
    fn static_type_name() -> &'static str {
        "Event"
    }
}

impl<A: 'static, R: 'static> EnableGcFromMe for Event<A, R> {
    fn self_ref(&self) -> &SelfRef<Self> {
        &self.me
    }
}

impl<A, R> fmt::Debug for Event<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("size", &self.functors.borrow().len())
            .finish()
    }
}
