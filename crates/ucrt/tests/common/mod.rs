// Common test fixtures for integration tests
//
// `Empty` is a reflective type with a conventional `Do` method in three
// overloads, so dynamic calls can be compared against static ones.

#![allow(dead_code)]

use ucrt::Result;
use ucrt::runtime::{Constructor, Gc, Int32, Method, ObjectRef, Reflect, register_type};

/// Test type whose `Do` overloads return their own arity.
#[derive(Debug, Default)]
pub struct Empty {
    pub tag: i32,
}

impl Empty {
    pub fn new(tag: i32) -> Self {
        Empty { tag }
    }

    pub fn do_none(&self) -> Gc<Int32> {
        Int32::make(0)
    }

    pub fn do_one(&self, _first: &ObjectRef) -> Gc<Int32> {
        Int32::make(1)
    }

    pub fn do_two(&self, _first: &ObjectRef, _second: &ObjectRef) -> Gc<Int32> {
        Int32::make(2)
    }

    fn call_do_none(&self, _args: &[ObjectRef]) -> Result<ObjectRef> {
        Ok(self.do_none().into_object())
    }

    fn call_do_one(&self, args: &[ObjectRef]) -> Result<ObjectRef> {
        Ok(self.do_one(&args[0]).into_object())
    }

    fn call_do_two(&self, args: &[ObjectRef]) -> Result<ObjectRef> {
        Ok(self.do_two(&args[0], &args[1]).into_object())
    }

    fn construct(args: &[ObjectRef]) -> Result<ObjectRef> {
        let tag = args[0].downcast_ref::<Int32>().map_or(0, Int32::value);
        Ok(Gc::new(Empty::new(tag)).into_object())
    }
}

impl Reflect for Empty {
    const METHODS: &'static [Method<Self>] = &[
        Method::new("Do", 0, Self::call_do_none),
        Method::new("Do", 1, Self::call_do_one),
        Method::new("Do", 2, Self::call_do_two),
    ];

    const CONSTRUCTORS: &'static [Constructor] = &[Constructor::new(1, Self::construct)];

    fn static_type_name() -> &'static str {
        "Empty"
    }
}

/// Registers the fixture types. Safe to call from every test.
pub fn setup() {
    ucrt::runtime::init();
    register_type::<Empty>().unwrap();
}

/// A vector of `n` null arguments.
pub fn nulls(n: usize) -> Vec<ObjectRef> {
    vec![ObjectRef::null(); n]
}
