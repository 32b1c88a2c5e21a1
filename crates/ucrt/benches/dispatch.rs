// Dispatch benchmarks for the ucrt runtime
//
// Compares a conventional method call, a dynamic call by name, and
// construction through the type registry.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ucrt::runtime::{Int32, Object, ObjectRef, Text, create_instance};

/// Benchmark a static call against the same call by name.
fn bench_static_vs_dynamic(c: &mut Criterion) {
    let text = Text::make("the quick brown fox");
    let object: ObjectRef = text.as_object();
    let needle = Text::make("brown").into_object();
    let args = [needle];

    c.bench_function("static_contains", |b| {
        b.iter(|| black_box(&text).contains(black_box("brown")));
    });

    c.bench_function("dynamic_contains", |b| {
        b.iter(|| black_box(&object).call("UContains", black_box(&args)));
    });

    c.bench_function("dynamic_universal", |b| {
        b.iter(|| black_box(&object).call("GetHashCode", &[]));
    });
}

/// Benchmark construction by name.
fn bench_create_instance(c: &mut Criterion) {
    ucrt::runtime::init();
    let arg = [Int32::make(7).into_object()];

    c.bench_function("create_int64_default", |b| {
        b.iter(|| create_instance(black_box("Int64"), &[]));
    });

    c.bench_function("create_int64_value", |b| {
        b.iter(|| create_instance(black_box("Int64"), black_box(&arg)));
    });

    c.bench_function("create_deque", |b| {
        b.iter(|| create_instance(black_box("Deque"), &[]));
    });
}

/// Benchmark dispatch misses and the string form.
fn bench_no_such_function(c: &mut Criterion) {
    let object = Int32::make(1).into_object();

    c.bench_function("dynamic_miss", |b| {
        b.iter(|| black_box(&object).call("Missing", &[]).is_err());
    });

    c.bench_function("describe", |b| {
        b.iter(|| black_box(&object).describe());
    });
}

criterion_group!(
    benches,
    bench_static_vs_dynamic,
    bench_create_instance,
    bench_no_such_function
);
criterion_main!(benches);
