use criterion::{black_box, criterion_group, criterion_main, Criterion};
use propfilter::{MemoryContext, PropertySetterManager, RENDERTYPE_PROPERTY};
use serde_json::json;

/// A manager with `n` light setters: plain, masked, and rendertype-gated in
/// equal measure.
fn build_manager(n: usize) -> PropertySetterManager {
    let mut light = serde_json::Map::new();

    for i in 0..n {
        let block = match i % 3 {
            0 => json!({"value": i}),
            1 => json!({"value": i, "mask": "spot*"}),
            _ => json!({"value": i, "rendertype": "beauty*"}),
        };
        light.insert(format!("light:p{i}"), block);
    }

    let mut manager = PropertySetterManager::new();
    manager
        .parse_string(&json!({ "light": light }).to_string())
        .unwrap();
    manager
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");

    for &n in &[5, 20, 50] {
        let mut manager = build_manager(n);
        let mut ctx = MemoryContext::new()
            .set("object:name", "spotLight1")
            .set(RENDERTYPE_PROPERTY, "beauty");

        group.bench_function(format!("{n}_setters_all_gates_pass"), |b| {
            b.iter(|| manager.apply("light", black_box(&mut ctx)));
        });

        let mut manager = build_manager(n);
        let mut ctx = MemoryContext::new()
            .set("object:name", "distant1")
            .set(RENDERTYPE_PROPERTY, "shadowmap");

        group.bench_function(format!("{n}_setters_gates_blocked"), |b| {
            b.iter(|| manager.apply("light", black_box(&mut ctx)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_apply);
criterion_main!(benches);
