//! Rendering benchmarks
//!
//! A generated model module with many classes, rendered once per target.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use crossemit::{
    AcceptsStatements, ClassProperty, ClassSpec, CrossType, RenderOptions, Script, Target, call,
    dictof, listof, maybe, pan,
};
use std::hint::black_box;

fn model_module(classes: usize) -> Script {
    let mut script = Script::new();
    script.add_file_comment("Generated models.");
    let id = script
        .add_new_type("ModelID", CrossType::Num, true)
        .expect("fresh script");
    for i in 0..classes {
        let class = script.also(ClassSpec::new(format!("Model{i}")));
        class.set_ts_export(true);
        class
            .add_property(ClassProperty::new("id", id.clone()).initarg())
            .expect("unique property");
        class
            .add_property(ClassProperty::new("name", maybe(CrossType::Str)).default(pan("")))
            .expect("unique property");
        let tags = class
            .add_property(ClassProperty::new("tags", listof(CrossType::Str)).initarg())
            .expect("unique property");
        class
            .create_method("summary", dictof(CrossType::Str, CrossType::Num))
            .also_return(call("summarize", vec![tags]));
    }
    script
}

fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let script = model_module(50);
    let options = RenderOptions::default();
    for target in Target::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(target), &target, |b, &target| {
            b.iter(|| black_box(script.get_source_code(target, &options).expect("render")));
        });
    }
    group.finish();
}

fn benchmark_build(c: &mut Criterion) {
    c.bench_function("build_model_module", |b| {
        b.iter(|| black_box(model_module(50)));
    });
}

criterion_group!(benches, benchmark_render, benchmark_build);
criterion_main!(benches);
