use std::hint::black_box;

use criterion::measurement::WallTime;
use criterion::{
    criterion_group, criterion_main, BatchSize, BenchmarkGroup, Criterion, Throughput,
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::StatefulWidget;
use tui_constituency_tree::{parse, render, ConstituencyTree, TreeNode, TreeState};

const SENTENCE: &str = "(ROOT (S (NP (DT The) (JJ quick) (JJ brown) (NN fox)) (VP (VBZ jumps) (PP (IN over) (NP (DT the) (JJ lazy) (NN dog)))) (. .)))";

/// A long paragraph: many sentences below one root.
fn paragraph(sentences: usize) -> String {
    let mut result = String::from("(DOC");
    for _ in 0..sentences {
        result.push(' ');
        result.push_str(SENTENCE);
    }
    result.push(')');
    result
}

fn parses(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("parse");

    group.throughput(Throughput::Bytes(SENTENCE.len() as u64));
    group.bench_function("sentence", |bencher| {
        bencher.iter(|| black_box(parse(black_box(SENTENCE)).unwrap()));
    });

    let paragraph = paragraph(100);
    group.throughput(Throughput::Bytes(paragraph.len() as u64));
    group.bench_function("paragraph", |bencher| {
        bencher.iter(|| black_box(parse(black_box(&paragraph)).unwrap()));
    });

    group.finish();
}

fn layouts(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("layout");
    group.throughput(Throughput::Elements(1));

    let sentence = parse(SENTENCE).unwrap();
    group.bench_function("sentence", |bencher| {
        bencher.iter(|| black_box(render(black_box(Some(&sentence)))));
    });

    let paragraph = parse(&paragraph(100)).unwrap();
    group.bench_function("paragraph", |bencher| {
        bencher.iter(|| black_box(render(black_box(Some(&paragraph)))));
    });

    group.finish();
}

fn bench_render(group: &mut BenchmarkGroup<WallTime>, name: &str, tree: Option<&TreeNode>) {
    let buffer_size = Rect::new(0, 0, 100, 100);
    group.bench_function(name, |bencher| {
        bencher.iter_batched(
            || (ConstituencyTree::new(tree), TreeState::default()),
            |(widget, mut state)| {
                let mut buffer = Buffer::empty(buffer_size);
                black_box(widget).render(buffer_size, black_box(&mut buffer), &mut state);
            },
            BatchSize::SmallInput,
        );
    });
}

fn renders(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("render");
    group.throughput(Throughput::Elements(1)); // Frames per second

    bench_render(&mut group, "empty", None);

    let sentence = parse(SENTENCE).unwrap();
    bench_render(&mut group, "sentence", Some(&sentence));

    let paragraph = parse(&paragraph(100)).unwrap();
    bench_render(&mut group, "paragraph", Some(&paragraph));

    group.finish();
}

/// Create flamegraphs with `cargo bench --bench bench -- --profile-time=5`
#[cfg(unix)]
fn profiled() -> Criterion {
    use pprof::criterion::{Output, PProfProfiler};
    Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}
#[cfg(not(unix))]
fn profiled() -> Criterion {
    Criterion::default()
}

criterion_group! {
    name = benches;
    config = profiled();
    targets = parses, layouts, renders
}
criterion_main!(benches);
