// benches/chain_bench.rs
//! Benchmarks for chain composition and runner invocation.

use contextual_flow::{
    bad, maybe, pointed, until_error, Chain, Contextual, FlagSet, Runner, Stage,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn increments(len: usize) -> Chain<i64> {
    (0..len).map(|_| Stage::map(|n: i64| n + 1)).collect()
}

fn lifted_increments(len: usize) -> Chain<Contextual<i64>> {
    (0..len).map(|_| Stage::lifted(|n: i64| n + 1)).collect()
}

fn bench_chain_call(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_call");
    for len in [1, 10, 100] {
        let chain = increments(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &chain, |b, chain| {
            b.iter(|| chain.call(black_box(0)))
        });
    }
    group.finish();
}

fn bench_runners(c: &mut Criterion) {
    let mut group = c.benchmark_group("runners");

    let runner = maybe(lifted_increments(50));
    group.bench_function("maybe_completed", |b| {
        b.iter(|| runner.run(Contextual::new(black_box(0))))
    });
    group.bench_function("maybe_skipped", |b| {
        b.iter(|| runner.run(Contextual::with(black_box(0), bad())))
    });

    let runner = until_error(increments(50));
    group.bench_function("until_error_completed", |b| {
        b.iter(|| runner.run(Contextual::new(black_box(0))))
    });

    group.finish();
}

fn bench_metacontext(c: &mut Criterion) {
    let mut group = c.benchmark_group("metacontext");
    for depth in [2, 16, 128] {
        let contextual = Contextual::nested(0_i64, (0..depth).map(pointed));
        group.bench_with_input(BenchmarkId::new("flatten", depth), &contextual, |b, contextual| {
            b.iter(|| contextual.flags())
        });
    }

    let flags = FlagSet::pointed_all(0..64);
    group.bench_function("union_64", |b| b.iter(|| flags.union(black_box(&flags))));
    group.finish();
}

criterion_group!(benches, bench_chain_call, bench_runners, bench_metacontext);
criterion_main!(benches);
