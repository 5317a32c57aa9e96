use cellcalc_formulas::FunctionRegistry;
use cellcalc_primitives::{AreaEval, Eval, RefEval};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// A single-column area A1:A{size} of numbers, every tenth cell holding text.
fn column(size: usize) -> Eval {
    let values = (0..size)
        .map(|i| {
            if i % 10 == 9 {
                Eval::text(format!("label {i}"))
            } else {
                Eval::Number((i as f64) * 1.5)
            }
        })
        .collect();
    let last_row = size.saturating_sub(1) as i32;
    Eval::Area(AreaEval::new(0, 0, last_row, 0, values).unwrap())
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    let registry = FunctionRegistry::new();

    let literal = [Eval::Number(-2.5)];
    group.bench_function("abs_literal", |b| {
        b.iter(|| registry.evaluate(black_box("ABS"), black_box(&literal), 0, 1))
    });

    let cell = [Eval::Ref(RefEval::new(0, 0, Eval::text("42"), true))];
    group.bench_function("abs_formula_cell", |b| {
        b.iter(|| registry.evaluate(black_box("abs"), black_box(&cell), 0, 1))
    });

    group.bench_function("unknown", |b| {
        b.iter(|| registry.evaluate(black_box("NOPE"), black_box(&literal), 0, 1))
    });

    group.finish();
}

fn bench_aggregates(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregates");
    let registry = FunctionRegistry::new();

    for size in [10, 100, 1000, 10000].iter() {
        let args = [column(*size)];
        group.bench_with_input(BenchmarkId::new("sum", size), size, |b, _| {
            b.iter(|| registry.evaluate("SUM", black_box(&args), 0, 1))
        });
    }

    for size in [10, 100, 1000].iter() {
        let args = [column(*size)];
        group.bench_with_input(BenchmarkId::new("median", size), size, |b, _| {
            b.iter(|| registry.evaluate("MEDIAN", black_box(&args), 0, 1))
        });
        group.bench_with_input(BenchmarkId::new("stdev", size), size, |b, _| {
            b.iter(|| registry.evaluate("STDEV", black_box(&args), 0, 1))
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let registry = FunctionRegistry::new();

    for size in [100, 1000].iter() {
        let range = column(*size);
        let exact = [Eval::Number(15.0), range.clone(), Eval::Number(0.0)];
        let sorted = [Eval::Number(15.0), range.clone()];
        let countif = [range, Eval::Number(15.0)];

        group.bench_with_input(BenchmarkId::new("match_exact", size), size, |b, _| {
            b.iter(|| registry.evaluate("MATCH", black_box(&exact), 0, 1))
        });
        group.bench_with_input(BenchmarkId::new("match_sorted", size), size, |b, _| {
            b.iter(|| registry.evaluate("MATCH", black_box(&sorted), 0, 1))
        });
        group.bench_with_input(BenchmarkId::new("countif", size), size, |b, _| {
            b.iter(|| registry.evaluate("COUNTIF", black_box(&countif), 0, 1))
        });
    }

    group.finish();
}

fn bench_text_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_ops");
    let registry = FunctionRegistry::new();

    let words: Vec<Eval> = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]
        .iter()
        .map(|s| Eval::text(*s))
        .collect();
    group.bench_function("concatenate_10", |b| {
        b.iter(|| registry.evaluate("CONCATENATE", black_box(&words), 0, 1))
    });

    let left = [Eval::text("Hello World"), Eval::Number(5.0)];
    group.bench_function("left", |b| {
        b.iter(|| registry.evaluate("LEFT", black_box(&left), 0, 1))
    });

    let substitute = [
        Eval::text("the cat sat on the mat with the hat"),
        Eval::text("the"),
        Eval::text("a"),
    ];
    group.bench_function("substitute", |b| {
        b.iter(|| registry.evaluate("SUBSTITUTE", black_box(&substitute), 0, 1))
    });

    group.finish();
}

fn bench_dates_and_finance(c: &mut Criterion) {
    let mut group = c.benchmark_group("dates_finance");
    let registry = FunctionRegistry::new();

    let ymd = [Eval::Number(2024.0), Eval::Number(14.0), Eval::Number(-3.0)];
    group.bench_function("date", |b| {
        b.iter(|| registry.evaluate("DATE", black_box(&ymd), 0, 1))
    });

    let serial = [Eval::Number(45351.0)];
    group.bench_function("year", |b| {
        b.iter(|| registry.evaluate("YEAR", black_box(&serial), 0, 1))
    });

    let loan = [
        Eval::Number(0.05 / 12.0),
        Eval::Number(360.0),
        Eval::Number(250_000.0),
    ];
    group.bench_function("pmt", |b| {
        b.iter(|| registry.evaluate("PMT", black_box(&loan), 0, 1))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_dispatch,
    bench_aggregates,
    bench_lookup,
    bench_text_operations,
    bench_dates_and_finance
);
criterion_main!(benches);
