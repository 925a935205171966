use criterion::{criterion_group, criterion_main, Criterion};
use lalrgen::{
    grammar::{examples, Grammar, GrammarDef, GrammarError},
    lalr::Automaton,
    Config,
};

criterion_main!(benches);
criterion_group!(benches, bench_expressions, bench_statements);

fn bench_expressions(c: &mut Criterion) {
    bench_generate(c, "arithmetic", examples::arithmetic);
    bench_generate(c, "arithmetic_prec", examples::arithmetic_prec);
    bench_generate(c, "ambiguous", examples::ambiguous);
}

fn bench_statements(c: &mut Criterion) {
    bench_generate(c, "dangling_else", examples::dangling_else);
    bench_generate(c, "with_nullable", examples::with_nullable);
}

fn bench_generate<F>(c: &mut Criterion, grammar_name: &str, define: F)
where
    F: FnOnce(&mut GrammarDef) -> Result<(), GrammarError>,
{
    let grammar = Grammar::define(define).unwrap();

    let mut group = c.benchmark_group(grammar_name);
    group.bench_function("automaton", |b| {
        b.iter(|| Automaton::build(&grammar));
    });
    group.bench_function("tables", |b| {
        b.iter(|| Config::new().generate(&grammar));
    });
    group.bench_function("canonical", |b| {
        b.iter(|| {
            Config::new()
                .default_reductions(false)
                .default_gotos(false)
                .generate(&grammar)
        });
    });
    group.finish();
}
