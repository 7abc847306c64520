use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use libaho::automaton::build_automaton;

const PATTERNS: [&str; 12] = [
    "fox", "the quick", "server", "request", "response", "error", "lazy dog", "alice", "bob",
    "cache", "index", "query result",
];

fn generate_text(size: usize) -> String {
    let words = [
        "the ", "quick ", "brown ", "fox ", "jumps ", "over ", "lazy ", "dog ", "alice ", "bob ",
        "server ", "request ", "response ", "error ", "data ", "cache ", "index ", "search ",
        "query ", "result ",
    ];
    let mut text = String::with_capacity(size);
    let mut i = 0;
    while text.len() < size {
        text.push_str(words[i % words.len()]);
        i += 1;
    }
    text.truncate(size);
    text
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build", |b| b.iter(|| build_automaton(black_box(PATTERNS))));
}

fn bench_search(c: &mut Criterion) {
    let automaton = build_automaton(PATTERNS);
    let mut group = c.benchmark_group("search");

    for size in [1_000, 10_000, 100_000] {
        let text = generate_text(size);
        group.bench_with_input(BenchmarkId::new("chars", size), &text, |b, text| {
            b.iter(|| automaton.search(black_box(text.as_str())))
        });
    }
    group.finish();
}

fn bench_find_iter(c: &mut Criterion) {
    let automaton = build_automaton(PATTERNS);
    let text = generate_text(100_000);

    c.bench_function("find_iter_count", |b| {
        b.iter(|| automaton.find_iter(black_box(text.as_str())).count())
    });
    c.bench_function("is_match_miss", |b| {
        b.iter(|| automaton.is_match(black_box("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz")))
    });
}

criterion_group!(benches, bench_build, bench_search, bench_find_iter);
criterion_main!(benches);
