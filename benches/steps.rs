//! Benchmarks for step parsing and navigation
//!
//! Run with: cargo bench --bench steps

use codesteps::observer::NoopObserver;
use codesteps::syntax::{HighlightTokenizer, PlainTokenizer};
use codesteps::{parse_steps, CodeSteps, HostOptions, LetterGrid};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

const RUST_SAMPLE: &str = include_str!("../samples/hello.rs");

fn sample_text(lines: usize) -> String {
    "let value = compute(alpha, beta) + 42; // trailing comment\n".repeat(lines)
}

/// Definition with one step per line plus a multi-line range every 10 lines
fn sample_definition(lines: usize) -> String {
    let mut steps: Vec<String> = (1..=lines)
        .map(|l| format!("l{}c5-l{}c9:Line {}", l, l, l))
        .collect();
    steps.extend((1..lines).step_by(10).map(|l| format!("l{}-l{}:Block", l, l + 9)));
    steps.join(";")
}

#[divan::bench(args = [10, 100, 500])]
fn parse_steps_plain(bencher: divan::Bencher, lines: usize) {
    let grid = LetterGrid::from_text(&sample_text(lines));
    let definition = sample_definition(lines);
    bencher.bench(|| parse_steps(Some(divan::black_box(&definition)), &grid));
}

#[divan::bench(args = [10, 100, 500])]
fn index_grid(bencher: divan::Bencher, lines: usize) {
    let text = sample_text(lines);
    bencher.bench(|| LetterGrid::from_text(divan::black_box(&text)));
}

#[divan::bench]
fn build_rust_host(bencher: divan::Bencher) {
    let mut tokenizer = HighlightTokenizer::new();
    bencher.bench_local(|| {
        CodeSteps::new(
            HostOptions::new(RUST_SAMPLE, "rust").with_steps("l1:Imports;l3-l8:Struct;*:All"),
            &mut tokenizer,
            &mut NoopObserver,
        )
    });
}

#[divan::bench]
fn walk_all_steps(bencher: divan::Bencher) {
    let lines = 200;
    let options =
        HostOptions::new(sample_text(lines), "plain").with_steps(sample_definition(lines));
    let host = CodeSteps::new(options, &mut PlainTokenizer, &mut NoopObserver).unwrap();
    bencher.bench_local(|| {
        let mut host = host.clone();
        while host.next(&mut NoopObserver) {}
        host
    });
}
