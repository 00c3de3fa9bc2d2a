use criterion::{Criterion, black_box, criterion_group, criterion_main};
use server::prompt_parser;

const PROMPTS: &[&str] = &[
    "Plan a ski trip to Aspen for beginners",
    "Expert skiing near Park City, Utah next weekend",
    "location: Niseko, Japan",
    "ski trip to whistler with friends",
    "I just want some fresh powder somewhere",
];

fn bench_parse(c: &mut Criterion) {
    // First call pays for regex compilation
    prompt_parser::parse(PROMPTS[0]);

    c.bench_function("parse_prompt_batch", |b| {
        b.iter(|| {
            for prompt in PROMPTS {
                black_box(prompt_parser::parse(black_box(prompt)));
            }
        })
    });

    c.bench_function("classify_skill", |b| {
        b.iter(|| prompt_parser::classify_skill(black_box("first time on skis, nervous about advanced runs")))
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
