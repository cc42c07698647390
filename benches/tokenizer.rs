use criterion::{Criterion, criterion_group, criterion_main};
use koala_highlight::koala::{self, DARK_THEME_NAME, LANGUAGE_ID};
use koala_highlight::tokenizer::{LexerState, Tokenizer};
use koala_highlight::{HighlightOptions, Registry};

fn criterion_benchmark(c: &mut Criterion) {
    let line = r#"func greet(name) { give("Hello, \"" + name + "\"!"); return true; } # done"#;
    let compiled_grammar = koala::grammar().compile().unwrap();

    c.bench_function("koala line scan", |b| {
        let tokenizer = Tokenizer::new(&compiled_grammar);
        let state = LexerState::root();
        b.iter(|| {
            let result = tokenizer.scan_line(std::hint::black_box(line), &state);
            std::hint::black_box(result);
        })
    });

    let document = koala::SAMPLE.repeat(200);
    let mut registry = Registry::default();
    koala::register(&mut registry).unwrap();
    let options = HighlightOptions::new(LANGUAGE_ID, DARK_THEME_NAME);

    c.bench_function("koala highlight document", |b| {
        b.iter(|| {
            let highlighted = registry.highlight(&document, &options).unwrap();
            std::hint::black_box(highlighted);
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
