use criterion::{criterion_group, criterion_main, Criterion};
use loxide::scanner::Scanner;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

pub fn criterion_benchmark(c: &mut Criterion) {
    let source: String = (0..5_000)
        .map(|index| -> String {
            let suffix: String = thread_rng()
                .sample_iter(&Alphanumeric)
                .take(8)
                .map(char::from)
                .collect();
            format!("var x{}_{} = {} + {}.5; // declaration\n", index, suffix, index, index)
        })
        .collect();

    c.bench_function("scan_tokens", |b| {
        b.iter(|| {
            let scanner = Scanner::new(&source, 0);
            scanner.scan_tokens()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
