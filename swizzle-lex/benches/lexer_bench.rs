use criterion::{black_box, criterion_group, criterion_main, Criterion};
use swizzle_lex::Tokenizer;
use swizzle_util::Symbol;

const SAMPLE: &str = r#"
namespace acme::wire;

enum Metal : u8 { iron = 0x04, copper = 'a', gold = 200, }

struct Message {
    u8[10] fixed;
    u8 size;
    u8[size] var;
}
"#;

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_sample", |b| {
        b.iter(|| {
            let mut count = 0usize;
            Tokenizer::new(black_box(SAMPLE), Symbol::intern("bench.swizzle"))
                .run(&mut |_| count += 1)
                .unwrap();
            black_box(count)
        })
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
