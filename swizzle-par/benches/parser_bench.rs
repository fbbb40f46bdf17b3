use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use swizzle_lex::Tokenizer;
use swizzle_par::{Parser, ParseOutput};
use swizzle_util::Symbol;

fn parse_source(source: &str) -> ParseOutput {
    let mut tokens = Vec::new();
    Tokenizer::new(source, Symbol::intern("bench.swizzle"))
        .run(&mut |t| tokens.push(t))
        .unwrap();
    Parser::without_imports(tokens).run().unwrap()
}

fn bench_parser_enum(c: &mut Criterion) {
    let source = "namespace acme; enum Metal : u8 { iron = 0x04, copper = 'a', gold = 200, }";

    let mut group = c.benchmark_group("parser_enum");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("namespace_and_enum", |b| {
        b.iter(|| parse_source(black_box(source)))
    });
    group.finish();
}

fn bench_parser_struct(c: &mut Criterion) {
    let source = r#"
        namespace acme::wire;

        struct Message {
            u8[10] fixed;
            u8 size;
            u8[size] var;
            const u32 magic = 0xcafe;
        }
    "#;

    let mut group = c.benchmark_group("parser_struct");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("array_and_vector_fields", |b| {
        b.iter(|| parse_source(black_box(source)))
    });
    group.finish();
}

fn bench_parser_complex(c: &mut Criterion) {
    let source = r#"
        namespace acme::wire;

        enum Kind : u8 { ping = 0, pong, data, }

        bitfield Flags : u8 {
            ack: 0,
            retry: 1..2,
        }

        struct Header {
            Kind kind;
            Flags flags;
        }

        struct Packet {
            Header header;
            variable_block : header.kind {
                case 0: Header;
                case 2: Message;
            }
        }

        struct Message {
            u8[10] fixed;
            u8 size;
            u8[size] var;
        }
    "#;

    let mut group = c.benchmark_group("parser_complex");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("full_schema", |b| b.iter(|| parse_source(black_box(source))));
    group.finish();
}

criterion_group!(benches, bench_parser_enum, bench_parser_struct, bench_parser_complex);
criterion_main!(benches);
