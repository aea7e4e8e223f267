use criterion::{black_box, criterion_group, criterion_main, Criterion};
use semver_expr::expression::Lexer;
use semver_expr::{ExpressionParser, Version};

const EXPRESSIONS: [&str; 8] = [
    ">=1.2.3 & <2.0.0",
    "^1.2.3 | ~2.4",
    "1.2.* | 2.*",
    "1.2.3 - 2.0.0",
    "!(1.x) & >=0.5.0",
    "(~1.2.1 | ^0.3.0) & !=1.2.4",
    "1.0 | 2 | 3.1",
    ">0.9 & <=1.4.7 | !(~1.2)",
];

fn bench_lex(c: &mut Criterion) {
    let lexer = Lexer::new();
    c.bench_function("lex_expressions", |b| {
        b.iter(|| {
            for expression in EXPRESSIONS {
                black_box(lexer.lex(black_box(expression)).ok());
            }
        })
    });
}

fn bench_parse(c: &mut Criterion) {
    let parser = ExpressionParser::new();
    c.bench_function("parse_expressions", |b| {
        b.iter(|| {
            for expression in EXPRESSIONS {
                black_box(parser.parse(black_box(expression)).ok());
            }
        })
    });
}

fn bench_parse_versions(c: &mut Criterion) {
    let versions = [
        "1.2.3",
        "1.2.3-beta.1",
        "2.4.0+build.5",
        "1.0.0-alpha.beta.1+exp.sha.5114f85",
        "10.20.30",
        "0.0.1-rc.1",
    ];
    c.bench_function("parse_versions", |b| {
        b.iter(|| {
            for version in versions {
                black_box(Version::parse(black_box(version)).ok());
            }
        })
    });
}

fn bench_interpret(c: &mut Criterion) {
    let parser = ExpressionParser::new();
    let ranges: Vec<_> = EXPRESSIONS
        .iter()
        .filter_map(|expression| parser.parse(expression).ok())
        .collect();
    let versions: Vec<_> = ["0.5.0", "1.2.3", "1.2.4", "1.9.9", "2.4.7", "3.1.0", "1.0.0-beta"]
        .iter()
        .filter_map(|version| Version::parse(version).ok())
        .collect();

    c.bench_function("interpret_ranges", |b| {
        b.iter(|| {
            for range in &ranges {
                for version in &versions {
                    black_box(range.interpret(black_box(version)));
                }
            }
        })
    });
}

criterion_group!(
    benches,
    bench_lex,
    bench_parse,
    bench_parse_versions,
    bench_interpret
);
criterion_main!(benches);
