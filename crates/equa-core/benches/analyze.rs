use criterion::{black_box, criterion_group, criterion_main, Criterion};
use equa_core::{
    analyze, eval, BinOp, Clause, Expr, FunctionDef, Obligation, Pattern, Program, Signature,
    Type,
};

fn factorial() -> FunctionDef {
    FunctionDef::new(
        "fact",
        Signature::new(vec![Type::Natural], Type::Natural),
        vec![
            Clause::new(vec![Pattern::int(0)], Expr::int(1)),
            Clause::new(
                vec![Pattern::var("n")],
                Expr::bin(
                    BinOp::Mul,
                    Expr::var("n"),
                    Expr::apply(
                        "fact",
                        vec![Expr::bin(BinOp::Sub, Expr::var("n"), Expr::int(1))],
                    ),
                ),
            ),
        ],
    )
    .with_obligation(Obligation::new(
        "n",
        Type::Natural,
        Expr::apply("fact", vec![Expr::var("n")]),
        Type::Natural,
    ))
}

fn consecutive_product() -> FunctionDef {
    FunctionDef::new(
        "consecutive",
        Signature::new(vec![Type::Real], Type::Real),
        vec![Clause::new(
            vec![Pattern::var("x")],
            Expr::bin(
                BinOp::Mul,
                Expr::var("x"),
                Expr::bin(BinOp::Add, Expr::var("x"), Expr::int(1)),
            ),
        )],
    )
    .with_obligation(Obligation::new(
        "x",
        Type::Integer,
        Expr::apply("consecutive", vec![Expr::var("x")]),
        Type::Even,
    ))
}

/// A Natural-domain function with many literal clauses, to exercise the
/// decision tree compiler on wide switch nodes
fn wide_match(arms: i64) -> FunctionDef {
    let mut clauses: Vec<Clause> = (0..arms)
        .map(|k| Clause::new(vec![Pattern::int(k)], Expr::int(k * k)))
        .collect();
    clauses.push(Clause::new(vec![Pattern::var("n")], Expr::int(0)));
    FunctionDef::new(
        "table",
        Signature::new(vec![Type::Natural], Type::Natural),
        clauses,
    )
}

fn bench_analyze(c: &mut Criterion) {
    let program = Program::new(vec![], vec![factorial(), consecutive_product()]);
    c.bench_function("analyze_two_proved_obligations", |b| {
        b.iter(|| analyze(black_box(&program)).unwrap())
    });

    let wide = Program::new(vec![], vec![wide_match(64)]);
    c.bench_function("analyze_wide_match", |b| {
        b.iter(|| analyze(black_box(&wide)).unwrap())
    });
}

fn bench_eval(c: &mut Criterion) {
    let program = Program::new(vec![], vec![factorial()]);
    let goal = Expr::apply("fact", vec![Expr::int(15)]);
    let env = Default::default();
    c.bench_function("eval_factorial_15", |b| {
        b.iter(|| eval(black_box(&program), &env, black_box(&goal)).unwrap())
    });
}

criterion_group!(benches, bench_analyze, bench_eval);
criterion_main!(benches);
