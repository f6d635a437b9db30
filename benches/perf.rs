//! Layout throughput over representative formulas.

use core::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use mathsetter::{AtomKind, LineStyle, MathAtom, MathList, typeset_line};

#[path = "../tests/setup/mod.rs"]
mod setup;

/// Roughly the quadratic formula: a fraction with a radical numerator,
/// scripts and boundary delimiters.
fn quadratic_formula() -> MathList {
    let mut b_squared = setup::variable("b");
    b_squared.superscript = Some(setup::list(vec![setup::number("2")]));
    let discriminant = setup::radical(vec![
        b_squared,
        setup::atom(AtomKind::BinaryOperator, "-"),
        setup::number("4"),
        setup::variable("a"),
        setup::variable("c"),
    ]);
    let numerator = vec![
        setup::atom(AtomKind::UnaryOperator, "-"),
        setup::variable("b"),
        setup::atom(AtomKind::BinaryOperator, "\u{00B1}"),
        discriminant,
    ];
    let denominator = vec![setup::number("2"), setup::variable("a")];
    let mut x = setup::variable("x");
    x.subscript = Some(setup::list(vec![setup::number("1")]));
    setup::list(vec![
        x,
        setup::atom(AtomKind::Relation, "="),
        setup::fraction(numerator, denominator),
    ])
}

/// A sum with stacked limits over a parenthesised inner list.
fn summation() -> MathList {
    let mut sum = setup::atom(AtomKind::LargeOperator { limits: None }, "\u{2211}");
    sum.subscript = Some(setup::list(vec![
        setup::variable("k"),
        setup::atom(AtomKind::Relation, "="),
        setup::number("1"),
    ]));
    sum.superscript = Some(setup::list(vec![setup::variable("n")]));
    let inner = setup::atom(
        AtomKind::Inner {
            inner: setup::list(vec![
                setup::variable("k"),
                setup::atom(AtomKind::BinaryOperator, "+"),
                setup::number("1"),
            ]),
            left_boundary: Some("(".to_owned()),
            right_boundary: Some(")".to_owned()),
        },
        "",
    );
    setup::list(vec![sum, inner])
}

fn plain_run() -> MathList {
    let mut atoms: Vec<MathAtom> = Vec::new();
    for ch in ["a", "+", "b", "+", "c", "+", "d", "=", "e"] {
        let kind = match ch {
            "+" => AtomKind::BinaryOperator,
            "=" => AtomKind::Relation,
            _ => AtomKind::Variable,
        };
        atoms.push(setup::atom(kind, ch));
    }
    setup::list(atoms)
}

fn bench_typeset(c: &mut Criterion) {
    let font = setup::font();
    let context = setup::context();
    let cases = [
        ("plain_run", plain_run()),
        ("quadratic_formula", quadratic_formula()),
        ("summation_with_limits", summation()),
    ];
    let mut group = c.benchmark_group("typeset");
    for (name, formula) in &cases {
        group.bench_function(*name, |b| {
            b.iter(|| {
                typeset_line(
                    black_box(formula),
                    black_box(&font),
                    &context,
                    LineStyle::Display,
                )
                .unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_typeset);
criterion_main!(benches);
