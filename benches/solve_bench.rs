use cad_engine::poly::{MultiPoly, Ring};
use cad_engine::rational::int;
use cad_engine::solve::{solve, RelOp, Relation};
use cad_engine::CadConfig;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::BTreeMap;
use std::rc::Rc;

fn vars(names: &[&str]) -> Rc<Vec<String>> {
    Rc::new(names.iter().map(|s| s.to_string()).collect())
}

fn constant(vars: &Rc<Vec<String>>, c: i64) -> MultiPoly {
    let mut terms = BTreeMap::new();
    if c != 0 {
        terms.insert(vec![0; vars.len()], int(c));
    }
    MultiPoly::new(vars.clone(), terms)
}

fn var(vars: &Rc<Vec<String>>, name: &str) -> MultiPoly {
    MultiPoly::variable(vars.clone(), name)
}

/// A chain `x_1 < x_2 < ... < x_n`, forcing the solver to eliminate one
/// variable per recursion level before the first sample can be taken.
fn chain_system(n: usize) -> (Vec<String>, Vec<Relation>) {
    let names: Vec<String> = (0..n).map(|i| format!("x{i}")).collect();
    let name_refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
    let vs = vars(&name_refs);
    let mut relations = Vec::new();
    for w in 0..n.saturating_sub(1) {
        relations.push(Relation {
            lhs: var(&vs, &names[w + 1]),
            rhs: var(&vs, &names[w]),
            op: RelOp::Gt,
        });
    }
    relations.push(Relation {
        lhs: var(&vs, &names[0]),
        rhs: constant(&vs, 0),
        op: RelOp::Gt,
    });
    (names, relations)
}

/// A single quadratic `x^2 - n < 0`, exercising root isolation and
/// bisection-based sampling without any variable elimination.
fn quadratic_system(n: i64) -> (Vec<String>, Vec<Relation>) {
    let vs = vars(&["x"]);
    let x = var(&vs, "x");
    let x_sq = Ring::mul(&x, &x);
    let relations = vec![Relation {
        lhs: x_sq,
        rhs: constant(&vs, n),
        op: RelOp::Lt,
    }];
    (vec!["x".to_string()], relations)
}

fn chain_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_chain");
    for n in [1usize, 2, 3, 4] {
        let (names, relations) = chain_system(n);
        let config = CadConfig::default();
        group.bench_with_input(BenchmarkId::new("vars", n), &n, |b, _| {
            b.iter(|| solve(&names, &relations, &config));
        });
    }
    group.finish();
}

fn quadratic_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_quadratic");
    for n in [2i64, 10, 1_000] {
        let (names, relations) = quadratic_system(n);
        let config = CadConfig::default();
        group.bench_with_input(BenchmarkId::new("bound", n), &n, |b, _| {
            b.iter(|| solve(&names, &relations, &config));
        });
    }
    group.finish();
}

criterion_group!(benches, chain_bench, quadratic_bench);
criterion_main!(benches);
