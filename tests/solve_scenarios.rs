use cad_engine::poly::{MultiPoly, Ring};
use cad_engine::rational::{int, rational};
use cad_engine::solve::{solve, RelOp, Relation};
use cad_engine::CadConfig;
use std::collections::BTreeMap;
use std::rc::Rc;

fn vars(names: &[&str]) -> Rc<Vec<String>> {
    Rc::new(names.iter().map(|s| s.to_string()).collect())
}

fn constant(vs: &Rc<Vec<String>>, c: i64) -> MultiPoly {
    let mut terms = BTreeMap::new();
    if c != 0 {
        terms.insert(vec![0; vs.len()], int(c));
    }
    MultiPoly::new(vs.clone(), terms)
}

fn var(vs: &Rc<Vec<String>>, name: &str) -> MultiPoly {
    MultiPoly::variable(vs.clone(), name)
}

fn gt(lhs: MultiPoly, rhs: MultiPoly) -> Relation {
    Relation { lhs, rhs, op: RelOp::Gt }
}

fn lt(lhs: MultiPoly, rhs: MultiPoly) -> Relation {
    Relation { lhs, rhs, op: RelOp::Lt }
}

fn eq(lhs: MultiPoly, rhs: MultiPoly) -> Relation {
    Relation { lhs, rhs, op: RelOp::Eq }
}

#[test]
fn univariate_linear_system_is_satisfiable() {
    // x + 1 > 0, -2x + 3 > 0, x > 0  =>  0 < x < 3/2
    let vs = vars(&["x"]);
    let x = var(&vs, "x");
    let relations = vec![
        gt(Ring::add(&x, &constant(&vs, 1)), constant(&vs, 0)),
        gt(Ring::add(&x.scale(&int(-2)), &constant(&vs, 3)), constant(&vs, 0)),
        gt(x.clone(), constant(&vs, 0)),
    ];
    let config = CadConfig::default();
    let model = solve(&["x".to_string()], &relations, &config).expect("should be satisfiable");
    let value = model.get("x").unwrap().approx_rational(50);
    assert!(value > int(0));
    assert!(value < rational(3, 2));
}

#[test]
fn univariate_system_with_no_real_solution_is_unsatisfiable() {
    // x^2 < 0 has no real solution.
    let vs = vars(&["x"]);
    let x = var(&vs, "x");
    let relations = vec![lt(Ring::mul(&x, &x), constant(&vs, 0))];
    let config = CadConfig::default();
    assert!(solve(&["x".to_string()], &relations, &config).is_none());
}

#[test]
fn symbolic_discriminant_is_satisfiable_for_generic_coefficients() {
    // a*x^2 + b*x + c = 0, eliminating x first, over free parameters a, b, c.
    // Generic (a, b, c) admit a real root whenever a != 0, so this should
    // find a model assigning x alongside the parameters.
    let vs = vars(&["x", "a", "b", "c"]);
    let x = var(&vs, "x");
    let a = var(&vs, "a");
    let b = var(&vs, "b");
    let c = var(&vs, "c");
    let quadratic = Ring::add(&Ring::add(&Ring::mul(&a, &Ring::mul(&x, &x)), &Ring::mul(&b, &x)), &c);
    let relations = vec![eq(quadratic, constant(&vs, 0))];
    let config = CadConfig::default();
    let model = solve(
        &["x".to_string(), "a".to_string(), "b".to_string(), "c".to_string()],
        &relations,
        &config,
    );
    assert!(model.is_some());
}

#[test]
fn sphere_interior_is_satisfiable() {
    // a^2 + b^2 + c^2 - 1 < 0: the open unit ball is nonempty.
    let vs = vars(&["a", "b", "c"]);
    let a = var(&vs, "a");
    let b = var(&vs, "b");
    let c = var(&vs, "c");
    let sum_sq = Ring::add(&Ring::add(&Ring::mul(&a, &a), &Ring::mul(&b, &b)), &Ring::mul(&c, &c));
    let relations = vec![lt(sum_sq, constant(&vs, 1))];
    let config = CadConfig::default();
    let model = solve(&["a".to_string(), "b".to_string(), "c".to_string()], &relations, &config);
    assert!(model.is_some());
    let model = model.unwrap();
    let a_val = model.get("a").unwrap().approx_rational(50);
    let b_val = model.get("b").unwrap().approx_rational(50);
    let c_val = model.get("c").unwrap().approx_rational(50);
    let total = a_val.clone() * a_val + b_val.clone() * b_val + c_val.clone() * c_val;
    assert!(total < int(1));
}

#[test]
fn equality_elimination_lands_on_the_positive_root_of_x_squared_plus_four_x_minus_ten() {
    // x^2 + 4x - 10 = 0, x > 0  =>  x = -2 + sqrt(14)
    let vs = vars(&["x"]);
    let x = var(&vs, "x");
    let poly = Ring::add(&Ring::add(&Ring::mul(&x, &x), &x.scale(&int(4))), &constant(&vs, -10));
    let relations = vec![eq(poly, constant(&vs, 0)), gt(x.clone(), constant(&vs, 0))];
    let config = CadConfig::default();
    let model = solve(&["x".to_string()], &relations, &config).expect("should be satisfiable");
    let value = model.get("x").unwrap().approx_rational(64);
    // sqrt(14) ~= 3.7416573867739413
    let lo = rational(374165738677394130, 100000000000000000);
    let hi = rational(374165738677394140, 100000000000000000);
    assert!(value > lo - int(2));
    assert!(value < hi - int(2));
}

#[test]
fn degenerate_quadratic_with_symbolically_zero_leading_coefficients_normalizes_to_a_constant() {
    // a = 0, b = 0, a*x^2 + b*x + 5 = 0: once a and b are forced to vanish
    // the quadratic normalizes down to the nonzero constant 5, so no x
    // satisfies it regardless of the root-enumeration that would otherwise
    // be needed for a genuine quadratic.
    let vs = vars(&["a", "b", "x"]);
    let a = var(&vs, "a");
    let b = var(&vs, "b");
    let x = var(&vs, "x");
    let quadratic = Ring::add(&Ring::add(&Ring::mul(&a, &Ring::mul(&x, &x)), &Ring::mul(&b, &x)), &constant(&vs, 5));
    let relations = vec![
        eq(a.clone(), constant(&vs, 0)),
        eq(b.clone(), constant(&vs, 0)),
        eq(quadratic, constant(&vs, 0)),
    ];
    let config = CadConfig::default();
    assert!(solve(&["a".to_string(), "b".to_string(), "x".to_string()], &relations, &config).is_none());
}
