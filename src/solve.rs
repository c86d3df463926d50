//! The top-level solver: recursive variable elimination over an ordered
//! list of variables, terminating in a [`Model`] witnessing satisfiability
//! or `None` for unsatisfiable.

use crate::assumption::{run_m, Assumption, SignSet};
use crate::config::CadConfig;
use crate::diagnostics;
use crate::error::CadResult;
use crate::model::Model;
use crate::poly::MultiPoly;
use crate::project;
use crate::sample;
use crate::sign::Sign;

/// A relational operator between two polynomials, converted to the sign
/// set its difference must land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Le,
    Ge,
    Lt,
    Gt,
    Eq,
    Ne,
}

impl RelOp {
    pub fn sign_set(self) -> SignSet {
        match self {
            RelOp::Le => [Sign::Neg, Sign::Zero].into_iter().collect(),
            RelOp::Ge => [Sign::Pos, Sign::Zero].into_iter().collect(),
            RelOp::Lt => [Sign::Neg].into_iter().collect(),
            RelOp::Gt => [Sign::Pos].into_iter().collect(),
            RelOp::Eq => [Sign::Zero].into_iter().collect(),
            RelOp::Ne => [Sign::Neg, Sign::Pos].into_iter().collect(),
        }
    }
}

/// `lhs op rhs`, both sides multivariate polynomials over every variable in
/// `V`.
#[derive(Debug, Clone)]
pub struct Relation {
    pub lhs: MultiPoly,
    pub rhs: MultiPoly,
    pub op: RelOp,
}

/// Decides satisfiability of `relations` over the ordered variable list
/// `vars`, eliminating one variable per recursion level via
/// [`project::project`] and sampling a witness from the first surviving
/// branch. `None` means unsatisfiable.
///
/// Internal precondition violations (see the crate's error-handling design)
/// are not part of this function's public contract and are turned into a
/// panic rather than threaded through as a `Result`: they signal a bug in
/// this engine, not a property of the input.
#[tracing::instrument(level = "debug", skip(vars, relations, config))]
pub fn solve(vars: &[String], relations: &[Relation], config: &CadConfig) -> Option<Model> {
    let constraints: Vec<(MultiPoly, SignSet)> = relations
        .iter()
        .map(|r| (crate::poly::Ring::sub(&r.lhs, &r.rhs), r.op.sign_set()))
        .collect();
    solve_rec(vars, constraints, Assumption::empty(), config).expect("solve: internal precondition violation")
}

#[tracing::instrument(level = "debug", skip(remaining, constraints, assumption, config))]
fn solve_rec(
    remaining: &[String],
    constraints: Vec<(MultiPoly, SignSet)>,
    assumption: Assumption,
    config: &CadConfig,
) -> CadResult<Option<Model>> {
    let (v, rest_vars) = match remaining.split_first() {
        Some(pair) => pair,
        None => {
            tracing::debug!("solve: base case reached with {}", diagnostics::fmt_assumption(&assumption));
            for (p, s) in &constraints {
                let c = p
                    .as_constant()
                    .expect("no variables remain, every constraint must be fully numeric");
                if !s.contains(&Sign::of_rational(&c)) {
                    tracing::debug!("solve: base case constraint {:?} violates {:?}", p, s);
                    return Ok(None);
                }
            }
            return Ok(Some(Model::new()));
        }
    };

    let univariate: Vec<_> = constraints.iter().map(|(p, s)| (p.to_univariate(v), s.clone())).collect();
    let branches = project::project(&assumption, &univariate, config)?;

    for (cells, branch_assumption) in run_m(branches) {
        let next_constraints: Vec<(MultiPoly, SignSet)> = branch_assumption.sign_map().to_vec();
        let recursed = solve_rec(rest_vars, next_constraints, branch_assumption, config)?;
        let Some(model) = recursed else { continue };

        let cell = cells.first().expect("project guarantees a non-empty cell list per branch");
        let sample = sample::find_sample(&model, cell, config)?;
        tracing::debug!("solve: level for {:?} sampled {:?}", v, sample);
        return Ok(Some(model.extended(v, sample)));
    }

    Ok(None)
}
