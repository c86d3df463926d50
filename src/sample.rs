//! Sampling: turning a cell of a sign configuration, specialized against a
//! concrete [`Model`], into a single real algebraic number representative.

use crate::algebraic::{RealAlgebraic, RootProvider, SturmRootProvider};
use crate::config::CadConfig;
use crate::error::{CadError, CadResult};
use crate::model::Model;
use crate::poly::{MultiPoly, UniPoly};
use crate::rational;
use crate::signconf::{Cell, CellEntry, Point};

/// Specializes `p`'s (symbolic) coefficients against `model`, isolates its
/// real roots, and returns the `n`-th in ascending order.
#[tracing::instrument(level = "debug", skip(model, p, config))]
pub fn eval_point(
    model: &Model,
    p: &UniPoly<MultiPoly>,
    n: usize,
    config: &CadConfig,
) -> CadResult<RealAlgebraic> {
    let specialized = p.specialize(model);
    let roots = SturmRootProvider::isolate_roots(&specialized, config)?;
    roots.get(n).cloned().ok_or(CadError::IllFormedCell(
        "eval_point: root index out of range for the specialized minimal polynomial",
    ))
}

fn eval(model: &Model, pt: &Point, config: &CadConfig) -> CadResult<RealAlgebraic> {
    match pt {
        Point::RootOf(p, n) => eval_point(model, p, *n, config),
        Point::NegInf | Point::PosInf => Err(CadError::IllFormedCell(
            "eval_point: cannot evaluate a point at infinity",
        )),
    }
}

/// The spec's `find_sample`: a concrete representative real algebraic
/// number for `cell`, given a model assigning every parameter that appears
/// in the cell's symbolic endpoints.
#[tracing::instrument(level = "debug", skip(model, cell, config))]
pub fn find_sample(model: &Model, cell: &CellEntry, config: &CadConfig) -> CadResult<RealAlgebraic> {
    match &cell.cell {
        Cell::Point(pt) => eval(model, pt, config),
        Cell::Interval(Point::NegInf, Point::PosInf) => Ok(RealAlgebraic::from_rational(rational::zero())),
        Cell::Interval(Point::NegInf, right) => {
            let r = eval(model, right, config)?;
            Ok(RealAlgebraic::from_rational(r.floor_minus_one()))
        }
        Cell::Interval(left, Point::PosInf) => {
            let l = eval(model, left, config)?;
            Ok(RealAlgebraic::from_rational(l.ceil_plus_one()))
        }
        Cell::Interval(left, right) => {
            let l = eval(model, left, config)?;
            let r = eval(model, right, config)?;
            if std::cmp::Ordering::Less != RealAlgebraic::compare(&l, &r, config.bisection_steps) {
                return Err(CadError::IllFormedCell(
                    "find_sample: interval endpoints are not in ascending order",
                ));
            }
            let mid = RealAlgebraic::midpoint(&l, &r, config.bisection_steps)?;
            Ok(RealAlgebraic::from_rational(mid))
        }
    }
}
