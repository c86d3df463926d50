//! Elimination of one variable: `project` turns a list of `(polynomial,
//! allowed sign set)` constraints in the distinguished variable into a set
//! of surviving assumption branches, each paired with the cells (over the
//! remaining parameters) on which every constraint holds.

use crate::assumption::{self, run_m, Assumption, SearchM, SignSet};
use crate::config::CadConfig;
use crate::diagnostics;
use crate::error::CadResult;
use crate::normalize;
use crate::poly::{MultiPoly, UniPoly};
use crate::signconf::{self, Cell, CellEntry, Point};

/// Eliminates the distinguished variable from `constraints`. Each surviving
/// branch's value is `cells`: every cell (excluding the two
/// point-at-infinity sentinels) on which every constraint's polynomial has a
/// sign allowed by its constraint. The branch's narrowed [`Assumption`] is
/// carried as `SearchM`'s own per-alternative companion, the same way every
/// other branch-producing function in this crate threads it.
#[tracing::instrument(level = "debug", skip(assumption, constraints, config))]
pub fn project(
    assumption: &Assumption,
    constraints: &[(UniPoly<MultiPoly>, SignSet)],
    config: &CadConfig,
) -> CadResult<SearchM<Vec<CellEntry>>> {
    // Fold every constraint through normalize_poly, immediately `assume`-ing
    // away anything that collapses to a constant (including constraints
    // that were already degree <= 0 to start with) and keeping the rest as
    // genuine univariate constraints to decompose.
    let mut frontier: Vec<(Assumption, Vec<(UniPoly<MultiPoly>, SignSet)>)> =
        vec![(assumption.clone(), Vec::new())];

    for (p, s) in constraints {
        let mut next = Vec::new();
        for (a, surviving) in frontier {
            let normalized = normalize::normalize_poly(&a, p, config)?;
            for (q, a2) in run_m(normalized) {
                if q.degree() == 0 {
                    let c = q
                        .as_constant()
                        .expect("a degree-0 polynomial always has a constant coefficient");
                    let assumed = assumption::assume(&a2, &c, s.clone(), config)?;
                    for (_, a3) in run_m(assumed) {
                        next.push((a3, surviving.clone()));
                    }
                } else {
                    let mut surviving2 = surviving.clone();
                    surviving2.push((q, s.clone()));
                    next.push((a2, surviving2));
                }
            }
        }
        frontier = next;
    }

    let mut out = Vec::new();
    for (a, surviving) in frontier {
        if surviving.is_empty() {
            // Every constraint was degree <= 0 and already absorbed into
            // the assumption; the whole line is a single surviving cell.
            out.push((
                vec![CellEntry {
                    cell: Cell::Interval(Point::NegInf, Point::PosInf),
                    signs: Vec::new(),
                }],
                a,
            ));
            continue;
        }

        let polys: Vec<UniPoly<MultiPoly>> = surviving.iter().map(|(p, _)| p.clone()).collect();
        let conf_search = signconf::build_sign_conf(&a, &polys, config)?;
        for (conf, a2) in run_m(conf_search) {
            let cells: Vec<CellEntry> = conf
                .entries
                .iter()
                .filter(|e| !matches!(e.cell, Cell::Point(Point::NegInf) | Cell::Point(Point::PosInf)))
                .filter(|e| {
                    surviving
                        .iter()
                        .all(|(p, s)| e.sign_of(p).map(|sign| s.contains(&sign)).unwrap_or(false))
                })
                .cloned()
                .collect();
            if cells.is_empty() {
                tracing::debug!(
                    "project: branch pruned, no cell in {} satisfies every constraint",
                    diagnostics::fmt_sign_conf(&conf)
                );
                continue;
            }
            out.push((cells, a2));
        }
    }

    Ok(SearchM::from_alternatives(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::int;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    fn vars() -> Rc<Vec<String>> {
        Rc::new(Vec::new())
    }

    fn constant(vars: &Rc<Vec<String>>, c: i64) -> MultiPoly {
        let mut terms = BTreeMap::new();
        if c != 0 {
            terms.insert(Vec::new(), int(c));
        }
        MultiPoly::new(vars.clone(), terms)
    }

    #[test]
    fn projecting_x_squared_less_than_zero_has_no_surviving_cell() {
        let vars = vars();
        // x^2, constrained to be strictly negative: unsatisfiable.
        let p: UniPoly<MultiPoly> = UniPoly::from_coeffs(vec![
            constant(&vars, 0),
            constant(&vars, 0),
            constant(&vars, 1),
        ]);
        let assumption = Assumption::empty();
        let config = CadConfig::default();
        let search = project(&assumption, &[(p, assumption::singleton(crate::sign::Sign::Neg))], &config).unwrap();
        assert_eq!(run_m(search).len(), 0);
    }

    #[test]
    fn projecting_x_minus_one_greater_than_zero_has_one_surviving_cell() {
        let vars = vars();
        // x - 1 > 0
        let p: UniPoly<MultiPoly> = UniPoly::from_coeffs(vec![constant(&vars, -1), constant(&vars, 1)]);
        let assumption = Assumption::empty();
        let config = CadConfig::default();
        let search = project(&assumption, &[(p, assumption::singleton(crate::sign::Sign::Pos))], &config).unwrap();
        let results = run_m(search);
        assert_eq!(results.len(), 1);
        let (cells, _) = &results[0];
        assert_eq!(cells.len(), 1);
        assert!(
            matches!(cells[0].cell, Cell::Interval(Point::RootOf(..), Point::PosInf)),
            "unexpected surviving cell: {}",
            diagnostics::fmt_cell_entry(&cells[0])
        );
    }
}
