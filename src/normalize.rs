//! Normalization of a univariate polynomial whose coefficients carry
//! unknown sign: branches away high-order terms the search cannot yet
//! prove nonzero, until the remaining leading coefficient's sign is at
//! worst `{Pos, Neg}`.

use crate::assumption::{self, run_m, Assumption, SearchM};
use crate::config::CadConfig;
use crate::error::CadResult;
use crate::poly::{MultiPoly, UniPoly};

fn truncate(p: &UniPoly<MultiPoly>, d: usize) -> UniPoly<MultiPoly> {
    UniPoly::from_coeffs((0..=d).map(|i| p.coeff(i)).collect())
}

/// Removes zero high-order terms whose leading coefficients are unknown,
/// branching on each candidate leading coefficient's sign until the
/// remaining polynomial's leading coefficient is known nonzero (or the
/// whole polynomial degree-collapses to a constant).
pub fn normalize_poly(
    assumption: &Assumption,
    p: &UniPoly<MultiPoly>,
    config: &CadConfig,
) -> CadResult<SearchM<UniPoly<MultiPoly>>> {
    let mut out = Vec::new();
    normalize_rec(assumption.clone(), p.clone(), p.degree(), config, &mut out)?;
    Ok(SearchM::from_alternatives(out))
}

fn normalize_rec(
    assumption: Assumption,
    p: UniPoly<MultiPoly>,
    deg: usize,
    config: &CadConfig,
    out: &mut Vec<(UniPoly<MultiPoly>, Assumption)>,
) -> CadResult<()> {
    let c = p.coeff(deg);

    if deg == 0 {
        out.push((truncate(&p, 0), assumption));
        return Ok(());
    }

    // A syntactically zero coefficient needs no branch: it cannot be made
    // nonzero by any assumption.
    if c.is_zero() {
        return normalize_rec(assumption, truncate(&p, deg - 1), deg - 1, config, out);
    }

    let nonzero = assumption::assume(&assumption, &c, assumption::nonzero_signs(), config)?;
    for (_, a) in run_m(nonzero) {
        out.push((truncate(&p, deg), a));
    }

    let zero = assumption::assume(&assumption, &c, assumption::singleton(crate::sign::Sign::Zero), config)?;
    for (_, a) in run_m(zero) {
        normalize_rec(a, truncate(&p, deg - 1), deg - 1, config, out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::int;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    fn vars() -> Rc<Vec<String>> {
        Rc::new(vec!["a".to_string()])
    }

    fn coeff_a(vars: &Rc<Vec<String>>) -> MultiPoly {
        let mut terms = BTreeMap::new();
        terms.insert(vec![1], int(1));
        MultiPoly::new(vars.clone(), terms)
    }

    fn coeff_const(vars: &Rc<Vec<String>>, c: i64) -> MultiPoly {
        let mut terms = BTreeMap::new();
        if c != 0 {
            terms.insert(vec![0], int(c));
        }
        MultiPoly::new(vars.clone(), terms)
    }

    #[test]
    fn degenerate_quadratic_normalizes_to_constant_without_branching_on_known_zero() {
        // 0*x^2 + 0*x + 5, with the 0 coefficients syntactically zero
        // (not merely unknown), should collapse straight to the constant
        // with a single alternative.
        let vars = vars();
        let p: UniPoly<MultiPoly> = UniPoly::from_coeffs(vec![
            coeff_const(&vars, 5),
            coeff_const(&vars, 0),
            coeff_const(&vars, 0),
        ]);
        let assumption = Assumption::empty();
        let config = CadConfig::default();
        let search = normalize_poly(&assumption, &p, &config).unwrap();
        let results = run_m(search);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0.degree(), 0);
    }

    #[test]
    fn unknown_leading_coefficient_branches_into_two_alternatives() {
        // a*x + 1: "a" has unknown sign, so normalization branches into
        // "a != 0" (degree 1 kept) and "a == 0" (collapses to constant 1).
        let vars = vars();
        let p: UniPoly<MultiPoly> =
            UniPoly::from_coeffs(vec![coeff_const(&vars, 1), coeff_a(&vars)]);
        let assumption = Assumption::empty();
        let config = CadConfig::default();
        let search = normalize_poly(&assumption, &p, &config).unwrap();
        let results = run_m(search);
        assert_eq!(results.len(), 2);
        let degrees: Vec<usize> = results.iter().map(|(q, _)| q.degree()).collect();
        assert!(degrees.contains(&1));
        assert!(degrees.contains(&0));
    }
}
