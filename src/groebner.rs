//! A from-scratch Buchberger-algorithm implementation over [`MultiPoly`],
//! deliberately simple rather than fast: the `zeroBasis` side of an
//! [`crate::assumption::Assumption`] only ever accumulates a handful of
//! low-degree coefficient polynomials in a handful of variables, so there is
//! no call for the subtler S-polynomial selection strategies a general
//! purpose Gröbner-basis package would use.
//!
//! Everything in [`crate::assumption`] talks to this module only through the
//! [`ZeroBasis`] trait, so a faster implementation could be dropped in
//! without touching the search.

use crate::config::CadConfig;
use crate::error::{CadError, CadResult};
use crate::poly::{MonomialOrder, MultiPoly, Ring};
use crate::rational::Rational;

fn divides(a: &[u32], b: &[u32]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x <= y)
}

fn monomial(vars: &std::rc::Rc<Vec<String>>, exp: Vec<u32>, coeff: Rational) -> MultiPoly {
    let mut terms = std::collections::BTreeMap::new();
    terms.insert(exp, coeff);
    MultiPoly::new(vars.clone(), terms)
}

/// `S(f, g)`: the combination of `f` and `g` that cancels their leading
/// terms under `order`.
pub fn s_polynomial(f: &MultiPoly, g: &MultiPoly, order: MonomialOrder) -> MultiPoly {
    let (ef, cf) = f.leading_term(order).expect("s_polynomial of zero poly");
    let (eg, cg) = g.leading_term(order).expect("s_polynomial of zero poly");
    let lcm: Vec<u32> = ef.iter().zip(eg.iter()).map(|(a, b)| *a.max(b)).collect();
    let exp_f: Vec<u32> = lcm.iter().zip(ef.iter()).map(|(l, e)| l - e).collect();
    let exp_g: Vec<u32> = lcm.iter().zip(eg.iter()).map(|(l, e)| l - e).collect();
    let term_f = monomial(f.vars(), exp_f, cf.recip());
    let term_g = monomial(g.vars(), exp_g, cg.recip());
    term_f.mul(f).sub(&term_g.mul(g))
}

/// Multivariate division remainder of `p` modulo `basis`, under `order`.
pub fn reduce(p: &MultiPoly, basis: &[MultiPoly], order: MonomialOrder) -> MultiPoly {
    let mut rest = p.clone();
    let mut remainder = MultiPoly::zero_with_vars(p.vars().clone());
    'outer: while !rest.is_zero() {
        let (exp, coeff) = rest.leading_term(order).unwrap();
        let exp = exp.clone();
        let coeff = coeff.clone();
        for g in basis {
            if g.is_zero() {
                continue;
            }
            let (gexp, gcoeff) = g.leading_term(order).unwrap();
            if divides(gexp, &exp) {
                let quot_exp: Vec<u32> = exp.iter().zip(gexp.iter()).map(|(a, b)| a - b).collect();
                let quot = monomial(p.vars(), quot_exp, &coeff / gcoeff);
                rest = rest.sub(&quot.mul(g));
                continue 'outer;
            }
        }
        let lead = monomial(p.vars(), exp, coeff);
        remainder = remainder.add(&lead);
        rest = rest.sub(&lead);
    }
    remainder
}

/// Runs Buchberger's algorithm to a fixpoint, bounded by
/// `config.max_buchberger_iters` S-polynomial reductions.
pub fn buchberger(
    generators: &[MultiPoly],
    order: MonomialOrder,
    config: &CadConfig,
) -> CadResult<Vec<MultiPoly>> {
    let mut basis: Vec<MultiPoly> = generators.iter().filter(|g| !g.is_zero()).cloned().collect();
    let mut pairs: Vec<(usize, usize)> = (0..basis.len())
        .flat_map(|i| (0..i).map(move |j| (i, j)))
        .collect();
    let mut iters = 0usize;
    while let Some((i, j)) = pairs.pop() {
        iters += 1;
        if iters > config.max_buchberger_iters {
            return Err(CadError::BuchbergerDidNotConverge {
                max_iters: config.max_buchberger_iters,
            });
        }
        let s = s_polynomial(&basis[i], &basis[j], order);
        let r = reduce(&s, &basis, order);
        if !r.is_zero() {
            let new_idx = basis.len();
            for k in 0..new_idx {
                pairs.push((new_idx, k));
            }
            basis.push(r);
        }
    }
    Ok(basis)
}

/// Minimizes then auto-reduces `basis`: every leading coefficient becomes
/// `1`, no basis element's leading monomial divides another's, and every
/// element is fully reduced modulo the rest. Used so two assumptions'
/// `zero_basis`es compare structurally equal iff they generate the same
/// ideal's canonical basis.
pub fn reduced_basis(basis: &[MultiPoly], order: MonomialOrder) -> Vec<MultiPoly> {
    let monic: Vec<MultiPoly> = basis
        .iter()
        .filter(|p| !p.is_zero())
        .map(|p| p.monic(order))
        .collect();

    let minimal: Vec<MultiPoly> = monic
        .iter()
        .enumerate()
        .filter(|(i, p)| {
            let (exp, _) = p.leading_term(order).unwrap();
            !monic
                .iter()
                .enumerate()
                .any(|(j, q)| j != *i && divides(q.leading_term(order).unwrap().0, exp))
        })
        .map(|(_, p)| p.clone())
        .collect();

    minimal
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let others: Vec<MultiPoly> = minimal
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, q)| q.clone())
                .collect();
            reduce(p, &others, order).monic(order)
        })
        .filter(|p| !p.is_zero())
        .collect()
}

/// The trait boundary [`crate::assumption::Assumption`] talks to; a `Vec` of
/// basis polynomials under a fixed monomial order is the only implementor
/// this crate ships.
pub trait ZeroBasis {
    fn reduce_poly(&self, p: &MultiPoly, order: MonomialOrder) -> MultiPoly;
    fn contains_zero(&self, p: &MultiPoly, order: MonomialOrder) -> bool {
        self.reduce_poly(p, order).is_zero()
    }
}

impl ZeroBasis for Vec<MultiPoly> {
    fn reduce_poly(&self, p: &MultiPoly, order: MonomialOrder) -> MultiPoly {
        reduce(p, self, order)
    }
}
