//! Symbolic assumption state and the branching search built on top of it.
//!
//! The engine's search is depth-first over explicit immutable [`Assumption`]
//! snapshots rather than global mutable state: every operation that can
//! branch returns a [`SearchM`], a small lazy combinator over
//! `(value, Assumption)` alternatives, mirroring the teacher's preference for
//! a concrete iterator-chain combinator over a generic monad abstraction.

use crate::config::CadConfig;
use crate::error::CadResult;
use crate::groebner::{self, ZeroBasis};
use crate::poly::MultiPoly;
use crate::sign::Sign;
use std::collections::BTreeSet;
use std::rc::Rc;

const ZERO_BASIS_ORDER: crate::poly::MonomialOrder = crate::poly::MonomialOrder::Grevlex;
const NORMALIZE_ORDER: crate::poly::MonomialOrder = crate::poly::MonomialOrder::Grlex;

pub type SignSet = BTreeSet<Sign>;

pub fn all_signs() -> SignSet {
    [Sign::Neg, Sign::Zero, Sign::Pos].into_iter().collect()
}

pub fn singleton(s: Sign) -> SignSet {
    let mut set = SignSet::new();
    set.insert(s);
    set
}

pub fn nonzero_signs() -> SignSet {
    [Sign::Neg, Sign::Pos].into_iter().collect()
}

/// `sign_map` paired with a `zero_basis`. See the crate's data model: a
/// non-empty allowed-sign set per coefficient polynomial, plus a Gröbner
/// basis (under [`ZERO_BASIS_ORDER`]) of polynomials known to vanish.
#[derive(Debug, Clone)]
pub struct Assumption {
    sign_map: Rc<Vec<(MultiPoly, SignSet)>>,
    zero_basis: Rc<Vec<MultiPoly>>,
}

impl Assumption {
    pub fn empty() -> Self {
        Assumption {
            sign_map: Rc::new(Vec::new()),
            zero_basis: Rc::new(Vec::new()),
        }
    }

    pub fn zero_basis(&self) -> &[MultiPoly] {
        &self.zero_basis
    }

    pub fn sign_map(&self) -> &[(MultiPoly, SignSet)] {
        &self.sign_map
    }

    /// `p` reduced modulo this assumption's zero basis.
    pub fn reduce(&self, p: &MultiPoly) -> MultiPoly {
        self.zero_basis.reduce_poly(p, ZERO_BASIS_ORDER)
    }

    fn lookup(&self, p: &MultiPoly) -> SignSet {
        self.sign_map
            .iter()
            .find(|(q, _)| q == p)
            .map(|(_, s)| s.clone())
            .unwrap_or_else(all_signs)
    }
}

fn monic_with_sign(p: &MultiPoly, order: crate::poly::MonomialOrder) -> (MultiPoly, Sign) {
    let lc = p.leading_coeff(order);
    (p.monic(order), Sign::of_rational(&lc))
}

fn adjust(signs: &SignSet, c_sign: Sign) -> SignSet {
    signs.iter().map(|s| s.divide(c_sign)).collect()
}

/// Absorbs entries of `sign_map` that reduce to a constant under the
/// (already-updated) `zero_basis`, failing if such a reduction contradicts
/// its recorded allowed signs, and recursing if any further entry collapses
/// to `{Zero}` in the process.
fn propagate_zeros(
    sign_map: Vec<(MultiPoly, SignSet)>,
    zero_basis: Rc<Vec<MultiPoly>>,
    config: &CadConfig,
) -> CadResult<Option<(Vec<(MultiPoly, SignSet)>, Rc<Vec<MultiPoly>>)>> {
    let mut kept: Vec<(MultiPoly, SignSet)> = Vec::new();
    let mut newly_zero: Vec<MultiPoly> = Vec::new();

    for (p, signs) in sign_map {
        let reduced = zero_basis.reduce_poly(&p, ZERO_BASIS_ORDER);
        if let Some(c) = reduced.as_constant() {
            if !signs.contains(&Sign::of_rational(&c)) {
                tracing::debug!("propagate_zeros: {:?} collapsed to constant sign outside {:?}", p, signs);
                return Ok(None);
            }
            // Absorbed: a constant needs no entry in sign_map.
            continue;
        }
        let (q, c_sign) = monic_with_sign(&reduced, NORMALIZE_ORDER);
        let adjusted = adjust(&signs, c_sign);
        if adjusted == singleton(Sign::Zero) {
            newly_zero.push(q);
            continue;
        }
        if let Some(existing) = kept.iter_mut().find(|(r, _)| *r == q) {
            let merged: SignSet = existing.1.intersection(&adjusted).cloned().collect();
            if merged.is_empty() {
                return Ok(None);
            }
            existing.1 = merged;
        } else {
            kept.push((q, adjusted));
        }
    }

    if newly_zero.is_empty() {
        return Ok(Some((kept, zero_basis)));
    }

    let mut generators: Vec<MultiPoly> = (*zero_basis).clone();
    generators.extend(newly_zero);
    let gb = groebner::buchberger(&generators, ZERO_BASIS_ORDER, config)?;
    let reduced_gb = Rc::new(groebner::reduced_basis(&gb, ZERO_BASIS_ORDER));

    propagate_zeros(kept, reduced_gb, config)
}

/// "The sign of `p` lies in `s`" — narrows `assumption` accordingly.
///
/// Returns `Ok(SearchM::empty())` when the constraint contradicts the
/// current state (branch pruned, not an error), and `Err` only for a
/// genuine precondition violation surfacing from `groebner::buchberger`.
#[tracing::instrument(level = "debug", skip(assumption, config))]
pub fn assume(
    assumption: &Assumption,
    p: &MultiPoly,
    s: SignSet,
    config: &CadConfig,
) -> CadResult<SearchM<()>> {
    assert!(!s.is_empty(), "assume: sign set must be non-empty");

    let reduced = assumption.reduce(p);
    if let Some(c) = reduced.as_constant() {
        return Ok(if s.contains(&Sign::of_rational(&c)) {
            SearchM::pure((), assumption.clone())
        } else {
            tracing::debug!("assume: {:?} pruned (constant sign outside {:?})", p, s);
            SearchM::empty()
        });
    }

    let (q, c_sign) = monic_with_sign(&reduced, NORMALIZE_ORDER);
    let adjusted = adjust(&s, c_sign);
    let existing = assumption.lookup(&q);
    let narrowed: SignSet = adjusted.intersection(&existing).cloned().collect();
    if narrowed.is_empty() {
        tracing::debug!("assume: {:?} pruned (empty intersection)", q);
        return Ok(SearchM::empty());
    }

    if narrowed == singleton(Sign::Zero) {
        tracing::debug!("assume: learned new zero {:?}", q);
        let rest: Vec<(MultiPoly, SignSet)> = assumption
            .sign_map
            .iter()
            .filter(|(r, _)| *r != q)
            .cloned()
            .collect();

        let mut generators: Vec<MultiPoly> = (*assumption.zero_basis).clone();
        generators.push(q);
        let gb = groebner::buchberger(&generators, ZERO_BASIS_ORDER, config)?;
        let new_basis = Rc::new(groebner::reduced_basis(&gb, ZERO_BASIS_ORDER));

        match propagate_zeros(rest, new_basis, config)? {
            None => Ok(SearchM::empty()),
            Some((sign_map, zero_basis)) => Ok(SearchM::pure(
                (),
                Assumption {
                    sign_map: Rc::new(sign_map),
                    zero_basis,
                },
            )),
        }
    } else {
        let mut sign_map: Vec<(MultiPoly, SignSet)> =
            assumption.sign_map.iter().filter(|(r, _)| *r != q).cloned().collect();
        sign_map.push((q, narrowed));
        Ok(SearchM::pure(
            (),
            Assumption {
                sign_map: Rc::new(sign_map),
                zero_basis: assumption.zero_basis.clone(),
            },
        ))
    }
}

/// Branches three ways on the sign of `c`, one alternative per `s ∈
/// {Neg, Zero, Pos}` that survives `assume`.
#[tracing::instrument(level = "debug", skip(assumption, config))]
pub fn sign_coeff(
    assumption: &Assumption,
    c: &MultiPoly,
    config: &CadConfig,
) -> CadResult<SearchM<Sign>> {
    let mut alts = Vec::new();
    for s in [Sign::Neg, Sign::Zero, Sign::Pos] {
        let branch = assume(assumption, c, singleton(s), config)?;
        for (_, a) in run_m(branch) {
            alts.push((s, a));
        }
    }
    Ok(SearchM::from_alternatives(alts))
}

/// A lazily-chained sequence of `(value, Assumption)` alternatives.
pub struct SearchM<T> {
    iter: Box<dyn Iterator<Item = (T, Assumption)>>,
}

impl<T: 'static> SearchM<T> {
    pub fn pure(value: T, assumption: Assumption) -> Self {
        SearchM {
            iter: Box::new(std::iter::once((value, assumption))),
        }
    }

    pub fn empty() -> Self {
        SearchM {
            iter: Box::new(std::iter::empty()),
        }
    }

    pub fn from_alternatives(alts: Vec<(T, Assumption)>) -> Self {
        SearchM {
            iter: Box::new(alts.into_iter()),
        }
    }

    /// Chains every surviving alternative of `self` through `f`, flattening
    /// the resulting searches. The search-combinator analogue of `flat_map`.
    pub fn and_then<U: 'static>(
        self,
        mut f: impl FnMut(T, Assumption) -> SearchM<U> + 'static,
    ) -> SearchM<U> {
        SearchM {
            iter: Box::new(self.iter.flat_map(move |(v, a)| f(v, a).iter)),
        }
    }
}

/// Runs the search to completion, enumerating every surviving alternative.
pub fn run_m<T>(m: SearchM<T>) -> Vec<(T, Assumption)> {
    m.iter.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::int;
    use std::collections::BTreeMap;

    fn xvar() -> Rc<Vec<String>> {
        Rc::new(vec!["a".to_string()])
    }

    fn poly(vars: &Rc<Vec<String>>, pairs: &[(u32, i64)]) -> MultiPoly {
        let mut terms = BTreeMap::new();
        for (e, c) in pairs {
            terms.insert(vec![*e], int(*c));
        }
        MultiPoly::new(vars.clone(), terms)
    }

    #[test]
    fn assume_constant_succeeds_or_prunes() {
        let vars = xvar();
        let config = CadConfig::default();
        let assumption = Assumption::empty();
        let five = poly(&vars, &[(0, 5)]); // constant 5
        let search = assume(&assumption, &five, singleton(Sign::Pos), &config).unwrap();
        assert_eq!(run_m(search).len(), 1);

        let search = assume(&assumption, &five, singleton(Sign::Neg), &config).unwrap();
        assert_eq!(run_m(search).len(), 0);
    }

    #[test]
    fn assume_zero_adds_to_basis_and_propagates() {
        let vars = xvar();
        let config = CadConfig::default();
        let assumption = Assumption::empty();
        let a = poly(&vars, &[(1, 1)]); // "a"
        let search = assume(&assumption, &a, singleton(Sign::Zero), &config).unwrap();
        let results = run_m(search);
        assert_eq!(results.len(), 1);
        let (_, a1) = &results[0];
        assert_eq!(a1.zero_basis().len(), 1);

        // a + 3 must now reduce to the constant 3 under the updated basis.
        let a_plus_3 = poly(&vars, &[(0, 3), (1, 1)]);
        let reduced = a1.reduce(&a_plus_3);
        assert_eq!(reduced.as_constant(), Some(int(3)));
    }

    #[test]
    fn sign_coeff_produces_three_alternatives_for_a_free_variable() {
        let vars = xvar();
        let config = CadConfig::default();
        let assumption = Assumption::empty();
        let a = poly(&vars, &[(1, 1)]);
        let search = sign_coeff(&assumption, &a, &config).unwrap();
        let results = run_m(search);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn propagate_zeros_is_idempotent() {
        let vars = xvar();
        let config = CadConfig::default();
        let assumption = Assumption::empty();
        let a = poly(&vars, &[(1, 1)]);
        let search = assume(&assumption, &a, singleton(Sign::Zero), &config).unwrap();
        let (_, a1) = run_m(search).into_iter().next().unwrap();

        let once = propagate_zeros(a1.sign_map().to_vec(), Rc::new(a1.zero_basis().to_vec()), &config)
            .unwrap()
            .unwrap();
        let twice = propagate_zeros(once.0.clone(), once.1.clone(), &config).unwrap().unwrap();
        assert_eq!(once.0, twice.0);
        assert_eq!(once.1, twice.1);
    }
}
