//! Real algebraic numbers.
//!
//! This is the in-repo stand-in for the spec's "real algebraic number
//! package", kept behind the [`RootProvider`] trait boundary so the rest of
//! the engine (`sample`, `solve`) never depends on how roots are isolated.
//! Isolation uses the classical Sturm-sequence-plus-bisection method over
//! exact rationals; no floating point is involved anywhere in this module.

use crate::config::CadConfig;
use crate::error::{CadError, CadResult};
use crate::poly::UniPoly;
use crate::rational::{self, Rational};
use crate::sign::Sign;
use num_bigint::BigInt;
use num_traits::Signed;
use std::cmp::Ordering;

/// Bisection steps [`crate::poly::MultiPoly::substitute`] refines an
/// irrational model value to before multiplying it out. Not tied to
/// [`CadConfig`] since it bounds a single scalar approximation rather than a
/// whole search, and `substitute` has no config to thread through.
pub const SUBSTITUTE_APPROX_STEPS: usize = 64;

/// A real root of a rational polynomial, represented as `(minimal
/// polynomial, root index)` plus a refinable rational isolating interval
/// `[lo, hi]` that is known to contain exactly this one root of
/// `min_poly`.
#[derive(Debug, Clone)]
pub struct RealAlgebraic {
    min_poly: UniPoly<Rational>,
    index: usize,
    lo: Rational,
    hi: Rational,
}

impl PartialEq for RealAlgebraic {
    fn eq(&self, other: &Self) -> bool {
        self.min_poly == other.min_poly && self.index == other.index
    }
}

/// The trait boundary `sample`/`solve` consume real algebraic numbers
/// through.
pub trait RootProvider {
    fn isolate_roots(
        p: &UniPoly<Rational>,
        config: &CadConfig,
    ) -> CadResult<Vec<RealAlgebraic>>;
}

pub struct SturmRootProvider;

impl RootProvider for SturmRootProvider {
    fn isolate_roots(p: &UniPoly<Rational>, config: &CadConfig) -> CadResult<Vec<RealAlgebraic>> {
        isolate_roots(p, config)
    }
}

// ---- exact polynomial division over the rational field ----

fn poly_divmod(a: &UniPoly<Rational>, b: &UniPoly<Rational>) -> (UniPoly<Rational>, UniPoly<Rational>) {
    assert!(!b.is_zero());
    let db = b.degree();
    let lb = b.leading_coeff();
    let mut r = a.clone();
    let mut q = UniPoly::zero();
    while !r.is_zero() && r.degree() >= db {
        let d = r.degree() - db;
        let coeff = &r.leading_coeff() / &lb;
        let mut term_coeffs = vec![rational::zero(); d];
        term_coeffs.push(coeff.clone());
        let term: UniPoly<Rational> = UniPoly::from_coeffs(term_coeffs);
        q = q.add(&term);
        r = r.sub(&term.mul(b));
    }
    (q, r)
}

fn poly_gcd(a: &UniPoly<Rational>, b: &UniPoly<Rational>) -> UniPoly<Rational> {
    let (mut x, mut y) = (a.clone(), b.clone());
    while !y.is_zero() {
        let (_, r) = poly_divmod(&x, &y);
        x = y;
        y = r;
    }
    if x.is_zero() {
        return x;
    }
    let lc = x.leading_coeff();
    x.scale(&(&rational::one() / &lc))
}

fn squarefree_part(p: &UniPoly<Rational>) -> UniPoly<Rational> {
    if p.degree() == 0 {
        return p.clone();
    }
    let d = p.derivative();
    if d.is_zero() {
        return p.clone();
    }
    let g = poly_gcd(p, &d);
    if g.degree() == 0 {
        p.clone()
    } else {
        poly_divmod(p, &g).0
    }
}

// ---- Sturm sequences ----

fn sturm_sequence(p: &UniPoly<Rational>) -> Vec<UniPoly<Rational>> {
    let mut seq = vec![p.clone(), p.derivative()];
    loop {
        let n = seq.len();
        let (_, rem) = poly_divmod(&seq[n - 2], &seq[n - 1]);
        if rem.is_zero() {
            break;
        }
        seq.push(rem.neg());
    }
    seq
}

fn sign_at_rational(p: &UniPoly<Rational>, x: &Rational) -> Sign {
    Sign::of_rational(&p.eval(x))
}

fn sign_at_neg_inf(p: &UniPoly<Rational>) -> Sign {
    if p.is_zero() {
        return Sign::Zero;
    }
    let lc_sign = Sign::of_rational(&p.leading_coeff());
    if p.degree() % 2 == 1 {
        lc_sign.negate()
    } else {
        lc_sign
    }
}

fn sign_at_pos_inf(p: &UniPoly<Rational>) -> Sign {
    if p.is_zero() {
        return Sign::Zero;
    }
    Sign::of_rational(&p.leading_coeff())
}

#[derive(Clone, Copy)]
enum Endpoint<'a> {
    NegInf,
    PosInf,
    Rat(&'a Rational),
}

fn sign_changes(seq: &[UniPoly<Rational>], at: Endpoint) -> usize {
    let values: Vec<Sign> = seq
        .iter()
        .map(|p| match at {
            Endpoint::NegInf => sign_at_neg_inf(p),
            Endpoint::PosInf => sign_at_pos_inf(p),
            Endpoint::Rat(x) => sign_at_rational(p, x),
        })
        .filter(|s| *s != Sign::Zero)
        .collect();
    values.windows(2).filter(|w| w[0] != w[1]).count()
}

/// Number of distinct real roots of the squarefree polynomial whose Sturm
/// sequence is `seq`, strictly between `lo` and `hi` (or unbounded in either
/// direction).
fn root_count(seq: &[UniPoly<Rational>], lo: Endpoint, hi: Endpoint) -> usize {
    sign_changes(seq, lo) - sign_changes(seq, hi)
}

/// A Cauchy bound `B` such that every real root of `p` lies in `(-B, B)`.
fn cauchy_bound(p: &UniPoly<Rational>) -> Rational {
    let n = p.degree();
    let lc = p.leading_coeff();
    let mut bound = rational::one();
    for i in 0..n {
        let ratio = (&p.coeff(i) / &lc).abs();
        if ratio > bound {
            bound = ratio;
        }
    }
    &bound + &rational::one()
}

/// Isolates every real root of `p` into a disjoint rational interval and
/// returns them in ascending order with stable indices. `p` need not be
/// squarefree; multiplicities are collapsed (CAD only cares about sign
/// changes, not multiplicity).
pub fn isolate_roots(p: &UniPoly<Rational>, config: &CadConfig) -> CadResult<Vec<RealAlgebraic>> {
    if p.degree() == 0 {
        return Ok(Vec::new());
    }
    let sf = squarefree_part(p);
    let seq = sturm_sequence(&sf);
    let bound = cauchy_bound(&sf);
    let neg_bound = -bound.clone();

    let mut intervals = vec![(neg_bound, bound)];
    let mut isolated: Vec<(Rational, Rational)> = Vec::new();
    let mut steps = 0usize;

    while let Some((lo, hi)) = intervals.pop() {
        steps += 1;
        if steps > config.bisection_steps * (sf.degree().max(1)) {
            return Err(CadError::RootIsolationDidNotConverge {
                max_steps: config.bisection_steps,
            });
        }
        let count = root_count(&seq, Endpoint::Rat(&lo), Endpoint::Rat(&hi));
        if count == 0 {
            continue;
        }
        if count == 1 {
            isolated.push((lo, hi));
            continue;
        }
        let mid = (&lo + &hi) / &rational::int(2);
        if sign_at_rational(&sf, &mid) == Sign::Zero {
            // mid is itself a root: split into (lo, mid), {mid}, (mid, hi).
            isolated.push((mid.clone(), mid.clone()));
            intervals.push((lo, mid.clone()));
            intervals.push((mid, hi));
        } else {
            intervals.push((lo, mid.clone()));
            intervals.push((mid, hi));
        }
    }

    isolated.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(isolated
        .into_iter()
        .enumerate()
        .map(|(index, (lo, hi))| RealAlgebraic {
            min_poly: sf.clone(),
            index,
            lo,
            hi,
        })
        .collect())
}

impl RealAlgebraic {
    /// The rational `q` itself, represented as the unique root of `x - q`.
    pub fn from_rational(q: Rational) -> RealAlgebraic {
        let min_poly = UniPoly::from_coeffs(vec![q.neg(), rational::one()]);
        RealAlgebraic {
            min_poly,
            index: 0,
            lo: q.clone(),
            hi: q,
        }
    }

    pub fn min_poly(&self) -> &UniPoly<Rational> {
        &self.min_poly
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Exact value when this algebraic number happens to be rational
    /// (degree-1 minimal polynomial); `None` for a genuinely irrational
    /// root.
    pub fn to_rational(&self) -> Option<Rational> {
        if self.min_poly.degree() == 1 {
            let a0 = self.min_poly.coeff(0);
            let a1 = self.min_poly.coeff(1);
            Some(-(&a0 / &a1))
        } else {
            None
        }
    }

    /// A rational approximation, exact when this is rational, otherwise the
    /// midpoint of an isolating interval refined to `steps` bisections.
    ///
    /// Used by [`crate::poly::MultiPoly::substitute`] when a model
    /// assigns more than one irrational parameter value that must be
    /// combined algebraically: this crate does not implement the
    /// resultant-based number-field arithmetic (as in e.g. primitive
    /// element combination of several algebraic numbers) that exact
    /// substitution would need in that case, and falls back to this
    /// approximation instead.
    pub fn approx_rational(&self, steps: usize) -> Rational {
        if let Some(q) = self.to_rational() {
            return q;
        }
        let mut lo = self.lo.clone();
        let mut hi = self.hi.clone();
        for _ in 0..steps {
            let mid = (&lo + &hi) / &rational::int(2);
            match Sign::of_rational(&self.min_poly.eval(&mid)) {
                Sign::Zero => {
                    lo = mid.clone();
                    hi = mid;
                    break;
                }
                s => {
                    if s == Sign::of_rational(&self.min_poly.eval(&lo)) {
                        lo = mid;
                    } else {
                        hi = mid;
                    }
                }
            }
        }
        (&lo + &hi) / &rational::int(2)
    }

    fn refine_once(&mut self) {
        if self.lo == self.hi {
            return;
        }
        let mid = (&self.lo + &self.hi) / &rational::int(2);
        match Sign::of_rational(&self.min_poly.eval(&mid)) {
            Sign::Zero => {
                self.lo = mid.clone();
                self.hi = mid;
            }
            s => {
                if s == Sign::of_rational(&self.min_poly.eval(&self.lo)) {
                    self.lo = mid;
                } else {
                    self.hi = mid;
                }
            }
        }
    }

    fn refine(&mut self, steps: usize) {
        for _ in 0..steps {
            if self.lo == self.hi {
                break;
            }
            self.refine_once();
        }
    }

    /// Refines `a` and `b` until their isolating intervals are disjoint
    /// (bounded by `steps` bisections each), then reports their order.
    pub fn compare(a: &RealAlgebraic, b: &RealAlgebraic, steps: usize) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        let mut a = a.clone();
        let mut b = b.clone();
        for _ in 0..steps {
            if a.hi < b.lo {
                return Ordering::Less;
            }
            if b.hi < a.lo {
                return Ordering::Greater;
            }
            if a.hi != a.lo {
                a.refine_once();
            }
            if b.hi != b.lo {
                b.refine_once();
            }
        }
        // Intervals still overlap after the refinement budget: fall back to
        // comparing representative rationals (only reachable for equal
        // algebraic numbers given enough steps, or a pathological config).
        a.approx_rational(0).cmp(&b.approx_rational(0))
    }

    /// The greatest integer strictly less than this number, as a rational
    /// integer. Any rational below the isolating interval's lower bound
    /// minus one is strictly below the true value, which is all
    /// `find_sample` needs from an `Interval(NegInf, RootOf(..))` sample.
    pub fn floor_minus_one(&self) -> Rational {
        let lo_floor = floor_rational(&self.lo);
        lo_floor - rational::one()
    }

    /// The least integer strictly greater than this number; dual of
    /// [`Self::floor_minus_one`].
    pub fn ceil_plus_one(&self) -> Rational {
        let hi_ceil = ceil_rational(&self.hi);
        hi_ceil + rational::one()
    }

    /// A rational strictly between `a` and `b` (`a < b` required), obtained
    /// by refining both isolating intervals until disjoint. This crate
    /// implements the spec's `(a + b) / 2` sampler operation this way
    /// rather than via exact algebraic-number addition: any point strictly
    /// inside the interval is an equally valid cell sample, and disjoint
    /// rational isolating intervals hand one over directly without needing
    /// resultant-based field arithmetic on two distinct algebraic numbers.
    pub fn midpoint(a: &RealAlgebraic, b: &RealAlgebraic, steps: usize) -> CadResult<Rational> {
        let mut a = a.clone();
        let mut b = b.clone();
        for _ in 0..steps {
            if a.hi < b.lo {
                return Ok((&a.hi + &b.lo) / &rational::int(2));
            }
            if a.hi != a.lo {
                a.refine_once();
            }
            if b.hi != b.lo {
                b.refine_once();
            }
        }
        Err(CadError::RootIsolationDidNotConverge { max_steps: steps })
    }
}

/// Greatest integer `<= q`. `BigInt`'s `/` truncates toward zero, so a
/// negative `q` with a nonzero remainder needs one more subtracted.
fn floor_rational(q: &Rational) -> Rational {
    let num = q.numer();
    let den = q.denom();
    let quot: BigInt = num / den;
    let rem: BigInt = num % den;
    let floor = if rem.is_negative() { quot - BigInt::from(1) } else { quot };
    Rational::from(floor)
}

fn ceil_rational(q: &Rational) -> Rational {
    -floor_rational(&-q.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::int;

    #[test]
    fn isolate_roots_of_quadratic() {
        // x^2 - 2 has roots -sqrt(2), sqrt(2).
        let p: UniPoly<Rational> = UniPoly::from_coeffs(vec![int(-2), int(0), int(1)]);
        let config = CadConfig::default();
        let roots = isolate_roots(&p, &config).unwrap();
        assert_eq!(roots.len(), 2);
        assert!(roots[0].lo < roots[0].hi || roots[0].lo == roots[0].hi);
        assert!(roots[0].hi <= roots[1].lo);
        // -sqrt(2) ~ -1.41..., sqrt(2) ~ 1.41...
        assert!(roots[0].hi < rational::int(0));
        assert!(roots[1].lo > rational::int(0));
    }

    #[test]
    fn isolate_roots_of_linear_is_exact() {
        let p: UniPoly<Rational> = UniPoly::from_coeffs(vec![int(-10), int(1)]); // x - 10
        let config = CadConfig::default();
        let roots = isolate_roots(&p, &config).unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].to_rational(), Some(int(10)));
    }

    #[test]
    fn rational_from_rational_roundtrips() {
        let r = RealAlgebraic::from_rational(int(7));
        assert_eq!(r.to_rational(), Some(int(7)));
    }

    #[test]
    fn compare_orders_distinct_roots() {
        let p: UniPoly<Rational> = UniPoly::from_coeffs(vec![int(-6), int(-1), int(1)]); // x^2 - x - 6 = (x-3)(x+2)
        let config = CadConfig::default();
        let roots = isolate_roots(&p, &config).unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(RealAlgebraic::compare(&roots[0], &roots[1], 50), Ordering::Less);
    }
}
