//! The sign-respecting pseudo-remainder `mr`, the core algebraic primitive
//! the rest of the engine (normalization, the polynomial closure, and
//! `sign_at`) is built from.

use crate::error::{CadError, CadResult};
use crate::poly::{Ring, UniPoly};

fn pow_ring<C: Ring>(c: &C, k: u32) -> C {
    let mut acc = C::one();
    for _ in 0..k {
        acc = acc.mul(c);
    }
    acc
}

/// Multiplies `p` by `x^d`.
fn shift<C: Ring>(p: &UniPoly<C>, d: usize) -> UniPoly<C> {
    if d == 0 || p.is_zero() {
        return p.clone();
    }
    let mut coeffs = vec![C::zero(); d];
    coeffs.extend(p.terms().map(|(_, c)| c.clone()));
    UniPoly::from_coeffs(coeffs)
}

/// Computes `(bₘ, k, r)` such that `bₘ^k · p = q · l + r`, `deg(r) < deg(q)`,
/// `k = deg(p) − deg(q) + 1`, and `bₘ = leading_coeff(q)`.
///
/// Requires `deg(p) >= deg(q) > 0`; returns `CadError::DegreeTooLow`
/// otherwise (a precondition violation, not a search failure — see the
/// crate's error handling design).
pub fn mr<C: Ring>(p: &UniPoly<C>, q: &UniPoly<C>) -> CadResult<(C, u32, UniPoly<C>)> {
    let dq = q.degree();
    if q.is_zero() || dq == 0 || p.degree() < dq {
        return Err(CadError::DegreeTooLow {
            deg_p: p.degree(),
            deg_q: dq,
        });
    }
    let k = (p.degree() - dq + 1) as u32;
    let bm = q.leading_coeff();

    let mut r = p.clone();
    let mut quot: UniPoly<C> = UniPoly::zero();
    let mut e: u32 = 0;

    while !r.is_zero() && r.degree() >= dq {
        let prev_degree = r.degree();
        let d = r.degree() - dq;
        let lc_r = r.leading_coeff();
        r = r.scale(&bm);
        quot = quot.scale(&bm);
        let term = shift(&UniPoly::constant(lc_r), d);
        r = r.sub(&term.mul(q));
        quot = quot.add(&term);
        e += 1;
        debug_assert!(r.is_zero() || r.degree() < prev_degree, "mr: degree failed to strictly decrease");
    }

    if e < k {
        let pad = pow_ring(&bm, k - e);
        r = r.scale(&pad);
        quot = quot.scale(&pad);
    }

    #[cfg(debug_assertions)]
    {
        let bmk = pow_ring(&bm, k);
        let lhs = p.scale(&bmk);
        let rhs = q.mul(&quot).add(&r);
        debug_assert_eq!(lhs, rhs, "mr identity b_m^k * p = q*l + r violated");
        debug_assert!(r.is_zero() || r.degree() < dq, "mr: deg(r) < deg(q) violated");
    }

    Ok((bm, k, r))
}
