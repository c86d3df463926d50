//! The polynomial layer.
//!
//! The CAD algorithms in [`crate::assumption`], [`crate::signconf`] and
//! [`crate::project`] are written against two small trait boundaries,
//! [`Ring`] and [`Evaluable`], rather than against a concrete type. That
//! mirrors how the rest of the crate treats the coefficient domain as an
//! external collaborator: [`MultiPoly`] (sparse multivariate polynomials
//! over the parameter variables) and [`Rational`](crate::rational::Rational)
//! are the only two rings this crate ships, and [`UniPoly`] is generic over
//! either, so "univariate in the distinguished variable over a coefficient
//! ring of multivariate polynomials in the remaining variables, rational
//! scalars at the bottom" is literally `UniPoly<MultiPoly>` with
//! `MultiPoly`'s own scalars being [`Rational`](crate::rational::Rational).

use crate::model::Model;
use crate::rational::{self, Rational};
use num_traits::{One, Zero};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A commutative ring with the operations the engine needs. Implemented by
/// [`Rational`](crate::rational::Rational), by [`MultiPoly`], and generically
/// by [`UniPoly<C>`] for any `C: Ring`.
pub trait Ring: Clone + PartialEq + fmt::Debug {
    fn zero() -> Self;
    fn one() -> Self;
    fn is_zero(&self) -> bool;
    fn add(&self, other: &Self) -> Self;
    fn neg(&self) -> Self;
    fn mul(&self, other: &Self) -> Self;
    fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }
}

impl Ring for Rational {
    fn zero() -> Self {
        rational::zero()
    }
    fn one() -> Self {
        rational::one()
    }
    fn is_zero(&self) -> bool {
        Zero::is_zero(self)
    }
    fn add(&self, other: &Self) -> Self {
        self + other
    }
    fn neg(&self) -> Self {
        -self.clone()
    }
    fn mul(&self, other: &Self) -> Self {
        self * other
    }
}

/// A ring element that can be specialized against a numeric [`Model`],
/// collapsing it to a scalar. `Rational` is trivially evaluable (it ignores
/// the model); `MultiPoly` substitutes each parameter's value.
pub trait Evaluable: Ring {
    fn substitute(&self, model: &Model) -> Rational;
}

impl Evaluable for Rational {
    fn substitute(&self, _model: &Model) -> Rational {
        self.clone()
    }
}

/// Monomial orders the Gröbner layer and the normalization steps of
/// [`crate::assumption`] choose leading terms under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonomialOrder {
    /// Graded lexicographic: compare total degree, then lexicographically.
    Grlex,
    /// Graded reverse lexicographic: compare total degree, then
    /// lexicographically on the reversed, negated exponent vector.
    Grevlex,
}

impl MonomialOrder {
    /// Orders two exponent vectors of equal length under this monomial
    /// order; higher means "more leading".
    pub fn cmp_exponents(self, a: &[u32], b: &[u32]) -> std::cmp::Ordering {
        let deg_a: u32 = a.iter().sum();
        let deg_b: u32 = b.iter().sum();
        match deg_a.cmp(&deg_b) {
            std::cmp::Ordering::Equal => match self {
                MonomialOrder::Grlex => a.cmp(b),
                MonomialOrder::Grevlex => {
                    let rev_a: Vec<i64> = a.iter().rev().map(|&e| -(e as i64)).collect();
                    let rev_b: Vec<i64> = b.iter().rev().map(|&e| -(e as i64)).collect();
                    rev_a.cmp(&rev_b)
                }
            },
            ord => ord,
        }
    }
}

/// A sparse multivariate polynomial over a fixed, shared, ordered list of
/// parameter variables, with rational coefficients.
///
/// Equality, hashing-adjacent comparisons and monomial-order lookups all go
/// through the (sorted, zero-stripped) `terms` map, so two `MultiPoly`s
/// built differently but algebraically identical compare equal.
#[derive(Debug, Clone)]
pub struct MultiPoly {
    vars: Rc<Vec<String>>,
    /// exponent vector (length == vars.len()) -> nonzero coefficient.
    terms: BTreeMap<Vec<u32>, Rational>,
}

impl PartialEq for MultiPoly {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
    }
}

impl MultiPoly {
    pub fn new(vars: Rc<Vec<String>>, terms: BTreeMap<Vec<u32>, Rational>) -> Self {
        let mut terms = terms;
        terms.retain(|_, c| !c.is_zero());
        MultiPoly { vars, terms }
    }

    pub fn zero_with_vars(vars: Rc<Vec<String>>) -> Self {
        MultiPoly {
            vars,
            terms: BTreeMap::new(),
        }
    }

    pub fn constant(vars: Rc<Vec<String>>, c: Rational) -> Self {
        let mut terms = BTreeMap::new();
        if !c.is_zero() {
            terms.insert(vec![0; vars.len()], c);
        }
        MultiPoly { vars, terms }
    }

    /// The single variable `name` raised to the first power, i.e. `x` itself.
    pub fn variable(vars: Rc<Vec<String>>, name: &str) -> Self {
        let idx = vars
            .iter()
            .position(|v| v == name)
            .expect("unknown variable name");
        let mut exp = vec![0u32; vars.len()];
        exp[idx] = 1;
        let mut terms = BTreeMap::new();
        terms.insert(exp, rational::one());
        MultiPoly { vars, terms }
    }

    pub fn vars(&self) -> &Rc<Vec<String>> {
        &self.vars
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Vec<u32>, &Rational)> {
        self.terms.iter()
    }

    pub fn is_constant(&self) -> bool {
        self.terms.is_empty() || (self.terms.len() == 1 && self.terms.keys().next().unwrap().iter().all(|&e| e == 0))
    }

    pub fn as_constant(&self) -> Option<Rational> {
        if self.terms.is_empty() {
            Some(rational::zero())
        } else if self.is_constant() {
            self.terms.values().next().cloned()
        } else {
            None
        }
    }

    /// Leading term `(exponents, coeff)` under `order`, or `None` for the
    /// zero polynomial.
    pub fn leading_term(&self, order: MonomialOrder) -> Option<(&Vec<u32>, &Rational)> {
        self.terms
            .iter()
            .max_by(|(ea, _), (eb, _)| order.cmp_exponents(ea, eb))
    }

    pub fn leading_coeff(&self, order: MonomialOrder) -> Rational {
        self.leading_term(order)
            .map(|(_, c)| c.clone())
            .unwrap_or_else(rational::zero)
    }

    /// `self` divided through by its leading coefficient under `order`;
    /// no-op on the zero polynomial.
    pub fn monic(&self, order: MonomialOrder) -> MultiPoly {
        match self.leading_coeff(order) {
            lc if lc.is_zero() => self.clone(),
            lc => {
                let terms = self
                    .terms
                    .iter()
                    .map(|(e, c)| (e.clone(), c / &lc))
                    .collect();
                MultiPoly::new(self.vars.clone(), terms)
            }
        }
    }

    pub fn scale(&self, c: &Rational) -> MultiPoly {
        let terms = self.terms.iter().map(|(e, t)| (e.clone(), t * c)).collect();
        MultiPoly::new(self.vars.clone(), terms)
    }

    /// Casts this polynomial into a univariate polynomial in `v`, with
    /// coefficients that are multivariate polynomials over the remaining
    /// variables. This is how [`crate::solve::solve`]'s variable-elimination
    /// recursion hands each level's constraints to [`crate::project::project`].
    pub fn to_univariate(&self, v: &str) -> UniPoly<MultiPoly> {
        let idx = self
            .vars
            .iter()
            .position(|name| name == v)
            .expect("to_univariate: unknown variable name");
        let remaining_vars: Rc<Vec<String>> = Rc::new(
            self.vars
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != idx)
                .map(|(_, name)| name.clone())
                .collect(),
        );

        let mut by_degree: BTreeMap<u32, BTreeMap<Vec<u32>, Rational>> = BTreeMap::new();
        for (exp, coeff) in self.terms.iter() {
            let remaining_exp: Vec<u32> = exp.iter().enumerate().filter(|(i, _)| *i != idx).map(|(_, &e)| e).collect();
            by_degree.entry(exp[idx]).or_default().insert(remaining_exp, coeff.clone());
        }

        let max_degree = by_degree.keys().next_back().copied().unwrap_or(0);
        let coeffs: Vec<MultiPoly> = (0..=max_degree)
            .map(|d| MultiPoly::new(remaining_vars.clone(), by_degree.remove(&d).unwrap_or_default()))
            .collect();
        UniPoly::from_coeffs(coeffs)
    }
}

impl Ring for MultiPoly {
    fn zero() -> Self {
        // A variable-less MultiPoly cannot be constructed without a var
        // list; callers always go through `zero_with_vars`/arithmetic on an
        // existing value instead of this associated function.
        MultiPoly {
            vars: Rc::new(Vec::new()),
            terms: BTreeMap::new(),
        }
    }
    fn one() -> Self {
        MultiPoly::constant(Rc::new(Vec::new()), rational::one())
    }
    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
    fn add(&self, other: &Self) -> Self {
        let mut terms = self.terms.clone();
        for (e, c) in other.terms.iter() {
            let entry = terms.entry(e.clone()).or_insert_with(rational::zero);
            *entry = &*entry + c;
        }
        MultiPoly::new(self.vars.clone(), terms)
    }
    fn neg(&self) -> Self {
        let terms = self.terms.iter().map(|(e, c)| (e.clone(), -c)).collect();
        MultiPoly::new(self.vars.clone(), terms)
    }
    fn mul(&self, other: &Self) -> Self {
        let mut terms: BTreeMap<Vec<u32>, Rational> = BTreeMap::new();
        for (ea, ca) in self.terms.iter() {
            for (eb, cb) in other.terms.iter() {
                let e: Vec<u32> = ea.iter().zip(eb.iter()).map(|(a, b)| a + b).collect();
                let entry = terms.entry(e).or_insert_with(rational::zero);
                *entry = &*entry + ca * cb;
            }
        }
        MultiPoly::new(self.vars.clone(), terms)
    }
}

impl Evaluable for MultiPoly {
    /// Substitutes each parameter's model value and multiplies everything
    /// out. Exact when every assigned value is rational; when a variable is
    /// assigned a genuinely irrational [`crate::algebraic::RealAlgebraic`],
    /// this falls back to
    /// [`crate::algebraic::RealAlgebraic::approx_rational`] rather than
    /// exact number-field arithmetic (see that method's doc comment).
    fn substitute(&self, model: &Model) -> Rational {
        let mut acc = rational::zero();
        for (exp, coeff) in self.terms.iter() {
            let mut term = coeff.clone();
            for (idx, &e) in exp.iter().enumerate() {
                if e == 0 {
                    continue;
                }
                let val = model
                    .get(&self.vars[idx])
                    .expect("model missing a variable referenced by this polynomial")
                    .approx_rational(crate::algebraic::SUBSTITUTE_APPROX_STEPS);
                for _ in 0..e {
                    term = &term * &val;
                }
            }
            acc = &acc + &term;
        }
        acc
    }
}

/// A dense univariate polynomial `sum_i coeffs[i] * x^i` in one distinguished
/// variable, over coefficient ring `C`.
#[derive(Debug, Clone)]
pub struct UniPoly<C: Ring> {
    /// Ascending degree: `coeffs[0]` is the constant term.
    coeffs: Vec<C>,
}

impl<C: Ring> PartialEq for UniPoly<C> {
    fn eq(&self, other: &Self) -> bool {
        self.coeffs == other.coeffs
    }
}

impl<C: Ring> UniPoly<C> {
    /// Builds from ascending-degree coefficients, trimming trailing zeros so
    /// equality and degree are canonical.
    pub fn from_coeffs(mut coeffs: Vec<C>) -> Self {
        while coeffs.len() > 1 && coeffs.last().map(|c| c.is_zero()).unwrap_or(false) {
            coeffs.pop();
        }
        if coeffs.is_empty() {
            coeffs.push(C::zero());
        }
        UniPoly { coeffs }
    }

    pub fn constant(c: C) -> Self {
        UniPoly::from_coeffs(vec![c])
    }

    pub fn zero() -> Self {
        UniPoly::from_coeffs(vec![C::zero()])
    }

    pub fn var() -> Self {
        UniPoly::from_coeffs(vec![C::zero(), C::one()])
    }

    /// Degree of the zero polynomial is conventionally reported as `0` by
    /// `degree()`; callers that need to distinguish it use `is_zero`.
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_zero()
    }

    pub fn coeff(&self, i: usize) -> C {
        self.coeffs.get(i).cloned().unwrap_or_else(C::zero)
    }

    pub fn leading_coeff(&self) -> C {
        self.coeffs[self.degree()].clone()
    }

    pub fn terms(&self) -> impl Iterator<Item = (usize, &C)> {
        self.coeffs.iter().enumerate()
    }

    pub fn is_constant(&self) -> bool {
        self.degree() == 0
    }

    pub fn as_constant(&self) -> Option<C> {
        if self.is_constant() {
            Some(self.coeffs[0].clone())
        } else {
            None
        }
    }

    /// Formal derivative with respect to the distinguished variable.
    pub fn derivative(&self) -> Self {
        if self.degree() == 0 {
            return UniPoly::zero();
        }
        let coeffs = self.coeffs[1..]
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let mut acc = C::zero();
                for _ in 0..(i + 1) {
                    acc = acc.add(c);
                }
                acc
            })
            .collect();
        UniPoly::from_coeffs(coeffs)
    }

    pub fn add(&self, other: &Self) -> Self {
        let n = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..n)
            .map(|i| self.coeff(i).add(&other.coeff(i)))
            .collect();
        UniPoly::from_coeffs(coeffs)
    }

    pub fn neg(&self) -> Self {
        UniPoly::from_coeffs(self.coeffs.iter().map(|c| c.neg()).collect())
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn scale(&self, c: &C) -> Self {
        UniPoly::from_coeffs(self.coeffs.iter().map(|x| x.mul(c)).collect())
    }

    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return UniPoly::zero();
        }
        let mut coeffs = vec![C::zero(); self.degree() + other.degree() + 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] = coeffs[i + j].add(&a.mul(b));
            }
        }
        UniPoly::from_coeffs(coeffs)
    }
}

impl<C: Evaluable> UniPoly<C> {
    /// Substitutes `model` into every coefficient, collapsing this into a
    /// plain rational-coefficient polynomial. This is the "specialize cell
    /// endpoints against a numeric model" step the sampler relies on.
    pub fn specialize(&self, model: &Model) -> UniPoly<Rational> {
        UniPoly::from_coeffs(self.coeffs.iter().map(|c| c.substitute(model)).collect())
    }
}

impl<C: Ring> Ring for UniPoly<C> {
    fn zero() -> Self {
        UniPoly::zero()
    }
    fn one() -> Self {
        UniPoly::constant(C::one())
    }
    fn is_zero(&self) -> bool {
        UniPoly::is_zero(self)
    }
    fn add(&self, other: &Self) -> Self {
        UniPoly::add(self, other)
    }
    fn neg(&self) -> Self {
        UniPoly::neg(self)
    }
    fn mul(&self, other: &Self) -> Self {
        UniPoly::mul(self, other)
    }
}

impl UniPoly<Rational> {
    /// Evaluates this numeric polynomial at a rational point via Horner's
    /// method.
    pub fn eval(&self, x: &Rational) -> Rational {
        let mut acc = rational::zero();
        for c in self.coeffs.iter().rev() {
            acc = &acc * x + c;
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::int;

    #[test]
    fn derivative_of_cubic() {
        // p = x^3 + 2x  => p' = 3x^2 + 2
        let p: UniPoly<Rational> =
            UniPoly::from_coeffs(vec![int(0), int(2), int(0), int(1)]);
        let dp = p.derivative();
        assert_eq!(dp.coeff(0), int(2));
        assert_eq!(dp.coeff(1), int(0));
        assert_eq!(dp.coeff(2), int(3));
        assert_eq!(dp.degree(), 2);
    }

    #[test]
    fn trailing_zero_trim_keeps_degree_canonical() {
        let p: UniPoly<Rational> = UniPoly::from_coeffs(vec![int(5), int(0), int(0)]);
        assert_eq!(p.degree(), 0);
        assert_eq!(p.as_constant(), Some(int(5)));
    }

    #[test]
    fn eval_horner() {
        let p: UniPoly<Rational> = UniPoly::from_coeffs(vec![int(1), int(0), int(1)]); // 1 + x^2
        assert_eq!(p.eval(&int(3)), int(10));
    }

    #[test]
    fn multi_poly_leading_term_grlex() {
        let vars = Rc::new(vec!["a".to_string(), "b".to_string()]);
        let mut terms = BTreeMap::new();
        terms.insert(vec![2, 0], int(1)); // a^2
        terms.insert(vec![0, 1], int(3)); // 3b
        let p = MultiPoly::new(vars, terms);
        let (exp, coeff) = p.leading_term(MonomialOrder::Grlex).unwrap();
        assert_eq!(exp, &vec![2, 0]);
        assert_eq!(coeff, &int(1));
    }
}
