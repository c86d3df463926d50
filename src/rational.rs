//! Exact scalar arithmetic: a thin alias over `num-rational`'s arbitrary
//! precision rationals, plus a couple of free functions the rest of the
//! crate wants at the bottom of every coefficient ring.

use num_bigint::BigInt;
pub use num_rational::BigRational as Rational;
use num_traits::{One, Zero};

pub fn rational(numer: i64, denom: i64) -> Rational {
    Rational::new(BigInt::from(numer), BigInt::from(denom))
}

pub fn int(n: i64) -> Rational {
    Rational::from(BigInt::from(n))
}

pub fn zero() -> Rational {
    Rational::zero()
}

pub fn one() -> Rational {
    Rational::one()
}
