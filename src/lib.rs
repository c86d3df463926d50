//! A symbolic cylindrical algebraic decomposition (CAD) engine: decides and
//! samples solutions of polynomial sign-condition systems over the reals
//! with rational coefficients, eliminating parameter variables one at a
//! time via projection, non-deterministic branching over unknown
//! coefficient signs, and sampling via real algebraic numbers.
//!
//! The entry point is [`solve::solve`]. The modules below are layered
//! bottom-up:
//!
//! - [`sign`], [`rational`]: the three-valued sign algebra and exact scalar
//!   arithmetic every other module builds on.
//! - [`poly`]: the polynomial layer (`MultiPoly`, `UniPoly<C>`) behind the
//!   `Ring`/`Evaluable` trait boundaries.
//! - [`groebner`]: Buchberger's algorithm, used to normalize the coefficient
//!   polynomials an [`assumption::Assumption`] has learned vanish.
//! - [`algebraic`]: real algebraic numbers via Sturm-sequence root
//!   isolation.
//! - [`mr`]: the sign-respecting pseudo-remainder.
//! - [`assumption`]: the non-deterministic branching search (`SearchM`)
//!   over symbolic coefficient sign assumptions.
//! - [`normalize`], [`closure`]: per-polynomial and per-polynomial-set
//!   normalization the sign-configuration builder depends on.
//! - [`signconf`]: the sign configuration (cell decomposition) builder.
//! - [`project`]: one level of variable elimination.
//! - [`sample`]: turning a cell into a concrete real algebraic number.
//! - [`model`]: the growing variable assignment `solve` builds up.
//! - [`solve`]: the top-level recursive solver.
//! - [`diagnostics`]: pretty-printers for logging and test failures.
//! - [`config`], [`error`]: ambient configuration and the crate-wide error
//!   type.

pub mod algebraic;
pub mod assumption;
pub mod closure;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod groebner;
pub mod model;
pub mod mr;
pub mod normalize;
pub mod poly;
pub mod project;
pub mod rational;
pub mod sample;
pub mod sign;
pub mod signconf;
pub mod solve;

pub use algebraic::RealAlgebraic;
pub use config::CadConfig;
pub use error::{CadError, CadResult};
pub use model::Model;
pub use rational::Rational;
pub use sign::Sign;
pub use solve::{solve, RelOp, Relation};
