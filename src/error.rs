//! Crate-wide error type.
//!
//! Per the error-handling design: branch infeasibility and top-level
//! unsatisfiability are *not* errors (they are `None`/no-alternative
//! outcomes produced by [`crate::assumption::SearchM`] and
//! [`crate::solve::solve`] respectively). `CadError` is reserved for
//! precondition violations — programmer bugs, not data outcomes.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CadError {
    #[error("mr(p, q) requires deg(p) >= deg(q) > 0, got deg(p)={deg_p}, deg(q)={deg_q}")]
    DegreeTooLow { deg_p: usize, deg_q: usize },

    #[error("cannot sample an infinite point directly: {0}")]
    IllFormedCell(&'static str),

    #[error("Buchberger's algorithm did not converge within {max_iters} S-polynomial reductions")]
    BuchbergerDidNotConverge { max_iters: usize },

    #[error("root isolation did not converge within {max_steps} bisection steps")]
    RootIsolationDidNotConverge { max_steps: usize },
}

pub type CadResult<T> = Result<T, CadError>;
