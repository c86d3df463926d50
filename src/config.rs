//! Numeric knobs the otherwise-parameterless CAD algorithms need. Kept as a
//! small `Default`-able struct (rather than the teacher's bare constant)
//! since this engine has more than one such knob and threads it through two
//! independent subsystems (`groebner`, `algebraic`).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CadConfig {
    /// Upper bound on S-polynomial reductions `groebner::buchberger` will
    /// perform before giving up with `CadError::BuchbergerDidNotConverge`.
    /// The coefficient ideals this engine deals with involve a handful of
    /// low-degree polynomials in a handful of variables, so this is sized
    /// generously rather than tightly.
    pub max_buchberger_iters: usize,
    /// Upper bound on bisection steps `algebraic::isolate_roots` and
    /// `RealAlgebraic::refine` will perform per root before giving up with
    /// `CadError::RootIsolationDidNotConverge`.
    pub bisection_steps: usize,
}

impl Default for CadConfig {
    fn default() -> Self {
        CadConfig {
            max_buchberger_iters: 10_000,
            bisection_steps: 200,
        }
    }
}
