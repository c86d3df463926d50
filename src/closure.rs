//! The polynomial closure `collect_polynomials`: the smallest superset of a
//! set of polynomials closed under normalization, differentiation, and
//! pairwise pseudo-remainder, which [`crate::signconf::build_sign_conf`]
//! needs so that every member's sign at every other member's root can be
//! decided from the configuration alone.

use crate::assumption::{run_m, Assumption, SearchM};
use crate::config::CadConfig;
use crate::error::CadResult;
use crate::mr;
use crate::normalize;
use crate::poly::{MultiPoly, UniPoly};
use std::collections::VecDeque;

struct Thread {
    assumption: Assumption,
    set: Vec<UniPoly<MultiPoly>>,
    pending: VecDeque<UniPoly<MultiPoly>>,
}

/// Closes `polys` under `normalize_poly`, formal derivative, and `mr`
/// remainder of every pair with `deg(a) >= deg(b) > 0`, discarding the
/// pseudo-remainder's quotient and leading-coefficient power. Branches
/// through [`normalize::normalize_poly`] wherever a coefficient's sign is
/// not yet known, so the result is one `(closed set, Assumption)` pair per
/// surviving branch.
#[tracing::instrument(level = "debug", skip(assumption, polys, config))]
pub fn collect_polynomials(
    assumption: &Assumption,
    polys: &[UniPoly<MultiPoly>],
    config: &CadConfig,
) -> CadResult<SearchM<Vec<UniPoly<MultiPoly>>>> {
    let mut threads = vec![Thread {
        assumption: assumption.clone(),
        set: Vec::new(),
        pending: polys.iter().cloned().collect(),
    }];
    let mut finished = Vec::new();

    while let Some(mut thread) = threads.pop() {
        let candidate = match thread.pending.pop_front() {
            Some(c) => c,
            None => {
                finished.push((thread.set, thread.assumption));
                continue;
            }
        };

        let normalized = normalize::normalize_poly(&thread.assumption, &candidate, config)?;
        for (q, a) in run_m(normalized) {
            if q.degree() == 0 || thread.set.contains(&q) {
                threads.push(Thread {
                    assumption: a,
                    set: thread.set.clone(),
                    pending: thread.pending.clone(),
                });
                continue;
            }

            let mut new_pending = thread.pending.clone();
            new_pending.push_back(q.derivative());
            for existing in &thread.set {
                let (hi, lo) = if existing.degree() >= q.degree() {
                    (existing, &q)
                } else {
                    (&q, existing)
                };
                if lo.degree() > 0 {
                    let (_, _, r) = mr::mr(hi, lo)?;
                    new_pending.push_back(r);
                }
            }

            let mut new_set = thread.set.clone();
            new_set.push(q);
            threads.push(Thread {
                assumption: a,
                set: new_set,
                pending: new_pending,
            });
        }
    }

    Ok(SearchM::from_alternatives(finished))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::int;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    fn vars() -> Rc<Vec<String>> {
        Rc::new(Vec::new())
    }

    fn constant(vars: &Rc<Vec<String>>, c: i64) -> MultiPoly {
        let mut terms = BTreeMap::new();
        if c != 0 {
            terms.insert(Vec::new(), int(c));
        }
        MultiPoly::new(vars.clone(), terms)
    }

    #[test]
    fn closure_of_a_single_quadratic_includes_its_derivative() {
        let vars = vars();
        // x^2 - 1, all coefficients are numeric constants, so no branching.
        let p: UniPoly<MultiPoly> = UniPoly::from_coeffs(vec![
            constant(&vars, -1),
            constant(&vars, 0),
            constant(&vars, 1),
        ]);
        let assumption = Assumption::empty();
        let config = CadConfig::default();
        let search = collect_polynomials(&assumption, &[p], &config).unwrap();
        let results = run_m(search);
        assert_eq!(results.len(), 1);
        let (set, _) = &results[0];
        // derivative is 2x (degree 1); pseudo-remainder of (x^2-1, 2x) has
        // degree 0 and is dropped, so the closed set has exactly the
        // original quadratic and its derivative.
        assert_eq!(set.len(), 2);
        assert!(set.iter().any(|q| q.degree() == 2));
        assert!(set.iter().any(|q| q.degree() == 1));
    }
}
