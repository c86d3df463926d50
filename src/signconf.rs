//! Sign configurations: a cell decomposition of the real line annotated
//! with every closure polynomial's sign on every cell, built by folding
//! each polynomial of [`crate::closure::collect_polynomials`]'s output
//! through the decomposition in ascending degree order.

use crate::assumption::{self, run_m, Assumption, SearchM};
use crate::closure;
use crate::config::CadConfig;
use crate::error::{CadError, CadResult};
use crate::mr;
use crate::normalize;
use crate::poly::{MultiPoly, UniPoly};
use crate::sign::Sign;

/// An endpoint of a cell: the two infinities, or the `n`-th real root (in
/// ascending order) of `p`.
#[derive(Debug, Clone, PartialEq)]
pub enum Point {
    NegInf,
    PosInf,
    RootOf(UniPoly<MultiPoly>, usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Point(Point),
    Interval(Point, Point),
}

#[derive(Debug, Clone)]
pub struct CellEntry {
    pub cell: Cell,
    pub signs: Vec<(UniPoly<MultiPoly>, Sign)>,
}

impl CellEntry {
    pub fn sign_of(&self, p: &UniPoly<MultiPoly>) -> Option<Sign> {
        self.signs.iter().find(|(q, _)| q == p).map(|(_, s)| *s)
    }
}

#[derive(Debug, Clone)]
pub struct SignConf {
    pub entries: Vec<CellEntry>,
}

fn point_of(entry: &CellEntry) -> Point {
    match &entry.cell {
        Cell::Point(p) => p.clone(),
        Cell::Interval(..) => unreachable!("point_of called on an interval entry"),
    }
}

fn seed_conf() -> SignConf {
    SignConf {
        entries: vec![
            CellEntry {
                cell: Cell::Point(Point::NegInf),
                signs: Vec::new(),
            },
            CellEntry {
                cell: Cell::Interval(Point::NegInf, Point::PosInf),
                signs: Vec::new(),
            },
            CellEntry {
                cell: Cell::Point(Point::PosInf),
                signs: Vec::new(),
            },
        ],
    }
}

/// Builds the full sign configuration for `polys`: closes them under
/// [`closure::collect_polynomials`], then folds each closure member
/// (ascending degree) through [`refine_sign_conf`].
#[tracing::instrument(level = "debug", skip(assumption, polys, config))]
pub fn build_sign_conf(
    assumption: &Assumption,
    polys: &[UniPoly<MultiPoly>],
    config: &CadConfig,
) -> CadResult<SearchM<SignConf>> {
    let closed = closure::collect_polynomials(assumption, polys, config)?;
    let mut out = Vec::new();

    for (mut set, a) in run_m(closed) {
        set.sort_by_key(|p| p.degree());
        let mut frontier = vec![(seed_conf(), a)];
        for p in &set {
            let mut next = Vec::new();
            for (conf, a) in frontier {
                let refined = refine_sign_conf(&a, &conf, p, config)?;
                next.extend(run_m(refined));
            }
            frontier = next;
        }
        out.extend(frontier);
    }

    Ok(SearchM::from_alternatives(out))
}

/// Folds `p` into `conf`: records `p`'s sign at every existing point
/// (branching wherever that sign is not yet pinned down), then splits
/// every interval where `p` changes sign, introducing a new root point
/// per sign change.
#[tracing::instrument(level = "debug", skip(assumption, conf, p, config))]
pub fn refine_sign_conf(
    assumption: &Assumption,
    conf: &SignConf,
    p: &UniPoly<MultiPoly>,
    config: &CadConfig,
) -> CadResult<SearchM<SignConf>> {
    let mut frontier: Vec<(Vec<CellEntry>, Assumption)> = vec![(conf.entries.clone(), assumption.clone())];

    for i in 0..conf.entries.len() {
        if let Cell::Point(pt) = conf.entries[i].cell.clone() {
            let mut next = Vec::new();
            for (entries, a) in frontier {
                let existing_signs = entries[i].signs.clone();
                let search = sign_at(&a, &existing_signs, &pt, p, config)?;
                for (s, a2) in run_m(search) {
                    let mut entries2 = entries.clone();
                    entries2[i].signs.push((p.clone(), s));
                    next.push((entries2, a2));
                }
            }
            frontier = next;
        }
    }

    let mut out = Vec::new();
    for (entries, a) in frontier {
        out.push((split_intervals(entries, p), a));
    }
    Ok(SearchM::from_alternatives(out))
}

fn split_intervals(entries: Vec<CellEntry>, p: &UniPoly<MultiPoly>) -> SignConf {
    let num_intervals = (entries.len() - 1) / 2;
    let mut result = Vec::with_capacity(entries.len());
    result.push(entries[0].clone());
    let mut n = 0usize;

    for k in 0..num_intervals {
        let left_point = &entries[2 * k];
        let interval = &entries[2 * k + 1];
        let right_point = &entries[2 * k + 2];
        let s1 = left_point.sign_of(p).expect("p's sign was recorded at every point above");
        let s2 = right_point.sign_of(p).expect("p's sign was recorded at every point above");

        if s1 == s2 || s1 == Sign::Zero || s2 == Sign::Zero {
            let inherited = if s1 != Sign::Zero { s1 } else { s2 };
            let mut iv = interval.clone();
            iv.signs.push((p.clone(), inherited));
            result.push(iv);
        } else {
            let left_pt = point_of(left_point);
            let right_pt = point_of(right_point);
            let root_pt = Point::RootOf(p.clone(), n);
            n += 1;

            let mut left_iv = CellEntry {
                cell: Cell::Interval(left_pt, root_pt.clone()),
                signs: interval.signs.clone(),
            };
            left_iv.signs.push((p.clone(), s1));

            // The new root point inherits every other already-known
            // polynomial's sign from the interval it splits: the closure's
            // degree-ascending construction guarantees no other closure
            // member changes sign inside an interval `p` is still free to
            // split, so (barring an exact shared root, outside this
            // engine's scope) every other polynomial keeps its sign there.
            let mut root_entry = CellEntry {
                cell: Cell::Point(root_pt.clone()),
                signs: interval.signs.clone(),
            };
            root_entry.signs.push((p.clone(), Sign::Zero));

            let mut right_iv = CellEntry {
                cell: Cell::Interval(root_pt, right_pt),
                signs: interval.signs.clone(),
            };
            right_iv.signs.push((p.clone(), s2));

            result.push(left_iv);
            result.push(root_entry);
            result.push(right_iv);
        }
        result.push(entries[2 * k + 2].clone());
    }

    SignConf { entries: result }
}

fn sign_at_pos_inf(assumption: &Assumption, p: &UniPoly<MultiPoly>, config: &CadConfig) -> CadResult<SearchM<Sign>> {
    let lc = p.leading_coeff();
    assumption::sign_coeff(assumption, &lc, config)
}

fn sign_at_neg_inf(assumption: &Assumption, p: &UniPoly<MultiPoly>, config: &CadConfig) -> CadResult<SearchM<Sign>> {
    let lc = p.leading_coeff();
    let branch = assumption::sign_coeff(assumption, &lc, config)?;
    let degree = p.degree();
    let mapped = run_m(branch)
        .into_iter()
        .map(|(s, a)| {
            let adjusted = if degree % 2 == 1 { s.negate() } else { s };
            (adjusted, a)
        })
        .collect();
    Ok(SearchM::from_alternatives(mapped))
}

/// `p`'s sign at `pt` under `assumption`. `pt_signs` is the sign map
/// already recorded for `pt` by earlier (lower-degree) members of the
/// ascending fold — needed for the `RootOf` case, where the pseudo-remainder
/// reduces the question to "what is `r`'s sign here", and `r` (having
/// strictly smaller degree than `q`) must already have an answer recorded
/// there by the time a higher-degree polynomial asks.
pub fn sign_at(
    assumption: &Assumption,
    pt_signs: &[(UniPoly<MultiPoly>, Sign)],
    pt: &Point,
    p: &UniPoly<MultiPoly>,
    config: &CadConfig,
) -> CadResult<SearchM<Sign>> {
    if p.is_zero() {
        return Ok(SearchM::pure(Sign::Zero, assumption.clone()));
    }
    match pt {
        Point::PosInf => sign_at_pos_inf(assumption, p, config),
        Point::NegInf => sign_at_neg_inf(assumption, p, config),
        Point::RootOf(q, _n) => {
            let (bm, k, r) = mr::mr(p, q)?;
            let normalized = normalize::normalize_poly(assumption, &r, config)?;
            let mut out = Vec::new();
            for (r_norm, a) in run_m(normalized) {
                let r_sign_search = if r_norm.degree() == 0 {
                    let c = r_norm
                        .as_constant()
                        .expect("a degree-0 polynomial always has a constant coefficient");
                    assumption::sign_coeff(&a, &c, config)?
                } else {
                    match pt_signs.iter().find(|(q2, _)| *q2 == r_norm) {
                        Some((_, s)) => SearchM::pure(*s, a),
                        None => {
                            return Err(CadError::IllFormedCell(
                                "sign_at: pseudo-remainder not present in the closure's sign record",
                            ))
                        }
                    }
                };
                for (r_sign, a2) in run_m(r_sign_search) {
                    if k % 2 == 0 {
                        out.push((r_sign, a2));
                    } else {
                        let bm_search = assumption::sign_coeff(&a2, &bm, config)?;
                        for (bm_sign, a3) in run_m(bm_search) {
                            out.push((r_sign.divide(bm_sign), a3));
                        }
                    }
                }
            }
            Ok(SearchM::from_alternatives(out))
        }
    }
}
