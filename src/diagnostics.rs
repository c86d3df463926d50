//! Pretty-printer helpers used both by `tracing` events (so debug logs are
//! legible without reconstructing state by hand) and directly by test
//! failure messages.

use crate::assumption::Assumption;
use crate::signconf::{Cell, CellEntry, Point, SignConf};
use std::fmt::Write as _;

pub fn fmt_assumption(assumption: &Assumption) -> String {
    let mut out = String::new();
    let _ = write!(out, "zero_basis: [{}]", assumption.zero_basis().len());
    let _ = write!(out, ", sign_map: {{");
    for (i, (p, s)) in assumption.sign_map().iter().enumerate() {
        if i > 0 {
            let _ = write!(out, ", ");
        }
        let _ = write!(out, "{:?} in {:?}", p, s);
    }
    let _ = write!(out, "}}");
    out
}

pub fn fmt_point(pt: &Point) -> String {
    match pt {
        Point::NegInf => "-inf".to_string(),
        Point::PosInf => "+inf".to_string(),
        Point::RootOf(p, n) => format!("root[{n}]({p:?})"),
    }
}

pub fn fmt_cell(cell: &Cell) -> String {
    match cell {
        Cell::Point(pt) => format!("{{{}}}", fmt_point(pt)),
        Cell::Interval(l, r) => format!("({}, {})", fmt_point(l), fmt_point(r)),
    }
}

pub fn fmt_cell_entry(entry: &CellEntry) -> String {
    let signs: Vec<String> = entry.signs.iter().map(|(p, s)| format!("{p:?}:{s:?}")).collect();
    format!("{} -> [{}]", fmt_cell(&entry.cell), signs.join(", "))
}

pub fn fmt_sign_conf(conf: &SignConf) -> String {
    conf.entries.iter().map(fmt_cell_entry).collect::<Vec<_>>().join(" | ")
}
