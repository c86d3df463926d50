//! A growing assignment of parameter variables to real algebraic numbers,
//! populated bottom-up (innermost eliminated variable first) by
//! [`crate::solve::solve`].

use crate::algebraic::RealAlgebraic;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct Model {
    values: BTreeMap<String, RealAlgebraic>,
}

impl Model {
    pub fn new() -> Self {
        Model {
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, var: &str) -> Option<&RealAlgebraic> {
        self.values.get(var)
    }

    /// Returns a new model extended with `var ↦ value`; the caller's model
    /// is left untouched, matching the "grows by one entry per solver level"
    /// lifecycle in the data model.
    pub fn extended(&self, var: &str, value: RealAlgebraic) -> Model {
        let mut values = self.values.clone();
        values.insert(var.to_string(), value);
        Model { values }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RealAlgebraic)> {
        self.values.iter()
    }
}
