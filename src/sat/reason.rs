#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::sat::literal::Variable;
use rustc_hash::FxHashMap;

/// Maps each propagated variable to the index of the clause that forced it.
///
/// Indices point into the clause database rather than holding clause copies;
/// the database is append-only during a solve, so indices stay stable. The
/// domain of the map is exactly the set of propagated variables currently on
/// the trail: entries are added on propagation and removed for every literal
/// a backjump pops.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReasonMap {
    map: FxHashMap<Variable, usize>,
}

impl ReasonMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `clause_idx` as the reason `var` was propagated.
    pub fn set(&mut self, var: Variable, clause_idx: usize) {
        self.map.insert(var, clause_idx);
    }

    /// The reason clause index for `var`, if `var` was propagated.
    #[must_use]
    pub fn get(&self, var: Variable) -> Option<usize> {
        self.map.get(&var).copied()
    }

    /// Forgets the reason for `var`. Called for each literal removed from
    /// the trail by a backjump.
    pub fn remove(&mut self, var: Variable) {
        self.map.remove(&var);
    }

    /// Forgets every reason. Called on restart together with `Trail::clear`.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut reasons = ReasonMap::new();
        assert_eq!(reasons.get(1), None);

        reasons.set(1, 0);
        reasons.set(2, 3);
        assert_eq!(reasons.get(1), Some(0));
        assert_eq!(reasons.get(2), Some(3));
        assert_eq!(reasons.len(), 2);

        reasons.remove(1);
        assert_eq!(reasons.get(1), None);

        reasons.clear();
        assert!(reasons.is_empty());
    }
}
