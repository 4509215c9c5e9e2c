#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Conflict analysis by resolution to the first unique implication point.
//!
//! When the trail falsifies a clause, the analyser walks the implication
//! chain backwards: it repeatedly picks the latest trail literal that
//! negates a literal of the conflict clause and resolves the conflict with
//! that literal's reason clause. The loop stops once exactly one literal of
//! the conflict was assigned at the current decision level (the 1UIP
//! condition), or, at level 0, once the conflict has been resolved to the
//! empty clause. Each step preserves the invariant that the conflict clause
//! is an implicate of the formula and is falsified by the trail.
//!
//! The analyser also selects what happens next: the backjump target (the
//! trail literal at the second-highest level among the learned clause's
//! literals), or a restart when no such literal exists, which is the case
//! exactly when the learned clause is unit.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::clause_storage::LiteralStorage;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use crate::sat::reason::ReasonMap;
use crate::sat::trail::Trail;
use tracing::trace;

/// What the driver must do with an analysed conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis<L: Literal, S: LiteralStorage<L>> {
    /// The conflict arose at level 0 and resolves to the empty clause: the
    /// formula is unsatisfiable. The empty clause is still learned as a
    /// canonical record.
    Ground(Clause<L, S>),
    /// Learn the clause, backjump to `target` (inclusive), then propagate
    /// `assert` with the learned clause as its reason.
    Backjump {
        learnt: Clause<L, S>,
        assert: L,
        target: L,
    },
    /// The learned clause is unit, so there is no level to backjump into:
    /// learn it, clear the trail, then propagate `assert` at level 0.
    Restart { learnt: Clause<L, S>, assert: L },
}

/// Resolves conflicts into learned clauses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Analyser {
    /// Conflicts analysed so far.
    pub count: u64,
}

impl Analyser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyses the conflict in `cnf[conflict_idx]` against the current
    /// trail and reason map.
    ///
    /// # Panics
    ///
    /// Panics if a pivot has no reason clause or the conflict clause loses
    /// contact with the trail mid-analysis; both mean the trail/reason
    /// bookkeeping is broken.
    pub fn analyse<L: Literal, S: LiteralStorage<L>, A: Assignment>(
        &mut self,
        cnf: &Cnf<L, S>,
        trail: &Trail<L, A>,
        reasons: &ReasonMap,
        conflict_idx: usize,
    ) -> Analysis<L, S> {
        self.count += 1;
        let mut conflict = cnf.clause(conflict_idx).clone();

        if trail.current_level() == 0 {
            while !conflict.is_empty() {
                conflict = Self::explain(cnf, trail, reasons, conflict);
            }
            return Analysis::Ground(conflict);
        }

        while trail.count_at_current_level(&conflict.invert()) != 1 {
            conflict = Self::explain(cnf, trail, reasons, conflict);
        }

        // The one literal of the learned clause at the current level; its
        // negation is the latest trail literal among the clause's negations.
        let on_trail = trail
            .last_asserted(&conflict.invert())
            .unwrap_or_else(|| panic!("conflict clause {conflict} has no literal on the trail"));
        let assert = on_trail.negated();

        let mut rest = conflict.clone();
        rest.remove(assert);

        match trail.last_asserted(&rest.invert()) {
            Some(target) => Analysis::Backjump {
                learnt: conflict,
                assert,
                target,
            },
            None => Analysis::Restart {
                learnt: conflict,
                assert,
            },
        }
    }

    /// One resolution step: eliminates the latest trail literal negating a
    /// conflict literal, using its reason clause.
    fn explain<L: Literal, S: LiteralStorage<L>, A: Assignment>(
        cnf: &Cnf<L, S>,
        trail: &Trail<L, A>,
        reasons: &ReasonMap,
        conflict: Clause<L, S>,
    ) -> Clause<L, S> {
        let pivot = trail
            .last_asserted(&conflict.invert())
            .unwrap_or_else(|| panic!("conflict clause {conflict} has no literal on the trail"));
        let reason_idx = reasons.get(pivot.variable()).unwrap_or_else(|| {
            panic!("no reason recorded for propagated variable {}", pivot.variable())
        });
        let reason = cnf.clause(reason_idx);

        let resolvent = conflict.resolve(reason, pivot);
        trace!(%conflict, %reason, %resolvent, "resolved");
        resolvent
    }
}
