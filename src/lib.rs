//! A CDCL (Conflict-Driven Clause Learning) SAT solver.
//!
//! Given a propositional formula in conjunctive normal form, the solver
//! either produces a total truth assignment satisfying every clause or
//! reports that no such assignment exists. The search interleaves unit
//! propagation, decision, conflict analysis by resolution to the first
//! unique implication point, clause learning and non-chronological
//! backjumping.

/// The `sat` module implements the solver core: the trail, the clause
/// database, conflict analysis and the CDCL search driver, together with a
/// DIMACS-CNF parser.
pub mod sat;
