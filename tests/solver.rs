//! End-to-end tests: DIMACS text in, verdict (and model) out.

use backjump::sat::cdcl::Cdcl;
use backjump::sat::cnf::Cnf;
use backjump::sat::dimacs::parse_dimacs_text;
use backjump::sat::solver::{Solver, Verdict};
use proptest::prelude::*;

type DefaultCnf = Cnf;

fn solve_text(text: &str) -> (Verdict, Cdcl) {
    let cnf: DefaultCnf = parse_dimacs_text(text).expect("valid DIMACS");
    let mut solver: Cdcl = Cdcl::new(cnf);
    let verdict = solver.solve();
    (verdict, solver)
}

#[test]
fn single_positive_unit() {
    let (verdict, _) = solve_text("p cnf 1 1\n1 0\n");
    let model = verdict.model().expect("expected SAT");
    assert_eq!(model.to_string(), "[ p1 ]");
}

#[test]
fn contradictory_units() {
    let (verdict, _) = solve_text("p cnf 1 2\n1 0\n-1 0\n");
    assert_eq!(verdict, Verdict::Unsat);
}

#[test]
fn chained_implications_sat() {
    let (verdict, solver) = solve_text("p cnf 3 3\n1 2 0\n-1 2 0\n-2 3 0\n");
    let model = verdict.model().expect("expected SAT");
    assert!(solver.cnf().verify(model));
    // the decision policy tries variable 1 positively first; propagation
    // then forces 2 and 3
    assert!(model.value(2));
    assert!(model.value(3));
}

#[test]
fn all_polarities_of_two_variables() {
    let (verdict, _) = solve_text("p cnf 3 4\n1 2 0\n-1 2 0\n1 -2 0\n-1 -2 0\n");
    assert_eq!(verdict, Verdict::Unsat);
}

#[test]
fn empty_formula_yields_a_total_model() {
    let (verdict, _) = solve_text("p cnf 3 0\n");
    let model = verdict.model().expect("expected SAT");
    // every variable gets decided, positively, in id order
    assert_eq!(model.num_vars(), 3);
    assert_eq!(model.to_string(), "[ p1 p2 p3 ]");
}

#[test]
fn formula_with_empty_clause() {
    let (verdict, solver) = solve_text("p cnf 2 2\n0\n1 2 0\n");
    assert_eq!(verdict, Verdict::Unsat);
    assert_eq!(solver.stats().decisions, 0);
}

/// PHP(pigeons, holes): every pigeon sits in some hole, no hole holds two
/// pigeons. Unsatisfiable whenever pigeons > holes.
fn pigeonhole(pigeons: usize, holes: usize) -> Vec<Vec<i32>> {
    let var = |p: usize, h: usize| ((p - 1) * holes + h) as i32;
    let mut clauses = Vec::new();

    for p in 1..=pigeons {
        clauses.push((1..=holes).map(|h| var(p, h)).collect());
    }
    for h in 1..=holes {
        for p in 1..=pigeons {
            for q in (p + 1)..=pigeons {
                clauses.push(vec![-var(p, h), -var(q, h)]);
            }
        }
    }
    clauses
}

#[test]
fn pigeonhole_3_2_is_unsat() {
    let cnf: DefaultCnf = Cnf::from(pigeonhole(3, 2));
    let mut solver: Cdcl = Cdcl::new(cnf);
    assert_eq!(solver.solve(), Verdict::Unsat);
}

#[test]
fn pigeonhole_3_3_is_sat() {
    let cnf: DefaultCnf = Cnf::from(pigeonhole(3, 3));
    let mut solver: Cdcl = Cdcl::new(cnf);
    let verdict = solver.solve();
    let model = verdict.model().expect("expected SAT");
    assert!(solver.cnf().verify(model));
}

#[test]
fn verdict_and_model_are_deterministic() {
    let text = "p cnf 4 5\n1 2 0\n-1 3 0\n-3 -2 4 0\n2 -4 0\n-1 -4 0\n";
    let (first, _) = solve_text(text);
    let (second, _) = solve_text(text);
    assert_eq!(first, second);
}

/// A random 3-CNF with a planted satisfying assignment: each clause has one
/// literal forced to agree with the planted model, so SAT is guaranteed.
fn planted_3cnf(
    num_vars: usize,
    num_clauses: usize,
) -> impl Strategy<Value = Vec<Vec<i32>>> {
    let clause = (
        prop::collection::vec((0..num_vars, any::<bool>()), 3),
        0usize..3,
    );
    (
        prop::collection::vec(any::<bool>(), num_vars),
        prop::collection::vec(clause, num_clauses),
    )
        .prop_map(|(planted, raw)| {
            raw.into_iter()
                .map(|(lits, fixed)| {
                    lits.into_iter()
                        .enumerate()
                        .map(|(i, (var, polarity))| {
                            let polarity = if i == fixed { planted[var] } else { polarity };
                            let literal = (var + 1) as i32;
                            if polarity {
                                literal
                            } else {
                                -literal
                            }
                        })
                        .collect()
                })
                .collect()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_satisfiable_3cnf_returns_a_verifying_model(clauses in planted_3cnf(20, 60)) {
        let cnf: DefaultCnf = Cnf::new(clauses, 20);
        let mut solver: Cdcl = Cdcl::new(cnf);
        let verdict = solver.solve();
        let model = verdict.model().expect("planted formula must be SAT");
        prop_assert_eq!(model.num_vars(), 20);
        prop_assert!(solver.cnf().verify(model));
    }
}
