#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use thiserror::Error;

/// Everything that can go wrong before the search starts.
///
/// Unsatisfiability is a normal result, never an error. Broken internal
/// invariants (a backjump target missing from the trail, a propagated
/// variable without a reason) are programmer errors and abort with a panic
/// rather than surfacing here.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The input ended before a `p cnf` problem line was found.
    #[error("invalid input: missing 'p cnf <vars> <clauses>' problem line")]
    MissingHeader,

    /// The problem line was present but malformed.
    #[error("invalid input: malformed problem line: {0}")]
    InvalidHeader(String),

    /// A token appeared where a signed integer literal was expected.
    #[error("invalid input: expected a literal, found {0:?}")]
    InvalidLiteral(String),

    /// The input contains more clauses than the problem line declared.
    #[error("invalid input: more than the declared {declared} clauses")]
    TooManyClauses {
        /// The clause count from the problem line.
        declared: usize,
    },

    /// A literal mentions a variable beyond the declared count.
    #[error("invalid input: literal {literal} exceeds the declared {declared} variables")]
    VariableOutOfRange {
        /// The offending DIMACS literal.
        literal: i32,
        /// The variable count from the problem line.
        declared: usize,
    },

    /// Nothing to solve: no path and no subcommand were given.
    #[error("no input given; pass a .cnf path or use a subcommand")]
    NoInput,

    /// The input could not be read at all.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
