#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the DIMACS CNF file format.
//!
//! The format:
//! - Lines whose first non-whitespace character is `c` are comments.
//! - The first significant line must be `p cnf <varCount> <clauseCount>`.
//! - Clause lines hold whitespace-separated signed integers; `0` terminates
//!   a clause (it is a separator, not a literal) and a clause may span
//!   lines. A line starting with `%` ends the data section, as found in
//!   competition benchmark files.
//!
//! The parser is strict where the format is: a missing or malformed problem
//! line, a non-integer token, a literal beyond the declared variable count
//! or more clauses than declared all fail with [`SolverError`]. A final
//! clause terminated by end of input rather than `0` is accepted.

use crate::sat::clause_storage::LiteralStorage;
use crate::sat::cnf::Cnf;
use crate::sat::error::SolverError;
use crate::sat::literal::Literal;
use std::io::{self, BufRead};
use std::path::Path;

/// Parses DIMACS text already held in memory.
///
/// # Errors
///
/// See [`parse_dimacs`].
pub fn parse_dimacs_text<L: Literal, S: LiteralStorage<L>>(
    text: &str,
) -> Result<Cnf<L, S>, SolverError> {
    parse_dimacs(io::Cursor::new(text))
}

/// Parses a DIMACS CNF file.
///
/// # Errors
///
/// Fails if the file cannot be opened or read, or on any of the
/// [`parse_dimacs`] conditions.
pub fn parse_file<L: Literal, S: LiteralStorage<L>>(
    path: impl AsRef<Path>,
) -> Result<Cnf<L, S>, SolverError> {
    let file = std::fs::File::open(path)?;
    parse_dimacs(io::BufReader::new(file))
}

/// Parses DIMACS CNF data from any buffered reader.
///
/// # Errors
///
/// - [`SolverError::MissingHeader`] / [`SolverError::InvalidHeader`] when
///   the `p cnf` problem line is absent or malformed.
/// - [`SolverError::InvalidLiteral`] on a non-integer token.
/// - [`SolverError::VariableOutOfRange`] when a literal exceeds the
///   declared variable count.
/// - [`SolverError::TooManyClauses`] when the declared clause count is
///   exceeded.
/// - [`SolverError::Io`] when reading fails.
pub fn parse_dimacs<R: BufRead, L: Literal, S: LiteralStorage<L>>(
    reader: R,
) -> Result<Cnf<L, S>, SolverError> {
    let mut lines = reader.lines();

    let (num_vars, num_clauses) = parse_header(&mut lines)?;

    let mut clauses: Vec<Vec<i32>> = Vec::with_capacity(num_clauses);
    let mut current: Vec<i32> = Vec::new();

    for line in lines {
        let line = line?;
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }
        if trimmed.starts_with('%') {
            break;
        }

        for token in trimmed.split_whitespace() {
            let literal: i32 = token
                .parse()
                .map_err(|_| SolverError::InvalidLiteral(token.to_string()))?;

            if literal == 0 {
                push_clause(&mut clauses, &mut current, num_clauses)?;
                continue;
            }
            if literal.unsigned_abs() as usize > num_vars {
                return Err(SolverError::VariableOutOfRange {
                    literal,
                    declared: num_vars,
                });
            }
            current.push(literal);
        }
    }

    // end of input terminates a dangling final clause
    if !current.is_empty() {
        push_clause(&mut clauses, &mut current, num_clauses)?;
    }

    Ok(Cnf::new(clauses, num_vars))
}

/// Reads up to and including the problem line, returning the declared
/// variable and clause counts.
fn parse_header(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<(usize, usize), SolverError> {
    for line in lines {
        let line = line?;
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        if tokens.next() != Some("p") {
            return Err(SolverError::InvalidHeader(line.clone()));
        }
        if tokens.next() != Some("cnf") {
            return Err(SolverError::InvalidHeader(line.clone()));
        }
        let num_vars = parse_count(tokens.next(), &line)?;
        let num_clauses = parse_count(tokens.next(), &line)?;
        if tokens.next().is_some() {
            return Err(SolverError::InvalidHeader(line));
        }
        return Ok((num_vars, num_clauses));
    }
    Err(SolverError::MissingHeader)
}

fn parse_count(token: Option<&str>, line: &str) -> Result<usize, SolverError> {
    token
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| SolverError::InvalidHeader(line.to_string()))
}

fn push_clause(
    clauses: &mut Vec<Vec<i32>>,
    current: &mut Vec<i32>,
    declared: usize,
) -> Result<(), SolverError> {
    if clauses.len() >= declared {
        return Err(SolverError::TooManyClauses { declared });
    }
    clauses.push(std::mem::take(current));
    Ok(())
}
