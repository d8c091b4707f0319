//! Parser for the MWCNF instance format.
//!
//! ```text
//! c comment
//! p mwcnf 3 2
//! w 4 2 7 0
//! 1 -2 0
//! 2 3 0
//! ```
//!
//! Blank lines and lines starting with `c` are skipped anywhere. The
//! parser is lenient in the same places the reference instances are:
//! lines before the header or between header and weights line are
//! ignored, short weight lines are zero-padded, and each remaining line
//! is one clause read up to its terminating `0`.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::{debug, warn};

use super::types::Instance;
use crate::error::LoadError;

enum ParseState {
    Header,
    Weights,
    Clauses,
}

/// Reads an instance from a file. The instance name is the file stem.
pub fn load(path: impl AsRef<Path>) -> Result<Instance, LoadError> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = File::open(path)?;
    parse_mwcnf(file, name)
}

/// Parses an MWCNF instance from `source`.
///
/// # Errors
///
/// - [`LoadError::MissingHeader`] if no `p` line is found
/// - [`LoadError::InvalidHeader`] if the `p` line has no positive
///   variable count or no clause count
/// - [`LoadError::MissingWeights`] if no `w` line with at least one
///   integer token follows the header
/// - [`LoadError::LiteralOutOfRange`] for literals naming unknown variables
/// - [`LoadError::WeightOverflow`] if the total weight does not fit a `u64`
pub fn parse_mwcnf(source: impl Read, name: impl Into<String>) -> Result<Instance, LoadError> {
    let reader = BufReader::new(source);
    let mut state = ParseState::Header;

    let mut num_vars = 0usize;
    let mut declared_clauses = 0usize;
    let mut weights = Vec::new();
    let mut clauses = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }

        match state {
            ParseState::Header => {
                if !trimmed.starts_with('p') {
                    warn!("ignoring line before header: '{trimmed}'");
                    continue;
                }
                (num_vars, declared_clauses) = parse_header(trimmed)?;
                state = ParseState::Weights;
            }
            ParseState::Weights => {
                if !trimmed.starts_with('w') {
                    warn!("ignoring line before weights: '{trimmed}'");
                    continue;
                }
                weights = parse_weights(trimmed, num_vars).ok_or(LoadError::MissingWeights)?;
                state = ParseState::Clauses;
            }
            ParseState::Clauses => clauses.push(parse_clause(trimmed)),
        }
    }

    match state {
        ParseState::Header => return Err(LoadError::MissingHeader),
        ParseState::Weights => return Err(LoadError::MissingWeights),
        ParseState::Clauses => {}
    }

    let instance = Instance::with_declared(name, num_vars, declared_clauses, weights, clauses)?;
    if instance.num_clauses() != declared_clauses {
        warn!(
            "header declares {declared_clauses} clauses, parsed {}",
            instance.num_clauses()
        );
    }
    debug!(
        "parsed instance '{}': {} variables, {} clauses",
        instance.name(),
        instance.num_vars(),
        instance.num_clauses()
    );
    Ok(instance)
}

fn parse_header(line: &str) -> Result<(usize, usize), LoadError> {
    let invalid = || LoadError::InvalidHeader(line.to_owned());
    let mut tokens = line.split_whitespace();

    if tokens.next() != Some("p") {
        return Err(invalid());
    }
    let format = tokens.next().ok_or_else(invalid)?;
    if format != "mwcnf" {
        warn!("unexpected instance format '{format}', reading as mwcnf");
    }

    let num_vars: usize = tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(invalid)?;
    let num_clauses: usize = tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(invalid)?;

    if num_vars == 0 {
        return Err(invalid());
    }
    Ok((num_vars, num_clauses))
}

/// Returns `None` when the line carries no integer token at all.
fn parse_weights(line: &str, num_vars: usize) -> Option<Vec<u64>> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("w") {
        return None;
    }

    let mut weights = Vec::with_capacity(num_vars);
    let mut seen_token = false;
    for token in tokens {
        let Ok(weight) = token.parse::<u64>() else {
            break;
        };
        seen_token = true;
        if weight == 0 || weights.len() == num_vars {
            break;
        }
        weights.push(weight);
    }

    if !seen_token {
        return None;
    }
    if weights.len() < num_vars {
        warn!(
            "weights line has {} of {num_vars} weights, padding with zeros",
            weights.len()
        );
    }
    weights.resize(num_vars, 0);
    Some(weights)
}

fn parse_clause(line: &str) -> Vec<i32> {
    line.split_whitespace()
        .map_while(|token| token.parse::<i32>().ok())
        .take_while(|&lit| lit != 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
c sample instance
p mwcnf 3 2

w 4 2 7 0
1 -2 0
c mid comment
2 3 0
";

    #[test]
    fn test_parse_sample() {
        let instance = parse_mwcnf(SAMPLE.as_bytes(), "sample").unwrap();
        assert_eq!(instance.name(), "sample");
        assert_eq!(instance.num_vars(), 3);
        assert_eq!(instance.declared_clauses(), 2);
        assert_eq!(instance.weights(), &[4, 2, 7]);
        assert_eq!(instance.num_clauses(), 2);
        let first: Vec<i32> = instance.clauses()[0]
            .literals()
            .iter()
            .map(|l| l.to_dimacs())
            .collect();
        assert_eq!(first, vec![1, -2]);
    }

    #[test]
    fn test_missing_header() {
        let err = parse_mwcnf("w 1 0\n1 0\n".as_bytes(), "x").unwrap_err();
        assert!(matches!(err, LoadError::MissingHeader));
    }

    #[test]
    fn test_invalid_header() {
        let err = parse_mwcnf("p mwcnf zero 1\n".as_bytes(), "x").unwrap_err();
        assert!(matches!(err, LoadError::InvalidHeader(_)));
        let err = parse_mwcnf("p mwcnf 0 1\n".as_bytes(), "x").unwrap_err();
        assert!(matches!(err, LoadError::InvalidHeader(_)));
    }

    #[test]
    fn test_missing_weights() {
        let err = parse_mwcnf("p mwcnf 2 1\n".as_bytes(), "x").unwrap_err();
        assert!(matches!(err, LoadError::MissingWeights));
        let err = parse_mwcnf("p mwcnf 2 1\nw\n1 0\n".as_bytes(), "x").unwrap_err();
        assert!(matches!(err, LoadError::MissingWeights));
    }

    #[test]
    fn test_short_weights_zero_padded() {
        let instance = parse_mwcnf("p mwcnf 3 1\nw 5 0\n1 0\n".as_bytes(), "x").unwrap();
        assert_eq!(instance.weights(), &[5, 0, 0]);
    }

    #[test]
    fn test_extra_weights_ignored() {
        let instance = parse_mwcnf("p mwcnf 2 1\nw 5 6 7 8 0\n1 0\n".as_bytes(), "x").unwrap();
        assert_eq!(instance.weights(), &[5, 6]);
    }

    #[test]
    fn test_malformed_weight_stops_list() {
        let instance = parse_mwcnf("p mwcnf 3 1\nw 5 x 7 0\n1 0\n".as_bytes(), "x").unwrap();
        assert_eq!(instance.weights(), &[5, 0, 0]);
    }

    #[test]
    fn test_empty_clause_dropped() {
        let instance = parse_mwcnf("p mwcnf 1 2\nw 1 0\n0\n1 0\n".as_bytes(), "x").unwrap();
        assert_eq!(instance.num_clauses(), 1);
    }

    #[test]
    fn test_tokens_after_terminator_ignored() {
        let instance = parse_mwcnf("p mwcnf 2 1\nw 1 1 0\n1 0 2\n".as_bytes(), "x").unwrap();
        assert_eq!(instance.clauses()[0].len(), 1);
    }

    #[test]
    fn test_literal_out_of_range() {
        let err = parse_mwcnf("p mwcnf 2 1\nw 1 1 0\n1 3 0\n".as_bytes(), "x").unwrap_err();
        assert!(matches!(err, LoadError::LiteralOutOfRange { literal: 3, .. }));
    }

    #[test]
    fn test_weight_sum_overflow_rejected() {
        let source = "p mwcnf 2 1\nw 18446744073709551615 1 0\n1 0\n";
        let err = parse_mwcnf(source.as_bytes(), "x").unwrap_err();
        assert!(matches!(err, LoadError::WeightOverflow));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load("/definitely/not/here.mwcnf").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
