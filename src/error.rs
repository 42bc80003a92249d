//! Error types for parsing, checking and proof search

use crate::prop_tree::Formula;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// What went wrong while reading a formula
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
	#[error("empty input")]
	EmptyInput,

	#[error("unknown token")]
	UnknownToken,

	#[error("unbalanced parenthesis")]
	UnbalancedParenthesis,

	/// `A and B and C` without parentheses
	#[error("ambiguous chain of the same connective, add parentheses")]
	AmbiguousChain,

	#[error("unexpected token")]
	UnexpectedToken,

	#[error("unexpected end of input")]
	UnexpectedEnd,

	#[error("trailing input")]
	TrailingInput,

	/// More nested `not`, `to` or parentheses than the parser accepts
	#[error("formula nested too deeply")]
	TooDeep,
}

/// A malformed formula, located by byte offset
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind} at position {position}{}", Fragment(.fragment))]
pub struct ParseError {
	pub kind: ParseErrorKind,
	pub position: usize,
	/// Offending input text, empty at end of input
	pub fragment: String,
}

struct Fragment<'a>(&'a str);

impl fmt::Display for Fragment<'_> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		if self.0.is_empty() {
			Ok(())
		} else {
			write!(f, ": `{}`", self.0)
		}
	}
}

impl ParseError {
	pub fn new(kind: ParseErrorKind, position: usize, fragment: impl Into<String>) -> Self {
		ParseError {
			kind,
			position,
			fragment: fragment.into(),
		}
	}
}

/// Failure of the proof search
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProveError {
	/// Every rule was tried, or the budget ran out. An expected outcome.
	#[error("no proof found for {goal}{}", limit_note(.limit))]
	SearchExhausted {
		goal: Formula,
		/// Set when a search limit cut some branch off
		limit: Option<SearchLimit>,
		steps: usize,
	},

	/// The proof tree broke the discharge invariant. A bug in the prover.
	#[error("internal invariant violated: {0}")]
	InvariantViolation(String),
}

/// Which budget of the search ran out
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SearchLimit {
	#[error("depth limit reached")]
	Depth,

	#[error("step limit reached")]
	Steps,
}

fn limit_note(limit: &Option<SearchLimit>) -> String {
	match limit {
		Some(limit) => format!(" ({})", limit),
		None => String::new(),
	}
}

impl ProveError {
	pub fn exhausted(goal: &Formula, limit: Option<SearchLimit>, steps: usize) -> Self {
		ProveError::SearchExhausted {
			goal: goal.clone(),
			limit,
			steps,
		}
	}

	pub fn invariant(message: impl Into<String>) -> Self {
		ProveError::InvariantViolation(message.into())
	}
}

/// The formula is not a classical tautology
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CheckError {
	#[error("{formula} turns out false when: {}", Assignment(.assignment))]
	Countermodel {
		formula: Formula,
		assignment: BTreeMap<String, bool>,
	},
}

struct Assignment<'a>(&'a BTreeMap<String, bool>);

impl fmt::Display for Assignment<'_> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for (i, (name, value)) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{} = {}", name, value)?;
		}
		Ok(())
	}
}

/// Everything the parse, check, prove and render pipeline can report
#[derive(Debug, Error)]
pub enum ExecError {
	#[error("error when parsing:\n{0}")]
	Parse(#[from] ParseError),

	#[error("error when checking:\n{0}")]
	Check(#[from] CheckError),

	#[error("error when solving:\n{0}")]
	Prove(#[from] ProveError),

	#[error("error when writing {path}:\n{source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_parse_error_message() {
		let e = ParseError::new(ParseErrorKind::UnknownToken, 2, "$");
		assert_eq!(e.to_string(), "unknown token at position 2: `$`");
		let e = ParseError::new(ParseErrorKind::UnexpectedEnd, 5, "");
		assert_eq!(e.to_string(), "unexpected end of input at position 5");
		let e = ParseError::new(ParseErrorKind::TooDeep, 1024, "(");
		assert_eq!(e.to_string(), "formula nested too deeply at position 1024: `(`");
	}

	#[test]
	fn test_countermodel_message() {
		let mut assignment = BTreeMap::new();
		assignment.insert("A".to_owned(), false);
		assignment.insert("B".to_owned(), true);
		let e = CheckError::Countermodel {
			formula: Formula::to(Formula::atom("B"), Formula::atom("A")),
			assignment,
		};
		assert_eq!(
			e.to_string(),
			"B → A turns out false when: A = false, B = true"
		);
	}

	#[test]
	fn test_exhausted_message() {
		let goal = Formula::atom("A");
		assert_eq!(
			ProveError::exhausted(&goal, None, 3).to_string(),
			"no proof found for A"
		);
		assert_eq!(
			ProveError::exhausted(&goal, Some(SearchLimit::Depth), 3).to_string(),
			"no proof found for A (depth limit reached)"
		);
		assert_eq!(
			ProveError::exhausted(&goal, Some(SearchLimit::Steps), 3).to_string(),
			"no proof found for A (step limit reached)"
		);
	}
}
