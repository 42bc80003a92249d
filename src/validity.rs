//! Classical truth-table check, run before the search so that a formula that
//! is simply false under some assignment is reported as such instead of as a
//! failed search.

use crate::error::CheckError;
use crate::prop_tree::Formula;
use std::collections::BTreeMap;

/// Outcome of a check that found no countermodel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
	Tautology,
	/// Too many atoms to enumerate, nothing was checked
	Skipped { atoms: usize },
}

pub fn evaluate(formula: &Formula, assignment: &BTreeMap<String, bool>) -> bool {
	match formula {
		Formula::Atom(name) => assignment.get(name).copied().unwrap_or(false),
		Formula::Not(a) => !evaluate(a, assignment),
		Formula::And(a, b) => evaluate(a, assignment) && evaluate(b, assignment),
		Formula::Or(a, b) => evaluate(a, assignment) || evaluate(b, assignment),
		Formula::To(a, b) => !evaluate(a, assignment) || evaluate(b, assignment),
	}
}

/// Tries every assignment of the formula's atoms, all-true first. The first
/// falsifying one is returned as a countermodel.
pub fn check_tautology(formula: &Formula, max_atoms: usize) -> Result<Verdict, CheckError> {
	let atoms: Vec<&str> = formula.atoms().into_iter().collect();
	if atoms.len() > max_atoms.min(63) {
		return Ok(Verdict::Skipped { atoms: atoms.len() });
	}
	for bits in 0..(1u64 << atoms.len()) {
		let assignment: BTreeMap<String, bool> = atoms
			.iter()
			.enumerate()
			.map(|(i, name)| ((*name).to_owned(), bits & (1 << i) == 0))
			.collect();
		if !evaluate(formula, &assignment) {
			return Err(CheckError::Countermodel {
				formula: formula.clone(),
				assignment,
			});
		}
	}
	Ok(Verdict::Tautology)
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::parser::parse;

	fn check(string: &str) -> Result<Verdict, CheckError> {
		check_tautology(&parse(string).unwrap(), 16)
	}

	#[test]
	fn test_tautologies() {
		assert_eq!(check("A to A"), Ok(Verdict::Tautology));
		assert_eq!(check("A or not A"), Ok(Verdict::Tautology));
		assert_eq!(check("not (not A) to A"), Ok(Verdict::Tautology));
		assert_eq!(
			check("((A or B) to C) to (A to C) and (B to C)"),
			Ok(Verdict::Tautology)
		);
	}

	#[test]
	fn test_countermodel() {
		match check("B to A") {
			Err(CheckError::Countermodel { assignment, .. }) => {
				assert_eq!(assignment.get("A"), Some(&false));
				assert_eq!(assignment.get("B"), Some(&true));
			}
			other => panic!("expected countermodel, got {:?}", other),
		}
	}

	#[test]
	fn test_skips_large_tables() {
		let f = parse("A to B to C").unwrap();
		assert_eq!(check_tautology(&f, 2), Ok(Verdict::Skipped { atoms: 3 }));
	}
}
