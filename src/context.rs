use crate::prop_tree::Formula;

/// A formula taken as given, tagged with the reference number it was
/// introduced under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assumption {
	pub formula: Formula,
	pub reference: usize,
}

/// Live assumptions visible to one branch of the search, oldest first.
///
/// A child branch gets its own copy via [`ProofContext::with`], so whatever
/// it assumes never leaks into its siblings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProofContext {
	assumptions: Vec<Assumption>,
}

impl ProofContext {
	pub fn new() -> ProofContext {
		ProofContext {
			assumptions: Vec::new(),
		}
	}

	/// This context plus one more assumption.
	pub fn with(&self, formula: &Formula, reference: usize) -> ProofContext {
		let mut assumptions = self.assumptions.clone();
		assumptions.push(Assumption {
			formula: formula.clone(),
			reference,
		});
		ProofContext { assumptions }
	}

	/// Most recently introduced assumption equal to `formula`.
	pub fn find(&self, formula: &Formula) -> Option<&Assumption> {
		self.assumptions
			.iter()
			.rev()
			.find(|assumption| assumption.formula == *formula)
	}

	pub fn contains(&self, formula: &Formula) -> bool {
		self.find(formula).is_some()
	}

	/// Assumptions in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &Assumption> {
		self.assumptions.iter()
	}

	pub fn len(&self) -> usize {
		self.assumptions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.assumptions.is_empty()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_with_forks_instead_of_mutating() {
		let root = ProofContext::new();
		let left = root.with(&Formula::atom("A"), 1);
		let right = root.with(&Formula::atom("B"), 2);
		assert!(root.is_empty());
		assert!(left.contains(&Formula::atom("A")));
		assert!(!left.contains(&Formula::atom("B")));
		assert!(right.contains(&Formula::atom("B")));
		assert!(!right.contains(&Formula::atom("A")));
	}

	#[test]
	fn test_find_prefers_most_recent() {
		let a = Formula::atom("A");
		let context = ProofContext::new().with(&a, 1).with(&Formula::atom("B"), 2).with(&a, 3);
		assert_eq!(context.find(&a).map(|assumption| assumption.reference), Some(3));
		assert_eq!(context.len(), 3);
		let order: Vec<usize> = context.iter().map(|assumption| assumption.reference).collect();
		assert_eq!(order, vec![1, 2, 3]);
	}
}
