//! Natural-deduction derivation trees.
//!
//! A node owns its premises. The link between a discharged assumption and the
//! leaves that use it is kept as plain reference numbers: leaves carry the
//! number they close over, →-intro and ∨-elim nodes list the numbers they
//! discharge.

use crate::prop_tree::Formula;
use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
	Assumption,
	AndIntro,
	AndElimLeft,
	AndElimRight,
	OrIntroLeft,
	OrIntroRight,
	OrElim,
	ToIntro,
	ToElim,
}

impl Rule {
	pub fn name(&self) -> &'static str {
		match self {
			Rule::Assumption => "assumption",
			Rule::AndIntro => "∧-intro",
			Rule::AndElimLeft => "∧-elim-left",
			Rule::AndElimRight => "∧-elim-right",
			Rule::OrIntroLeft => "∨-intro-left",
			Rule::OrIntroRight => "∨-intro-right",
			Rule::OrElim => "∨-elim",
			Rule::ToIntro => "→-intro",
			Rule::ToElim => "→-elim",
		}
	}

	/// Number of premises the rule takes.
	pub fn arity(&self) -> usize {
		match self {
			Rule::Assumption => 0,
			Rule::AndElimLeft
			| Rule::AndElimRight
			| Rule::OrIntroLeft
			| Rule::OrIntroRight
			| Rule::ToIntro => 1,
			Rule::AndIntro | Rule::ToElim => 2,
			Rule::OrElim => 3,
		}
	}

	/// Number of assumptions the rule discharges.
	pub fn discharge_count(&self) -> usize {
		match self {
			Rule::ToIntro => 1,
			Rule::OrElim => 2,
			_ => 0,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofNode {
	pub formula: Formula,
	pub rule: Rule,
	pub premises: Vec<ProofNode>,
	/// Set on assumption leaves only
	pub reference: Option<usize>,
	/// Set on →-intro (one number) and ∨-elim (left case, right case)
	pub discharges: Vec<usize>,
}

impl ProofNode {
	pub fn assumption(formula: &Formula, reference: usize) -> ProofNode {
		ProofNode {
			formula: formula.clone(),
			rule: Rule::Assumption,
			premises: Vec::new(),
			reference: Some(reference),
			discharges: Vec::new(),
		}
	}

	pub fn infer(rule: Rule, formula: &Formula, premises: Vec<ProofNode>) -> ProofNode {
		ProofNode {
			formula: formula.clone(),
			rule,
			premises,
			reference: None,
			discharges: Vec::new(),
		}
	}

	pub fn to_intro(formula: &Formula, premise: ProofNode, reference: usize) -> ProofNode {
		ProofNode {
			discharges: vec![reference],
			..ProofNode::infer(Rule::ToIntro, formula, vec![premise])
		}
	}

	pub fn or_elim(
		goal: &Formula,
		major: ProofNode,
		left: (ProofNode, usize),
		right: (ProofNode, usize),
	) -> ProofNode {
		ProofNode {
			discharges: vec![left.1, right.1],
			..ProofNode::infer(Rule::OrElim, goal, vec![major, left.0, right.0])
		}
	}

	pub fn is_leaf(&self) -> bool {
		self.premises.is_empty()
	}

	/// Total number of nodes in the tree.
	pub fn size(&self) -> usize {
		1 + self.premises.iter().map(ProofNode::size).sum::<usize>()
	}

	/// Checks that every step is a correct rule application and that the
	/// discharge bookkeeping holds: each leaf's number is discharged by exactly
	/// one ancestor and no number is discharged twice in the tree.
	pub fn verify(&self) -> Result<(), String> {
		let mut open = Vec::new();
		let mut seen = HashSet::new();
		self.verify_recurse(&mut open, &mut seen)
	}

	fn verify_recurse(&self, open: &mut Vec<usize>, seen: &mut HashSet<usize>) -> Result<(), String> {
		if self.premises.len() != self.rule.arity() {
			return Err(format!(
				"{} for {} has {} premises, expected {}",
				self.rule.name(),
				self.formula,
				self.premises.len(),
				self.rule.arity()
			));
		}
		if self.discharges.len() != self.rule.discharge_count() {
			return Err(format!(
				"{} for {} discharges {:?}",
				self.rule.name(),
				self.formula,
				self.discharges
			));
		}
		self.check_shape()?;

		if self.rule == Rule::Assumption {
			return match self.reference {
				Some(reference) if open.contains(&reference) => Ok(()),
				Some(reference) => Err(format!(
					"{} from: {} has no discharging ancestor",
					self.formula, reference
				)),
				None => Err(format!("assumption {} has no reference", self.formula)),
			};
		}
		if let Some(reference) = self.reference {
			return Err(format!(
				"{} for {} carries reference {}",
				self.rule.name(),
				self.formula,
				reference
			));
		}
		for &reference in &self.discharges {
			if !seen.insert(reference) {
				return Err(format!("reference {} is discharged twice", reference));
			}
		}

		match self.rule {
			Rule::OrElim => {
				// the major premise sees none of the case assumptions
				self.premises[0].verify_recurse(open, seen)?;
				for (premise, &reference) in self.premises[1..].iter().zip(&self.discharges) {
					open.push(reference);
					premise.verify_recurse(open, seen)?;
					open.pop();
				}
			}
			_ => {
				let pushed = self.discharges.len();
				open.extend(&self.discharges);
				for premise in &self.premises {
					premise.verify_recurse(open, seen)?;
				}
				open.truncate(open.len() - pushed);
			}
		}
		Ok(())
	}

	/// Checks the conclusion against the premises for this node's rule.
	fn check_shape(&self) -> Result<(), String> {
		let p = |i: usize| &self.premises[i].formula;
		let ok = match (self.rule, &self.formula) {
			(Rule::Assumption, _) => true,
			(Rule::AndIntro, Formula::And(a, b)) => **a == *p(0) && **b == *p(1),
			(Rule::AndElimLeft, f) => matches!(p(0), Formula::And(a, _) if **a == *f),
			(Rule::AndElimRight, f) => matches!(p(0), Formula::And(_, b) if **b == *f),
			(Rule::OrIntroLeft, Formula::Or(a, _)) => **a == *p(0),
			(Rule::OrIntroRight, Formula::Or(_, b)) => **b == *p(0),
			(Rule::OrElim, f) => {
				matches!(p(0), Formula::Or(_, _)) && *p(1) == *f && *p(2) == *f
			}
			(Rule::ToIntro, Formula::To(_, b)) => **b == *p(0),
			(Rule::ToElim, f) => matches!(p(1), Formula::To(a, b) if **a == *p(0) && **b == *f),
			_ => false,
		};
		if ok {
			Ok(())
		} else {
			Err(format!("{} does not conclude {}", self.rule.name(), self.formula))
		}
	}

	/// Assumption formulas a discharging node binds, in `discharges` order.
	pub fn discharged_formulas(&self) -> Vec<&Formula> {
		match (self.rule, &self.formula) {
			(Rule::ToIntro, Formula::To(a, _)) => vec![&**a],
			(Rule::OrElim, _) => match &self.premises[0].formula {
				Formula::Or(a, b) => vec![&**a, &**b],
				_ => Vec::new(),
			},
			_ => Vec::new(),
		}
	}

	/// Maps the discharged numbers onto `1..=n` in pre-order of the
	/// discharging nodes, keeping their relative order.
	pub fn renumber(&mut self) {
		let mut order = Vec::new();
		self.collect_discharges(&mut order);
		let map: HashMap<usize, usize> = order
			.into_iter()
			.enumerate()
			.map(|(i, reference)| (reference, i + 1))
			.collect();
		self.apply_numbering(&map);
	}

	fn collect_discharges(&self, order: &mut Vec<usize>) {
		order.extend(&self.discharges);
		for premise in &self.premises {
			premise.collect_discharges(order);
		}
	}

	fn apply_numbering(&mut self, map: &HashMap<usize, usize>) {
		for reference in self.discharges.iter_mut().chain(self.reference.iter_mut()) {
			if let Some(&renumbered) = map.get(&*reference) {
				*reference = renumbered;
			}
		}
		for premise in &mut self.premises {
			premise.apply_numbering(map);
		}
	}
}
