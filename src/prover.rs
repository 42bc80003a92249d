//! Backward-chaining proof search.
//!
//! For a goal the search first applies the introduction rule of its main
//! connective, looks for an identical live assumption, and finally chains
//! elimination rules off the assumptions in context (insertion order):
//!
//! | goal    | tried in order                                           |
//! |---------|----------------------------------------------------------|
//! | `A ∧ B` | ∧-intro, assumption, eliminations                        |
//! | `A ∨ B` | assumption, ∨-intro-left, ∨-intro-right, eliminations    |
//! | `A → B` | →-intro, assumption, eliminations                        |
//! | `P`/`¬A`| assumption, eliminations                                 |
//!
//! There is no rule for `¬` and no ex falso, so double-negation elimination
//! and excluded middle are out of reach. A failed attempt only makes the
//! caller move on to the next rule; the step budget is the one failure that
//! ends the whole search.

use crate::config::ProverConfig;
use crate::context::ProofContext;
use crate::error::{ProveError, SearchLimit};
use crate::proof_tree::{ProofNode, Rule};
use crate::prop_tree::Formula;
use tracing::{debug, error, info, trace, warn};

/// Derives `goal` from no assumptions. Reference numbers in the result run
/// from 1 in the order their discharging nodes appear top-down.
pub fn prove(goal: &Formula, config: &ProverConfig) -> Result<ProofNode, ProveError> {
	let mut search = Search::new(config);
	let result = search.prove_recurse(goal, &ProofContext::new());
	match result {
		Ok(mut proof) => {
			proof.renumber();
			if let Err(message) = proof.verify() {
				error!(goal = %goal, %message, "proof tree failed verification");
				return Err(ProveError::invariant(message));
			}
			info!(goal = %goal, steps = search.steps, size = proof.size(), "proof found");
			Ok(proof)
		}
		Err(failure) => {
			let limit = match failure {
				Failure::OutOfSteps => Some(SearchLimit::Steps),
				Failure::NoProof if search.depth_limited => Some(SearchLimit::Depth),
				Failure::NoProof => None,
			};
			if let Some(limit) = limit {
				warn!(goal = %goal, steps = search.steps, %limit, "search budget exhausted");
			} else {
				info!(goal = %goal, steps = search.steps, "no proof found");
			}
			Err(ProveError::exhausted(goal, limit, search.steps))
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Failure {
	/// This branch has no derivation, try something else
	NoProof,
	/// Step budget spent, stop everything
	OutOfSteps,
}

type Attempt = Result<ProofNode, Failure>;

/// Turns a local failure into `None` so the caller can try its next rule.
fn recover(attempt: Attempt) -> Result<Option<ProofNode>, Failure> {
	match attempt {
		Ok(node) => Ok(Some(node)),
		Err(Failure::NoProof) => Ok(None),
		Err(failure) => Err(failure),
	}
}

/// Whether eliminating from `formula` can possibly end in `goal`.
fn yields(formula: &Formula, goal: &Formula) -> bool {
	if formula == goal {
		return true;
	}
	match formula {
		Formula::And(a, b) => yields(a, goal) || yields(b, goal),
		Formula::To(_, b) => yields(b, goal),
		Formula::Or(_, _) => true,
		_ => false,
	}
}

struct Search<'c> {
	config: &'c ProverConfig,
	/// Last reference number handed out
	next_reference: usize,
	steps: usize,
	depth_limited: bool,
	/// Goals on the current branch with the context size they were posed in
	path: Vec<(Formula, usize)>,
}

impl<'c> Search<'c> {
	fn new(config: &'c ProverConfig) -> Search<'c> {
		Search {
			config,
			next_reference: 0,
			steps: 0,
			depth_limited: false,
			path: Vec::new(),
		}
	}

	fn fresh_reference(&mut self) -> usize {
		self.next_reference += 1;
		self.next_reference
	}

	fn prove_recurse(&mut self, goal: &Formula, context: &ProofContext) -> Attempt {
		self.steps += 1;
		if self.steps > self.config.max_steps {
			return Err(Failure::OutOfSteps);
		}
		if self.path.len() >= self.config.max_depth {
			self.depth_limited = true;
			return Err(Failure::NoProof);
		}
		// contexts only grow along a branch, so an equal size means the same
		// context and the goal is being asked again
		if self
			.path
			.iter()
			.any(|(seen, size)| *size == context.len() && seen == goal)
		{
			return Err(Failure::NoProof);
		}
		trace!(goal = %goal, depth = self.path.len(), assumptions = context.len(), "prove");

		self.path.push((goal.clone(), context.len()));
		let result = self.prove_goal(goal, context);
		self.path.pop();
		result
	}

	fn prove_goal(&mut self, goal: &Formula, context: &ProofContext) -> Attempt {
		match goal {
			Formula::And(a, b) => {
				if let Some(node) = recover(self.and_intro(goal, a, b, context))? {
					return Ok(node);
				}
				if let Some(node) = self.use_assumption(goal, context) {
					return Ok(node);
				}
			}
			Formula::Or(a, b) => {
				if let Some(node) = self.use_assumption(goal, context) {
					return Ok(node);
				}
				if let Some(node) = recover(self.or_intro(Rule::OrIntroLeft, goal, a, context))? {
					return Ok(node);
				}
				if let Some(node) = recover(self.or_intro(Rule::OrIntroRight, goal, b, context))? {
					return Ok(node);
				}
			}
			Formula::To(a, b) => {
				if let Some(node) = recover(self.to_intro(goal, a, b, context))? {
					return Ok(node);
				}
				if let Some(node) = self.use_assumption(goal, context) {
					return Ok(node);
				}
			}
			Formula::Atom(_) | Formula::Not(_) => {
				if let Some(node) = self.use_assumption(goal, context) {
					return Ok(node);
				}
			}
		}
		self.eliminate(goal, context)
	}

	fn use_assumption(&self, goal: &Formula, context: &ProofContext) -> Option<ProofNode> {
		context
			.find(goal)
			.map(|assumption| ProofNode::assumption(goal, assumption.reference))
	}

	fn and_intro(&mut self, goal: &Formula, a: &Formula, b: &Formula, context: &ProofContext) -> Attempt {
		let left = self.prove_recurse(a, context)?;
		let right = self.prove_recurse(b, context)?;
		debug!(goal = %goal, "∧-intro");
		Ok(ProofNode::infer(Rule::AndIntro, goal, vec![left, right]))
	}

	fn or_intro(&mut self, rule: Rule, goal: &Formula, disjunct: &Formula, context: &ProofContext) -> Attempt {
		let premise = self.prove_recurse(disjunct, context)?;
		debug!(goal = %goal, rule = rule.name(), "∨-intro");
		Ok(ProofNode::infer(rule, goal, vec![premise]))
	}

	fn to_intro(&mut self, goal: &Formula, a: &Formula, b: &Formula, context: &ProofContext) -> Attempt {
		let reference = self.fresh_reference();
		debug!(assumption = %a, reference, "assume antecedent");
		let body = self.prove_recurse(b, &context.with(a, reference))?;
		Ok(ProofNode::to_intro(goal, body, reference))
	}

	fn eliminate(&mut self, goal: &Formula, context: &ProofContext) -> Attempt {
		for assumption in context.iter() {
			if !yields(&assumption.formula, goal) {
				continue;
			}
			let leaf = ProofNode::assumption(&assumption.formula, assumption.reference);
			if let Some(node) = recover(self.use_derived(goal, leaf, context))? {
				return Ok(node);
			}
		}
		Err(Failure::NoProof)
	}

	/// Continues eliminating from an already derived formula until `goal`
	/// comes out.
	fn use_derived(&mut self, goal: &Formula, derived: ProofNode, context: &ProofContext) -> Attempt {
		if derived.formula == *goal {
			return Ok(derived);
		}
		match derived.formula.clone() {
			Formula::And(a, b) => {
				for (rule, part) in [(Rule::AndElimLeft, a), (Rule::AndElimRight, b)].iter() {
					if !yields(part, goal) {
						continue;
					}
					let node = ProofNode::infer(*rule, part, vec![derived.clone()]);
					if let Some(node) = recover(self.use_derived(goal, node, context))? {
						return Ok(node);
					}
				}
				Err(Failure::NoProof)
			}
			Formula::To(a, b) => {
				debug!(implication = %derived.formula, "try modus ponens");
				let minor = self.prove_recurse(&a, context)?;
				let node = ProofNode::infer(Rule::ToElim, &b, vec![minor, derived]);
				self.use_derived(goal, node, context)
			}
			Formula::Or(a, b) => self.or_elim(goal, derived, &a, &b, context),
			_ => Err(Failure::NoProof),
		}
	}

	fn or_elim(
		&mut self,
		goal: &Formula,
		major: ProofNode,
		a: &Formula,
		b: &Formula,
		context: &ProofContext,
	) -> Attempt {
		// a case whose disjunct is already assumed is the current goal again
		if context.contains(a) || context.contains(b) {
			return Err(Failure::NoProof);
		}
		let left_reference = self.fresh_reference();
		debug!(disjunction = %major.formula, reference = left_reference, "split left case");
		let left = self.prove_recurse(goal, &context.with(a, left_reference))?;
		let right_reference = self.fresh_reference();
		debug!(disjunction = %major.formula, reference = right_reference, "split right case");
		let right = self.prove_recurse(goal, &context.with(b, right_reference))?;
		Ok(ProofNode::or_elim(
			goal,
			major,
			(left, left_reference),
			(right, right_reference),
		))
	}
}
