//! Text output for proof trees.

use crate::proof_tree::{ProofNode, Rule};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notation {
	/// Indented tree with `+`/`|` branches and reference numbers
	Plain,
	/// `bussproofs` inference tree
	TeX,
}

pub fn render(node: &ProofNode, notation: Notation) -> String {
	let mut tree = String::new();
	match notation {
		Notation::Plain => print(node, &mut tree, ""),
		Notation::TeX => {
			tree.push_str("\\begin{prooftree}\n");
			print_tex(node, &mut tree, 0);
			tree.push_str("\\end{prooftree}\n");
		}
	}
	tree
}

fn marker(node: &ProofNode) -> String {
	if let Some(reference) = node.reference {
		return format!(" from: {}", reference);
	}
	if node.discharges.is_empty() {
		return String::new();
	}
	let numbers: Vec<String> = node.discharges.iter().map(usize::to_string).collect();
	format!(" : {}", numbers.join(", "))
}

// `indent` is the prefix for lines below this node's own line; the caller has
// already written the branch marker in front of it.
fn print(node: &ProofNode, tree: &mut String, indent: &str) {
	tree.push_str(&format!("{}{}\n", node.formula, marker(node)));
	let last = node.premises.len().saturating_sub(1);
	for (i, premise) in node.premises.iter().enumerate() {
		tree.push_str(indent);
		tree.push_str("+ ");
		let bar = if i == last { "  " } else { "| " };
		print(premise, tree, &format!("{}{}", indent, bar));
	}
}

fn label(rule: Rule) -> &'static str {
	match rule {
		Rule::Assumption => "",
		Rule::AndIntro => "$\\land$I",
		Rule::AndElimLeft | Rule::AndElimRight => "$\\land$E",
		Rule::OrIntroLeft | Rule::OrIntroRight => "$\\lor$I",
		Rule::OrElim => "$\\lor$E",
		Rule::ToIntro => "$\\to$I",
		Rule::ToElim => "$\\to$E",
	}
}

fn print_tex(node: &ProofNode, tree: &mut String, depth: usize) {
	let indent = "  ".repeat(depth);
	for premise in &node.premises {
		print_tex(premise, tree, depth + 1);
	}
	let conclusion = node.formula.to_tex();
	if node.is_leaf() {
		tree.push_str(&format!("{}\\AxiomC{{${}$}}\n", indent, conclusion));
		return;
	}
	let inference = match node.premises.len() {
		1 => "UnaryInfC",
		2 => "BinaryInfC",
		_ => "TrinaryInfC",
	};
	tree.push_str(&format!(
		"{}\\RightLabel{{\\scriptsize {}}}\n",
		indent,
		label(node.rule)
	));
	tree.push_str(&format!("{}\\{}{{${}$}}\n", indent, inference, conclusion));
}

impl fmt::Display for ProofNode {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&render(self, Notation::Plain))
	}
}
