use std::collections::BTreeSet;
use std::fmt;

/// A propositional formula. Equality is structural.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Formula {
	Atom(String),
	Not(Box<Formula>),
	And(Box<Formula>, Box<Formula>),
	Or(Box<Formula>, Box<Formula>),
	To(Box<Formula>, Box<Formula>),
}

/// Connective spellings used when writing a formula out.
struct Symbols {
	not: &'static str,
	and: &'static str,
	or: &'static str,
	to: &'static str,
}

const PLAIN: Symbols = Symbols {
	not: "¬",
	and: " ∧ ",
	or: " ∨ ",
	to: " → ",
};

const TEX: Symbols = Symbols {
	not: "\\lnot ",
	and: " \\land ",
	or: " \\lor ",
	to: " \\to ",
};

impl Formula {
	pub fn atom(name: &str) -> Formula {
		Formula::Atom(name.to_owned())
	}

	pub fn not(a: Formula) -> Formula {
		Formula::Not(Box::new(a))
	}

	pub fn and(a: Formula, b: Formula) -> Formula {
		Formula::And(Box::new(a), Box::new(b))
	}

	pub fn or(a: Formula, b: Formula) -> Formula {
		Formula::Or(Box::new(a), Box::new(b))
	}

	pub fn to(a: Formula, b: Formula) -> Formula {
		Formula::To(Box::new(a), Box::new(b))
	}

	/// Atom names in sorted order.
	pub fn atoms(&self) -> BTreeSet<&str> {
		let mut result = BTreeSet::new();
		self.collect_atoms(&mut result);
		result
	}

	fn collect_atoms<'a>(&'a self, result: &mut BTreeSet<&'a str>) {
		match self {
			Formula::Atom(name) => {
				result.insert(name.as_str());
			}
			Formula::Not(a) => a.collect_atoms(result),
			Formula::And(a, b) | Formula::Or(a, b) | Formula::To(a, b) => {
				a.collect_atoms(result);
				b.collect_atoms(result);
			}
		}
	}

	/// Binds tighter than any binary connective, so never needs parentheses
	/// as an operand of ¬, ∧ or ∨.
	fn is_low(&self) -> bool {
		matches!(self, Formula::Atom(_) | Formula::Not(_))
	}

	pub fn to_tex(&self) -> String {
		let mut result = String::new();
		self.write_recurse(&mut result, &TEX);
		result
	}

	fn write_operand(&self, out: &mut String, symbols: &Symbols, bare: bool) {
		if bare {
			self.write_recurse(out, symbols);
		} else {
			out.push('(');
			self.write_recurse(out, symbols);
			out.push(')');
		}
	}

	fn write_recurse(&self, out: &mut String, symbols: &Symbols) {
		match self {
			Formula::Atom(name) => out.push_str(name),
			Formula::Not(a) => {
				out.push_str(symbols.not);
				a.write_operand(out, symbols, a.is_low());
			}
			Formula::And(a, b) => {
				a.write_operand(out, symbols, a.is_low());
				out.push_str(symbols.and);
				b.write_operand(out, symbols, b.is_low());
			}
			Formula::Or(a, b) => {
				a.write_operand(out, symbols, a.is_low());
				out.push_str(symbols.or);
				b.write_operand(out, symbols, b.is_low());
			}
			Formula::To(a, b) => {
				a.write_operand(out, symbols, !matches!(**a, Formula::To(_, _)));
				out.push_str(symbols.to);
				b.write_operand(out, symbols, !matches!(**b, Formula::To(_, _)));
			}
		}
	}
}

impl fmt::Display for Formula {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let mut result = String::new();
		self.write_recurse(&mut result, &PLAIN);
		f.write_str(&result)
	}
}
