//! Precedence-climbing parser over the token stream.
//!
//! ```text
//! formula := impl
//! impl    := disj ( TO impl )?
//! disj    := conj ( OR conj )?
//! conj    := neg ( AND neg )?
//! neg     := NOT neg | atom | '(' formula ')'
//! ```
//!
//! `NOT` binds tightest, then `AND`, `OR`, `TO`. `TO` associates to the right.
//! A bare chain such as `A and B and C` is rejected instead of being given an
//! arbitrary grouping. Nesting is capped at [`MAX_NESTING`] so that every
//! later recursion over the formula stays shallow.

use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{tokenize, Lexeme, Token};
use crate::prop_tree::Formula;
use tracing::trace;

/// Deepest accepted nesting of `not`, right-hand `to` and parentheses.
pub const MAX_NESTING: usize = 512;

pub fn parse(string: &str) -> Result<Formula, ParseError> {
	let lexemes = tokenize(string)?;
	if lexemes.is_empty() {
		return Err(ParseError::new(ParseErrorKind::EmptyInput, 0, ""));
	}
	let mut parser = Parser {
		lexemes: &lexemes,
		pos: 0,
		end: string.len(),
		depth: 0,
		nesting: 0,
	};
	let formula = parser.implication()?;
	if let Some(lexeme) = parser.peek() {
		let kind = if lexeme.token == Token::RightParenthesis {
			ParseErrorKind::UnbalancedParenthesis
		} else {
			ParseErrorKind::TrailingInput
		};
		return Err(parser.error_at(kind, lexeme));
	}
	trace!(formula = %formula, "parsed");
	Ok(formula)
}

struct Parser<'l> {
	lexemes: &'l [Lexeme],
	pos: usize,
	end: usize,
	/// Open parentheses around the current position
	depth: usize,
	/// Recursive descents below the top-level formula
	nesting: usize,
}

impl<'l> Parser<'l> {
	fn peek(&self) -> Option<&'l Lexeme> {
		self.lexemes.get(self.pos)
	}

	fn peek_token(&self) -> Option<&'l Token> {
		self.peek().map(|lexeme| &lexeme.token)
	}

	fn advance(&mut self) -> Option<&'l Lexeme> {
		let lexeme = self.lexemes.get(self.pos);
		if lexeme.is_some() {
			self.pos += 1;
		}
		lexeme
	}

	fn error_at(&self, kind: ParseErrorKind, lexeme: &Lexeme) -> ParseError {
		ParseError::new(kind, lexeme.position, lexeme.text.clone())
	}

	fn enter(&mut self, lexeme: &Lexeme) -> Result<(), ParseError> {
		if self.nesting >= MAX_NESTING {
			return Err(self.error_at(ParseErrorKind::TooDeep, lexeme));
		}
		self.nesting += 1;
		Ok(())
	}

	fn error_at_end(&self) -> ParseError {
		let kind = if self.depth > 0 {
			ParseErrorKind::UnbalancedParenthesis
		} else {
			ParseErrorKind::UnexpectedEnd
		};
		ParseError::new(kind, self.end, "")
	}

	fn implication(&mut self) -> Result<Formula, ParseError> {
		let left = self.disjunction()?;
		match self.peek() {
			Some(lexeme) if lexeme.token == Token::To => {
				self.advance();
				self.enter(lexeme)?;
				let right = self.implication()?;
				self.nesting -= 1;
				Ok(Formula::to(left, right))
			}
			_ => Ok(left),
		}
	}

	fn disjunction(&mut self) -> Result<Formula, ParseError> {
		let left = self.conjunction()?;
		if self.peek_token() != Some(&Token::Or) {
			return Ok(left);
		}
		self.advance();
		let right = self.conjunction()?;
		self.reject_chain(&Token::Or)?;
		Ok(Formula::or(left, right))
	}

	fn conjunction(&mut self) -> Result<Formula, ParseError> {
		let left = self.negation()?;
		if self.peek_token() != Some(&Token::And) {
			return Ok(left);
		}
		self.advance();
		let right = self.negation()?;
		self.reject_chain(&Token::And)?;
		Ok(Formula::and(left, right))
	}

	fn reject_chain(&self, connective: &Token) -> Result<(), ParseError> {
		match self.peek() {
			Some(lexeme) if lexeme.token == *connective => {
				Err(self.error_at(ParseErrorKind::AmbiguousChain, lexeme))
			}
			_ => Ok(()),
		}
	}

	fn negation(&mut self) -> Result<Formula, ParseError> {
		let lexeme = match self.advance() {
			Some(lexeme) => lexeme,
			None => return Err(self.error_at_end()),
		};
		match &lexeme.token {
			Token::Not => {
				self.enter(lexeme)?;
				let inner = self.negation()?;
				self.nesting -= 1;
				Ok(Formula::not(inner))
			}
			Token::Ident(name) => Ok(Formula::atom(name)),
			Token::LeftParenthesis => {
				self.enter(lexeme)?;
				self.depth += 1;
				let inner = self.implication()?;
				match self.advance() {
					Some(close) if close.token == Token::RightParenthesis => {
						self.depth -= 1;
						self.nesting -= 1;
						Ok(inner)
					}
					Some(other) => Err(self.error_at(ParseErrorKind::UnexpectedToken, other)),
					None => Err(ParseError::new(
						ParseErrorKind::UnbalancedParenthesis,
						lexeme.position,
						lexeme.text.clone(),
					)),
				}
			}
			Token::RightParenthesis if self.depth == 0 => {
				Err(self.error_at(ParseErrorKind::UnbalancedParenthesis, lexeme))
			}
			_ => Err(self.error_at(ParseErrorKind::UnexpectedToken, lexeme)),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn a() -> Formula {
		Formula::atom("A")
	}

	fn b() -> Formula {
		Formula::atom("B")
	}

	fn c() -> Formula {
		Formula::atom("C")
	}

	fn kind(string: &str) -> ParseErrorKind {
		parse(string).unwrap_err().kind
	}

	#[test]
	fn test_atom_and_parentheses() {
		assert_eq!(parse("A").unwrap(), a());
		assert_eq!(parse("((A))").unwrap(), a());
		assert_eq!(parse("Rain").unwrap(), Formula::atom("Rain"));
	}

	#[test]
	fn test_precedence() {
		assert_eq!(
			parse("not A and B to (A to B)").unwrap(),
			parse("((not A) and B) to (A to B)").unwrap()
		);
		assert_eq!(
			parse("A and B or C").unwrap(),
			Formula::or(Formula::and(a(), b()), c())
		);
		assert_eq!(
			parse("A or B and C").unwrap(),
			Formula::or(a(), Formula::and(b(), c()))
		);
		assert_eq!(
			parse("not (A or B)").unwrap(),
			Formula::not(Formula::or(a(), b()))
		);
	}

	#[test]
	fn test_implication_is_right_associative() {
		assert_eq!(
			parse("A to B to C").unwrap(),
			Formula::to(a(), Formula::to(b(), c()))
		);
		assert_eq!(
			parse("(A to B) to C").unwrap(),
			Formula::to(Formula::to(a(), b()), c())
		);
	}

	#[test]
	fn test_worked_example() {
		assert_eq!(
			parse("((A or B) to C) to (A to C) and (B to C)").unwrap(),
			Formula::to(
				Formula::to(Formula::or(a(), b()), c()),
				Formula::and(Formula::to(a(), c()), Formula::to(b(), c())),
			)
		);
	}

	#[test]
	fn test_mixed_spellings() {
		assert_eq!(
			parse("\\lnot A and B \\to A ∨ B").unwrap(),
			Formula::to(Formula::and(Formula::not(a()), b()), Formula::or(a(), b()))
		);
	}

	#[test]
	fn test_double_negation() {
		assert_eq!(
			parse("A to not not A").unwrap(),
			Formula::to(a(), Formula::not(Formula::not(a())))
		);
	}

	#[test]
	fn test_ambiguous_chains_rejected() {
		assert!(parse("(A and B) and C").is_ok());
		assert!(parse("A and (B and C)").is_ok());
		let e = parse("A and B and C").unwrap_err();
		assert_eq!(e.kind, ParseErrorKind::AmbiguousChain);
		assert_eq!(e.position, 8);
		assert_eq!(e.fragment, "and");
		assert_eq!(kind("A or B or C"), ParseErrorKind::AmbiguousChain);
		assert_eq!(kind("A and B or C or D"), ParseErrorKind::AmbiguousChain);
	}

	#[test]
	fn test_malformed_input() {
		assert_eq!(kind(""), ParseErrorKind::EmptyInput);
		assert_eq!(kind("   "), ParseErrorKind::EmptyInput);
		assert_eq!(kind("(A and B"), ParseErrorKind::UnbalancedParenthesis);
		assert_eq!(kind("A and B)"), ParseErrorKind::UnbalancedParenthesis);
		assert_eq!(kind(")"), ParseErrorKind::UnbalancedParenthesis);
		assert_eq!(kind("A B"), ParseErrorKind::TrailingInput);
		assert_eq!(kind("A and"), ParseErrorKind::UnexpectedEnd);
		assert_eq!(kind("A and to B"), ParseErrorKind::UnexpectedToken);
		assert_eq!(kind("A % B"), ParseErrorKind::UnknownToken);
		assert_eq!(kind("(A B)"), ParseErrorKind::UnexpectedToken);
	}

	#[test]
	fn test_unclosed_parenthesis_points_at_opening() {
		let e = parse("A to (B or C").unwrap_err();
		assert_eq!(e.kind, ParseErrorKind::UnbalancedParenthesis);
		assert_eq!(e.position, 5);
		assert_eq!(e.fragment, "(");
	}

	#[test]
	fn test_nesting_is_capped() {
		let parens = format!("{}A{}", "(".repeat(100_000), ")".repeat(100_000));
		let e = parse(&parens).unwrap_err();
		assert_eq!(e.kind, ParseErrorKind::TooDeep);
		assert_eq!(e.position, MAX_NESTING);
		assert_eq!(e.fragment, "(");

		let negations = format!("{}A", "not ".repeat(200_000));
		assert_eq!(kind(&negations), ParseErrorKind::TooDeep);
		let implications = format!("{}A", "A to ".repeat(200_000));
		assert_eq!(kind(&implications), ParseErrorKind::TooDeep);
		assert_eq!(kind(&"(".repeat(100_000)), ParseErrorKind::TooDeep);
	}

	#[test]
	fn test_nesting_up_to_cap_is_accepted() {
		let parens = format!("{}A{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
		assert_eq!(parse(&parens).unwrap(), a());
		let negations = format!("{}A", "not ".repeat(MAX_NESTING));
		assert!(parse(&negations).is_ok());
	}

	#[test]
	fn test_rendered_formula_parses_back() {
		let f = parse("not (A and B) to (C to A) or not not B").unwrap();
		assert_eq!(parse(&f.to_string()).unwrap(), f);
		assert_eq!(parse(&f.to_tex()).unwrap(), f);
	}
}
