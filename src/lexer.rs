use crate::error::{ParseError, ParseErrorKind};
use plex::lexer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
	Ident(String),
	LeftParenthesis,
	RightParenthesis,
	Not,
	And,
	Or,
	To,
	Whitespace,
	Unknown(String),
}

/// A token together with the byte offset and the text it was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lexeme {
	pub token: Token,
	pub position: usize,
	pub text: String,
}

// keywords are listed before identifiers so they win equal-length matches
lexer! {
	fn next_token(text: 'a) -> Token;

	r#"[ \t\r\n]+"# => Token::Whitespace,
	r#"[Nn][Oo][Tt]"# => Token::Not,
	r#"\\lnot"# => Token::Not,
	r#"¬"# => Token::Not,
	r#"[Aa][Nn][Dd]"# => Token::And,
	r#"\\land"# => Token::And,
	r#"∧"# => Token::And,
	r#"[Oo][Rr]"# => Token::Or,
	r#"\\lor"# => Token::Or,
	r#"∨"# => Token::Or,
	r#"[Tt][Oo]"# => Token::To,
	r#"\\to"# => Token::To,
	r#"→"# => Token::To,
	r#"[A-Za-z][A-Za-z0-9_']*"# => Token::Ident(text.to_owned()),
	r#"\("# => Token::LeftParenthesis,
	r#"\)"# => Token::RightParenthesis,
	r#"."# => Token::Unknown(text.to_owned()),
}

/// Splits `string` into lexemes, dropping whitespace.
pub fn tokenize(string: &str) -> Result<Vec<Lexeme>, ParseError> {
	let mut result = Vec::new();
	let mut remaining = string;
	while let Some((token, new_remaining)) = next_token(remaining) {
		let position = string.len() - remaining.len();
		let text = &remaining[..remaining.len() - new_remaining.len()];
		match token {
			Token::Whitespace => {}
			Token::Unknown(fragment) => {
				return Err(ParseError::new(
					ParseErrorKind::UnknownToken,
					position,
					fragment,
				));
			}
			token => result.push(Lexeme {
				token,
				position,
				text: text.to_owned(),
			}),
		}
		remaining = new_remaining;
	}
	// the catch-all rule consumes any character, so leftover input means the
	// lexer stopped on something it could not decode
	if !remaining.is_empty() {
		let position = string.len() - remaining.len();
		let fragment: String = remaining.chars().take(1).collect();
		return Err(ParseError::new(
			ParseErrorKind::UnknownToken,
			position,
			fragment,
		));
	}
	Ok(result)
}

#[cfg(test)]
mod test {
	use super::*;

	fn tokens(string: &str) -> Vec<Token> {
		tokenize(string)
			.unwrap()
			.into_iter()
			.map(|lexeme| lexeme.token)
			.collect()
	}

	#[test]
	fn test_keyword_spellings() {
		let expected = vec![
			Token::Not,
			Token::Ident("A".to_owned()),
			Token::And,
			Token::Ident("B".to_owned()),
			Token::Or,
			Token::Ident("C".to_owned()),
			Token::To,
			Token::Ident("D".to_owned()),
		];
		assert_eq!(tokens("not A and B or C to D"), expected);
		assert_eq!(tokens("\\lnot A \\land B \\lor C \\to D"), expected);
		assert_eq!(tokens("¬A ∧ B ∨ C → D"), expected);
		assert_eq!(tokens("NOT A And B OR C To D"), expected);
	}

	#[test]
	fn test_keyword_prefix_is_identifier() {
		assert_eq!(
			tokens("nota tokens"),
			vec![
				Token::Ident("nota".to_owned()),
				Token::Ident("tokens".to_owned())
			]
		);
	}

	#[test]
	fn test_tex_macro_without_space() {
		assert_eq!(
			tokens("\\lnot(A)"),
			vec![
				Token::Not,
				Token::LeftParenthesis,
				Token::Ident("A".to_owned()),
				Token::RightParenthesis
			]
		);
	}

	#[test]
	fn test_positions() {
		let lexemes = tokenize("  (A\t→ B)").unwrap();
		let positions: Vec<usize> = lexemes.iter().map(|lexeme| lexeme.position).collect();
		assert_eq!(positions, vec![2, 3, 5, 9, 10]);
		assert_eq!(lexemes[2].text, "→");
	}

	#[test]
	fn test_unknown_token() {
		let e = tokenize("A & B").unwrap_err();
		assert_eq!(e.kind, ParseErrorKind::UnknownToken);
		assert_eq!(e.position, 2);
		assert_eq!(e.fragment, "&");
	}
}
