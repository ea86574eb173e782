use crate::interpreter::error::ParseError;
use crate::interpreter::number::Number;
use crate::interpreter::token::{Spanned, Token, SYMBOLS};
use itertools::Itertools;
use log::trace;
use std::iter::{Enumerate, Peekable};
use std::str::Chars;

type Characters<'a> = Peekable<Enumerate<Chars<'a>>>;

/// Splits the given expression into tokens, each tagged with its character offset.
/// The returned tokens always end with [`Token::End`].
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The tokens of the expression, in the order they appear.
///
/// # Examples
///
/// ```
/// use safe_calculator::interpreter::lexer::tokenize;
/// use safe_calculator::interpreter::token::Token;
///
/// let tokens = tokenize("2 ** 8").unwrap();
/// assert_eq!(tokens[1].value, Token::DoubleAsterisk);
/// assert_eq!(tokens[1].position, 2);
/// ```
pub fn tokenize(expression: &str) -> Result<Vec<Spanned<Token>>, ParseError> {
    let mut characters: Characters = expression.chars().enumerate().peekable();
    let mut tokens = Vec::new();

    while let Some(&(position, character)) = characters.peek() {
        let token = if character.is_whitespace() {
            characters.next();
            continue;
        } else if character.is_ascii_digit() || character == '.' {
            lex_number(&mut characters, position)?
        } else if character.is_ascii_alphabetic() || character == '_' {
            lex_identifier(&mut characters)
        } else if SYMBOLS.contains(&character) {
            characters.next();
            lex_symbol(&mut characters, character, position)?
        } else {
            return Err(ParseError::syntax(
                position,
                format!("unexpected character '{}'", character),
            ));
        };
        tokens.push(Spanned::new(token, position));
    }
    tokens.push(Spanned::new(Token::End, expression.chars().count()));

    trace!(
        "tokens: {}",
        tokens.iter().map(|token| &token.value).join(" ")
    );
    Ok(tokens)
}

fn take_digits(characters: &mut Characters) -> String {
    characters
        .peeking_take_while(|(_, character)| character.is_ascii_digit())
        .map(|(_, character)| character)
        .collect()
}

fn lex_number(characters: &mut Characters, position: usize) -> Result<Token, ParseError> {
    let mut text = take_digits(characters);
    let is_real = characters
        .next_if(|(_, character)| *character == '.')
        .is_some();
    if is_real {
        text.push('.');
        text.push_str(&take_digits(characters));
    }

    if let Some(&(after, '.')) = characters.peek() {
        return Err(ParseError::syntax(after, "malformed number"));
    }
    if text == "." {
        return Err(ParseError::syntax(position, "malformed number"));
    }

    let malformed = |_| ParseError::syntax(position, "malformed number");
    let value = if is_real {
        Number::Real(text.parse::<f64>().map_err(malformed)?)
    } else {
        let value = text
            .parse::<i64>()
            .map_err(|_| ParseError::syntax(position, "integer literal is too large"))?;
        Number::Integer(value)
    };
    Ok(Token::Number(value))
}

fn lex_identifier(characters: &mut Characters) -> Token {
    let name = characters
        .peeking_take_while(|(_, character)| character.is_ascii_alphanumeric() || *character == '_')
        .map(|(_, character)| character)
        .collect();
    Token::Identifier(name)
}

fn lex_symbol(
    characters: &mut Characters,
    first: char,
    position: usize,
) -> Result<Token, ParseError> {
    if let Some(&(_, second)) = characters.peek() {
        let pair: String = [first, second].iter().collect();
        if let Ok(token) = pair.parse::<Token>() {
            characters.next();
            return Ok(token);
        }
    }
    first
        .to_string()
        .parse::<Token>()
        .map_err(|_| ParseError::syntax(position, format!("unexpected character '{}'", first)))
}
