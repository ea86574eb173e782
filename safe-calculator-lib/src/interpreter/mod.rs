pub mod error;
pub mod evaluator;
pub mod format;
pub mod lexer;
pub mod number;
pub mod operator;
pub mod parser;
pub mod syntax;
pub mod token;

pub use error::{CalculatorError, ErrorKind, EvalError, ParseError};
pub use evaluator::evaluate;
pub use number::Number;
pub use parser::parse;

use crate::interpreter::format::format_number;
use crate::interpreter::token::Token;
use anyhow::{Context, Result};
use log::debug;
use string_builder::Builder;

/// What a display shows in place of a result when evaluation fails.
pub const ERROR_PLACEHOLDER: &str = "Erro";

/// Evaluates the given expression and formats its value for display.
///
/// This is the boundary a user interface talks to: the result is either the formatted
/// number or a human-readable description of what went wrong.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
///
/// returns: The formatted result, or an error message.
///
/// # Examples
///
/// ```
/// use safe_calculator::interpreter::evaluate_expression;
///
/// assert_eq!(evaluate_expression("4 / 2"), Ok("2".to_string()));
/// assert_eq!(evaluate_expression("5 / 0"), Err("division by zero".to_string()));
/// ```
pub fn evaluate_expression(expression: &str) -> std::result::Result<String, String> {
    parse_eval(expression).map_err(|error| error.to_string())
}

/// Parses and evaluates the given expression, keeping the error structured.
///
/// # Examples
///
/// ```
/// use safe_calculator::interpreter::{parse_eval, ErrorKind};
///
/// assert_eq!(parse_eval("-2**2").unwrap(), "-4");
/// assert_eq!(parse_eval("   ").unwrap_err().kind(), ErrorKind::EmptyExpression);
/// ```
pub fn parse_eval(expression: &str) -> std::result::Result<String, CalculatorError> {
    let tree = parse(expression)?;
    debug!("parsed {:?} into\n{}", expression, tree);
    let value = evaluate(&tree)?;
    debug!("{:?} evaluated to {:?}", expression, value);
    Ok(format_number(value))
}

/// Pretty-prints the given vector of tokens with added whitespace.
///
/// # Arguments
///
/// * `tokens`: The tokens to print.
///
/// returns: A pretty-printed text-version of the given tokens.
///
/// # Examples
///
/// ```
/// use safe_calculator::interpreter::{parse, tokens_to_string};
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tree = parse("((1)+(2*3))")?;
/// let pretty_printed_tokens = tokens_to_string(tree.to_infix())?;
/// assert_eq!(pretty_printed_tokens, "1 + 2 * 3");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokens_to_string(tokens: Vec<Token>) -> Result<String> {
    let mut builder = Builder::new(tokens.len());
    let mut previous: Option<Token> = None;

    for token in tokens {
        let is_sign = token.as_unary_operator().is_some()
            && previous.as_ref().map_or(true, Token::expects_operand);
        match &token {
            _ if is_sign => builder.append(token.to_string()),
            Token::DoubleAsterisk => builder.append(token.to_string()),
            Token::Plus
            | Token::Dash
            | Token::Asterisk
            | Token::ForwardSlash
            | Token::DoubleForwardSlash
            | Token::Percent
            | Token::Caret
            | Token::Ampersand
            | Token::Pipe => {
                builder.append(" ");
                builder.append(token.to_string());
                builder.append(" ");
            }
            Token::End => {}
            _ => builder.append(token.to_string()),
        }
        previous = Some(token);
    }

    builder.string().context("Failed to build token string")
}

#[cfg(test)]
mod interpreter_tests {
    use super::*;
    use parameterized_macro::parameterized;

    fn regenerate(expression: &str) -> String {
        let tree = parse(expression).unwrap();
        tokens_to_string(tree.to_infix()).unwrap()
    }

    #[test]
    fn simple_expression_regenerates_to_itself() {
        let expression = "1 + 2";

        assert_eq!(regenerate(expression), expression)
    }

    #[test]
    fn complex_expression_regenerates_to_itself() {
        let expression = "1 + 2 * (3 - 4) / 5**2";

        assert_eq!(regenerate(expression), expression)
    }

    #[test]
    fn redundant_parentheses_are_stripped_when_regenerating() {
        let redundant_expression = "1 + ((2) * ((3 - 4)) / (5**2))";
        let expected_expression = "1 + 2 * (3 - 4) / 5**2";

        assert_eq!(regenerate(redundant_expression), expected_expression)
    }

    #[parameterized(
    expression = { "-2**2", "(-2)**2", "2**-1", "1 - -2", "-(1 + 2)", "2.5 // .5" },
    expected = { "-2**2", "(-2)**2", "2**-1", "1 - -2", "-(1 + 2)", "2.5 // 0.5" }
    )]
    fn signs_regenerate_without_spacing(expression: &str, expected: &str) {
        assert_eq!(regenerate(expression), expected);
    }

    #[parameterized(
    expression = {
    "2+3*4",
    "(2+3)*4",
    "-2**2",
    "4/2",
    "5/2",
    "2 ** 3 ** 2",
    "-7 // 2",
    "-7 % 2",
    "7 % -2",
    "2 ** -1",
    "0.1 + 0.2",
    "1.5 * 2",
    "--3",
    },
    expected_result = {
    "14",
    "20",
    "-4",
    "2",
    "2.5",
    "512",
    "-4",
    "1",
    "-1",
    "0.5",
    "0.30000000000000004",
    "3",
    "3",
    }
    )]
    fn parse_eval_returns_formatted_result(expression: &str, expected_result: &str) {
        assert_eq!(parse_eval(expression).unwrap(), expected_result);
    }

    #[parameterized(
    expression = { "", "   ", "5/0", "5%0", "5//0", "2 ^ 3", "~1", "abs(2)", "(-8) ** 0.5", "(2" },
    expected_kind = {
    ErrorKind::EmptyExpression,
    ErrorKind::EmptyExpression,
    ErrorKind::DivisionByZero,
    ErrorKind::DivisionByZero,
    ErrorKind::DivisionByZero,
    ErrorKind::DisallowedOperation,
    ErrorKind::DisallowedOperation,
    ErrorKind::SyntaxError,
    ErrorKind::NonRealResult,
    ErrorKind::SyntaxError,
    }
    )]
    fn parse_eval_returns_error_kind(expression: &str, expected_kind: ErrorKind) {
        assert_eq!(parse_eval(expression).unwrap_err().kind(), expected_kind);
    }

    #[test]
    fn evaluate_expression_reports_error_message() {
        assert_eq!(
            evaluate_expression("2 +"),
            Err("syntax error at position 3: expected an operand, found end of expression".into())
        );
    }
}
