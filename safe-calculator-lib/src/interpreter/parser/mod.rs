mod recursive_descent;

use crate::interpreter::error::ParseError;
use crate::interpreter::lexer;
use crate::interpreter::parser::recursive_descent::parse_tokens;
use crate::interpreter::syntax::expression_tree::Node;

/// Parses the given input string into an equivalent expression tree,
/// which is easier to evaluate than the original string.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The equivalent expression tree.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), safe_calculator::interpreter::ParseError> {
/// use safe_calculator::interpreter::parser::parse;
///
/// let tree = parse("(2 + 3) * 4")?;
/// assert_eq!(tree.size(), 5);
/// # Ok(()) }
/// ```
pub fn parse(expression: &str) -> Result<Node, ParseError> {
    if expression.trim().is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    let tokens = lexer::tokenize(expression)?;
    parse_tokens(tokens)
}
