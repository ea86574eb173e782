use crate::interpreter::error::ParseError;
use crate::interpreter::operator::{BinaryOperator, UnaryOperator};
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::{Spanned, Token};

/// Builds an expression tree from infix tokens.
///
/// Grammar, loosest binding first:
///
/// ```text
/// bitwise := sum (('|' | '^' | '&') sum)*
/// sum     := product (('+' | '-') product)*
/// product := factor (('*' | '/' | '%' | '//') factor)*
/// factor  := ('+' | '-' | '~') factor | power
/// power   := atom ('**' factor)?
/// atom    := NUMBER | '(' bitwise ')'
/// ```
pub(super) fn parse_tokens(tokens: Vec<Spanned<Token>>) -> Result<Node, ParseError> {
    let mut parser = RecursiveDescent::new(tokens);
    let tree = parser.parse_bitwise()?;
    parser.expect_end()?;
    Ok(tree.node)
}

/// Parentheses, signs and exponents may not nest deeper than this.
const MAX_NESTING: usize = 200;
/// No tree may be taller than this, which bounds every recursive walk over it.
const MAX_HEIGHT: usize = 1_000;

const NESTED_TOO_DEEPLY: &str = "expression is nested too deeply";

/// A parsed node together with the height of its tree.
struct Subtree {
    node: Node,
    height: usize,
}

impl Subtree {
    fn leaf(node: Node) -> Subtree {
        Subtree { node, height: 1 }
    }

    fn binary(
        operator: BinaryOperator,
        left_operand: Subtree,
        right_operand: Subtree,
        position: usize,
    ) -> Result<Subtree, ParseError> {
        let height = checked_height(left_operand.height.max(right_operand.height), position)?;
        Ok(Subtree {
            node: Node::new_binary_operation(operator, left_operand.node, right_operand.node),
            height,
        })
    }

    fn unary(
        operator: UnaryOperator,
        operand: Subtree,
        position: usize,
    ) -> Result<Subtree, ParseError> {
        let height = checked_height(operand.height, position)?;
        Ok(Subtree {
            node: Node::new_unary_operation(operator, operand.node),
            height,
        })
    }
}

/// The height of a node whose tallest child has the given height.
fn checked_height(child_height: usize, position: usize) -> Result<usize, ParseError> {
    let height = child_height + 1;
    if height > MAX_HEIGHT {
        return Err(ParseError::syntax(position, NESTED_TOO_DEEPLY));
    }
    Ok(height)
}

struct RecursiveDescent {
    tokens: Vec<Spanned<Token>>,
    next: usize,
    end: Spanned<Token>,
    nesting: usize,
}

impl RecursiveDescent {
    fn new(tokens: Vec<Spanned<Token>>) -> RecursiveDescent {
        let end_position = tokens.last().map_or(0, |token| token.position);
        RecursiveDescent {
            tokens,
            next: 0,
            end: Spanned::new(Token::End, end_position),
            nesting: 0,
        }
    }

    fn peek(&self) -> &Spanned<Token> {
        self.tokens.get(self.next).unwrap_or(&self.end)
    }

    fn advance(&mut self) -> Spanned<Token> {
        let token = self.peek().clone();
        if self.next < self.tokens.len() {
            self.next += 1;
        }
        token
    }

    /// Parses a left-associative chain of operands joined by the operators `operator_of` accepts.
    fn parse_left_associative(
        &mut self,
        operator_of: fn(&Token) -> Option<BinaryOperator>,
        parse_operand: fn(&mut Self) -> Result<Subtree, ParseError>,
    ) -> Result<Subtree, ParseError> {
        let mut left_operand = parse_operand(self)?;
        while let Some(operator) = operator_of(&self.peek().value) {
            let position = self.advance().position;
            let right_operand = parse_operand(self)?;
            left_operand = Subtree::binary(operator, left_operand, right_operand, position)?;
        }
        Ok(left_operand)
    }

    fn parse_bitwise(&mut self) -> Result<Subtree, ParseError> {
        self.parse_left_associative(Token::as_bitwise_operator, Self::parse_sum)
    }

    fn parse_sum(&mut self) -> Result<Subtree, ParseError> {
        self.parse_left_associative(Token::as_additive_operator, Self::parse_product)
    }

    fn parse_product(&mut self) -> Result<Subtree, ParseError> {
        self.parse_left_associative(Token::as_multiplicative_operator, Self::parse_factor)
    }

    /// Every recursive path of the grammar passes through here, so nesting is counted once.
    fn parse_factor(&mut self) -> Result<Subtree, ParseError> {
        if self.nesting == MAX_NESTING {
            return Err(ParseError::syntax(self.peek().position, NESTED_TOO_DEEPLY));
        }
        self.nesting += 1;
        let factor = self.parse_signed();
        self.nesting -= 1;
        factor
    }

    fn parse_signed(&mut self) -> Result<Subtree, ParseError> {
        if let Some(operator) = self.peek().value.as_unary_operator() {
            let position = self.advance().position;
            let operand = self.parse_factor()?;
            return Subtree::unary(operator, operand, position);
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> Result<Subtree, ParseError> {
        let base = self.parse_atom()?;
        if self.peek().value != Token::DoubleAsterisk {
            return Ok(base);
        }
        let position = self.advance().position;
        // Right-associative: the exponent is a whole factor, so `2 ** 3 ** 2` is `2 ** (3 ** 2)`.
        let exponent = self.parse_factor()?;
        Subtree::binary(BinaryOperator::Exponentiate, base, exponent, position)
    }

    fn parse_atom(&mut self) -> Result<Subtree, ParseError> {
        let Spanned { value, position } = self.advance();
        match value {
            Token::Number(number) => Ok(Subtree::leaf(Node::new_literal(number))),
            Token::LeftParentheses => {
                let inner = self.parse_bitwise()?;
                let closing = self.advance();
                match closing.value {
                    Token::RightParentheses => Ok(inner),
                    _ => Err(ParseError::syntax(closing.position, "expected ')'")),
                }
            }
            Token::Identifier(name) => Err(names_are_not_allowed(position, &name)),
            Token::End => Err(ParseError::syntax(
                position,
                "expected an operand, found end of expression",
            )),
            token => Err(ParseError::syntax(
                position,
                format!("expected an operand, found '{}'", token),
            )),
        }
    }

    fn expect_end(&self) -> Result<(), ParseError> {
        let Spanned { value, position } = self.peek();
        match value {
            Token::End => Ok(()),
            Token::Identifier(name) => Err(names_are_not_allowed(*position, name)),
            token => Err(ParseError::syntax(
                *position,
                format!("unexpected trailing token '{}'", token),
            )),
        }
    }
}

fn names_are_not_allowed(position: usize, name: &str) -> ParseError {
    ParseError::syntax(position, format!("names are not allowed: {}", name))
}
