use crate::interpreter::number::Number;
use crate::interpreter::operator::{BinaryOperator, UnaryOperator};
use std::fmt;
use std::fmt::Formatter;
use std::str;

/// A discrete part of an expression
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(Number),
    Identifier(String),
    Plus,
    Dash,
    Asterisk,
    DoubleAsterisk,
    ForwardSlash,
    DoubleForwardSlash,
    Percent,
    Caret,
    Ampersand,
    Pipe,
    Tilde,
    LeftParentheses,
    RightParentheses,
    End,
}

/// Characters that start a symbol token.
pub static SYMBOLS: [char; 11] = ['+', '-', '*', '/', '%', '^', '&', '|', '~', '(', ')'];

/// A token together with the character offset it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub value: T,
    pub position: usize,
}

impl<T> Spanned<T> {
    pub fn new(value: T, position: usize) -> Spanned<T> {
        Spanned { value, position }
    }
}

impl Token {
    /// Operators on the loosest level, which share one precedence.
    pub(crate) fn as_bitwise_operator(&self) -> Option<BinaryOperator> {
        match self {
            Token::Ampersand => Some(BinaryOperator::BitwiseAnd),
            Token::Pipe => Some(BinaryOperator::BitwiseOr),
            Token::Caret => Some(BinaryOperator::BitwiseXor),
            _ => None,
        }
    }

    pub(crate) fn as_additive_operator(&self) -> Option<BinaryOperator> {
        match self {
            Token::Plus => Some(BinaryOperator::Add),
            Token::Dash => Some(BinaryOperator::Subtract),
            _ => None,
        }
    }

    pub(crate) fn as_multiplicative_operator(&self) -> Option<BinaryOperator> {
        match self {
            Token::Asterisk => Some(BinaryOperator::Multiply),
            Token::ForwardSlash => Some(BinaryOperator::Divide),
            Token::Percent => Some(BinaryOperator::Modulo),
            Token::DoubleForwardSlash => Some(BinaryOperator::FloorDivide),
            _ => None,
        }
    }

    pub(crate) fn as_unary_operator(&self) -> Option<UnaryOperator> {
        match self {
            Token::Plus => Some(UnaryOperator::Identity),
            Token::Dash => Some(UnaryOperator::Negate),
            Token::Tilde => Some(UnaryOperator::Invert),
            _ => None,
        }
    }

    /// Whether a following sign token should be read as unary.
    pub(crate) fn expects_operand(&self) -> bool {
        !matches!(
            self,
            Token::Number(_) | Token::Identifier(_) | Token::RightParentheses
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", value),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Plus => write!(f, "+"),
            Token::Dash => write!(f, "-"),
            Token::Asterisk => write!(f, "*"),
            Token::DoubleAsterisk => write!(f, "**"),
            Token::ForwardSlash => write!(f, "/"),
            Token::DoubleForwardSlash => write!(f, "//"),
            Token::Percent => write!(f, "%"),
            Token::Caret => write!(f, "^"),
            Token::Ampersand => write!(f, "&"),
            Token::Pipe => write!(f, "|"),
            Token::Tilde => write!(f, "~"),
            Token::LeftParentheses => write!(f, "("),
            Token::RightParentheses => write!(f, ")"),
            Token::End => write!(f, "end of expression"),
        }
    }
}

/// Parses symbol tokens only. Numbers and names are recognized by the lexer.
impl str::FromStr for Token {
    type Err = ();

    fn from_str(input: &str) -> Result<Token, Self::Err> {
        match input {
            "+" => Ok(Token::Plus),
            "-" => Ok(Token::Dash),
            "*" => Ok(Token::Asterisk),
            "**" => Ok(Token::DoubleAsterisk),
            "/" => Ok(Token::ForwardSlash),
            "//" => Ok(Token::DoubleForwardSlash),
            "%" => Ok(Token::Percent),
            "^" => Ok(Token::Caret),
            "&" => Ok(Token::Ampersand),
            "|" => Ok(Token::Pipe),
            "~" => Ok(Token::Tilde),
            "(" => Ok(Token::LeftParentheses),
            ")" => Ok(Token::RightParentheses),
            _ => Err(()),
        }
    }
}
