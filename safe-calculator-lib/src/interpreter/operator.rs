use crate::interpreter::error::EvalError;
use crate::interpreter::number::Number;
use crate::interpreter::token::Token;
use std::fmt;
use std::fmt::Formatter;

/// A binary operator recognized by the grammar. Recognized is not permitted:
/// only operators listed in the allow-list can be evaluated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    FloorDivide,
    Exponentiate,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
}

/// An unary operator recognized by the grammar.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
    Identity,
    Invert,
}

/// Either kind of operator, used when reporting a rejected operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    Binary(BinaryOperator),
    Unary(UnaryOperator),
}

pub type BinaryFunction = fn(Number, Number) -> Result<Number, EvalError>;
pub type UnaryFunction = fn(Number) -> Result<Number, EvalError>;

/// Every binary operation that may be evaluated. Nothing outside this table is ever applied.
static ALLOWED_BINARY_OPERATIONS: &[(BinaryOperator, BinaryFunction)] = &[
    (BinaryOperator::Add, Number::plus),
    (BinaryOperator::Subtract, Number::minus),
    (BinaryOperator::Multiply, Number::times),
    (BinaryOperator::Divide, Number::divided_by),
    (BinaryOperator::Modulo, Number::modulo),
    (BinaryOperator::FloorDivide, Number::floor_divided_by),
    (BinaryOperator::Exponentiate, Number::raised_to),
];

/// Every unary operation that may be evaluated.
static ALLOWED_UNARY_OPERATIONS: &[(UnaryOperator, UnaryFunction)] = &[
    (UnaryOperator::Negate, Number::negated),
    (UnaryOperator::Identity, |a| Ok(a.identity())),
];

/// Looks up the function permitted for the given operator, if any.
pub fn allowed_binary(operator: BinaryOperator) -> Option<BinaryFunction> {
    ALLOWED_BINARY_OPERATIONS
        .iter()
        .find(|(allowed, _)| *allowed == operator)
        .map(|(_, function)| *function)
}

/// Looks up the function permitted for the given operator, if any.
pub fn allowed_unary(operator: UnaryOperator) -> Option<UnaryFunction> {
    ALLOWED_UNARY_OPERATIONS
        .iter()
        .find(|(allowed, _)| *allowed == operator)
        .map(|(_, function)| *function)
}

impl UnaryOperator {
    pub fn token(&self) -> Token {
        match self {
            UnaryOperator::Negate => Token::Dash,
            UnaryOperator::Identity => Token::Plus,
            UnaryOperator::Invert => Token::Tilde,
        }
    }

    /// Signs bind looser than `**` but tighter than every other binary operator.
    pub(crate) fn precedence(&self) -> u8 {
        3
    }
}

impl BinaryOperator {
    pub fn token(&self) -> Token {
        match self {
            BinaryOperator::Add => Token::Plus,
            BinaryOperator::Subtract => Token::Dash,
            BinaryOperator::Multiply => Token::Asterisk,
            BinaryOperator::Divide => Token::ForwardSlash,
            BinaryOperator::Modulo => Token::Percent,
            BinaryOperator::FloorDivide => Token::DoubleForwardSlash,
            BinaryOperator::Exponentiate => Token::DoubleAsterisk,
            BinaryOperator::BitwiseAnd => Token::Ampersand,
            BinaryOperator::BitwiseOr => Token::Pipe,
            BinaryOperator::BitwiseXor => Token::Caret,
        }
    }

    pub(crate) fn associativity(&self) -> Associativity {
        match self {
            BinaryOperator::Exponentiate => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    pub(crate) fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::BitwiseAnd | BinaryOperator::BitwiseOr | BinaryOperator::BitwiseXor => 0,
            BinaryOperator::Add | BinaryOperator::Subtract => 1,
            BinaryOperator::Multiply
            | BinaryOperator::Divide
            | BinaryOperator::Modulo
            | BinaryOperator::FloorDivide => 2,
            BinaryOperator::Exponentiate => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Binary(operator) => write!(f, "{}", operator),
            Operation::Unary(operator) => write!(f, "unary {}", operator),
        }
    }
}
