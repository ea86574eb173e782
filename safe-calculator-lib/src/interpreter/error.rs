use crate::interpreter::operator::Operation;
use thiserror::Error;

/// Errors raised while turning source text into an expression tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty expression")]
    EmptyExpression,
    /// `position` is the 0-based character offset of the offending input.
    #[error("syntax error at position {position}: {reason}")]
    SyntaxError { position: usize, reason: String },
}

impl ParseError {
    pub(crate) fn syntax(position: usize, reason: impl Into<String>) -> ParseError {
        ParseError::SyntaxError {
            position,
            reason: reason.into(),
        }
    }
}

/// Errors raised while reducing an expression tree to a number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("operator not allowed: {kind}")]
    DisallowedOperation { kind: Operation },
    #[error("expression node not allowed: {kind}")]
    UnsupportedNode { kind: &'static str },
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is not a real number")]
    NonRealResult,
    #[error("numerical result out of range")]
    Overflow,
}

/// Any error that can occur between receiving source text and producing a result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// The kind of a [`CalculatorError`], without its details.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyExpression,
    SyntaxError,
    DisallowedOperation,
    UnsupportedNode,
    DivisionByZero,
    NonRealResult,
    Overflow,
}

impl CalculatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalculatorError::Parse(ParseError::EmptyExpression) => ErrorKind::EmptyExpression,
            CalculatorError::Parse(ParseError::SyntaxError { .. }) => ErrorKind::SyntaxError,
            CalculatorError::Eval(EvalError::DisallowedOperation { .. }) => {
                ErrorKind::DisallowedOperation
            }
            CalculatorError::Eval(EvalError::UnsupportedNode { .. }) => ErrorKind::UnsupportedNode,
            CalculatorError::Eval(EvalError::DivisionByZero) => ErrorKind::DivisionByZero,
            CalculatorError::Eval(EvalError::NonRealResult) => ErrorKind::NonRealResult,
            CalculatorError::Eval(EvalError::Overflow) => ErrorKind::Overflow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::operator::BinaryOperator;

    #[test]
    fn syntax_error_message_contains_position_and_reason() {
        let error = ParseError::syntax(3, "expected an operand");

        assert_eq!(
            error.to_string(),
            "syntax error at position 3: expected an operand"
        );
    }

    #[test]
    fn disallowed_operation_message_names_the_operator() {
        let error = EvalError::DisallowedOperation {
            kind: Operation::Binary(BinaryOperator::BitwiseXor),
        };

        assert_eq!(error.to_string(), "operator not allowed: ^");
    }

    #[test]
    fn wrapped_errors_keep_their_message_and_kind() {
        let error: CalculatorError = EvalError::DivisionByZero.into();

        assert_eq!(error.to_string(), "division by zero");
        assert_eq!(error.kind(), ErrorKind::DivisionByZero);
    }

    #[test]
    fn empty_expression_kind_is_reported() {
        let error: CalculatorError = ParseError::EmptyExpression.into();

        assert_eq!(error.kind(), ErrorKind::EmptyExpression);
    }
}
