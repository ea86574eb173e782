use crate::interpreter::error::EvalError;
use crate::interpreter::number::Number;
use crate::interpreter::operator::{allowed_binary, allowed_unary, Operation};
use crate::interpreter::syntax::expression_tree::Node;

/// Reduces the given expression tree to a number.
///
/// Every operator is looked up in the allow-list before it is applied, so a tree that contains
/// an operator outside of it is rejected even if the parser built it.
///
/// # Arguments
///
/// * `node`: The root of the expression tree to evaluate.
///
/// returns: The value of the expression.
///
/// # Examples
///
/// ```
/// use safe_calculator::interpreter::{evaluate, parse, Number};
///
/// let tree = parse("7 // 2").unwrap();
/// assert_eq!(evaluate(&tree), Ok(Number::Integer(3)));
/// ```
pub fn evaluate(node: &Node) -> Result<Number, EvalError> {
    match node {
        Node::Literal(value) => Ok(*value),
        Node::UnaryOperation { operator, operand } => {
            let operand = evaluate(operand)?;
            let function = allowed_unary(*operator).ok_or(EvalError::DisallowedOperation {
                kind: Operation::Unary(*operator),
            })?;
            function(operand)
        }
        Node::BinaryOperation {
            operator,
            left_operand,
            right_operand,
        } => {
            let left = evaluate(left_operand)?;
            let right = evaluate(right_operand)?;
            let function = allowed_binary(*operator).ok_or(EvalError::DisallowedOperation {
                kind: Operation::Binary(*operator),
            })?;
            function(left, right)
        }
        Node::Identifier(_) => Err(EvalError::UnsupportedNode {
            kind: node.kind_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::operator::{BinaryOperator, UnaryOperator};
    use parameterized_macro::parameterized;

    fn integer(value: i64) -> Node {
        Node::new_literal(Number::Integer(value))
    }

    #[test]
    fn literal_evaluates_to_itself() {
        assert_eq!(evaluate(&integer(42)), Ok(Number::Integer(42)));
    }

    #[parameterized(
    operator = {
    BinaryOperator::Add,
    BinaryOperator::Subtract,
    BinaryOperator::Multiply,
    BinaryOperator::Divide,
    BinaryOperator::Modulo,
    BinaryOperator::FloorDivide,
    BinaryOperator::Exponentiate,
    },
    expected = {
    Number::Integer(9),
    Number::Integer(5),
    Number::Integer(14),
    Number::Real(3.5),
    Number::Integer(1),
    Number::Integer(3),
    Number::Integer(49),
    }
    )]
    fn binary_operation_applies_allowed_function(operator: BinaryOperator, expected: Number) {
        let tree = Node::new_binary_operation(operator, integer(7), integer(2));

        assert_eq!(evaluate(&tree), Ok(expected));
    }

    #[test]
    fn nested_operations_are_reduced_bottom_up() {
        // -(1 + 2) * 4
        let sum = Node::new_binary_operation(BinaryOperator::Add, integer(1), integer(2));
        let negation = Node::new_unary_operation(UnaryOperator::Negate, sum);
        let tree = Node::new_binary_operation(BinaryOperator::Multiply, negation, integer(4));

        assert_eq!(evaluate(&tree), Ok(Number::Integer(-12)));
    }

    #[test]
    fn identity_keeps_value() {
        let tree = Node::new_unary_operation(UnaryOperator::Identity, integer(-3));

        assert_eq!(evaluate(&tree), Ok(Number::Integer(-3)));
    }

    #[test]
    fn bitwise_operator_is_disallowed() {
        let tree = Node::new_binary_operation(BinaryOperator::BitwiseAnd, integer(6), integer(3));

        assert_eq!(
            evaluate(&tree),
            Err(EvalError::DisallowedOperation {
                kind: Operation::Binary(BinaryOperator::BitwiseAnd)
            })
        );
    }

    #[test]
    fn inversion_is_disallowed() {
        let tree = Node::new_unary_operation(UnaryOperator::Invert, integer(1));

        assert_eq!(
            evaluate(&tree),
            Err(EvalError::DisallowedOperation {
                kind: Operation::Unary(UnaryOperator::Invert)
            })
        );
    }

    #[test]
    fn identifier_is_unsupported() {
        let tree = Node::new_binary_operation(
            BinaryOperator::Add,
            integer(1),
            Node::new_identifier("x".into()),
        );

        assert_eq!(
            evaluate(&tree),
            Err(EvalError::UnsupportedNode { kind: "identifier" })
        );
    }

    #[test]
    fn division_by_zero_propagates_from_subtree() {
        let quotient = Node::new_binary_operation(BinaryOperator::Divide, integer(5), integer(0));
        let tree = Node::new_binary_operation(BinaryOperator::Add, integer(1), quotient);

        assert_eq!(evaluate(&tree), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn overflow_propagates_from_subtree() {
        // 1 + 3 ** 40
        let power = Node::new_binary_operation(BinaryOperator::Exponentiate, integer(3), integer(40));
        let tree = Node::new_binary_operation(BinaryOperator::Add, integer(1), power);

        assert_eq!(evaluate(&tree), Err(EvalError::Overflow));
    }

    #[test]
    fn evaluating_twice_gives_same_result() {
        let tree = Node::new_binary_operation(BinaryOperator::Divide, integer(5), integer(2));

        assert_eq!(evaluate(&tree), evaluate(&tree));
    }
}
