use crate::interpreter::number::Number;
use crate::interpreter::operator::{Associativity, BinaryOperator, UnaryOperator};
use crate::interpreter::syntax::syntax_visitor::{
    walk_binary_operation, walk_unary_operation, NodeCounter, SyntaxVisitor,
};
use crate::interpreter::token::Token;
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Display, Formatter};

/// Precedence of nodes that never need parentheses.
const ATOM_PRECEDENCE: u8 = u8::MAX;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // Terminal symbols (leaves)
    Literal(Number),
    /// A name reference. The grammar never produces one, and evaluation rejects it.
    Identifier(String),
    // Non-terminal symbols (non-leaves)
    BinaryOperation {
        operator: BinaryOperator,
        left_operand: Box<Node>,
        right_operand: Box<Node>,
    },
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<Node>,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Node {
    pub fn new_literal(value: Number) -> Node {
        Node::Literal(value)
    }

    pub fn new_identifier(name: String) -> Node {
        Node::Identifier(name)
    }

    pub fn new_binary_operation(
        operator: BinaryOperator,
        left_operand: Node,
        right_operand: Node,
    ) -> Node {
        Node::BinaryOperation {
            operator,
            left_operand: Box::new(left_operand),
            right_operand: Box::new(right_operand),
        }
    }

    pub fn new_unary_operation(operator: UnaryOperator, operand: Node) -> Node {
        Node::UnaryOperation {
            operator,
            operand: Box::new(operand),
        }
    }

    /// A short name for the shape of this node, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Literal(_) => "literal",
            Node::Identifier(_) => "identifier",
            Node::BinaryOperation { .. } => "binary operation",
            Node::UnaryOperation { .. } => "unary operation",
        }
    }

    /// The number of nodes in this tree, including itself.
    pub fn size(&self) -> usize {
        let mut counter = NodeCounter::default();
        self.accept(&mut counter);
        counter.count
    }

    /// Calls the correct visitor method for the node variant on the given visitor.
    pub(crate) fn accept(&self, visitor: &mut impl SyntaxVisitor) {
        match self {
            Node::Literal(value) => visitor.visit_literal(*value),
            Node::Identifier(name) => visitor.visit_identifier(name),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => visitor.visit_binary_operation(operator, left_operand, right_operand),
            Node::UnaryOperation { operator, operand } => {
                visitor.visit_unary_operation(operator, operand)
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Node::Literal(value) if value.as_real().is_sign_negative() => {
                UnaryOperator::Negate.precedence()
            }
            Node::Literal(_) | Node::Identifier(_) => ATOM_PRECEDENCE,
            Node::BinaryOperation { operator, .. } => operator.precedence(),
            Node::UnaryOperation { operator, .. } => operator.precedence(),
        }
    }

    /// Regenerates infix tokens for this tree, with only the parentheses the grammar requires.
    pub fn to_infix(&self) -> Vec<Token> {
        match self {
            Node::Literal(value) => vec![Token::Number(*value)],
            Node::Identifier(name) => vec![Token::Identifier(name.to_string())],
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => {
                let mut tokens = Vec::new();
                let mut left_tokens = left_operand.to_infix();
                let mut right_tokens = right_operand.to_infix();

                parenthesize_if(
                    &mut tokens,
                    || needs_parentheses(operator, left_operand, Side::Left),
                    |tokens| tokens.append(&mut left_tokens),
                );
                tokens.push(operator.token());
                parenthesize_if(
                    &mut tokens,
                    || needs_parentheses(operator, right_operand, Side::Right),
                    |tokens| tokens.append(&mut right_tokens),
                );

                tokens
            }
            Node::UnaryOperation { operator, operand } => {
                let mut tokens = vec![operator.token()];
                let mut operand_tokens = operand.to_infix();

                parenthesize_if(
                    &mut tokens,
                    || operand.precedence() < operator.precedence(),
                    |tokens| tokens.append(&mut operand_tokens),
                );

                tokens
            }
        }
    }

    fn format_tree(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut visitor = TreeBuilderVisitor {
            builder: TreeBuilder::new("expression".into()),
        };
        self.accept(&mut visitor);

        let mut buffer: Vec<u8> = Vec::new();
        match write_tree(&visitor.builder.build(), &mut buffer) {
            Ok(_) => {}
            Err(_) => return Err(fmt::Error),
        }
        let text = match std::str::from_utf8(&buffer) {
            Ok(text) => text,
            Err(_) => return Err(fmt::Error),
        };
        f.write_str(text)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_tree(f)
    }
}

struct TreeBuilderVisitor {
    builder: TreeBuilder,
}

impl SyntaxVisitor for TreeBuilderVisitor {
    fn visit_literal(&mut self, value: Number) {
        self.builder.add_empty_child(format!("{}", value));
    }
    fn visit_identifier(&mut self, name: &str) {
        self.builder.add_empty_child(name.to_string());
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        self.builder.begin_child(format!("{}", operator));
        walk_binary_operation(self, left_operand, right_operand);
        self.builder.end_child();
    }
    fn visit_unary_operation(&mut self, operator: &UnaryOperator, operand: &Node) {
        self.builder.begin_child(format!("{}", operator));
        walk_unary_operation(self, operand);
        self.builder.end_child();
    }
}

/// Whether a child must be wrapped in parentheses to keep its place under the given operator.
fn needs_parentheses(parent_operator: &BinaryOperator, child: &Node, side: Side) -> bool {
    let child_precedence = child.precedence();
    let parent_precedence = parent_operator.precedence();

    if *parent_operator == BinaryOperator::Exponentiate {
        // The base binds tighter than a sign, while the exponent may itself be signed.
        return match side {
            Side::Left => child_precedence <= parent_precedence,
            Side::Right => child_precedence < UnaryOperator::Negate.precedence(),
        };
    }

    match (side, parent_operator.associativity()) {
        (Side::Left, Associativity::Left) | (Side::Right, Associativity::Right) => {
            child_precedence < parent_precedence
        }
        (Side::Left, Associativity::Right) | (Side::Right, Associativity::Left) => {
            child_precedence <= parent_precedence
        }
    }
}

fn parenthesize_if(
    tokens: &mut Vec<Token>,
    predicate: impl Fn() -> bool,
    mut build_interior: impl FnMut(&mut Vec<Token>),
) {
    let mut close_parentheses = false;

    if predicate() {
        tokens.push(Token::LeftParentheses);
        close_parentheses = true;
    }

    build_interior(tokens);

    if close_parentheses {
        tokens.push(Token::RightParentheses);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn integer(value: i64) -> Node {
        Node::new_literal(Number::Integer(value))
    }

    fn create_simple_tree() -> Node {
        Node::new_binary_operation(BinaryOperator::Add, integer(1), integer(2))
    }

    fn create_complex_tree() -> Node {
        // 1 + ((2 + 3) * 4)
        let second_plus = Node::new_binary_operation(BinaryOperator::Add, integer(2), integer(3));
        let star = Node::new_binary_operation(BinaryOperator::Multiply, second_plus, integer(4));
        Node::new_binary_operation(BinaryOperator::Add, integer(1), star)
    }

    #[test]
    fn print_succeeds() {
        let tree = create_complex_tree();

        let printed = format!("{}", tree);

        assert!(printed.contains("expression"));
        assert!(printed.contains('*'));
    }

    #[test]
    fn simple_tree_converts_back_to_simple_expression() {
        let expected_tokens = vec![
            Token::Number(Number::Integer(1)),
            Token::Plus,
            Token::Number(Number::Integer(2)),
        ];

        let actual_tokens = create_simple_tree().to_infix();

        assert_eq!(actual_tokens, expected_tokens);
    }

    #[test]
    fn complex_tree_converts_back_to_parenthesized_expression() {
        // 1 + (2 + 3) * 4
        let expected_tokens = vec![
            Token::Number(Number::Integer(1)),
            Token::Plus,
            Token::LeftParentheses,
            Token::Number(Number::Integer(2)),
            Token::Plus,
            Token::Number(Number::Integer(3)),
            Token::RightParentheses,
            Token::Asterisk,
            Token::Number(Number::Integer(4)),
        ];

        let actual_tokens = create_complex_tree().to_infix();

        assert_eq!(actual_tokens, expected_tokens);
    }

    #[test]
    fn right_operand_of_equal_precedence_keeps_parentheses() {
        // 8 - (4 - 2)
        let inner = Node::new_binary_operation(BinaryOperator::Subtract, integer(4), integer(2));
        let tree = Node::new_binary_operation(BinaryOperator::Subtract, integer(8), inner);

        let tokens = tree.to_infix();

        assert_eq!(tokens[2], Token::LeftParentheses);
        assert_eq!(tokens.last(), Some(&Token::RightParentheses));
    }

    #[test]
    fn negated_base_of_power_is_parenthesized() {
        // (-2) ** 2
        let base = Node::new_unary_operation(UnaryOperator::Negate, integer(2));
        let tree = Node::new_binary_operation(BinaryOperator::Exponentiate, base, integer(2));

        let expected_tokens = vec![
            Token::LeftParentheses,
            Token::Dash,
            Token::Number(Number::Integer(2)),
            Token::RightParentheses,
            Token::DoubleAsterisk,
            Token::Number(Number::Integer(2)),
        ];

        assert_eq!(tree.to_infix(), expected_tokens);
    }

    #[test]
    fn negated_exponent_is_not_parenthesized() {
        // 2 ** -1
        let exponent = Node::new_unary_operation(UnaryOperator::Negate, integer(1));
        let tree = Node::new_binary_operation(BinaryOperator::Exponentiate, integer(2), exponent);

        let expected_tokens = vec![
            Token::Number(Number::Integer(2)),
            Token::DoubleAsterisk,
            Token::Dash,
            Token::Number(Number::Integer(1)),
        ];

        assert_eq!(tree.to_infix(), expected_tokens);
    }

    #[test]
    fn size_counts_all_nodes() {
        assert_eq!(create_simple_tree().size(), 3);
        assert_eq!(create_complex_tree().size(), 7);
    }

    #[test]
    fn kind_name_describes_node_shape() {
        assert_eq!(integer(1).kind_name(), "literal");
        assert_eq!(Node::new_identifier("x".into()).kind_name(), "identifier");
        assert_eq!(create_simple_tree().kind_name(), "binary operation");
    }
}
