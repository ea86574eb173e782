use crate::interpreter::number::Number;
use crate::interpreter::operator::{BinaryOperator, UnaryOperator};
use crate::interpreter::syntax::expression_tree::Node;

/// If a method is not implemented, the default implementation will continue in a pre-order
/// traversal of the tree.
pub(crate) trait SyntaxVisitor: Sized {
    fn visit_literal(&mut self, _value: Number) {}
    fn visit_identifier(&mut self, _name: &str) {}
    fn visit_binary_operation(
        &mut self,
        _operation: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        walk_binary_operation(self, left_operand, right_operand)
    }
    fn visit_unary_operation(&mut self, _operation: &UnaryOperator, operand: &Node) {
        walk_unary_operation(self, operand)
    }
}

pub(crate) fn walk_binary_operation(
    visitor: &mut impl SyntaxVisitor,
    left_operand: &Node,
    right_operand: &Node,
) {
    left_operand.accept(visitor);
    right_operand.accept(visitor);
}

pub(crate) fn walk_unary_operation(visitor: &mut impl SyntaxVisitor, operand: &Node) {
    operand.accept(visitor);
}

/// Counts every node of a tree.
#[derive(Default)]
pub(crate) struct NodeCounter {
    pub(crate) count: usize,
}

impl SyntaxVisitor for NodeCounter {
    fn visit_literal(&mut self, _value: Number) {
        self.count += 1;
    }
    fn visit_identifier(&mut self, _name: &str) {
        self.count += 1;
    }
    fn visit_binary_operation(
        &mut self,
        _operation: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        self.count += 1;
        walk_binary_operation(self, left_operand, right_operand)
    }
    fn visit_unary_operation(&mut self, _operation: &UnaryOperator, operand: &Node) {
        self.count += 1;
        walk_unary_operation(self, operand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_complex_tree() -> Node {
        // 1 + -(2 + 3) * 4
        let sum = Node::new_binary_operation(
            BinaryOperator::Add,
            Node::new_literal(Number::Integer(2)),
            Node::new_literal(Number::Integer(3)),
        );
        let negation = Node::new_unary_operation(UnaryOperator::Negate, sum);
        let product = Node::new_binary_operation(
            BinaryOperator::Multiply,
            negation,
            Node::new_literal(Number::Integer(4)),
        );
        Node::new_binary_operation(
            BinaryOperator::Add,
            Node::new_literal(Number::Integer(1)),
            product,
        )
    }

    struct PrePostPrintVisitor {
        prints: Vec<String>,
    }

    impl SyntaxVisitor for PrePostPrintVisitor {
        fn visit_literal(&mut self, value: Number) {
            self.prints.push(format!("{}", value))
        }
        fn visit_identifier(&mut self, name: &str) {
            self.prints.push(name.to_string())
        }
        fn visit_binary_operation(
            &mut self,
            operation: &BinaryOperator,
            left_operand: &Node,
            right_operand: &Node,
        ) {
            self.prints.push(format!("{:?}", operation));
            walk_binary_operation(self, left_operand, right_operand);
            self.prints.push(format!("exit {:?}", operation));
        }
        fn visit_unary_operation(&mut self, operation: &UnaryOperator, operand: &Node) {
            self.prints.push(format!("{:?}", operation));
            walk_unary_operation(self, operand);
            self.prints.push(format!("exit {:?}", operation));
        }
    }

    #[test]
    fn walk_tree_prints_all_nodes_in_tree_in_pre_and_post_orders() {
        let root = create_complex_tree();
        println!("{}", root);
        let mut visitor = PrePostPrintVisitor { prints: vec![] };
        root.accept(&mut visitor);
        assert_eq!(
            visitor.prints,
            [
                "Add",
                "1",
                "Multiply",
                "Negate",
                "Add",
                "2",
                "3",
                "exit Add",
                "exit Negate",
                "4",
                "exit Multiply",
                "exit Add",
            ]
        )
    }

    #[test]
    fn node_counter_counts_operators_and_operands() {
        let root = create_complex_tree();
        let mut counter = NodeCounter::default();

        root.accept(&mut counter);

        assert_eq!(counter.count, 8);
    }
}
