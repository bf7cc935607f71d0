use crate::interpreter::error::ParseError;
use crate::interpreter::syntax::expression_tree::{ExpressionTree, Node};
use crate::interpreter::Interpreter;
use log::trace;

/// Wraps an interpreter so that its parse trees are constant-folded before being frozen.
#[derive(Debug, Default, Clone, Copy)]
pub struct Optimizing<I> {
    inner: I,
}

impl<I: Interpreter> Optimizing<I> {
    pub fn new(inner: I) -> Optimizing<I> {
        Optimizing { inner }
    }
}

impl<I: Interpreter> Interpreter for Optimizing<I> {
    fn build_parse_tree(&self, input: &str) -> Result<Node, ParseError> {
        self.inner.build_parse_tree(input)
    }

    fn optimize_parse_tree(&self, parse_tree: Node) -> Node {
        fold_constants(self.inner.optimize_parse_tree(parse_tree))
    }

    fn build_expression_tree(&self, parse_tree: Node) -> ExpressionTree {
        self.inner.build_expression_tree(parse_tree)
    }
}

/// Replaces every subtree made only of literals with its value.
///
/// **NOTE:**
/// Variables are never substituted, and an operation that cannot be computed (division by
/// zero, overflow) is left as it is so that evaluating the tree reports the problem.
///
/// # Arguments
///
/// * `node`: A valid parse tree.
///
/// returns: An equivalent tree with folded constants.
///
/// # Examples
///
/// ```
/// use expression_tree::interpreter::optimizer::fold_constants;
/// use expression_tree::interpreter::syntax::expression_tree::Node;
///
/// let tree = Node::new_binary_addition(
///     Node::new_identifier("x".to_string()),
///     Node::new_binary_multiplication(Node::new_literal_integer(2), Node::new_literal_integer(3)),
/// );
///
/// let folded = fold_constants(tree);
///
/// assert_eq!(
///     folded,
///     Node::new_binary_addition(Node::new_identifier("x".to_string()), Node::new_literal_integer(6))
/// );
/// ```
pub fn fold_constants(node: Node) -> Node {
    match node {
        Node::LiteralInteger(_) | Node::Identifier(_) => node,
        Node::BinaryOperation {
            operator,
            left_operand,
            right_operand,
        } => {
            let left = fold_constants(*left_operand);
            let right = fold_constants(*right_operand);
            let folded = match (literal_value(&left), literal_value(&right)) {
                (Some(a), Some(b)) => operator.evaluate(a, b).ok().and_then(literal),
                _ => None,
            };
            folded.unwrap_or_else(|| Node::new_binary_operation(operator, left, right))
        }
        Node::UnaryOperation { operator, operand } => {
            let operand = fold_constants(*operand);
            // A negated literal is already as small as it gets.
            if operand.is_value() {
                return Node::UnaryOperation {
                    operator,
                    operand: Box::new(operand),
                };
            }
            let folded = literal_value(&operand)
                .and_then(|value| operator.evaluate(value).ok())
                .and_then(literal);
            folded.unwrap_or_else(|| Node::UnaryOperation {
                operator,
                operand: Box::new(operand),
            })
        }
    }
}

/// The value of a literal, or of a negated literal.
fn literal_value(node: &Node) -> Option<i32> {
    match node {
        Node::LiteralInteger(value) => Some(*value),
        Node::UnaryOperation { operator, operand } => match operand.as_ref() {
            Node::LiteralInteger(value) => operator.evaluate(*value).ok(),
            _ => None,
        },
        _ => None,
    }
}

/// Builds the node for a computed value. Literals are never negative, so negative values
/// become a negated literal.
fn literal(value: i32) -> Option<Node> {
    trace!("Folded constant {}", value);
    if value >= 0 {
        Some(Node::new_literal_integer(value))
    } else {
        value
            .checked_abs()
            .map(|magnitude| Node::new_negation(Node::new_literal_integer(magnitude)))
    }
}
