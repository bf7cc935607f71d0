use crate::interpreter::context::InterpreterContext;
use crate::interpreter::error::EvaluationError;
use crate::interpreter::syntax::expression_tree::Node;

/// Computes the value of a tree, looking variables up in the given context.
///
/// Operands are evaluated left before right, and the first error met is returned.
///
/// # Arguments
///
/// * `node`: The root of the tree to evaluate.
/// * `context`: The current variable bindings.
///
/// returns: The integer value of the tree.
///
/// # Examples
///
/// ```
/// use expression_tree::interpreter::context::InterpreterContext;
/// use expression_tree::interpreter::evaluator::evaluate;
/// use expression_tree::interpreter::syntax::expression_tree::Node;
///
/// let mut context = InterpreterContext::new();
/// context.set("x", 5);
/// let tree = Node::new_binary_addition(
///     Node::new_identifier("x".to_string()),
///     Node::new_literal_integer(1),
/// );
///
/// assert_eq!(evaluate(&tree, &context), Ok(6));
/// ```
pub fn evaluate(node: &Node, context: &InterpreterContext) -> Result<i32, EvaluationError> {
    match node {
        Node::LiteralInteger(value) => Ok(*value),
        Node::Identifier(name) => context.get(name),
        Node::BinaryOperation {
            operator,
            left_operand,
            right_operand,
        } => {
            let left = evaluate(left_operand, context)?;
            let right = evaluate(right_operand, context)?;
            operator.evaluate(left, right)
        }
        Node::UnaryOperation { operator, operand } => {
            operator.evaluate(evaluate(operand, context)?)
        }
    }
}
