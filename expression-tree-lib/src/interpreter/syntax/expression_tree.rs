use crate::interpreter::operator::{BinaryOperator, UnaryOperator};
use crate::interpreter::syntax::syntax_visitor::{
    walk_binary_operation, walk_unary_operation, SyntaxVisitor,
};
use crate::interpreter::token::Token;
use crate::interpreter::{tokens_to_string, Notation};
use ptree::{write_tree, TreeBuilder};
use std::collections::VecDeque;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use std::string::FromUtf8Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    // Terminal symbols (leaves)
    LiteralInteger(i32),
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

impl Node {
    pub fn new_literal_integer(value: i32) -> Node {
        Node::LiteralInteger(value)
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

    pub fn new_binary_addition(left_operand: Node, right_operand: Node) -> Node {
        Self::new_binary_operation(BinaryOperator::Add, left_operand, right_operand)
    }

    pub fn new_binary_subtraction(left_operand: Node, right_operand: Node) -> Node {
        Self::new_binary_operation(BinaryOperator::Subtract, left_operand, right_operand)
    }

    pub fn new_binary_multiplication(left_operand: Node, right_operand: Node) -> Node {
        Self::new_binary_operation(BinaryOperator::Multiply, left_operand, right_operand)
    }

    pub fn new_binary_division(left_operand: Node, right_operand: Node) -> Node {
        Self::new_binary_operation(BinaryOperator::Divide, left_operand, right_operand)
    }

    pub fn new_negation(operand: Node) -> Node {
        Node::UnaryOperation {
            operator: UnaryOperator::Negate,
            operand: Box::new(operand),
        }
    }

    pub fn as_binary_operator(&self) -> Option<BinaryOperator> {
        match self {
            Node::BinaryOperation { operator, .. } => Some(*operator),
            Node::LiteralInteger(_) | Node::Identifier(_) | Node::UnaryOperation { .. } => None,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Node::Identifier(_) | Node::LiteralInteger(_))
    }

    /// Calls the correct visitor method for the node variant on the given visitor.
    pub(crate) fn accept(&self, visitor: &mut impl SyntaxVisitor) {
        match self {
            Node::LiteralInteger(value) => visitor.visit_literal_integer(*value),
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

    fn children(&self) -> Vec<&Node> {
        match self {
            Node::LiteralInteger(_) | Node::Identifier(_) => vec![],
            Node::BinaryOperation {
                left_operand,
                right_operand,
                ..
            } => vec![&**left_operand, &**right_operand],
            Node::UnaryOperation { operand, .. } => vec![&**operand],
        }
    }

    fn own_token(&self) -> Token {
        match self {
            Node::LiteralInteger(value) => Token::LiteralInteger(*value),
            Node::Identifier(name) => Token::Identifier(name.to_string()),
            Node::BinaryOperation { operator, .. } => operator.token(),
            Node::UnaryOperation { operator, .. } => operator.token(),
        }
    }

    /// Writes the tree in the given notation as a sequence of tokens.
    pub fn to_tokens(&self, notation: Notation) -> Vec<Token> {
        match notation {
            Notation::InOrder => self.to_infix(),
            Notation::PreOrder => {
                let mut visitor = PreOrderVisitor { tokens: vec![] };
                self.accept(&mut visitor);
                visitor.tokens
            }
            Notation::PostOrder => {
                let mut visitor = PostOrderVisitor { tokens: vec![] };
                self.accept(&mut visitor);
                visitor.tokens
            }
            Notation::LevelOrder => self.to_level_order(),
        }
    }

    /// Writes the tree in the given notation as text.
    pub fn print(&self, notation: Notation) -> Result<String, FromUtf8Error> {
        tokens_to_string(self.to_tokens(notation), notation)
    }

    pub fn to_infix(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        self.build_expression(&mut tokens);
        tokens
    }

    fn build_expression(&self, tokens: &mut Vec<Token>) {
        match self {
            Node::LiteralInteger(_) | Node::Identifier(_) => tokens.push(self.own_token()),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => {
                parenthesize_if(
                    tokens,
                    || needs_parentheses_on_left(operator, left_operand),
                    |tokens| left_operand.build_expression(tokens),
                );
                tokens.push(operator.token());
                parenthesize_if(
                    tokens,
                    || needs_parentheses_on_right(operator, right_operand),
                    |tokens| right_operand.build_expression(tokens),
                );
            }
            Node::UnaryOperation { operand, .. } => {
                tokens.push(Token::Dash);
                parenthesize_if(
                    tokens,
                    || operand.as_binary_operator().is_some(),
                    |tokens| operand.build_expression(tokens),
                );
            }
        }
    }

    fn to_level_order(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut queue = VecDeque::from([self]);
        while let Some(node) = queue.pop_front() {
            tokens.push(node.own_token());
            queue.extend(node.children());
        }
        tokens
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

/// When a child operator has lower precedence, it and its operands need
/// to be wrapped in parentheses.
fn needs_parentheses_on_left(parent_operator: &BinaryOperator, child: &Node) -> bool {
    match child.as_binary_operator() {
        Some(child_operator) => parent_operator.precedence_gt(&child_operator),
        None => false,
    }
}

/// Operators are read back left-associated, so a right operand of equal precedence is
/// always wrapped, `a + (b + c)` included.
fn needs_parentheses_on_right(parent_operator: &BinaryOperator, child: &Node) -> bool {
    match child.as_binary_operator() {
        Some(child_operator) => {
            parent_operator.precedence_gt(&child_operator)
                || parent_operator.precedence_eq(&child_operator)
        }
        None => false,
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

struct PreOrderVisitor {
    tokens: Vec<Token>,
}

impl SyntaxVisitor for PreOrderVisitor {
    fn visit_literal_integer(&mut self, value: i32) {
        self.tokens.push(Token::LiteralInteger(value));
    }
    fn visit_identifier(&mut self, name: &str) {
        self.tokens.push(Token::Identifier(name.to_string()));
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        self.tokens.push(operator.token());
        walk_binary_operation(self, left_operand, right_operand);
    }
    fn visit_unary_operation(&mut self, operator: &UnaryOperator, operand: &Node) {
        self.tokens.push(operator.token());
        walk_unary_operation(self, operand);
    }
}

struct PostOrderVisitor {
    tokens: Vec<Token>,
}

impl SyntaxVisitor for PostOrderVisitor {
    fn visit_literal_integer(&mut self, value: i32) {
        self.tokens.push(Token::LiteralInteger(value));
    }
    fn visit_identifier(&mut self, name: &str) {
        self.tokens.push(Token::Identifier(name.to_string()));
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        walk_binary_operation(self, left_operand, right_operand);
        self.tokens.push(operator.token());
    }
    fn visit_unary_operation(&mut self, operator: &UnaryOperator, operand: &Node) {
        walk_unary_operation(self, operand);
        self.tokens.push(operator.token());
    }
}

struct TreeBuilderVisitor {
    builder: TreeBuilder,
}

impl SyntaxVisitor for TreeBuilderVisitor {
    fn visit_literal_integer(&mut self, value: i32) {
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

/// A cheaply copyable handle to the root of a finished expression tree.
///
/// Copies share the same nodes. The default value is the empty tree, which stands for
/// "nothing has been built yet".
#[derive(Debug, Clone, Default)]
pub struct ExpressionTree {
    root: Option<Rc<Node>>,
}

impl ExpressionTree {
    pub fn new(root: Node) -> ExpressionTree {
        ExpressionTree {
            root: Some(Rc::new(root)),
        }
    }

    pub fn empty() -> ExpressionTree {
        ExpressionTree::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// Whether both handles point at the very same nodes.
    pub fn shares_nodes_with(&self, other: &ExpressionTree) -> bool {
        match (&self.root, &other.root) {
            (Some(root), Some(other_root)) => Rc::ptr_eq(root, other_root),
            (None, None) => true,
            _ => false,
        }
    }
}

impl PartialEq for ExpressionTree {
    fn eq(&self, other: &Self) -> bool {
        self.root() == other.root()
    }
}

impl Eq for ExpressionTree {}

impl Display for ExpressionTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => root.format_tree(f),
            None => writeln!(f, "expression (empty)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn print_succeeds() {
        let tree = create_complex_tree();

        print!("{}", tree);
    }

    #[test]
    fn tree_display_draws_every_node() {
        let tree = ExpressionTree::new(create_simple_tree());

        let drawing = tree.to_string();

        assert!(drawing.starts_with("expression"));
        assert!(drawing.contains('+'));
        assert!(drawing.contains('x'));
        assert!(drawing.contains('y'));
    }

    #[test]
    fn simple_tree_converts_back_to_simple_expression() {
        let expected_tokens = vec![
            Token::Identifier("x".to_string()),
            Token::Plus,
            Token::Identifier("y".to_string()),
        ];
        let tree = create_simple_tree();

        let actual_tokens = tree.to_infix();

        assert_eq!(actual_tokens, expected_tokens);
    }

    #[test]
    fn complex_tree_converts_back_to_simple_expression() {
        // x + (y + z) * a
        let expected_tokens = vec![
            Token::Identifier("x".to_string()),
            Token::Plus,
            Token::LeftParentheses,
            Token::Identifier("y".to_string()),
            Token::Plus,
            Token::Identifier("z".to_string()),
            Token::RightParentheses,
            Token::Asterisk,
            Token::Identifier("a".to_string()),
        ];
        let tree = create_complex_tree();

        let actual_tokens = tree.to_infix();

        assert_eq!(actual_tokens, expected_tokens);
    }

    #[test]
    fn complex_tree_converts_to_postfix() {
        let tree = create_complex_tree();

        assert_eq!(tree.print(Notation::PostOrder).unwrap(), "x y z + a * +");
    }

    #[test]
    fn complex_tree_converts_to_prefix() {
        let tree = create_complex_tree();

        assert_eq!(tree.print(Notation::PreOrder).unwrap(), "+ x * + y z a");
    }

    #[test]
    fn complex_tree_converts_to_level_order() {
        let tree = create_complex_tree();

        assert_eq!(tree.print(Notation::LevelOrder).unwrap(), "+ x * + a y z");
    }

    #[test]
    fn right_operand_of_subtraction_keeps_parentheses() {
        // a - (b - c)
        let a = Node::new_identifier("a".into());
        let b = Node::new_identifier("b".into());
        let c = Node::new_identifier("c".into());
        let tree = Node::new_binary_subtraction(a, Node::new_binary_subtraction(b, c));

        assert_eq!(tree.print(Notation::InOrder).unwrap(), "a - (b - c)");
    }

    #[test]
    fn right_operand_of_same_operator_keeps_parentheses() {
        // a + (b + c) and a * (b * c)
        let a = Node::new_identifier("a".into());
        let b = Node::new_identifier("b".into());
        let c = Node::new_identifier("c".into());
        let sum = Node::new_binary_addition(
            a.clone(),
            Node::new_binary_addition(b.clone(), c.clone()),
        );
        let product = Node::new_binary_multiplication(a, Node::new_binary_multiplication(b, c));

        assert_eq!(sum.print(Notation::InOrder).unwrap(), "a + (b + c)");
        assert_eq!(product.print(Notation::InOrder).unwrap(), "a * (b * c)");
    }

    #[test]
    fn right_operand_of_multiplication_keeps_division_parentheses() {
        // 2 * (3 / 2) differs from 2 * 3 / 2 in integer arithmetic
        let tree = Node::new_binary_multiplication(
            Node::new_literal_integer(2),
            Node::new_binary_division(Node::new_literal_integer(3), Node::new_literal_integer(2)),
        );

        assert_eq!(tree.print(Notation::InOrder).unwrap(), "2 * (3 / 2)");
    }

    #[test]
    fn left_associative_chain_needs_no_parentheses() {
        // (a - b) - c
        let a = Node::new_identifier("a".into());
        let b = Node::new_identifier("b".into());
        let c = Node::new_identifier("c".into());
        let tree = Node::new_binary_subtraction(Node::new_binary_subtraction(a, b), c);

        assert_eq!(tree.print(Notation::InOrder).unwrap(), "a - b - c");
    }

    #[test]
    fn negation_is_written_with_dash_in_order_and_tilde_otherwise() {
        let sum = Node::new_binary_addition(
            Node::new_identifier("a".into()),
            Node::new_literal_integer(1),
        );
        let tree = Node::new_binary_multiplication(
            Node::new_negation(sum),
            Node::new_negation(Node::new_identifier("b".into())),
        );

        assert_eq!(tree.print(Notation::InOrder).unwrap(), "-(a + 1) * -b");
        assert_eq!(tree.print(Notation::PostOrder).unwrap(), "a 1 + ~ b ~ *");
        assert_eq!(tree.print(Notation::PreOrder).unwrap(), "* ~ + a 1 ~ b");
    }

    #[test]
    fn copies_of_a_tree_share_nodes() {
        let tree = ExpressionTree::new(create_simple_tree());

        let copy = tree.clone();

        assert!(copy.shares_nodes_with(&tree));
        assert_eq!(copy, tree);
    }

    #[test]
    fn empty_tree_has_no_root() {
        let tree = ExpressionTree::empty();

        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert!(!tree.shares_nodes_with(&ExpressionTree::new(create_simple_tree())));
    }

    fn create_simple_tree() -> Node {
        let x = Node::new_identifier("x".into());
        let y = Node::new_identifier("y".into());
        Node::new_binary_addition(x, y)
    }

    fn create_complex_tree() -> Node {
        let x = Node::new_identifier("x".into());
        let y = Node::new_identifier("y".into());
        let z = Node::new_identifier("z".into());
        let a = Node::new_identifier("a".into());
        let second_plus = Node::new_binary_addition(y, z);
        let star = Node::new_binary_multiplication(second_plus, a);
        Node::new_binary_addition(x, star)
    }
}
