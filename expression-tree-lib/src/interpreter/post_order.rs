use crate::interpreter::error::ParseError;
use crate::interpreter::lexer::tokenize;
use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::Token;
use crate::interpreter::Interpreter;

/// Reads postfix expressions such as `a 2 + ~ b *`.
///
/// Operands must be separated by whitespace, operators need not be. Unary negation is
/// written `~` since `-` always subtracts.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostOrderInterpreter;

impl PostOrderInterpreter {
    pub fn new() -> PostOrderInterpreter {
        PostOrderInterpreter
    }
}

impl Interpreter for PostOrderInterpreter {
    /// Generates an expression tree based off of the given postfix text.
    fn build_parse_tree(&self, input: &str) -> Result<Node, ParseError> {
        let mut operands: Vec<Node> = Vec::new();

        for token in tokenize(input)? {
            match token {
                Token::LiteralInteger(value) => operands.push(Node::new_literal_integer(value)),
                Token::Identifier(name) => operands.push(Node::new_identifier(name)),
                Token::Tilde => {
                    let operand = operands
                        .pop()
                        .ok_or_else(|| ParseError::InsufficientOperands(token.to_string()))?;
                    operands.push(Node::new_negation(operand));
                }
                Token::LeftParentheses | Token::RightParentheses => {
                    return Err(ParseError::UnexpectedParenthesis)
                }
                Token::Plus | Token::Dash | Token::Asterisk | Token::ForwardSlash => {
                    let insufficient = || ParseError::InsufficientOperands(token.to_string());
                    let operand_two = operands.pop().ok_or_else(insufficient)?;
                    let operand_one = operands.pop().ok_or_else(insufficient)?;
                    let operator =
                        BinaryOperator::from_token(&token).ok_or_else(insufficient)?;
                    operands.push(Node::new_binary_operation(
                        operator,
                        operand_one,
                        operand_two,
                    ));
                }
            }
        }

        match operands.len() {
            0 => Err(ParseError::Empty),
            1 => operands.pop().ok_or(ParseError::Empty),
            count => Err(ParseError::ExcessOperands(count)),
        }
    }
}
