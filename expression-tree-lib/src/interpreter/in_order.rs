use crate::interpreter::error::ParseError;
use crate::interpreter::lexer::tokenize;
use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::Token;
use crate::interpreter::Interpreter;
use log::trace;

/// Reads infix expressions such as `-(a + 2) * b / 4`.
///
/// Tokens are scanned left to right into a list of pending operands and operators.
/// Multiplication and division are folded into a single operand as soon as their right
/// operand arrives, so only additions and subtractions are left once the scan ends; these
/// are then folded from left to right. Parenthesized groups are built recursively and
/// inserted as a single operand.
#[derive(Debug, Default, Clone, Copy)]
pub struct InOrderInterpreter;

impl InOrderInterpreter {
    pub fn new() -> InOrderInterpreter {
        InOrderInterpreter
    }
}

impl Interpreter for InOrderInterpreter {
    fn build_parse_tree(&self, input: &str) -> Result<Node, ParseError> {
        let tokens = tokenize(input)?;
        build_tree(&tokens)
    }
}

/// An element of the list of not-yet-combined parts of an expression.
#[derive(Debug)]
enum Pending {
    Operand(Node),
    Operator(BinaryOperator),
}

fn build_tree(tokens: &[Token]) -> Result<Node, ParseError> {
    let mut pending: Vec<Pending> = Vec::new();
    let mut expecting_operand = true;
    let mut negations = 0;
    let mut index = 0;

    while index < tokens.len() {
        let token = &tokens[index];
        trace!("Scanning {:?} with {} pending parts", token, pending.len());
        match token {
            Token::LiteralInteger(_) | Token::Identifier(_) | Token::LeftParentheses => {
                if !expecting_operand {
                    return Err(ParseError::UnexpectedOperand(token.to_string()));
                }
                let operand = match token {
                    Token::LiteralInteger(value) => Node::new_literal_integer(*value),
                    Token::Identifier(name) => Node::new_identifier(name.to_string()),
                    _ => {
                        let closing = find_closing_parenthesis(tokens, index)?;
                        let inner = &tokens[index + 1..closing];
                        if inner.is_empty() {
                            return Err(ParseError::EmptyParentheses);
                        }
                        index = closing;
                        build_tree(inner)?
                    }
                };
                let operand = negate(operand, negations);
                negations = 0;
                operand_insert(operand, &mut pending);
                expecting_operand = false;
            }
            Token::Dash if expecting_operand => negations += 1,
            Token::Plus | Token::Dash | Token::Asterisk | Token::ForwardSlash => {
                if expecting_operand {
                    return Err(ParseError::MissingOperand(token.to_string()));
                }
                if let Some(operator) = BinaryOperator::from_token(token) {
                    pending.push(Pending::Operator(operator));
                }
                expecting_operand = true;
            }
            Token::RightParentheses => return Err(ParseError::UnbalancedParenthesis),
            Token::Tilde => return Err(ParseError::UnexpectedToken(token.to_string())),
        }
        index += 1;
    }

    if pending.is_empty() && negations == 0 {
        return Err(ParseError::Empty);
    }
    if expecting_operand {
        let last = match pending.last() {
            Some(Pending::Operator(operator)) if negations == 0 => operator.to_string(),
            _ => Token::Dash.to_string(),
        };
        return Err(ParseError::TrailingOperator(last));
    }

    fold_left_to_right(pending)
}

/// Inserts an operand, immediately combining it with a pending multiplication or
/// division on its left.
fn operand_insert(operand: Node, pending: &mut Vec<Pending>) {
    if let Some(Pending::Operator(operator)) = pending.last() {
        let operator = *operator;
        if operator.binds_tightly() {
            pending.pop();
            if let Some(Pending::Operand(left_operand)) = pending.pop() {
                let combined = Node::new_binary_operation(operator, left_operand, operand);
                pending.push(Pending::Operand(combined));
                return;
            }
        }
    }
    pending.push(Pending::Operand(operand));
}

fn negate(operand: Node, negations: usize) -> Node {
    (0..negations).fold(operand, |node, _| Node::new_negation(node))
}

/// Finds the parenthesis closing the one at `open_index` by counting nesting depth.
fn find_closing_parenthesis(tokens: &[Token], open_index: usize) -> Result<usize, ParseError> {
    let mut depth = 0;
    for (index, token) in tokens.iter().enumerate().skip(open_index) {
        match token {
            Token::LeftParentheses => depth += 1,
            Token::RightParentheses => {
                depth -= 1;
                if depth == 0 {
                    return Ok(index);
                }
            }
            _ => {}
        }
    }
    Err(ParseError::UnbalancedParenthesis)
}

/// Combines the remaining additions and subtractions; every operand is already fully
/// reduced with respect to multiplication and division.
fn fold_left_to_right(pending: Vec<Pending>) -> Result<Node, ParseError> {
    let mut parts = pending.into_iter();
    let mut root = match parts.next() {
        Some(Pending::Operand(node)) => node,
        Some(Pending::Operator(operator)) => {
            return Err(ParseError::MissingOperand(operator.to_string()))
        }
        None => return Err(ParseError::Empty),
    };

    while let Some(part) = parts.next() {
        let operator = match part {
            Pending::Operator(operator) => operator,
            Pending::Operand(node) => {
                return Err(ParseError::UnexpectedOperand(format!("{:?}", node)))
            }
        };
        let right_operand = match parts.next() {
            Some(Pending::Operand(node)) => node,
            _ => return Err(ParseError::TrailingOperator(operator.to_string())),
        };
        root = Node::new_binary_operation(operator, root, right_operand);
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> Result<Node, ParseError> {
        InOrderInterpreter::new().build_parse_tree(input)
    }

    fn x() -> Node {
        Node::new_identifier("x".into())
    }

    fn literal(value: i32) -> Node {
        Node::new_literal_integer(value)
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expected = Node::new_binary_addition(
            literal(1),
            Node::new_binary_multiplication(literal(2), literal(3)),
        );

        assert_eq!(parse("1+2*3").unwrap(), expected);
    }

    #[test]
    fn multiplication_binds_tighter_even_when_written_first() {
        let expected = Node::new_binary_addition(
            Node::new_binary_multiplication(literal(2), literal(3)),
            literal(1),
        );

        assert_eq!(parse("2 * 3 + 1").unwrap(), expected);
    }

    #[test]
    fn equal_precedence_associates_left_to_right() {
        let subtraction = Node::new_binary_subtraction(
            Node::new_binary_subtraction(literal(8), literal(3)),
            literal(2),
        );
        let division = Node::new_binary_division(
            Node::new_binary_division(literal(8), literal(4)),
            literal(2),
        );

        assert_eq!(parse("8 - 3 - 2").unwrap(), subtraction);
        assert_eq!(parse("8 / 4 / 2").unwrap(), division);
    }

    #[test]
    fn mixed_multiplicative_chain_associates_left_to_right() {
        let expected = Node::new_binary_multiplication(
            Node::new_binary_division(literal(6), literal(3)),
            x(),
        );

        assert_eq!(parse("6 / 3 * x").unwrap(), expected);
    }

    #[test]
    fn parentheses_override_precedence() {
        let expected = Node::new_binary_multiplication(
            Node::new_binary_addition(literal(1), literal(2)),
            literal(3),
        );

        assert_eq!(parse("(1 + 2) * 3").unwrap(), expected);
    }

    #[test]
    fn nested_parentheses_are_matched_by_depth() {
        let expected = Node::new_binary_subtraction(
            x(),
            Node::new_binary_multiplication(
                Node::new_binary_addition(literal(1), literal(2)),
                Node::new_binary_subtraction(literal(3), x()),
            ),
        );

        assert_eq!(parse("x - ((1 + 2) * (3 - x))").unwrap(), expected);
    }

    #[test]
    fn leading_dash_is_negation() {
        let expected = Node::new_binary_addition(Node::new_negation(x()), literal(2));

        assert_eq!(parse("-x + 2").unwrap(), expected);
    }

    #[test]
    fn dash_after_operator_is_negation() {
        let expected = Node::new_binary_multiplication(
            literal(2),
            Node::new_negation(Node::new_negation(literal(3))),
        );

        assert_eq!(parse("2 * - -3").unwrap(), expected);
    }

    #[test]
    fn negated_group_is_a_single_operand() {
        let expected = Node::new_binary_multiplication(
            Node::new_negation(Node::new_binary_addition(x(), literal(1))),
            literal(2),
        );

        assert_eq!(parse("-(x + 1) * 2").unwrap(), expected);
    }

    #[test]
    fn variables_are_kept_by_name() {
        let expected = Node::new_binary_addition(
            Node::new_identifier("total_1".into()),
            Node::new_identifier("Total_1".into()),
        );

        assert_eq!(parse("total_1 + Total_1").unwrap(), expected);
    }

    #[parameterized(
    input = {
    "",
    "   ",
    "()",
    "(1 + 2",
    "1 + 2)",
    ")(",
    "1 + * 2",
    "* 2",
    "1 +",
    "1 -",
    "-",
    "1 2",
    "x (1)",
    "(1)(2)",
    "3 ~",
    "1 % 2",
    },
    expected = {
    ParseError::Empty,
    ParseError::Empty,
    ParseError::EmptyParentheses,
    ParseError::UnbalancedParenthesis,
    ParseError::UnbalancedParenthesis,
    ParseError::UnbalancedParenthesis,
    ParseError::MissingOperand("*".to_string()),
    ParseError::MissingOperand("*".to_string()),
    ParseError::TrailingOperator("+".to_string()),
    ParseError::TrailingOperator("-".to_string()),
    ParseError::TrailingOperator("-".to_string()),
    ParseError::UnexpectedOperand("2".to_string()),
    ParseError::UnexpectedOperand("(".to_string()),
    ParseError::UnexpectedOperand("(".to_string()),
    ParseError::UnexpectedToken("~".to_string()),
    ParseError::UnexpectedCharacter { character: '%', position: 2 },
    }
    )]
    fn malformed_expression_returns_err(input: &str, expected: ParseError) {
        self::assert_eq!(parse(input).unwrap_err(), expected);
    }
}
