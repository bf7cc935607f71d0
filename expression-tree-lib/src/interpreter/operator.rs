use crate::interpreter::error::EvaluationError;
use crate::interpreter::token::Token;
use std::fmt;
use std::fmt::Formatter;

/// A binary mathematical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// An unary mathematical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
}

impl UnaryOperator {
    /// The token used when writing the operator in pre-, post- or level-order.
    pub fn token(&self) -> Token {
        match self {
            UnaryOperator::Negate => Token::Tilde,
        }
    }

    pub fn evaluate(&self, x: i32) -> Result<i32, EvaluationError> {
        match self {
            UnaryOperator::Negate => x.checked_neg().ok_or(EvaluationError::Overflow),
        }
    }
}

impl BinaryOperator {
    pub fn from_token(token: &Token) -> Option<BinaryOperator> {
        match token {
            Token::Plus => Some(BinaryOperator::Add),
            Token::Dash => Some(BinaryOperator::Subtract),
            Token::Asterisk => Some(BinaryOperator::Multiply),
            Token::ForwardSlash => Some(BinaryOperator::Divide),
            _ => None,
        }
    }

    pub fn token(&self) -> Token {
        match self {
            BinaryOperator::Add => Token::Plus,
            BinaryOperator::Subtract => Token::Dash,
            BinaryOperator::Multiply => Token::Asterisk,
            BinaryOperator::Divide => Token::ForwardSlash,
        }
    }

    pub(crate) fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 0,
            BinaryOperator::Multiply | BinaryOperator::Divide => 1,
        }
    }

    /// Whether the operator combines eagerly with the operand to its left while scanning.
    pub(crate) fn binds_tightly(&self) -> bool {
        self.precedence() > 0
    }

    pub(crate) fn precedence_eq(&self, other: &Self) -> bool {
        self.precedence().eq(&other.precedence())
    }

    pub(crate) fn precedence_gt(&self, other: &Self) -> bool {
        self.precedence().gt(&other.precedence())
    }

    pub fn evaluate(&self, a: i32, b: i32) -> Result<i32, EvaluationError> {
        let result = match self {
            BinaryOperator::Add => a.checked_add(b),
            BinaryOperator::Subtract => a.checked_sub(b),
            BinaryOperator::Multiply => a.checked_mul(b),
            BinaryOperator::Divide => {
                if b == 0 {
                    return Err(EvaluationError::DivisionByZero);
                }
                a.checked_div(b)
            }
        };
        result.ok_or(EvaluationError::Overflow)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOperator::Negate => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;

    #[test]
    fn operator_equality_correspond_with_precedence() {
        let equal1 = BinaryOperator::Multiply;
        let equal2 = BinaryOperator::Divide;
        assert!(equal1.precedence_eq(&equal2))
    }

    #[test]
    fn operator_gt_correspond_with_precedence() {
        let greater = BinaryOperator::Multiply;
        let lesser = BinaryOperator::Add;
        assert!(greater.precedence_gt(&lesser))
    }

    #[parameterized(
    operator = {
    BinaryOperator::Add,
    BinaryOperator::Subtract,
    BinaryOperator::Multiply,
    BinaryOperator::Divide,
    },
    expected = {
    9,
    5,
    14,
    3,
    }
    )]
    fn operator_evaluates_integers(operator: BinaryOperator, expected: i32) {
        assert_eq!(operator.evaluate(7, 2), Ok(expected));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(
            BinaryOperator::Divide.evaluate(5, 0),
            Err(EvaluationError::DivisionByZero)
        );
    }

    #[test]
    fn overflow_is_an_error() {
        assert_eq!(
            BinaryOperator::Multiply.evaluate(i32::MAX, 2),
            Err(EvaluationError::Overflow)
        );
        assert_eq!(
            UnaryOperator::Negate.evaluate(i32::MIN),
            Err(EvaluationError::Overflow)
        );
    }

    #[test]
    fn tokens_convert_back_to_operators() {
        for operator in [
            BinaryOperator::Add,
            BinaryOperator::Subtract,
            BinaryOperator::Multiply,
            BinaryOperator::Divide,
        ] {
            assert_eq!(BinaryOperator::from_token(&operator.token()), Some(operator));
        }
        assert_eq!(BinaryOperator::from_token(&Token::Tilde), None);
    }
}
