use thiserror::Error;

/// Malformed expression text. Raised while building a tree, never while evaluating one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Expression is empty")]
    Empty,
    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },
    #[error("Number {0} does not fit in a 32-bit integer")]
    NumberTooLarge(String),
    #[error("Mismatched parenthesis")]
    UnbalancedParenthesis,
    #[error("Empty parentheses")]
    EmptyParentheses,
    #[error("Operator '{0}' is missing an operand")]
    MissingOperand(String),
    #[error("Expression ends with operator '{0}'")]
    TrailingOperator(String),
    #[error("Expected an operator before '{0}'")]
    UnexpectedOperand(String),
    #[error("Token '{0}' is not allowed in this notation")]
    UnexpectedToken(String),
    #[error("Operator '{0}' has insufficient operands")]
    InsufficientOperands(String),
    #[error("Expression has {0} operands left without an operator")]
    ExcessOperands(usize),
    #[error("There should not be any parenthesis present in post-order input")]
    UnexpectedParenthesis,
}

/// Failure while computing the value of a well-formed tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("Variable '{0}' is not defined")]
    UndefinedVariable(String),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Integer overflow")]
    Overflow,
}
