use std::fmt;
use std::fmt::Formatter;

/// A discrete part of an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    LiteralInteger(i32),
    Identifier(String),
    Plus,
    Dash,
    Asterisk,
    ForwardSlash,
    /// Unary negation, as spelled in pre-, post- and level-order text.
    Tilde,
    LeftParentheses,
    RightParentheses,
}

impl Token {
    /// A 'value' is a token that either represents, contains or is a numerical value.
    /// E.g. a literal or identifier.
    pub fn is_value(&self) -> bool {
        matches!(self, Token::LiteralInteger(_) | Token::Identifier(_))
    }

    pub fn is_binary_operator(&self) -> bool {
        matches!(
            self,
            Token::Plus | Token::Dash | Token::Asterisk | Token::ForwardSlash
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::LiteralInteger(value) => write!(f, "{}", value),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Plus => write!(f, "+"),
            Token::Dash => write!(f, "-"),
            Token::Asterisk => write!(f, "*"),
            Token::ForwardSlash => write!(f, "/"),
            Token::Tilde => write!(f, "~"),
            Token::LeftParentheses => write!(f, "("),
            Token::RightParentheses => write!(f, ")"),
        }
    }
}
