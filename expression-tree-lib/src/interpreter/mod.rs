pub mod context;
pub mod error;
pub mod evaluator;
pub mod in_order;
pub mod lexer;
pub mod operator;
pub mod optimizer;
pub mod post_order;
pub mod syntax;
pub mod token;

use crate::interpreter::error::ParseError;
use crate::interpreter::in_order::InOrderInterpreter;
use crate::interpreter::optimizer::Optimizing;
use crate::interpreter::post_order::PostOrderInterpreter;
use crate::interpreter::token::Token;
use log::debug;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::string::FromUtf8Error;
use string_builder::Builder;
use syntax::expression_tree::{ExpressionTree, Node};

/// A textual convention for writing an expression tree.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Notation {
    InOrder,
    PreOrder,
    PostOrder,
    LevelOrder,
}

impl Notation {
    pub const ALL: [Notation; 4] = [
        Notation::InOrder,
        Notation::PreOrder,
        Notation::PostOrder,
        Notation::LevelOrder,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Notation::InOrder => "in-order",
            Notation::PreOrder => "pre-order",
            Notation::PostOrder => "post-order",
            Notation::LevelOrder => "level-order",
        }
    }

    /// Whether expressions written in this notation can be read back into a tree.
    pub fn is_buildable(&self) -> bool {
        matches!(self, Notation::InOrder | Notation::PostOrder)
    }
}

impl Display for Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The name did not match any known notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNotation(pub String);

impl FromStr for Notation {
    type Err = UnknownNotation;

    fn from_str(input: &str) -> Result<Notation, Self::Err> {
        let name = input.trim();
        Notation::ALL
            .into_iter()
            .find(|notation| notation.name() == name)
            .ok_or_else(|| UnknownNotation(name.to_string()))
    }
}

/// Reads expression text in one notation and turns it into an expression tree.
///
/// Implementors only have to provide [`Interpreter::build_parse_tree`]; the remaining
/// steps have defaults which can be overridden.
pub trait Interpreter {
    /// Converts the text into a parse tree that already has the final shape.
    fn build_parse_tree(&self, input: &str) -> Result<Node, ParseError>;

    /// Rewrites the parse tree before it is frozen. Does nothing by default.
    fn optimize_parse_tree(&self, parse_tree: Node) -> Node {
        parse_tree
    }

    fn build_expression_tree(&self, parse_tree: Node) -> ExpressionTree {
        ExpressionTree::new(parse_tree)
    }

    /// Converts the given input string into an equivalent expression tree.
    ///
    /// # Arguments
    ///
    /// * `input`: The text-representation of the expression.
    ///
    /// returns: The equivalent expression tree.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// use expression_tree::interpreter::in_order::InOrderInterpreter;
    /// use expression_tree::interpreter::{Interpreter, Notation};
    ///
    /// let tree = InOrderInterpreter::new().interpret("1 + 2 * 3")?;
    /// let postfix = tree.root().map(|root| root.print(Notation::PostOrder));
    /// assert_eq!(postfix, Some(Ok("1 2 3 * +".to_string())));
    /// # Ok::<(), anyhow::Error>(()) }
    /// ```
    fn interpret(&self, input: &str) -> Result<ExpressionTree, ParseError> {
        let parse_tree = self.build_parse_tree(input)?;
        debug!("Parsed {:?} into {:?}", input, parse_tree);
        let optimized_tree = self.optimize_parse_tree(parse_tree);
        Ok(self.build_expression_tree(optimized_tree))
    }
}

/// Picks the interpreter that reads the given notation, if there is one.
///
/// # Arguments
///
/// * `notation`: The notation the expressions will be written in.
/// * `optimize`: Whether constant subexpressions are folded while building.
pub fn interpreter_for(notation: Notation, optimize: bool) -> Option<Box<dyn Interpreter>> {
    let interpreter: Box<dyn Interpreter> = match (notation, optimize) {
        (Notation::InOrder, false) => Box::new(InOrderInterpreter::new()),
        (Notation::InOrder, true) => Box::new(Optimizing::new(InOrderInterpreter::new())),
        (Notation::PostOrder, false) => Box::new(PostOrderInterpreter::new()),
        (Notation::PostOrder, true) => Box::new(Optimizing::new(PostOrderInterpreter::new())),
        (Notation::PreOrder | Notation::LevelOrder, _) => return None,
    };
    Some(interpreter)
}

/// Pretty-prints the given vector of tokens with added whitespace.
///
/// In-order text pads binary operators with spaces and attaches unary minus to its
/// operand. Every other notation separates all tokens with single spaces.
///
/// # Arguments
///
/// * `tokens`: The tokens to print.
/// * `notation`: The notation the tokens are ordered in.
///
/// returns: A pretty-printed text-version of the given tokens.
///
/// # Examples
///
/// ```
/// use expression_tree::interpreter::token::Token;
/// use expression_tree::interpreter::{tokens_to_string, Notation};
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens = vec![
///     Token::Identifier("x".to_string()),
///     Token::Dash,
///     Token::Dash,
///     Token::LiteralInteger(2),
/// ];
/// let pretty_printed_tokens = tokens_to_string(tokens, Notation::InOrder)?;
/// assert_eq!(pretty_printed_tokens, "x - -2");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokens_to_string(tokens: Vec<Token>, notation: Notation) -> Result<String, FromUtf8Error> {
    let mut builder = Builder::new(tokens.len() * 2);

    if notation != Notation::InOrder {
        for (index, token) in tokens.into_iter().enumerate() {
            if index > 0 {
                builder.append(" ");
            }
            builder.append(token.to_string());
        }
        return builder.string();
    }

    let mut follows_operand = false;
    for token in tokens {
        if token.is_binary_operator() && follows_operand {
            builder.append(" ");
            builder.append(token.to_string());
            builder.append(" ");
            follows_operand = false;
        } else {
            follows_operand = token.is_value() || token == Token::RightParentheses;
            builder.append(token.to_string());
        }
    }

    builder.string()
}
