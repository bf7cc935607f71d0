use crate::interpreter::Notation;
use crate::session::error::ProtocolError;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Where a session is in its lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum State {
    /// No format has been chosen yet.
    #[default]
    Uninitialized,
    /// Expressions will be read in the given notation, but none has been built since.
    Formatted(Notation),
    /// A tree built from an expression in the given notation is available.
    TreeBuilt(Notation),
}

/// The state-gated operations of a session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operation {
    Format(Notation),
    Expr,
    Print,
    Evaluate,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Format(_) => "format",
            Operation::Expr => "expr",
            Operation::Print => "print",
            Operation::Evaluate => "evaluate",
        }
    }
}

impl State {
    /// The state reached by performing the operation, or why it is not allowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use expression_tree::interpreter::Notation;
    /// use expression_tree::session::state::{Operation, State};
    ///
    /// let formatted = State::Uninitialized
    ///     .transition(Operation::Format(Notation::InOrder))
    ///     .unwrap();
    ///
    /// assert_eq!(formatted.transition(Operation::Expr), Ok(State::TreeBuilt(Notation::InOrder)));
    /// assert!(formatted.transition(Operation::Print).is_err());
    /// ```
    pub fn transition(self, operation: Operation) -> Result<State, ProtocolError> {
        match (self, operation) {
            (_, Operation::Format(notation)) => Ok(State::Formatted(notation)),
            (State::Uninitialized, Operation::Expr) => Err(ProtocolError::FormatRequired {
                operation: operation.name(),
            }),
            (State::Formatted(notation) | State::TreeBuilt(notation), Operation::Expr) => {
                Ok(State::TreeBuilt(notation))
            }
            (State::TreeBuilt(_), Operation::Print | Operation::Evaluate) => Ok(self),
            (State::Uninitialized | State::Formatted(_), Operation::Print | Operation::Evaluate) => {
                Err(ProtocolError::TreeRequired {
                    operation: operation.name(),
                })
            }
        }
    }

    /// The notation expressions are read in, once one has been chosen.
    pub fn notation(&self) -> Option<Notation> {
        match self {
            State::Uninitialized => None,
            State::Formatted(notation) | State::TreeBuilt(notation) => Some(*notation),
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            State::Uninitialized => write!(f, "uninitialized"),
            State::Formatted(notation) => write!(f, "{} (no expression)", notation),
            State::TreeBuilt(notation) => write!(f, "{} (expression built)", notation),
        }
    }
}
