pub mod assignment;
pub mod error;
pub mod state;

use crate::interpreter::context::InterpreterContext;
use crate::interpreter::evaluator::evaluate;
use crate::interpreter::syntax::expression_tree::{ExpressionTree, Node};
use crate::interpreter::{interpreter_for, Notation, UnknownNotation};
use crate::session::assignment::parse_assignment;
use crate::session::error::{ProtocolError, SessionError};
use crate::session::state::{Operation, State};
use log::debug;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Options that stay fixed for the whole session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    /// Fold constant subexpressions while building trees.
    pub optimize: bool,
}

/// The outcome of evaluating the current tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// The evaluated tree, written in the requested notation.
    pub expression: String,
    pub value: i32,
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression, self.value)
    }
}

/// One interactive session: the current tree, the variables and the state that decides
/// which operations are allowed next.
///
/// Every operation either succeeds completely or leaves the session as it was.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use expression_tree::session::TreeContext;
///
/// let mut session = TreeContext::new();
/// session.format("in-order")?;
/// session.set("x = 5")?;
/// session.expr("x + 1 * 2")?;
///
/// assert_eq!(session.print("post-order")?, "x 1 2 * +");
/// assert_eq!(session.evaluate("in-order")?.value, 7);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
#[derive(Debug, Default)]
pub struct TreeContext {
    tree: ExpressionTree,
    state: State,
    variables: InterpreterContext,
    formatted: bool,
    settings: Settings,
}

impl TreeContext {
    pub fn new() -> TreeContext {
        TreeContext::default()
    }

    pub fn with_settings(settings: Settings) -> TreeContext {
        TreeContext {
            settings,
            ..TreeContext::default()
        }
    }

    /// Chooses the notation that following expressions are written in.
    pub fn format(&mut self, format: &str) -> Result<(), SessionError> {
        let notation = parse_notation(format)?;
        if !notation.is_buildable() {
            return Err(SessionError::UnsupportedNotation(notation));
        }
        self.advance(Operation::Format(notation))?;
        self.formatted = true;
        Ok(())
    }

    /// Builds a tree from the expression, in the notation chosen by the last format.
    ///
    /// A malformed expression keeps the previous tree as the current one.
    pub fn expr(&mut self, expression: &str) -> Result<(), SessionError> {
        let next = self.state.transition(Operation::Expr)?;
        let notation = next.notation().ok_or(ProtocolError::FormatRequired {
            operation: Operation::Expr.name(),
        })?;
        let interpreter = interpreter_for(notation, self.settings.optimize)
            .ok_or(SessionError::UnsupportedNotation(notation))?;

        let tree = interpreter.interpret(expression)?;
        debug!("Built expression tree\n{}", tree);
        self.tree = tree;
        self.enter(next);
        Ok(())
    }

    /// Writes the current tree in the given notation.
    pub fn print(&self, format: &str) -> Result<String, SessionError> {
        self.state.transition(Operation::Print)?;
        let notation = parse_notation(format)?;
        Ok(self.root(Operation::Print)?.print(notation)?)
    }

    /// Computes the value of the current tree with the current variable bindings.
    pub fn evaluate(&self, format: &str) -> Result<Evaluation, SessionError> {
        self.state.transition(Operation::Evaluate)?;
        let notation = parse_notation(format)?;
        let root = self.root(Operation::Evaluate)?;
        let value = evaluate(root, &self.variables)?;
        debug!("Evaluated tree to {}", value);
        Ok(Evaluation {
            expression: root.print(notation)?,
            value,
        })
    }

    /// Binds a variable from a `key=value` assignment. Always allowed.
    pub fn set(&mut self, assignment: &str) -> Result<(), SessionError> {
        let (name, value) = parse_assignment(assignment)?;
        debug!("Setting {} to {}", name, value);
        self.variables.set(&name, value);
        Ok(())
    }

    /// Lists the variable bindings, one `name = value` per line.
    pub fn variables(&self) -> String {
        self.variables.print()
    }

    pub fn reset_variables(&mut self) {
        self.variables.reset();
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// The current tree, which is empty until an expression has been built.
    pub fn tree(&self) -> &ExpressionTree {
        &self.tree
    }

    /// Whether a format has ever been chosen successfully.
    pub fn is_formatted(&self) -> bool {
        self.formatted
    }

    fn advance(&mut self, operation: Operation) -> Result<(), ProtocolError> {
        let next = self.state.transition(operation)?;
        self.enter(next);
        Ok(())
    }

    fn enter(&mut self, next: State) {
        if next != self.state {
            debug!("Session state {} -> {}", self.state, next);
        }
        self.state = next;
    }

    fn root(&self, operation: Operation) -> Result<&Node, ProtocolError> {
        self.tree.root().ok_or(ProtocolError::TreeRequired {
            operation: operation.name(),
        })
    }
}

fn parse_notation(format: &str) -> Result<Notation, SessionError> {
    format
        .parse::<Notation>()
        .map_err(|UnknownNotation(name)| SessionError::UnknownNotation(name))
}
