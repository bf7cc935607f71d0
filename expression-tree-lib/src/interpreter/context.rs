use crate::interpreter::error::EvaluationError;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Variable bindings that trees are evaluated against.
///
/// Names are case-sensitive. Trees only refer to variables by name, so a binding can
/// change between two evaluations of the same tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpreterContext {
    variables: BTreeMap<String, i32>,
}

impl InterpreterContext {
    pub fn new() -> InterpreterContext {
        InterpreterContext::default()
    }

    /// Returns the value bound to the given variable.
    ///
    /// # Examples
    ///
    /// ```
    /// use expression_tree::interpreter::context::InterpreterContext;
    /// use expression_tree::interpreter::error::EvaluationError;
    ///
    /// let mut context = InterpreterContext::new();
    /// context.set("x", 3);
    ///
    /// assert_eq!(context.get("x"), Ok(3));
    /// assert_eq!(
    ///     context.get("X"),
    ///     Err(EvaluationError::UndefinedVariable("X".to_string()))
    /// );
    /// ```
    pub fn get(&self, variable: &str) -> Result<i32, EvaluationError> {
        self.variables
            .get(variable)
            .copied()
            .ok_or_else(|| EvaluationError::UndefinedVariable(variable.to_string()))
    }

    pub fn set(&mut self, variable: &str, value: i32) {
        self.variables.insert(variable.to_string(), value);
    }

    /// Renders every binding as `name = value`, one per line, ordered by name.
    pub fn print(&self) -> String {
        self.to_string()
    }

    pub fn reset(&mut self) {
        self.variables.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl Display for InterpreterContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.variables {
            writeln!(f, "{} = {}", name, value)?;
        }
        Ok(())
    }
}
