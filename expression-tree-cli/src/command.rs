use anyhow::{anyhow, bail, Context, Result};
use expression_tree::session::TreeContext;
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  format <notation>   choose how expressions are written (in-order, post-order)
  expr <expression>   build a tree from an expression in the chosen notation
  print <notation>    print the tree (in-order, pre-order, post-order, level-order)
  eval <notation>     evaluate the tree and print it in the given notation
  set <key>=<value>   assign an integer to a variable
  vars                list all variables
  reset               remove all variables
  help                show this message
  quit                leave the session";

/// A single line of input to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Format(String),
    Expr(String),
    Print(String),
    Evaluate(String),
    Set(String),
    Variables,
    Reset,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Command> {
        let line = line.trim();
        let (keyword, argument) = match line.split_once(char::is_whitespace) {
            Some((keyword, argument)) => (keyword, argument.trim()),
            None => (line, ""),
        };

        let require_argument = |what: &str| -> Result<String> {
            if argument.is_empty() {
                bail!("'{}' expects {}", keyword, what);
            }
            Ok(argument.to_string())
        };
        let reject_argument = |command: Command| -> Result<Command> {
            if !argument.is_empty() {
                bail!("'{}' takes no argument", keyword);
            }
            Ok(command)
        };

        match keyword {
            "format" => Ok(Command::Format(require_argument("a notation")?)),
            "expr" => Ok(Command::Expr(require_argument("an expression")?)),
            "print" => Ok(Command::Print(require_argument("a notation")?)),
            "eval" | "evaluate" => Ok(Command::Evaluate(require_argument("a notation")?)),
            "set" => Ok(Command::Set(require_argument("an assignment key=value")?)),
            "vars" | "variables" => reject_argument(Command::Variables),
            "reset" => reject_argument(Command::Reset),
            "help" => reject_argument(Command::Help),
            "quit" | "exit" => reject_argument(Command::Quit),
            "" => Err(anyhow!("Empty command")),
            unknown => Err(anyhow!("Unknown command '{}', try 'help'", unknown)),
        }
    }
}

/// What the front end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Silent,
    Quit,
}

pub fn execute(session: &mut TreeContext, command: Command) -> Result<Reply> {
    let reply = match command {
        Command::Format(notation) => {
            session.format(&notation)?;
            Reply::Silent
        }
        Command::Expr(expression) => {
            session
                .expr(&expression)
                .with_context(|| format!("could not build expression {:?}", expression))?;
            Reply::Silent
        }
        Command::Print(notation) => Reply::Output(session.print(&notation)?),
        Command::Evaluate(notation) => Reply::Output(session.evaluate(&notation)?.to_string()),
        Command::Set(assignment) => {
            session.set(&assignment)?;
            Reply::Silent
        }
        Command::Variables => Reply::Output(session.variables().trim_end().to_string()),
        Command::Reset => {
            session.reset_variables();
            Reply::Silent
        }
        Command::Help => Reply::Output(HELP.to_string()),
        Command::Quit => Reply::Quit,
    };
    Ok(reply)
}
