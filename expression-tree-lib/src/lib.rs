//! Reads arithmetic expressions into expression trees and evaluates or rewrites them.
//!
//! [`interpreter`] turns in-order or post-order text into trees, [`session`] wraps that in
//! the command protocol of an interactive session.

pub mod interpreter;
pub mod session;
