//! A calculator core that parses arithmetic expressions into a syntax tree and evaluates
//! them against a fixed allow-list of operations.

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod interpreter;

pub use interpreter::{evaluate_expression, parse_eval};
