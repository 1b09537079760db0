//! Core library for the `calc` CLI.
//!
//! This crate defines:
//! - The keypad token vocabulary (digits, operators, commands)
//! - The calculator engine: one mutable state record, driven one token at a time
//!
//! It is used by `calc-cli`, but can also be reused by other frontends. The
//! engine performs no I/O and never panics on user input; unrepresentable
//! results surface as the `"Error"` display sentinel.

pub mod engine;
pub mod token;

pub use engine::Calculator;
pub use token::{BinaryOp, Token, UnaryOp};
