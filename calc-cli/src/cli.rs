use std::convert::TryFrom;

use anyhow::Result;
use calc_core::{Calculator, Token};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "calc", version, about = "Keypad calculator CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply a sequence of keypad tokens and print the final display.
    Eval {
        /// Tokens in press order, e.g. `5 + 3 =` or `9 'x!'`.
        /// Quote tokens the shell would expand, such as `*`.
        #[arg(required = true, allow_hyphen_values = true, trailing_var_arg = true)]
        tokens: Vec<String>,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Eval { tokens }) => eval(&tokens),
            None => repl(),
        }
    }
}

fn eval(words: &[String]) -> Result<()> {
    let mut calc = Calculator::new();
    for word in words {
        press_word(&mut calc, word)?;
    }
    println!("{}", calc.display());
    Ok(())
}

/// Interactive mode: one line of whitespace-separated tokens per prompt, the
/// display echoed after each line.
fn repl() -> Result<()> {
    let mut calc = Calculator::new();
    println!("Keypad calculator. Tokens: 0-9 . + - * / = % +/- 1/x x! x² x³ 10^x AC");
    println!("Type `quit` to leave.");

    loop {
        let line = match Text::new(">").prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }

        for word in line.split_whitespace() {
            if let Err(err) = press_word(&mut calc, word) {
                eprintln!("{err}");
                break;
            }
        }
        println!("{}", calc.display());
    }

    Ok(())
}

/// A word is one keypad label, or a run of digits and points pressed one key
/// at a time: `55` is `5` twice, `12.5` is four presses.
fn press_word(calc: &mut Calculator, word: &str) -> Result<()> {
    match Token::try_from(word) {
        Ok(token) => {
            calc.apply_token(token);
            Ok(())
        }
        Err(err) => {
            if !word.is_empty() && word.chars().all(|c| c.is_ascii_digit() || c == '.') {
                for c in word.chars() {
                    let token = match c.to_digit(10) {
                        Some(d) => Token::Digit(d as u8),
                        None => Token::Point,
                    };
                    calc.apply_token(token);
                }
                Ok(())
            } else {
                Err(err)
            }
        }
    }
}
