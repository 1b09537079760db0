use std::convert::TryFrom;
use std::fmt;

/// A binary operator key. Exactly these four can sit in the pending slot
/// between operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A direct-computation key. Applied to the display immediately; never stored
/// as the pending operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `1/x`
    Reciprocal,
    /// `x!` (non-negative integers only)
    Factorial,
    /// `x²`
    Square,
    /// `x³`
    Cube,
    /// `10^x`
    PowerOfTen,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Reciprocal => "1/x",
            UnaryOp::Factorial => "x!",
            UnaryOp::Square => "x²",
            UnaryOp::Cube => "x³",
            UnaryOp::PowerOfTen => "10^x",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discrete unit of keypad input, as defined by the button grid:
/// digits, the decimal point, four binary operators, and the command keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A digit key `0`–`9`. The parser never yields a payload above 9; the
    /// engine renders any such payload as the error sentinel.
    Digit(u8),
    /// The decimal point key.
    Point,
    /// One of `+`, `-`, `*`, `/`.
    Binary(BinaryOp),
    /// The `=` key.
    Equals,
    /// The `%` key.
    Percent,
    /// The `+/-` key.
    ToggleSign,
    /// One of the direct-computation keys.
    Unary(UnaryOp),
    /// The `AC` key.
    Clear,
}

impl Token {
    /// Every key on the pad, in grid order.
    pub const fn all() -> &'static [Token] {
        &[
            Token::Unary(UnaryOp::Reciprocal),
            Token::Clear,
            Token::ToggleSign,
            Token::Percent,
            Token::Binary(BinaryOp::Divide),
            Token::Unary(UnaryOp::Factorial),
            Token::Digit(7),
            Token::Digit(8),
            Token::Digit(9),
            Token::Binary(BinaryOp::Multiply),
            Token::Unary(UnaryOp::Square),
            Token::Digit(4),
            Token::Digit(5),
            Token::Digit(6),
            Token::Binary(BinaryOp::Subtract),
            Token::Unary(UnaryOp::Cube),
            Token::Digit(1),
            Token::Digit(2),
            Token::Digit(3),
            Token::Binary(BinaryOp::Add),
            Token::Unary(UnaryOp::PowerOfTen),
            Token::Digit(0),
            Token::Point,
            Token::Equals,
        ]
    }
}

impl fmt::Display for Token {
    /// Writes the canonical keypad label.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Digit(d) => {
                let c = char::from_digit(u32::from(*d), 10).unwrap_or('?');
                write!(f, "{c}")
            }
            Token::Point => f.write_str("."),
            Token::Binary(op) => f.write_str(op.as_str()),
            Token::Equals => f.write_str("="),
            Token::Percent => f.write_str("%"),
            Token::ToggleSign => f.write_str("+/-"),
            Token::Unary(op) => f.write_str(op.as_str()),
            Token::Clear => f.write_str("AC"),
        }
    }
}

impl TryFrom<&str> for Token {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.len() == 1 {
            if let Some(d) = value.chars().next().and_then(|c| c.to_digit(10)) {
                return Ok(Token::Digit(d as u8));
            }
        }

        let lower = value.to_lowercase();

        match lower.as_str() {
            "." => Ok(Token::Point),
            "+" => Ok(Token::Binary(BinaryOp::Add)),
            "-" => Ok(Token::Binary(BinaryOp::Subtract)),
            "*" => Ok(Token::Binary(BinaryOp::Multiply)),
            "/" => Ok(Token::Binary(BinaryOp::Divide)),
            "=" => Ok(Token::Equals),
            "%" => Ok(Token::Percent),
            "+/-" => Ok(Token::ToggleSign),
            "1/x" => Ok(Token::Unary(UnaryOp::Reciprocal)),
            "x!" => Ok(Token::Unary(UnaryOp::Factorial)),
            "x²" | "x^2" => Ok(Token::Unary(UnaryOp::Square)),
            "x³" | "x^3" => Ok(Token::Unary(UnaryOp::Cube)),
            "10^x" => Ok(Token::Unary(UnaryOp::PowerOfTen)),
            "ac" => Ok(Token::Clear),
            _ => Err(anyhow::anyhow!(
                "Unknown token '{value}'. Supported tokens: 0-9, '.', +, -, *, /, =, %, +/-, 1/x, x!, x² (x^2), x³ (x^3), 10^x, AC."
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_label_roundtrip() {
        for token in Token::all() {
            let label = token.to_string();
            let parsed = Token::try_from(label.as_str()).expect("roundtrip should succeed");
            assert_eq!(*token, parsed, "label '{label}' did not roundtrip");
        }
    }

    #[test]
    fn digits_parse_to_digit_tokens() {
        for d in 0..=9u8 {
            let label = d.to_string();
            assert_eq!(Token::try_from(label.as_str()).unwrap(), Token::Digit(d));
        }
    }

    #[test]
    fn ascii_aliases_for_superscript_keys() {
        assert_eq!(Token::try_from("x^2").unwrap(), Token::Unary(UnaryOp::Square));
        assert_eq!(Token::try_from("x^3").unwrap(), Token::Unary(UnaryOp::Cube));
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!(Token::try_from("ac").unwrap(), Token::Clear);
        assert_eq!(Token::try_from("AC").unwrap(), Token::Clear);
        assert_eq!(Token::try_from("X!").unwrap(), Token::Unary(UnaryOp::Factorial));
        assert_eq!(Token::try_from("10^X").unwrap(), Token::Unary(UnaryOp::PowerOfTen));
    }

    #[test]
    fn unknown_token_error() {
        let err = Token::try_from("sqrt").unwrap_err();
        assert!(err.to_string().contains("Unknown token 'sqrt'"));
    }

    #[test]
    fn multi_digit_word_is_not_a_token() {
        assert!(Token::try_from("55").is_err());
    }
}
