use thiserror::Error;

use crate::token::{BinaryOp, Token, UnaryOp};

/// Sentinel shown in place of a numeric result when a computation has no
/// representable answer.
pub const ERROR_DISPLAY: &str = "Error";

/// Arithmetic failures. All of them collapse into [`ERROR_DISPLAY`] inside
/// the engine; none escape `apply_token`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
enum MathError {
    #[error("division by zero")]
    DivideByZero,
    #[error("factorial of a negative or non-integer value")]
    FactorialDomain,
    #[error("display does not hold a number")]
    NotANumber,
    #[error("result is not a finite number")]
    Overflow,
}

/// The calculator engine: display text, pending operator, saved left-hand
/// operand, and the fresh-operand flag.
///
/// Construction is equivalent to pressing `AC`. Drive the engine by calling
/// [`Calculator::apply_token`] once per key press and reading
/// [`Calculator::display`] afterwards; that pair is the entire contract.
#[derive(Debug, Clone)]
pub struct Calculator {
    display: String,
    pending: BinaryOp,
    accumulator: f64,
    awaiting_operand: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            pending: BinaryOp::Add,
            accumulator: 0.0,
            awaiting_operand: true,
        }
    }

    /// The current display text: always a finite decimal number, the digits
    /// being typed, or [`ERROR_DISPLAY`].
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Feed one key press into the engine and return the resulting display.
    pub fn apply_token(&mut self, token: Token) -> &str {
        // An errored display swallows the next key, whatever it is, and
        // behaves like `AC`.
        if self.display == ERROR_DISPLAY {
            self.clear_all();
            return self.display();
        }

        match token {
            Token::Clear => self.clear_all(),
            // The parser only builds digits 0-9, but the payload is open to
            // library callers; anything else becomes the sentinel rather than
            // a stray character in the display.
            Token::Digit(d) => match char::from_digit(u32::from(d), 10) {
                Some(key) => self.enter(key),
                None => self.show(Err(MathError::NotANumber)),
            },
            Token::Point => self.enter('.'),
            Token::Binary(op) => self.chain_operator(op),
            Token::Equals => {
                let result = self.evaluate_pending();
                self.show(result);
                self.reset();
            }
            Token::Percent => {
                let result = self.value().map(|v| v / 100.0);
                self.show(result);
                self.reset();
            }
            Token::ToggleSign => self.toggle_sign(),
            Token::Unary(op) => {
                let result = self.value().and_then(|v| eval_unary(op, v));
                self.show(result);
            }
        }

        self.display()
    }

    /// Digit and point keys share one path: replace a bare `"0"` or a stale
    /// result, append otherwise. Nothing guards against a second point; a
    /// display that stops parsing becomes the sentinel when a number is next
    /// needed.
    fn enter(&mut self, key: char) {
        if self.display == "0" || self.awaiting_operand {
            self.display.clear();
            self.display.push(key);
            self.awaiting_operand = false;
        } else {
            self.display.push(key);
        }
    }

    /// Apply the pending operator, then install `next` as the new pending
    /// operator with the result as its left-hand operand.
    fn chain_operator(&mut self, next: BinaryOp) {
        match self.evaluate_pending() {
            Ok(v) => {
                self.display = format_number(v);
                self.accumulator = v;
            }
            Err(_) => {
                self.display = ERROR_DISPLAY.to_string();
                self.accumulator = 0.0;
            }
        }
        self.pending = next;
        self.awaiting_operand = true;
    }

    fn evaluate_pending(&self) -> Result<f64, MathError> {
        let operand = self.value()?;
        eval_binary(self.pending, self.accumulator, operand)
    }

    /// `+/-`: prefix a minus onto the display string as typed; a negative
    /// value is replaced by its formatted absolute value; zero is untouched.
    fn toggle_sign(&mut self) {
        match self.value() {
            Ok(v) if v > 0.0 => self.display.insert(0, '-'),
            Ok(v) if v < 0.0 => self.display = format_number(v.abs()),
            Ok(_) => {}
            Err(_) => self.display = ERROR_DISPLAY.to_string(),
        }
    }

    /// Numeric value of the display. Permissive entry can leave strings like
    /// `"1.2.3"` here; those surface as [`MathError::NotANumber`].
    fn value(&self) -> Result<f64, MathError> {
        self.display.parse::<f64>().map_err(|_| MathError::NotANumber)
    }

    fn show(&mut self, result: Result<f64, MathError>) {
        self.display = match result {
            Ok(v) => format_number(v),
            Err(_) => ERROR_DISPLAY.to_string(),
        };
    }

    /// Return the pending operator to identity (addition onto zero), and arm
    /// the fresh-operand flag. The display is left to the caller.
    fn reset(&mut self) {
        self.pending = BinaryOp::Add;
        self.accumulator = 0.0;
        self.awaiting_operand = true;
    }

    fn clear_all(&mut self) {
        self.display.clear();
        self.display.push('0');
        self.reset();
    }
}

fn eval_binary(op: BinaryOp, lhs: f64, rhs: f64) -> Result<f64, MathError> {
    let value = match op {
        BinaryOp::Add => lhs + rhs,
        BinaryOp::Subtract => lhs - rhs,
        BinaryOp::Multiply => lhs * rhs,
        BinaryOp::Divide => {
            if rhs == 0.0 {
                return Err(MathError::DivideByZero);
            }
            lhs / rhs
        }
    };
    finite(value)
}

fn eval_unary(op: UnaryOp, value: f64) -> Result<f64, MathError> {
    match op {
        UnaryOp::Reciprocal => {
            if value == 0.0 {
                return Err(MathError::DivideByZero);
            }
            finite(1.0 / value)
        }
        UnaryOp::Factorial => factorial(value),
        UnaryOp::Square => finite(value * value),
        UnaryOp::Cube => finite(value * value * value),
        UnaryOp::PowerOfTen => finite(10f64.powf(value)),
    }
}

fn factorial(value: f64) -> Result<f64, MathError> {
    if value < 0.0 || value.fract() != 0.0 {
        return Err(MathError::FactorialDomain);
    }
    // 171! already exceeds f64 range; refuse before looping on huge inputs.
    if value > 170.0 {
        return Err(MathError::Overflow);
    }

    let n = value as u32;
    let mut product = 1.0f64;
    for i in 2..=n {
        product *= f64::from(i);
    }
    Ok(product)
}

/// Clamp the result to the display invariant: only finite numbers may be
/// rendered.
fn finite(value: f64) -> Result<f64, MathError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MathError::Overflow)
    }
}

/// Results exactly equal to an integer drop the fractional part; everything
/// else keeps the full decimal form.
fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Also catches -0.0, which would otherwise render with a stray sign.
        "0".to_string()
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    fn press(calc: &mut Calculator, keys: &[&str]) -> String {
        for key in keys {
            let token = Token::try_from(*key).expect("test key must parse");
            calc.apply_token(token);
        }
        calc.display().to_string()
    }

    #[test]
    fn digit_sequence_concatenates() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["1", "2", "3"]), "123");
    }

    #[test]
    fn leading_zero_is_replaced() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["0", "5"]), "5");
    }

    #[test]
    fn clear_resets_everything() {
        let mut calc = Calculator::new();
        press(&mut calc, &["7", "+", "8"]);

        calc.apply_token(Token::Clear);

        assert_eq!(calc.display(), "0");
        assert_eq!(calc.accumulator, 0.0);
        assert_eq!(calc.pending, BinaryOp::Add);
        assert!(calc.awaiting_operand);
    }

    #[test]
    fn addition_example() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["5", "+", "3", "="]), "8");
    }

    #[test]
    fn equals_is_idempotent() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["5", "+", "3", "="]), "8");
        assert_eq!(press(&mut calc, &["="]), "8");
    }

    #[test]
    fn chained_operators_evaluate_left_to_right() {
        let mut calc = Calculator::new();
        // No precedence: (1 + 2) * 3.
        assert_eq!(press(&mut calc, &["1", "+", "2", "*", "3", "="]), "9");
    }

    #[test]
    fn operator_press_settles_the_running_value() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["5", "+"]), "5");
        assert_eq!(press(&mut calc, &["3"]), "3");
    }

    #[test]
    fn divide_by_zero_shows_error_sentinel() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["7", "/", "0", "="]), "Error");
    }

    #[test]
    fn error_swallows_the_next_key() {
        let mut calc = Calculator::new();
        press(&mut calc, &["7", "/", "0", "="]);

        // The first key after an error only clears; the one after that lands.
        assert_eq!(press(&mut calc, &["5"]), "0");
        assert_eq!(press(&mut calc, &["5"]), "5");
    }

    #[test]
    fn factorial_example() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["9", "x!"]), "362880");
    }

    #[test]
    fn factorial_of_zero_is_one() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["0", "x!"]), "1");
    }

    #[test]
    fn factorial_rejects_fractions_and_negatives() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["5", ".", "5", "x!"]), "Error");

        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["5", "+/-", "x!"]), "Error");
    }

    #[test]
    fn square_then_add_example() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["4", "x²", "+", "1", "="]), "17");
    }

    #[test]
    fn cube_and_power_of_ten() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["3", "x³"]), "27");

        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["2", "10^x"]), "100");
    }

    #[test]
    fn reciprocal() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["4", "1/x"]), "0.25");

        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["0", "1/x"]), "Error");
    }

    #[test]
    fn digit_appends_to_a_unary_result() {
        // Unary keys do not arm the fresh-operand flag, so the next digit
        // extends the result, exactly as the keypad behaves.
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["5", "x²", "3"]), "253");
    }

    #[test]
    fn percent_divides_by_one_hundred() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["5", "0", "%"]), "0.5");

        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["2", "0", "0", "%"]), "2");
    }

    #[test]
    fn toggle_sign_prefixes_the_typed_digits() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["5", "+/-"]), "-5");
        assert_eq!(press(&mut calc, &["+/-"]), "5");
    }

    #[test]
    fn toggle_sign_leaves_zero_alone() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["0", "+/-"]), "0");
    }

    #[test]
    fn toggle_sign_reformats_on_the_way_back() {
        // "-5.50" parses to -5.5; the absolute value is formatted, so the
        // trailing zero typed by the user is gone.
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["5", ".", "5", "0", "+/-"]), "-5.50");
        assert_eq!(press(&mut calc, &["+/-"]), "5.5");
    }

    #[test]
    fn negative_operand_flows_through_evaluation() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["5", "+/-", "+", "3", "="]), "-2");
    }

    #[test]
    fn negative_times_zero_shows_plain_zero() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["5", "+/-", "*", "0", "="]), "0");
    }

    #[test]
    fn point_replaces_a_bare_zero() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["0", ".", "5"]), ".5");
    }

    #[test]
    fn second_point_is_not_guarded() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["1", ".", "2", ".", "3"]), "1.2.3");
        // The malformed number surfaces as the sentinel once it is needed.
        assert_eq!(press(&mut calc, &["+"]), "Error");
    }

    #[test]
    fn fresh_operand_after_equals() {
        let mut calc = Calculator::new();
        press(&mut calc, &["5", "+", "3", "="]);
        assert_eq!(press(&mut calc, &["2"]), "2");
        assert_eq!(press(&mut calc, &["="]), "2");
    }

    #[test]
    fn integral_results_drop_the_fraction() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["6", "/", "2", "="]), "3");

        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["7", "/", "2", "="]), "3.5");
    }

    #[test]
    fn overflow_collapses_to_error() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["9", "9", "9", "10^x"]), "Error");

        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, &["9", "9", "9", "x!"]), "Error");
    }

    #[test]
    fn largest_finite_factorial() {
        let mut calc = Calculator::new();
        let shown = press(&mut calc, &["1", "7", "0", "x!"]);
        assert_ne!(shown, "Error");
        assert!(shown.parse::<f64>().unwrap().is_finite());
    }

    #[test]
    fn eval_binary_reports_division_by_zero() {
        assert_eq!(eval_binary(BinaryOp::Divide, 1.0, 0.0), Err(MathError::DivideByZero));
        assert_eq!(eval_binary(BinaryOp::Divide, 1.0, 4.0), Ok(0.25));
    }

    #[test]
    fn factorial_domain_errors() {
        assert_eq!(factorial(-1.0), Err(MathError::FactorialDomain));
        assert_eq!(factorial(2.5), Err(MathError::FactorialDomain));
        assert_eq!(factorial(171.0), Err(MathError::Overflow));
        assert_eq!(factorial(5.0), Ok(120.0));
    }

    #[test]
    fn format_number_matches_display_rule() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(362880.0), "362880");
        assert_eq!(format_number(-5.0), "-5");
    }

    #[test]
    fn out_of_range_digit_payload_shows_the_sentinel() {
        let mut calc = Calculator::new();
        assert_eq!(calc.apply_token(Token::Digit(42)), "Error");

        // Recovery matches every other error: the next key clears, the one
        // after that lands.
        assert_eq!(calc.apply_token(Token::Digit(7)), "0");
        assert_eq!(calc.apply_token(Token::Digit(7)), "7");
    }

    #[test]
    fn default_matches_new() {
        let calc = Calculator::default();
        assert_eq!(calc.display(), "0");
    }
}
