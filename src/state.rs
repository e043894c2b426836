//! Calculator state driven by key presses.
//!
//! `CalcState` is a plain value: every key press produces a new state and
//! leaves the old one untouched, so a front end can keep history or diff
//! renders however it likes.

use crate::{
    error::ErrorKind,
    eval::evaluate,
    format::{format_number, format_operand},
    parse::Op,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Point,
    Op(Op),
    LeftParen,
    RightParen,
    Ans,
    Backspace,
    Clear,
    Equals,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalcState {
    /// The last evaluated expression, shown above the display.
    pub expression: String,
    /// What is being typed, or the formatted result right after `=`.
    pub input: String,
    /// Last successful result.
    pub ans: Option<f64>,
    pub error: Option<ErrorKind>,
    /// `input` holds a result rather than typed text.
    evaluated: bool,
}

impl CalcState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, key: Key) -> CalcState {
        let mut next = self.clone();
        if key != Key::Equals {
            next.error = None;
        }

        match key {
            Key::Digit(d) if d > 9 => {}
            Key::Digit(d) => {
                next.start_fresh();
                next.input.push(char::from(b'0' + d));
            }
            Key::Point => {
                next.start_fresh();
                next.input.push('.');
            }
            Key::LeftParen => {
                next.start_fresh();
                next.input.push('(');
            }
            Key::Op(op) => {
                next.continue_from_answer();
                next.input.push(op.symbol());
            }
            Key::RightParen => {
                next.continue_from_answer();
                next.input.push(')');
            }
            Key::Ans => {
                if let Some(ans) = next.ans {
                    next.start_fresh();
                    next.input.push_str(&format_operand(ans));
                }
            }
            Key::Backspace => {
                next.evaluated = false;
                next.input.pop();
            }
            Key::Clear => {
                next.input.clear();
                next.expression.clear();
                next.evaluated = false;
            }
            // the result is already on display
            Key::Equals if next.evaluated => {}
            Key::Equals => match evaluate(&next.input) {
                Ok(value) => {
                    tracing::debug!(input = %next.input, value, "answer updated");
                    next.expression = std::mem::replace(&mut next.input, format_number(value));
                    next.ans = Some(value);
                    next.error = None;
                    next.evaluated = true;
                }
                Err(e) => {
                    next.error = Some(e.kind());
                }
            },
        }
        next
    }

    /// Feeds every character of `keys` through [`CalcState::press`].
    /// Characters without a key are skipped.
    pub fn press_str(&self, keys: &str) -> CalcState {
        keys.chars()
            .filter_map(key_for)
            .fold(self.clone(), |state, key| state.press(key))
    }

    /// Text for the main display.
    pub fn display(&self) -> String {
        match self.error {
            Some(error) => error.message().to_string(),
            None if self.input.is_empty() => "0".to_string(),
            None => self.input.clone(),
        }
    }

    /// Typing after `=` begins a new expression.
    fn start_fresh(&mut self) {
        if self.evaluated {
            self.input.clear();
            self.expression.clear();
            self.evaluated = false;
        }
    }

    /// An operator after `=` applies to the exact answer, not its display.
    fn continue_from_answer(&mut self) {
        if self.evaluated {
            if let Some(ans) = self.ans {
                self.input = format_operand(ans);
            }
            self.evaluated = false;
        }
    }
}

/// Maps a typed character to its calculator key.
pub fn key_for(c: char) -> Option<Key> {
    Some(match c {
        '0'..='9' => Key::Digit(c as u8 - b'0'),
        '.' => Key::Point,
        '+' => Key::Op(Op::Add),
        '-' => Key::Op(Op::Sub),
        '*' => Key::Op(Op::Mul),
        '/' => Key::Op(Op::Div),
        '(' => Key::LeftParen,
        ')' => Key::RightParen,
        '=' => Key::Equals,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_shows_zero() {
        assert_eq!(CalcState::new().display(), "0");
    }

    #[test]
    fn typing_and_equals() {
        let state = CalcState::new().press_str("2+3*4");
        assert_eq!(state.display(), "2+3*4");

        let state = state.press(Key::Equals);
        assert_eq!(state.ans, Some(14.0));
        assert_eq!(state.expression, "2+3*4");
        assert_eq!(state.input, "14");
        assert_eq!(state.display(), "14");
    }

    #[test]
    fn presses_do_not_mutate_the_original() {
        let before = CalcState::new().press_str("12");
        let after = before.press(Key::Backspace);
        assert_eq!(before.input, "12");
        assert_eq!(after.input, "1");
    }

    #[test]
    fn failure_keeps_answer_and_input() {
        let state = CalcState::new().press_str("6/4=").press_str("10/0");
        let failed = state.press(Key::Equals);
        assert_eq!(failed.error, Some(ErrorKind::DivisionByZero));
        assert_eq!(failed.ans, Some(1.5));
        assert_eq!(failed.input, "10/0");
        assert_eq!(failed.display(), "Cannot divide by zero");

        // editing clears the error
        let edited = failed.press(Key::Backspace);
        assert_eq!(edited.error, None);
        assert_eq!(edited.display(), "10/");
    }

    #[test]
    fn operator_after_equals_continues_from_answer() {
        let state = CalcState::new().press_str("2*3=").press_str("+1");
        assert_eq!(state.input, "6+1");
        assert_eq!(state.press(Key::Equals).ans, Some(7.0));
    }

    #[test]
    fn negative_answer_is_parenthesized() {
        let state = CalcState::new().press_str("2-5=").press_str("*2=");
        assert_eq!(state.expression, "(0-3)*2");
        assert_eq!(state.ans, Some(-6.0));
        assert_eq!(state.display(), "-6");
    }

    #[test]
    fn digit_after_equals_starts_over() {
        let state = CalcState::new().press_str("1+1=").press_str("9");
        assert_eq!(state.input, "9");
        assert!(state.expression.is_empty());
        assert_eq!(state.ans, Some(2.0));
    }

    #[test]
    fn ans_key() {
        let state = CalcState::new().press(Key::Ans);
        assert_eq!(state.input, "");

        let state = CalcState::new()
            .press_str("1/4=")
            .press_str("3+")
            .press(Key::Ans);
        assert_eq!(state.input, "3+0.25");
        assert_eq!(state.press(Key::Equals).ans, Some(3.25));
    }

    #[test]
    fn clear_keeps_answer() {
        let state = CalcState::new().press_str("8-3-2=").press_str("7").press(Key::Clear);
        assert_eq!(state.display(), "0");
        assert_eq!(state.ans, Some(3.0));
    }

    #[test]
    fn equals_twice_keeps_the_result() {
        let once = CalcState::new().press_str("2+3=");
        let twice = once.press(Key::Equals);
        assert_eq!(twice, once);
        assert_eq!(twice.display(), "5");
        assert_eq!(twice.error, None);
    }

    #[test]
    fn backspace_after_equals_edits_the_result() {
        let state = CalcState::new().press_str("12*2=").press(Key::Backspace);
        assert_eq!(state.input, "2");
        assert_eq!(state.expression, "12*2");

        let state = state.press_str("5=");
        assert_eq!(state.ans, Some(25.0));
    }

    #[test]
    fn answer_is_reused_at_full_precision() {
        let state = CalcState::new().press_str("1/3=");
        assert_eq!(state.display(), "0.3333333333");

        let state = state.press_str("*3=");
        assert_eq!(state.expression, "0.3333333333333333*3");
        assert_eq!(state.ans, Some(1.0));
    }

    #[test]
    fn out_of_range_digit_is_ignored() {
        let state = CalcState::new().press_str("4").press(Key::Digit(12));
        assert_eq!(state.input, "4");
    }

    #[test]
    fn unknown_characters_are_not_keys() {
        assert_eq!(key_for('#'), None);
        assert_eq!(key_for('7'), Some(Key::Digit(7)));
        assert_eq!(key_for('/'), Some(Key::Op(Op::Div)));
    }
}
