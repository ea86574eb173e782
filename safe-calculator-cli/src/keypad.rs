use anyhow::bail;
use log::debug;
use safe_calculator::interpreter::{evaluate_expression, ERROR_PLACEHOLDER};

/// A single button on the calculator keypad.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    /// A digit, the decimal point or an operator symbol.
    Character(char),
    Clear,
    Backspace,
    ToggleSign,
    Equals,
}

impl TryFrom<char> for Key {
    type Error = anyhow::Error;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'C' => Ok(Key::Clear),
            '<' => Ok(Key::Backspace),
            's' => Ok(Key::ToggleSign),
            '=' => Ok(Key::Equals),
            '0'..='9' | '.' | '+' | '-' | '*' | '/' | '%' => Ok(Key::Character(value)),
            _ => bail!("Unknown key '{}'", value),
        }
    }
}

/// Parses a run of key presses, ignoring whitespace between them.
pub fn parse_keys(keys: &str) -> anyhow::Result<Vec<Key>> {
    keys.chars()
        .filter(|key| !key.is_whitespace())
        .map(Key::try_from)
        .collect()
}

/// The text shown on the calculator screen, driven one key press at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    text: String,
    last_error: Option<String>,
    showing_error: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Screen {
            text: "0".to_string(),
            last_error: None,
            showing_error: false,
        }
    }
}

impl Screen {
    /// What the screen currently shows.
    pub fn shown(&self) -> &str {
        if self.showing_error {
            ERROR_PLACEHOLDER
        } else {
            &self.text
        }
    }

    /// The message of the most recent failed evaluation, if the screen shows it.
    pub fn error(&self) -> Option<&str> {
        if self.showing_error {
            self.last_error.as_deref()
        } else {
            None
        }
    }

    pub fn press(&mut self, key: Key) {
        // The placeholder only lasts until the next key; the expression underneath is kept.
        self.showing_error = false;

        match key {
            Key::Clear => {
                self.text = "0".to_string();
                self.last_error = None;
            }
            Key::Backspace => {
                self.text.pop();
                if self.text.is_empty() {
                    self.text.push('0');
                }
            }
            Key::ToggleSign => {
                if let Some(unsigned) = self.text.strip_prefix('-') {
                    self.text = unsigned.to_string();
                } else if self.text != "0" {
                    self.text.insert(0, '-');
                }
            }
            Key::Equals => match evaluate_expression(&self.text) {
                Ok(result) => self.text = result,
                Err(message) => {
                    debug!("{:?} failed to evaluate: {}", self.text, message);
                    self.last_error = Some(message);
                    self.showing_error = true;
                }
            },
            Key::Character(character) => {
                if self.text == "0" {
                    self.text.clear();
                }
                self.text.push(character);
            }
        }
    }
}
