use std::fmt;

use rand::Rng;

/// Number of ASCII digits in a token.
pub const TOKEN_LEN: usize = 6;

const TOKEN_SPACE: u32 = 1_000_000;

/// Six-digit identifier correlating a staged upload across submissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Generates a random token in `000000..=999999`.
    ///
    /// Collisions between concurrent uploads are not detected.
    pub fn generate() -> Self {
        let value = rand::rng().random_range(0..TOKEN_SPACE);
        Self(format!("{value:0width$}", width = TOKEN_LEN))
    }

    /// Parses a caller-supplied token, returning `None` unless it is exactly
    /// six ASCII digits.
    pub fn parse(input: &str) -> Option<Self> {
        if input.len() == TOKEN_LEN && input.bytes().all(|byte| byte.is_ascii_digit()) {
            Some(Self(input.to_owned()))
        } else {
            None
        }
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}
