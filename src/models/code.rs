// ABOUTME: Six-digit access code used as the retrieval key for anonymous uploads
// Generation draws from OS randomness and samples [100000, 999999] uniformly

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const CODE_LENGTH: usize = 6;
pub const MIN_CODE: u32 = 100_000;
pub const MAX_CODE: u32 = 999_999;

lazy_static! {
    // ASCII digits only; `\d` would also accept other Unicode digits
    static ref CODE_PATTERN: Regex = Regex::new(r"^[0-9]{6}$").expect("code regex should compile");
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessCode(String);

impl AccessCode {
    /// Accepts exactly six ASCII digits. Leading zeros are fine for lookups
    /// even though generated codes never start with one.
    pub fn parse(input: &str) -> Option<Self> {
        if Self::is_valid(input) {
            Some(Self(input.to_string()))
        } else {
            None
        }
    }

    pub fn is_valid(input: &str) -> bool {
        CODE_PATTERN.is_match(input)
    }

    pub fn generate() -> Result<Self, getrandom::Error> {
        let value = random_in_range(MIN_CODE, MAX_CODE)?;
        Ok(Self::from_number(value))
    }

    pub(crate) fn from_number(value: u32) -> Self {
        Self(format!("{value:06}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Uniform draw over `[low, high]` by rejection sampling, so no value is
/// favoured by the modulo.
fn random_in_range(low: u32, high: u32) -> Result<u32, getrandom::Error> {
    let span = u64::from(high - low) + 1;
    let zone = u64::MAX - (u64::MAX % span);
    loop {
        let draw = getrandom::u64()?;
        if draw < zone {
            let offset = u32::try_from(draw % span).unwrap_or(0);
            return Ok(low + offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_requires_six_ascii_digits() {
        assert!(AccessCode::parse("123456").is_some());
        assert!(AccessCode::parse("012345").is_some());
        assert!(AccessCode::parse("12345").is_none());
        assert!(AccessCode::parse("1234567").is_none());
        assert!(AccessCode::parse("12a456").is_none());
        assert!(AccessCode::parse(" 23456").is_none());
        assert!(AccessCode::parse("١٢٣٤٥٦").is_none());
    }

    #[test]
    fn generated_code_is_six_digits_in_range() {
        for _ in 0..1000 {
            let code = AccessCode::generate().expect("os randomness");
            assert_eq!(code.as_str().len(), CODE_LENGTH);
            let value: u32 = code.as_str().parse().expect("numeric");
            assert!((MIN_CODE..=MAX_CODE).contains(&value));
        }
    }

    #[test]
    fn from_number_pads_to_six() {
        assert_eq!(AccessCode::from_number(42).as_str(), "000042");
        assert_eq!(AccessCode::from_number(999_999).as_str(), "999999");
    }
}
