// src/strength.rs
//! Coarse password strength rating
//!
//! One point each for: length >= 8, length >= 12, an uppercase letter, a
//! lowercase letter, a digit, any other character. Length counts UTF-16 code
//! units, so scores agree with the browser-side meter for astral characters.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl Strength {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw 0..=6 score behind [`check`]
pub fn score(password: &str) -> u8 {
    let len = password.encode_utf16().count();
    let criteria = [
        len >= 8,
        len >= 12,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    criteria.iter().filter(|met| **met).count() as u8
}

pub fn check(password: &str) -> Strength {
    match score(password) {
        s if s >= 5 => Strength::Strong,
        s if s >= 3 => Strength::Medium,
        _ => Strength::Weak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_follow_score_thresholds() {
        assert_eq!(check(""), Strength::Weak);
        assert_eq!(check("abc"), Strength::Weak);
        assert_eq!(check("abcdefgh"), Strength::Weak); // length + lower = 2
        assert_eq!(check("abcdefgH"), Strength::Medium); // 3
        assert_eq!(check("Tr0ub4dor&3"), Strength::Strong); // 5
        assert_eq!(check("correct-Horse-9"), Strength::Strong); // 6
    }

    #[test]
    fn non_ascii_counts_as_special_and_length_is_in_utf16_units() {
        assert_eq!(score("ééééééé"), 1);
        assert_eq!(score("éééééééé"), 2);
        // Each emoji is a surrogate pair: 4 chars, 8 units
        assert_eq!(score("🔐🔐🔐🔐"), 2);
        assert_eq!(score("🔐🔐🔐"), 1);
    }
}
