// src/generator.rs
//! Random password generation
//!
//! Guarantees one character from every enabled class, fills the rest from
//! their union, then shuffles. Uses the thread CSPRNG.

use rand::seq::{IndexedRandom, SliceRandom};

use crate::consts::MAX_GENERATED_LEN;
use crate::error::{CoreError, Result};

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";
/// Characters easy to confuse when read aloud or copied by hand
pub const SIMILAR: &str = "il1Lo0O";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
    pub exclude_similar: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
            exclude_similar: false,
        }
    }
}

impl GeneratorOptions {
    /// Enabled character classes, similar-looking characters already removed
    fn classes(&self) -> Vec<Vec<char>> {
        [
            (self.uppercase, UPPERCASE),
            (self.lowercase, LOWERCASE),
            (self.numbers, NUMBERS),
            (self.symbols, SYMBOLS),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, set)| {
            set.chars()
                .filter(|c| !(self.exclude_similar && SIMILAR.contains(*c)))
                .collect()
        })
        .collect()
    }
}

pub fn generate(options: &GeneratorOptions) -> Result<String> {
    let classes = options.classes();
    if classes.is_empty() {
        return Err(CoreError::InvalidOptions("select at least one character class"));
    }
    if options.length < classes.len() {
        return Err(CoreError::InvalidOptions(
            "length is shorter than the number of selected classes",
        ));
    }
    if options.length > MAX_GENERATED_LEN {
        return Err(CoreError::InvalidOptions("length exceeds 256 characters"));
    }

    let mut rng = rand::rng();
    let charset: Vec<char> = classes.iter().flatten().copied().collect();

    let mut password: Vec<char> = Vec::with_capacity(options.length);
    for class in &classes {
        if let Some(c) = class.choose(&mut rng) {
            password.push(*c);
        }
    }
    while password.len() < options.length {
        if let Some(c) = charset.choose(&mut rng) {
            password.push(*c);
        }
    }
    password.shuffle(&mut rng);

    Ok(password.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_drop_similar_characters_when_asked() {
        let options = GeneratorOptions {
            exclude_similar: true,
            ..GeneratorOptions::default()
        };
        for class in options.classes() {
            assert!(class.iter().all(|c| !SIMILAR.contains(*c)));
        }
    }
}
