//! Placeholder tokens substituted for detected spans during a weave pass.
//!
//! A token looks like `@__ELEMENT-{salt}-{counter}__@`. The salt is drawn
//! per pass from the caller's random source and the counter increases with
//! every token, so tokens are unique within a pass. Tokens contain no comma,
//! dot or whitespace and are delimited by `@`, which keeps them outside the
//! alphabet of every custom matcher pattern.

use rand::Rng;
use regex::Regex;
use tracing::trace;

const TOKEN_PREFIX: &str = "@__ELEMENT-";
const TOKEN_SUFFIX: &str = "__@";

/// Salts are 40-bit values rendered in lowercase hex.
const SALT_BOUND: u64 = 0x100_0000_0000;

#[derive(Debug)]
pub struct TokenGenerator {
    salt: u64,
    counter: u64,
}

impl TokenGenerator {
    /// Draws a salt that does not already occur in `text`, so no literal in
    /// the input can be read back as one of this pass's tokens.
    pub fn new<R: Rng>(rng: &mut R, text: &str) -> Self {
        loop {
            let generator = Self::with_salt(rng.gen_range(0..SALT_BOUND));
            if !text.contains(&generator.salted_body()) {
                return generator;
            }
            trace!(salt = generator.salt, "salt collides with input text, redrawing");
        }
    }

    pub fn with_salt(salt: u64) -> Self {
        Self { salt, counter: 0 }
    }

    pub fn salt(&self) -> u64 {
        self.salt
    }

    pub fn next_token(&mut self) -> String {
        let token = format!(
            "{TOKEN_PREFIX}{:x}-{}{TOKEN_SUFFIX}",
            self.salt, self.counter
        );
        self.counter += 1;
        token
    }

    /// Pattern matching any token of this generator's salt.
    pub fn pattern(&self) -> Regex {
        Regex::new(&format!(
            "{}{:x}-[0-9]+{}",
            regex::escape(TOKEN_PREFIX),
            self.salt,
            regex::escape(TOKEN_SUFFIX)
        ))
        .unwrap()
    }

    /// Token prefix without the leading `@`, which a preceding token's
    /// trailing `@` could otherwise supply.
    fn salted_body(&self) -> String {
        format!("{}{:x}-", &TOKEN_PREFIX[1..], self.salt)
    }
}
