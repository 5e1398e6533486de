//! Ephemeral resource naming
//!
//! Generated names are `<prefix><n>` with `n` in `0..10000`. Uniqueness is
//! only enforced within a single run's local set; cross-run collisions are
//! an accepted limitation of the walkthrough.

use rand::Rng;
use std::collections::HashSet;

/// Per-run generator of unique prefixed resource names
#[derive(Debug, Default)]
pub struct NameGenerator {
    used: HashSet<String>,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh `<prefix><0-9999>` name, unique within this run
    pub fn next(&mut self, prefix: &str) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let candidate = format!("{}{}", prefix, rng.gen_range(0..10_000));
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
