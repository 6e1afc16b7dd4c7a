use rand::{Rng, RngExt};

use super::reference::ApiKey;

/// Consumable credential pool: randomized order, each key handed out at most
/// once. Move-only by design; every resolution session gets its own pool so
/// concurrent sessions cannot steal each other's credentials.
#[derive(Debug, Clone)]
pub struct KeyPool {
    keys: Vec<ApiKey>,
    // index of the next unconsumed key
    cursor: usize,
}

impl KeyPool {
    pub fn new(keys: Vec<ApiKey>) -> Self {
        Self { keys, cursor: 0 }
    }

    /// Builds a pool from the comma-delimited environment form.
    pub fn from_delimited(list: &str) -> Self {
        Self::new(ApiKey::parse_list(list))
    }

    /// Fisher-Yates shuffle of the unconsumed keys, uniform over
    /// permutations.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let keys = &mut self.keys[self.cursor..];
        for i in (1..keys.len()).rev() {
            let j = rng.random_range(0..=i);
            keys.swap(i, j);
        }
    }

    /// Convenience for the common construct-then-shuffle flow.
    pub fn shuffled(mut self) -> Self {
        self.shuffle(&mut rand::rng());
        self
    }

    /// Consumes and returns the next credential, front first. `None` once
    /// the pool is exhausted.
    pub fn next_key(&mut self) -> Option<ApiKey> {
        let key = self.keys.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(key)
    }

    pub fn remaining(&self) -> usize {
        self.keys.len() - self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

/// Ordered, reusable mirror pool: fixed preference order, fully re-iterated
/// on every resolution call, never mutated by use. The designated fallback
/// is distinguished from the ordered entries and consulted only after every
/// one of them has failed.
#[derive(Debug, Clone, Default)]
pub struct MirrorList {
    mirrors: Vec<String>,
    fallback: Option<String>,
}

impl MirrorList {
    pub fn new(mirrors: Vec<String>, fallback: Option<String>) -> Self {
        Self { mirrors, fallback }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.mirrors.iter().map(String::as_str)
    }

    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    pub fn len(&self) -> usize {
        self.mirrors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mirrors.is_empty()
    }
}
