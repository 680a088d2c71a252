//! Key → count map that never holds a zero or negative count.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct CountedMap {
    counts: HashMap<String, usize>,
    total: usize,
}

impl CountedMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) -> usize {
        self.total += 1;
        if let Some(count) = self.counts.get_mut(key) {
            *count += 1;
            return *count;
        }
        self.counts.insert(key.to_owned(), 1);
        1
    }

    /// Decrement `key`, removing it once its count reaches zero. Returns the
    /// remaining count, or `None` if the key was not present (caller bug: the
    /// map is left untouched).
    pub fn decrement(&mut self, key: &str) -> Option<usize> {
        let Some(count) = self.counts.get_mut(key) else {
            tracing::warn!(key, "decrement of absent key ignored");
            return None;
        };
        *count -= 1;
        self.total -= 1;
        let remaining = *count;
        if remaining == 0 {
            self.counts.remove(key);
        }
        Some(remaining)
    }

    pub fn get(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn max_count(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Keys by count descending, ties by key ascending.
    pub fn top(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self.iter().collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(limit);
        entries
    }

    /// Shannon entropy (bits) of the count distribution; 0 when empty.
    pub fn entropy_bits(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let total = self.total as f64;
        self.counts
            .values()
            .map(|&c| {
                let p = c as f64 / total;
                if p > 0.0 {
                    -p * p.log2()
                } else {
                    0.0
                }
            })
            .sum()
    }
}
