//! Insertion-ordered quantity sums.

/// Running totals keyed by `K`, kept in first-seen key order.
///
/// Lookups are linear; tallies hold a handful of hospitals or items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<K> {
    entries: Vec<(K, u64)>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> Tally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` to the total for `key`, appending the key if unseen.
    pub fn add(&mut self, key: K, quantity: u64) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, total)) => *total = total.saturating_add(quantity),
            None => self.entries.push((key, quantity)),
        }
    }

    pub fn get(&self, key: &K) -> Option<u64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(k, total)| (k, *total))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all keys.
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, (_, q)| acc.saturating_add(*q))
    }
}

impl<K: PartialEq> FromIterator<(K, u64)> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for (key, quantity) in iter {
            tally.add(key, quantity);
        }
        tally
    }
}
