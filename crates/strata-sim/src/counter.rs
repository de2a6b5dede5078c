use std::collections::BTreeMap;
use std::fmt;

use strata_core::block::display_name;
use strata_core::types::BlockId;

/// Per-block-type encounter tally. Counts are `f64` so the same type carries
/// both raw counts and averages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncounterCounter {
    counts: BTreeMap<BlockId, f64>,
}

impl EncounterCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one encounter of `id`.
    pub fn record(&mut self, id: BlockId) {
        self.add(id, 1.0);
    }

    pub fn add(&mut self, id: BlockId, amount: f64) {
        *self.counts.entry(id).or_insert(0.0) += amount;
    }

    /// Element-wise sum of `other` into `self`.
    pub fn add_all(&mut self, other: &EncounterCounter) {
        for (&id, &amount) in &other.counts {
            self.add(id, amount);
        }
    }

    /// Divide every count by `n`. Dividing by zero leaves the counts alone.
    pub fn average(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let n = n as f64;
        for value in self.counts.values_mut() {
            *value /= n;
        }
    }

    /// Count for `id`, zero if it was never recorded.
    pub fn get(&self, id: BlockId) -> f64 {
        self.counts.get(&id).copied().unwrap_or(0.0)
    }

    /// Entries in ascending block-ID order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, f64)> + '_ {
        self.counts.iter().map(|(&id, &value)| (id, value))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum over all block types.
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }
}

impl fmt::Display for EncounterCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (id, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:.2}", display_name(id), value)?;
        }
        Ok(())
    }
}
