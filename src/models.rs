/// One month's amount, month numbered 1..=12.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRecord {
    pub month: u32,
    pub amount: f64,
}

/// Month -> amount for one import, in first-seen month order. At most one
/// entry per month; re-inserting a month replaces its amount in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<NormalizedRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; returns the amount previously held for `month`.
    pub fn insert(&mut self, month: u32, amount: f64) -> Option<f64> {
        debug_assert!((1..=12).contains(&month));
        match self.records.iter_mut().find(|r| r.month == month) {
            Some(existing) => Some(std::mem::replace(&mut existing.amount, amount)),
            None => {
                self.records.push(NormalizedRecord { month, amount });
                None
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, month: u32) -> Option<f64> {
        self.records.iter().find(|r| r.month == month).map(|r| r.amount)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NormalizedRecord> {
        self.records.iter()
    }
}

/// A persisted month, as read back for one user and year.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAmount {
    pub month: u32,
    pub amount: f64,
    pub updated_at: String,
}
