use rustc_hash::FxHashMap;

use crate::model::Dataset;
use crate::normalize::normalize;

/// Normalized key -> row indices carrying it, for one match type.
///
/// Per key, indices are in first-insertion (row) order and each row appears
/// at most once. Empty keys are never stored.
#[derive(Debug, Default)]
pub struct FieldIndex {
    rows_by_key: FxHashMap<String, Vec<usize>>,
}

impl FieldIndex {
    /// Index every row of `dataset` by the normalized values of `fields`.
    ///
    /// Fields missing from the header are skipped; so are values absent from
    /// short rows.
    pub fn build<S: AsRef<str>>(dataset: &Dataset, fields: &[S]) -> Self {
        let columns: Vec<usize> = fields
            .iter()
            .filter_map(|f| dataset.column(f.as_ref()))
            .collect();

        let mut index = Self::default();
        for (row, record) in dataset.records.iter().enumerate() {
            for &col in &columns {
                let key = normalize(record.get(col));
                if key.is_empty() {
                    continue;
                }
                index.insert(key, row);
            }
        }
        index
    }

    fn insert(&mut self, key: String, row: usize) {
        let rows = self.rows_by_key.entry(key).or_default();
        // Rows arrive in ascending order, so a repeat within one row is
        // always the last entry.
        if rows.last() != Some(&row) {
            rows.push(row);
        }
    }

    pub fn len(&self) -> usize {
        self.rows_by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows_by_key.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&[usize]> {
        self.rows_by_key.get(key).map(Vec::as_slice)
    }

    /// Row lists for keys shared by at least two rows.
    pub fn shared(&self) -> impl Iterator<Item = &[usize]> {
        self.rows_by_key
            .values()
            .filter(|rows| rows.len() >= 2)
            .map(Vec::as_slice)
    }
}
