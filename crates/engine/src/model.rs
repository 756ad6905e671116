use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One loaded row, raw field values in column order.
///
/// A row may be shorter or longer than the header (ragged input); missing
/// trailing fields read as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub values: Vec<String>,
}

impl Record {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn get(&self, col: usize) -> Option<&str> {
        self.values.get(col).map(String::as_str)
    }
}

/// Pre-loaded table. Row position in `records` is the unit of grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        Self { headers, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of the first header named `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Raw value of field `name` in row `row`, if the column exists and the
    /// row is long enough to carry it.
    pub fn field(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.column(name)?;
        self.records.get(row)?.get(col)
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Per-match-type indexing and union counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchTypeStats {
    pub name: String,
    /// Distinct non-empty normalized keys seen.
    pub distinct_keys: usize,
    /// Keys carried by two or more rows.
    pub shared_keys: usize,
    /// Unions that merged two previously separate groups.
    pub unions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionSummary {
    pub rows: usize,
    pub groups: usize,
    pub singletons: usize,
    /// Rows belonging to a group of size two or more.
    pub linked_rows: usize,
    pub largest_group: usize,
    /// Match types applied, in request order.
    pub enabled: Vec<String>,
    /// Requested names the profile does not define.
    pub ignored: Vec<String>,
    pub match_types: Vec<MatchTypeStats>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// One 1-based group id per input row, in row order.
    pub user_ids: Vec<usize>,
    pub summary: ResolutionSummary,
}
