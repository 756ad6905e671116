use rustc_hash::FxHashMap;

use crate::config::Selection;
use crate::disjoint_set::DisjointSet;
use crate::index::FieldIndex;
use crate::model::{Dataset, MatchTypeStats, Resolution, ResolutionSummary};

/// Group rows that share a normalized value under any enabled match type and
/// number the groups 1, 2, ... in the order their first row appears.
///
/// Never fails: rows without usable values simply stay singletons, and an
/// empty selection leaves every row in its own group.
pub fn resolve(dataset: &Dataset, selection: &Selection<'_>) -> Resolution {
    let n = dataset.len();
    let mut sets = DisjointSet::new(n);
    let mut match_types = Vec::with_capacity(selection.enabled.len());

    for mt in &selection.enabled {
        let index = FieldIndex::build(dataset, mt.fields.as_slice());

        // Linking the first row to each other row is enough: union is
        // transitive, so the key's rows end up in one set.
        let mut shared_keys = 0;
        let mut unions = 0;
        for rows in index.shared() {
            shared_keys += 1;
            let base = rows[0];
            for &other in &rows[1..] {
                if sets.union(base, other) {
                    unions += 1;
                }
            }
        }

        log::debug!(
            "match type '{}': {} distinct keys, {} shared, {} unions",
            mt.name,
            index.len(),
            shared_keys,
            unions
        );
        match_types.push(MatchTypeStats {
            name: mt.name.clone(),
            distinct_keys: index.len(),
            shared_keys,
            unions,
        });
    }

    let (user_ids, sizes) = assign_ids(&mut sets);

    let singletons = sizes.iter().filter(|&&s| s == 1).count();
    let summary = ResolutionSummary {
        rows: n,
        groups: sizes.len(),
        singletons,
        linked_rows: n - singletons,
        largest_group: sizes.iter().copied().max().unwrap_or(0),
        enabled: selection.enabled_names(),
        ignored: selection.ignored.clone(),
        match_types,
    };

    log::info!(
        "resolved {} rows into {} groups ({} linked rows)",
        summary.rows,
        summary.groups,
        summary.linked_rows
    );

    Resolution { user_ids, summary }
}

/// Scan rows in order, giving each new root the next id. Returns the id per
/// row and the size of each group (indexed by `id - 1`).
fn assign_ids(sets: &mut DisjointSet) -> (Vec<usize>, Vec<usize>) {
    let n = sets.len();
    let mut id_by_root: FxHashMap<usize, usize> = FxHashMap::default();
    let mut user_ids = Vec::with_capacity(n);
    let mut sizes: Vec<usize> = Vec::new();

    for i in 0..n {
        let root = sets.find(i);
        let id = *id_by_root.entry(root).or_insert_with(|| {
            sizes.push(0);
            sizes.len()
        });
        sizes[id - 1] += 1;
        user_ids.push(id);
    }

    (user_ids, sizes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchProfile;
    use crate::model::Record;

    fn emails(values: &[&str]) -> Dataset {
        Dataset::new(
            vec!["Email".into()],
            values.iter().map(|v| Record::new([*v])).collect(),
        )
    }

    #[test]
    fn case_insensitive_email_match() {
        let ds = emails(&["A@x.com", "a@x.com", "b@x.com"]);
        let profile = MatchProfile::default();
        let r = resolve(&ds, &profile.select(&["email"]));
        assert_eq!(r.user_ids, vec![1, 1, 2]);
        assert_eq!(r.summary.groups, 2);
        assert_eq!(r.summary.linked_rows, 2);
        assert_eq!(r.summary.singletons, 1);
        assert_eq!(r.summary.largest_group, 2);
    }

    #[test]
    fn nothing_enabled_means_singletons() {
        let ds = emails(&["A@x.com", "a@x.com", "b@x.com"]);
        let r = resolve(&ds, &Selection::none());
        assert_eq!(r.user_ids, vec![1, 2, 3]);
        assert!(r.summary.match_types.is_empty());
        assert_eq!(r.summary.linked_rows, 0);
    }

    #[test]
    fn empty_dataset() {
        let ds = emails(&[]);
        let profile = MatchProfile::default();
        let r = resolve(&ds, &profile.select(&["email", "phone"]));
        assert!(r.user_ids.is_empty());
        assert_eq!(r.summary.groups, 0);
        assert_eq!(r.summary.largest_group, 0);
    }

    #[test]
    fn ids_follow_first_appearance() {
        let ds = emails(&["c@x", "b@x", "c@x", "a@x", "b@x"]);
        let profile = MatchProfile::default();
        let r = resolve(&ds, &profile.select(&["email"]));
        assert_eq!(r.user_ids, vec![1, 2, 1, 3, 2]);
    }

    #[test]
    fn stats_count_effective_unions() {
        let ds = emails(&["a@x", "a@x", "a@x", "b@x"]);
        let profile = MatchProfile::default();
        let r = resolve(&ds, &profile.select(&["email"]));
        let stats = &r.summary.match_types[0];
        assert_eq!(stats.name, "email");
        assert_eq!(stats.distinct_keys, 2);
        assert_eq!(stats.shared_keys, 1);
        assert_eq!(stats.unions, 2);
    }

    #[test]
    fn ignored_names_reported() {
        let ds = emails(&["a@x"]);
        let profile = MatchProfile::default();
        let r = resolve(&ds, &profile.select(&["fax", "email"]));
        assert_eq!(r.summary.enabled, vec!["email"]);
        assert_eq!(r.summary.ignored, vec!["fax"]);
    }
}
