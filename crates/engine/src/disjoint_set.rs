/// Union-find over the row indices `0..n`, with path compression and
/// union by rank.
///
/// Sets only ever merge. Indices outside `0..n` are a caller bug and panic.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of the set containing `i`.
    ///
    /// Walks to the root, then retraces the path pointing every visited node
    /// straight at the root.
    pub fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = i;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merge the sets containing `i` and `j`.
    ///
    /// Returns `false` when they were already one set. On equal rank, `j`'s
    /// root goes under `i`'s root.
    pub fn union(&mut self, i: usize, j: usize) -> bool {
        let root_i = self.find(i);
        let root_j = self.find(j);
        if root_i == root_j {
            return false;
        }

        match self.rank[root_i].cmp(&self.rank[root_j]) {
            std::cmp::Ordering::Greater => self.parent[root_j] = root_i,
            std::cmp::Ordering::Less => self.parent[root_i] = root_j,
            std::cmp::Ordering::Equal => {
                self.parent[root_j] = root_i;
                self.rank[root_i] += 1;
            }
        }
        true
    }

    #[cfg(test)]
    pub fn same_set(&mut self, i: usize, j: usize) -> bool {
        self.find(i) == self.find(j)
    }

    /// Number of disjoint sets currently tracked.
    pub fn set_count(&self) -> usize {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(i, &p)| i == p)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_as_singletons() {
        let mut ds = DisjointSet::new(4);
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.set_count(), 4);
        for i in 0..4 {
            assert_eq!(ds.find(i), i);
        }
    }

    #[test]
    fn empty_set() {
        let ds = DisjointSet::new(0);
        assert!(ds.is_empty());
        assert_eq!(ds.set_count(), 0);
    }

    #[test]
    fn union_is_idempotent() {
        let mut ds = DisjointSet::new(3);
        assert!(ds.union(0, 1));
        assert!(!ds.union(0, 1));
        assert!(!ds.union(1, 0));
        assert_eq!(ds.set_count(), 2);
    }

    #[test]
    fn tie_attaches_second_root_under_first() {
        let mut ds = DisjointSet::new(2);
        ds.union(0, 1);
        assert_eq!(ds.find(1), 0);
        assert_eq!(ds.rank[0], 1);
        assert_eq!(ds.rank[1], 0);
    }

    #[test]
    fn lower_rank_goes_under_higher() {
        let mut ds = DisjointSet::new(3);
        ds.union(0, 1); // root 0, rank 1
        ds.union(2, 0); // rank(2)=0 < rank(0)=1
        assert_eq!(ds.find(2), 0);
        assert_eq!(ds.rank[0], 1);
    }

    #[test]
    fn transitive_merge() {
        let mut ds = DisjointSet::new(5);
        ds.union(0, 1);
        ds.union(3, 4);
        ds.union(1, 4);
        assert!(ds.same_set(0, 3));
        assert!(!ds.same_set(0, 2));
        assert_eq!(ds.set_count(), 2);
    }

    #[test]
    fn find_compresses_path() {
        let mut ds = DisjointSet::new(4);
        // Build a chain 3 -> 2 -> 1 -> 0 by hand
        ds.parent = vec![0, 0, 1, 2];
        assert_eq!(ds.find(3), 0);
        assert_eq!(ds.parent, vec![0, 0, 0, 0]);
    }

    #[test]
    fn long_chain_does_not_recurse() {
        let n = 200_000;
        let mut ds = DisjointSet::new(n);
        ds.parent = (0..n).map(|i| i.saturating_sub(1)).collect();
        assert_eq!(ds.find(n - 1), 0);
        assert_eq!(ds.set_count(), 1);
    }

    #[test]
    #[should_panic]
    fn out_of_range_panics() {
        let mut ds = DisjointSet::new(2);
        ds.find(2);
    }
}
