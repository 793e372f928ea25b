//! Defines [`DisjointSet`], a union-find structure over copyable labels.
//!
//! A unification layer can use [`TermId`](crate::TermId) values as labels
//! to track which variables have been bound together. Nothing in this
//! crate calls it; it only relies on labels being cheap to copy and hash.

use core::hash::Hash;
use indexmap::IndexMap;

/// Parent link of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent<L> {
    /// The label represents its class. `rank` bounds the height of the
    /// class tree.
    Root { rank: u8 },
    /// The label belongs to the class of another label.
    Child(L),
}

/// Partitions labels into disjoint classes with merge and
/// representative lookup.
///
/// Labels are created on first use: [`find`](Self::find) on an unseen
/// label makes it a singleton class. Lookups compress paths, and merges
/// are by rank, so both run in amortized near-constant time.
///
/// ```
/// # use dag_terms::DisjointSet;
/// let mut set = DisjointSet::new();
/// set.union(1, 2);
/// set.union(3, 4);
/// assert_eq!(set.find(1), set.find(2));
/// assert_ne!(set.find(1), set.find(3));
/// assert_eq!(set.classes(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DisjointSet<L> {
    nodes: IndexMap<L, Parent<L>>,
    classes: usize,
}

impl<L> Default for DisjointSet<L> {
    fn default() -> Self {
        Self {
            nodes: IndexMap::default(),
            classes: 0,
        }
    }
}

impl<L: Copy + Eq + Hash> DisjointSet<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of labels seen so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct classes.
    #[inline]
    pub fn classes(&self) -> usize {
        self.classes
    }

    /// Returns `true` if `label` has been seen.
    #[inline]
    pub fn contains(&self, label: L) -> bool {
        self.nodes.contains_key(&label)
    }

    /// Returns the representative of the class containing `label`,
    /// creating a singleton class for an unseen label. Every label visited
    /// on the way is relinked directly to the representative.
    pub fn find(&mut self, label: L) -> L {
        let Some(&first) = self.nodes.get(&label) else {
            self.nodes.insert(label, Parent::Root { rank: 0 });
            self.classes += 1;
            return label;
        };

        let mut root = label;
        let mut link = first;
        while let Parent::Child(parent) = link {
            root = parent;
            // Children always point at labels already in the map.
            link = self.nodes[&parent];
        }

        let mut current = label;
        while current != root {
            match self.nodes.insert(current, Parent::Child(root)) {
                Some(Parent::Child(next)) => current = next,
                _ => break,
            }
        }
        root
    }

    /// Merges the classes containing `a` and `b` and returns the
    /// representative of the merged class. When both classes have the same
    /// rank, `b`'s representative represents the union.
    pub fn union(&mut self, a: L, b: L) -> L {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return root_a;
        }
        let rank_a = self.rank(root_a);
        let rank_b = self.rank(root_b);
        let (child, root) = if rank_a > rank_b {
            (root_b, root_a)
        } else {
            (root_a, root_b)
        };
        if rank_a == rank_b {
            self.nodes.insert(
                root,
                Parent::Root {
                    rank: rank_b.saturating_add(1),
                },
            );
        }
        self.nodes.insert(child, Parent::Child(root));
        self.classes -= 1;
        root
    }

    /// Returns `true` if `a` and `b` are in the same class.
    #[inline]
    pub fn same_class(&mut self, a: L, b: L) -> bool {
        self.find(a) == self.find(b)
    }

    fn rank(&self, root: L) -> u8 {
        match self.nodes.get(&root) {
            Some(Parent::Root { rank }) => *rank,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Interner, TermId};
    use proptest::prelude::*;

    #[test]
    fn unseen_labels_are_singletons() {
        let mut set = DisjointSet::new();
        assert!(!set.contains(5));
        assert_eq!(set.find(5), 5);
        assert!(set.contains(5));
        assert_eq!(set.len(), 1);
        assert_eq!(set.classes(), 1);
    }

    #[test]
    fn union_returns_representative() {
        let mut set = DisjointSet::new();
        let r = set.union(1, 2);
        assert_eq!(r, 2);
        assert_eq!(set.find(1), 2);
        assert_eq!(set.find(2), 2);

        // Higher rank wins regardless of argument order.
        let r = set.union(2, 3);
        assert_eq!(r, 2);
        assert_eq!(set.find(3), 2);
        assert_eq!(set.classes(), 1);
    }

    #[test]
    fn union_of_same_class_is_noop() {
        let mut set = DisjointSet::new();
        set.union(1, 2);
        let classes = set.classes();
        let r = set.union(2, 1);
        assert_eq!(r, set.find(1));
        assert_eq!(set.classes(), classes);
    }

    #[test]
    fn find_compresses_paths() {
        let mut set = DisjointSet::new();
        // Build a chain 1 -> 2 -> 4 through equal-rank merges.
        set.union(1, 2);
        set.union(3, 4);
        set.union(2, 4);
        assert_eq!(set.nodes[&1], Parent::Child(2));
        assert_eq!(set.find(1), 4);
        assert_eq!(set.nodes[&1], Parent::Child(4));
    }

    #[test]
    fn works_with_term_ids() {
        let a = &mut Interner::new();
        let x = a.var("X").id();
        let y = a.var("Y").id();
        let z = a.var("Z").id();
        let mut set: DisjointSet<TermId> = DisjointSet::new();
        set.union(x, y);
        assert!(set.same_class(x, y));
        assert!(!set.same_class(x, z));
        assert_eq!(set.classes(), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

        #[test]
        fn prop_union_matches_naive_partition(
            pairs in prop::collection::vec((0u8..16, 0u8..16), 0..32)
        ) {
            let mut set = DisjointSet::new();
            let mut naive: Vec<u8> = (0..16).collect();
            for &(a, b) in &pairs {
                set.union(a, b);
                let (from, to) = (naive[a as usize], naive[b as usize]);
                for c in naive.iter_mut() {
                    if *c == from {
                        *c = to;
                    }
                }
            }
            for a in 0u8..16 {
                for b in 0u8..16 {
                    prop_assert_eq!(set.same_class(a, b), naive[a as usize] == naive[b as usize]);
                }
            }
            let mut distinct = naive.clone();
            distinct.sort_unstable();
            distinct.dedup();
            prop_assert_eq!(set.classes(), distinct.len());
        }
    }
}
