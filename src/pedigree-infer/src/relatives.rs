use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashSet;

use kinship::{KinshipThresholds, PairStat};

/// First-degree relative adjacency over the input samples, excluding
/// duplicate-cluster members.
///
/// Keys and neighbor sets are ordered, so iteration over the graph is
/// deterministic. Every sample carrying at least one qualifying first-degree
/// edge owns an entry; isolated samples do not appear.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RelativeGraph {
    first_degree: BTreeMap<String, BTreeSet<String>>,
}

impl RelativeGraph {
    /// Build the adjacency from raw statistics rows.
    ///
    /// A row contributes an (undirected) edge when its pi_hat falls within
    /// the first-degree band and neither endpoint belongs to a duplicate
    /// cluster.
    #[must_use]
    pub fn from_stats(stats: &[PairStat], thresholds: &KinshipThresholds, duplicates: &AHashSet<String>) -> Self {
        let mut first_degree: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let qualifying = stats.iter().filter(|stat| {
            thresholds.is_first_degree(stat)
                && !duplicates.contains(stat.pair.left())
                && !duplicates.contains(stat.pair.right())
        });
        for stat in qualifying {
            let (i, j) = (stat.pair.left(), stat.pair.right());
            first_degree.entry(i.to_string()).or_default().insert(j.to_string());
            first_degree.entry(j.to_string()).or_default().insert(i.to_string());
        }
        Self { first_degree }
    }

    /// First-degree relatives of `id`, or `None` for samples without any
    /// qualifying edge.
    #[must_use]
    pub fn relatives(&self, id: &str) -> Option<&BTreeSet<String>> {
        self.first_degree.get(id)
    }

    /// Samples carrying at least one first-degree edge, in lexicographic order.
    pub fn samples(&self) -> impl Iterator<Item = &String> {
        self.first_degree.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.first_degree.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_degree.is_empty()
    }
}

/// Restrict statistics rows to pairs related at first or second degree.
///
/// These are the rows backing the `RelatednessIndex` used during parent
/// resolution: first-degree rows provide the parent-offspring signatures,
/// second-degree rows are retained solely to detect related parent-candidate
/// pairs (e.g. grandparent + parent, or two siblings of the proband).
/// Duplicate-cluster members are deliberately kept.
#[must_use]
pub fn degree_filtered<'a>(stats: &'a [PairStat], thresholds: &KinshipThresholds) -> Vec<&'a PairStat> {
    stats.iter()
        .filter(|stat| thresholds.is_first_degree(stat) || thresholds.is_second_degree(stat))
        .collect()
}
