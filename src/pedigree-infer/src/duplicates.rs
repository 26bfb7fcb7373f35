use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use kinship::{KinshipThresholds, PairStat};

/// Extract maximal clusters of effectively-identical samples from a set of
/// pairwise statistics rows.
///
/// # Behavior
/// Rows whose pi_hat strictly exceeds the duplicate threshold define an
/// adjacency between their two samples. Clusters are the connected components
/// of that adjacency, i.e. the transitive closure of the duplicate relation:
/// if A≈B and B≈C, then {A, B, C} form a single cluster. Traversal is
/// depth-first over an explicit stack, so arbitrarily long duplicate chains
/// cannot exhaust the call stack.
///
/// # Guarantees
/// - clusters are pairwise disjoint and each has at least two members;
/// - clusters are maximal: no unconsidered edge can merge two of them;
/// - output order is deterministic (clusters seeded in lexicographic order,
///   members sorted within each cluster).
///
/// No representative sample is chosen here. Callers are expected to pick one
/// per cluster before re-running the pipeline on a deduplicated callset.
#[must_use]
pub fn find_duplicate_clusters(stats: &[PairStat], thresholds: &KinshipThresholds) -> Vec<BTreeSet<String>> {
    // ---- Build the duplicate adjacency. Ordered keys keep cluster discovery
    //      deterministic across runs.
    let mut adjacency: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for stat in stats.iter().filter(|stat| thresholds.is_duplicate(stat)) {
        adjacency.entry(stat.pair.left()).or_default().insert(stat.pair.right());
        adjacency.entry(stat.pair.right()).or_default().insert(stat.pair.left());
    }

    // ---- Absorb every unvisited sample's transitive closure into a cluster.
    let mut clusters = Vec::new();
    let mut consumed: BTreeSet<&str> = BTreeSet::new();
    for seed in adjacency.keys() {
        if consumed.contains(*seed) {
            continue
        }
        let mut cluster = BTreeSet::new();
        let mut stack = vec![*seed];
        while let Some(sample) = stack.pop() {
            if !consumed.insert(sample) {
                continue
            }
            cluster.insert(sample.to_string());
            if let Some(linked) = adjacency.get(sample) {
                stack.extend(linked.iter().copied().filter(|dup| !consumed.contains(*dup)));
            }
        }
        debug!("Duplicate cluster {}: {cluster:?}", clusters.len() + 1);
        clusters.push(cluster);
    }
    clusters
}
