use std::collections::BTreeSet;

use log::debug;

use crate::relatives::RelativeGraph;

/// A maximal set of samples connected through first-degree relatedness.
///
/// Families are disjoint, and every sample carrying at least one first-degree
/// edge belongs to exactly one of them. Isolated samples are never
/// instantiated as single-member families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
    id     : u32,
    members: BTreeSet<String>,
}

impl Family {
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Members, in lexicographic order. This is also the order in which the
    /// resolver processes them.
    #[must_use]
    pub fn members(&self) -> &BTreeSet<String> {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Partition the samples of a `RelativeGraph` into families.
///
/// Connected components are discovered through an iterative depth-first
/// traversal seeded in lexicographic sample order, and assigned sequential
/// ids starting at 1 in discovery order. Both choices pin down an iteration
/// order that would otherwise be incidental, making re-runs bit-identical.
#[must_use]
pub fn partition_families(graph: &RelativeGraph) -> Vec<Family> {
    let mut families = Vec::new();
    let mut assigned: BTreeSet<&str> = BTreeSet::new();

    for seed in graph.samples() {
        if assigned.contains(seed.as_str()) {
            continue
        }
        // ---- Absorb every sample reachable from the seed into one family.
        let mut members = BTreeSet::new();
        let mut stack = vec![seed.as_str()];
        while let Some(sample) = stack.pop() {
            if !assigned.insert(sample) {
                continue
            }
            members.insert(sample.to_string());
            if let Some(relatives) = graph.relatives(sample) {
                stack.extend(relatives.iter().map(String::as_str).filter(|rel| !assigned.contains(*rel)));
            }
        }
        let id = families.len() as u32 + 1;
        debug!("Family {id}: {} member(s)", members.len());
        families.push(Family { id, members });
    }
    families
}
