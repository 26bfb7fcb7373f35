use itertools::Itertools;
use log::{debug, trace};

use kinship::{KinshipThresholds, RelatednessIndex, SamplePair, Sex, SexPanel};

use crate::families::Family;
use crate::pedigree::{Decision, Duo, Trio};
use crate::relatives::RelativeGraph;

/// Outcome of resolving one family: the emitted trios/duos plus one decision
/// record per processed member.
#[derive(Debug, Default)]
pub(crate) struct FamilyResolution {
    pub(crate) trios    : Vec<Trio>,
    pub(crate) duos     : Vec<Duo>,
    pub(crate) decisions: Vec<(String, Decision)>,
}

/// Resolve the parents of every member of a family.
///
/// Members are processed in lexicographic order, and each member's candidate
/// set is computed from the immutable relative graph, so the outcome of one
/// sample cannot leak into the candidate set of the next.
///
/// Per member:
/// 1. classify each first-degree relative against the parent-offspring IBD
///    signature;
/// 2. exactly one candidate => emit a `Duo`;
/// 3. two or more candidates => scan unordered candidate pairs, rejecting
///    pairs that are themselves related at any indexed degree and pairs
///    without strictly opposite sexes; exactly one surviving pair => emit a
///    `Trio` (male member as father). Zero or several surviving pairs is a
///    normal, recorded ambiguity, not an error;
/// 4. zero candidates => recorded as unresolved.
pub(crate) fn resolve_family(
    family    : &Family,
    graph     : &RelativeGraph,
    index     : &RelatednessIndex,
    sex       : &SexPanel,
    thresholds: &KinshipThresholds,
) -> FamilyResolution {
    debug!("Resolving family {} ({} member(s))", family.id(), family.len());
    let mut resolution = FamilyResolution::default();

    for member in family.members() {
        let Some(relatives) = graph.relatives(member) else {
            // Unreachable for members of a partitioned family, but a missing
            // entry degrades to "no parents found" rather than a panic.
            resolution.decisions.push((member.clone(), Decision::Unresolved));
            continue
        };

        // ---- Retain relatives matching the parent-offspring signature.
        let candidates: Vec<&String> = relatives.iter()
            .filter(|rel| is_parent_offspring(member, rel, index, thresholds))
            .collect();
        trace!("[{member}] {} parent candidate(s): {candidates:?}", candidates.len());

        match candidates[..] {
            [] => resolution.decisions.push((member.clone(), Decision::Unresolved)),
            [parent] => {
                resolution.duos.push(Duo { child: member.clone(), parent: parent.clone() });
                resolution.decisions.push((member.clone(), Decision::SingleParent(parent.clone())));
            },
            _ => {
                let decision = match resolve_parent_pair(&candidates, index, sex) {
                    Some((father, mother)) => {
                        resolution.trios.push(Trio {
                            child    : member.clone(),
                            father   : father.clone(),
                            mother   : mother.clone(),
                            family_id: family.id(),
                        });
                        Decision::Parents { father, mother }
                    },
                    None => Decision::Unresolved,
                };
                resolution.decisions.push((member.clone(), decision));
            },
        }
    }
    resolution
}

/// Whether the `(sample, relative)` pair carries the parent-offspring IBD
/// signature. Pairs absent from the index never qualify.
fn is_parent_offspring(sample: &str, relative: &str, index: &RelatednessIndex, thresholds: &KinshipThresholds) -> bool {
    let Ok(pair) = SamplePair::new(sample, relative) else {
        return false
    };
    match (index.ibd0(&pair), index.ibd1(&pair), index.ibd2(&pair)) {
        (Some(ibd0), Some(ibd1), Some(ibd2)) => thresholds.matches_parent_offspring(ibd0, ibd1, ibd2),
        _ => false,
    }
}

/// Search the candidate set for a single validated parent pair.
///
/// A pair is accepted when its two members are not related to each other at
/// any indexed degree (two siblings of the proband must never pass) and
/// their sexes are strictly opposite. Returns the accepted pair oriented as
/// `(father, mother)`, or `None` when zero or several pairs were accepted.
fn resolve_parent_pair(candidates: &[&String], index: &RelatednessIndex, sex: &SexPanel) -> Option<(String, String)> {
    let mut accepted = Vec::new();
    for (p1, p2) in candidates.iter().tuple_combinations() {
        let Ok(pair) = SamplePair::new(p1.as_str(), p2.as_str()) else {
            continue
        };
        if index.contains(&pair) {
            trace!("Rejecting candidate pair {pair}: candidates are related to each other");
            continue
        }
        match (sex.get(p1), sex.get(p2)) {
            (Sex::Male, Sex::Female) => accepted.push(((*p1).clone(), (*p2).clone())),
            (Sex::Female, Sex::Male) => accepted.push(((*p2).clone(), (*p1).clone())),
            _ => trace!("Rejecting candidate pair {pair}: sexes are not strictly opposite"),
        }
    }
    match accepted.len() {
        1 => accepted.pop(),
        n => {
            trace!("{n} accepted parent pair(s): resolution is ambiguous");
            None
        },
    }
}
