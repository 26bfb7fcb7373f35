use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};

use ahash::AHashSet;
use log::info;
use rayon::prelude::*;

use kinship::{thresholds::ThresholdsError, KinshipThresholds, PairStat, RelatednessIndex, SexPanel};

use crate::duplicates::find_duplicate_clusters;
use crate::families::partition_families;
use crate::relatives::{degree_filtered, RelativeGraph};
use crate::resolver::resolve_family;

const DISPL_SEP    : &str  = " - ";
const ID_FORMAT_LEN: usize = 20;

/// A child with both parents uniquely and unambiguously identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trio {
    pub child    : String,
    pub father   : String,
    pub mother   : String,
    pub family_id: u32,
}

impl Display for Trio {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f,
            "{: <ID_FORMAT_LEN$}{DISPL_SEP}\
             {: <ID_FORMAT_LEN$}{DISPL_SEP}\
             {: <ID_FORMAT_LEN$}{DISPL_SEP}\
             {}",
            self.child, self.father, self.mother, self.family_id
        )
    }
}

/// A child with exactly one parent-like relative and no validated second
/// parent. Displayed as a lexicographically sorted pair, for determinism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duo {
    pub child : String,
    pub parent: String,
}

impl Display for Duo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (first, second) = match self.child < self.parent {
            true  => (&self.child, &self.parent),
            false => (&self.parent, &self.child),
        };
        write!(f, "{first: <ID_FORMAT_LEN$}{DISPL_SEP}{second}")
    }
}

/// Resolver outcome for one sample. Kept for every processed sample, emitted
/// trio/duo or not, as an audit trail of the resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Parents { father: String, mother: String },
    SingleParent(String),
    Unresolved,
}

impl Display for Decision {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parents { father, mother } => write!(f, "{father},{mother}"),
            Self::SingleParent(parent)       => write!(f, "{parent}"),
            Self::Unresolved                 => write!(f, "none"),
        }
    }
}

/// The assembled output of a full inference run.
///
/// # Fields
/// - `trios`     : fully resolved child/father/mother triplets, tagged with
///                 their family id. A family id may host several trios
///                 (sibling trios, multi-generational chains).
/// - `duos`      : children with a single parent-like relative.
/// - `decisions` : per-sample resolver outcome, unresolved samples included.
/// - `duplicates`: maximal clusters of effectively-identical samples,
///                 excluded from all of the above.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pedigree {
    pub trios     : Vec<Trio>,
    pub duos      : Vec<Duo>,
    pub decisions : BTreeMap<String, Decision>,
    pub duplicates: Vec<BTreeSet<String>>,
}

impl Pedigree {
    /// Run the full inference pipeline over a flat table of pairwise
    /// statistics and a sex panel.
    ///
    /// Pipeline: duplicate detection -> first-degree family partitioning ->
    /// per-family parent resolution -> assembly. Families share no samples
    /// and no mutable state, so they are resolved in parallel; within one
    /// family, members are resolved sequentially in lexicographic order.
    ///
    /// The computation is pure and deterministic: identical inputs and
    /// thresholds yield an identical `Pedigree`.
    ///
    /// # Errors
    /// - `ThresholdsError` if the provided threshold configuration is
    ///   structurally invalid. Ambiguous resolutions are never errors.
    pub fn infer(stats: &[PairStat], sex: &SexPanel, thresholds: &KinshipThresholds) -> Result<Self, ThresholdsError> {
        thresholds.validate()?;

        // ---- Detect duplicate clusters. Their members are barred from
        //      family membership and parent candidacy.
        let duplicates = find_duplicate_clusters(stats, thresholds);
        let duplicated_samples: AHashSet<String> = duplicates.iter().flatten().cloned().collect();
        info!("Detected {} duplicate cluster(s) ({} sample(s))", duplicates.len(), duplicated_samples.len());

        // ---- Build the first-degree graph and the ibd index backing the
        //      parent-offspring and unrelated-parents tests.
        let graph = RelativeGraph::from_stats(stats, thresholds, &duplicated_samples);
        let index = RelatednessIndex::from_stats(degree_filtered(stats, thresholds));
        info!("Indexed {} related pair(s) across {} sample(s)", index.len(), graph.len());

        // ---- Partition into families and resolve each one independently.
        let families = partition_families(&graph);
        info!("Partitioned samples into {} famil(y/ies)", families.len());

        let resolutions: Vec<_> = families.par_iter()
            .map(|family| resolve_family(family, &graph, &index, sex, thresholds))
            .collect();

        // ---- Assemble, preserving family-id order.
        let mut pedigree = Self { duplicates, ..Self::default() };
        for resolution in resolutions {
            pedigree.trios.extend(resolution.trios);
            pedigree.duos.extend(resolution.duos);
            pedigree.decisions.extend(resolution.decisions);
        }
        info!("Resolved {} trio(s) and {} duo(s)", pedigree.trios.len(), pedigree.duos.len());
        Ok(pedigree)
    }

    /// Duplicate clusters, one line per cluster, members sorted.
    #[must_use]
    pub fn duplicate_lines(&self) -> Vec<String> {
        self.duplicates.iter()
            .map(|cluster| cluster.iter().cloned().collect::<Vec<String>>().join(","))
            .collect()
    }

    /// Decision records, one padded line per sample.
    #[must_use]
    pub fn decision_lines(&self) -> Vec<String> {
        self.decisions.iter()
            .map(|(sample, decision)| format!("{sample: <ID_FORMAT_LEN$}{DISPL_SEP}{decision}"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship::{SamplePair, Sex};
    use pretty_assertions::assert_eq;

    /// Parent-offspring signature, first-degree pi_hat.
    fn po(i: &str, j: &str) -> PairStat {
        stat(i, j, 0.01, 0.98, 0.01, 0.5)
    }

    /// Full-sibling-like signature: first-degree pi_hat, but too much ibd0
    /// and ibd2 sharing for a parent-offspring pair.
    fn sibling(i: &str, j: &str) -> PairStat {
        stat(i, j, 0.25, 0.5, 0.25, 0.5)
    }

    /// Second-degree signature (grandparent/avuncular-like).
    fn second_degree(i: &str, j: &str) -> PairStat {
        stat(i, j, 0.5, 0.45, 0.05, 0.25)
    }

    /// Background relatedness, below every band.
    fn unrelated(i: &str, j: &str) -> PairStat {
        stat(i, j, 0.98, 0.01, 0.01, 0.01)
    }

    fn duplicate(i: &str, j: &str) -> PairStat {
        stat(i, j, 0.0, 0.02, 0.98, 0.95)
    }

    fn stat(i: &str, j: &str, ibd0: f64, ibd1: f64, ibd2: f64, pi_hat: f64) -> PairStat {
        let pair = SamplePair::new(i, j).expect("Invalid test pair");
        PairStat::new(pair, ibd0, ibd1, ibd2, pi_hat).expect("Invalid test stat")
    }

    fn panel(entries: &[(&str, Sex)]) -> SexPanel {
        entries.iter().map(|(id, sex)| ((*id).to_string(), *sex)).collect()
    }

    fn infer(stats: &[PairStat], sex: &SexPanel) -> Pedigree {
        Pedigree::infer(stats, sex, &KinshipThresholds::default()).expect("Inference must not fail")
    }

    #[test]
    fn trio_from_two_unrelated_opposite_sex_parents() {
        // Scenario: child A, father B, mother C, B and C unrelated.
        let stats = [po("A", "B"), po("A", "C"), unrelated("B", "C")];
        let sex = panel(&[("B", Sex::Male), ("C", Sex::Female)]);
        let pedigree = infer(&stats, &sex);

        assert_eq!(pedigree.trios, vec![Trio {
            child    : "A".to_string(),
            father   : "B".to_string(),
            mother   : "C".to_string(),
            family_id: 1,
        }]);
        assert_eq!(
            pedigree.decisions.get("A"),
            Some(&Decision::Parents { father: "B".to_string(), mother: "C".to_string() })
        );
        // The signature is symmetric: seen from either parent, A is their
        // single parent-like relative, hence two duos.
        assert_eq!(pedigree.duos.len(), 2);
    }

    #[test]
    fn unknown_sex_blocks_the_pair() {
        // Same family, but C's sex is unknown: no accepted pair, no trio.
        let stats = [po("A", "B"), po("A", "C"), unrelated("B", "C")];
        let sex = panel(&[("B", Sex::Male)]);
        let pedigree = infer(&stats, &sex);

        assert!(pedigree.trios.is_empty());
        assert_eq!(pedigree.decisions.get("A"), Some(&Decision::Unresolved));
        assert!(!pedigree.duos.iter().any(|duo| duo.child == "A"));
    }

    #[test]
    fn same_sex_candidates_are_ambiguous() {
        // H has two male parent-like relatives: no opposite-sex pair exists.
        let stats = [po("H", "I"), po("H", "J"), unrelated("I", "J")];
        let sex = panel(&[("I", Sex::Male), ("J", Sex::Male)]);
        let pedigree = infer(&stats, &sex);

        assert!(pedigree.trios.is_empty());
        assert_eq!(pedigree.decisions.get("H"), Some(&Decision::Unresolved));
    }

    #[test]
    fn related_candidates_are_rejected() {
        // B and C match the parent-offspring signature with A but are
        // themselves second-degree relatives: they cannot both be parents.
        let stats = [po("A", "B"), po("A", "C"), second_degree("B", "C")];
        let sex = panel(&[("B", Sex::Male), ("C", Sex::Female)]);
        let pedigree = infer(&stats, &sex);

        assert!(pedigree.trios.is_empty());
        assert_eq!(pedigree.decisions.get("A"), Some(&Decision::Unresolved));
    }

    #[test]
    fn single_candidate_yields_a_duo() {
        let stats = [po("F", "G")];
        let pedigree = infer(&stats, &panel(&[]));

        assert!(pedigree.trios.is_empty());
        assert_eq!(pedigree.duos, vec![
            Duo { child: "F".to_string(), parent: "G".to_string() },
            Duo { child: "G".to_string(), parent: "F".to_string() },
        ]);
        assert_eq!(pedigree.decisions.get("F"), Some(&Decision::SingleParent("G".to_string())));
    }

    #[test]
    fn duplicates_never_join_a_family() {
        // D and E are the same individual; B is a re-sequenced copy of B2,
        // which bars the A-B first-degree edge from forming a family.
        let stats = [duplicate("D", "E"), po("A", "B"), duplicate("B", "B2")];
        let pedigree = infer(&stats, &panel(&[]));

        assert!(pedigree.trios.is_empty());
        assert!(pedigree.duos.is_empty());
        assert!(pedigree.decisions.is_empty());
        let expected: Vec<BTreeSet<String>> = vec![
            ["B".to_string(), "B2".to_string()].into_iter().collect(),
            ["D".to_string(), "E".to_string()].into_iter().collect(),
        ];
        assert_eq!(pedigree.duplicates, expected);
    }

    #[test]
    fn sibling_trios_share_a_family_id() {
        let stats = [
            po("C1", "DAD"), po("C1", "MOM"),
            po("C2", "DAD"), po("C2", "MOM"),
            sibling("C1", "C2"),
            unrelated("DAD", "MOM"),
        ];
        let sex = panel(&[("DAD", Sex::Male), ("MOM", Sex::Female)]);
        let pedigree = infer(&stats, &sex);

        assert_eq!(pedigree.trios.len(), 2);
        for trio in &pedigree.trios {
            assert_eq!(trio.family_id, 1);
            assert_eq!(trio.father, "DAD");
            assert_eq!(trio.mother, "MOM");
        }
        // The parents see two parent-like candidates (their children), but
        // the children are related to each other: no trio for the parents.
        assert_eq!(pedigree.decisions.get("DAD"), Some(&Decision::Unresolved));
        assert_eq!(pedigree.decisions.get("MOM"), Some(&Decision::Unresolved));
    }

    #[test]
    fn emitted_trios_uphold_the_invariants() {
        let stats = [
            po("A", "B"), po("A", "C"), unrelated("B", "C"),
            po("X", "Y"), po("X", "Z"), unrelated("Y", "Z"),
        ];
        let sex = panel(&[
            ("B", Sex::Male), ("C", Sex::Female),
            ("Y", Sex::Female), ("Z", Sex::Male),
        ]);
        let pedigree = infer(&stats, &sex);
        let index = RelatednessIndex::from_stats(degree_filtered(&stats, &KinshipThresholds::default()));

        assert_eq!(pedigree.trios.len(), 2);
        for trio in &pedigree.trios {
            assert!(sex.get(&trio.father).is_opposite(sex.get(&trio.mother)));
            let parents = SamplePair::new(trio.father.as_str(), trio.mother.as_str()).expect("Invalid pair");
            assert!(!index.contains(&parents), "Trio parents {parents} are related");
        }
    }

    #[test]
    fn inference_is_idempotent() {
        let stats = [
            po("A", "B"), po("A", "C"), unrelated("B", "C"),
            po("F", "G"),
            duplicate("D", "E"),
        ];
        let sex = panel(&[("B", Sex::Male), ("C", Sex::Female)]);

        let first = infer(&stats, &sex);
        let second = infer(&stats, &sex);
        assert_eq!(first, second);
    }

    #[test]
    fn display_collapses_to_sorted_duo() {
        let duo = Duo { child: "ZED".to_string(), parent: "ABE".to_string() };
        let displayed = format!("{duo}");
        assert!(displayed.starts_with("ABE"));
        assert!(displayed.contains("ZED"));
    }
}
