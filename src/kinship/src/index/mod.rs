use ahash::AHashMap;
use log::warn;

use crate::{pair::SamplePair, stats::PairStat};

/// Fast lookup structure over a set of pairwise relatedness statistics.
///
/// Three mappings keyed by canonical (sorted) sample pair, one each for
/// ibd0, ibd1 and ibd2. pi_hat is consumed upstream for threshold filtering
/// and is not retained here. Lookup is O(1) average, and symmetric by
/// construction: `(i,j)` and `(j,i)` resolve to the same key.
#[derive(Debug, Default, Clone)]
pub struct RelatednessIndex {
    ibd0: AHashMap<SamplePair, f64>,
    ibd1: AHashMap<SamplePair, f64>,
    ibd2: AHashMap<SamplePair, f64>,
}

impl RelatednessIndex {
    /// Index a sequence of pairwise statistics rows.
    ///
    /// At most one entry is kept per canonical pair: should the input carry
    /// several rows for the same pair, the last row wins and a warning is
    /// emitted.
    #[must_use]
    pub fn from_stats<'a>(stats: impl IntoIterator<Item = &'a PairStat>) -> Self {
        let mut index = Self::default();
        for stat in stats {
            let previous = index.ibd0.insert(stat.pair.clone(), stat.ibd0);
            index.ibd1.insert(stat.pair.clone(), stat.ibd1);
            index.ibd2.insert(stat.pair.clone(), stat.ibd2);
            if previous.is_some() {
                warn!("Multiple statistics rows found for pair {}. Keeping the last row", stat.pair);
            }
        }
        index
    }

    #[must_use]
    pub fn ibd0(&self, pair: &SamplePair) -> Option<f64> {
        self.ibd0.get(pair).copied()
    }

    #[must_use]
    pub fn ibd1(&self, pair: &SamplePair) -> Option<f64> {
        self.ibd1.get(pair).copied()
    }

    #[must_use]
    pub fn ibd2(&self, pair: &SamplePair) -> Option<f64> {
        self.ibd2.get(pair).copied()
    }

    /// Whether the indexed rows contain this pair, i.e. whether the two
    /// samples were detected as related at any indexed degree.
    #[must_use]
    pub fn contains(&self, pair: &SamplePair) -> bool {
        self.ibd2.contains_key(pair)
    }

    /// Number of indexed pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ibd2.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ibd2.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(i: &str, j: &str, ibd0: f64, ibd1: f64, ibd2: f64) -> PairStat {
        let pair = SamplePair::new(i, j).expect("Invalid test pair");
        PairStat::new(pair, ibd0, ibd1, ibd2, 0.5).expect("Invalid test stat")
    }

    #[test]
    fn symmetric_lookup() {
        let index = RelatednessIndex::from_stats(&[stat("B", "A", 0.1, 0.8, 0.1)]);
        let forward = SamplePair::new("A", "B").expect("Invalid pair");
        let reverse = SamplePair::new("B", "A").expect("Invalid pair");
        for pair in [&forward, &reverse] {
            assert_eq!(index.ibd0(pair), Some(0.1));
            assert_eq!(index.ibd1(pair), Some(0.8));
            assert_eq!(index.ibd2(pair), Some(0.1));
        }
    }

    #[test]
    fn missing_pair() {
        let index = RelatednessIndex::from_stats(&[stat("A", "B", 0.1, 0.8, 0.1)]);
        let absent = SamplePair::new("A", "C").expect("Invalid pair");
        assert_eq!(index.ibd1(&absent), None);
        assert!(!index.contains(&absent));
    }

    #[test]
    fn duplicate_rows_keep_the_last() {
        let rows = [stat("A", "B", 0.1, 0.8, 0.1), stat("B", "A", 0.2, 0.7, 0.1)];
        let index = RelatednessIndex::from_stats(&rows);
        let pair = SamplePair::new("A", "B").expect("Invalid pair");
        assert_eq!(index.len(), 1);
        assert_eq!(index.ibd0(&pair), Some(0.2));
        assert_eq!(index.ibd1(&pair), Some(0.7));
    }
}
