use crate::pair::SamplePair;

mod error;
pub use error::PairStatError;

/// A single row of pairwise relatedness statistics between two samples.
/// - `pair`  : canonical (sorted) pair of sample identifiers.
/// - `ibd0/1/2`: probabilities of sharing 0, 1 or 2 alleles identical-by-descent.
/// - `pi_hat`: overall proportion of alleles shared IBD. ~0.5 for
///             parent-offspring or full siblings, ~0.25 for second-degree
///             relatives, ~1.0 for duplicates and identical twins.
#[derive(Debug, Clone, PartialEq)]
pub struct PairStat {
    pub pair  : SamplePair,
    pub ibd0  : f64,
    pub ibd1  : f64,
    pub ibd2  : f64,
    pub pi_hat: f64,
}

impl PairStat {
    /// Wrap and validate one row of pairwise statistics.
    ///
    /// # Errors
    /// - `PairStatError::InvalidProportion` if any of ibd0/ibd1/ibd2/pi_hat
    ///   falls outside of the [0, 1] interval (NaN included).
    pub fn new(pair: SamplePair, ibd0: f64, ibd1: f64, ibd2: f64, pi_hat: f64) -> Result<Self, PairStatError> {
        for (field, value) in [("ibd0", ibd0), ("ibd1", ibd1), ("ibd2", ibd2), ("pi_hat", pi_hat)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PairStatError::InvalidProportion { pair: pair.to_string(), field, value })
            }
        }
        Ok(Self { pair, ibd0, ibd1, ibd2, pi_hat })
    }
}
