use crate::stats::PairStat;

mod error;
pub use error::ThresholdsError;

/// Full configuration surface of the inference pipeline. Every bound is
/// expressed on the [0, 1] probability scale and can be overridden from the
/// command line.
///
/// # Fields
/// - `first_degree`         : inclusive pi_hat band qualifying a pair as
///                            first-degree relatives (parent-offspring or
///                            full siblings).
/// - `second_degree`        : pi_hat band (inclusive lower, exclusive upper)
///                            qualifying a pair as second-degree relatives
///                            (grandparent, half-sibling, avuncular).
/// - `ibd1_second_degree`   : ibd1 floor a pair must additionally reach to
///                            qualify as second-degree.
/// - `duplicate`            : strict pi_hat floor above which two samples are
///                            considered the same individual.
/// - `ibd0/1/2_parent_offspring`: bounds of the parent-offspring signature
///                            (near-certain sharing of exactly one allele per
///                            locus), used to separate direct parents from
///                            siblings and grandparents.
#[derive(Debug, Clone, PartialEq)]
pub struct KinshipThresholds {
    pub first_degree         : (f64, f64),
    pub second_degree        : (f64, f64),
    pub ibd1_second_degree   : f64,
    pub duplicate            : f64,
    pub ibd0_parent_offspring: f64,
    pub ibd1_parent_offspring: f64,
    pub ibd2_parent_offspring: f64,
}

impl Default for KinshipThresholds {
    fn default() -> Self {
        Self {
            first_degree         : (0.40, 0.75),
            second_degree        : (0.195, 0.30),
            ibd1_second_degree   : 0.40,
            duplicate            : 0.90,
            ibd0_parent_offspring: 0.15,
            ibd1_parent_offspring: 0.70,
            ibd2_parent_offspring: 0.30,
        }
    }
}

impl KinshipThresholds {
    /// Ensure every bound lies within [0, 1] and both bands are well-formed.
    ///
    /// # Errors
    /// - `ThresholdsError::OutOfRange` for any bound outside of [0, 1].
    /// - `ThresholdsError::InvertedBand` when a band's lower bound exceeds
    ///   its upper bound.
    pub fn validate(&self) -> Result<(), ThresholdsError> {
        let bounds = [
            ("first-degree-min",       self.first_degree.0),
            ("first-degree-max",       self.first_degree.1),
            ("second-degree-min",      self.second_degree.0),
            ("second-degree-max",      self.second_degree.1),
            ("ibd1-second-degree",     self.ibd1_second_degree),
            ("duplicate",              self.duplicate),
            ("ibd0-parent-offspring",  self.ibd0_parent_offspring),
            ("ibd1-parent-offspring",  self.ibd1_parent_offspring),
            ("ibd2-parent-offspring",  self.ibd2_parent_offspring),
        ];
        for (name, value) in bounds {
            if !(0.0..=1.0).contains(&value) {
                return Err(ThresholdsError::OutOfRange { name, value })
            }
        }
        for (name, (lo, hi)) in [("first-degree", self.first_degree), ("second-degree", self.second_degree)] {
            if lo > hi {
                return Err(ThresholdsError::InvertedBand { name, lo, hi })
            }
        }
        Ok(())
    }

    /// First-degree test: pi_hat within the (inclusive) first-degree band.
    #[must_use]
    pub fn is_first_degree(&self, stat: &PairStat) -> bool {
        let (lo, hi) = self.first_degree;
        stat.pi_hat >= lo && stat.pi_hat <= hi
    }

    /// Second-degree test: pi_hat within the lower band (upper bound
    /// exclusive) AND ibd1 above the second-degree floor.
    #[must_use]
    pub fn is_second_degree(&self, stat: &PairStat) -> bool {
        let (lo, hi) = self.second_degree;
        stat.pi_hat >= lo && stat.pi_hat < hi && stat.ibd1 >= self.ibd1_second_degree
    }

    /// Duplicate test: pi_hat strictly above the duplicate threshold.
    #[must_use]
    pub fn is_duplicate(&self, stat: &PairStat) -> bool {
        stat.pi_hat > self.duplicate
    }

    /// Parent-offspring signature on a raw (ibd0, ibd1, ibd2) triplet.
    #[must_use]
    pub fn matches_parent_offspring(&self, ibd0: f64, ibd1: f64, ibd2: f64) -> bool {
        ibd2 <= self.ibd2_parent_offspring
            && ibd1 >= self.ibd1_parent_offspring
            && ibd0 <= self.ibd0_parent_offspring
    }
}
