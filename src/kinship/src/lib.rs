pub mod sex;
pub use sex::{Sex, SexPanel};

pub mod pair;
pub use pair::SamplePair;

pub mod stats;
pub use stats::PairStat;

pub mod thresholds;
pub use thresholds::KinshipThresholds;

pub mod index;
pub use index::RelatednessIndex;
