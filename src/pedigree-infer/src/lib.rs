pub mod duplicates;
pub use duplicates::find_duplicate_clusters;

pub mod relatives;
pub use relatives::RelativeGraph;

pub mod families;
pub use families::{Family, partition_families};

mod resolver;

pub mod pedigree;
pub use pedigree::{Decision, Duo, Pedigree, Trio};
