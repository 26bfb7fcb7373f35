use std::fmt::{self, Display, Formatter};

mod error;
pub use error::PairError;

/// An unordered pair of distinct sample identifiers, stored under a canonical
/// (lexicographically sorted) ordering so that `(i,j)` and `(j,i)` collide to
/// a single key within any mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SamplePair {
    left : String,
    right: String,
}

impl SamplePair {
    /// Canonicalize and wrap a pair of sample ids.
    ///
    /// # Errors
    /// - `PairError::SelfPair` if `i == j`.
    pub fn new(i: impl Into<String>, j: impl Into<String>) -> Result<Self, PairError> {
        let (i, j) = (i.into(), j.into());
        if i == j {
            return Err(PairError::SelfPair(i))
        }
        Ok(match i < j {
            true  => Self { left: i, right: j },
            false => Self { left: j, right: i },
        })
    }

    #[must_use]
    pub fn left(&self) -> &str {
        &self.left
    }

    #[must_use]
    pub fn right(&self) -> &str {
        &self.right
    }

    /// Whether `id` is one of the two members of this pair.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.left == id || self.right == id
    }
}

impl Display for SamplePair {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.left, self.right)
    }
}
