use std::{fmt::{self, Formatter, Display}, str::FromStr, result::Result};

use ahash::AHashMap;

/// Externally supplied sex annotation of a sample. Immutable for the run.
/// `Unknown` is a valid state: such samples are processed, but can never
/// serve as an accepted parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
    Unknown
}

impl Sex {
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        match self {
            Self::Unknown => true,
            _             => false,
        }
    }

    /// Strict opposite-sex test: `Unknown` matches nothing, itself included.
    #[must_use]
    pub fn is_opposite(&self, other: Sex) -> bool {
        matches!(
            (self, other),
            (Self::Male, Sex::Female) | (Self::Female, Sex::Male)
        )
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "male"   | "m" | "1" => Self::Male,
            "female" | "f" | "2" => Self::Female,
            _                    => Self::Unknown,
        })
    }
}

impl Display for Sex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Female  => "female",
            Self::Male    => "male",
            Self::Unknown => "unknown"
        })
    }
}

/// Per-sample sex annotations. Samples absent from the panel degrade to
/// `Sex::Unknown` rather than raising.
#[derive(Debug, Default, Clone)]
pub struct SexPanel {
    samples: AHashMap<String, Sex>,
}

impl SexPanel {
    #[must_use]
    pub fn new() -> Self {
        Self { samples: AHashMap::new() }
    }

    pub fn insert(&mut self, id: impl Into<String>, sex: Sex) -> Option<Sex> {
        self.samples.insert(id.into(), sex)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Sex {
        self.samples.get(id).copied().unwrap_or(Sex::Unknown)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl FromIterator<(String, Sex)> for SexPanel {
    fn from_iter<T: IntoIterator<Item = (String, Sex)>>(iter: T) -> Self {
        Self { samples: iter.into_iter().collect() }
    }
}
