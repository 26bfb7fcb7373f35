use thiserror::Error;

#[derive(Error, Debug)]
pub enum PairError {
    #[error("Sample '{0}' is paired with itself. Pairwise statistics are only defined between two distinct samples")]
    SelfPair(String),
}
