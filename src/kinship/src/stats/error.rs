use thiserror::Error;

#[derive(Error, Debug)]
pub enum PairStatError {
    #[error("Pair '{pair}' carries an invalid {field} value: '{value}'. IBD probabilities and pi_hat must lie within the [0, 1] interval")]
    InvalidProportion { pair: String, field: &'static str, value: f64 },
}
