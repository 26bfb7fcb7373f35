use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThresholdsError {
    #[error("Threshold '{name}' is set to '{value}', but must lie within the [0, 1] interval")]
    OutOfRange { name: &'static str, value: f64 },

    #[error("The {name} pi_hat band [{lo}, {hi}] is inverted: its lower bound exceeds its upper bound")]
    InvertedBand { name: &'static str, lo: f64, hi: f64 },
}
