use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OddsError {
    /// A draw was attempted on a deck with no cards left.
    #[error("Cannot draw from an empty deck")]
    EmptyDeck,
    #[error("Number of trials must be positive, got {0}")]
    InvalidTrialCount(usize),
}
