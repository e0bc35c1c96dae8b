use thiserror::Error;

/// Errors reported by the fallible (`try_*`) constructors and operations.
///
/// Instances that were constructed successfully never fail afterwards: pool
/// exhaustion is signalled in-band and the infallible entry points ignore
/// out-of-range input instead of corrupting state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("character {ch:?} at position {position} is outside the alphabet [a-z ]")]
    InvalidSymbol { ch: char, position: usize },

    #[error("got {sentences} seed sentences but {times} seed counts")]
    LengthMismatch { sentences: usize, times: usize },

    #[error("seed sentence {sentence:?} has a zero count")]
    ZeroFrequency { sentence: String },

    #[error("pool capacity {requested} exceeds the maximum of {max}")]
    CapacityTooLarge { requested: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
