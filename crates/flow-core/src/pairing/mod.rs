//! Emparejamiento posicional de points y assertions.

mod engine;
mod status;

pub use engine::{pair_streams, Pairing};
pub use status::{classify, PairingStatus};
