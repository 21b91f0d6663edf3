pub mod client;

pub use client::{IdentifiedMovie, PosterOracle, VisionClient, IDENTIFY_FAILURE_MESSAGE};

#[cfg(test)]
pub use client::MockPosterOracle;
