//! VeriFAQ Core — error taxonomy and configuration.

pub mod config;
pub mod error;

pub use config::{FaqConfig, ScoringWeights, ServerConfig, VerifaqConfig};
pub use error::{Error, Result};
