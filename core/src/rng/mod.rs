//! Deterministic random number generation
//!
//! Uses the MT19937-64 algorithm for fast, deterministic random number
//! generation. CRITICAL: All randomness a caller needs MUST go through this
//! module; one stray ambient-entropy draw breaks reproducibility.

mod mt64;
mod streams;

pub use mt64::RngManager;
pub use streams::StreamFactory;
