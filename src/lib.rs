//! Income tax under India's old and new regimes, and which one costs less.

pub mod core;
