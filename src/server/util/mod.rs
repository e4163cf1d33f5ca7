//! Small helpers shared across layers.

pub mod ip;
pub mod random;
pub mod text;
