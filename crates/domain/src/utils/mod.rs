//! Domain utilities

pub mod serde;
