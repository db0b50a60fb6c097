//! CLI command implementations.

pub mod doctor;
pub mod platforms;
pub mod resolve;
