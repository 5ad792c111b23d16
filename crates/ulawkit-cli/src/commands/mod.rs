//! CLI command implementations

pub mod decode;
pub mod encode;
pub mod report;
