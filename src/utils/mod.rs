//! Utility modules: build info, persistence, logging.

pub mod build_info;
pub mod logging;
pub mod persistence;

pub use build_info::*;
