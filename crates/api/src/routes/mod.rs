//! Route handlers grouped by resource

pub mod frames;
pub mod sessions;
