//! CLI command implementations

pub mod inspect;
pub mod template;
pub mod tune;

mod reporting;
