//! Shared utilities: constants, checked math, input validation.

pub mod constants;
pub mod math;
pub mod validation;
