//! Shared helpers
//!
//! - `math`: rounding and zero-safe averages for report figures
//! - `time`: clock abstraction and month arithmetic

pub mod math;
pub mod time;
