//! Report generation modules for different output formats
//!
//! This module contains report generators for enumeration results:
//! - human: Human-readable console output
//! - json: JSON format for programmatic use

pub mod human;
pub mod json;

use crate::cycles::CycleEnumerator;
use crate::error::GyreError;

/// Common trait for all report generators
pub trait LoopReportGenerator {
    /// Generate a report from cycle enumeration results
    fn generate_report(&self, enumerator: &CycleEnumerator) -> Result<String, GyreError>;
}

// Re-export for convenience
pub use human::HumanReportGenerator;
pub use json::JsonReportGenerator;
