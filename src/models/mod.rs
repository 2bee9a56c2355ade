//! Domain models for the heart-failure dataset
//!
//! Patient records and the categorical fields derived from them.

pub mod patient;
pub mod types;

// Re-export commonly used types
pub use patient::PatientRecord;
pub use types::{AgeGroup, Gender};
