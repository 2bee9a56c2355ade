//! Algorithm implementations over prepared patient tables
//!
//! This module contains the survival summaries that drive the dashboard.

pub mod summary;
