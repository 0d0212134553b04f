//! ScanEat Tools module
//!
//! MCP tool implementations for ScanEat.

pub mod insights;
pub mod meal_log;
pub mod scan;
pub mod status;
