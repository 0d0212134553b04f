//! ScanEat Library
//!
//! Food photo recognition, plate nutrition and a per-session meal log.

pub mod build_info;
pub mod clients;
pub mod config;
pub mod insights;
pub mod intake;
pub mod mcp;
pub mod meal_log;
pub mod models;
pub mod nutrition;
pub mod scan;
pub mod session;
pub mod tools;
