//! MCP server for ScanEat

pub mod server;

pub use server::ScanEatService;
