//! Place Finder Routes
//!
//! - /mcp - MCP over JSON-RPC 2.0 (tools and prompts)

pub mod mcp;
