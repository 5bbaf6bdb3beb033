//! Place Finder Wire Models
//!
//! - MCP: JSON-RPC 2.0 envelopes and method parameters

mod mcp;

pub use mcp::*;
