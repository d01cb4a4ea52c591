//! MCP protocol implementation
//!
//! This module handles the Model Context Protocol communication: stdio
//! framing, JSON-RPC envelopes and method dispatch.

pub mod framing;
pub mod protocol;
pub mod server;

// Re-export main types
pub use server::McpServer;
