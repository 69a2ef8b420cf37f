//! MCP (Model Context Protocol) server for myt-tools.
//!
//! Exposes the JIRA workflow engine to AI assistants as MCP tools over
//! newline-delimited JSON-RPC on stdio.

pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

pub use handlers::{default_registry, GetJiraTransitionsTool, JiraTransitionTool};
pub use server::McpServer;
pub use tools::{McpTool, ToolRegistry};
